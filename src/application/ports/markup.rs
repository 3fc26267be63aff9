//! Markup rendering port interface

/// Port for turning the model's lightweight markup into HTML
pub trait MarkupRenderer: Send + Sync {
    fn render(&self, markup: &str) -> String;
}
