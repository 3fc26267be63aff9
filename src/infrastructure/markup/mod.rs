//! Markup rendering adapters

mod markdown;

pub use markdown::MarkdownRenderer;
