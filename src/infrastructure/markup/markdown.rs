//! Markdown renderer adapter

use pulldown_cmark::{html, Options, Parser};

use crate::application::ports::MarkupRenderer;

/// CommonMark renderer backed by pulldown-cmark
#[derive(Debug, Clone, Copy)]
pub struct MarkdownRenderer {
    options: Options,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self {
            options: Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH,
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkupRenderer for MarkdownRenderer {
    fn render(&self, markup: &str) -> String {
        let parser = Parser::new_ext(markup, self.options);
        let mut out = String::with_capacity(markup.len() + markup.len() / 2);
        html::push_html(&mut out, parser);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_paragraph() {
        let html = MarkdownRenderer::new().render("Speaker 1: Hello.");
        assert_eq!(html, "<p>Speaker 1: Hello.</p>\n");
    }

    #[test]
    fn renders_speaker_labels_in_bold() {
        let html = MarkdownRenderer::new().render("**Speaker 1:** Hi\n\n**Speaker 2:** Hey");
        assert_eq!(
            html,
            "<p><strong>Speaker 1:</strong> Hi</p>\n<p><strong>Speaker 2:</strong> Hey</p>\n"
        );
    }

    #[test]
    fn renders_headings_and_lists() {
        let html = MarkdownRenderer::new().render("# Transcript\n\n- one\n- two");
        assert!(html.contains("<h1>Transcript</h1>"));
        assert!(html.contains("<li>one</li>"));
    }

    #[test]
    fn empty_input_renders_nothing() {
        assert_eq!(MarkdownRenderer::new().render(""), "");
    }
}
