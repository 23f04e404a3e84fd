use std::fmt::Display;

pub use annotate_snippets::Renderer;
use annotate_snippets::{Level, Snippet};
pub use text_size::TextRange;

/// Error attached to a span of the source text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    message: String,
    range: TextRange,
    label: &'static str,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>, range: TextRange) -> Self {
        Self { message: message.into(), range, label: "here" }
    }

    pub fn with_label(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    /// Renders the diagnostic against `text`, the contents of `path`.
    pub fn render<'a>(
        &'a self,
        renderer: &'a Renderer,
        path: &'a str,
        text: &'a str,
    ) -> impl Display + 'a {
        let annotation = Level::Error.span(self.range.into()).label(self.label);
        let snippet = Snippet::source(text).origin(path).fold(true).annotation(annotation);
        renderer.render(Level::Error.title(&self.message).snippet(snippet))
    }
}

#[cfg(test)]
mod tests {
    use text_size::TextSize;

    use super::*;

    #[test]
    fn renders_span() {
        let text = "int a[10]\n";
        let range = TextRange::at(TextSize::new(4), TextSize::new(1));
        let diagnostic =
            Diagnostic::error("fold crosses a subtree", range).with_label("starts here");

        let rendered = diagnostic.render(&Renderer::plain(), "test.cc", text).to_string();

        assert!(rendered.contains("error: fold crosses a subtree"), "{rendered}");
        assert!(rendered.contains("test.cc"), "{rendered}");
        assert!(rendered.contains("starts here"), "{rendered}");
    }
}
