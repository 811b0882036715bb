use std::fmt::Write;

/// Sink for rendered text and tag markup.
pub trait MarkupOutput {
    type Error;

    /// Literal source text. Implementations escape as their format requires.
    fn write_text(&mut self, text: &str) -> Result<(), Self::Error>;
    /// Markup produced by a tag, written verbatim.
    fn write_markup(&mut self, markup: &str) -> Result<(), Self::Error>;
}

/// Writes HTML, entity-encoding `&`, `<`, `>`, `"` and `'` in text.
pub struct HtmlOutput<W: Write> {
    writer: W,
}

impl<W: Write> HtmlOutput<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> MarkupOutput for HtmlOutput<W> {
    type Error = std::fmt::Error;

    fn write_text(&mut self, text: &str) -> Result<(), Self::Error> {
        self.writer
            .write_str(&html_escape::encode_quoted_attribute(text))
    }

    fn write_markup(&mut self, markup: &str) -> Result<(), Self::Error> {
        self.writer.write_str(markup)
    }
}
