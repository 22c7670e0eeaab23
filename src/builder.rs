//! Card construction on top of `printpdf`.

use std::io::{BufWriter, Cursor};

use log::warn;
use printpdf::{BuiltinFont, Mm, PdfDocument};

use crate::elements::LogoImage;
use crate::error::{Error, Result};
use crate::layout::CardLayout;
use crate::winansi;

const DEFAULT_TITLE: &str = "Warranty Card";
const LAYER_NAME: &str = "Card";

/// Bytes of a finished single-page card.
#[derive(Clone, Debug)]
pub struct RenderedCard {
    pub bytes: Vec<u8>,
}

/// Builder for one warranty card page.
#[derive(Default)]
pub struct CardBuilder {
    title: Option<String>,
    layout: CardLayout,
    logo: Option<LogoImage>,
    lines: Vec<String>,
}

impl CardBuilder {
    /// Creates a new builder using the letter layout and no content.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the document title stored in the PDF metadata.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the logo drawn in the top-left box, if any.
    pub fn with_logo(mut self, logo: impl Into<Option<LogoImage>>) -> Self {
        self.logo = logo.into();
        self
    }

    /// Appends one line of text below the previous ones.
    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    /// Appends several lines of text in order.
    pub fn with_lines<I>(mut self, lines: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.lines.extend(lines.into_iter().map(Into::into));
        self
    }

    /// Renders the page and serializes it into PDF bytes.
    pub fn render(self) -> Result<RenderedCard> {
        let layout = self.layout;
        let title = self.title.as_deref().unwrap_or(DEFAULT_TITLE);
        let (document, page, layer) = PdfDocument::new(
            title,
            Mm(layout.page_width()),
            Mm(layout.page_height()),
            LAYER_NAME,
        );
        let layer = document.get_page(page).get_layer(layer);

        if let Some(logo) = &self.logo {
            logo.draw(layer.clone(), layout.logo());
        }

        let font = document
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(Error::render)?;
        for (index, line) in self.lines.iter().enumerate() {
            let (x, y) = layout.baseline(index);
            let text = winansi::printable(line);
            if text != line.as_str() {
                warn!(
                    "Line {} has characters Helvetica cannot draw; printing {:?}",
                    index + 1,
                    text
                );
            }
            layer.use_text(text.into_owned(), layout.font_size(), Mm(x), Mm(y), &font);
        }

        let mut writer = BufWriter::new(Cursor::new(Vec::new()));
        document.save(&mut writer).map_err(Error::render)?;
        let bytes = writer
            .into_inner()
            .map_err(|err| Error::Io(err.into_error()))?
            .into_inner();

        Ok(RenderedCard { bytes })
    }
}

#[cfg(test)]
mod tests {
    use super::CardBuilder;

    #[test]
    fn renders_non_empty_pdf() {
        let card = CardBuilder::new()
            .with_line("Hello, card!")
            .render()
            .expect("render card");

        assert!(card.bytes.starts_with(b"%PDF"));
    }
}
