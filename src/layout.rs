//! Fixed page geometry of a warranty card.
//!
//! All measurements are kept in millimetres measured from the bottom-left
//! corner of the page, which is the coordinate system used by `printpdf`.

const MM_PER_INCH: f64 = 25.4;
const MM_PER_POINT: f64 = MM_PER_INCH / 72.0;

const LETTER_WIDTH_IN: f64 = 8.5;
const LETTER_HEIGHT_IN: f64 = 11.0;

const LOGO_LEFT_IN: f64 = 0.5;
const LOGO_BOTTOM_FROM_TOP_IN: f64 = 1.5;
const LOGO_WIDTH_IN: f64 = 2.0;
const LOGO_HEIGHT_IN: f64 = 1.0;

const TEXT_LEFT_IN: f64 = 1.0;
const TEXT_TOP_FROM_TOP_IN: f64 = 2.0;
const LINE_SPACING_PT: f64 = 20.0;
const FONT_SIZE_PT: f64 = 12.0;

/// Number of text lines printed on every card.
pub const LINE_COUNT: usize = 7;

/// Converts inches to millimetres.
pub fn inches(value: f64) -> f64 {
    value * MM_PER_INCH
}

/// Converts typographic points to millimetres.
pub fn points(value: f64) -> f64 {
    value * MM_PER_POINT
}

/// Axis-aligned rectangle in millimetres; `x`/`y` locate the bottom-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Placement of the logo box and text block on a US Letter page.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardLayout {
    page_width: f64,
    page_height: f64,
    logo: Rect,
    text_left: f64,
    text_top: f64,
    line_spacing: f64,
    font_size: f64,
}

impl CardLayout {
    /// The only layout cards are rendered with.
    pub fn letter() -> Self {
        let page_height = inches(LETTER_HEIGHT_IN);
        Self {
            page_width: inches(LETTER_WIDTH_IN),
            page_height,
            logo: Rect {
                x: inches(LOGO_LEFT_IN),
                y: page_height - inches(LOGO_BOTTOM_FROM_TOP_IN),
                width: inches(LOGO_WIDTH_IN),
                height: inches(LOGO_HEIGHT_IN),
            },
            text_left: inches(TEXT_LEFT_IN),
            text_top: page_height - inches(TEXT_TOP_FROM_TOP_IN),
            line_spacing: points(LINE_SPACING_PT),
            font_size: FONT_SIZE_PT,
        }
    }

    /// Page width in millimetres.
    pub fn page_width(&self) -> f64 {
        self.page_width
    }

    /// Page height in millimetres.
    pub fn page_height(&self) -> f64 {
        self.page_height
    }

    /// Box the logo is stretched into.
    pub fn logo(&self) -> Rect {
        self.logo
    }

    /// Font size in points.
    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    /// Text origin of line `index`, counted from the top.
    pub fn baseline(&self, index: usize) -> (f64, f64) {
        (
            self.text_left,
            self.text_top - self.line_spacing * index as f64,
        )
    }
}

impl Default for CardLayout {
    fn default() -> Self {
        Self::letter()
    }
}
