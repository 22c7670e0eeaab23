//! Logo handling built on top of the [`image`] crate.
//!
//! The logo is decoded on every generation, flattened to RGB and stretched
//! into the fixed logo box of the [`CardLayout`](crate::layout::CardLayout).

use std::path::Path;

use image::{DynamicImage, GenericImageView, ImageError, ImageResult};
use log::debug;
use printpdf::{Mm, PdfLayerReference};

use crate::error::{Error, Result};
use crate::layout::Rect;

const DEFAULT_IMAGE_DPI: f64 = 300.0;
const MM_PER_INCH: f64 = 25.4;

/// Loads an image from in-memory bytes.
pub fn decode_image_from_bytes(bytes: impl AsRef<[u8]>) -> ImageResult<DynamicImage> {
    image::load_from_memory(bytes.as_ref())
}

/// Loads an image from the given path, guessing the format from its content.
pub fn decode_image_from_path(path: impl AsRef<Path>) -> ImageResult<DynamicImage> {
    image::io::Reader::open(path.as_ref())
        .map_err(ImageError::IoError)?
        .with_guessed_format()
        .map_err(ImageError::IoError)?
        .decode()
}

/// Size in millimetres `printpdf` gives an image of this resolution at `dpi`.
fn natural_size(image: &DynamicImage, dpi: f64) -> (f64, f64) {
    let (px_width, px_height) = image.dimensions();
    (
        MM_PER_INCH * px_width as f64 / dpi,
        MM_PER_INCH * px_height as f64 / dpi,
    )
}

/// A decoded company logo ready to be placed on a card.
#[derive(Clone, Debug)]
pub struct LogoImage {
    image: DynamicImage,
}

impl LogoImage {
    /// Wraps an already decoded image.
    pub fn new(image: DynamicImage) -> Self {
        Self { image }
    }

    /// Decodes a logo from raw bytes.
    pub fn from_bytes(bytes: impl AsRef<[u8]>) -> Result<Self> {
        decode_image_from_bytes(bytes)
            .map(Self::new)
            .map_err(|source| Error::Logo {
                path: "<memory>".into(),
                source,
            })
    }

    /// Decodes the logo stored at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        decode_image_from_path(path)
            .map(Self::new)
            .map_err(|source| Error::Logo {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Pixel dimensions of the source image.
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Scale factors that stretch the image to exactly cover `target`.
    pub fn scale_to(&self, target: Rect) -> (f64, f64) {
        let (width, height) = natural_size(&self.image, DEFAULT_IMAGE_DPI);
        let scale = |desired: f64, natural: f64| {
            if natural > f64::EPSILON {
                desired / natural
            } else {
                1.0
            }
        };
        (scale(target.width, width), scale(target.height, height))
    }

    /// Draws the logo into `target` on the given layer.
    pub(crate) fn draw(&self, layer: PdfLayerReference, target: Rect) {
        let (scale_x, scale_y) = self.scale_to(target);
        // printpdf mishandles alpha channels, so embed plain RGB.
        let rgb = DynamicImage::ImageRgb8(self.image.to_rgb8());
        printpdf::Image::from_dynamic_image(&rgb).add_to_layer(
            layer,
            Some(Mm(target.x)),
            Some(Mm(target.y)),
            None,
            Some(scale_x),
            Some(scale_y),
            Some(DEFAULT_IMAGE_DPI),
        );
    }
}

/// Loads the logo at `path`, returning `None` when no file exists there.
pub fn load_logo(path: impl AsRef<Path>) -> Result<Option<LogoImage>> {
    let path = path.as_ref();
    if !path.is_file() {
        debug!("No logo at {}; rendering without it", path.display());
        return Ok(None);
    }
    LogoImage::from_path(path).map(Some)
}
