//! Error type shared by every module of the crate.

use std::io;
use std::path::PathBuf;

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised while decoding, rendering, persisting or inspecting a card.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reading or writing a file failed.
    #[error("I/O failure: {0}")]
    Io(#[from] io::Error),

    /// The request body was not a JSON object.
    #[error("Failed to decode warranty record: {0}")]
    Decode(#[from] serde_json::Error),

    /// A logo file exists but could not be opened or decoded.
    #[error("Failed to load logo image {}: {source}", path.display())]
    Logo {
        /// Location of the offending image.
        path: PathBuf,
        /// Underlying decoder error.
        #[source]
        source: image::ImageError,
    },

    /// `printpdf` refused to build or serialize the page.
    #[error("Failed to render PDF: {0}")]
    Render(String),

    /// A rendered document could not be parsed back.
    #[error("Failed to inspect PDF: {0}")]
    Inspect(#[from] lopdf::Error),

    /// The blocking worker running a generation did not complete.
    #[error("Generation worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl Error {
    pub(crate) fn render(err: impl std::fmt::Debug) -> Self {
        Self::Render(format!("{:?}", err))
    }
}
