//! Image codec backend trait and shared error type.
//!
//! The [`ImageBackend`] trait is the seam between the editor and the codec
//! layer: it decodes a file into an RGB buffer and encodes a buffer back to
//! disk. Everything between load and save works on in-memory
//! [`RgbImage`](image::RgbImage) values and never touches the backend.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), backed by the `image`
//! crate's pure-Rust codecs.

use image::RgbImage;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("Failed to encode {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
}

/// Trait for image codec backends.
///
/// Implementations must leave the image passed to [`save`](Self::save)
/// untouched; the editor keeps using it after a save attempt fails.
pub trait ImageBackend {
    /// Decode the file at `path` into an 8-bit RGB buffer.
    fn load(&self, path: &Path) -> Result<RgbImage, BackendError>;

    /// Encode `image` to `path`, choosing the codec from the file extension.
    fn save(&self, image: &RgbImage, path: &Path) -> Result<(), BackendError>;
}
