//! Pure Rust codec backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP, BMP) | `image::ImageReader` with guessed format |
//! | Color normalization | `DynamicImage::into_rgb8` |
//! | Encode | `ImageBuffer::save_with_format`, format from the extension |

use super::backend::{BackendError, ImageBackend};
use image::{ImageFormat, ImageReader, RgbImage};
use std::path::Path;
use std::sync::LazyLock;

/// Formats whose encoders are compiled in.
const OUTPUT_CANDIDATES: &[ImageFormat] = &[
    ImageFormat::Jpeg,
    ImageFormat::Png,
    ImageFormat::Tiff,
    ImageFormat::WebP,
    ImageFormat::Bmp,
];

static SUPPORTED_OUTPUT_EXTENSIONS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    OUTPUT_CANDIDATES
        .iter()
        .filter(|fmt| fmt.writing_enabled())
        .flat_map(|fmt| fmt.extensions_str().iter().copied())
        .collect()
});

/// Returns the file extensions [`RustBackend::save`](ImageBackend::save) can encode.
pub fn supported_output_extensions() -> &'static [&'static str] {
    &SUPPORTED_OUTPUT_EXTENSIONS
}

/// Codec backend using the `image` crate.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve the output format from the path's extension.
fn output_format(path: &Path) -> Result<ImageFormat, BackendError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    ImageFormat::from_extension(&ext)
        .filter(|fmt| OUTPUT_CANDIDATES.contains(fmt) && fmt.writing_enabled())
        .ok_or(BackendError::UnsupportedFormat(if ext.is_empty() {
            "(no extension)".to_string()
        } else {
            ext
        }))
}

impl ImageBackend for RustBackend {
    fn load(&self, path: &Path) -> Result<RgbImage, BackendError> {
        let decoded = ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(|source| BackendError::Decode {
                path: path.to_path_buf(),
                source,
            })?;
        log::debug!(
            "decoded {} ({}x{}, {:?})",
            path.display(),
            decoded.width(),
            decoded.height(),
            decoded.color()
        );
        Ok(decoded.into_rgb8())
    }

    fn save(&self, image: &RgbImage, path: &Path) -> Result<(), BackendError> {
        let format = output_format(path)?;
        image
            .save_with_format(path, format)
            .map_err(|source| BackendError::Encode {
                path: path.to_path_buf(),
                source,
            })?;
        log::debug!("encoded {} as {:?}", path.display(), format);
        Ok(())
    }
}
