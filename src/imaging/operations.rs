//! High-level image operations.
//!
//! An [`Edit`] is one mutating command: a filter request or a
//! brightness/contrast adjustment. Edits parse from the `name[:args]` step
//! syntax used by `image-editor apply`, and [`write_preview`] combines the
//! adjustment helpers with a backend.

use super::adjust::{adjust_brightness_contrast, render_preview};
use super::backend::{BackendError, ImageBackend};
use super::filters::{Filter, apply_filter};
use super::params::{BRIGHTNESS, CONTRAST, FilterRequest, ParamError, check_range};
use image::RgbImage;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// One mutating command against the current image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Edit {
    Filter(FilterRequest),
    BrightnessContrast { brightness: i32, contrast: f32 },
}

impl Edit {
    /// Run the edit, returning a new image. `image` is left untouched.
    pub fn apply(&self, image: &RgbImage) -> RgbImage {
        match *self {
            Edit::Filter(request) => apply_filter(request.filter, image, request.intensity),
            Edit::BrightnessContrast {
                brightness,
                contrast,
            } => adjust_brightness_contrast(image, brightness, contrast),
        }
    }
}

impl From<Filter> for Edit {
    fn from(filter: Filter) -> Self {
        Edit::Filter(FilterRequest::new(filter))
    }
}

impl fmt::Display for Edit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edit::Filter(request) if request.filter.intensity_range().is_some() => {
                write!(f, "{} ({:?})", request.filter, request.intensity)
            }
            Edit::Filter(request) => write!(f, "{}", request.filter),
            Edit::BrightnessContrast {
                brightness,
                contrast,
            } => write!(f, "brightness {brightness:+}, contrast {contrast:?}"),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum StepError {
    #[error("empty edit step")]
    Empty,
    #[error("'{step}': {reason}")]
    Malformed { step: String, reason: String },
    #[error("'{step}': {source}")]
    Invalid { step: String, source: ParamError },
}

impl FromStr for Edit {
    type Err = StepError;

    /// Parse `name`, `name:intensity`, or `brightness:B[,C]`.
    ///
    /// ```
    /// # use image_editor::imaging::{Edit, Filter};
    /// let edit: Edit = "blur:0.5".parse().unwrap();
    /// assert!(matches!(edit, Edit::Filter(r) if r.filter == Filter::Blur));
    /// ```
    fn from_str(step: &str) -> Result<Self, Self::Err> {
        let step = step.trim();
        if step.is_empty() {
            return Err(StepError::Empty);
        }
        let (name, args) = match step.split_once(':') {
            Some((name, args)) => (name.trim(), Some(args.trim())),
            None => (step, None),
        };
        let malformed = |reason: &str| StepError::Malformed {
            step: step.to_string(),
            reason: reason.to_string(),
        };
        let invalid = |source: ParamError| StepError::Invalid {
            step: step.to_string(),
            source,
        };

        let lowered = name.to_ascii_lowercase();
        if matches!(lowered.as_str(), "brightness" | "contrast" | "brightness_contrast") {
            let args = args.ok_or_else(|| malformed("expected brightness[,contrast]"))?;
            let (b, c) = match args.split_once(',') {
                Some((b, c)) => (b.trim(), Some(c.trim())),
                None => (args, None),
            };
            let brightness: i32 = b
                .parse()
                .map_err(|_| malformed("brightness must be an integer"))?;
            let contrast: f32 = match c {
                Some(c) => c.parse().map_err(|_| malformed("contrast must be a number"))?,
                None => 1.0,
            };
            check_range("brightness", brightness, &BRIGHTNESS).map_err(invalid)?;
            check_range("contrast", contrast, &CONTRAST).map_err(invalid)?;
            return Ok(Edit::BrightnessContrast {
                brightness,
                contrast,
            });
        }

        let filter = Filter::from_name(name);
        let request = match args {
            Some(raw) => {
                let intensity: f32 = raw
                    .parse()
                    .map_err(|_| malformed("intensity must be a number"))?;
                FilterRequest::with_intensity(filter, intensity)
            }
            None => FilterRequest::new(filter),
        };
        request.validate().map_err(invalid)?;
        Ok(Edit::Filter(request))
    }
}

/// Render the side-by-side preview and write it through `backend`.
pub fn write_preview(
    backend: &impl ImageBackend,
    original: &RgbImage,
    current: &RgbImage,
    width: u32,
    path: &Path,
) -> Result<(), BackendError> {
    let preview = render_preview(original, current, width);
    backend.save(&preview, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use image::Rgb;

    #[test]
    fn parse_bare_filter_uses_default_intensity() {
        let edit: Edit = "grayscale".parse().unwrap();
        assert_eq!(edit, Edit::from(Filter::Grayscale));
    }

    #[test]
    fn parse_filter_with_intensity() {
        let edit: Edit = "sharpen:0.3".parse().unwrap();
        assert_eq!(
            edit,
            Edit::Filter(FilterRequest::with_intensity(Filter::Sharpen, 0.3))
        );
    }

    #[test]
    fn parse_brightness_and_contrast() {
        let edit: Edit = "brightness:-20,1.5".parse().unwrap();
        assert_eq!(
            edit,
            Edit::BrightnessContrast {
                brightness: -20,
                contrast: 1.5
            }
        );
    }

    #[test]
    fn parse_brightness_alone_keeps_contrast() {
        let edit: Edit = "brightness:40".parse().unwrap();
        assert_eq!(
            edit,
            Edit::BrightnessContrast {
                brightness: 40,
                contrast: 1.0
            }
        );
    }

    #[test]
    fn parse_rejects_out_of_range() {
        assert!(matches!(
            "blur:2".parse::<Edit>(),
            Err(StepError::Invalid { .. })
        ));
        assert!(matches!(
            "brightness:150".parse::<Edit>(),
            Err(StepError::Invalid { .. })
        ));
        assert!(matches!(
            "brightness:0,5".parse::<Edit>(),
            Err(StepError::Invalid { .. })
        ));
    }

    #[test]
    fn parse_rejects_garbage_numbers() {
        assert!(matches!(
            "blur:lots".parse::<Edit>(),
            Err(StepError::Malformed { .. })
        ));
        assert!(matches!(
            "brightness".parse::<Edit>(),
            Err(StepError::Malformed { .. })
        ));
    }

    #[test]
    fn parse_rejects_intensity_on_fixed_filter() {
        let err = "invert:0.5".parse::<Edit>().unwrap_err();
        assert_eq!(err.to_string(), "'invert:0.5': invert does not take an intensity");
    }

    #[test]
    fn parse_empty_step_errors() {
        assert_eq!("  ".parse::<Edit>(), Err(StepError::Empty));
    }

    #[test]
    fn parse_unknown_name_is_passthrough() {
        let edit: Edit = "vignette".parse().unwrap();
        assert_eq!(edit, Edit::from(Filter::Identity));
    }

    #[test]
    fn display_mentions_intensity_only_when_meaningful() {
        assert_eq!(Edit::from(Filter::Rotate).to_string(), "rotate");
        assert_eq!(
            Edit::Filter(FilterRequest::with_intensity(Filter::Blur, 0.5)).to_string(),
            "blur (0.5)"
        );
        assert_eq!(
            Edit::BrightnessContrast {
                brightness: 5,
                contrast: 2.0
            }
            .to_string(),
            "brightness +5, contrast 2.0"
        );
    }

    #[test]
    fn apply_brightness_edit() {
        let edit = Edit::BrightnessContrast {
            brightness: 50,
            contrast: 1.0,
        };
        let out = edit.apply(&RgbImage::new(3, 3));
        assert!(out.pixels().all(|p| p.0 == [50, 50, 50]));
    }

    #[test]
    fn write_preview_saves_combined_image() {
        let backend = MockBackend::new();
        let original = RgbImage::from_pixel(40, 20, Rgb([1, 2, 3]));
        write_preview(&backend, &original, &original, 100, Path::new("/preview.png")).unwrap();

        assert_eq!(
            backend.get_operations(),
            vec![RecordedOp::Save {
                path: "/preview.png".to_string(),
                width: 200,
                height: 50,
            }]
        );
    }
}
