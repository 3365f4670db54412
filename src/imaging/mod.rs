//! Image processing: codecs, filters, and adjustments.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode / encode** | `image` codecs behind [`ImageBackend`] |
//! | **Filters** | `image::imageops` + `imageproc` (see [`filters`]) |
//! | **Brightness / contrast** | per-pixel scale and offset |
//! | **Preview** | `imageops::resize` (triangle) + `imageops::replace` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for kernel sizes, steps, and geometry (unit testable)
//! - **Parameters**: Valid ranges and [`FilterRequest`]
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Filters / Adjust**: The pixel operations themselves
//! - **Operations**: [`Edit`] commands and preview writing

pub mod adjust;
pub mod backend;
pub mod calculations;
mod color;
pub mod filters;
pub mod operations;
pub mod params;
pub mod rust_backend;

pub use adjust::{adjust_brightness_contrast, render_preview, resize_for_display, side_by_side};
pub use backend::{BackendError, ImageBackend};
pub use filters::{Filter, apply_filter};
pub use operations::{Edit, StepError, write_preview};
pub use params::{FilterRequest, ParamError};
pub use rust_backend::RustBackend;
