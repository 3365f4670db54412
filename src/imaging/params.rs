//! Parameter types and valid ranges for edits.
//!
//! These types describe *what* to do, not *how*. The interactive prompts and
//! the `apply` step parser both validate against the ranges defined here, so
//! [`apply_filter`](super::filters::apply_filter) can trust its inputs.
//!
//! ## Ranges
//!
//! | Parameter | Range |
//! |---|---|
//! | Blur / posterize / sharpen / sepia intensity | `0.1..=1.0` |
//! | Saturation multiplier | `0.0..=3.0` |
//! | Brightness offset | `-100..=100` |
//! | Contrast gain | `0.1..=3.0` |

use super::filters::Filter;
use std::ops::RangeInclusive;
use thiserror::Error;

pub const FILTER_INTENSITY: RangeInclusive<f32> = 0.1..=1.0;
pub const SATURATION: RangeInclusive<f32> = 0.0..=3.0;
pub const BRIGHTNESS: RangeInclusive<i32> = -100..=100;
pub const CONTRAST: RangeInclusive<f32> = 0.1..=3.0;

pub const DEFAULT_INTENSITY: f32 = 1.0;

#[derive(Error, Debug, PartialEq)]
pub enum ParamError {
    #[error("{name} must be between {min} and {max}, got {value}")]
    OutOfRange {
        name: String,
        value: String,
        min: String,
        max: String,
    },
    #[error("{0} does not take an intensity")]
    NoIntensity(Filter),
}

impl ParamError {
    fn out_of_range<T: std::fmt::Debug>(name: &str, value: T, range: &RangeInclusive<T>) -> Self {
        Self::OutOfRange {
            name: name.to_string(),
            value: format!("{value:?}"),
            min: format!("{:?}", range.start()),
            max: format!("{:?}", range.end()),
        }
    }
}

/// Check that `value` lies within `range`, naming the parameter on failure.
pub fn check_range<T>(name: &str, value: T, range: &RangeInclusive<T>) -> Result<T, ParamError>
where
    T: PartialOrd + std::fmt::Debug + Copy,
{
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(ParamError::out_of_range(name, value, range))
    }
}

/// A filter plus the intensity it should run at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterRequest {
    pub filter: Filter,
    pub intensity: f32,
}

impl FilterRequest {
    /// Request at the default intensity of 1.0.
    pub fn new(filter: Filter) -> Self {
        Self {
            filter,
            intensity: DEFAULT_INTENSITY,
        }
    }

    pub fn with_intensity(filter: Filter, intensity: f32) -> Self {
        Self { filter, intensity }
    }

    /// Reject intensities outside the filter's range.
    ///
    /// Filters without an intensity accept only the default.
    pub fn validate(&self) -> Result<(), ParamError> {
        match self.filter.intensity_range() {
            Some(range) => check_range(self.filter.name(), self.intensity, &range).map(|_| ()),
            None if self.intensity == DEFAULT_INTENSITY => Ok(()),
            None => Err(ParamError::NoIntensity(self.filter)),
        }
    }
}
