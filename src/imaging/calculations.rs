//! Pure calculation functions for filter parameters and preview geometry.
//!
//! All functions here are pure and testable without any images.

/// Gaussian kernel size for the blur filter.
///
/// The intensity scales a base size of 15 and the result is truncated; even
/// sizes are bumped to the next odd value so the kernel has a center tap.
///
/// # Examples
/// ```
/// # use image_editor::imaging::calculations::blur_kernel_size;
/// assert_eq!(blur_kernel_size(1.0), 15);
/// assert_eq!(blur_kernel_size(0.4), 7);
/// ```
pub fn blur_kernel_size(intensity: f32) -> u32 {
    let size = (15.0 * intensity) as u32;
    if size % 2 == 0 { size + 1 } else { size }
}

/// Gaussian sigma implied by a kernel size when no sigma is given explicitly.
///
/// Uses the conventional `0.3 * ((k - 1) / 2 - 1) + 0.8` relation, which
/// yields 0.5 for a 1-tap kernel and grows linearly from there.
pub fn gaussian_sigma(kernel_size: u32) -> f32 {
    0.3 * ((kernel_size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Quantization step for the posterize filter.
///
/// Intensity 1.0 gives a step of 1 (no change); intensity 0.0 gives 65.
pub fn posterize_step(intensity: f32) -> u8 {
    let shift = (64.0 * (1.0 - intensity)) as u32;
    (shift.min(254) + 1) as u8
}

/// Tallest preview half, in pixels.
pub const MAX_DISPLAY_HEIGHT: u32 = 2048;

/// Dimensions of an image scaled to `target_width`, preserving aspect ratio.
///
/// # Arguments
/// * `source` - Original image dimensions (width, height)
/// * `target_width` - Desired output width in pixels
///
/// # Returns
/// * `(width, height)` - Height is rounded and never below 1. Images that
///   would come out taller than [`MAX_DISPLAY_HEIGHT`] are fitted to that
///   height instead, narrowing the width (never below 1).
pub fn display_dimensions(source: (u32, u32), target_width: u32) -> (u32, u32) {
    let (src_w, src_h) = source;
    let aspect = src_w as f64 / src_h as f64;
    let height = (target_width as f64 / aspect).round();
    if height > MAX_DISPLAY_HEIGHT as f64 {
        let width = (MAX_DISPLAY_HEIGHT as f64 * aspect).round() as u32;
        return (width.max(1), MAX_DISPLAY_HEIGHT);
    }
    (target_width, (height as u32).max(1))
}

/// Offset at which a quarter-turned image is placed back onto a canvas of
/// the original size so both share the same center.
///
/// For a `w x h` source the rotated image is `h x w`; the offsets are
/// negative along the axis where it overhangs the canvas.
pub fn rotation_offset(source: (u32, u32)) -> (i64, i64) {
    let (w, h) = (source.0 as i64, source.1 as i64);
    ((w - h) / 2, (h - w) / 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // blur_kernel_size tests
    // =========================================================================

    #[test]
    fn blur_full_intensity_is_15() {
        assert_eq!(blur_kernel_size(1.0), 15);
    }

    #[test]
    fn blur_minimum_intensity_is_single_tap() {
        // 15 * 0.1 = 1.5 → 1, already odd
        assert_eq!(blur_kernel_size(0.1), 1);
    }

    #[test]
    fn blur_even_size_is_bumped() {
        // 15 * 0.4 = 6 → 7
        assert_eq!(blur_kernel_size(0.4), 7);
    }

    #[test]
    fn blur_truncates_before_forcing_odd() {
        // 15 * 0.5 = 7.5 → 7
        assert_eq!(blur_kernel_size(0.5), 7);
    }

    #[test]
    fn blur_zero_intensity_is_single_tap() {
        assert_eq!(blur_kernel_size(0.0), 1);
    }

    #[test]
    fn sigma_grows_with_kernel() {
        assert!((gaussian_sigma(1) - 0.5).abs() < 1e-6);
        assert!((gaussian_sigma(15) - 2.6).abs() < 1e-5);
        assert!(gaussian_sigma(7) < gaussian_sigma(9));
    }

    // =========================================================================
    // posterize_step tests
    // =========================================================================

    #[test]
    fn posterize_full_intensity_is_identity_step() {
        assert_eq!(posterize_step(1.0), 1);
    }

    #[test]
    fn posterize_zero_intensity_is_coarsest() {
        assert_eq!(posterize_step(0.0), 65);
    }

    #[test]
    fn posterize_half_intensity() {
        assert_eq!(posterize_step(0.5), 33);
    }

    #[test]
    fn posterize_above_one_saturates_to_identity() {
        assert_eq!(posterize_step(1.5), 1);
    }

    // =========================================================================
    // display_dimensions tests
    // =========================================================================

    #[test]
    fn display_landscape() {
        // 1200x800 (3:2) → 600x400
        assert_eq!(display_dimensions((1200, 800), 600), (600, 400));
    }

    #[test]
    fn display_portrait() {
        // 800x1200 (2:3) → 600x900
        assert_eq!(display_dimensions((800, 1200), 600), (600, 900));
    }

    #[test]
    fn display_rounds_height() {
        // 1000x333 → 600 / 3.003 = 199.8 → 200
        assert_eq!(display_dimensions((1000, 333), 600), (600, 200));
    }

    #[test]
    fn display_extreme_panorama_keeps_one_row() {
        assert_eq!(display_dimensions((10_000, 1), 600), (600, 1));
    }

    #[test]
    fn display_tall_strip_is_fitted_to_max_height() {
        // 3x4000 at width 600 would be 800000 rows
        assert_eq!(display_dimensions((3, 4000), 600), (2, MAX_DISPLAY_HEIGHT));
        assert_eq!(display_dimensions((1, 100_000), 600), (1, MAX_DISPLAY_HEIGHT));
    }

    #[test]
    fn display_height_at_cap_is_untouched() {
        assert_eq!(display_dimensions((600, 2048), 600), (600, 2048));
    }

    // =========================================================================
    // rotation_offset tests
    // =========================================================================

    #[test]
    fn rotation_offset_square_is_zero() {
        assert_eq!(rotation_offset((100, 100)), (0, 0));
    }

    #[test]
    fn rotation_offset_landscape() {
        // 6x2 source → 2x6 rotated, centered: x += 2, y -= 2
        assert_eq!(rotation_offset((6, 2)), (2, -2));
    }

    #[test]
    fn rotation_offset_portrait() {
        assert_eq!(rotation_offset((2, 6)), (-2, 2));
    }
}
