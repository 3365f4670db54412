//! Adjustments that are not part of filter dispatch: brightness/contrast and
//! the preview composition helpers.

use super::calculations::display_dimensions;
use image::imageops::{self, FilterType};
use image::RgbImage;

/// `clamp(round(v * contrast + brightness))` per channel, saturating at 0 and 255.
pub fn adjust_brightness_contrast(image: &RgbImage, brightness: i32, contrast: f32) -> RgbImage {
    let offset = brightness as f32;
    let mut adjusted = image.clone();
    for pixel in adjusted.pixels_mut() {
        pixel.0 = pixel
            .0
            .map(|c| (c as f32 * contrast + offset).round().clamp(0.0, 255.0) as u8);
    }
    adjusted
}

/// Scale to `target_width`, preserving aspect ratio. Used for previews only.
///
/// Very tall images are fitted to
/// [`MAX_DISPLAY_HEIGHT`](super::calculations::MAX_DISPLAY_HEIGHT) instead.
pub fn resize_for_display(image: &RgbImage, target_width: u32) -> RgbImage {
    let (width, height) = display_dimensions(image.dimensions(), target_width);
    if (width, height) == image.dimensions() {
        return image.clone();
    }
    imageops::resize(image, width, height, FilterType::Triangle)
}

/// Concatenate two images horizontally on a black canvas.
pub fn side_by_side(left: &RgbImage, right: &RgbImage) -> RgbImage {
    let width = left.width() + right.width();
    let height = left.height().max(right.height());
    let mut canvas = RgbImage::new(width, height);
    imageops::replace(&mut canvas, left, 0, 0);
    imageops::replace(&mut canvas, right, left.width() as i64, 0);
    canvas
}

/// The original and edited images, each scaled to `width`, side by side.
pub fn render_preview(original: &RgbImage, current: &RgbImage, width: u32) -> RgbImage {
    side_by_side(
        &resize_for_display(original, width),
        &resize_for_display(current, width),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn brightness_lifts_black() {
        let out = adjust_brightness_contrast(&RgbImage::new(10, 10), 50, 1.0);
        assert!(out.pixels().all(|p| p.0 == [50, 50, 50]));
    }

    #[test]
    fn brightness_saturates_without_wrapping() {
        let image = RgbImage::from_pixel(2, 2, Rgb([250, 10, 128]));
        let up = adjust_brightness_contrast(&image, 100, 1.0);
        assert_eq!(up.get_pixel(0, 0).0, [255, 110, 228]);
        let down = adjust_brightness_contrast(&image, -100, 1.0);
        assert_eq!(down.get_pixel(0, 0).0, [150, 0, 28]);
    }

    #[test]
    fn contrast_scales_then_offsets() {
        let image = RgbImage::from_pixel(1, 1, Rgb([100, 20, 200]));
        let out = adjust_brightness_contrast(&image, -10, 1.5);
        assert_eq!(out.get_pixel(0, 0).0, [140, 20, 255]);
    }

    #[test]
    fn neutral_adjustment_is_identity() {
        let image = RgbImage::from_fn(8, 8, |x, y| Rgb([x as u8 * 30, y as u8 * 30, 7]));
        assert_eq!(adjust_brightness_contrast(&image, 0, 1.0), image);
    }

    #[test]
    fn resize_for_display_preserves_aspect() {
        let image = RgbImage::new(1200, 800);
        assert_eq!(resize_for_display(&image, 600).dimensions(), (600, 400));
    }

    #[test]
    fn resize_for_display_upscales_small_images() {
        let image = RgbImage::new(100, 50);
        assert_eq!(resize_for_display(&image, 600).dimensions(), (600, 300));
    }

    #[test]
    fn side_by_side_places_right_after_left() {
        let left = RgbImage::from_pixel(3, 2, Rgb([255, 0, 0]));
        let right = RgbImage::from_pixel(2, 4, Rgb([0, 0, 255]));
        let out = side_by_side(&left, &right);

        assert_eq!(out.dimensions(), (5, 4));
        assert_eq!(out.get_pixel(2, 1).0, [255, 0, 0]);
        assert_eq!(out.get_pixel(3, 3).0, [0, 0, 255]);
        // Below the shorter left image the canvas stays black.
        assert_eq!(out.get_pixel(0, 3).0, [0, 0, 0]);
    }

    #[test]
    fn tall_strip_preview_stays_bounded() {
        let strip = RgbImage::new(3, 4000);
        let preview = render_preview(&strip, &strip, 600);
        assert_eq!(preview.dimensions(), (4, 2048));
    }

    #[test]
    fn preview_is_twice_display_width() {
        let original = RgbImage::new(300, 200);
        let preview = render_preview(&original, &original, 600);
        assert_eq!(preview.dimensions(), (1200, 400));
    }
}
