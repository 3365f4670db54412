//! Filter dispatch.
//!
//! Each [`Filter`] maps to a single call into `image` or `imageproc`:
//!
//! | Filter | Crate / function |
//! |---|---|
//! | Grayscale | `imageops::grayscale`, expanded back to RGB |
//! | Sepia | fixed color matrix per pixel, blended by intensity |
//! | Blur | `imageproc::filter::gaussian_blur_f32` |
//! | Invert | `imageops::invert` |
//! | Edges | `imageproc::edges::canny` (100 / 200) per channel, OR-ed |
//! | Sketch | gray divided by its inverted complement, scale 256 |
//! | Posterize | per-channel floor to a multiple of the step |
//! | Emboss / Sharpen | `imageops::filter3x3` over an edge-replicated border |
//! | Flip H / V | `imageops::flip_horizontal` / `flip_vertical` |
//! | Rotate | `imageops::rotate270` re-centered onto the source canvas |
//! | Saturation | HSV round trip with scaled saturation |
//!
//! Dispatch never mutates its input and performs no range validation;
//! callers check intensities against [`params`](super::params) first.

use super::calculations::{
    blur_kernel_size, gaussian_sigma, posterize_step, rotation_offset,
};
use super::color::Hsv;
use super::params::{FILTER_INTENSITY, SATURATION};
use image::{DynamicImage, GrayImage, ImageBuffer, Luma, Rgb, RgbImage, imageops};
use std::fmt;
use std::ops::RangeInclusive;
use std::time::Instant;

/// Rows produce R, G, B from `[r, g, b]`. Red and blue weights are swapped
/// relative to the textbook sepia matrix, matching a transform applied to
/// BGR-ordered pixels.
const SEPIA_MATRIX: [[f32; 3]; 3] = [
    [0.189, 0.769, 0.393],
    [0.168, 0.686, 0.349],
    [0.131, 0.534, 0.272],
];

const EMBOSS_KERNEL: [f32; 9] = [-2.0, -1.0, 0.0, -1.0, 1.0, 1.0, 0.0, 1.0, 2.0];

const SHARPEN_KERNEL: [f32; 9] = [0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0];

const CANNY_LOW: f32 = 100.0;
const CANNY_HIGH: f32 = 200.0;

/// The closed set of filters the editor can dispatch.
///
/// [`Filter::Identity`] is the explicit passthrough that unrecognized filter
/// names resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Filter {
    Grayscale,
    Sepia,
    Blur,
    Invert,
    Edges,
    Sketch,
    Posterize,
    Emboss,
    Sharpen,
    FlipHorizontal,
    FlipVertical,
    Rotate,
    Saturation,
    Identity,
}

impl Filter {
    pub const ALL: [Filter; 13] = [
        Filter::Grayscale,
        Filter::Sepia,
        Filter::Blur,
        Filter::Invert,
        Filter::Edges,
        Filter::Sketch,
        Filter::Posterize,
        Filter::Emboss,
        Filter::Sharpen,
        Filter::FlipHorizontal,
        Filter::FlipVertical,
        Filter::Rotate,
        Filter::Saturation,
    ];

    /// Canonical identifier, as accepted by [`Filter::from_name`].
    pub fn name(self) -> &'static str {
        match self {
            Filter::Grayscale => "grayscale",
            Filter::Sepia => "sepia",
            Filter::Blur => "blur",
            Filter::Invert => "invert",
            Filter::Edges => "edges",
            Filter::Sketch => "sketch",
            Filter::Posterize => "posterize",
            Filter::Emboss => "emboss",
            Filter::Sharpen => "sharpen",
            Filter::FlipHorizontal => "flip_horizontal",
            Filter::FlipVertical => "flip_vertical",
            Filter::Rotate => "rotate",
            Filter::Saturation => "saturation",
            Filter::Identity => "identity",
        }
    }

    /// Resolve a filter identifier.
    ///
    /// Matching ignores case and treats `-` like `_`. Unknown names resolve
    /// to [`Filter::Identity`], which returns the image unchanged.
    pub fn from_name(name: &str) -> Filter {
        let normalized = name.trim().to_ascii_lowercase().replace('-', "_");
        match Filter::ALL.iter().find(|f| f.name() == normalized) {
            Some(filter) => *filter,
            None => {
                if normalized != Filter::Identity.name() {
                    log::warn!("unknown filter '{name}', leaving image unchanged");
                }
                Filter::Identity
            }
        }
    }

    /// Valid intensity range, or `None` when the filter ignores intensity.
    pub fn intensity_range(self) -> Option<RangeInclusive<f32>> {
        match self {
            Filter::Sepia | Filter::Blur | Filter::Posterize | Filter::Sharpen => {
                Some(FILTER_INTENSITY)
            }
            Filter::Saturation => Some(SATURATION),
            _ => None,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Apply `filter` to `image` at `intensity`, returning a new buffer.
pub fn apply_filter(filter: Filter, image: &RgbImage, intensity: f32) -> RgbImage {
    let started = Instant::now();
    let result = match filter {
        Filter::Grayscale => gray_to_rgb(imageops::grayscale(image)),
        Filter::Sepia => blend(image, &sepia(image), intensity),
        Filter::Blur => blur(image, intensity),
        Filter::Invert => {
            let mut inverted = image.clone();
            imageops::invert(&mut inverted);
            inverted
        }
        Filter::Edges => gray_to_rgb(edges(image)),
        Filter::Sketch => gray_to_rgb(sketch(&imageops::grayscale(image))),
        Filter::Posterize => posterize(image, posterize_step(intensity)),
        Filter::Emboss => filter3x3_replicated(image, &EMBOSS_KERNEL),
        Filter::Sharpen => blend(image, &filter3x3_replicated(image, &SHARPEN_KERNEL), intensity),
        Filter::FlipHorizontal => imageops::flip_horizontal(image),
        Filter::FlipVertical => imageops::flip_vertical(image),
        Filter::Rotate => rotate_quarter(image),
        Filter::Saturation => saturate(image, intensity),
        Filter::Identity => image.clone(),
    };
    log::debug!(
        "{filter} (intensity {intensity}) on {}x{} took {:?}",
        image.width(),
        image.height(),
        started.elapsed()
    );
    result
}

fn gray_to_rgb(gray: GrayImage) -> RgbImage {
    DynamicImage::ImageLuma8(gray).into_rgb8()
}

/// `(1 - i) * original + i * effect`, rounded and saturated per channel.
///
/// Intensity at or above 1.0 returns the effect as-is.
fn blend(original: &RgbImage, effect: &RgbImage, intensity: f32) -> RgbImage {
    if intensity >= 1.0 {
        return effect.clone();
    }
    let keep = 1.0 - intensity;
    ImageBuffer::from_fn(original.width(), original.height(), |x, y| {
        let a = original.get_pixel(x, y).0;
        let b = effect.get_pixel(x, y).0;
        Rgb(std::array::from_fn(|c| {
            (a[c] as f32 * keep + b[c] as f32 * intensity)
                .round()
                .clamp(0.0, 255.0) as u8
        }))
    })
}

fn sepia(image: &RgbImage) -> RgbImage {
    let mut toned = image.clone();
    for pixel in toned.pixels_mut() {
        let [r, g, b] = pixel.0.map(|c| c as f32);
        pixel.0 = SEPIA_MATRIX.map(|row| {
            (row[0] * r + row[1] * g + row[2] * b)
                .round()
                .clamp(0.0, 255.0) as u8
        });
    }
    toned
}

/// Canny per channel, with the three edge maps OR-ed together.
fn edges(image: &RgbImage) -> GrayImage {
    let (width, height) = image.dimensions();
    let mut combined = GrayImage::new(width, height);
    for channel in 0..3 {
        let plane = GrayImage::from_fn(width, height, |x, y| {
            Luma([image.get_pixel(x, y)[channel]])
        });
        let detected = imageproc::edges::canny(&plane, CANNY_LOW, CANNY_HIGH);
        for (out, edge) in combined.pixels_mut().zip(detected.pixels()) {
            out.0[0] = out.0[0].max(edge.0[0]);
        }
    }
    combined
}

fn blur(image: &RgbImage, intensity: f32) -> RgbImage {
    let kernel = blur_kernel_size(intensity);
    if kernel <= 1 {
        // A single-tap kernel leaves every pixel where it is.
        return image.clone();
    }
    imageproc::filter::gaussian_blur_f32(image, gaussian_sigma(kernel))
}

/// Pencil-sketch: divide gray by the complement of its inversion, scale 256.
fn sketch(gray: &GrayImage) -> GrayImage {
    let mut inverted = gray.clone();
    imageops::invert(&mut inverted);
    ImageBuffer::from_fn(gray.width(), gray.height(), |x, y| {
        let numerator = gray.get_pixel(x, y).0[0] as u32;
        let divisor = 255 - inverted.get_pixel(x, y).0[0] as u32;
        if divisor == 0 {
            Luma([0])
        } else {
            let scaled = (numerator * 256 + divisor / 2) / divisor;
            Luma([scaled.min(255) as u8])
        }
    })
}

fn posterize(image: &RgbImage, step: u8) -> RgbImage {
    let mut quantized = image.clone();
    if step > 1 {
        for pixel in quantized.pixels_mut() {
            pixel.0 = pixel.0.map(|c| c - c % step);
        }
    }
    quantized
}

/// Run a 3x3 kernel with the border replicated outward by one pixel.
///
/// `imageops::filter3x3` only writes interior pixels, so the source is padded
/// first and the result cropped back to the original size.
fn filter3x3_replicated(image: &RgbImage, kernel: &[f32; 9]) -> RgbImage {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return image.clone();
    }
    let padded: RgbImage = ImageBuffer::from_fn(width + 2, height + 2, |x, y| {
        let sx = x.saturating_sub(1).min(width - 1);
        let sy = y.saturating_sub(1).min(height - 1);
        *image.get_pixel(sx, sy)
    });
    let filtered: RgbImage = imageops::filter3x3(&padded, kernel);
    imageops::crop_imm(&filtered, 1, 1, width, height).to_image()
}

/// Quarter turn counter-clockwise about the center, keeping the canvas size.
///
/// Non-square images lose the overhanging strips; uncovered area is black.
fn rotate_quarter(image: &RgbImage) -> RgbImage {
    let rotated = imageops::rotate270(image);
    if rotated.dimensions() == image.dimensions() {
        return rotated;
    }
    let (dx, dy) = rotation_offset(image.dimensions());
    let mut canvas = RgbImage::new(image.width(), image.height());
    imageops::replace(&mut canvas, &rotated, dx, dy);
    canvas
}

fn saturate(image: &RgbImage, factor: f32) -> RgbImage {
    let mut adjusted = image.clone();
    for pixel in adjusted.pixels_mut() {
        pixel.0 = Hsv::from_rgb(pixel.0).scale_saturation(factor).to_rgb();
    }
    adjusted
}
