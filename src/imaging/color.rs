//! RGB ↔ HSV conversion for the saturation filter.
//!
//! Neither `image` nor `imageproc` exposes an HSV color space, so the
//! conversion lives here. Hue is in degrees `[0, 360)`, saturation and value
//! in `[0, 1]`.

/// A pixel in hue/saturation/value space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub hue: f32,
    pub saturation: f32,
    pub value: f32,
}

impl Hsv {
    pub fn from_rgb([r, g, b]: [u8; 3]) -> Self {
        let r = r as f32 / 255.0;
        let g = g as f32 / 255.0;
        let b = b as f32 / 255.0;

        let max = r.max(g.max(b));
        let min = r.min(g.min(b));
        let chroma = max - min;

        let hue = if chroma <= f32::EPSILON {
            0.0
        } else if max == r {
            60.0 * ((g - b) / chroma).rem_euclid(6.0)
        } else if max == g {
            60.0 * ((b - r) / chroma + 2.0)
        } else {
            60.0 * ((r - g) / chroma + 4.0)
        };

        let saturation = if max <= f32::EPSILON { 0.0 } else { chroma / max };

        Self {
            hue,
            saturation,
            value: max,
        }
    }

    pub fn to_rgb(self) -> [u8; 3] {
        let chroma = self.value * self.saturation;
        let sector = (self.hue / 60.0).rem_euclid(6.0);
        let x = chroma * (1.0 - ((sector % 2.0) - 1.0).abs());
        let m = self.value - chroma;

        let (r, g, b) = match sector as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };

        [to_channel(r + m), to_channel(g + m), to_channel(b + m)]
    }

    /// Scale saturation by `factor`, clamping to the valid range.
    pub fn scale_saturation(self, factor: f32) -> Self {
        Self {
            saturation: (self.saturation * factor).clamp(0.0, 1.0),
            ..self
        }
    }
}

#[inline]
fn to_channel(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}
