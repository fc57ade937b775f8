//! Color space conversions: packed RGBA ↔ sRGB ↔ linear RGB ↔ CIEXYZ ↔ CIELAB.
//!
//! All clustering distance math happens in CIELAB, which is roughly
//! perceptually uniform. Every function here is a pure, total transform:
//! out-of-range components are clamped so NaN/∞ can never reach centroid
//! state. The alpha channel is ignored on input and forced to 255 on output.

use std::ops::{Add, Mul};

// White point coordinates for Illuminant D65.
const XN: f32 = 0.950470;
const YN: f32 = 1.0;
const ZN: f32 = 1.088830;

// Breakpoint of the CIELAB transfer function.
const SIGMA: f32 = 6.0 / 29.0;

/// A point in CIELAB space. `l` is lightness in [0, 100]; `a` and `b` are
/// the green–red and blue–yellow opponent axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    pub l: f32,
    pub a: f32,
    pub b: f32,
}

impl Lab {
    pub const ZERO: Lab = Lab::new(0.0, 0.0, 0.0);

    pub const fn new(l: f32, a: f32, b: f32) -> Self {
        Self { l, a, b }
    }

    /// Squared Euclidean distance, the clustering metric.
    pub fn distance_squared(self, other: Self) -> f32 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        dl * dl + da * da + db * db
    }

    /// Unpack an RGBA8 pixel and convert it to CIELAB. Alpha is ignored.
    pub fn from_rgba8(rgba: [u8; 4]) -> Self {
        let r = srgb_to_linear(rgba[0] as f32 / 255.0);
        let g = srgb_to_linear(rgba[1] as f32 / 255.0);
        let b = srgb_to_linear(rgba[2] as f32 / 255.0);
        xyz_to_lab(linear_rgb_to_xyz([r, g, b]))
    }

    /// Convert back to a packed RGBA8 pixel, rounding each channel
    /// half-away-from-zero. Alpha is always 255.
    pub fn to_rgba8(self) -> [u8; 4] {
        let [r, g, b] = xyz_to_linear_rgb(lab_to_xyz(self));
        [
            pack_channel(linear_to_srgb(r)),
            pack_channel(linear_to_srgb(g)),
            pack_channel(linear_to_srgb(b)),
            255,
        ]
    }

    pub fn is_finite(self) -> bool {
        self.l.is_finite() && self.a.is_finite() && self.b.is_finite()
    }
}

impl Add for Lab {
    type Output = Lab;

    fn add(self, rhs: Lab) -> Lab {
        Lab::new(self.l + rhs.l, self.a + rhs.a, self.b + rhs.b)
    }
}

impl Mul<f32> for Lab {
    type Output = Lab;

    fn mul(self, s: f32) -> Lab {
        Lab::new(self.l * s, self.a * s, self.b * s)
    }
}

fn pack_channel(encoded: f32) -> u8 {
    (encoded * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Decode the sRGB transfer curve. The input is clamped to [0, 1] and the
/// result is clamped again so rounding in `powf` cannot escape the range.
pub fn srgb_to_linear(c: f32) -> f32 {
    let c = c.clamp(0.0, 1.0);
    let linear = if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    };
    linear.clamp(0.0, 1.0)
}

/// Encode the sRGB transfer curve. The input is clamped to [0, 1], which
/// bounds the output as well.
pub fn linear_to_srgb(c: f32) -> f32 {
    let c = c.clamp(0.0, 1.0);
    if c <= 0.0031308 {
        12.92 * c
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

// sRGB primaries, D65 reference white.
fn linear_rgb_to_xyz([r, g, b]: [f32; 3]) -> [f32; 3] {
    [
        0.4124564 * r + 0.3575761 * g + 0.1804375 * b,
        0.2126729 * r + 0.7151522 * g + 0.0721750 * b,
        0.0193339 * r + 0.1191920 * g + 0.9503041 * b,
    ]
}

fn xyz_to_linear_rgb([x, y, z]: [f32; 3]) -> [f32; 3] {
    [
        3.2404542 * x - 1.5371385 * y - 0.4985314 * z,
        -0.9692660 * x + 1.8760108 * y + 0.0415560 * z,
        0.0556434 * x - 0.2040259 * y + 1.0572252 * z,
    ]
}

fn ft(t: f32) -> f32 {
    if t > SIGMA * SIGMA * SIGMA {
        t.cbrt()
    } else {
        t / (3.0 * SIGMA * SIGMA) + 4.0 / 29.0
    }
}

fn inv_ft(t: f32) -> f32 {
    if t > SIGMA {
        t * t * t
    } else {
        3.0 * SIGMA * SIGMA * (t - 4.0 / 29.0)
    }
}

fn xyz_to_lab([x, y, z]: [f32; 3]) -> Lab {
    let fy = ft(y / YN);
    Lab::new(
        116.0 * fy - 16.0,
        500.0 * (ft(x / XN) - fy),
        200.0 * (fy - ft(z / ZN)),
    )
}

fn lab_to_xyz(lab: Lab) -> [f32; 3] {
    let fy = (lab.l + 16.0) / 116.0;
    [
        XN * inv_ft(fy + lab.a / 500.0),
        YN * inv_ft(fy),
        ZN * inv_ft(fy - lab.b / 200.0),
    ]
}
