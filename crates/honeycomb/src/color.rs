//! Per-element colors handed to the renderer.
//!
//! Colors are a deterministic function of a category (orbit class, mirror
//! index) or of a normalized depth; the palette itself is the consumer's concern.

/// Linear RGB in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    /// HSV → RGB, hue in turns (wrapped into `[0, 1)`).
    pub fn from_hsv(h: f32, s: f32, v: f32) -> Self {
        let h6 = h.rem_euclid(1.0) * 6.0;
        let c = v * s;
        let x = c * (1.0 - ((h6 % 2.0) - 1.0).abs());
        let m = v - c;
        let (r, g, b) = match h6 as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        Self {
            r: r + m,
            g: g + m,
            b: b + m,
        }
    }

    /// `index`-th of `count` evenly spaced hues.
    pub fn categorical(index: usize, count: usize) -> Self {
        Self::from_hsv(index as f32 / count.max(1) as f32, 0.65, 0.95)
    }

    /// Blue (t = 0) to red (t = 1).
    pub fn gradient(t: f32) -> Self {
        Self::from_hsv(2.0 / 3.0 * (1.0 - t.clamp(0.0, 1.0)), 0.7, 0.95)
    }

    /// Component-wise mean.
    pub fn mix(self, other: Color) -> Self {
        Self {
            r: 0.5 * (self.r + other.r),
            g: 0.5 * (self.g + other.g),
            b: 0.5 * (self.b + other.b),
        }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// `#rrggbb`.
    pub fn to_hex(self) -> String {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", q(self.r), q(self.g), q(self.b))
    }
}
