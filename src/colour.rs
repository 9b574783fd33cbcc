/// A text colour, expressed in RGB (optionally with alpha) or grey levels
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Colour {
    /// Opaque RGB colour; r, g, b, range from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
    /// RGB colour with alpha; all components range from 0.0 to 1.0
    RGBA { r: f32, g: f32, b: f32, a: f32 },
    /// Grey colour; g ranges from 0.0 (black) to 1.0 (white)
    Grey { g: f32 },
}

impl Colour {
    /// Create a new colour in the RGB space. r, g, and b range from 0.0 to 1.0
    pub fn new_rgb(r: f32, g: f32, b: f32) -> Colour {
        Colour::RGB { r, g, b }
    }

    /// Create a new colour in the RGB space. r, g, and b range from 0 to 255
    pub fn new_rgb_bytes(r: u8, g: u8, b: u8) -> Colour {
        Colour::RGB {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Create a new grey colour, g ranges from 0.0 to 1.0
    pub fn new_grey(g: f32) -> Colour {
        Colour::Grey { g }
    }

    /// Create a colour from a packed `0xAARRGGBB` value, as UI toolkits usually
    /// hand colours around. Fully opaque values become [Colour::RGB].
    pub fn from_argb(argb: u32) -> Colour {
        let [a, r, g, b] = argb.to_be_bytes();
        if a == 0xFF {
            Colour::new_rgb_bytes(r, g, b)
        } else {
            Colour::RGBA {
                r: r as f32 / 255.0,
                g: g as f32 / 255.0,
                b: b as f32 / 255.0,
                a: a as f32 / 255.0,
            }
        }
    }

    /// Pack the colour into `0xAARRGGBB`, rounding each channel to 8 bits
    pub fn to_argb(&self) -> u32 {
        fn byte(v: f32) -> u32 {
            (v.clamp(0.0, 1.0) * 255.0).round() as u32
        }

        let (r, g, b, a) = match *self {
            Colour::RGB { r, g, b } => (r, g, b, 1.0),
            Colour::RGBA { r, g, b, a } => (r, g, b, a),
            Colour::Grey { g } => (g, g, g, 1.0),
        };
        (byte(a) << 24) | (byte(r) << 16) | (byte(g) << 8) | byte(b)
    }
}

impl<T: Into<f32>> From<(T, T, T)> for Colour {
    fn from(c: (T, T, T)) -> Self {
        Colour::RGB {
            r: c.0.into(),
            g: c.1.into(),
            b: c.2.into(),
        }
    }
}

impl<T: Into<f32>> From<[T; 3]> for Colour {
    fn from(c: [T; 3]) -> Self {
        let [r, g, b] = c;
        Colour::RGB {
            r: r.into(),
            g: g.into(),
            b: b.into(),
        }
    }
}

impl From<u32> for Colour {
    fn from(argb: u32) -> Self {
        Colour::from_argb(argb)
    }
}

/// A list of pre-defined colour constants
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
    pub const WHITE: Colour = Colour::Grey { g: 1.0 };
    /// Default colour of primary tags (`0xFF333333`)
    pub const CHARCOAL: Colour = Colour::Grey { g: 0.2 };
    /// Default colour of filler tags (`0xFF999999`)
    pub const SILVER: Colour = Colour::Grey { g: 0.6 };
    pub const RED: Colour = Colour::RGB {
        r: 1.0,
        g: 0.0,
        b: 0.0,
    };
    pub const GREEN: Colour = Colour::RGB {
        r: 0.0,
        g: 1.0,
        b: 0.0,
    };
    pub const BLUE: Colour = Colour::RGB {
        r: 0.0,
        g: 0.0,
        b: 1.0,
    };
}
