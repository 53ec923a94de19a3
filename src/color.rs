use image::Rgba;

use crate::error::{Error, Result};

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parse a `#RRGGBB` string.
    pub fn parse_hex(hex: &str) -> Result<Self> {
        let digits = hex
            .strip_prefix('#')
            .filter(|d| d.len() == 6 && d.bytes().all(|b| b.is_ascii_hexdigit()))
            .ok_or_else(|| Error::InvalidColorFormat(hex.to_string()))?;

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| Error::InvalidColorFormat(hex.to_string()))
        };

        Ok(Rgb {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Interpolate toward `other`. `t` is expected in [0, 1]; each
    /// channel rounds to the nearest integer.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let channel = |a: u8, b: u8| {
            let v = f64::from(a) + (f64::from(b) - f64::from(a)) * t;
            v.round().clamp(0.0, 255.0) as u8
        };
        Rgb {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
        }
    }

    /// Opaque RGBA pixel for the raster surface.
    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, 255])
    }
}

/// The color pair one fill animates between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorStop {
    pub start: Rgb,
    pub end: Rgb,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() -> crate::error::Result<()> {
        assert_eq!(
            Rgb::parse_hex("#ff8000")?,
            Rgb {
                r: 255,
                g: 128,
                b: 0
            }
        );
        assert_eq!(Rgb::parse_hex("#000000")?, Rgb { r: 0, g: 0, b: 0 });
        assert_eq!(
            Rgb::parse_hex("#FFFFFF")?,
            Rgb {
                r: 255,
                g: 255,
                b: 255
            }
        );
        Ok(())
    }

    #[test]
    fn test_parse_hex_rejects_malformed() {
        for bad in ["ff8000", "#ff800", "#ff80000", "#ff80zz", "", "#", "#+12345"] {
            assert!(
                matches!(Rgb::parse_hex(bad), Err(Error::InvalidColorFormat(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_lerp_endpoints() -> crate::error::Result<()> {
        let a = Rgb::parse_hex("#102030")?;
        let b = Rgb::parse_hex("#405060")?;
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        Ok(())
    }

    #[test]
    fn test_lerp_degenerate_is_identity() -> crate::error::Result<()> {
        let a = Rgb::parse_hex("#a1b2c3")?;
        for t in [0.0, 0.25, 0.5, 0.75, 1.0] {
            assert_eq!(a.lerp(a, t), a);
        }
        Ok(())
    }

    #[test]
    fn test_lerp_midpoint_rounds() -> crate::error::Result<()> {
        let black = Rgb::parse_hex("#000000")?;
        let white = Rgb::parse_hex("#ffffff")?;
        // 0 + 255 * 0.5 = 127.5, rounds up
        assert_eq!(
            black.lerp(white, 0.5),
            Rgb {
                r: 128,
                g: 128,
                b: 128
            }
        );
        Ok(())
    }
}
