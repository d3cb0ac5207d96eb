/// A stroke or fill colour. Components range from 0.0 to 1.0.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Colour {
    RGB { r: f32, g: f32, b: f32 },
    CMYK { c: f32, m: f32, y: f32, k: f32 },
    Grey { g: f32 },
}

impl Colour {
    /// An RGB colour from 0-255 components
    pub fn new_rgb_bytes(r: u8, g: u8, b: u8) -> Colour {
        Colour::RGB {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
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

pub mod colours {
    use super::Colour;

    /// Text, table grids
    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
    /// Paragraph bands in the debug overlay
    pub const BLUE: Colour = Colour::RGB {
        r: 0.0,
        g: 0.0,
        b: 1.0,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_components_are_normalised() {
        assert_eq!(Colour::new_rgb_bytes(0, 0, 255), colours::BLUE);
        assert_eq!(Colour::from((1.0f32, 0.5, 0.0)), Colour::RGB { r: 1.0, g: 0.5, b: 0.0 });
    }
}
