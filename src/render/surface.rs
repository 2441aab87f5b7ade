/// Fill color for a circle, in either of the two notations the display uses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    /// RGB channels 0-255 with opacity 0.0..=1.0
    Rgba { r: u8, g: u8, b: u8, a: f64 },
    /// Hue in degrees, saturation and lightness in 0.0..=1.0, opacity 0.0..=1.0
    Hsla { h: f64, s: f64, l: f64, a: f64 },
}

impl Paint {
    pub const WHITE: Paint = Paint::Rgba {
        r: 255,
        g: 255,
        b: 255,
        a: 1.0,
    };

    /// Resolve to RGB channels plus opacity.
    pub fn to_rgba(self) -> (u8, u8, u8, f64) {
        match self {
            Paint::Rgba { r, g, b, a } => (r, g, b, a),
            Paint::Hsla { h, s, l, a } => {
                let (r, g, b) = hsl_to_rgb(h, s, l);
                (r, g, b, a)
            }
        }
    }
}

/// A 2D raster the firework display draws into.
///
/// Width and height are in surface pixels and may change between frames.
pub trait Surface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;
    fn clear(&mut self);
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, paint: Paint);
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (u8, u8, u8) {
    let h = h.rem_euclid(360.0);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
    let m = l - c / 2.0;

    let (r1, g1, b1) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    (
        ((r1 + m) * 255.0).round().clamp(0.0, 255.0) as u8,
        ((g1 + m) * 255.0).round().clamp(0.0, 255.0) as u8,
        ((b1 + m) * 255.0).round().clamp(0.0, 255.0) as u8,
    )
}
