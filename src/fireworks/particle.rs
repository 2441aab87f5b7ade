use super::random::RandomSource;
use super::GRAVITY;
use crate::render::{Paint, Surface};

/// Opacity lost per frame is drawn from `DECAY_MIN..DECAY_MAX`.
const DECAY_MIN: f64 = 0.01;
const DECAY_MAX: f64 = 0.03;
/// Radius is drawn from `SIZE_MIN..SIZE_MAX`.
const SIZE_MIN: f64 = 1.0;
const SIZE_MAX: f64 = 3.0;

/// One fragment of light thrown out by a detonation.
#[derive(Debug, Clone)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub color: (u8, u8, u8),
    pub alpha: f64,
    decay: f64,
    size: f64,
}

impl Particle {
    pub fn new(
        x: f64,
        y: f64,
        vx: f64,
        vy: f64,
        color: (u8, u8, u8),
        rng: &mut dyn RandomSource,
    ) -> Self {
        Particle {
            x,
            y,
            vx,
            vy,
            color,
            alpha: 1.0,
            decay: rng.range(DECAY_MIN, DECAY_MAX),
            size: rng.range(SIZE_MIN, SIZE_MAX),
        }
    }

    /// Gravity, then position, then fade.
    pub fn advance(&mut self) {
        self.vy += GRAVITY;
        self.x += self.vx;
        self.y += self.vy;
        self.alpha -= self.decay;
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alpha > 0.0
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        let (r, g, b) = self.color;
        surface.fill_circle(self.x, self.y, self.size, Paint::Rgba { r, g, b, a: self.alpha });
    }
}
