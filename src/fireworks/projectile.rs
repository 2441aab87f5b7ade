use std::collections::VecDeque;
use std::f64::consts::TAU;

use super::particle::Particle;
use super::random::RandomSource;
use super::{BURST_PALETTE, BURST_SIZE};
use crate::render::{Paint, Surface};

/// Launch speed is drawn from `LAUNCH_SPEED_MIN..LAUNCH_SPEED_MAX` (pixels/frame).
const LAUNCH_SPEED_MIN: f64 = 4.0;
const LAUNCH_SPEED_MAX: f64 = 10.0;
/// Burst fragment speed range (pixels/frame).
const BURST_SPEED_MIN: f64 = 2.0;
const BURST_SPEED_MAX: f64 = 8.0;
/// Most recent positions kept behind an ascending rocket.
pub const TRAIL_CAPACITY: usize = 20;
const TRAIL_SIZE_MIN: f64 = 0.5;
const TRAIL_SIZE_MAX: f64 = 2.0;
/// Opacity a trail point loses each time it is drawn.
const TRAIL_FADE_STEP: f64 = 0.05;
const TRAIL_SATURATION: f64 = 1.0;
const TRAIL_LIGHTNESS: f64 = 0.7;
const ROCKET_RADIUS: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Ascending,
    Exploded,
}

#[derive(Debug, Clone)]
struct TrailPoint {
    x: f64,
    y: f64,
    alpha: f64,
    size: f64,
}

#[derive(Debug, Clone)]
enum Phase {
    Ascending {
        vx: f64,
        vy: f64,
        trail: VecDeque<TrailPoint>,
    },
    Exploded {
        particles: Vec<Particle>,
    },
}

/// A rocket climbing toward its burst height, then the burst it leaves behind.
#[derive(Debug, Clone)]
pub struct Projectile {
    x: f64,
    y: f64,
    target_x: f64,
    target_y: f64,
    hue: f64,
    phase: Phase,
}

impl Projectile {
    /// Aim from the launch point straight at the target.
    ///
    /// Only the vertical coordinate of the target decides when the rocket
    /// bursts, so `target_y` must lie above `start_y` (smaller y).
    pub fn launch(
        start_x: f64,
        start_y: f64,
        target_x: f64,
        target_y: f64,
        rng: &mut dyn RandomSource,
    ) -> Self {
        let angle = (target_y - start_y).atan2(target_x - start_x);
        let speed = rng.range(LAUNCH_SPEED_MIN, LAUNCH_SPEED_MAX);
        // Whole degrees only
        let hue = rng.range(0.0, 360.0).floor();
        Projectile {
            x: start_x,
            y: start_y,
            target_x,
            target_y,
            hue,
            phase: Phase::Ascending {
                vx: angle.cos() * speed,
                vy: angle.sin() * speed,
                trail: VecDeque::with_capacity(TRAIL_CAPACITY + 1),
            },
        }
    }

    pub fn state(&self) -> State {
        match self.phase {
            Phase::Ascending { .. } => State::Ascending,
            Phase::Exploded { .. } => State::Exploded,
        }
    }

    #[allow(dead_code)]
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    #[allow(dead_code)]
    pub fn target(&self) -> (f64, f64) {
        (self.target_x, self.target_y)
    }

    /// Rocket velocity; `None` once it has burst.
    #[allow(dead_code)]
    pub fn velocity(&self) -> Option<(f64, f64)> {
        match self.phase {
            Phase::Ascending { vx, vy, .. } => Some((vx, vy)),
            Phase::Exploded { .. } => None,
        }
    }

    #[allow(dead_code)]
    pub fn trail_len(&self) -> usize {
        match &self.phase {
            Phase::Ascending { trail, .. } => trail.len(),
            Phase::Exploded { .. } => 0,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        match &self.phase {
            Phase::Ascending { .. } => &[],
            Phase::Exploded { particles } => particles,
        }
    }

    /// Burst and every fragment gone.
    pub fn is_spent(&self) -> bool {
        self.state() == State::Exploded && self.particles().is_empty()
    }

    pub fn advance(&mut self, rng: &mut dyn RandomSource) {
        let mut reached = false;
        match &mut self.phase {
            Phase::Ascending { vx, vy, trail } => {
                trail.push_back(TrailPoint {
                    x: self.x,
                    y: self.y,
                    alpha: 1.0,
                    size: rng.range(TRAIL_SIZE_MIN, TRAIL_SIZE_MAX),
                });
                if trail.len() > TRAIL_CAPACITY {
                    trail.pop_front();
                }
                // Height only; the horizontal target is not checked.
                if self.y <= self.target_y {
                    reached = true;
                } else {
                    self.x += *vx;
                    self.y += *vy;
                }
            }
            Phase::Exploded { particles } => {
                for p in particles.iter_mut() {
                    p.advance();
                }
                particles.retain(Particle::is_alive);
            }
        }
        if reached {
            self.detonate(rng);
        }
    }

    /// Trail points fade a step each time they are drawn.
    pub fn render(&mut self, surface: &mut dyn Surface) {
        match &mut self.phase {
            Phase::Ascending { trail, .. } => {
                for point in trail.iter_mut() {
                    if point.alpha > 0.0 {
                        surface.fill_circle(
                            point.x,
                            point.y,
                            point.size,
                            Paint::Hsla {
                                h: self.hue,
                                s: TRAIL_SATURATION,
                                l: TRAIL_LIGHTNESS,
                                a: point.alpha,
                            },
                        );
                    }
                    point.alpha -= TRAIL_FADE_STEP;
                }
                surface.fill_circle(self.x, self.y, ROCKET_RADIUS, Paint::WHITE);
            }
            Phase::Exploded { particles } => {
                for p in particles.iter().filter(|p| p.is_alive()) {
                    p.render(surface);
                }
            }
        }
    }

    fn detonate(&mut self, rng: &mut dyn RandomSource) {
        let particles = (0..BURST_SIZE)
            .map(|_| {
                let angle = rng.range(0.0, TAU);
                let speed = rng.range(BURST_SPEED_MIN, BURST_SPEED_MAX);
                let color = BURST_PALETTE[rng.index(BURST_PALETTE.len())];
                Particle::new(
                    self.x,
                    self.y,
                    angle.cos() * speed,
                    angle.sin() * speed,
                    color,
                    rng,
                )
            })
            .collect();
        self.phase = Phase::Exploded { particles };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fireworks::random::testing::{Constant, Seeded};

    /// Records draw calls instead of rasterizing.
    #[derive(Default)]
    struct Recorder {
        circles: Vec<(f64, f64, f64, Paint)>,
    }

    impl Surface for Recorder {
        fn width(&self) -> f64 {
            800.0
        }
        fn height(&self) -> f64 {
            600.0
        }
        fn clear(&mut self) {
            self.circles.clear();
        }
        fn fill_circle(&mut self, x: f64, y: f64, radius: f64, paint: Paint) {
            self.circles.push((x, y, radius, paint));
        }
    }

    fn run_until_exploded(p: &mut Projectile, rng: &mut dyn RandomSource) -> usize {
        let mut ticks = 0;
        while p.state() == State::Ascending {
            p.advance(rng);
            ticks += 1;
            assert!(ticks < 10_000, "rocket never reached its target");
        }
        ticks
    }

    #[test]
    fn test_straight_climb_bursts_on_first_tick_at_target() {
        let mut rng = Seeded::new(1);
        let mut p = Projectile::launch(100.0, 500.0, 100.0, 100.0, &mut rng);
        loop {
            let (_, before) = p.position();
            p.advance(&mut rng);
            if before <= 100.0 {
                assert_eq!(p.state(), State::Exploded);
                break;
            }
            assert_eq!(p.state(), State::Ascending);
            assert!(p.position().1 < before);
        }
    }

    #[test]
    fn test_burst_has_full_opacity_fragments() {
        let mut rng = Seeded::new(2);
        let mut p = Projectile::launch(100.0, 500.0, 100.0, 100.0, &mut rng);
        run_until_exploded(&mut p, &mut rng);
        assert_eq!(p.particles().len(), BURST_SIZE);
        let (x, y) = p.position();
        for frag in p.particles() {
            assert_eq!(frag.alpha, 1.0);
            assert_eq!((frag.x, frag.y), (x, y));
        }
    }

    #[test]
    fn test_burst_colors_come_from_palette() {
        let mut rng = Seeded::new(3);
        for _ in 0..50 {
            let mut p = Projectile::launch(400.0, 600.0, 250.0, 120.0, &mut rng);
            run_until_exploded(&mut p, &mut rng);
            for frag in p.particles() {
                assert!(BURST_PALETTE.contains(&frag.color));
            }
        }
    }

    #[test]
    fn test_trail_capped() {
        // Slowest launch so the rocket climbs for many ticks
        let mut rng = Constant(0.0);
        let mut p = Projectile::launch(100.0, 1000.0, 100.0, 10.0, &mut rng);
        let mut max_len = 0;
        while p.state() == State::Ascending {
            p.advance(&mut rng);
            max_len = max_len.max(p.trail_len());
        }
        assert_eq!(max_len, TRAIL_CAPACITY);
    }

    #[test]
    fn test_explosion_is_terminal() {
        let mut rng = Seeded::new(4);
        let mut p = Projectile::launch(300.0, 600.0, 320.0, 200.0, &mut rng);
        run_until_exploded(&mut p, &mut rng);
        let pos = p.position();
        while !p.is_spent() {
            p.advance(&mut rng);
            assert_eq!(p.state(), State::Exploded);
            assert_eq!(p.velocity(), None);
            assert_eq!(p.position(), pos);
            assert_eq!(p.trail_len(), 0);
        }
        p.advance(&mut rng);
        assert_eq!(p.state(), State::Exploded);
    }

    #[test]
    fn test_fragments_removed_once_faded() {
        let mut rng = Seeded::new(5);
        let mut p = Projectile::launch(300.0, 600.0, 300.0, 300.0, &mut rng);
        run_until_exploded(&mut p, &mut rng);
        let mut last = p.particles().len();
        for _ in 0..200 {
            p.advance(&mut rng);
            assert!(p.particles().iter().all(Particle::is_alive));
            assert!(p.particles().len() <= last);
            last = p.particles().len();
        }
        assert!(p.is_spent());
    }

    #[test]
    fn test_offset_target_bursts_above_launch_column() {
        let mut rng = Seeded::new(6);
        let mut p = Projectile::launch(400.0, 600.0, 700.0, 300.0, &mut rng);
        run_until_exploded(&mut p, &mut rng);
        let (x, y) = p.position();
        assert!(y <= 300.0);
        assert!(x > 400.0);
    }

    #[test]
    fn test_render_ascending_draws_trail_then_rocket() {
        let mut rng = Constant(0.0);
        let mut p = Projectile::launch(100.0, 500.0, 100.0, 100.0, &mut rng);
        p.advance(&mut rng);
        p.advance(&mut rng);
        let mut surface = Recorder::default();
        p.render(&mut surface);
        assert_eq!(surface.circles.len(), 3);
        let (x, y, r, paint) = surface.circles[2];
        assert_eq!((x, y), p.position());
        assert_eq!(r, ROCKET_RADIUS);
        assert_eq!(paint, Paint::WHITE);
        assert!(matches!(surface.circles[0].3, Paint::Hsla { a, .. } if a == 1.0));
    }

    #[test]
    fn test_trail_fades_with_each_render() {
        let mut rng = Constant(0.0);
        let mut p = Projectile::launch(100.0, 500.0, 100.0, 100.0, &mut rng);
        p.advance(&mut rng);
        let mut surface = Recorder::default();
        for _ in 0..30 {
            p.render(&mut surface);
        }
        // Faded trail points stop drawing; only the rocket remains
        surface.clear();
        p.render(&mut surface);
        assert_eq!(surface.circles.len(), 1);
        assert_eq!(surface.circles[0].3, Paint::WHITE);
    }

    #[test]
    fn test_render_exploded_draws_each_fragment() {
        let mut rng = Seeded::new(8);
        let mut p = Projectile::launch(100.0, 500.0, 100.0, 100.0, &mut rng);
        run_until_exploded(&mut p, &mut rng);
        let mut surface = Recorder::default();
        p.render(&mut surface);
        assert_eq!(surface.circles.len(), BURST_SIZE);
    }

    #[test]
    fn test_trail_hue_is_whole_degrees() {
        let mut rng = Seeded::new(9);
        for _ in 0..100 {
            let mut p = Projectile::launch(100.0, 500.0, 100.0, 100.0, &mut rng);
            p.advance(&mut rng);
            let mut surface = Recorder::default();
            p.render(&mut surface);
            let Paint::Hsla { h, .. } = surface.circles[0].3 else {
                panic!("trail point not drawn in hsla");
            };
            assert_eq!(h, h.floor());
            assert!((0.0..360.0).contains(&h));
        }
    }

    #[test]
    fn test_faded_fragments_not_drawn() {
        let mut rng = Seeded::new(10);
        let mut p = Projectile::launch(100.0, 500.0, 100.0, 100.0, &mut rng);
        run_until_exploded(&mut p, &mut rng);
        let mut surface = Recorder::default();
        let mut checked = 0;
        while !p.is_spent() {
            p.advance(&mut rng);
            surface.clear();
            p.render(&mut surface);
            assert_eq!(surface.circles.len(), p.particles().len());
            for &(_, _, _, paint) in &surface.circles {
                assert!(matches!(paint, Paint::Rgba { a, .. } if a > 0.0));
            }
            if p.particles().len() < BURST_SIZE && !p.particles().is_empty() {
                checked += 1;
            }
        }
        // Partly faded bursts were rendered along the way
        assert!(checked > 0);
    }
}
