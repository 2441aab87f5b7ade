use std::time::{Duration, Instant};

use log::debug;

use super::field::AnimationField;
use super::projectile::Projectile;
use super::random::RandomSource;
use crate::scheduler::IntervalTimer;

pub const DEFAULT_SPAWN_INTERVAL: Duration = Duration::from_millis(1500);

/// Burst heights lie in this band, as fractions of surface height from the top.
const TARGET_TOP: f64 = 0.1;
const TARGET_BOTTOM: f64 = 0.7;

/// Launches one rocket from bottom-center on every timer firing.
#[derive(Debug, Clone)]
pub struct Spawner {
    timer: IntervalTimer,
}

impl Spawner {
    pub fn start(interval: Duration, now: Instant) -> Self {
        Spawner {
            timer: IntervalTimer::start(interval, now),
        }
    }

    pub fn timer(&self) -> &IntervalTimer {
        &self.timer
    }

    pub fn cancel(&mut self) {
        self.timer.cancel();
    }

    /// Spawn if the timer is due. `size` is the surface's current
    /// width and height; `None` skips the firing.
    pub fn poll(
        &mut self,
        now: Instant,
        size: Option<(f64, f64)>,
        field: &mut AnimationField,
        rng: &mut dyn RandomSource,
    ) -> bool {
        if !self.timer.poll(now) {
            return false;
        }
        match size {
            Some((width, height)) => {
                Self::spawn(width, height, field, rng);
                true
            }
            None => {
                debug!("surface unavailable, skipping launch");
                false
            }
        }
    }

    pub fn spawn(width: f64, height: f64, field: &mut AnimationField, rng: &mut dyn RandomSource) {
        let target_x = rng.range(0.0, width);
        let target_y = rng.range(height * TARGET_TOP, height * TARGET_BOTTOM);
        field.insert(Projectile::launch(width / 2.0, height, target_x, target_y, rng));
        debug!(
            "launched toward ({:.0}, {:.0}), {} live",
            target_x,
            target_y,
            field.len()
        );
    }
}
