use std::time::{Duration, Instant};

use log::info;

use crate::fireworks::{AnimationField, RandomSource, Spawner};
use crate::render::Surface;
use crate::scheduler::FrameRequest;

/// Drives the firework display: a frame trigger and a launch timer sharing
/// one live set.
///
/// Both triggers are polled from the same thread and each runs to completion
/// before the other is looked at, so the field needs no locking.
pub struct Scene {
    field: AnimationField,
    spawner: Spawner,
    frames: FrameRequest,
    rng: Box<dyn RandomSource>,
}

impl Scene {
    pub fn start(fps: u32, spawn_interval: Duration, rng: Box<dyn RandomSource>, now: Instant) -> Self {
        let mut frames = FrameRequest::new(fps);
        frames.request(now);
        info!(
            "fireworks started: {:.1} ms/frame, launch every {} ms",
            frames.frame_interval().as_secs_f64() * 1000.0,
            spawn_interval.as_millis()
        );
        Scene {
            field: AnimationField::new(),
            spawner: Spawner::start(spawn_interval, now),
            frames,
            rng,
        }
    }

    pub fn field(&self) -> &AnimationField {
        &self.field
    }

    /// Run whichever triggers are due at `now`. Returns true if a frame ran.
    ///
    /// A missing surface means the host cannot draw right now: launches are
    /// skipped and the frame advances without drawing, but the frame request
    /// is still re-armed.
    pub fn pump(&mut self, now: Instant, mut surface: Option<&mut dyn Surface>) -> bool {
        let size = surface.as_deref().map(|s| (s.width(), s.height()));
        self.spawner.poll(now, size, &mut self.field, self.rng.as_mut());

        if !self.frames.poll(now) {
            return false;
        }
        let surface = surface.as_mut().map(|s| &mut **s as &mut dyn Surface);
        self.field.tick(surface, self.rng.as_mut());
        self.frames.request(now);
        true
    }

    /// Earliest instant either trigger wants to run.
    pub fn next_wake(&self) -> Option<Instant> {
        match (self.frames.next_due(), self.spawner.timer().next_due()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Cancel both triggers. The live set is left as is.
    pub fn stop(&mut self) {
        self.frames.cancel();
        self.spawner.cancel();
        info!("fireworks stopped with {} live", self.field.len());
    }

    pub fn is_running(&self) -> bool {
        self.frames.is_active() || self.spawner.timer().is_active()
    }
}
