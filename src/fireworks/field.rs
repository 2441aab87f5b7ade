use log::debug;

use super::projectile::Projectile;
use super::random::RandomSource;
use crate::render::Surface;

/// The live set of rockets and bursts on screen.
#[derive(Debug, Default)]
pub struct AnimationField {
    projectiles: Vec<Projectile>,
}

impl AnimationField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, projectile: Projectile) {
        self.projectiles.push(projectile);
    }

    #[allow(dead_code)]
    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn len(&self) -> usize {
        self.projectiles.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
    }

    /// Advance one frame and draw it.
    ///
    /// With no surface the physics still advances but nothing is drawn.
    /// Spent projectiles are culled only after the whole pass.
    pub fn tick(&mut self, mut surface: Option<&mut dyn Surface>, rng: &mut dyn RandomSource) {
        if let Some(s) = surface.as_deref_mut() {
            s.clear();
        }

        for projectile in &mut self.projectiles {
            projectile.advance(rng);
            if let Some(s) = surface.as_deref_mut() {
                projectile.render(s);
            }
        }

        let before = self.projectiles.len();
        self.projectiles.retain(|p| !p.is_spent());
        let removed = before - self.projectiles.len();
        if removed > 0 {
            debug!("culled {} spent projectile(s), {} live", removed, self.projectiles.len());
        }
    }
}
