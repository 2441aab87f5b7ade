pub mod field;
pub mod particle;
pub mod projectile;
pub mod random;
pub mod spawner;

pub use field::AnimationField;
pub use projectile::Projectile;
pub use random::RandomSource;
pub use spawner::Spawner;

/// Downward acceleration on burst fragments (pixels/frame²).
pub const GRAVITY: f64 = 0.05;

/// Fragments produced by one detonation.
pub const BURST_SIZE: usize = 100;

/// Burst colors: white, red, green, blue, yellow, magenta, cyan, orange.
pub const BURST_PALETTE: [(u8, u8, u8); 8] = [
    (255, 255, 255),
    (255, 0, 0),
    (0, 255, 0),
    (0, 0, 255),
    (255, 255, 0),
    (255, 0, 255),
    (0, 255, 255),
    (255, 140, 0),
];
