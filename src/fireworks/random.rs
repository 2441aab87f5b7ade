use rand::RngExt;

/// Source of uniform draws for every randomized quantity in the display.
///
/// Speeds, hues, decay rates, trail point sizes and palette picks all go
/// through here, so a deterministic source makes a whole run reproducible.
pub trait RandomSource {
    /// Uniform draw in `0.0..1.0`.
    fn next_unit(&mut self) -> f64;

    /// Uniform draw in `lo..hi`.
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_unit() * (hi - lo)
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize {
        ((self.next_unit() * len as f64) as usize).min(len - 1)
    }
}

impl RandomSource for rand::rngs::ThreadRng {
    fn next_unit(&mut self) -> f64 {
        self.random_range(0.0..1.0)
    }
}

#[cfg(test)]
pub mod testing {
    use super::RandomSource;

    /// Returns the same value forever.
    pub struct Constant(pub f64);

    impl RandomSource for Constant {
        fn next_unit(&mut self) -> f64 {
            self.0
        }
    }

    /// Small xorshift generator; deterministic per seed.
    pub struct Seeded(u64);

    impl Seeded {
        pub fn new(seed: u64) -> Self {
            Seeded(seed.max(1))
        }
    }

    impl RandomSource for Seeded {
        fn next_unit(&mut self) -> f64 {
            let mut x = self.0;
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            self.0 = x;
            (x >> 11) as f64 / (1u64 << 53) as f64
        }
    }
}
