//! Small deterministic PRNG for the random dissolve effect
//!
//! Each zone owns its own generator so two zones running the random
//! effect at the same time do not share mask state.

/// Deterministic LCG (Numerical Recipes constants).
#[derive(Debug, Clone)]
pub(crate) struct Lcg(u64);

impl Lcg {
    pub(crate) const fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub(crate) fn reseed(&mut self, seed: u64) {
        self.0 = seed;
    }

    fn next_u32(&mut self) -> u32 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 32) as u32
    }

    /// Uniform-ish value in `0..max`; `max` must be non-zero.
    pub(crate) fn next_range(&mut self, max: u8) -> u8 {
        (self.next_u32() % u32::from(max)) as u8
    }
}
