//! Random implementations.

use crate::infrastructure::ports::RandomPort;

/// System random - uses real randomness.
pub struct SystemRandom;

impl SystemRandom {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPort for SystemRandom {
    fn gen_unit(&self) -> f64 {
        use rand::Rng;
        rand::thread_rng().gen::<f64>()
    }
}

/// Fixed random for testing.
#[cfg(test)]
pub struct FixedRandom(pub f64);

#[cfg(test)]
impl RandomPort for FixedRandom {
    fn gen_unit(&self) -> f64 {
        self.0
    }
}
