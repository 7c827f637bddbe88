//! Testability port for injecting randomness.

// =============================================================================
// Testability Ports
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait RandomPort: Send + Sync {
    /// Uniform draw in `[0, 1)`.
    fn gen_unit(&self) -> f64;
}
