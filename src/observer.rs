//! Step observer trait for monitoring simulation progress.

/// Trait for observing simulation steps.
///
/// Hooks fire in pipeline order: forces solved, particles integrated,
/// step complete. All methods have default no-op implementations.
pub trait StepObserver {
    /// Called after internal and external forces have been accumulated.
    fn on_forces_solved(&mut self) {}

    /// Called after integration, including any post-integration constraints.
    fn on_integrate(&mut self) {}

    /// Called when a simulation step is fully complete.
    fn on_step_complete(&mut self) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}
