//! Error types for simulation construction and particle access.

use thiserror::Error;

/// Errors that can occur when building or querying a simulation.
///
/// Coincident spring endpoints are not an error: the spring simply
/// applies zero force for that step.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    /// Particle index is out of bounds.
    #[error("particle index {index} out of bounds (count: {count})")]
    ParticleOutOfBounds { index: usize, count: usize },
    /// Mass must be positive and finite.
    #[error("mass must be positive and finite")]
    InvalidMass,
    /// Stiffness must be positive and finite.
    #[error("stiffness must be positive and finite")]
    InvalidStiffness,
    /// Rest length must be non-negative and finite.
    #[error("rest length must be non-negative and finite")]
    InvalidRestLength,
    /// Damping coefficient must be non-negative and finite.
    #[error("damping coefficient must be non-negative and finite")]
    InvalidDamping,
    /// Gravity must be finite.
    #[error("gravity must be finite")]
    InvalidGravity,
    /// Grid coordinate lies outside the `side x side` cloth.
    #[error("grid coordinate ({x}, {y}) out of bounds (side: {side})")]
    GridCoordsOutOfBounds { x: usize, y: usize, side: usize },
    /// Cloth particle count must be a perfect square.
    #[error("particle count {count} is not a perfect square")]
    NonSquareParticleCount { count: usize },
    /// Cloth grid must be at least 2x2.
    #[error("grid side {side} is too small, cloth must be at least 2x2")]
    InvalidGridDimensions { side: usize },
    /// Only two pin slots exist.
    #[error("pin slot {slot} does not exist (slots: 0, 1)")]
    InvalidPinSlot { slot: usize },
    /// A spring joins a particle to itself.
    #[error("spring connects particle {index} to itself")]
    DegenerateSpring { index: usize },
}

/// Result type for simulation operations.
pub type Result<T> = core::result::Result<T, PhysicsError>;
