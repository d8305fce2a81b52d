//! Configuration types for the cloth simulation.

use crate::error::{PhysicsError, Result};
use crate::float::Float;
use crate::spring::validate_parameters;
use crate::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters for building a [`ClothSimulation`](crate::cloth::ClothSimulation).
///
/// # Builder Pattern
/// ```
/// use springcloth::config::ClothConfig;
/// use springcloth::vec::Vec3;
///
/// let config: ClothConfig<Vec3<f32>> = ClothConfig::new()
///     .with_particle_count(30 * 30)
///     .with_stiffness(20_000.0)
///     .with_gravity(Vec3::new(0.0, -9.81, 0.0));
/// assert_eq!(config.validate(), Ok(30));
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "V: Serialize, V::Scalar: Serialize",
        deserialize = "V: Deserialize<'de>, V::Scalar: Deserialize<'de>"
    ))
)]
pub struct ClothConfig<V: Vec> {
    /// Total particle count. Must be a perfect square `n * n` with `n >= 2`.
    /// Default: 900 (a 30x30 grid).
    pub particle_count: usize,
    /// Mass of every particle. Default: 0.05.
    pub particle_mass: V::Scalar,
    /// Hooke constant of every structural spring. Default: 20000.
    pub stiffness: V::Scalar,
    /// Rest length of every spring, also the initial particle spacing. Default: 0.1.
    pub rest_length: V::Scalar,
    /// Axial damping coefficient of every spring. Default: 2.0.
    pub damping: V::Scalar,
    /// Gravitational acceleration. Default: zero.
    pub gravity: V,
}

impl<V: Vec> ClothConfig<V> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        ClothConfig {
            particle_count: 900,
            particle_mass: V::Scalar::from_f32(0.05),
            stiffness: V::Scalar::from_f32(20_000.0),
            rest_length: V::Scalar::from_f32(0.1),
            damping: V::Scalar::from_f32(2.0),
            gravity: V::zero(),
        }
    }

    pub fn with_particle_count(mut self, particle_count: usize) -> Self {
        self.particle_count = particle_count;
        self
    }

    /// Set the count from a grid side length.
    pub fn with_side(mut self, side: usize) -> Self {
        self.particle_count = side * side;
        self
    }

    pub fn with_particle_mass(mut self, mass: V::Scalar) -> Self {
        self.particle_mass = mass;
        self
    }

    pub fn with_stiffness(mut self, stiffness: V::Scalar) -> Self {
        self.stiffness = stiffness;
        self
    }

    pub fn with_rest_length(mut self, rest_length: V::Scalar) -> Self {
        self.rest_length = rest_length;
        self
    }

    pub fn with_damping(mut self, damping: V::Scalar) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_gravity(mut self, gravity: V) -> Self {
        self.gravity = gravity;
        self
    }

    /// Validate every parameter and return the grid side length.
    pub fn validate(&self) -> Result<usize> {
        let count = self.particle_count;
        let side = integer_sqrt(count);
        if side * side != count {
            return Err(PhysicsError::NonSquareParticleCount { count });
        }
        if side < 2 {
            return Err(PhysicsError::InvalidGridDimensions { side });
        }
        if !self.particle_mass.is_finite() || self.particle_mass <= V::Scalar::zero() {
            return Err(PhysicsError::InvalidMass);
        }
        validate_parameters(self.stiffness, self.rest_length, self.damping)?;
        if !self.gravity.is_finite() {
            return Err(PhysicsError::InvalidGravity);
        }
        Ok(side)
    }
}

impl<V: Vec> Default for ClothConfig<V> {
    fn default() -> Self {
        Self::new()
    }
}

fn integer_sqrt(value: usize) -> usize {
    let mut root = libm::sqrt(value as f64) as usize;
    while root.saturating_mul(root) > value {
        root -= 1;
    }
    while (root + 1).saturating_mul(root + 1) <= value {
        root += 1;
    }
    root
}
