//! Damped Hookean springs between two particles.

use crate::error::{PhysicsError, Result};
use crate::float::Float;
use crate::particle::Particle;
use crate::vec::Vec;

/// Below this separation a spring has no defined axis and applies no force.
pub const SPRING_EPSILON: f32 = 1e-5;

/// A damped spring joining particles `a` and `b` of a particle arena.
///
/// Endpoints are indices into the owning simulation's particle slice and
/// never change after construction.
#[derive(Clone, Debug)]
pub struct Spring<V: Vec> {
    a: usize,
    b: usize,
    pub stiffness: V::Scalar,
    pub rest_length: V::Scalar,
    pub damping: V::Scalar,
}

impl<V: Vec> Spring<V> {
    pub fn new(
        a: usize,
        b: usize,
        stiffness: V::Scalar,
        rest_length: V::Scalar,
        damping: V::Scalar,
    ) -> Self {
        Spring { a, b, stiffness, rest_length, damping }
    }

    pub fn a(&self) -> usize { self.a }
    pub fn b(&self) -> usize { self.b }

    pub fn endpoints(&self) -> (usize, usize) {
        (self.a, self.b)
    }

    /// Check endpoints against `particle_count` and the spring parameters.
    pub fn validate(&self, particle_count: usize) -> Result<()> {
        for index in [self.a, self.b] {
            if index >= particle_count {
                return Err(PhysicsError::ParticleOutOfBounds { index, count: particle_count });
            }
        }
        if self.a == self.b {
            return Err(PhysicsError::DegenerateSpring { index: self.a });
        }
        validate_parameters(self.stiffness, self.rest_length, self.damping)
    }

    /// Force acting on particle `a`; particle `b` receives the negation.
    pub fn force(&self, particles: &[Particle<V>]) -> V {
        let p1 = &particles[self.a];
        let p2 = &particles[self.b];

        let delta = p1.position - p2.position;
        let r = delta.length();
        if r <= V::Scalar::from_f32(SPRING_EPSILON) {
            return V::zero();
        }

        let e = delta.scale(V::Scalar::one() / r);
        let stretch = -self.stiffness * (r - self.rest_length);
        let closing_speed = p1.velocity.dot(e) - p2.velocity.dot(e);
        let friction = -self.damping * closing_speed;
        e.scale(stretch + friction)
    }

    /// Apply the force pair to both endpoints.
    pub fn solve(&self, particles: &mut [Particle<V>]) {
        let force = self.force(particles);
        particles[self.a].apply_force(force);
        particles[self.b].apply_force(-force);
    }

    /// Elastic energy `½ k (r - L)²` stored at the current separation.
    pub fn potential_energy(&self, particles: &[Particle<V>]) -> V::Scalar {
        let r = particles[self.a].position.distance(particles[self.b].position);
        let stretch = r - self.rest_length;
        V::Scalar::half() * self.stiffness * stretch * stretch
    }
}

pub(crate) fn validate_parameters<F: Float>(stiffness: F, rest_length: F, damping: F) -> Result<()> {
    if !stiffness.is_finite() || stiffness <= F::zero() {
        return Err(PhysicsError::InvalidStiffness);
    }
    if !rest_length.is_finite() || rest_length < F::zero() {
        return Err(PhysicsError::InvalidRestLength);
    }
    if !damping.is_finite() || damping < F::zero() {
        return Err(PhysicsError::InvalidDamping);
    }
    Ok(())
}
