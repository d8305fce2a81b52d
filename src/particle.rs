//! Point masses integrated with semi-implicit Euler.

use crate::float::Float;
use crate::vec::Vec;

/// A point mass with position, velocity and an accumulated force.
///
/// The force accumulator is transient: it is cleared at the start of
/// every simulation step, filled by springs and gravity, then consumed
/// by [`Particle::integrate`].
#[derive(Clone, Debug)]
pub struct Particle<V: Vec> {
    pub position: V,
    pub velocity: V,
    pub force: V,
    mass: V::Scalar,
}

impl<V: Vec> Particle<V> {
    pub fn new(position: V, mass: V::Scalar) -> Self {
        debug_assert!(mass > V::Scalar::zero(), "particle mass must be positive");
        Particle {
            position,
            velocity: V::zero(),
            force: V::zero(),
            mass,
        }
    }

    /// A particle at the origin with zero velocity.
    pub fn at_rest(mass: V::Scalar) -> Self {
        Self::new(V::zero(), mass)
    }

    pub fn mass(&self) -> V::Scalar {
        self.mass
    }

    pub fn apply_force(&mut self, force: V) {
        self.force = self.force + force;
    }

    pub fn reset_forces(&mut self) {
        self.force = V::zero();
    }

    /// Semi-implicit Euler: velocity from the current force first, then
    /// position from the updated velocity.
    pub fn integrate(&mut self, dt: V::Scalar) {
        let acceleration = self.force.scale(V::Scalar::one() / self.mass);
        self.velocity = self.velocity + acceleration.scale(dt);
        self.position = self.position + self.velocity.scale(dt);
    }

    pub fn kinetic_energy(&self) -> V::Scalar {
        V::Scalar::half() * self.mass * self.velocity.length_sq()
    }

    pub fn momentum(&self) -> V {
        self.velocity.scale(self.mass)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec::Vec3;

    #[test]
    fn forces_accumulate_until_reset() {
        let mut p: Particle<Vec3<f32>> = Particle::at_rest(1.0);
        p.apply_force(Vec3::new(1.0, 0.0, 0.0));
        p.apply_force(Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(p.force, Vec3::new(1.0, 2.0, 0.0));
        p.reset_forces();
        assert_eq!(p.force, Vec3::zero());
    }

    #[test]
    fn position_uses_updated_velocity() {
        let mut p: Particle<Vec3<f64>> = Particle::at_rest(2.0);
        p.apply_force(Vec3::new(4.0, 0.0, 0.0));
        p.integrate(0.5);
        // a = 2, v = 1, x = v * dt = 0.5 (explicit Euler would leave x at 0)
        assert!((p.velocity.x - 1.0).abs() < 1e-12);
        assert!((p.position.x - 0.5).abs() < 1e-12);
    }

    #[test]
    fn energy_and_momentum() {
        let mut p: Particle<Vec3<f32>> = Particle::new(Vec3::new(1.0, 1.0, 1.0), 2.0);
        p.velocity = Vec3::new(3.0, 0.0, 4.0);
        assert!((p.kinetic_energy() - 25.0).abs() < 1e-5);
        assert_eq!(p.momentum(), Vec3::new(6.0, 0.0, 8.0));
    }
}
