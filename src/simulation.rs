//! The per-step simulation pipeline and a free-form mass-spring system.

use crate::error::{PhysicsError, Result};
use crate::float::Float;
use crate::observer::{NoOpStepObserver, StepObserver};
use crate::particle::Particle;
use crate::spring::Spring;
use crate::vec::Vec;
use alloc::vec::Vec as AllocVec;

/// A simulation over an arena of particles.
///
/// Every step runs the same sequence: clear all force accumulators,
/// [`solve`](Simulation::solve) to accumulate forces, then
/// [`integrate`](Simulation::integrate). Implementors customise the
/// middle stage and may override integration to apply constraints after
/// the particles have moved.
pub trait Simulation<V: Vec> {
    fn particles(&self) -> &[Particle<V>];

    fn particles_mut(&mut self) -> &mut [Particle<V>];

    /// Accumulate every internal and external force for this step.
    fn solve(&mut self);

    /// Advance all particles by `dt`.
    fn integrate(&mut self, dt: V::Scalar) {
        integrate_particles(self.particles_mut(), dt);
    }

    fn reset_forces(&mut self) {
        for p in self.particles_mut().iter_mut() {
            p.reset_forces();
        }
    }

    /// Advance the simulation by one timestep of `dt` seconds.
    fn operate(&mut self, dt: V::Scalar) {
        self.operate_observed(dt, &mut NoOpStepObserver);
    }

    fn operate_observed<O: StepObserver>(&mut self, dt: V::Scalar, observer: &mut O) {
        self.reset_forces();
        self.solve();
        observer.on_forces_solved();
        self.integrate(dt);
        observer.on_integrate();
        observer.on_step_complete();
    }

    fn particle_count(&self) -> usize {
        self.particles().len()
    }

    fn particle(&self, index: usize) -> Result<&Particle<V>> {
        let count = self.particle_count();
        self.particles()
            .get(index)
            .ok_or(PhysicsError::ParticleOutOfBounds { index, count })
    }

    fn particle_mut(&mut self, index: usize) -> Result<&mut Particle<V>> {
        let count = self.particle_count();
        self.particles_mut()
            .get_mut(index)
            .ok_or(PhysicsError::ParticleOutOfBounds { index, count })
    }

    fn kinetic_energy(&self) -> V::Scalar {
        self.particles()
            .iter()
            .fold(V::Scalar::zero(), |acc, p| acc + p.kinetic_energy())
    }
}

/// Integrate every particle in `particles`. Overrides of
/// [`Simulation::integrate`] call this before applying their constraints.
pub fn integrate_particles<V: Vec>(particles: &mut [Particle<V>], dt: V::Scalar) {
    for p in particles.iter_mut() {
        p.integrate(dt);
    }
}

/// Solve every spring in order, then add `gravity * mass` to each particle.
pub(crate) fn accumulate_spring_forces<V: Vec>(
    particles: &mut [Particle<V>],
    springs: &[Spring<V>],
    gravity: V,
) {
    for spring in springs.iter() {
        spring.solve(particles);
    }
    for p in particles.iter_mut() {
        let weight = gravity.scale(p.mass());
        p.apply_force(weight);
    }
}

/// Free-form particles joined by springs under uniform gravity.
pub struct MassSpringSystem<V: Vec> {
    particles: AllocVec<Particle<V>>,
    springs: AllocVec<Spring<V>>,
    gravity: V,
}

impl<V: Vec> MassSpringSystem<V> {
    pub fn new() -> Self {
        tracing::debug!("built empty mass-spring system");
        MassSpringSystem {
            particles: AllocVec::new(),
            springs: AllocVec::new(),
            gravity: V::zero(),
        }
    }

    pub fn with_gravity(mut self, gravity: V) -> Self {
        self.gravity = gravity;
        tracing::debug!(gravity = ?self.gravity, "mass-spring system gravity set");
        self
    }

    pub fn gravity(&self) -> V { self.gravity }

    pub fn add_particle(&mut self, particle: Particle<V>) -> Result<usize> {
        let mass = particle.mass();
        if !mass.is_finite() || mass <= V::Scalar::zero() {
            return Err(PhysicsError::InvalidMass);
        }
        let idx = self.particles.len();
        self.particles.push(particle);
        Ok(idx)
    }

    pub fn add_spring(&mut self, spring: Spring<V>) -> Result<usize> {
        spring.validate(self.particles.len())?;
        tracing::trace!(a = spring.a(), b = spring.b(), "adding spring");
        let idx = self.springs.len();
        self.springs.push(spring);
        Ok(idx)
    }

    pub fn springs(&self) -> &[Spring<V>] { &self.springs }
    pub fn spring_count(&self) -> usize { self.springs.len() }

    pub fn potential_energy(&self) -> V::Scalar {
        self.springs
            .iter()
            .fold(V::Scalar::zero(), |acc, s| acc + s.potential_energy(&self.particles))
    }

    /// Kinetic plus elastic energy. Gravitational potential is not included.
    pub fn total_energy(&self) -> V::Scalar {
        self.kinetic_energy() + self.potential_energy()
    }
}

impl<V: Vec> Default for MassSpringSystem<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Vec> Simulation<V> for MassSpringSystem<V> {
    fn particles(&self) -> &[Particle<V>] { &self.particles }
    fn particles_mut(&mut self) -> &mut [Particle<V>] { &mut self.particles }

    fn solve(&mut self) {
        accumulate_spring_forces(&mut self.particles, &self.springs, self.gravity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec::Vec3;

    #[test]
    fn out_of_range_particle_is_an_error() {
        let mut system: MassSpringSystem<Vec3<f32>> = MassSpringSystem::new();
        system.add_particle(Particle::at_rest(1.0)).unwrap();
        assert!(system.particle(0).is_ok());
        assert_eq!(
            system.particle(1).unwrap_err(),
            PhysicsError::ParticleOutOfBounds { index: 1, count: 1 }
        );
        assert!(system.particle_mut(7).is_err());
    }

    #[test]
    fn add_particle_rejects_infinite_mass() {
        let mut system: MassSpringSystem<Vec3<f32>> = MassSpringSystem::new();
        let p = Particle::new(Vec3::zero(), f32::INFINITY);
        assert_eq!(system.add_particle(p), Err(PhysicsError::InvalidMass));
        assert_eq!(system.particle_count(), 0);
    }

    #[test]
    fn add_spring_validates_endpoints() {
        let mut system: MassSpringSystem<Vec3<f32>> = MassSpringSystem::new();
        system.add_particle(Particle::at_rest(1.0)).unwrap();
        assert_eq!(
            system.add_spring(Spring::new(0, 1, 1.0, 1.0, 0.0)),
            Err(PhysicsError::ParticleOutOfBounds { index: 1, count: 1 })
        );
        assert_eq!(system.spring_count(), 0);
    }

    #[test]
    fn spring_forces_then_weight() {
        let mut particles = [
            Particle::new(Vec3::zero(), 1.0f32),
            Particle::new(Vec3::new(2.0, 0.0, 0.0), 2.0),
        ];
        let springs = [Spring::new(0, 1, 10.0, 1.0, 0.0)];
        accumulate_spring_forces(&mut particles, &springs, Vec3::new(0.0, -1.0, 0.0));
        // Stretched by 1.0: the pair is pulled together with magnitude 10.
        assert_eq!(particles[0].force, Vec3::new(10.0, -1.0, 0.0));
        assert_eq!(particles[1].force, Vec3::new(-10.0, -2.0, 0.0));
    }

    #[test]
    fn forces_are_cleared_between_steps() {
        let mut system = MassSpringSystem::new().with_gravity(Vec3::new(0.0f32, -10.0, 0.0));
        system.add_particle(Particle::at_rest(2.0)).unwrap();
        system.operate(0.01);
        system.operate(0.01);
        // Weight only, not weight accumulated over two steps.
        assert!((system.particle(0).unwrap().force.y + 20.0).abs() < 1e-5);
    }
}
