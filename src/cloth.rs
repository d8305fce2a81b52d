//! Square cloth of particles joined by structural springs, with two
//! kinematically driven pin points.

use crate::config::ClothConfig;
use crate::error::{PhysicsError, Result};
use crate::float::Float;
use crate::particle::Particle;
use crate::simulation::{accumulate_spring_forces, integrate_particles, Simulation};
use crate::spring::Spring;
use crate::vec::Vec;
use alloc::vec::Vec as AllocVec;

/// Number of driver-controlled pin slots.
pub const PIN_COUNT: usize = 2;

/// The initial pose lays particles along the x axis, wrapping every this
/// many particles regardless of the grid side.
pub const INITIAL_ROW_WRAP: usize = 10;

/// A mass-spring cloth on an `n x n` grid.
///
/// Particle at grid coordinate `(x, y)` has index `x + y * n`. Each
/// particle is joined to its left and upper neighbour by a structural
/// spring; there are no shear or bend springs.
///
/// Pin slot 0 drives particle `0` and slot 1 drives particle `n - 1`,
/// both on the first row. After every integration the pinned particles
/// are overwritten with [`pin_positions`](Self::pin_positions) and
/// [`pin_velocities`](Self::pin_velocities), which a driver may mutate
/// freely between steps.
pub struct ClothSimulation<V: Vec> {
    particles: AllocVec<Particle<V>>,
    springs: AllocVec<Spring<V>>,
    side: usize,
    gravity: V,
    pub pin_positions: [V; PIN_COUNT],
    pub pin_velocities: [V; PIN_COUNT],
}

impl<V: Vec> ClothSimulation<V> {
    /// Build the grid described by `config`.
    ///
    /// Springs are created in index order: for each particle, first the
    /// horizontal spring to its left neighbour (unless it starts a row),
    /// then the vertical spring to the particle above (unless it is on the
    /// first row).
    pub fn new(config: &ClothConfig<V>) -> Result<Self> {
        let side = config.validate()?;
        let count = config.particle_count;
        let spacing = config.rest_length;

        let mut particles = AllocVec::with_capacity(count);
        for i in 0..count {
            let x = V::Scalar::from_usize(i % INITIAL_ROW_WRAP) * spacing;
            particles.push(Particle::new(V::axis_x().scale(x), config.particle_mass));
        }

        let mut springs = AllocVec::with_capacity(2 * side * (side - 1));
        for i in 0..count {
            if i % side != 0 {
                springs.push(Spring::new(i, i - 1, config.stiffness, spacing, config.damping));
            }
            if i >= side {
                springs.push(Spring::new(i, i - side, config.stiffness, spacing, config.damping));
            }
        }

        tracing::debug!(
            side,
            particles = particles.len(),
            springs = springs.len(),
            "built cloth grid"
        );

        let far_end = V::axis_x().scale(V::Scalar::from_usize(side) * spacing);
        Ok(ClothSimulation {
            particles,
            springs,
            side,
            gravity: config.gravity,
            pin_positions: [V::zero(), far_end],
            pin_velocities: [V::zero(); PIN_COUNT],
        })
    }

    /// Grid side length `n`.
    pub fn side(&self) -> usize { self.side }

    pub fn gravity(&self) -> V { self.gravity }

    pub fn grid_index(&self, x: usize, y: usize) -> usize {
        x + y * self.side
    }

    /// Inverse of [`grid_index`](Self::grid_index).
    pub fn grid_coords(&self, index: usize) -> (usize, usize) {
        (index % self.side, index / self.side)
    }

    /// Position of the particle at grid coordinate `(x, y)`. Both
    /// coordinates must be below [`side`](Self::side).
    pub fn position_at(&self, x: usize, y: usize) -> Result<V> {
        if x >= self.side || y >= self.side {
            return Err(PhysicsError::GridCoordsOutOfBounds { x, y, side: self.side });
        }
        self.particle(self.grid_index(x, y)).map(|p| p.position)
    }

    pub fn positions(&self) -> AllocVec<V> {
        self.particles.iter().map(|p| p.position).collect()
    }

    pub fn springs(&self) -> &[Spring<V>] { &self.springs }
    pub fn spring_count(&self) -> usize { self.springs.len() }

    /// Endpoint positions of every spring, in construction order.
    pub fn segments(&self) -> impl Iterator<Item = (V, V)> + '_ {
        self.springs
            .iter()
            .map(|s| (self.particles[s.a()].position, self.particles[s.b()].position))
    }

    /// Particle index driven by pin `slot`.
    pub fn pin_particle_index(&self, slot: usize) -> Result<usize> {
        check_slot(slot)?;
        Ok(slot * (self.side - 1))
    }

    /// Shift the target position of pin `slot` by `offset`.
    pub fn nudge_pin(&mut self, slot: usize, offset: V) -> Result<()> {
        check_slot(slot)?;
        self.pin_positions[slot] = self.pin_positions[slot] + offset;
        tracing::trace!(slot, position = ?self.pin_positions[slot], "pin moved");
        Ok(())
    }

    /// Add `delta` to the velocity of pin `slot`.
    pub fn accelerate_pin(&mut self, slot: usize, delta: V) -> Result<()> {
        check_slot(slot)?;
        self.pin_velocities[slot] = self.pin_velocities[slot] + delta;
        tracing::trace!(slot, velocity = ?self.pin_velocities[slot], "pin accelerated");
        Ok(())
    }

    /// Stop both pins where they are.
    pub fn halt_pins(&mut self) {
        self.pin_velocities = [V::zero(); PIN_COUNT];
        tracing::trace!("pins halted");
    }

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

impl<V: Vec> Simulation<V> for ClothSimulation<V> {
    fn particles(&self) -> &[Particle<V>] { &self.particles }
    fn particles_mut(&mut self) -> &mut [Particle<V>] { &mut self.particles }

    fn solve(&mut self) {
        accumulate_spring_forces(&mut self.particles, &self.springs, self.gravity);
    }

    /// Integrate freely, then advance each pin target by its velocity and
    /// snap the pinned particle onto it. Whatever the pinned particle did
    /// under its own forces this step is discarded.
    fn integrate(&mut self, dt: V::Scalar) {
        integrate_particles(&mut self.particles, dt);
        for slot in 0..PIN_COUNT {
            self.pin_positions[slot] = self.pin_positions[slot] + self.pin_velocities[slot].scale(dt);
            let pinned = &mut self.particles[slot * (self.side - 1)];
            pinned.position = self.pin_positions[slot];
            pinned.velocity = self.pin_velocities[slot];
        }
    }
}

fn check_slot(slot: usize) -> Result<()> {
    if slot < PIN_COUNT {
        Ok(())
    } else {
        Err(PhysicsError::InvalidPinSlot { slot })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec::Vec3;

    fn small_cloth(side: usize) -> ClothSimulation<Vec3<f32>> {
        let config = ClothConfig::new()
            .with_side(side)
            .with_stiffness(100.0)
            .with_rest_length(1.0)
            .with_damping(0.5);
        ClothSimulation::new(&config).unwrap()
    }

    #[test]
    fn spring_count_for_side() {
        // 2 * n * (n - 1) structural springs
        assert_eq!(small_cloth(2).spring_count(), 4);
        assert_eq!(small_cloth(3).spring_count(), 12);
        assert_eq!(small_cloth(30).spring_count(), 1740);
    }

    #[test]
    fn springs_created_in_index_order() {
        let cloth = small_cloth(3);
        let endpoints: AllocVec<(usize, usize)> =
            cloth.springs().iter().map(|s| s.endpoints()).collect();
        assert_eq!(&endpoints[..4], &[(1, 0), (2, 1), (3, 0), (4, 3)]);
    }

    #[test]
    fn initial_pose_wraps_every_ten_particles() {
        let cloth = small_cloth(4);
        assert_eq!(cloth.particles()[9].position, Vec3::new(9.0, 0.0, 0.0));
        assert_eq!(cloth.particles()[10].position, Vec3::zero());
        assert_eq!(cloth.particles()[13].position, Vec3::new(3.0, 0.0, 0.0));
    }

    #[test]
    fn pins_start_at_origin_and_far_end() {
        let cloth = small_cloth(5);
        assert_eq!(cloth.pin_positions, [Vec3::zero(), Vec3::new(5.0, 0.0, 0.0)]);
        assert_eq!(cloth.pin_velocities, [Vec3::zero(); PIN_COUNT]);
    }

    #[test]
    fn pin_slots_map_to_first_row_ends() {
        let cloth = small_cloth(4);
        assert_eq!(cloth.pin_particle_index(0), Ok(0));
        assert_eq!(cloth.pin_particle_index(1), Ok(3));
        assert_eq!(cloth.pin_particle_index(2), Err(PhysicsError::InvalidPinSlot { slot: 2 }));
    }

    #[test]
    fn grid_coords_round_trip() {
        let cloth = small_cloth(4);
        assert_eq!(cloth.grid_index(3, 2), 11);
        assert_eq!(cloth.grid_coords(11), (3, 2));
    }

    #[test]
    fn pin_controls() {
        let mut cloth = small_cloth(3);
        cloth.nudge_pin(1, Vec3::new(0.0, 0.05, 0.0)).unwrap();
        assert_eq!(cloth.pin_positions[1], Vec3::new(3.0, 0.05, 0.0));
        cloth.accelerate_pin(0, Vec3::new(1.0, 0.0, 0.0)).unwrap();
        assert_eq!(cloth.pin_velocities[0], Vec3::new(1.0, 0.0, 0.0));
        assert!(cloth.nudge_pin(2, Vec3::zero()).is_err());
        assert!(cloth.accelerate_pin(5, Vec3::zero()).is_err());
        cloth.halt_pins();
        assert_eq!(cloth.pin_velocities, [Vec3::zero(); PIN_COUNT]);
    }

    #[test]
    fn planar_cloth_keeps_pins() {
        use crate::vec::Vec2;

        let config = ClothConfig::new()
            .with_side(4)
            .with_particle_mass(1.0)
            .with_stiffness(50.0)
            .with_rest_length(1.0)
            .with_damping(0.1)
            .with_gravity(Vec2::new(0.0f64, -9.81));
        let mut cloth = ClothSimulation::new(&config).unwrap();
        assert_eq!(cloth.pin_positions[1], Vec2::new(4.0, 0.0));
        for _ in 0..10 {
            cloth.operate(0.01);
        }
        assert_eq!(cloth.positions()[3], Vec2::new(4.0, 0.0));
        assert!(cloth.positions()[5].y < 0.0);
    }

    #[test]
    fn position_at_checks_bounds() {
        let cloth = small_cloth(3);
        assert_eq!(cloth.position_at(2, 0), Ok(Vec3::new(2.0, 0.0, 0.0)));
        assert_eq!(
            cloth.position_at(0, 3),
            Err(PhysicsError::GridCoordsOutOfBounds { x: 0, y: 3, side: 3 })
        );
    }

    #[test]
    fn position_at_rejects_column_past_edge() {
        let cloth = small_cloth(3);
        // (3, 0) and (5, 0) flatten to valid indices 3 and 5 on later rows.
        assert_eq!(
            cloth.position_at(3, 0),
            Err(PhysicsError::GridCoordsOutOfBounds { x: 3, y: 0, side: 3 })
        );
        assert_eq!(
            cloth.position_at(5, 0),
            Err(PhysicsError::GridCoordsOutOfBounds { x: 5, y: 0, side: 3 })
        );
        assert!(cloth.position_at(2, 2).is_ok());
    }
}
