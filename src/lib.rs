//! Mass-spring cloth simulation with kinematically pinned corners.
//!
//! `springcloth` models cloth as a square grid of point masses joined by
//! damped Hookean springs, integrated with semi-implicit Euler at a fixed,
//! caller-chosen timestep. Two points on the first row are pinned to
//! driver-controlled targets, which makes it suitable for interactive
//! demos that drag the cloth around.
//!
//! # Features
//!
//! - **Damped springs**: Hooke's law plus axial damping, exact action/reaction pairs
//! - **Semi-implicit Euler**: velocity first, then position from the new velocity
//! - **Step pipeline**: reset forces, solve, integrate via the `Simulation` trait
//! - **Pinned cloth**: `ClothSimulation` with two position/velocity-driven pins
//! - **Observable**: Monitor physics steps via the `StepObserver` trait
//! - **`no_std` compatible**: Works in embedded and WASM environments
//!
//! # Example
//! ```
//! use springcloth::{ClothConfig, ClothSimulation, Simulation, Vec3};
//!
//! let config = ClothConfig::new()
//!     .with_side(10)
//!     .with_gravity(Vec3::new(0.0f32, -9.81, 0.0));
//! let mut cloth = ClothSimulation::new(&config).unwrap();
//! for _ in 0..100 {
//!     cloth.operate(0.001);
//! }
//! assert_eq!(cloth.particle(0).unwrap().position, cloth.pin_positions[0]);
//! ```

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod particle;
pub mod spring;
pub mod simulation;
pub mod cloth;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::{Vec, Scalar, Vec2, Vec3};
pub use particle::Particle;
pub use spring::{Spring, SPRING_EPSILON};
pub use simulation::{integrate_particles, MassSpringSystem, Simulation};
pub use cloth::{ClothSimulation, INITIAL_ROW_WRAP, PIN_COUNT};
pub use config::ClothConfig;
pub use observer::{StepObserver, NoOpStepObserver};
pub use error::{PhysicsError, Result};
