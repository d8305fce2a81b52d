use springcloth::{ClothConfig, ClothSimulation, Simulation, Vec3};

#[test]
fn cloth_deterministic() {
    let results: Vec<_> = (0..5).map(|_| {
        let config = ClothConfig::new()
            .with_side(8)
            .with_gravity(Vec3::new(0.0f32, -9.81, 0.0));
        let mut cloth = ClothSimulation::new(&config).unwrap();
        cloth.pin_velocities[1] = Vec3::new(0.0, 0.0, 0.5);
        for _ in 0..300 {
            cloth.operate(0.001);
        }
        cloth.positions()
    }).collect();

    for r in &results[1..] {
        for (a, b) in results[0].iter().zip(r.iter()) {
            assert_eq!(a.x.to_bits(), b.x.to_bits());
            assert_eq!(a.y.to_bits(), b.y.to_bits());
            assert_eq!(a.z.to_bits(), b.z.to_bits());
        }
    }
}

#[test]
fn segments_track_particles_after_steps() {
    let config = ClothConfig::new()
        .with_side(4)
        .with_gravity(Vec3::new(0.0f64, -9.81, 0.0));
    let mut cloth = ClothSimulation::new(&config).unwrap();
    for _ in 0..50 {
        cloth.operate(0.001);
    }
    let positions = cloth.positions();
    for (spring, (p1, p2)) in cloth.springs().iter().zip(cloth.segments()) {
        assert_eq!(p1, positions[spring.a()]);
        assert_eq!(p2, positions[spring.b()]);
    }
}
