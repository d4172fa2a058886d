use na::Vector3;

use crate::{cloth::Cloth, integrators, types::Float};

/// Kinetic energy of the cloth, Σ ½ m |v|²
pub fn kinetic_energy(cloth: &Cloth) -> Float {
    cloth
        .particles()
        .iter()
        .map(|p| 0.5 * p.mass * p.velocity.norm_squared())
        .sum()
}

/// Gravitational potential energy relative to the origin, Σ -m g·x
pub fn gravitational_potential_energy(cloth: &Cloth) -> Float {
    let g = cloth.gravity();
    cloth
        .particles()
        .iter()
        .map(|p| -p.mass * g.dot(&p.position))
        .sum()
}

/// Elastic energy stored in the springs, Σ ½ k (l - l0)²
pub fn elastic_potential_energy(cloth: &Cloth) -> Float {
    let Some(state) = cloth.state() else {
        return 0.;
    };
    let config = &state.config;
    cloth
        .springs()
        .map(|s| {
            let k = s.stiffness(config.structural_stiffness, config.shear_stiffness);
            0.5 * k * (s.length(&state.grid) - s.rest_length).powi(2)
        })
        .sum()
}

pub fn total_energy(cloth: &Cloth) -> Float {
    kinetic_energy(cloth) + gravitational_potential_energy(cloth) + elastic_potential_energy(cloth)
}

/// Σ (l - l0)² over structural and shear springs
pub fn constraint_deviation(cloth: &Cloth) -> Float {
    cloth.state().map_or(0., |s| {
        integrators::constraint_deviation(&s.grid, &s.structural_springs)
            + integrators::constraint_deviation(&s.grid, &s.shear_springs)
    })
}

/// Mass-weighted mean position
pub fn center_of_mass(cloth: &Cloth) -> Vector3<Float> {
    let particles = cloth.particles();
    let total: Float = particles.iter().map(|p| p.mass).sum();
    if total == 0. {
        return Vector3::zeros();
    }
    particles
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.position * p.mass)
        / total
}
