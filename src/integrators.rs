use na::Vector3;

use crate::{
    cloth::{grid::ParticleGrid, spring::Spring},
    types::Float,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Integrator {
    /// Force based, springs act through explicit forces
    SemiImplicitEuler,
    /// Position based, springs act through constraint relaxation
    Verlet,
}

/// a = acceleration + force / m, v += a dt, x += v dt
///
/// Note: velocity is updated before position, which keeps the scheme stable
/// for stiffer springs than explicit Euler would tolerate.
pub fn semi_implicit_euler(grid: &mut ParticleGrid, dt: Float) {
    for particle in grid.particles.iter_mut() {
        if particle.locked {
            particle.velocity = Vector3::zeros();
            continue;
        }
        particle.acceleration += particle.force * particle.inv_mass;
        particle.previous_position = particle.position;
        particle.velocity += particle.acceleration * dt;
        particle.position += particle.velocity * dt;
    }
}

/// x' = (2 - d) x - (1 - d) x_prev + a dt², where d acts as velocity decay.
/// The velocity is kept as the finite difference of the step.
pub fn verlet(grid: &mut ParticleGrid, dt: Float, drag: Float) {
    for particle in grid.particles.iter_mut() {
        if particle.locked {
            particle.velocity = Vector3::zeros();
            continue;
        }
        let current = particle.position;
        particle.position = (2. - drag) * current - (1. - drag) * particle.previous_position
            + particle.acceleration * dt * dt;
        particle.previous_position = current;
        if dt > 0. {
            particle.velocity = (particle.position - current) / dt;
        }
    }
}

/// Position corrections for one spring, to be added to p1 and p2, that
/// restore its rest length. The correction is shared evenly between two free
/// endpoints, taken fully by the free one when the other is locked.
pub fn constraint_correction(
    grid: &ParticleGrid,
    spring: &Spring,
) -> (Vector3<Float>, Vector3<Float>) {
    let a = &grid.particles[spring.p1];
    let b = &grid.particles[spring.p2];

    let delta = a.position - b.position;
    let length = delta.norm().max(crate::EPSILON);
    let diff = (length - spring.rest_length) / length;
    let correction = delta * diff;

    match (a.locked, b.locked) {
        (false, false) => (-0.5 * correction, 0.5 * correction),
        (true, false) => (Vector3::zeros(), correction),
        (false, true) => (-correction, Vector3::zeros()),
        (true, true) => (Vector3::zeros(), Vector3::zeros()),
    }
}

/// One Gauss-Seidel pass over the springs, correcting positions in place
pub fn relax_springs(grid: &mut ParticleGrid, springs: &[Spring]) {
    for spring in springs.iter() {
        let (c1, c2) = constraint_correction(grid, spring);
        grid.particles[spring.p1].position += c1;
        grid.particles[spring.p2].position += c2;
    }
}

/// Repeated relaxation passes, structural springs first then shear springs
pub fn relax_constraints(
    grid: &mut ParticleGrid,
    structural: &[Spring],
    shear: &[Spring],
    iterations: usize,
) {
    for _ in 0..iterations {
        relax_springs(grid, structural);
        relax_springs(grid, shear);
    }
}

/// Sum of squared deviations of the spring lengths from their rest lengths
pub fn constraint_deviation(grid: &ParticleGrid, springs: &[Spring]) -> Float {
    springs
        .iter()
        .map(|s| (s.length(grid) - s.rest_length).powi(2))
        .sum()
}
