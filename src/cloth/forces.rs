use na::{vector, Vector3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{
    cloth::{grid::ParticleGrid, spring::Spring},
    types::Float,
    util::{guarded_norm, safe_normalize},
    GRAVITY,
};

/// External forces acting on the cloth: gravity, viscous drag and a noisy wind.
///
/// The wind noise comes from a single random stream seeded when the model is
/// created, so successive steps draw fresh samples.
pub struct ForceModel {
    pub gravity: Vector3<Float>,
    pub drag_coefficient: Float,

    wind: Vector3<Float>,
    wind_factor: u32,
    rng: ChaCha8Rng,
}

impl ForceModel {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        Self {
            gravity: vector![0., -GRAVITY, 0.],
            drag_coefficient: 0.,
            wind: Vector3::zeros(),
            wind_factor: 0,
            rng,
        }
    }

    /// Restart the wind noise stream from a fixed seed
    pub fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    pub fn set_wind_vector(&mut self, wind: Vector3<Float>) {
        self.wind = wind;
    }

    pub fn set_wind_factor(&mut self, factor: u32) {
        self.wind_factor = factor;
    }

    pub fn wind_vector(&self) -> Vector3<Float> {
        self.wind
    }

    pub fn wind_factor(&self) -> u32 {
        self.wind_factor
    }

    pub fn reset_wind(&mut self) {
        self.wind = Vector3::zeros();
        self.wind_factor = 0;
    }

    pub fn wind_active(&self) -> bool {
        self.wind != Vector3::zeros() && self.wind_factor != 0
    }

    /// Draw a wind acceleration for a particle of the given inverse mass.
    /// Each component is uniform between 0 and the wind vector component, the
    /// direction is then scaled by an integer uniform in [0, wind_factor).
    pub fn sample_wind(&mut self, inv_mass: Float) -> Vector3<Float> {
        if !self.wind_active() {
            return Vector3::zeros();
        }
        let wind = self.wind;
        let direction = safe_normalize(&wind.map(|c| sample_between_zero(&mut self.rng, c)));
        let scale = self.rng.random_range(0..self.wind_factor) as Float;
        direction * scale * inv_mass
    }

    /// Reset the per-step accumulators and apply gravity, wind and, when
    /// `with_drag` is set, viscous drag to every unlocked particle
    pub fn apply_external(&mut self, grid: &mut ParticleGrid, with_drag: bool) {
        for particle in grid.particles.iter_mut() {
            particle.force = Vector3::zeros();
            if particle.locked {
                particle.acceleration = Vector3::zeros();
                continue;
            }

            particle.acceleration = self.gravity + self.sample_wind(particle.inv_mass);
            if with_drag {
                particle.force += drag_force(&particle.velocity, self.drag_coefficient);
            }
        }
    }
}

fn sample_between_zero(rng: &mut ChaCha8Rng, c: Float) -> Float {
    if c > 0. {
        rng.random_range(0.0..=c)
    } else if c < 0. {
        rng.random_range(c..=0.0)
    } else {
        0.
    }
}

/// Viscous drag, -v̂ |v|² c. Zero for a particle at rest.
pub fn drag_force(velocity: &Vector3<Float>, coefficient: Float) -> Vector3<Float> {
    -safe_normalize(velocity) * velocity.norm_squared() * coefficient
}

/// Damped spring force acting on p1. p2 receives the negation.
pub fn spring_force(grid: &ParticleGrid, spring: &Spring, k: Float, damping: Float) -> Vector3<Float> {
    let a = &grid.particles[spring.p1];
    let b = &grid.particles[spring.p2];

    let delta = a.position - b.position;
    let length = guarded_norm(&delta);
    let direction = delta / length;
    let relative_velocity = a.velocity - b.velocity;

    -(k * (length - spring.rest_length) + damping * relative_velocity.dot(&direction)) * direction
}

/// Accumulate spring forces into the particles' force accumulators, skipping
/// locked endpoints
pub fn apply_spring_forces(
    grid: &mut ParticleGrid,
    springs: &[Spring],
    structural_stiffness: Float,
    shear_stiffness: Float,
    damping: Float,
) {
    for spring in springs.iter() {
        let k = spring.stiffness(structural_stiffness, shear_stiffness);
        let f = spring_force(grid, spring, k, damping);

        let p1 = &mut grid.particles[spring.p1];
        if !p1.locked {
            p1.force += f;
        }
        let p2 = &mut grid.particles[spring.p2];
        if !p2.locked {
            p2.force -= f;
        }
    }
}
