//! Mass-spring cloth sheet.
//!
//! A `Cloth` starts uninitialized. `initialize` allocates the particle grid,
//! the structural and shear springs and the triangulated faces, and may be
//! called again at any time to rebuild the sheet from scratch.
//! `step_simulation` then advances it in time: external forces, integration
//! and, for the Verlet integrator, constraint relaxation.

pub mod config;
pub mod forces;
pub mod grid;
pub mod spring;

use na::Vector3;

use crate::{
    error::ClothError,
    flog,
    integrators::{relax_constraints, semi_implicit_euler, verlet, Integrator},
    types::Float,
};

use self::{
    config::ClothConfig,
    forces::{apply_spring_forces, ForceModel},
    grid::{Particle, ParticleGrid},
    spring::{build_faces, build_shear_springs, build_structural_springs, Spring},
};

/// Everything allocated by `initialize`
pub struct ClothState {
    pub grid: ParticleGrid,
    pub structural_springs: Vec<Spring>,
    pub shear_springs: Vec<Spring>,
    pub faces: Vec<[usize; 3]>,
    pub config: ClothConfig,
}

impl ClothState {
    fn new(config: &ClothConfig) -> Self {
        let grid = ParticleGrid::new(
            config.width,
            config.height,
            config.num_rows,
            config.num_cols,
            config.total_mass,
            config.axis,
        );
        let structural_springs = build_structural_springs(&grid);
        let shear_springs = build_shear_springs(&grid);
        let faces = build_faces(&grid);

        Self {
            grid,
            structural_springs,
            shear_springs,
            faces,
            config: config.clone(),
        }
    }
}

pub struct Cloth {
    state: Option<ClothState>,
    forces: ForceModel,
}

impl Cloth {
    /// An uninitialized cloth. `wind_seed` seeds the wind noise stream for
    /// the lifetime of the cloth; None draws a seed from the thread rng.
    pub fn new(wind_seed: Option<u64>) -> Self {
        Self {
            state: None,
            forces: ForceModel::new(wind_seed),
        }
    }

    /// Build a ready cloth from a configuration. The wind stream is seeded
    /// from `config.wind_seed`.
    pub fn from_config(config: &ClothConfig) -> Result<Self, ClothError> {
        let mut cloth = Self::new(config.wind_seed);
        cloth.initialize(config)?;
        Ok(cloth)
    }

    /// (Re)build the sheet. Any previous grid and springs are dropped first;
    /// wind is reset to zero. When `config.wind_seed` is set the wind stream
    /// restarts from that seed, otherwise it carries on. On error the cloth is
    /// left uninitialized.
    pub fn initialize(&mut self, config: &ClothConfig) -> Result<(), ClothError> {
        if self.state.take().is_some() {
            flog!("cloth: releasing previous sheet");
        }
        config.validate()?;

        self.forces.gravity = config.gravity;
        self.forces.drag_coefficient = config.drag_coefficient;
        self.forces.reset_wind();
        if let Some(seed) = config.wind_seed {
            self.forces.reseed(seed);
        }

        let state = ClothState::new(config);
        flog!(
            "cloth: {}x{} particles, {} structural + {} shear springs, {} faces, {:?}",
            config.num_rows,
            config.num_cols,
            state.structural_springs.len(),
            state.shear_springs.len(),
            state.faces.len(),
            config.integrator
        );
        self.state = Some(state);
        Ok(())
    }

    /// Advance the sheet by dt. Never allocates or changes topology.
    pub fn step_simulation(&mut self, dt: Float) -> Result<(), ClothError> {
        let state = self.state.as_mut().ok_or(ClothError::Uninitialized)?;
        if !dt.is_finite() || dt < 0. {
            return Err(ClothError::InvalidTimeStep { dt });
        }
        if dt == 0. {
            return Ok(());
        }

        let config = &state.config;
        let grid = &mut state.grid;
        match config.integrator {
            Integrator::SemiImplicitEuler => {
                self.forces.apply_external(grid, true);
                for springs in [&state.structural_springs, &state.shear_springs] {
                    apply_spring_forces(
                        grid,
                        springs,
                        config.structural_stiffness,
                        config.shear_stiffness,
                        config.damping,
                    );
                }
                semi_implicit_euler(grid, dt);
            }
            Integrator::Verlet => {
                self.forces.apply_external(grid, false);
                verlet(grid, dt, config.damping);
                relax_constraints(
                    grid,
                    &state.structural_springs,
                    &state.shear_springs,
                    config.relaxation_iterations,
                );
            }
        }
        Ok(())
    }

    /// Pin a particle in place. Out of range indices are ignored.
    pub fn lock_particle(&mut self, row: usize, col: usize) {
        if let Some(p) = self.particle_mut(row, col) {
            p.locked = true;
            p.velocity = Vector3::zeros();
            p.previous_position = p.position;
        }
    }

    /// Release a pinned particle. Out of range indices are ignored.
    pub fn unlock_particle(&mut self, row: usize, col: usize) {
        if let Some(p) = self.particle_mut(row, col) {
            p.locked = false;
        }
    }

    pub fn is_locked(&self, row: usize, col: usize) -> bool {
        self.particle(row, col).is_some_and(|p| p.locked)
    }

    pub fn set_wind_vector(&mut self, x: Float, y: Float, z: Float) {
        self.forces.set_wind_vector(Vector3::new(x, y, z));
    }

    pub fn set_wind_factor(&mut self, factor: u32) {
        self.forces.set_wind_factor(factor);
    }

    pub fn set_gravity(&mut self, gravity: Vector3<Float>) {
        self.forces.gravity = gravity;
    }

    pub fn wind_vector(&self) -> Vector3<Float> {
        self.forces.wind_vector()
    }

    pub fn wind_factor(&self) -> u32 {
        self.forces.wind_factor()
    }

    pub fn gravity(&self) -> Vector3<Float> {
        self.forces.gravity
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> Option<&mut ClothState> {
        self.state.as_mut()
    }

    fn particle_mut(&mut self, row: usize, col: usize) -> Option<&mut Particle> {
        self.state.as_mut().and_then(|s| s.grid.get_mut(row, col))
    }
}

/// Read-only queries for a renderer. They report an empty sheet while the
/// cloth is uninitialized.
impl Cloth {
    pub fn is_ready(&self) -> bool {
        self.state.is_some()
    }

    pub fn state(&self) -> Option<&ClothState> {
        self.state.as_ref()
    }

    pub fn config(&self) -> Option<&ClothConfig> {
        self.state.as_ref().map(|s| &s.config)
    }

    pub fn num_rows(&self) -> usize {
        self.state.as_ref().map_or(0, |s| s.grid.num_rows)
    }

    pub fn num_cols(&self) -> usize {
        self.state.as_ref().map_or(0, |s| s.grid.num_cols)
    }

    pub fn particle_count(&self) -> usize {
        self.state.as_ref().map_or(0, |s| s.grid.len())
    }

    pub fn structural_spring_count(&self) -> usize {
        self.state.as_ref().map_or(0, |s| s.structural_springs.len())
    }

    pub fn shear_spring_count(&self) -> usize {
        self.state.as_ref().map_or(0, |s| s.shear_springs.len())
    }

    pub fn spring_count(&self) -> usize {
        self.structural_spring_count() + self.shear_spring_count()
    }

    pub fn face_count(&self) -> usize {
        self.state.as_ref().map_or(0, |s| s.faces.len())
    }

    pub fn particle(&self, row: usize, col: usize) -> Option<&Particle> {
        self.state.as_ref().and_then(|s| s.grid.get(row, col))
    }

    pub fn position(&self, row: usize, col: usize) -> Option<Vector3<Float>> {
        self.particle(row, col).map(|p| p.position)
    }

    pub fn mass(&self, row: usize, col: usize) -> Option<Float> {
        self.particle(row, col).map(|p| p.mass)
    }

    pub fn particles(&self) -> &[Particle] {
        match &self.state {
            Some(s) => &s.grid.particles,
            None => &[],
        }
    }

    pub fn positions(&self) -> Vec<Vector3<Float>> {
        self.particles().iter().map(|p| p.position).collect()
    }

    /// Structural springs followed by shear springs
    pub fn springs(&self) -> impl Iterator<Item = &Spring> {
        self.state
            .iter()
            .flat_map(|s| s.structural_springs.iter().chain(s.shear_springs.iter()))
    }

    pub fn faces(&self) -> &[[usize; 3]] {
        match &self.state {
            Some(s) => &s.faces,
            None => &[],
        }
    }

    pub fn tex_coords(&self) -> &[[Float; 2]] {
        match &self.state {
            Some(s) => s.grid.tex_coords(),
            None => &[],
        }
    }
}
