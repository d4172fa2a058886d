use na::{vector, Vector3};

use crate::{error::ClothError, integrators::Integrator, types::Float, GRAVITY};

/// Which world axis the height of the sheet lays along.
/// The width always runs along x.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayAxis {
    /// Sheet in the xz-plane, lying flat under a -y gravity
    Z,
    /// Sheet in the xy-plane, hanging like a curtain
    Y,
}

/// Geometry and material constants of a cloth sheet
#[derive(Clone, Debug, PartialEq)]
pub struct ClothConfig {
    pub width: Float,
    pub height: Float,
    pub num_rows: usize,
    pub num_cols: usize,
    pub total_mass: Float,

    pub structural_stiffness: Float,
    pub shear_stiffness: Float,
    /// Spring damping under SemiImplicitEuler, integration drag under Verlet
    pub damping: Float,
    pub axis: LayAxis,

    pub integrator: Integrator,
    pub relaxation_iterations: usize,
    /// Viscous drag coefficient, SemiImplicitEuler only
    pub drag_coefficient: Float,
    pub gravity: Vector3<Float>,
    /// Seed of the wind noise stream. None seeds from the thread rng.
    pub wind_seed: Option<u64>,
}

impl Default for ClothConfig {
    fn default() -> Self {
        Self::new(10., 10., 30, 30, 200., 550., 400., 0.005, LayAxis::Z)
    }
}

impl ClothConfig {
    pub fn new(
        width: Float,
        height: Float,
        num_rows: usize,
        num_cols: usize,
        total_mass: Float,
        structural_stiffness: Float,
        shear_stiffness: Float,
        damping: Float,
        axis: LayAxis,
    ) -> Self {
        Self {
            width,
            height,
            num_rows,
            num_cols,
            total_mass,
            structural_stiffness,
            shear_stiffness,
            damping,
            axis,
            integrator: Integrator::Verlet,
            relaxation_iterations: 3,
            drag_coefficient: 0.01,
            gravity: vector![0., -GRAVITY, 0.],
            wind_seed: None,
        }
    }

    pub fn with_integrator(mut self, integrator: Integrator) -> Self {
        self.integrator = integrator;
        self
    }

    pub fn with_relaxation_iterations(mut self, iterations: usize) -> Self {
        self.relaxation_iterations = iterations;
        self
    }

    pub fn with_drag_coefficient(mut self, drag: Float) -> Self {
        self.drag_coefficient = drag;
        self
    }

    pub fn with_gravity(mut self, gravity: Vector3<Float>) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_wind_seed(mut self, seed: u64) -> Self {
        self.wind_seed = Some(seed);
        self
    }

    pub fn face_count(&self) -> usize {
        2 * self.num_rows.saturating_sub(1) * self.num_cols.saturating_sub(1)
    }

    /// Reject configurations that would produce degenerate topology or
    /// non-finite masses
    pub fn validate(&self) -> Result<(), ClothError> {
        let invalid = |reason| Err(ClothError::InvalidConfiguration { reason });

        if self.num_rows < 2 {
            return invalid("num_rows must be at least 2");
        }
        if self.num_cols < 2 {
            return invalid("num_cols must be at least 2");
        }
        if !(self.width.is_finite() && self.width > 0.) {
            return invalid("width must be positive");
        }
        if !(self.height.is_finite() && self.height > 0.) {
            return invalid("height must be positive");
        }
        if !(self.total_mass.is_finite() && self.total_mass > 0.) {
            return invalid("total_mass must be positive");
        }
        for k in [self.structural_stiffness, self.shear_stiffness] {
            if !(k.is_finite() && k >= 0.) {
                return invalid("spring stiffness must be non-negative");
            }
        }
        if !(self.damping.is_finite() && self.damping >= 0.) {
            return invalid("damping must be non-negative");
        }
        if !(self.drag_coefficient.is_finite() && self.drag_coefficient >= 0.) {
            return invalid("drag_coefficient must be non-negative");
        }
        if !self.gravity.iter().all(|g| g.is_finite()) {
            return invalid("gravity must be finite");
        }
        if self.integrator == Integrator::Verlet {
            if self.damping >= 1. {
                return invalid("Verlet damping must be below 1");
            }
            if self.relaxation_iterations == 0 {
                return invalid("Verlet needs at least one relaxation iteration");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(ClothConfig::default().validate().is_ok());
        assert_eq!(ClothConfig::default().face_count(), 2 * 29 * 29);
    }

    #[test]
    fn rejects_degenerate_grid() {
        for (rows, cols) in [(1, 5), (5, 1), (0, 0)] {
            let config = ClothConfig::new(1., 1., rows, cols, 1., 1., 1., 0., LayAxis::Z);
            assert!(matches!(
                config.validate(),
                Err(ClothError::InvalidConfiguration { .. })
            ));
        }
    }

    #[test]
    fn rejects_non_positive_dimensions() {
        let bad = [
            ClothConfig::new(0., 1., 3, 3, 1., 1., 1., 0., LayAxis::Z),
            ClothConfig::new(1., -1., 3, 3, 1., 1., 1., 0., LayAxis::Z),
            ClothConfig::new(1., 1., 3, 3, 0., 1., 1., 0., LayAxis::Z),
            ClothConfig::new(Float::NAN, 1., 3, 3, 1., 1., 1., 0., LayAxis::Z),
        ];
        for config in bad.iter() {
            assert!(config.validate().is_err(), "{:?}", config);
        }
    }

    #[test]
    fn verlet_damping_must_stay_below_one() {
        let config = ClothConfig::new(1., 1., 3, 3, 1., 1., 1., 1., LayAxis::Z);
        assert!(config.validate().is_err());

        let config = config.with_integrator(Integrator::SemiImplicitEuler);
        assert!(config.validate().is_ok());
    }
}
