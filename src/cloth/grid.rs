use na::{vector, Vector3};

use crate::{cloth::config::LayAxis, types::Float};

/// A point mass of the cloth
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Vector3<Float>,
    pub previous_position: Vector3<Float>,
    pub velocity: Vector3<Float>,
    pub acceleration: Vector3<Float>,
    pub force: Vector3<Float>, // accumulator, SemiImplicitEuler only
    pub mass: Float,
    pub inv_mass: Float,
    pub locked: bool,
}

impl Particle {
    pub fn new(position: Vector3<Float>, mass: Float) -> Self {
        Self {
            position,
            previous_position: position,
            velocity: Vector3::zeros(),
            acceleration: Vector3::zeros(),
            force: Vector3::zeros(),
            mass,
            inv_mass: 1. / mass,
            locked: false,
        }
    }

    /// Inverse mass, 0 for a locked particle
    pub fn effective_inv_mass(&self) -> Float {
        if self.locked {
            0.
        } else {
            self.inv_mass
        }
    }
}

/// Number of grid triangles a particle belongs to. Corners on the
/// triangulation diagonal touch one triangle, the other two corners touch
/// two, remaining border particles three and interior particles six.
pub fn weight_class(row: usize, col: usize, num_rows: usize, num_cols: usize) -> Float {
    let last_row = num_rows - 1;
    let last_col = num_cols - 1;
    let row_border = row == 0 || row == last_row;
    let col_border = col == 0 || col == last_col;

    if (row == 0 && col == 0) || (row == last_row && col == last_col) {
        1.
    } else if (row == last_row && col == 0) || (row == 0 && col == last_col) {
        2.
    } else if row_border || col_border {
        3.
    } else {
        6.
    }
}

/// Half extent, spacing and texture step of `count` particles spread over
/// `extent`
fn axis_spacing(extent: Float, count: usize) -> (Float, Float, Float) {
    if count > 1 {
        let segments = (count - 1) as Float;
        (extent / 2., extent / segments, 1. / segments)
    } else {
        (0., 0., 0.)
    }
}

/// Row-major grid of particles
#[derive(Clone, Debug)]
pub struct ParticleGrid {
    pub particles: Vec<Particle>,
    pub num_rows: usize,
    pub num_cols: usize,

    tex_coords: Vec<[Float; 2]>,
}

impl ParticleGrid {
    /// Lay out num_rows x num_cols particles over a width x height sheet
    /// centred at the origin. Row 0 is at the top (+height/2).
    ///
    /// A single row or column collapses onto the centre line. Such a strip has
    /// no faces, so its mass is spread evenly over the particles.
    pub fn new(
        width: Float,
        height: Float,
        num_rows: usize,
        num_cols: usize,
        total_mass: Float,
        axis: LayAxis,
    ) -> Self {
        let (half_width, w_step, w_tex_step) = axis_spacing(width, num_cols);
        let (half_height, h_step, h_tex_step) = axis_spacing(height, num_rows);

        let face_count = 2 * num_rows.saturating_sub(1) * num_cols.saturating_sub(1);
        let particle_mass = |i, j| {
            if face_count == 0 {
                total_mass / (num_rows * num_cols) as Float
            } else {
                weight_class(i, j, num_rows, num_cols) * total_mass / face_count as Float / 3.
            }
        };

        let mut particles = Vec::with_capacity(num_rows * num_cols);
        let mut tex_coords = Vec::with_capacity(num_rows * num_cols);
        for i in 0..num_rows {
            for j in 0..num_cols {
                let x = -half_width + j as Float * w_step;
                let h = half_height - i as Float * h_step;
                let position = match axis {
                    LayAxis::Z => vector![x, 0., h],
                    LayAxis::Y => vector![x, h, 0.],
                };

                particles.push(Particle::new(position, particle_mass(i, j)));
                tex_coords.push([j as Float * w_tex_step, i as Float * h_tex_step]);
            }
        }

        Self {
            particles,
            num_rows,
            num_cols,
            tex_coords,
        }
    }

    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.num_cols + col
    }

    /// Flattened index, None when out of range
    pub fn checked_index(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.num_rows && col < self.num_cols {
            Some(self.index(row, col))
        } else {
            None
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Particle> {
        self.checked_index(row, col).map(|i| &self.particles[i])
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Particle> {
        self.checked_index(row, col)
            .map(move |i| &mut self.particles[i])
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// (u, v) texture coordinates of each particle, in [0, 1]
    pub fn tex_coords(&self) -> &[[Float; 2]] {
        &self.tex_coords
    }

    pub fn total_mass(&self) -> Float {
        self.particles.iter().map(|p| p.mass).sum()
    }
}

#[cfg(test)]
mod grid_tests {
    use crate::assert_close;

    use super::*;

    #[test]
    fn layout_centred_on_origin() {
        // Arrange
        let grid = ParticleGrid::new(10., 4., 3, 6, 1., LayAxis::Z);

        // Assert
        assert_eq!(grid.len(), 18);
        let top_left = grid.get(0, 0).unwrap();
        let bottom_right = grid.get(2, 5).unwrap();
        assert_eq!(top_left.position, vector![-5., 0., 2.]);
        assert_close!(bottom_right.position.x, 5., 1e-5);
        assert_close!(bottom_right.position.z, -2., 1e-5);
        assert_eq!(bottom_right.position.y, 0.);
        assert_eq!(top_left.previous_position, top_left.position);
    }

    #[test]
    fn layout_along_y_axis() {
        let grid = ParticleGrid::new(2., 2., 2, 2, 1., LayAxis::Y);
        for p in grid.particles.iter() {
            assert_eq!(p.position.z, 0.);
        }
        assert_eq!(grid.get(0, 1).unwrap().position, vector![1., 1., 0.]);
        assert_eq!(grid.get(1, 0).unwrap().position, vector![-1., -1., 0.]);
    }

    #[test]
    fn weight_classes() {
        let (m, n) = (4, 5);
        assert_eq!(weight_class(0, 0, m, n), 1.);
        assert_eq!(weight_class(3, 4, m, n), 1.);
        assert_eq!(weight_class(3, 0, m, n), 2.);
        assert_eq!(weight_class(0, 4, m, n), 2.);
        assert_eq!(weight_class(0, 2, m, n), 3.);
        assert_eq!(weight_class(2, 0, m, n), 3.);
        assert_eq!(weight_class(3, 1, m, n), 3.);
        assert_eq!(weight_class(1, 4, m, n), 3.);
        assert_eq!(weight_class(1, 1, m, n), 6.);
        assert_eq!(weight_class(2, 3, m, n), 6.);
    }

    #[test]
    fn masses_sum_to_total() {
        for (rows, cols) in [(2, 2), (3, 7), (30, 30)] {
            let grid = ParticleGrid::new(1., 1., rows, cols, 160., LayAxis::Z);
            assert_close!(grid.total_mass(), 160., 1e-2);
        }
    }

    #[test]
    fn tex_coords_span_unit_square() {
        let grid = ParticleGrid::new(3., 2., 3, 4, 1., LayAxis::Z);
        let tex = grid.tex_coords();
        assert_eq!(tex[0], [0., 0.]);
        let last = tex[grid.index(2, 3)];
        assert_close!(last[0], 1., 1e-6);
        assert_close!(last[1], 1., 1e-6);
    }

    #[test]
    fn single_row_strip_stays_finite() {
        // Arrange
        let grid = ParticleGrid::new(3., 2., 1, 3, 1., LayAxis::Z);

        // Assert
        assert_eq!(grid.len(), 3);
        for (j, p) in grid.particles.iter().enumerate() {
            assert!(p.position.iter().all(|c| c.is_finite()));
            assert_close!(p.position.x, -1.5 + 1.5 * j as Float, 1e-6);
            assert_eq!(p.position.z, 0.);
            assert_close!(p.mass, 1. / 3., 1e-6);
            assert!(p.inv_mass.is_finite());
        }
        assert!(grid.tex_coords().iter().flatten().all(|c| c.is_finite()));
    }

    #[test]
    fn single_column_and_empty_grids() {
        let column = ParticleGrid::new(3., 2., 4, 1, 2., LayAxis::Y);
        assert!(column.particles.iter().all(|p| p.position.x == 0.));
        assert_close!(column.get(0, 0).unwrap().position.y, 1., 1e-6);
        assert_close!(column.total_mass(), 2., 1e-6);

        let empty = ParticleGrid::new(3., 2., 0, 3, 1., LayAxis::Z);
        assert!(empty.is_empty());
        assert!(empty.tex_coords().is_empty());
    }

    #[test]
    fn out_of_range_lookup() {
        let mut grid = ParticleGrid::new(1., 1., 2, 3, 1., LayAxis::Z);
        assert!(grid.get(2, 0).is_none());
        assert!(grid.get_mut(0, 3).is_none());
        assert_eq!(grid.checked_index(1, 2), Some(5));
    }

    #[test]
    fn locked_particle_has_zero_effective_inv_mass() {
        let mut p = Particle::new(Vector3::zeros(), 2.);
        assert_eq!(p.effective_inv_mass(), 0.5);
        p.locked = true;
        assert_eq!(p.effective_inv_mass(), 0.);
    }
}
