use itertools::Itertools;

use crate::{cloth::grid::ParticleGrid, types::Float, util::guarded_norm};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpringKind {
    /// Between orthogonal grid neighbours, resists stretch
    Structural,
    /// Between diagonal grid neighbours, resists shear
    Shear,
}

/// Spring between two particles of a grid, referenced by flattened index
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring {
    pub p1: usize,
    pub p2: usize,
    pub rest_length: Float,
    pub kind: SpringKind,
}

impl Spring {
    pub fn new(grid: &ParticleGrid, p1: usize, p2: usize, kind: SpringKind) -> Self {
        debug_assert_ne!(p1, p2, "spring endpoints must be distinct");
        let delta = grid.particles[p1].position - grid.particles[p2].position;
        Self {
            p1,
            p2,
            rest_length: guarded_norm(&delta),
            kind,
        }
    }

    /// Current length, never below EPSILON
    pub fn length(&self, grid: &ParticleGrid) -> Float {
        guarded_norm(&(grid.particles[self.p1].position - grid.particles[self.p2].position))
    }

    pub fn stiffness(&self, structural: Float, shear: Float) -> Float {
        match self.kind {
            SpringKind::Structural => structural,
            SpringKind::Shear => shear,
        }
    }
}

/// One spring per horizontal pair (i,j)-(i,j+1) and per vertical pair
/// (i,j)-(i+1,j)
pub fn build_structural_springs(grid: &ParticleGrid) -> Vec<Spring> {
    let (m, n) = (grid.num_rows, grid.num_cols);
    let count = n * m.saturating_sub(1) + m * n.saturating_sub(1);
    let mut springs = Vec::with_capacity(count);
    for i in 0..m {
        for j in 0..n {
            let v0 = grid.index(i, j);
            if j + 1 < n {
                springs.push(Spring::new(grid, v0, v0 + 1, SpringKind::Structural));
            }
            if i + 1 < m {
                springs.push(Spring::new(grid, v0, v0 + n, SpringKind::Structural));
            }
        }
    }
    springs
}

/// Two crossing springs per quad: (i,j)-(i+1,j+1) and (i,j+1)-(i+1,j)
pub fn build_shear_springs(grid: &ParticleGrid) -> Vec<Spring> {
    let (m, n) = (grid.num_rows, grid.num_cols);
    let mut springs =
        Vec::with_capacity(2 * m.saturating_sub(1) * n.saturating_sub(1));
    for (i, j) in (0..m.saturating_sub(1)).cartesian_product(0..n.saturating_sub(1)) {
        let v0 = grid.index(i, j);
        let v1 = v0 + 1;
        let v2 = v0 + n;
        let v3 = v2 + 1;
        springs.push(Spring::new(grid, v0, v3, SpringKind::Shear));
        springs.push(Spring::new(grid, v1, v2, SpringKind::Shear));
    }
    springs
}

/// Triangulate the grid, two triangles per quad
pub fn build_faces(grid: &ParticleGrid) -> Vec<[usize; 3]> {
    let (m, n) = (grid.num_rows, grid.num_cols);
    let mut faces = Vec::with_capacity(2 * m.saturating_sub(1) * n.saturating_sub(1));
    for (i, j) in (0..m.saturating_sub(1)).cartesian_product(0..n.saturating_sub(1)) {
        let v0 = grid.index(i, j);
        let v1 = v0 + 1;
        let v2 = v0 + n;
        let v3 = v2 + 1;

        faces.push([v0, v1, v2]);
        faces.push([v1, v3, v2]);
    }
    faces
}

#[cfg(test)]
mod spring_tests {
    use itertools::Itertools;

    use crate::{
        assert_close,
        cloth::{config::LayAxis, grid::weight_class},
    };

    use super::*;

    fn grid(m: usize, n: usize) -> ParticleGrid {
        ParticleGrid::new(3., 2., m, n, 1., LayAxis::Z)
    }

    #[test]
    fn closed_form_counts() {
        for (m, n) in (2..7).cartesian_product(2..7) {
            let g = grid(m, n);
            assert_eq!(build_structural_springs(&g).len(), n * (m - 1) + m * (n - 1));
            assert_eq!(build_shear_springs(&g).len(), 2 * (m - 1) * (n - 1));
            assert_eq!(build_faces(&g).len(), 2 * (m - 1) * (n - 1));
        }
    }

    #[test]
    fn rest_lengths_match_initial_distances() {
        let g = grid(4, 5);
        for s in build_structural_springs(&g)
            .iter()
            .chain(build_shear_springs(&g).iter())
        {
            let d = (g.particles[s.p1].position - g.particles[s.p2].position).norm();
            assert_close!(s.rest_length, d, 1e-6);
            assert!(s.rest_length > 0.);
            assert_ne!(s.p1, s.p2);
        }
    }

    #[test]
    fn structural_springs_connect_axis_neighbours() {
        let g = grid(3, 3);
        let cell_w = 3. / 2.;
        let cell_h = 2. / 2.;
        for s in build_structural_springs(&g) {
            let (r1, c1) = (s.p1 / 3, s.p1 % 3);
            let (r2, c2) = (s.p2 / 3, s.p2 % 3);
            assert_eq!(r1.abs_diff(r2) + c1.abs_diff(c2), 1);
            let expected = if r1 == r2 { cell_w } else { cell_h };
            assert_close!(s.rest_length, expected, 1e-6);
        }
    }

    #[test]
    fn shear_springs_connect_diagonals() {
        let g = grid(3, 4);
        for s in build_shear_springs(&g) {
            let (r1, c1) = (s.p1 / 4, s.p1 % 4);
            let (r2, c2) = (s.p2 / 4, s.p2 % 4);
            assert_eq!(r1.abs_diff(r2), 1);
            assert_eq!(c1.abs_diff(c2), 1);
            assert_eq!(s.kind, SpringKind::Shear);
        }
    }

    #[test]
    fn degenerate_rows_give_no_springs_of_that_kind() {
        // Single row
        let g = grid(1, 3);
        let structural = build_structural_springs(&g);
        assert_eq!(structural.len(), 2);
        assert!(build_shear_springs(&g).is_empty());
        assert!(build_faces(&g).is_empty());
        for s in structural.iter() {
            assert_close!(s.rest_length, 1.5, 1e-6);
        }

        // Single column
        let g = grid(4, 1);
        let structural = build_structural_springs(&g);
        assert_eq!(structural.len(), 3);
        assert!(build_shear_springs(&g).is_empty());
        for s in structural.iter() {
            assert_close!(s.rest_length, 2. / 3., 1e-6);
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "spring endpoints must be distinct")]
    fn spring_to_itself_is_rejected() {
        let g = grid(2, 2);
        Spring::new(&g, 1, 1, SpringKind::Structural);
    }

    #[test]
    fn weight_class_counts_incident_faces() {
        let (m, n) = (4, 6);
        let g = grid(m, n);
        let faces = build_faces(&g);
        for i in 0..m {
            for j in 0..n {
                let v = g.index(i, j);
                let incident = faces.iter().filter(|f| f.contains(&v)).count();
                assert_eq!(weight_class(i, j, m, n), incident as Float);
            }
        }
    }

    #[test]
    fn stiffness_by_kind() {
        let g = grid(2, 2);
        let structural = build_structural_springs(&g)[0];
        let shear = build_shear_springs(&g)[0];
        assert_eq!(structural.stiffness(5., 7.), 5.);
        assert_eq!(shear.stiffness(5., 7.), 7.);
    }
}
