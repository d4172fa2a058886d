use cfg_if::cfg_if;
use na::Vector3;

use crate::{types::Float, ZERO_TOLERANCE};

/// Normalize a vector, returning the zero vector instead of NaN when the
/// magnitude is below ZERO_TOLERANCE
pub fn safe_normalize(v: &Vector3<Float>) -> Vector3<Float> {
    let norm = v.norm();
    if norm <= ZERO_TOLERANCE {
        return Vector3::zeros();
    }
    v / norm
}

/// Length of a vector, never smaller than EPSILON
pub fn guarded_norm(v: &Vector3<Float>) -> Float {
    v.norm().max(crate::EPSILON)
}

/// Log to the browser console on wasm, to stdout elsewhere
pub fn console_log(message: &str) {
    cfg_if! {
        if #[cfg(target_arch = "wasm32")] {
            web_sys::console::log_1(&message.into());
        } else {
            println!("{}", message);
        }
    }
}

#[macro_export]
macro_rules! flog {
    ($($t:tt)*) => {
        $crate::util::console_log(&format!($($t)*))
    };
}

#[macro_export]
macro_rules! assert_close {
    ($left:expr, $right:expr, $tolerance:expr) => {
        let left = $left;
        let right = $right;
        let tol = $tolerance;
        let diff = (left - right).abs();
        if diff > tol {
            panic!(
                "assertion failed: {} ~= {} \
                (tolerance: {}, difference: {})",
                left, right, tol, diff
            );
        }
    };
}

#[macro_export]
macro_rules! assert_vec_close {
    ($left:expr, $right:expr, $tolerance:expr) => {
        let left = $left;
        let right = $right;
        let tol = $tolerance;
        for (a, b) in left.iter().zip(right.iter()) {
            $crate::assert_close!(a, b, tol);
        }
    };
}


#[cfg(test)]
mod util_tests {
    use na::{vector, Vector3};
    use rand::rng;

    use super::*;
    use crate::{assert_close, util::test_utils::random_vector};

    #[test]
    fn normalize_zero_vector() {
        let n = safe_normalize(&Vector3::zeros());
        assert_eq!(n, Vector3::zeros());
        assert!(n.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn normalize_keeps_small_components() {
        let n = safe_normalize(&vector![1., 1e-3, 0.]);
        assert!(n.y > 0.);
        assert_close!(n.norm(), 1.0, 1e-6);

        // Below tolerance the whole vector counts as zero
        assert_eq!(safe_normalize(&vector![5e-5, 0., 0.]), Vector3::zeros());
    }

    #[test]
    fn normalize_random_vectors_unit_length() {
        let mut rng = rng();
        for _ in 0..100 {
            let v = random_vector(&mut rng, 10.0);
            if v.norm() < 1e-2 {
                continue;
            }
            assert_close!(safe_normalize(&v).norm(), 1.0, 1e-3);
        }
    }

    #[test]
    fn guarded_norm_never_zero() {
        assert!(guarded_norm(&Vector3::zeros()) > 0.);
        assert_close!(guarded_norm(&vector![3., 4., 0.]), 5.0, 1e-6);
    }
}
