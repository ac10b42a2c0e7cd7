//! Approximate float comparisons.

use glam::Vec2;
use vgpath_geometry::Transform2D;

/// Default absolute tolerance of the assertion helpers.
pub const DEFAULT_EPSILON: f32 = 1e-4;

/// Whether `a` and `b` differ by at most `epsilon`.
pub fn approx_eq(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() <= epsilon
}

/// Whether `a` and `b` differ by at most `epsilon` relative to the larger
/// magnitude (absolute near zero).
pub fn approx_eq_relative(a: f32, b: f32, epsilon: f32) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= epsilon * scale
}

/// Assert two points are within `epsilon` of each other.
#[track_caller]
pub fn assert_vec2_near(actual: Vec2, expected: Vec2, epsilon: f32) {
    assert!(
        actual.distance(expected) <= epsilon,
        "expected {expected:?}, got {actual:?} (epsilon {epsilon})"
    );
}

/// Assert two transforms agree on the unit basis and the origin.
#[track_caller]
pub fn assert_transform_near(actual: &Transform2D, expected: &Transform2D, epsilon: f32) {
    for p in [Vec2::ZERO, Vec2::X, Vec2::Y] {
        assert_vec2_near(
            actual.transform_point(p),
            expected.transform_point(p),
            epsilon,
        );
    }
}

/// Assert two floats are approximately equal.
///
/// Uses [`DEFAULT_EPSILON`] unless a tolerance is given.
#[macro_export]
macro_rules! assert_approx_eq {
    ($actual:expr, $expected:expr $(,)?) => {
        $crate::assert_approx_eq!($actual, $expected, $crate::assertions::DEFAULT_EPSILON)
    };
    ($actual:expr, $expected:expr, $epsilon:expr $(,)?) => {{
        let (actual, expected, epsilon): (f32, f32, f32) = ($actual, $expected, $epsilon);
        assert!(
            $crate::assertions::approx_eq(actual, expected, epsilon),
            "assertion failed: `{} ≈ {}`: got {}, expected {} (epsilon {})",
            stringify!($actual),
            stringify!($expected),
            actual,
            expected,
            epsilon,
        );
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_tolerance_scales() {
        assert!(approx_eq_relative(1000.0, 1000.5, 1e-3));
        assert!(!approx_eq(1000.0, 1000.5, 1e-3));
        assert!(approx_eq_relative(0.0, 1e-4, 1e-3));
    }

    #[test]
    fn test_macro_forms() {
        assert_approx_eq!(1.0, 1.0 + 1e-6);
        assert_approx_eq!(1.0, 1.05, 0.1);
    }

    #[test]
    #[should_panic]
    fn test_macro_fails_outside_tolerance() {
        assert_approx_eq!(1.0, 2.0);
    }

    #[test]
    #[should_panic]
    fn test_transform_near_catches_translation() {
        assert_transform_near(&Transform2D::IDENTITY, &Transform2D::translate(Vec2::X), 1e-3);
    }
}
