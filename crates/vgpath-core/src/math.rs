/// Fast mathematical operations using SIMD-accelerated `glam` types.
///
/// Single precision ([`Vec2`], [`Mat3`]) is used for vertex data; double
/// precision ([`DVec2`]) for the numerically sensitive parts such as arc
/// center conversion and arc-length integration.
///
/// # Examples
///
/// ```
/// use vgpath_core::math::{Mat3, Vec2};
///
/// let p = Vec2::new(10.0, 20.0);
/// let m = Mat3::from_translation(Vec2::new(1.0, 2.0));
/// assert_eq!(m.transform_point2(p), Vec2::new(11.0, 22.0));
/// ```
pub mod fast {
    pub use glam::*;
}

/// 2D cross product (z component of the 3D cross product).
#[inline]
pub fn cross(a: glam::Vec2, b: glam::Vec2) -> f32 {
    a.x * b.y - a.y * b.x
}

pub use fast::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_sign() {
        assert!(cross(Vec2::X, Vec2::Y) > 0.0);
        assert!(cross(Vec2::Y, Vec2::X) < 0.0);
        assert_eq!(cross(Vec2::X, Vec2::X * 3.0), 0.0);
    }
}
