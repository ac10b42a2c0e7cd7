//! Bounds and in-place transforms over vertex buffers.

use glam::Vec2;
use vgpath_core::geometry::Rect;

use crate::{Positioned, Transform2D};

/// Tight axis-aligned bounds of a vertex set.
///
/// An empty set has all-zero bounds.
pub fn compute_bounds<V: Positioned>(vertices: &[V]) -> Rect<f32> {
    let mut points = vertices.iter().map(Positioned::position);
    let Some(first) = points.next() else {
        return Rect::default();
    };
    let (min, max) = points.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
    Rect::from_min_max(min, max)
}

/// Transform vertex positions in place.
pub fn apply_transform<V: Positioned>(transform: &Transform2D, vertices: &mut [V]) {
    if transform.is_identity() {
        return;
    }
    for vertex in vertices {
        let p: Vec2 = vertex.position();
        vertex.set_position(transform.transform_point(p));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FillVertex, SubdivisionVertex};

    #[test]
    fn test_empty_bounds_are_zero() {
        let none: [FillVertex; 0] = [];
        assert_eq!(compute_bounds(&none), Rect::new(0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_bounds_of_points() {
        let vertices = [
            FillVertex::new(3.0, -1.0),
            FillVertex::new(-2.0, 4.0),
            FillVertex::new(1.0, 1.0),
        ];
        assert_eq!(compute_bounds(&vertices), Rect::new(-2.0, -1.0, 5.0, 5.0));
    }

    #[test]
    fn test_transform_in_place() {
        let mut vertices = vec![
            SubdivisionVertex {
                point: Vec2::new(1.0, 2.0),
                ..Default::default()
            };
            2
        ];
        apply_transform(
            &Transform2D::scale(2.0).then_translate(Vec2::new(1.0, 0.0)),
            &mut vertices,
        );
        assert!(vertices.iter().all(|v| v.point == Vec2::new(3.0, 4.0)));
    }
}
