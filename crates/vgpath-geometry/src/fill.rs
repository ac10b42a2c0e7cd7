//! Fill tessellation for stencil-and-cover rendering.
//!
//! Each subpath is fanned around its start point. The fan triangles overlap
//! and wind in both directions; a stencil pass counting front-facing
//! triangles up and back-facing triangles down recovers the winding number
//! of every pixel, after which the fill rule decides coverage. Quadratic
//! segments additionally contribute a coverage triangle carrying canonical
//! `(u, v)` coordinates so the curved sliver between chord and curve can be
//! resolved per fragment with `u² − v`.

use glam::Vec2;

use crate::{CurveVertex, FillVertex, SubpathArena, SubpathSegment, TessellatedMesh};
use vgpath_core::math::cross;

/// Canonical coordinates of a quadratic's control triangle.
pub const QUAD_UVS: [[f32; 2]; 3] = [[0.0, 0.0], [0.5, 0.0], [1.0, 1.0]];

/// Winding direction of a triangle, used to pick its bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Counter-clockwise in a y-up frame (positive cross product).
    Front,
    Back,
}

impl Orientation {
    /// Orientation of `(a, b, c)`, or `None` when the triangle has no area.
    pub fn of_triangle(a: Vec2, b: Vec2, c: Vec2) -> Option<Self> {
        let area = cross(b - a, c - a);
        if area > 0.0 {
            Some(Orientation::Front)
        } else if area < 0.0 {
            Some(Orientation::Back)
        } else {
            None
        }
    }
}

/// Fill geometry of a path, bucketed by orientation and kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FillGeometry {
    pub front_solid: TessellatedMesh<FillVertex>,
    pub back_solid: TessellatedMesh<FillVertex>,
    pub front_quad: TessellatedMesh<CurveVertex>,
    pub back_quad: TessellatedMesh<CurveVertex>,
}

impl FillGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.front_solid.is_empty()
            && self.back_solid.is_empty()
            && self.front_quad.is_empty()
            && self.back_quad.is_empty()
    }

    pub fn clear(&mut self) {
        self.front_solid.clear();
        self.back_solid.clear();
        self.front_quad.clear();
        self.back_quad.clear();
    }

    pub fn solid(&self, orientation: Orientation) -> &TessellatedMesh<FillVertex> {
        match orientation {
            Orientation::Front => &self.front_solid,
            Orientation::Back => &self.back_solid,
        }
    }

    pub fn quad(&self, orientation: Orientation) -> &TessellatedMesh<CurveVertex> {
        match orientation {
            Orientation::Front => &self.front_quad,
            Orientation::Back => &self.back_quad,
        }
    }

    fn solid_mut(&mut self, orientation: Orientation) -> &mut TessellatedMesh<FillVertex> {
        match orientation {
            Orientation::Front => &mut self.front_solid,
            Orientation::Back => &mut self.back_solid,
        }
    }

    fn quad_mut(&mut self, orientation: Orientation) -> &mut TessellatedMesh<CurveVertex> {
        match orientation {
            Orientation::Front => &mut self.front_quad,
            Orientation::Back => &mut self.back_quad,
        }
    }

    /// Signed area of the fan triangles (front minus back), i.e. the area
    /// of the path with every curve replaced by its chord.
    pub fn solid_signed_area(&self) -> f32 {
        self.front_solid.signed_area() + self.back_solid.signed_area()
    }

    /// Signed area enclosed by the path, curves included.
    ///
    /// The region between a quadratic and its chord is two thirds of its
    /// control triangle.
    pub fn signed_area(&self) -> f32 {
        let curves = self.front_quad.signed_area() + self.back_quad.signed_area();
        self.solid_signed_area() + curves * (2.0 / 3.0)
    }

    fn push_fan(&mut self, anchor: Vec2, p0: Vec2, p1: Vec2) {
        if let Some(orientation) = Orientation::of_triangle(anchor, p0, p1) {
            self.solid_mut(orientation)
                .push_triangle(anchor.into(), p0.into(), p1.into());
        }
    }

    fn push_coverage(&mut self, p0: Vec2, control: Vec2, p2: Vec2) {
        if let Some(orientation) = Orientation::of_triangle(p0, control, p2) {
            self.quad_mut(orientation).push_triangle(
                CurveVertex::new(p0, QUAD_UVS[0]),
                CurveVertex::new(control, QUAD_UVS[1]),
                CurveVertex::new(p2, QUAD_UVS[2]),
            );
        }
    }
}

/// Tessellate canonical subpaths into fill buckets.
///
/// Open subpaths are filled as if closed: the closing fan triangle from the
/// last point back to the anchor has no area.
pub fn tessellate_fill(subpaths: &SubpathArena) -> FillGeometry {
    let mut geometry = FillGeometry::new();

    for subpath in subpaths.iter() {
        let anchor = subpath.start_point();
        for segment in subpath.segments() {
            match segment {
                SubpathSegment::Line { from, to } | SubpathSegment::Close { from, to } => {
                    geometry.push_fan(anchor, from, to);
                }
                SubpathSegment::Quad(q) => {
                    geometry.push_fan(anchor, q.from, q.to);
                    geometry.push_coverage(q.from, q.control, q.to);
                }
            }
        }
    }

    tracing::debug!(
        front_solid = geometry.front_solid.triangle_count(),
        back_solid = geometry.back_solid.triangle_count(),
        front_quad = geometry.front_quad.triangle_count(),
        back_quad = geometry.back_quad.triangle_count(),
        "tessellated fill"
    );

    geometry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Opcode, RawPath, Segment, normalize};

    fn fill(commands: &[(Opcode, &[f32])]) -> FillGeometry {
        let mut raw = RawPath::new();
        for (op, coords) in commands {
            raw.push(Segment::abs(*op), coords).unwrap();
        }
        tessellate_fill(&normalize(&raw))
    }

    #[test]
    fn test_orientation_routing() {
        let a = Vec2::ZERO;
        let b = Vec2::new(1.0, 0.0);
        let c = Vec2::new(0.0, 1.0);
        assert_eq!(Orientation::of_triangle(a, b, c), Some(Orientation::Front));
        assert_eq!(Orientation::of_triangle(a, c, b), Some(Orientation::Back));
        assert_eq!(Orientation::of_triangle(a, b, b * 2.0), None);
    }

    #[test]
    fn test_rectangle_area() {
        let geometry = fill(&[
            (Opcode::MoveTo, &[0.0, 0.0]),
            (Opcode::LineTo, &[10.0, 0.0]),
            (Opcode::LineTo, &[10.0, 5.0]),
            (Opcode::LineTo, &[0.0, 5.0]),
            (Opcode::Close, &[]),
        ]);
        assert_eq!(geometry.front_solid.triangle_count(), 2);
        assert!(geometry.back_solid.is_empty());
        assert!((geometry.solid_signed_area() - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_clockwise_goes_to_back() {
        let geometry = fill(&[
            (Opcode::MoveTo, &[0.0, 0.0]),
            (Opcode::LineTo, &[0.0, 5.0]),
            (Opcode::LineTo, &[10.0, 5.0]),
            (Opcode::LineTo, &[10.0, 0.0]),
            (Opcode::Close, &[]),
        ]);
        assert!(geometry.front_solid.is_empty());
        assert!((geometry.solid_signed_area() + 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_open_subpath_auto_closed() {
        let closed = fill(&[
            (Opcode::MoveTo, &[0.0, 0.0]),
            (Opcode::LineTo, &[10.0, 0.0]),
            (Opcode::LineTo, &[10.0, 10.0]),
            (Opcode::Close, &[]),
        ]);
        let open = fill(&[
            (Opcode::MoveTo, &[0.0, 0.0]),
            (Opcode::LineTo, &[10.0, 0.0]),
            (Opcode::LineTo, &[10.0, 10.0]),
        ]);
        assert_eq!(closed, open);
        assert!((open.solid_signed_area() - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_quad_coverage_triangle() {
        let geometry = fill(&[
            (Opcode::MoveTo, &[0.0, 0.0]),
            (Opcode::QuadTo, &[5.0, -10.0, 10.0, 0.0]),
            (Opcode::LineTo, &[10.0, 10.0]),
            (Opcode::Close, &[]),
        ]);
        // Control point below the chord: the coverage triangle winds
        // counter-clockwise.
        assert_eq!(geometry.front_quad.triangle_count(), 1);
        assert!(geometry.back_quad.is_empty());
        let uvs: Vec<[f32; 2]> = geometry.front_quad.vertices.iter().map(|v| v.uv).collect();
        assert_eq!(uvs, QUAD_UVS.to_vec());

        // Triangle (0,0) (10,0) (10,10) plus the bulge below the chord.
        let bulge = 2.0 / 3.0 * 50.0;
        assert!((geometry.signed_area() - (50.0 + bulge)).abs() < 1e-3);
    }

    #[test]
    fn test_degenerate_segments_skipped() {
        let geometry = fill(&[
            (Opcode::MoveTo, &[0.0, 0.0]),
            (Opcode::LineTo, &[0.0, 0.0]),
            (Opcode::LineTo, &[5.0, 0.0]),
            (Opcode::QuadTo, &[7.0, 0.0, 9.0, 0.0]),
        ]);
        assert!(geometry.is_empty());
    }
}
