//! Vertex formats for tessellated geometry.
//!
//! All formats are `#[repr(C)]` and [`Pod`] so buckets can be handed to a
//! GPU upload as raw bytes. Coverage attributes are expressed in path space:
//! every one of them is an affine function of the vertex position, so
//! interpolating them across a transformed triangle stays exact and
//! [`apply_transform`](crate::apply_transform) only touches positions.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Anything with a 2D position that bounds and transforms operate on.
pub trait Positioned {
    fn position(&self) -> Vec2;
    fn set_position(&mut self, position: Vec2);
}

/// Vertex for solid (fully covered) triangles.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct FillVertex {
    /// Position in 2D space
    pub position: [f32; 2],
}

impl FillVertex {
    /// Create a new fill vertex.
    pub fn new(x: f32, y: f32) -> Self {
        Self { position: [x, y] }
    }
}

impl From<Vec2> for FillVertex {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

/// Vertex of a quadratic fill coverage triangle.
///
/// The fragment is inside the curve where `u² − v < 0` (sign flipped by the
/// triangle's orientation bucket).
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct CurveVertex {
    pub position: [f32; 2],
    /// Canonical quadratic coordinates.
    pub uv: [f32; 2],
}

impl CurveVertex {
    pub fn new(position: Vec2, uv: [f32; 2]) -> Self {
        Self {
            position: position.into(),
            uv,
        }
    }
}

/// Vertex of a quadratic stroke coverage quad.
///
/// A fragment at `P` is covered when some root `t` of the nearest-point
/// cubic `t³ + p·t + q = 0` (shifted back by `−b/3a`) lands on the curve
/// within half a stroke width. `p` and `q` are evaluated at this corner.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct StrokeCurveVertex {
    pub position: [f32; 2],
    /// Quadratic coefficient `p0 − 2·c + p2`.
    pub a: [f32; 2],
    /// Linear coefficient `2·(c − p0)`.
    pub b: [f32; 2],
    /// Constant term `p0`.
    pub c: [f32; 2],
    /// Depressed cubic `(p, q)` at this corner.
    pub depressed: [f32; 2],
    pub half_width_sq: f32,
}

impl Positioned for FillVertex {
    fn position(&self) -> Vec2 {
        Vec2::from(self.position)
    }

    fn set_position(&mut self, position: Vec2) {
        self.position = position.into();
    }
}

impl Positioned for CurveVertex {
    fn position(&self) -> Vec2 {
        Vec2::from(self.position)
    }

    fn set_position(&mut self, position: Vec2) {
        self.position = position.into();
    }
}

impl Positioned for StrokeCurveVertex {
    fn position(&self) -> Vec2 {
        Vec2::from(self.position)
    }

    fn set_position(&mut self, position: Vec2) {
        self.position = position.into();
    }
}

static_assertions::assert_eq_size!(FillVertex, [f32; 2]);
static_assertions::assert_eq_size!(CurveVertex, [f32; 4]);
static_assertions::assert_eq_size!(StrokeCurveVertex, [f32; 11]);

/// Output from tessellation: vertices and indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TessellatedMesh<V> {
    /// Vertex data
    pub vertices: Vec<V>,
    /// Index data (triangles)
    pub indices: Vec<u32>,
}

impl<V> TessellatedMesh<V> {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Check if the mesh is empty.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.indices.is_empty()
    }

    /// Get the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Append one triangle.
    pub fn push_triangle(&mut self, a: V, b: V, c: V) {
        let base = self.vertices.len() as u32;
        self.vertices.extend([a, b, c]);
        self.indices.extend([base, base + 1, base + 2]);
    }

    /// Append a quad `a b c d` (in winding order) as two triangles sharing
    /// the `a c` diagonal.
    pub fn push_quad(&mut self, a: V, b: V, c: V, d: V) {
        let base = self.vertices.len() as u32;
        self.vertices.extend([a, b, c, d]);
        self.indices
            .extend([base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    /// Iterate over triangles as vertex triples.
    pub fn triangles(&self) -> impl Iterator<Item = [&V; 3]> + '_ {
        self.indices.chunks_exact(3).map(|tri| {
            [
                &self.vertices[tri[0] as usize],
                &self.vertices[tri[1] as usize],
                &self.vertices[tri[2] as usize],
            ]
        })
    }

    /// Clear all data.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }
}

impl<V: Pod> TessellatedMesh<V> {
    /// Vertex buffer contents as bytes.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index buffer contents as bytes.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

impl<V: Positioned> TessellatedMesh<V> {
    /// Sum of signed triangle areas (counter-clockwise positive).
    pub fn signed_area(&self) -> f32 {
        self.triangles()
            .map(|[a, b, c]| {
                0.5 * vgpath_core::math::cross(b.position() - a.position(), c.position() - a.position())
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_sizes() {
        assert_eq!(std::mem::size_of::<FillVertex>(), 8);
        assert_eq!(std::mem::size_of::<CurveVertex>(), 16);
        assert_eq!(std::mem::size_of::<StrokeCurveVertex>(), 44);
    }

    #[test]
    fn test_empty_mesh() {
        let mesh: TessellatedMesh<FillVertex> = TessellatedMesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
    }

    #[test]
    fn test_push_quad_indices() {
        let mut mesh = TessellatedMesh::new();
        mesh.push_triangle(
            FillVertex::new(0.0, 0.0),
            FillVertex::new(1.0, 0.0),
            FillVertex::new(0.0, 1.0),
        );
        mesh.push_quad(
            FillVertex::new(0.0, 0.0),
            FillVertex::new(2.0, 0.0),
            FillVertex::new(2.0, 2.0),
            FillVertex::new(0.0, 2.0),
        );
        assert_eq!(mesh.triangle_count(), 3);
        assert_eq!(&mesh.indices[3..], &[3, 4, 5, 3, 5, 6]);
        assert!((mesh.signed_area() - 4.5).abs() < 1e-6);
        assert_eq!(mesh.vertex_bytes().len(), 7 * 8);
        assert_eq!(mesh.index_bytes().len(), 9 * 4);
    }
}
