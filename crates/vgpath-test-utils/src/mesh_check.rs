//! Structural checks on tessellated meshes.

use vgpath_geometry::{FillGeometry, Positioned, StrokeGeometry, TessellatedMesh};

/// Summary of a mesh, convenient for comparing whole outputs in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MeshStats {
    pub vertices: usize,
    pub triangles: usize,
}

impl MeshStats {
    pub fn of<V>(mesh: &TessellatedMesh<V>) -> Self {
        Self {
            vertices: mesh.vertex_count(),
            triangles: mesh.triangle_count(),
        }
    }
}

/// Assert a mesh is well formed: whole triangles, indices in range, finite
/// positions.
#[track_caller]
pub fn assert_mesh_valid<V: Positioned>(mesh: &TessellatedMesh<V>) {
    assert_eq!(mesh.indices.len() % 3, 0, "index count is not a multiple of 3");
    let count = mesh.vertices.len() as u32;
    if let Some(bad) = mesh.indices.iter().find(|i| **i >= count) {
        panic!("index {bad} out of range for {count} vertices");
    }
    if let Some(bad) = mesh.vertices.iter().find(|v| !v.position().is_finite()) {
        panic!("non-finite vertex position {:?}", bad.position());
    }
}

/// Assert every bucket of a fill is well formed.
#[track_caller]
pub fn assert_fill_valid(fill: &FillGeometry) {
    assert_mesh_valid(&fill.front_solid);
    assert_mesh_valid(&fill.back_solid);
    assert_mesh_valid(&fill.front_quad);
    assert_mesh_valid(&fill.back_quad);
}

/// Assert both buckets of a stroke are well formed.
#[track_caller]
pub fn assert_stroke_valid(stroke: &StrokeGeometry) {
    assert_mesh_valid(&stroke.solid);
    assert_mesh_valid(&stroke.coverage);
}
