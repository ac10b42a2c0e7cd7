//! Canonical paths shared by tests and benchmarks.

use glam::Vec2;
use vgpath_geometry::{Opcode, PathBuilder, RawPath, Segment};

/// Axis-aligned square with its corner at the origin, counter-clockwise.
pub fn square(size: f32) -> PathBuilder {
    let mut builder = PathBuilder::new();
    builder.rect(Vec2::ZERO, Vec2::splat(size));
    builder
}

/// `M0,0 L10,0 L10,5 L0,5 Z`.
pub fn rectangle_10x5() -> RawPath {
    let mut builder = PathBuilder::new();
    builder
        .move_to(Vec2::new(0.0, 0.0))
        .line_to(Vec2::new(10.0, 0.0))
        .line_to(Vec2::new(10.0, 5.0))
        .line_to(Vec2::new(0.0, 5.0))
        .close();
    builder.build_raw()
}

/// `M0,0 L10,0 L10,10 Z`.
pub fn right_triangle() -> RawPath {
    let mut builder = PathBuilder::new();
    builder
        .move_to(Vec2::new(0.0, 0.0))
        .line_to(Vec2::new(10.0, 0.0))
        .line_to(Vec2::new(10.0, 10.0))
        .close();
    builder.build_raw()
}

/// Horizontal open line from the origin.
pub fn horizontal_line(length: f32) -> RawPath {
    let mut builder = PathBuilder::new();
    builder.move_to(Vec2::ZERO).horizontal_line_to(length);
    builder.build_raw()
}

/// Circle made of four quarter arcs.
pub fn circle(center: Vec2, radius: f32) -> RawPath {
    let mut builder = PathBuilder::new();
    builder.circle(center, radius);
    builder.build_raw()
}

/// A path touching every command kind, absolute and relative.
pub fn every_command() -> RawPath {
    let mut builder = PathBuilder::new();
    builder
        .move_to(Vec2::new(0.0, 0.0))
        .line_to(Vec2::new(20.0, 0.0))
        .rel_horizontal_line_to(10.0)
        .vertical_line_to(10.0)
        .quad_to(Vec2::new(40.0, 20.0), Vec2::new(30.0, 30.0))
        .smooth_quad_to(Vec2::new(30.0, 50.0))
        .cubic_to(
            Vec2::new(20.0, 60.0),
            Vec2::new(10.0, 40.0),
            Vec2::new(0.0, 50.0),
        )
        .rel_smooth_cubic_to(Vec2::new(-10.0, -10.0), Vec2::new(0.0, -20.0))
        .arc_to(Vec2::new(10.0, 5.0), 30.0, false, true, Vec2::new(0.0, 10.0))
        .close()
        .rel_move_to(Vec2::new(60.0, 0.0))
        .rel_line_to(Vec2::new(10.0, 10.0))
        .rel_quad_to(Vec2::new(5.0, 5.0), Vec2::new(0.0, 10.0))
        .rel_arc_to(Vec2::splat(5.0), 0.0, true, false, Vec2::new(-10.0, 0.0))
        .close();
    builder.build_raw()
}

/// The same shape as [`rectangle_10x5`] as raw OpenVG segment bytes and
/// coordinates, using relative lines.
pub fn rectangle_10x5_vg_data() -> (Vec<u8>, Vec<f32>) {
    let segments = [
        Segment::abs(Opcode::MoveTo),
        Segment::rel(Opcode::HLineTo),
        Segment::rel(Opcode::VLineTo),
        Segment::rel(Opcode::HLineTo),
        Segment::abs(Opcode::Close),
    ];
    let bytes = segments.iter().map(|s| s.to_vg_byte()).collect();
    (bytes, vec![0.0, 0.0, 10.0, 5.0, -10.0])
}
