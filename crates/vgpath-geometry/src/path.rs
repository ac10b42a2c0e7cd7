//! Path objects and the path builder.
//!
//! [`PathBuilder`] authors a [`RawPath`] with absolute and relative
//! commands. [`Path`] owns a raw path together with its stroke style and
//! transform, and lazily derives canonical subpaths, fill and stroke
//! geometry and flattened polylines from it.

use bitflags::bitflags;
use glam::Vec2;
use vgpath_core::geometry::Rect;

use crate::{
    FillGeometry, FlattenedPath, Opcode, PathDataResult, RawPath, Segment, StrokeGeometry,
    StrokeStyle, SubpathArena, TessellationConfig, Tessellator, Transform2D, apply_transform,
    compute_bounds,
};

/// Builder for constructing paths.
#[derive(Debug, Default)]
pub struct PathBuilder {
    raw: RawPath,
    current_pos: Vec2,
    subpath_start: Vec2,
}

impl PathBuilder {
    /// Create a new path builder.
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, segment: Segment, coords: &[f32]) {
        self.raw.push_unchecked(segment, coords);
    }

    /// Move to a new position without drawing.
    pub fn move_to(&mut self, to: Vec2) -> &mut Self {
        self.push(Segment::abs(Opcode::MoveTo), &[to.x, to.y]);
        self.current_pos = to;
        self.subpath_start = to;
        self
    }

    /// Move by an offset from the current position.
    pub fn rel_move_to(&mut self, delta: Vec2) -> &mut Self {
        self.push(Segment::rel(Opcode::MoveTo), &[delta.x, delta.y]);
        self.current_pos += delta;
        self.subpath_start = self.current_pos;
        self
    }

    /// Draw a line to a position.
    pub fn line_to(&mut self, to: Vec2) -> &mut Self {
        self.push(Segment::abs(Opcode::LineTo), &[to.x, to.y]);
        self.current_pos = to;
        self
    }

    /// Draw a line to an offset from the current position.
    pub fn rel_line_to(&mut self, delta: Vec2) -> &mut Self {
        self.push(Segment::rel(Opcode::LineTo), &[delta.x, delta.y]);
        self.current_pos += delta;
        self
    }

    /// Draw a horizontal line to x coordinate.
    pub fn horizontal_line_to(&mut self, x: f32) -> &mut Self {
        self.push(Segment::abs(Opcode::HLineTo), &[x]);
        self.current_pos.x = x;
        self
    }

    /// Draw a horizontal line by `dx`.
    pub fn rel_horizontal_line_to(&mut self, dx: f32) -> &mut Self {
        self.push(Segment::rel(Opcode::HLineTo), &[dx]);
        self.current_pos.x += dx;
        self
    }

    /// Draw a vertical line to y coordinate.
    pub fn vertical_line_to(&mut self, y: f32) -> &mut Self {
        self.push(Segment::abs(Opcode::VLineTo), &[y]);
        self.current_pos.y = y;
        self
    }

    /// Draw a vertical line by `dy`.
    pub fn rel_vertical_line_to(&mut self, dy: f32) -> &mut Self {
        self.push(Segment::rel(Opcode::VLineTo), &[dy]);
        self.current_pos.y += dy;
        self
    }

    /// Draw a quadratic Bezier curve.
    pub fn quad_to(&mut self, control: Vec2, to: Vec2) -> &mut Self {
        self.push(
            Segment::abs(Opcode::QuadTo),
            &[control.x, control.y, to.x, to.y],
        );
        self.current_pos = to;
        self
    }

    /// Draw a quadratic Bezier curve with offsets from the current position.
    pub fn rel_quad_to(&mut self, control: Vec2, to: Vec2) -> &mut Self {
        self.push(
            Segment::rel(Opcode::QuadTo),
            &[control.x, control.y, to.x, to.y],
        );
        self.current_pos += to;
        self
    }

    /// Draw a smooth quadratic Bezier (control point reflected from previous).
    pub fn smooth_quad_to(&mut self, to: Vec2) -> &mut Self {
        self.push(Segment::abs(Opcode::SmoothQuadTo), &[to.x, to.y]);
        self.current_pos = to;
        self
    }

    /// Relative form of [`smooth_quad_to`](Self::smooth_quad_to).
    pub fn rel_smooth_quad_to(&mut self, to: Vec2) -> &mut Self {
        self.push(Segment::rel(Opcode::SmoothQuadTo), &[to.x, to.y]);
        self.current_pos += to;
        self
    }

    /// Draw a cubic Bezier curve.
    pub fn cubic_to(&mut self, control1: Vec2, control2: Vec2, to: Vec2) -> &mut Self {
        self.push(
            Segment::abs(Opcode::CubicTo),
            &[control1.x, control1.y, control2.x, control2.y, to.x, to.y],
        );
        self.current_pos = to;
        self
    }

    /// Draw a cubic Bezier curve with offsets from the current position.
    pub fn rel_cubic_to(&mut self, control1: Vec2, control2: Vec2, to: Vec2) -> &mut Self {
        self.push(
            Segment::rel(Opcode::CubicTo),
            &[control1.x, control1.y, control2.x, control2.y, to.x, to.y],
        );
        self.current_pos += to;
        self
    }

    /// Draw a smooth cubic Bezier (first control point reflected from previous).
    pub fn smooth_cubic_to(&mut self, control2: Vec2, to: Vec2) -> &mut Self {
        self.push(
            Segment::abs(Opcode::SmoothCubicTo),
            &[control2.x, control2.y, to.x, to.y],
        );
        self.current_pos = to;
        self
    }

    /// Relative form of [`smooth_cubic_to`](Self::smooth_cubic_to).
    pub fn rel_smooth_cubic_to(&mut self, control2: Vec2, to: Vec2) -> &mut Self {
        self.push(
            Segment::rel(Opcode::SmoothCubicTo),
            &[control2.x, control2.y, to.x, to.y],
        );
        self.current_pos += to;
        self
    }

    /// Draw an elliptical arc.
    ///
    /// `x_rotation` is in degrees. `sweep` selects the arc running in the
    /// positive angle direction.
    pub fn arc_to(
        &mut self,
        radii: Vec2,
        x_rotation: f32,
        large_arc: bool,
        sweep: bool,
        to: Vec2,
    ) -> &mut Self {
        self.push(
            Segment::abs(Opcode::arc(large_arc, sweep)),
            &[radii.x, radii.y, x_rotation, to.x, to.y],
        );
        self.current_pos = to;
        self
    }

    /// Relative form of [`arc_to`](Self::arc_to); `to` is an offset.
    pub fn rel_arc_to(
        &mut self,
        radii: Vec2,
        x_rotation: f32,
        large_arc: bool,
        sweep: bool,
        to: Vec2,
    ) -> &mut Self {
        self.push(
            Segment::rel(Opcode::arc(large_arc, sweep)),
            &[radii.x, radii.y, x_rotation, to.x, to.y],
        );
        self.current_pos += to;
        self
    }

    /// Close the current sub-path.
    pub fn close(&mut self) -> &mut Self {
        self.push(Segment::abs(Opcode::Close), &[]);
        self.current_pos = self.subpath_start;
        self
    }

    /// Add a rectangle to the path.
    pub fn rect(&mut self, position: Vec2, size: Vec2) -> &mut Self {
        self.move_to(position);
        self.horizontal_line_to(position.x + size.x);
        self.vertical_line_to(position.y + size.y);
        self.horizontal_line_to(position.x);
        self.close()
    }

    /// Add a rounded rectangle to the path.
    pub fn rounded_rect(&mut self, position: Vec2, size: Vec2, radius: f32) -> &mut Self {
        let r = radius.min(size.x / 2.0).min(size.y / 2.0);
        if r <= 0.0 {
            return self.rect(position, size);
        }
        let radii = Vec2::splat(r);

        self.move_to(position + Vec2::new(r, 0.0));

        self.line_to(position + Vec2::new(size.x - r, 0.0));
        self.arc_to(radii, 0.0, false, true, position + Vec2::new(size.x, r));

        self.line_to(position + Vec2::new(size.x, size.y - r));
        self.arc_to(
            radii,
            0.0,
            false,
            true,
            position + Vec2::new(size.x - r, size.y),
        );

        self.line_to(position + Vec2::new(r, size.y));
        self.arc_to(
            radii,
            0.0,
            false,
            true,
            position + Vec2::new(0.0, size.y - r),
        );

        self.line_to(position + Vec2::new(0.0, r));
        self.arc_to(radii, 0.0, false, true, position + Vec2::new(r, 0.0));

        self.close()
    }

    /// Add a circle to the path as four quarter arcs.
    pub fn circle(&mut self, center: Vec2, radius: f32) -> &mut Self {
        self.ellipse(center, Vec2::splat(radius))
    }

    /// Add an ellipse to the path as four quarter arcs.
    pub fn ellipse(&mut self, center: Vec2, radii: Vec2) -> &mut Self {
        // Start at rightmost point
        self.move_to(center + Vec2::new(radii.x, 0.0));

        self.arc_to(radii, 0.0, false, true, center + Vec2::new(0.0, radii.y));
        self.arc_to(radii, 0.0, false, true, center + Vec2::new(-radii.x, 0.0));
        self.arc_to(radii, 0.0, false, true, center + Vec2::new(0.0, -radii.y));
        self.arc_to(radii, 0.0, false, true, center + Vec2::new(radii.x, 0.0));

        self.close()
    }

    /// Add a polygon to the path.
    pub fn polygon(&mut self, points: &[Vec2]) -> &mut Self {
        let Some((first, rest)) = points.split_first() else {
            return self;
        };

        self.move_to(*first);
        for point in rest {
            self.line_to(*point);
        }
        self.close()
    }

    /// Get the current position.
    pub fn current_pos(&self) -> Vec2 {
        self.current_pos
    }

    /// Build the raw command stream.
    pub fn build_raw(self) -> RawPath {
        self.raw
    }

    /// Build a path object with default style and configuration.
    pub fn build(self) -> Path {
        Path::from_raw(self.raw)
    }
}

bitflags! {
    /// Derived data of a [`Path`] that needs rebuilding.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CacheFlags: u8 {
        /// Canonical subpaths
        const SUBPATHS = 1 << 0;
        /// Fill buckets
        const FILL = 1 << 1;
        /// Stroke buckets
        const STROKE = 1 << 2;
        /// Anything derived in surface space
        const TRANSFORM = 1 << 3;
        /// Flattened polyline
        const POLYLINE = 1 << 4;
    }
}

/// A path with lazily rebuilt derived geometry.
///
/// Geometry is rebuilt wholesale on first access after an invalidating
/// change; borrowed results must be dropped before the path is mutated
/// again.
#[derive(Debug, Clone)]
pub struct Path {
    raw: RawPath,
    tessellator: Tessellator,
    stroke_style: StrokeStyle,
    transform: Transform2D,
    dirty: CacheFlags,
    subpaths: SubpathArena,
    fill: FillGeometry,
    stroke: StrokeGeometry,
    polyline: FlattenedPath,
    polyline_in_surface: bool,
}

impl Default for Path {
    fn default() -> Self {
        Self::from_raw(RawPath::new())
    }
}

impl Path {
    /// Create a new empty path.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_raw(raw: RawPath) -> Self {
        Self {
            raw,
            tessellator: Tessellator::new(),
            stroke_style: StrokeStyle::default(),
            transform: Transform2D::IDENTITY,
            dirty: CacheFlags::all(),
            subpaths: SubpathArena::new(),
            fill: FillGeometry::new(),
            stroke: StrokeGeometry::new(),
            polyline: FlattenedPath::default(),
            polyline_in_surface: false,
        }
    }

    pub fn with_config(mut self, config: TessellationConfig) -> Self {
        self.set_config(config);
        self
    }

    pub fn with_stroke_style(mut self, style: StrokeStyle) -> Self {
        self.set_stroke_style(style);
        self
    }

    pub fn with_transform(mut self, transform: Transform2D) -> Self {
        self.set_transform(transform);
        self
    }

    pub fn raw(&self) -> &RawPath {
        &self.raw
    }

    pub fn config(&self) -> &TessellationConfig {
        self.tessellator.config()
    }

    pub fn stroke_style(&self) -> &StrokeStyle {
        &self.stroke_style
    }

    pub fn transform(&self) -> &Transform2D {
        &self.transform
    }

    /// Caches that will be rebuilt on next access.
    pub fn dirty(&self) -> CacheFlags {
        self.dirty
    }

    /// Append a segment with its operands.
    pub fn append_segment(&mut self, segment: Segment, coords: &[f32]) -> PathDataResult<()> {
        self.raw.push(segment, coords)?;
        self.dirty = CacheFlags::all();
        Ok(())
    }

    /// Append decoded OpenVG segment bytes and coordinates.
    pub fn append_vg_data(&mut self, segments: &[u8], coords: &[f32]) -> PathDataResult<()> {
        let decoded = RawPath::from_vg_segments(segments, coords)?;
        self.append_path(&decoded);
        Ok(())
    }

    /// Append all segments of another raw path.
    pub fn append_path(&mut self, other: &RawPath) {
        self.raw.append(other);
        self.dirty = CacheFlags::all();
    }

    /// Remove all segments.
    pub fn clear(&mut self) {
        self.raw.clear();
        self.dirty = CacheFlags::all();
    }

    /// Change tessellation limits; invalidates everything that depends on
    /// them.
    pub fn set_config(&mut self, config: TessellationConfig) {
        if *self.tessellator.config() != config {
            self.tessellator.set_config(config);
            self.dirty |= CacheFlags::STROKE | CacheFlags::POLYLINE;
        }
    }

    /// Change the stroke style. Only the stroke cache is affected, and only
    /// when the style actually differs.
    pub fn set_stroke_style(&mut self, style: StrokeStyle) {
        if self.stroke_style != style {
            self.stroke_style = style;
            self.dirty |= CacheFlags::STROKE;
        }
    }

    /// Change the path-to-surface transform.
    pub fn set_transform(&mut self, transform: Transform2D) {
        if self.transform != transform {
            self.transform = transform;
            self.dirty |= CacheFlags::TRANSFORM;
        }
    }

    /// Canonical subpaths of the path.
    pub fn subpaths(&mut self) -> &SubpathArena {
        if self.dirty.contains(CacheFlags::SUBPATHS) {
            self.tessellator.normalize_into(&self.raw, &mut self.subpaths);
            self.dirty.remove(CacheFlags::SUBPATHS);
            tracing::debug!(subpaths = self.subpaths.len(), "rebuilt canonical subpaths");
        }
        &self.subpaths
    }

    /// Fill buckets in path space.
    pub fn fill_geometry(&mut self) -> &FillGeometry {
        if self.dirty.intersects(CacheFlags::SUBPATHS | CacheFlags::FILL) {
            self.subpaths();
            self.fill = self.tessellator.tessellate_fill(&self.subpaths);
            self.dirty.remove(CacheFlags::FILL);
            tracing::debug!("rebuilt fill geometry");
        }
        &self.fill
    }

    /// Stroke buckets in path space.
    pub fn stroke_geometry(&mut self) -> &StrokeGeometry {
        if self.dirty.intersects(CacheFlags::SUBPATHS | CacheFlags::STROKE) {
            self.subpaths();
            self.stroke = self
                .tessellator
                .tessellate_stroke(&self.subpaths, &self.stroke_style);
            self.dirty.remove(CacheFlags::STROKE);
            tracing::debug!("rebuilt stroke geometry");
        }
        &self.stroke
    }

    /// Fill buckets mapped through the path transform.
    pub fn surface_fill_geometry(&mut self) -> FillGeometry {
        let mut fill = self.fill_geometry().clone();
        apply_transform(&self.transform, &mut fill.front_solid.vertices);
        apply_transform(&self.transform, &mut fill.back_solid.vertices);
        apply_transform(&self.transform, &mut fill.front_quad.vertices);
        apply_transform(&self.transform, &mut fill.back_quad.vertices);
        fill
    }

    /// Stroke buckets mapped through the path transform.
    ///
    /// Coverage attributes stay in path space, so the half-width test is
    /// still evaluated against the untransformed curve.
    pub fn surface_stroke_geometry(&mut self) -> StrokeGeometry {
        let mut stroke = self.stroke_geometry().clone();
        apply_transform(&self.transform, &mut stroke.solid.vertices);
        apply_transform(&self.transform, &mut stroke.coverage.vertices);
        stroke
    }

    /// Flattened polyline, in surface space when `surface_space` is set.
    ///
    /// Surface-space flattening maps the curves through the transform
    /// before subdividing, so the flatness threshold is in device units.
    pub fn flattened_polyline(&mut self, surface_space: bool) -> &FlattenedPath {
        let stale = self.dirty.contains(CacheFlags::POLYLINE)
            || self.polyline_in_surface != surface_space
            || (surface_space && self.dirty.contains(CacheFlags::TRANSFORM));
        if stale {
            let transform = surface_space.then_some(self.transform);
            self.polyline = self.tessellator.flatten(&self.raw, transform);
            self.polyline_in_surface = surface_space;
            self.dirty.remove(CacheFlags::POLYLINE);
            if surface_space {
                self.dirty.remove(CacheFlags::TRANSFORM);
            }
            tracing::debug!(
                vertices = self.polyline.vertices.len(),
                surface_space,
                "rebuilt flattened polyline"
            );
        }
        &self.polyline
    }

    /// Tight bounds of the flattened path as `(min_x, min_y, width, height)`.
    ///
    /// An empty path has all-zero bounds. Querying transformed bounds also
    /// invalidates the cached fill and stroke geometry.
    pub fn query_bounds(&mut self, transformed: bool) -> Rect<f32> {
        let bounds = compute_bounds(&self.flattened_polyline(transformed).vertices);
        if transformed {
            self.dirty |= CacheFlags::FILL | CacheFlags::STROKE;
        }
        bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Addressing, LineJoin, normalize};

    fn square() -> Path {
        let mut builder = PathBuilder::new();
        builder.rect(Vec2::new(10.0, 10.0), Vec2::new(80.0, 60.0));
        builder.build()
    }

    #[test]
    fn test_path_builder_line() {
        let mut builder = PathBuilder::new();
        builder
            .move_to(Vec2::new(0.0, 0.0))
            .line_to(Vec2::new(100.0, 0.0))
            .line_to(Vec2::new(100.0, 100.0))
            .close();
        let raw = builder.build_raw();

        assert_eq!(raw.len(), 4);
        assert_eq!(raw.coords().len(), 6);
    }

    #[test]
    fn test_relative_commands() {
        let mut builder = PathBuilder::new();
        builder
            .move_to(Vec2::new(10.0, 10.0))
            .rel_line_to(Vec2::new(5.0, 0.0))
            .rel_vertical_line_to(5.0)
            .rel_horizontal_line_to(-5.0);
        assert_eq!(builder.current_pos(), Vec2::new(10.0, 15.0));

        let raw = builder.build_raw();
        assert_eq!(raw.segments()[1].addressing, Addressing::Relative);
        let arena = normalize(&raw);
        let subpath = arena.iter().next().unwrap();
        assert_eq!(
            subpath.points(),
            &[
                Vec2::new(10.0, 10.0),
                Vec2::new(15.0, 10.0),
                Vec2::new(15.0, 15.0),
                Vec2::new(10.0, 15.0),
            ]
        );
    }

    #[test]
    fn test_arc_opcode_from_flags() {
        let mut builder = PathBuilder::new();
        builder
            .move_to(Vec2::ZERO)
            .arc_to(Vec2::splat(5.0), 30.0, true, false, Vec2::new(10.0, 0.0));
        let raw = builder.build_raw();
        assert_eq!(raw.segments()[1].opcode, Opcode::LcwArcTo);
        assert_eq!(&raw.coords()[2..], &[5.0, 5.0, 30.0, 10.0, 0.0]);
    }

    #[test]
    fn test_close_returns_to_start() {
        let mut builder = PathBuilder::new();
        builder
            .move_to(Vec2::new(3.0, 4.0))
            .line_to(Vec2::new(10.0, 0.0))
            .close();
        assert_eq!(builder.current_pos(), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_polygon_empty() {
        let mut builder = PathBuilder::new();
        builder.polygon(&[]);
        assert!(builder.build_raw().is_empty());
    }

    #[test]
    fn test_path_bounds() {
        let mut path = square();
        assert_eq!(path.query_bounds(false), Rect::new(10.0, 10.0, 80.0, 60.0));
    }

    #[test]
    fn test_empty_path_bounds() {
        assert_eq!(Path::new().query_bounds(true), Rect::new(0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_transformed_bounds() {
        let mut path = square().with_transform(Transform2D::scale(2.0));
        assert_eq!(path.query_bounds(true), Rect::new(20.0, 20.0, 160.0, 120.0));
        assert_eq!(path.query_bounds(false), Rect::new(10.0, 10.0, 80.0, 60.0));
    }

    #[test]
    fn test_edit_invalidates_everything() {
        let mut path = square();
        path.fill_geometry();
        path.stroke_geometry();
        path.flattened_polyline(false);
        assert_eq!(path.dirty(), CacheFlags::TRANSFORM);

        path.append_segment(Segment::abs(Opcode::LineTo), &[0.0, 0.0])
            .unwrap();
        assert_eq!(path.dirty(), CacheFlags::all());
    }

    #[test]
    fn test_style_invalidates_stroke_only() {
        let mut path = square();
        path.fill_geometry();
        path.stroke_geometry();
        let dirty = path.dirty();

        path.set_stroke_style(StrokeStyle::default());
        assert_eq!(path.dirty(), dirty);

        path.set_stroke_style(StrokeStyle::new(4.0).with_line_join(LineJoin::Bevel));
        assert_eq!(path.dirty(), dirty | CacheFlags::STROKE);
        assert!(!path.dirty().contains(CacheFlags::FILL));
    }

    #[test]
    fn test_transform_marks_transform_only() {
        let mut path = square();
        path.fill_geometry();
        path.stroke_geometry();
        path.flattened_polyline(true);
        assert!(path.dirty().is_empty());

        path.set_transform(Transform2D::translate(Vec2::new(1.0, 0.0)));
        assert!(path.dirty().contains(CacheFlags::TRANSFORM));
        assert!(!path.dirty().intersects(CacheFlags::FILL | CacheFlags::STROKE));
    }

    #[test]
    fn test_transformed_query_invalidates_geometry() {
        let mut path = square();
        path.fill_geometry();
        path.stroke_geometry();
        path.query_bounds(true);
        assert!(path.dirty().contains(CacheFlags::FILL | CacheFlags::STROKE));

        path.fill_geometry();
        path.stroke_geometry();
        path.query_bounds(false);
        assert!(!path.dirty().intersects(CacheFlags::FILL | CacheFlags::STROKE));
    }

    #[test]
    fn test_surface_fill_geometry() {
        let mut path = square().with_transform(Transform2D::translate(Vec2::new(5.0, 0.0)));
        let local = path.fill_geometry().clone();
        let surface = path.surface_fill_geometry();
        assert_eq!(
            surface.front_solid.vertices[0].position[0],
            local.front_solid.vertices[0].position[0] + 5.0
        );
        assert!((surface.signed_area() - local.signed_area()).abs() < 1e-3);
    }

    #[test]
    fn test_vg_data_append() {
        let mut path = Path::new();
        // M 0 0, relative L 10 0, Z
        path.append_vg_data(&[2, 5, 0], &[0.0, 0.0, 10.0, 0.0]).unwrap();
        assert_eq!(path.raw().len(), 3);
        assert!(path.append_vg_data(&[2], &[0.0]).is_err());
        assert_eq!(path.raw().len(), 3);
    }
}
