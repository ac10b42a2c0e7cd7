//! Tessellation entry points.
//!
//! [`Tessellator`] bundles a [`TessellationConfig`] with the pipeline stages
//! so callers do not have to thread the configuration through every call.
//! Each stage opens a puffin scope.

use vgpath_core::profiling::profile_function;

use crate::{
    FillGeometry, FlattenedPath, RawPath, StrokeGeometry, StrokeStyle, SubpathArena,
    TessellationConfig, Transform2D, fill, flatten, normalize, stroker,
};

/// Converts raw paths into subpaths, polylines and geometry buckets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tessellator {
    config: TessellationConfig,
}

impl Tessellator {
    /// Create a new tessellator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tessellator with a custom configuration.
    pub fn with_config(config: TessellationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TessellationConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: TessellationConfig) {
        self.config = config;
    }

    /// Canonicalize a raw path into subpaths.
    pub fn normalize(&self, path: &RawPath) -> SubpathArena {
        profile_function!();
        normalize::normalize(path)
    }

    /// Canonicalize into an existing arena, reusing its allocations.
    pub fn normalize_into(&self, path: &RawPath, arena: &mut SubpathArena) {
        profile_function!();
        normalize::normalize_into(path, arena);
    }

    /// Flatten a raw path into a polyline, in surface space when a
    /// transform is given.
    pub fn flatten(&self, path: &RawPath, transform: Option<Transform2D>) -> FlattenedPath {
        profile_function!();
        flatten::flatten(path, transform, &self.config)
    }

    /// Tessellate subpaths for stencil filling.
    pub fn tessellate_fill(&self, subpaths: &SubpathArena) -> FillGeometry {
        profile_function!();
        fill::tessellate_fill(subpaths)
    }

    /// Tessellate subpaths for stroking.
    pub fn tessellate_stroke(&self, subpaths: &SubpathArena, style: &StrokeStyle) -> StrokeGeometry {
        profile_function!();
        stroker::tessellate_stroke(subpaths, style, &self.config)
    }

    /// Normalize and fill a raw path in one go.
    pub fn fill_path(&self, path: &RawPath) -> FillGeometry {
        self.tessellate_fill(&self.normalize(path))
    }

    /// Normalize and stroke a raw path in one go.
    pub fn stroke_path(&self, path: &RawPath, style: &StrokeStyle) -> StrokeGeometry {
        self.tessellate_stroke(&self.normalize(path), style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PathBuilder;
    use glam::Vec2;

    #[test]
    fn test_rect_fill() {
        let mut builder = PathBuilder::new();
        builder.rect(Vec2::new(10.0, 10.0), Vec2::new(100.0, 50.0));
        let raw = builder.build_raw();

        let geometry = Tessellator::new().fill_path(&raw);
        assert_eq!(geometry.front_solid.triangle_count(), 2);
        assert!((geometry.signed_area() - 5000.0).abs() < 1e-2);
    }

    #[test]
    fn test_line_stroke() {
        let mut builder = PathBuilder::new();
        builder
            .move_to(Vec2::new(0.0, 0.0))
            .line_to(Vec2::new(100.0, 100.0));
        let raw = builder.build_raw();

        let geometry = Tessellator::new().stroke_path(&raw, &StrokeStyle::new(2.0));
        assert_eq!(geometry.solid.triangle_count(), 2);
        assert!(geometry.coverage.is_empty());
    }

    #[test]
    fn test_config_reaches_flattener() {
        let mut builder = PathBuilder::new();
        builder
            .move_to(Vec2::ZERO)
            .quad_to(Vec2::new(50.0, 100.0), Vec2::new(100.0, 0.0));
        let raw = builder.build_raw();

        let coarse = Tessellator::with_config(TessellationConfig::new().with_flatness(10.0));
        let fine = Tessellator::with_config(TessellationConfig::new().with_flatness(0.1));
        assert!(
            coarse.flatten(&raw, None).vertices.len() < fine.flatten(&raw, None).vertices.len()
        );
    }

    #[test]
    fn test_circle_fill() {
        let mut builder = PathBuilder::new();
        builder.circle(Vec2::new(50.0, 50.0), 25.0);
        let tessellator = Tessellator::new();
        let geometry = tessellator.fill_path(&builder.build_raw());

        // Four quarter arcs, two quadratics each.
        let quads =
            geometry.front_quad.triangle_count() + geometry.back_quad.triangle_count();
        assert_eq!(quads, 8);
        let area = std::f32::consts::PI * 25.0 * 25.0;
        assert!((geometry.signed_area().abs() - area).abs() / area < 1e-2);
    }
}
