//! Tessellation limits and tolerances.

use std::f32::consts::PI;

/// Knobs shared by the flattener and the tessellators.
///
/// The defaults reproduce the classic OpenVG reference behaviour: one device
/// unit of flatness, sixteen levels of subdivision and twenty bisection steps
/// when inverting quadratic arc length.
#[derive(Debug, Clone, PartialEq)]
pub struct TessellationConfig {
    /// Maximum summed control-point deviation (device units) for a curve
    /// piece to be accepted as a straight segment.
    pub flatness: f32,
    /// Hard cap on subdivision stack depth. Pieces at this depth are
    /// accepted regardless of flatness.
    pub max_subdivision_depth: usize,
    /// Ceiling on flattened vertices per path. Output beyond it is dropped.
    pub max_vertices: usize,
    /// Bisection iterations used to find a quadratic parameter from an arc
    /// length.
    pub dash_bisection_iterations: u32,
    /// Distance under which two stroke corners count as coincident.
    pub corner_epsilon: f32,
    /// Largest angular step of a round join fan, in radians.
    pub round_join_step: f32,
    /// Number of triangles in a round cap fan.
    pub round_cap_steps: u32,
}

impl Default for TessellationConfig {
    fn default() -> Self {
        Self {
            flatness: 1.0,
            max_subdivision_depth: 16,
            max_vertices: 1 << 20,
            dash_bisection_iterations: 20,
            corner_epsilon: 1e-4,
            round_join_step: PI / 12.0,
            round_cap_steps: 12,
        }
    }
}

impl TessellationConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the flatness threshold.
    pub fn with_flatness(mut self, flatness: f32) -> Self {
        self.flatness = flatness.max(f32::EPSILON);
        self
    }

    /// Set the maximum subdivision depth (at least 1).
    pub fn with_max_subdivision_depth(mut self, depth: usize) -> Self {
        self.max_subdivision_depth = depth.max(1);
        self
    }

    /// Set the flattened vertex ceiling.
    pub fn with_max_vertices(mut self, max_vertices: usize) -> Self {
        self.max_vertices = max_vertices;
        self
    }

    /// Set the number of arc-length bisection iterations.
    pub fn with_dash_bisection_iterations(mut self, iterations: u32) -> Self {
        self.dash_bisection_iterations = iterations.max(1);
        self
    }

    /// Set the corner deduplication tolerance.
    pub fn with_corner_epsilon(mut self, epsilon: f32) -> Self {
        self.corner_epsilon = epsilon.max(0.0);
        self
    }

    /// Set the round join angular step in radians.
    pub fn with_round_join_step(mut self, step: f32) -> Self {
        self.round_join_step = step.clamp(PI / 180.0, PI);
        self
    }

    /// Set the number of round cap triangles.
    pub fn with_round_cap_steps(mut self, steps: u32) -> Self {
        self.round_cap_steps = steps.max(1);
        self
    }
}
