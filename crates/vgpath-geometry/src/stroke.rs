//! Stroke properties for path outlines.
//!
//! Defines how paths are stroked: width, caps, joins, and dash patterns.

/// Line cap style for stroke endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineCap {
    /// Flat cap ending at the endpoint.
    #[default]
    Butt,
    /// Round cap extending beyond the endpoint.
    Round,
    /// Square cap extending beyond the endpoint.
    Square,
}

/// Line join style for stroke corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineJoin {
    /// Miter join (sharp corner), bevelled past the miter limit.
    #[default]
    Miter,
    /// Round join (rounded corner).
    Round,
    /// Bevel join (flat corner).
    Bevel,
}

/// Dash pattern for stroked lines.
#[derive(Debug, Clone, PartialEq)]
pub struct DashPattern {
    /// Alternating on/off lengths, starting with "on".
    pub pattern: Vec<f32>,
    /// Distance into the pattern at which stroking starts.
    pub phase: f32,
    /// Restart the pattern at every subpath instead of carrying it over.
    pub phase_reset: bool,
}

impl DashPattern {
    /// Create a new dash pattern.
    pub fn new(pattern: Vec<f32>, phase: f32) -> Self {
        Self {
            pattern,
            phase,
            phase_reset: false,
        }
    }

    /// Create a simple dashed line.
    pub fn dashed(dash: f32, gap: f32) -> Self {
        Self::new(vec![dash, gap], 0.0)
    }

    /// Create a dotted line. Dots are zero-length dashes and only show with
    /// round or square caps.
    pub fn dotted(gap: f32) -> Self {
        Self::new(vec![0.0, gap], 0.0)
    }

    /// Create a dash-dot pattern.
    pub fn dash_dot(dash: f32, gap: f32, dot: f32) -> Self {
        Self::new(vec![dash, gap, dot, gap], 0.0)
    }

    pub fn with_phase_reset(mut self, phase_reset: bool) -> Self {
        self.phase_reset = phase_reset;
        self
    }

    /// Pattern as actually used: negative entries become zero and an odd
    /// trailing entry is dropped. `None` when nothing remains to dash with,
    /// in which case the stroke is solid.
    pub fn effective_pattern(&self) -> Option<(Vec<f32>, f32)> {
        let even = self.pattern.len() & !1;
        let cleaned: Vec<f32> = self.pattern[..even]
            .iter()
            .map(|d| if d.is_finite() { d.max(0.0) } else { 0.0 })
            .collect();
        let total: f32 = cleaned.iter().sum();
        (total > 0.0).then_some((cleaned, total))
    }
}

/// Stroke parameters for a path.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeStyle {
    /// Stroke width in path units
    pub width: f32,
    /// Line cap style
    pub line_cap: LineCap,
    /// Line join style
    pub line_join: LineJoin,
    /// Miter limit for miter joins
    pub miter_limit: f32,
    /// Optional dash pattern
    pub dash: Option<DashPattern>,
}

impl StrokeStyle {
    /// Create a stroke of the given width with default caps and joins.
    pub fn new(width: f32) -> Self {
        Self {
            width,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            miter_limit: 4.0,
            dash: None,
        }
    }

    /// Set the line cap style.
    pub fn with_line_cap(mut self, cap: LineCap) -> Self {
        self.line_cap = cap;
        self
    }

    /// Set the line join style.
    pub fn with_line_join(mut self, join: LineJoin) -> Self {
        self.line_join = join;
        self
    }

    /// Set the miter limit.
    pub fn with_miter_limit(mut self, limit: f32) -> Self {
        self.miter_limit = limit.max(1.0);
        self
    }

    /// Set a dash pattern.
    pub fn with_dash(mut self, pattern: DashPattern) -> Self {
        self.dash = Some(pattern);
        self
    }

    /// Set a simple dashed pattern.
    pub fn dashed(mut self, dash: f32, gap: f32) -> Self {
        self.dash = Some(DashPattern::dashed(dash, gap));
        self
    }

    pub fn half_width(&self) -> f32 {
        self.width * 0.5
    }

    /// Check if the stroke is visible.
    pub fn is_visible(&self) -> bool {
        self.width > 0.0 && self.width.is_finite()
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::new(1.0)
    }
}
