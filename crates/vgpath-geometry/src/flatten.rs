//! Adaptive curve flattening.
//!
//! Curves are subdivided with an explicit stack of bounded depth instead of
//! recursion. Quadratics, cubics and arcs each have their own flatness test,
//! all measured in the space the vertices are emitted in: when flattening
//! in surface space the path transform is applied to the control points
//! first, so the tolerance is in device units.

use bitflags::bitflags;
use glam::{DVec2, Vec2};

use crate::{
    AbsoluteSegment, CubicBezier, QuadraticBezier, RawPath, TessellationConfig, Transform2D,
    Positioned,
    arc::{ArcFrame, ArcShape},
    normalize::absolute_segments,
};

bitflags! {
    /// Per-vertex markers of a flattened polyline.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct VertexFlags: u8 {
        /// Vertex closes its contour (it repeats the contour start).
        const CLOSE = 1 << 0;
        /// Vertex ends an authored segment.
        const SEGMENT_END = 1 << 1;
    }
}

/// One vertex of a flattened polyline.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SubdivisionVertex {
    pub point: Vec2,
    pub flags: VertexFlags,
    /// Number of vertices in the contour. Only set on a contour's first
    /// vertex; zero elsewhere.
    pub run_length: u32,
}

impl SubdivisionVertex {
    fn new(point: Vec2, flags: VertexFlags) -> Self {
        Self {
            point,
            flags,
            run_length: 0,
        }
    }
}

impl Positioned for SubdivisionVertex {
    fn position(&self) -> Vec2 {
        self.point
    }

    fn set_position(&mut self, position: Vec2) {
        self.point = position;
    }
}

/// Flattened polyline of a whole path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlattenedPath {
    pub vertices: Vec<SubdivisionVertex>,
    /// Whether output was cut off at the vertex ceiling.
    pub truncated: bool,
}

impl FlattenedPath {
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Contours as vertex slices, split by their run-length headers.
    pub fn contours(&self) -> Contours<'_> {
        Contours {
            rest: &self.vertices,
        }
    }
}

/// Iterator over the contours of a [`FlattenedPath`].
#[derive(Debug, Clone)]
pub struct Contours<'a> {
    rest: &'a [SubdivisionVertex],
}

impl<'a> Iterator for Contours<'a> {
    type Item = &'a [SubdivisionVertex];

    fn next(&mut self) -> Option<Self::Item> {
        let head = self.rest.first()?;
        let len = (head.run_length as usize).clamp(1, self.rest.len());
        let (contour, rest) = self.rest.split_at(len);
        self.rest = rest;
        Some(contour)
    }
}

/// Accepts a piece as flat when the control point's summed axis distance
/// from the chord midpoint is within tolerance.
fn quad_is_flat(q: &QuadraticBezier, flatness: f32) -> bool {
    let d = (q.control - (q.from + q.to) * 0.5).abs();
    d.x + d.y <= flatness
}

/// Squared control-point deviation from the chord, per axis, worst of the
/// two control points.
fn cubic_is_flat(c: &CubicBezier, flatness: f32) -> bool {
    let u = c.control1 * 3.0 - c.from * 2.0 - c.to;
    let v = c.control2 * 3.0 - c.to * 2.0 - c.from;
    let u = u * u;
    let v = v * v;
    u.x.max(v.x) + u.y.max(v.y) <= flatness * flatness
}

/// Angular piece of an arc, with its endpoints evaluated.
#[derive(Debug, Clone, Copy)]
struct ArcPiece {
    from: DVec2,
    to: DVec2,
    a0: f64,
    a1: f64,
}

/// Builds a [`FlattenedPath`] contour by contour.
#[derive(Debug)]
pub struct Flattener<'a> {
    config: &'a TessellationConfig,
    transform: Option<Transform2D>,
    out: FlattenedPath,
    /// Index of the current contour's first vertex.
    contour: Option<usize>,
    /// Where the next contour starts (already transformed).
    pending_start: Vec2,
    stack_peak: usize,
}

impl<'a> Flattener<'a> {
    /// Flatten in path space.
    pub fn new(config: &'a TessellationConfig) -> Self {
        Self {
            config,
            transform: None,
            out: FlattenedPath::default(),
            contour: None,
            pending_start: Vec2::ZERO,
            stack_peak: 0,
        }
    }

    /// Flatten in surface space through `transform`.
    pub fn with_transform(config: &'a TessellationConfig, transform: Transform2D) -> Self {
        Self {
            transform: (!transform.is_identity()).then_some(transform),
            ..Self::new(config)
        }
    }

    fn map(&self, p: Vec2) -> Vec2 {
        match &self.transform {
            Some(t) => t.transform_point(p),
            None => p,
        }
    }

    /// Flatten every segment of a raw path.
    pub fn flatten_path(mut self, path: &RawPath) -> FlattenedPath {
        for segment in absolute_segments(path) {
            if self.out.truncated {
                break;
            }
            self.segment(&segment);
        }
        self.finish()
    }

    /// Deepest subdivision stack seen so far.
    pub fn stack_peak(&self) -> usize {
        self.stack_peak
    }

    pub fn finish(mut self) -> FlattenedPath {
        self.end_contour();
        self.out
    }

    /// Flatten one absolute segment.
    pub fn segment(&mut self, segment: &AbsoluteSegment) {
        match *segment {
            AbsoluteSegment::MoveTo(p) => {
                self.end_contour();
                self.pending_start = self.map(p);
            }
            AbsoluteSegment::LineTo { to, .. } => {
                self.begin_contour();
                self.emit(self.map(to), VertexFlags::SEGMENT_END);
            }
            AbsoluteSegment::Quad(q) => {
                self.begin_contour();
                let q = QuadraticBezier::new(self.map(q.from), self.map(q.control), self.map(q.to));
                self.quad(q);
                self.emit(q.to, VertexFlags::SEGMENT_END);
            }
            AbsoluteSegment::Cubic(c) => {
                self.begin_contour();
                let c = CubicBezier::new(
                    self.map(c.from),
                    self.map(c.control1),
                    self.map(c.control2),
                    self.map(c.to),
                );
                self.cubic(c);
                self.emit(c.to, VertexFlags::SEGMENT_END);
            }
            AbsoluteSegment::Arc(arc) => match arc.to_center() {
                ArcShape::Empty => {}
                ArcShape::Line => {
                    self.begin_contour();
                    self.emit(self.map(arc.to), VertexFlags::SEGMENT_END);
                }
                ArcShape::Elliptic(center) => {
                    self.begin_contour();
                    let frame = match &self.transform {
                        Some(t) => center.frame().transformed(t),
                        None => center.frame(),
                    };
                    let from = self.map(arc.from);
                    let to = self.map(arc.to);
                    self.arc(&frame, from, to);
                    self.emit(to, VertexFlags::SEGMENT_END);
                }
            },
            AbsoluteSegment::Close { to, .. } => {
                if self.contour.is_some() {
                    self.emit(self.map(to), VertexFlags::CLOSE | VertexFlags::SEGMENT_END);
                    self.end_contour();
                }
                self.pending_start = self.map(to);
            }
        }
    }

    fn begin_contour(&mut self) {
        if self.contour.is_none() && !self.out.truncated {
            self.contour = Some(self.out.vertices.len());
            self.emit(self.pending_start, VertexFlags::empty());
        }
    }

    fn end_contour(&mut self) {
        if let Some(head) = self.contour.take() {
            let count = self.out.vertices.len() - head;
            if let Some(first) = self.out.vertices.get_mut(head) {
                first.run_length = count as u32;
            }
        }
    }

    fn emit(&mut self, point: Vec2, flags: VertexFlags) {
        if self.out.truncated {
            return;
        }
        if self.out.vertices.len() >= self.config.max_vertices {
            tracing::warn!(
                max_vertices = self.config.max_vertices,
                "flattened vertex limit reached, truncating path"
            );
            self.out.truncated = true;
            return;
        }
        self.out.vertices.push(SubdivisionVertex::new(point, flags));
    }

    fn note_depth(&mut self, depth: usize) {
        self.stack_peak = self.stack_peak.max(depth);
    }

    /// Interior subdivision points of a quadratic, left to right. The end
    /// point is left to the caller.
    fn quad(&mut self, root: QuadraticBezier) {
        let flatness = self.config.flatness;
        let max_depth = self.config.max_subdivision_depth;
        let mut stack = Vec::with_capacity(max_depth);
        stack.push((root, 1usize));

        while let Some((q, depth)) = stack.pop() {
            self.note_depth(depth);
            if depth >= max_depth || quad_is_flat(&q, flatness) {
                if !stack.is_empty() {
                    self.emit(q.to, VertexFlags::empty());
                }
                continue;
            }
            let (left, right) = q.split(0.5);
            stack.push((right, depth + 1));
            stack.push((left, depth + 1));
        }
    }

    fn cubic(&mut self, root: CubicBezier) {
        let flatness = self.config.flatness;
        let max_depth = self.config.max_subdivision_depth;
        let mut stack = Vec::with_capacity(max_depth);
        stack.push((root, 1usize));

        while let Some((c, depth)) = stack.pop() {
            self.note_depth(depth);
            if depth >= max_depth || cubic_is_flat(&c, flatness) {
                if !stack.is_empty() {
                    self.emit(c.to, VertexFlags::empty());
                }
                continue;
            }
            let (left, right) = c.split(0.5);
            stack.push((right, depth + 1));
            stack.push((left, depth + 1));
        }
    }

    /// Arc pieces are tested by how far the mid-angle point strays from the
    /// chord midpoint. Accepted pieces contribute both their mid-angle
    /// point and their end point.
    fn arc(&mut self, frame: &ArcFrame, from: Vec2, to: Vec2) {
        let flatness = self.config.flatness as f64;
        let max_depth = self.config.max_subdivision_depth;
        let mut stack = Vec::with_capacity(max_depth);
        stack.push((
            ArcPiece {
                from: from.as_dvec2(),
                to: to.as_dvec2(),
                a0: frame.start_angle,
                a1: frame.end_angle(),
            },
            1usize,
        ));

        while let Some((piece, depth)) = stack.pop() {
            self.note_depth(depth);
            let mid_angle = 0.5 * (piece.a0 + piece.a1);
            let mid = frame.point_at(mid_angle);
            let d = (mid - (piece.from + piece.to) * 0.5).abs();

            if depth >= max_depth || d.x + d.y <= flatness {
                self.emit(mid.as_vec2(), VertexFlags::empty());
                if !stack.is_empty() {
                    self.emit(piece.to.as_vec2(), VertexFlags::empty());
                }
                continue;
            }
            let left = ArcPiece {
                to: mid,
                a1: mid_angle,
                ..piece
            };
            let right = ArcPiece {
                from: mid,
                a0: mid_angle,
                ..piece
            };
            stack.push((right, depth + 1));
            stack.push((left, depth + 1));
        }
    }
}

/// Flatten a raw path, optionally through a surface transform.
pub fn flatten(
    path: &RawPath,
    transform: Option<Transform2D>,
    config: &TessellationConfig,
) -> FlattenedPath {
    match transform {
        Some(t) => Flattener::with_transform(config, t).flatten_path(path),
        None => Flattener::new(config).flatten_path(path),
    }
}
