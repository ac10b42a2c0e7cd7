//! Path command normalization.
//!
//! Two stages:
//!
//! 1. [`AbsoluteSegments`] resolves relative coordinates, horizontal and
//!    vertical lines and smooth-curve reflections, yielding self-contained
//!    absolute segments (cubics and arcs intact). The flattener works from
//!    this stream directly.
//! 2. [`normalize`] reduces that stream to canonical move/line/quad/close
//!    subpaths in a [`SubpathArena`], approximating cubics and arcs by
//!    quadratics. Fill and stroke tessellation work from the arena.

use glam::Vec2;

use crate::{
    CanonicalOp, CubicBezier, EndpointArc, Opcode, QuadraticBezier, RawPath, RawSegments, Segment,
    SubpathArena,
    arc::ArcShape,
};

/// A path segment with every coordinate resolved to absolute space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AbsoluteSegment {
    MoveTo(Vec2),
    LineTo { from: Vec2, to: Vec2 },
    Quad(QuadraticBezier),
    Cubic(CubicBezier),
    Arc(EndpointArc),
    /// Closing line from the current point back to the subpath start.
    Close { from: Vec2, to: Vec2 },
}

/// Pen state carried across the segments of one path.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NormalizerState {
    pub current: Vec2,
    /// Start of the current subpath; the target of a close.
    pub start: Vec2,
    /// Control point a following smooth curve reflects. Equal to the
    /// current point after anything but a curve.
    pub last_control: Vec2,
}

impl NormalizerState {
    pub fn new() -> Self {
        Self::default()
    }

    fn reflected_control(&self) -> Vec2 {
        self.current * 2.0 - self.last_control
    }

    /// Resolve one raw segment and advance the pen.
    ///
    /// `operands` must hold exactly the segment's coordinates, as
    /// [`RawPath`] guarantees.
    pub fn resolve(&mut self, segment: Segment, operands: &[f32]) -> AbsoluteSegment {
        let origin = if segment.is_relative() {
            self.current
        } else {
            Vec2::ZERO
        };
        let point = |i: usize| Vec2::new(operands[2 * i], operands[2 * i + 1]) + origin;
        let from = self.current;

        let resolved = match segment.opcode {
            Opcode::Close => AbsoluteSegment::Close {
                from,
                to: self.start,
            },
            Opcode::MoveTo => AbsoluteSegment::MoveTo(point(0)),
            Opcode::LineTo => AbsoluteSegment::LineTo { from, to: point(0) },
            Opcode::HLineTo => AbsoluteSegment::LineTo {
                from,
                to: Vec2::new(operands[0] + origin.x, from.y),
            },
            Opcode::VLineTo => AbsoluteSegment::LineTo {
                from,
                to: Vec2::new(from.x, operands[0] + origin.y),
            },
            Opcode::QuadTo => AbsoluteSegment::Quad(QuadraticBezier::new(from, point(0), point(1))),
            Opcode::SmoothQuadTo => AbsoluteSegment::Quad(QuadraticBezier::new(
                from,
                self.reflected_control(),
                point(0),
            )),
            Opcode::CubicTo => {
                AbsoluteSegment::Cubic(CubicBezier::new(from, point(0), point(1), point(2)))
            }
            Opcode::SmoothCubicTo => AbsoluteSegment::Cubic(CubicBezier::new(
                from,
                self.reflected_control(),
                point(0),
                point(1),
            )),
            Opcode::SccwArcTo | Opcode::ScwArcTo | Opcode::LccwArcTo | Opcode::LcwArcTo => {
                let (large_arc, sweep) = segment.opcode.arc_flags().unwrap_or((false, false));
                AbsoluteSegment::Arc(EndpointArc {
                    from,
                    to: Vec2::new(operands[3], operands[4]) + origin,
                    radii: Vec2::new(operands[0], operands[1]),
                    x_rotation: operands[2],
                    large_arc,
                    sweep,
                })
            }
        };

        match resolved {
            AbsoluteSegment::MoveTo(p) => {
                self.start = p;
                self.current = p;
                self.last_control = p;
            }
            AbsoluteSegment::LineTo { to, .. } | AbsoluteSegment::Close { to, .. } => {
                self.current = to;
                self.last_control = to;
            }
            AbsoluteSegment::Quad(q) => {
                self.current = q.to;
                self.last_control = q.control;
            }
            AbsoluteSegment::Cubic(c) => {
                self.current = c.to;
                self.last_control = c.control2;
            }
            AbsoluteSegment::Arc(a) => {
                self.current = a.to;
                self.last_control = a.to;
            }
        }

        resolved
    }
}

/// Iterator resolving a [`RawPath`] into [`AbsoluteSegment`]s.
#[derive(Debug, Clone)]
pub struct AbsoluteSegments<'a> {
    raw: RawSegments<'a>,
    state: NormalizerState,
}

impl<'a> AbsoluteSegments<'a> {
    pub fn new(path: &'a RawPath) -> Self {
        Self {
            raw: path.iter(),
            state: NormalizerState::new(),
        }
    }

    pub fn state(&self) -> &NormalizerState {
        &self.state
    }
}

impl Iterator for AbsoluteSegments<'_> {
    type Item = AbsoluteSegment;

    fn next(&mut self) -> Option<Self::Item> {
        let (segment, operands) = self.raw.next()?;
        Some(self.state.resolve(segment, operands))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.raw.size_hint()
    }
}

/// Resolve a raw path into absolute segments.
pub fn absolute_segments(path: &RawPath) -> AbsoluteSegments<'_> {
    AbsoluteSegments::new(path)
}

/// Segment class driving record boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    Move,
    Line,
    Close,
}

/// Folds canonical operations into arena records.
///
/// A new record starts on `Line → Move`, `Close → Move` and `Close → Line`;
/// everything else continues the current one. The fold starts in the close
/// state so the first move or drawing operation opens the first record.
struct Reducer<'a> {
    arena: &'a mut SubpathArena,
    previous: Transition,
}

impl Reducer<'_> {
    fn move_to(&mut self, point: Vec2) {
        match self.previous {
            Transition::Move => self.arena.replace_move(point),
            Transition::Line | Transition::Close => {
                self.arena.begin(point);
            }
        }
        self.previous = Transition::Move;
    }

    fn draw(&mut self, from: Vec2, op: CanonicalOp, points: &[Vec2]) {
        if self.previous == Transition::Close {
            self.arena.begin(from);
        }
        self.arena.push(op, points);
        self.previous = Transition::Line;
    }

    fn close(&mut self) {
        if self.previous == Transition::Close {
            return;
        }
        self.arena.push(CanonicalOp::Close, &[]);
        self.previous = Transition::Close;
    }
}

/// Normalize a raw path into canonical subpaths.
pub fn normalize(path: &RawPath) -> SubpathArena {
    let mut arena = SubpathArena::new();
    normalize_into(path, &mut arena);
    arena
}

/// Normalize into an existing arena, replacing its contents.
pub fn normalize_into(path: &RawPath, arena: &mut SubpathArena) {
    arena.clear();
    let mut reducer = Reducer {
        arena,
        previous: Transition::Close,
    };

    for segment in absolute_segments(path) {
        match segment {
            AbsoluteSegment::MoveTo(p) => reducer.move_to(p),
            AbsoluteSegment::LineTo { from, to } => reducer.draw(from, CanonicalOp::Line, &[to]),
            AbsoluteSegment::Quad(q) => {
                reducer.draw(q.from, CanonicalOp::Quad, &[q.control, q.to]);
            }
            AbsoluteSegment::Cubic(c) => {
                for q in c.to_quadratics() {
                    reducer.draw(q.from, CanonicalOp::Quad, &[q.control, q.to]);
                }
            }
            AbsoluteSegment::Arc(arc) => match arc.to_center() {
                ArcShape::Empty => {
                    tracing::trace!(at = ?arc.from, "dropping arc with coincident endpoints");
                }
                ArcShape::Line => {
                    tracing::trace!(radii = ?arc.radii, "arc with degenerate radii drawn as line");
                    reducer.draw(arc.from, CanonicalOp::Line, &[arc.to]);
                }
                ArcShape::Elliptic(center) => {
                    for q in center.to_quadratics(arc.from, arc.to) {
                        reducer.draw(q.from, CanonicalOp::Quad, &[q.control, q.to]);
                    }
                }
            },
            AbsoluteSegment::Close { .. } => reducer.close(),
        }
    }

    tracing::trace!(
        subpaths = reducer.arena.len(),
        segments = path.len(),
        "normalized path"
    );
}
