//! Stroke tessellation.
//!
//! Straight pieces of a stroke become solid quads. Quadratic pieces become
//! a single coverage quad bounding the curve's offset band; each corner
//! carries the curve's power basis and the nearest-point cubic evaluated at
//! that corner, from which a fragment shader decides whether it lies within
//! half a stroke width of the curve. Joins and caps are always solid.

use glam::Vec2;

use crate::{
    Dasher, FillVertex, LineCap, LineJoin, QuadraticBezier, StrokeCurveVertex, StrokeStyle,
    SubpathArena, SubpathSegment, TessellatedMesh, TessellationConfig,
};
use vgpath_core::math::cross;

/// Below this squared magnitude of the quadratic coefficient a curve is
/// stroked as a straight line.
const LINEAR_EPSILON: f32 = 1e-6;

/// Segments shorter than this are skipped.
const LENGTH_EPSILON: f32 = 1e-6;

/// Stroke geometry of a path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrokeGeometry {
    /// Fully covered triangles: straight pieces, joins and caps.
    pub solid: TessellatedMesh<FillVertex>,
    /// Coverage quads of curved pieces.
    pub coverage: TessellatedMesh<StrokeCurveVertex>,
}

impl StrokeGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.solid.is_empty() && self.coverage.is_empty()
    }

    pub fn clear(&mut self) {
        self.solid.clear();
        self.coverage.clear();
    }
}

/// Left-hand unit normal of a unit direction.
fn normal(d: Vec2) -> Vec2 {
    Vec2::new(-d.y, d.x)
}

/// A drawable piece of a subpath.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Piece {
    Line { from: Vec2, to: Vec2 },
    Quad(QuadraticBezier),
}

impl Piece {
    fn from_segment(segment: SubpathSegment) -> Option<Self> {
        let piece = match segment {
            SubpathSegment::Line { from, to } | SubpathSegment::Close { from, to } => {
                Piece::Line { from, to }
            }
            SubpathSegment::Quad(q) if q.is_linear(LINEAR_EPSILON) => Piece::Line {
                from: q.from,
                to: q.to,
            },
            SubpathSegment::Quad(q) => Piece::Quad(q),
        };
        (piece.length() > LENGTH_EPSILON).then_some(piece)
    }

    fn length(&self) -> f32 {
        match self {
            Piece::Line { from, to } => from.distance(*to),
            Piece::Quad(q) => q.arc_length(),
        }
    }

    fn start(&self) -> Vec2 {
        match self {
            Piece::Line { from, .. } => *from,
            Piece::Quad(q) => q.from,
        }
    }

    fn end(&self) -> Vec2 {
        match self {
            Piece::Line { to, .. } => *to,
            Piece::Quad(q) => q.to,
        }
    }

    fn start_tangent(&self) -> Vec2 {
        match self {
            Piece::Line { from, to } => (*to - *from).normalize_or_zero(),
            Piece::Quad(q) => q.tangent(0.0),
        }
    }

    fn end_tangent(&self) -> Vec2 {
        match self {
            Piece::Line { from, to } => (*to - *from).normalize_or_zero(),
            Piece::Quad(q) => q.tangent(1.0),
        }
    }

    /// Point and unit tangent at an arc length.
    fn frame_at(&self, s: f32, iterations: u32) -> (Vec2, Vec2) {
        match self {
            Piece::Line { from, to } => {
                let d = (*to - *from).normalize_or_zero();
                (*from + d * s, d)
            }
            Piece::Quad(q) => {
                let t = q.param_at_length(s, iterations);
                (q.eval(t), q.tangent(t))
            }
        }
    }

    /// The part between two arc lengths.
    fn slice(&self, s0: f32, s1: f32, iterations: u32) -> Self {
        match self {
            Piece::Line { from, to } => {
                let d = (*to - *from).normalize_or_zero();
                Piece::Line {
                    from: *from + d * s0,
                    to: *from + d * s1,
                }
            }
            Piece::Quad(q) => {
                let t0 = q.param_at_length(s0, iterations);
                let t1 = q.param_at_length(s1, iterations);
                Piece::Quad(q.subsegment(t0, t1))
            }
        }
    }
}

/// Pen position where the stroke continues: a join goes here if the next
/// piece picks up from it.
#[derive(Debug, Clone, Copy)]
struct PenEnd {
    point: Vec2,
    tangent: Vec2,
}

struct Stroker<'a> {
    style: &'a StrokeStyle,
    config: &'a TessellationConfig,
    half_width: f32,
    out: StrokeGeometry,
}

impl Stroker<'_> {
    fn body(&mut self, piece: &Piece) {
        match piece {
            Piece::Line { from, to } => self.line_body(*from, *to),
            Piece::Quad(q) => self.quad_body(q),
        }
    }

    fn line_body(&mut self, from: Vec2, to: Vec2) {
        let d = (to - from).normalize_or_zero();
        if d == Vec2::ZERO {
            return;
        }
        let n = normal(d) * self.half_width;
        self.out.solid.push_quad(
            (from + n).into(),
            (to + n).into(),
            (to - n).into(),
            (from - n).into(),
        );
    }

    /// Coverage quad of a quadratic: its bounding box in the chord frame,
    /// grown by half the stroke width.
    fn quad_body(&mut self, q: &QuadraticBezier) {
        let chord = q.to - q.from;
        let axis = if chord.length_squared() > LENGTH_EPSILON * LENGTH_EPSILON {
            chord.normalize()
        } else {
            (q.control - q.from).normalize_or_zero()
        };
        if axis == Vec2::ZERO {
            return;
        }
        let side = normal(axis);

        let local = |p: Vec2| Vec2::new((p - q.from).dot(axis), (p - q.from).dot(side));
        let mut min = local(q.from).min(local(q.to));
        let mut max = local(q.from).max(local(q.to));
        for direction in [axis, side] {
            if let Some(t) = q.extremum_along(direction) {
                let p = local(q.eval(t));
                min = min.min(p);
                max = max.max(p);
            }
        }
        min -= Vec2::splat(self.half_width);
        max += Vec2::splat(self.half_width);

        let world = |x: f32, y: f32| q.from + axis * x + side * y;
        let corners = [
            world(min.x, min.y),
            world(max.x, min.y),
            world(max.x, max.y),
            world(min.x, max.y),
        ];

        let basis = q.power_basis();
        let hw2 = self.half_width * self.half_width;
        let [c0, c1, c2, c3] = corners.map(|corner| {
            let depressed = nearest_point_cubic(basis.a, basis.b, basis.c, corner);
            StrokeCurveVertex {
                position: corner.into(),
                a: basis.a.into(),
                b: basis.b.into(),
                c: basis.c.into(),
                depressed: depressed.into(),
                half_width_sq: hw2,
            }
        });
        self.out.coverage.push_quad(c0, c1, c2, c3);
    }

    /// Join at `vertex` between an incoming and an outgoing unit tangent.
    fn join(&mut self, vertex: Vec2, incoming: Vec2, outgoing: Vec2) {
        let turn = cross(incoming, outgoing);
        let dot = incoming.dot(outgoing);
        if turn.abs() <= f32::EPSILON && dot > 0.0 {
            return;
        }

        // The outside of a left turn is on the right.
        let sign = if turn > 0.0 { -1.0 } else { 1.0 };
        let n0 = normal(incoming);
        let n1 = normal(outgoing);
        let outer0 = vertex + n0 * (sign * self.half_width);
        let outer1 = vertex + n1 * (sign * self.half_width);
        if outer0.distance(outer1) <= self.config.corner_epsilon {
            return;
        }

        match self.style.line_join {
            LineJoin::Bevel => self.bevel(vertex, outer0, outer1),
            LineJoin::Miter => {
                // Miter length over stroke width is 1 / cos(θ/2) for a turn of θ.
                let cos_half = ((1.0 + dot) * 0.5).max(0.0).sqrt();
                if cos_half <= f32::EPSILON || 1.0 / cos_half > self.style.miter_limit {
                    self.bevel(vertex, outer0, outer1);
                } else {
                    let tip = vertex + (n0 + n1) * (sign * self.half_width / (1.0 + dot));
                    self.out
                        .solid
                        .push_quad(tip.into(), outer0.into(), vertex.into(), outer1.into());
                }
            }
            LineJoin::Round => self.round_fan(vertex, outer0, outer1),
        }
    }

    fn bevel(&mut self, vertex: Vec2, outer0: Vec2, outer1: Vec2) {
        self.out
            .solid
            .push_triangle(outer0.into(), outer1.into(), vertex.into());
    }

    /// Fan around `center` from `from` to `to` along the shorter arc.
    fn round_fan(&mut self, center: Vec2, from: Vec2, to: Vec2) {
        let r0 = from - center;
        let r1 = to - center;
        let sweep = cross(r0, r1).atan2(r0.dot(r1));
        // Shave off rounding noise so exact multiples of the step do not gain
        // a sliver triangle.
        let steps = ((sweep.abs() / self.config.round_join_step - 1e-3).ceil() as usize).max(1);
        let start = r0.y.atan2(r0.x);
        let radius = r0.length();

        let mut prev = from;
        for i in 1..=steps {
            let next = if i == steps {
                to
            } else {
                let angle = start + sweep * i as f32 / steps as f32;
                center + Vec2::from_angle(angle) * radius
            };
            self.out
                .solid
                .push_triangle(center.into(), prev.into(), next.into());
            prev = next;
        }
    }

    /// Cap at `point`, with `direction` pointing away from the stroke.
    fn cap(&mut self, point: Vec2, direction: Vec2) {
        if direction == Vec2::ZERO {
            return;
        }
        let n = normal(direction) * self.half_width;
        let out = direction * self.half_width;
        match self.style.line_cap {
            LineCap::Butt => {}
            LineCap::Square => self.out.solid.push_quad(
                (point + n).into(),
                (point + n + out).into(),
                (point - n + out).into(),
                (point - n).into(),
            ),
            LineCap::Round => {
                let steps = self.config.round_cap_steps.max(1);
                let mut prev = point + n;
                for i in 1..=steps {
                    let phi = std::f32::consts::PI * i as f32 / steps as f32;
                    let next = point + n * phi.cos() + out * phi.sin();
                    self.out
                        .solid
                        .push_triangle(point.into(), prev.into(), next.into());
                    prev = next;
                }
            }
        }
    }

    fn subpath(&mut self, pieces: &[Piece], closed: bool, dasher: Option<&mut Dasher>) {
        let iterations = self.config.dash_bisection_iterations;
        let mut pen: Option<PenEnd> = None;

        let Some(dasher) = dasher else {
            let mut first_tangent = None;
            for piece in pieces {
                match pen {
                    Some(end) => self.join(end.point, end.tangent, piece.start_tangent()),
                    None if closed => first_tangent = Some(piece.start_tangent()),
                    None => self.cap(piece.start(), -piece.start_tangent()),
                }
                self.body(piece);
                pen = Some(PenEnd {
                    point: piece.end(),
                    tangent: piece.end_tangent(),
                });
            }
            if let Some(end) = pen {
                match first_tangent {
                    Some(first) => self.join(end.point, end.tangent, first),
                    None => self.cap(end.point, end.tangent),
                }
            }
            return;
        };

        for piece in pieces {
            let mut dashes = Vec::new();
            dasher.walk(piece.length(), |dash| dashes.push(dash));

            for dash in dashes {
                if dash.is_dot() {
                    if dash.starts_dash {
                        let (point, tangent) = piece.frame_at(dash.start, iterations);
                        self.cap(point, -tangent);
                        self.cap(point, tangent);
                    } else if dash.ends_dash {
                        if let Some(end) = pen.take() {
                            self.cap(end.point, end.tangent);
                        }
                    }
                    continue;
                }

                let part = piece.slice(dash.start, dash.end, iterations);
                match pen {
                    Some(end) if !dash.starts_dash => {
                        self.join(end.point, end.tangent, part.start_tangent());
                    }
                    _ => self.cap(part.start(), -part.start_tangent()),
                }
                self.body(&part);

                if dash.ends_dash {
                    self.cap(part.end(), part.end_tangent());
                    pen = None;
                } else {
                    pen = Some(PenEnd {
                        point: part.end(),
                        tangent: part.end_tangent(),
                    });
                }
            }
        }

        if let Some(end) = pen {
            self.cap(end.point, end.tangent);
        }
    }
}

/// Depressed form `(p, q)` of the cubic whose roots are the parameters of
/// the points of `A·t² + B·t + C` nearest to `point`.
///
/// Setting the derivative of the squared distance to zero gives
/// `a·t³ + b·t² + c·t + d = 0` with `a = 2A·A`, `b = 3A·B`,
/// `c = B·B + 2A·(C − P)` and `d = B·(C − P)`.
pub fn nearest_point_cubic(a: Vec2, b: Vec2, c: Vec2, point: Vec2) -> Vec2 {
    let offset = c - point;
    let ca = 2.0 * a.dot(a);
    let cb = 3.0 * a.dot(b);
    let cc = b.dot(b) + 2.0 * a.dot(offset);
    let cd = b.dot(offset);
    if ca.abs() <= f32::EPSILON {
        return Vec2::ZERO;
    }
    let p = (3.0 * ca * cc - cb * cb) / (3.0 * ca * ca);
    let q = (2.0 * cb * cb * cb - 9.0 * ca * cb * cc + 27.0 * ca * ca * cd) / (27.0 * ca * ca * ca);
    Vec2::new(p, q)
}

/// Tessellate canonical subpaths into stroke geometry.
pub fn tessellate_stroke(
    subpaths: &SubpathArena,
    style: &StrokeStyle,
    config: &TessellationConfig,
) -> StrokeGeometry {
    let mut stroker = Stroker {
        style,
        config,
        half_width: style.half_width(),
        out: StrokeGeometry::new(),
    };
    if !style.is_visible() {
        return stroker.out;
    }

    let mut dasher = style.dash.as_ref().and_then(Dasher::new);

    for (i, subpath) in subpaths.iter().enumerate() {
        let pieces: Vec<Piece> = subpath.segments().filter_map(Piece::from_segment).collect();
        if pieces.is_empty() {
            tracing::trace!(subpath = subpath.id.0, "skipping subpath without length");
            continue;
        }
        if let Some(dasher) = dasher.as_mut() {
            if i == 0 || dasher.phase_reset() {
                dasher.reset();
            }
        }
        stroker.subpath(&pieces, subpath.is_closed(), dasher.as_mut());
    }

    tracing::debug!(
        solid = stroker.out.solid.triangle_count(),
        coverage = stroker.out.coverage.triangle_count(),
        "tessellated stroke"
    );

    stroker.out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DashPattern, Opcode, RawPath, Segment, normalize};

    fn stroke(commands: &[(Opcode, &[f32])], style: &StrokeStyle) -> StrokeGeometry {
        let mut raw = RawPath::new();
        for (op, coords) in commands {
            raw.push(Segment::abs(*op), coords).unwrap();
        }
        tessellate_stroke(&normalize(&raw), style, &TessellationConfig::default())
    }

    const TRIANGLE: &[(Opcode, &[f32])] = &[
        (Opcode::MoveTo, &[0.0, 0.0]),
        (Opcode::LineTo, &[10.0, 0.0]),
        (Opcode::LineTo, &[10.0, 10.0]),
        (Opcode::Close, &[]),
    ];

    #[test]
    fn test_line_is_one_quad() {
        let geometry = stroke(
            &[(Opcode::MoveTo, &[0.0, 0.0]), (Opcode::LineTo, &[10.0, 0.0])],
            &StrokeStyle::new(2.0),
        );
        assert_eq!(geometry.solid.triangle_count(), 2);
        assert!(geometry.coverage.is_empty());
        assert!((geometry.solid.signed_area().abs() - 20.0).abs() < 1e-4);
        let ys: Vec<f32> = geometry.solid.vertices.iter().map(|v| v.position[1]).collect();
        assert!(ys.iter().all(|y| (y.abs() - 1.0).abs() < 1e-6));
    }

    #[test]
    fn test_closed_triangle_bevel() {
        let geometry = stroke(TRIANGLE, &StrokeStyle::new(2.0).with_line_join(LineJoin::Bevel));
        // 3 body quads plus one bevel triangle per corner.
        assert_eq!(geometry.solid.triangle_count(), 6 + 3);
    }

    #[test]
    fn test_bevel_on_outer_side() {
        let geometry = stroke(
            &[
                (Opcode::MoveTo, &[0.0, 0.0]),
                (Opcode::LineTo, &[10.0, 0.0]),
                (Opcode::LineTo, &[10.0, 10.0]),
            ],
            &StrokeStyle::new(2.0).with_line_join(LineJoin::Bevel),
        );
        assert_eq!(geometry.solid.triangle_count(), 5);
        let bevel = geometry.solid.triangles().nth(2).unwrap();
        let points: Vec<Vec2> = bevel.iter().map(|v| Vec2::from(v.position)).collect();
        // Left turn: the outer corners lie below and right of the vertex.
        assert_eq!(points, vec![
            Vec2::new(10.0, -1.0),
            Vec2::new(11.0, 0.0),
            Vec2::new(10.0, 0.0),
        ]);
    }

    #[test]
    fn test_miter_and_limit() {
        let corner: &[(Opcode, &[f32])] = &[
            (Opcode::MoveTo, &[0.0, 0.0]),
            (Opcode::LineTo, &[10.0, 0.0]),
            (Opcode::LineTo, &[10.0, 10.0]),
        ];
        let miter = stroke(corner, &StrokeStyle::new(2.0).with_line_join(LineJoin::Miter));
        assert_eq!(miter.solid.triangle_count(), 6);
        let tip = miter.solid.vertices[4];
        assert!((Vec2::from(tip.position) - Vec2::new(11.0, -1.0)).length() < 1e-5);

        // A right angle needs a limit of √2.
        let limited = stroke(
            corner,
            &StrokeStyle::new(2.0)
                .with_line_join(LineJoin::Miter)
                .with_miter_limit(1.2),
        );
        assert_eq!(limited.solid.triangle_count(), 5);
    }

    #[test]
    fn test_round_join_fan() {
        let geometry = stroke(
            &[
                (Opcode::MoveTo, &[0.0, 0.0]),
                (Opcode::LineTo, &[10.0, 0.0]),
                (Opcode::LineTo, &[10.0, 10.0]),
            ],
            &StrokeStyle::new(2.0).with_line_join(LineJoin::Round),
        );
        // A quarter turn in π/12 steps.
        assert_eq!(geometry.solid.triangle_count(), 4 + 6);
    }

    #[test]
    fn test_collinear_no_join() {
        let geometry = stroke(
            &[
                (Opcode::MoveTo, &[0.0, 0.0]),
                (Opcode::LineTo, &[5.0, 0.0]),
                (Opcode::LineTo, &[10.0, 0.0]),
            ],
            &StrokeStyle::new(2.0).with_line_join(LineJoin::Round),
        );
        assert_eq!(geometry.solid.triangle_count(), 4);
    }

    #[test]
    fn test_caps() {
        let line: &[(Opcode, &[f32])] =
            &[(Opcode::MoveTo, &[0.0, 0.0]), (Opcode::LineTo, &[10.0, 0.0])];

        let square = stroke(line, &StrokeStyle::new(2.0).with_line_cap(LineCap::Square));
        assert_eq!(square.solid.triangle_count(), 2 + 4);
        let xs: Vec<f32> = square.solid.vertices.iter().map(|v| v.position[0]).collect();
        assert!(xs.iter().any(|x| (*x + 1.0).abs() < 1e-6));
        assert!(xs.iter().any(|x| (*x - 11.0).abs() < 1e-6));

        let round = stroke(line, &StrokeStyle::new(2.0).with_line_cap(LineCap::Round));
        assert_eq!(round.solid.triangle_count(), 2 + 2 * 12);

        // Closed, undashed subpaths have no caps.
        let closed = stroke(
            TRIANGLE,
            &StrokeStyle::new(2.0)
                .with_line_cap(LineCap::Square)
                .with_line_join(LineJoin::Bevel),
        );
        assert_eq!(closed.solid.triangle_count(), 9);
    }

    #[test]
    fn test_dashed_line() {
        let geometry = stroke(
            &[(Opcode::MoveTo, &[0.0, 0.0]), (Opcode::LineTo, &[100.0, 0.0])],
            &StrokeStyle::new(2.0).dashed(10.0, 5.0),
        );
        // Seven dashes, each one quad.
        assert_eq!(geometry.solid.triangle_count(), 14);
        let max_x = geometry
            .solid
            .vertices
            .iter()
            .map(|v| v.position[0])
            .fold(f32::MIN, f32::max);
        assert_eq!(max_x, 100.0);
    }

    #[test]
    fn test_dashes_get_caps() {
        let geometry = stroke(
            &[(Opcode::MoveTo, &[0.0, 0.0]), (Opcode::LineTo, &[25.0, 0.0])],
            &StrokeStyle::new(2.0)
                .dashed(10.0, 5.0)
                .with_line_cap(LineCap::Square),
        );
        // Two dashes, each a body quad and two square caps.
        assert_eq!(geometry.solid.triangle_count(), 2 * (2 + 4));
    }

    #[test]
    fn test_dash_continues_around_corner() {
        let geometry = stroke(
            &[
                (Opcode::MoveTo, &[0.0, 0.0]),
                (Opcode::LineTo, &[5.0, 0.0]),
                (Opcode::LineTo, &[5.0, 5.0]),
            ],
            &StrokeStyle::new(2.0)
                .with_dash(DashPattern::new(vec![8.0, 100.0], 0.0))
                .with_line_join(LineJoin::Bevel),
        );
        // One dash bending around the corner: two bodies and a bevel.
        assert_eq!(geometry.solid.triangle_count(), 5);
    }

    #[test]
    fn test_dash_ending_at_corner_is_capped() {
        let style = StrokeStyle::new(2.0)
            .with_dash(DashPattern::new(vec![10.0, 5.0], 0.0))
            .with_line_cap(LineCap::Square)
            .with_line_join(LineJoin::Bevel);

        for corner in [10.0, 9.999999] {
            let geometry = stroke(
                &[
                    (Opcode::MoveTo, &[0.0, 0.0]),
                    (Opcode::LineTo, &[corner, 0.0]),
                    (Opcode::LineTo, &[corner, 20.0]),
                ],
                &style,
            );
            // Dashes 0..10 and 5..15 on the second leg: two bodies and
            // four square caps, no join.
            assert_eq!(geometry.solid.triangle_count(), 2 * 2 + 4 * 2, "corner at {corner}");
        }
    }

    #[test]
    fn test_phase_reset_per_subpath() {
        let two_lines: &[(Opcode, &[f32])] = &[
            (Opcode::MoveTo, &[0.0, 0.0]),
            (Opcode::LineTo, &[12.0, 0.0]),
            (Opcode::MoveTo, &[0.0, 10.0]),
            (Opcode::LineTo, &[12.0, 10.0]),
        ];
        let pattern = DashPattern::new(vec![10.0, 5.0], 0.0);

        // Carried over: the second line starts 3 units into the gap.
        let carried = stroke(two_lines, &StrokeStyle::new(2.0).with_dash(pattern.clone()));
        let second_min_x = carried
            .solid
            .vertices
            .iter()
            .filter(|v| v.position[1] > 5.0)
            .map(|v| v.position[0])
            .fold(f32::MAX, f32::min);
        assert_eq!(second_min_x, 3.0);

        let reset = stroke(
            two_lines,
            &StrokeStyle::new(2.0).with_dash(pattern.with_phase_reset(true)),
        );
        let second_min_x = reset
            .solid
            .vertices
            .iter()
            .filter(|v| v.position[1] > 5.0)
            .map(|v| v.position[0])
            .fold(f32::MAX, f32::min);
        assert_eq!(second_min_x, 0.0);
    }

    #[test]
    fn test_quad_coverage_corners() {
        let geometry = stroke(
            &[
                (Opcode::MoveTo, &[0.0, 0.0]),
                (Opcode::QuadTo, &[50.0, 100.0, 100.0, 0.0]),
            ],
            &StrokeStyle::new(4.0),
        );
        assert!(geometry.solid.is_empty());
        assert_eq!(geometry.coverage.triangle_count(), 2);

        let corners: Vec<Vec2> = geometry
            .coverage
            .vertices
            .iter()
            .map(|v| Vec2::from(v.position))
            .collect();
        // Box from the curve's extremum (y = 50) grown by the half width.
        let min = corners.iter().fold(Vec2::MAX, |m, p| m.min(*p));
        let max = corners.iter().fold(Vec2::MIN, |m, p| m.max(*p));
        assert!((min - Vec2::new(-2.0, -2.0)).length() < 1e-4);
        assert!((max - Vec2::new(102.0, 52.0)).length() < 1e-4);

        for v in &geometry.coverage.vertices {
            assert_eq!(v.a, [0.0, -200.0]);
            assert_eq!(v.b, [100.0, 200.0]);
            assert_eq!(v.c, [0.0, 0.0]);
            assert_eq!(v.half_width_sq, 4.0);
        }
    }

    #[test]
    fn test_nearest_point_cubic_root() {
        let q = QuadraticBezier::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(50.0, 100.0),
            Vec2::new(100.0, 0.0),
        );
        let basis = q.power_basis();
        // The apex is nearest to a point straight above it, at t = 0.5.
        let pq = nearest_point_cubic(basis.a, basis.b, basis.c, Vec2::new(50.0, 80.0));
        let a = 2.0 * basis.a.dot(basis.a);
        let b = 3.0 * basis.a.dot(basis.b);
        let x = 0.5 + b / (3.0 * a);
        let residual = x * x * x + pq.x * x + pq.y;
        assert!(residual.abs() < 1e-4);
    }

    #[test]
    fn test_linear_quad_stroked_as_line() {
        let geometry = stroke(
            &[
                (Opcode::MoveTo, &[0.0, 0.0]),
                (Opcode::QuadTo, &[5.0, 0.0, 10.0, 0.0]),
            ],
            &StrokeStyle::new(2.0),
        );
        assert!(geometry.coverage.is_empty());
        assert_eq!(geometry.solid.triangle_count(), 2);
    }

    #[test]
    fn test_zero_length_skipped() {
        let geometry = stroke(
            &[
                (Opcode::MoveTo, &[3.0, 3.0]),
                (Opcode::LineTo, &[3.0, 3.0]),
            ],
            &StrokeStyle::new(2.0).with_line_cap(LineCap::Round),
        );
        assert!(geometry.is_empty());
    }
}
