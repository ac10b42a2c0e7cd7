//! Canonical subpath storage.
//!
//! After normalization a path is a sequence of disjoint subpaths made only
//! of absolute move, line, quadratic and close operations. All subpaths of a
//! path share two flat buffers; each subpath is an index range into them.

use std::ops::Range;

use glam::Vec2;

use crate::QuadraticBezier;

/// Canonical operation. Operands live in the arena's point buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalOp {
    /// One point.
    Move,
    /// One point.
    Line,
    /// Control point then end point.
    Quad,
    /// No operands.
    Close,
}

impl CanonicalOp {
    pub const fn point_count(self) -> usize {
        match self {
            CanonicalOp::Move | CanonicalOp::Line => 1,
            CanonicalOp::Quad => 2,
            CanonicalOp::Close => 0,
        }
    }
}

/// Handle to a subpath inside a [`SubpathArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubpathId(pub u32);

#[derive(Debug, Clone, PartialEq, Eq)]
struct SubpathRecord {
    ops: Range<usize>,
    points: Range<usize>,
}

/// Arena of canonical subpaths.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubpathArena {
    ops: Vec<CanonicalOp>,
    points: Vec<Vec2>,
    records: Vec<SubpathRecord>,
}

impl SubpathArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.ops.clear();
        self.points.clear();
        self.records.clear();
    }

    /// Number of subpaths.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: SubpathId) -> Option<Subpath<'_>> {
        let record = self.records.get(id.0 as usize)?;
        Some(Subpath {
            id,
            ops: &self.ops[record.ops.clone()],
            points: &self.points[record.points.clone()],
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = Subpath<'_>> + '_ {
        (0..self.records.len()).filter_map(|i| self.get(SubpathId(i as u32)))
    }

    /// Start a new record with a move.
    pub(crate) fn begin(&mut self, point: Vec2) -> SubpathId {
        let id = SubpathId(self.records.len() as u32);
        self.records.push(SubpathRecord {
            ops: self.ops.len()..self.ops.len(),
            points: self.points.len()..self.points.len(),
        });
        self.push(CanonicalOp::Move, &[point]);
        id
    }

    /// Append an operation to the last record.
    pub(crate) fn push(&mut self, op: CanonicalOp, points: &[Vec2]) {
        debug_assert_eq!(points.len(), op.point_count());
        let Some(record) = self.records.last_mut() else {
            return;
        };
        self.ops.push(op);
        self.points.extend_from_slice(points);
        record.ops.end = self.ops.len();
        record.points.end = self.points.len();
    }

    /// Replace the point of a record that holds only its move.
    pub(crate) fn replace_move(&mut self, point: Vec2) {
        if let Some(record) = self.records.last() {
            if record.ops.len() == 1 {
                self.points[record.points.start] = point;
            }
        }
    }
}

/// Borrowed view of one canonical subpath.
#[derive(Debug, Clone, Copy)]
pub struct Subpath<'a> {
    pub id: SubpathId,
    ops: &'a [CanonicalOp],
    points: &'a [Vec2],
}

/// Drawing segment of a canonical subpath, with its start point resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SubpathSegment {
    Line { from: Vec2, to: Vec2 },
    Quad(QuadraticBezier),
    /// Implicit line back to the subpath start.
    Close { from: Vec2, to: Vec2 },
}

impl SubpathSegment {
    pub fn from(&self) -> Vec2 {
        match self {
            SubpathSegment::Line { from, .. } | SubpathSegment::Close { from, .. } => *from,
            SubpathSegment::Quad(q) => q.from,
        }
    }

    pub fn to(&self) -> Vec2 {
        match self {
            SubpathSegment::Line { to, .. } | SubpathSegment::Close { to, .. } => *to,
            SubpathSegment::Quad(q) => q.to,
        }
    }
}

impl<'a> Subpath<'a> {
    pub fn ops(&self) -> &'a [CanonicalOp] {
        self.ops
    }

    pub fn points(&self) -> &'a [Vec2] {
        self.points
    }

    pub fn start_point(&self) -> Vec2 {
        self.points.first().copied().unwrap_or(Vec2::ZERO)
    }

    pub fn is_closed(&self) -> bool {
        self.ops.last() == Some(&CanonicalOp::Close)
    }

    /// Drawing segments in order, skipping the leading move.
    pub fn segments(&self) -> SubpathSegments<'a> {
        SubpathSegments {
            ops: self.ops.iter(),
            points: self.points,
            cursor: 0,
            start: self.start_point(),
            current: self.start_point(),
        }
    }
}

/// Iterator over the segments of a [`Subpath`].
#[derive(Debug, Clone)]
pub struct SubpathSegments<'a> {
    ops: std::slice::Iter<'a, CanonicalOp>,
    points: &'a [Vec2],
    cursor: usize,
    start: Vec2,
    current: Vec2,
}

impl Iterator for SubpathSegments<'_> {
    type Item = SubpathSegment;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let op = *self.ops.next()?;
            let operands = &self.points[self.cursor..self.cursor + op.point_count()];
            self.cursor += op.point_count();
            let from = self.current;

            let segment = match op {
                CanonicalOp::Move => {
                    self.start = operands[0];
                    self.current = operands[0];
                    continue;
                }
                CanonicalOp::Line => SubpathSegment::Line {
                    from,
                    to: operands[0],
                },
                CanonicalOp::Quad => {
                    SubpathSegment::Quad(QuadraticBezier::new(from, operands[0], operands[1]))
                }
                CanonicalOp::Close => SubpathSegment::Close {
                    from,
                    to: self.start,
                },
            };
            self.current = segment.to();
            return Some(segment);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_are_ranges() {
        let mut arena = SubpathArena::new();
        arena.begin(Vec2::ZERO);
        arena.push(CanonicalOp::Line, &[Vec2::new(1.0, 0.0)]);
        arena.push(CanonicalOp::Close, &[]);
        let second = arena.begin(Vec2::new(5.0, 5.0));
        arena.push(
            CanonicalOp::Quad,
            &[Vec2::new(6.0, 6.0), Vec2::new(7.0, 5.0)],
        );

        assert_eq!(arena.len(), 2);
        let first = arena.get(SubpathId(0)).unwrap();
        assert!(first.is_closed());
        assert_eq!(first.ops().len(), 3);

        let quad = arena.get(second).unwrap();
        assert!(!quad.is_closed());
        assert_eq!(quad.start_point(), Vec2::new(5.0, 5.0));
        assert_eq!(quad.points().len(), 3);
        assert!(arena.get(SubpathId(2)).is_none());
    }

    #[test]
    fn test_segments_resolve_start_points() {
        let mut arena = SubpathArena::new();
        arena.begin(Vec2::ZERO);
        arena.push(CanonicalOp::Line, &[Vec2::new(10.0, 0.0)]);
        arena.push(
            CanonicalOp::Quad,
            &[Vec2::new(10.0, 10.0), Vec2::new(0.0, 10.0)],
        );
        arena.push(CanonicalOp::Close, &[]);

        let subpath = arena.get(SubpathId(0)).unwrap();
        let segments: Vec<_> = subpath.segments().collect();
        assert_eq!(segments.len(), 3);
        assert_eq!(
            segments[0],
            SubpathSegment::Line {
                from: Vec2::ZERO,
                to: Vec2::new(10.0, 0.0)
            }
        );
        assert_eq!(segments[1].from(), Vec2::new(10.0, 0.0));
        assert_eq!(
            segments[2],
            SubpathSegment::Close {
                from: Vec2::new(0.0, 10.0),
                to: Vec2::ZERO
            }
        );
    }

    #[test]
    fn test_replace_move_only_when_pending() {
        let mut arena = SubpathArena::new();
        arena.begin(Vec2::ZERO);
        arena.replace_move(Vec2::ONE);
        assert_eq!(arena.get(SubpathId(0)).unwrap().start_point(), Vec2::ONE);

        arena.push(CanonicalOp::Line, &[Vec2::new(2.0, 2.0)]);
        arena.replace_move(Vec2::new(9.0, 9.0));
        assert_eq!(arena.get(SubpathId(0)).unwrap().start_point(), Vec2::ONE);
    }
}
