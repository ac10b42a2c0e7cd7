//! Raw path command streams.
//!
//! A [`RawPath`] is the authored form of a path: a list of segment records
//! and a flat coordinate buffer, exactly as an OpenVG client hands them over.
//! Every segment consumes a fixed number of coordinates determined by its
//! [`Opcode`].

use crate::{PathDataError, PathDataResult};

/// Path command kind, numbered as in the OpenVG segment encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    Close = 0,
    MoveTo = 1,
    LineTo = 2,
    HLineTo = 3,
    VLineTo = 4,
    QuadTo = 5,
    CubicTo = 6,
    SmoothQuadTo = 7,
    SmoothCubicTo = 8,
    /// Small counter-clockwise arc.
    SccwArcTo = 9,
    /// Small clockwise arc.
    ScwArcTo = 10,
    /// Large counter-clockwise arc.
    LccwArcTo = 11,
    /// Large clockwise arc.
    LcwArcTo = 12,
}

impl Opcode {
    /// Number of coordinates the command consumes.
    pub const fn coord_count(self) -> usize {
        match self {
            Opcode::Close => 0,
            Opcode::MoveTo | Opcode::LineTo | Opcode::SmoothQuadTo => 2,
            Opcode::HLineTo | Opcode::VLineTo => 1,
            Opcode::QuadTo | Opcode::SmoothCubicTo => 4,
            Opcode::CubicTo => 6,
            Opcode::SccwArcTo | Opcode::ScwArcTo | Opcode::LccwArcTo | Opcode::LcwArcTo => 5,
        }
    }

    /// Decode the command part of a segment byte (`byte >> 1`).
    pub const fn from_command(command: u8) -> Option<Self> {
        Some(match command {
            0 => Opcode::Close,
            1 => Opcode::MoveTo,
            2 => Opcode::LineTo,
            3 => Opcode::HLineTo,
            4 => Opcode::VLineTo,
            5 => Opcode::QuadTo,
            6 => Opcode::CubicTo,
            7 => Opcode::SmoothQuadTo,
            8 => Opcode::SmoothCubicTo,
            9 => Opcode::SccwArcTo,
            10 => Opcode::ScwArcTo,
            11 => Opcode::LccwArcTo,
            12 => Opcode::LcwArcTo,
            _ => return None,
        })
    }

    /// `(large_arc, sweep)` flags for the four arc commands.
    ///
    /// Counter-clockwise arcs sweep in the positive angle direction.
    pub const fn arc_flags(self) -> Option<(bool, bool)> {
        match self {
            Opcode::SccwArcTo => Some((false, true)),
            Opcode::ScwArcTo => Some((false, false)),
            Opcode::LccwArcTo => Some((true, true)),
            Opcode::LcwArcTo => Some((true, false)),
            _ => None,
        }
    }

    /// Arc command for the given `(large_arc, sweep)` flags.
    pub const fn arc(large_arc: bool, sweep: bool) -> Self {
        match (large_arc, sweep) {
            (false, true) => Opcode::SccwArcTo,
            (false, false) => Opcode::ScwArcTo,
            (true, true) => Opcode::LccwArcTo,
            (true, false) => Opcode::LcwArcTo,
        }
    }
}

/// Whether a segment's coordinates are absolute or relative to the current
/// point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Addressing {
    #[default]
    Absolute,
    Relative,
}

/// One segment record of a raw path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment {
    pub opcode: Opcode,
    pub addressing: Addressing,
}

impl Segment {
    /// Absolute segment.
    pub const fn abs(opcode: Opcode) -> Self {
        Self {
            opcode,
            addressing: Addressing::Absolute,
        }
    }

    /// Relative segment.
    pub const fn rel(opcode: Opcode) -> Self {
        Self {
            opcode,
            addressing: Addressing::Relative,
        }
    }

    pub const fn is_relative(self) -> bool {
        matches!(self.addressing, Addressing::Relative)
    }

    /// Decode an OpenVG segment byte (`command << 1 | relative`).
    pub fn from_vg_byte(byte: u8) -> PathDataResult<Self> {
        let opcode = Opcode::from_command(byte >> 1).ok_or(PathDataError::UnknownSegment(byte))?;
        let addressing = if byte & 1 == 1 {
            Addressing::Relative
        } else {
            Addressing::Absolute
        };
        Ok(Self { opcode, addressing })
    }

    /// Encode as an OpenVG segment byte.
    pub const fn to_vg_byte(self) -> u8 {
        ((self.opcode as u8) << 1) | (self.is_relative() as u8)
    }
}

/// An authored path: segment records plus their flat coordinate buffer.
///
/// The coordinate buffer always holds exactly the operands of every segment,
/// so iteration can hand out fixed-size slices without bounds surprises.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawPath {
    segments: Vec<Segment>,
    coords: Vec<f32>,
}

impl RawPath {
    /// Create a new empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode OpenVG segment bytes and their coordinates.
    pub fn from_vg_segments(segments: &[u8], coords: &[f32]) -> PathDataResult<Self> {
        let mut path = RawPath {
            segments: Vec::with_capacity(segments.len()),
            coords: Vec::with_capacity(coords.len()),
        };
        let mut cursor = 0;

        for (index, byte) in segments.iter().enumerate() {
            let segment = Segment::from_vg_byte(*byte)?;
            let expected = segment.opcode.coord_count();
            let available = coords.len() - cursor;
            if available < expected {
                return Err(PathDataError::MissingCoordinates {
                    index,
                    opcode: segment.opcode,
                    expected,
                    available,
                });
            }
            path.segments.push(segment);
            path.coords
                .extend_from_slice(&coords[cursor..cursor + expected]);
            cursor += expected;
        }

        if cursor != coords.len() {
            return Err(PathDataError::TrailingCoordinates(coords.len() - cursor));
        }

        Ok(path)
    }

    /// Append one segment with its operands.
    pub fn push(&mut self, segment: Segment, coords: &[f32]) -> PathDataResult<()> {
        let expected = segment.opcode.coord_count();
        if coords.len() < expected {
            return Err(PathDataError::MissingCoordinates {
                index: self.segments.len(),
                opcode: segment.opcode,
                expected,
                available: coords.len(),
            });
        }
        if coords.len() > expected {
            return Err(PathDataError::TrailingCoordinates(coords.len() - expected));
        }
        self.push_unchecked(segment, coords);
        Ok(())
    }

    /// Append a segment whose operand count is known to be right.
    pub(crate) fn push_unchecked(&mut self, segment: Segment, coords: &[f32]) {
        debug_assert_eq!(coords.len(), segment.opcode.coord_count());
        self.segments.push(segment);
        self.coords.extend_from_slice(coords);
    }

    /// Append all segments of another path.
    pub fn append(&mut self, other: &RawPath) {
        self.segments.extend_from_slice(&other.segments);
        self.coords.extend_from_slice(&other.coords);
    }

    /// Remove all segments.
    pub fn clear(&mut self) {
        self.segments.clear();
        self.coords.clear();
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn coords(&self) -> &[f32] {
        &self.coords
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segment bytes in OpenVG encoding.
    pub fn to_vg_segments(&self) -> Vec<u8> {
        self.segments.iter().map(|s| s.to_vg_byte()).collect()
    }

    /// Iterate over segments together with their operands.
    pub fn iter(&self) -> RawSegments<'_> {
        RawSegments {
            segments: self.segments.iter(),
            coords: &self.coords,
        }
    }
}

/// Iterator over `(segment, operands)` pairs of a [`RawPath`].
#[derive(Debug, Clone)]
pub struct RawSegments<'a> {
    segments: std::slice::Iter<'a, Segment>,
    coords: &'a [f32],
}

impl<'a> Iterator for RawSegments<'a> {
    type Item = (Segment, &'a [f32]);

    fn next(&mut self) -> Option<Self::Item> {
        let segment = *self.segments.next()?;
        let (operands, rest) = self.coords.split_at(segment.opcode.coord_count());
        self.coords = rest;
        Some((segment, operands))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.segments.size_hint()
    }
}

impl<'a> IntoIterator for &'a RawPath {
    type Item = (Segment, &'a [f32]);
    type IntoIter = RawSegments<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
