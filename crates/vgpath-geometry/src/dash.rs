//! Arc-length dashing.
//!
//! A [`Dasher`] walks a dash pattern along consecutive segments of a
//! subpath, handing out the "on" intervals of each segment in arc-length
//! coordinates local to that segment. Its cursor carries over from one
//! segment to the next so dashes continue around corners.

use crate::DashPattern;

const EPSILON: f32 = 1e-5;

/// Position within a dash pattern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashCursor {
    /// Current pattern entry. Even entries are "on".
    pub index: usize,
    /// Length left in the current entry.
    pub remaining: f32,
    pub on: bool,
    /// The current "on" entry has not produced a piece yet.
    pub fresh: bool,
}

/// One "on" interval of a segment, in arc length from the segment start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashPiece {
    pub start: f32,
    pub end: f32,
    /// A dash begins here (rather than continuing from the previous
    /// segment).
    pub starts_dash: bool,
    /// The dash ends here (rather than continuing into the next segment).
    pub ends_dash: bool,
}

impl DashPiece {
    /// Zero-length dash; drawn by its caps alone.
    pub fn is_dot(&self) -> bool {
        self.end - self.start <= EPSILON
    }
}

/// Dash pattern walker.
#[derive(Debug, Clone)]
pub struct Dasher {
    pattern: Vec<f32>,
    phase: f32,
    phase_reset: bool,
    cursor: DashCursor,
}

impl Dasher {
    /// `None` when the pattern does not dash (see
    /// [`DashPattern::effective_pattern`]).
    pub fn new(dash: &DashPattern) -> Option<Self> {
        let (pattern, total) = dash.effective_pattern()?;
        let phase = if dash.phase.is_finite() {
            dash.phase.rem_euclid(total)
        } else {
            0.0
        };
        let mut dasher = Self {
            pattern,
            phase,
            phase_reset: dash.phase_reset,
            cursor: DashCursor {
                index: 0,
                remaining: 0.0,
                on: true,
                fresh: true,
            },
        };
        dasher.reset();
        Some(dasher)
    }

    pub fn cursor(&self) -> DashCursor {
        self.cursor
    }

    pub fn phase_reset(&self) -> bool {
        self.phase_reset
    }

    /// Move the cursor back to the phase offset.
    pub fn reset(&mut self) {
        let mut offset = self.phase;
        let mut index = 0;
        for _ in 0..self.pattern.len() {
            let d = self.pattern[index];
            if offset <= 0.0 || offset < d {
                break;
            }
            offset -= d;
            index = (index + 1) % self.pattern.len();
        }
        self.cursor = DashCursor {
            index,
            remaining: (self.pattern[index] - offset).max(0.0),
            on: index % 2 == 0,
            fresh: true,
        };
    }

    fn advance(&mut self) {
        let index = (self.cursor.index + 1) % self.pattern.len();
        self.cursor = DashCursor {
            index,
            remaining: self.pattern[index],
            on: index % 2 == 0,
            fresh: true,
        };
    }

    /// Walk a segment of the given arc length, emitting its "on" pieces in
    /// order.
    pub fn walk(&mut self, length: f32, mut emit: impl FnMut(DashPiece)) {
        let mut pos = 0.0f32;
        // Every full pattern cycle consumes a positive length, so this
        // bounds the zero-length entries that can be crossed without moving.
        let mut idle = 0;

        loop {
            if self.cursor.remaining <= EPSILON {
                if self.cursor.on && self.cursor.fresh {
                    emit(DashPiece {
                        start: pos,
                        end: pos,
                        starts_dash: true,
                        ends_dash: true,
                    });
                }
                self.advance();
                idle += 1;
                if idle > self.pattern.len() {
                    break;
                }
                continue;
            }
            if pos >= length {
                break;
            }
            idle = 0;

            let step = self.cursor.remaining.min(length - pos);
            let ends_dash = self.cursor.remaining - step <= EPSILON;
            if step <= EPSILON && !ends_dash {
                // Sliver at the segment end; the entry carries on into the
                // next segment untouched.
                break;
            }
            if self.cursor.on {
                emit(DashPiece {
                    start: pos,
                    end: pos + step,
                    starts_dash: self.cursor.fresh,
                    ends_dash,
                });
                self.cursor.fresh = false;
            }
            pos += step;
            self.cursor.remaining -= step;
        }
    }
}
