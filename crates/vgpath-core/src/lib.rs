//! vgpath Core
//!
//! Shared plumbing for the vgpath crates: logging setup, profiling scopes,
//! math re-exports and small geometric value types.

pub mod geometry;
pub mod logging;
pub mod math;
pub mod profiling;
