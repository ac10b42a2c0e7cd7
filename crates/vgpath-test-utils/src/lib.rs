//! Test utilities for vgpath crates.
//!
//! Shared fixtures and float-tolerant assertions for the integration tests
//! and benchmarks of the vgpath workspace.
//!
//! - [`fixtures`] - Canonical paths used across tests (squares, circles,
//!   dashed lines, raw OpenVG data)
//! - [`assertions`] - Approximate comparisons for scalars, points and
//!   rectangles
//! - [`mesh_check`] - Structural checks on tessellated meshes
//!
//! # Example
//!
//! ```rust
//! use vgpath_test_utils::{assert_approx_eq, fixtures};
//!
//! let mut path = fixtures::square(10.0).build();
//! let bounds = path.query_bounds(false);
//! assert_approx_eq!(bounds.width, 10.0);
//! ```

pub mod assertions;
pub mod fixtures;
pub mod mesh_check;

// Re-export main types at crate root
pub use assertions::*;
pub use mesh_check::*;
