//! vgpath Geometry - path tessellation for stencil-and-cover rendering
//!
//! This crate provides:
//! - Raw OpenVG-style path command streams and a fluent path builder
//! - Normalization into canonical move/line/quadratic/close subpaths
//! - Adaptive curve flattening with a bounded explicit stack
//! - Fill tessellation into front/back winding buckets
//! - Stroke tessellation with dashing, joins, caps and curve coverage
//! - Cached path objects with bounds queries
//!
//! # Example
//!
//! ```
//! use glam::Vec2;
//! use vgpath_geometry::*;
//!
//! let mut builder = PathBuilder::new();
//! builder
//!     .move_to(Vec2::new(0.0, 0.0))
//!     .line_to(Vec2::new(100.0, 0.0))
//!     .quad_to(Vec2::new(150.0, 50.0), Vec2::new(100.0, 100.0))
//!     .close();
//!
//! let mut path = builder
//!     .build()
//!     .with_stroke_style(StrokeStyle::new(4.0).with_line_join(LineJoin::Round));
//!
//! let fill = path.fill_geometry();
//! assert!(!fill.is_empty());
//! let stroke = path.stroke_geometry();
//! assert!(!stroke.solid.is_empty());
//! let bounds = path.query_bounds(false);
//! assert!(bounds.width > 0.0);
//! ```

// Path data
mod command;
mod error;
mod path;
mod subpath;

// Curves
mod arc;
mod curve;
mod transform;

// Pipeline stages
mod config;
mod flatten;
mod normalize;

// Tessellation
mod bounds;
mod dash;
mod fill;
mod stroke;
mod stroker;
mod tessellator;
mod vertex;

// Re-exports
pub use command::*;
pub use error::*;
pub use path::*;
pub use subpath::*;

pub use arc::*;
pub use curve::*;
pub use transform::*;

pub use config::*;
pub use flatten::*;
pub use normalize::*;

pub use bounds::*;
pub use dash::*;
pub use fill::*;
pub use stroke::*;
pub use stroker::*;
pub use tessellator::*;
pub use vertex::*;
