//! Shared geometry types.
//!
//! ## Modules
//!
//! - [`geometry`]: planar points and axis-aligned bounds used by the planner and preview.

pub mod geometry;

pub use geometry::*;
