//! # DowelKit Core
//!
//! Core types and utilities for DowelKit.
//! Provides measurement-system handling and the planar geometry types
//! shared by the toolpath engine and the preview.

pub mod types;
pub mod units;

pub use types::{Bounds2D, Point2D};
pub use units::{convert_length, MeasurementSystem, UnitsError, MM_PER_INCH};
