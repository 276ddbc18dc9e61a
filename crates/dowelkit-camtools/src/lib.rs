//! # DowelKit CAM Tools
//!
//! This crate provides the toolpath engine for boring grids of dowel holes
//! with a CNC router, and the G-code post-processor that serialises its
//! output.
//!
//! ## Components
//!
//! - **Dowel**: parameter model, geometry planner and command emitter
//! - **Post**: G-code output for the emitted motion commands
//! - **Error**: validation and generation errors

pub mod dowel;
pub mod error;
pub mod post;

// Re-export commonly used items
pub use dowel::{
    emit, emit_cancellable, plan, GeometryPlan, MotionCommand, ParameterSet, MAX_PASS_COUNT,
};
pub use error::{CamToolError, CamToolResult, GridAxis, ValidationError, ValidationResult};
pub use post::{DowelGenerator, GcodePostProcessor, PostConfig};
