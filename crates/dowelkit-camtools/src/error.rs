//! Error types for the CAM tools crate.
//!
//! This module provides structured error types for dowel job validation
//! and toolpath generation.

use thiserror::Error;

/// Grid axis named in [`ValidationError::InvalidGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridAxis {
    X,
    Y,
}

impl std::fmt::Display for GridAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::X => write!(f, "X"),
            Self::Y => write!(f, "Y"),
        }
    }
}

/// Reasons a parameter set cannot be planned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A grid count is negative. Zero means "no holes" and is accepted.
    #[error("Invalid grid: {axis} count {count} is negative")]
    InvalidGrid { axis: GridAxis, count: i32 },

    /// A dimension is non-finite or out of its positive range.
    #[error("Invalid value for '{name}': {value}")]
    InvalidDimension { name: &'static str, value: f64 },

    /// The tool cannot fit inside the hole.
    #[error("Tool diameter {tool_diameter} exceeds hole diameter {hole_diameter}")]
    ToolTooLarge {
        tool_diameter: f64,
        hole_diameter: f64,
    },

    /// The per-pass depth cannot slice the hole into a finite number of passes.
    #[error("Pass depth must be positive, got {pass_depth}")]
    DegenerateDepth { pass_depth: f64 },

    /// The pass depth is so small relative to the hole depth that slicing
    /// would exceed `limit` passes.
    #[error("Pass depth {pass_depth} needs more than {limit} passes to reach depth {hole_depth}")]
    TooManyPasses {
        hole_depth: f64,
        pass_depth: f64,
        limit: usize,
    },
}

/// Errors that can occur during CAM tool operations.
#[derive(Error, Debug)]
pub enum CamToolError {
    /// The parameter set failed validation.
    #[error("Invalid parameters: {0}")]
    Validation(#[from] ValidationError),

    /// Generation was stopped through the cancellation flag.
    #[error("Toolpath generation cancelled after {holes_done} of {holes_total} holes")]
    Cancelled {
        holes_done: usize,
        holes_total: usize,
    },
}

/// Result type alias for CAM tool operations.
pub type CamToolResult<T> = Result<T, CamToolError>;

/// Result type alias for parameter validation.
pub type ValidationResult<T> = Result<T, ValidationError>;
