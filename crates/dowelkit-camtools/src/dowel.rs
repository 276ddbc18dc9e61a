//! Dowel Boring
//!
//! Bores a rectangular grid of round holes with an end mill smaller than
//! the hole: the tool orbits at `(hole - tool) / 2` around each center,
//! stepping down one pass at a time.
//!
//! The pipeline is pure and stateless:
//! [`ParameterSet`] → [`plan`] → [`GeometryPlan`] → [`emit`] → [`MotionCommand`]s.

mod emitter;
mod params;
mod planner;

pub use emitter::{emit, emit_cancellable, MotionCommand};
pub use params::ParameterSet;
pub use planner::{plan, GeometryPlan, MAX_PASS_COUNT};
