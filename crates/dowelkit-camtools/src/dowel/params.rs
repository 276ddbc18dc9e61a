//! Parameter model for the dowel boring job

use dowelkit_core::units::{convert_length, MeasurementSystem};
use serde::{Deserialize, Serialize};

fn default_safe_height() -> f64 {
    5.0
}

/// Parameters for one dowel boring job.
///
/// All length fields share `unit`; `feed_rate` is in `unit` per minute.
/// Replace the whole value on every edit and re-plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    /// Holes along X. Zero means none, negative is rejected by the planner.
    pub grid_count_x: i32,
    /// Holes along Y.
    pub grid_count_y: i32,
    /// Finished hole diameter
    pub hole_diameter: f64,
    /// Finished hole depth below the surface
    pub hole_depth: f64,
    /// Diameter of the end mill
    pub tool_diameter: f64,
    /// Feed rate for plunge and arc moves
    pub feed_rate: f64,
    /// Maximum depth removed per pass
    pub pass_depth: f64,
    /// Height above the surface for travel between holes
    #[serde(default = "default_safe_height")]
    pub safe_height: f64,
    /// Unit shared by every length field
    #[serde(default)]
    pub unit: MeasurementSystem,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            grid_count_x: 10,
            grid_count_y: 10,
            hole_diameter: 10.0,
            hole_depth: 10.0,
            tool_diameter: 10.0,
            feed_rate: 10.0,
            pass_depth: 10.0,
            safe_height: default_safe_height(),
            unit: MeasurementSystem::Metric,
        }
    }
}

impl ParameterSet {
    /// Re-express every length-bearing field in `target`.
    ///
    /// Returns an identical copy when `target` already matches `self.unit`.
    pub fn to_units(&self, target: MeasurementSystem) -> Self {
        let from = self.unit;
        let conv = |v: f64| convert_length(v, from, target);
        Self {
            grid_count_x: self.grid_count_x,
            grid_count_y: self.grid_count_y,
            hole_diameter: conv(self.hole_diameter),
            hole_depth: conv(self.hole_depth),
            tool_diameter: conv(self.tool_diameter),
            feed_rate: conv(self.feed_rate),
            pass_depth: conv(self.pass_depth),
            safe_height: conv(self.safe_height),
            unit: target,
        }
    }

    /// Total holes the grid describes, zero when either axis is non-positive.
    pub fn hole_count(&self) -> usize {
        let x = usize::try_from(self.grid_count_x).unwrap_or(0);
        let y = usize::try_from(self.grid_count_y).unwrap_or(0);
        x.saturating_mul(y)
    }
}
