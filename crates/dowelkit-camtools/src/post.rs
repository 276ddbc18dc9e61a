//! G-code post-processor for dowel boring jobs
//!
//! Serialises a [`MotionCommand`] sequence into G-code text for
//! GRBL-style controllers.

use crate::dowel::{emit, plan, GeometryPlan, MotionCommand, ParameterSet};
use crate::error::CamToolResult;
use dowelkit_core::units::{format_feed_rate, format_length};
use dowelkit_core::{MeasurementSystem, Point2D};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Output options for the post-processor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostConfig {
    /// Written as the first comment line when set
    pub program_name: Option<String>,
    /// Spindle RPM. The spindle is left alone when `None`.
    pub spindle_speed: Option<f64>,
    /// Decimal places for coordinates
    pub decimals: usize,
}

impl Default for PostConfig {
    fn default() -> Self {
        Self {
            program_name: None,
            spindle_speed: None,
            decimals: 3,
        }
    }
}

/// Writes G-code for an emitted command sequence
#[derive(Debug, Clone, Default)]
pub struct GcodePostProcessor {
    config: PostConfig,
}

impl GcodePostProcessor {
    pub fn new(config: PostConfig) -> Self {
        Self { config }
    }

    /// Render `commands` (as produced by [`emit`] for `plan`/`params`) to G-code
    pub fn process(
        &self,
        plan: &GeometryPlan,
        params: &ParameterSet,
        commands: &[MotionCommand],
    ) -> String {
        let mut gcode = String::new();
        self.write_header(&mut gcode, plan, params);

        let mut position = Point2D::origin();
        for cmd in commands {
            match *cmd {
                MotionCommand::RapidMove { x, y } => {
                    gcode.push_str(&format!("G0 X{} Y{}\n", self.num(x), self.num(y)));
                    position = Point2D::new(x, y);
                }
                MotionCommand::PlungeTo { z, feed_rate } => {
                    gcode.push_str(&format!("G1 Z{} F{:.1}\n", self.num(z), feed_rate));
                }
                MotionCommand::ArcCut {
                    center_offset,
                    radius,
                    feed_rate,
                } => {
                    if radius > 0.0 {
                        gcode.push_str(&format!(
                            "G2 X{} Y{} I{} J{} F{:.1}\n",
                            self.num(position.x),
                            self.num(position.y),
                            self.num(center_offset.x),
                            self.num(center_offset.y),
                            feed_rate
                        ));
                    } else {
                        gcode.push_str("; Zero-radius bore, plunge only\n");
                    }
                }
                MotionCommand::RetractTo { z } => {
                    gcode.push_str(&format!("G0 Z{}\n", self.num(z)));
                }
            }
        }

        self.write_trailer(&mut gcode);
        debug!(
            "Post-processed {} commands into {} bytes of G-code",
            commands.len(),
            gcode.len()
        );
        gcode
    }

    fn write_header(&self, gcode: &mut String, plan: &GeometryPlan, params: &ParameterSet) {
        let unit = params.unit;
        let d = self.config.decimals;

        if let Some(name) = &self.config.program_name {
            gcode.push_str(&format!("; {}\n", name));
        }
        gcode.push_str("; Dowel Boring Toolpath\n");
        gcode.push_str(&format!(
            "; Grid: {} x {} ({} holes), pitch {}\n",
            plan.grid_count_x,
            plan.grid_count_y,
            plan.hole_count(),
            format_length(plan.pitch, unit, d)
        ));
        gcode.push_str(&format!(
            "; Hole Diameter: {}\n",
            format_length(params.hole_diameter, unit, d)
        ));
        gcode.push_str(&format!(
            "; Tool Diameter: {}\n",
            format_length(params.tool_diameter, unit, d)
        ));
        gcode.push_str(&format!(
            "; Depth: {} in {} passes\n",
            format_length(params.hole_depth, unit, d),
            plan.pass_count
        ));
        gcode.push_str(&format!("; Feed: {}\n", format_feed_rate(params.feed_rate, unit)));

        match unit {
            MeasurementSystem::Metric => gcode.push_str("G21 ; Set units to millimeters\n"),
            MeasurementSystem::Imperial => gcode.push_str("G20 ; Set units to inches\n"),
        }
        gcode.push_str("G90 ; Absolute positioning\n");
        gcode.push_str("G17 ; XY plane selection\n");
        if let Some(rpm) = self.config.spindle_speed {
            gcode.push_str(&format!("M3 S{:.0} ; Start spindle\n", rpm));
        }
        gcode.push_str(&format!(
            "G0 Z{} ; Move to safe height\n",
            self.num(params.safe_height)
        ));
    }

    fn write_trailer(&self, gcode: &mut String) {
        if self.config.spindle_speed.is_some() {
            gcode.push_str("M5 ; Stop spindle\n");
        }
        gcode.push_str("M30 ; End program\n");
    }

    fn num(&self, v: f64) -> String {
        // Avoid printing "-0.000"
        let v = if v == 0.0 { 0.0 } else { v };
        format!("{:.*}", self.config.decimals, v)
    }
}

/// Generator for dowel boring G-code: plan, emit and post in one call
pub struct DowelGenerator {
    params: ParameterSet,
}

impl DowelGenerator {
    /// Create a new DowelGenerator with the given parameters
    pub fn new(params: ParameterSet) -> Self {
        Self { params }
    }

    /// Generate the G-code for the whole grid
    pub fn generate(&self, config: &PostConfig) -> CamToolResult<String> {
        let plan = plan(&self.params)?;
        let commands = emit(&plan, &self.params);
        Ok(GcodePostProcessor::new(config.clone()).process(&plan, &self.params, &commands))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_formatting() {
        let post = GcodePostProcessor::default();
        assert_eq!(post.num(-0.0), "0.000");
        assert_eq!(post.num(1.23456), "1.235");

        let post = GcodePostProcessor::new(PostConfig {
            decimals: 1,
            ..PostConfig::default()
        });
        assert_eq!(post.num(2.26), "2.3");
    }

    #[test]
    fn test_imperial_header() {
        let params = ParameterSet {
            grid_count_x: 1,
            grid_count_y: 1,
            hole_diameter: 0.5,
            hole_depth: 0.75,
            tool_diameter: 0.25,
            feed_rate: 30.0,
            pass_depth: 0.25,
            safe_height: 0.2,
            unit: MeasurementSystem::Imperial,
        };
        let gcode = DowelGenerator::new(params)
            .generate(&PostConfig::default())
            .unwrap();
        assert!(gcode.contains("G20 ; Set units to inches"));
        assert!(gcode.contains("; Hole Diameter: 0.500 in"));
        assert!(gcode.contains("; Feed: 30.0 in/min"));
        assert!(!gcode.contains("M3 S"));
        assert!(gcode.trim_end().ends_with("M30 ; End program"));
    }
}
