//! Command emitter: turns a geometry plan into ordered machine motion

use super::params::ParameterSet;
use super::planner::GeometryPlan;
use crate::error::{CamToolError, CamToolResult};
use dowelkit_core::Point2D;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// One abstract machine motion. Z = 0 is the work surface, cuts go negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MotionCommand {
    /// Non-cutting move at the current (clearance) height
    RapidMove { x: f64, y: f64 },
    /// Controlled descent at the current XY
    PlungeTo { z: f64, feed_rate: f64 },
    /// Full clockwise circle at the current depth, ending where it started.
    /// `center_offset` points from the current position to the arc center.
    ArcCut {
        center_offset: Point2D,
        radius: f64,
        feed_rate: f64,
    },
    /// Non-cutting withdrawal to `z`
    RetractTo { z: f64 },
}

impl MotionCommand {
    /// True for moves that remove material
    pub fn is_cutting(&self) -> bool {
        matches!(self, Self::PlungeTo { .. } | Self::ArcCut { .. })
    }
}

/// Emit the full command sequence for `plan`.
pub fn emit(plan: &GeometryPlan, params: &ParameterSet) -> Vec<MotionCommand> {
    let mut commands = Vec::with_capacity(command_capacity(plan));
    for center in &plan.hole_centers {
        emit_hole(&mut commands, *center, plan, params);
    }
    log_summary(plan, &commands);
    commands
}

/// Like [`emit`], checking `cancel` before each hole.
pub fn emit_cancellable(
    plan: &GeometryPlan,
    params: &ParameterSet,
    cancel: &AtomicBool,
) -> CamToolResult<Vec<MotionCommand>> {
    let mut commands = Vec::with_capacity(command_capacity(plan));
    for (idx, center) in plan.hole_centers.iter().enumerate() {
        if cancel.load(Ordering::Relaxed) {
            debug!("Emission cancelled at hole {}/{}", idx, plan.hole_count());
            return Err(CamToolError::Cancelled {
                holes_done: idx,
                holes_total: plan.hole_count(),
            });
        }
        emit_hole(&mut commands, *center, plan, params);
    }
    log_summary(plan, &commands);
    Ok(commands)
}

fn command_capacity(plan: &GeometryPlan) -> usize {
    plan.hole_count().saturating_mul(2 * plan.pass_count + 2)
}

fn emit_hole(
    commands: &mut Vec<MotionCommand>,
    center: Point2D,
    plan: &GeometryPlan,
    params: &ParameterSet,
) {
    let radius = plan.effective_bore_radius;
    // Orbit starts on +X so the arc returns the tool to the entry point.
    let entry = center.offset(radius, 0.0);
    let mut position: Option<Point2D> = None;

    for depth in &plan.pass_depths {
        if position != Some(entry) {
            commands.push(MotionCommand::RapidMove {
                x: entry.x,
                y: entry.y,
            });
            position = Some(entry);
        }
        commands.push(MotionCommand::PlungeTo {
            z: -depth,
            feed_rate: params.feed_rate,
        });
        commands.push(MotionCommand::ArcCut {
            center_offset: Point2D::new(-radius, 0.0),
            radius,
            feed_rate: params.feed_rate,
        });
    }

    commands.push(MotionCommand::RetractTo {
        z: params.safe_height,
    });
}

fn log_summary(plan: &GeometryPlan, commands: &[MotionCommand]) {
    debug!(
        "Emitted {} commands for {} holes x {} passes",
        commands.len(),
        plan.hole_count(),
        plan.pass_count
    );
}
