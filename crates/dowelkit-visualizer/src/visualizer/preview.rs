//! Preview projector

use dowelkit_camtools::GeometryPlan;
use dowelkit_core::{Bounds2D, Point2D};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::trace;

/// A drawable shape in work coordinates, in the plan's unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PreviewPrimitive {
    /// Outline of a finished hole
    Circle { center: Point2D, radius: f64 },
}

impl PreviewPrimitive {
    pub fn bounds(&self) -> Bounds2D {
        match *self {
            Self::Circle { center, radius } => Bounds2D::from_circle(center, radius),
        }
    }

    /// Approximate the outline with `segments` chords, closed (first point repeated last).
    pub fn to_polyline(&self, segments: usize) -> Vec<Point2D> {
        match *self {
            Self::Circle { center, radius } => {
                let segments = segments.max(3);
                (0..=segments)
                    .map(|i| {
                        let angle = 2.0 * PI * (i % segments) as f64 / segments as f64;
                        Point2D::new(
                            center.x + radius * angle.cos(),
                            center.y + radius * angle.sin(),
                        )
                    })
                    .collect()
            }
        }
    }
}

/// One circle per hole at the finished hole diameter, in plan order.
pub fn project(plan: &GeometryPlan) -> Vec<PreviewPrimitive> {
    let radius = plan.hole_diameter / 2.0;
    let primitives: Vec<PreviewPrimitive> = plan
        .hole_centers
        .iter()
        .map(|&center| PreviewPrimitive::Circle { center, radius })
        .collect();
    trace!("Projected {} preview primitives", primitives.len());
    primitives
}

/// Bounds covering every primitive, `None` when there are none.
pub fn preview_bounds(primitives: &[PreviewPrimitive]) -> Option<Bounds2D> {
    primitives
        .iter()
        .map(PreviewPrimitive::bounds)
        .reduce(|acc, b| acc.union(&b))
}
