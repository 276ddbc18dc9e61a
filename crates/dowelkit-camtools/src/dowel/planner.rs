//! Geometry planner: hole lattice, bore radius, depth passes

use super::params::ParameterSet;
use crate::error::{GridAxis, ValidationError, ValidationResult};
use dowelkit_core::{Bounds2D, MeasurementSystem, Point2D};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Slack subtracted from depth / pass depth before taking the ceiling.
const PASS_COUNT_EPSILON: f64 = 1e-9;

/// Most depth passes a single hole may be sliced into.
pub const MAX_PASS_COUNT: usize = 10_000;

/// Validated geometry for one job. Pure data, recomputed on every edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryPlan {
    /// Hole centers, row-major: row 0 left to right, then row 1, ...
    pub hole_centers: Vec<Point2D>,
    /// Tool-center orbit radius, `(hole_diameter - tool_diameter) / 2`
    pub effective_bore_radius: f64,
    /// Number of depth passes per hole
    pub pass_count: usize,
    /// Cumulative depth reached by each pass; the last equals the hole depth
    pub pass_depths: Vec<f64>,
    /// Finished hole diameter
    pub hole_diameter: f64,
    /// Center-to-center spacing on both axes
    pub pitch: f64,
    pub grid_count_x: usize,
    pub grid_count_y: usize,
    pub unit: MeasurementSystem,
}

impl GeometryPlan {
    pub fn hole_count(&self) -> usize {
        self.hole_centers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hole_centers.is_empty()
    }

    /// Depth removed by each pass (e.g. `[3, 3, 3, 1]` for 10 deep at 3 per pass)
    pub fn pass_increments(&self) -> Vec<f64> {
        let mut previous = 0.0;
        self.pass_depths
            .iter()
            .map(|&depth| {
                let increment = depth - previous;
                previous = depth;
                increment
            })
            .collect()
    }

    /// Extent of the finished holes, `None` for an empty grid
    pub fn bounds(&self) -> Option<Bounds2D> {
        let radius = self.hole_diameter / 2.0;
        self.hole_centers
            .iter()
            .map(|c| Bounds2D::from_circle(*c, radius))
            .reduce(|acc, b| acc.union(&b))
    }
}

/// Validate `params` and lay out the job.
pub fn plan(params: &ParameterSet) -> ValidationResult<GeometryPlan> {
    validate(params).inspect_err(|err| warn!("Rejected dowel parameters: {}", err))?;

    // validate() guarantees both counts are >= 0
    let count_x = params.grid_count_x as usize;
    let count_y = params.grid_count_y as usize;
    let pitch = params.hole_diameter + params.tool_diameter;

    let mut hole_centers = Vec::with_capacity(params.hole_count());
    for row in 0..count_y {
        let y = row as f64 * pitch;
        for col in 0..count_x {
            hole_centers.push(Point2D::new(col as f64 * pitch, y));
        }
    }

    let effective_bore_radius = (params.hole_diameter - params.tool_diameter) / 2.0;
    let pass_depths = pass_depths(params.hole_depth, params.pass_depth);

    debug!(
        "Planned {} holes ({}x{}), pitch {:.4}, bore radius {:.4}, {} passes",
        hole_centers.len(),
        count_x,
        count_y,
        pitch,
        effective_bore_radius,
        pass_depths.len()
    );

    Ok(GeometryPlan {
        hole_centers,
        effective_bore_radius,
        pass_count: pass_depths.len(),
        pass_depths,
        hole_diameter: params.hole_diameter,
        pitch,
        grid_count_x: count_x,
        grid_count_y: count_y,
        unit: params.unit,
    })
}

fn validate(p: &ParameterSet) -> ValidationResult<()> {
    if p.grid_count_x < 0 {
        return Err(ValidationError::InvalidGrid {
            axis: GridAxis::X,
            count: p.grid_count_x,
        });
    }
    if p.grid_count_y < 0 {
        return Err(ValidationError::InvalidGrid {
            axis: GridAxis::Y,
            count: p.grid_count_y,
        });
    }

    for (name, value) in [
        ("hole_diameter", p.hole_diameter),
        ("hole_depth", p.hole_depth),
        ("tool_diameter", p.tool_diameter),
        ("feed_rate", p.feed_rate),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(ValidationError::InvalidDimension { name, value });
        }
    }
    // Rapids between holes run at this height, so it must clear the surface.
    if !p.safe_height.is_finite() || p.safe_height <= 0.0 {
        return Err(ValidationError::InvalidDimension {
            name: "safe_height",
            value: p.safe_height,
        });
    }

    if !p.pass_depth.is_finite() || p.pass_depth <= 0.0 {
        return Err(ValidationError::DegenerateDepth {
            pass_depth: p.pass_depth,
        });
    }
    if pass_ratio(p.hole_depth, p.pass_depth) > MAX_PASS_COUNT as f64 {
        return Err(ValidationError::TooManyPasses {
            hole_depth: p.hole_depth,
            pass_depth: p.pass_depth,
            limit: MAX_PASS_COUNT,
        });
    }

    // Equal diameters are a plain plunge with a zero-radius orbit.
    if p.tool_diameter > p.hole_diameter {
        return Err(ValidationError::ToolTooLarge {
            tool_diameter: p.tool_diameter,
            hole_diameter: p.hole_diameter,
        });
    }

    Ok(())
}

fn pass_ratio(hole_depth: f64, pass_depth: f64) -> f64 {
    hole_depth / pass_depth - PASS_COUNT_EPSILON
}

/// Cumulative depth of each pass, never exceeding `hole_depth`.
///
/// Callers must have checked the ratio against [`MAX_PASS_COUNT`].
fn pass_depths(hole_depth: f64, pass_depth: f64) -> Vec<f64> {
    let count = (pass_ratio(hole_depth, pass_depth).ceil() as usize).clamp(1, MAX_PASS_COUNT);

    (1..=count)
        .map(|pass| {
            if pass == count {
                hole_depth
            } else {
                (pass as f64 * pass_depth).min(hole_depth)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> ParameterSet {
        ParameterSet {
            grid_count_x: 2,
            grid_count_y: 1,
            hole_diameter: 10.0,
            hole_depth: 5.0,
            tool_diameter: 6.0,
            feed_rate: 300.0,
            pass_depth: 5.0,
            safe_height: 5.0,
            unit: MeasurementSystem::Metric,
        }
    }

    #[test]
    fn test_pass_depths_with_short_last_pass() {
        assert_eq!(pass_depths(10.0, 3.0), vec![3.0, 6.0, 9.0, 10.0]);
    }

    #[test]
    fn test_pass_depths_exact_multiple() {
        assert_eq!(pass_depths(9.0, 3.0), vec![3.0, 6.0, 9.0]);
        assert_eq!(pass_depths(2.0, 5.0), vec![2.0]);
    }

    #[test]
    fn test_pass_depths_ignores_float_noise() {
        // 0.3 / 0.1 is 2.9999999999999996 in binary floating point
        assert_eq!(pass_depths(0.3, 0.1).len(), 3);
        // 0.7 / 0.1 is 6.999999999999999
        assert_eq!(pass_depths(0.7, 0.1).len(), 7);
        assert_eq!(*pass_depths(0.7, 0.1).last().unwrap(), 0.7);
    }

    #[test]
    fn test_row_major_centers() {
        let mut p = params();
        p.grid_count_x = 3;
        p.grid_count_y = 2;
        let plan = plan(&p).unwrap();
        assert_eq!(plan.pitch, 16.0);
        assert_eq!(
            plan.hole_centers,
            vec![
                Point2D::new(0.0, 0.0),
                Point2D::new(16.0, 0.0),
                Point2D::new(32.0, 0.0),
                Point2D::new(0.0, 16.0),
                Point2D::new(16.0, 16.0),
                Point2D::new(32.0, 16.0),
            ]
        );
    }

    #[test]
    fn test_validation_order() {
        let mut p = params();
        p.grid_count_x = -1;
        p.pass_depth = 0.0;
        assert!(matches!(
            plan(&p),
            Err(ValidationError::InvalidGrid {
                axis: GridAxis::X,
                count: -1
            })
        ));
    }

    #[test]
    fn test_bad_dimensions() {
        let mut p = params();
        p.hole_depth = 0.0;
        assert_eq!(
            plan(&p),
            Err(ValidationError::InvalidDimension {
                name: "hole_depth",
                value: 0.0
            })
        );

        let mut p = params();
        p.feed_rate = f64::NAN;
        assert!(matches!(
            plan(&p),
            Err(ValidationError::InvalidDimension {
                name: "feed_rate",
                ..
            })
        ));

        let mut p = params();
        p.safe_height = -1.0;
        assert!(matches!(
            plan(&p),
            Err(ValidationError::InvalidDimension {
                name: "safe_height",
                ..
            })
        ));
    }

    #[test]
    fn test_surface_is_not_a_safe_height() {
        let mut p = params();
        p.safe_height = 0.0;
        assert_eq!(
            plan(&p),
            Err(ValidationError::InvalidDimension {
                name: "safe_height",
                value: 0.0
            })
        );
    }

    #[test]
    fn test_tiny_pass_depth_is_rejected() {
        for pass_depth in [1e-300, 1e-9, f64::MIN_POSITIVE] {
            let mut p = params();
            p.hole_depth = 10.0;
            p.pass_depth = pass_depth;
            assert_eq!(
                plan(&p),
                Err(ValidationError::TooManyPasses {
                    hole_depth: 10.0,
                    pass_depth,
                    limit: MAX_PASS_COUNT,
                })
            );
        }
    }

    #[test]
    fn test_pass_count_limit_is_inclusive() {
        let mut p = params();
        p.hole_depth = 10.0;
        p.pass_depth = 10.0 / MAX_PASS_COUNT as f64;
        let plan = plan(&p).unwrap();
        assert_eq!(plan.pass_count, MAX_PASS_COUNT);
        assert_eq!(*plan.pass_depths.last().unwrap(), 10.0);

        let mut p = params();
        p.hole_depth = 10.0;
        p.pass_depth = 10.0 / (MAX_PASS_COUNT as f64 + 1.0);
        assert!(matches!(
            super::plan(&p),
            Err(ValidationError::TooManyPasses { .. })
        ));
    }

    #[test]
    fn test_last_pass_never_exceeds_pass_depth() {
        // Large ratio with a fractional remainder well above the epsilon
        let depths = pass_depths(9_999.5, 1.0);
        assert_eq!(depths.len(), 10_000);
        let last = depths[depths.len() - 1] - depths[depths.len() - 2];
        assert!(last > 0.0 && last <= 1.0);
    }

    #[test]
    fn test_infinite_pass_depth_is_degenerate() {
        let mut p = params();
        p.pass_depth = f64::INFINITY;
        assert!(matches!(
            plan(&p),
            Err(ValidationError::DegenerateDepth { .. })
        ));
    }

    #[test]
    fn test_bounds() {
        let plan = plan(&params()).unwrap();
        let b = plan.bounds().unwrap();
        assert_eq!(b.min, Point2D::new(-5.0, -5.0));
        assert_eq!(b.max, Point2D::new(21.0, 5.0));
    }

    #[test]
    fn test_empty_grid_has_no_bounds() {
        let mut p = params();
        p.grid_count_y = 0;
        let plan = plan(&p).unwrap();
        assert!(plan.is_empty());
        assert!(plan.bounds().is_none());
        assert_eq!(plan.pass_count, 1);
    }
}
