//! Preview projection against planned grids

use dowelkit_camtools::dowel::{plan, ParameterSet};
use dowelkit_core::{MeasurementSystem, Point2D};
use dowelkit_visualizer::{preview_bounds, project, render_svg, PreviewPrimitive, SvgOptions};
use proptest::prelude::*;

fn job(x: i32, y: i32) -> ParameterSet {
    ParameterSet {
        grid_count_x: x,
        grid_count_y: y,
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
fn test_one_circle_per_hole() {
    let plan = plan(&job(3, 2)).unwrap();
    let primitives = project(&plan);

    assert_eq!(primitives.len(), 6);
    assert_eq!(
        primitives[1],
        PreviewPrimitive::Circle {
            center: Point2D::new(16.0, 0.0),
            radius: 5.0,
        }
    );
}

#[test]
fn test_radius_ignores_tool() {
    let mut params = job(1, 1);
    params.tool_diameter = 2.0;
    let primitives = project(&plan(&params).unwrap());
    assert!(matches!(
        primitives[0],
        PreviewPrimitive::Circle { radius, .. } if radius == 5.0
    ));
}

#[test]
fn test_bounds_match_plan() {
    let plan = plan(&job(2, 2)).unwrap();
    assert_eq!(preview_bounds(&project(&plan)), plan.bounds());
}

#[test]
fn test_empty_grid_renders_empty_svg() {
    let plan = plan(&job(0, 4)).unwrap();
    let primitives = project(&plan);
    assert!(primitives.is_empty());
    let svg = render_svg(&primitives, &SvgOptions::default());
    assert!(!svg.contains("<path"));
}

#[test]
fn test_svg_contains_every_hole() {
    let plan = plan(&job(2, 3)).unwrap();
    let svg = render_svg(&project(&plan), &SvgOptions::default());
    assert_eq!(svg.matches("M ").count(), 6);
}

proptest! {
    #[test]
    fn projection_is_deterministic(x in 0i32..6, y in 0i32..6) {
        let plan = plan(&job(x, y)).unwrap();
        prop_assert_eq!(project(&plan), project(&plan.clone()));
        prop_assert_eq!(project(&plan).len(), plan.hole_count());
    }
}
