//! SVG output for preview primitives
//!
//! World Y points up, SVG Y points down, so every Y is negated.

use super::preview::{preview_bounds, PreviewPrimitive};
use std::fmt::Write;
use tracing::debug;

/// Styling for [`render_svg`]
#[derive(Debug, Clone)]
pub struct SvgOptions {
    /// Space around the holes, in work units
    pub margin: f64,
    pub stroke: String,
    pub stroke_width: f64,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            margin: 5.0,
            stroke: "#1f6feb".to_string(),
            stroke_width: 0.3,
        }
    }
}

/// Path data for every hole outline, each circle drawn as two half arcs.
pub fn render_holes_to_path(primitives: &[PreviewPrimitive]) -> String {
    let mut path = String::with_capacity(primitives.len() * 60);
    for primitive in primitives {
        match *primitive {
            PreviewPrimitive::Circle { center, radius } => {
                let (cx, cy) = (center.x, -center.y);
                let _ = write!(
                    path,
                    "M {:.2} {:.2} A {:.2} {:.2} 0 1 0 {:.2} {:.2} A {:.2} {:.2} 0 1 0 {:.2} {:.2} ",
                    cx + radius,
                    cy,
                    radius,
                    radius,
                    cx - radius,
                    cy,
                    radius,
                    radius,
                    cx + radius,
                    cy
                );
            }
        }
    }
    path
}

/// Standalone SVG document showing the hole layout.
pub fn render_svg(primitives: &[PreviewPrimitive], options: &SvgOptions) -> String {
    let (x, y, w, h) = match preview_bounds(primitives) {
        Some(b) => {
            let b = b.expanded(options.margin);
            (b.min.x, -b.max.y, b.width(), b.height())
        }
        None => (0.0, 0.0, 1.0, 1.0),
    };

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{:.2} {:.2} {:.2} {:.2}">"#,
        x, y, w, h
    );
    if !primitives.is_empty() {
        let _ = writeln!(
            svg,
            r#"  <path d="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
            render_holes_to_path(primitives).trim_end(),
            options.stroke,
            options.stroke_width
        );
    }
    svg.push_str("</svg>\n");

    debug!(
        "Rendered SVG preview of {} primitives ({} bytes)",
        primitives.len(),
        svg.len()
    );
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use dowelkit_core::Point2D;

    #[test]
    fn test_render_single_hole_path() {
        let path = render_holes_to_path(&[PreviewPrimitive::Circle {
            center: Point2D::new(10.0, 20.0),
            radius: 5.0,
        }]);
        assert_eq!(
            path,
            "M 15.00 -20.00 A 5.00 5.00 0 1 0 5.00 -20.00 A 5.00 5.00 0 1 0 15.00 -20.00 "
        );
    }

    #[test]
    fn test_render_empty_document() {
        let svg = render_svg(&[], &SvgOptions::default());
        assert!(svg.contains(r#"viewBox="0.00 0.00 1.00 1.00""#));
        assert!(!svg.contains("<path"));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn test_viewbox_covers_margin() {
        let svg = render_svg(
            &[PreviewPrimitive::Circle {
                center: Point2D::origin(),
                radius: 5.0,
            }],
            &SvgOptions::default(),
        );
        assert!(svg.contains(r#"viewBox="-10.00 -10.00 20.00 20.00""#));
    }
}
