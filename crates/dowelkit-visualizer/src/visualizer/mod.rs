//! Dowel preview
//!
//! Projects a [`GeometryPlan`](dowelkit_camtools::GeometryPlan) into
//! renderer-agnostic primitives and renders them as SVG.

pub mod preview;
pub mod svg_renderer;

pub use preview::{preview_bounds, project, PreviewPrimitive};
pub use svg_renderer::{render_holes_to_path, render_svg, SvgOptions};
