//! # DowelKit Visualizer
//!
//! Preview geometry for dowel boring jobs: projects a geometry plan into
//! drawable primitives for an external renderer, and renders SVG.

pub mod visualizer;

pub use visualizer::{
    preview_bounds, project, render_holes_to_path, render_svg, PreviewPrimitive, SvgOptions,
};
