//! # DowelKit
//!
//! Toolpath generation for boring rectangular grids of dowel holes on a CNC
//! router.
//!
//! ## Architecture
//!
//! DowelKit is organized as a workspace with multiple crates:
//!
//! 1. **dowelkit-core** - Units and planar geometry types
//! 2. **dowelkit-camtools** - Parameter model, geometry planner, command emitter, G-code post
//! 3. **dowelkit-visualizer** - Preview primitives and SVG rendering
//! 4. **dowelkit** - Command-line binary tying the crates together

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

pub use dowelkit_camtools::{
    emit, plan, GeometryPlan, MotionCommand, ParameterSet, PostConfig, ValidationError,
};
pub use dowelkit_core::units::{self, MeasurementSystem};
pub use dowelkit_visualizer::{project, render_svg, PreviewPrimitive, SvgOptions};

use dowelkit_camtools::GcodePostProcessor;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging with:
/// - Output on stderr so G-code written to stdout stays clean
/// - RUST_LOG environment variable support (INFO by default, DEBUG when `verbose`)
/// - Optional JSON lines instead of human-readable output
pub fn init_logging(verbose: bool, json: bool) -> Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let env_filter = EnvFilter::from_default_env().add_directive(level.into());

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
            .context("Failed to install JSON log subscriber")?;
    } else {
        registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true)
                    .with_line_number(true),
            )
            .try_init()
            .context("Failed to install log subscriber")?;
    }

    Ok(())
}

/// On-disk job description: the parameter set plus optional output settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobFile {
    #[serde(flatten)]
    pub params: ParameterSet,
    #[serde(default)]
    pub post: PostConfig,
}

/// Load a JSON job file.
pub fn load_job(path: &Path) -> Result<JobFile> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read job file {}", path.display()))?;
    let job: JobFile = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse job file {}", path.display()))?;
    info!("Loaded job from {}", path.display());
    Ok(job)
}

/// Per-field replacements typed by the operator.
///
/// Lengths are parsed in the job's unit, so imperial jobs accept fractions
/// like `1 1/4`.
#[derive(Debug, Clone, Default)]
pub struct ParameterOverrides {
    pub grid_count_x: Option<i32>,
    pub grid_count_y: Option<i32>,
    pub hole_diameter: Option<String>,
    pub hole_depth: Option<String>,
    pub tool_diameter: Option<String>,
    pub feed_rate: Option<f64>,
    pub pass_depth: Option<String>,
    pub safe_height: Option<String>,
}

impl ParameterOverrides {
    /// Return `params` with every set override applied.
    pub fn apply(&self, params: &ParameterSet) -> Result<ParameterSet> {
        let unit = params.unit;
        let length = |name: &str, input: &Option<String>, current: f64| -> Result<f64> {
            match input {
                Some(text) => units::parse_length(text, unit)
                    .with_context(|| format!("Invalid --{} value '{}'", name, text)),
                None => Ok(current),
            }
        };

        Ok(ParameterSet {
            grid_count_x: self.grid_count_x.unwrap_or(params.grid_count_x),
            grid_count_y: self.grid_count_y.unwrap_or(params.grid_count_y),
            hole_diameter: length("hole-diameter", &self.hole_diameter, params.hole_diameter)?,
            hole_depth: length("hole-depth", &self.hole_depth, params.hole_depth)?,
            tool_diameter: length("tool-diameter", &self.tool_diameter, params.tool_diameter)?,
            feed_rate: self.feed_rate.unwrap_or(params.feed_rate),
            pass_depth: length("pass-depth", &self.pass_depth, params.pass_depth)?,
            safe_height: length("safe-height", &self.safe_height, params.safe_height)?,
            unit,
        })
    }
}

/// Everything produced for one job.
#[derive(Debug, Clone)]
pub struct JobOutput {
    pub params: ParameterSet,
    pub plan: GeometryPlan,
    pub commands: Vec<MotionCommand>,
    pub preview: Vec<PreviewPrimitive>,
    pub gcode: String,
}

/// Plan, emit, project and post-process a job.
///
/// When `units` is given the parameters are converted first, so the planner
/// only ever sees one unit system.
pub fn run_job(
    params: &ParameterSet,
    units: Option<MeasurementSystem>,
    post: &PostConfig,
) -> Result<JobOutput> {
    let params = match units {
        Some(target) => params.to_units(target),
        None => params.clone(),
    };

    let plan = plan(&params).context("Dowel job rejected")?;
    let commands = emit(&plan, &params);
    let preview = project(&plan);
    let gcode = GcodePostProcessor::new(post.clone()).process(&plan, &params, &commands);

    info!(
        "Generated {} holes, {} passes each, {} motion commands",
        plan.hole_count(),
        plan.pass_count,
        commands.len()
    );

    Ok(JobOutput {
        params,
        plan,
        commands,
        preview,
        gcode,
    })
}
