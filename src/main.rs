//! DowelKit CLI - generate dowel boring G-code from a job file

use anyhow::{Context, Result};
use clap::Parser;
use dowelkit::{
    init_logging, load_job, render_svg, run_job, JobFile, MeasurementSystem, ParameterOverrides,
    SvgOptions,
};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")");

#[derive(Parser)]
#[command(name = "dowelkit")]
#[command(about = "Generate G-code for boring a grid of dowel holes", long_about = None)]
#[command(version, long_version = LONG_VERSION)]
struct Cli {
    /// JSON job file (the panel defaults are used when absent)
    #[arg(short, long)]
    job: Option<PathBuf>,

    /// Output file for the G-code (stdout when absent)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Convert the job to this unit system before planning (metric or imperial)
    #[arg(short, long)]
    units: Option<MeasurementSystem>,

    /// Write an SVG preview of the hole grid
    #[arg(long)]
    preview: Option<PathBuf>,

    /// Spindle RPM; emits M3/M5 when set
    #[arg(long)]
    spindle: Option<f64>,

    /// Program name written as the first comment
    #[arg(short, long)]
    name: Option<String>,

    /// Holes along X
    #[arg(long, allow_negative_numbers = true)]
    count_x: Option<i32>,

    /// Holes along Y
    #[arg(long, allow_negative_numbers = true)]
    count_y: Option<i32>,

    /// Hole diameter, in the job's unit (fractions allowed for inches)
    #[arg(long)]
    hole_diameter: Option<String>,

    /// Hole depth, in the job's unit
    #[arg(long)]
    hole_depth: Option<String>,

    /// Tool diameter, in the job's unit
    #[arg(long)]
    tool_diameter: Option<String>,

    /// Feed rate, in the job's unit per minute
    #[arg(long)]
    feed: Option<f64>,

    /// Maximum depth per pass, in the job's unit
    #[arg(long)]
    pass_depth: Option<String>,

    /// Clearance height between holes, in the job's unit
    #[arg(long)]
    safe_height: Option<String>,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,

    /// Log as JSON lines
    #[arg(long)]
    log_json: bool,
}

impl Cli {
    fn overrides(&self) -> ParameterOverrides {
        ParameterOverrides {
            grid_count_x: self.count_x,
            grid_count_y: self.count_y,
            hole_diameter: self.hole_diameter.clone(),
            hole_depth: self.hole_depth.clone(),
            tool_diameter: self.tool_diameter.clone(),
            feed_rate: self.feed,
            pass_depth: self.pass_depth.clone(),
            safe_height: self.safe_height.clone(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_json)?;

    let mut job = match &cli.job {
        Some(path) => load_job(path)?,
        None => JobFile::default(),
    };
    job.params = cli.overrides().apply(&job.params)?;
    if cli.spindle.is_some() {
        job.post.spindle_speed = cli.spindle;
    }
    if cli.name.is_some() {
        job.post.program_name = cli.name.clone();
    }

    let output = run_job(&job.params, cli.units, &job.post)?;

    if let Some(path) = &cli.preview {
        let svg = render_svg(&output.preview, &SvgOptions::default());
        fs::write(path, svg)
            .with_context(|| format!("Failed to write preview {}", path.display()))?;
        info!("Wrote preview to {}", path.display());
    }

    match &cli.output {
        Some(path) => {
            fs::write(path, &output.gcode)
                .with_context(|| format!("Failed to write G-code {}", path.display()))?;
            info!("Wrote G-code to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(output.gcode.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
