/*!
 * MMU Simulator - Main Entry Point
 *
 * Replays a workload of allocate / deallocate / coalesce directives against a
 * single memory partition and prints the free and allocated lists after every
 * step.
 */

use clap::{Parser, ValueEnum};
use miette::{IntoDiagnostic, Result};
use std::io;
use std::path::PathBuf;
use tracing::info;

use mmu_simulator::{
    init_tracing, FitPolicy, JsonRenderer, RenderSink, RunSummary, Simulation, TextRenderer,
    Workload,
};

#[derive(Parser, Debug)]
#[command(name = "mmu")]
#[command(about = "Simulate first-fit, best-fit and worst-fit placement in a single memory partition")]
struct Args {
    /// Workload file: partition size, then one `pid size` directive per line
    input: PathBuf,

    /// Placement policy: -F (first fit / FIFO), -B (best fit) or -W (worst fit)
    #[arg(allow_hyphen_values = true)]
    policy: FitPolicy,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Verify partition layout after every step (always on in debug builds)
    #[arg(long)]
    verify: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Classic console listing
    Text,
    /// One JSON object per step
    Json,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let workload = Workload::from_path(&args.input)?;
    info!(
        input = %args.input.display(),
        partition_size = workload.partition_size,
        directives = workload.directives.len(),
        policy = %args.policy,
        "Starting simulation"
    );

    let mut simulation = Simulation::new(workload.partition_size, args.policy)
        .into_diagnostic()?
        .with_verification(args.verify);

    let stdout = io::stdout().lock();
    let summary = match args.format {
        OutputFormat::Text => run(&mut simulation, &workload, TextRenderer::new(stdout)),
        OutputFormat::Json => run(&mut simulation, &workload, JsonRenderer::new(stdout)),
    }
    .into_diagnostic()?;

    info!(
        steps = summary.steps,
        failures = summary.failures,
        fragmentation = summary.stats.fragmentation,
        "Simulation complete"
    );
    Ok(())
}

fn run<S: RenderSink>(
    simulation: &mut Simulation,
    workload: &Workload,
    mut sink: S,
) -> io::Result<RunSummary> {
    simulation.run(&workload.directives, &mut sink)
}
