use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use self::{compute::ComputeArg, generate::GenerateArg, summary::SummaryArg};

mod compute;
mod generate;
mod summary;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Log debug output (`RUST_LOG` takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
    /// What to do
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Generate random plates for testing
    Generate(#[clap(flatten)] GenerateArg),
    /// Compute one statistic over a plate collection
    Compute(#[clap(flatten)] ComputeArg),
    /// Summarize the pooled readings of every plate
    Summary(#[clap(flatten)] SummaryArg),
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_logging(args.verbose);
    match args.mode {
        Mode::Generate(arg) => generate::run(&arg)?,
        Mode::Compute(arg) => compute::run(&arg)?,
        Mode::Summary(arg) => summary::run(&arg)?,
    }
    Ok(())
}
