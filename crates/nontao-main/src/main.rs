// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

mod config;
mod pipeline;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use nontao_model::generator::TrafficLevel;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

use crate::config::{Overrides, PipelineConfig, QueryInstant};

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::CLOSE)
        .init();
}

#[derive(Parser, Debug)]
#[command(
    name = "nontao",
    version,
    about = "Simulate machine occupancy and map estimated wait time and availability"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// TOML configuration file; defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    seed: Option<u64>,

    /// low, medium or high.
    #[arg(long, global = true)]
    traffic: Option<TrafficLevel>,

    /// Query instant as HH:MM:SS, or `now`.
    #[arg(long = "at", global = true)]
    at: Option<QueryInstant>,

    /// Neighbours averaged per grid cell.
    #[arg(short = 'k', global = true)]
    k: Option<usize>,

    /// Grid samples per axis.
    #[arg(long, global = true)]
    resolution: Option<usize>,

    #[arg(long, global = true)]
    docs_dir: Option<PathBuf>,

    #[arg(long, global = true)]
    plots_dir: Option<PathBuf>,

    /// Also write a JSON summary of the run to this path.
    #[arg(long, global = true)]
    report: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Generate the roster and occupancy events, write them and the display plot.
    Generate,
    /// Read roster and events, write the panel, results and field plots.
    Analyze,
    /// Generate, then analyze.
    Run,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            seed: self.seed,
            traffic: self.traffic,
            query: self.at,
            k: self.k,
            resolution: self.resolution,
            docs_dir: self.docs_dir.clone(),
            plots_dir: self.plots_dir.clone(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    enable_tracing();
    let cli = Cli::parse();

    let mut cfg = PipelineConfig::load(cli.config.as_deref())?;
    cfg.apply(cli.overrides());
    cfg.validate()?;

    let command = cli.command.unwrap_or(Command::Run);
    info!(?command, seed = cfg.seed, traffic = %cfg.traffic, "Starting");

    let sim = match command {
        Command::Generate | Command::Run => {
            let sim = pipeline::simulate(&cfg)?;
            pipeline::write_simulation(&sim, &cfg)?;
            pipeline::render_simulation(&sim, &cfg)?;
            sim
        }
        Command::Analyze => pipeline::load_simulation(&cfg)?,
    };

    let analysis = match command {
        Command::Generate => None,
        Command::Analyze | Command::Run => {
            let analysis = pipeline::analyze(&sim, cfg.query.resolve(), cfg.k, cfg.resolution)?;
            pipeline::write_analysis(&analysis, &cfg)?;
            pipeline::render_analysis(&analysis, &cfg)?;
            Some(analysis)
        }
    };

    if let Some(path) = &cli.report {
        let report = pipeline::report(&cfg, &sim, analysis.as_ref());
        pipeline::write_report(path, &report)?;
        info!(path = %path.display(), "Report written");
    }

    info!(
        docs = %cfg.docs_dir.display(),
        plots = %cfg.plots_dir.display(),
        "Done"
    );
    Ok(())
}
