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

use std::{
    fs,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use nontao_analysis::{
    aggregate::{AggregatedMachineStats, aggregate},
    knn::SpatialField,
    panel::{Panel, snapshot_with_spots},
    raster::Grid,
};
use nontao_core::{primitives::mean, time::TimeOfDay};
use nontao_model::{
    event::OccupancyEvent,
    generator::{IntervalPacker, PackingStats, RosterGenerator},
    machine::Roster,
};
use nontao_render::{colormap::ColorMap, display, field};
use serde::Serialize;
use tracing::{info, instrument};

use crate::config::PipelineConfig;

/// A generated roster and the events packed onto it.
#[derive(Debug, Clone)]
pub struct Simulation {
    pub roster: Roster,
    pub events: Vec<OccupancyEvent>,
    pub stats: Option<PackingStats>,
    pub spots_per_machine: u32,
}

/// Panel, per-machine stats and both rasterized fields at one instant.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub instant: TimeOfDay,
    pub panel: Panel,
    pub stats: Vec<AggregatedMachineStats>,
    pub wait: SpatialField,
    pub free: SpatialField,
    pub wait_grid: Grid,
    pub free_grid: Grid,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub seed: u64,
    pub machines: usize,
    pub events: usize,
    pub packing: Option<PackingSummary>,
    pub instant: String,
    pub occupied_spots: usize,
    pub mean_wait_seconds: Option<f64>,
    pub mean_free_probability: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PackingSummary {
    pub attempts: usize,
    pub placed: usize,
    pub rejected_no_slot: usize,
    pub rejected_midnight: usize,
    pub trailing_failures: usize,
}

impl From<PackingStats> for PackingSummary {
    fn from(s: PackingStats) -> Self {
        Self {
            attempts: s.attempts,
            placed: s.placed,
            rejected_no_slot: s.rejected_no_slot,
            rejected_midnight: s.rejected_midnight,
            trailing_failures: s.trailing_failures,
        }
    }
}

#[instrument(level = "info", skip_all, fields(seed = cfg.seed))]
pub fn simulate(cfg: &PipelineConfig) -> anyhow::Result<Simulation> {
    let roster = RosterGenerator::new(cfg.roster_config()?).generate();
    let packer_config = cfg.packer_config()?;
    let spots = packer_config.spots_per_machine();
    let packing = IntervalPacker::new(&roster, packer_config).generate();
    info!(
        machines = roster.len(),
        events = packing.events.len(),
        "Simulation complete"
    );
    Ok(Simulation {
        roster,
        events: packing.events,
        stats: Some(packing.stats),
        spots_per_machine: spots,
    })
}

/// Reads back a roster and event table written by an earlier run.
///
/// The spot count comes from the configuration, as it does for a fresh
/// simulation, so both paths build the same panel.
pub fn load_simulation(cfg: &PipelineConfig) -> anyhow::Result<Simulation> {
    let roster = nontao_io::roster::read_roster(cfg.machines_path())
        .with_context(|| format!("reading {}", cfg.machines_path().display()))?;
    let events = nontao_io::events::read_events(cfg.events_path())
        .with_context(|| format!("reading {}", cfg.events_path().display()))?;
    Ok(Simulation {
        roster,
        events,
        stats: None,
        spots_per_machine: cfg.spots_per_machine,
    })
}

/// Snapshots the simulation at `instant` and rasterizes both fields.
#[instrument(level = "info", skip_all, fields(instant = %instant))]
pub fn analyze(
    sim: &Simulation,
    instant: TimeOfDay,
    k: usize,
    resolution: usize,
) -> anyhow::Result<Analysis> {
    let panel = snapshot_with_spots(&sim.roster, &sim.events, instant, sim.spots_per_machine)?;
    let stats = aggregate(&panel);
    let (wait, free) = AggregatedMachineStats::to_field_columns(&stats);
    let wait_grid = wait.rasterize(k, resolution).context("rasterizing wait time")?;
    let free_grid = free
        .rasterize(k, resolution)
        .context("rasterizing free probability")?;
    info!(
        rows = panel.len(),
        occupied = panel.occupied(),
        machines = stats.len(),
        "Analysis complete"
    );
    Ok(Analysis {
        instant,
        panel,
        stats,
        wait,
        free,
        wait_grid,
        free_grid,
    })
}

fn ensure_dir(dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))
}

pub fn write_simulation(sim: &Simulation, cfg: &PipelineConfig) -> anyhow::Result<()> {
    ensure_dir(&cfg.docs_dir)?;
    nontao_io::roster::write_roster(cfg.machines_path(), &sim.roster)?;
    nontao_io::events::write_events(cfg.events_path(), &sim.events)?;
    Ok(())
}

pub fn write_analysis(analysis: &Analysis, cfg: &PipelineConfig) -> anyhow::Result<()> {
    ensure_dir(&cfg.docs_dir)?;
    nontao_io::report::write_panel(cfg.panel_path(), &analysis.panel)?;
    nontao_io::report::write_results(cfg.results_path(), &analysis.stats)?;
    Ok(())
}

pub fn render_simulation(sim: &Simulation, cfg: &PipelineConfig) -> anyhow::Result<()> {
    ensure_dir(&cfg.plots_dir)?;
    display::render_display(&sim.roster, cfg.display_plot_path())?;
    Ok(())
}

pub fn render_analysis(analysis: &Analysis, cfg: &PipelineConfig) -> anyhow::Result<()> {
    ensure_dir(&cfg.plots_dir)?;
    field::render_field(
        &analysis.wait,
        &analysis.wait_grid,
        &ColorMap::wait_time(),
        &field::wait_time_title(analysis.instant),
        cfg.wait_plot_path(),
    )?;
    field::render_field(
        &analysis.free,
        &analysis.free_grid,
        &ColorMap::blues(),
        &field::free_probability_title(analysis.instant),
        cfg.free_plot_path(),
    )?;
    Ok(())
}

pub fn report(cfg: &PipelineConfig, sim: &Simulation, analysis: Option<&Analysis>) -> RunReport {
    RunReport {
        seed: cfg.seed,
        machines: sim.roster.len(),
        events: sim.events.len(),
        packing: sim.stats.map(PackingSummary::from),
        instant: analysis
            .map(|a| a.instant.to_string())
            .unwrap_or_else(|| cfg.query.to_string()),
        occupied_spots: analysis.map_or(0, |a| a.panel.occupied()),
        mean_wait_seconds: analysis
            .and_then(|a| mean(a.stats.iter().map(AggregatedMachineStats::wait_seconds))),
        mean_free_probability: analysis
            .and_then(|a| mean(a.stats.iter().map(AggregatedMachineStats::free_probability))),
    }
}

pub fn write_report(path: &Path, report: &RunReport) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Overrides;

    fn config_in(dir: &Path) -> PipelineConfig {
        let mut cfg = PipelineConfig::default();
        cfg.apply(Overrides {
            docs_dir: Some(dir.join("docs")),
            plots_dir: Some(dir.join("plots")),
            resolution: Some(12),
            ..Overrides::default()
        });
        cfg
    }

    #[test]
    fn default_run_produces_consistent_artifacts() {
        let cfg = PipelineConfig::default();
        let sim = simulate(&cfg).unwrap();
        assert_eq!(sim.roster.len(), 50);
        assert!(!sim.events.is_empty());

        let at = cfg.query.resolve();
        let analysis = analyze(&sim, at, cfg.k, cfg.resolution).unwrap();
        assert_eq!(analysis.panel.len(), 200);
        assert_eq!(analysis.stats.len(), 50);
        assert_eq!(analysis.wait_grid.resolution(), 50);
        assert!(
            analysis
                .stats
                .iter()
                .all(|s| (0.0..=1.0).contains(&s.free_probability()))
        );
        let (lo, hi) = analysis.wait.value_range().unwrap();
        let (glo, ghi) = analysis.wait_grid.value_range().unwrap();
        assert!(glo >= lo && ghi <= hi);
    }

    #[test]
    fn same_seed_same_simulation() {
        let cfg = PipelineConfig::default();
        let a = simulate(&cfg).unwrap();
        let b = simulate(&cfg).unwrap();
        assert_eq!(a.roster, b.roster);
        assert_eq!(a.events, b.events);
    }

    #[test]
    fn tables_written_by_generate_feed_analyze() {
        let dir = tempfile::TempDir::new().unwrap();
        let cfg = config_in(dir.path());
        let sim = simulate(&cfg).unwrap();
        write_simulation(&sim, &cfg).unwrap();

        let loaded = load_simulation(&cfg).unwrap();
        assert_eq!(loaded.roster, sim.roster);
        assert_eq!(loaded.events, sim.events);

        let at = cfg.query.resolve();
        let fresh = analyze(&sim, at, cfg.k, cfg.resolution).unwrap();
        let reread = analyze(&loaded, at, cfg.k, cfg.resolution).unwrap();
        assert_eq!(reread.panel, fresh.panel);
        assert_eq!(reread.stats, fresh.stats);
        assert_eq!(reread.wait_grid, fresh.wait_grid);

        write_analysis(&reread, &cfg).unwrap();
        assert!(cfg.panel_path().exists());
        assert!(cfg.results_path().exists());
    }

    #[test]
    fn sparse_packings_give_the_same_panel_after_reload() {
        let dir = tempfile::TempDir::new().unwrap();
        let text = r#"
            spots_per_machine = 8
            windows = [[23, 24]]
            durations_min = [30, 90]
            traffic = "low"

            [[zones]]
            id = "Z"
            machines = 1
            latitude = [0.0, 1.0]
            longitude = [0.0, 1.0]
        "#;
        let mut cfg = PipelineConfig::load_from_str(text).unwrap();
        cfg.apply(Overrides {
            docs_dir: Some(dir.path().join("docs")),
            resolution: Some(4),
            ..Overrides::default()
        });
        let at = TimeOfDay::from_hms(23, 45, 0).unwrap();

        for seed in 1..=6 {
            cfg.seed = seed;
            let sim = simulate(&cfg).unwrap();
            write_simulation(&sim, &cfg).unwrap();
            let loaded = load_simulation(&cfg).unwrap();

            let fresh = analyze(&sim, at, cfg.k, cfg.resolution).unwrap();
            let reread = analyze(&loaded, at, cfg.k, cfg.resolution).unwrap();
            assert_eq!(fresh.panel.len(), 8, "seed {seed}");
            assert_eq!(reread.panel, fresh.panel, "seed {seed}");
            assert_eq!(reread.stats, fresh.stats, "seed {seed}");
        }
    }

    #[test]
    fn report_summarises_the_run() {
        let dir = tempfile::TempDir::new().unwrap();
        let cfg = config_in(dir.path());
        let sim = simulate(&cfg).unwrap();
        let analysis = analyze(&sim, cfg.query.resolve(), cfg.k, cfg.resolution).unwrap();
        let r = report(&cfg, &sim, Some(&analysis));
        assert_eq!(r.machines, 50);
        assert_eq!(r.events, sim.events.len());
        assert_eq!(r.instant, "10:30:00");
        assert_eq!(r.packing.as_ref().map(|p| p.placed), Some(sim.events.len()));
        let free = r.mean_free_probability.unwrap();
        assert!((0.0..=1.0).contains(&free));

        let path = dir.path().join("reports/run.json");
        write_report(&path, &r).unwrap();
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.contains("\"machines\": 50"));
    }

    #[test]
    fn missing_inputs_are_reported_with_their_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let cfg = config_in(dir.path());
        let err = load_simulation(&cfg).unwrap_err();
        assert!(format!("{err:#}").contains("nontao_machines.csv"));
    }
}
