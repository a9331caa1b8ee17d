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

use std::{fmt::Display, path::PathBuf, str::FromStr};

use anyhow::Context;
use nontao_analysis::raster::DEFAULT_RESOLUTION;
use nontao_core::time::{MalformedTimeString, TimeOfDay};
use nontao_model::generator::{
    PackerConfig, PackerConfigBuilder, RosterGenConfig, TrafficLevel, ZoneSpec,
};
use serde::{Deserialize, Deserializer};

/// When the panel is taken: a fixed time of day or the local clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryInstant {
    At(TimeOfDay),
    Now,
}

impl Default for QueryInstant {
    fn default() -> Self {
        QueryInstant::At(TimeOfDay::from_hms(10, 30, 0).expect("valid default instant"))
    }
}

impl QueryInstant {
    pub fn resolve(self) -> TimeOfDay {
        match self {
            QueryInstant::At(t) => t,
            QueryInstant::Now => TimeOfDay::now(),
        }
    }
}

impl FromStr for QueryInstant {
    type Err = MalformedTimeString;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("now") {
            return Ok(QueryInstant::Now);
        }
        s.parse().map(QueryInstant::At)
    }
}

impl Display for QueryInstant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryInstant::At(t) => write!(f, "{}", t),
            QueryInstant::Now => write!(f, "now"),
        }
    }
}

fn parse_str<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ZoneConfig {
    pub id: String,
    pub machines: usize,
    pub latitude: [f64; 2],
    pub longitude: [f64; 2],
}

/// Everything a run needs. Missing keys take the defaults, so an empty
/// file reproduces the stock scenario.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub seed: u64,
    pub zones: Vec<ZoneConfig>,
    pub spots_per_machine: u32,
    pub windows: Vec<[u32; 2]>,
    pub durations_min: Vec<u32>,
    #[serde(deserialize_with = "parse_str")]
    pub traffic: TrafficLevel,
    /// Overrides the budget implied by `traffic`.
    pub failure_budget: Option<usize>,
    #[serde(deserialize_with = "parse_str")]
    pub query: QueryInstant,
    pub k: usize,
    pub resolution: usize,
    pub docs_dir: PathBuf,
    pub plots_dir: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let roster = RosterGenConfig::default();
        let packer = PackerConfig::default();
        Self {
            seed: roster.seed(),
            zones: roster
                .zones()
                .iter()
                .map(|z| ZoneConfig {
                    id: z.zone().to_string(),
                    machines: z.machines(),
                    latitude: [z.latitude().start(), z.latitude().end()],
                    longitude: [z.longitude().start(), z.longitude().end()],
                })
                .collect(),
            spots_per_machine: packer.spots_per_machine(),
            windows: packer
                .windows()
                .iter()
                .map(|w| [w.start_hour(), w.end_hour()])
                .collect(),
            durations_min: packer.durations_min().to_vec(),
            traffic: TrafficLevel::default(),
            failure_budget: None,
            query: QueryInstant::default(),
            k: 3,
            resolution: DEFAULT_RESOLUTION,
            docs_dir: PathBuf::from("docs"),
            plots_dir: PathBuf::from("plots"),
        }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub seed: Option<u64>,
    pub traffic: Option<TrafficLevel>,
    pub query: Option<QueryInstant>,
    pub k: Option<usize>,
    pub resolution: Option<usize>,
    pub docs_dir: Option<PathBuf>,
    pub plots_dir: Option<PathBuf>,
}

impl PipelineConfig {
    /// Reads `path`, or returns the defaults when there is none.
    pub fn load(path: Option<&std::path::Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::load_from_str(&s).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: PipelineConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.k > 0, "k must be > 0, got {}", self.k);
        anyhow::ensure!(
            self.resolution >= 2,
            "resolution must be >= 2, got {}",
            self.resolution
        );
        self.roster_config()?;
        self.packer_config()?;
        Ok(())
    }

    /// A traffic override also drops any explicit failure budget.
    pub fn apply(&mut self, o: Overrides) {
        if let Some(seed) = o.seed {
            self.seed = seed;
        }
        if let Some(traffic) = o.traffic {
            self.traffic = traffic;
            self.failure_budget = None;
        }
        if let Some(query) = o.query {
            self.query = query;
        }
        if let Some(k) = o.k {
            self.k = k;
        }
        if let Some(resolution) = o.resolution {
            self.resolution = resolution;
        }
        if let Some(dir) = o.docs_dir {
            self.docs_dir = dir;
        }
        if let Some(dir) = o.plots_dir {
            self.plots_dir = dir;
        }
    }

    pub fn roster_config(&self) -> anyhow::Result<RosterGenConfig> {
        let zones = self
            .zones
            .iter()
            .map(|z| {
                ZoneSpec::new(
                    z.id.as_str(),
                    z.machines,
                    (z.latitude[0], z.latitude[1]),
                    (z.longitude[0], z.longitude[1]),
                )
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(RosterGenConfig::new(zones, self.seed)?)
    }

    /// The packer draws from its own stream, one past the roster seed.
    pub fn packer_config(&self) -> anyhow::Result<PackerConfig> {
        let mut builder = PackerConfigBuilder::new()
            .spots_per_machine(self.spots_per_machine)
            .windows(self.windows.iter().map(|w| (w[0], w[1])))
            .durations_min(self.durations_min.iter().copied())
            .traffic(self.traffic)
            .seed(self.seed.wrapping_add(1));
        if let Some(budget) = self.failure_budget {
            builder = builder.failure_budget(budget);
        }
        Ok(builder.build()?)
    }

    pub fn machines_path(&self) -> PathBuf {
        self.docs_dir.join(nontao_io::files::MACHINES)
    }

    pub fn events_path(&self) -> PathBuf {
        self.docs_dir.join(nontao_io::files::EVENTS)
    }

    pub fn panel_path(&self) -> PathBuf {
        self.docs_dir.join(nontao_io::files::PANEL)
    }

    pub fn results_path(&self) -> PathBuf {
        self.docs_dir.join(nontao_io::files::RESULTS)
    }

    pub fn display_plot_path(&self) -> PathBuf {
        self.plots_dir.join(nontao_render::files::DISPLAY)
    }

    pub fn wait_plot_path(&self) -> PathBuf {
        self.plots_dir.join(nontao_render::files::WAIT_TIME)
    }

    pub fn free_plot_path(&self) -> PathBuf {
        self.plots_dir.join(nontao_render::files::FREE_PROBABILITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = PipelineConfig::load_from_str("").unwrap();
        assert_eq!(cfg, PipelineConfig::default());
        assert_eq!(cfg.zones.len(), 5);
        assert_eq!(cfg.windows, vec![[10, 14], [16, 20]]);
        assert_eq!(cfg.k, 3);
        assert_eq!(cfg.resolution, 50);
        assert_eq!(cfg.query.to_string(), "10:30:00");
        assert_eq!(cfg.machines_path(), PathBuf::from("docs/nontao_machines.csv"));
        assert_eq!(cfg.free_plot_path(), PathBuf::from("plots/nontao_free_prob.png"));
    }

    #[test]
    fn defaults_round_trip_into_generator_configs() {
        let cfg = PipelineConfig::default();
        assert_eq!(cfg.roster_config().unwrap(), RosterGenConfig::default());
        let packer = cfg.packer_config().unwrap();
        assert_eq!(packer.failure_budget(), 10);
        assert_eq!(packer.seed(), cfg.seed + 1);
    }

    #[test]
    fn parses_a_full_file() {
        let text = r#"
            seed = 7
            spots_per_machine = 2
            windows = [[8, 9]]
            durations_min = [45]
            traffic = "High"
            query = "now"
            k = 5
            resolution = 20
            docs_dir = "out/docs"

            [[zones]]
            id = "Z1"
            machines = 3
            latitude = [1.0, 0.0]
            longitude = [2.0, 3.0]
        "#;
        let cfg = PipelineConfig::load_from_str(text).unwrap();
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.traffic, TrafficLevel::High);
        assert_eq!(cfg.query, QueryInstant::Now);
        assert_eq!(cfg.zones.len(), 1);
        assert_eq!(cfg.plots_dir, PathBuf::from("plots"));
        assert_eq!(cfg.events_path(), PathBuf::from("out/docs/nontao_data.csv"));
        let packer = cfg.packer_config().unwrap();
        assert_eq!(packer.failure_budget(), 100);
        assert_eq!(packer.durations_min(), &[45]);
    }

    #[test]
    fn rejects_invalid_files() {
        assert!(PipelineConfig::load_from_str("k = 0").is_err());
        assert!(PipelineConfig::load_from_str("resolution = 1").is_err());
        assert!(PipelineConfig::load_from_str("traffic = \"rush\"").is_err());
        assert!(PipelineConfig::load_from_str("query = \"25:00:00\"").is_err());
        assert!(PipelineConfig::load_from_str("windows = [[14, 10]]").is_err());
        assert!(PipelineConfig::load_from_str("durations_min = []").is_err());
        assert!(PipelineConfig::load_from_str("zones = []").is_err());
        assert!(PipelineConfig::load_from_str("colour = \"red\"").is_err());
    }

    #[test]
    fn overrides_win_over_the_file() {
        let mut cfg = PipelineConfig::load_from_str("failure_budget = 4").unwrap();
        assert_eq!(cfg.packer_config().unwrap().failure_budget(), 4);
        cfg.apply(Overrides {
            seed: Some(99),
            traffic: Some(TrafficLevel::Low),
            k: Some(1),
            ..Overrides::default()
        });
        assert_eq!(cfg.seed, 99);
        assert_eq!(cfg.k, 1);
        assert_eq!(cfg.packer_config().unwrap().failure_budget(), 1);
    }

    #[test]
    fn query_instant_parsing() {
        assert_eq!("NOW".parse::<QueryInstant>(), Ok(QueryInstant::Now));
        assert_eq!(
            "08:15:00".parse::<QueryInstant>(),
            Ok(QueryInstant::At(TimeOfDay::from_hms(8, 15, 0).unwrap()))
        );
        assert!("soon".parse::<QueryInstant>().is_err());
    }
}
