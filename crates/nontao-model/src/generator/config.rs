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

use std::collections::HashSet;
use std::fmt::Display;

use nontao_core::time::{SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE};

use super::err::{InvalidIntervalError, PackerConfigBuildError, RosterConfigError};
use super::policies::{StartWindow, TrafficLevel, ZoneSpec};

/// Configuration for synthetic roster generation.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterGenConfig {
    pub(crate) zones: Vec<ZoneSpec>,
    pub(crate) seed: u64,
}

impl Default for RosterGenConfig {
    fn default() -> Self {
        #[inline]
        fn zone(id: &str, lat: (f64, f64), lon: (f64, f64)) -> ZoneSpec {
            ZoneSpec::new(id, 10, lat, lon).expect("finite default bounds")
        }

        Self {
            zones: vec![
                zone("1A", (42.846520, 42.841549), (-2.679226, -2.668133)),
                zone("1B", (42.846520, 42.841549), (-2.668133, -2.662672)),
                zone("2A", (42.855290, 42.846520), (-2.673395, -2.662672)),
                zone("2B", (42.855290, 42.850894), (-2.679226, -2.673395)),
                zone("2C", (42.850894, 42.846520), (-2.679226, -2.673395)),
            ],
            seed: 42,
        }
    }
}

impl RosterGenConfig {
    pub fn new(zones: Vec<ZoneSpec>, seed: u64) -> Result<Self, RosterConfigError> {
        if zones.is_empty() {
            return Err(RosterConfigError::MissingZones);
        }
        let mut seen = HashSet::with_capacity(zones.len());
        for z in &zones {
            if !seen.insert(z.zone()) {
                return Err(RosterConfigError::DuplicateZone(z.zone().clone()));
            }
        }
        if zones.iter().map(ZoneSpec::machines).sum::<usize>() == 0 {
            return Err(RosterConfigError::NoMachines);
        }
        Ok(Self { zones, seed })
    }

    #[inline]
    pub fn zones(&self) -> &[ZoneSpec] {
        &self.zones
    }

    #[inline]
    pub fn total_machines(&self) -> usize {
        self.zones.iter().map(ZoneSpec::machines).sum()
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Same zones, different seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl Display for RosterGenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let zones: Vec<String> = self
            .zones
            .iter()
            .map(|z| format!("{}x{}", z.zone(), z.machines()))
            .collect();
        write!(
            f,
            "RosterGenConfig {{ zones: [{}], seed: {} }}",
            zones.join(", "),
            self.seed
        )
    }
}

/// Configuration of the interval packer.
#[derive(Debug, Clone, PartialEq)]
pub struct PackerConfig {
    pub(crate) spots_per_machine: u32,
    pub(crate) windows: Vec<StartWindow>,
    pub(crate) durations_min: Vec<u32>,
    pub(crate) failure_budget: usize,
    pub(crate) seed: u64,
}

impl Default for PackerConfig {
    fn default() -> Self {
        Self {
            spots_per_machine: 4,
            windows: vec![
                StartWindow::new(10, 14).expect("valid default window"),
                StartWindow::new(16, 20).expect("valid default window"),
            ],
            durations_min: vec![15, 30, 60, 90],
            failure_budget: TrafficLevel::Medium.failure_budget(),
            seed: 43,
        }
    }
}

impl PackerConfig {
    pub fn new(
        spots_per_machine: u32,
        windows: Vec<StartWindow>,
        durations_min: Vec<u32>,
        failure_budget: usize,
        seed: u64,
    ) -> Result<Self, PackerConfigBuildError> {
        if spots_per_machine == 0 {
            return Err(PackerConfigBuildError::ZeroSpots);
        }
        if windows.is_empty() {
            return Err(PackerConfigBuildError::MissingWindows);
        }
        let Some(&shortest) = durations_min.iter().min() else {
            return Err(PackerConfigBuildError::MissingDurations);
        };
        if shortest == 0 {
            return Err(InvalidIntervalError::ZeroDuration.into());
        }
        if failure_budget == 0 {
            return Err(PackerConfigBuildError::ZeroFailureBudget);
        }

        // An event has to end strictly before midnight.
        let fits = windows.iter().any(|w| {
            u64::from(w.start_hour()) * u64::from(SECONDS_PER_HOUR)
                + u64::from(shortest) * u64::from(SECONDS_PER_MINUTE)
                < u64::from(SECONDS_PER_DAY)
        });
        if !fits {
            return Err(InvalidIntervalError::NoStartBeforeMidnight {
                shortest_duration_min: shortest,
            }
            .into());
        }

        Ok(Self {
            spots_per_machine,
            windows,
            durations_min,
            failure_budget,
            seed,
        })
    }

    #[inline]
    pub fn spots_per_machine(&self) -> u32 {
        self.spots_per_machine
    }

    #[inline]
    pub fn windows(&self) -> &[StartWindow] {
        &self.windows
    }

    #[inline]
    pub fn durations_min(&self) -> &[u32] {
        &self.durations_min
    }

    #[inline]
    pub fn failure_budget(&self) -> usize {
        self.failure_budget
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Display for PackerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let windows: Vec<String> = self.windows.iter().map(|w| w.to_string()).collect();
        write!(
            f,
            "PackerConfig {{ spots_per_machine: {}, windows: [{}], durations_min: {:?}, \
             failure_budget: {}, seed: {} }}",
            self.spots_per_machine,
            windows.join(", "),
            self.durations_min,
            self.failure_budget,
            self.seed
        )
    }
}

/// Builder for `PackerConfig`. Unset fields fall back to the defaults.
#[derive(Debug, Clone)]
pub struct PackerConfigBuilder {
    spots_per_machine: u32,
    windows: Vec<(u32, u32)>,
    durations_min: Vec<u32>,
    failure_budget: usize,
    seed: u64,
}

impl Default for PackerConfigBuilder {
    fn default() -> Self {
        let d = PackerConfig::default();
        Self {
            spots_per_machine: d.spots_per_machine,
            windows: d
                .windows
                .iter()
                .map(|w| (w.start_hour(), w.end_hour()))
                .collect(),
            durations_min: d.durations_min,
            failure_budget: d.failure_budget,
            seed: d.seed,
        }
    }
}

impl PackerConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spots_per_machine(mut self, spots: u32) -> Self {
        self.spots_per_machine = spots;
        self
    }

    /// Replaces all start windows; pairs are `(start_hour, end_hour)`.
    pub fn windows(mut self, windows: impl IntoIterator<Item = (u32, u32)>) -> Self {
        self.windows = windows.into_iter().collect();
        self
    }

    pub fn durations_min(mut self, durations: impl IntoIterator<Item = u32>) -> Self {
        self.durations_min = durations.into_iter().collect();
        self
    }

    pub fn traffic(mut self, level: TrafficLevel) -> Self {
        self.failure_budget = level.failure_budget();
        self
    }

    pub fn failure_budget(mut self, budget: usize) -> Self {
        self.failure_budget = budget;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(self) -> Result<PackerConfig, PackerConfigBuildError> {
        let windows = self
            .windows
            .into_iter()
            .map(|(start, end)| StartWindow::new(start, end))
            .collect::<Result<Vec<_>, _>>()?;
        PackerConfig::new(
            self.spots_per_machine,
            windows,
            self.durations_min,
            self.failure_budget,
            self.seed,
        )
    }
}
