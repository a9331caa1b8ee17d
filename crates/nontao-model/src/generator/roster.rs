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

use nontao_core::{geo::GeoPoint, primitives::Interval};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, instrument};

use super::config::RosterGenConfig;
use crate::{
    id::MachineId,
    machine::{Machine, Roster},
};

const COORDINATE_DECIMALS: i32 = 6;

/// Scatters machines uniformly over the configured zone boxes.
pub struct RosterGenerator {
    config: RosterGenConfig,
    rng: ChaCha8Rng,
}

impl From<RosterGenConfig> for RosterGenerator {
    fn from(config: RosterGenConfig) -> Self {
        Self::new(config)
    }
}

impl RosterGenerator {
    pub fn new(config: RosterGenConfig) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed()),
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &RosterGenConfig {
        &self.config
    }

    #[inline]
    fn round(value: f64) -> f64 {
        let scale = 10f64.powi(COORDINATE_DECIMALS);
        (value * scale).round() / scale
    }

    fn sample_in(&mut self, range: Interval<f64>) -> f64 {
        if range.is_empty() {
            return range.start();
        }
        Self::round(self.rng.random_range(range.start()..range.end()))
    }

    /// Machines come out zone by zone, numbered `n01`, `n02`, ... across the roster.
    #[instrument(level = "info", skip_all)]
    pub fn generate(&mut self) -> Roster {
        let total = self.config.total_machines();
        let zones = self.config.zones().to_vec();
        let mut machines = Vec::with_capacity(total);

        for zone in &zones {
            for _ in 0..zone.machines() {
                let latitude = self.sample_in(zone.latitude());
                let longitude = self.sample_in(zone.longitude());
                let id = MachineId::sequential(machines.len() + 1, total);
                machines.push(Machine::new(
                    zone.zone().clone(),
                    id,
                    GeoPoint::new(longitude, latitude),
                ));
            }
            debug!(zone = %zone.zone(), machines = zone.machines(), "Zone populated");
        }

        Roster::new(machines).expect("sequential machine ids are unique")
    }
}
