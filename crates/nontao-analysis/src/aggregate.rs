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

use std::collections::BTreeMap;

use nontao_core::{geo::GeoPoint, time::TimeOfDay};
use nontao_model::id::{MachineId, ZoneId};
use tracing::{debug, instrument};

use crate::{knn::SpatialField, panel::Panel};

/// Per-machine means over the spots of a panel.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedMachineStats {
    zone: ZoneId,
    machine: MachineId,
    location: GeoPoint,
    time: TimeOfDay,
    wait_seconds: f64,
    free: f64,
}

impl AggregatedMachineStats {
    #[inline]
    pub fn zone(&self) -> &ZoneId {
        &self.zone
    }

    #[inline]
    pub fn machine(&self) -> &MachineId {
        &self.machine
    }

    #[inline]
    pub fn location(&self) -> GeoPoint {
        self.location
    }

    #[inline]
    pub fn time(&self) -> TimeOfDay {
        self.time
    }

    /// Mean wait over the machine's spots, in seconds.
    #[inline]
    pub fn wait_seconds(&self) -> f64 {
        self.wait_seconds
    }

    /// Fraction of the machine's spots that are free, in `[0, 1]`.
    #[inline]
    pub fn free_probability(&self) -> f64 {
        self.free
    }

    /// Splits the stats into the wait-time field and the free-probability
    /// field, both observed at the machine locations.
    pub fn to_field_columns(stats: &[AggregatedMachineStats]) -> (SpatialField, SpatialField) {
        let points: Vec<GeoPoint> = stats.iter().map(|s| s.location).collect();
        let wait = stats.iter().map(|s| s.wait_seconds).collect();
        let free = stats.iter().map(|s| s.free).collect();
        (
            SpatialField::new(points.clone(), wait).expect("one value per point"),
            SpatialField::new(points, free).expect("one value per point"),
        )
    }
}

#[derive(Debug)]
struct Accumulator {
    location: GeoPoint,
    spots: usize,
    free: usize,
    wait_sum: f64,
}

/// Collapses the panel to one row per machine, ordered by (zone, machine).
#[instrument(level = "info", skip_all, fields(rows = panel.len()))]
pub fn aggregate(panel: &Panel) -> Vec<AggregatedMachineStats> {
    let mut groups: BTreeMap<(&ZoneId, &MachineId), Accumulator> = BTreeMap::new();
    for row in panel {
        let acc = groups
            .entry((row.zone(), row.machine()))
            .or_insert_with(|| Accumulator {
                location: row.location(),
                spots: 0,
                free: 0,
                wait_sum: 0.0,
            });
        acc.spots += 1;
        acc.free += usize::from(row.is_free());
        acc.wait_sum += row.wait_seconds();
    }

    let stats: Vec<AggregatedMachineStats> = groups
        .into_iter()
        .map(|((zone, machine), acc)| AggregatedMachineStats {
            zone: zone.clone(),
            machine: machine.clone(),
            location: acc.location,
            time: panel.instant(),
            wait_seconds: acc.wait_sum / acc.spots as f64,
            free: acc.free as f64 / acc.spots as f64,
        })
        .collect();

    debug!(machines = stats.len(), "Panel aggregated");
    stats
}
