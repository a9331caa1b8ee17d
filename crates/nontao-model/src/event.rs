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

use crate::{
    id::{MachineId, SpotId, ZoneId},
    machine::Machine,
};
use nontao_core::{
    geo::GeoPoint,
    time::{TimeDelta, TimeInterval, TimeOfDay},
};
use std::fmt::Display;

/// One spot of one machine in use over a half-open `[start, end)`.
///
/// The machine's zone and location travel with the event so the event
/// table can be exchanged on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct OccupancyEvent {
    zone: ZoneId,
    machine: MachineId,
    location: GeoPoint,
    spot: SpotId,
    interval: TimeInterval,
}

impl OccupancyEvent {
    #[inline]
    pub fn new(
        zone: ZoneId,
        machine: MachineId,
        location: GeoPoint,
        spot: SpotId,
        interval: TimeInterval,
    ) -> Self {
        Self {
            zone,
            machine,
            location,
            spot,
            interval,
        }
    }

    #[inline]
    pub fn on_machine(machine: &Machine, spot: SpotId, interval: TimeInterval) -> Self {
        Self::new(
            machine.zone().clone(),
            machine.id().clone(),
            machine.location(),
            spot,
            interval,
        )
    }

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
    pub fn spot(&self) -> SpotId {
        self.spot
    }

    #[inline]
    pub fn interval(&self) -> TimeInterval {
        self.interval
    }

    #[inline]
    pub fn start(&self) -> TimeOfDay {
        self.interval.start()
    }

    #[inline]
    pub fn end(&self) -> TimeOfDay {
        self.interval.end()
    }

    #[inline]
    pub fn duration(&self) -> TimeDelta {
        self.interval.duration()
    }

    /// Strictly inside the interval: an event that starts or ends exactly
    /// at `instant` is not active.
    #[inline]
    pub fn is_active_at(&self, instant: TimeOfDay) -> bool {
        self.start() < instant && instant < self.end()
    }

    /// Ordering key of the event table: zone, machine, spot, start.
    #[inline]
    pub fn sort_key(&self) -> (&ZoneId, &MachineId, SpotId, TimeOfDay) {
        (&self.zone, &self.machine, self.spot, self.start())
    }
}

impl Display for OccupancyEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}#{} {}..{}",
            self.zone,
            self.machine,
            self.spot,
            self.start(),
            self.end()
        )
    }
}

/// Sorts events by zone, machine, spot and start time.
pub fn sort_events(events: &mut [OccupancyEvent]) {
    events.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
}
