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

use std::fmt::Display;

use nontao_core::{
    intervalset::IntervalSet,
    time::{TimeDelta, TimeInterval, TimeOfDay},
};
use rand::{Rng, SeedableRng, seq::IndexedRandom};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, instrument, trace};

use super::config::PackerConfig;
use crate::{
    event::{OccupancyEvent, sort_events},
    id::SpotId,
    machine::Roster,
};

/// Counters collected while packing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PackingStats {
    pub attempts: usize,
    pub placed: usize,
    pub rejected_no_slot: usize,
    pub rejected_midnight: usize,
    /// Length of the failure streak that ended the run.
    pub trailing_failures: usize,
}

impl PackingStats {
    #[inline]
    pub fn rejected(&self) -> usize {
        self.rejected_no_slot + self.rejected_midnight
    }
}

impl Display for PackingStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PackingStats {{ attempts: {}, placed: {}, rejected_no_slot: {}, rejected_midnight: {}, \
             trailing_failures: {} }}",
            self.attempts,
            self.placed,
            self.rejected_no_slot,
            self.rejected_midnight,
            self.trailing_failures
        )
    }
}

/// The outcome of a packing run. Events are sorted by (zone, machine, spot, start).
#[derive(Debug, Clone, PartialEq)]
pub struct Packing {
    pub events: Vec<OccupancyEvent>,
    pub stats: PackingStats,
}

/// Why a sampled interval was not placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    Midnight,
    NoSlot,
}

/// Randomly packs non-overlapping occupancy intervals onto the
/// (machine, spot) slots of a roster until too many consecutive samples fail.
///
/// The packer is best effort: it may stop while some slots could still take
/// an interval.
pub struct IntervalPacker<'r> {
    roster: &'r Roster,
    config: PackerConfig,
    rng: ChaCha8Rng,
    books: Vec<IntervalSet<TimeOfDay>>,
}

impl<'r> IntervalPacker<'r> {
    pub fn new(roster: &'r Roster, config: PackerConfig) -> Self {
        let slots = roster.len() * config.spots_per_machine() as usize;
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed()),
            books: vec![IntervalSet::new(); slots],
            roster,
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &PackerConfig {
        &self.config
    }

    #[inline]
    fn spots(&self) -> usize {
        self.config.spots_per_machine() as usize
    }

    #[inline]
    fn slot_of(&self, slot: usize) -> (usize, SpotId) {
        let spots = self.spots();
        (slot / spots, SpotId::new((slot % spots) as u32 + 1))
    }

    fn sample_start(&mut self) -> TimeOfDay {
        let window = *self
            .config
            .windows()
            .choose(&mut self.rng)
            .expect("config holds at least one window");
        let hour = self
            .rng
            .random_range(window.start_hour()..window.end_hour());
        let minute = self.rng.random_range(0..60);
        let second = self.rng.random_range(0..60);
        TimeOfDay::from_hms(hour, minute, second).expect("window hours lie within the day")
    }

    fn sample_duration(&mut self) -> TimeDelta {
        let minutes = *self
            .config
            .durations_min()
            .choose(&mut self.rng)
            .expect("config holds at least one duration");
        TimeDelta::from_minutes(i64::from(minutes))
    }

    /// Slots whose book does not overlap `interval`, in roster then spot order.
    fn free_slots(&self, interval: TimeInterval) -> Vec<usize> {
        self.books
            .iter()
            .enumerate()
            .filter(|(_, book)| !book.overlaps(interval))
            .map(|(slot, _)| slot)
            .collect()
    }

    /// Books `interval` into a uniformly drawn free slot.
    fn try_place(&mut self, interval: TimeInterval) -> Result<usize, Rejection> {
        let candidates = self.free_slots(interval);
        let slot = *candidates.choose(&mut self.rng).ok_or(Rejection::NoSlot)?;
        self.books[slot].insert_and_coalesce(interval);
        Ok(slot)
    }

    fn attempt(&mut self) -> Result<OccupancyEvent, Rejection> {
        let start = self.sample_start();
        let duration = self.sample_duration();
        let interval = start.span_of(duration).ok_or(Rejection::Midnight)?;
        let slot = self.try_place(interval)?;
        let (machine_index, spot) = self.slot_of(slot);
        let machine = &self.roster.as_slice()[machine_index];
        Ok(OccupancyEvent::on_machine(machine, spot, interval))
    }

    /// Runs the packer to completion.
    #[instrument(level = "info", skip_all)]
    pub fn generate(&mut self) -> Packing {
        let mut events = Vec::new();
        let mut stats = PackingStats::default();

        if self.books.is_empty() {
            info!("Roster has no slots; nothing to pack");
            return Packing { events, stats };
        }

        let budget = self.config.failure_budget();
        let mut consecutive_failures = 0usize;
        while consecutive_failures < budget {
            stats.attempts += 1;
            match self.attempt() {
                Ok(event) => {
                    debug!(
                        machine = %event.machine(),
                        spot = %event.spot(),
                        interval = %event.interval(),
                        "Placed event"
                    );
                    stats.placed += 1;
                    consecutive_failures = 0;
                    events.push(event);
                }
                Err(reason) => {
                    match reason {
                        Rejection::Midnight => stats.rejected_midnight += 1,
                        Rejection::NoSlot => stats.rejected_no_slot += 1,
                    }
                    consecutive_failures += 1;
                    trace!(?reason, consecutive_failures, "Rejected sample");
                }
            }
        }

        stats.trailing_failures = consecutive_failures;
        sort_events(&mut events);
        info!(
            events = stats.placed,
            attempts = stats.attempts,
            rejected_no_slot = stats.rejected_no_slot,
            rejected_midnight = stats.rejected_midnight,
            "Packing finished"
        );
        Packing { events, stats }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        generator::{PackerConfigBuilder, RosterGenConfig, RosterGenerator, TrafficLevel, ZoneSpec},
        id::MachineId,
    };
    use std::collections::HashMap;

    fn single_machine_roster() -> Roster {
        let zone = ZoneSpec::new("Z", 1, (0.0, 1.0), (0.0, 1.0)).unwrap();
        RosterGenerator::new(RosterGenConfig::new(vec![zone], 1).unwrap()).generate()
    }

    fn span(a: (u32, u32, u32), b: (u32, u32, u32)) -> TimeInterval {
        TimeInterval::new(
            TimeOfDay::from_hms(a.0, a.1, a.2).unwrap(),
            TimeOfDay::from_hms(b.0, b.1, b.2).unwrap(),
        )
    }

    fn assert_no_overlap(events: &[OccupancyEvent]) {
        let mut by_slot: HashMap<(MachineId, SpotId), Vec<TimeInterval>> = HashMap::new();
        for e in events {
            by_slot
                .entry((e.machine().clone(), e.spot()))
                .or_default()
                .push(e.interval());
        }
        for intervals in by_slot.values() {
            for (i, a) in intervals.iter().enumerate() {
                for b in &intervals[i + 1..] {
                    assert!(!a.intersects(b), "{a} overlaps {b}");
                }
            }
        }
    }

    #[test]
    fn default_run_never_double_books_a_spot() {
        let roster = RosterGenerator::new(RosterGenConfig::default()).generate();
        let cfg = PackerConfigBuilder::new()
            .traffic(TrafficLevel::High)
            .build()
            .unwrap();
        let packing = IntervalPacker::new(&roster, cfg.clone()).generate();
        assert!(!packing.events.is_empty());
        assert_no_overlap(&packing.events);
        for e in &packing.events {
            assert!(e.start() < e.end());
            assert!(cfg.windows().iter().any(|w| w.admits(e.start())));
            assert!((1..=4).contains(&e.spot().value()));
            assert!(cfg.durations_min().contains(&((e.duration().seconds() / 60) as u32)));
        }
    }

    #[test]
    fn stats_add_up_and_end_with_a_full_failure_budget() {
        let roster = single_machine_roster();
        let cfg = PackerConfigBuilder::new()
            .spots_per_machine(1)
            .windows([(0, 24)])
            .durations_min([60])
            .failure_budget(3)
            .seed(11)
            .build()
            .unwrap();
        let packing = IntervalPacker::new(&roster, cfg).generate();
        let s = packing.stats;
        assert_eq!(s.placed, packing.events.len());
        assert_eq!(s.attempts, s.placed + s.rejected());
        assert!(s.placed >= 1);
        assert_eq!(s.trailing_failures, 3);
        assert!(s.rejected() >= s.trailing_failures);
        assert_no_overlap(&packing.events);
        for e in &packing.events {
            assert_eq!(e.duration(), TimeDelta::from_minutes(60));
        }
    }

    #[test]
    fn a_placement_resets_the_failure_streak() {
        let roster = RosterGenerator::new(RosterGenConfig::default()).generate();
        let high = PackerConfigBuilder::new()
            .traffic(TrafficLevel::High)
            .build()
            .unwrap();
        let s = IntervalPacker::new(&roster, high).generate().stats;
        assert_eq!(s.trailing_failures, 100);
        // Failures before the final streak were forgiven by later placements.
        assert!(s.rejected() > s.trailing_failures);

        let low = PackerConfigBuilder::new()
            .traffic(TrafficLevel::Low)
            .build()
            .unwrap();
        let s = IntervalPacker::new(&roster, low).generate().stats;
        assert_eq!(s.trailing_failures, 1);
        assert_eq!(s.rejected(), 1);
        assert_eq!(s.attempts, s.placed + 1);
    }

    #[test]
    fn identical_and_overlapping_samples_are_rejected_but_adjacent_fit() {
        let roster = single_machine_roster();
        let cfg = PackerConfigBuilder::new()
            .spots_per_machine(1)
            .windows([(0, 24)])
            .durations_min([60])
            .failure_budget(3)
            .build()
            .unwrap();
        let mut packer = IntervalPacker::new(&roster, cfg);

        let first = span((9, 0, 0), (10, 0, 0));
        assert_eq!(packer.try_place(first), Ok(0));
        assert_eq!(packer.try_place(first), Err(Rejection::NoSlot));
        assert_eq!(
            packer.try_place(span((9, 30, 0), (10, 30, 0))),
            Err(Rejection::NoSlot)
        );
        assert_eq!(
            packer.try_place(span((9, 15, 0), (9, 45, 0))),
            Err(Rejection::NoSlot)
        );
        assert_eq!(packer.try_place(span((10, 0, 0), (11, 0, 0))), Ok(0));
        assert_eq!(packer.try_place(span((8, 0, 0), (9, 0, 0))), Ok(0));
    }

    #[test]
    fn late_samples_are_dropped_at_midnight() {
        let roster = single_machine_roster();
        let cfg = PackerConfigBuilder::new()
            .spots_per_machine(1)
            .windows([(23, 24)])
            .durations_min([30, 90])
            .failure_budget(20)
            .seed(5)
            .build()
            .unwrap();
        let packing = IntervalPacker::new(&roster, cfg).generate();
        assert!(packing.stats.rejected_midnight > 0);
        for e in &packing.events {
            assert_eq!(e.duration(), TimeDelta::from_minutes(30));
            assert!(e.start() < e.end());
        }
    }

    #[test]
    fn same_seed_same_packing() {
        let roster = RosterGenerator::new(RosterGenConfig::default()).generate();
        let cfg = PackerConfig::default();
        let a = IntervalPacker::new(&roster, cfg.clone()).generate();
        let b = IntervalPacker::new(&roster, cfg).generate();
        assert_eq!(a, b);
    }

    #[test]
    fn events_come_out_sorted() {
        let roster = RosterGenerator::new(RosterGenConfig::default()).generate();
        let packing = IntervalPacker::new(&roster, PackerConfig::default()).generate();
        let keys: Vec<_> = packing.events.iter().map(|e| e.sort_key()).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn empty_roster_packs_nothing() {
        let roster = Roster::default();
        let packing = IntervalPacker::new(&roster, PackerConfig::default()).generate();
        assert!(packing.events.is_empty());
        assert_eq!(packing.stats, PackingStats::default());
    }
}
