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

//! Snapshot of every (machine, spot) slot at one instant.

use nontao_core::{geo::GeoPoint, time::TimeOfDay};
use nontao_model::{
    event::OccupancyEvent,
    id::{MachineId, SpotId, ZoneId},
    machine::Roster,
};
use tracing::{debug, instrument};

use crate::err::PanelError;

/// Status of one spot of one machine at the panel instant.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelRow {
    zone: ZoneId,
    machine: MachineId,
    location: GeoPoint,
    spot: SpotId,
    time: TimeOfDay,
    free: bool,
    wait_seconds: f64,
}

impl PanelRow {
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
    pub fn time(&self) -> TimeOfDay {
        self.time
    }

    #[inline]
    pub fn is_free(&self) -> bool {
        self.free
    }

    /// Seconds until the spot frees up; `0.0` when it is already free.
    #[inline]
    pub fn wait_seconds(&self) -> f64 {
        self.wait_seconds
    }
}

/// The (machine x spot) cross product at a single instant, ordered by
/// (machine, spot).
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    instant: TimeOfDay,
    spots_per_machine: u32,
    rows: Vec<PanelRow>,
}

impl Panel {
    #[inline]
    pub fn instant(&self) -> TimeOfDay {
        self.instant
    }

    #[inline]
    pub fn spots_per_machine(&self) -> u32 {
        self.spots_per_machine
    }

    #[inline]
    pub fn rows(&self) -> &[PanelRow] {
        &self.rows
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn occupied(&self) -> usize {
        self.rows.iter().filter(|r| !r.free).count()
    }
}

impl<'a> IntoIterator for &'a Panel {
    type Item = &'a PanelRow;
    type IntoIter = std::slice::Iter<'a, PanelRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Snapshot with the spot count taken as the highest spot seen in `events`.
pub fn snapshot(
    roster: &Roster,
    events: &[OccupancyEvent],
    instant: TimeOfDay,
) -> Result<Panel, PanelError> {
    let spots = events
        .iter()
        .map(|e| e.spot().value())
        .max()
        .ok_or(PanelError::NoEvents)?;
    snapshot_with_spots(roster, events, instant, spots)
}

/// Expands `roster` into `spots_per_machine` rows per machine and marks the
/// slots held by an event active at `instant` (`start < instant < end`).
#[instrument(level = "info", skip_all, fields(instant = %instant, spots = spots_per_machine))]
pub fn snapshot_with_spots(
    roster: &Roster,
    events: &[OccupancyEvent],
    instant: TimeOfDay,
    spots_per_machine: u32,
) -> Result<Panel, PanelError> {
    if spots_per_machine == 0 {
        return Err(PanelError::ZeroSpots);
    }
    let spots = spots_per_machine as usize;

    let mut rows: Vec<PanelRow> = roster
        .iter()
        .flat_map(|m| {
            SpotId::range(spots_per_machine).map(move |spot| PanelRow {
                zone: m.zone().clone(),
                machine: m.id().clone(),
                location: m.location(),
                spot,
                time: instant,
                free: true,
                wait_seconds: 0.0,
            })
        })
        .collect();

    let mut active = 0usize;
    for event in events {
        let machine_index = roster
            .position(event.machine())
            .ok_or_else(|| PanelError::UnknownMachine(event.machine().clone()))?;
        if event.spot().value() == 0 || event.spot().value() > spots_per_machine {
            return Err(PanelError::SpotOutOfRange {
                machine: event.machine().clone(),
                spot: event.spot(),
                spots_per_machine,
            });
        }
        if !event.is_active_at(instant) {
            continue;
        }

        active += 1;
        let row = &mut rows[machine_index * spots + event.spot().index()];
        let wait = (event.end() - instant).as_seconds_f64();
        row.free = false;
        row.wait_seconds = row.wait_seconds.max(wait);
    }

    rows.sort_by(|a, b| (&a.machine, a.spot).cmp(&(&b.machine, b.spot)));
    debug!(rows = rows.len(), active, "Panel built");

    Ok(Panel {
        instant,
        spots_per_machine,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nontao_core::time::TimeInterval;
    use nontao_model::machine::Machine;

    fn t(h: u32, m: u32, s: u32) -> TimeOfDay {
        TimeOfDay::from_hms(h, m, s).unwrap()
    }

    fn two_machines() -> Roster {
        Roster::new(vec![
            Machine::new("Z".into(), "m1".into(), GeoPoint::new(0.0, 0.0)),
            Machine::new("Z".into(), "m2".into(), GeoPoint::new(1.0, 1.0)),
        ])
        .unwrap()
    }

    fn event(roster: &Roster, idx: usize, spot: u32, a: TimeOfDay, b: TimeOfDay) -> OccupancyEvent {
        OccupancyEvent::on_machine(
            &roster.as_slice()[idx],
            SpotId::new(spot),
            TimeInterval::new(a, b),
        )
    }

    #[test]
    fn active_event_blocks_its_slot_until_it_ends() {
        let roster = two_machines();
        let events = vec![event(&roster, 0, 1, t(9, 0, 0), t(11, 0, 0))];
        let panel = snapshot(&roster, &events, t(10, 0, 0)).unwrap();

        assert_eq!(panel.len(), 2);
        let first = &panel.rows()[0];
        assert_eq!(first.machine().as_str(), "m1");
        assert!(!first.is_free());
        assert_eq!(first.wait_seconds(), 3600.0);
        let second = &panel.rows()[1];
        assert_eq!(second.machine().as_str(), "m2");
        assert!(second.is_free());
        assert_eq!(second.wait_seconds(), 0.0);
    }

    #[test]
    fn boundaries_are_not_active() {
        let roster = two_machines();
        let events = vec![event(&roster, 0, 1, t(9, 0, 0), t(11, 0, 0))];
        for at in [t(9, 0, 0), t(11, 0, 0)] {
            let panel = snapshot(&roster, &events, at).unwrap();
            assert_eq!(panel.occupied(), 0);
        }
        let panel = snapshot(&roster, &events, t(9, 0, 1)).unwrap();
        assert_eq!(panel.rows()[0].wait_seconds(), 7199.0);
    }

    #[test]
    fn spot_count_comes_from_the_events() {
        let roster = two_machines();
        let events = vec![
            event(&roster, 1, 3, t(8, 0, 0), t(8, 30, 0)),
            event(&roster, 0, 1, t(8, 0, 0), t(9, 0, 0)),
        ];
        let panel = snapshot(&roster, &events, t(8, 15, 0)).unwrap();
        assert_eq!(panel.spots_per_machine(), 3);
        assert_eq!(panel.len(), 6);
        let keys: Vec<(&str, u32)> = panel
            .rows()
            .iter()
            .map(|r| (r.machine().as_str(), r.spot().value()))
            .collect();
        assert_eq!(
            keys,
            vec![("m1", 1), ("m1", 2), ("m1", 3), ("m2", 1), ("m2", 2), ("m2", 3)]
        );
        assert_eq!(panel.occupied(), 2);
        assert_eq!(panel.rows()[5].wait_seconds(), 900.0);
    }

    #[test]
    fn rerunning_gives_identical_rows() {
        let roster = two_machines();
        let events = vec![
            event(&roster, 0, 1, t(9, 0, 0), t(11, 0, 0)),
            event(&roster, 1, 2, t(9, 30, 0), t(10, 30, 0)),
        ];
        let a = snapshot(&roster, &events, t(10, 0, 0)).unwrap();
        let b = snapshot(&roster, &events, t(10, 0, 0)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_bad_inputs() {
        let roster = two_machines();
        assert_eq!(
            snapshot(&roster, &[], t(10, 0, 0)),
            Err(PanelError::NoEvents)
        );
        assert_eq!(
            snapshot_with_spots(&roster, &[], t(10, 0, 0), 0),
            Err(PanelError::ZeroSpots)
        );

        let stranger = Machine::new("Z".into(), "m9".into(), GeoPoint::new(2.0, 2.0));
        let events = vec![OccupancyEvent::on_machine(
            &stranger,
            SpotId::new(1),
            TimeInterval::new(t(9, 0, 0), t(10, 0, 0)),
        )];
        assert_eq!(
            snapshot(&roster, &events, t(9, 30, 0)),
            Err(PanelError::UnknownMachine(MachineId::new("m9")))
        );

        let events = vec![event(&roster, 0, 3, t(9, 0, 0), t(10, 0, 0))];
        assert!(matches!(
            snapshot_with_spots(&roster, &events, t(9, 30, 0), 2),
            Err(PanelError::SpotOutOfRange { .. })
        ));
    }

    #[test]
    fn empty_roster_with_explicit_spots_is_empty() {
        let panel = snapshot_with_spots(&Roster::default(), &[], t(10, 0, 0), 4).unwrap();
        assert!(panel.is_empty());
    }
}
