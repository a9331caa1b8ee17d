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
    io::{Read, Write},
    path::Path,
    str::FromStr,
};

use nontao_core::{
    geo::GeoPoint,
    time::{TimeInterval, TimeOfDay},
};
use nontao_model::{
    event::OccupancyEvent,
    id::{MachineId, SpotId, ZoneId},
};
use tracing::{debug, instrument};

use crate::{
    err::ExchangeError,
    record::{EVENT_HEADER, EventRecord},
    table::{Located, create, open, read_records, write_records},
};

fn parse_time(raw: &str, line: Option<u64>) -> Result<TimeOfDay, ExchangeError> {
    TimeOfDay::from_str(raw).map_err(|source| ExchangeError::MalformedTimeString { line, source })
}

fn to_event(Located { line, record }: Located<EventRecord>) -> Result<OccupancyEvent, ExchangeError> {
    let start = parse_time(&record.start, line)?;
    let end = parse_time(&record.end, line)?;
    if start >= end {
        return Err(ExchangeError::InvalidInterval { line, start, end });
    }
    if record.spot == 0 {
        return Err(ExchangeError::InvalidSpot { line });
    }
    Ok(OccupancyEvent::new(
        ZoneId::new(record.zone),
        MachineId::new(record.machine),
        GeoPoint::new(record.longitude, record.latitude),
        SpotId::new(record.spot),
        TimeInterval::new(start, end),
    ))
}

/// Reads an event table. Rows keep their file order.
pub fn read_events_from<R: Read>(reader: R) -> Result<Vec<OccupancyEvent>, ExchangeError> {
    read_records::<_, EventRecord>(reader)?
        .into_iter()
        .map(to_event)
        .collect()
}

#[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
pub fn read_events(path: impl AsRef<Path>) -> Result<Vec<OccupancyEvent>, ExchangeError> {
    let events = read_events_from(open(path.as_ref())?)?;
    debug!(events = events.len(), "Events read");
    Ok(events)
}

pub fn write_events_to<W: Write>(
    writer: W,
    events: &[OccupancyEvent],
) -> Result<usize, ExchangeError> {
    write_records(
        writer,
        &EVENT_HEADER,
        events.iter().map(|e| EventRecord {
            zone: e.zone().to_string(),
            machine: e.machine().to_string(),
            latitude: e.location().latitude,
            longitude: e.location().longitude,
            spot: e.spot().value(),
            start: e.start().to_string(),
            end: e.end().to_string(),
        }),
    )
}

#[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
pub fn write_events(path: impl AsRef<Path>, events: &[OccupancyEvent]) -> Result<(), ExchangeError> {
    let rows = write_events_to(create(path.as_ref())?, events)?;
    debug!(rows, "Events written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nontao_model::generator::{IntervalPacker, PackerConfig, RosterGenConfig, RosterGenerator};
    use tempfile::NamedTempFile;

    const SAMPLE: &str = "zone,machine,latitude,longitude,spot,in,out\n\
                          1A,n01,42.843100,-2.671235,2,09:00:00,11:00:00\n\
                          2B,n07,42.852000,-2.675500,1,16:05:09,16:35:09\n";

    #[test]
    fn reads_times_and_spots() {
        let events = read_events_from(SAMPLE.as_bytes()).unwrap();
        assert_eq!(events.len(), 2);
        let e = &events[0];
        assert_eq!(e.zone().as_str(), "1A");
        assert_eq!(e.machine().as_str(), "n01");
        assert_eq!(e.spot(), SpotId::new(2));
        assert_eq!(e.start(), TimeOfDay::from_hms(9, 0, 0).unwrap());
        assert_eq!(e.end(), TimeOfDay::from_hms(11, 0, 0).unwrap());
        assert_eq!(e.location(), GeoPoint::new(-2.671235, 42.8431));
        assert_eq!(events[1].start().to_string(), "16:05:09");
    }

    #[test]
    fn writes_in_the_exchange_layout() {
        let events = read_events_from(SAMPLE.as_bytes()).unwrap();
        let mut buf = Vec::new();
        write_events_to(&mut buf, &events).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), SAMPLE);
    }

    #[test]
    fn malformed_time_names_the_line() {
        let text = "zone,machine,latitude,longitude,spot,in,out\n\
                    1A,n01,1.0,2.0,1,09:00:00,10:00:00\n\
                    1A,n01,1.0,2.0,1,9h30,10:00:00\n";
        let err = read_events_from(text.as_bytes()).unwrap_err();
        match &err {
            ExchangeError::MalformedTimeString { line, source } => {
                assert_eq!(*line, Some(3));
                assert_eq!(source.input(), "9h30");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn rejects_backwards_intervals_and_spot_zero() {
        let backwards = "zone,machine,latitude,longitude,spot,in,out\n\
                         1A,n01,1.0,2.0,1,11:00:00,10:00:00\n";
        assert!(matches!(
            read_events_from(backwards.as_bytes()),
            Err(ExchangeError::InvalidInterval { line: Some(2), .. })
        ));
        let spot_zero = "zone,machine,latitude,longitude,spot,in,out\n\
                         1A,n01,1.0,2.0,0,09:00:00,10:00:00\n";
        assert!(matches!(
            read_events_from(spot_zero.as_bytes()),
            Err(ExchangeError::InvalidSpot { line: Some(2) })
        ));
    }

    #[test]
    fn generated_events_survive_a_file_round_trip() {
        let roster = RosterGenerator::new(RosterGenConfig::default()).generate();
        let events = IntervalPacker::new(&roster, PackerConfig::default())
            .generate()
            .events;
        let file = NamedTempFile::new().unwrap();
        write_events(file.path(), &events).unwrap();
        let back = read_events(file.path()).unwrap();
        assert_eq!(back, events);
    }
}
