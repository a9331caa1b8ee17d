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
};

use nontao_core::geo::GeoPoint;
use nontao_model::{
    id::{MachineId, ZoneId},
    machine::{Machine, Roster},
};
use tracing::{debug, instrument};

use crate::{
    err::ExchangeError,
    record::{MACHINE_HEADER, MachineRecord},
    table::{Located, create, open, read_records, write_records},
};

pub fn read_roster_from<R: Read>(reader: R) -> Result<Roster, ExchangeError> {
    let machines = read_records::<_, MachineRecord>(reader)?
        .into_iter()
        .map(|Located { record, .. }| {
            Machine::new(
                ZoneId::new(record.zone),
                MachineId::new(record.machine),
                GeoPoint::new(record.longitude, record.latitude),
            )
        })
        .collect();
    Ok(Roster::new(machines)?)
}

#[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
pub fn read_roster(path: impl AsRef<Path>) -> Result<Roster, ExchangeError> {
    let roster = read_roster_from(open(path.as_ref())?)?;
    debug!(machines = roster.len(), "Roster read");
    Ok(roster)
}

pub fn write_roster_to<W: Write>(writer: W, roster: &Roster) -> Result<usize, ExchangeError> {
    write_records(
        writer,
        &MACHINE_HEADER,
        roster.iter().map(|m| MachineRecord {
            zone: m.zone().to_string(),
            machine: m.id().to_string(),
            latitude: m.latitude(),
            longitude: m.longitude(),
        }),
    )
}

#[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
pub fn write_roster(path: impl AsRef<Path>, roster: &Roster) -> Result<(), ExchangeError> {
    let rows = write_roster_to(create(path.as_ref())?, roster)?;
    debug!(rows, "Roster written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    fn sample() -> Roster {
        Roster::new(vec![
            Machine::new(
                "1A".into(),
                "n01".into(),
                GeoPoint::new(-2.6712346, 42.8431),
            ),
            Machine::new("2C".into(), "n02".into(), GeoPoint::new(-2.675, 42.849)),
        ])
        .unwrap()
    }

    #[test]
    fn writes_six_decimal_coordinates() {
        let mut buf = Vec::new();
        assert_eq!(write_roster_to(&mut buf, &sample()).unwrap(), 2);
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "zone,machine,latitude,longitude");
        assert_eq!(lines[1], "1A,n01,42.843100,-2.671235");
        assert_eq!(lines[2], "2C,n02,42.849000,-2.675000");
    }

    #[test]
    fn file_round_trip() {
        let file = NamedTempFile::new().unwrap();
        write_roster(file.path(), &sample()).unwrap();
        let back = read_roster(file.path()).unwrap();
        assert_eq!(back.len(), 2);
        assert_eq!(back.as_slice()[0].id().as_str(), "n01");
        assert_eq!(back.as_slice()[0].latitude(), 42.8431);
        assert_eq!(back.as_slice()[0].longitude(), -2.671235);
        assert_eq!(back.as_slice()[1], sample().as_slice()[1]);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "zone,machine,latitude,longitude\n1A,n01,1.0,2.0\n1B,n01,3.0,4.0\n"
        )
        .unwrap();
        assert!(matches!(
            read_roster(file.path()),
            Err(ExchangeError::DuplicateMachine(_))
        ));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = read_roster("/definitely/not/here.csv").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.csv"));
    }

    #[test]
    fn empty_roster_still_has_a_header() {
        let mut buf = Vec::new();
        write_roster_to(&mut buf, &Roster::default()).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "zone,machine,latitude,longitude\n");
        assert!(read_roster_from("zone,machine,latitude,longitude\n".as_bytes())
            .unwrap()
            .is_empty());
    }
}
