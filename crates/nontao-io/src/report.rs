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

//! Write-only exports of the analysis artifacts.

use std::{io::Write, path::Path};

use nontao_analysis::{aggregate::AggregatedMachineStats, panel::Panel};
use tracing::{debug, instrument};

use crate::{
    err::ExchangeError,
    record::{PANEL_HEADER, PanelRecord, RESULTS_HEADER, ResultsRecord},
    table::{create, write_records},
};

pub fn write_panel_to<W: Write>(writer: W, panel: &Panel) -> Result<usize, ExchangeError> {
    write_records(
        writer,
        &PANEL_HEADER,
        panel.rows().iter().map(|r| PanelRecord {
            zone: r.zone().as_str(),
            machine: r.machine().as_str(),
            latitude: r.location().latitude,
            longitude: r.location().longitude,
            spot: r.spot().value(),
            time: r.time().to_string(),
            wait: r.wait_seconds(),
            free: u8::from(r.is_free()),
        }),
    )
}

#[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
pub fn write_panel(path: impl AsRef<Path>, panel: &Panel) -> Result<(), ExchangeError> {
    let rows = write_panel_to(create(path.as_ref())?, panel)?;
    debug!(rows, "Panel written");
    Ok(())
}

pub fn write_results_to<W: Write>(
    writer: W,
    stats: &[AggregatedMachineStats],
) -> Result<usize, ExchangeError> {
    write_records(
        writer,
        &RESULTS_HEADER,
        stats.iter().map(|s| ResultsRecord {
            zone: s.zone().as_str(),
            machine: s.machine().as_str(),
            latitude: s.location().latitude,
            longitude: s.location().longitude,
            time: s.time().to_string(),
            wait: s.wait_seconds(),
            free: s.free_probability(),
        }),
    )
}

#[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
pub fn write_results(
    path: impl AsRef<Path>,
    stats: &[AggregatedMachineStats],
) -> Result<(), ExchangeError> {
    let rows = write_results_to(create(path.as_ref())?, stats)?;
    debug!(rows, "Results written");
    Ok(())
}
