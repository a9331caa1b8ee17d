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

//! # Nontao I/O (`nontao-io`)
//!
//! CSV exchange of the four tabular artifacts: the machine roster, the
//! occupancy events, the panel snapshot and the per-machine results.
//! Column names and order are fixed; coordinates are written with six
//! decimals and times as `HH:MM:SS`.
//!
//! Every operation has a path variant and a `_from`/`_to` variant over any
//! `io::Read`/`io::Write`.

pub mod err;
pub mod events;
mod record;
pub mod report;
pub mod roster;
mod table;

/// Default artifact file names, relative to the data directory.
pub mod files {
    pub const MACHINES: &str = "nontao_machines.csv";
    pub const EVENTS: &str = "nontao_data.csv";
    pub const PANEL: &str = "nontao_panel.csv";
    pub const RESULTS: &str = "nontao_results.csv";
}

pub mod prelude {
    pub use crate::err::ExchangeError;
    pub use crate::events::{read_events, read_events_from, write_events, write_events_to};
    pub use crate::report::{write_panel, write_panel_to, write_results, write_results_to};
    pub use crate::roster::{read_roster, read_roster_from, write_roster, write_roster_to};
}
