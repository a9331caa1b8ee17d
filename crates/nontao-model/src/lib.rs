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

//! # Nontao Model (`nontao-model`)
//!
//! The occupancy data model built on the primitives of `nontao-core`, and
//! the seeded generators that synthesize it.
//!
//! ## Key Data Structures
//!
//! - **`Machine`** / **`Roster`**: sites with a zone and a (longitude, latitude)
//!   location. A roster keeps machines in generation order and indexes them by id.
//! - **`SpotId`**: one of the parallel occupancy channels of a machine, `1..=S`.
//! - **`OccupancyEvent`**: a half-open `[in, out)` time-of-day interval during
//!   which one spot of one machine is in use.
//!
//! ## Generators
//!
//! - **`RosterGenerator`** scatters machines inside per-zone bounding boxes.
//! - **`IntervalPacker`** rejection-samples intervals and books each one
//!   into a free (machine, spot) slot without overlap, stopping after a
//!   configurable number of consecutive failures.

pub mod err;
pub mod event;
pub mod generator;
pub mod id;
pub mod machine;

pub mod prelude {
    pub use crate::err::DuplicateMachineError;
    pub use crate::event::{OccupancyEvent, sort_events};
    pub use crate::generator::{
        IntervalPacker, PackerConfig, PackerConfigBuilder, Packing, PackingStats,
        RosterGenConfig, RosterGenerator, StartWindow, TrafficLevel, ZoneSpec,
    };
    pub use crate::id::{MachineId, SpotId, ZoneId};
    pub use crate::machine::{Machine, Roster};
}
