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

//! # Nontao Analysis (`nontao-analysis`)
//!
//! Turns occupancy events into spatial fields:
//!
//! 1. [`panel::snapshot`] projects the events onto every (machine, spot)
//!    slot at a query instant.
//! 2. [`aggregate::aggregate`] averages the panel over spots, one row per
//!    machine.
//! 3. [`knn::estimate`] and [`raster::rasterize`] interpolate a per-machine
//!    column onto a regular grid with an unweighted k-nearest-neighbour mean.

pub mod aggregate;
pub mod err;
pub mod knn;
pub mod panel;
pub mod raster;

pub mod prelude {
    pub use crate::aggregate::{AggregatedMachineStats, aggregate};
    pub use crate::err::{FieldError, PanelError};
    pub use crate::knn::{SpatialField, estimate};
    pub use crate::panel::{Panel, PanelRow, snapshot, snapshot_with_spots};
    pub use crate::raster::{DEFAULT_RESOLUTION, Grid, rasterize};
}
