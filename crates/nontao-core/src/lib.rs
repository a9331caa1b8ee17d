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

//! # Nontao Core (`nontao-core`)
//!
//! Type-safe primitives shared by the occupancy model, the analysis
//! routines and the I/O layers: half-open intervals and interval sets,
//! seconds-of-day time arithmetic, and planar (longitude, latitude) points.

pub mod geo;
pub mod intervalset;
pub mod primitives;
pub mod time;

pub mod prelude {
    pub use crate::geo::{Extent, GeoPoint};
    pub use crate::intervalset::IntervalSet;
    pub use crate::primitives::Interval;
    pub use crate::time::{MalformedTimeString, TimeDelta, TimeInterval, TimeOfDay};
}
