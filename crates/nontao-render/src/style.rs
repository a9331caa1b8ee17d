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

use std::ops::Range;

use nontao_core::geo::Extent;

pub const FIGURE_SIZE: (u32, u32) = (800, 600);
pub const TITLE_FONT: (&str, u32) = ("sans-serif", 22);
pub const AXIS_FONT: (&str, u32) = ("sans-serif", 14);
pub const X_LABEL: &str = "Longitude";
pub const Y_LABEL: &str = "Latitude";

/// Half-width used when all points share a coordinate.
const MIN_HALF_SPAN: f64 = 1e-4;

fn widen(lo: f64, hi: f64) -> Range<f64> {
    if hi > lo {
        lo..hi
    } else {
        lo - MIN_HALF_SPAN..hi + MIN_HALF_SPAN
    }
}

/// Chart ranges for `extent`; a zero-width axis is widened slightly.
pub fn axis_ranges(extent: &Extent) -> (Range<f64>, Range<f64>) {
    let (x, y) = (extent.x_range(), extent.y_range());
    (widen(x.start(), x.end()), widen(y.start(), y.end()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_axes_are_widened() {
        let e = Extent {
            min_x: 1.0,
            max_x: 1.0,
            min_y: 0.0,
            max_y: 2.0,
        };
        let (x, y) = axis_ranges(&e);
        assert!(x.start < 1.0 && x.end > 1.0);
        assert_eq!(y, 0.0..2.0);
    }
}
