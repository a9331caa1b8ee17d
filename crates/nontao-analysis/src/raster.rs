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

use nontao_core::{
    geo::{Extent, GeoPoint},
    primitives::linspace,
};
use rayon::prelude::*;
use tracing::{debug, instrument, warn};

use crate::{
    err::FieldError,
    knn::{SpatialField, nearest_mean, validate, value_range},
};

/// Default number of samples per grid axis.
pub const DEFAULT_RESOLUTION: usize = 50;

/// Field estimates over a regular mesh.
///
/// `values[j][i]` is the estimate at `(xs[i], ys[j])`: rows follow the
/// y axis and columns the x axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    xs: Vec<f64>,
    ys: Vec<f64>,
    values: Vec<Vec<f64>>,
}

impl Grid {
    #[inline]
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    #[inline]
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    #[inline]
    pub fn values(&self) -> &[Vec<f64>] {
        &self.values
    }

    #[inline]
    pub fn resolution(&self) -> usize {
        self.xs.len()
    }

    #[inline]
    pub fn value_at(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn extent(&self) -> Extent {
        let first = |v: &[f64]| v.first().copied().unwrap_or(0.0);
        let last = |v: &[f64]| v.last().copied().unwrap_or(0.0);
        Extent {
            min_x: first(&self.xs),
            max_x: last(&self.xs),
            min_y: first(&self.ys),
            max_y: last(&self.ys),
        }
    }

    /// `(min, max)` over every cell.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let flat: Vec<f64> = self.values.iter().flatten().copied().collect();
        value_range(&flat)
    }

    /// Every sample as `(x, y, value)`, row by row.
    pub fn iter_samples(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.values.iter().zip(&self.ys).flat_map(move |(row, &y)| {
            row.iter().zip(&self.xs).map(move |(&v, &x)| (x, y, v))
        })
    }
}

/// Estimates the field on a `resolution x resolution` mesh spanning the
/// bounding box of `points`, bounds included.
#[instrument(level = "info", skip_all, fields(points = points.len(), k = k, resolution = resolution))]
pub fn rasterize(
    points: &[GeoPoint],
    values: &[f64],
    k: usize,
    resolution: usize,
) -> Result<Grid, FieldError> {
    validate(points, values, k)?;
    if resolution < 2 {
        return Err(FieldError::ResolutionTooSmall(resolution));
    }
    let extent = Extent::of(points).ok_or(FieldError::EmptyPointSet)?;

    let k_eff = if k > points.len() {
        warn!(
            requested = k,
            available = points.len(),
            "k exceeds the number of observations; clamping"
        );
        points.len()
    } else {
        k
    };

    let xs = linspace(extent.min_x, extent.max_x, resolution);
    let ys = linspace(extent.min_y, extent.max_y, resolution);

    let grid_values: Vec<Vec<f64>> = ys
        .par_iter()
        .map(|&y| {
            xs.iter()
                .map(|&x| nearest_mean(GeoPoint::new(x, y), points, values, k_eff))
                .collect()
        })
        .collect();

    debug!(
        cells = resolution * resolution,
        min_x = extent.min_x,
        max_x = extent.max_x,
        min_y = extent.min_y,
        max_y = extent.max_y,
        "Grid rasterized"
    );

    Ok(Grid {
        xs,
        ys,
        values: grid_values,
    })
}

impl SpatialField {
    #[inline]
    pub fn rasterize(&self, k: usize, resolution: usize) -> Result<Grid, FieldError> {
        rasterize(self.points(), self.values(), k, resolution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knn::estimate;

    fn sample_field() -> (Vec<GeoPoint>, Vec<f64>) {
        let points = vec![
            GeoPoint::new(-2.679, 42.842),
            GeoPoint::new(-2.663, 42.845),
            GeoPoint::new(-2.670, 42.855),
            GeoPoint::new(-2.676, 42.849),
            GeoPoint::new(-2.665, 42.851),
        ];
        let values = vec![0.0, 1200.0, 300.0, 5400.0, 60.0];
        (points, values)
    }

    #[test]
    fn grid_has_requested_shape_and_spans_the_points() {
        let (points, values) = sample_field();
        let grid = rasterize(&points, &values, 3, 20).unwrap();
        assert_eq!(grid.resolution(), 20);
        assert_eq!(grid.ys().len(), 20);
        assert_eq!(grid.values().len(), 20);
        assert!(grid.values().iter().all(|row| row.len() == 20));
        assert_eq!(grid.xs()[0], -2.679);
        assert_eq!(grid.xs()[19], -2.663);
        assert_eq!(grid.ys()[0], 42.842);
        assert_eq!(grid.ys()[19], 42.855);
        assert_eq!(grid.iter_samples().count(), 400);
    }

    #[test]
    fn values_stay_within_observed_bounds() {
        let (points, values) = sample_field();
        let grid = rasterize(&points, &values, 2, 30).unwrap();
        let (lo, hi) = grid.value_range().unwrap();
        assert!(lo >= 0.0 && hi <= 5400.0);
    }

    #[test]
    fn corners_match_pointwise_estimates() {
        let (points, values) = sample_field();
        let grid = rasterize(&points, &values, 3, 10).unwrap();
        let e = grid.extent();
        let corners = [
            (0, 0, GeoPoint::new(e.min_x, e.min_y)),
            (0, 9, GeoPoint::new(e.max_x, e.min_y)),
            (9, 0, GeoPoint::new(e.min_x, e.max_y)),
            (9, 9, GeoPoint::new(e.max_x, e.max_y)),
        ];
        for (row, col, p) in corners {
            let expected = estimate(p, &points, &values, 3).unwrap();
            assert_eq!(grid.value_at(row, col), Some(expected));
        }
    }

    #[test]
    fn oversized_k_gives_a_flat_mean() {
        let (points, values) = sample_field();
        let grid = rasterize(&points, &values, 99, 4).unwrap();
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        for (_, _, v) in grid.iter_samples() {
            assert!((v - mean).abs() < 1e-9);
        }
    }

    #[test]
    fn rejects_degenerate_requests() {
        let (points, values) = sample_field();
        assert_eq!(rasterize(&[], &[], 3, 50), Err(FieldError::EmptyPointSet));
        assert_eq!(
            rasterize(&points, &values, 3, 1),
            Err(FieldError::ResolutionTooSmall(1))
        );
        assert_eq!(
            rasterize(&points, &values, 0, 50),
            Err(FieldError::ZeroNeighbors)
        );
    }

    #[test]
    fn field_method_delegates() {
        let (points, values) = sample_field();
        let field = SpatialField::new(points.clone(), values.clone()).unwrap();
        assert_eq!(
            field.rasterize(3, 8).unwrap(),
            rasterize(&points, &values, 3, 8).unwrap()
        );
    }
}
