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

//! Unweighted k-nearest-neighbour estimation of a scalar field.
//!
//! The estimate at a query point is the arithmetic mean of the values of
//! the `k` observation points closest to it in the plane. Ties in distance
//! are broken by observation order. A `k` larger than the number of
//! observations is clamped to the number of observations.

use nontao_core::geo::{Extent, GeoPoint};

use crate::err::FieldError;

/// Scattered observations: `values[i]` was observed at `points[i]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpatialField {
    points: Vec<GeoPoint>,
    values: Vec<f64>,
}

impl SpatialField {
    pub fn new(points: Vec<GeoPoint>, values: Vec<f64>) -> Result<Self, FieldError> {
        check_lengths(&points, &values)?;
        Ok(Self { points, values })
    }

    #[inline]
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn extent(&self) -> Option<Extent> {
        Extent::of(&self.points)
    }

    /// `(min, max)` of the observed values, ignoring NaNs.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        value_range(&self.values)
    }

    #[inline]
    pub fn estimate(&self, query: GeoPoint, k: usize) -> Result<f64, FieldError> {
        estimate(query, &self.points, &self.values, k)
    }
}

pub(crate) fn value_range(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

#[inline]
fn check_lengths(points: &[GeoPoint], values: &[f64]) -> Result<(), FieldError> {
    if points.len() != values.len() {
        return Err(FieldError::LengthMismatch {
            points: points.len(),
            values: values.len(),
        });
    }
    Ok(())
}

pub(crate) fn validate(points: &[GeoPoint], values: &[f64], k: usize) -> Result<(), FieldError> {
    check_lengths(points, values)?;
    if points.is_empty() {
        return Err(FieldError::EmptyPointSet);
    }
    if k == 0 {
        return Err(FieldError::ZeroNeighbors);
    }
    Ok(())
}

/// Mean of the values of the `k` points nearest to `query`.
///
/// Inputs must already be validated and `k` clamped to `1..=points.len()`.
pub(crate) fn nearest_mean(query: GeoPoint, points: &[GeoPoint], values: &[f64], k: usize) -> f64 {
    let mut ranked: Vec<(f64, usize)> = points
        .iter()
        .enumerate()
        .map(|(i, p)| (query.distance_squared(p), i))
        .collect();

    let by_distance_then_index =
        |a: &(f64, usize), b: &(f64, usize)| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1));
    if k < ranked.len() {
        ranked.select_nth_unstable_by(k - 1, by_distance_then_index);
        ranked.truncate(k);
    }
    // Sum in observation order so equal neighbour sets give equal results.
    ranked.sort_unstable_by_key(|&(_, i)| i);

    let sum: f64 = ranked.iter().map(|&(_, i)| values[i]).sum();
    sum / k as f64
}

/// Estimates the field at `query` as the mean of its `k` nearest observations.
///
/// # Examples
///
/// ```
/// use nontao_analysis::knn::estimate;
/// use nontao_core::geo::GeoPoint;
///
/// let points = [GeoPoint::new(0.0, 0.0), GeoPoint::new(10.0, 0.0)];
/// let values = [0.0, 10.0];
/// assert_eq!(estimate(GeoPoint::new(5.0, 0.0), &points, &values, 2).unwrap(), 5.0);
/// assert_eq!(estimate(GeoPoint::new(1.0, 0.0), &points, &values, 1).unwrap(), 0.0);
/// ```
pub fn estimate(
    query: GeoPoint,
    points: &[GeoPoint],
    values: &[f64],
    k: usize,
) -> Result<f64, FieldError> {
    validate(points, values, k)?;
    Ok(nearest_mean(query, points, values, k.min(points.len())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn random_field(n: usize, seed: u64) -> (Vec<GeoPoint>, Vec<f64>) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let points = (0..n)
            .map(|_| GeoPoint::new(rng.random_range(-3.0..3.0), rng.random_range(40.0..43.0)))
            .collect();
        let values = (0..n).map(|_| rng.random_range(0.0..5400.0)).collect();
        (points, values)
    }

    #[test]
    fn midpoint_of_two_points_averages_both() {
        let points = [GeoPoint::new(0.0, 0.0), GeoPoint::new(10.0, 0.0)];
        let values = [0.0, 10.0];
        assert_eq!(estimate(GeoPoint::new(5.0, 0.0), &points, &values, 2), Ok(5.0));
    }

    #[test]
    fn k_equal_to_n_is_the_plain_mean() {
        for seed in 0..10 {
            let (points, values) = random_field(25, seed);
            let mean = values.iter().sum::<f64>() / values.len() as f64;
            let query = GeoPoint::new(0.3, 41.2);
            let got = estimate(query, &points, &values, points.len()).unwrap();
            assert!((got - mean).abs() < 1e-9, "{got} vs {mean}");
        }
    }

    #[test]
    fn k_one_returns_the_nearest_value() {
        let (points, values) = random_field(30, 3);
        for (i, p) in points.iter().enumerate() {
            assert_eq!(estimate(*p, &points, &values, 1).unwrap(), values[i]);
        }
    }

    #[test]
    fn ties_go_to_the_earlier_observation() {
        let points = [
            GeoPoint::new(-1.0, 0.0),
            GeoPoint::new(1.0, 0.0),
            GeoPoint::new(0.0, 1.0),
        ];
        let values = [7.0, 8.0, 9.0];
        let origin = GeoPoint::new(0.0, 0.0);
        assert_eq!(estimate(origin, &points, &values, 1), Ok(7.0));
        assert_eq!(estimate(origin, &points, &values, 2), Ok(7.5));
    }

    #[test]
    fn large_k_is_clamped() {
        let points = [GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 0.0)];
        let values = [2.0, 4.0];
        assert_eq!(estimate(GeoPoint::new(9.0, 9.0), &points, &values, 10), Ok(3.0));
    }

    #[test]
    fn invalid_inputs_are_reported() {
        let p = [GeoPoint::new(0.0, 0.0)];
        assert_eq!(
            estimate(GeoPoint::new(0.0, 0.0), &[], &[], 3),
            Err(FieldError::EmptyPointSet)
        );
        assert_eq!(
            estimate(GeoPoint::new(0.0, 0.0), &p, &[1.0], 0),
            Err(FieldError::ZeroNeighbors)
        );
        assert_eq!(
            estimate(GeoPoint::new(0.0, 0.0), &p, &[1.0, 2.0], 1),
            Err(FieldError::LengthMismatch { points: 1, values: 2 })
        );
        assert!(SpatialField::new(p.to_vec(), vec![]).is_err());
    }

    #[test]
    fn field_reports_ranges() {
        let field = SpatialField::new(
            vec![GeoPoint::new(0.0, 1.0), GeoPoint::new(2.0, -1.0)],
            vec![5.0, f64::NAN],
        )
        .unwrap();
        assert_eq!(field.value_range(), Some((5.0, 5.0)));
        let e = field.extent().unwrap();
        assert_eq!((e.min_x, e.max_x, e.min_y, e.max_y), (0.0, 2.0, -1.0, 1.0));
        assert_eq!(SpatialField::default().value_range(), None);
    }
}
