//! Distance primitives and the `Metric` capability used for nearest-centroid search.
use crate::data::dataset::RealNumber;
use crate::error::{ClusteringError, Result};
use nalgebra::DVector;

/// Sum of squared per-dimension differences between `p` and `q`.
pub fn distance_squared<T: RealNumber>(p: &DVector<T>, q: &DVector<T>) -> Result<T> {
    if p.len() != q.len() {
        return Err(ClusteringError::DimensionMismatch {
            expected: p.len(),
            found: q.len(),
        });
    }

    Ok(p.iter()
        .zip(q.iter())
        .map(|(&a, &b)| (a - b) * (a - b))
        .fold(T::zero(), |acc, x| acc + x))
}

/// Euclidean distance between `p` and `q`.
pub fn distance<T: RealNumber>(p: &DVector<T>, q: &DVector<T>) -> Result<T> {
    Ok(distance_squared(p, q)?.sqrt())
}

/// A dissimilarity between two vectors of the same dimension.
///
/// Implementations only need to be non-negative and comparable for ranking
/// nearest neighbours; the triangle inequality is not required. Any closure
/// `Fn(&DVector<T>, &DVector<T>) -> T` is a metric as well, which is how
/// domain formulas such as colour differences are plugged in.
pub trait Metric<T: RealNumber> {
    fn distance(&self, p: &DVector<T>, q: &DVector<T>) -> Result<T>;
}

/// Straight-line distance. The default metric.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Euclidean;

/// Squared straight-line distance; ranks neighbours like `Euclidean` without the square root.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SquaredEuclidean;

impl<T: RealNumber> Metric<T> for Euclidean {
    fn distance(&self, p: &DVector<T>, q: &DVector<T>) -> Result<T> {
        distance(p, q)
    }
}

impl<T: RealNumber> Metric<T> for SquaredEuclidean {
    fn distance(&self, p: &DVector<T>, q: &DVector<T>) -> Result<T> {
        distance_squared(p, q)
    }
}

impl<T, F> Metric<T> for F
where
    T: RealNumber,
    F: Fn(&DVector<T>, &DVector<T>) -> T,
{
    fn distance(&self, p: &DVector<T>, q: &DVector<T>) -> Result<T> {
        Ok(self(p, q))
    }
}
