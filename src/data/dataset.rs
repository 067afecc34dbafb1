use crate::error::{ClusteringError, Result};
use nalgebra::{DMatrix, DVector};
use num_traits::{Float, FromPrimitive, Num, ToPrimitive};
use std::cmp::PartialOrd;
use std::fmt::{Debug, Display};
use std::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

pub trait DataValue:
    Debug
    + Clone
    + Copy
    + Num
    + FromPrimitive
    + ToPrimitive
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + Send
    + Sync
    + Display
    + 'static
{
}

impl<T> DataValue for T where
    T: Debug
        + Clone
        + Copy
        + Num
        + FromPrimitive
        + ToPrimitive
        + AddAssign
        + SubAssign
        + MulAssign
        + DivAssign
        + Send
        + Sync
        + Display
        + 'static
{
}

pub trait Number: DataValue + PartialOrd {}
impl<T> Number for T where T: DataValue + PartialOrd {}

/// Scalar type of observations and centroids.
pub trait RealNumber: Number + Float {}
impl<T> RealNumber for T where T: Number + Float {}

/// Splits an `n x d` matrix into `n` observations of dimension `d`.
pub fn observations_from_matrix<T: RealNumber>(x: &DMatrix<T>) -> Vec<DVector<T>> {
    x.row_iter().map(|row| row.transpose()).collect()
}

/// Returns the dimension shared by every observation.
///
/// Fails with `InvalidK` when there are no observations, because no cluster
/// count is valid for an empty set, and with `DimensionMismatch` on the first
/// observation whose length differs from the first one.
pub fn dimension_of<T: RealNumber>(observations: &[DVector<T>]) -> Result<usize> {
    let first = observations
        .first()
        .ok_or(ClusteringError::InvalidK { k: 0, n: 0 })?;
    let expected = first.len();

    match observations.iter().find(|obs| obs.len() != expected) {
        Some(obs) => Err(ClusteringError::DimensionMismatch {
            expected,
            found: obs.len(),
        }),
        None => Ok(expected),
    }
}
