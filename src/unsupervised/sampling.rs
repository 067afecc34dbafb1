use crate::data::dataset::RealNumber;
use crate::error::{ClusteringError, Result};
use nalgebra::DVector;
use rand::Rng;
use tracing::debug;

/// Mean vector of `observations`.
///
/// An empty set has no mean and yields `EmptyCluster` (reported for cluster 0;
/// callers that know the cluster index rewrite it).
pub fn centroid<T: RealNumber>(observations: &[&DVector<T>]) -> Result<DVector<T>> {
    let first = observations
        .first()
        .ok_or(ClusteringError::EmptyCluster { cluster: 0 })?;
    let d = first.len();

    let mut sum = DVector::from_element(d, T::zero());
    for observation in observations {
        if observation.len() != d {
            return Err(ClusteringError::DimensionMismatch {
                expected: d,
                found: observation.len(),
            });
        }
        for (s, &value) in sum.iter_mut().zip(observation.iter()) {
            *s += value;
        }
    }

    let n = T::from_usize(observations.len())
        .ok_or_else(|| ClusteringError::algorithmic("observation count is not representable"))?;
    Ok(sum.map(|s| s / n))
}

/// Picks an index with probability `weights[i] / total_weight`.
///
/// `total_weight` defaults to the sum of `weights`. Rounding can leave the
/// cumulative sum just below the uniform draw; the last index with positive
/// weight is returned in that case.
pub fn weighted_random_index<T, R>(
    weights: &[T],
    total_weight: Option<T>,
    rng: &mut R,
) -> Result<usize>
where
    T: RealNumber,
    R: Rng + ?Sized,
{
    if weights.is_empty() {
        return Err(ClusteringError::algorithmic(
            "cannot choose a weighted index from an empty weight table",
        ));
    }

    let total_weight =
        total_weight.unwrap_or_else(|| weights.iter().fold(T::zero(), |acc, &w| acc + w));
    if !total_weight.is_finite() || total_weight <= T::zero() {
        return Err(ClusteringError::algorithmic(format!(
            "total weight must be positive and finite, got {}",
            total_weight
        )));
    }

    let r = T::from_f64(rng.gen::<f64>())
        .ok_or_else(|| ClusteringError::algorithmic("uniform draw is not representable"))?;

    let mut cumulative_weight = T::zero();
    for (i, &weight) in weights.iter().enumerate() {
        cumulative_weight += weight / total_weight;
        if cumulative_weight > r {
            return Ok(i);
        }
    }

    let fallback = weights
        .iter()
        .rposition(|&w| w > T::zero())
        .ok_or_else(|| ClusteringError::algorithmic("every weight is zero"))?;
    debug!(
        draw = %r,
        cumulative = %cumulative_weight,
        fallback,
        "weighted sampling overran the weight table, using last positive weight"
    );
    Ok(fallback)
}
