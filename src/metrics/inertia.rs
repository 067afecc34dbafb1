use crate::data::dataset::RealNumber;
use crate::error::{ClusteringError, Result};
use crate::metrics::distance::distance_squared;
use nalgebra::DVector;

/// Within-cluster sum of squared Euclidean distances.
pub fn inertia<T: RealNumber>(
    observations: &[DVector<T>],
    centroids: &[DVector<T>],
    assignments: &[usize],
) -> Result<T> {
    if observations.len() != assignments.len() {
        return Err(ClusteringError::DimensionMismatch {
            expected: observations.len(),
            found: assignments.len(),
        });
    }

    observations
        .iter()
        .zip(assignments.iter())
        .try_fold(T::zero(), |acc, (observation, &cluster)| -> Result<T> {
            let centroid = centroids.get(cluster).ok_or_else(|| {
                ClusteringError::algorithmic(format!(
                    "assignment to cluster {} but only {} centroids",
                    cluster,
                    centroids.len()
                ))
            })?;
            Ok(acc + distance_squared(observation, centroid)?)
        })
}

/// Number of observations assigned to each of the `k` clusters.
pub fn cluster_sizes(assignments: &[usize], k: usize) -> Vec<usize> {
    let mut sizes = vec![0; k];
    for &cluster in assignments {
        if let Some(size) = sizes.get_mut(cluster) {
            *size += 1;
        }
    }
    sizes
}
