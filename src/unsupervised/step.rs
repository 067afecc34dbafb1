use crate::data::dataset::RealNumber;
use crate::error::{ClusteringError, Result};
use crate::metrics::distance::Metric;
use crate::unsupervised::model::Model;
use crate::unsupervised::sampling::centroid;
use nalgebra::DVector;
use tracing::warn;

/// What a clustering step does with a cluster that lost all its observations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EmptyClusterStrategy {
    /// Move the centroid onto the observation farthest from its nearest
    /// surviving centroid. The observation keeps its current assignment until
    /// the next step.
    #[default]
    ReseedFarthest,
    /// Abort the run with `ClusteringError::EmptyCluster`.
    Fail,
}

/// Index of the centroid nearest to `observation` and the distance to it.
/// Ties go to the lower index.
pub fn nearest_centroid<T, M>(
    centroids: &[DVector<T>],
    observation: &DVector<T>,
    metric: &M,
) -> Result<(usize, T)>
where
    T: RealNumber,
    M: Metric<T> + ?Sized,
{
    let (first, rest) = centroids
        .split_first()
        .ok_or(ClusteringError::InvalidK { k: 0, n: 0 })?;

    let mut best = 0;
    let mut min_distance = metric.distance(first, observation)?;
    for (i, centroid) in rest.iter().enumerate() {
        let d = metric.distance(centroid, observation)?;
        if d < min_distance {
            best = i + 1;
            min_distance = d;
        }
    }
    Ok((best, min_distance))
}

/// One k-means iteration: assign every observation to its nearest centroid,
/// then recompute every centroid as the mean of its observations.
pub fn kmeans_step<'a, T, M>(
    centroids: &[DVector<T>],
    observations: &'a [DVector<T>],
    metric: &M,
    empty_cluster: EmptyClusterStrategy,
) -> Result<Model<'a, T>>
where
    T: RealNumber,
    M: Metric<T> + ?Sized,
{
    let k = centroids.len();

    let assignments = observations
        .iter()
        .map(|observation| nearest_centroid(centroids, observation, metric).map(|(i, _)| i))
        .collect::<Result<Vec<_>>>()?;

    let mut members: Vec<Vec<&DVector<T>>> = vec![Vec::new(); k];
    for (observation, &cluster) in observations.iter().zip(assignments.iter()) {
        members[cluster].push(observation);
    }

    let mut new_centroids: Vec<Option<DVector<T>>> = Vec::with_capacity(k);
    for cluster in &members {
        if cluster.is_empty() {
            new_centroids.push(None);
        } else {
            new_centroids.push(Some(centroid(cluster)?));
        }
    }

    let empty: Vec<usize> = (0..k).filter(|&i| new_centroids[i].is_none()).collect();
    for cluster in empty {
        match empty_cluster {
            EmptyClusterStrategy::Fail => return Err(ClusteringError::EmptyCluster { cluster }),
            EmptyClusterStrategy::ReseedFarthest => {
                let surviving: Vec<DVector<T>> = new_centroids.iter().flatten().cloned().collect();
                let farthest = farthest_observation(&surviving, observations, metric)?;
                warn!(
                    cluster,
                    observation = farthest,
                    "cluster received no observations, reseeding its centroid"
                );
                new_centroids[cluster] = Some(observations[farthest].clone());
            }
        }
    }

    let new_centroids = new_centroids.into_iter().flatten().collect();
    Ok(Model::new(observations, new_centroids, assignments))
}

/// Observation whose distance to its nearest centroid is largest; the first
/// such observation on ties.
fn farthest_observation<T, M>(
    centroids: &[DVector<T>],
    observations: &[DVector<T>],
    metric: &M,
) -> Result<usize>
where
    T: RealNumber,
    M: Metric<T> + ?Sized,
{
    if centroids.is_empty() {
        return Ok(0);
    }

    let mut farthest = 0;
    let mut max_distance = T::neg_infinity();
    for (i, observation) in observations.iter().enumerate() {
        let (_, d) = nearest_centroid(centroids, observation, metric)?;
        if d > max_distance {
            farthest = i;
            max_distance = d;
        }
    }
    Ok(farthest)
}
