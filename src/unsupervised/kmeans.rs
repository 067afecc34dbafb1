//! K-Means Clustering
use crate::data::dataset::{dimension_of, RealNumber};
use crate::error::{ClusteringError, Result};
use crate::metrics::distance::{Euclidean, Metric};
use crate::unsupervised::convergence::{
    converge, AssignmentsUnchanged, ClusterResult, ConvergencePredicate,
};
use crate::unsupervised::params::KMeansParams;
use nalgebra::DVector;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// K-means clustering engine with k-means++ seeding.
///
/// The engine partitions observations into `k` clusters by alternating
/// nearest-centroid assignment and centroid recomputation until the
/// convergence predicate accepts two consecutive models or the iteration cap
/// is reached.
///
/// # Type Parameters
///
/// * `M`: The distance used for seeding and assignment. Defaults to `Euclidean`.
/// * `C`: The stopping rule. Defaults to `AssignmentsUnchanged`.
///
/// # Examples
///
/// ```
/// use rusty_kmeans::unsupervised::kmeans::KMeans;
/// use nalgebra::DVector;
///
/// let observations = vec![
///     DVector::from_vec(vec![0.0, 0.0]),
///     DVector::from_vec(vec![0.0, 1.0]),
///     DVector::from_vec(vec![10.0, 0.0]),
///     DVector::from_vec(vec![10.0, 1.0]),
/// ];
///
/// let kmeans = KMeans::new();
/// let result = kmeans.cluster(&observations, 2).unwrap();
///
/// assert_eq!(result.model().k(), 2);
/// assert_eq!(result.model().assignments().len(), 4);
/// ```
#[derive(Clone, Debug)]
pub struct KMeans<M = Euclidean, C = AssignmentsUnchanged> {
    metric: M,
    predicate: C,
    params: KMeansParams,
}

impl Default for KMeans {
    fn default() -> Self {
        Self::new()
    }
}

impl KMeans {
    /// Creates an engine with the Euclidean metric, the assignment-equality
    /// stopping rule and default parameters.
    pub fn new() -> Self {
        Self::with_params(Euclidean, AssignmentsUnchanged, KMeansParams::new())
    }
}

impl<M, C> KMeans<M, C> {
    /// Creates an engine with an injected metric and stopping rule.
    ///
    /// # Examples
    ///
    /// ```
    /// use rusty_kmeans::unsupervised::convergence::CentroidDelta;
    /// use rusty_kmeans::unsupervised::kmeans::KMeans;
    /// use rusty_kmeans::unsupervised::params::KMeansParams;
    /// use nalgebra::DVector;
    ///
    /// let manhattan = |p: &DVector<f64>, q: &DVector<f64>| {
    ///     p.iter().zip(q.iter()).map(|(a, b)| (a - b).abs()).sum::<f64>()
    /// };
    /// let mut params = KMeansParams::new();
    /// params.set_max_iterations(20);
    /// params.set_seed(Some(7));
    ///
    /// let kmeans = KMeans::with_params(manhattan, CentroidDelta::new(1.5).unwrap(), params);
    /// let observations: Vec<_> = (0..10)
    ///     .map(|i| DVector::from_vec(vec![i as f64, (i % 3) as f64]))
    ///     .collect();
    /// let result = kmeans.cluster(&observations, 3).unwrap();
    /// assert_eq!(result.model().centroids().len(), 3);
    /// ```
    pub fn with_params(metric: M, predicate: C, params: KMeansParams) -> Self {
        Self {
            metric,
            predicate,
            params,
        }
    }

    pub fn metric(&self) -> &M {
        &self.metric
    }

    pub fn predicate(&self) -> &C {
        &self.predicate
    }

    pub fn params(&self) -> &KMeansParams {
        &self.params
    }

    /// Clusters `observations` into `k` clusters.
    ///
    /// Randomness comes from `StdRng`, seeded from `params().seed()` when set
    /// and from entropy otherwise.
    ///
    /// The result is a local optimum that depends on the initial centroids.
    /// Two well separated groups are only recovered when seeding places a
    /// centroid in each; with both seeds in one group the run can settle on a
    /// split across the groups instead.
    ///
    /// # Errors
    ///
    /// * `InvalidK` when there are no observations or `k` is outside `1..=n`.
    /// * `DimensionMismatch` when observations differ in length.
    /// * `EmptyCluster` when a cluster empties under `EmptyClusterStrategy::Fail`.
    pub fn cluster<'a, T>(
        &self,
        observations: &'a [DVector<T>],
        k: usize,
    ) -> Result<ClusterResult<'a, T>>
    where
        T: RealNumber,
        M: Metric<T>,
        C: ConvergencePredicate<T>,
    {
        let mut rng = match self.params.seed() {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.cluster_with_rng(observations, k, &mut rng)
    }

    /// Same as `cluster`, drawing randomness from `rng`.
    pub fn cluster_with_rng<'a, T, R>(
        &self,
        observations: &'a [DVector<T>],
        k: usize,
        rng: &mut R,
    ) -> Result<ClusterResult<'a, T>>
    where
        T: RealNumber,
        M: Metric<T>,
        C: ConvergencePredicate<T>,
        R: Rng + ?Sized,
    {
        let n = observations.len();
        if n == 0 || k == 0 || k > n {
            return Err(ClusteringError::InvalidK { k, n });
        }
        let dimension = dimension_of(observations)?;
        debug!(n, k, dimension, "clustering observations");

        let seed = self
            .params
            .seeding()
            .seed(observations, k, &self.metric, rng)?;
        converge(seed, &self.metric, &self.predicate, &self.params)
    }
}
