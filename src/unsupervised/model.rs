use crate::data::dataset::RealNumber;
use crate::error::Result;
use crate::metrics::inertia::{cluster_sizes, inertia};
use nalgebra::DVector;

/// One snapshot of a k-means run: the observations, the current centroids and
/// the cluster index of every observation.
///
/// A model is never mutated; each clustering step produces a new one, so
/// earlier models stay valid for convergence checks and diagnostics.
/// `assignments().len() == observations().len()` and every assignment lies
/// in `0..k()`.
#[derive(Clone, Debug, PartialEq)]
pub struct Model<'a, T: RealNumber> {
    observations: &'a [DVector<T>],
    centroids: Vec<DVector<T>>,
    assignments: Vec<usize>,
}

impl<'a, T: RealNumber> Model<'a, T> {
    pub(crate) fn new(
        observations: &'a [DVector<T>],
        centroids: Vec<DVector<T>>,
        assignments: Vec<usize>,
    ) -> Self {
        debug_assert_eq!(observations.len(), assignments.len());
        debug_assert!(assignments.iter().all(|&a| a < centroids.len()));
        Self {
            observations,
            centroids,
            assignments,
        }
    }

    pub fn observations(&self) -> &'a [DVector<T>] {
        self.observations
    }

    pub fn centroids(&self) -> &[DVector<T>] {
        &self.centroids
    }

    pub fn assignments(&self) -> &[usize] {
        &self.assignments
    }

    pub fn k(&self) -> usize {
        self.centroids.len()
    }

    pub fn cluster_sizes(&self) -> Vec<usize> {
        cluster_sizes(&self.assignments, self.k())
    }

    /// Within-cluster sum of squared Euclidean distances.
    pub fn inertia(&self) -> Result<T> {
        inertia(self.observations, &self.centroids, &self.assignments)
    }

    pub fn into_parts(self) -> (Vec<DVector<T>>, Vec<usize>) {
        (self.centroids, self.assignments)
    }
}
