//! k-means++ seeding
use crate::data::dataset::RealNumber;
use crate::error::{ClusteringError, Result};
use crate::metrics::distance::Metric;
use crate::unsupervised::model::Model;
use crate::unsupervised::sampling::weighted_random_index;
use nalgebra::DVector;
use rand::Rng;
use tracing::debug;

/// Chooses well separated initial centroids by distance-weighted sampling.
///
/// A candidate `x` is drawn with probability proportional to
/// `D(x)^weight_exponent`, where `D(x)` is the metric distance from `x` to the
/// nearest centroid chosen so far. The default exponent is 1, i.e. plain
/// `D(x)`; canonical k-means++ (Arthur & Vassilvitskii) uses `D(x)^2` under
/// the Euclidean metric, which is `set_weight_exponent(2)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KMeansPlusPlus {
    weight_exponent: i32,
}

impl Default for KMeansPlusPlus {
    fn default() -> Self {
        Self::new()
    }
}

impl KMeansPlusPlus {
    pub fn new() -> Self {
        Self { weight_exponent: 1 }
    }

    pub fn set_weight_exponent(&mut self, weight_exponent: i32) -> Result<()> {
        if weight_exponent < 1 {
            return Err(ClusteringError::invalid_parameter(
                "weight_exponent",
                weight_exponent,
            ));
        }
        self.weight_exponent = weight_exponent;
        Ok(())
    }

    pub fn weight_exponent(&self) -> i32 {
        self.weight_exponent
    }

    /// Builds the iteration-0 model.
    ///
    /// Observation `i` is provisionally assigned to centroid `i % k`; the
    /// first clustering step replaces that placeholder with real assignments.
    /// `k` must lie in `1..=observations.len()`.
    pub fn seed<'a, T, M, R>(
        &self,
        observations: &'a [DVector<T>],
        k: usize,
        metric: &M,
        rng: &mut R,
    ) -> Result<Model<'a, T>>
    where
        T: RealNumber,
        M: Metric<T> + ?Sized,
        R: Rng + ?Sized,
    {
        let n = observations.len();
        if k == 0 || k > n {
            return Err(ClusteringError::InvalidK { k, n });
        }

        let mut chosen = Vec::with_capacity(k);
        let mut is_chosen = vec![false; n];
        let mut nearest: Vec<Option<T>> = vec![None; n];
        let mut weights = vec![T::zero(); n];

        let first = rng.gen_range(0..n);
        chosen.push(first);
        is_chosen[first] = true;

        while chosen.len() < k {
            let last = &observations[chosen[chosen.len() - 1]];

            let mut total_weight = T::zero();
            for i in 0..n {
                if is_chosen[i] {
                    weights[i] = T::zero();
                    continue;
                }
                let d = metric.distance(&observations[i], last)?;
                let d = match nearest[i] {
                    Some(previous) if previous <= d => previous,
                    _ => d,
                };
                nearest[i] = Some(d);
                weights[i] = d.powi(self.weight_exponent);
                total_weight += weights[i];
            }

            let next = if total_weight > T::zero() && total_weight.is_finite() {
                weighted_random_index(&weights, Some(total_weight), rng)?
            } else {
                // Every remaining candidate coincides with a chosen centroid.
                let remaining: Vec<usize> = (0..n).filter(|&i| !is_chosen[i]).collect();
                remaining[rng.gen_range(0..remaining.len())]
            };
            chosen.push(next);
            is_chosen[next] = true;
        }

        debug!(?chosen, k, "k-means++ chose initial centroids");

        let centroids = chosen.iter().map(|&i| observations[i].clone()).collect();
        let assignments = (0..n).map(|i| i % k).collect();
        Ok(Model::new(observations, centroids, assignments))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::distance::Euclidean;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn points(rows: &[[f64; 2]]) -> Vec<DVector<f64>> {
        rows.iter().map(|r| DVector::from_row_slice(r)).collect()
    }

    #[test]
    fn test_weight_exponent() {
        let mut seeding = KMeansPlusPlus::new();
        assert_eq!(seeding.weight_exponent(), 1);
        assert!(seeding.set_weight_exponent(2).is_ok());
        assert_eq!(seeding.weight_exponent(), 2);
        assert!(seeding.set_weight_exponent(0).is_err());
        assert_eq!(seeding.weight_exponent(), 2);
    }

    #[test]
    fn test_seed_shapes() {
        let observations = points(&[[0.0, 0.0], [1.0, 0.0], [5.0, 5.0], [6.0, 5.0], [9.0, 0.0]]);
        let mut rng = StdRng::seed_from_u64(5);
        let model = KMeansPlusPlus::new()
            .seed(&observations, 3, &Euclidean, &mut rng)
            .unwrap();

        assert_eq!(model.k(), 3);
        assert_eq!(model.assignments(), &[0, 1, 2, 0, 1]);
        for centroid in model.centroids() {
            assert!(observations.contains(centroid));
        }
    }

    #[test]
    fn test_seed_never_repeats_an_observation() {
        let observations = points(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0], [3.0, 0.0]]);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let model = KMeansPlusPlus::new()
                .seed(&observations, 4, &Euclidean, &mut rng)
                .unwrap();
            let mut centroids: Vec<f64> = model.centroids().iter().map(|c| c[0]).collect();
            centroids.sort_by(|a, b| a.partial_cmp(b).unwrap());
            assert_eq!(centroids, vec![0.0, 1.0, 2.0, 3.0]);
        }
    }

    #[test]
    fn test_seed_all_identical_observations() {
        let observations = points(&[[2.0, 2.0], [2.0, 2.0], [2.0, 2.0]]);
        let mut rng = StdRng::seed_from_u64(11);
        let model = KMeansPlusPlus::new()
            .seed(&observations, 3, &Euclidean, &mut rng)
            .unwrap();
        assert_eq!(model.k(), 3);
        assert!(model.centroids().iter().all(|c| c == &observations[0]));
    }

    #[test]
    fn test_seed_single_cluster() {
        let observations = points(&[[0.0, 0.0], [4.0, 4.0]]);
        let mut rng = StdRng::seed_from_u64(0);
        let model = KMeansPlusPlus::new()
            .seed(&observations, 1, &Euclidean, &mut rng)
            .unwrap();
        assert_eq!(model.k(), 1);
        assert_eq!(model.assignments(), &[0, 0]);
    }

    #[test]
    fn test_seed_is_deterministic_for_a_seed() {
        let observations = points(&[
            [0.0, 0.0],
            [0.5, 1.0],
            [4.0, 4.0],
            [4.5, 3.0],
            [9.0, 9.0],
            [8.0, 9.5],
        ]);
        let mut seeding = KMeansPlusPlus::new();
        seeding.set_weight_exponent(2).unwrap();

        let first = seeding
            .seed(&observations, 3, &Euclidean, &mut StdRng::seed_from_u64(21))
            .unwrap();
        let second = seeding
            .seed(&observations, 3, &Euclidean, &mut StdRng::seed_from_u64(21))
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_seed_invalid_k() {
        let observations = points(&[[0.0, 0.0], [1.0, 1.0]]);
        let mut rng = StdRng::seed_from_u64(0);
        let seeding = KMeansPlusPlus::new();
        assert_eq!(
            seeding.seed(&observations, 0, &Euclidean, &mut rng),
            Err(ClusteringError::InvalidK { k: 0, n: 2 })
        );
        assert_eq!(
            seeding.seed(&observations, 3, &Euclidean, &mut rng),
            Err(ClusteringError::InvalidK { k: 3, n: 2 })
        );
    }
}
