//! Stopping rules and the iteration loop
use crate::data::dataset::RealNumber;
use crate::error::{ClusteringError, Result};
use crate::metrics::distance::{Euclidean, Metric};
use crate::unsupervised::model::Model;
use crate::unsupervised::params::KMeansParams;
use crate::unsupervised::step::kmeans_step;
use std::time::{Duration, Instant};
use tracing::debug;

/// Decides whether two consecutive models are stable enough to stop.
///
/// Must be deterministic. A predicate that never returns `true` leaves the
/// iteration cap as the only stopping rule.
pub trait ConvergencePredicate<T: RealNumber> {
    fn converged(&self, model: &Model<'_, T>, new_model: &Model<'_, T>) -> Result<bool>;
}

/// Converged when no observation changed cluster. The default predicate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AssignmentsUnchanged;

impl<T: RealNumber> ConvergencePredicate<T> for AssignmentsUnchanged {
    fn converged(&self, model: &Model<'_, T>, new_model: &Model<'_, T>) -> Result<bool> {
        Ok(model.assignments() == new_model.assignments())
    }
}

/// Converged when no centroid moved farther than `delta` under `metric`.
///
/// Suited to continuous data where assignments can flip back and forth on
/// floating point noise long after the centroids have settled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CentroidDelta<M = Euclidean> {
    delta: f64,
    metric: M,
}

impl CentroidDelta<Euclidean> {
    pub fn new(delta: f64) -> Result<Self> {
        Self::with_metric(delta, Euclidean)
    }
}

impl<M> CentroidDelta<M> {
    pub fn with_metric(delta: f64, metric: M) -> Result<Self> {
        if !delta.is_finite() || delta < 0.0 {
            return Err(ClusteringError::invalid_parameter("delta", delta));
        }
        Ok(Self { delta, metric })
    }

    pub fn delta(&self) -> f64 {
        self.delta
    }
}

impl<T: RealNumber, M: Metric<T>> ConvergencePredicate<T> for CentroidDelta<M> {
    fn converged(&self, model: &Model<'_, T>, new_model: &Model<'_, T>) -> Result<bool> {
        if model.k() != new_model.k() {
            return Ok(false);
        }
        let delta = T::from_f64(self.delta)
            .ok_or_else(|| ClusteringError::invalid_parameter("delta", self.delta))?;

        for (old, new) in model.centroids().iter().zip(new_model.centroids()) {
            if self.metric.distance(old, new)? > delta {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Why the loop stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// The predicate accepted two consecutive models.
    Converged,
    /// `max_iterations` was reached without the predicate accepting.
    Exhausted,
}

/// Outcome of a clustering run.
#[derive(Clone, Debug)]
pub struct ClusterResult<'a, T: RealNumber> {
    model: Model<'a, T>,
    iterations: usize,
    duration: Duration,
    termination: Termination,
    history: Vec<Model<'a, T>>,
}

impl<'a, T: RealNumber> ClusterResult<'a, T> {
    pub fn model(&self) -> &Model<'a, T> {
        &self.model
    }

    pub fn into_model(self) -> Model<'a, T> {
        self.model
    }

    /// Loop transitions after the first, always-computed step.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Clustering steps applied, counting the first one.
    pub fn steps(&self) -> usize {
        self.iterations + 1
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration.as_secs_f64() * 1000.0
    }

    pub fn termination(&self) -> Termination {
        self.termination
    }

    pub fn converged(&self) -> bool {
        self.termination == Termination::Converged
    }

    /// Every model of the run from the seed onwards, when history was kept.
    pub fn history(&self) -> &[Model<'a, T>] {
        &self.history
    }
}

/// Steps from `seed` until `predicate` accepts two consecutive models or
/// `params.max_iterations()` transitions have been made.
///
/// One step is always computed, so a cap of 0 returns the model one step
/// after the seed with `iterations() == 0`. The run is labelled
/// `Termination::Converged` whenever the predicate accepts the last two
/// models, even when that happens exactly at the cap.
pub fn converge<'a, T, M, C>(
    seed: Model<'a, T>,
    metric: &M,
    predicate: &C,
    params: &KMeansParams,
) -> Result<ClusterResult<'a, T>>
where
    T: RealNumber,
    M: Metric<T> + ?Sized,
    C: ConvergencePredicate<T> + ?Sized,
{
    let start = Instant::now();
    let observations = seed.observations();
    let empty_cluster = params.empty_cluster();
    let mut history = Vec::new();

    let mut model = seed;
    let mut new_model = kmeans_step(model.centroids(), observations, metric, empty_cluster)?;
    let mut iterations = 0;

    let termination = loop {
        if params.debug() {
            let inertia = new_model.inertia()?;
            debug!(
                iteration = iterations,
                %inertia,
                sizes = ?new_model.cluster_sizes(),
                "k-means step"
            );
        }
        if predicate.converged(&model, &new_model)? {
            break Termination::Converged;
        }
        if iterations >= params.max_iterations() {
            break Termination::Exhausted;
        }

        let next = kmeans_step(new_model.centroids(), observations, metric, empty_cluster)?;
        let previous = std::mem::replace(&mut model, std::mem::replace(&mut new_model, next));
        if params.keep_history() {
            history.push(previous);
        }
        iterations += 1;
    };

    if params.keep_history() {
        history.push(model);
        history.push(new_model.clone());
    }

    let duration = start.elapsed();
    debug!(
        ?termination,
        iterations,
        duration_ms = duration.as_secs_f64() * 1000.0,
        "k-means finished"
    );

    Ok(ClusterResult {
        model: new_model,
        iterations,
        duration,
        termination,
        history,
    })
}
