use crate::unsupervised::seeding::KMeansPlusPlus;
use crate::unsupervised::step::EmptyClusterStrategy;

#[derive(Clone, Debug, PartialEq)]
pub struct KMeansParams {
    max_iterations: usize,
    seeding: KMeansPlusPlus,
    empty_cluster: EmptyClusterStrategy,
    seed: Option<u64>,
    debug: bool,
    keep_history: bool,
}

impl Default for KMeansParams {
    fn default() -> Self {
        Self::new()
    }
}

impl KMeansParams {
    pub fn new() -> Self {
        Self {
            max_iterations: 200,
            seeding: KMeansPlusPlus::new(),
            empty_cluster: EmptyClusterStrategy::ReseedFarthest,
            seed: None,
            debug: false,
            keep_history: false,
        }
    }

    /// Caps the loop transitions after the first step. 0 is allowed and
    /// returns the model one step after seeding.
    pub fn set_max_iterations(&mut self, max_iterations: usize) {
        self.max_iterations = max_iterations;
    }

    pub fn set_seeding(&mut self, seeding: KMeansPlusPlus) {
        self.seeding = seeding;
    }

    pub fn set_empty_cluster(&mut self, empty_cluster: EmptyClusterStrategy) {
        self.empty_cluster = empty_cluster;
    }

    /// Fixes the random source used by `KMeans::cluster`; `None` draws from entropy.
    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.seed = seed;
    }

    /// Logs inertia and cluster sizes of every step. Never affects results.
    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    pub fn set_keep_history(&mut self, keep_history: bool) {
        self.keep_history = keep_history;
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn seeding(&self) -> &KMeansPlusPlus {
        &self.seeding
    }

    pub fn empty_cluster(&self) -> EmptyClusterStrategy {
        self.empty_cluster
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn keep_history(&self) -> bool {
        self.keep_history
    }
}
