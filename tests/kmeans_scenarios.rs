use approx::assert_relative_eq;
use nalgebra::{DMatrix, DVector};
use rusty_kmeans::data::dataset::observations_from_matrix;
use rusty_kmeans::metrics::distance::Euclidean;
use rusty_kmeans::unsupervised::convergence::{AssignmentsUnchanged, Termination};
use rusty_kmeans::unsupervised::kmeans::KMeans;
use rusty_kmeans::unsupervised::params::KMeansParams;
use rusty_kmeans::unsupervised::seeding::KMeansPlusPlus;
use rusty_kmeans::unsupervised::step::{kmeans_step, EmptyClusterStrategy};

fn engine(seed: u64, keep_history: bool) -> KMeans {
    let mut seeding = KMeansPlusPlus::new();
    seeding.set_weight_exponent(2).unwrap();

    let mut params = KMeansParams::new();
    params.set_seed(Some(seed));
    params.set_seeding(seeding);
    params.set_keep_history(keep_history);
    KMeans::with_params(Euclidean, AssignmentsUnchanged, params)
}

fn blobs() -> Vec<DVector<f64>> {
    let centers = [(0.0, 0.0), (8.0, 1.0), (3.0, 9.0)];
    (0..60)
        .map(|i| {
            let (cx, cy) = centers[i % 3];
            let jitter = ((i * 37) % 11) as f64 / 10.0 - 0.5;
            let wobble = ((i * 53) % 7) as f64 / 7.0 - 0.5;
            DVector::from_vec(vec![cx + jitter, cy + wobble])
        })
        .collect()
}

#[test]
fn test_two_separated_pairs() {
    let x = DMatrix::from_row_slice(4, 2, &[0.0, 0.0, 0.0, 1.0, 10.0, 0.0, 10.0, 1.0]);
    let observations = observations_from_matrix(&x);

    let mut straddling_runs = 0;
    for seed in 0..20 {
        let result = engine(seed, true).cluster(&observations, 2).unwrap();
        let initial = &result.history()[0];
        let model = result.model();
        let a = model.assignments();

        if initial.centroids()[0][0] == initial.centroids()[1][0] {
            // Both initial centroids in the same pair: the run splits across the pairs.
            assert_eq!(a[0], a[2]);
            assert_eq!(a[1], a[3]);
            assert_ne!(a[0], a[1]);
            assert_relative_eq!(model.centroids()[a[0]], DVector::from_vec(vec![5.0, 0.0]));
            assert_relative_eq!(model.centroids()[a[1]], DVector::from_vec(vec![5.0, 1.0]));
            continue;
        }
        straddling_runs += 1;

        assert_eq!(a[0], a[1]);
        assert_eq!(a[2], a[3]);
        assert_ne!(a[0], a[2]);

        assert_relative_eq!(model.centroids()[a[0]], DVector::from_vec(vec![0.0, 0.5]));
        assert_relative_eq!(model.centroids()[a[2]], DVector::from_vec(vec![10.0, 0.5]));
        assert_eq!(result.termination(), Termination::Converged);
    }
    assert!(straddling_runs > 0);
}

#[test]
fn test_two_pairs_seeded_within_one_pair() {
    let observations = vec![
        DVector::from_vec(vec![0.0, 0.0]),
        DVector::from_vec(vec![0.0, 1.0]),
        DVector::from_vec(vec![10.0, 0.0]),
        DVector::from_vec(vec![10.0, 1.0]),
    ];
    let centroids = vec![observations[0].clone(), observations[1].clone()];

    let first = kmeans_step(&centroids, &observations, &Euclidean, EmptyClusterStrategy::default())
        .unwrap();
    let second = kmeans_step(
        first.centroids(),
        &observations,
        &Euclidean,
        EmptyClusterStrategy::default(),
    )
    .unwrap();

    assert_eq!(first.assignments(), &[0, 1, 0, 1]);
    assert_eq!(second.assignments(), first.assignments());
    assert_relative_eq!(second.centroids()[0], DVector::from_vec(vec![5.0, 0.0]));
    assert_relative_eq!(second.centroids()[1], DVector::from_vec(vec![5.0, 1.0]));
}

#[test]
fn test_inertia_never_increases() {
    let observations = blobs();
    for seed in 0..5 {
        let result = engine(seed, true).cluster(&observations, 3).unwrap();
        let inertias: Vec<f64> = result.history()[1..]
            .iter()
            .map(|model| model.inertia().unwrap())
            .collect();

        for pair in inertias.windows(2) {
            assert!(pair[1] <= pair[0] + 1e-9, "{:?}", inertias);
        }
    }
}

#[test]
fn test_step_is_idempotent_at_fixed_point() {
    let observations = blobs();
    let result = engine(11, false).cluster(&observations, 3).unwrap();
    assert!(result.converged());

    let model = result.model();
    let next = kmeans_step(
        model.centroids(),
        &observations,
        &Euclidean,
        EmptyClusterStrategy::default(),
    )
    .unwrap();

    assert_eq!(next.assignments(), model.assignments());
    for (a, b) in next.centroids().iter().zip(model.centroids()) {
        assert_relative_eq!(a, b, epsilon = 1e-9);
    }
}

#[test]
fn test_same_seed_same_clustering() {
    let observations = blobs();
    let first = engine(77, true).cluster(&observations, 4).unwrap();
    let second = engine(77, true).cluster(&observations, 4).unwrap();

    assert_eq!(first.history()[0], second.history()[0]);
    assert_eq!(first.model(), second.model());
    assert_eq!(first.iterations(), second.iterations());
}

#[test]
fn test_each_observation_its_own_cluster() {
    let observations = blobs();
    let n = observations.len();
    let result = engine(4, false).cluster(&observations, n).unwrap();
    let model = result.model();

    assert_eq!(model.centroids().len(), n);
    assert!(model.cluster_sizes().iter().all(|&size| size == 1));
    assert_eq!(model.inertia().unwrap(), 0.0);
}

#[test]
fn test_single_value_single_cluster() {
    let observations = vec![DVector::from_vec(vec![0.25f32, 0.5, 0.75]); 5];
    let result = KMeans::new().cluster(&observations, 1).unwrap();

    assert_eq!(result.steps(), 1);
    assert_eq!(result.iterations(), 0);
    assert!(result.converged());
    assert_eq!(result.model().assignments(), &[0, 0, 0, 0, 0]);
    assert_relative_eq!(result.model().centroids()[0], observations[0]);
}
