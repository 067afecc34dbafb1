//! # Rusty-kmeans
//!
//! `rusty-kmeans` provides a generic k-means clustering engine with k-means++ seeding.
//! The distance metric and the convergence rule are pluggable, so the same engine
//! clusters plain feature vectors as well as perceptual colour coordinates.
//!
//! ## Getting Started
//!
//! To use `rusty-kmeans`, add the following to your `Cargo.toml` file:
//!
//! ```toml
//! [dependencies]
//! rusty-kmeans = "*"
//! ```
//!
//! ## Example Usage
//!
//! As a quick example, here's how you can cluster the rows of a matrix into two groups:
//!
//! ```rust
//!
//! use rusty_kmeans::data::dataset::observations_from_matrix;
//! use rusty_kmeans::unsupervised::kmeans::KMeans;
//! use nalgebra::DMatrix;
//!
//! let x = DMatrix::from_row_slice(4, 2, &[0.0, 0.0, 0.0, 1.0, 10.0, 0.0, 10.0, 1.0]);
//! let observations = observations_from_matrix(&x);
//!
//! let result = KMeans::new().cluster(&observations, 2).unwrap();
//!
//! let model = result.model();
//! println!("{} steps in {:.3} ms", result.steps(), result.duration_ms());
//! for (centroid, size) in model.centroids().iter().zip(model.cluster_sizes()) {
//!     println!("{} observations around {}", size, centroid.transpose());
//! }
//! ```

/// Numeric traits and observation utilities
pub mod data;
/// Error types
pub mod error;
/// Distances and clustering quality measures
pub mod metrics;
/// Clustering algorithms
pub mod unsupervised;
