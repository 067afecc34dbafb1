pub mod convergence;
pub mod kmeans;
pub mod model;
pub mod params;
pub mod sampling;
pub mod seeding;
pub mod step;
