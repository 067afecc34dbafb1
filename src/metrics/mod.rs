pub mod distance;
pub mod inertia;
