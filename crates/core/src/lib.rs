pub mod growth;
pub mod planner;
pub mod solver;
pub mod traits;

pub use common::numeric_kernel::{lambert_w, lambert_w_log, log1exp};
pub use growth::{
    calculate_gain, estimate_rate_from_empirical, growth_percent, growth_rate, projected_gain,
};
pub use planner::{GrowthPlanner, GrowthRequest};
pub use solver::{LambertSolver, calculate_required_operations};
