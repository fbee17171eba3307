pub mod error;
pub mod numeric_kernel;
pub mod types;

pub use numeric_kernel::{lambert_w, lambert_w_log, log1exp};
