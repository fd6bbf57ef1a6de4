//! Application-level configuration.
//!
//! - [`ExecutionParams`] — model sampling parameters for each phase

pub mod execution_params;

pub use execution_params::ExecutionParams;
