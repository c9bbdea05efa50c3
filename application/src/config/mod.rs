//! Application-level configuration.
//!
//! - [`CouncilParams`] — limits, timeouts and budgets for running councils

pub mod council_params;

pub use council_params::CouncilParams;
