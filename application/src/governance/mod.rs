//! Governance controls: spend ceilings and council concurrency.

pub mod budget;
pub mod limiter;

pub use budget::{SpendLedger, SpendMeter};
pub use limiter::CouncilLimiter;
