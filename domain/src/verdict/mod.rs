//! Verdict domain: from final arguments to a council recommendation.
//!
//! ```text
//! Round-3 ArgumentRecords ──► VoteAggregator::synthesize ──► DebateResult
//!                               ├─ VoteBreakdown (tally)
//!                               ├─ Recommendation (threshold rules)
//!                               ├─ confidence (agreement-scaled mean)
//!                               └─ key considerations (≤ 5, deduplicated)
//! ```

pub mod aggregator;
pub mod considerations;
pub mod parsing;
pub mod result;

pub use aggregator::VoteAggregator;
pub use considerations::{MAX_KEY_CONSIDERATIONS, flags_blocker, select_key_considerations};
pub use parsing::{ParsedArgument, parse_argument_response, parse_confidence};
pub use result::{DebateResult, Recommendation, VoteBreakdown};
