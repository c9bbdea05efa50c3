//! Cap on councils running at the same time.

use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Non-blocking admission control for councils.
///
/// Clones share the same permits, so one limiter can guard several
/// orchestrators. A council holds its permit until it finishes.
#[derive(Debug, Clone)]
pub struct CouncilLimiter {
    permits: Arc<Semaphore>,
    limit: usize,
}

impl CouncilLimiter {
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            permits: Arc::new(Semaphore::new(limit)),
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    /// A permit, or `None` when `limit` councils are already running
    pub fn try_acquire(&self) -> Option<OwnedSemaphorePermit> {
        self.permits.clone().try_acquire_owned().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_is_enforced_and_released() {
        let limiter = CouncilLimiter::new(2);
        let first = limiter.try_acquire();
        let second = limiter.clone().try_acquire();
        assert!(first.is_some() && second.is_some());
        assert!(limiter.try_acquire().is_none());
        assert_eq!(limiter.available(), 0);

        drop(first);
        assert_eq!(limiter.available(), 1);
        assert!(limiter.try_acquire().is_some());
    }

    #[test]
    fn test_zero_limit_is_raised_to_one() {
        let limiter = CouncilLimiter::new(0);
        assert_eq!(limiter.limit(), 1);
        assert!(limiter.try_acquire().is_some());
    }
}
