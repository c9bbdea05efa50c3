//! Spend tracking for reasoning-backed debates.
//!
//! A [`SpendLedger`] is shared by every council an orchestrator runs and
//! tracks today's (UTC) spend against a daily ceiling. Each debate gets a
//! [`SpendMeter`] that adds to the ledger and tracks the per-debate ceiling.

use chrono::{NaiveDate, Utc};
use council_domain::AbortReason;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::warn;

#[derive(Debug)]
struct DailySpend {
    day: NaiveDate,
    spent_usd: f64,
}

/// Spend across all debates, reset at UTC midnight
#[derive(Debug)]
pub struct SpendLedger {
    daily_ceiling_usd: Option<f64>,
    state: Mutex<DailySpend>,
}

impl SpendLedger {
    pub fn new(daily_ceiling_usd: Option<f64>) -> Self {
        Self {
            daily_ceiling_usd,
            state: Mutex::new(DailySpend {
                day: Utc::now().date_naive(),
                spent_usd: 0.0,
            }),
        }
    }

    pub fn unlimited() -> Self {
        Self::new(None)
    }

    pub fn daily_ceiling_usd(&self) -> Option<f64> {
        self.daily_ceiling_usd
    }

    pub fn record(&self, usd: f64) {
        if !(usd.is_finite() && usd > 0.0) {
            return;
        }
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        Self::roll_over(&mut state);
        state.spent_usd += usd;
    }

    pub fn spent_today(&self) -> f64 {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        Self::roll_over(&mut state);
        state.spent_usd
    }

    /// `Some` once today's spend has reached the daily ceiling
    pub fn check(&self) -> Option<AbortReason> {
        let ceiling = self.daily_ceiling_usd?;
        let spent = self.spent_today();
        (spent >= ceiling).then_some(AbortReason::DailyBudgetExceeded {
            spent_usd: spent,
            ceiling_usd: ceiling,
        })
    }

    fn roll_over(state: &mut DailySpend) {
        let today = Utc::now().date_naive();
        if state.day != today {
            state.day = today;
            state.spent_usd = 0.0;
        }
    }
}

impl Default for SpendLedger {
    fn default() -> Self {
        Self::unlimited()
    }
}

#[derive(Debug)]
struct MeterInner {
    ledger: Arc<SpendLedger>,
    ceiling_usd: Option<f64>,
    spent_usd: Mutex<f64>,
}

/// Spend for a single debate. Clones share the same total.
#[derive(Debug, Clone)]
pub struct SpendMeter {
    inner: Arc<MeterInner>,
}

impl SpendMeter {
    pub fn new(ledger: Arc<SpendLedger>, ceiling_usd: Option<f64>) -> Self {
        Self {
            inner: Arc::new(MeterInner {
                ledger,
                ceiling_usd,
                spent_usd: Mutex::new(0.0),
            }),
        }
    }

    /// A meter with no ceilings
    pub fn unmetered() -> Self {
        Self::new(Arc::new(SpendLedger::unlimited()), None)
    }

    pub fn record(&self, usd: f64) {
        if !(usd.is_finite() && usd > 0.0) {
            if usd != 0.0 {
                warn!("Ignoring invalid spend amount {}", usd);
            }
            return;
        }
        *self
            .inner
            .spent_usd
            .lock()
            .unwrap_or_else(PoisonError::into_inner) += usd;
        self.inner.ledger.record(usd);
    }

    pub fn spent(&self) -> f64 {
        *self
            .inner
            .spent_usd
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Per-debate ceiling first, then the daily one
    pub fn check(&self) -> Option<AbortReason> {
        if let Some(ceiling) = self.inner.ceiling_usd {
            let spent = self.spent();
            if spent >= ceiling {
                return Some(AbortReason::DebateBudgetExceeded {
                    spent_usd: spent,
                    ceiling_usd: ceiling,
                });
            }
        }
        self.inner.ledger.check()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meter_feeds_ledger() {
        let ledger = Arc::new(SpendLedger::new(Some(10.0)));
        let a = SpendMeter::new(ledger.clone(), None);
        let b = SpendMeter::new(ledger.clone(), None);
        a.record(1.5);
        b.record(2.0);
        a.clone().record(0.5);

        assert_eq!(a.spent(), 2.0);
        assert_eq!(b.spent(), 2.0);
        assert_eq!(ledger.spent_today(), 4.0);
        assert!(a.check().is_none());
    }

    #[test]
    fn test_debate_ceiling() {
        let meter = SpendMeter::new(Arc::new(SpendLedger::unlimited()), Some(1.0));
        meter.record(0.6);
        assert!(meter.check().is_none());
        meter.record(0.6);
        assert!(matches!(
            meter.check(),
            Some(AbortReason::DebateBudgetExceeded { ceiling_usd, .. }) if ceiling_usd == 1.0
        ));
    }

    #[test]
    fn test_daily_ceiling_spans_debates() {
        let ledger = Arc::new(SpendLedger::new(Some(1.0)));
        SpendMeter::new(ledger.clone(), None).record(1.2);
        let fresh = SpendMeter::new(ledger.clone(), Some(5.0));
        assert!(matches!(
            fresh.check(),
            Some(AbortReason::DailyBudgetExceeded { .. })
        ));
        assert!(ledger.check().is_some());
    }

    #[test]
    fn test_invalid_amounts_ignored() {
        let meter = SpendMeter::unmetered();
        meter.record(-1.0);
        meter.record(f64::NAN);
        meter.record(0.0);
        assert_eq!(meter.spent(), 0.0);
        assert!(meter.check().is_none());
    }
}
