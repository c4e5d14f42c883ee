//! Repeating tick timer whose period can change between ticks

use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

/// A cancellable repeating timer
///
/// Changing the period cancels the pending tick and starts a fresh interval,
/// so the next tick lands one full new period after the change.
pub struct TickScheduler {
    period: Duration,
    interval: Option<Interval>,
}

impl TickScheduler {
    /// Start ticking every `period`, first tick one period from now
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            interval: Some(Self::schedule(period)),
        }
    }

    fn schedule(period: Duration) -> Interval {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        interval
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_active(&self) -> bool {
        self.interval.is_some()
    }

    /// Cancel any pending tick and restart at `period`
    pub fn reschedule(&mut self, period: Duration) {
        self.period = period;
        self.interval = Some(Self::schedule(period));
    }

    /// Stop ticking until the next `reschedule`
    pub fn cancel(&mut self) {
        self.interval = None;
    }

    /// Wait for the next tick
    ///
    /// Never resolves while cancelled, which keeps a `tokio::select!` branch
    /// on it dormant.
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}
