use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

/// Repeating game tick whose period can be swapped in one call
///
/// A stopped timer never fires, so awaiting [`TickTimer::tick`] while no
/// round is running simply parks that `select!` branch.
pub struct TickTimer {
    period: Duration,
    interval: Option<Interval>,
}

impl TickTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            interval: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    /// Start ticking; the first tick fires one period from now
    pub fn start(&mut self, period: Duration) {
        self.period = period;
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
    }

    /// Replace the period of a running timer. A stopped timer only records it.
    pub fn reconfigure(&mut self, period: Duration) {
        if self.is_running() {
            self.start(period);
        } else {
            self.period = period;
        }
    }

    pub fn stop(&mut self) {
        self.interval = None;
    }

    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}
