use std::{future::Future, time::Duration};

use tracing::debug;

use crate::config::PacingConfig;

/// How the author that was just processed ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

/// Delay policy applied after each author, to stay under the API rate limit.
pub trait Pacer {
    fn pause(&self, outcome: Outcome) -> impl Future<Output = ()> + Send;
}

impl<T> Pacer for &T
where
    T: Pacer + ?Sized,
{
    fn pause(&self, outcome: Outcome) -> impl Future<Output = ()> + Send {
        (**self).pause(outcome)
    }
}

/// Sleeps a fixed delay after successful authors, and after failed ones only
/// when `after_failure` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay {
    delay: Duration,
    after_failure: bool,
}

impl FixedDelay {
    pub fn new(delay: Duration, after_failure: bool) -> Self {
        Self {
            delay,
            after_failure,
        }
    }

    /// Never waits.
    pub fn none() -> Self {
        Self::new(Duration::ZERO, false)
    }

    pub fn delay_for(&self, outcome: Outcome) -> Option<Duration> {
        let applies = match outcome {
            Outcome::Success => true,
            Outcome::Failure => self.after_failure,
        };
        (applies && !self.delay.is_zero()).then_some(self.delay)
    }
}

impl From<&PacingConfig> for FixedDelay {
    fn from(config: &PacingConfig) -> Self {
        Self::new(config.delay(), config.after_failure)
    }
}

impl Pacer for FixedDelay {
    async fn pause(&self, outcome: Outcome) {
        if let Some(delay) = self.delay_for(outcome) {
            debug!(?outcome, ?delay, "pacing");
            tokio::time::sleep(delay).await;
        }
    }
}
