//! Prerequisite polling.
//!
//! Resource types that depend on another class being empty (a volume cannot
//! go while snapshots of it exist) wait through [`Poller::wait_until`]
//! before their own pass starts. The poller knows nothing about resources;
//! it only drives a boolean check until it holds, the timeout expires, or
//! the operator aborts.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::cloud::errors::CloudError;
use crate::config::types::PollConfig;
use crate::errors::ScourError;

/// Sleep slice so an abort lands within tens of milliseconds even when the
/// poll interval is long.
const SLEEP_SLICE: Duration = Duration::from_millis(50);

#[derive(Debug, thiserror::Error)]
pub enum PollError {
    #[error("Timed out waiting for prerequisite '{what}'")]
    Timeout { what: String },

    #[error("Interrupted while waiting for prerequisite '{what}'")]
    Interrupted { what: String },

    #[error("Prerequisite check '{what}' failed: {source}")]
    CheckFailed {
        what: String,
        #[source]
        source: CloudError,
    },
}

impl ScourError for PollError {
    fn error_code(&self) -> &'static str {
        match self {
            PollError::Timeout { .. } => "POLL_TIMEOUT",
            PollError::Interrupted { .. } => "POLL_INTERRUPTED",
            PollError::CheckFailed { .. } => "POLL_CHECK_FAILED",
        }
    }
}

/// Cooperative cancellation flag shared between the signal handler and the
/// sweep. Cloning shares the underlying flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// The raw flag, for registration with an OS signal handler.
    pub fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.0)
    }
}

/// Repeatedly evaluates prerequisites until they hold or time runs out.
pub struct Poller {
    timeout: Duration,
    interval: Duration,
    cancel: CancelToken,
}

impl Poller {
    pub fn new(timeout: Duration, interval: Duration, cancel: CancelToken) -> Self {
        Self {
            timeout,
            interval,
            cancel,
        }
    }

    pub fn from_config(config: &PollConfig, cancel: CancelToken) -> Self {
        Self::new(
            Duration::from_secs(config.timeout_secs),
            Duration::from_secs(config.interval_secs),
            cancel,
        )
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Evaluate `check` until it returns true.
    ///
    /// Returns immediately on the first successful check - in particular,
    /// never sleeps after success. A check error is surfaced as
    /// [`PollError::CheckFailed`] since a listing that cannot be read is no
    /// better than a prerequisite that never holds.
    pub fn wait_until<F>(&self, what: &str, mut check: F) -> Result<(), PollError>
    where
        F: FnMut() -> Result<bool, CloudError>,
    {
        let deadline = Instant::now() + self.timeout;

        loop {
            if self.cancel.is_cancelled() {
                return Err(PollError::Interrupted {
                    what: what.to_string(),
                });
            }

            match check() {
                Ok(true) => return Ok(()),
                Ok(false) => {}
                Err(source) => {
                    return Err(PollError::CheckFailed {
                        what: what.to_string(),
                        source,
                    });
                }
            }

            if Instant::now() >= deadline {
                return Err(PollError::Timeout {
                    what: what.to_string(),
                });
            }

            debug!(
                event = "core.poll.waiting",
                what = what,
                interval_ms = self.interval.as_millis() as u64
            );
            self.sleep_interval(what)?;
        }
    }

    /// Sleep one interval in short slices so cancellation is picked up
    /// promptly.
    fn sleep_interval(&self, what: &str) -> Result<(), PollError> {
        let mut remaining = self.interval;
        while !remaining.is_zero() {
            if self.cancel.is_cancelled() {
                return Err(PollError::Interrupted {
                    what: what.to_string(),
                });
            }
            let slice = remaining.min(SLEEP_SLICE);
            std::thread::sleep(slice);
            remaining = remaining.saturating_sub(slice);
        }
        Ok(())
    }
}
