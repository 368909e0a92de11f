use crate::errors::ScourError;
use crate::sweep::types::PurgeReport;

#[derive(Debug, thiserror::Error)]
pub enum SweepError {
    /// The operator aborted mid-flight. Already-deleted resources stay
    /// deleted; the partial report covers everything reached so far.
    #[error("Sweep interrupted by operator")]
    Interrupted { partial: Box<PurgeReport> },
}

impl ScourError for SweepError {
    fn error_code(&self) -> &'static str {
        match self {
            SweepError::Interrupted { .. } => "SWEEP_INTERRUPTED",
        }
    }

    fn is_user_error(&self) -> bool {
        true
    }
}
