use thiserror::Error;

use crate::model::{FrameworkError, InvariantViolation};
use crate::scoring::ScoringError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Framework(#[from] FrameworkError),
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
    #[error(transparent)]
    Scoring(#[from] ScoringError),
}
