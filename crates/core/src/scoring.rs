//! Pure derivation rules over a session snapshot.
//!
//! Nothing here is stored: level and progress percentage are recomputed from
//! the session's accumulated state on every call.

use thiserror::Error;

/// Points required per level; level N covers `[(N-1)*200, N*200)`.
pub const POINTS_PER_LEVEL: u32 = 200;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScoringError {
    #[error("framework has no steps")]
    EmptyFramework,
}

/// Level derived from accumulated points.
///
/// A step function starting at 1. Since a session's points never decrease,
/// the level never decreases between two snapshots of the same session.
#[must_use]
pub fn level(total_points: u32) -> u32 {
    total_points / POINTS_PER_LEVEL + 1
}

/// Completion percentage, rounded half-up and clamped to `0..=100`.
///
/// # Errors
///
/// Returns `ScoringError::EmptyFramework` when `step_count` is zero; a
/// framework with no steps is a catalog defect, never a division by zero.
pub fn progress_percent(completed: usize, step_count: usize) -> Result<u8, ScoringError> {
    if step_count == 0 {
        return Err(ScoringError::EmptyFramework);
    }
    let completed = completed.min(step_count) as u64;
    let step_count = step_count as u64;
    let percent = (completed * 200 + step_count) / (step_count * 2);
    Ok(percent.min(100) as u8)
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
