use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::model::framework::FrameworkDefinition;
use crate::model::ids::{FrameworkId, StepId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// The operation is not allowed in the session's current state.
///
/// Rejections are recoverable: the session is left untouched and the caller
/// may retry once the right precondition holds.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransitionRejection {
    #[error("session has not been started")]
    NotStarted,

    #[error("session is already in progress")]
    InProgress,

    #[error("session is already completed")]
    Completed,

    #[error("current step has not been marked ready")]
    StepNotReady,
}

/// The session state contradicts a hard invariant.
///
/// Indicates a catalog or engine defect rather than normal user behaviour;
/// a session that reports one must not be driven further.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvariantViolation {
    #[error("step {id} is already recorded as completed")]
    DuplicateStep { id: StepId },

    #[error("cursor {cursor} is outside the framework's {step_count} steps")]
    CursorOutOfRange { cursor: usize, step_count: usize },

    #[error("session is bound to framework {bound}, got {supplied}")]
    FrameworkMismatch {
        bound: FrameworkId,
        supplied: FrameworkId,
    },
}

/// Errors from `Session::complete_current`.
///
/// Keeps the recoverable and the fatal taxonomy apart so callers cannot
/// conflate "not ready yet" with a corrupted session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompleteStepError {
    #[error(transparent)]
    Rejected(#[from] TransitionRejection),

    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

//
// ─── CURSOR ────────────────────────────────────────────────────────────────────
//

/// Position of a session within its framework's step sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cursor {
    NotStarted,
    At(usize),
    Completed,
}

impl Cursor {
    /// Index of the step being worked, if any.
    #[must_use]
    pub fn index(self) -> Option<usize> {
        match self {
            Cursor::At(index) => Some(index),
            Cursor::NotStarted | Cursor::Completed => None,
        }
    }

    #[must_use]
    pub fn is_completed(self) -> bool {
        matches!(self, Cursor::Completed)
    }
}

/// Outcome of completing the step at the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The step was recorded and the cursor moved to the next index.
    Advanced { cursor: usize },
    /// The last step was recorded; the session is complete.
    Completed,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Mutable progress record for one attempt at one framework.
///
/// Steps are always completed in ascending index order; there is no way to
/// jump to or replay an earlier step. `total_points` only ever grows, and it
/// is maintained incrementally so it equals the point sum of exactly the
/// recorded steps at every observable moment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    framework_id: FrameworkId,
    cursor: Cursor,
    completed_step_ids: Vec<StepId>,
    total_points: u32,
    step_ready: bool,
    notes: BTreeMap<StepId, String>,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Create a fresh, not-yet-started session bound to `framework_id`.
    #[must_use]
    pub fn new(framework_id: FrameworkId) -> Self {
        Self {
            framework_id,
            cursor: Cursor::NotStarted,
            completed_step_ids: Vec::new(),
            total_points: 0,
            step_ready: false,
            notes: BTreeMap::new(),
            started_at: None,
            completed_at: None,
        }
    }

    #[must_use]
    pub fn framework_id(&self) -> &FrameworkId {
        &self.framework_id
    }

    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Step ids recorded as done, in completion order.
    #[must_use]
    pub fn completed_step_ids(&self) -> &[StepId] {
        &self.completed_step_ids
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed_step_ids.len()
    }

    #[must_use]
    pub fn total_points(&self) -> u32 {
        self.total_points
    }

    #[must_use]
    pub fn step_ready(&self) -> bool {
        self.step_ready
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cursor.is_completed()
    }

    /// Free-text note for a step, if one was written.
    #[must_use]
    pub fn note(&self, id: &StepId) -> Option<&str> {
        self.notes.get(id).map(String::as_str)
    }

    /// Attach or replace the free-text note for a step.
    ///
    /// Notes are purely descriptive; no rule reads them.
    pub fn set_note(&mut self, id: StepId, text: impl Into<String>) {
        self.notes.insert(id, text.into());
    }

    /// Begin the session at the first step. No points are awarded.
    ///
    /// Starting is a true initializer: a session that is already in progress
    /// or completed rejects the call. Restarting means constructing a new
    /// `Session` and discarding this one; an in-place cursor reset would keep
    /// the accumulated points and corrupt the point-sum invariant.
    ///
    /// # Errors
    ///
    /// Returns `TransitionRejection::InProgress` or
    /// `TransitionRejection::Completed` when the session already left
    /// `NotStarted`.
    pub fn start(&mut self, at: DateTime<Utc>) -> Result<(), TransitionRejection> {
        match self.cursor {
            Cursor::NotStarted => {
                self.cursor = Cursor::At(0);
                self.step_ready = false;
                self.started_at = Some(at);
                Ok(())
            }
            Cursor::At(_) => Err(TransitionRejection::InProgress),
            Cursor::Completed => Err(TransitionRejection::Completed),
        }
    }

    /// Toggle the ready flag for the step at the cursor.
    ///
    /// # Errors
    ///
    /// Returns `TransitionRejection::NotStarted` or
    /// `TransitionRejection::Completed` outside of an in-progress session.
    pub fn set_ready(&mut self, ready: bool) -> Result<(), TransitionRejection> {
        match self.cursor {
            Cursor::At(_) => {
                self.step_ready = ready;
                Ok(())
            }
            Cursor::NotStarted => Err(TransitionRejection::NotStarted),
            Cursor::Completed => Err(TransitionRejection::Completed),
        }
    }

    /// Record the step at the cursor as completed and move the cursor on.
    ///
    /// Atomic: either every effect applies (id appended, points added, cursor
    /// moved, ready flag reset) or the session is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `CompleteStepError::Rejected` when the session is not in
    /// progress or the current step was never marked ready; the session is
    /// unchanged and the caller may retry. Returns
    /// `CompleteStepError::Invariant` when the framework does not match the
    /// binding, the cursor is out of range, or the step id was already
    /// recorded.
    pub fn complete_current(
        &mut self,
        framework: &FrameworkDefinition,
        at: DateTime<Utc>,
    ) -> Result<StepOutcome, CompleteStepError> {
        if framework.id() != &self.framework_id {
            return Err(InvariantViolation::FrameworkMismatch {
                bound: self.framework_id.clone(),
                supplied: framework.id().clone(),
            }
            .into());
        }

        let index = match self.cursor {
            Cursor::At(index) => index,
            Cursor::NotStarted => return Err(TransitionRejection::NotStarted.into()),
            Cursor::Completed => return Err(TransitionRejection::Completed.into()),
        };
        if !self.step_ready {
            return Err(TransitionRejection::StepNotReady.into());
        }

        let step = framework
            .step_at(index)
            .ok_or(InvariantViolation::CursorOutOfRange {
                cursor: index,
                step_count: framework.step_count(),
            })?;
        if self.completed_step_ids.contains(step.id()) {
            return Err(InvariantViolation::DuplicateStep {
                id: step.id().clone(),
            }
            .into());
        }

        self.completed_step_ids.push(step.id().clone());
        self.total_points = self.total_points.saturating_add(step.point_value());
        self.step_ready = false;

        let next = index + 1;
        if next == framework.step_count() {
            self.cursor = Cursor::Completed;
            self.completed_at = Some(at);
            Ok(StepOutcome::Completed)
        } else {
            self.cursor = Cursor::At(next);
            Ok(StepOutcome::Advanced { cursor: next })
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::framework::Step;
    use crate::time::fixed_now;

    fn build_framework(points: &[u32]) -> FrameworkDefinition {
        let steps = points
            .iter()
            .enumerate()
            .map(|(index, value)| {
                Step::new(
                    StepId::new(format!("s{}", index + 1)),
                    format!("Step {}", index + 1),
                    "",
                    *value,
                    "",
                    "",
                )
                .unwrap()
            })
            .collect();
        FrameworkDefinition::new(FrameworkId::new("kaizen"), "Kaizen", steps).unwrap()
    }

    fn started_session(framework: &FrameworkDefinition) -> Session {
        let mut session = Session::new(framework.id().clone());
        session.start(fixed_now()).unwrap();
        session
    }

    #[test]
    fn new_session_is_not_started() {
        let session = Session::new(FrameworkId::new("kaizen"));
        assert_eq!(session.cursor(), Cursor::NotStarted);
        assert_eq!(session.total_points(), 0);
        assert!(!session.step_ready());
        assert!(session.started_at().is_none());
    }

    #[test]
    fn start_moves_cursor_to_first_step_without_points() {
        let framework = build_framework(&[50]);
        let session = started_session(&framework);

        assert_eq!(session.cursor(), Cursor::At(0));
        assert_eq!(session.total_points(), 0);
        assert_eq!(session.started_at(), Some(fixed_now()));
    }

    #[test]
    fn start_rejects_in_progress_and_completed_sessions() {
        let framework = build_framework(&[50]);
        let mut session = started_session(&framework);

        assert_eq!(
            session.start(fixed_now()).unwrap_err(),
            TransitionRejection::InProgress
        );

        session.set_ready(true).unwrap();
        session.complete_current(&framework, fixed_now()).unwrap();
        assert_eq!(
            session.start(fixed_now()).unwrap_err(),
            TransitionRejection::Completed
        );
        // The rejected calls must not have clobbered anything.
        assert_eq!(session.total_points(), 50);
        assert!(session.is_complete());
    }

    #[test]
    fn set_ready_requires_an_in_progress_session() {
        let framework = build_framework(&[50]);
        let mut session = Session::new(framework.id().clone());

        assert_eq!(
            session.set_ready(true).unwrap_err(),
            TransitionRejection::NotStarted
        );

        session.start(fixed_now()).unwrap();
        session.set_ready(true).unwrap();
        assert!(session.step_ready());
        session.set_ready(false).unwrap();
        assert!(!session.step_ready());
    }

    #[test]
    fn complete_current_rejects_when_not_ready() {
        let framework = build_framework(&[50, 40]);
        let mut session = started_session(&framework);

        let err = session.complete_current(&framework, fixed_now()).unwrap_err();
        assert_eq!(
            err,
            CompleteStepError::Rejected(TransitionRejection::StepNotReady)
        );
        assert_eq!(session.cursor(), Cursor::At(0));
        assert_eq!(session.completed_count(), 0);
        assert_eq!(session.total_points(), 0);
    }

    #[test]
    fn completing_a_step_resets_ready_and_advances() {
        let framework = build_framework(&[50, 40]);
        let mut session = started_session(&framework);

        session.set_ready(true).unwrap();
        let outcome = session.complete_current(&framework, fixed_now()).unwrap();

        assert_eq!(outcome, StepOutcome::Advanced { cursor: 1 });
        assert_eq!(session.cursor(), Cursor::At(1));
        assert!(!session.step_ready());
        assert_eq!(session.completed_step_ids(), &[StepId::new("s1")]);
        assert_eq!(session.total_points(), 50);
    }

    #[test]
    fn completing_the_last_step_finishes_the_session() {
        let framework = build_framework(&[50]);
        let mut session = started_session(&framework);

        session.set_ready(true).unwrap();
        let outcome = session.complete_current(&framework, fixed_now()).unwrap();

        assert_eq!(outcome, StepOutcome::Completed);
        assert!(session.is_complete());
        assert_eq!(session.completed_at(), Some(fixed_now()));
        assert_eq!(
            session.complete_current(&framework, fixed_now()).unwrap_err(),
            CompleteStepError::Rejected(TransitionRejection::Completed)
        );
    }

    #[test]
    fn points_always_equal_sum_of_completed_steps() {
        let framework = build_framework(&[50, 40, 60]);
        let mut session = started_session(&framework);
        let mut expected = 0;

        for step in framework.steps() {
            session.set_ready(true).unwrap();
            session.complete_current(&framework, fixed_now()).unwrap();
            expected += step.point_value();
            assert_eq!(session.total_points(), expected);
            assert_eq!(
                session.completed_count(),
                session.completed_step_ids().len()
            );
        }
        assert_eq!(session.total_points(), 150);
    }

    #[test]
    fn framework_mismatch_is_an_invariant_violation() {
        let framework = build_framework(&[50]);
        let mut session = Session::new(FrameworkId::new("other"));
        session.start(fixed_now()).unwrap();
        session.set_ready(true).unwrap();

        let err = session.complete_current(&framework, fixed_now()).unwrap_err();
        assert!(matches!(
            err,
            CompleteStepError::Invariant(InvariantViolation::FrameworkMismatch { .. })
        ));
    }

    #[test]
    fn notes_do_not_affect_progress() {
        let framework = build_framework(&[50]);
        let mut session = started_session(&framework);

        session.set_note(StepId::new("s1"), "felt easy");
        assert_eq!(session.note(&StepId::new("s1")), Some("felt easy"));
        assert_eq!(session.note(&StepId::new("s2")), None);
        assert_eq!(session.total_points(), 0);
        assert_eq!(session.cursor(), Cursor::At(0));
    }
}
