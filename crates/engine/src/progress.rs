use tracing::debug;

use stride_core::Clock;
use stride_core::achievements::{Achievements, evaluate};
use stride_core::model::{
    CompleteStepError, Cursor, FrameworkDefinition, FrameworkId, InvariantViolation, Session, Step,
    StepOutcome, TransitionRejection,
};
use stride_core::scoring::{self, ScoringError};

use crate::bridge::SessionBridge;
use crate::catalog::{self, CatalogSource, FrameworkCatalog};
use crate::error::BridgeError;
use crate::snapshot::SessionSnapshot;

//
// ─── ADVANCE OUTCOME ───────────────────────────────────────────────────────────
//

/// Result of a single `advance` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// The current step was recorded and the cursor moved to `cursor`.
    Advanced { cursor: usize },
    /// The last step was recorded; the session is complete.
    Completed,
    /// Nothing happened; the session is unchanged and the caller may retry.
    Rejected(TransitionRejection),
}

//
// ─── PROGRESS ENGINE ───────────────────────────────────────────────────────────
//

/// Drives one session through the steps of one framework.
///
/// Owns the session, the achievement latches and the clock; receives its
/// framework and catalog access explicitly rather than reading any ambient
/// state. Discarding the engine discards the session, which is the only way
/// to abandon an attempt.
#[derive(Debug, Clone)]
pub struct ProgressEngine {
    framework: FrameworkDefinition,
    session: Session,
    achievements: Achievements,
    clock: Clock,
    source: CatalogSource,
}

impl ProgressEngine {
    /// Build an engine around an already-resolved framework definition.
    #[must_use]
    pub fn new(framework: FrameworkDefinition) -> Self {
        let session = Session::new(framework.id().clone());
        Self {
            framework,
            session,
            achievements: Achievements::new(),
            clock: Clock::default_clock(),
            source: CatalogSource::Catalog,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Resolve `id` through the catalog, substituting the single-step
    /// fallback for unknown ids.
    #[must_use]
    pub fn from_catalog(catalog: &dyn FrameworkCatalog, id: &FrameworkId) -> Self {
        let (framework, source) = catalog::resolve(catalog, id);
        let mut engine = Self::new(framework);
        engine.source = source;
        engine
    }

    /// Read the selected framework id once from the session bridge and
    /// resolve it through the catalog.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::EmptySlot` when no framework was selected.
    pub fn from_bridge(
        bridge: &mut dyn SessionBridge,
        catalog: &dyn FrameworkCatalog,
    ) -> Result<Self, BridgeError> {
        let id = bridge.take_framework_id().ok_or(BridgeError::EmptySlot)?;
        Ok(Self::from_catalog(catalog, &id))
    }

    #[must_use]
    pub fn framework(&self) -> &FrameworkDefinition {
        &self.framework
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn source(&self) -> CatalogSource {
        self.source
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.session.is_complete()
    }

    /// The step at the cursor, if the session is in progress.
    #[must_use]
    pub fn current_step(&self) -> Option<&Step> {
        self.session
            .cursor()
            .index()
            .and_then(|index| self.framework.step_at(index))
    }

    /// Begin the session at the first step. No points are awarded.
    ///
    /// # Errors
    ///
    /// Rejected once the session has left `NotStarted`; restarting means
    /// constructing a fresh engine and discarding this one.
    pub fn start(&mut self) -> Result<(), TransitionRejection> {
        self.session.start(self.clock.now())?;
        debug!(framework_id = %self.framework.id(), "session started");
        Ok(())
    }

    /// Toggle the ready flag for the step at the cursor.
    ///
    /// # Errors
    ///
    /// Rejected outside of an in-progress session.
    pub fn set_ready(&mut self, ready: bool) -> Result<(), TransitionRejection> {
        self.session.set_ready(ready)
    }

    /// Record the current step as completed and move the cursor forward,
    /// then re-evaluate the achievement predicates.
    ///
    /// A session that is not in progress, or whose current step was never
    /// marked ready, yields `AdvanceOutcome::Rejected` with the session
    /// untouched; callers can always tell "not ready" from "succeeded".
    ///
    /// # Errors
    ///
    /// Returns an `InvariantViolation` when the session state indicates a
    /// catalog or engine defect; the session must not be driven further.
    pub fn advance(&mut self) -> Result<AdvanceOutcome, InvariantViolation> {
        match self.session.complete_current(&self.framework, self.clock.now()) {
            Ok(outcome) => {
                self.achievements
                    .unlock_all(evaluate(&self.session, &self.framework));
                debug!(
                    framework_id = %self.framework.id(),
                    total_points = self.session.total_points(),
                    completed = self.session.completed_count(),
                    "step completed"
                );
                Ok(match outcome {
                    StepOutcome::Advanced { cursor } => AdvanceOutcome::Advanced { cursor },
                    StepOutcome::Completed => AdvanceOutcome::Completed,
                })
            }
            Err(CompleteStepError::Rejected(reason)) => Ok(AdvanceOutcome::Rejected(reason)),
            Err(CompleteStepError::Invariant(violation)) => Err(violation),
        }
    }

    /// Attach a free-text note to the step at the cursor.
    ///
    /// # Errors
    ///
    /// Rejected outside of an in-progress session.
    pub fn set_current_note(&mut self, text: impl Into<String>) -> Result<(), TransitionRejection> {
        match self.session.cursor() {
            Cursor::NotStarted => Err(TransitionRejection::NotStarted),
            Cursor::Completed => Err(TransitionRejection::Completed),
            Cursor::At(index) => {
                let id = match self.framework.step_at(index) {
                    Some(step) => step.id().clone(),
                    None => return Err(TransitionRejection::Completed),
                };
                self.session.set_note(id, text);
                Ok(())
            }
        }
    }

    /// Assemble the read-only view for rendering.
    ///
    /// # Errors
    ///
    /// Returns `ScoringError::EmptyFramework` only if the framework lost its
    /// steps, which a validated definition never does.
    pub fn snapshot(&self) -> Result<SessionSnapshot, ScoringError> {
        let total_points = self.session.total_points();
        let progress_percent =
            scoring::progress_percent(self.session.completed_count(), self.framework.step_count())?;

        Ok(SessionSnapshot {
            framework_id: self.framework.id().clone(),
            source: self.source,
            cursor: self.session.cursor(),
            completed_step_ids: self.session.completed_step_ids().to_vec(),
            total_points,
            level: scoring::level(total_points),
            progress_percent,
            achievements: self.achievements.snapshot(),
            started_at: self.session.started_at(),
            completed_at: self.session.completed_at(),
        })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
