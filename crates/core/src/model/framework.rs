use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{FrameworkId, StepId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FrameworkError {
    #[error("framework id cannot be empty")]
    EmptyFrameworkId,

    #[error("step id cannot be empty")]
    EmptyStepId,

    #[error("step title cannot be empty")]
    EmptyStepTitle,

    #[error("step point value must be > 0")]
    ZeroPointValue,

    #[error("framework must contain at least one step")]
    NoSteps,

    #[error("duplicate step id within framework: {id}")]
    DuplicateStepId { id: StepId },
}

//
// ─── STEP ──────────────────────────────────────────────────────────────────────
//

/// Unvalidated step data as supplied by a catalog file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDraft {
    pub id: String,
    pub title: String,
    pub description: String,
    pub point_value: u32,
    pub challenge: String,
    pub instructions: String,
}

impl StepDraft {
    /// Validate the draft into an immutable `Step`.
    ///
    /// # Errors
    ///
    /// Returns `FrameworkError::EmptyStepId`, `EmptyStepTitle` or
    /// `ZeroPointValue` when the draft fields are out of range.
    pub fn validate(self) -> Result<Step, FrameworkError> {
        Step::new(
            StepId::new(self.id),
            self.title,
            self.description,
            self.point_value,
            self.challenge,
            self.instructions,
        )
    }
}

/// One challenge unit within a framework, worth a fixed point value.
///
/// Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    id: StepId,
    title: String,
    description: String,
    point_value: u32,
    challenge: String,
    instructions: String,
}

impl Step {
    /// Build a validated step.
    ///
    /// # Errors
    ///
    /// Returns `FrameworkError::EmptyStepId` if the id is empty,
    /// `FrameworkError::EmptyStepTitle` if the title is empty, and
    /// `FrameworkError::ZeroPointValue` if the point value is zero.
    pub fn new(
        id: StepId,
        title: impl Into<String>,
        description: impl Into<String>,
        point_value: u32,
        challenge: impl Into<String>,
        instructions: impl Into<String>,
    ) -> Result<Self, FrameworkError> {
        if id.is_empty() {
            return Err(FrameworkError::EmptyStepId);
        }
        let title = title.into();
        if title.trim().is_empty() {
            return Err(FrameworkError::EmptyStepTitle);
        }
        if point_value == 0 {
            return Err(FrameworkError::ZeroPointValue);
        }

        Ok(Self {
            id,
            title,
            description: description.into(),
            point_value,
            challenge: challenge.into(),
            instructions: instructions.into(),
        })
    }

    #[must_use]
    pub fn id(&self) -> &StepId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn point_value(&self) -> u32 {
        self.point_value
    }

    #[must_use]
    pub fn challenge(&self) -> &str {
        &self.challenge
    }

    #[must_use]
    pub fn instructions(&self) -> &str {
        &self.instructions
    }
}

//
// ─── FRAMEWORK DEFINITION ──────────────────────────────────────────────────────
//

/// Unvalidated framework data as supplied by a catalog file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameworkDraft {
    pub id: String,
    pub title: String,
    pub steps: Vec<StepDraft>,
}

impl FrameworkDraft {
    /// Validate the draft into an immutable `FrameworkDefinition`.
    ///
    /// # Errors
    ///
    /// Propagates step validation errors and the framework-level checks of
    /// `FrameworkDefinition::new`.
    pub fn validate(self) -> Result<FrameworkDefinition, FrameworkError> {
        let steps = self
            .steps
            .into_iter()
            .map(StepDraft::validate)
            .collect::<Result<Vec<_>, _>>()?;
        FrameworkDefinition::new(FrameworkId::new(self.id), self.title, steps)
    }
}

/// A named methodology: an ordered, fixed sequence of steps.
///
/// Sequence order is significant; sessions walk it front to back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameworkDefinition {
    id: FrameworkId,
    title: String,
    steps: Vec<Step>,
}

impl FrameworkDefinition {
    /// Build a validated framework definition.
    ///
    /// # Errors
    ///
    /// Returns `FrameworkError::EmptyFrameworkId` if the id is empty,
    /// `FrameworkError::NoSteps` if `steps` is empty, and
    /// `FrameworkError::DuplicateStepId` if two steps share an id.
    pub fn new(
        id: FrameworkId,
        title: impl Into<String>,
        steps: Vec<Step>,
    ) -> Result<Self, FrameworkError> {
        if id.is_empty() {
            return Err(FrameworkError::EmptyFrameworkId);
        }
        if steps.is_empty() {
            return Err(FrameworkError::NoSteps);
        }
        for (index, step) in steps.iter().enumerate() {
            if steps[..index].iter().any(|other| other.id() == step.id()) {
                return Err(FrameworkError::DuplicateStepId {
                    id: step.id().clone(),
                });
            }
        }

        Ok(Self {
            id,
            title: title.into(),
            steps,
        })
    }

    #[must_use]
    pub fn id(&self) -> &FrameworkId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Steps in walk order.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of steps; always at least one.
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn step_at(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    #[must_use]
    pub fn contains_step(&self, id: &StepId) -> bool {
        self.steps.iter().any(|step| step.id() == id)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
