mod framework;
mod ids;
mod session;

pub use framework::{FrameworkDefinition, FrameworkDraft, FrameworkError, Step, StepDraft};
pub use ids::{FrameworkId, StepId};
pub use session::{
    CompleteStepError, Cursor, InvariantViolation, Session, StepOutcome, TransitionRejection,
};
