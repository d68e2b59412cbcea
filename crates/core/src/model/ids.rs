use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier for a Framework.
///
/// Deliberately decoupled from any display title: titles may be edited or
/// localized, the identifier never changes.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameworkId(String);

impl FrameworkId {
    /// Creates a new `FrameworkId`
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the identifier is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Identifier for a Step, unique within its Framework.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepId(String);

impl StepId {
    /// Creates a new `StepId`
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the identifier is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for FrameworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FrameworkId({})", self.0)
    }
}

impl fmt::Debug for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StepId({})", self.0)
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for FrameworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framework_id_display() {
        let id = FrameworkId::new("kaizen");
        assert_eq!(id.to_string(), "kaizen");
    }

    #[test]
    fn test_framework_id_equality() {
        assert_eq!(FrameworkId::new("gtd"), FrameworkId::new("gtd"));
        assert_ne!(FrameworkId::new("gtd"), FrameworkId::new("kaizen"));
    }

    #[test]
    fn test_step_id_display() {
        let id = StepId::new("capture_inbox");
        assert_eq!(id.to_string(), "capture_inbox");
    }

    #[test]
    fn test_step_id_ordering_is_stable() {
        let mut ids = vec![StepId::new("b"), StepId::new("a"), StepId::new("c")];
        ids.sort();
        assert_eq!(ids[0], StepId::new("a"));
        assert_eq!(ids[2], StepId::new("c"));
    }

    #[test]
    fn test_empty_id_detection() {
        assert!(FrameworkId::new("").is_empty());
        assert!(!StepId::new("s1").is_empty());
    }
}
