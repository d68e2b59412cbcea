use serde::Serialize;
use std::collections::BTreeMap;
use tracing::warn;

use stride_core::model::{FrameworkDefinition, FrameworkId, Step, StepId};

/// Read-only lookup of framework definitions.
///
/// Implementations hold already-resolved in-memory data; `find` never blocks.
pub trait FrameworkCatalog {
    fn find(&self, id: &FrameworkId) -> Option<&FrameworkDefinition>;
}

/// Where a resolved definition came from.
///
/// `Fallback` is the warning-level signal that the requested id was unknown;
/// the session still runs against a valid single-step definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSource {
    Catalog,
    Fallback,
}

/// In-memory catalog backed by a map.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    frameworks: BTreeMap<FrameworkId, FrameworkDefinition>,
}

impl StaticCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion.
    #[must_use]
    pub fn with(mut self, framework: FrameworkDefinition) -> Self {
        self.insert(framework);
        self
    }

    /// Register a definition, replacing any previous one with the same id.
    pub fn insert(&mut self, framework: FrameworkDefinition) {
        self.frameworks.insert(framework.id().clone(), framework);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.frameworks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frameworks.is_empty()
    }
}

impl FrameworkCatalog for StaticCatalog {
    fn find(&self, id: &FrameworkId) -> Option<&FrameworkDefinition> {
        self.frameworks.get(id)
    }
}

/// Single-step stand-in used when a framework id cannot be resolved.
///
/// Keeps every session backed by at least one step, so the scoring rules
/// never see an empty framework.
///
/// # Panics
///
/// Never panics in practice: the fallback literals always validate.
#[must_use]
pub fn fallback_definition(id: &FrameworkId) -> FrameworkDefinition {
    let step = Step::new(
        StepId::new("orientation"),
        "Get oriented",
        "This framework could not be found, so start with a single orientation step.",
        10,
        "Pick a framework you want to work through",
        "Go back to the framework overview and select one of the listed frameworks",
    )
    .expect("fallback step should validate");

    FrameworkDefinition::new(id.clone(), "Getting started", vec![step])
        .expect("fallback definition should validate")
}

/// Resolve `id` through the catalog, substituting the fallback for unknown
/// ids. Unknown ids are surfaced as a warning, never as a hard failure.
#[must_use]
pub fn resolve(
    catalog: &dyn FrameworkCatalog,
    id: &FrameworkId,
) -> (FrameworkDefinition, CatalogSource) {
    match catalog.find(id) {
        Some(framework) => (framework.clone(), CatalogSource::Catalog),
        None => {
            warn!(framework_id = %id, "unknown framework id, substituting fallback definition");
            (fallback_definition(id), CatalogSource::Fallback)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_framework(id: &str) -> FrameworkDefinition {
        let step = Step::new(StepId::new("s1"), "Step 1", "", 50, "", "").unwrap();
        FrameworkDefinition::new(FrameworkId::new(id), "Test", vec![step]).unwrap()
    }

    #[test]
    fn find_returns_registered_definitions() {
        let catalog = StaticCatalog::new().with(build_framework("kaizen"));
        assert_eq!(catalog.len(), 1);
        assert!(catalog.find(&FrameworkId::new("kaizen")).is_some());
        assert!(catalog.find(&FrameworkId::new("gtd")).is_none());
    }

    #[test]
    fn resolve_prefers_the_catalog() {
        let catalog = StaticCatalog::new().with(build_framework("kaizen"));
        let (framework, source) = resolve(&catalog, &FrameworkId::new("kaizen"));

        assert_eq!(source, CatalogSource::Catalog);
        assert_eq!(framework.step_at(0).unwrap().point_value(), 50);
    }

    #[test]
    fn resolve_substitutes_a_non_empty_fallback() {
        let catalog = StaticCatalog::new();
        let (framework, source) = resolve(&catalog, &FrameworkId::new("unknown"));

        assert_eq!(source, CatalogSource::Fallback);
        assert_eq!(framework.id(), &FrameworkId::new("unknown"));
        assert_eq!(framework.step_count(), 1);
        assert!(framework.step_at(0).unwrap().point_value() > 0);
    }
}
