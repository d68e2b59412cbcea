use stride_core::model::FrameworkId;

/// One ephemeral slot carrying the selected framework id into the engine.
///
/// The engine reads the slot exactly once at initialization and never writes
/// back; the slot is not a persistence mechanism for progress.
pub trait SessionBridge {
    /// Take the stored framework id, leaving the slot empty.
    fn take_framework_id(&mut self) -> Option<FrameworkId>;
}

/// In-memory slot implementation.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    value: Option<FrameworkId>,
}

impl MemorySlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A slot pre-filled with a selection.
    #[must_use]
    pub fn holding(id: FrameworkId) -> Self {
        Self { value: Some(id) }
    }

    /// Record a framework selection, replacing any previous one.
    pub fn store(&mut self, id: FrameworkId) {
        self.value = Some(id);
    }
}

impl SessionBridge for MemorySlot {
    fn take_framework_id(&mut self) -> Option<FrameworkId> {
        self.value.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_yields_its_value_exactly_once() {
        let mut slot = MemorySlot::holding(FrameworkId::new("kaizen"));
        assert_eq!(slot.take_framework_id(), Some(FrameworkId::new("kaizen")));
        assert_eq!(slot.take_framework_id(), None);
    }

    #[test]
    fn empty_slot_yields_nothing() {
        let mut slot = MemorySlot::new();
        assert_eq!(slot.take_framework_id(), None);
    }

    #[test]
    fn store_replaces_a_previous_selection() {
        let mut slot = MemorySlot::holding(FrameworkId::new("gtd"));
        slot.store(FrameworkId::new("kaizen"));
        assert_eq!(slot.take_framework_id(), Some(FrameworkId::new("kaizen")));
    }
}
