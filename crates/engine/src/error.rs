//! Shared error types for the engine crate.

use thiserror::Error;

/// Errors emitted while reading the ephemeral session slot.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BridgeError {
    #[error("no framework id in the session slot")]
    EmptySlot,
}
