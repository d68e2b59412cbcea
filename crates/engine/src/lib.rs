#![forbid(unsafe_code)]

pub mod bridge;
pub mod catalog;
pub mod error;
pub mod progress;
pub mod snapshot;

pub use stride_core::Clock;

pub use bridge::{MemorySlot, SessionBridge};
pub use catalog::{CatalogSource, FrameworkCatalog, StaticCatalog};
pub use error::BridgeError;
pub use progress::{AdvanceOutcome, ProgressEngine};
pub use snapshot::SessionSnapshot;
