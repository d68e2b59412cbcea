use chrono::{DateTime, Utc};
use serde::Serialize;

use stride_core::achievements::Achievement;
use stride_core::model::{Cursor, FrameworkId, StepId};

use crate::catalog::CatalogSource;

/// Read-only view of one session, assembled for rendering.
///
/// This is intentionally **not** a UI view-model:
/// - no pre-formatted strings
/// - no localization assumptions
///
/// `level` and `progress_percent` are derived fresh on every snapshot; the
/// session never stores either.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub framework_id: FrameworkId,
    pub source: CatalogSource,
    pub cursor: Cursor,
    pub completed_step_ids: Vec<StepId>,
    pub total_points: u32,
    pub level: u32,
    pub progress_percent: u8,
    pub achievements: Vec<Achievement>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}
