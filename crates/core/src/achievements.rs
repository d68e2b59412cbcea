//! Achievement predicates and the one-way unlock latch.
//!
//! `evaluate` is a pure pass over a post-transition session; the result is
//! unioned into an [`Achievements`] set that only ever grows, which makes the
//! never-re-lock rule mechanical rather than a convention.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

use crate::model::{FrameworkDefinition, Session};

/// Total points at which the points milestone unlocks.
pub const POINTS_MILESTONE: u32 = 100;

//
// ─── ACHIEVEMENT IDS ───────────────────────────────────────────────────────────
//

/// Fixed catalog of achievement latches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementId {
    /// At least one step completed.
    FirstStep,
    /// Accumulated points reached [`POINTS_MILESTONE`].
    Points100,
    /// At least half of the framework's steps completed (rounded up).
    HalfComplete,
    /// Every step of the framework completed.
    FrameworkMaster,
}

impl AchievementId {
    pub const ALL: [AchievementId; 4] = [
        AchievementId::FirstStep,
        AchievementId::Points100,
        AchievementId::HalfComplete,
        AchievementId::FrameworkMaster,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AchievementId::FirstStep => "first_step",
            AchievementId::Points100 => "points_100",
            AchievementId::HalfComplete => "half_complete",
            AchievementId::FrameworkMaster => "framework_master",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            AchievementId::FirstStep => "First Step",
            AchievementId::Points100 => "Point Collector",
            AchievementId::HalfComplete => "Halfway There",
            AchievementId::FrameworkMaster => "Framework Master",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            AchievementId::FirstStep => "Complete your first step",
            AchievementId::Points100 => "Earn 100 points",
            AchievementId::HalfComplete => "Complete half of the framework",
            AchievementId::FrameworkMaster => "Complete every step of the framework",
        }
    }
}

impl fmt::Display for AchievementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One catalog entry together with its unlock state, for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Achievement {
    pub id: AchievementId,
    pub title: &'static str,
    pub description: &'static str,
    pub unlocked: bool,
}

//
// ─── EVALUATION ────────────────────────────────────────────────────────────────
//

/// Evaluate every predicate against a post-transition session.
///
/// Pure: carries no latch state of its own. Union the result into an
/// [`Achievements`] set after each successful advance.
#[must_use]
pub fn evaluate(session: &Session, framework: &FrameworkDefinition) -> BTreeSet<AchievementId> {
    let completed = session.completed_count();
    let step_count = framework.step_count();
    let mut unlocked = BTreeSet::new();

    if completed >= 1 {
        unlocked.insert(AchievementId::FirstStep);
    }
    if session.total_points() >= POINTS_MILESTONE {
        unlocked.insert(AchievementId::Points100);
    }
    if completed >= step_count.div_ceil(2) {
        unlocked.insert(AchievementId::HalfComplete);
    }
    if completed == step_count {
        unlocked.insert(AchievementId::FrameworkMaster);
    }

    unlocked
}

//
// ─── LATCH SET ─────────────────────────────────────────────────────────────────
//

/// Unlocked achievements for one session.
///
/// The set only grows: there is no removal operation, so an unlocked
/// achievement stays unlocked for the session's lifetime.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Achievements {
    unlocked: BTreeSet<AchievementId>,
}

impl Achievements {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Union newly satisfied predicates into the latch set.
    pub fn unlock_all(&mut self, ids: impl IntoIterator<Item = AchievementId>) {
        self.unlocked.extend(ids);
    }

    #[must_use]
    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.unlocked.contains(&id)
    }

    #[must_use]
    pub fn unlocked(&self) -> &BTreeSet<AchievementId> {
        &self.unlocked
    }

    /// The full four-entry catalog with per-id unlock flags.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Achievement> {
        AchievementId::ALL
            .iter()
            .map(|&id| Achievement {
                id,
                title: id.title(),
                description: id.description(),
                unlocked: self.is_unlocked(id),
            })
            .collect()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
