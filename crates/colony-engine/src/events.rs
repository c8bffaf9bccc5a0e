//! Notifications emitted by the engine.

use colony_core::{AchievementId, ResearchId, ResourceId};

/// Something a presentation layer may want to react to. Delivery is
/// synchronous and fire-and-forget.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    /// An achievement unlocked and its reward was applied.
    AchievementUnlocked { id: AchievementId, name: String },
    /// A resource's lifetime earnings crossed a milestone this cycle.
    MilestoneReached { resource: ResourceId, threshold: f64 },
    /// A research project was completed.
    ResearchCompleted { id: ResearchId },
    /// A prestige reset happened.
    PrestigePerformed { gained: f64, total: f64 },
    /// A tick finished; `tick` counts ticks since the engine was built.
    TickCompleted { tick: u64 },
}

/// Registered event handler.
pub type EventHandler = Box<dyn FnMut(&GameEvent)>;
