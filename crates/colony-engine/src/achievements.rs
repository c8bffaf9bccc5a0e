//! Achievement evaluation.
//!
//! Conditions are declarative ([`AchievementCondition`]) and evaluated against
//! a read-only [`AchievementContext`]. A condition that cannot be evaluated
//! yields a [`ConditionError`]; the sweep logs it and moves on to the next
//! achievement.

use colony_core::{
    AchievementCondition, AchievementDef, AchievementId, ContentTables, ResourceId, UpgradeId,
};
use persistence::AchievementState;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// What conditions may observe.
pub trait AchievementContext {
    /// `(amount, total_earned)` of a resource, `None` if unknown.
    fn resource_totals(&self, id: &ResourceId) -> Option<(f64, f64)>;
    /// Owned count, `None` if the upgrade is unknown.
    fn owned(&self, id: &UpgradeId) -> Option<u32>;
    /// Owned generator units.
    fn total_buildings(&self) -> u32;
    /// Completed research projects this cycle.
    fn research_count(&self) -> u32;
    /// `(completed, total)` research in a tier, `None` for an empty tier.
    fn tier_progress(&self, tier: u8) -> Option<(u32, u32)>;
    fn total_clicks(&self) -> u64;
    fn used_space(&self) -> u32;
    fn max_space(&self) -> u32;
    /// Local wall-clock hour, 0..24.
    fn local_hour(&self) -> u32;
    fn prestige_count(&self) -> u32;
    fn total_prestige_points(&self) -> f64;
}

/// A condition that could not be evaluated.
#[derive(Debug, Error, PartialEq)]
pub enum ConditionError {
    #[error("unknown resource {0}")]
    UnknownResource(ResourceId),
    #[error("unknown upgrade {0}")]
    UnknownUpgrade(UpgradeId),
    #[error("research tier {0} is empty")]
    EmptyTier(u8),
    #[error("invalid hour window {start}..{end}")]
    InvalidHours { start: u32, end: u32 },
}

/// Evaluated condition: current value against target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Progress {
    pub current: f64,
    pub target: f64,
    pub met: bool,
}

impl Progress {
    fn at_least(current: f64, target: f64) -> Self {
        Self {
            current,
            target,
            met: current >= target,
        }
    }

    fn flag(met: bool) -> Self {
        Self {
            current: if met { 1.0 } else { 0.0 },
            target: 1.0,
            met,
        }
    }

    /// Progress in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        if self.target <= 0.0 {
            return if self.met { 1.0 } else { 0.0 };
        }
        (self.current / self.target).clamp(0.0, 1.0)
    }
}

/// Evaluate one condition.
pub fn evaluate(
    condition: &AchievementCondition,
    ctx: &impl AchievementContext,
) -> Result<Progress, ConditionError> {
    let totals = |id: &ResourceId| {
        ctx.resource_totals(id)
            .ok_or_else(|| ConditionError::UnknownResource(id.clone()))
    };
    Ok(match condition {
        AchievementCondition::ResourceEarned { resource, amount } => {
            Progress::at_least(totals(resource)?.1, *amount)
        }
        AchievementCondition::ResourceAmount { resource, amount } => {
            Progress::at_least(totals(resource)?.0, *amount)
        }
        AchievementCondition::ResourceAmountWithin { resource, min, max } => {
            let have = totals(resource)?.0;
            Progress::flag(have >= *min && have < *max)
        }
        AchievementCondition::TotalBuildings { count } => {
            Progress::at_least(ctx.total_buildings() as f64, *count as f64)
        }
        AchievementCondition::UpgradeCount { upgrade, count } => {
            let owned = ctx
                .owned(upgrade)
                .ok_or_else(|| ConditionError::UnknownUpgrade(upgrade.clone()))?;
            Progress::at_least(owned as f64, *count as f64)
        }
        AchievementCondition::ResearchCompleted { count } => {
            Progress::at_least(ctx.research_count() as f64, *count as f64)
        }
        AchievementCondition::ResearchTierComplete { tier } => {
            let (done, total) = ctx
                .tier_progress(*tier)
                .ok_or(ConditionError::EmptyTier(*tier))?;
            Progress::at_least(done as f64, total as f64)
        }
        AchievementCondition::TotalClicks { count } => {
            Progress::at_least(ctx.total_clicks() as f64, *count as f64)
        }
        AchievementCondition::SpaceFull => {
            Progress::at_least(ctx.used_space() as f64, ctx.max_space() as f64)
        }
        AchievementCondition::LocalHourWithin { start, end } => {
            if start >= end || *end > 24 {
                return Err(ConditionError::InvalidHours {
                    start: *start,
                    end: *end,
                });
            }
            let hour = ctx.local_hour();
            Progress::flag(hour >= *start && hour < *end)
        }
        AchievementCondition::PrestigeCount { count } => {
            Progress::at_least(ctx.prestige_count() as f64, *count as f64)
        }
        AchievementCondition::TotalPrestigePoints { amount } => {
            Progress::at_least(ctx.total_prestige_points(), *amount)
        }
    })
}

/// Unlock state of every achievement in the table.
#[derive(Clone, Debug)]
pub struct AchievementBook {
    tables: Arc<ContentTables>,
    /// Parallel to `tables.achievements()`.
    states: Vec<AchievementState>,
}

impl AchievementBook {
    /// Everything locked.
    pub fn new(tables: Arc<ContentTables>) -> Self {
        let states = tables
            .achievements()
            .iter()
            .map(|d| AchievementState {
                id: d.id.clone(),
                unlocked: false,
                unlocked_at: None,
                progress: 0.0,
            })
            .collect();
        Self { tables, states }
    }

    /// Rebuild from saved entries; entries for unknown ids are dropped.
    pub fn from_saved(tables: Arc<ContentTables>, saved: &[AchievementState]) -> Self {
        let mut book = Self::new(tables);
        for entry in saved {
            match book.states.iter_mut().find(|s| s.id == entry.id) {
                Some(state) => *state = entry.clone(),
                None => debug!(achievement = %entry.id, "dropping unknown saved achievement"),
            }
        }
        book
    }

    /// Saved form of every entry.
    pub fn to_saved(&self) -> Vec<AchievementState> {
        self.states.clone()
    }

    /// Definitions paired with their state, in table order.
    pub fn entries(&self) -> impl Iterator<Item = (&AchievementDef, &AchievementState)> {
        self.tables.achievements().iter().zip(self.states.iter())
    }

    pub fn is_unlocked(&self, id: &str) -> bool {
        self.states.iter().any(|s| s.id.as_str() == id && s.unlocked)
    }

    pub fn unlocked_count(&self) -> usize {
        self.states.iter().filter(|s| s.unlocked).count()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Evaluate every locked achievement. Returns the ones that unlocked in
    /// this sweep; the caller applies their rewards. Already unlocked entries
    /// are skipped without evaluation.
    pub fn check_all(&mut self, ctx: &impl AchievementContext, now_ms: i64) -> Vec<AchievementId> {
        let mut unlocked = Vec::new();
        for (def, state) in self.tables.achievements().iter().zip(self.states.iter_mut()) {
            if state.unlocked {
                continue;
            }
            let progress = match evaluate(&def.condition, ctx) {
                Ok(p) => p,
                Err(e) => {
                    warn!(achievement = %def.id, error = %e, "skipping faulty achievement condition");
                    continue;
                }
            };
            state.progress = progress.current.min(progress.target);
            if progress.met {
                state.unlocked = true;
                state.unlocked_at = Some(now_ms);
                debug!(achievement = %def.id, "achievement unlocked");
                unlocked.push(def.id.clone());
            }
        }
        unlocked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colony_core::AchievementCategory;
    use std::collections::BTreeMap;

    #[derive(Default)]
    struct Ctx {
        resources: BTreeMap<ResourceId, (f64, f64)>,
        clicks: u64,
        hour: u32,
        used: u32,
        max: u32,
    }

    impl AchievementContext for Ctx {
        fn resource_totals(&self, id: &ResourceId) -> Option<(f64, f64)> {
            self.resources.get(id).copied()
        }
        fn owned(&self, _id: &UpgradeId) -> Option<u32> {
            None
        }
        fn total_buildings(&self) -> u32 {
            0
        }
        fn research_count(&self) -> u32 {
            0
        }
        fn tier_progress(&self, tier: u8) -> Option<(u32, u32)> {
            (tier == 1).then_some((1, 4))
        }
        fn total_clicks(&self) -> u64 {
            self.clicks
        }
        fn used_space(&self) -> u32 {
            self.used
        }
        fn max_space(&self) -> u32 {
            self.max
        }
        fn local_hour(&self) -> u32 {
            self.hour
        }
        fn prestige_count(&self) -> u32 {
            0
        }
        fn total_prestige_points(&self) -> f64 {
            0.0
        }
    }

    fn ctx() -> Ctx {
        let mut c = Ctx {
            hour: 12,
            max: 10,
            ..Ctx::default()
        };
        c.resources.insert("energy".into(), (777.5, 2_000.0));
        c
    }

    #[test]
    fn conditions_report_progress() {
        let c = ctx();
        let p = evaluate(
            &AchievementCondition::ResourceEarned {
                resource: "energy".into(),
                amount: 1_000.0,
            },
            &c,
        )
        .unwrap();
        assert!(p.met);
        let p = evaluate(&AchievementCondition::TotalClicks { count: 1_000 }, &c).unwrap();
        assert!(!p.met);
        assert_eq!(p.fraction(), 0.0);
        let p = evaluate(&AchievementCondition::ResearchTierComplete { tier: 1 }, &c).unwrap();
        assert_eq!(p.fraction(), 0.25);
        let lucky = AchievementCondition::ResourceAmountWithin {
            resource: "energy".into(),
            min: 777.0,
            max: 778.0,
        };
        assert!(evaluate(&lucky, &c).unwrap().met);
        let night = AchievementCondition::LocalHourWithin { start: 2, end: 4 };
        assert!(!evaluate(&night, &c).unwrap().met);
    }

    #[test]
    fn faulty_conditions_are_errors() {
        let c = ctx();
        assert_eq!(
            evaluate(
                &AchievementCondition::ResourceAmount {
                    resource: "antimatter".into(),
                    amount: 1.0
                },
                &c
            ),
            Err(ConditionError::UnknownResource("antimatter".into()))
        );
        assert_eq!(
            evaluate(&AchievementCondition::ResearchTierComplete { tier: 9 }, &c),
            Err(ConditionError::EmptyTier(9))
        );
        assert!(evaluate(&AchievementCondition::LocalHourWithin { start: 5, end: 2 }, &c).is_err());
    }

    fn def(id: &str, condition: AchievementCondition) -> AchievementDef {
        AchievementDef {
            id: id.into(),
            name: id.to_string(),
            icon: String::new(),
            description: String::new(),
            category: AchievementCategory::Special,
            hidden: false,
            condition,
            reward: None,
        }
    }

    #[test]
    fn sweep_skips_faults_and_unlocks_once() {
        let tables = Arc::new(ContentTables::standard().with_achievements(vec![
            def(
                "broken",
                AchievementCondition::ResourceEarned {
                    resource: "antimatter".into(),
                    amount: 1.0,
                },
            ),
            def(
                "earner",
                AchievementCondition::ResourceEarned {
                    resource: "energy".into(),
                    amount: 100.0,
                },
            ),
        ]));
        let mut book = AchievementBook::new(tables.clone());
        let c = ctx();
        assert_eq!(book.check_all(&c, 5), vec![AchievementId::from("earner")]);
        assert!(book.check_all(&c, 6).is_empty());
        let saved = book.to_saved();
        assert_eq!(saved[1].unlocked_at, Some(5));
        assert_eq!(saved[1].progress, 100.0);
        assert!(!saved[0].unlocked);

        let restored = AchievementBook::from_saved(tables, &saved);
        assert!(restored.is_unlocked("earner"));
        assert_eq!(restored.unlocked_count(), 1);
    }
}
