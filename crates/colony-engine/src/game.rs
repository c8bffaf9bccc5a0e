//! The simulation engine.

use crate::achievements::AchievementBook;
use crate::config::EngineConfig;
use crate::events::{EventHandler, GameEvent};
use crate::state::{Clock, Colony};
use colony_core::ids::ENERGY;
use colony_core::{
    calculate_cost, check_unlock, demolish_refund, validate_tables, AchievementId,
    AchievementReward, ContentTables, Cost, ResearchEffect, ResourceId, UpgradeEffect, UpgradeId,
};
use colony_econ::{click_value, click_yield, ProductionContext};
use persistence::{PersistenceError, PersistedState, StateStore};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One colony: shared templates plus all mutable progress. Every mutator runs
/// to completion before returning; ordinary rejections return `false` and
/// leave the state untouched.
pub struct Game {
    pub(crate) colony: Colony,
    pub(crate) achievements: AchievementBook,
    handler: Option<EventHandler>,
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("colony", &self.colony)
            .field("achievements", &self.achievements)
            .finish_non_exhaustive()
    }
}

impl Game {
    /// A fresh game over `tables`. Tables that fail validation are still
    /// used; offending entries are skipped where they are read.
    pub fn new(tables: Arc<ContentTables>, config: EngineConfig) -> Self {
        if let Err(e) = validate_tables(&tables) {
            warn!(error = %e, "content tables failed validation");
        }
        let colony = Colony::fresh(Arc::clone(&tables), config, chrono::Local::now);
        let mut game = Self {
            colony,
            achievements: AchievementBook::new(tables),
            handler: None,
        };
        game.recalculate_production();
        game
    }

    /// A fresh game with the built-in content and default tunables.
    pub fn standard() -> Self {
        Self::new(Arc::new(ContentTables::standard()), EngineConfig::default())
    }

    /// Rebuild a game from a saved record.
    pub fn from_persisted(
        tables: Arc<ContentTables>,
        config: EngineConfig,
        state: &PersistedState,
    ) -> Self {
        let mut game = Self::new(tables, config);
        game.load_persisted(state);
        game
    }

    /// Load from `store`, starting fresh when the save is absent or corrupt.
    pub fn load_from<S: StateStore + ?Sized>(
        tables: Arc<ContentTables>,
        config: EngineConfig,
        store: &S,
    ) -> Self {
        let state = persistence::load_or_default(store);
        Self::from_persisted(tables, config, &state)
    }

    /// Replace the wall clock used for timestamps and local-hour conditions.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.colony.clock = clock;
        self.colony.start_time = self.now_ms();
        self
    }

    /// Register the event handler, replacing any previous one.
    pub fn set_event_handler<F>(&mut self, handler: F)
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.handler = Some(Box::new(handler));
    }

    pub fn clear_event_handler(&mut self) {
        self.handler = None;
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        if let Some(handler) = self.handler.as_mut() {
            handler(&event);
        }
    }

    pub(crate) fn now_ms(&self) -> i64 {
        self.colony.now().timestamp_millis()
    }

    // ---- resources ----

    /// Manually collect a resource. A click value of 0 collects 1.
    pub fn handle_click(&mut self, id: &str) -> bool {
        let Some(resource) = self.colony.resources.get(id) else {
            return false;
        };
        if !resource.unlocked {
            return false;
        }
        let base = if resource.click_value > 0.0 {
            resource.click_value
        } else {
            1.0
        };
        let amount = click_yield(base, &self.colony.bonuses);
        let key = resource.id.clone();
        self.colony.credit(&key, amount);
        self.colony.total_clicks += 1;
        self.check_milestones();
        self.check_achievements();
        true
    }

    /// Every listed resource exists and holds at least the listed amount.
    pub fn can_afford(&self, costs: &Cost) -> bool {
        self.colony.can_afford(costs)
    }

    /// Deduct `costs` from stock (not from earnings), all or nothing.
    pub fn spend_resources(&mut self, costs: &Cost) -> bool {
        self.colony.spend(costs)
    }

    /// Credit a resource as earned. Rejects unknown ids and negative or
    /// non-finite amounts.
    pub fn add_resource(&mut self, id: &str, amount: f64) -> bool {
        if !(amount.is_finite() && amount >= 0.0) {
            return false;
        }
        self.colony.credit(&ResourceId::from(id), amount)
    }

    // ---- buildings and upgrades ----

    /// Price of the next unit if it can be bought right now.
    fn purchase_cost(&self, id: &str) -> Option<Cost> {
        let def = self.colony.tables.upgrade(id)?;
        if !self.colony.upgrade_unlocked(id) {
            return None;
        }
        let count = self.colony.count(id);
        if def.at_cap(count) {
            return None;
        }
        if def.size > 0
            && self.colony.compute_used_space().saturating_add(def.size) > self.colony.max_space
        {
            return None;
        }
        let cost = calculate_cost(def, count);
        self.colony.can_afford(&cost).then_some(cost)
    }

    /// Whether [`Game::buy_upgrade`] would succeed.
    pub fn can_buy_upgrade(&self, id: &str) -> bool {
        self.purchase_cost(id).is_some()
    }

    /// Buy one unit. Rejected when unknown, locked, at cap, out of build
    /// space or unaffordable.
    pub fn buy_upgrade(&mut self, id: &str) -> bool {
        let Some(cost) = self.purchase_cost(id) else {
            debug!(upgrade = id, "purchase rejected");
            return false;
        };
        if !self.colony.spend(&cost) {
            return false;
        }
        let count = self.colony.counts.entry(UpgradeId::from(id)).or_insert(0);
        *count += 1;
        debug!(upgrade = id, count = *count, "bought upgrade");
        self.colony.statistics.total_upgrades_bought += 1;
        self.recalculate_production();
        self.check_unlocks();
        self.check_achievements();
        true
    }

    /// Buy until rejected or `limit` units were bought (the configured
    /// `buy_max_limit` when `None`). Returns the number bought.
    pub fn buy_max(&mut self, id: &str, limit: Option<u32>) -> u32 {
        let limit = limit.unwrap_or(self.colony.config.buy_max_limit);
        let mut bought = 0;
        while bought < limit && self.buy_upgrade(id) {
            bought += 1;
        }
        bought
    }

    /// Sell the most recent unit for half its price. A space upgrade is kept
    /// when removing its slots would leave less space than is in use.
    pub fn demolish_upgrade(&mut self, id: &str) -> bool {
        let tables = Arc::clone(&self.colony.tables);
        let Some(def) = tables.upgrade(id) else {
            return false;
        };
        let count = self.colony.count(id);
        if count == 0 {
            return false;
        }
        if let UpgradeEffect::Space { increase } = def.effect {
            if self.colony.compute_used_space() > self.colony.max_space.saturating_sub(increase) {
                debug!(upgrade = id, "demolish would overfill build space");
                return false;
            }
        }
        let refund = demolish_refund(def, count);
        if count == 1 {
            self.colony.counts.remove(id);
        } else {
            self.colony.counts.insert(def.id.clone(), count - 1);
        }
        for (resource, amount) in &refund {
            if *amount > 0.0 {
                self.colony.credit(resource, *amount);
            }
        }
        self.colony.statistics.total_upgrades_sold += 1;
        debug!(upgrade = id, count = count - 1, "demolished upgrade");
        self.recalculate_production();
        self.check_unlocks();
        true
    }

    // ---- research ----

    /// Whether [`Game::perform_research`] would succeed.
    pub fn can_research(&self, id: &str) -> bool {
        self.colony.tables.research_project(id).is_some_and(|def| {
            self.colony.research_unlocked(id)
                && !self.colony.completed_research.contains(id)
                && self.colony.can_afford(&def.cost)
        })
    }

    /// Complete a research project. Rejected when unknown, locked, already
    /// completed or unaffordable.
    pub fn perform_research(&mut self, id: &str) -> bool {
        if !self.can_research(id) {
            debug!(research = id, "research rejected");
            return false;
        }
        let tables = Arc::clone(&self.colony.tables);
        let Some(def) = tables.research_project(id) else {
            return false;
        };
        if !self.colony.spend(&def.cost) {
            return false;
        }
        self.colony.completed_research.insert(def.id.clone());
        self.colony.statistics.total_research_completed += 1;
        info!(research = id, "research completed");
        self.recalculate_production();
        self.check_unlocks();
        self.emit(GameEvent::ResearchCompleted { id: def.id.clone() });
        self.check_achievements();
        true
    }

    // ---- derived state ----

    /// Recompute production rates, click values and build space from owned
    /// upgrades, completed research and prestige bonuses.
    pub fn recalculate_production(&mut self) {
        let tables = Arc::clone(&self.colony.tables);
        let colony = &mut self.colony;

        for r in colony.resources.values_mut() {
            r.per_second = 0.0;
            r.click_value = r.base_click_value;
        }

        let research: Vec<&ResearchEffect> = tables
            .research()
            .iter()
            .filter(|d| colony.completed_research.contains(&d.id))
            .map(|d| &d.effect)
            .collect();

        let mut flat_click = 0.0;
        let mut efficiency = Vec::new();
        let mut extra_space = 0u32;
        for def in tables.upgrades() {
            if colony.count(def.id.as_str()) == 0 {
                continue;
            }
            match &def.effect {
                UpgradeEffect::Click { bonus } => flat_click += bonus,
                UpgradeEffect::Efficiency { target, multiplier } => {
                    efficiency.push((target, *multiplier))
                }
                UpgradeEffect::Space { increase } => {
                    extra_space = extra_space.saturating_add(*increase)
                }
                UpgradeEffect::Generator | UpgradeEffect::Unlock => {}
            }
        }

        if let Some(energy) = colony.resources.get_mut(ENERGY) {
            energy.click_value = click_value(
                energy.base_click_value,
                flat_click,
                research.iter().copied(),
            );
        }

        let bonuses = colony.bonuses.clone();
        let ctx = ProductionContext {
            efficiency,
            research,
            bonuses: &bonuses,
        };
        let mut rates: Vec<(&ResourceId, f64)> = Vec::new();
        for def in tables.upgrades() {
            let count = colony.count(def.id.as_str());
            if count == 0 {
                continue;
            }
            for (resource, base) in &def.produces {
                rates.push((resource, ctx.rate(*base, count, &def.id, resource)));
            }
        }
        for (resource, rate) in rates {
            if let Some(r) = colony.resources.get_mut(resource) {
                r.per_second += rate;
            }
        }

        colony.used_space = colony.compute_used_space();
        colony.max_space = colony
            .config
            .base_space
            .saturating_add(extra_space)
            .saturating_add(colony.bonuses.permanent_space);

        for r in colony.resources.values() {
            if r.per_second > 0.0 {
                let peak = colony
                    .statistics
                    .peak_production
                    .entry(r.id.clone())
                    .or_insert(0.0);
                if r.per_second > *peak {
                    *peak = r.per_second;
                }
            }
        }
    }

    /// One simulation step: credit one second of production to every unlocked
    /// resource, then unlock checks, milestones and achievements, in that order.
    pub fn tick(&mut self) {
        let gains: Vec<(ResourceId, f64)> = self
            .colony
            .resources
            .values()
            .filter(|r| r.unlocked && r.per_second > 0.0)
            .map(|r| (r.id.clone(), r.per_second))
            .collect();
        for (id, amount) in &gains {
            self.colony.credit(id, *amount);
        }
        self.colony.ticks += 1;
        self.check_unlocks();
        self.check_milestones();
        self.check_achievements();
        let tick = self.colony.ticks;
        self.emit(GameEvent::TickCompleted { tick });
    }

    /// Unlock every locked resource, upgrade and research project whose
    /// threshold now holds. Returns how many were unlocked; a second call
    /// without intervening changes returns 0.
    pub fn check_unlocks(&mut self) -> usize {
        let tables = Arc::clone(&self.colony.tables);
        let colony = &self.colony;

        let resources: Vec<ResourceId> = tables
            .resources()
            .iter()
            .filter(|d| !colony.resources.get(&d.id).map_or(true, |r| r.unlocked))
            .filter(|d| d.unlock.as_ref().is_some_and(|req| check_unlock(req, colony)))
            .map(|d| d.id.clone())
            .collect();
        let upgrades: Vec<UpgradeId> = tables
            .upgrades()
            .iter()
            .filter(|d| !colony.upgrade_unlocked(d.id.as_str()))
            .filter(|d| d.requires.as_ref().is_some_and(|req| check_unlock(req, colony)))
            .map(|d| d.id.clone())
            .collect();
        let research: Vec<_> = tables
            .research()
            .iter()
            .filter(|d| !colony.research_unlocked(d.id.as_str()))
            .filter(|d| d.requires.as_ref().is_some_and(|req| check_unlock(req, colony)))
            .map(|d| d.id.clone())
            .collect();

        let unlocked = resources.len() + upgrades.len() + research.len();
        for id in resources {
            if let Some(r) = self.colony.resources.get_mut(&id) {
                r.unlocked = true;
            }
            debug!(resource = %id, "resource unlocked");
        }
        for id in upgrades {
            debug!(upgrade = %id, "upgrade unlocked");
            self.colony.unlocked_upgrades.insert(id);
        }
        for id in research {
            debug!(research = %id, "research unlocked");
            self.colony.unlocked_research.insert(id);
        }
        unlocked
    }

    /// Record milestones crossed for the first time this cycle.
    pub(crate) fn check_milestones(&mut self) {
        let mut crossed = Vec::new();
        for r in self.colony.resources.values() {
            for &threshold in &self.colony.config.milestone_thresholds {
                if r.total_earned < threshold {
                    continue;
                }
                let key = format!("{}_{}", r.id, threshold);
                if !self.colony.reached_milestones.contains(&key) {
                    crossed.push((key, r.id.clone(), threshold));
                }
            }
        }
        for (key, resource, threshold) in crossed {
            debug!(milestone = %key, "milestone reached");
            self.colony.reached_milestones.insert(key);
            self.emit(GameEvent::MilestoneReached {
                resource,
                threshold,
            });
        }
    }

    /// Evaluate locked achievements and apply rewards of the newly unlocked
    /// ones, each exactly once.
    pub fn check_achievements(&mut self) -> Vec<AchievementId> {
        let now = self.now_ms();
        let unlocked = self.achievements.check_all(&self.colony, now);
        let tables = Arc::clone(&self.colony.tables);
        for id in &unlocked {
            let Some(def) = tables.achievement(id.as_str()) else {
                continue;
            };
            match &def.reward {
                None => {}
                Some(AchievementReward::PrestigeBonus { amount }) => {
                    self.colony.achievement_prestige_bonus += amount;
                }
                Some(AchievementReward::ResourceGrant { resource, amount }) => {
                    if !self.colony.credit(resource, *amount) {
                        warn!(achievement = %id, resource = %resource, "reward names unknown resource");
                    }
                }
            }
            info!(achievement = %id, "achievement unlocked");
            self.emit(GameEvent::AchievementUnlocked {
                id: id.clone(),
                name: def.name.clone(),
            });
        }
        unlocked
    }

    // ---- persistence ----

    /// Snapshot of all progress.
    pub fn to_persisted(&self) -> PersistedState {
        let c = &self.colony;
        PersistedState {
            version: persistence::SAVE_VERSION,
            resources: c
                .resources
                .iter()
                .map(|(id, r)| {
                    (
                        id.clone(),
                        persistence::ResourceState {
                            amount: r.amount,
                            total_earned: r.total_earned,
                            unlocked: r.unlocked,
                        },
                    )
                })
                .collect(),
            upgrades: c.counts.clone(),
            completed_research: c.completed_research.clone(),
            unlocked_upgrades: c.unlocked_upgrades.clone(),
            unlocked_research: c.unlocked_research.clone(),
            prestige_upgrades: c
                .tables
                .prestige_upgrades()
                .iter()
                .map(|d| persistence::PrestigeLevel {
                    id: d.id.clone(),
                    level: c.prestige_levels.get(&d.id).copied().unwrap_or(0),
                })
                .collect(),
            achievements: self.achievements.to_saved(),
            max_space: c.max_space,
            total_clicks: c.total_clicks,
            prestige_count: c.prestige_count,
            total_prestige_points: c.total_prestige_points,
            achievement_prestige_bonus: c.achievement_prestige_bonus,
            start_time: c.start_time,
            last_online: self.now_ms(),
            reached_milestones: c.reached_milestones.clone(),
            statistics: c.statistics.clone(),
        }
    }

    /// Replace all progress with `state`. Unknown ids are dropped; resources
    /// and unlocks never end up more locked than their templates.
    pub fn load_persisted(&mut self, state: &PersistedState) {
        let tables = Arc::clone(&self.colony.tables);
        let mut colony = Colony::fresh(
            Arc::clone(&tables),
            self.colony.config.clone(),
            self.colony.clock,
        );
        colony.ticks = self.colony.ticks;

        for (id, saved) in &state.resources {
            match colony.resources.get_mut(id) {
                Some(r) => {
                    r.amount = saved.amount;
                    r.total_earned = saved.total_earned;
                    r.unlocked |= saved.unlocked;
                }
                None => debug!(resource = %id, "dropping unknown saved resource"),
            }
        }
        for (id, &count) in &state.upgrades {
            match tables.upgrade(id.as_str()) {
                Some(def) if count > 0 => {
                    let count = def.max_count.map_or(count, |max| count.min(max));
                    colony.counts.insert(def.id.clone(), count);
                }
                Some(_) => {}
                None => warn!(upgrade = %id, "dropping unknown saved upgrade"),
            }
        }
        colony.completed_research = state
            .completed_research
            .iter()
            .filter(|id| tables.research_project(id.as_str()).is_some())
            .cloned()
            .collect();
        colony.unlocked_upgrades = state
            .unlocked_upgrades
            .iter()
            .filter(|id| tables.upgrade(id.as_str()).is_some())
            .cloned()
            .collect();
        colony.unlocked_research = state
            .unlocked_research
            .iter()
            .filter(|id| tables.research_project(id.as_str()).is_some())
            .cloned()
            .collect();
        for saved in &state.prestige_upgrades {
            match tables.prestige_upgrade(saved.id.as_str()) {
                Some(def) => {
                    let level = def.max_level.map_or(saved.level, |max| saved.level.min(max));
                    colony.prestige_levels.insert(def.id.clone(), level);
                }
                None => warn!(upgrade = %saved.id, "dropping unknown prestige upgrade"),
            }
        }
        colony.bonuses =
            colony_econ::aggregate_bonuses(tables.prestige_upgrades(), &colony.prestige_levels);

        colony.total_clicks = state.total_clicks;
        colony.prestige_count = state.prestige_count;
        colony.total_prestige_points = state.total_prestige_points;
        colony.achievement_prestige_bonus =
            if state.achievement_prestige_bonus.is_finite() && state.achievement_prestige_bonus > 0.0 {
                state.achievement_prestige_bonus
            } else {
                1.0
            };
        colony.start_time = state.start_time;
        colony.reached_milestones = state.reached_milestones.clone();
        colony.statistics = state.statistics.clone();

        self.colony = colony;
        self.achievements = AchievementBook::from_saved(tables, &state.achievements);
        self.recalculate_production();
        self.check_unlocks();
        info!(
            prestige_count = state.prestige_count,
            buildings = self.colony.generator_units(),
            "game state loaded"
        );
    }

    /// Write a snapshot to `store`.
    pub fn save_to<S: StateStore + ?Sized>(&self, store: &mut S) -> Result<(), PersistenceError> {
        store.save(&self.to_persisted())
    }

    /// Opaque export string of all progress.
    pub fn export_state(&self) -> Result<String, PersistenceError> {
        persistence::export_state(&self.to_persisted())
    }

    /// Replace all progress with an export string. Malformed input leaves the
    /// game untouched.
    pub fn import_state(&mut self, encoded: &str) -> Result<(), PersistenceError> {
        let state = persistence::import_state(encoded)?;
        self.load_persisted(&state);
        Ok(())
    }

    /// Throw away everything, prestige progress included.
    pub fn hard_reset(&mut self) {
        let ticks = self.colony.ticks;
        let tables = Arc::clone(&self.colony.tables);
        self.colony = Colony::fresh(
            Arc::clone(&tables),
            self.colony.config.clone(),
            self.colony.clock,
        );
        self.colony.ticks = ticks;
        self.achievements = AchievementBook::new(tables);
        self.recalculate_production();
        info!("hard reset");
    }
}
