#![deny(warnings)]

//! Simulation engine for Space Colonies.
//!
//! A [`Game`] owns one colony: resources, owned buildings and upgrades,
//! research, prestige levels and achievements. All mutation goes through its
//! operations, each of which runs to completion before returning. Time is
//! driven from outside by calling [`Game::tick`], usually paced by a
//! [`TickScheduler`].

pub mod achievements;
pub mod config;
pub mod events;
pub mod game;
pub mod prestige;
pub mod scheduler;
pub mod state;
pub mod stats;
pub mod views;

pub use achievements::{evaluate, AchievementBook, AchievementContext, ConditionError, Progress};
pub use config::EngineConfig;
pub use events::{EventHandler, GameEvent};
pub use game::Game;
pub use prestige::PrestigeInfo;
pub use scheduler::TickScheduler;
pub use state::{Clock, ResourceInstance};
pub use stats::StatisticsReport;
pub use views::{PrestigeUpgradeView, ResearchView, UpgradeView};
