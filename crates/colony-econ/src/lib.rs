#![deny(warnings)]

//! Economic models for Space Colonies.
//!
//! This crate provides:
//! - Prestige-point math and the prestige-upgrade cost curve
//! - Aggregation of prestige-upgrade levels into [`PrestigeBonuses`]
//! - The staged production multiplier pipeline (efficiency, then research,
//!   then prestige)
//! - Click-yield composition

pub mod prestige;
pub mod production;

pub use prestige::{
    aggregate_bonuses, calculate_prestige_points, prestige_upgrade_cost, PrestigeBonuses,
    PRESTIGE_ENERGY_DIVISOR,
};
pub use production::{
    click_value, click_yield, efficiency_multiplier, prestige_multiplier, research_multiplier,
    ProductionContext, Stage, PIPELINE,
};
