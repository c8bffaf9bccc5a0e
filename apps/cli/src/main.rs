#![deny(warnings)]

//! Headless driver: loads or starts a colony, runs ticks and prints a summary.

mod autoplay;
mod run_config;

use anyhow::{Context, Result};
use colony_engine::{Game, GameEvent, TickScheduler};
use persistence::{FileStore, StateStore};
use run_config::RunConfig;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    save: Option<PathBuf>,
    ticks: Option<u64>,
    import: Option<String>,
    export: bool,
    realtime: bool,
    reset: bool,
    version: bool,
}

fn parse_args() -> Args {
    let mut args = Args::default();
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--config" => args.config = it.next().map(PathBuf::from),
            "--save" => args.save = it.next().map(PathBuf::from),
            "--ticks" => args.ticks = it.next().and_then(|s| s.parse().ok()),
            "--import" => args.import = it.next(),
            "--export" => args.export = true,
            "--realtime" => args.realtime = true,
            "--reset" => args.reset = true,
            "--version" => args.version = true,
            _ => {}
        }
    }
    args
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::AchievementUnlocked { id, name } => info!(%id, name = %name, "achievement"),
        GameEvent::MilestoneReached {
            resource,
            threshold,
        } => info!(%resource, threshold, "milestone"),
        GameEvent::ResearchCompleted { id } => info!(%id, "research completed"),
        GameEvent::PrestigePerformed { gained, total } => info!(gained, total, "prestige"),
        GameEvent::TickCompleted { .. } => {}
    }
}

/// One simulated second: let the player act, then advance the colony.
fn step(game: &mut Game, cfg: &RunConfig) {
    if cfg.autoplay {
        autoplay::play_turn(game, cfg.clicks_per_tick);
    }
    game.tick();
}

fn autosave(game: &Game, store: &mut FileStore, cfg: &RunConfig, done: u64) -> Result<()> {
    if cfg.autosave_ticks > 0 && done % cfg.autosave_ticks == 0 {
        game.save_to(store).context("autosave")?;
    }
    Ok(())
}

async fn run(
    game: &mut Game,
    store: &mut FileStore,
    cfg: &RunConfig,
    ticks: u64,
    realtime: bool,
) -> Result<()> {
    if !realtime {
        for done in 1..=ticks {
            step(game, cfg);
            autosave(game, store, cfg, done)?;
        }
        return Ok(());
    }

    let mut scheduler = TickScheduler::from_millis(cfg.tick_ms());
    scheduler.start();
    // The scheduler only reports whole ticks, however often it is polled.
    let frame = Duration::from_millis(cfg.render_ms.max(1));
    let mut interval = tokio::time::interval(frame);
    let mut last = tokio::time::Instant::now();
    let mut done = 0;
    while done < ticks {
        interval.tick().await;
        let now = tokio::time::Instant::now();
        let due = scheduler.advance(now - last);
        last = now;
        for _ in 0..due {
            if done == ticks {
                break;
            }
            step(game, cfg);
            done += 1;
            autosave(game, store, cfg, done)?;
        }
    }
    scheduler.stop();
    Ok(())
}

fn print_summary(game: &Game) {
    println!(
        "Colony | buildings: {} | space: {}/{} | clicks: {} | ticks: {}",
        game.total_buildings(),
        game.used_space(),
        game.max_space(),
        game.total_clicks(),
        game.tick_count()
    );
    for r in game.resources().filter(|r| r.unlocked) {
        println!(
            "  {:<12} {:>14.1}  (+{:.2}/s, earned {:.1})",
            r.id.as_str(),
            r.amount,
            r.per_second,
            r.total_earned
        );
    }
    let info = game.prestige_info();
    println!(
        "Prestige | held: {} | next: {} | resets: {} | bonus x{:.2}",
        info.current_points,
        info.points_after_prestige,
        game.prestige_count(),
        game.achievement_prestige_bonus()
    );
    let stats = game.statistics();
    println!(
        "Progress | research: {} | achievements: {}/{} | bought: {} | sold: {}",
        stats.current_research,
        stats.achievements_unlocked,
        stats.achievements_total,
        stats.total_upgrades_bought,
        stats.total_upgrades_sold
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::INFO)
        .init();

    let args = parse_args();
    if args.version {
        println!(
            "colony {} ({} {})",
            env!("CARGO_PKG_VERSION"),
            env!("GIT_SHA"),
            env!("BUILD_DATE")
        );
        return Ok(());
    }

    let cfg = match &args.config {
        Some(path) => RunConfig::load(path).await?,
        None => RunConfig::default(),
    };
    let save_path = args.save.clone().unwrap_or_else(|| cfg.save_path.clone());
    let ticks = args.ticks.unwrap_or(cfg.ticks);
    info!(save = %save_path.display(), ticks, realtime = args.realtime, "starting colony");

    let mut store = FileStore::new(save_path);
    let tables = Arc::new(colony_core::ContentTables::standard());
    let mut game = Game::load_from(tables, cfg.engine.clone(), &store);

    if args.reset {
        game.hard_reset();
        store.clear().context("clearing save")?;
    }
    if let Some(code) = &args.import {
        game.import_state(code).context("importing save string")?;
    }
    game.set_event_handler(log_event);

    run(&mut game, &mut store, &cfg, ticks, args.realtime).await?;
    game.save_to(&mut store).context("saving colony")?;

    print_summary(&game);
    if args.export {
        println!("{}", game.export_state()?);
    }
    Ok(())
}
