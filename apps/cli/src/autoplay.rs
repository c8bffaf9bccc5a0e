//! A greedy player for unattended runs.

use colony_core::Cost;
use colony_engine::Game;
use tracing::debug;

/// Purchases allowed per turn, so one turn cannot spin forever on cheap items.
const MAX_PURCHASES_PER_TURN: u32 = 25;

/// Sum of all resource amounts in a price; a crude but stable ranking.
fn price(cost: &Cost) -> f64 {
    cost.values().sum()
}

/// Act once: click, research, build, invest prestige points, and prestige
/// when it at least doubles held points. Returns the number of actions taken.
pub fn play_turn(game: &mut Game, clicks: u32) -> u32 {
    let mut actions = 0;
    for _ in 0..clicks {
        if game.handle_click("energy") {
            actions += 1;
        }
    }

    let mut research: Vec<(String, f64)> = game
        .research()
        .into_iter()
        .filter(|r| r.available)
        .map(|r| (r.def.id.to_string(), price(&r.def.cost)))
        .collect();
    research.sort_by(|a, b| a.1.total_cmp(&b.1));
    for (id, _) in research {
        if game.perform_research(&id) {
            debug!(research = %id, "autoplay researched");
            actions += 1;
        }
    }

    for _ in 0..MAX_PURCHASES_PER_TURN {
        let cheapest = game
            .upgrades()
            .into_iter()
            .filter(|u| u.buyable)
            .min_by(|a, b| price(&a.next_cost).total_cmp(&price(&b.next_cost)))
            .map(|u| u.def.id.to_string());
        let Some(id) = cheapest else { break };
        if !game.buy_upgrade(&id) {
            break;
        }
        debug!(upgrade = %id, "autoplay bought");
        actions += 1;
    }

    let info = game.prestige_info();
    if info.gained > 0.0 && info.gained >= info.current_points.max(1.0) && game.perform_prestige() {
        actions += 1;
    }

    loop {
        let cheapest = game
            .prestige_upgrades()
            .into_iter()
            .filter_map(|p| p.next_cost.map(|c| (p.def.id.to_string(), c)))
            .filter(|(_, c)| *c <= game.current_prestige_points())
            .min_by(|a, b| a.1.total_cmp(&b.1));
        let Some((id, _)) = cheapest else { break };
        if !game.buy_prestige_upgrade(&id) {
            break;
        }
        actions += 1;
    }
    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greedy_player_builds_a_colony() {
        let mut game = Game::standard();
        for _ in 0..200 {
            play_turn(&mut game, 2);
            game.tick();
        }
        assert!(game.total_buildings() > 0);
        assert!(game.used_space() <= game.max_space());
        assert_eq!(game.total_clicks(), 400);
    }
}
