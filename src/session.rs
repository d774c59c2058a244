//! Frame scheduling for a single match
//!
//! The simulation never sleeps. `run_realtime` paces ticks on a tokio interval;
//! `run_headless` ticks as fast as possible against a hand-driven clock.

use std::future::Future;
use std::time::Duration;

use tokio::time::{interval, MissedTickBehavior};
use tracing::info;

use crate::config::SimConfig;
use crate::game::clock::ManualClock;
use crate::game::game_loop::GameLoop;
use crate::game::match_result::MatchResult;
use crate::game::request::{MatchError, MatchRequest};

/// Tick cap used when nothing else is configured (ten simulated minutes)
pub const DEFAULT_MAX_TICKS: u64 = 60 * 60 * 10;

fn reached_limit(game: &GameLoop, max_ticks: u64) -> bool {
    max_ticks > 0 && game.state().tick >= max_ticks
}

/// Drive `game` at its configured tick rate until it ends, hits `max_ticks`
/// (0 = no limit) or `shutdown` resolves.
pub async fn run_realtime<F>(mut game: GameLoop, max_ticks: u64, shutdown: F) -> MatchResult
where
    F: Future<Output = ()>,
{
    let mut ticker = interval(Duration::from_millis(game.config().tick_duration_ms()));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                game.tick();
                if !game.is_running() || reached_limit(&game, max_ticks) {
                    break;
                }
            }
            _ = &mut shutdown => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    game.stop()
}

/// Run one match flat out. Wall-clock time advances one tick duration per tick,
/// so orb spawning matches a realtime run with the same seed.
pub fn run_headless(
    request: &MatchRequest,
    config: SimConfig,
    max_ticks: u64,
) -> Result<MatchResult, MatchError> {
    let step_ms = config.tick_duration_ms();
    let clock = ManualClock::new(0);
    let mut game = GameLoop::start(request, config, clock.clone())?;

    while game.is_running() && !reached_limit(&game, max_ticks) {
        clock.advance(step_ms);
        game.tick();
    }

    Ok(game.stop())
}
