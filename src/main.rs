use std::str::FromStr;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use fightpit::batch::run_batch;
use fightpit::config::SimConfig;
use fightpit::game::clock::SystemClock;
use fightpit::game::game_loop::GameLoop;
use fightpit::game::mode::Mode;
use fightpit::game::request::MatchRequest;
use fightpit::session::{self, DEFAULT_MAX_TICKS};

const DEFAULT_NAMES: &str = "Red, Blue, Green, Gold, Violet, Teal";

/// Read an env var, warning and falling back when it does not parse
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Invalid {} '{}', using default", key, raw);
            default
        }),
        Err(_) => default,
    }
}

fn request_from_env() -> anyhow::Result<MatchRequest> {
    let names = std::env::var("MATCH_NAMES").unwrap_or_else(|_| DEFAULT_NAMES.to_string());
    let mode = match std::env::var("MATCH_MODE") {
        Ok(raw) => Mode::from_str(&raw)?,
        Err(_) => Mode::FreeForAll,
    };

    let mut request = MatchRequest::new(MatchRequest::parse_names(&names), mode);
    request.team_count = env_or("TEAM_COUNT", 2);
    request.seed = env_or("MATCH_SEED", rand::random());
    request.validate()?;
    Ok(request)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    info!("Fightpit v{}", env!("CARGO_PKG_VERSION"));

    let config = SimConfig::load_or_default();
    config.validate().map_err(anyhow::Error::msg)?;
    info!(
        "Configuration loaded: arena={}, tick_rate={}, round={}s",
        config.arena_radius, config.tick_rate, config.round_seconds
    );

    let request = request_from_env()?;
    let batch_matches: usize = env_or("BATCH_MATCHES", 1);
    let realtime: bool = env_or("REALTIME", true);
    let limit = if config.max_ticks > 0 {
        config.max_ticks
    } else {
        DEFAULT_MAX_TICKS
    };

    if batch_matches > 1 {
        let batch_config = config.clone();
        let report = tokio::task::spawn_blocking(move || {
            run_batch(&request, &batch_config, batch_matches, limit)
        })
        .await??;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let result = if realtime {
        let game = GameLoop::start(&request, config.clone(), SystemClock::new())?;

        // Shutdown signal handler
        let shutdown = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        };

        session::run_realtime(game, config.max_ticks, shutdown).await
    } else {
        session::run_headless(&request, config.clone(), limit)?
    };

    info!("{} after {} ticks", result.banner, result.ticks);
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
