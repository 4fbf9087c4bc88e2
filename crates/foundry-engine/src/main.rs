//! Engine binary for the Orbital Artisan Foundry.
//!
//! This is the main entry point that wires together the day-tick loop,
//! the station state machine, the quest generator, and the observer API.
//! It loads configuration, initializes all subsystems, and runs the game
//! loop until a termination condition is met.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `foundry-config.yaml`
//! 3. Create the station from the starting resources
//! 4. Build the quest generator from `LLM_*` environment variables
//! 5. Start the Observer API server
//! 6. Fetch the initial offer batch
//! 7. Run the game loop
//! 8. Log the result

mod error;
mod observer_callback;

use std::path::Path;
use std::sync::Arc;

use foundry_core::config::FoundryConfig;
use foundry_core::runner;
use foundry_core::Station;
use foundry_observer::server::ServerConfig;
use foundry_observer::state::AppState;
use foundry_quests::{GeneratorConfig, QuestGenerator};
use tokio::sync::RwLock;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::observer_callback::ObserverCallback;

/// Application entry point for the engine.
///
/// Initializes all subsystems and runs the game loop.
///
/// # Errors
///
/// Returns an error if any initialization step or the game loop itself
/// fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("foundry-engine starting");

    // 2. Load configuration.
    let config = load_config()?;
    info!(
        station_name = config.station.name,
        station_level = config.station.level,
        tick_interval_ms = config.station.tick_interval_ms,
        offer_count = config.offers.count,
        "Configuration loaded"
    );

    // 3. Create the station.
    let station = Arc::new(RwLock::new(Station::new(&config)));
    info!(
        cash = config.resources.cash,
        materials = config.resources.materials,
        power = config.resources.power,
        "Station initialized"
    );

    // 4. Build the quest generator.
    let generator = Arc::new(build_generator());

    // 5. Start the Observer API server.
    let app_state = Arc::new(AppState::new(
        Arc::clone(&station),
        Arc::clone(&generator),
        config.offers.count,
    ));
    let server_config = ServerConfig {
        host: config.observer.host.clone(),
        port: config.observer.port,
    };
    let _observer_handle =
        foundry_observer::spawn_observer(&server_config, Arc::clone(&app_state))
            .await
            .map_err(|e| EngineError::Observer {
                message: format!("{e}"),
            })?;
    info!(port = config.observer.port, "Observer API server started");

    // 6. Fetch the initial offer batch so the board is populated before
    //    the first client connects.
    {
        let level = {
            let mut guard = station.write().await;
            guard.begin_offer_refresh().then(|| guard.level())
        };
        if let Some(level) = level {
            let offers = generator.generate_offers(level, config.offers.count).await;
            info!(count = offers.len(), "initial offer batch generated");
            station.write().await.commit_offers(offers);
        }
    }

    // 7. Run the game loop.
    let mut callback = ObserverCallback::new(app_state);
    info!(
        max_days = ?config.station.max_days,
        "Entering the day-tick loop"
    );
    let result = runner::run_game_loop(
        &station,
        config.station.tick_interval_ms,
        config.station.max_days,
        &mut callback,
    )
    .await
    .map_err(EngineError::from)?;

    // 8. Log results.
    info!(
        end_reason = ?result.end_reason,
        total_days = result.total_days,
        "foundry-engine shutdown complete"
    );

    Ok(())
}

/// Load the configuration from `foundry-config.yaml`.
///
/// Looks for the config file relative to the current working directory.
fn load_config() -> Result<FoundryConfig, EngineError> {
    let config_path = Path::new("foundry-config.yaml");
    if config_path.exists() {
        let config = FoundryConfig::from_file(config_path)?;
        Ok(config)
    } else {
        info!("Config file not found, using defaults");
        Ok(FoundryConfig::default())
    }
}

/// Build the quest generator from the `LLM_*` environment variables.
///
/// A missing `LLM_BACKEND` means offline mode; a backend that is
/// configured but broken (bad variables, unreadable templates) also
/// degrades to offline with a warning rather than refusing to start.
fn build_generator() -> QuestGenerator {
    match GeneratorConfig::from_env() {
        Ok(config) => match QuestGenerator::new(&config) {
            Ok(generator) => {
                if generator.is_online() {
                    info!("Quest generator online");
                } else {
                    info!("No LLM backend configured, quest generator offline");
                }
                generator
            }
            Err(e) => {
                warn!(error = %e, "generator init failed, running offline");
                QuestGenerator::offline()
            }
        },
        Err(e) => {
            warn!(error = %e, "generator config invalid, running offline");
            QuestGenerator::offline()
        }
    }
}
