//! Backend entry-point: connects the score index, seeds it, starts the live
//! update worker and serves the leaderboard API.

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::domain::LiveUpdateWorker;
use backend::inbound::http::health::HealthState;
use backend::settings::LeaderboardSettings;

mod server;

use server::{
    ServerConfig, build_http_state, build_leaderboard_service, build_score_index, create_server,
};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = LeaderboardSettings::load_from_env().wrap_err("failed to load settings")?;
    settings.validate().wrap_err("invalid settings")?;

    let index = build_score_index(&settings).await?;

    #[cfg(feature = "example-data")]
    seed_example_data(index.as_ref()).await;

    let service = build_leaderboard_service(index.clone(), settings.search()?).await;
    let http_state = build_http_state(service, settings.max_page_limit());

    let live_updates = if settings.live_enabled() {
        let worker = LiveUpdateWorker::new(index, settings.live_updates()?);
        Some(worker.spawn(CancellationToken::new()))
    } else {
        info!("live updates disabled");
        None
    };

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(settings.host(), settings.port());
    let server = create_server(health_state.clone(), http_state, &config)
        .wrap_err_with(|| format!("failed to bind {}", config.bind_addr()))?;

    health_state.mark_ready();
    info!(addr = %config.bind_addr(), "leaderboard listening");
    let served = server.await;

    health_state.mark_draining();
    if let Some(handle) = live_updates {
        handle.shutdown().await;
    }
    served.wrap_err("http server failed")
}

/// Seed the index from the generated population. Failures are logged and
/// the server starts with whatever the index already holds.
#[cfg(feature = "example-data")]
async fn seed_example_data(index: &dyn backend::domain::ports::ScoreIndex) {
    use backend::example_data::{SeedSettings, seed_leaderboard_on_startup};

    let settings = match SeedSettings::load_from_env() {
        Ok(settings) => settings,
        Err(error) => {
            warn!(%error, "seed settings invalid; skipping seeding");
            return;
        }
    };
    if let Err(error) = seed_leaderboard_on_startup(&settings, index).await {
        warn!(%error, "leaderboard seeding failed");
    }
}
