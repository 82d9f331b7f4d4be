mod api;
mod middleware;
mod scheduler;
mod search;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use ytopic_db::{KeywordStore, PgStore, TopicStore};
use ytopic_youtube::YoutubeClient;

use crate::{
    api::{build_app, AppState},
    middleware::{CronAuth, RateLimitState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = ytopic_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = ytopic_db::PoolConfig::from_app_config(&config);
    let pool = ytopic_db::connect_pool(&config.database_url, pool_config).await?;
    let applied = ytopic_db::run_migrations(&pool).await?;
    tracing::info!(applied, "migrations up to date");

    let store = Arc::new(PgStore::new(pool));
    let keywords: Arc<dyn KeywordStore> = Arc::<PgStore>::clone(&store);
    let topics: Arc<dyn TopicStore> = store;

    let youtube = match config.youtube_api_key.as_deref() {
        Some(key) => Some(YoutubeClient::with_base_url(
            key,
            config.youtube_timeout_secs,
            &config.youtube_base_url,
        )?),
        None => {
            tracing::warn!("YOUTUBE_API_KEY not set; uncached keyword searches will fail");
            None
        }
    };

    let _scheduler = scheduler::build_scheduler(Arc::clone(&topics), &config).await?;

    let cron_auth = CronAuth::from_config(config.cron_secret.as_deref(), config.is_development())?;
    let app = build_app(
        AppState {
            keywords,
            topics,
            youtube,
        },
        cron_auth,
        RateLimitState::per_minute(config.rate_limit_per_minute),
    );

    tracing::info!(bind_addr = %config.bind_addr, env = %config.env, "ytopic-server listening");
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
