use std::time::Duration;

use axum::{response::Json, routing::get, Router};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use charterdeck_web::cache::{self, AppCache};
use charterdeck_web::config::Config;
use charterdeck_web::{commissions, extras, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("charterdeck_web=debug,tower_http=info")),
        )
        .init();

    let config = Config::load()?;

    let db = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.request_timeout_secs))
        .connect(&config.database_url)
        .await?;
    info!("Connected to database");

    let app_cache = AppCache::new();
    tokio::spawn(cache::start_cache_warmer(app_cache.clone(), db.clone()));

    let state = AppState {
        db,
        cache: app_cache,
    };

    let api = Router::new()
        .merge(extras::router())
        .merge(commissions::router())
        .route("/health", get(health))
        .route("/cache/stats", get(cache_stats));

    let app = Router::new()
        .nest("/api", api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.request_timeout_secs,
                ))),
        )
        .with_state(state);

    info!("Listening on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health() -> &'static str {
    "ok"
}

async fn cache_stats(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Json<charterdeck_web::cache::CacheStats> {
    Json(state.cache.stats())
}
