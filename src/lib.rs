//! CharterDeck extras & commissions service.
//!
//! A Rust/Axum HTTP/JSON service owning the provider-extras configuration
//! model (catalog templates, per-provider bindings, effective-price
//! resolution) and the collaborator commission calculation for the
//! CharterDeck charter marketplace. Talks directly to the marketplace's
//! Postgres database.

pub mod cache;
pub mod commissions;
pub mod config;
pub mod error;
pub mod extras;

use sqlx::PgPool;

use cache::AppCache;

/// Shared application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub cache: AppCache,
}
