//! In-memory caching using moka
//!
//! Provides application-level caching for the extras catalog and
//! collaborator commission rates. Both are small, admin-edited, and
//! read-heavy, so short TTLs keep them fresh without hammering the store.

use moka::future::Cache;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{info, warn};
use uuid::Uuid;

use crate::extras::models::{ExtraTemplate, ProviderType};
use crate::extras::queries;

/// Application cache holding catalog listings and commission rates
#[derive(Clone)]
pub struct AppCache {
    /// Extra catalog (role key -> templates)
    pub catalog: Cache<String, Arc<Vec<ExtraTemplate>>>,
    /// Collaborator commission rates (collaborator id -> configured rate)
    pub commission_rates: Cache<Uuid, Arc<Option<Decimal>>>,
}

impl AppCache {
    /// Create a new cache instance with configured TTLs
    pub fn new() -> Self {
        Self {
            // Catalog: one entry per role plus the unfiltered listing,
            // 5 min TTL
            catalog: Cache::builder()
                .max_capacity(10)
                .time_to_live(Duration::from_secs(5 * 60))
                .build(),

            // Commission rates: 1000 entries, 10 min TTL, 5 min idle
            commission_rates: Cache::builder()
                .max_capacity(1000)
                .time_to_live(Duration::from_secs(10 * 60))
                .time_to_idle(Duration::from_secs(5 * 60))
                .build(),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            catalog_size: self.catalog.entry_count(),
            commission_rates_size: self.commission_rates.entry_count(),
        }
    }

    /// Invalidate all caches
    pub fn invalidate_all(&self) {
        self.catalog.invalidate_all();
        self.commission_rates.invalidate_all();
        info!("All caches invalidated");
    }

    /// Generate cache key for a catalog listing
    pub fn catalog_key(role: Option<&str>) -> String {
        match role {
            Some(role) => format!("catalog:{}", role),
            None => "catalog:all".to_string(),
        }
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub catalog_size: u64,
    pub commission_rates_size: u64,
}

/// Start background cache warmer
///
/// Warms the catalog on startup and refreshes every 5 minutes.
pub async fn start_cache_warmer(cache: AppCache, db: PgPool) {
    warm_cache(&cache, &db).await;

    let mut interval = interval(Duration::from_secs(5 * 60));
    loop {
        interval.tick().await;
        warm_cache(&cache, &db).await;
    }
}

/// Warm the cache with the catalog listings the UI asks for
async fn warm_cache(cache: &AppCache, db: &PgPool) {
    info!("Starting cache warm-up...");

    match queries::list_catalog(db, None).await {
        Ok(extras) => {
            cache
                .catalog
                .insert(AppCache::catalog_key(None), Arc::new(extras))
                .await;
        }
        Err(e) => warn!("Failed to warm catalog cache: {}", e),
    }

    for role in ProviderType::ALL {
        match queries::list_catalog(db, Some(role)).await {
            Ok(extras) => {
                cache
                    .catalog
                    .insert(AppCache::catalog_key(Some(role.as_str())), Arc::new(extras))
                    .await;
            }
            Err(e) => warn!("Failed to warm catalog cache for {}: {}", role, e),
        }
    }

    info!("Cache warm-up complete. Stats: {:?}", cache.stats());
}
