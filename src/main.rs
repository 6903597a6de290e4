//! LRU TTL Cache demo
//!
//! Fills a small cache past its capacity with composite keys and reports
//! what survived.

use std::time::Duration;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lru_ttl_cache::{Cache, CacheConfig, Equally, Expiry};

/// Composite key without a `Hash` impl, served by the scanning index.
#[derive(Debug, Clone, Copy)]
struct ProfileKey {
    profile_id: u64,
    site_id: u64,
}

impl Equally for ProfileKey {
    fn equally(&self, other: &Self) -> bool {
        self.profile_id == other.profile_id && self.site_id == other.site_id
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lru_ttl_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CacheConfig {
        capacity: 15,
        ..CacheConfig::from_env()
    };
    info!(
        "Configuration loaded: capacity={}, default_ttl={}ms, cleanup_interval={}ms",
        config.capacity, config.default_ttl_ms, config.cleanup_interval_ms
    );

    let mut cache: lru_ttl_cache::ScanLruCache<ProfileKey, Vec<&'static str>> =
        Cache::from_config(&config).context("failed to create cache")?;

    let keys: Vec<ProfileKey> = (0..20)
        .map(|i| ProfileKey {
            profile_id: i,
            site_id: i,
        })
        .collect();

    for key in &keys {
        cache
            .add(*key, vec!["Val", "NextVal"], Expiry::Default)
            .with_context(|| format!("failed to add {key:?}"))?;
    }

    let evicted = cache.get(&keys[1]);
    let kept = cache.get(&keys[18]);
    info!(
        "after 20 inserts: len={}, key 1 present={}, key 18 present={}",
        cache.len(),
        evicted.is_some(),
        kept.is_some()
    );

    cache.add(keys[0], vec!["short"], Expiry::After(Duration::from_millis(50)))?;
    tokio::time::sleep(Duration::from_millis(100)).await;
    info!("reclaimed {} expired entries", cache.clear_expired_data());

    let stats = serde_json::to_string(&cache.stats()).context("failed to encode stats")?;
    info!("stats: {}", stats);

    cache.shutdown().await;
    Ok(())
}
