//! Application state: station cache and grid memoization.

use anyhow::Result;
use heatmap_common::Station;
use interpolator::{interpolate, CellSize, Grid, GridKey};
use lru::LruCache;
use metrics::{counter, histogram};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use stations::{ProviderConfig, StationProvider, SynopticProvider};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

/// How long a fetched station set stays fresh.
const STATION_TTL: Duration = Duration::from_secs(300);

/// Number of memoized grids to retain. A handful covers the active metric's
/// recent viewports; grids are cheap to recompute on miss.
const GRID_CACHE_SIZE: usize = 32;

/// Query-point quantization for the station cache: ~1 km buckets, so tiny
/// viewport drift reuses the cached fetch.
const CENTER_QUANT: f64 = 100.0;

/// A fetched station set plus the version stamp grids are keyed on.
#[derive(Clone)]
pub struct StationSnapshot {
    pub stations: Arc<Vec<Station>>,
    pub version: u64,
    pub fetched_at: Instant,
}

struct StationCacheEntry {
    snapshot: StationSnapshot,
    center: (i64, i64),
}

/// Shared application state.
pub struct AppState {
    provider: Arc<dyn StationProvider>,
    station_cache: RwLock<Option<StationCacheEntry>>,
    next_version: std::sync::atomic::AtomicU64,
    grid_cache: Mutex<LruCache<GridKey, Arc<Grid>>>,
}

impl AppState {
    pub fn new() -> Result<Self> {
        let config = ProviderConfig::from_env();
        let provider = SynopticProvider::new(config)?;
        info!("Synoptic station provider configured");
        Ok(Self::with_provider(Arc::new(provider)))
    }

    pub fn with_provider(provider: Arc<dyn StationProvider>) -> Self {
        Self {
            provider,
            station_cache: RwLock::new(None),
            next_version: std::sync::atomic::AtomicU64::new(1),
            grid_cache: Mutex::new(LruCache::new(
                NonZeroUsize::new(GRID_CACHE_SIZE).expect("cache size is nonzero"),
            )),
        }
    }

    /// Current station set near `(lat, lon)`, fetching through the provider
    /// when the cache is stale or the query point moved.
    pub async fn stations(&self, lat: f64, lon: f64) -> stations::Result<StationSnapshot> {
        let center = (
            (lat * CENTER_QUANT).round() as i64,
            (lon * CENTER_QUANT).round() as i64,
        );

        {
            let cache = self.station_cache.read().await;
            if let Some(entry) = cache.as_ref() {
                if entry.center == center && entry.snapshot.fetched_at.elapsed() < STATION_TTL {
                    counter!("station_cache_hits_total").increment(1);
                    return Ok(entry.snapshot.clone());
                }
            }
        }

        counter!("station_cache_misses_total").increment(1);
        let fetched = self.provider.fetch(lat, lon).await?;
        let snapshot = StationSnapshot {
            stations: Arc::new(fetched),
            version: self
                .next_version
                .fetch_add(1, std::sync::atomic::Ordering::Relaxed),
            fetched_at: Instant::now(),
        };
        debug!(
            count = snapshot.stations.len(),
            version = snapshot.version,
            "refreshed station set"
        );

        let mut cache = self.station_cache.write().await;
        *cache = Some(StationCacheEntry {
            snapshot: snapshot.clone(),
            center,
        });
        Ok(snapshot)
    }

    /// Grid for the snapshot/viewport, memoized on `GridKey`.
    ///
    /// `None` has the interpolator's "no grid" meaning (empty stations or
    /// cell budget exceeded) and is deliberately not cached; both cases are
    /// trivial to re-answer.
    pub async fn grid(
        &self,
        snapshot: &StationSnapshot,
        bbox: heatmap_common::BoundingBox,
        cell_size: CellSize,
    ) -> Option<Arc<Grid>> {
        let key = GridKey::new(snapshot.version, bbox, cell_size);

        {
            let mut cache = self.grid_cache.lock().await;
            if let Some(grid) = cache.get(&key) {
                counter!("grid_cache_hits_total").increment(1);
                return Some(grid.clone());
            }
        }

        counter!("grid_cache_misses_total").increment(1);
        let started = Instant::now();
        let grid = interpolate(&snapshot.stations, bbox, cell_size.km())?;
        histogram!("grid_interpolate_seconds").record(started.elapsed().as_secs_f64());

        let grid = Arc::new(grid);
        let mut cache = self.grid_cache.lock().await;
        cache.put(key, grid.clone());
        Some(grid)
    }
}
