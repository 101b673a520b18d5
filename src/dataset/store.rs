use crate::dataset::loader::Loader;
use crate::dataset::Recipe;
use crate::error::Result;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::info;

/// One loaded snapshot of the recipe dataset.
#[derive(Debug)]
pub struct Dataset {
    pub recipes: Vec<Recipe>,
    /// SHA-256 of the raw payload, hex-encoded.
    pub fingerprint: String,
    pub loaded_at: DateTime<Utc>,
    /// Monotonic load counter; see [`DatasetStore`].
    pub generation: u64,
}

/// Memoizing holder for the recipe dataset.
///
/// The dataset is fetched at most once per process; searches recompute from
/// the cached snapshot. `reload` forces a refresh. Every load attempt gets a
/// generation number, and a completed load is discarded if a newer load has
/// already published its snapshot, so an old in-flight fetch can never
/// overwrite a newer one.
pub struct DatasetStore {
    loader: Loader,
    current: RwLock<Option<Arc<Dataset>>>,
    load_lock: Mutex<()>,
    next_generation: AtomicU64,
}

impl DatasetStore {
    pub fn new(loader: Loader) -> Self {
        Self {
            loader,
            current: RwLock::new(None),
            load_lock: Mutex::new(()),
            next_generation: AtomicU64::new(0),
        }
    }

    /// A store seeded with an in-memory snapshot, bypassing the network.
    pub fn preloaded(loader: Loader, recipes: Vec<Recipe>) -> Self {
        let store = Self::new(loader);
        {
            let mut current = store.current.try_write().expect("store is not shared yet");
            *current = Some(Arc::new(Dataset {
                recipes,
                fingerprint: String::new(),
                loaded_at: Utc::now(),
                generation: store.next_generation.fetch_add(1, Ordering::SeqCst) + 1,
            }));
        }
        store
    }

    /// Snapshot currently in memory, if any. Never touches the network.
    pub async fn current(&self) -> Option<Arc<Dataset>> {
        self.current.read().await.clone()
    }

    /// Return the cached snapshot, fetching it first if this is the first
    /// call. Concurrent first calls share a single fetch.
    pub async fn get_or_load(&self) -> Result<Arc<Dataset>> {
        if let Some(dataset) = self.current.read().await.clone() {
            return Ok(dataset);
        }
        self.load(false).await
    }

    /// Discard the cached snapshot and fetch a fresh one.
    pub async fn reload(&self) -> Result<Arc<Dataset>> {
        self.load(true).await
    }

    async fn load(&self, force: bool) -> Result<Arc<Dataset>> {
        let _guard = self.load_lock.lock().await;

        // Another caller may have finished the load while we waited
        if !force {
            if let Some(dataset) = self.current.read().await.clone() {
                return Ok(dataset);
            }
        }

        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let fetched = self.loader.fetch().await?;

        let dataset = Arc::new(Dataset {
            recipes: fetched.recipes,
            fingerprint: fetched.fingerprint,
            loaded_at: Utc::now(),
            generation,
        });

        let mut current = self.current.write().await;
        // Publish only if nothing newer landed in the meantime
        if current
            .as_ref()
            .map(|existing| existing.generation < generation)
            .unwrap_or(true)
        {
            info!(
                "Dataset loaded: {} recipes (generation {}, sha256 {})",
                dataset.recipes.len(),
                generation,
                dataset.fingerprint
            );
            *current = Some(dataset.clone());
            Ok(dataset)
        } else {
            Ok(current.as_ref().cloned().expect("checked above"))
        }
    }
}
