pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod plan;
pub mod progress;
pub mod state;
pub mod storage;

use std::sync::Arc;
use crate::config::TrackerConfig;
use crate::plan::loader::PlanLoader;
use crate::progress::store::ProgressStore;
use crate::state::AppState;
use crate::storage::KvStore;

/// Handles for one app session: shared state plus the plan loader and
/// progress store operating on it. Constructed once by [`bootstrap`] and
/// passed to the embedding shell.
pub struct Tracker {
    pub state: AppState,
    pub loader: PlanLoader,
    pub progress: ProgressStore,
}

/// Wire up the core over a storage backend and run the startup sequence:
/// resolve the plan through the fallback chain, recover persisted progress,
/// and make sure this week's bucket exists.
pub async fn bootstrap(store: Arc<dyn KvStore>, config: TrackerConfig) -> Tracker {
    let state = AppState::new();
    let loader = PlanLoader::new(state.clone(), store.clone(), config);
    let progress = ProgressStore::new(state.clone(), store);

    loader.load(false).await;
    progress.load_progress();
    progress.initialize_current_week();

    tracing::info!(week = %state.current_week(), "maromba core ready");
    Tracker { state, loader, progress }
}

/// [`bootstrap`] with the on-disk store and file-or-default config,
/// initializing logging first. The entry point for a real shell.
pub async fn bootstrap_default() -> Tracker {
    logging::init_logging();
    let store: Arc<dyn KvStore> = Arc::new(storage::FileStore::new());
    bootstrap(store, config::get_config().clone()).await
}
