use std::sync::{Arc, OnceLock};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::time::{timeout, Duration};
use crate::config::TrackerConfig;
use crate::error::MarombaError;
use crate::plan::TrainingPlan;
use crate::state::AppState;
use crate::storage::KvStore;

/// Persistent cache key for the last good plan payload.
pub const PLAN_CACHE_KEY: &str = "maromba_training_data_cache";

/// Cache envelope persisted under [`PLAN_CACHE_KEY`]: the raw plan payload
/// plus the capture instant in epoch milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedPlan {
    pub data: serde_json::Value,
    pub timestamp: i64,
}

/// Reusable HTTP client singleton (created once, reused for all requests).
/// No client-level timeout: the first attempt is bounded externally and the
/// retry attempt is deliberately unbounded.
static HTTP_CLIENT: OnceLock<Client> = OnceLock::new();

fn get_http_client() -> &'static Client {
    HTTP_CLIENT.get_or_init(|| {
        Client::builder()
            .tcp_keepalive(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client")
    })
}

/// Resolves the current training plan through a fixed fallback order:
/// bounded network fetch, persistent cache, unbounded retry fetch, built-in
/// default. No failure escapes `load`; the worst case silently installs the
/// default plan.
pub struct PlanLoader {
    state: AppState,
    store: Arc<dyn KvStore>,
    config: TrackerConfig,
}

impl PlanLoader {
    pub fn new(state: AppState, store: Arc<dyn KvStore>, config: TrackerConfig) -> Self {
        PlanLoader { state, store, config }
    }

    /// Load the plan into shared state. Idempotent unless `force` is set or
    /// no plan is currently held. The loading flag is set for the duration
    /// and cleared on every exit path.
    pub async fn load(&self, force: bool) {
        if self.state.has_plan() && !force {
            return;
        }

        self.state.set_loading(true);
        let plan = self.resolve_plan().await;
        self.state.set_plan(plan);
        self.state.set_loading(false);
    }

    /// Walk the fallback chain. Always yields a plan.
    async fn resolve_plan(&self) -> TrainingPlan {
        let url = self.config.plan_url.clone();

        // 1st attempt: fetch with timeout
        let mut fetch_completed = false;
        let bound = Duration::from_millis(self.config.fetch_timeout_ms);
        match timeout(bound, self.fetch_value(&url)).await {
            Ok(Ok(value)) => {
                fetch_completed = true;
                match TrainingPlan::from_value(value) {
                    Ok(plan) => {
                        self.write_cache(&plan);
                        return plan;
                    }
                    Err(e) => {
                        tracing::warn!(url = %url, error = %e, "Fetched plan failed shape validation");
                    }
                }
            }
            Ok(Err(e)) => {
                tracing::warn!(url = %url, error = %e, "Plan fetch failed");
            }
            Err(_) => {
                tracing::warn!(
                    url = %url,
                    timeout_ms = self.config.fetch_timeout_ms,
                    "Plan fetch timed out"
                );
            }
        }

        // 2nd attempt: cache, without refreshing its capture timestamp
        if let Some(plan) = self.load_cache() {
            tracing::info!("Using cached training plan");
            return plan;
        }

        // 3rd attempt: retry the fetch with no timeout bound. Skipped when
        // the first fetch completed at the transport level but carried an
        // invalid shape; a second request would return the same payload.
        if !fetch_completed {
            match self.fetch_value(&url).await {
                Ok(value) => match TrainingPlan::from_value(value) {
                    Ok(plan) => {
                        self.write_cache(&plan);
                        return plan;
                    }
                    Err(e) => {
                        tracing::error!(url = %url, error = %e, "Retried plan failed shape validation");
                    }
                },
                Err(e) => {
                    tracing::error!(url = %url, error = %e, "Plan fetch retry failed");
                }
            }
        }

        // fallback: built-in default plan, never cached
        tracing::error!("All plan sources failed, installing built-in default plan");
        TrainingPlan::default_plan()
    }

    /// GET the plan resource and parse the body as JSON. Transport and JSON
    /// failures land here; shape validation is the caller's separate step.
    async fn fetch_value(&self, url: &str) -> Result<serde_json::Value, MarombaError> {
        let response = get_http_client()
            .get(url)
            .send()
            .await?
            .error_for_status()?;
        let value = response.json::<serde_json::Value>().await?;
        Ok(value)
    }

    /// Persist a freshly fetched plan with the current capture instant.
    /// Cache write failures are logged and swallowed; the plan is already
    /// installed in memory.
    fn write_cache(&self, plan: &TrainingPlan) {
        let envelope = CachedPlan {
            data: match serde_json::to_value(plan) {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to serialize plan for cache");
                    return;
                }
            },
            timestamp: chrono::Utc::now().timestamp_millis(),
        };

        match serde_json::to_string(&envelope) {
            Ok(json) => {
                if let Err(e) = self.store.set(PLAN_CACHE_KEY, &json) {
                    tracing::warn!(error = %e, "Failed to write plan cache");
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to serialize plan cache envelope");
            }
        }
    }

    /// Read the cached plan if its envelope parses, its capture timestamp is
    /// within the TTL, and the payload passes the same shape check as a
    /// fetched plan.
    fn load_cache(&self) -> Option<TrainingPlan> {
        let raw = self.store.get(PLAN_CACHE_KEY)?;

        let envelope: CachedPlan = match serde_json::from_str(&raw) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::warn!(error = %e, "Corrupt plan cache envelope");
                return None;
            }
        };

        let age_ms = chrono::Utc::now().timestamp_millis() - envelope.timestamp;
        if age_ms >= self.config.cache_ttl_millis() {
            tracing::debug!(age_ms = age_ms, "Plan cache expired");
            return None;
        }

        match TrainingPlan::from_value(envelope.data) {
            Ok(plan) => Some(plan),
            Err(e) => {
                tracing::warn!(error = %e, "Cached plan failed shape validation");
                None
            }
        }
    }
}
