use std::collections::BTreeMap;
use std::sync::Arc;
use parking_lot::RwLock;
use crate::plan::TrainingPlan;
use crate::progress::WeeklyProgress;

/// Application-wide state container.
/// All mutable state is centralized here and passed explicitly to the plan
/// loader and progress store; there are no module-level globals. A single
/// instance per app session preserves the original's semantics.
#[derive(Clone)]
pub struct AppState {
    /// Current training plan, None until the loader has run
    pub plan: Arc<RwLock<Option<TrainingPlan>>>,
    /// All recorded weeks, keyed by week-start date string (YYYY-MM-DD)
    pub progress: Arc<RwLock<BTreeMap<String, WeeklyProgress>>>,
    /// Cached week-start of "this week"
    pub current_week: Arc<RwLock<String>>,
    /// Set for the duration of a plan load, cleared on every exit path
    pub loading: Arc<RwLock<bool>>,
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            plan: Arc::new(RwLock::new(None)),
            progress: Arc::new(RwLock::new(BTreeMap::new())),
            current_week: Arc::new(RwLock::new(String::new())),
            loading: Arc::new(RwLock::new(false)),
        }
    }

    pub fn plan_snapshot(&self) -> Option<TrainingPlan> {
        self.plan.read().clone()
    }

    pub fn has_plan(&self) -> bool {
        self.plan.read().is_some()
    }

    pub fn set_plan(&self, plan: TrainingPlan) {
        *self.plan.write() = Some(plan);
    }

    pub fn is_loading(&self) -> bool {
        *self.loading.read()
    }

    pub fn set_loading(&self, loading: bool) {
        *self.loading.write() = loading;
    }

    pub fn current_week(&self) -> String {
        self.current_week.read().clone()
    }

    pub fn set_current_week(&self, week_start: String) {
        *self.current_week.write() = week_start;
    }

    /// All weeks in week-start order, the shape the progress key persists.
    pub fn progress_snapshot(&self) -> Vec<WeeklyProgress> {
        self.progress.read().values().cloned().collect()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
