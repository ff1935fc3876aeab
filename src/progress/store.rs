use std::sync::Arc;
use serde::Serialize;
use crate::clock::Clock;
use crate::error::MarombaError;
use crate::plan::TrainingPlan;
use crate::progress::{session, WeeklyProgress, WorkoutSession, WEEK_DAYS};
use crate::state::AppState;
use crate::storage::KvStore;

/// Persistent key holding the full weekly-progress array.
pub const PROGRESS_KEY: &str = "maromba-weekly-progress";

/// Per-weekday summary row in [`WeeklyStats`].
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DayStat {
    pub day: String,
    pub has_session: bool,
    pub is_rest_day: bool,
    pub completed: bool,
    /// Best-effort resolved workout name; None for rest days and empty slots
    pub session_workout_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WeeklyStats {
    pub total: usize,
    pub completed: usize,
    pub days: Vec<DayStat>,
}

/// Owner of all recorded weeks. Every mutation updates the in-memory map and
/// immediately mirrors the whole array to the persistent store; the store is
/// only the source of truth at cold start via [`ProgressStore::load_progress`].
pub struct ProgressStore {
    state: AppState,
    store: Arc<dyn KvStore>,
    clock: Clock,
}

impl ProgressStore {
    pub fn new(state: AppState, store: Arc<dyn KvStore>) -> Self {
        Self::with_clock(state, store, Clock::system())
    }

    /// Store with a pinned clock, used by tests to place sessions in a
    /// chosen week.
    pub fn with_clock(state: AppState, store: Arc<dyn KvStore>, clock: Clock) -> Self {
        let progress = ProgressStore { state, store, clock };
        // The current week is resolvable before any mutation happens.
        progress.refresh_current_week();
        progress
    }

    /// Cold-start read of the persisted weeks. A corrupt or missing payload
    /// degrades to an empty history with a warning, never an error.
    pub fn load_progress(&self) {
        let Some(raw) = self.store.get(PROGRESS_KEY) else {
            return;
        };

        match serde_json::from_str::<Vec<WeeklyProgress>>(&raw) {
            Ok(weeks) => {
                let mut map = self.state.progress.write();
                map.clear();
                for week in weeks {
                    map.insert(week.week_start.clone(), week);
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Corrupt weekly progress payload, starting empty");
            }
        }
    }

    /// Recompute and cache the current week-start.
    pub fn refresh_current_week(&self) -> String {
        let week = self.clock.week_start();
        self.state.set_current_week(week.clone());
        week
    }

    /// Pure read of this week's bucket, if it has been initialized.
    pub fn current_week_progress(&self) -> Option<WeeklyProgress> {
        let week = self.state.current_week();
        self.state.progress.read().get(&week).cloned()
    }

    /// Ensure a bucket exists for the current week. Idempotent; persists
    /// only when a new bucket was actually inserted.
    pub fn initialize_current_week(&self) {
        let week = self.refresh_current_week();

        let inserted = {
            let mut map = self.state.progress.write();
            if map.contains_key(&week) {
                false
            } else {
                map.insert(
                    week.clone(),
                    WeeklyProgress {
                        week_start: week,
                        sessions: Vec::new(),
                    },
                );
                true
            }
        };

        if inserted {
            self.save_progress();
        }
    }

    /// Log a workout session for `workout_name`. When `week_day` is given
    /// the session is filed under that weekday slot instead of the workout
    /// name, decoupling "which weekday" from "which named workout".
    ///
    /// The day-lookup failure (unknown workout, or plan not loaded yet)
    /// propagates to the caller.
    pub fn add_workout_session(
        &self,
        workout_name: &str,
        week_day: Option<&str>,
    ) -> Result<(), MarombaError> {
        let plan = self.state.plan_snapshot().ok_or_else(|| {
            tracing::error!(day = workout_name, "Training day lookup before plan load");
            MarombaError::new(
                format!("Training day not found: {}", workout_name),
                "day_lookup",
            )
            .with_context("plan not loaded")
        })?;

        let mut workout = session::create_workout_session(&plan, workout_name, &self.clock)?;
        if let Some(day) = week_day {
            workout.day_name = day.to_string();
        }

        self.initialize_current_week();
        self.push_session(workout);
        Ok(())
    }

    /// Mark a weekday slot as a rest day. Always succeeds.
    pub fn mark_day_as_rest(&self, week_day: &str) {
        let rest = session::create_rest_day_session(week_day, &self.clock);
        self.initialize_current_week();
        self.push_session(rest);
    }

    /// Remove the session with the given id from the current week.
    /// No-op when absent; historical weeks are never touched.
    pub fn delete_session(&self, session_id: &str) {
        self.remove_first(|s| s.id == session_id);
    }

    /// Remove the first session filed under `day_name` from the current
    /// week. No-op when absent; historical weeks are never touched.
    pub fn delete_session_by_day(&self, day_name: &str) {
        self.remove_first(|s| s.day_name == day_name);
    }

    /// Empty the current week's session list.
    pub fn clear_all_sessions(&self) {
        let week = self.state.current_week();
        let cleared = {
            let mut map = self.state.progress.write();
            match map.get_mut(&week) {
                Some(progress) => {
                    progress.sessions.clear();
                    true
                }
                None => false,
            }
        };

        if cleared {
            self.save_progress();
        }
    }

    /// Set the completion flag on the matching current-week session.
    pub fn complete_workout_session(&self, session_id: &str) {
        let week = self.state.current_week();
        let updated = {
            let mut map = self.state.progress.write();
            map.get_mut(&week)
                .and_then(|progress| {
                    progress.sessions.iter_mut().find(|s| s.id == session_id)
                })
                .map(|found| found.completed = true)
                .is_some()
        };

        if updated {
            self.save_progress();
        }
    }

    /// Derived view over the current week: totals plus the fixed
    /// Monday..Sunday breakdown. Returns empty stats when this week has no
    /// bucket yet.
    pub fn weekly_stats(&self) -> WeeklyStats {
        let Some(progress) = self.current_week_progress() else {
            return WeeklyStats {
                total: 0,
                completed: 0,
                days: Vec::new(),
            };
        };

        let plan = self.state.plan_snapshot();
        let days = WEEK_DAYS
            .iter()
            .map(|day| {
                let found = progress.sessions.iter().find(|s| s.day_name == *day);
                let session_workout_name = found.and_then(|s| {
                    if s.is_rest_day {
                        None
                    } else {
                        Some(resolve_workout_name(s, plan.as_ref()))
                    }
                });

                DayStat {
                    day: (*day).to_string(),
                    has_session: found.is_some(),
                    is_rest_day: found.map_or(false, |s| s.is_rest_day),
                    completed: found.map_or(false, |s| s.completed),
                    session_workout_name,
                }
            })
            .collect();

        WeeklyStats {
            total: progress.sessions.len(),
            completed: progress.sessions.iter().filter(|s| s.completed).count(),
            days,
        }
    }

    fn push_session(&self, workout: WorkoutSession) {
        let week = self.state.current_week();
        let pushed = {
            let mut map = self.state.progress.write();
            match map.get_mut(&week) {
                Some(progress) => {
                    progress.sessions.push(workout);
                    true
                }
                None => {
                    tracing::error!(week = %week, "Current week bucket missing after initialization");
                    false
                }
            }
        };

        if pushed {
            self.save_progress();
        }
    }

    fn remove_first<F>(&self, matches: F)
    where
        F: Fn(&WorkoutSession) -> bool,
    {
        let week = self.state.current_week();
        let removed = {
            let mut map = self.state.progress.write();
            match map.get_mut(&week) {
                Some(progress) => match progress.sessions.iter().position(|s| matches(s)) {
                    Some(index) => {
                        progress.sessions.remove(index);
                        true
                    }
                    None => false,
                },
                None => false,
            }
        };

        if removed {
            self.save_progress();
        }
    }

    /// Mirror the whole week array to the persistent store. Failures are
    /// logged and swallowed; in-memory state remains authoritative.
    fn save_progress(&self) {
        let snapshot = self.state.progress_snapshot();
        match serde_json::to_string(&snapshot) {
            Ok(json) => {
                if let Err(e) = self.store.set(PROGRESS_KEY, &json) {
                    tracing::warn!(error = %e, "Failed to persist weekly progress");
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to serialize weekly progress");
            }
        }
    }
}

/// Best-effort workout name for a logged session, in order: the plan day
/// owning the session's first exercise, the session's own label when it is a
/// valid plan day name, the raw label. The first-exercise heuristic exists
/// because a session's day label may have been overridden to a weekday slot.
fn resolve_workout_name(workout: &WorkoutSession, plan: Option<&TrainingPlan>) -> String {
    if let Some(plan) = plan {
        if let Some(first) = workout.exercises.first() {
            if let Some(day) = plan.day_with_exercise(&first.exercise_name) {
                return day.name.clone();
            }
        }
        if plan.is_day_name(&workout.day_name) {
            return workout.day_name.clone();
        }
    }
    workout.day_name.clone()
}
