pub mod session;
pub mod store;

use serde::{Deserialize, Serialize};

/// Canonical weekday labels, Monday first. Weekly stats always report these
/// seven slots in this order.
pub const WEEK_DAYS: [&str; 7] = [
    "Segunda",
    "Terça",
    "Quarta",
    "Quinta",
    "Sexta",
    "Sábado",
    "Domingo",
];

/// One performed (or planned) set within a logged session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SetEntry {
    pub reps: u32,
    #[serde(default)]
    pub weight: f64,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseEntry {
    pub exercise_name: String,
    pub sets: Vec<SetEntry>,
}

/// A record of one day's activity: a logged workout or an explicit rest day.
/// Rest-day sessions carry no exercises and are completed at creation.
/// The camelCase JSON shape is the wire format of the progress storage key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSession {
    /// Day label + creation millis; unique within a week for human-paced use
    pub id: String,
    /// UTC calendar date the session was created (YYYY-MM-DD)
    pub date: String,
    /// Weekday slot or workout name this session is logged under
    pub day_name: String,
    pub completed: bool,
    #[serde(default)]
    pub is_rest_day: bool,
    pub exercises: Vec<ExerciseEntry>,
}

/// All sessions recorded against one week, identified by its Monday date.
/// Held in memory inside a map keyed by `week_start`, persisted as a JSON
/// array ordered by week-start.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyProgress {
    pub week_start: String,
    pub sessions: Vec<WorkoutSession>,
}
