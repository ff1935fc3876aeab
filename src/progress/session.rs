use crate::clock::Clock;
use crate::error::MarombaError;
use crate::plan::TrainingPlan;
use crate::progress::{ExerciseEntry, SetEntry, WorkoutSession};

/// Build a workout session for a named plan day.
///
/// This is the one place a failure is surfaced to the caller: an unknown day
/// name means either the plan has not loaded or the UI passed a name the
/// plan does not carry, and neither should be silently papered over.
pub fn create_workout_session(
    plan: &TrainingPlan,
    day_name: &str,
    clock: &Clock,
) -> Result<WorkoutSession, MarombaError> {
    let day = plan.find_day(day_name).ok_or_else(|| {
        tracing::error!(day = day_name, "Training day not found in plan");
        MarombaError::new(
            format!("Training day not found: {}", day_name),
            "day_lookup",
        )
    })?;

    let exercises = day
        .exercises
        .iter()
        .map(|exercise| ExerciseEntry {
            exercise_name: exercise.name.clone(),
            sets: (0..exercise.set_count)
                .map(|_| SetEntry {
                    reps: 0,
                    weight: 0.0,
                    completed: false,
                })
                .collect(),
        })
        .collect();

    Ok(WorkoutSession {
        id: format!("{}-{}", day_name, clock.timestamp_millis()),
        date: clock.today(),
        day_name: day_name.to_string(),
        completed: false,
        is_rest_day: false,
        exercises,
    })
}

/// Build a rest-day session for a weekday slot. Always succeeds; rest days
/// have no exercises and count as completed from the start.
pub fn create_rest_day_session(week_day: &str, clock: &Clock) -> WorkoutSession {
    WorkoutSession {
        id: format!("rest-{}-{}", week_day, clock.timestamp_millis()),
        date: clock.today(),
        day_name: week_day.to_string(),
        completed: true,
        is_rest_day: true,
        exercises: Vec::new(),
    }
}
