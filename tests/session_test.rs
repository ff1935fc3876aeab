use chrono::{TimeZone, Utc};
use maromba::clock::Clock;
use maromba::plan::{Exercise, TrainingDay, TrainingPlan, TrainingPrinciples, TrainingProgram};
use maromba::progress::session::{create_rest_day_session, create_workout_session};

fn exercise(name: &str, sets: u32) -> Exercise {
    Exercise {
        name: name.to_string(),
        reps: "8-10".to_string(),
        tempo: "3-1-1-0".to_string(),
        rest: "90s".to_string(),
        set_count: sets,
    }
}

fn plan() -> TrainingPlan {
    TrainingPlan {
        program: TrainingProgram {
            principles: TrainingPrinciples::default(),
            days: vec![TrainingDay {
                name: "Push".to_string(),
                muscle_groups: vec!["Peito".to_string(), "Tríceps".to_string()],
                exercises: vec![exercise("Supino Reto", 4), exercise("Crucifixo", 3)],
            }],
        },
    }
}

fn clock() -> Clock {
    Clock::fixed(Utc.with_ymd_and_hms(2025, 6, 4, 15, 0, 0).unwrap())
}

#[test]
fn unknown_day_name_fails_with_day_lookup() {
    let err = create_workout_session(&plan(), "Legs", &clock()).unwrap_err();
    assert!(err.is_day_not_found());
    assert_eq!(err.stage, "day_lookup");
}

#[test]
fn workout_session_mirrors_the_plan_day() {
    let session = create_workout_session(&plan(), "Push", &clock()).unwrap();

    assert_eq!(session.day_name, "Push");
    assert_eq!(session.date, "2025-06-04");
    assert!(!session.completed);
    assert!(!session.is_rest_day);
    assert!(session.id.starts_with("Push-"));

    // One entry per plan exercise, set count taken from the plan,
    // every set zeroed and incomplete.
    assert_eq!(session.exercises.len(), 2);
    assert_eq!(session.exercises[0].exercise_name, "Supino Reto");
    assert_eq!(session.exercises[0].sets.len(), 4);
    assert_eq!(session.exercises[1].sets.len(), 3);
    for entry in &session.exercises {
        for set in &entry.sets {
            assert_eq!(set.reps, 0);
            assert_eq!(set.weight, 0.0);
            assert!(!set.completed);
        }
    }
}

#[test]
fn rest_day_session_is_empty_and_completed() {
    let session = create_rest_day_session("Domingo", &clock());

    assert!(session.id.starts_with("rest-Domingo-"));
    assert_eq!(session.day_name, "Domingo");
    assert!(session.completed);
    assert!(session.is_rest_day);
    assert!(session.exercises.is_empty());
}

#[test]
fn session_json_uses_the_storage_wire_shape() {
    let session = create_workout_session(&plan(), "Push", &clock()).unwrap();
    let value = serde_json::to_value(&session).unwrap();

    assert!(value.get("dayName").is_some());
    assert!(value.get("isRestDay").is_some());
    assert!(value["exercises"][0].get("exerciseName").is_some());
}
