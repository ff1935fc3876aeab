pub mod loader;

use serde::{Deserialize, Serialize};
use crate::error::MarombaError;

/// General training principles shown alongside the plan. The defaults are
/// also what the built-in fallback plan carries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrainingPrinciples {
    #[serde(rename = "cadencia")]
    pub tempo: String,
    #[serde(rename = "carga")]
    pub load: String,
    #[serde(rename = "descanso")]
    pub rest: String,
}

impl Default for TrainingPrinciples {
    fn default() -> Self {
        TrainingPrinciples {
            tempo: "excêntrica / pausa / concêntrica / pausa".to_string(),
            load: "última repetição próxima da falha (RIR 1–2)".to_string(),
            rest: "entre séries, conforme tipo de exercício".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    #[serde(rename = "nome")]
    pub name: String,
    pub reps: String,
    #[serde(rename = "cadencia")]
    pub tempo: String,
    #[serde(rename = "descanso")]
    pub rest: String,
    #[serde(rename = "numero_series")]
    pub set_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrainingDay {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "grupo_muscular", default)]
    pub muscle_groups: Vec<String>,
    #[serde(rename = "exercicios")]
    pub exercises: Vec<Exercise>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrainingProgram {
    #[serde(rename = "principios_gerais", default)]
    pub principles: TrainingPrinciples,
    #[serde(rename = "dias")]
    pub days: Vec<TrainingDay>,
}

/// The prescribed program, immutable once loaded. The JSON shape (Portuguese
/// field names, `treino.dias` nesting) is the wire format of the static plan
/// resource and the plan cache; both sides round-trip through it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrainingPlan {
    #[serde(rename = "treino")]
    pub program: TrainingProgram,
}

impl TrainingPlan {
    /// Explicit decode/validate step for fetched or cached payloads.
    /// A payload is valid when it carries a non-null `treino` object with a
    /// `dias` array (empty is fine); `principios_gerais` is defaulted when
    /// absent. Anything else yields a descriptive decode error.
    pub fn from_value(value: serde_json::Value) -> Result<TrainingPlan, MarombaError> {
        serde_json::from_value(value)
            .map_err(|e| MarombaError::new(
                format!("Invalid plan shape: {}", e),
                "plan_decode"
            ).with_source("serde_json"))
    }

    /// Built-in fallback plan: no days, fixed default principles.
    /// Installed when every loader fallback fails; never cached.
    pub fn default_plan() -> TrainingPlan {
        TrainingPlan {
            program: TrainingProgram {
                principles: TrainingPrinciples::default(),
                days: Vec::new(),
            },
        }
    }

    /// Exact-name day lookup.
    pub fn find_day(&self, name: &str) -> Option<&TrainingDay> {
        self.program.days.iter().find(|d| d.name == name)
    }

    /// First day whose exercise list contains `exercise_name`.
    /// First match wins; days sharing an exercise name are tie-broken by
    /// plan order.
    pub fn day_with_exercise(&self, exercise_name: &str) -> Option<&TrainingDay> {
        self.program.days.iter()
            .find(|d| d.exercises.iter().any(|e| e.name == exercise_name))
    }

    pub fn is_day_name(&self, name: &str) -> bool {
        self.program.days.iter().any(|d| d.name == name)
    }
}
