use serde::{Deserialize, Serialize};

/// Title given to a result step saved without one.
pub const DEFAULT_RESULT_TITLE: &str = "Our recommendation";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepType {
    Question,
    Result,
}

impl StepType {
    pub fn as_str(self) -> &'static str {
        match self {
            StepType::Question => "Question",
            StepType::Result => "Result",
        }
    }

    /// The schema CHECK constraint keeps the column to these two values;
    /// anything else is treated as a question.
    pub fn from_db(value: &str) -> Self {
        match value {
            "Result" => StepType::Result,
            _ => StepType::Question,
        }
    }
}

/// One node of a decision tree: either a question with answers leading
/// further down, or a result carrying the recommendation.
#[derive(Debug, Clone, Serialize)]
pub struct Step {
    pub id: i64,
    pub title: String,
    pub step_type: StepType,
    pub content: String,
    pub hide_title: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Form input for creating or updating a step.
#[derive(Debug, Clone, Deserialize)]
pub struct StepForm {
    pub title: String,
    pub step_type: StepType,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub hide_title: bool,
}

/// One hop of a full pathway, leaf to root. Serializes as
/// `{"question": id}` or `{"answer": id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PathwayEntry {
    Question(i64),
    Answer(i64),
}
