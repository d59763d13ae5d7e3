use serde::{Deserialize, Serialize};

/// An answer to a question step. Picking it leads to the resulting step,
/// if one is attached.
#[derive(Debug, Clone, Serialize)]
pub struct Answer {
    pub id: i64,
    pub title: String,
    pub sort: i64,
    pub question_id: i64,
    pub resulting_step_id: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

/// Form input for creating or updating an answer.
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerForm {
    pub title: String,
    pub question_id: i64,
    pub resulting_step_id: Option<i64>,
    pub sort: Option<i64>,
}
