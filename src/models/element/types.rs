use serde::{Deserialize, Serialize};

/// Tree-root container: points at the first step of one decision tree and
/// owns the permission decisions for everything in it.
#[derive(Debug, Clone, Serialize)]
pub struct Element {
    pub id: i64,
    pub title: String,
    pub first_step_id: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

/// Form input for creating or updating an element.
#[derive(Debug, Clone, Deserialize)]
pub struct ElementForm {
    pub title: String,
    pub first_step_id: Option<i64>,
}
