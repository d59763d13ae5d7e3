use serde::Serialize;

/// A CMS account. `permission_codes` is a comma-separated list of codes,
/// e.g. `trees.manage,trees.delete`.
#[derive(Debug, Clone, Serialize)]
pub struct Member {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub permission_codes: String,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct NewMember {
    pub username: String,
    pub password_hash: String,
    pub permission_codes: String,
}
