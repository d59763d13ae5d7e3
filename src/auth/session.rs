use actix_session::Session;

use crate::errors::AppError;

/// Permission codes held by the logged-in member.
#[derive(Debug, Clone, Default)]
pub struct Permissions(pub Vec<String>);

impl Permissions {
    pub fn has(&self, code: &str) -> bool {
        self.0.iter().any(|p| p == code)
    }

    pub fn from_csv(csv: &str) -> Self {
        let codes = csv
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        Permissions(codes)
    }
}

pub fn get_member_id(session: &Session) -> Option<i64> {
    session.get::<i64>("member_id").unwrap_or(None)
}

pub fn get_permissions(session: &Session) -> Result<Permissions, AppError> {
    match session.get::<String>("permissions") {
        Ok(Some(csv)) => Ok(Permissions::from_csv(&csv)),
        Ok(None) => Err(AppError::Session("No permissions in session".to_string())),
        Err(e) => Err(AppError::Session(format!("Session error: {e}"))),
    }
}

/// Check permission; returns Err(AppError::PermissionDenied) if denied.
pub fn require_permission(session: &Session, code: &str) -> Result<Permissions, AppError> {
    let permissions = get_permissions(session)?;

    if permissions.has(code) {
        Ok(permissions)
    } else {
        Err(AppError::PermissionDenied(code.to_string()))
    }
}
