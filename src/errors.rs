use actix_web::{HttpResponse, ResponseError};
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Db(rusqlite::Error),
    Pool(r2d2::Error),
    Session(String),
    PermissionDenied(String),
    Validation(String),
    NotFound,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Db(e) => write!(f, "Database error: {e}"),
            AppError::Pool(e) => write!(f, "Pool error: {e}"),
            AppError::Session(e) => write!(f, "Session error: {e}"),
            AppError::PermissionDenied(code) => write!(f, "Permission denied: {code}"),
            AppError::Validation(e) => write!(f, "Validation error: {e}"),
            AppError::NotFound => write!(f, "Not found"),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::NotFound => HttpResponse::NotFound()
                .json(serde_json::json!({ "error": "not found" })),
            // A missing or unreadable session just means the client is not
            // logged in; that's their problem, not a server fault.
            AppError::Session(_) => HttpResponse::Unauthorized()
                .json(serde_json::json!({ "error": "authentication required" })),
            AppError::PermissionDenied(code) => HttpResponse::Forbidden()
                .json(serde_json::json!({ "error": "permission denied", "code": code })),
            AppError::Validation(msg) => HttpResponse::BadRequest()
                .json(serde_json::json!({ "error": msg })),
            _ => {
                log::error!("{self}");
                HttpResponse::InternalServerError()
                    .json(serde_json::json!({ "error": "internal server error" }))
            }
        }
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        AppError::Db(e)
    }
}

impl From<r2d2::Error> for AppError {
    fn from(e: r2d2::Error) -> Self {
        AppError::Pool(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn anonymous_requests_get_unauthorized_not_server_error() {
        let resp = AppError::Session("No permissions in session".to_string()).error_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn client_errors_map_to_client_statuses() {
        assert_eq!(
            AppError::NotFound.error_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::PermissionDenied("trees.manage".to_string())
                .error_response()
                .status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::Validation("bad input".to_string())
                .error_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn database_errors_stay_internal() {
        let resp = AppError::Db(rusqlite::Error::QueryReturnedNoRows).error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
