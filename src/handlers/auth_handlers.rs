use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use serde_json::json;

use crate::auth::password;
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::member;

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

pub async fn login(
    pool: web::Data<DbPool>,
    session: Session,
    form: web::Json<LoginForm>,
) -> Result<HttpResponse, AppError> {
    let conn = pool.get()?;

    let found = member::find_by_username(&conn, &form.username)?;
    let member = match found {
        Some(m) if password::verify_password(&form.password, &m.password_hash) => m,
        _ => {
            log::warn!("Failed login for {}", form.username);
            return Ok(HttpResponse::Unauthorized().json(json!({ "error": "invalid credentials" })));
        }
    };

    session.renew();
    session
        .insert("member_id", member.id)
        .map_err(|e| AppError::Session(e.to_string()))?;
    session
        .insert("username", member.username.clone())
        .map_err(|e| AppError::Session(e.to_string()))?;
    session
        .insert("permissions", member.permission_codes.clone())
        .map_err(|e| AppError::Session(e.to_string()))?;

    log::info!("Member {} logged in", member.username);
    Ok(HttpResponse::Ok().json(json!({ "member_id": member.id, "username": member.username })))
}

pub async fn logout(session: Session) -> Result<HttpResponse, AppError> {
    session.purge();
    Ok(HttpResponse::Ok().json(json!({ "ok": true })))
}
