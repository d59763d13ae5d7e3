use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde_json::json;

use crate::auth::session::require_permission;
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::element::{self, DELETE_CODE, MANAGE_CODE};

pub async fn list(pool: web::Data<DbPool>, session: Session) -> Result<HttpResponse, AppError> {
    require_permission(&session, MANAGE_CODE)?;

    let conn = pool.get()?;
    let elements = element::find_all(&conn)?;
    Ok(HttpResponse::Ok().json(elements))
}

pub async fn get(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    require_permission(&session, MANAGE_CODE)?;

    let conn = pool.get()?;
    let element = element::find_by_id(&conn, path.into_inner())?.ok_or(AppError::NotFound)?;
    let first_step = element::first_step(&conn, &element)?;

    Ok(HttpResponse::Ok().json(json!({
        "element": element,
        "first_step": first_step,
        "edit_first_step_link": element::edit_first_step_link(&element),
    })))
}

pub async fn create(
    pool: web::Data<DbPool>,
    session: Session,
    form: web::Json<element::ElementForm>,
) -> Result<HttpResponse, AppError> {
    require_permission(&session, MANAGE_CODE)?;

    let conn = pool.get()?;
    let id = element::create(&conn, &form)?;
    let created = element::find_by_id(&conn, id)?.ok_or(AppError::NotFound)?;

    log::info!("Created element {id} ({})", created.title);
    Ok(HttpResponse::Created().json(created))
}

pub async fn update(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Json<element::ElementForm>,
) -> Result<HttpResponse, AppError> {
    require_permission(&session, MANAGE_CODE)?;

    let conn = pool.get()?;
    let id = path.into_inner();
    element::update(&conn, id, &form)?;
    let updated = element::find_by_id(&conn, id)?.ok_or(AppError::NotFound)?;

    Ok(HttpResponse::Ok().json(updated))
}

pub async fn delete(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    require_permission(&session, DELETE_CODE)?;

    let conn = pool.get()?;
    element::delete(&conn, path.into_inner())?;
    Ok(HttpResponse::Ok().json(json!({ "ok": true })))
}
