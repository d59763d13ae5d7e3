use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde_json::json;

use crate::auth::session::require_permission;
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::answer;
use crate::models::element::{DELETE_CODE, MANAGE_CODE};

pub async fn create(
    pool: web::Data<DbPool>,
    session: Session,
    form: web::Json<answer::AnswerForm>,
) -> Result<HttpResponse, AppError> {
    require_permission(&session, MANAGE_CODE)?;

    let conn = pool.get()?;
    let id = answer::create(&conn, &form)?;
    let created = answer::find_by_id(&conn, id)?.ok_or(AppError::NotFound)?;

    log::info!("Created answer {id} under step {}", created.question_id);
    Ok(HttpResponse::Created().json(created))
}

pub async fn get(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    require_permission(&session, MANAGE_CODE)?;

    let conn = pool.get()?;
    let answer = answer::find_by_id(&conn, path.into_inner())?.ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(answer))
}

pub async fn update(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Json<answer::AnswerForm>,
) -> Result<HttpResponse, AppError> {
    require_permission(&session, MANAGE_CODE)?;

    let conn = pool.get()?;
    let id = path.into_inner();
    answer::update(&conn, id, &form)?;
    let updated = answer::find_by_id(&conn, id)?.ok_or(AppError::NotFound)?;

    Ok(HttpResponse::Ok().json(updated))
}

pub async fn delete(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let permissions = require_permission(&session, DELETE_CODE)?;

    let conn = pool.get()?;
    let id = path.into_inner();
    let answer = answer::find_by_id(&conn, id)?.ok_or(AppError::NotFound)?;

    if !answer::can_delete(&conn, &permissions, &answer)? {
        return Err(AppError::Validation(
            "Answer leads to a dependent question".to_string(),
        ));
    }

    answer::delete(&conn, id)?;
    log::info!("Deleted answer {id}");
    Ok(HttpResponse::Ok().json(json!({ "ok": true })))
}

/// The step shown when this answer is picked: the hop the front end makes.
pub async fn next_step(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    require_permission(&session, MANAGE_CODE)?;

    let conn = pool.get()?;
    let answer = answer::find_by_id(&conn, path.into_inner())?.ok_or(AppError::NotFound)?;
    let next = answer::resulting_step(&conn, &answer)?;
    Ok(HttpResponse::Ok().json(next))
}
