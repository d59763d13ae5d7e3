use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Serialize;
use serde_json::json;

use crate::auth::session::require_permission;
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::element::{DELETE_CODE, MANAGE_CODE};
use crate::models::{answer, step};

/// Step detail as returned by the API: the record plus the relations the
/// editor shows next to it.
#[derive(Serialize)]
pub struct StepDetail {
    #[serde(flatten)]
    pub step: step::Step,
    pub parent_answer: Option<answer::Answer>,
    pub parent_answer_title: Option<String>,
    pub answer_summary: Vec<String>,
}

#[derive(Serialize)]
struct PathwayResponse {
    full_pathway: Vec<step::PathwayEntry>,
    question_pathway: Vec<i64>,
    answer_pathway: Vec<i64>,
    position: i64,
    origin: Option<step::Step>,
    edit_link: Option<String>,
}

pub async fn list(pool: web::Data<DbPool>, session: Session) -> Result<HttpResponse, AppError> {
    require_permission(&session, MANAGE_CODE)?;

    let conn = pool.get()?;
    let steps = step::find_all(&conn)?;
    Ok(HttpResponse::Ok().json(steps))
}

pub async fn get(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    require_permission(&session, MANAGE_CODE)?;

    let conn = pool.get()?;
    let id = path.into_inner();
    let step = step::find_by_id(&conn, id)?.ok_or(AppError::NotFound)?;

    let parent_answer = step::parent_answer(&conn, id)?;
    let parent_answer_title = match &parent_answer {
        Some(a) => Some(answer::title_with_question(&conn, a)?),
        None => None,
    };
    let answer_summary = step::answer_grid_summary(&conn, id)?;

    Ok(HttpResponse::Ok().json(StepDetail {
        step,
        parent_answer,
        parent_answer_title,
        answer_summary,
    }))
}

pub async fn create(
    pool: web::Data<DbPool>,
    session: Session,
    form: web::Json<step::StepForm>,
) -> Result<HttpResponse, AppError> {
    require_permission(&session, MANAGE_CODE)?;

    let conn = pool.get()?;
    let id = step::create(&conn, &form)?;
    let created = step::find_by_id(&conn, id)?.ok_or(AppError::NotFound)?;

    log::info!("Created step {id} ({})", created.title);
    Ok(HttpResponse::Created().json(created))
}

pub async fn update(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Json<step::StepForm>,
) -> Result<HttpResponse, AppError> {
    require_permission(&session, MANAGE_CODE)?;

    let conn = pool.get()?;
    let id = path.into_inner();
    step::update(&conn, id, &form)?;
    let updated = step::find_by_id(&conn, id)?.ok_or(AppError::NotFound)?;

    Ok(HttpResponse::Ok().json(updated))
}

pub async fn delete(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let permissions = require_permission(&session, DELETE_CODE)?;

    let mut conn = pool.get()?;
    let id = path.into_inner();
    if !step::exists(&conn, id)? {
        return Err(AppError::NotFound);
    }
    if !step::can_delete(&conn, &permissions, id)? {
        return Err(AppError::Validation(
            "Step has answers leading to further questions".to_string(),
        ));
    }

    step::delete(&mut conn, id)?;
    log::info!("Deleted step {id}");
    Ok(HttpResponse::Ok().json(json!({ "ok": true })))
}

pub async fn answers(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    require_permission(&session, MANAGE_CODE)?;

    let conn = pool.get()?;
    let id = path.into_inner();
    if !step::exists(&conn, id)? {
        return Err(AppError::NotFound);
    }
    let answers = answer::find_by_question(&conn, id)?;
    Ok(HttpResponse::Ok().json(answers))
}

pub async fn pathway(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    require_permission(&session, MANAGE_CODE)?;

    let conn = pool.get()?;
    let id = path.into_inner();
    if !step::exists(&conn, id)? {
        return Err(AppError::NotFound);
    }

    Ok(HttpResponse::Ok().json(PathwayResponse {
        full_pathway: step::full_pathway(&conn, id)?,
        question_pathway: step::question_pathway(&conn, id)?,
        answer_pathway: step::answer_pathway(&conn, id)?,
        position: step::position_in_pathway(&conn, id)?,
        origin: step::tree_origin(&conn, id)?,
        edit_link: step::edit_link(&conn, id)?,
    }))
}

pub async fn orphans(pool: web::Data<DbPool>, session: Session) -> Result<HttpResponse, AppError> {
    require_permission(&session, MANAGE_CODE)?;

    let conn = pool.get()?;
    let steps = step::find_orphans(&conn)?;
    Ok(HttpResponse::Ok().json(steps))
}

pub async fn initial(pool: web::Data<DbPool>, session: Session) -> Result<HttpResponse, AppError> {
    require_permission(&session, MANAGE_CODE)?;

    let conn = pool.get()?;
    let steps = step::find_initial_steps(&conn)?;
    Ok(HttpResponse::Ok().json(steps))
}
