use rusqlite::{Connection, params};

use super::types::*;
use crate::auth::session::Permissions;
use crate::db::timestamp;
use crate::errors::AppError;
use crate::models::{element, step};

pub(crate) fn row_to_answer(row: &rusqlite::Row) -> rusqlite::Result<Answer> {
    Ok(Answer {
        id: row.get("id")?,
        title: row.get("title")?,
        sort: row.get("sort")?,
        question_id: row.get("question_id")?,
        resulting_step_id: row.get("resulting_step_id")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

const ANSWER_COLUMNS: &str =
    "id, title, sort, question_id, resulting_step_id, created_at, updated_at";

/// Create an answer under a question step. When no sort is given the answer
/// goes to the end of the question's list. Returns the new id.
pub fn create(conn: &Connection, form: &AnswerForm) -> Result<i64, AppError> {
    if !step::exists(conn, form.question_id)? {
        return Err(AppError::Validation(format!(
            "Question step {} does not exist",
            form.question_id
        )));
    }

    let sort = match form.sort {
        Some(sort) => sort,
        None => next_sort(conn, form.question_id)?,
    };

    conn.execute(
        "INSERT INTO answers (title, sort, question_id, resulting_step_id) \
         VALUES (?1, ?2, ?3, ?4)",
        params![form.title, sort, form.question_id, form.resulting_step_id],
    )?;
    Ok(conn.last_insert_rowid())
}

fn next_sort(conn: &Connection, question_id: i64) -> Result<i64, AppError> {
    let max: i64 = conn.query_row(
        "SELECT COALESCE(MAX(sort), 0) FROM answers WHERE question_id = ?1",
        params![question_id],
        |row| row.get(0),
    )?;
    Ok(max + 1)
}

pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Answer>, AppError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {ANSWER_COLUMNS} FROM answers WHERE id = ?1"
    ))?;
    let mut rows = stmt.query_map(params![id], row_to_answer)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

/// All answers owned by a question step, in editor order.
pub fn find_by_question(conn: &Connection, question_id: i64) -> Result<Vec<Answer>, AppError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {ANSWER_COLUMNS} FROM answers WHERE question_id = ?1 ORDER BY sort, id"
    ))?;
    let rows = stmt
        .query_map(params![question_id], row_to_answer)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn update(conn: &Connection, id: i64, form: &AnswerForm) -> Result<(), AppError> {
    if !step::exists(conn, form.question_id)? {
        return Err(AppError::Validation(format!(
            "Question step {} does not exist",
            form.question_id
        )));
    }

    let updated = conn.execute(
        "UPDATE answers \
         SET title = ?1, question_id = ?2, resulting_step_id = ?3, \
             sort = COALESCE(?4, sort), updated_at = ?5 \
         WHERE id = ?6",
        params![
            form.title,
            form.question_id,
            form.resulting_step_id,
            form.sort,
            timestamp(),
            id
        ],
    )?;
    if updated == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

pub fn delete(conn: &Connection, id: i64) -> Result<(), AppError> {
    let deleted = conn.execute("DELETE FROM answers WHERE id = ?1", params![id])?;
    if deleted == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

/// The step shown when this answer is picked, if it still exists.
pub fn resulting_step(conn: &Connection, answer: &Answer) -> Result<Option<step::Step>, AppError> {
    match answer.resulting_step_id {
        Some(step_id) => step::find_by_id(conn, step_id),
        None => Ok(None),
    }
}

/// Whether the answer leads to further tree content. Answers pointing at a
/// deleted step count as leaves.
pub fn has_dependent_question(conn: &Connection, answer: &Answer) -> Result<bool, AppError> {
    match answer.resulting_step_id {
        Some(step_id) => step::exists(conn, step_id),
        None => Ok(false),
    }
}

/// Answer title suffixed with the owning question's title, for showing a
/// step's parent answer in the editor.
pub fn title_with_question(conn: &Connection, answer: &Answer) -> Result<String, AppError> {
    match step::find_by_id(conn, answer.question_id)? {
        Some(question) => Ok(format!("{} ({})", answer.title, question.title)),
        None => Ok(answer.title.clone()),
    }
}

/// Deletion delegates to the element permission and is refused while the
/// answer still leads to a dependent question.
pub fn can_delete(
    conn: &Connection,
    permissions: &Permissions,
    answer: &Answer,
) -> Result<bool, AppError> {
    Ok(element::can_delete(permissions) && !has_dependent_question(conn, answer)?)
}
