use rusqlite::{Connection, params};

use super::types::*;
use crate::auth::session::Permissions;
use crate::db::timestamp;
use crate::errors::AppError;
use crate::models::{answer, element};

fn row_to_step(row: &rusqlite::Row) -> rusqlite::Result<Step> {
    Ok(Step {
        id: row.get("id")?,
        title: row.get("title")?,
        step_type: StepType::from_db(&row.get::<_, String>("step_type")?),
        content: row.get("content")?,
        hide_title: row.get::<_, i64>("hide_title")? != 0,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

const STEP_COLUMNS: &str =
    "id, title, step_type, content, hide_title, created_at, updated_at";

/// A result step saved with a blank title gets the default one.
fn effective_title(form: &StepForm) -> &str {
    if form.step_type == StepType::Result && form.title.trim().is_empty() {
        DEFAULT_RESULT_TITLE
    } else {
        &form.title
    }
}

pub fn create(conn: &Connection, form: &StepForm) -> Result<i64, AppError> {
    conn.execute(
        "INSERT INTO steps (title, step_type, content, hide_title) \
         VALUES (?1, ?2, ?3, ?4)",
        params![
            effective_title(form),
            form.step_type.as_str(),
            form.content,
            form.hide_title as i64
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Step>, AppError> {
    let mut stmt = conn.prepare(&format!("SELECT {STEP_COLUMNS} FROM steps WHERE id = ?1"))?;
    let mut rows = stmt.query_map(params![id], row_to_step)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

pub fn find_all(conn: &Connection) -> Result<Vec<Step>, AppError> {
    let mut stmt = conn.prepare(&format!("SELECT {STEP_COLUMNS} FROM steps ORDER BY id"))?;
    let rows = stmt.query_map([], row_to_step)?.collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn exists(conn: &Connection, id: i64) -> Result<bool, AppError> {
    let found: bool = conn.query_row(
        "SELECT COUNT(*) > 0 FROM steps WHERE id = ?1",
        params![id],
        |row| row.get(0),
    )?;
    Ok(found)
}

pub fn update(conn: &Connection, id: i64, form: &StepForm) -> Result<(), AppError> {
    let updated = conn.execute(
        "UPDATE steps \
         SET title = ?1, step_type = ?2, content = ?3, hide_title = ?4, updated_at = ?5 \
         WHERE id = ?6",
        params![
            effective_title(form),
            form.step_type.as_str(),
            form.content,
            form.hide_title as i64,
            timestamp(),
            id
        ],
    )?;
    if updated == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

/// Delete a step, cascading to its leaf answers. Answers that still lead
/// to a dependent question are left in place; `can_delete` is the guard
/// that refuses the whole operation in that case.
pub fn delete(conn: &mut Connection, id: i64) -> Result<(), AppError> {
    let tx = conn.transaction()?;

    tx.execute(
        "DELETE FROM answers \
         WHERE question_id = ?1 \
           AND (resulting_step_id IS NULL \
                OR NOT EXISTS (SELECT 1 FROM steps s WHERE s.id = answers.resulting_step_id))",
        params![id],
    )?;

    let deleted = tx.execute("DELETE FROM steps WHERE id = ?1", params![id])?;
    if deleted == 0 {
        return Err(AppError::NotFound);
    }

    tx.commit()?;
    Ok(())
}

/// Steps referenced by no answer and no element: unused tree content.
pub fn find_orphans(conn: &Connection) -> Result<Vec<Step>, AppError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {STEP_COLUMNS} FROM steps s \
         WHERE NOT EXISTS (SELECT 1 FROM answers a WHERE a.resulting_step_id = s.id) \
           AND NOT EXISTS (SELECT 1 FROM elements e WHERE e.first_step_id = s.id) \
         ORDER BY s.id"
    ))?;
    let rows = stmt.query_map([], row_to_step)?.collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Steps not reached through any answer, i.e. candidates for being a tree
/// root. Result steps make no sense as roots and are excluded.
pub fn find_initial_steps(conn: &Connection) -> Result<Vec<Step>, AppError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {STEP_COLUMNS} FROM steps s \
         WHERE NOT EXISTS (SELECT 1 FROM answers a WHERE a.resulting_step_id = s.id) \
           AND s.step_type != 'Result' \
         ORDER BY s.id"
    ))?;
    let rows = stmt.query_map([], row_to_step)?.collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn belongs_to_element(conn: &Connection, step_id: i64) -> Result<bool, AppError> {
    let found: bool = conn.query_row(
        "SELECT COUNT(*) > 0 FROM elements WHERE first_step_id = ?1",
        params![step_id],
        |row| row.get(0),
    )?;
    Ok(found)
}

pub fn belongs_to_answer(conn: &Connection, step_id: i64) -> Result<bool, AppError> {
    let found: bool = conn.query_row(
        "SELECT COUNT(*) > 0 FROM answers WHERE resulting_step_id = ?1",
        params![step_id],
        |row| row.get(0),
    )?;
    Ok(found)
}

pub fn belongs_to_tree(conn: &Connection, step_id: i64) -> Result<bool, AppError> {
    Ok(belongs_to_element(conn, step_id)? || belongs_to_answer(conn, step_id)?)
}

/// Optionset source for the front end: (answer id, answer title) in
/// editor order.
pub fn answer_options(conn: &Connection, step_id: i64) -> Result<Vec<(i64, String)>, AppError> {
    let answers = answer::find_by_question(conn, step_id)?;
    Ok(answers.into_iter().map(|a| (a.id, a.title)).collect())
}

/// Readable per-answer lines for list views, e.g.
/// `"Yes => Our recommendation"`. Leaf answers get no arrow part.
pub fn answer_grid_summary(conn: &Connection, step_id: i64) -> Result<Vec<String>, AppError> {
    let mut lines = Vec::new();
    for a in answer::find_by_question(conn, step_id)? {
        match answer::resulting_step(conn, &a)? {
            Some(next) => lines.push(format!("{} => {}", a.title, next.title)),
            None => lines.push(a.title),
        }
    }
    Ok(lines)
}

/// Step create/view/edit permissions all delegate to the element.
pub fn can_create(permissions: &Permissions) -> bool {
    element::can_create(permissions)
}

pub fn can_view(permissions: &Permissions) -> bool {
    element::can_create(permissions)
}

pub fn can_edit(permissions: &Permissions) -> bool {
    element::can_create(permissions)
}

/// Deleting needs the element permission and every owned answer to be
/// individually deletable.
pub fn can_delete(
    conn: &Connection,
    permissions: &Permissions,
    step_id: i64,
) -> Result<bool, AppError> {
    let mut allowed = element::can_delete(permissions);
    for a in answer::find_by_question(conn, step_id)? {
        if !answer::can_delete(conn, permissions, &a)? {
            allowed = false;
        }
    }
    Ok(allowed)
}
