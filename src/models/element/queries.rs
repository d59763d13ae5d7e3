use rusqlite::{Connection, params};

use super::types::*;
use crate::auth::session::Permissions;
use crate::db::timestamp;
use crate::errors::AppError;
use crate::models::step;

/// Permission code for creating and editing tree content.
pub const MANAGE_CODE: &str = "trees.manage";
/// Permission code for deleting tree content.
pub const DELETE_CODE: &str = "trees.delete";

fn row_to_element(row: &rusqlite::Row) -> rusqlite::Result<Element> {
    Ok(Element {
        id: row.get("id")?,
        title: row.get("title")?,
        first_step_id: row.get("first_step_id")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

const ELEMENT_COLUMNS: &str = "id, title, first_step_id, created_at, updated_at";

pub fn create(conn: &Connection, form: &ElementForm) -> Result<i64, AppError> {
    if let Some(step_id) = form.first_step_id {
        if !step::exists(conn, step_id)? {
            return Err(AppError::Validation(format!(
                "First step {step_id} does not exist"
            )));
        }
    }

    conn.execute(
        "INSERT INTO elements (title, first_step_id) VALUES (?1, ?2)",
        params![form.title, form.first_step_id],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Element>, AppError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {ELEMENT_COLUMNS} FROM elements WHERE id = ?1"
    ))?;
    let mut rows = stmt.query_map(params![id], row_to_element)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

pub fn find_all(conn: &Connection) -> Result<Vec<Element>, AppError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {ELEMENT_COLUMNS} FROM elements ORDER BY id"
    ))?;
    let rows = stmt.query_map([], row_to_element)?.collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// The element whose tree starts at the given step, if any. The model
/// allows at most one.
pub fn find_by_first_step(conn: &Connection, step_id: i64) -> Result<Option<Element>, AppError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {ELEMENT_COLUMNS} FROM elements WHERE first_step_id = ?1 ORDER BY id LIMIT 1"
    ))?;
    let mut rows = stmt.query_map(params![step_id], row_to_element)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

pub fn update(conn: &Connection, id: i64, form: &ElementForm) -> Result<(), AppError> {
    if let Some(step_id) = form.first_step_id {
        if !step::exists(conn, step_id)? {
            return Err(AppError::Validation(format!(
                "First step {step_id} does not exist"
            )));
        }
    }

    let updated = conn.execute(
        "UPDATE elements SET title = ?1, first_step_id = ?2, updated_at = ?3 WHERE id = ?4",
        params![form.title, form.first_step_id, timestamp(), id],
    )?;
    if updated == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

pub fn delete(conn: &Connection, id: i64) -> Result<(), AppError> {
    let deleted = conn.execute("DELETE FROM elements WHERE id = ?1", params![id])?;
    if deleted == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

pub fn first_step(conn: &Connection, element: &Element) -> Result<Option<step::Step>, AppError> {
    match element.first_step_id {
        Some(step_id) => step::find_by_id(conn, step_id),
        None => Ok(None),
    }
}

/// Edit URL for the element's first step; pathway deep links are built on
/// top of this.
pub fn edit_first_step_link(element: &Element) -> String {
    format!("/elements/{}/first-step", element.id)
}

/// Steps and answers delegate their create/view/edit checks here.
pub fn can_create(permissions: &Permissions) -> bool {
    permissions.has(MANAGE_CODE)
}

pub fn can_delete(permissions: &Permissions) -> bool {
    permissions.has(DELETE_CODE)
}
