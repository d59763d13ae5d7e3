use rusqlite::{Connection, params};

use super::types::*;
use crate::errors::AppError;

fn row_to_member(row: &rusqlite::Row) -> rusqlite::Result<Member> {
    Ok(Member {
        id: row.get("id")?,
        username: row.get("username")?,
        password_hash: row.get("password_hash")?,
        permission_codes: row.get("permission_codes")?,
        created_at: row.get("created_at")?,
    })
}

pub fn create(conn: &Connection, member: &NewMember) -> Result<i64, AppError> {
    conn.execute(
        "INSERT INTO members (username, password_hash, permission_codes) \
         VALUES (?1, ?2, ?3)",
        params![member.username, member.password_hash, member.permission_codes],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn find_by_username(conn: &Connection, username: &str) -> Result<Option<Member>, AppError> {
    let mut stmt = conn.prepare(
        "SELECT id, username, password_hash, permission_codes, created_at \
         FROM members WHERE username = ?1",
    )?;
    let mut rows = stmt.query_map(params![username], row_to_member)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}
