//! Shared test infrastructure for model layer tests.
//!
//! `setup_test_db()` creates a temporary SQLite database with the schema
//! applied. The TempDir must be kept alive for the Connection to remain
//! valid.

use rusqlite::Connection;
use tempfile::TempDir;

use waypoint::auth::session::Permissions;
use waypoint::db::MIGRATIONS;
use waypoint::models::answer::{self, AnswerForm};
use waypoint::models::step::{self, StepForm, StepType};

pub fn setup_test_db() -> (TempDir, Connection) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = dir.path().join("test.db");
    let conn = Connection::open(&db_path).expect("Failed to open test DB");

    conn.execute_batch("PRAGMA foreign_keys=ON; PRAGMA journal_mode=WAL;")
        .expect("Failed to set pragmas");

    conn.execute_batch(MIGRATIONS)
        .expect("Failed to run migrations");

    (dir, conn)
}

/// Permissions of a full tree editor.
pub fn editor_permissions() -> Permissions {
    Permissions::from_csv("trees.manage,trees.delete")
}

pub fn create_question(conn: &Connection, title: &str) -> i64 {
    step::create(
        conn,
        &StepForm {
            title: title.to_string(),
            step_type: StepType::Question,
            content: String::new(),
            hide_title: false,
        },
    )
    .expect("create question step")
}

pub fn create_result(conn: &Connection, title: &str) -> i64 {
    step::create(
        conn,
        &StepForm {
            title: title.to_string(),
            step_type: StepType::Result,
            content: String::new(),
            hide_title: false,
        },
    )
    .expect("create result step")
}

/// Create an answer under `question_id` leading to `resulting_step_id`.
pub fn link_answer(
    conn: &Connection,
    question_id: i64,
    resulting_step_id: Option<i64>,
    title: &str,
) -> i64 {
    answer::create(
        conn,
        &AnswerForm {
            title: title.to_string(),
            question_id,
            resulting_step_id,
            sort: None,
        },
    )
    .expect("create answer")
}
