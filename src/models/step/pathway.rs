//! Pathway reconstruction: walking a step's parent-answer links back to
//! the root of its tree. Each step has at most one parent answer, so every
//! walk is a single-path ascent. The walks are iterative and keep a seen
//! set so a malformed cyclic tree truncates instead of looping forever.

use std::collections::HashSet;

use rusqlite::{Connection, params};

use super::queries::{exists, find_by_id};
use super::types::{PathwayEntry, Step};
use crate::errors::AppError;
use crate::models::answer::{self, Answer};
use crate::models::element;

/// The single answer whose resulting step is this one; lowest id wins if
/// the model is ever violated by duplicates.
pub fn parent_answer(conn: &Connection, step_id: i64) -> Result<Option<Answer>, AppError> {
    let mut stmt = conn.prepare(
        "SELECT id, title, sort, question_id, resulting_step_id, created_at, updated_at \
         FROM answers WHERE resulting_step_id = ?1 ORDER BY id LIMIT 1",
    )?;
    let mut rows = stmt.query_map(params![step_id], answer::queries::row_to_answer)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

/// Answer ids leading to this step, leaf to root.
pub fn answer_pathway(conn: &Connection, step_id: i64) -> Result<Vec<i64>, AppError> {
    let mut ids = Vec::new();
    let mut seen = HashSet::from([step_id]);
    let mut current = step_id;

    while let Some(answer) = parent_answer(conn, current)? {
        ids.push(answer.id);
        let question = answer.question_id;
        if !seen.insert(question) {
            log::warn!("Cyclic parent links at step {question}, truncating pathway");
            break;
        }
        if !exists(conn, question)? {
            break;
        }
        current = question;
    }

    Ok(ids)
}

/// Step ids leading to this step, self first, leaf to root. Reversed, the
/// tree origin comes first.
pub fn question_pathway(conn: &Connection, step_id: i64) -> Result<Vec<i64>, AppError> {
    let mut ids = vec![step_id];
    let mut seen = HashSet::from([step_id]);
    let mut current = step_id;

    while let Some(answer) = parent_answer(conn, current)? {
        let question = answer.question_id;
        if !seen.insert(question) {
            log::warn!("Cyclic parent links at step {question}, truncating pathway");
            break;
        }
        if !exists(conn, question)? {
            break;
        }
        ids.push(question);
        current = question;
    }

    Ok(ids)
}

/// Interleaved question/answer entries leading to this step, leaf to root.
/// The root step contributes only a question entry since it has no parent
/// answer.
pub fn full_pathway(conn: &Connection, step_id: i64) -> Result<Vec<PathwayEntry>, AppError> {
    let mut path = Vec::new();
    let mut seen = HashSet::from([step_id]);
    let mut current = step_id;

    loop {
        match parent_answer(conn, current)? {
            Some(answer) => {
                path.push(PathwayEntry::Question(current));
                path.push(PathwayEntry::Answer(answer.id));
                let question = answer.question_id;
                if !seen.insert(question) {
                    log::warn!("Cyclic parent links at step {question}, truncating pathway");
                    break;
                }
                if !exists(conn, question)? {
                    break;
                }
                current = question;
            }
            None => {
                path.push(PathwayEntry::Question(current));
                break;
            }
        }
    }

    Ok(path)
}

/// The root step of the tree this step belongs to: the last entry of the
/// leaf-to-root question pathway, loaded.
pub fn tree_origin(conn: &Connection, step_id: i64) -> Result<Option<Step>, AppError> {
    let pathway = question_pathway(conn, step_id)?;
    match pathway.last() {
        Some(&root_id) => find_by_id(conn, root_id),
        None => Ok(None),
    }
}

/// 1-based position of this step among the question entries of the
/// root-to-leaf pathway, for numbering steps on the front end. 0 when the
/// step is not found, which a well-formed tree never produces.
pub fn position_in_pathway(conn: &Connection, step_id: i64) -> Result<i64, AppError> {
    let pathway = full_pathway(conn, step_id)?;
    let position = pathway
        .iter()
        .rev()
        .filter_map(|entry| match entry {
            PathwayEntry::Question(id) => Some(*id),
            PathwayEntry::Answer(_) => None,
        })
        .position(|id| id == step_id);

    Ok(match position {
        Some(pos) => pos as i64 + 1,
        None => 0,
    })
}

/// Per-hop edit URL fragment for this step: the root-to-leaf pathway with
/// the origin question dropped, answers as `/answers/{id}` and questions
/// as `/steps/{id}`.
pub fn edit_path(conn: &Connection, step_id: i64) -> Result<String, AppError> {
    let pathway = full_pathway(conn, step_id)?;

    // Skip the first question entry specifically, not the first entry: a
    // truncated pathway from a dangling parent link starts on an answer,
    // and that hop must survive.
    let mut url = String::new();
    let mut origin_skipped = false;
    for entry in pathway.iter().rev() {
        match entry {
            PathwayEntry::Question(id) => {
                if !origin_skipped {
                    origin_skipped = true;
                    continue;
                }
                url.push_str(&format!("/steps/{id}"));
            }
            PathwayEntry::Answer(id) => url.push_str(&format!("/answers/{id}")),
        }
    }

    Ok(url)
}

/// Deep link for editing this step: the owning element's first-step edit
/// URL joined with the per-hop fragment. None when the tree origin is not
/// attached to an element.
pub fn edit_link(conn: &Connection, step_id: i64) -> Result<Option<String>, AppError> {
    let origin = match tree_origin(conn, step_id)? {
        Some(origin) => origin,
        None => return Ok(None),
    };
    let root_element = match element::find_by_first_step(conn, origin.id)? {
        Some(el) => el,
        None => return Ok(None),
    };

    let base = element::edit_first_step_link(&root_element);
    Ok(Some(format!("{}{}", base, edit_path(conn, step_id)?)))
}
