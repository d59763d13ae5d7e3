//! Integration tests for the step model layer.

mod common;

use common::{create_question, create_result, link_answer, setup_test_db};
use waypoint::models::element::{self, ElementForm};
use waypoint::models::step::{self, DEFAULT_RESULT_TITLE, StepForm, StepType};

#[test]
fn create_and_fetch_step() {
    let (_dir, conn) = setup_test_db();

    let id = step::create(
        &conn,
        &StepForm {
            title: "Which plan suits you?".to_string(),
            step_type: StepType::Question,
            content: "<p>Pick one.</p>".to_string(),
            hide_title: false,
        },
    )
    .unwrap();

    let fetched = step::find_by_id(&conn, id).unwrap().unwrap();
    assert_eq!(fetched.title, "Which plan suits you?");
    assert_eq!(fetched.step_type, StepType::Question);
    assert_eq!(fetched.content, "<p>Pick one.</p>");
    assert!(!fetched.hide_title);
    assert!(!fetched.created_at.is_empty());
}

#[test]
fn find_by_id_missing_returns_none() {
    let (_dir, conn) = setup_test_db();
    assert!(step::find_by_id(&conn, 999).unwrap().is_none());
}

#[test]
fn blank_result_title_gets_the_default() {
    let (_dir, conn) = setup_test_db();

    let id = create_result(&conn, "");
    let fetched = step::find_by_id(&conn, id).unwrap().unwrap();
    assert_eq!(fetched.title, DEFAULT_RESULT_TITLE);

    // Blank question titles are left alone
    let q = create_question(&conn, "");
    assert_eq!(step::find_by_id(&conn, q).unwrap().unwrap().title, "");
}

#[test]
fn update_applies_default_result_title_too() {
    let (_dir, conn) = setup_test_db();
    let id = create_question(&conn, "Was a question");

    step::update(
        &conn,
        id,
        &StepForm {
            title: "  ".to_string(),
            step_type: StepType::Result,
            content: String::new(),
            hide_title: true,
        },
    )
    .unwrap();

    let fetched = step::find_by_id(&conn, id).unwrap().unwrap();
    assert_eq!(fetched.title, DEFAULT_RESULT_TITLE);
    assert_eq!(fetched.step_type, StepType::Result);
    assert!(fetched.hide_title);
}

#[test]
fn update_missing_step_is_not_found() {
    let (_dir, conn) = setup_test_db();
    let err = step::update(
        &conn,
        42,
        &StepForm {
            title: "x".to_string(),
            step_type: StepType::Question,
            content: String::new(),
            hide_title: false,
        },
    )
    .unwrap_err();
    assert!(matches!(err, waypoint::errors::AppError::NotFound));
}

#[test]
fn orphans_are_steps_nobody_references() {
    let (_dir, conn) = setup_test_db();

    let orphan = create_question(&conn, "Unreachable");
    let root = create_question(&conn, "Root");
    let child = create_question(&conn, "Child");
    link_answer(&conn, root, Some(child), "go");

    element::create(
        &conn,
        &ElementForm {
            title: "Guide".to_string(),
            first_step_id: Some(root),
        },
    )
    .unwrap();

    let orphans: Vec<i64> = step::find_orphans(&conn).unwrap().iter().map(|s| s.id).collect();
    assert!(orphans.contains(&orphan));
    assert!(!orphans.contains(&root), "element first step is not an orphan");
    assert!(!orphans.contains(&child), "answer target is not an orphan");
}

#[test]
fn initial_steps_exclude_answer_targets_and_results() {
    let (_dir, conn) = setup_test_db();

    let root = create_question(&conn, "Root");
    let child = create_question(&conn, "Child");
    let loose_result = create_result(&conn, "Loose result");
    link_answer(&conn, root, Some(child), "go");

    element::create(
        &conn,
        &ElementForm {
            title: "Guide".to_string(),
            first_step_id: Some(root),
        },
    )
    .unwrap();

    let initial: Vec<i64> = step::find_initial_steps(&conn)
        .unwrap()
        .iter()
        .map(|s| s.id)
        .collect();
    assert!(initial.contains(&root));
    assert!(!initial.contains(&child), "reached through an answer");
    assert!(!initial.contains(&loose_result), "results cannot be roots");
}

#[test]
fn belongs_to_tree_predicates() {
    let (_dir, conn) = setup_test_db();

    let root = create_question(&conn, "Root");
    let child = create_question(&conn, "Child");
    let orphan = create_question(&conn, "Orphan");
    link_answer(&conn, root, Some(child), "go");
    element::create(
        &conn,
        &ElementForm {
            title: "Guide".to_string(),
            first_step_id: Some(root),
        },
    )
    .unwrap();

    assert!(step::belongs_to_element(&conn, root).unwrap());
    assert!(!step::belongs_to_answer(&conn, root).unwrap());
    assert!(step::belongs_to_tree(&conn, root).unwrap());

    assert!(step::belongs_to_answer(&conn, child).unwrap());
    assert!(step::belongs_to_tree(&conn, child).unwrap());

    assert!(!step::belongs_to_tree(&conn, orphan).unwrap());
}

#[test]
fn answer_options_follow_editor_order() {
    let (_dir, conn) = setup_test_db();
    let q = create_question(&conn, "Pick");
    let a1 = link_answer(&conn, q, None, "First");
    let a2 = link_answer(&conn, q, None, "Second");

    let options = step::answer_options(&conn, q).unwrap();
    assert_eq!(
        options,
        vec![(a1, "First".to_string()), (a2, "Second".to_string())]
    );
}

#[test]
fn answer_grid_summary_shows_resulting_titles() {
    let (_dir, conn) = setup_test_db();
    let q = create_question(&conn, "Pick");
    let result = create_result(&conn, "Basic plan");
    link_answer(&conn, q, Some(result), "Cheap");
    link_answer(&conn, q, None, "Undecided");

    let summary = step::answer_grid_summary(&conn, q).unwrap();
    assert_eq!(summary, vec!["Cheap => Basic plan", "Undecided"]);
}
