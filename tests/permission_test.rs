//! Integration tests for permission delegation: steps and answers defer
//! to the element-level codes.

mod common;

use common::{create_question, link_answer, setup_test_db};
use waypoint::auth::session::Permissions;
use waypoint::models::{answer, element, step};

#[test]
fn permissions_parse_from_csv() {
    let perms = Permissions::from_csv(" trees.manage , trees.delete ,");
    assert!(perms.has("trees.manage"));
    assert!(perms.has("trees.delete"));
    assert!(!perms.has("users.list"));

    let empty = Permissions::from_csv("");
    assert!(empty.0.is_empty());
}

#[test]
fn step_checks_delegate_to_element_manage_code() {
    let manage = Permissions::from_csv("trees.manage");
    let none = Permissions::default();

    assert!(element::can_create(&manage));
    assert!(step::can_create(&manage));
    assert!(step::can_view(&manage));
    assert!(step::can_edit(&manage));

    assert!(!step::can_create(&none));
    assert!(!step::can_view(&none));
    assert!(!step::can_edit(&none));
}

#[test]
fn delete_needs_its_own_code() {
    let manage_only = Permissions::from_csv("trees.manage");
    let deleter = Permissions::from_csv("trees.delete");

    assert!(!element::can_delete(&manage_only));
    assert!(element::can_delete(&deleter));
}

#[test]
fn answer_delete_combines_permission_and_dependency() {
    let (_dir, conn) = setup_test_db();
    let q = create_question(&conn, "Q");
    let next = create_question(&conn, "Next");
    let leaf = link_answer(&conn, q, None, "leaf");
    let deep = link_answer(&conn, q, Some(next), "deep");

    let deleter = Permissions::from_csv("trees.delete");
    let nobody = Permissions::default();

    let leaf = answer::find_by_id(&conn, leaf).unwrap().unwrap();
    let deep = answer::find_by_id(&conn, deep).unwrap().unwrap();

    assert!(answer::can_delete(&conn, &deleter, &leaf).unwrap());
    assert!(!answer::can_delete(&conn, &deleter, &deep).unwrap());
    assert!(!answer::can_delete(&conn, &nobody, &leaf).unwrap());
}
