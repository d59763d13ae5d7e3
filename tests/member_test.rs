//! Integration tests for the member model and the login checks the auth
//! handler performs.

mod common;

use common::setup_test_db;
use waypoint::auth::password;
use waypoint::auth::session::Permissions;
use waypoint::models::member::{self, NewMember};

#[test]
fn create_and_find_member() {
    let (_dir, conn) = setup_test_db();

    let hash = password::hash_password("s3cret").unwrap();
    let id = member::create(
        &conn,
        &NewMember {
            username: "editor".to_string(),
            password_hash: hash,
            permission_codes: "trees.manage".to_string(),
        },
    )
    .unwrap();

    let found = member::find_by_username(&conn, "editor").unwrap().unwrap();
    assert_eq!(found.id, id);
    assert_eq!(found.permission_codes, "trees.manage");

    assert!(member::find_by_username(&conn, "nobody").unwrap().is_none());
}

#[test]
fn login_check_verifies_the_stored_hash() {
    let (_dir, conn) = setup_test_db();

    let hash = password::hash_password("correct horse").unwrap();
    member::create(
        &conn,
        &NewMember {
            username: "alice".to_string(),
            password_hash: hash,
            permission_codes: "trees.manage,trees.delete".to_string(),
        },
    )
    .unwrap();

    let alice = member::find_by_username(&conn, "alice").unwrap().unwrap();
    assert!(password::verify_password("correct horse", &alice.password_hash));
    assert!(!password::verify_password("wrong", &alice.password_hash));

    let perms = Permissions::from_csv(&alice.permission_codes);
    assert!(perms.has("trees.manage"));
    assert!(perms.has("trees.delete"));
}

#[test]
fn duplicate_usernames_are_rejected() {
    let (_dir, conn) = setup_test_db();

    let hash = password::hash_password("pw").unwrap();
    member::create(
        &conn,
        &NewMember {
            username: "bob".to_string(),
            password_hash: hash.clone(),
            permission_codes: String::new(),
        },
    )
    .unwrap();

    let err = member::create(
        &conn,
        &NewMember {
            username: "bob".to_string(),
            password_hash: hash,
            permission_codes: String::new(),
        },
    );
    assert!(err.is_err());
}
