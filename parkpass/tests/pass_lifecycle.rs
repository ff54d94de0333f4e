//! End-to-end tests of the pass lifecycle against a real database.

mod common;

use common::database::{add_slot, create_test_database};
use common::{code, RequestFixture};
use parkpass::database::PassFilter;
use parkpass::operations::{
    decide_extensions, pass_status, run, ApproveExtensionPlan, CancelPassPlan, CreatePassPlan,
    ExtensionDecision, MarkArrivedPlan, PassSelection, RejectExtensionPlan, RequestExtensionPlan,
};
use parkpass::{Database, ErrorKind, PassId, PassStatus, PassType, Role, SlotStatus, SlotType};

fn issue(db: &mut Database, slot: &str) -> PassId {
    run(db, &CreatePassPlan::new(RequestFixture::new(slot).build()), false)
        .unwrap()
        .pass_id
        .unwrap()
}

fn slot_status(db: &Database, s: &str) -> SlotStatus {
    Database::require_slot(db.connection(), &code(s)).unwrap().status
}

#[test]
fn test_full_lifecycle_with_reallocation() {
    let mut db = create_test_database();
    add_slot(&mut db, "A1", SlotType::Car, Role::Visitor, Some("L1"));
    add_slot(&mut db, "A2", SlotType::Car, Role::Visitor, Some("L1"));

    let id = issue(&mut db, "A1");
    assert_eq!(slot_status(&db, "A1"), SlotStatus::Reserved);

    run(&mut db, &MarkArrivedPlan::new(id), false).unwrap();
    run(&mut db, &RequestExtensionPlan::new(id), false).unwrap();
    let pass = pass_status(db.connection(), id).unwrap();
    assert_eq!(pass.status, PassStatus::PendingExtension);
    assert!(pass.arrived);
    assert!(pass.extension_requested);

    let result = run(&mut db, &ApproveExtensionPlan::new(id), false).unwrap();
    let moved = result.reallocation.unwrap();
    assert_eq!(moved.to, code("A2"));

    let pass = pass_status(db.connection(), id).unwrap();
    assert_eq!(pass.status, PassStatus::Extended);
    assert_eq!(pass.slot_code, code("A2"));
    assert!(!pass.extension_requested);
    assert_eq!(slot_status(&db, "A1"), SlotStatus::Freed);
    assert_eq!(slot_status(&db, "A2"), SlotStatus::Reserved);
}

#[test]
fn test_cancel_returns_slot_to_pool() {
    let mut db = create_test_database();
    add_slot(&mut db, "B1", SlotType::Bike, Role::Visitor, None);

    let id = issue(&mut db, "B1");
    assert!(db.get_available_slot(SlotType::Bike, Role::Visitor, None).unwrap().is_none());

    run(&mut db, &CancelPassPlan::new(id), false).unwrap();
    assert_eq!(pass_status(db.connection(), id).unwrap().status, PassStatus::Cancelled);
    let offered = db.get_available_slot(SlotType::Bike, Role::Visitor, None).unwrap().unwrap();
    assert_eq!(offered.code, code("B1"));

    // A second pass can now take the slot
    let second = issue(&mut db, "B1");
    assert_ne!(second, id);
}

#[test]
fn test_rejected_pass_can_request_again() {
    let mut db = create_test_database();
    add_slot(&mut db, "A1", SlotType::Car, Role::Visitor, None);
    let id = issue(&mut db, "A1");

    run(&mut db, &RequestExtensionPlan::new(id), false).unwrap();
    run(&mut db, &RejectExtensionPlan::new(id), false).unwrap();
    assert_eq!(pass_status(db.connection(), id).unwrap().status, PassStatus::Active);

    run(&mut db, &RequestExtensionPlan::new(id), false).unwrap();
    assert_eq!(
        pass_status(db.connection(), id).unwrap().status,
        PassStatus::PendingExtension
    );
}

#[test]
fn test_terminal_passes_refuse_operations() {
    let mut db = create_test_database();
    add_slot(&mut db, "A1", SlotType::Car, Role::Visitor, None);
    let id = issue(&mut db, "A1");
    run(&mut db, &CancelPassPlan::new(id), false).unwrap();

    let err = run(&mut db, &RequestExtensionPlan::new(id), false).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    let err = run(&mut db, &CancelPassPlan::new(id), false).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    let err = run(&mut db, &ApproveExtensionPlan::new(id), false).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[test]
fn test_extended_pass_cannot_be_cancelled() {
    let mut db = create_test_database();
    add_slot(&mut db, "A1", SlotType::Car, Role::Visitor, None);
    let id = issue(&mut db, "A1");
    run(&mut db, &RequestExtensionPlan::new(id), false).unwrap();
    run(&mut db, &ApproveExtensionPlan::new(id), false).unwrap();

    let err = run(&mut db, &CancelPassPlan::new(id), false).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(slot_status(&db, "A1"), SlotStatus::Reserved);
}

#[test]
fn test_bulk_approval_mixed_selection() {
    let mut db = create_test_database();
    for s in ["A1", "A2", "A3", "A4"] {
        add_slot(&mut db, s, SlotType::Car, Role::Visitor, None);
    }
    let a = issue(&mut db, "A1");
    let b = issue(&mut db, "A2");
    run(&mut db, &RequestExtensionPlan::new(a), false).unwrap();

    let selection = PassSelection::Ids(vec![a, b, PassId::new(404).unwrap()]);
    let outcome = decide_extensions(&mut db, ExtensionDecision::Approve, &selection, false).unwrap();

    assert_eq!(outcome.decided, vec![a]);
    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.missing.len(), 1);
    assert_eq!(outcome.rebound.len(), 1);
    assert_eq!(pass_status(db.connection(), b).unwrap().status, PassStatus::Active);
}

#[test]
fn test_list_passes_filters() {
    let mut db = create_test_database();
    add_slot(&mut db, "A1", SlotType::Car, Role::Visitor, None);
    add_slot(&mut db, "E1", SlotType::Car, Role::Employee, None);

    run(
        &mut db,
        &CreatePassPlan::new(RequestFixture::new("A1").with_name("Grace Hopper").build()),
        false,
    )
    .unwrap();
    run(
        &mut db,
        &CreatePassPlan::new(
            RequestFixture::new("E1")
                .with_role(Role::Employee)
                .with_pass_type(PassType::Monthly)
                .build(),
        ),
        false,
    )
    .unwrap();

    let conn = db.connection();
    let all = Database::list_passes(conn, &PassFilter::new()).unwrap();
    assert_eq!(all.len(), 2);

    let employees =
        Database::list_passes(conn, &PassFilter::new().with_role(Some(Role::Employee))).unwrap();
    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0].pass_type, PassType::Monthly);

    let grace =
        Database::list_passes(conn, &PassFilter::new().with_search(Some("hopper".into()))).unwrap();
    assert_eq!(grace.len(), 1);
    assert_eq!(grace[0].slot_code, code("A1"));
}

#[test]
fn test_failed_create_leaves_no_trace() {
    let mut db = create_test_database();
    add_slot(&mut db, "A1", SlotType::Car, Role::Visitor, None);
    issue(&mut db, "A1");

    let err = run(&mut db, &CreatePassPlan::new(RequestFixture::new("A1").build()), false)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(
        Database::list_passes(db.connection(), &PassFilter::new()).unwrap().len(),
        1
    );
}
