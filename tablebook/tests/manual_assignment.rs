//! Operator-side table assignment tests.

mod common;

use common::{monday, TestStore};
use tablebook::operations::{AssignPlan, BookingRequest, PlanExecutor};
use tablebook::{
    assign_table, create_reservation, set_status, unassign_table, Actor, Config, Database, Error,
    ReservationStatus, TableUnavailableReason, UserId,
};

#[test]
fn test_operator_adds_and_removes_tables() {
    let store = TestStore::new();
    let (restaurant, tables) = store.restaurant_with_tables(&[2, 2, 6]);
    let mut db = store.open();

    let booked = create_reservation(
        &mut db,
        &BookingRequest::new(restaurant, UserId::new(1), monday(), "19:00", 2),
        &Config::default(),
    )
    .unwrap();
    assert_eq!(booked.table_ids(), &[tables[0]]);

    // Any free active table may be added, whatever its size
    assert!(assign_table(&mut db, restaurant, booked.id(), tables[2]).unwrap());
    assert!(!assign_table(&mut db, restaurant, booked.id(), tables[2]).unwrap());

    let stored = Database::get_reservation(db.connection(), booked.id()).unwrap().unwrap();
    assert_eq!(stored.table_ids(), &[tables[0], tables[2]]);

    unassign_table(&mut db, restaurant, booked.id(), tables[0]).unwrap();
    let err = unassign_table(&mut db, restaurant, booked.id(), tables[0]).unwrap_err();
    assert!(matches!(err, Error::AssignmentNotFound { .. }));
}

#[test]
fn test_assigned_table_blocks_other_bookings() {
    let store = TestStore::new();
    let (restaurant, tables) = store.restaurant_with_tables(&[2, 4, 4]);
    let mut db = store.open();
    let config = Config::default();

    let first = create_reservation(
        &mut db,
        &BookingRequest::new(restaurant, UserId::new(1), monday(), "19:00", 2),
        &config,
    )
    .unwrap();
    assign_table(&mut db, restaurant, first.id(), tables[1]).unwrap();

    let second = create_reservation(
        &mut db,
        &BookingRequest::new(restaurant, UserId::new(2), monday(), "20:00", 4),
        &config,
    )
    .unwrap();
    assert_eq!(second.table_ids(), &[tables[2]]);

    let err = create_reservation(
        &mut db,
        &BookingRequest::new(restaurant, UserId::new(3), monday(), "20:00", 4),
        &config,
    )
    .unwrap_err();
    assert!(matches!(err, Error::NoFit { .. }));

    let err = assign_table(&mut db, restaurant, second.id(), tables[1]).unwrap_err();
    assert!(matches!(
        err,
        Error::TableUnavailable {
            reason: TableUnavailableReason::Occupied,
            ..
        }
    ));
    assert!(matches!(
        assign_table(&mut db, restaurant, second.id(), tables[2]),
        Ok(false)
    ));

    set_status(&mut db, first.id(), ReservationStatus::Cancelled, Actor::Restaurant(restaurant)).unwrap();
    assert!(assign_table(&mut db, restaurant, second.id(), tables[1]).unwrap());
}

#[test]
fn test_stale_assign_plan_conflicts() {
    let store = TestStore::new();
    let (restaurant, tables) = store.restaurant_with_tables(&[2, 4]);
    let mut operator = store.open();
    let mut guest_side = store.open();
    let config = Config::default();

    let held = create_reservation(
        &mut operator,
        &BookingRequest::new(restaurant, UserId::new(1), monday(), "19:00", 4),
        &config,
    )
    .unwrap();

    let plan = AssignPlan::new(restaurant, held.id(), tables[0])
        .build_plan(operator.connection())
        .unwrap();

    // The two-top goes to a guest before the operator commits
    create_reservation(
        &mut guest_side,
        &BookingRequest::new(restaurant, UserId::new(2), monday(), "19:30", 2),
        &config,
    )
    .unwrap();

    let err = PlanExecutor::new(&mut operator).execute(&plan).unwrap_err();
    assert!(err.is_conflict());
}

#[test]
fn test_cancelled_reservation_cannot_take_tables() {
    let store = TestStore::new();
    let (restaurant, tables) = store.restaurant_with_tables(&[2]);
    let mut db = store.open();

    let booked = create_reservation(
        &mut db,
        &BookingRequest::new(restaurant, UserId::new(1), monday(), "19:00", 2),
        &Config::default(),
    )
    .unwrap();
    set_status(&mut db, booked.id(), ReservationStatus::Cancelled, Actor::Administrator).unwrap();

    let err = assign_table(&mut db, restaurant, booked.id(), tables[0]).unwrap_err();
    assert!(matches!(err, Error::Forbidden { .. }));
}
