//! Concurrency tests: many connections racing for the same slots.
//!
//! Each thread opens its own connection to a shared database file, the way
//! separate CLI processes would.

mod common;

use std::path::Path;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use common::database::{add_slot, create_database_file};
use common::{code, RequestFixture};
use parkpass::database::PassFilter;
use parkpass::operations::{run, CreatePassPlan};
use parkpass::{Database, DatabaseConfig, Error, Role, SlotStatus, SlotType};

fn open(path: &Path) -> Database {
    Database::open(DatabaseConfig::new(path).with_busy_timeout(Duration::from_secs(30))).unwrap()
}

#[test]
fn test_single_slot_has_exactly_one_winner() {
    let dir = tempfile::tempdir().unwrap();
    let path = create_database_file(dir.path());
    add_slot(&mut open(&path), "A1", SlotType::Car, Role::Guest, None);

    let threads = 8;
    let barrier = Arc::new(Barrier::new(threads));
    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let path = path.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let mut db = open(&path);
                barrier.wait();
                db.reserve_slot(&code("A1"))
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let winners = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1);
    for result in results.iter().filter(|r| r.is_err()) {
        assert!(matches!(result, Err(Error::SlotUnavailable { .. })));
    }
}

#[test]
fn test_concurrent_creates_issue_one_pass_per_slot() {
    let dir = tempfile::tempdir().unwrap();
    let path = create_database_file(dir.path());
    {
        let mut db = open(&path);
        for s in ["A1", "A2", "A3"] {
            add_slot(&mut db, s, SlotType::Car, Role::Visitor, None);
        }
    }

    // Twelve requests over three slots, four per slot
    let threads = 12;
    let barrier = Arc::new(Barrier::new(threads));
    let handles: Vec<_> = (0..threads)
        .map(|i| {
            let path = path.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let mut db = open(&path);
                let slot = ["A1", "A2", "A3"][i % 3];
                let request = RequestFixture::new(slot).with_name(&format!("Holder {i}")).build();
                barrier.wait();
                run(&mut db, &CreatePassPlan::new(request), false)
            })
        })
        .collect();

    let successes = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(Result::is_ok)
        .count();
    assert_eq!(successes, 3);

    let db = open(&path);
    let passes = Database::list_passes(db.connection(), &PassFilter::new()).unwrap();
    assert_eq!(passes.len(), 3);
    let mut codes: Vec<_> = passes.iter().map(|p| p.slot_code.to_string()).collect();
    codes.sort();
    assert_eq!(codes, vec!["A1", "A2", "A3"]);
    for s in ["A1", "A2", "A3"] {
        let slot = Database::require_slot(db.connection(), &code(s)).unwrap();
        assert_eq!(slot.status, SlotStatus::Reserved);
    }
}

#[test]
fn test_reserve_free_churn_stays_consistent() {
    let dir = tempfile::tempdir().unwrap();
    let path = create_database_file(dir.path());
    add_slot(&mut open(&path), "B1", SlotType::Bike, Role::Guest, None);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let path = path.clone();
            thread::spawn(move || {
                let mut db = open(&path);
                let mut won = 0;
                for _ in 0..20 {
                    if db.reserve_slot(&code("B1")).is_ok() {
                        won += 1;
                        db.free_slot(&code("B1")).unwrap();
                    }
                }
                won
            })
        })
        .collect();

    let total: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert!(total >= 1);

    let db = open(&path);
    let slot = Database::require_slot(db.connection(), &code("B1")).unwrap();
    assert_eq!(slot.status, SlotStatus::Available);
}
