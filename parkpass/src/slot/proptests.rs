//! Property-based tests for slot allocation.
//!
//! Random sequences of allocator calls are applied to a store and to a
//! plain in-memory model; after every step the stored statuses must match
//! the model.

use std::collections::BTreeMap;

use proptest::prelude::*;

use crate::database::test_util::{create_test_database, seed_slot};
use crate::database::Database;
use crate::error::Error;
use crate::slot::{Role, SlotCode, SlotStatus, SlotType};

const CODES: [&str; 4] = ["P0", "P1", "P2", "P3"];

#[derive(Debug, Clone, Copy)]
enum Step {
    Reserve(usize),
    Free(usize),
    Reallocate(usize),
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0..CODES.len()).prop_map(Step::Reserve),
        (0..CODES.len()).prop_map(Step::Free),
        (0..CODES.len()).prop_map(Step::Reallocate),
    ]
}

fn code(i: usize) -> SlotCode {
    SlotCode::new(CODES[i]).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Reserve succeeds exactly when the slot is AVAILABLE; free always
    /// lands on AVAILABLE; reallocate either moves to the lowest other
    /// AVAILABLE code or changes nothing.
    #[test]
    fn prop_allocator_matches_model(steps in prop::collection::vec(step_strategy(), 1..24)) {
        let mut db = create_test_database();
        let mut model: BTreeMap<&str, SlotStatus> = BTreeMap::new();
        for c in CODES {
            seed_slot(&mut db, c, SlotType::Car, Role::Employee, None);
            model.insert(c, SlotStatus::Available);
        }

        for step in steps {
            match step {
                Step::Reserve(i) => {
                    let was = model[CODES[i]];
                    let result = db.reserve_slot(&code(i));
                    if was == SlotStatus::Available {
                        prop_assert!(result.is_ok());
                        model.insert(CODES[i], SlotStatus::Reserved);
                    } else {
                        let is_unavailable = matches!(result, Err(Error::SlotUnavailable { .. }));
                        prop_assert!(is_unavailable);
                    }
                }
                Step::Free(i) => {
                    db.free_slot(&code(i)).unwrap();
                    model.insert(CODES[i], SlotStatus::Available);
                }
                Step::Reallocate(i) => {
                    let expected = model
                        .iter()
                        .find(|(c, s)| **c != CODES[i] && **s == SlotStatus::Available)
                        .map(|(c, _)| *c);
                    let result = db.reallocate_slot(&code(i)).unwrap();
                    prop_assert_eq!(result.as_ref().map(|s| s.code.as_str()), expected);
                    if let Some(alt) = expected {
                        model.insert(CODES[i], SlotStatus::Freed);
                        model.insert(alt, SlotStatus::Reserved);
                    }
                }
            }

            for (c, status) in &model {
                let stored = Database::require_slot(db.connection(), &SlotCode::new(c).unwrap())
                    .unwrap()
                    .status;
                prop_assert_eq!(stored, *status);
            }
        }
    }

    /// Arbitrary text either becomes a trimmed code of bounded length or is rejected.
    #[test]
    fn prop_slot_code_normalized(raw in "\\PC{0,14}") {
        match SlotCode::new(&raw) {
            Ok(c) => {
                prop_assert_eq!(c.as_str(), raw.trim());
                prop_assert!(!c.as_str().is_empty());
                prop_assert!(c.as_str().chars().count() <= SlotCode::MAX_LEN);
            }
            Err(_) => {
                let t = raw.trim();
                prop_assert!(t.is_empty() || t.chars().count() > SlotCode::MAX_LEN);
            }
        }
    }
}
