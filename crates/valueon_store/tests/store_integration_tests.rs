//! Integration tests for file-backed sessions.

use std::fs;
use tempfile::tempdir;

use serde_json::json;
use valueon_core::{default_inputs, InputAction};
use valueon_store::{
    snapshot::envelope_value, JsonFileStore, Session, SnapshotStore, StoreConfig,
};

fn store_in(dir: &std::path::Path) -> JsonFileStore {
    JsonFileStore::new(&StoreConfig::default().with_data_dir(dir))
}

/// Edits made in one session are visible when the next one opens.
#[test]
fn test_session_survives_restart() {
    let temp = tempdir().unwrap();

    let mut session = Session::open(store_in(temp.path()));
    session.dispatch(InputAction::SetUnitTypeTotalUnits {
        unit_type_id: "u1".into(),
        total: 100,
    });
    session.dispatch(InputAction::SetAllocationCount {
        allocation_id: "a1".into(),
        count: 60,
    });
    let expected = session.inputs().clone();
    let path = session.store().path().to_path_buf();
    assert!(path.ends_with("valueon-calculator-data-v7.json"));
    assert!(path.exists());

    let reopened = Session::open(store_in(temp.path()));
    assert_eq!(reopened.inputs(), &expected);
    assert_eq!(reopened.inputs().allocation("a3").unwrap().count, 20);
}

/// Reset removes the file and a fresh session starts from defaults.
#[test]
fn test_reset_forgets_saved_data() {
    let temp = tempdir().unwrap();

    let mut session = Session::open(store_in(temp.path()));
    session.dispatch(InputAction::SetAdvancedMode(true));
    assert!(session.store().path().exists());

    session.reset();
    assert!(!session.store().path().exists());
    assert_eq!(Session::open(store_in(temp.path())).inputs(), &default_inputs());
}

/// Snapshots written by the browser client restore on top of defaults.
#[test]
fn test_restores_partial_client_document() {
    let temp = tempdir().unwrap();
    let store = store_in(temp.path());
    let document = json!({
        "projectTarget": {"totalLandArea": 4000, "totalFloorArea": 15000, "totalHouseholds": 300},
        "unitTypes": [
            {"id": "u1", "totalUnits": 100},
            {"id": "u3", "name": "Retail", "supplyArea": 12, "category": "RETAIL"}
        ],
        "unitAllocations": [{"id": "a5", "targetPricePerPyung": "4000만"}]
    });
    store.save_raw(&document.to_string()).unwrap();

    let session = Session::open(store);
    let inputs = session.inputs();
    assert_eq!(inputs.project_target.total_land_area, 4_000.0);
    assert_eq!(inputs.unit_types.len(), 3);
    assert_eq!(inputs.unit_type("u1").unwrap().supply_area, 25.0);
    assert_eq!(inputs.unit_type("u1").unwrap().total_units, Some(100));
    assert_eq!(
        inputs.allocation("a5").unwrap().target_price_per_pyung,
        Some(40_000_000.0)
    );
    assert_eq!(inputs.advanced_categories, default_inputs().advanced_categories);
    assert!(session.result().total_project_cost > 0.0);
}

/// A corrupt file does not prevent the session from opening, and the next
/// edit overwrites it.
#[test]
fn test_corrupt_file_is_replaced() {
    let temp = tempdir().unwrap();
    let store = store_in(temp.path());
    fs::create_dir_all(temp.path()).unwrap();
    fs::write(store.path(), "{ truncated").unwrap();

    let mut session = Session::open(store);
    assert_eq!(session.inputs(), &default_inputs());

    session.dispatch(InputAction::SetInitialPayment(1.0));
    let content = fs::read_to_string(session.store().path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value["version"], 1);
    assert_eq!(value["inputs"]["initialPayment"], 1.0);
}

/// Envelopes with extra metadata load the same as bare documents.
#[test]
fn test_envelope_and_bare_documents_agree() {
    let temp = tempdir().unwrap();
    let inputs = json!({"isAdvancedMode": true, "initialPayment": 7});

    let bare = JsonFileStore::at(temp.path().join("bare.json"));
    bare.save_raw(&inputs.to_string()).unwrap();
    let wrapped = JsonFileStore::at(temp.path().join("wrapped.json"));
    wrapped.save_raw(&envelope_value(inputs).to_string()).unwrap();

    assert_eq!(
        Session::open(bare).inputs(),
        Session::open(wrapped).inputs()
    );
}
