use cotizador::core::StoreRecovery;
use cotizador::{Client, LineItem, QuotationStore};
use rust_decimal::Decimal;
use std::fs;
use std::str::FromStr;
use tempfile::TempDir;

fn sample_client(name: &str) -> Client {
    Client {
        name: name.to_string(),
        tax_id: "20123456789".to_string(),
        phone: "999999999".to_string(),
        email: "juan@x.com".to_string(),
        address: "Lima".to_string(),
    }
}

fn sample_items() -> Vec<LineItem> {
    vec![LineItem {
        description: "Plancha inox 2mm".to_string(),
        unit_price: Decimal::from_str("150.00").unwrap(),
        quantity: 3,
    }]
}

#[test]
fn test_load_missing_file_returns_empty_store() {
    let temp_dir = TempDir::new().unwrap();
    let store = QuotationStore::new(temp_dir.path().join("cotizaciones.json"));

    let loaded = store.load().unwrap();
    assert!(loaded.quotations.is_empty());
    assert_eq!(loaded.recovery, Some(StoreRecovery::MissingFile));
}

#[test]
fn test_load_malformed_file_returns_empty_store() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("cotizaciones.json");
    fs::write(&path, "{ this is not a quotation list").unwrap();

    let store = QuotationStore::new(&path);
    let loaded = store.load().unwrap();
    assert!(loaded.quotations.is_empty());
    assert!(matches!(
        loaded.recovery,
        Some(StoreRecovery::CorruptFile { .. })
    ));
}

#[test]
fn test_single_object_file_is_treated_as_corrupt() {
    // The store file must always hold a sequence, never a single object.
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("cotizaciones.json");
    fs::write(&path, r#"{"id": 1}"#).unwrap();

    let store = QuotationStore::new(&path);
    let loaded = store.load().unwrap();
    assert!(loaded.quotations.is_empty());
    assert!(matches!(
        loaded.recovery,
        Some(StoreRecovery::CorruptFile { .. })
    ));
}

#[test]
fn test_sequential_ids_from_empty_store() {
    let temp_dir = TempDir::new().unwrap();
    let store = QuotationStore::new(temp_dir.path().join("cotizaciones.json"));

    for expected_id in 1..=4u64 {
        let quotation = store
            .append_and_persist(sample_client("Juan Perez"), sample_items())
            .unwrap();
        assert_eq!(quotation.id, expected_id);
    }

    let loaded = store.load().unwrap();
    assert_eq!(loaded.quotations.len(), 4);
    let ids: Vec<u64> = loaded.quotations.iter().map(|q| q.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
}

#[test]
fn test_append_to_existing_store_continues_numbering() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("cotizaciones.json");

    {
        let store = QuotationStore::new(&path);
        for _ in 0..3 {
            store
                .append_and_persist(sample_client("Juan Perez"), sample_items())
                .unwrap();
        }
    }

    // A fresh store instance over the same file keeps counting.
    let store = QuotationStore::new(&path);
    let quotation = store
        .append_and_persist(sample_client("Maria Diaz"), sample_items())
        .unwrap();
    assert_eq!(quotation.id, 4);
}

#[test]
fn test_save_load_round_trip_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("cotizaciones.json");
    let store = QuotationStore::new(&path);

    store
        .append_and_persist(sample_client("Juan Perez"), sample_items())
        .unwrap();
    store
        .append_and_persist(sample_client("Maria Diaz"), sample_items())
        .unwrap();

    let first = store.load().unwrap();
    store.save(&first.quotations).unwrap();
    let after_first = fs::read_to_string(&path).unwrap();

    let second = store.load().unwrap();
    store.save(&second.quotations).unwrap();
    let after_second = fs::read_to_string(&path).unwrap();

    assert_eq!(after_first, after_second);
}

#[test]
fn test_persisted_record_round_trips_without_loss() {
    let temp_dir = TempDir::new().unwrap();
    let store = QuotationStore::new(temp_dir.path().join("cotizaciones.json"));

    let created = store
        .append_and_persist(sample_client("Juan Perez"), sample_items())
        .unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(loaded.quotations.len(), 1);
    assert_eq!(loaded.quotations[0], created);
    assert!(loaded.quotations[0].date.is_some());
    assert_eq!(
        loaded.quotations[0].items[0].unit_price,
        Decimal::from_str("150.00").unwrap()
    );
}

#[test]
fn test_store_file_is_pretty_printed_sequence() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("cotizaciones.json");
    let store = QuotationStore::new(&path);

    store
        .append_and_persist(sample_client("Juan Perez"), sample_items())
        .unwrap();

    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.trim_start().starts_with('['));
    assert!(raw.contains('\n'), "expected human-readable formatting");
    assert!(raw.contains("Plancha inox 2mm"));
}
