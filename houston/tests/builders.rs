mod common;

use common::{RecordingSink, init_test_logging};
use houston::{
    CatalogEntry, CatalogOptions, CustomOptions, ErrorChannel, ErrorRecord, Houston, NoopSink,
    clean_record, validate_field,
};
use serde_json::{Value, json};
use std::sync::Arc;

fn recording() -> (Houston, Arc<RecordingSink>) {
    init_test_logging();
    let sink = Arc::new(RecordingSink::default());
    let houston = Houston::with_sink(ErrorChannel::new(), sink.clone());
    (houston, sink)
}

#[test]
fn catalog_record_has_exact_shape() {
    let (houston, sink) = recording();
    test_log!("TEST: catalog builder with message override");

    let entry = CatalogEntry::new(404, "NOT_FOUND").with_name("NOT_FOUND");
    let record = houston.from_catalog(&entry, CatalogOptions::new().message("missing"));

    assert_eq!(
        Value::from(record.clone()),
        json!({
            "code": 404,
            "category": "NOT_FOUND",
            "name": "NOT_FOUND",
            "message": "missing"
        })
    );
    assert_eq!(sink.records(), vec![record]);
}

#[test]
fn catalog_record_drops_numeric_data() {
    let (houston, _sink) = recording();

    let entry = CatalogEntry::new(404, "NOT_FOUND");
    let record = houston.from_catalog(&entry, CatalogOptions::new().data(42));

    assert!(record.data().is_none());
    assert_eq!(record.len(), 2);
}

#[test]
fn custom_record_from_defaults_has_no_code() {
    let (houston, _sink) = recording();

    let record = houston.custom(CustomOptions::default());

    assert!(record.code().is_none());
    assert!(record.len() <= 2);
    assert!(record.iter().all(|(_, v)| v.is_string()));
    assert_eq!(record.category(), Some("Internal Server Error"));
    assert_eq!(record.name(), Some("INTERNAL_SERVER_ERROR"));
}

#[test]
fn builders_never_fail_on_hostile_inputs() {
    let houston = Houston::with_sink(ErrorChannel::new(), Arc::new(NoopSink));
    let inputs = [
        Value::Null,
        json!(0),
        json!(-1),
        json!(f64::MAX),
        json!(true),
        json!(""),
        json!([]),
        json!({}),
        json!([null, { "deep": [1, 2, { "x": null }] }]),
    ];

    for input in inputs {
        let custom = houston.custom(
            CustomOptions::new()
                .code(input.clone())
                .error(input.clone())
                .name(input.clone())
                .message(input.clone())
                .data(input.clone()),
        );
        assert_eq!(custom.len(), if validate_field(&input) { 5 } else { 0 });

        let entry = CatalogEntry::default();
        let catalog = houston.from_catalog(
            &entry,
            CatalogOptions::new().message(input.clone()).data(input.clone()),
        );
        assert!(catalog.iter().all(|(_, v)| !v.is_null()));
    }
}

#[test]
fn builder_results_are_already_clean() {
    let (houston, _sink) = recording();

    let record = houston.custom(CustomOptions::new().message("m").data(json!({ "a": 1 })));
    assert_eq!(clean_record(record.clone()), record);
}

#[test]
fn passthrough_logs_and_returns_the_same_record() {
    let (houston, sink) = recording();

    let original = ErrorRecord::new()
        .with("code", "E1")
        .with("category", Value::Null)
        .with("anything", json!([1, 2, 3]));
    let returned = houston.passthrough(original.clone());

    assert_eq!(returned, original);
    assert_eq!(sink.records(), vec![original]);
}

#[test]
fn records_loaded_from_json_can_be_cleaned() {
    let raw = r#"{ "code": 401, "category": "Unauthorized", "name": null, "data": null }"#;
    let record: ErrorRecord = serde_json::from_str(raw).expect("valid record json");

    let cleaned = record.clean();
    assert_eq!(
        Value::from(cleaned),
        json!({ "code": 401, "category": "Unauthorized" })
    );
}
