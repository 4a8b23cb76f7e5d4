#![allow(clippy::unwrap_used, clippy::expect_used)]

use chrono::NaiveDate;
use modelver_core::{Element, ElementKind, ExErrorKind, ModelContents, ModelKind};
use modelver_store::change_record;
use modelver_store::{find_latest, load, NamingStyle, SnapshotWriter, StoreConfig, WriteRequest};
use proptest::prelude::*;
use std::collections::BTreeSet;
use tempfile::TempDir;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

fn els(items: &[&str]) -> Vec<Element> {
    items.iter().map(|s| Element::new(*s)).collect()
}

fn write(config: &StoreConfig, contents: &ModelContents, request: &str) -> modelver_store::SnapshotRef {
    SnapshotWriter::new(config)
        .write_on(
            day(),
            WriteRequest {
                contents,
                change_request: request,
                parent: None,
                cycle_id: None,
            },
        )
        .unwrap()
}

fn class_model() -> ModelContents {
    let mut contents = ModelContents::empty(ModelKind::Class);
    contents.replace(ElementKind::Class, els(&["Order", "Payment"])).unwrap();
    contents
        .replace(ElementKind::Attribute, els(&["Order.total", "Payment.amount"]))
        .unwrap();
    contents
        .replace(ElementKind::Method, els(&["Order.calculateTax(rate: float)", "Payment.pay()"]))
        .unwrap();
    contents
        .replace(ElementKind::Relation, els(&["Order<:association:>Payment"]))
        .unwrap();
    contents
}

#[test]
fn test_empty_base_dir_has_no_latest() {
    let dir = TempDir::new().unwrap();
    let config = StoreConfig::new(dir.path().join("does-not-exist"));
    for model in ModelKind::ALL {
        assert!(find_latest(&config, model).unwrap().is_none());
    }
}

#[test]
fn test_class_model_roundtrip() {
    let dir = TempDir::new().unwrap();
    let config = StoreConfig::new(dir.path());
    let contents = class_model();

    let snapshot = write(&config, &contents, "initial");
    let loaded = load(&snapshot).unwrap();

    assert_eq!(loaded.contents, contents);
    assert!(loaded.dropped.is_empty());
}

#[test]
fn test_sequence_model_roundtrip_with_nested_flow() {
    let dir = TempDir::new().unwrap();
    let config = StoreConfig::new(dir.path()).with_naming(NamingStyle::Prefixed);
    let mut contents = ModelContents::empty(ModelKind::Sequence);
    contents
        .replace(ElementKind::Object, els(&["User:Actor", "Gateway:Service #external"]))
        .unwrap();
    contents
        .replace(ElementKind::Message, els(&["User->Gateway: pay", "Gateway-->User: receipt"]))
        .unwrap();
    contents
        .set_flow(els(&[
            "User->Gateway: pay",
            "alt approved",
            "Gateway-->User: receipt",
            "else",
            "loop retry",
            "User->Gateway: pay",
            "end",
            "end",
        ]))
        .unwrap();

    let snapshot = write(&config, &contents, "checkout");
    assert_eq!(snapshot.dir_name(), "sequence-2025-06-01-1");

    let loaded = load(&snapshot).unwrap();
    assert_eq!(loaded.contents, contents);
}

#[test]
fn test_change_record_contents() {
    let dir = TempDir::new().unwrap();
    let config = StoreConfig::new(dir.path());
    let first = write(&config, &class_model(), "initial");

    let second = SnapshotWriter::new(&config)
        .write_on(
            day(),
            WriteRequest {
                contents: &class_model(),
                change_request: "Add WechatPay",
                parent: Some(&first),
                cycle_id: None,
            },
        )
        .unwrap();

    let record = change_record::read(second.path()).unwrap().unwrap();
    assert_eq!(record.snapshot_id, "2025-06-01-2");
    assert_eq!(record.parent_snapshot_id.as_deref(), Some("2025-06-01-1"));
    assert_eq!(record.change_request, "Add WechatPay");
    assert_eq!(record.collections["classes"].count, 2);
    assert_eq!(record.collections["classes"].sha256.len(), 64);
    assert!(second.path().join("CHANGE.md").exists());
}

#[test]
fn test_find_latest_after_writes() {
    let dir = TempDir::new().unwrap();
    let config = StoreConfig::new(dir.path());
    write(&config, &class_model(), "one");
    let latest = write(&config, &class_model(), "two");

    assert_eq!(find_latest(&config, ModelKind::Class).unwrap(), Some(latest));
    assert!(find_latest(&config, ModelKind::UseCase).unwrap().is_none());
}

#[test]
fn test_hand_edited_artifact_is_canonicalized() {
    let dir = TempDir::new().unwrap();
    let config = StoreConfig::new(dir.path());
    let snapshot = write(&config, &ModelContents::empty(ModelKind::Class), "initial");

    std::fs::write(
        snapshot.path().join("relations.md"),
        "# Class Relationships\n\n* Order <inherits> Entity\n* garbage line\n",
    )
    .unwrap();

    let loaded = load(&snapshot).unwrap();
    assert_eq!(
        loaded.contents.elements(ElementKind::Relation),
        els(&["Order<:extends:>Entity"])
    );
    assert_eq!(loaded.dropped.len(), 1);
}

fn tokens(pattern: &'static str) -> impl Strategy<Value = BTreeSet<String>> {
    prop::collection::btree_set(pattern, 0..6)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn use_case_model_roundtrips(
        actors in tokens("[A-Z][a-z]{1,6}"),
        cases in tokens("[A-Z][a-z]{1,6}( [A-Z][a-z]{1,6})?"),
    ) {
        let dir = TempDir::new().unwrap();
        let config = StoreConfig::new(dir.path());
        let mut contents = ModelContents::empty(ModelKind::UseCase);
        contents.replace(ElementKind::Actor, actors.iter().map(Element::new).collect()).unwrap();
        contents.replace(ElementKind::UseCase, cases.iter().map(Element::new).collect()).unwrap();
        let rels = actors
            .iter()
            .zip(cases.iter())
            .map(|(a, c)| Element::new(format!("{}->{}", a, c)))
            .collect();
        contents.replace(ElementKind::UcRelationship, rels).unwrap();

        let snapshot = write(&config, &contents, "prop");
        let loaded = load(&snapshot).unwrap();
        prop_assert_eq!(loaded.contents, contents);
    }
}

#[test]
fn test_exhausted_sequence_is_rejected_without_writing() {
    let dir = TempDir::new().unwrap();
    let config = StoreConfig::new(dir.path());
    let model_dir = config.model_dir(ModelKind::Class);
    std::fs::create_dir_all(model_dir.join(format!("2025-06-01-{}", u32::MAX))).unwrap();

    let err = SnapshotWriter::new(&config)
        .write_on(
            day(),
            WriteRequest {
                contents: &class_model(),
                change_request: "one too many",
                parent: None,
                cycle_id: None,
            },
        )
        .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::InvalidSnapshotId);
    assert_eq!(std::fs::read_dir(&model_dir).unwrap().count(), 1);
}
