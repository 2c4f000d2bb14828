use std::sync::Arc;

use proptest::prelude::*;
use rowset::{DynamicMembers, FieldCatalog, RowError, RowValues, Slot, Value};

fn pairs(row: &RowValues) -> Vec<(String, Value)> {
    row.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
}

fn pair(name: &str, value: impl Into<Value>) -> (String, Value) {
    (name.to_string(), value.into())
}

#[test]
fn duplicate_catalog_names_resolve_to_first() {
    let catalog = FieldCatalog::new(["a", "b", "a"]).unwrap();
    assert_eq!(catalog.index_of("a"), Some(0));
}

#[test]
fn new_field_is_resolvable_but_absent_in_sibling_rows() {
    let catalog = FieldCatalog::new(["a"]).unwrap();
    let mut r1 = RowValues::new(Arc::clone(&catalog), vec![1.into()]).unwrap();
    let r2 = RowValues::new(Arc::clone(&catalog), vec![2.into()]).unwrap();

    r1.set("x", 1, false).unwrap();

    assert_eq!(catalog.index_of("x"), Some(1));
    assert_eq!(r2.get("x"), Some(&Value::Null));
    assert!(r2.contains_key("x"));
    assert_eq!(pairs(&r2), vec![pair("a", 2)]);
    assert_eq!(r2.get_member("x"), Some(&Value::Null));
    assert_eq!(r2.slot_count(), 1);
}

#[test]
fn tombstones_are_row_local() {
    let catalog = FieldCatalog::new(["a", "b"]).unwrap();
    let mut r1 = RowValues::new(Arc::clone(&catalog), vec![1.into(), 2.into()]).unwrap();
    let r2 = RowValues::new(catalog, vec![3.into(), 4.into()]).unwrap();

    assert!(r1.remove("b"));
    assert_eq!(r1.get("b"), None);
    assert_eq!(r2.get("b"), Some(&Value::Int64(4)));
}

#[test]
fn enumerate_skips_dead_and_absent() {
    let catalog = FieldCatalog::new(["a", "b", "c"]).unwrap();
    let row = RowValues::from_slots(catalog, vec![Slot::Live(1.into()), Slot::Dead]).unwrap();
    assert_eq!(pairs(&row), vec![pair("a", 1)]);
    assert_eq!(row.len(), 1);
}

#[test]
fn remove_then_reset_scenario() {
    let catalog = FieldCatalog::new(["id", "name"]).unwrap();
    let mut row1 = RowValues::new(Arc::clone(&catalog), vec![1.into(), "x".into()]).unwrap();
    let row2 = RowValues::new(catalog, vec![2.into(), "y".into()]).unwrap();

    row1.remove("name");
    assert_eq!(pairs(&row1), vec![pair("id", 1)]);
    assert_eq!(pairs(&row2), vec![pair("id", 2), pair("name", "y")]);

    row1.set("name", "z", false).unwrap();
    assert_eq!(pairs(&row1), vec![pair("id", 1), pair("name", "z")]);
    assert_eq!(row1.catalog().field_count(), 2);
}

#[test]
fn add_fails_only_while_live() {
    let catalog = FieldCatalog::new(["n"]).unwrap();
    let mut row = RowValues::new(catalog, vec![1.into()]).unwrap();

    assert_eq!(row.set("n", 2, true), Err(RowError::DuplicateKey("n".into())));
    row.remove("n");
    row.set("n", 2, true).unwrap();
    assert_eq!(row.get("n"), Some(&Value::Int64(2)));
}

#[test]
fn rows_can_have_disjoint_live_sets() {
    let catalog = FieldCatalog::new(["a", "b"]).unwrap();
    let mut r1 = RowValues::new(Arc::clone(&catalog), vec![1.into(), 2.into()]).unwrap();
    let mut r2 = RowValues::new(catalog, vec![3.into(), 4.into()]).unwrap();
    r1.remove("b");
    r2.remove("a");

    assert_eq!(pairs(&r1), vec![pair("a", 1)]);
    assert_eq!(pairs(&r2), vec![pair("b", 4)]);
}

#[test]
fn sibling_growth_then_local_write() {
    let catalog = FieldCatalog::new(["a"]).unwrap();
    let mut r1 = RowValues::new(Arc::clone(&catalog), vec![1.into()]).unwrap();
    let mut r2 = RowValues::new(catalog, vec![2.into()]).unwrap();

    r1.insert("b", 10).unwrap();
    r1.insert("c", 20).unwrap();
    r2.insert("c", 30).unwrap();

    assert_eq!(r2.slot_count(), 3);
    assert_eq!(pairs(&r2), vec![pair("a", 2), pair("c", 30)]);
}

fn field_name() -> impl Strategy<Value = String> {
    "[a-z]{1,6}"
}

fn value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int64),
        "[ -~]{0,12}".prop_map(Value::String),
    ]
}

proptest! {
    #[test]
    fn prop_set_then_get_round_trips(
        seed in prop::collection::vec(field_name(), 0..6),
        name in field_name(),
        v in value(),
    ) {
        let catalog = FieldCatalog::new(&seed).unwrap();
        let mut row = RowValues::new(catalog, vec![]).unwrap();
        row.set(&name, v.clone(), false).unwrap();
        prop_assert_eq!(row.get(&name), Some(&v));
    }

    #[test]
    fn prop_removed_field_can_be_set_again(
        name in field_name(),
        v1 in value(),
        v2 in value(),
    ) {
        let mut row = RowValues::new(FieldCatalog::empty(), vec![]).unwrap();
        row.insert(&name, v1).unwrap();
        prop_assert!(row.remove(&name));
        prop_assert_eq!(row.get(&name), None);
        row.insert(&name, v2.clone()).unwrap();
        prop_assert_eq!(row.get(&name), Some(&v2));
    }

    #[test]
    fn prop_first_occurrence_wins(names in prop::collection::vec(field_name(), 1..12)) {
        let catalog = FieldCatalog::new(&names).unwrap();
        for name in &names {
            let first = names.iter().position(|n| n == name);
            prop_assert_eq!(catalog.index_of(name), first);
        }
    }
}
