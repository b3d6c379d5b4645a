use super::*;
use crate::net::types::ModelSchema;
use crate::state::forms::FormSpec;
use crate::state::stage::PIPELINE;
use serde_json::json;

fn schema(inputs: &[&str]) -> ModelSchema {
    serde_json::from_value(json!({ "inputs": inputs, "outputs": ["speed"] })).unwrap()
}

fn full_registry() -> FieldRegistry {
    let mut registry = FieldRegistry::default();
    for stage in PIPELINE {
        match FormSpec::builtin(stage) {
            Some(form) => registry.mount(form),
            None => registry.mount(FormSpec::from_schema(stage, &schema(&["target_gsm", "target_dia", "dyed_gsm", "dyed_dia"]))),
        }
    }
    registry
}

#[test]
fn destinations_are_unique() {
    for (i, a) in CHAIN_RULES.iter().enumerate() {
        for b in &CHAIN_RULES[i + 1..] {
            assert_ne!(a.destination, b.destination);
        }
    }
}

#[test]
fn order_gray_gsm_flows_to_knitting_target() {
    let mut registry = full_registry();
    registry.set(&FieldRef::output(Stage::Order, "gray_gsm"), "180");
    chain_forward(&mut registry);
    assert_eq!(registry.get(&FieldRef::input(Stage::Knitting, "target_gsm")), Some("180"));
}

#[test]
fn all_rules_apply_when_every_form_is_mounted() {
    let mut registry = full_registry();
    registry.set(&FieldRef::input(Stage::Order, "batch_no"), "B-17");
    registry.set(&FieldRef::input(Stage::Order, "req_gsm"), "200");
    registry.set(&FieldRef::input(Stage::Order, "req_dia"), "72");
    registry.set(&FieldRef::output(Stage::Dyeing, "dyed_dia"), "70.1");

    let outcome = chain_forward(&mut registry);
    assert_eq!(outcome.applied, CHAIN_RULES.len());
    assert!(outcome.skipped.is_empty());
    assert_eq!(registry.get(&FieldRef::input(Stage::Stenter, "target_gsm")), Some("200"));
    assert_eq!(registry.get(&FieldRef::input(Stage::Compactor, "target_dia")), Some("72"));
    assert_eq!(registry.get(&FieldRef::input(Stage::Stenter, "dyed_dia")), Some("70.1"));
    assert_eq!(registry.get(&FieldRef::input(Stage::Feedback, "batch_no")), Some("B-17"));
}

#[test]
fn empty_source_values_are_copied() {
    let mut registry = full_registry();
    registry.set(&FieldRef::input(Stage::Stenter, "dyed_gsm"), "stale");
    chain_forward(&mut registry);
    assert_eq!(registry.get(&FieldRef::input(Stage::Stenter, "dyed_gsm")), Some(""));
}

#[test]
fn rules_with_unmounted_ends_are_skipped() {
    let mut registry = FieldRegistry::default();
    registry.mount(FormSpec::builtin(Stage::Order).unwrap());
    registry.mount(FormSpec::builtin(Stage::Feedback).unwrap());
    registry.set(&FieldRef::input(Stage::Order, "batch_no"), "B-9");

    let outcome = chain_forward(&mut registry);
    assert_eq!(outcome.applied, 1);
    assert_eq!(outcome.skipped.len(), CHAIN_RULES.len() - 1);
    assert_eq!(registry.get(&FieldRef::input(Stage::Feedback, "batch_no")), Some("B-9"));
    assert!(!registry.contains(&FieldRef::input(Stage::Knitting, "target_gsm")));
}

#[test]
fn missing_destination_field_in_schema_is_skipped() {
    let mut registry = FieldRegistry::default();
    registry.mount(FormSpec::builtin(Stage::Order).unwrap());
    registry.mount(FormSpec::from_schema(Stage::Knitting, &schema(&["target_gsm"])));
    registry.set(&FieldRef::output(Stage::Order, "gray_dia"), "95");

    let rules = [CHAIN_RULES[1]];
    let outcome = apply_rules(&mut registry, &rules);
    assert_eq!(outcome.applied, 0);
    assert_eq!(outcome.skipped, vec![CHAIN_RULES[1]]);
}

#[test]
fn rule_end_field_ref_matches_dom_ids() {
    assert_eq!(CHAIN_RULES[0].source.field_ref().dom_id(), "order-sugg-gray-gsm");
    assert_eq!(CHAIN_RULES[0].destination.field_ref().dom_id(), "knitting-target-gsm");
    assert_eq!(CHAIN_RULES[8].destination.field_ref().dom_id(), "feedback-batch-no");
}
