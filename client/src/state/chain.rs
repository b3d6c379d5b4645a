//! Fixed copy rules that carry values forward between stages.
//!
//! DESIGN
//! ======
//! The rules are a declarative table evaluated after every successful
//! prediction, whichever stage produced it. A rule copies its source value
//! verbatim (empty included) only when both controls are mounted; otherwise it
//! is skipped and reported in the outcome so callers can log it.

#[cfg(test)]
#[path = "chain_test.rs"]
mod chain_test;

use super::forms::{FieldRef, FieldRegistry, FieldRole};
use super::stage::Stage;

/// One end of a chain rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuleEnd {
    pub stage: Stage,
    pub role: FieldRole,
    pub field: &'static str,
}

impl RuleEnd {
    #[must_use]
    pub fn field_ref(&self) -> FieldRef {
        FieldRef { stage: self.stage, role: self.role, field: self.field.to_owned() }
    }
}

/// Copy `source` into `destination`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChainRule {
    pub source: RuleEnd,
    pub destination: RuleEnd,
}

const fn input(stage: Stage, field: &'static str) -> RuleEnd {
    RuleEnd { stage, role: FieldRole::Input, field }
}

const fn output(stage: Stage, field: &'static str) -> RuleEnd {
    RuleEnd { stage, role: FieldRole::Output, field }
}

const fn rule(source: RuleEnd, destination: RuleEnd) -> ChainRule {
    ChainRule { source, destination }
}

/// Every chain rule, applied in this order. Each destination appears once.
pub const CHAIN_RULES: [ChainRule; 9] = [
    // Order suggestions -> knitting targets.
    rule(output(Stage::Order, "gray_gsm"), input(Stage::Knitting, "target_gsm")),
    rule(output(Stage::Order, "gray_dia"), input(Stage::Knitting, "target_dia")),
    // Dyeing suggestions -> stenter inputs.
    rule(output(Stage::Dyeing, "dyed_gsm"), input(Stage::Stenter, "dyed_gsm")),
    rule(output(Stage::Dyeing, "dyed_dia"), input(Stage::Stenter, "dyed_dia")),
    // Final customer targets and batch number.
    rule(input(Stage::Order, "req_gsm"), input(Stage::Stenter, "target_gsm")),
    rule(input(Stage::Order, "req_dia"), input(Stage::Stenter, "target_dia")),
    rule(input(Stage::Order, "req_gsm"), input(Stage::Compactor, "target_gsm")),
    rule(input(Stage::Order, "req_dia"), input(Stage::Compactor, "target_dia")),
    rule(input(Stage::Order, "batch_no"), input(Stage::Feedback, "batch_no")),
];

/// Result of one pass over the rule table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChainOutcome {
    pub applied: usize,
    /// Rules skipped because one of their controls was not mounted.
    pub skipped: Vec<ChainRule>,
}

/// Apply `rules` in order against `registry`.
pub fn apply_rules(registry: &mut FieldRegistry, rules: &[ChainRule]) -> ChainOutcome {
    let mut outcome = ChainOutcome::default();
    for rule in rules {
        let source = rule.source.field_ref();
        let destination = rule.destination.field_ref();
        let value = match registry.get(&source) {
            Some(value) if registry.contains(&destination) => value.to_owned(),
            _ => {
                outcome.skipped.push(*rule);
                continue;
            }
        };
        registry.set(&destination, value);
        outcome.applied += 1;
    }
    outcome
}

/// Apply [`CHAIN_RULES`], logging skipped rules at debug level.
pub fn chain_forward(registry: &mut FieldRegistry) -> ChainOutcome {
    let outcome = apply_rules(registry, &CHAIN_RULES);
    for rule in &outcome.skipped {
        log::debug!(
            "chain rule skipped: {} -> {} (control not mounted)",
            rule.source.field_ref().dom_id(),
            rule.destination.field_ref().dom_id()
        );
    }
    outcome
}
