//! Rule evaluation, aggregation, defuzzification, and the full inference
//! pipeline.
//!
//! The pipeline is the classic Mamdani shape: fuzzify each crisp input,
//! compute every rule's firing strength (AND = minimum, scaled by the rule
//! weight), aggregate strengths per output label (OR = maximum), and
//! collapse the aggregate to one crisp number with a weighted centroid over
//! the output label table.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::membership::fuzzify;
use crate::model::{InputVariable, InputVector, MembershipSettings, OutputValueTable, Rule};

/// Crisp value returned by [`defuzzify`] when no rule produced any
/// activation, instead of dividing zero by zero.
pub const NO_ACTIVATION_FALLBACK: f64 = 0.8;

/// Membership degrees per range name, for each input variable.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FuzzifiedInputs {
    pub anchor_ratio: BTreeMap<String, f64>,
    pub trans_range: BTreeMap<String, f64>,
    pub node_density: BTreeMap<String, f64>,
    pub iterations: BTreeMap<String, f64>,
}

impl FuzzifiedInputs {
    pub fn get(&self, variable: InputVariable) -> &BTreeMap<String, f64> {
        match variable {
            InputVariable::AnchorRatio => &self.anchor_ratio,
            InputVariable::TransRange => &self.trans_range,
            InputVariable::NodeDensity => &self.node_density,
            InputVariable::Iterations => &self.iterations,
        }
    }
}

/// One rule's contribution to the output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleActivation {
    pub rule_name: String,
    pub output: String,
    pub strength: f64,
}

/// Result of one inference, with per-rule detail for explainability.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InferenceResult {
    pub result: f64,
    pub activations: Vec<RuleActivation>,
    pub fuzzified: FuzzifiedInputs,
}

/// Compute one rule's firing strength from fuzzified inputs.
///
/// A condition naming a range absent from the fuzzified map contributes
/// degree zero; the rule then simply cannot fire. This is deliberately
/// permissive so a rule base and a range configuration can evolve
/// independently.
pub fn apply_rule(rule: &Rule, inputs: &FuzzifiedInputs) -> RuleActivation {
    let strength = InputVariable::ALL
        .iter()
        .map(|&variable| {
            inputs
                .get(variable)
                .get(rule.condition.get(variable))
                .copied()
                .unwrap_or(0.0)
        })
        .fold(f64::INFINITY, f64::min)
        * rule.weight;

    RuleActivation {
        rule_name: rule.name.clone(),
        output: rule.output.clone(),
        strength,
    }
}

/// Aggregate rule activations per output label, keeping the maximum
/// strength for each label.
pub fn aggregate(activations: &[RuleActivation]) -> BTreeMap<String, f64> {
    let mut aggregated: BTreeMap<String, f64> = BTreeMap::new();
    for activation in activations {
        let entry = aggregated.entry(activation.output.clone()).or_insert(0.0);
        if activation.strength > *entry {
            *entry = activation.strength;
        }
    }
    aggregated
}

/// Collapse aggregated label strengths into one crisp value via weighted
/// centroid: `Σ(value · strength) / Σ(strength)`.
///
/// When the total strength is zero (nothing fired), returns
/// [`NO_ACTIVATION_FALLBACK`] rather than NaN.
pub fn defuzzify(aggregated: &BTreeMap<String, f64>, table: &OutputValueTable) -> f64 {
    let mut numerator = 0.0;
    let mut denominator = 0.0;

    for (label, strength) in aggregated {
        numerator += table.value(label) * strength;
        denominator += strength;
    }

    if denominator == 0.0 {
        return NO_ACTIVATION_FALLBACK;
    }
    numerator / denominator
}

/// Run the full inference pipeline for one input vector.
pub fn infer(inputs: &InputVector, rules: &[Rule], settings: &MembershipSettings) -> InferenceResult {
    let fuzzified = FuzzifiedInputs {
        anchor_ratio: fuzzify(
            inputs.anchor_ratio,
            &settings.ranges.anchor_ratio,
            settings.function_type,
        ),
        trans_range: fuzzify(
            inputs.trans_range,
            &settings.ranges.trans_range,
            settings.function_type,
        ),
        node_density: fuzzify(
            inputs.node_density,
            &settings.ranges.node_density,
            settings.function_type,
        ),
        iterations: fuzzify(
            inputs.iterations,
            &settings.ranges.iterations,
            settings.function_type,
        ),
    };

    let activations: Vec<RuleActivation> = rules
        .iter()
        .map(|rule| apply_rule(rule, &fuzzified))
        .collect();

    let aggregated = aggregate(&activations);
    let result = defuzzify(&aggregated, &OutputValueTable::default());

    InferenceResult {
        result,
        activations,
        fuzzified,
    }
}
