//! Default model generator: evenly tiled membership ranges over the fixed
//! variable domains, and hand-tuned rule bases for 3, 5, and 7 sets.

use uuid::Uuid;

use crate::membership::{FunctionType, MembershipRange};
use crate::model::{
    level_names, InputVariable, MembershipSettings, Rule, RuleCondition, VariableRanges,
};
use crate::{FuzzyLocError, Result};

/// Fixed domain of each input variable.
pub fn domain(variable: InputVariable) -> (f64, f64) {
    match variable {
        InputVariable::AnchorRatio => (0.0, 50.0),
        InputVariable::TransRange => (0.0, 100.0),
        InputVariable::NodeDensity => (0.0, 50.0),
        InputVariable::Iterations => (0.0, 100.0),
    }
}

/// Hand-tuned peak positions for the mid-ladder label names. Labels outside
/// this table (and tuned peaks that fall outside their computed range, as
/// happens for the narrow tilings of larger set counts) get no peak, so the
/// shape derives its own default.
fn tuned_peak(variable: InputVariable, name: &str) -> Option<f64> {
    let peaks: &[(&str, f64)] = match variable {
        InputVariable::AnchorRatio | InputVariable::NodeDensity => &[
            ("very_low", 5.0),
            ("low", 15.0),
            ("medium", 25.0),
            ("high", 35.0),
            ("very_high", 45.0),
        ],
        InputVariable::TransRange | InputVariable::Iterations => &[
            ("very_low", 10.0),
            ("low", 30.0),
            ("medium", 50.0),
            ("high", 70.0),
            ("very_high", 90.0),
        ],
    };
    peaks
        .iter()
        .find(|(label, _)| *label == name)
        .map(|(_, peak)| *peak)
}

fn default_ranges(variable: InputVariable, set_count: usize) -> Result<Vec<MembershipRange>> {
    let (min, max) = domain(variable);
    let names = level_names(set_count)?;
    let step = (max - min) / set_count as f64;

    Ok(names
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            let start = if i == 0 { min } else { min + step * i as f64 };
            let end = if i == set_count - 1 {
                max
            } else {
                min + step * (i + 1) as f64
            };
            let peak =
                tuned_peak(variable, &name).filter(|&peak| peak >= start && peak <= end);
            MembershipRange::new(name, start, peak, end)
        })
        .collect())
}

/// Build a valid default membership configuration for `set_count` sets per
/// variable: gaussian shapes over an even tiling of each domain.
pub fn default_membership_settings(set_count: usize) -> Result<MembershipSettings> {
    Ok(MembershipSettings {
        function_type: FunctionType::Gaussian,
        set_count,
        ranges: VariableRanges {
            anchor_ratio: default_ranges(InputVariable::AnchorRatio, set_count)?,
            trans_range: default_ranges(InputVariable::TransRange, set_count)?,
            node_density: default_ranges(InputVariable::NodeDensity, set_count)?,
            iterations: default_ranges(InputVariable::Iterations, set_count)?,
        },
    })
}

fn rule(
    name: &str,
    anchor_ratio: &str,
    trans_range: &str,
    node_density: &str,
    iterations: &str,
    output: &str,
) -> Rule {
    let id = Uuid::new_v4().simple().to_string();
    Rule {
        id: id[..8].to_string(),
        name: name.to_string(),
        condition: RuleCondition {
            anchor_ratio: anchor_ratio.to_string(),
            trans_range: trans_range.to_string(),
            node_density: node_density.to_string(),
            iterations: iterations.to_string(),
        },
        output: output.to_string(),
        weight: 1.0,
    }
}

/// The default rule base for `set_count` sets. Only the tuned vocabularies
/// (3, 5, and 7 sets) ship with rules.
pub fn default_rules(set_count: usize) -> Result<Vec<Rule>> {
    let rules = match set_count {
        3 => vec![
            rule("Rule 1", "low", "low", "low", "high", "excellent"),
            rule("Rule 2", "low", "low", "medium", "medium", "very_good"),
            rule("Rule 3", "low", "medium", "low", "high", "very_good"),
            rule("Rule 4", "medium", "low", "low", "high", "good"),
            rule("Rule 5", "medium", "medium", "medium", "medium", "fair"),
            rule("Rule 6", "high", "medium", "medium", "medium", "poor"),
            rule("Rule 7", "high", "high", "high", "low", "very_poor"),
            rule("Rule 8", "medium", "high", "high", "low", "poor"),
            rule("Rule 9", "low", "high", "high", "medium", "fair"),
            rule("Rule 10", "high", "high", "low", "low", "poor"),
        ],
        5 => vec![
            rule("Rule 1", "very_low", "very_low", "very_low", "very_high", "excellent"),
            rule("Rule 2", "very_low", "low", "very_low", "high", "excellent"),
            rule("Rule 3", "low", "very_low", "very_low", "high", "excellent"),
            rule("Rule 4", "low", "low", "low", "high", "very_good"),
            rule("Rule 5", "very_low", "medium", "low", "medium", "very_good"),
            rule("Rule 6", "low", "medium", "medium", "medium", "good"),
            rule("Rule 7", "medium", "medium", "medium", "medium", "good"),
            rule("Rule 8", "medium", "high", "medium", "low", "fair"),
            rule("Rule 9", "high", "medium", "high", "low", "poor"),
            rule("Rule 10", "high", "high", "high", "very_low", "very_poor"),
            rule("Rule 11", "very_high", "high", "high", "very_low", "very_poor"),
            rule("Rule 12", "very_high", "very_high", "very_high", "very_low", "extremely_poor"),
            rule("Rule 13", "low", "low", "high", "medium", "fair"),
            rule("Rule 14", "very_low", "high", "very_high", "low", "poor"),
            rule("Rule 15", "very_high", "very_low", "medium", "medium", "fair"),
            rule("Rule 16", "medium", "very_low", "very_high", "high", "fair"),
            rule("Rule 17", "very_low", "very_high", "very_low", "very_high", "good"),
            rule("Rule 18", "high", "high", "low", "medium", "fair"),
            rule("Rule 19", "very_high", "medium", "very_low", "low", "poor"),
            rule("Rule 20", "low", "very_high", "medium", "very_low", "poor"),
        ],
        7 => vec![
            rule("Rule 1", "extremely_low", "extremely_low", "extremely_low", "extremely_high", "excellent"),
            rule("Rule 2", "very_low", "very_low", "very_low", "very_high", "excellent"),
            rule("Rule 3", "low", "very_low", "very_low", "high", "very_good"),
            rule("Rule 4", "very_low", "low", "very_low", "high", "very_good"),
            rule("Rule 5", "low", "low", "low", "high", "good"),
            rule("Rule 6", "medium", "low", "low", "medium", "good"),
            rule("Rule 7", "medium", "medium", "medium", "medium", "fair"),
            rule("Rule 8", "high", "medium", "medium", "low", "fair"),
            rule("Rule 9", "high", "high", "high", "low", "poor"),
            rule("Rule 10", "very_high", "high", "high", "very_low", "very_poor"),
            rule("Rule 11", "extremely_high", "very_high", "very_high", "extremely_low", "extremely_poor"),
            rule("Rule 12", "extremely_low", "extremely_high", "extremely_low", "medium", "fair"),
            rule("Rule 13", "extremely_high", "extremely_low", "extremely_high", "low", "poor"),
            rule("Rule 14", "very_low", "extremely_high", "medium", "very_low", "poor"),
            rule("Rule 15", "low", "high", "very_high", "extremely_low", "very_poor"),
            rule("Rule 16", "extremely_low", "medium", "extremely_high", "medium", "fair"),
            rule("Rule 17", "medium", "extremely_low", "high", "extremely_high", "fair"),
            rule("Rule 18", "high", "very_low", "extremely_high", "high", "poor"),
            rule("Rule 19", "very_high", "low", "high", "very_low", "very_poor"),
            rule("Rule 20", "extremely_high", "medium", "low", "extremely_low", "extremely_poor"),
            rule("Rule 21", "very_low", "very_high", "extremely_low", "extremely_high", "good"),
            rule("Rule 22", "low", "extremely_high", "very_low", "high", "good"),
            rule("Rule 23", "medium", "very_high", "low", "medium", "fair"),
            rule("Rule 24", "high", "extremely_high", "medium", "low", "poor"),
            rule("Rule 25", "very_high", "high", "extremely_high", "very_low", "very_poor"),
        ],
        other => return Err(FuzzyLocError::InvalidSetCount(other)),
    };
    Ok(rules)
}
