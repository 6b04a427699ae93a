//! Model configuration: input variables, membership settings, rules, and
//! the linguistic label vocabulary.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::membership::{FunctionType, MembershipRange};
use crate::{FuzzyLocError, Result};

/// The four fixed input variables of the localization model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputVariable {
    AnchorRatio,
    TransRange,
    NodeDensity,
    Iterations,
}

impl InputVariable {
    pub const ALL: [InputVariable; 4] = [
        InputVariable::AnchorRatio,
        InputVariable::TransRange,
        InputVariable::NodeDensity,
        InputVariable::Iterations,
    ];

    /// Wire name of the variable, as used in serialized configurations.
    pub fn name(self) -> &'static str {
        match self {
            InputVariable::AnchorRatio => "anchorRatio",
            InputVariable::TransRange => "transRange",
            InputVariable::NodeDensity => "nodeDensity",
            InputVariable::Iterations => "iterations",
        }
    }
}

impl fmt::Display for InputVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One crisp value per input variable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputVector {
    pub anchor_ratio: f64,
    pub trans_range: f64,
    pub node_density: f64,
    pub iterations: f64,
}

impl InputVector {
    pub fn get(&self, variable: InputVariable) -> f64 {
        match variable {
            InputVariable::AnchorRatio => self.anchor_ratio,
            InputVariable::TransRange => self.trans_range,
            InputVariable::NodeDensity => self.node_density,
            InputVariable::Iterations => self.iterations,
        }
    }
}

/// Ordered membership ranges for each input variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableRanges {
    pub anchor_ratio: Vec<MembershipRange>,
    pub trans_range: Vec<MembershipRange>,
    pub node_density: Vec<MembershipRange>,
    pub iterations: Vec<MembershipRange>,
}

impl VariableRanges {
    pub fn get(&self, variable: InputVariable) -> &[MembershipRange] {
        match variable {
            InputVariable::AnchorRatio => &self.anchor_ratio,
            InputVariable::TransRange => &self.trans_range,
            InputVariable::NodeDensity => &self.node_density,
            InputVariable::Iterations => &self.iterations,
        }
    }

    pub fn get_mut(&mut self, variable: InputVariable) -> &mut Vec<MembershipRange> {
        match variable {
            InputVariable::AnchorRatio => &mut self.anchor_ratio,
            InputVariable::TransRange => &mut self.trans_range,
            InputVariable::NodeDensity => &mut self.node_density,
            InputVariable::Iterations => &mut self.iterations,
        }
    }
}

/// Complete membership configuration for one model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipSettings {
    pub function_type: FunctionType,
    pub set_count: usize,
    pub ranges: VariableRanges,
}

impl MembershipSettings {
    /// Validate a caller-supplied configuration.
    ///
    /// Rejects ranges with `start > end`, peaks outside `[start, end]`, and
    /// variables whose range count disagrees with `set_count`. Gaps and
    /// overlaps between adjacent ranges are allowed; every range is
    /// evaluated independently.
    pub fn validate(&self) -> Result<()> {
        for variable in InputVariable::ALL {
            let ranges = self.ranges.get(variable);
            if ranges.len() != self.set_count {
                return Err(FuzzyLocError::SetCountMismatch {
                    variable: variable.name(),
                    expected: self.set_count,
                    actual: ranges.len(),
                });
            }
            for range in ranges {
                if range.start > range.end {
                    return Err(FuzzyLocError::InvalidRange {
                        variable: variable.name(),
                        name: range.name.clone(),
                        reason: format!("start {} exceeds end {}", range.start, range.end),
                    });
                }
                if let Some(peak) = range.peak {
                    if peak < range.start || peak > range.end {
                        return Err(FuzzyLocError::InvalidRange {
                            variable: variable.name(),
                            name: range.name.clone(),
                            reason: format!(
                                "peak {} outside [{}, {}]",
                                peak, range.start, range.end
                            ),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

/// Range name required per input variable for a rule to fire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleCondition {
    pub anchor_ratio: String,
    pub trans_range: String,
    pub node_density: String,
    pub iterations: String,
}

impl RuleCondition {
    pub fn get(&self, variable: InputVariable) -> &str {
        match variable {
            InputVariable::AnchorRatio => &self.anchor_ratio,
            InputVariable::TransRange => &self.trans_range,
            InputVariable::NodeDensity => &self.node_density,
            InputVariable::Iterations => &self.iterations,
        }
    }
}

/// One fuzzy rule: AND over the four conditions, scaled by `weight`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,
    pub name: String,
    pub condition: RuleCondition,
    pub output: String,
    /// Firing-strength multiplier in `[0, 1]`.
    pub weight: f64,
}

/// Output labels and the crisp value each one contributes to the centroid.
pub const OUTPUT_LEVELS: [(&str, f64); 7] = [
    ("excellent", 0.2),
    ("very_good", 0.4),
    ("good", 0.6),
    ("fair", 0.9),
    ("poor", 1.2),
    ("very_poor", 1.5),
    ("extremely_poor", 1.8),
];

/// Label → crisp value table used by defuzzification.
///
/// The default table is [`OUTPUT_LEVELS`]; labels missing from the table
/// contribute a value of zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputValueTable(BTreeMap<String, f64>);

impl OutputValueTable {
    pub fn new(entries: impl IntoIterator<Item = (String, f64)>) -> Self {
        Self(entries.into_iter().collect())
    }

    pub fn value(&self, label: &str) -> f64 {
        self.0.get(label).copied().unwrap_or(0.0)
    }
}

impl Default for OutputValueTable {
    fn default() -> Self {
        Self::new(
            OUTPUT_LEVELS
                .iter()
                .map(|(label, value)| (label.to_string(), *value)),
        )
    }
}

/// Generate the ordered linguistic label ladder for `set_count` sets.
///
/// The ladder is symmetric around `medium`: 3 sets give
/// `low / medium / high`, 5 add `very_`, 7 add `extremely_`. Any odd count
/// is accepted; beyond 7 the ladder continues with `ultra_` and then a
/// numeric `{n}x_` prefix, so larger vocabularies need no new cases.
pub fn level_names(set_count: usize) -> Result<Vec<String>> {
    if set_count < 3 || set_count % 2 == 0 {
        return Err(FuzzyLocError::InvalidSetCount(set_count));
    }

    let half = (set_count / 2) as i64;
    Ok((0..set_count as i64)
        .map(|i| {
            let distance = i - half;
            let side = if distance < 0 { "low" } else { "high" };
            match distance.abs() {
                0 => "medium".to_string(),
                1 => side.to_string(),
                2 => format!("very_{side}"),
                3 => format!("extremely_{side}"),
                4 => format!("ultra_{side}"),
                n => format!("{n}x_{side}"),
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_ranges(names: &[&str], width: f64) -> Vec<MembershipRange> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                MembershipRange::new(*name, i as f64 * width, None, (i + 1) as f64 * width)
            })
            .collect()
    }

    fn settings(set_count: usize, names: &[&str]) -> MembershipSettings {
        MembershipSettings {
            function_type: FunctionType::Triangle,
            set_count,
            ranges: VariableRanges {
                anchor_ratio: uniform_ranges(names, 10.0),
                trans_range: uniform_ranges(names, 20.0),
                node_density: uniform_ranges(names, 10.0),
                iterations: uniform_ranges(names, 20.0),
            },
        }
    }

    #[test]
    fn test_validate_accepts_well_formed_settings() {
        let s = settings(3, &["low", "medium", "high"]);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_set_count_mismatch() {
        let mut s = settings(3, &["low", "medium", "high"]);
        s.ranges.node_density.pop();

        assert_eq!(
            s.validate(),
            Err(FuzzyLocError::SetCountMismatch {
                variable: "nodeDensity",
                expected: 3,
                actual: 2,
            })
        );
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        let mut s = settings(3, &["low", "medium", "high"]);
        s.ranges.trans_range[1].start = 50.0;

        assert!(matches!(
            s.validate(),
            Err(FuzzyLocError::InvalidRange {
                variable: "transRange",
                ..
            })
        ));
    }

    #[test]
    fn test_validate_rejects_peak_outside_range() {
        let mut s = settings(3, &["low", "medium", "high"]);
        s.ranges.anchor_ratio[0].peak = Some(25.0);

        assert!(matches!(
            s.validate(),
            Err(FuzzyLocError::InvalidRange {
                variable: "anchorRatio",
                ..
            })
        ));
    }

    #[test]
    fn test_level_names_for_supported_counts() {
        assert_eq!(level_names(3).unwrap(), ["low", "medium", "high"]);
        assert_eq!(
            level_names(5).unwrap(),
            ["very_low", "low", "medium", "high", "very_high"]
        );
        assert_eq!(
            level_names(7).unwrap(),
            [
                "extremely_low",
                "very_low",
                "low",
                "medium",
                "high",
                "very_high",
                "extremely_high"
            ]
        );
    }

    #[test]
    fn test_level_names_extend_beyond_seven() {
        let names = level_names(9).unwrap();
        assert_eq!(names.first().unwrap(), "ultra_low");
        assert_eq!(names.last().unwrap(), "ultra_high");
        assert_eq!(names[4], "medium");

        let names = level_names(11).unwrap();
        assert_eq!(names.first().unwrap(), "5x_low");
    }

    #[test]
    fn test_level_names_reject_even_or_tiny_counts() {
        assert_eq!(level_names(4), Err(FuzzyLocError::InvalidSetCount(4)));
        assert_eq!(level_names(1), Err(FuzzyLocError::InvalidSetCount(1)));
        assert_eq!(level_names(0), Err(FuzzyLocError::InvalidSetCount(0)));
    }

    #[test]
    fn test_output_table_defaults() {
        let table = OutputValueTable::default();
        assert_eq!(table.value("excellent"), 0.2);
        assert_eq!(table.value("extremely_poor"), 1.8);
        assert_eq!(table.value("unknown"), 0.0);
    }

    #[test]
    fn test_settings_serialize_with_wire_names() {
        let s = settings(3, &["low", "medium", "high"]);
        let json = serde_json::to_string(&s).unwrap();

        assert!(json.contains("\"functionType\":\"triangle\""));
        assert!(json.contains("\"setCount\":3"));
        assert!(json.contains("\"anchorRatio\""));

        let back: MembershipSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
