//! Flattened parameter vectors for the search strategies.
//!
//! A [`ParamSpace`] lays every tunable model value — range boundaries and
//! peaks per variable, rule weights — out in one fixed-length `Vec<f64>`,
//! so the search code can move through parameter space without knowing
//! anything about fuzzy sets. Components carry a frozen flag (domain
//! boundaries and disabled option groups never move) and a perturbation
//! half-width, and [`ParamSpace::materialize`] turns a vector back into a
//! valid model by repairing clamps and re-linking adjacent boundaries.

use crate::model::{InputVariable, MembershipSettings, Rule};
use crate::optimizer::OptimizationOptions;

/// Half-width of the uniform perturbation applied to range boundaries.
const BOUNDARY_STEP: f64 = 2.5;
/// Half-width of the uniform perturbation applied to rule weights.
const WEIGHT_STEP: f64 = 0.1;

const WEIGHT_MIN: f64 = 0.1;
const WEIGHT_MAX: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum ComponentKind {
    RangeStart { variable: InputVariable, index: usize },
    RangeEnd { variable: InputVariable, index: usize },
    RangePeak { variable: InputVariable, index: usize },
    RuleWeight { index: usize },
}

#[derive(Debug, Clone, Copy)]
struct Component {
    kind: ComponentKind,
    frozen: bool,
    half_width: f64,
}

/// Description of the searchable parameter space of one model.
#[derive(Debug, Clone)]
pub(crate) struct ParamSpace {
    components: Vec<Component>,
    optimize_ranges: bool,
    optimize_rules: bool,
}

impl ParamSpace {
    pub fn new(settings: &MembershipSettings, rules: &[Rule], options: &OptimizationOptions) -> Self {
        let mut components = Vec::new();

        for variable in InputVariable::ALL {
            let ranges = settings.ranges.get(variable);
            let last = ranges.len().saturating_sub(1);
            for (index, range) in ranges.iter().enumerate() {
                // The domain boundaries stay put: the first range's start
                // and the last range's end are never perturbed.
                components.push(Component {
                    kind: ComponentKind::RangeStart { variable, index },
                    frozen: !options.optimize_ranges || index == 0,
                    half_width: BOUNDARY_STEP,
                });
                components.push(Component {
                    kind: ComponentKind::RangeEnd { variable, index },
                    frozen: !options.optimize_ranges || index == last,
                    half_width: BOUNDARY_STEP,
                });
                if range.peak.is_some() {
                    components.push(Component {
                        kind: ComponentKind::RangePeak { variable, index },
                        frozen: !options.optimize_ranges,
                        half_width: BOUNDARY_STEP,
                    });
                }
            }
        }

        for index in 0..rules.len() {
            components.push(Component {
                kind: ComponentKind::RuleWeight { index },
                frozen: !options.optimize_rules,
                half_width: WEIGHT_STEP,
            });
        }

        Self {
            components,
            optimize_ranges: options.optimize_ranges,
            optimize_rules: options.optimize_rules,
        }
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Number of components the search may actually move.
    pub fn active_len(&self) -> usize {
        self.components.iter().filter(|c| !c.frozen).count()
    }

    pub fn frozen_mask(&self) -> Vec<bool> {
        self.components.iter().map(|c| c.frozen).collect()
    }

    /// Flatten a model into a parameter vector.
    pub fn encode(&self, settings: &MembershipSettings, rules: &[Rule]) -> Vec<f64> {
        self.components
            .iter()
            .map(|component| match component.kind {
                ComponentKind::RangeStart { variable, index } => {
                    settings.ranges.get(variable)[index].start
                }
                ComponentKind::RangeEnd { variable, index } => {
                    settings.ranges.get(variable)[index].end
                }
                ComponentKind::RangePeak { variable, index } => settings.ranges.get(variable)
                    [index]
                    .peak
                    .unwrap_or_default(),
                ComponentKind::RuleWeight { index } => rules[index].weight,
            })
            .collect()
    }

    /// Add a uniform random offset to every non-frozen component.
    pub fn perturb(&self, vector: &mut [f64], rng: &mut fastrand::Rng) {
        for (value, component) in vector.iter_mut().zip(&self.components) {
            if !component.frozen {
                *value += (rng.f64() - 0.5) * 2.0 * component.half_width;
            }
        }
    }

    /// Rebuild a model from `vector`, repair it back into its valid domain,
    /// and write the repaired values back so the vector and the model agree.
    pub fn materialize(
        &self,
        vector: &mut [f64],
        base_settings: &MembershipSettings,
        base_rules: &[Rule],
    ) -> (MembershipSettings, Vec<Rule>) {
        let mut settings = base_settings.clone();
        let mut rules = base_rules.to_vec();

        for (value, component) in vector.iter().zip(&self.components) {
            match component.kind {
                ComponentKind::RangeStart { variable, index } => {
                    settings.ranges.get_mut(variable)[index].start = *value;
                }
                ComponentKind::RangeEnd { variable, index } => {
                    settings.ranges.get_mut(variable)[index].end = *value;
                }
                ComponentKind::RangePeak { variable, index } => {
                    settings.ranges.get_mut(variable)[index].peak = Some(*value);
                }
                ComponentKind::RuleWeight { index } => {
                    rules[index].weight = *value;
                }
            }
        }

        self.repair(&mut settings, &mut rules);

        for (value, component) in vector.iter_mut().zip(&self.components) {
            match component.kind {
                ComponentKind::RangeStart { variable, index } => {
                    *value = settings.ranges.get(variable)[index].start;
                }
                ComponentKind::RangeEnd { variable, index } => {
                    *value = settings.ranges.get(variable)[index].end;
                }
                ComponentKind::RangePeak { variable, index } => {
                    *value = settings.ranges.get(variable)[index].peak.unwrap_or_default();
                }
                ComponentKind::RuleWeight { index } => {
                    *value = rules[index].weight;
                }
            }
        }

        (settings, rules)
    }

    /// Pull a moved model back into its valid domain.
    ///
    /// Ranges, left to right: a non-first start stays non-negative, a
    /// non-last end stays at least one unit above its start, a peak stays
    /// inside `[start, end]`, and the previous range's end is re-linked to
    /// this range's start so adjacent sets keep sharing a boundary. Weights
    /// are clamped to `[0.1, 1.0]`. Each repair only runs for the option
    /// group that is being optimized, so untouched caller values pass
    /// through unchanged.
    fn repair(&self, settings: &mut MembershipSettings, rules: &mut [Rule]) {
        if self.optimize_ranges {
            for variable in InputVariable::ALL {
                let ranges = settings.ranges.get_mut(variable);
                let last = ranges.len().saturating_sub(1);
                for index in 0..ranges.len() {
                    if index > 0 {
                        ranges[index].start = ranges[index].start.max(0.0);
                    }
                    if index < last {
                        ranges[index].end = ranges[index].end.max(ranges[index].start + 1.0);
                    }
                    if let Some(peak) = ranges[index].peak {
                        // min/max instead of clamp: a degenerate candidate
                        // can briefly hold start > end.
                        ranges[index].peak =
                            Some(peak.max(ranges[index].start).min(ranges[index].end));
                    }
                    if index > 0 {
                        ranges[index - 1].end = ranges[index].start;
                    }
                }
            }
        }

        if self.optimize_rules {
            for rule in rules.iter_mut() {
                rule.weight = rule.weight.clamp(WEIGHT_MIN, WEIGHT_MAX);
            }
        }
    }
}
