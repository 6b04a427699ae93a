//! Parameter search: particle-swarm and random local search over range
//! boundaries and rule weights, minimizing mean absolute error.
//!
//! Both strategies share one contract: the returned parameters never score
//! worse than the caller's starting point, because the best candidate is
//! tracked across every evaluation and initialized to the starting
//! configuration. Candidates are always independent clones; the caller's
//! rules and settings are never mutated.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::dataset::SampleRecord;
use crate::evaluation::{evaluate_unchecked, EvaluationResult};
use crate::model::{MembershipSettings, Rule};
use crate::params::ParamSpace;
use crate::pso::{ParticleSwarm, SwarmConfig};
use crate::{FuzzyLocError, Result};

/// What to search, and how hard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationOptions {
    /// Number of search iterations. Zero returns the initial evaluation.
    pub iteration_budget: usize,
    /// Particle swarm when set, random local search otherwise.
    pub use_pso: bool,
    pub optimize_ranges: bool,
    pub optimize_rules: bool,
}

impl Default for OptimizationOptions {
    fn default() -> Self {
        Self {
            iteration_budget: 100,
            use_pso: true,
            optimize_ranges: true,
            optimize_rules: true,
        }
    }
}

/// Error metrics of a configuration, without the per-sample detail.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    pub mae: f64,
    pub rmse: f64,
    pub accuracy: f64,
}

impl From<&EvaluationResult> for PerformanceSummary {
    fn from(result: &EvaluationResult) -> Self {
        Self {
            mae: result.mae,
            rmse: result.rmse,
            accuracy: result.accuracy,
        }
    }
}

/// Best parameters found by a search, with their evaluated performance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResult {
    pub best_rules: Vec<Rule>,
    pub best_settings: MembershipSettings,
    pub best_performance: PerformanceSummary,
}

/// Snapshot passed to the progress observer after each iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimizationProgress {
    /// Completed iterations, starting at 1.
    pub iteration: usize,
    pub iteration_budget: usize,
    pub best_mae: f64,
}

/// Best candidate seen so far. `model` stays `None` until some candidate
/// strictly improves on the starting MAE, so the caller's exact
/// configuration (not a repaired copy of it) is returned when nothing won.
struct BestTracker {
    mae: f64,
    summary: PerformanceSummary,
    model: Option<(MembershipSettings, Vec<Rule>)>,
}

impl BestTracker {
    fn observe(&mut self, result: &EvaluationResult, settings: MembershipSettings, rules: Vec<Rule>) {
        if result.mae < self.mae {
            self.mae = result.mae;
            self.summary = result.into();
            self.model = Some((settings, rules));
        }
    }
}

/// Search for parameters that minimize MAE over `dataset`.
///
/// Randomness comes entirely from `rng`; seed it with
/// [`fastrand::Rng::with_seed`] for reproducible runs.
pub fn optimize(
    dataset: &[SampleRecord],
    rules: &[Rule],
    settings: &MembershipSettings,
    options: &OptimizationOptions,
    rng: &mut fastrand::Rng,
) -> Result<OptimizationResult> {
    optimize_with_observer(dataset, rules, settings, options, rng, &mut |_| true)
}

/// Like [`optimize`], reporting progress after every iteration.
///
/// The observer returning `false` cancels the search; the best result found
/// up to that point is returned.
pub fn optimize_with_observer(
    dataset: &[SampleRecord],
    rules: &[Rule],
    settings: &MembershipSettings,
    options: &OptimizationOptions,
    rng: &mut fastrand::Rng,
    observer: &mut dyn FnMut(&OptimizationProgress) -> bool,
) -> Result<OptimizationResult> {
    settings.validate()?;
    if dataset.is_empty() {
        return Err(FuzzyLocError::EmptyDataset);
    }

    let initial = evaluate_unchecked(dataset, rules, settings);
    let space = ParamSpace::new(settings, rules, options);

    let mut tracker = BestTracker {
        mae: initial.mae,
        summary: (&initial).into(),
        model: None,
    };

    // Nothing to do with an exhausted budget or no movable parameters;
    // either way the search degenerates to the initial evaluation.
    if options.iteration_budget > 0 && space.active_len() > 0 {
        info!(
            budget = options.iteration_budget,
            pso = options.use_pso,
            parameters = space.active_len(),
            initial_mae = initial.mae,
            "starting parameter search"
        );

        if options.use_pso {
            run_particle_swarm(
                dataset, rules, settings, options, &space, &mut tracker, rng, observer,
            );
        } else {
            run_random_search(
                dataset, rules, settings, options, &space, &mut tracker, rng, observer,
            );
        }

        info!(
            initial_mae = initial.mae,
            best_mae = tracker.mae,
            "parameter search finished"
        );
    }

    let (best_settings, best_rules) = tracker
        .model
        .unwrap_or_else(|| (settings.clone(), rules.to_vec()));

    Ok(OptimizationResult {
        best_rules,
        best_settings,
        best_performance: tracker.summary,
    })
}

/// Random local search: every round perturbs a fresh clone of the initial
/// vector, repairs it, and keeps it only on strict MAE improvement.
#[allow(clippy::too_many_arguments)]
fn run_random_search(
    dataset: &[SampleRecord],
    rules: &[Rule],
    settings: &MembershipSettings,
    options: &OptimizationOptions,
    space: &ParamSpace,
    tracker: &mut BestTracker,
    rng: &mut fastrand::Rng,
    observer: &mut dyn FnMut(&OptimizationProgress) -> bool,
) {
    let initial_vector = space.encode(settings, rules);

    for iteration in 0..options.iteration_budget {
        let mut candidate = initial_vector.clone();
        space.perturb(&mut candidate, rng);
        let (candidate_settings, candidate_rules) =
            space.materialize(&mut candidate, settings, rules);

        let result = evaluate_unchecked(dataset, &candidate_rules, &candidate_settings);
        tracker.observe(&result, candidate_settings, candidate_rules);

        if iteration % 10 == 0 {
            debug!(iteration, best_mae = tracker.mae, "random search progress");
        }
        let keep_going = observer(&OptimizationProgress {
            iteration: iteration + 1,
            iteration_budget: options.iteration_budget,
            best_mae: tracker.mae,
        });
        if !keep_going {
            debug!(iteration, "search canceled by observer");
            return;
        }
    }
}

/// Particle swarm over the flattened parameter vector.
#[allow(clippy::too_many_arguments)]
fn run_particle_swarm(
    dataset: &[SampleRecord],
    rules: &[Rule],
    settings: &MembershipSettings,
    options: &OptimizationOptions,
    space: &ParamSpace,
    tracker: &mut BestTracker,
    rng: &mut fastrand::Rng,
    observer: &mut dyn FnMut(&OptimizationProgress) -> bool,
) {
    let num_particles = (options.iteration_budget / 5).min(20);
    let initial_vector = space.encode(settings, rules);
    let config = SwarmConfig {
        num_particles,
        ..SwarmConfig::default()
    };

    let mut swarm = ParticleSwarm::new(&initial_vector, tracker.mae, config, space.frozen_mask(), rng);

    for iteration in 0..options.iteration_budget {
        swarm.iterate(rng, &mut |position| {
            let (candidate_settings, candidate_rules) =
                space.materialize(position, settings, rules);
            let result = evaluate_unchecked(dataset, &candidate_rules, &candidate_settings);
            let mae = result.mae;
            tracker.observe(&result, candidate_settings, candidate_rules);
            mae
        });

        if iteration % 10 == 0 {
            debug!(
                iteration,
                particles = num_particles,
                best_mae = tracker.mae,
                "swarm progress"
            );
        }
        let keep_going = observer(&OptimizationProgress {
            iteration: iteration + 1,
            iteration_budget: options.iteration_budget,
            best_mae: tracker.mae,
        });
        if !keep_going {
            debug!(iteration, "search canceled by observer");
            return;
        }
    }

    debug!(swarm_best = swarm.best_score(), "swarm exhausted its budget");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::reference_dataset;
    use crate::defaults::{default_membership_settings, default_rules};
    use crate::evaluation::evaluate;

    fn options(use_pso: bool, ranges: bool, rules: bool, budget: usize) -> OptimizationOptions {
        OptimizationOptions {
            iteration_budget: budget,
            use_pso,
            optimize_ranges: ranges,
            optimize_rules: rules,
        }
    }

    #[test]
    fn test_zero_budget_returns_initial_evaluation() {
        let dataset = reference_dataset();
        let settings = default_membership_settings(5).unwrap();
        let rules = default_rules(5).unwrap();
        let initial = evaluate(&dataset, &rules, &settings).unwrap();

        for use_pso in [false, true] {
            let mut rng = fastrand::Rng::with_seed(1);
            let result = optimize(
                &dataset,
                &rules,
                &settings,
                &options(use_pso, true, true, 0),
                &mut rng,
            )
            .unwrap();

            assert_eq!(result.best_settings, settings);
            assert_eq!(result.best_rules, rules);
            assert_eq!(result.best_performance.mae, initial.mae);
            assert_eq!(result.best_performance.rmse, initial.rmse);
            assert_eq!(result.best_performance.accuracy, initial.accuracy);
        }
    }

    #[test]
    fn test_no_option_flags_is_a_noop() {
        let dataset = reference_dataset();
        let settings = default_membership_settings(3).unwrap();
        let rules = default_rules(3).unwrap();
        let initial = evaluate(&dataset, &rules, &settings).unwrap();

        let mut rng = fastrand::Rng::with_seed(2);
        let result = optimize(
            &dataset,
            &rules,
            &settings,
            &options(true, false, false, 50),
            &mut rng,
        )
        .unwrap();

        assert_eq!(result.best_settings, settings);
        assert_eq!(result.best_rules, rules);
        assert_eq!(result.best_performance.mae, initial.mae);
    }

    #[test]
    fn test_search_never_regresses() {
        let dataset = reference_dataset();
        let settings = default_membership_settings(5).unwrap();
        let rules = default_rules(5).unwrap();
        let initial = evaluate(&dataset, &rules, &settings).unwrap();

        for use_pso in [false, true] {
            for (optimize_ranges, optimize_rules) in [(true, false), (false, true), (true, true)] {
                let mut rng = fastrand::Rng::with_seed(33);
                let result = optimize(
                    &dataset,
                    &rules,
                    &settings,
                    &options(use_pso, optimize_ranges, optimize_rules, 30),
                    &mut rng,
                )
                .unwrap();

                assert!(
                    result.best_performance.mae <= initial.mae + 1e-12,
                    "regressed with pso={use_pso} ranges={optimize_ranges} rules={optimize_rules}"
                );
            }
        }
    }

    #[test]
    fn test_seeded_search_is_deterministic() {
        let dataset = reference_dataset();
        let settings = default_membership_settings(5).unwrap();
        let rules = default_rules(5).unwrap();

        for use_pso in [false, true] {
            let run = |seed: u64| {
                let mut rng = fastrand::Rng::with_seed(seed);
                optimize(
                    &dataset,
                    &rules,
                    &settings,
                    &options(use_pso, true, true, 25),
                    &mut rng,
                )
                .unwrap()
            };

            assert_eq!(run(42), run(42));
        }
    }

    #[test]
    fn test_caller_configuration_is_not_mutated() {
        let dataset = reference_dataset();
        let settings = default_membership_settings(5).unwrap();
        let rules = default_rules(5).unwrap();
        let settings_before = settings.clone();
        let rules_before = rules.clone();

        let mut rng = fastrand::Rng::with_seed(8);
        optimize(
            &dataset,
            &rules,
            &settings,
            &options(true, true, true, 20),
            &mut rng,
        )
        .unwrap();

        assert_eq!(settings, settings_before);
        assert_eq!(rules, rules_before);

        // Evaluating the untouched originals reproduces the same score.
        let a = evaluate(&dataset, &rules_before, &settings_before).unwrap();
        let b = evaluate(&dataset, &rules, &settings).unwrap();
        assert_eq!(a.mae, b.mae);
    }

    #[test]
    fn test_observer_can_cancel_search() {
        let dataset = reference_dataset();
        let settings = default_membership_settings(3).unwrap();
        let rules = default_rules(3).unwrap();
        let initial = evaluate(&dataset, &rules, &settings).unwrap();

        let mut calls = 0usize;
        let mut rng = fastrand::Rng::with_seed(13);
        let result = optimize_with_observer(
            &dataset,
            &rules,
            &settings,
            &options(false, true, true, 100),
            &mut rng,
            &mut |progress| {
                calls += 1;
                assert_eq!(progress.iteration, calls);
                assert_eq!(progress.iteration_budget, 100);
                false
            },
        )
        .unwrap();

        assert_eq!(calls, 1);
        assert!(result.best_performance.mae <= initial.mae + 1e-12);
    }

    #[test]
    fn test_empty_dataset_is_rejected() {
        let settings = default_membership_settings(3).unwrap();
        let rules = default_rules(3).unwrap();

        let mut rng = fastrand::Rng::with_seed(4);
        assert_eq!(
            optimize(&[], &rules, &settings, &OptimizationOptions::default(), &mut rng),
            Err(FuzzyLocError::EmptyDataset)
        );
    }
}
