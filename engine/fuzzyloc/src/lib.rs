//! # FuzzyLoc
//!
//! Fuzzy-logic engine for predicting the average localization error (ALE)
//! of a wireless-sensor-network configuration from four crisp inputs:
//! anchor ratio, transmission range, node density, and iteration count.
//!
//! ## Features
//!
//! - **Membership functions**: triangle, trapezoid, gaussian, sigmoid over
//!   named ranges
//! - **Mamdani-style inference**: min-AND rule firing with rule weights,
//!   max aggregation, centroid defuzzification over a label table
//! - **Evaluation**: MAE / RMSE / accuracy against a labeled dataset
//! - **Parameter search**: particle-swarm and random local search over
//!   range boundaries and rule weights, with seedable randomness, progress
//!   reporting, and early cancellation
//!
//! ## Example
//!
//! ```rust
//! use fuzzyloc::{
//!     default_membership_settings, default_rules, evaluate, infer, optimize,
//!     reference_dataset, InputVector, OptimizationOptions,
//! };
//!
//! let settings = default_membership_settings(5)?;
//! let rules = default_rules(5)?;
//!
//! // Predict the localization error of one configuration.
//! let prediction = infer(
//!     &InputVector {
//!         anchor_ratio: 20.0,
//!         trans_range: 40.0,
//!         node_density: 12.0,
//!         iterations: 55.0,
//!     },
//!     &rules,
//!     &settings,
//! );
//! assert!(prediction.result > 0.0);
//!
//! // Score the model and search for better parameters.
//! let dataset = reference_dataset();
//! let initial = evaluate(&dataset, &rules, &settings)?;
//! let mut rng = fastrand::Rng::with_seed(7);
//! let tuned = optimize(
//!     &dataset,
//!     &rules,
//!     &settings,
//!     &OptimizationOptions {
//!         iteration_budget: 25,
//!         ..OptimizationOptions::default()
//!     },
//!     &mut rng,
//! )?;
//! assert!(tuned.best_performance.mae <= initial.mae);
//! # Ok::<(), fuzzyloc::FuzzyLocError>(())
//! ```

use thiserror::Error;

pub mod dataset;
pub mod defaults;
pub mod evaluation;
pub mod inference;
pub mod membership;
pub mod model;
pub mod optimizer;

mod params;
mod pso;

/// Errors reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FuzzyLocError {
    /// A caller-supplied range is malformed. Rejected when the
    /// configuration is validated, never mid-computation.
    #[error("invalid range `{name}` for {variable}: {reason}")]
    InvalidRange {
        variable: &'static str,
        name: String,
        reason: String,
    },

    /// A variable's range list disagrees with the declared set count.
    #[error("{variable} has {actual} ranges but the set count is {expected}")]
    SetCountMismatch {
        variable: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The linguistic label ladder needs an odd set count of at least 3.
    #[error("unsupported set count {0}: expected an odd count of at least 3")]
    InvalidSetCount(usize),

    /// Evaluation and optimization need at least one labeled sample.
    #[error("dataset is empty")]
    EmptyDataset,
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, FuzzyLocError>;

pub use dataset::{generate_dataset, reference_dataset, SampleRecord};
pub use defaults::{default_membership_settings, default_rules, domain};
pub use evaluation::{evaluate, EvaluationResult, SamplePrediction, ACCURACY_THRESHOLD};
pub use inference::{
    aggregate, apply_rule, defuzzify, infer, FuzzifiedInputs, InferenceResult, RuleActivation,
    NO_ACTIVATION_FALLBACK,
};
pub use membership::{fuzzify, membership, FunctionType, MembershipRange};
pub use model::{
    level_names, InputVariable, InputVector, MembershipSettings, OutputValueTable, Rule,
    RuleCondition, VariableRanges, OUTPUT_LEVELS,
};
pub use optimizer::{
    optimize, optimize_with_observer, OptimizationOptions, OptimizationProgress,
    OptimizationResult, PerformanceSummary,
};
