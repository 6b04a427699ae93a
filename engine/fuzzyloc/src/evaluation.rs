//! Model scoring against a labeled dataset.

use serde::Serialize;

use crate::dataset::SampleRecord;
use crate::inference::infer;
use crate::model::{MembershipSettings, Rule};
use crate::{FuzzyLocError, Result};

/// Absolute-error threshold under which a prediction counts as accurate.
pub const ACCURACY_THRESHOLD: f64 = 0.3;

/// Prediction for one sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SamplePrediction {
    pub actual: f64,
    pub predicted: f64,
    pub error: f64,
}

/// Aggregate accuracy of a model over a dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationResult {
    pub samples: Vec<SamplePrediction>,
    /// Mean absolute error.
    pub mae: f64,
    /// Root-mean-square error.
    pub rmse: f64,
    /// Percentage of samples with error below [`ACCURACY_THRESHOLD`].
    pub accuracy: f64,
}

/// Evaluate a model configuration against every record of a dataset.
///
/// The settings are validated up front and an empty dataset is rejected
/// before any metric is computed, so the division by the sample count can
/// never be a division by zero.
pub fn evaluate(
    dataset: &[SampleRecord],
    rules: &[Rule],
    settings: &MembershipSettings,
) -> Result<EvaluationResult> {
    settings.validate()?;
    if dataset.is_empty() {
        return Err(FuzzyLocError::EmptyDataset);
    }
    Ok(evaluate_unchecked(dataset, rules, settings))
}

/// Scoring core shared with the optimizer, which feeds it repaired (never
/// validated) candidate configurations over an already-checked dataset.
pub(crate) fn evaluate_unchecked(
    dataset: &[SampleRecord],
    rules: &[Rule],
    settings: &MembershipSettings,
) -> EvaluationResult {
    let samples: Vec<SamplePrediction> = dataset
        .iter()
        .map(|record| {
            let predicted = infer(&record.inputs(), rules, settings).result;
            SamplePrediction {
                actual: record.actual,
                predicted,
                error: (record.actual - predicted).abs(),
            }
        })
        .collect();

    let n = samples.len() as f64;
    let mae = samples.iter().map(|s| s.error).sum::<f64>() / n;
    let rmse = (samples.iter().map(|s| s.error * s.error).sum::<f64>() / n).sqrt();
    let accurate = samples
        .iter()
        .filter(|s| s.error < ACCURACY_THRESHOLD)
        .count();
    let accuracy = accurate as f64 / n * 100.0;

    EvaluationResult {
        samples,
        mae,
        rmse,
        accuracy,
    }
}
