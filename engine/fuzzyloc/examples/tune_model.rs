//! End-to-end walkthrough: build the default model, score it against the
//! reference dataset, then let the particle swarm tune it.
//!
//! Run with: `cargo run --example tune_model`

use anyhow::Result;
use fuzzyloc::{
    default_membership_settings, default_rules, evaluate, infer, optimize_with_observer,
    reference_dataset, InputVector, OptimizationOptions,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let settings = default_membership_settings(5)?;
    let rules = default_rules(5)?;
    let dataset = reference_dataset();

    // Single prediction with per-rule explainability.
    let prediction = infer(
        &InputVector {
            anchor_ratio: 20.0,
            trans_range: 40.0,
            node_density: 12.0,
            iterations: 55.0,
        },
        &rules,
        &settings,
    );
    println!("predicted ALE: {:.3}", prediction.result);
    let mut firing: Vec<_> = prediction
        .activations
        .iter()
        .filter(|a| a.strength > 0.0)
        .collect();
    firing.sort_by(|a, b| b.strength.total_cmp(&a.strength));
    for activation in firing.iter().take(5) {
        println!(
            "  {} -> {} (strength {:.3})",
            activation.rule_name, activation.output, activation.strength
        );
    }

    // Baseline quality of the default model.
    let initial = evaluate(&dataset, &rules, &settings)?;
    println!(
        "\ninitial:   MAE {:.4}  RMSE {:.4}  accuracy {:.1}%",
        initial.mae, initial.rmse, initial.accuracy
    );

    // Swarm search over range boundaries and rule weights.
    let options = OptimizationOptions {
        iteration_budget: 200,
        use_pso: true,
        optimize_ranges: true,
        optimize_rules: true,
    };
    let mut rng = fastrand::Rng::new();
    let tuned = optimize_with_observer(
        &dataset,
        &rules,
        &settings,
        &options,
        &mut rng,
        &mut |progress| {
            if progress.iteration % 50 == 0 {
                println!(
                    "  iteration {}/{}: best MAE {:.4}",
                    progress.iteration, progress.iteration_budget, progress.best_mae
                );
            }
            true
        },
    )?;

    println!(
        "optimized: MAE {:.4}  RMSE {:.4}  accuracy {:.1}%",
        tuned.best_performance.mae, tuned.best_performance.rmse, tuned.best_performance.accuracy
    );

    Ok(())
}
