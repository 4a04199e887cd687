//! Scenario runner and named scenario storage
//!
//! Each projection is a pure function of its inputs, so batches and
//! comparisons fan out across threads without any shared state.

pub mod store;

use rayon::prelude::*;
use serde::Serialize;

use crate::inputs::InvestmentInputs;
use crate::projection::{Metrics, ProjectionEngine, ProjectionResult};

pub use store::{NamedScenario, SaveOutcome, ScenarioStore, DEFAULT_STORE_PATH};

/// Metrics for one named scenario in a comparison
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioComparison {
    pub name: String,
    pub metrics: Metrics,
}

/// Runner for batches of projections around a base input record
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::with_inputs(InvestmentInputs::example());
///
/// // Sensitivity to the loan rate
/// let results = runner.run_sensitivity([1.5, 2.5, 3.5], |inputs, rate| {
///     inputs.interest_rate_percent = rate;
/// });
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base_inputs: InvestmentInputs,
}

impl ScenarioRunner {
    /// Create runner around the reference scenario
    pub fn new() -> Self {
        Self {
            base_inputs: InvestmentInputs::example(),
        }
    }

    pub fn with_inputs(inputs: InvestmentInputs) -> Self {
        Self {
            base_inputs: inputs,
        }
    }

    /// Project the base inputs
    pub fn run(&self) -> ProjectionResult {
        ProjectionEngine::new(self.base_inputs.clone()).run()
    }

    /// Project independent input records in parallel, preserving order
    pub fn run_batch(&self, variants: &[InvestmentInputs]) -> Vec<ProjectionResult> {
        variants
            .par_iter()
            .map(|inputs| ProjectionEngine::new(inputs.clone()).run())
            .collect()
    }

    /// Project one variant of the base inputs per value
    pub fn run_sensitivity<T, I, F>(&self, values: I, apply: F) -> Vec<ProjectionResult>
    where
        I: IntoIterator<Item = T>,
        F: Fn(&mut InvestmentInputs, T),
    {
        let variants: Vec<_> = values
            .into_iter()
            .map(|value| {
                let mut inputs = self.base_inputs.clone();
                apply(&mut inputs, value);
                inputs
            })
            .collect();
        self.run_batch(&variants)
    }

    pub fn inputs(&self) -> &InvestmentInputs {
        &self.base_inputs
    }

    pub fn inputs_mut(&mut self) -> &mut InvestmentInputs {
        &mut self.base_inputs
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// Project every scenario and collect its metrics, in input order
pub fn compare(scenarios: &[NamedScenario]) -> Vec<ScenarioComparison> {
    log::debug!("comparing {} scenario(s)", scenarios.len());
    scenarios
        .par_iter()
        .map(|scenario| ScenarioComparison {
            name: scenario.name.clone(),
            metrics: ProjectionEngine::new(scenario.inputs.clone()).run().metrics,
        })
        .collect()
}
