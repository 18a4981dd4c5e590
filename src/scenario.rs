//! Scenario runner for comparing loan terms
//!
//! Holds a set of base terms and evaluates variations of them (different
//! rates or durations) in parallel.

use rayon::prelude::*;
use serde::Serialize;

use crate::amortization::{AmortizationSchedule, Summary};
use crate::error::MortgageResult;
use crate::loan::LoanTerms;

/// Outcome of one scenario
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioResult {
    pub terms: LoanTerms,
    pub summary: Summary,
}

/// Runs variations of a base set of loan terms
///
/// # Example
/// ```
/// use mortgage_calculator::{LoanTerms, ScenarioRunner};
///
/// let runner = ScenarioRunner::new(LoanTerms::new(300_000.0, 5.0, 30));
/// let results = runner.rate_sweep(&[4.0, 5.0, 6.0]).unwrap();
/// assert!(results[2].summary.monthly_payment > results[0].summary.monthly_payment);
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base_terms: LoanTerms,
}

impl ScenarioRunner {
    pub fn new(base_terms: LoanTerms) -> Self {
        Self { base_terms }
    }

    pub fn base_terms(&self) -> &LoanTerms {
        &self.base_terms
    }

    /// Full schedule for the base terms
    pub fn run(&self) -> MortgageResult<AmortizationSchedule> {
        self.base_terms.schedule()
    }

    /// Summaries for many terms, in input order
    ///
    /// Fails if any of the terms are invalid.
    pub fn run_batch(&self, terms: &[LoanTerms]) -> MortgageResult<Vec<ScenarioResult>> {
        log::debug!("Running {} loan scenarios", terms.len());

        terms
            .par_iter()
            .map(|t| {
                Summary::from_terms(t).map(|summary| ScenarioResult {
                    terms: *t,
                    summary,
                })
            })
            .collect()
    }

    /// Base terms evaluated at each annual rate
    pub fn rate_sweep(&self, rates: &[f64]) -> MortgageResult<Vec<ScenarioResult>> {
        let terms: Vec<LoanTerms> = rates
            .iter()
            .map(|&rate| LoanTerms {
                annual_rate_percent: rate,
                ..self.base_terms
            })
            .collect();
        self.run_batch(&terms)
    }

    /// Base terms evaluated at each duration
    pub fn duration_sweep(&self, years: &[i32]) -> MortgageResult<Vec<ScenarioResult>> {
        let terms: Vec<LoanTerms> = years
            .iter()
            .map(|&y| LoanTerms {
                years: y,
                ..self.base_terms
            })
            .collect();
        self.run_batch(&terms)
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new(LoanTerms::default())
    }
}
