//! Aggregate loan figures

use serde::{Deserialize, Serialize};

use super::payment::{calculate_monthly_payment, calculate_total_cost, calculate_total_interest};
use crate::error::MortgageResult;
use crate::loan::LoanTerms;

/// Payment, lifetime interest and total cost of a loan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub monthly_payment: f64,
    pub total_interest: f64,
    pub total_cost: f64,
}

impl Summary {
    /// Closed-form summary without building a schedule
    pub fn from_terms(terms: &LoanTerms) -> MortgageResult<Self> {
        let monthly_payment =
            calculate_monthly_payment(terms.principal, terms.annual_rate_percent, terms.years)?;
        let total_interest = calculate_total_interest(terms.principal, monthly_payment, terms.years);

        Ok(Self {
            monthly_payment,
            total_interest,
            total_cost: calculate_total_cost(terms.principal, total_interest),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_summary_from_terms() {
        let summary = Summary::from_terms(&LoanTerms::default()).unwrap();
        assert_abs_diff_eq!(summary.monthly_payment, 1073.64, epsilon = 0.01);
        assert_abs_diff_eq!(summary.total_interest, 186_510.57, epsilon = 0.01);
        assert_abs_diff_eq!(summary.total_cost, 386_510.57, epsilon = 0.01);
    }

    #[test]
    fn test_schedule_summary_matches_closed_form() {
        let terms = LoanTerms::new(350_000.0, 6.5, 25);
        let closed = Summary::from_terms(&terms).unwrap();
        let from_schedule = terms.schedule().unwrap().summary();

        assert_eq!(from_schedule.monthly_payment, closed.monthly_payment);
        assert_abs_diff_eq!(from_schedule.total_interest, closed.total_interest, epsilon = 1e-4);
        assert_abs_diff_eq!(from_schedule.total_cost, closed.total_cost, epsilon = 1e-4);
    }

    #[test]
    fn test_invalid_terms_propagate() {
        assert!(Summary::from_terms(&LoanTerms::new(100_000.0, 5.0, 0)).is_err());
    }
}
