//! Loan terms supplied by the caller

use serde::{Deserialize, Serialize};

use crate::amortization::{self, AmortizationSchedule};
use crate::error::{InputConstraint, MortgageResult};

/// Months in a year; payments are monthly
pub const PAYMENTS_PER_YEAR: i64 = 12;

/// Terms of a fixed-rate loan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Original loan amount
    pub principal: f64,

    /// Nominal annual rate as a percentage (5.0 means 5%)
    pub annual_rate_percent: f64,

    /// Loan duration in whole years
    pub years: i32,
}

impl LoanTerms {
    pub fn new(principal: f64, annual_rate_percent: f64, years: i32) -> Self {
        Self {
            principal,
            annual_rate_percent,
            years,
        }
    }

    /// Per-period fractional rate
    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_percent / 12.0 / 100.0
    }

    /// Number of monthly payments over the full term
    pub fn total_payments(&self) -> i64 {
        i64::from(self.years) * PAYMENTS_PER_YEAR
    }

    /// Check the terms and report the first violated constraint
    pub fn validate(&self) -> MortgageResult<()> {
        if !self.principal.is_finite() {
            return Err(InputConstraint::NonFinite {
                field: "principal",
                value: self.principal,
            }
            .into());
        }
        if !self.annual_rate_percent.is_finite() {
            return Err(InputConstraint::NonFinite {
                field: "annual rate",
                value: self.annual_rate_percent,
            }
            .into());
        }
        if self.principal <= 0.0 {
            return Err(InputConstraint::NonPositivePrincipal(self.principal).into());
        }
        if self.annual_rate_percent < 0.0 {
            return Err(InputConstraint::NegativeRate(self.annual_rate_percent).into());
        }
        if self.years <= 0 {
            return Err(InputConstraint::NonPositiveDuration(i64::from(self.years)).into());
        }
        Ok(())
    }

    /// Fixed monthly payment for these terms
    pub fn monthly_payment(&self) -> MortgageResult<f64> {
        amortization::calculate_monthly_payment(self.principal, self.annual_rate_percent, self.years)
    }

    /// Full amortization schedule for these terms
    pub fn schedule(&self) -> MortgageResult<AmortizationSchedule> {
        amortization::generate_amortization_schedule(
            self.principal,
            self.annual_rate_percent,
            self.years,
        )
    }
}

impl Default for LoanTerms {
    /// 200,000 at 5% over 30 years
    fn default() -> Self {
        Self::new(200_000.0, 5.0, 30)
    }
}
