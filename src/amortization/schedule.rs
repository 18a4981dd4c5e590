//! Month-by-month amortization schedule

use serde::{Deserialize, Serialize};

use super::payment::payment_for;
use super::summary::Summary;
use crate::error::{InputConstraint, MortgageResult};
use crate::loan::LoanTerms;

/// One scheduled monthly payment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationEntry {
    /// Payment number, 1-based
    pub month: u32,

    /// Fixed payment, identical for every entry of a schedule
    pub monthly_payment: f64,

    /// Part of the payment that reduces the balance
    pub principal_portion: f64,

    /// Part of the payment charged as interest on the opening balance
    pub interest_portion: f64,

    /// Cumulative payments through this month
    pub total_paid: f64,

    /// Outstanding principal after this month's payment
    pub remaining_balance: f64,
}

/// Complete schedule for one set of loan terms, ordered by month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    /// Terms the schedule was generated from
    pub terms: LoanTerms,

    /// Monthly entries
    pub entries: Vec<AmortizationEntry>,
}

impl AmortizationSchedule {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[AmortizationEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AmortizationEntry> {
        self.entries.iter()
    }

    pub fn first(&self) -> Option<&AmortizationEntry> {
        self.entries.first()
    }

    pub fn last(&self) -> Option<&AmortizationEntry> {
        self.entries.last()
    }

    /// Fixed payment of this schedule
    pub fn monthly_payment(&self) -> f64 {
        self.entries.first().map(|e| e.monthly_payment).unwrap_or(0.0)
    }

    /// Sum of all principal portions; approximately the original principal
    pub fn total_principal(&self) -> f64 {
        self.entries.iter().map(|e| e.principal_portion).sum()
    }

    /// Sum of all interest portions
    pub fn total_interest(&self) -> f64 {
        self.entries.iter().map(|e| e.interest_portion).sum()
    }

    /// Balance left after the final payment (floating-point residual)
    pub fn final_balance(&self) -> f64 {
        self.entries.last().map(|e| e.remaining_balance).unwrap_or(0.0)
    }

    /// Aggregate figures built from the entries themselves
    pub fn summary(&self) -> Summary {
        let total_interest = self.total_interest();
        Summary {
            monthly_payment: self.monthly_payment(),
            total_interest,
            total_cost: self.terms.principal + total_interest,
        }
    }
}

impl<'a> IntoIterator for &'a AmortizationSchedule {
    type Item = &'a AmortizationEntry;
    type IntoIter = std::slice::Iter<'a, AmortizationEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Generate the full amortization schedule
///
/// Each month's interest is charged on the previous month's closing balance,
/// so the periods are computed strictly in order. Nothing is rounded and the
/// final balance is left as computed, typically a few nano-units off zero.
///
/// The schedule holds one entry per month and the library puts no upper
/// bound on `years`: the entries are allocated up front, so a term of
/// hundreds of millions of years needs memory on the order of 100 GB. Callers
/// should cap `years` before calling (the CLI stops at
/// [`MAX_YEARS`](crate::config::MAX_YEARS)).
///
/// # Errors
/// `InvalidInput` for a non-positive principal or duration, a negative rate,
/// non-finite values, a payment that overflows, or more months than a `u32`
/// can number.
pub fn generate_amortization_schedule(
    principal: f64,
    annual_rate_percent: f64,
    years: i32,
) -> MortgageResult<AmortizationSchedule> {
    let terms = LoanTerms::new(principal, annual_rate_percent, years);
    terms.validate()?;

    let total_payments = terms.total_payments();
    let months = u32::try_from(total_payments)
        .map_err(|_| InputConstraint::TooManyPayments(total_payments))?;

    let monthly_rate = terms.monthly_rate();
    let monthly_payment = payment_for(&terms)?;

    log::debug!(
        "Generating {} month schedule: principal={:.2} rate={}% payment={:.6}",
        months,
        principal,
        annual_rate_percent,
        monthly_payment
    );

    let mut entries = Vec::with_capacity(months as usize);
    let mut remaining_balance = principal;

    for month in 1..=months {
        let interest_portion = remaining_balance * monthly_rate;
        let principal_portion = monthly_payment - interest_portion;
        remaining_balance -= principal_portion;

        entries.push(AmortizationEntry {
            month,
            monthly_payment,
            principal_portion,
            interest_portion,
            total_paid: monthly_payment * f64::from(month),
            remaining_balance,
        });
    }

    log::debug!("Schedule complete, final balance residual {:e}", remaining_balance);

    Ok(AmortizationSchedule { terms, entries })
}
