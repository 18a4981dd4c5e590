//! Reports built on top of a generated schedule
//!
//! Yearly principal/interest totals, the principal vs. interest split of total
//! cost, calendar due dates and CSV export. None of these feed back into the
//! engine.

use std::io::Write;

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::amortization::{AmortizationEntry, AmortizationSchedule, Summary};
use crate::error::{MortgageError, MortgageResult};

/// Principal and interest paid during one loan year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyBreakdown {
    /// Loan year, 1-based
    pub year: u32,
    pub principal: f64,
    pub interest: f64,
}

impl YearlyBreakdown {
    pub fn total(&self) -> f64 {
        self.principal + self.interest
    }
}

/// Split of total cost into principal and interest
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub principal: f64,
    pub interest: f64,
    /// Fraction of total cost that is principal
    pub principal_share: f64,
    /// Fraction of total cost that is interest
    pub interest_share: f64,
}

/// A schedule entry with its calendar due date
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduledPayment {
    pub due_date: NaiveDate,
    #[serde(flatten)]
    pub entry: AmortizationEntry,
}

/// Sum principal and interest portions per loan year
///
/// Year `y` covers months `(y-1)*12 + 1 ..= y*12`.
pub fn yearly_breakdown(schedule: &AmortizationSchedule) -> Vec<YearlyBreakdown> {
    schedule
        .entries()
        .chunks(12)
        .zip(1u32..)
        .map(|(months, year)| YearlyBreakdown {
            year,
            principal: months.iter().map(|e| e.principal_portion).sum(),
            interest: months.iter().map(|e| e.interest_portion).sum(),
        })
        .collect()
}

/// Principal vs. interest share of the total cost
pub fn cost_breakdown(summary: &Summary) -> CostBreakdown {
    let principal = summary.total_cost - summary.total_interest;
    let interest = summary.total_interest;

    let (principal_share, interest_share) = if summary.total_cost > 0.0 {
        (principal / summary.total_cost, interest / summary.total_cost)
    } else {
        (0.0, 0.0)
    };

    CostBreakdown {
        principal,
        interest,
        principal_share,
        interest_share,
    }
}

/// Attach due dates: payment `n` falls due `n - 1` months after `start`
///
/// Days past the end of a shorter month clamp to its last day.
pub fn payment_dates(schedule: &AmortizationSchedule, start: NaiveDate) -> MortgageResult<Vec<ScheduledPayment>> {
    schedule
        .iter()
        .map(|entry| {
            let due_date = start
                .checked_add_months(Months::new(entry.month - 1))
                .ok_or(MortgageError::DateOutOfRange { start, month: entry.month })?;
            Ok(ScheduledPayment { due_date, entry: *entry })
        })
        .collect()
}

/// Write the schedule as CSV with a header row, at full precision
pub fn write_schedule_csv<W: Write>(schedule: &AmortizationSchedule, writer: W) -> MortgageResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for entry in schedule {
        csv_writer.serialize(entry)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Round to whole cents for display
pub fn round_currency(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
