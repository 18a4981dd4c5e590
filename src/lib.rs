//! Mortgage Calculator - fixed-rate amortization engine
//!
//! This library provides:
//! - Monthly payment, total interest and total cost of a fixed-rate loan
//! - Month-by-month amortization schedules
//! - Yearly breakdowns, cost splits, due dates and CSV export
//! - Import/export of the raw-terms mortgage document (JSON)
//! - Parallel comparison of loan scenarios

pub mod error;
pub mod loan;
pub mod amortization;
pub mod report;
pub mod scenario;
pub mod config;

// Re-export commonly used types
pub use error::{InputConstraint, MortgageError, MortgageResult};
pub use loan::{LoanTerms, MortgageDocument};
pub use amortization::{
    calculate_monthly_payment, calculate_total_cost, calculate_total_interest,
    generate_amortization_schedule, AmortizationEntry, AmortizationSchedule, Summary,
};
pub use scenario::{ScenarioRunner, ScenarioResult};
