//! Amortization engine: monthly payment, schedule and aggregate figures
//!
//! Every function is pure. Results are never rounded; currency rounding is
//! left to whoever displays them.

mod payment;
mod schedule;
mod summary;

pub use payment::{calculate_monthly_payment, calculate_total_cost, calculate_total_interest};
pub use schedule::{generate_amortization_schedule, AmortizationEntry, AmortizationSchedule};
pub use summary::Summary;
