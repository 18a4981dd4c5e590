//! Closed-form payment and aggregate formulas

use crate::error::{InputConstraint, MortgageResult};
use crate::loan::LoanTerms;

/// Calculate the fixed monthly payment of an amortizing loan
///
/// `payment = P * r / (1 - (1 + r)^-n)` with `r = annual% / 12 / 100` and
/// `n = years * 12`. A zero rate repays in equal straight-line instalments
/// `P / n`.
///
/// # Errors
/// `InvalidInput` when `years * 12 <= 0`, the principal is not positive, the
/// rate is negative, either float is not finite, or the payment itself
/// overflows.
pub fn calculate_monthly_payment(principal: f64, annual_rate_percent: f64, years: i32) -> MortgageResult<f64> {
    let terms = LoanTerms::new(principal, annual_rate_percent, years);

    let total_payments = terms.total_payments();
    if total_payments <= 0 {
        return Err(InputConstraint::NonPositiveTotalPayments(total_payments).into());
    }
    terms.validate()?;

    payment_for(&terms)
}

/// Payment for terms that already passed validation
///
/// Rates so small that the discount factor underflows repay straight-line.
/// Terms whose payment (or payments over the full term) overflow are rejected.
pub(crate) fn payment_for(terms: &LoanTerms) -> MortgageResult<f64> {
    let monthly_rate = terms.monthly_rate();
    let n = terms.total_payments() as f64;

    let payment = if monthly_rate == 0.0 {
        terms.principal / n
    } else {
        // 1 - (1 + r)^-n, evaluated without cancellation for rates near zero
        let discount = -(-n * monthly_rate.ln_1p()).exp_m1();
        let interest = terms.principal * monthly_rate;

        if discount == 0.0 || interest == 0.0 {
            log::warn!("Rate {} too small to amortize, using straight-line payment", monthly_rate);
            terms.principal / n
        } else {
            interest / discount
        }
    };

    if !payment.is_finite() {
        return Err(InputConstraint::NonFinite {
            field: "monthly payment",
            value: payment,
        }
        .into());
    }
    if !(payment * n).is_finite() {
        return Err(InputConstraint::NonFinite {
            field: "total paid",
            value: payment * n,
        }
        .into());
    }

    Ok(payment)
}

/// Interest paid over the life of the loan: `payment * years * 12 - principal`
///
/// Negative only when `monthly_payment` did not come from
/// [`calculate_monthly_payment`] for the same terms.
pub fn calculate_total_interest(principal: f64, monthly_payment: f64, years: i32) -> f64 {
    let total_payments = i64::from(years) * 12;
    monthly_payment * total_payments as f64 - principal
}

/// Total amount repaid: principal plus interest
pub fn calculate_total_cost(principal: f64, total_interest: f64) -> f64 {
    principal + total_interest
}
