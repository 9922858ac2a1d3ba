use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::FinCalcError;
use crate::types::{Money, Percent, Rate};
use crate::FinCalcResult;

const HUNDRED: Decimal = dec!(100);

pub const MONTHS_PER_YEAR: u32 = 12;

/// Convert a user-facing percentage into a decimal rate (12 -> 0.12).
pub fn pct_to_rate(pct: Percent) -> Rate {
    pct / HUNDRED
}

/// Nominal monthly rate for an annual percentage: `pct / 100 / 12`.
///
/// This is a simple division, not the compounding-equivalent rate, so
/// twelve months at 1% grow slightly faster than one year at 12%.
pub fn monthly_rate(annual_pct: Percent) -> Rate {
    annual_pct / HUNDRED / Decimal::from(MONTHS_PER_YEAR)
}

/// One period of growth: `amount * (1 + rate)`.
pub fn grow(amount: Money, rate: Rate, context: &str) -> FinCalcResult<Money> {
    amount
        .checked_mul(Decimal::ONE + rate)
        .ok_or_else(|| FinCalcError::overflow(context))
}

/// Raise `amount` by a percentage: `amount * (1 + pct / 100)`.
pub fn escalate(amount: Money, pct: Percent, context: &str) -> FinCalcResult<Money> {
    grow(amount, pct_to_rate(pct), context)
}

/// `amount * rate` with overflow reported instead of panicking.
pub fn mul(amount: Money, rate: Decimal, context: &str) -> FinCalcResult<Money> {
    amount
        .checked_mul(rate)
        .ok_or_else(|| FinCalcError::overflow(context))
}

/// `a + b` with overflow reported instead of panicking.
pub fn add(a: Money, b: Money, context: &str) -> FinCalcResult<Money> {
    a.checked_add(b).ok_or_else(|| FinCalcError::overflow(context))
}

/// `a / b` with overflow and division by zero reported instead of panicking.
pub fn div(a: Decimal, b: Decimal, context: &str) -> FinCalcResult<Decimal> {
    a.checked_div(b).ok_or_else(|| FinCalcError::overflow(context))
}

/// Compute (1 + r)^n via iterative multiplication (avoids Decimal::powd drift).
pub fn compound(rate: Rate, n: u32) -> FinCalcResult<Decimal> {
    let mut result = Decimal::ONE;
    for _ in 0..n {
        result = grow(result, rate, "compound factor")?;
    }
    Ok(result)
}

/// Level payment per period that accumulates to `fv` after `n` periods:
/// FV = pmt * [((1+r)^n - 1) / r]  =>  pmt = FV * r / ((1+r)^n - 1)
pub fn fv_annuity_payment(fv: Money, rate: Rate, n: u32) -> FinCalcResult<Money> {
    if n == 0 {
        return Ok(Decimal::ZERO);
    }
    let denom = if rate.is_zero() {
        Decimal::ZERO
    } else {
        compound(rate, n)? - Decimal::ONE
    };
    if denom.is_zero() {
        return div(fv, Decimal::from(n), "annuity payment");
    }
    div(mul(fv, rate, "annuity payment")?, denom, "annuity payment")
}
