use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::ParameterViolation;
use crate::time_value::{add, escalate, monthly_rate, mul, MONTHS_PER_YEAR};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::validation::{Checks, Validate};
use crate::FinCalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for a systematic withdrawal plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwpParameters {
    #[serde(alias = "initial_corpus")]
    pub initial_corpus: Money,
    /// Withdrawal taken at the end of every month of the first year.
    #[serde(alias = "monthly_withdrawal")]
    pub monthly_withdrawal: Money,
    /// Yearly increase of the withdrawal, in percent.
    #[serde(default, alias = "inflation_percentage")]
    pub inflation_percentage: Percent,
    /// Expected annual return, in percent.
    #[serde(alias = "expected_return")]
    pub expected_return: Percent,
    pub years: u32,
}

/// One simulated month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwpMonth {
    pub month: u32,
    /// Balance after the withdrawal, never negative.
    pub balance: Money,
    /// Amount actually withdrawn this month.
    pub withdrawal: Money,
    pub total_withdrawal: Money,
    /// Return earned this month.
    pub returns: Money,
    pub total_returns: Money,
    /// True when the scheduled withdrawal exceeded the balance and was cut.
    pub capped: bool,
}

/// Totals for a completed (or trailing partial) year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwpYear {
    pub year: u32,
    /// Scheduled monthly withdrawal in force during this year.
    pub monthly_withdrawal: Money,
    pub yearly_withdrawal: Money,
    pub yearly_returns: Money,
    pub balance: Money,
    pub partial: bool,
}

/// Output of `simulate_swp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwpResult {
    pub final_balance: Money,
    pub total_withdrawn: Money,
    pub returns_accumulated: Money,
    pub corpus_exhausted: bool,
    /// Last month in which a withdrawal was made before the corpus ran dry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exhaustion_month: Option<u32>,
    pub monthly: Vec<SwpMonth>,
    pub yearly: Vec<SwpYear>,
}

/// `exhaustion_month` split into whole years and remaining months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExhaustionPoint {
    pub years: u32,
    pub months: u32,
}

impl SwpResult {
    pub fn exhaustion_point(&self) -> Option<ExhaustionPoint> {
        self.exhaustion_month.map(|m| ExhaustionPoint {
            years: m / MONTHS_PER_YEAR,
            months: m % MONTHS_PER_YEAR,
        })
    }
}

impl Validate for SwpParameters {
    fn violations(&self) -> Vec<ParameterViolation> {
        let mut checks = Checks::new();
        checks
            .at_least(
                self.initial_corpus,
                dec!(1000),
                "initial_corpus",
                "Initial corpus must be at least ₹1,000",
            )
            .at_least(
                self.monthly_withdrawal,
                dec!(500),
                "monthly_withdrawal",
                "Monthly withdrawal must be at least ₹500",
            )
            .non_negative(
                self.inflation_percentage,
                "inflation_percentage",
                "Inflation percentage cannot be negative",
            )
            .positive(
                self.expected_return,
                "expected_return",
                "Expected return must be greater than 0%",
            )
            .years(self.years);
        checks.finish()
    }
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Project an SWP month by month.
///
/// Each month the balance earns its return first, then the scheduled
/// withdrawal is taken, capped at whatever is left. The schedule rises by
/// the inflation percentage at every year boundary before the horizon. The
/// run stops at the first month that opens with nothing left.
pub fn simulate_swp(params: &SwpParameters) -> FinCalcResult<SwpResult> {
    params.validate()?;
    run(params, params.years * MONTHS_PER_YEAR)
}

/// Same as `simulate_swp`, wrapped in the standard computation envelope.
pub fn swp_report(params: &SwpParameters) -> FinCalcResult<ComputationOutput<SwpResult>> {
    let start = Instant::now();
    let result = simulate_swp(params)?;

    let mut warnings: Vec<String> = Vec::new();
    if let Some(point) = result.exhaustion_point() {
        warnings.push(format!(
            "Corpus will be exhausted after {} years and {} months",
            point.years, point.months
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Systematic Withdrawal Plan (monthly returns, inflation-indexed withdrawals)",
        params,
        warnings,
        elapsed,
        result,
    ))
}

pub(crate) fn run(params: &SwpParameters, total_months: u32) -> FinCalcResult<SwpResult> {
    tracing::debug!(
        months = total_months,
        withdrawal = %params.monthly_withdrawal,
        "simulating SWP"
    );

    let rate = monthly_rate(params.expected_return);
    let mut balance = params.initial_corpus;
    let mut withdrawal = params.monthly_withdrawal;
    let mut total_withdrawn = Decimal::ZERO;
    let mut total_returns = Decimal::ZERO;
    let mut exhaustion_month = None;

    let mut monthly: Vec<SwpMonth> = Vec::with_capacity(total_months as usize);
    let mut yearly = Vec::new();

    for month in 1..=total_months {
        if balance <= Decimal::ZERO {
            exhaustion_month = Some(month - 1);
            break;
        }

        let period_return = mul(balance, rate, "SWP monthly return")?;
        balance = add(balance, period_return, "SWP balance growth")?;
        total_returns = add(total_returns, period_return, "SWP total returns")?;

        let capped = withdrawal > balance;
        let actual = withdrawal.min(balance);
        balance -= actual;
        total_withdrawn = add(total_withdrawn, actual, "SWP total withdrawn")?;

        monthly.push(SwpMonth {
            month,
            balance: balance.max(Decimal::ZERO),
            withdrawal: actual,
            total_withdrawal: total_withdrawn,
            returns: period_return,
            total_returns,
            capped,
        });

        if month % MONTHS_PER_YEAR == 0 && month < total_months {
            let scheduled = withdrawal;
            withdrawal = escalate(withdrawal, params.inflation_percentage, "SWP inflation")?;
            yearly.push(summarize(
                &monthly,
                MONTHS_PER_YEAR,
                month / MONTHS_PER_YEAR,
                scheduled,
                false,
            ));
        }
    }

    let corpus_exhausted = exhaustion_month.is_some();
    let remainder = total_months % MONTHS_PER_YEAR;
    if !corpus_exhausted && remainder != 0 {
        yearly.push(summarize(
            &monthly,
            remainder,
            total_months.div_ceil(MONTHS_PER_YEAR),
            withdrawal,
            true,
        ));
    }

    if let Some(month) = exhaustion_month {
        tracing::warn!(month, "SWP corpus exhausted before the horizon");
    }
    tracing::debug!(final_balance = %balance, withdrawn = %total_withdrawn, "SWP complete");

    Ok(SwpResult {
        final_balance: balance.max(Decimal::ZERO),
        total_withdrawn,
        returns_accumulated: total_returns,
        corpus_exhausted,
        exhaustion_month,
        monthly,
        yearly,
    })
}

// Totals over the trailing `span` months.
fn summarize(
    monthly: &[SwpMonth],
    span: u32,
    year: u32,
    scheduled: Money,
    partial: bool,
) -> SwpYear {
    let window = &monthly[monthly.len().saturating_sub(span as usize)..];
    SwpYear {
        year,
        monthly_withdrawal: scheduled,
        yearly_withdrawal: window.iter().map(|m| m.withdrawal).sum(),
        yearly_returns: window.iter().map(|m| m.returns).sum(),
        balance: window.last().map_or(Decimal::ZERO, |m| m.balance),
        partial,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FinCalcError;
    use rust_decimal_macros::dec;

    fn default_params() -> SwpParameters {
        SwpParameters {
            initial_corpus: dec!(1_000_000),
            monthly_withdrawal: dec!(5_000),
            inflation_percentage: dec!(6),
            expected_return: dec!(8),
            years: 10,
        }
    }

    fn draining_params() -> SwpParameters {
        SwpParameters {
            initial_corpus: dec!(100_000),
            monthly_withdrawal: dec!(50_000),
            inflation_percentage: Decimal::ZERO,
            expected_return: dec!(1),
            years: 1,
        }
    }

    // ---------------------------------------------------------------
    // 1. Sustainable plan runs the full horizon
    // ---------------------------------------------------------------
    #[test]
    fn test_sustainable_plan_full_horizon() {
        let result = simulate_swp(&default_params()).unwrap();

        assert!(!result.corpus_exhausted);
        assert_eq!(result.exhaustion_month, None);
        assert_eq!(result.monthly.len(), 120);
        assert!(result.final_balance > Decimal::ZERO);
    }

    // ---------------------------------------------------------------
    // 2. Heavy withdrawals drain the corpus in three months
    // ---------------------------------------------------------------
    #[test]
    fn test_corpus_exhausted_early() {
        let result = simulate_swp(&draining_params()).unwrap();

        assert!(result.corpus_exhausted);
        assert_eq!(result.exhaustion_month, Some(3));
        assert_eq!(result.monthly.len(), 3);
        assert_eq!(result.final_balance, Decimal::ZERO);
        // No boundary was reached, and exhausted runs get no partial summary.
        assert!(result.yearly.is_empty());
    }

    // ---------------------------------------------------------------
    // 3. The last withdrawal is capped at the remaining balance
    // ---------------------------------------------------------------
    #[test]
    fn test_final_withdrawal_capped() {
        let result = simulate_swp(&draining_params()).unwrap();
        let last = result.monthly.last().unwrap();

        assert!(last.capped);
        assert!(last.withdrawal < dec!(50_000));
        assert_eq!(last.balance, Decimal::ZERO);
        assert!(!result.monthly[0].capped);
        assert_eq!(
            result.total_withdrawn,
            result.monthly.iter().map(|m| m.withdrawal).sum::<Decimal>()
        );
    }

    // ---------------------------------------------------------------
    // 4. Corpus reaching zero in the final month is not "exhausted"
    // ---------------------------------------------------------------
    #[test]
    fn test_zero_at_horizon_not_flagged() {
        let result = run(&draining_params(), 3).unwrap();

        assert!(!result.corpus_exhausted);
        assert_eq!(result.final_balance, Decimal::ZERO);
    }

    // ---------------------------------------------------------------
    // 5. Withdrawals rise with inflation at each boundary
    // ---------------------------------------------------------------
    #[test]
    fn test_inflation_escalation() {
        let result = simulate_swp(&default_params()).unwrap();

        assert_eq!(result.monthly[11].withdrawal, dec!(5_000));
        assert_eq!(result.monthly[12].withdrawal, dec!(5_300));
        assert_eq!(result.monthly[24].withdrawal, dec!(5_618));
    }

    // ---------------------------------------------------------------
    // 6. Yearly summaries carry the pre-escalation withdrawal
    // ---------------------------------------------------------------
    #[test]
    fn test_yearly_summary_uses_pre_escalation_amount() {
        let result = simulate_swp(&default_params()).unwrap();

        // Boundaries strictly before the horizon: years 1..=9.
        assert_eq!(result.yearly.len(), 9);
        assert_eq!(result.yearly[0].monthly_withdrawal, dec!(5_000));
        assert_eq!(result.yearly[0].yearly_withdrawal, dec!(60_000));
        assert_eq!(result.yearly[1].monthly_withdrawal, dec!(5_300));
        assert_eq!(result.yearly[1].yearly_withdrawal, dec!(63_600));
        assert!(result.yearly.iter().all(|y| !y.partial));
    }

    #[test]
    fn test_yearly_returns_sum_monthly_returns() {
        let result = simulate_swp(&default_params()).unwrap();
        let first_year: Decimal = result.monthly[..12].iter().map(|m| m.returns).sum();

        assert_eq!(result.yearly[0].yearly_returns, first_year);
        assert_eq!(result.yearly[0].balance, result.monthly[11].balance);
    }

    // ---------------------------------------------------------------
    // 7. Partial trailing year on a month-granular horizon
    // ---------------------------------------------------------------
    #[test]
    fn test_partial_year_summary() {
        let result = run(&default_params(), 18).unwrap();

        assert_eq!(result.yearly.len(), 2);
        let tail = &result.yearly[1];
        assert!(tail.partial);
        assert_eq!(tail.year, 2);
        assert_eq!(tail.monthly_withdrawal, dec!(5_300));
        assert_eq!(tail.yearly_withdrawal, dec!(31_800));
        assert_eq!(tail.balance, result.final_balance);
    }

    // ---------------------------------------------------------------
    // 8. Exhaustion point splits into years and months
    // ---------------------------------------------------------------
    #[test]
    fn test_exhaustion_point() {
        let params = SwpParameters {
            initial_corpus: dec!(500_000),
            monthly_withdrawal: dec!(20_000),
            inflation_percentage: dec!(10),
            expected_return: dec!(6),
            years: 5,
        };
        let result = simulate_swp(&params).unwrap();
        let point = result.exhaustion_point().unwrap();
        let month = result.exhaustion_month.unwrap();

        assert_eq!(point.years * 12 + point.months, month);
        assert!(month < 60);
    }

    #[test]
    fn test_report_warns_on_exhaustion() {
        let out = swp_report(&draining_params()).unwrap();
        assert_eq!(
            out.warnings,
            vec!["Corpus will be exhausted after 0 years and 3 months".to_string()]
        );
    }

    #[test]
    fn test_report_no_warning_when_sustainable() {
        let out = swp_report(&default_params()).unwrap();
        assert!(out.warnings.is_empty());
    }

    // ---------------------------------------------------------------
    // 9. Validation
    // ---------------------------------------------------------------
    #[test]
    fn test_validation_rejects_small_corpus() {
        let mut params = default_params();
        params.initial_corpus = dec!(999);
        params.monthly_withdrawal = dec!(499);
        let err = simulate_swp(&params).unwrap_err();
        match err {
            FinCalcError::InvalidParameter(v) => {
                assert_eq!(v.len(), 2);
                assert_eq!(v[0].reason, "Initial corpus must be at least ₹1,000");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    // ---------------------------------------------------------------
    // 10. Running totals and overflow
    // ---------------------------------------------------------------
    #[test]
    fn test_running_total_tracks_withdrawals() {
        let result = simulate_swp(&default_params()).unwrap();
        let mut running = Decimal::ZERO;
        for m in &result.monthly {
            running += m.withdrawal;
            assert_eq!(m.total_withdrawal, running);
        }
        assert_eq!(result.total_withdrawn, running);
    }

    #[test]
    fn test_unrepresentable_corpus_returns_overflow() {
        let mut params = default_params();
        params.initial_corpus = Decimal::MAX;
        let err = simulate_swp(&params).unwrap_err();
        assert!(matches!(err, FinCalcError::NumericOverflow { .. }));
    }
}
