use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::ParameterViolation;
use crate::time_value::{add, div, escalate, grow, monthly_rate, mul, MONTHS_PER_YEAR};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::validation::{Checks, Validate};
use crate::FinCalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for a systematic investment plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SipParameters {
    /// Lump sum already invested at month 0.
    #[serde(default, alias = "initial_corpus")]
    pub initial_corpus: Money,
    /// Contribution added at the end of every month of the first year.
    #[serde(alias = "monthly_contribution")]
    pub monthly_contribution: Money,
    /// Yearly increase of the monthly contribution, in percent.
    #[serde(default, alias = "step_up_percentage")]
    pub step_up_percentage: Percent,
    /// Expected annual return, in percent.
    #[serde(alias = "expected_return")]
    pub expected_return: Percent,
    pub years: u32,
}

/// Balance at the end of one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SipMonth {
    pub month: u32,
    pub balance: Money,
    /// Cumulative amount invested, including the initial corpus.
    pub investment: Money,
    pub returns: Money,
}

/// Snapshot at a year boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SipYear {
    pub year: u32,
    pub balance: Money,
    pub investment: Money,
    pub returns: Money,
    /// Monthly contribution in force after this boundary (already stepped up
    /// when more years follow).
    pub contribution: Money,
}

/// Output of `simulate_sip`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SipResult {
    pub final_balance: Money,
    pub total_invested: Money,
    pub returns_accumulated: Money,
    /// `returns_accumulated / total_invested * 100`.
    pub return_percentage: Percent,
    pub monthly: Vec<SipMonth>,
    pub yearly: Vec<SipYear>,
}

impl Validate for SipParameters {
    fn violations(&self) -> Vec<ParameterViolation> {
        let mut checks = Checks::new();
        checks
            .non_negative(
                self.initial_corpus,
                "initial_corpus",
                "Initial corpus cannot be negative",
            )
            .at_least(
                self.monthly_contribution,
                dec!(500),
                "monthly_contribution",
                "Monthly contribution must be at least ₹500",
            )
            .non_negative(
                self.step_up_percentage,
                "step_up_percentage",
                "Step-up percentage cannot be negative",
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

/// Project a SIP month by month.
///
/// Each month the running balance compounds first and the contribution is
/// added afterwards, so money never earns a return in the month it is
/// invested. The contribution steps up at every year boundary that is not
/// the last month of the horizon.
pub fn simulate_sip(params: &SipParameters) -> FinCalcResult<SipResult> {
    params.validate()?;
    run(params, params.years * MONTHS_PER_YEAR)
}

/// Same as `simulate_sip`, wrapped in the standard computation envelope.
pub fn sip_report(params: &SipParameters) -> FinCalcResult<ComputationOutput<SipResult>> {
    let start = Instant::now();
    let result = simulate_sip(params)?;
    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Systematic Investment Plan (monthly compounding, annual step-up)",
        params,
        Vec::new(),
        elapsed,
        result,
    ))
}

pub(crate) fn run(params: &SipParameters, total_months: u32) -> FinCalcResult<SipResult> {
    tracing::debug!(
        months = total_months,
        contribution = %params.monthly_contribution,
        "simulating SIP"
    );

    let rate = monthly_rate(params.expected_return);
    let mut balance = params.initial_corpus;
    let mut invested = params.initial_corpus;
    let mut contribution = params.monthly_contribution;

    let mut monthly = Vec::with_capacity(total_months as usize);
    let mut yearly = Vec::new();

    for month in 1..=total_months {
        balance = grow(balance, rate, "SIP balance growth")?;
        balance = add(balance, contribution, "SIP contribution")?;
        invested = add(invested, contribution, "SIP total invested")?;

        monthly.push(SipMonth {
            month,
            balance,
            investment: invested,
            returns: balance - invested,
        });

        if month % MONTHS_PER_YEAR == 0 && month < total_months {
            contribution = escalate(contribution, params.step_up_percentage, "SIP step-up")?;
            yearly.push(SipYear {
                year: month / MONTHS_PER_YEAR,
                balance,
                investment: invested,
                returns: balance - invested,
                contribution,
            });
        }
    }

    if total_months % MONTHS_PER_YEAR == 0 || yearly.is_empty() {
        yearly.push(SipYear {
            year: total_months.div_ceil(MONTHS_PER_YEAR),
            balance,
            investment: invested,
            returns: balance - invested,
            contribution,
        });
    }

    let returns_accumulated = balance - invested;
    let return_percentage = if invested.is_zero() {
        Decimal::ZERO
    } else {
        mul(
            div(returns_accumulated, invested, "SIP return percentage")?,
            dec!(100),
            "SIP return percentage",
        )?
    };

    tracing::debug!(final_balance = %balance, invested = %invested, "SIP complete");

    Ok(SipResult {
        final_balance: balance,
        total_invested: invested,
        returns_accumulated,
        return_percentage,
        monthly,
        yearly,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
