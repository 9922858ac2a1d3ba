use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::time::Instant;

use crate::formatting::round_rupees;
use crate::time_value::{
    add, compound, div, escalate, fv_annuity_payment, grow, monthly_rate, mul, pct_to_rate,
    MONTHS_PER_YEAR,
};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::validation::Validate;
use crate::FinCalcResult;

use super::recommendations::{recommend, RecommendationContext, EMERGENCY_FUND_MONTHS};
use super::{
    GrowthYear, IncomeExpenseSplit, ReadinessBand, RetirementParameters, RetirementResult,
    SustainabilityYear,
};

/// Fixed yearly withdrawal rate used to size sustainable income (the 4% rule).
pub const SAFE_WITHDRAWAL_RATE: Decimal = dec!(0.04);

const MONTHS: Decimal = dec!(12);
const HUNDRED: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Plan retirement: accumulate until `retirement_age`, size income with the
/// 4% rule, then draw inflation-indexed expenses until `life_expectancy` or
/// until the corpus runs out.
pub fn plan_retirement(params: &RetirementParameters) -> FinCalcResult<RetirementResult> {
    params.validate()?;

    let years_to_retirement = params.retirement_age - params.current_age;
    let retirement_years = params.life_expectancy - params.retirement_age;
    let annual_return = pct_to_rate(params.expected_return);

    tracing::debug!(
        years_to_retirement,
        retirement_years,
        "planning retirement"
    );

    // ===================================================================
    // Accumulation phase
    // ===================================================================
    let mut corpus = params.current_savings;
    let mut monthly_savings = params.monthly_savings;
    let mut accumulation = Vec::with_capacity(years_to_retirement as usize);

    for year in 1..=years_to_retirement {
        corpus = grow(corpus, annual_return, "accumulation growth")?;
        let annual_savings = mul(monthly_savings, MONTHS, "annual savings")?;
        corpus = add(corpus, annual_savings, "accumulation savings")?;

        accumulation.push(GrowthYear {
            year,
            age: params.current_age + year,
            corpus,
            annual_savings,
            monthly_savings,
        });

        if year < years_to_retirement {
            monthly_savings = escalate(monthly_savings, params.salary_growth, "salary growth")?;
        }
    }

    let corpus_at_retirement = corpus;

    // ===================================================================
    // Figures at the retirement boundary
    // ===================================================================
    let inflation_factor = compound(pct_to_rate(params.inflation_rate), years_to_retirement)?;
    let future_monthly_expenses = mul(
        mul(
            params.current_monthly_expenses,
            inflation_factor,
            "future expenses",
        )?,
        pct_to_rate(params.lifestyle_factor),
        "future expenses",
    )?;
    let future_annual_expenses = mul(future_monthly_expenses, MONTHS, "future annual expenses")?;
    let sustainable_monthly_income = div(
        mul(corpus_at_retirement, SAFE_WITHDRAWAL_RATE, "sustainable income")?,
        MONTHS,
        "sustainable income",
    )?;
    let monthly_surplus_deficit = sustainable_monthly_income - future_monthly_expenses;
    let readiness_score = mul(
        div(
            sustainable_monthly_income,
            future_monthly_expenses,
            "readiness ratio",
        )?,
        HUNDRED,
        "readiness score",
    )?
    .clamp(Decimal::ZERO, HUNDRED);

    let readiness_band = ReadinessBand::from_score(readiness_score);

    let income_split = IncomeExpenseSplit {
        available_income: sustainable_monthly_income.min(future_monthly_expenses),
        monthly_expenses: future_monthly_expenses,
        surplus_buffer: monthly_surplus_deficit.max(Decimal::ZERO),
    };

    let additional_monthly_savings = if sustainable_monthly_income < future_monthly_expenses {
        Some(additional_savings_needed(
            future_monthly_expenses - sustainable_monthly_income,
            params,
            years_to_retirement,
        )?)
    } else {
        None
    };

    // ===================================================================
    // Sustainability phase
    // ===================================================================
    let mut remaining = corpus_at_retirement;
    let mut monthly_expenses = future_monthly_expenses;
    let mut sustainability = Vec::with_capacity(retirement_years as usize);
    let mut corpus_exhausted_at_age = None;

    for year in 1..=retirement_years {
        remaining = grow(remaining, annual_return, "retirement growth")?;
        let annual_expenses = mul(monthly_expenses, MONTHS, "retirement expenses")?;
        remaining = (remaining - annual_expenses).max(Decimal::ZERO);
        let age = params.retirement_age + year;

        sustainability.push(SustainabilityYear {
            year,
            age,
            corpus: remaining,
            monthly_expenses,
            annual_expenses,
            sustainability_pct: sustainability_pct(remaining, corpus_at_retirement)?,
        });

        monthly_expenses = escalate(monthly_expenses, params.inflation_rate, "expense inflation")?;

        if remaining <= Decimal::ZERO {
            corpus_exhausted_at_age = Some(age);
            tracing::warn!(age, "retirement corpus exhausted");
            break;
        }
    }

    let emergency_fund_target = mul(
        params.current_monthly_expenses,
        Decimal::from(EMERGENCY_FUND_MONTHS),
        "emergency fund target",
    )?;
    let recommendations = recommend(&RecommendationContext {
        params,
        readiness_score,
        emergency_fund_target,
        sustainable_monthly_income,
        future_monthly_expenses,
        additional_monthly_savings,
    });

    tracing::debug!(
        corpus_at_retirement = %corpus_at_retirement,
        readiness_score = %readiness_score,
        "retirement plan complete"
    );

    Ok(RetirementResult {
        years_to_retirement,
        retirement_years,
        corpus_at_retirement,
        future_monthly_expenses,
        future_annual_expenses,
        sustainable_monthly_income,
        monthly_surplus_deficit,
        readiness_score,
        readiness_band,
        readiness_status: readiness_band.label().to_string(),
        income_split,
        additional_monthly_savings,
        corpus_exhausted_at_age,
        accumulation,
        sustainability,
        recommendations,
    })
}

/// Same as `plan_retirement`, wrapped in the standard computation envelope.
pub fn retirement_report(
    params: &RetirementParameters,
) -> FinCalcResult<ComputationOutput<RetirementResult>> {
    let start = Instant::now();
    let result = plan_retirement(params)?;

    let mut warnings: Vec<String> = Vec::new();
    match result.readiness_band {
        ReadinessBand::Excellent | ReadinessBand::Good => {}
        ReadinessBand::Adequate => {
            warnings.push("Retirement planning completed - improvement needed!".into())
        }
        ReadinessBand::Poor => warnings
            .push("Critical retirement gap identified - urgent action required!".into()),
    }
    if let Some(age) = result.corpus_exhausted_at_age {
        warnings.push(format!("Corpus exhausted at age {age}"));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Retirement Planning (annual compounding, salary-indexed savings, 4% withdrawal rule)",
        params,
        warnings,
        elapsed,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Monthly saving that grows the corpus needed to fund `shortfall` under the
/// 4% rule, over the remaining working months, rounded to whole rupees.
fn additional_savings_needed(
    shortfall: Money,
    params: &RetirementParameters,
    years_to_retirement: u32,
) -> FinCalcResult<Money> {
    let corpus_needed = div(
        mul(shortfall, MONTHS, "shortfall corpus")?,
        SAFE_WITHDRAWAL_RATE,
        "shortfall corpus",
    )?;
    let pmt = fv_annuity_payment(
        corpus_needed,
        monthly_rate(params.expected_return),
        years_to_retirement * MONTHS_PER_YEAR,
    )?;
    Ok(round_rupees(pmt))
}

fn sustainability_pct(remaining: Money, at_retirement: Money) -> FinCalcResult<Option<Decimal>> {
    if remaining <= Decimal::ZERO || at_retirement.is_zero() {
        return Ok(None);
    }
    let ratio = div(remaining, at_retirement, "sustainability percentage")?;
    Ok(Some(round_rupees(mul(ratio, HUNDRED, "sustainability percentage")?)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
