//! Retirement planning: an accumulation phase with salary-indexed savings,
//! a sustainability phase drawing inflation-indexed expenses, a readiness
//! score, and rule-based recommendations.

pub mod planner;
pub mod recommendations;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::ParameterViolation;
use crate::types::{Money, Percent};
use crate::validation::{Checks, Validate};

pub use planner::{plan_retirement, retirement_report};
pub use recommendations::{Recommendation, RecommendationKind};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for retirement planning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementParameters {
    #[serde(alias = "current_age")]
    pub current_age: u32,
    #[serde(alias = "retirement_age")]
    pub retirement_age: u32,
    #[serde(alias = "current_savings")]
    pub current_savings: Money,
    #[serde(alias = "monthly_savings")]
    pub monthly_savings: Money,
    /// Yearly increase of monthly savings, in percent.
    #[serde(alias = "salary_growth")]
    pub salary_growth: Percent,
    /// Expected annual return, in percent, for both phases.
    #[serde(alias = "expected_return")]
    pub expected_return: Percent,
    #[serde(alias = "current_monthly_expenses", alias = "currentExpenses")]
    pub current_monthly_expenses: Money,
    /// Share of today's expenses needed in retirement, in percent (80 = 80%).
    #[serde(alias = "lifestyle_factor")]
    pub lifestyle_factor: Percent,
    #[serde(alias = "inflation_rate")]
    pub inflation_rate: Percent,
    #[serde(alias = "life_expectancy")]
    pub life_expectancy: u32,
}

/// One accumulation year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthYear {
    pub year: u32,
    /// Age at the end of this year.
    pub age: u32,
    pub corpus: Money,
    pub annual_savings: Money,
    pub monthly_savings: Money,
}

/// One year drawing on the corpus after retirement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SustainabilityYear {
    pub year: u32,
    pub age: u32,
    pub corpus: Money,
    pub monthly_expenses: Money,
    pub annual_expenses: Money,
    /// Remaining corpus as a whole percentage of the corpus at retirement;
    /// `None` once the corpus is exhausted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sustainability_pct: Option<Decimal>,
}

/// Readiness score bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadinessBand {
    Excellent,
    Good,
    Adequate,
    Poor,
}

impl ReadinessBand {
    pub fn from_score(score: Decimal) -> Self {
        if score >= dec!(90) {
            ReadinessBand::Excellent
        } else if score >= dec!(75) {
            ReadinessBand::Good
        } else if score >= dec!(60) {
            ReadinessBand::Adequate
        } else {
            ReadinessBand::Poor
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReadinessBand::Excellent => "Excellent - You're retirement ready!",
            ReadinessBand::Good => "Good - Minor adjustments needed",
            ReadinessBand::Adequate => "Adequate - Needs improvement",
            ReadinessBand::Poor => "Poor - Urgent action required",
        }
    }
}

/// Monthly income against expenses at retirement, for an income/expense split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeExpenseSplit {
    /// `min(income, expenses)`.
    pub available_income: Money,
    pub monthly_expenses: Money,
    /// `max(0, income - expenses)`.
    pub surplus_buffer: Money,
}

/// Output of `plan_retirement`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementResult {
    pub years_to_retirement: u32,
    pub retirement_years: u32,
    pub corpus_at_retirement: Money,
    pub future_monthly_expenses: Money,
    pub future_annual_expenses: Money,
    /// Monthly income from a 4% yearly withdrawal of the corpus.
    pub sustainable_monthly_income: Money,
    pub monthly_surplus_deficit: Money,
    /// Income as a share of expenses, clamped to [0, 100].
    pub readiness_score: Decimal,
    pub readiness_band: ReadinessBand,
    /// Display label of `readiness_band`.
    pub readiness_status: String,
    pub income_split: IncomeExpenseSplit,
    /// Extra monthly saving that closes the income shortfall, in whole rupees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_monthly_savings: Option<Money>,
    /// Age at which the sustainability phase ran the corpus down to zero.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corpus_exhausted_at_age: Option<u32>,
    pub accumulation: Vec<GrowthYear>,
    pub sustainability: Vec<SustainabilityYear>,
    pub recommendations: Vec<Recommendation>,
}

impl Validate for RetirementParameters {
    fn violations(&self) -> Vec<ParameterViolation> {
        let mut checks = Checks::new();
        checks
            .within(
                self.current_age,
                18,
                70,
                "current_age",
                "Current age must be between 18 and 70",
            )
            .within(
                self.retirement_age,
                30,
                80,
                "retirement_age",
                "Retirement age must be between 30 and 80",
            )
            .require(
                self.retirement_age > self.current_age,
                "retirement_age",
                "Retirement age must be greater than current age",
            )
            .non_negative(
                self.current_savings,
                "current_savings",
                "Current savings cannot be negative",
            )
            .at_least(
                self.monthly_savings,
                dec!(500),
                "monthly_savings",
                "Monthly savings must be at least ₹500",
            )
            .non_negative(
                self.salary_growth,
                "salary_growth",
                "Salary growth rate cannot be negative",
            )
            .positive(
                self.expected_return,
                "expected_return",
                "Expected return must be greater than 0%",
            )
            .at_least(
                self.current_monthly_expenses,
                dec!(1000),
                "current_monthly_expenses",
                "Current monthly expenses must be at least ₹1,000",
            )
            .positive(
                self.lifestyle_factor,
                "lifestyle_factor",
                "Please select a retirement lifestyle factor",
            )
            .non_negative(
                self.inflation_rate,
                "inflation_rate",
                "Inflation rate cannot be negative",
            )
            .within(
                self.life_expectancy,
                75,
                100,
                "life_expectancy",
                "Life expectancy must be between 75 and 100",
            )
            .require(
                self.life_expectancy > self.retirement_age,
                "life_expectancy",
                "Life expectancy must be greater than retirement age",
            );
        checks.finish()
    }
}
