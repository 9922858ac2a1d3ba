//! Advisory recommendations as ordered rule tables.
//!
//! Each rule pairs a predicate with a template. Readiness bands are
//! evaluated first and only the first matching band is emitted; the
//! advisory rules follow, each emitted whenever its predicate holds.
//! Recommendations are text only and never feed back into the plan.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::formatting::format_inr;
use crate::types::Money;

use super::RetirementParameters;

/// Months of current expenses an emergency fund should hold.
pub const EMERGENCY_FUND_MONTHS: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub title: String,
    pub description: String,
}

impl Recommendation {
    fn new(kind: RecommendationKind, title: &str, description: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.to_string(),
            description: description.into(),
        }
    }
}

/// Everything the rules may look at.
#[derive(Debug, Clone)]
pub struct RecommendationContext<'a> {
    pub params: &'a RetirementParameters,
    pub readiness_score: Decimal,
    /// Six months of current expenses.
    pub emergency_fund_target: Money,
    pub sustainable_monthly_income: Money,
    pub future_monthly_expenses: Money,
    /// Present exactly when income falls short of expenses.
    pub additional_monthly_savings: Option<Money>,
}

struct Rule {
    applies: fn(&RecommendationContext) -> bool,
    build: fn(&RecommendationContext) -> Recommendation,
}

const READINESS_BANDS: [Rule; 4] = [
    Rule {
        applies: |ctx| ctx.readiness_score >= dec!(90),
        build: |_| {
            Recommendation::new(
                RecommendationKind::Success,
                "Excellent Retirement Preparedness",
                "You are well-prepared for retirement. Consider diversifying your portfolio and exploring tax-efficient investment options.",
            )
        },
    },
    Rule {
        applies: |ctx| ctx.readiness_score >= dec!(75),
        build: |_| {
            Recommendation::new(
                RecommendationKind::Success,
                "Good Retirement Preparedness",
                "You are on track for a comfortable retirement. Consider increasing your savings slightly to build additional buffer.",
            )
        },
    },
    Rule {
        applies: |ctx| ctx.readiness_score >= dec!(60),
        build: |_| {
            Recommendation::new(
                RecommendationKind::Warning,
                "Adequate but Needs Improvement",
                "Your retirement planning needs attention. Consider increasing monthly savings or extending working years.",
            )
        },
    },
    Rule {
        applies: |_| true,
        build: |_| {
            Recommendation::new(
                RecommendationKind::Error,
                "Critical Retirement Gap",
                "Urgent action needed. Significantly increase savings, reduce expenses, or consider working longer.",
            )
        },
    },
];

const ADVISORY_RULES: [Rule; 4] = [
    Rule {
        applies: |ctx| ctx.additional_monthly_savings.is_some(),
        build: |ctx| {
            let amount = ctx.additional_monthly_savings.unwrap_or_default();
            Recommendation::new(
                RecommendationKind::Warning,
                "Increase Monthly Savings",
                format!(
                    "To bridge the gap, consider increasing monthly savings by {}",
                    format_inr(amount)
                ),
            )
        },
    },
    Rule {
        applies: |ctx| ctx.params.current_savings < ctx.emergency_fund_target,
        build: |ctx| {
            Recommendation::new(
                RecommendationKind::Warning,
                "Build Emergency Fund",
                format!(
                    "Maintain 6 months of expenses ({}) as emergency fund separate from retirement corpus.",
                    format_inr(ctx.emergency_fund_target)
                ),
            )
        },
    },
    Rule {
        applies: |_| true,
        build: |_| {
            Recommendation::new(
                RecommendationKind::Warning,
                "Healthcare Cost Planning",
                "Healthcare costs typically inflate at 8-10% annually. Consider health insurance and dedicated healthcare fund.",
            )
        },
    },
    Rule {
        applies: |_| true,
        build: |_| {
            Recommendation::new(
                RecommendationKind::Success,
                "Tax-Efficient Investments",
                "Maximize tax-saving investments like ELSS, PPF, and NPS to reduce current tax burden and build retirement corpus.",
            )
        },
    },
];

/// Evaluate both rule tables in order.
pub fn recommend(ctx: &RecommendationContext) -> Vec<Recommendation> {
    let band = READINESS_BANDS
        .iter()
        .find(|rule| (rule.applies)(ctx))
        .map(|rule| (rule.build)(ctx));

    band.into_iter()
        .chain(
            ADVISORY_RULES
                .iter()
                .filter(|rule| (rule.applies)(ctx))
                .map(|rule| (rule.build)(ctx)),
        )
        .collect()
}
