use fincalc_core::retirement::{
    plan_retirement, retirement_report, ReadinessBand, RecommendationKind, RetirementParameters,
};
use fincalc_core::FinCalcError;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn default_params() -> RetirementParameters {
    RetirementParameters {
        current_age: 30,
        retirement_age: 60,
        current_savings: dec!(500_000),
        monthly_savings: dec!(20_000),
        salary_growth: dec!(5),
        expected_return: dec!(10),
        current_monthly_expenses: dec!(50_000),
        lifestyle_factor: dec!(80),
        inflation_rate: dec!(6),
        life_expectancy: 85,
    }
}

fn wealthy_params() -> RetirementParameters {
    RetirementParameters {
        current_age: 30,
        retirement_age: 60,
        current_savings: dec!(5_000_000),
        monthly_savings: dec!(100_000),
        salary_growth: dec!(10),
        expected_return: dec!(12),
        current_monthly_expenses: dec!(30_000),
        lifestyle_factor: dec!(70),
        inflation_rate: dec!(5),
        life_expectancy: 85,
    }
}

// ===========================================================================
// Phase lengths
// ===========================================================================

#[test]
fn test_thirty_to_sixty_to_eighty_five() {
    let result = plan_retirement(&wealthy_params()).unwrap();

    assert_eq!(result.years_to_retirement, 30);
    assert_eq!(result.retirement_years, 25);
    assert_eq!(result.accumulation.len(), 30);
    assert_eq!(result.sustainability.len(), 25);
    assert_eq!(result.sustainability.last().unwrap().age, 85);
    assert_eq!(result.corpus_exhausted_at_age, None);
}

// ===========================================================================
// Readiness and advice
// ===========================================================================

#[test]
fn test_wealthy_plan_is_excellent() {
    let out = retirement_report(&wealthy_params()).unwrap();
    let result = &out.result;

    assert_eq!(result.readiness_score, dec!(100));
    assert_eq!(result.readiness_band, ReadinessBand::Excellent);
    assert_eq!(
        result.readiness_band.label(),
        "Excellent - You're retirement ready!"
    );
    assert_eq!(result.additional_monthly_savings, None);
    assert!(result.monthly_surplus_deficit > Decimal::ZERO);
    assert!(out.warnings.is_empty());

    let kinds: Vec<RecommendationKind> = result.recommendations.iter().map(|r| r.kind).collect();
    assert_eq!(
        kinds,
        vec![
            RecommendationKind::Success,
            RecommendationKind::Warning,
            RecommendationKind::Success,
        ]
    );
}

#[test]
fn test_shortfall_produces_savings_advice() {
    let mut params = default_params();
    params.current_savings = Decimal::ZERO;
    params.monthly_savings = dec!(1_000);
    params.salary_growth = Decimal::ZERO;
    let result = plan_retirement(&params).unwrap();

    assert!(result.sustainable_monthly_income < result.future_monthly_expenses);
    let extra = result.additional_monthly_savings.unwrap();
    let advice = result
        .recommendations
        .iter()
        .find(|r| r.title == "Increase Monthly Savings")
        .unwrap();
    assert!(advice.description.ends_with(&fincalc_core::formatting::format_inr(extra)));
}

#[test]
fn test_report_warns_on_exhaustion() {
    let params = RetirementParameters {
        current_age: 45,
        retirement_age: 55,
        current_savings: Decimal::ZERO,
        monthly_savings: dec!(5_000),
        salary_growth: Decimal::ZERO,
        expected_return: dec!(8),
        current_monthly_expenses: dec!(80_000),
        lifestyle_factor: dec!(100),
        inflation_rate: dec!(6),
        life_expectancy: 85,
    };
    let out = retirement_report(&params).unwrap();

    assert_eq!(out.result.corpus_exhausted_at_age, Some(56));
    assert!(out.warnings.contains(&"Corpus exhausted at age 56".to_string()));
}

#[test]
fn test_report_serializes_readiness_status() {
    let out = retirement_report(&wealthy_params()).unwrap();
    let json = serde_json::to_value(&out).unwrap();

    assert_eq!(json["result"]["readinessBand"], "excellent");
    assert_eq!(
        json["result"]["readinessStatus"],
        "Excellent - You're retirement ready!"
    );
}

#[test]
fn test_unrepresentable_expenses_return_overflow() {
    let mut params = default_params();
    params.current_monthly_expenses = dec!(1_000_000_000_000_000_000_000_000_000);
    params.lifestyle_factor = dec!(100);
    params.inflation_rate = Decimal::ZERO;

    let err = plan_retirement(&params).unwrap_err();
    assert!(matches!(err, FinCalcError::NumericOverflow { .. }), "{err}");
}

// ===========================================================================
// Validation
// ===========================================================================

#[test]
fn test_life_expectancy_bounds() {
    let mut params = default_params();
    params.life_expectancy = 74;
    params.retirement_age = 60;
    let err = plan_retirement(&params).unwrap_err();

    assert_eq!(
        err.to_string(),
        "Invalid parameters: life_expectancy: Life expectancy must be between 75 and 100"
    );
}

#[test]
fn test_parses_snake_case_input() {
    let params: RetirementParameters = serde_json::from_str(
        r#"{
            "current_age": 30, "retirement_age": 60, "current_savings": "500000",
            "monthly_savings": "20000", "salary_growth": "5", "expected_return": "10",
            "current_monthly_expenses": "50000", "lifestyle_factor": "80",
            "inflation_rate": "6", "life_expectancy": 85
        }"#,
    )
    .unwrap();
    assert_eq!(params, default_params());
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(40))]

    #[test]
    fn prop_plan_invariants(
        current_age in 18u32..=50,
        working_gap in 1u32..=25,
        retired_gap in 1u32..=25,
        savings in 0u32..10_000_000,
        monthly in 500u32..200_000,
        growth_bp in 0u32..1_500,
        return_bp in 1u32..1_500,
        expenses in 1_000u32..200_000,
        lifestyle in 50u32..=120,
        inflation_bp in 0u32..1_000,
    ) {
        let retirement_age = (current_age + working_gap).max(30);
        let life_expectancy = (retirement_age + retired_gap).clamp(75, 100);
        let params = RetirementParameters {
            current_age,
            retirement_age,
            current_savings: Decimal::from(savings),
            monthly_savings: Decimal::from(monthly),
            salary_growth: Decimal::new(growth_bp as i64, 2),
            expected_return: Decimal::new(return_bp as i64, 2),
            current_monthly_expenses: Decimal::from(expenses),
            lifestyle_factor: Decimal::from(lifestyle),
            inflation_rate: Decimal::new(inflation_bp as i64, 2),
            life_expectancy,
        };

        let result = plan_retirement(&params).unwrap();

        prop_assert!(result.readiness_score >= Decimal::ZERO);
        prop_assert!(result.readiness_score <= dec!(100));
        prop_assert_eq!(result.accumulation.len() as u32, retirement_age - current_age);
        prop_assert!(result.sustainability.len() as u32 <= life_expectancy - retirement_age);
        prop_assert!(result.sustainability.iter().all(|y| y.corpus >= Decimal::ZERO));
        prop_assert_eq!(
            result.additional_monthly_savings.is_some(),
            result.sustainable_monthly_income < result.future_monthly_expenses
        );

        match result.corpus_exhausted_at_age {
            Some(age) => {
                prop_assert_eq!(result.sustainability.last().map(|y| y.age), Some(age));
            }
            None => {
                prop_assert_eq!(
                    result.sustainability.len() as u32,
                    life_expectancy - retirement_age
                );
            }
        }

        prop_assert_eq!(plan_retirement(&params).unwrap(), result);
    }
}
