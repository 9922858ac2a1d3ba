use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use fincalc_core::retirement::{self, RetirementParameters};

use super::required;
use crate::input;

/// Arguments for retirement planning
#[derive(Args)]
pub struct RetirementArgs {
    /// Age today
    #[arg(long)]
    pub current_age: Option<u32>,

    /// Age at which contributions stop
    #[arg(long)]
    pub retirement_age: Option<u32>,

    /// Savings already accumulated
    #[arg(long, default_value = "0")]
    pub current_savings: Decimal,

    /// Monthly savings in the first year
    #[arg(long)]
    pub monthly_savings: Option<Decimal>,

    /// Yearly growth of monthly savings, in percent
    #[arg(long, default_value = "0")]
    pub salary_growth: Decimal,

    /// Expected annual return, in percent
    #[arg(long)]
    pub expected_return: Option<Decimal>,

    /// Monthly expenses today
    #[arg(long, alias = "current-expenses")]
    pub current_monthly_expenses: Option<Decimal>,

    /// Share of today's expenses needed in retirement, in percent (e.g. 80)
    #[arg(long)]
    pub lifestyle_factor: Option<Decimal>,

    /// Annual inflation, in percent
    #[arg(long)]
    pub inflation_rate: Option<Decimal>,

    /// Planning horizon age
    #[arg(long)]
    pub life_expectancy: Option<u32>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

impl RetirementArgs {
    fn to_params(&self) -> Result<RetirementParameters, Box<dyn std::error::Error>> {
        Ok(RetirementParameters {
            current_age: required(self.current_age, "current-age")?,
            retirement_age: required(self.retirement_age, "retirement-age")?,
            current_savings: self.current_savings,
            monthly_savings: required(self.monthly_savings, "monthly-savings")?,
            salary_growth: self.salary_growth,
            expected_return: required(self.expected_return, "expected-return")?,
            current_monthly_expenses: required(
                self.current_monthly_expenses,
                "current-monthly-expenses",
            )?,
            lifestyle_factor: required(self.lifestyle_factor, "lifestyle-factor")?,
            inflation_rate: required(self.inflation_rate, "inflation-rate")?,
            life_expectancy: required(self.life_expectancy, "life-expectancy")?,
        })
    }
}

pub fn run_retirement(args: RetirementArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params: RetirementParameters =
        input::resolve(args.input.as_deref(), || args.to_params())?;
    let report = retirement::retirement_report(&params)?;
    Ok(serde_json::to_value(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn args() -> RetirementArgs {
        RetirementArgs {
            current_age: Some(30),
            retirement_age: Some(60),
            current_savings: dec!(500_000),
            monthly_savings: Some(dec!(20_000)),
            salary_growth: dec!(5),
            expected_return: Some(dec!(10)),
            current_monthly_expenses: Some(dec!(50_000)),
            lifestyle_factor: Some(dec!(80)),
            inflation_rate: Some(dec!(6)),
            life_expectancy: Some(85),
            input: None,
        }
    }

    #[test]
    fn test_flags_to_params() {
        let params = args().to_params().unwrap();
        assert_eq!(params.current_age, 30);
        assert_eq!(params.current_monthly_expenses, dec!(50_000));
    }

    #[test]
    fn test_missing_lifestyle_factor() {
        let mut a = args();
        a.lifestyle_factor = None;
        let err = a.to_params().unwrap_err();
        assert!(err.to_string().contains("--lifestyle-factor"));
    }

    #[test]
    fn test_run_includes_readiness_status() {
        let value = run_retirement(args()).unwrap();
        let result = &value["result"];
        assert!(result["readinessStatus"].is_string());
        assert!(result["readinessBand"].is_string());
    }
}
