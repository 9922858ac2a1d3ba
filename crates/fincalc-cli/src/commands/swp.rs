use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use fincalc_core::swp::{self, SwpParameters};

use super::required;
use crate::input;

/// Arguments for a systematic withdrawal plan
#[derive(Args)]
pub struct SwpArgs {
    /// Corpus at the start of withdrawals
    #[arg(long)]
    pub initial_corpus: Option<Decimal>,

    /// Monthly withdrawal in the first year
    #[arg(long)]
    pub monthly_withdrawal: Option<Decimal>,

    /// Yearly increase of the withdrawal, in percent (e.g. 6 for 6%)
    #[arg(long, alias = "inflation", default_value = "0")]
    pub inflation_percentage: Decimal,

    /// Expected annual return, in percent (e.g. 8 for 8%)
    #[arg(long)]
    pub expected_return: Option<Decimal>,

    /// Withdrawal horizon in years
    #[arg(long)]
    pub years: Option<u32>,

    /// Include the month-by-month series in table/csv output
    #[arg(long)]
    pub monthly: bool,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

impl SwpArgs {
    fn to_params(&self) -> Result<SwpParameters, Box<dyn std::error::Error>> {
        Ok(SwpParameters {
            initial_corpus: required(self.initial_corpus, "initial-corpus")?,
            monthly_withdrawal: required(self.monthly_withdrawal, "monthly-withdrawal")?,
            inflation_percentage: self.inflation_percentage,
            expected_return: required(self.expected_return, "expected-return")?,
            years: required(self.years, "years")?,
        })
    }
}

pub fn run_swp(args: SwpArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params: SwpParameters = input::resolve(args.input.as_deref(), || args.to_params())?;
    let report = swp::swp_report(&params)?;
    Ok(serde_json::to_value(report)?)
}
