use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use fincalc_core::sip::{self, SipParameters};

use super::required;
use crate::input;

/// Arguments for a systematic investment plan
#[derive(Args)]
pub struct SipArgs {
    /// Lump sum already invested at the start
    #[arg(long, default_value = "0")]
    pub initial_corpus: Decimal,

    /// Monthly contribution in the first year
    #[arg(long)]
    pub monthly_contribution: Option<Decimal>,

    /// Yearly step-up of the contribution, in percent (e.g. 10 for 10%)
    #[arg(long, alias = "step-up", default_value = "0")]
    pub step_up_percentage: Decimal,

    /// Expected annual return, in percent (e.g. 12 for 12%)
    #[arg(long)]
    pub expected_return: Option<Decimal>,

    /// Investment horizon in years
    #[arg(long)]
    pub years: Option<u32>,

    /// Include the month-by-month series in table/csv output
    #[arg(long)]
    pub monthly: bool,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

impl SipArgs {
    fn to_params(&self) -> Result<SipParameters, Box<dyn std::error::Error>> {
        Ok(SipParameters {
            initial_corpus: self.initial_corpus,
            monthly_contribution: required(self.monthly_contribution, "monthly-contribution")?,
            step_up_percentage: self.step_up_percentage,
            expected_return: required(self.expected_return, "expected-return")?,
            years: required(self.years, "years")?,
        })
    }
}

pub fn run_sip(args: SipArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params: SipParameters = input::resolve(args.input.as_deref(), || args.to_params())?;
    let report = sip::sip_report(&params)?;
    Ok(serde_json::to_value(report)?)
}
