use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use std::str::FromStr;

use fincalc_core::Validate;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse<T: DeserializeOwned>(input_json: &str) -> NapiResult<T> {
    serde_json::from_str(input_json).map_err(to_napi_error)
}

/// JSON array of violated constraints; `[]` when the parameters are valid.
fn violations_json<T: Validate + DeserializeOwned>(input_json: &str) -> NapiResult<String> {
    let params: T = parse(input_json)?;
    serde_json::to_string(&params.violations()).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// SIP
// ---------------------------------------------------------------------------

#[napi]
pub fn simulate_sip(input_json: String) -> NapiResult<String> {
    let params: fincalc_core::sip::SipParameters = parse(&input_json)?;
    let output = fincalc_core::sip::sip_report(&params).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn validate_sip(input_json: String) -> NapiResult<String> {
    violations_json::<fincalc_core::sip::SipParameters>(&input_json)
}

// ---------------------------------------------------------------------------
// SWP
// ---------------------------------------------------------------------------

#[napi]
pub fn simulate_swp(input_json: String) -> NapiResult<String> {
    let params: fincalc_core::swp::SwpParameters = parse(&input_json)?;
    let output = fincalc_core::swp::swp_report(&params).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn validate_swp(input_json: String) -> NapiResult<String> {
    violations_json::<fincalc_core::swp::SwpParameters>(&input_json)
}

// ---------------------------------------------------------------------------
// Retirement
// ---------------------------------------------------------------------------

#[napi]
pub fn plan_retirement(input_json: String) -> NapiResult<String> {
    let params: fincalc_core::retirement::RetirementParameters = parse(&input_json)?;
    let output =
        fincalc_core::retirement::retirement_report(&params).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn validate_retirement(input_json: String) -> NapiResult<String> {
    violations_json::<fincalc_core::retirement::RetirementParameters>(&input_json)
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Whole-rupee INR display string for a decimal amount ("1234567.8" -> "₹12,34,568").
#[napi]
pub fn format_inr(amount: String) -> NapiResult<String> {
    let value = Decimal::from_str(amount.trim()).map_err(to_napi_error)?;
    Ok(fincalc_core::formatting::format_inr(value))
}
