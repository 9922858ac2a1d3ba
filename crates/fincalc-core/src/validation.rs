//! Parameter validation shared by every scenario.
//!
//! Checks never stop at the first failure: callers get every violated
//! constraint in one `InvalidParameter` error so a form can flag all of
//! them at once.

use rust_decimal::Decimal;

use crate::error::{FinCalcError, ParameterViolation};
use crate::FinCalcResult;

/// Longest horizon a monthly simulation accepts.
pub const MAX_YEARS: u32 = 100;

/// Implemented by every parameter record.
pub trait Validate {
    /// All violated constraints, in field order. Empty when valid.
    fn violations(&self) -> Vec<ParameterViolation>;

    fn validate(&self) -> FinCalcResult<()> {
        let violations = self.violations();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(FinCalcError::InvalidParameter(violations))
        }
    }
}

/// Accumulates violations while a record is checked field by field.
#[derive(Debug, Default)]
pub(crate) struct Checks {
    violations: Vec<ParameterViolation>,
}

impl Checks {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record `reason` against `field` unless `ok` holds.
    pub(crate) fn require(&mut self, ok: bool, field: &str, reason: &str) -> &mut Self {
        if !ok {
            self.violations.push(ParameterViolation::new(field, reason));
        }
        self
    }

    pub(crate) fn at_least(
        &mut self,
        value: Decimal,
        min: Decimal,
        field: &str,
        reason: &str,
    ) -> &mut Self {
        self.require(value >= min, field, reason)
    }

    pub(crate) fn positive(&mut self, value: Decimal, field: &str, reason: &str) -> &mut Self {
        self.require(value > Decimal::ZERO, field, reason)
    }

    pub(crate) fn non_negative(&mut self, value: Decimal, field: &str, reason: &str) -> &mut Self {
        self.require(value >= Decimal::ZERO, field, reason)
    }

    pub(crate) fn within(
        &mut self,
        value: u32,
        min: u32,
        max: u32,
        field: &str,
        reason: &str,
    ) -> &mut Self {
        self.require((min..=max).contains(&value), field, reason)
    }

    pub(crate) fn years(&mut self, years: u32) -> &mut Self {
        self.require(years >= 1, "years", "Years must be at least 1")
            .require(
                years <= MAX_YEARS,
                "years",
                "Years must be at most 100",
            )
    }

    pub(crate) fn finish(self) -> Vec<ParameterViolation> {
        self.violations
    }
}
