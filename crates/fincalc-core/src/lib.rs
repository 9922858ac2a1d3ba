pub mod error;
pub mod formatting;
pub mod time_value;
pub mod types;
pub mod validation;

#[cfg(feature = "sip")]
pub mod sip;

#[cfg(feature = "swp")]
pub mod swp;

#[cfg(feature = "retirement")]
pub mod retirement;

pub use error::{FinCalcError, ParameterViolation};
pub use types::*;
pub use validation::Validate;

/// Standard result type for all fincalc operations
pub type FinCalcResult<T> = Result<T, FinCalcError>;
