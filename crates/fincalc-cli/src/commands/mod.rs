pub mod retirement;
pub mod sip;
pub mod swp;

use std::error::Error;

/// Turn a missing required flag into the standard CLI error.
pub(crate) fn required<T>(value: Option<T>, flag: &str) -> Result<T, Box<dyn Error>> {
    value.ok_or_else(|| format!("--{flag} is required (or provide --input)").into())
}
