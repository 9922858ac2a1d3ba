pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;
use std::error::Error;

/// Resolve scenario parameters: `--input` file first, then piped stdin,
/// then the individual flags.
pub fn resolve<T, F>(path: Option<&str>, from_flags: F) -> Result<T, Box<dyn Error>>
where
    T: DeserializeOwned,
    F: FnOnce() -> Result<T, Box<dyn Error>>,
{
    if let Some(path) = path {
        tracing::debug!(path, "reading parameters from file");
        return file::read_input(path);
    }
    if let Some(data) = stdin::read_stdin()? {
        tracing::debug!("reading parameters from stdin");
        return Ok(serde_json::from_value(data)?);
    }
    tracing::debug!("building parameters from flags");
    from_flags()
}
