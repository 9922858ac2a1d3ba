use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Supported parameter file formats, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputFormat {
    Json,
    Yaml,
}

impl InputFormat {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                InputFormat::Yaml
            }
            _ => InputFormat::Json,
        }
    }
}

/// Read a JSON or YAML parameter file and deserialise into a typed struct.
pub fn read_input<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let contents = fs::read_to_string(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;
    parse(&contents, InputFormat::from_path(&canonical))
        .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e).into())
}

fn parse<T: DeserializeOwned>(
    contents: &str,
    format: InputFormat,
) -> Result<T, Box<dyn std::error::Error>> {
    match format {
        InputFormat::Json => Ok(serde_json::from_str(contents)?),
        InputFormat::Yaml => Ok(serde_yaml::from_str(contents)?),
    }
}

/// Resolve the path against the working directory and check it is a file.
fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let canonical = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !canonical.exists() {
        return Err(format!("File not found: {}", canonical.display()).into());
    }

    if !canonical.is_file() {
        return Err(format!("Not a file: {}", canonical.display()).into());
    }

    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fincalc_core::sip::SipParameters;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(InputFormat::from_path(Path::new("a.yaml")), InputFormat::Yaml);
        assert_eq!(InputFormat::from_path(Path::new("a.YML")), InputFormat::Yaml);
        assert_eq!(InputFormat::from_path(Path::new("a.json")), InputFormat::Json);
        assert_eq!(InputFormat::from_path(Path::new("noext")), InputFormat::Json);
    }

    #[test]
    fn test_parse_yaml_parameters() {
        let yaml = "monthlyContribution: '5000'\nexpectedReturn: '12'\nyears: 10\n";
        let params: SipParameters = parse(yaml, InputFormat::Yaml).unwrap();
        assert_eq!(params.monthly_contribution, dec!(5000));
        assert_eq!(params.years, 10);
    }

    #[test]
    fn test_parse_json_snake_case() {
        let json = r#"{"monthly_contribution": "2500", "expected_return": "9", "years": 5,
                       "step_up_percentage": "10"}"#;
        let params: SipParameters = parse(json, InputFormat::Json).unwrap();
        assert_eq!(params.step_up_percentage, dec!(10));
    }

    #[test]
    fn test_missing_file_reported() {
        let err = read_input::<SipParameters>("definitely/not/here.json").unwrap_err();
        assert!(err.to_string().starts_with("File not found"));
    }
}
