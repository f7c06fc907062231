//! Configuration loader with TOML parsing and environment variable
//! substitution
//!
//! Loading order: read the file, substitute `${VAR}` placeholders,
//! parse the TOML, apply `IRONVEIL_*` overrides, then validate. A
//! missing required credential is a configuration error and aborts
//! before any processing starts.

use super::schema::IronveilConfig;
use crate::config::secret::secret_string;
use crate::domain::errors::IronveilError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use ironveil::config::load_config;
///
/// let config = load_config("ironveil.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<IronveilConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(IronveilError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        IronveilError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: IronveilConfig = toml::from_str(&contents)
        .map_err(|e| IronveilError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        IronveilError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are left untouched. All missing variables are
/// collected and reported together.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(IronveilError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies `IRONVEIL_*` environment overrides on top of the parsed file
fn apply_env_overrides(config: &mut IronveilConfig) {
    if let Ok(level) = std::env::var("IRONVEIL_LOG_LEVEL") {
        config.application.log_level = level;
    }
    if let Ok(connection) = std::env::var("IRONVEIL_PG_CONNECTION") {
        config.storage.connection_string = secret_string(connection);
    }
    if let Ok(sas) = std::env::var("IRONVEIL_AZURE_SAS") {
        config.azure.sas_token = Some(secret_string(sas));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitute_known_var() {
        std::env::set_var("IRONVEIL_TEST_SUB_VAR", "resolved-value");
        let input = "token = \"${IRONVEIL_TEST_SUB_VAR}\"";
        let output = substitute_env_vars(input).unwrap();
        assert!(output.contains("resolved-value"));
        std::env::remove_var("IRONVEIL_TEST_SUB_VAR");
    }

    #[test]
    fn test_missing_var_reported() {
        let input = "token = \"${IRONVEIL_TEST_DEFINITELY_UNSET}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err
            .to_string()
            .contains("IRONVEIL_TEST_DEFINITELY_UNSET"));
    }

    #[test]
    fn test_comment_lines_skipped() {
        let input = "# token = \"${IRONVEIL_TEST_ALSO_UNSET}\"";
        let output = substitute_env_vars(input).unwrap();
        assert!(output.contains("${IRONVEIL_TEST_ALSO_UNSET}"));
    }

    #[test]
    fn test_missing_file_is_configuration_error() {
        let err = load_config("/nonexistent/ironveil.toml").unwrap_err();
        assert!(matches!(err, IronveilError::Configuration(_)));
    }
}
