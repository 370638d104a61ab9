//! Job configuration: where the result files live and whether a report
//! that fails to parse fails the build. Values come from an optional YAML
//! file with the CLI overriding it.

use crate::error::PublishError;
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// On-disk shape of the job configuration.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawConfig {
    pub test_results_dir: Option<String>,
    #[serde(alias = "failOnParseException")]
    pub failure_if_exception_on_parsing_result_files: Option<bool>,
}

/// Resolved configuration of one publish run.
#[derive(Debug, Clone)]
pub struct PublishConfig {
    /// Results directory, relative to the workspace root.
    pub test_results_dir: String,
    /// Force FAILURE when any result file cannot be parsed. Default true.
    pub fail_on_parse_error: bool,
}

impl PublishConfig {
    /// Merge the config file (if any) with the CLI values. The CLI wins.
    pub fn resolve(
        file: Option<&Path>,
        cli_results_dir: Option<&str>,
        keep_going: bool,
    ) -> Result<PublishConfig, PublishError> {
        let raw = match file {
            Some(path) => {
                let content = fs::read_to_string(path).map_err(|e| {
                    PublishError::config(format!("cannot read {}: {e}", path.display()))
                })?;
                serde_yaml::from_str::<RawConfig>(&content).map_err(|e| {
                    PublishError::config(format!("cannot parse {}: {e}", path.display()))
                })?
            }
            None => RawConfig::default(),
        };

        let test_results_dir = cli_results_dir
            .map(str::to_string)
            .or(raw.test_results_dir)
            .ok_or_else(|| PublishError::config("testResultsDir is required"))?
            .trim()
            .to_string();
        validate_results_dir(&test_results_dir)?;

        let fail_on_parse_error = if keep_going {
            false
        } else {
            raw.failure_if_exception_on_parsing_result_files
                .unwrap_or(true)
        };

        Ok(PublishConfig {
            test_results_dir,
            fail_on_parse_error,
        })
    }
}

/// The results dir must stay inside the workspace: non-empty and relative.
/// Rejects a leading `/`, a UNC prefix and drive-letter paths.
pub fn validate_results_dir(value: &str) -> Result<(), PublishError> {
    let drive_prefix = Regex::new(r"^[A-Za-z]:[\\/]").unwrap();
    if value.trim().is_empty() {
        return Err(PublishError::config("testResultsDir must not be empty"));
    }
    if value.starts_with('/') || value.starts_with(r"\\") || drive_prefix.is_match(value) {
        return Err(PublishError::config(format!(
            "testResultsDir must be relative to the workspace: {value}"
        )));
    }
    Ok(())
}
