//! Error types for the publish pipeline.
//!
//! Directory-level failures are fatal and abort the whole publish step;
//! per-file extraction failures stay inside the batch and are only ever
//! surfaced through `ResultSet::had_parse_error`.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors of one publish operation.
#[derive(Error, Debug)]
pub enum PublishError {
    /// The configured results directory does not exist in the workspace.
    #[error("Missing directory {}", .dir.display())]
    MissingSourceDir { dir: PathBuf },

    /// The results directory exists but holds no entries at all.
    #[error("Missing selenium result files in directory {}", .dir.display())]
    EmptySourceDir { dir: PathBuf },

    /// Any I/O failure while copying or enumerating reports. Not retried.
    #[error("I/O error while publishing reports: {0}")]
    Io(#[from] std::io::Error),

    /// Rejected job configuration.
    #[error("Invalid configuration: {reason}")]
    Config { reason: String },
}

impl PublishError {
    pub fn config(reason: impl Into<String>) -> Self {
        PublishError::Config {
            reason: reason.into(),
        }
    }

    /// Exit code for the CLI: gate and configuration failures are neither
    /// a test failure nor a pass.
    pub fn exit_code(&self) -> i32 {
        2
    }
}

/// Per-file extraction failure. Non-fatal to the batch.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The tokenizer could not make sense of the document at all.
    #[error("malformed markup: {0}")]
    Markup(#[from] quick_xml::Error),

    /// The report file could not be read.
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// A numeric field held non-numeric text, or was missing entirely.
    #[error("field {name} is not a number: {value:?}")]
    BadInt { name: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_build_log_wording() {
        let err = PublishError::MissingSourceDir {
            dir: PathBuf::from("target/selenium"),
        };
        assert_eq!(err.to_string(), "Missing directory target/selenium");

        let err = PublishError::EmptySourceDir {
            dir: PathBuf::from("target/selenium"),
        };
        assert_eq!(
            err.to_string(),
            "Missing selenium result files in directory target/selenium"
        );
    }

    #[test]
    fn bad_int_names_the_field() {
        let err = ExtractError::BadInt {
            name: "totalTime:".into(),
            value: "fast".into(),
        };
        assert!(err.to_string().contains("totalTime:"));
        assert!(err.to_string().contains("fast"));
    }
}
