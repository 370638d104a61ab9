//! The publish pipeline: gate and copy the reports, extract one record
//! per HTML file, then fold the counts into the build status.

use crate::archive::copy_reports;
use crate::config::PublishConfig;
use crate::error::{ExtractError, PublishError};
use crate::extract::parse_report;
use crate::host::{BuildHost, SELENIUM_REPORTS_TARGET};
use crate::types::{AggregateSummary, BuildStatus, ResultSet};
use std::fs;
use std::path::{Path, PathBuf};

/// The artifact a publish run leaves behind: every parsed record plus the
/// directory the reports were archived into. Totals are derived on demand.
#[derive(Debug, Clone)]
pub struct PublishSummary {
    pub result_set: ResultSet,
    pub reports_dir: PathBuf,
}

impl PublishSummary {
    pub fn aggregate(&self) -> AggregateSummary {
        self.result_set.aggregate()
    }
}

/// Parse every `*.html` file under the copied reports directory.
///
/// Zero matches is a valid "nothing to report" outcome, not an error: the
/// emptiness gate ran earlier against the source directory, and checks any
/// entry, while this scan filters the copied target to `.html` files only.
/// A file that fails to parse is logged and recorded in the batch flag;
/// the rest of the batch still goes through.
pub fn extract_all<H: BuildHost>(
    host: &mut H,
    reports_dir: &Path,
) -> Result<ResultSet, PublishError> {
    let mut set = ResultSet::default();
    for rel in host.read_dir_recursive(reports_dir)? {
        if rel.extension().map_or(true, |ext| ext != "html") {
            continue;
        }
        host.append_log(&format!("parsing resultFile {}", rel.display()));
        let parsed = fs::read_to_string(reports_dir.join(&rel))
            .map_err(ExtractError::from)
            .and_then(|doc| parse_report(&rel.to_string_lossy(), &doc));
        match parsed {
            Ok(result) => set.results.push(result),
            Err(e) => {
                host.append_log(&format!("Unable to parse {}: {}", rel.display(), e));
                set.had_parse_error = true;
            }
        }
    }
    Ok(set)
}

/// Pure status fold. Never weakens a terminal status. A batch-level parse
/// failure (when configured to count) forces FAILURE before any record is
/// looked at; otherwise command failures mark UNSTABLE and the first
/// command error short-circuits to FAILURE.
pub fn decide_status(
    current: BuildStatus,
    set: &ResultSet,
    fail_on_parse_error: bool,
) -> BuildStatus {
    if current.is_terminal() {
        return current;
    }
    if set.had_parse_error && fail_on_parse_error {
        return BuildStatus::Failure;
    }
    let mut status = current;
    for r in &set.results {
        if r.num_command_failures > 0 {
            status = BuildStatus::Unstable;
        }
        if r.num_command_errors > 0 {
            return BuildStatus::Failure;
        }
    }
    status
}

/// Run the whole publish step against one build.
pub fn publish<H: BuildHost>(
    host: &mut H,
    config: &PublishConfig,
    source_dir: &Path,
) -> Result<PublishSummary, PublishError> {
    host.append_log("Publishing Selenium report...");
    let reports_dir = host.storage_dir().join(SELENIUM_REPORTS_TARGET);
    copy_reports(host, source_dir, &reports_dir)?;
    let result_set = extract_all(host, &reports_dir)?;

    let current = host.status();
    let decided = decide_status(current, &result_set, config.fail_on_parse_error);
    if decided != current {
        match decided {
            BuildStatus::Unstable => host.append_log("Set result to UNSTABLE"),
            BuildStatus::Failure => host.append_log("Set result to FAILURE"),
            _ => {}
        }
        host.set_status(decided);
    }

    Ok(PublishSummary {
        result_set,
        reports_dir,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TestResult;

    fn record(failures: u32, errors: u32) -> TestResult {
        TestResult {
            num_command_failures: failures,
            num_command_errors: errors,
            ..TestResult::default()
        }
    }

    #[test]
    fn error_short_circuits_before_later_failures() {
        let set = ResultSet {
            results: vec![record(0, 1), record(1, 0)],
            had_parse_error: false,
        };
        assert_eq!(
            decide_status(BuildStatus::Success, &set, true),
            BuildStatus::Failure
        );
    }

    #[test]
    fn failure_then_error_still_ends_in_failure() {
        let set = ResultSet {
            results: vec![record(1, 0), record(0, 1)],
            had_parse_error: false,
        };
        assert_eq!(
            decide_status(BuildStatus::Success, &set, true),
            BuildStatus::Failure
        );
    }

    #[test]
    fn failures_alone_mark_unstable() {
        let set = ResultSet {
            results: vec![record(1, 0), record(0, 0)],
            had_parse_error: false,
        };
        assert_eq!(
            decide_status(BuildStatus::Success, &set, true),
            BuildStatus::Unstable
        );
    }

    #[test]
    fn terminal_status_is_never_touched() {
        let set = ResultSet {
            results: vec![record(5, 5)],
            had_parse_error: true,
        };
        assert_eq!(
            decide_status(BuildStatus::Aborted, &set, true),
            BuildStatus::Aborted
        );
    }

    #[test]
    fn parse_error_policy_outranks_clean_records() {
        let set = ResultSet {
            results: vec![record(0, 0)],
            had_parse_error: true,
        };
        assert_eq!(
            decide_status(BuildStatus::Success, &set, true),
            BuildStatus::Failure
        );
        assert_eq!(
            decide_status(BuildStatus::Success, &set, false),
            BuildStatus::Success
        );
    }
}
