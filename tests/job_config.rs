use anyhow::Result;
use selreport::config::PublishConfig;
use selreport::error::PublishError;
use std::fs;
use tempfile::tempdir;

#[test]
fn reads_job_config_from_yaml() -> Result<()> {
    let dir = tempdir()?;
    let file = dir.path().join("job.yaml");
    let yaml = r"
testResultsDir: target/selenium
failureIfExceptionOnParsingResultFiles: false
";
    fs::write(&file, yaml)?;
    let config = PublishConfig::resolve(Some(&file), None, false)?;
    assert_eq!(config.test_results_dir, "target/selenium");
    assert!(!config.fail_on_parse_error);
    Ok(())
}

#[test]
fn parse_failure_policy_defaults_to_on() -> Result<()> {
    let dir = tempdir()?;
    let file = dir.path().join("job.yaml");
    fs::write(&file, "testResultsDir: reports\n")?;
    let config = PublishConfig::resolve(Some(&file), None, false)?;
    assert!(config.fail_on_parse_error);
    Ok(())
}

#[test]
fn accepts_short_option_alias() -> Result<()> {
    let dir = tempdir()?;
    let file = dir.path().join("job.yaml");
    let yaml = r"
testResultsDir: reports
failOnParseException: false
";
    fs::write(&file, yaml)?;
    let config = PublishConfig::resolve(Some(&file), None, false)?;
    assert!(!config.fail_on_parse_error);
    Ok(())
}

#[test]
fn cli_values_override_the_file() -> Result<()> {
    let dir = tempdir()?;
    let file = dir.path().join("job.yaml");
    fs::write(&file, "testResultsDir: from-file\n")?;
    let config = PublishConfig::resolve(Some(&file), Some("from-cli"), true)?;
    assert_eq!(config.test_results_dir, "from-cli");
    assert!(!config.fail_on_parse_error);
    Ok(())
}

#[test]
fn results_dir_is_required_somewhere() {
    let err = PublishConfig::resolve(None, None, false).unwrap_err();
    assert!(matches!(err, PublishError::Config { .. }));
}

#[test]
fn absolute_results_dir_is_rejected() {
    let err = PublishConfig::resolve(None, Some("/var/reports"), false).unwrap_err();
    assert!(matches!(err, PublishError::Config { .. }));
}
