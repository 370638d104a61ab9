use std::fmt;

/// Terminal state of the enclosing build.
///
/// `Failure` and `Aborted` are terminal: the status policy never replaces
/// them with anything weaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStatus {
    Success,
    Unstable,
    Failure,
    Aborted,
}

impl BuildStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, BuildStatus::Failure | BuildStatus::Aborted)
    }
}

impl fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BuildStatus::Success => "SUCCESS",
            BuildStatus::Unstable => "UNSTABLE",
            BuildStatus::Failure => "FAILURE",
            BuildStatus::Aborted => "ABORTED",
        };
        f.write_str(s)
    }
}

/// One parsed Selenium result file. Built once by `extract::parse_report`
/// and not modified afterwards; counters default to 0, `result` to "".
#[derive(Debug, Clone, Default)]
pub struct TestResult {
    pub result_file_name: String,
    pub result: String,
    pub total_time: u32,
    pub num_test_passes: u32,
    pub num_test_failures: u32,
    pub num_command_passes: u32,
    pub num_command_failures: u32,
    pub num_command_errors: u32,
}

impl TestResult {
    pub fn num_test_total(&self) -> u32 {
        self.num_test_passes + self.num_test_failures
    }
}

/// All results of one publish run, in file-enumeration order, plus the
/// batch-level flag recording that at least one file failed to parse.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    pub results: Vec<TestResult>,
    pub had_parse_error: bool,
}

impl ResultSet {
    /// Sum each counter across all results. Cheap, recomputed on demand.
    pub fn aggregate(&self) -> AggregateSummary {
        let mut agg = AggregateSummary::default();
        for r in &self.results {
            agg.total_time += u64::from(r.total_time);
            agg.num_test_passes += u64::from(r.num_test_passes);
            agg.num_test_failures += u64::from(r.num_test_failures);
            agg.num_test_total += u64::from(r.num_test_total());
            agg.num_command_passes += u64::from(r.num_command_passes);
            agg.num_command_failures += u64::from(r.num_command_failures);
            agg.num_command_errors += u64::from(r.num_command_errors);
        }
        agg
    }
}

/// Derived sums over a `ResultSet`. Never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateSummary {
    pub total_time: u64,
    pub num_test_passes: u64,
    pub num_test_failures: u64,
    pub num_test_total: u64,
    pub num_command_passes: u64,
    pub num_command_failures: u64,
    pub num_command_errors: u64,
}
