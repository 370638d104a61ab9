use crate::engine::PublishSummary;
use crate::types::TestResult;
use colored::Colorize;

fn clean(r: &TestResult) -> bool {
    r.num_command_failures == 0 && r.num_command_errors == 0
}

pub fn render_human(summary: &PublishSummary) -> String {
    let agg = summary.aggregate();
    let mut out = String::new();
    let header = format!(
        "Tests: {} ({} passed, {} failed), commands: {} passed, {} failed, {} errors, total time: {}",
        agg.num_test_total,
        agg.num_test_passes.to_string().green(),
        if agg.num_test_failures > 0 {
            agg.num_test_failures.to_string().red().bold().to_string()
        } else {
            agg.num_test_failures.to_string().green().to_string()
        },
        agg.num_command_passes,
        agg.num_command_failures,
        agg.num_command_errors,
        agg.total_time,
    );
    out.push_str(&header);
    out.push('\n');
    for r in &summary.result_set.results {
        if clean(r) {
            out.push_str(&format!(
                "{} {}\n",
                "[OK]".green().bold(),
                r.result_file_name.green()
            ));
        } else {
            out.push_str(&format!(
                "{} {}\n",
                "[FAIL]".red().bold(),
                r.result_file_name.red().bold()
            ));
            out.push_str(&format!(
                "  {} {}\n",
                "result  :".bold(),
                if r.result.is_empty() { "-" } else { r.result.as_str() }
            ));
            out.push_str(&format!(
                "  {} {} failed, {} errors\n",
                "commands:".bold(),
                r.num_command_failures,
                r.num_command_errors
            ));
        }
    }
    if summary.result_set.had_parse_error {
        out.push_str(&format!(
            "{}\n",
            "Some result files could not be parsed, see the build log"
                .yellow()
                .bold()
        ));
    }
    out
}

pub fn print_human(summary: &PublishSummary) {
    print!("{}", render_human(summary));
}
