use anyhow::Result;
use clap::Parser;
use colored::control::set_override as set_color_override;
use selreport::config::PublishConfig;
use selreport::engine::publish;
use selreport::host::{BuildHost, LocalBuild};
use selreport::report::print_human;
use selreport::types::BuildStatus;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    version,
    author,
    about = "Publish Selenium HTML test reports: archive them into the build directory, \
             scrape the summary counts and derive a build status"
)]
struct Cli {
    // Results directory, relative to the workspace. May come from the
    // config file instead.
    #[arg(value_name = "RESULTS_DIR")]
    results_dir: Option<String>,

    // Workspace root the results dir is resolved against
    #[arg(
        short = 'w',
        long,
        value_name = "DIR",
        default_value = ".",
        help = "Workspace root the results directory is resolved against"
    )]
    workspace: PathBuf,

    // Build storage directory; the reports land in <DIR>/seleniumReports
    #[arg(
        short = 'b',
        long = "build-dir",
        value_name = "DIR",
        help = "Storage directory of the build receiving the reports"
    )]
    build_dir: PathBuf,

    #[arg(
        short = 'C',
        long = "config",
        value_name = "FILE",
        help = "Job configuration file (YAML)"
    )]
    config: Option<PathBuf>,

    #[arg(
        short = 'k',
        long = "keep-going",
        help = "Do not fail the build when a result file cannot be parsed"
    )]
    keep_going: bool,

    #[arg(short = 'q', long = "silent", help = "Suppress all output")]
    silent: bool,

    #[arg(short = 'v', long = "verbose", help = "Verbose diagnostics")]
    verbose: bool,

    #[arg(long = "no-color", help = "Disable colored output")]
    no_color: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // With -v, show INFO and above, but allow RUST_LOG to override for debug/trace
    let filter = if cli.verbose {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "selreport=info".to_string())
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "selreport=warn".to_string())
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Colors: default on, --no-color turns off
    if cli.no_color {
        set_color_override(false);
    } else {
        set_color_override(true);
    }

    let config = match PublishConfig::resolve(
        cli.config.as_deref(),
        cli.results_dir.as_deref(),
        cli.keep_going,
    ) {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            std::process::exit(e.exit_code());
        }
    };

    let source = cli.workspace.join(&config.test_results_dir);
    let mut build = LocalBuild::new(cli.build_dir.clone(), cli.silent);

    let summary = match publish(&mut build, &config, &source) {
        Ok(summary) => summary,
        Err(e) => {
            error!("{e}");
            std::process::exit(e.exit_code());
        }
    };

    if !cli.silent {
        print_human(&summary);
    }
    if cli.verbose && !cli.silent {
        let agg = summary.aggregate();
        info!(
            "published {} result files to {} ({} tests, {} commands)",
            summary.result_set.results.len(),
            summary.reports_dir.display(),
            agg.num_test_total,
            agg.num_command_passes + agg.num_command_failures + agg.num_command_errors
        );
    }

    if build.status() == BuildStatus::Failure {
        std::process::exit(1);
    }
    Ok(())
}
