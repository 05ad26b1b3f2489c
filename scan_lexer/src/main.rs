use scan_lexer::config::runtime::RuntimeConfig;
use scan_lexer::lexical::ScanReport;
use scan_lexer::{logging, pipeline, report};
use std::env;
use std::io;
use std::path::Path;
use std::process::ExitCode;

const USAGE: &str = "Usage: scan input_file";

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let Some(file_path) = input_path(&args) else {
        println!("{}", USAGE);
        return ExitCode::FAILURE;
    };

    // Initialize global logging system and validate pipeline configuration
    if let Err(e) = logging::init_global_logging().and_then(|_| pipeline::validate_pipeline()) {
        eprintln!("Initialization failed: {}", e);
        return ExitCode::FAILURE;
    }

    let config = RuntimeConfig::default();
    let succeeded = run(file_path, &config);

    logging::print_cargo_style_summary();

    if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// The single positional argument, if exactly one was given
fn input_path(args: &[String]) -> Option<&str> {
    match args {
        [_, path] => Some(path.as_str()),
        _ => None,
    }
}

fn run(file_path: &str, config: &RuntimeConfig) -> bool {
    match pipeline::process_file_with_preferences(file_path, config) {
        Ok(result) => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            let written = report::write_report_with_preferences(
                &mut out,
                &result.report,
                Path::new(file_path),
                &config.report,
            );
            if let Err(e) = written {
                eprintln!("{}", e);
                return false;
            }
            scan_succeeded(&result.report)
        }
        Err(e) => {
            println!("{}", e);
            false
        }
    }
}

/// Only a scan that reached the end of input counts as success
fn scan_succeeded(report: &ScanReport) -> bool {
    report.is_success()
}
