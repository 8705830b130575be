//! # trigger-check
//!
//! Checks trigger function calls such as `avg(/host/key,5m)` against the
//! function signature catalogue and prints one line per expression.

mod output;

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use trigger_validator::config::RuntimeConfig;
use trigger_validator::logging::codes;
use trigger_validator::{
    check_expression, log_info, logging, BatchResults, FunctionValidator, PipelineError,
    ValidatorOptions, ValueType,
};

#[derive(Parser, Debug)]
#[command(
    name = "trigger-check",
    about = "Validate trigger function calls and their parameters",
    version
)]
struct Args {
    /// Function calls to check, e.g. 'last(/host/key,#3)'
    #[arg(required = true)]
    expressions: Vec<String>,

    /// Item value type: float, uint, str, text or log
    #[arg(short = 't', long, value_parser = parse_value_type)]
    value_type: Option<ValueType>,

    /// Do not treat LLD macros as macro escapes
    #[arg(long)]
    no_lld_macros: bool,

    /// Allow calculated item query extensions
    #[arg(long)]
    calculated: bool,

    /// Print one JSON object per expression
    #[arg(long)]
    json: bool,

    /// Stop at the first expression that fails
    #[arg(long)]
    fail_fast: bool,

    /// TOML file with validator and logging preferences
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn parse_value_type(name: &str) -> Result<ValueType, String> {
    ValueType::from_name(name).ok_or_else(|| format!("unknown value type '{}'", name))
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(2)
        }
    }
}

/// Returns whether every expression passed
fn run(args: &Args) -> Result<bool, Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => {
            log::debug!("Loading configuration from {}", path.display());
            RuntimeConfig::load(path)?
        }
        None => RuntimeConfig::default(),
    };

    // Checking still works without the coded log stream
    if let Err(e) = logging::config::init_runtime_preferences(config.logging.clone())
        .and_then(|()| logging::init_global_logging())
    {
        logging::safe_log_error(codes::system::INITIALIZATION_FAILURE, &e);
    }

    let mut options = ValidatorOptions::from(&config.validator);
    options.lld_macros &= !args.no_lld_macros;
    options.calculated |= args.calculated;
    let value_type = args.value_type.unwrap_or(config.validator.default_value_type);
    log::info!(
        "Checking {} expression(s) as {} (lld_macros={}, calculated={})",
        args.expressions.len(),
        value_type,
        options.lld_macros,
        options.calculated
    );

    let validator = FunctionValidator::new(options).map_err(PipelineError::from)?;
    let mut results = BatchResults::new();

    for expression in &args.expressions {
        let failed = match check_expression(&validator, expression, value_type) {
            Ok(report) => {
                output::print_report(&report, args.json)?;
                let failed = !report.valid;
                results.add_report(report);
                failed
            }
            Err(e) => {
                output::print_error(expression, &e, args.json)?;
                results.add_error(expression, e);
                true
            }
        };

        if failed && args.fail_fast {
            log::debug!("Stopping after first failure");
            break;
        }
    }

    log_info!(&results.summary());
    Ok(results.all_valid())
}
