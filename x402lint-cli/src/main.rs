//! Command-line validator for x402 payment configs and manifests.
//!
//! # Usage
//!
//! ```bash
//! # Validate a config or manifest file
//! x402lint config.json
//!
//! # Validate from stdin, failing on warnings, with JSON output
//! cat manifest.json | x402lint --strict --json
//!
//! # Check a saved 402 response body together with its header
//! x402lint body.json -H "PAYMENT-REQUIRED: eyJ4NDAyVmVyc2lvbiI6Mn0..."
//! ```
//!
//! # Exit Codes
//!
//! - `0` - Valid (manifests: passing endpoints outnumber failing ones)
//! - `1` - Invalid
//! - `2` - Usage error, unreadable input
//!
//! # Environment Variables
//!
//! - `X402LINT_STRICT` - Same as `--strict`
//! - `RUST_LOG` - Log level filter, written to stderr (default: `warn`)

mod args;
mod error;
mod input;
mod report;

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use serde_json::Value;
use tracing_subscriber::EnvFilter;
use x402lint::{ResponseLike, ValidationOptions, check_with, validate_document};

use crate::args::Args;
use crate::error::CliError;
use crate::input::InputSource;

const USAGE_EXIT_CODE: u8 = 2;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::from(USAGE_EXIT_CODE)
        }
    }
}

fn run(args: &Args) -> Result<u8, CliError> {
    let options = ValidationOptions::strict(args.strict);
    let source = InputSource::classify(args.input.as_deref())?;
    let mut out = io::stdout().lock();

    if args.is_check() {
        let headers = args.header_map()?;
        // no positional input means no body, not stdin
        let body = args
            .input
            .as_ref()
            .map(|_| source.read(io::stdin().lock()))
            .transpose()?
            .map(Value::String);
        let response = ResponseLike { body, headers };
        let result = check_with(&response, options);
        tracing::debug!(extracted = result.extracted, valid = result.valid, "checked response");

        if args.json {
            serde_json::to_writer_pretty(&mut out, &result)?;
            writeln!(out)?;
        } else if !args.quiet {
            report::write_check(&mut out, &result)?;
        }
        return Ok(u8::from(!result.valid));
    }

    let text = source.read(io::stdin().lock())?;
    let result = validate_document(&text, options);
    tracing::debug!(valid = result.is_valid(), "validated document");

    if args.json {
        serde_json::to_writer_pretty(&mut out, &result)?;
        writeln!(out)?;
    } else if !args.quiet {
        report::write_document(&mut out, &result)?;
    }
    Ok(u8::from(result.exit_code(args.strict) != 0))
}
