//! Command-line arguments.

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};
use http::{HeaderMap, HeaderName, HeaderValue};

use crate::error::CliError;

/// Validate an x402 payment config or manifest.
#[derive(Debug, Parser)]
#[command(name = "x402lint", version, about)]
pub struct Args {
    /// File path, inline JSON, or `-` for standard input (the default).
    pub input: Option<String>,

    /// Treat every warning as an error.
    #[arg(long, env = "X402LINT_STRICT", action = ArgAction::SetTrue, value_parser = BoolishValueParser::new())]
    pub strict: bool,

    /// Print the full result as JSON.
    #[arg(long)]
    pub json: bool,

    /// Print nothing; report through the exit code only.
    #[arg(short, long, conflicts_with = "json")]
    pub quiet: bool,

    /// Response header as "Name: value". Treats the input as a 402 response
    /// body and extracts the config from it or from `PAYMENT-REQUIRED`.
    #[arg(short = 'H', long = "header", value_name = "HEADER")]
    pub headers: Vec<String>,
}

impl Args {
    /// Whether the response-check path was requested.
    pub fn is_check(&self) -> bool {
        !self.headers.is_empty()
    }

    /// Parses the `--header` arguments.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::InvalidHeader`] for an argument without a colon, or
    /// whose name or value is not a legal HTTP header.
    pub fn header_map(&self) -> Result<HeaderMap, CliError> {
        let mut map = HeaderMap::new();
        for raw in &self.headers {
            let invalid = || CliError::InvalidHeader(raw.clone());
            let (name, value) = raw.split_once(':').ok_or_else(invalid)?;
            let name = HeaderName::from_bytes(name.trim().as_bytes()).map_err(|_| invalid())?;
            let value = HeaderValue::from_str(value.trim()).map_err(|_| invalid())?;
            map.append(name, value);
        }
        Ok(map)
    }
}
