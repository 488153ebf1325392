//! CLI error types.

/// A failure that stops the CLI before any validation runs.
///
/// All of these are usage errors and exit with status 2.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The input file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path as given on the command line.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Standard input could not be read.
    #[error("Failed to read standard input: {0}")]
    Stdin(#[source] std::io::Error),

    /// Remote inputs are not fetched.
    #[error("URL inputs are not supported; save the response body to a file or pass it on stdin")]
    UrlInput,

    /// A `--header` argument is malformed.
    #[error("Invalid header {0:?}: expected \"Name: value\"")]
    InvalidHeader(String),

    /// The report could not be written.
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),

    /// The report could not be serialized.
    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}
