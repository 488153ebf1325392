//! Resolving the positional input into document text.

use std::fs;
use std::io::Read;

use crate::error::CliError;

/// Where the document comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource<'a> {
    /// Standard input.
    Stdin,
    /// JSON given directly on the command line.
    Inline(&'a str),
    /// A file path.
    File(&'a str),
}

impl<'a> InputSource<'a> {
    /// Classifies the positional argument.
    ///
    /// Text starting with `{` or `[` is inline JSON; anything else is a path.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::UrlInput`] for `http://` and `https://` inputs.
    pub fn classify(input: Option<&'a str>) -> Result<Self, CliError> {
        let Some(input) = input.filter(|input| *input != "-") else {
            return Ok(Self::Stdin);
        };
        let trimmed = input.trim_start();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            return Err(CliError::UrlInput);
        }
        if trimmed.starts_with('{') || trimmed.starts_with('[') {
            return Ok(Self::Inline(input));
        }
        Ok(Self::File(input))
    }

    /// Reads the document text.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Read`] or [`CliError::Stdin`] when the text cannot
    /// be read.
    pub fn read(self, mut stdin: impl Read) -> Result<String, CliError> {
        match self {
            Self::Stdin => {
                let mut text = String::new();
                stdin.read_to_string(&mut text).map_err(CliError::Stdin)?;
                Ok(text)
            }
            Self::Inline(text) => Ok(text.to_owned()),
            Self::File(path) => fs::read_to_string(path).map_err(|source| CliError::Read {
                path: path.to_owned(),
                source,
            }),
        }
    }
}
