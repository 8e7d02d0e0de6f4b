//! Error types for ferro-hla
//!
//! Parse-boundary failures are surfaced as [`HlaError`] values so callers
//! can branch without unwinding. API misuse (constructing an allele from
//! parts that fail the grammar, or resolving a locus slot from an unknown
//! raw code) panics instead, and is documented on the operation that
//! raises it.

use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Main error type for ferro-hla parse boundaries
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HlaError {
    /// The token has no `*` separator and is not a negative/missing token
    #[error("Allele must contain '*': {token}")]
    MissingSeparator { token: String },

    /// The locus code is not one of the known loci or B3/B4/B5 aliases
    #[error("Unknown HLA locus: {code}")]
    UnknownLocus { code: String },

    /// The locus group code is not one of the known groups
    #[error("Unknown HLA locus group: {code}")]
    UnknownLocusGroup { code: String },

    /// The specificity does not match the allele grammar
    #[error("Invalid specificity: {specificity}")]
    InvalidSpecificity { specificity: String },
}

impl HlaError {
    pub(crate) fn missing_separator(token: impl Into<String>) -> Self {
        HlaError::MissingSeparator {
            token: token.into(),
        }
    }

    pub(crate) fn unknown_locus(code: impl Into<String>) -> Self {
        HlaError::UnknownLocus { code: code.into() }
    }

    pub(crate) fn unknown_locus_group(code: impl Into<String>) -> Self {
        HlaError::UnknownLocusGroup { code: code.into() }
    }

    pub(crate) fn invalid_specificity(specificity: impl Into<String>) -> Self {
        HlaError::InvalidSpecificity {
            specificity: specificity.into(),
        }
    }
}

/// Error wrapper carrying an HTTP-style status code and an optional cause
///
/// Rendered as the message, a `Status Code:` line, and one `Caused by:`
/// line per link of the source chain.
#[derive(Debug)]
pub struct ApiError {
    message: String,
    status_code: u16,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl ApiError {
    /// Create an error with the default status code (500)
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_status(message, 500)
    }

    /// Create an error with an explicit status code
    pub fn with_status(message: impl Into<String>, status_code: u16) -> Self {
        Self {
            message: message.into(),
            status_code,
            source: None,
        }
    }

    /// Attach the error that caused this one
    pub fn caused_by(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\nStatus Code: {}", self.message, self.status_code)?;

        let mut cause = self
            .source
            .as_deref()
            .map(|err| err as &(dyn StdError + 'static));
        while let Some(err) = cause {
            // A nested ApiError contributes only its message, not its own
            // status/cause rendering
            match err.downcast_ref::<ApiError>() {
                Some(api) => write!(f, "\nCaused by: {}", api.message)?,
                None => write!(f, "\nCaused by: {err}")?,
            }
            cause = err.source();
        }
        Ok(())
    }
}

impl StdError for ApiError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|err| err as &(dyn StdError + 'static))
    }
}
