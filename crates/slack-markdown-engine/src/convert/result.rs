use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;

use super::guard::SectionFailure;
use crate::models::Message;

/// How many characters of unparseable input are kept in error details.
const RAW_EXCERPT_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidJson,
    MissingContent,
    PartialConversion,
    UnknownError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidJson => "INVALID_JSON",
            ErrorCode::MissingContent => "MISSING_CONTENT",
            ErrorCode::PartialConversion => "PARTIAL_CONVERSION",
            ErrorCode::UnknownError => "UNKNOWN_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a message could not be converted (or only partly).
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("{code}: {message}")]
pub struct ConversionError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ConversionError {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Option<Value>) -> Self {
        Self {
            code,
            message: message.into(),
            details,
        }
    }

    /// Input that is not JSON at all; details keep the first 100 characters.
    pub fn invalid_json(raw: &str) -> Self {
        let excerpt: String = raw.chars().take(RAW_EXCERPT_CHARS).collect();
        Self::new(
            ErrorCode::InvalidJson,
            "Invalid JSON format",
            Some(Value::String(excerpt)),
        )
    }

    /// JSON that does not have the shape of a message.
    pub fn invalid_shape(err: &serde_json::Error) -> Self {
        Self::new(
            ErrorCode::InvalidJson,
            "Message does not match the expected shape",
            Some(json!({ "error": err.to_string() })),
        )
    }

    /// Nothing renderable; details carry the message itself.
    pub fn missing_content(message: &Message) -> serde_json::Result<Self> {
        Ok(Self::new(
            ErrorCode::MissingContent,
            "No content to convert",
            Some(serde_json::to_value(message)?),
        ))
    }

    pub fn partial_conversion(failures: &[SectionFailure]) -> Self {
        let details = failures.iter().map(|f| Value::String(f.to_string())).collect();
        Self::new(
            ErrorCode::PartialConversion,
            "Some elements could not be converted",
            Some(Value::Array(details)),
        )
    }

    /// Anything that escaped every other guard.
    pub fn unknown_error(err: &anyhow::Error) -> Self {
        Self::new(
            ErrorCode::UnknownError,
            err.to_string(),
            Some(Value::String(format!("{err:#}"))),
        )
    }
}

/// Outcome of converting one message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ConversionResult {
    Success {
        markdown: String,
    },
    Failure {
        error: ConversionError,
        /// Best-effort rendering produced before the failure was detected.
        #[serde(skip_serializing_if = "Option::is_none")]
        partial_markdown: Option<String>,
    },
}

impl ConversionResult {
    pub fn success(markdown: String) -> Self {
        ConversionResult::Success { markdown }
    }

    pub fn failure(error: ConversionError) -> Self {
        ConversionResult::Failure {
            error,
            partial_markdown: None,
        }
    }

    pub fn partial(markdown: String, failures: &[SectionFailure]) -> Self {
        ConversionResult::Failure {
            error: ConversionError::partial_conversion(failures),
            partial_markdown: Some(markdown),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ConversionResult::Success { .. })
    }

    /// The full rendering on success.
    pub fn markdown(&self) -> Option<&str> {
        match self {
            ConversionResult::Success { markdown } => Some(markdown),
            ConversionResult::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&ConversionError> {
        match self {
            ConversionResult::Success { .. } => None,
            ConversionResult::Failure { error, .. } => Some(error),
        }
    }

    pub fn partial_markdown(&self) -> Option<&str> {
        match self {
            ConversionResult::Success { .. } => None,
            ConversionResult::Failure {
                partial_markdown, ..
            } => partial_markdown.as_deref(),
        }
    }

    /// Converts into a `Result`, keeping any partial rendering on the error side.
    pub fn into_result(self) -> Result<String, (ConversionError, Option<String>)> {
        match self {
            ConversionResult::Success { markdown } => Ok(markdown),
            ConversionResult::Failure {
                error,
                partial_markdown,
            } => Err((error, partial_markdown)),
        }
    }
}
