use serde::{Serialize, Deserialize};
use std::fmt;

/// Unified error type for the maromba core.
/// All fallible functions return Result<T, MarombaError> instead of String errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarombaError {
    pub message: String,
    pub stage: String,
    pub context: Option<String>,
    pub source: Option<String>,
}

impl MarombaError {
    /// Create a new error with stage and message
    pub fn new<S: Into<String>>(message: S, stage: &'static str) -> Self {
        MarombaError {
            message: message.into(),
            stage: stage.to_string(),
            context: None,
            source: None,
        }
    }

    /// Add additional context information
    pub fn with_context<S: Into<String>>(mut self, context: S) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add source error information
    pub fn with_source<S: Into<String>>(mut self, source: S) -> Self {
        self.source = Some(source.into());
        self
    }

    /// True for the session factory's day-lookup failure, the one error
    /// callers are expected to branch on.
    pub fn is_day_not_found(&self) -> bool {
        self.stage == "day_lookup"
    }
}

impl fmt::Display for MarombaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.stage, self.message)?;
        if let Some(ref context) = self.context {
            write!(f, " (context: {})", context)?;
        }
        if let Some(ref source) = self.source {
            write!(f, " (source: {})", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for MarombaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

impl From<anyhow::Error> for MarombaError {
    fn from(err: anyhow::Error) -> Self {
        MarombaError::new(
            err.to_string(),
            "unknown"
        ).with_source("anyhow")
    }
}

impl From<std::io::Error> for MarombaError {
    fn from(err: std::io::Error) -> Self {
        MarombaError::new(
            format!("I/O error: {}", err),
            "io"
        ).with_source("std::io")
    }
}

impl From<serde_json::Error> for MarombaError {
    fn from(err: serde_json::Error) -> Self {
        MarombaError::new(
            format!("JSON error: {}", err),
            "json_parse"
        ).with_source("serde_json")
    }
}

impl From<reqwest::Error> for MarombaError {
    fn from(err: reqwest::Error) -> Self {
        MarombaError::new(
            format!("HTTP error: {}", err),
            "fetch"
        ).with_source("reqwest")
    }
}

impl From<tokio::time::error::Elapsed> for MarombaError {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        MarombaError::new(
            "Operation timed out",
            "timeout"
        ).with_source("tokio::time")
    }
}
