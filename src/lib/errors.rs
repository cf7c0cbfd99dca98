use std::{io, path::PathBuf};

use config::ConfigError as ConfigLoaderError;
use thiserror::Error;

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to build (read) the configuration file.
    #[error("Failed to read configuration file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Failed to deserialize the layered configuration into a struct.
    #[error("Failed to parse configuration {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Required field is missing.
    #[error("Configuration {path} is missing `{field}`")]
    MissingField { path: PathBuf, field: &'static str },
    /// Field failed validation.
    #[error("Configuration {path} has invalid `{field}`: {message}")]
    InvalidField {
        path: PathBuf,
        field: &'static str,
        message: String,
    },
}

impl ConfigError {
    /// Helper to wrap `config::ConfigError` as a read failure.
    pub fn from_read_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::FileRead { path, source }
    }

    /// Helper to wrap `config::ConfigError` as a parse failure.
    pub fn from_parse_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::Parse { path, source }
    }
}

/// Failures while locating the report file.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Invalid glob pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
    #[error("Failed to enumerate matches for `{pattern}`: {source}")]
    Glob {
        pattern: String,
        #[source]
        source: glob::GlobError,
    },
    #[error("No report file found for {location}")]
    Missing { location: String },
    #[error("Failed to read report file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failures while turning report text into a table.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Malformed CSV content: {0}")]
    Csv(#[from] csv::Error),
}

/// Failures while decoding or using the service-account credential document.
#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("Credential document is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("Credential document is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("Service account JSON could not be processed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Service account private key is unusable: {message}")]
    PemKey { message: String },
    #[error("Failed to sign token request: {message}")]
    Signing { message: String },
}

/// Failures returned by the spreadsheet service or its transport.
#[derive(Debug, Error)]
pub enum SheetsError {
    #[error(transparent)]
    Credentials(#[from] CredentialsError),
    #[error("{operation} request failed: {source}")]
    Http {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{operation} returned HTTP {status}: {body}")]
    Status {
        operation: &'static str,
        status: u16,
        body: String,
    },
    #[error("API base URL `{url}` cannot carry request paths")]
    BaseUrl { url: String },
    #[error("Tab `{title}` already exists in the spreadsheet")]
    TabExists { title: String },
    #[error("{operation} returned an unexpected response: {message}")]
    UnexpectedResponse {
        operation: &'static str,
        message: String,
    },
}

/// Top-level failure of a push run. Every variant terminates with exit code 1.
#[derive(Debug, Error)]
pub enum PushError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error(transparent)]
    Credentials(#[from] CredentialsError),
    #[error(transparent)]
    Sheets(#[from] SheetsError),
}

impl PushError {
    /// Short machine-readable category used in logs.
    pub const fn kind(&self) -> &'static str {
        match self {
            PushError::Config(_) => "config",
            PushError::Source(_) => "source",
            PushError::Report(_) => "report",
            PushError::Credentials(_) => "credentials",
            PushError::Sheets(_) => "sheets",
        }
    }
}
