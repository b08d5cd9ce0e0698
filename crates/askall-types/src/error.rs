use thiserror::Error;

use crate::provider::Provider;

/// Errors detected while assembling a run, before anything is dispatched.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("please set environment variable {env_var} to use {provider}")]
    MissingCredential {
        provider: Provider,
        env_var: &'static str,
    },

    #[error("could not determine the user's home directory")]
    HomeDirUnavailable,

    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    #[error("prompt is empty")]
    EmptyPrompt,

    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Errors from one provider call (transport or vendor-reported).
///
/// Isolated to the dispatch unit that produced it; sibling calls continue.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("rate limited")]
    RateLimited,

    #[error("vendor error (HTTP {status}): {message}")]
    Vendor { status: u16, message: String },

    #[error("provider task panicked: {0}")]
    Panicked(String),
}

/// Why a vendor payload could not be turned into a canonical record.
///
/// Never escapes the normalizer; it selects the placeholder record instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizationError {
    #[error("response contained no candidates")]
    NoCandidates,

    #[error("candidate had no parseable content")]
    EmptyCandidate,

    #[error("malformed payload: {0}")]
    Malformed(String),
}

/// Errors from the interaction log store.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("log I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize log entry: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("index {index} doesn't make sense when we have {len} log entries")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("could not determine the user's home directory")]
    HomeDirUnavailable,
}

/// A stored record that failed to parse during replay.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct ReplayParseError {
    /// 1-based line number in the log file.
    pub line: usize,
    pub message: String,
}
