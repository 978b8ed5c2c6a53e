use crate::vocabulary::VocabularyViolation;

/// Failure of a classification call.
///
/// Every variant is fatal to the request and none is retried. The variants exist only to
/// give the caller a precise message.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ClassificationError {
    #[error("{provider} is not configured: {reason}")]
    NotConfigured {
        provider: &'static str,
        reason: String,
    },
    #[error("request to {provider} failed: {message}")]
    Http {
        provider: &'static str,
        message: String,
    },
    #[error("{provider} returned HTTP {status}: {body}")]
    ProviderStatus {
        provider: &'static str,
        status: u16,
        body: String,
    },
    #[error("{provider} returned an empty response")]
    EmptyResponse { provider: &'static str },
    #[error("model reply is not a valid classification: {0}")]
    MalformedReply(String),
    #[error("model reply uses values outside the closed vocabularies: {}", format_violations(.0))]
    OutOfVocabulary(Vec<VocabularyViolation>),
}

fn format_violations(violations: &[VocabularyViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub type ClassificationResult<T> = std::result::Result<T, ClassificationError>;

/// Failure of the best-effort archival side channel.
///
/// A `LogError` never aborts a request; the sink folds it into a status string.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LogError {
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("image upload failed: {0}")]
    Upload(String),
    #[error("row append failed: {0}")]
    Append(String),
}

pub type LogResult<T> = std::result::Result<T, LogError>;

/// Request-fatal outcomes of an analysis.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Classification(#[from] ClassificationError),
}

pub type AnalysisResult<T> = std::result::Result<T, AnalysisError>;

/// Startup configuration problems.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
