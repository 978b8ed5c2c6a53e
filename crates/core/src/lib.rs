//! # Heridas Core
//!
//! Core logic of the wound-photograph classification service.
//!
//! This crate contains the provider-agnostic parts of an analysis:
//! - Patient context and the instruction (prompt) builder
//! - The classification record, its seven closed vocabularies and the vocabulary check
//! - The log-row mapping and the advisory log status
//! - The `Classifier` and `LogSink` capabilities and the `AnalysisService` that composes them
//! - Startup configuration
//!
//! **No transport concerns**: provider HTTP clients live in `heridas-gateway`, Google
//! Sheets/Drive clients in `heridas-log-sink`, and the HTTP server in `api-rest`.

pub mod analysis;
pub mod classifier;
pub mod config;
pub mod constants;
pub mod error;
pub mod log_entry;
pub mod log_sink;
pub mod patient;
pub mod prompt;
pub mod provider;
pub mod record;
pub mod vocabulary;

pub use analysis::{AnalysisRequest, AnalysisResponse, AnalysisService};
pub use classifier::Classifier;
pub use config::{CoreConfig, GatewayConfig, LogConfig};
pub use error::{
    AnalysisError, AnalysisResult, ClassificationError, ClassificationResult, ConfigError,
    LogError, LogResult,
};
pub use log_entry::{BlobReference, LogEntry, LogReport, LogStatus};
pub use log_sink::{LogRequest, LogSink};
pub use patient::PatientContext;
pub use provider::Provider;
pub use record::ClassificationRecord;
pub use vocabulary::{EnumeratedField, VocabularyPolicy, VocabularyViolation};

pub use heridas_types::{DataUri, NonEmptyText};
