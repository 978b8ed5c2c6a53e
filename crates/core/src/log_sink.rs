//! Capability implemented by the archival side channel.

use crate::log_entry::LogReport;
use crate::provider::Provider;
use crate::record::ClassificationRecord;
use heridas_types::DataUri;

/// Inputs of one archival attempt.
#[derive(Debug, Clone, Copy)]
pub struct LogRequest<'a> {
    pub record: &'a ClassificationRecord,
    pub identification_code: &'a str,
    pub provider: Provider,
    pub image: &'a DataUri,
}

/// Best-effort, append-only log of completed analyses.
///
/// The return type carries no error channel: failures are reported through
/// [`LogReport::status`] and never abort the request.
#[async_trait::async_trait]
pub trait LogSink: Send + Sync {
    async fn record(&self, request: LogRequest<'_>) -> LogReport;
}
