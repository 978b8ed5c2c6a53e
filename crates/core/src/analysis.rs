//! Request orchestration for a single wound analysis.
//!
//! Per request: `received → validated → classified → (logged | log-failed) → responded`.
//! A missing or unreadable image ends in `rejected` before anything external is called; a
//! gateway failure ends in `classification-failed` and the log sink is never reached.

use crate::classifier::Classifier;
use crate::error::{AnalysisError, AnalysisResult};
use crate::log_entry::{LogReport, LogStatus};
use crate::log_sink::{LogRequest, LogSink};
use crate::patient::PatientContext;
use crate::prompt::build_instruction;
use crate::provider::Provider;
use crate::record::ClassificationRecord;
use heridas_types::DataUri;
use std::sync::Arc;

/// Message returned when the request carries no image.
pub const MISSING_IMAGE_MESSAGE: &str = "Falta imagen";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Received,
    Validated,
    Classified,
    Logged,
    LogFailed,
    Responded,
    Rejected,
    ClassificationFailed,
}

impl Stage {
    fn trace(self, code: &str) {
        tracing::debug!(stage = ?self, identification_code = code, "analysis stage");
    }
}

/// Raw inputs of one analysis, as received from the caller.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub image: Option<String>,
    pub provider: Provider,
    pub identification_code: String,
    pub patient: PatientContext,
}

/// The classification plus the advisory archival outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResponse {
    pub record: ClassificationRecord,
    pub log: LogReport,
}

/// Composes prompt building, classification and best-effort logging.
///
/// Holds no mutable state; requests are independent of each other.
#[derive(Clone)]
pub struct AnalysisService {
    classifier: Arc<dyn Classifier>,
    log_sink: Arc<dyn LogSink>,
}

impl AnalysisService {
    pub fn new(classifier: Arc<dyn Classifier>, log_sink: Arc<dyn LogSink>) -> Self {
        Self {
            classifier,
            log_sink,
        }
    }

    /// Runs one analysis.
    ///
    /// # Errors
    /// - `AnalysisError::Validation` if the image is missing, blank or not a base64 image
    ///   data URI.
    /// - `AnalysisError::Classification` if the selected provider fails.
    ///
    /// Archival failures are never returned as errors; they are reported in
    /// [`AnalysisResponse::log`].
    pub async fn analyse(&self, request: AnalysisRequest) -> AnalysisResult<AnalysisResponse> {
        let code = request.identification_code.as_str();
        Stage::Received.trace(code);

        let image = match request.image.as_deref().map(str::trim) {
            None | Some("") => {
                Stage::Rejected.trace(code);
                return Err(AnalysisError::Validation(MISSING_IMAGE_MESSAGE.into()));
            }
            Some(raw) => DataUri::parse(raw).map_err(|e| {
                Stage::Rejected.trace(code);
                AnalysisError::Validation(format!("Imagen no válida: {e}"))
            })?,
        };
        Stage::Validated.trace(code);

        let instruction = build_instruction(&request.patient);
        let record = match self
            .classifier
            .classify(request.provider, &image, &instruction)
            .await
        {
            Ok(record) => record,
            Err(e) => {
                Stage::ClassificationFailed.trace(code);
                tracing::error!(provider = %request.provider, "classification failed: {e}");
                return Err(e.into());
            }
        };
        Stage::Classified.trace(code);

        let log = self
            .log_sink
            .record(LogRequest {
                record: &record,
                identification_code: code,
                provider: request.provider,
                image: &image,
            })
            .await;
        match &log.status {
            LogStatus::Failed(reason) => {
                Stage::LogFailed.trace(code);
                tracing::warn!("analysis log not written: {reason}");
            }
            LogStatus::Saved | LogStatus::NotConfigured => Stage::Logged.trace(code),
        }

        Stage::Responded.trace(code);
        Ok(AnalysisResponse { record, log })
    }
}
