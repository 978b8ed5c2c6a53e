//! # Heridas Log Sink
//!
//! Best-effort archival of completed analyses:
//! 1. optionally upload the source photograph to a Drive folder and keep its link,
//! 2. append one row to the log spreadsheet, embedding that link (or a failure marker).
//!
//! Both steps are independently best-effort and not transactional: a row may reference a
//! failed upload, and an uploaded image may have no row if the append fails afterwards.
//! Nothing here ever fails the request; every outcome is folded into a [`LogReport`].

pub mod drive;
pub mod google_auth;
pub mod sheets;

use async_trait::async_trait;
use chrono::{DateTime, Local};
use heridas_core::constants::MISSING_CODE_FILE_STEM;
use heridas_core::{
    BlobReference, LogConfig, LogEntry, LogReport, LogRequest, LogResult, LogSink, LogStatus,
};
use heridas_types::DataUri;
use std::sync::Arc;

use drive::DriveArchive;
use google_auth::{ServiceAccountAuth, DRIVE_FILE_SCOPE, SPREADSHEETS_SCOPE};
use sheets::SheetsAppender;

/// Longest Google error body kept in a `LogError`; the message reaches the caller through
/// `sheetStatus`.
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Bounded excerpt of a non-success response body.
pub(crate) async fn error_excerpt(response: reqwest::Response) -> String {
    let body = response.text().await.unwrap_or_default();
    body.chars().take(MAX_ERROR_BODY_CHARS).collect()
}

/// Destination of log rows.
#[async_trait]
pub trait RowAppender: Send + Sync {
    async fn append(&self, row: &[String]) -> LogResult<()>;
}

/// A photograph to archive.
#[derive(Debug, Clone)]
pub struct ArchiveUpload<'a> {
    pub file_name: String,
    pub image: &'a DataUri,
}

/// Blob store for source photographs. Returns a durable link.
#[async_trait]
pub trait ImageArchive: Send + Sync {
    async fn upload(&self, upload: ArchiveUpload<'_>) -> LogResult<String>;
}

/// Log sink used when the log backend has no configuration. Performs no I/O.
#[derive(Debug, Default, Clone)]
pub struct UnconfiguredLogSink;

#[async_trait]
impl LogSink for UnconfiguredLogSink {
    async fn record(&self, _request: LogRequest<'_>) -> LogReport {
        LogReport::not_configured()
    }
}

/// Upload-then-append composition.
pub struct ArchivingLogSink {
    appender: Arc<dyn RowAppender>,
    archive: Option<Arc<dyn ImageArchive>>,
}

impl ArchivingLogSink {
    pub fn new(appender: Arc<dyn RowAppender>, archive: Option<Arc<dyn ImageArchive>>) -> Self {
        Self { appender, archive }
    }

    async fn archive_image(
        &self,
        archive: &dyn ImageArchive,
        request: &LogRequest<'_>,
        now: &DateTime<Local>,
    ) -> BlobReference {
        let upload = ArchiveUpload {
            file_name: archive_file_name(request.identification_code, now, request.image),
            image: request.image,
        };
        match archive.upload(upload).await {
            Ok(link) => BlobReference::Link(link),
            Err(e) => {
                tracing::warn!("image archive failed: {e}");
                BlobReference::UploadFailed
            }
        }
    }
}

#[async_trait]
impl LogSink for ArchivingLogSink {
    async fn record(&self, request: LogRequest<'_>) -> LogReport {
        let now = Local::now();

        let blob_reference = match &self.archive {
            Some(archive) => Some(self.archive_image(archive.as_ref(), &request, &now).await),
            None => None,
        };

        let entry = LogEntry::new(
            now.naive_local(),
            request.identification_code,
            request.record,
            request.provider,
            blob_reference.clone(),
        );

        let status = match self.appender.append(&entry.to_row()).await {
            Ok(()) => {
                tracing::info!(
                    identification_code = request.identification_code,
                    "analysis row appended"
                );
                LogStatus::Saved
            }
            Err(e) => {
                tracing::warn!("analysis row append failed: {e}");
                LogStatus::Failed(e.to_string())
            }
        };

        LogReport {
            status,
            blob_reference,
        }
    }
}

/// `<code or sin-codigo>_<YYYYMMDD-HHMMSS>.<ext>`, with path separators neutralised.
pub fn archive_file_name(identification_code: &str, now: &DateTime<Local>, image: &DataUri) -> String {
    let code = identification_code.trim();
    let stem = if code.is_empty() {
        MISSING_CODE_FILE_STEM.to_string()
    } else {
        code.replace(['/', '\\'], "-")
    };
    format!(
        "{stem}_{}.{}",
        now.format("%Y%m%d-%H%M%S"),
        image.extension()
    )
}

/// Builds the sink described by `config`.
///
/// Without sheet configuration the sink is [`UnconfiguredLogSink`]. The Drive archive is
/// wired in only when a folder id is configured as well.
///
/// # Errors
/// Returns an error if the HTTP client cannot be constructed.
pub fn log_sink_from_config(config: &LogConfig) -> Result<Arc<dyn LogSink>, reqwest::Error> {
    let Some(sheet) = &config.sheet else {
        tracing::info!("log sheet not configured; analyses will not be archived");
        return Ok(Arc::new(UnconfiguredLogSink));
    };

    let client = reqwest::Client::builder().build()?;
    let mut scopes = vec![SPREADSHEETS_SCOPE];
    if config.drive.is_some() {
        scopes.push(DRIVE_FILE_SCOPE);
    }
    let auth = ServiceAccountAuth::new(
        client.clone(),
        sheet.service_account.clone(),
        config.endpoints.token_url.clone(),
        &scopes,
    );

    let appender = Arc::new(SheetsAppender::new(
        client.clone(),
        auth.clone(),
        &config.endpoints.sheets_base_url,
        sheet.spreadsheet_id.as_str(),
        &sheet.range,
    ));

    let archive: Option<Arc<dyn ImageArchive>> = config.drive.as_ref().map(|drive| {
        Arc::new(DriveArchive::new(
            client,
            auth,
            &config.endpoints.drive_upload_base_url,
            drive.folder_id.as_str(),
        )) as Arc<dyn ImageArchive>
    });

    Ok(Arc::new(ArchivingLogSink::new(appender, archive)))
}
