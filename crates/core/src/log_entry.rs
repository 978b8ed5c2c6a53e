//! Flattened log rows and the advisory outcome of archiving them.

use crate::constants::{
    LOG_STATUS_FAILED_PREFIX, LOG_STATUS_NOT_CONFIGURED, LOG_STATUS_SAVED, LOG_TIMESTAMP_FORMAT,
    PROMPT_VERSION_TAG, PROVENANCE_LABEL, UPLOAD_FAILED_MARKER,
};
use crate::provider::Provider;
use crate::record::ClassificationRecord;
use chrono::NaiveDateTime;

/// Reference to the archived source image, or the marker of a failed upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlobReference {
    Link(String),
    UploadFailed,
}

impl BlobReference {
    pub fn as_str(&self) -> &str {
        match self {
            BlobReference::Link(link) => link,
            BlobReference::UploadFailed => UPLOAD_FAILED_MARKER,
        }
    }
}

/// One append-only log row.
///
/// Free-text fields are excluded. The column order is fixed:
/// timestamp, code, etiology, tissue, exudate, infection signs, perilesional skin,
/// dressing objective, primary dressing, provenance, provider, format tag, [blob reference].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    timestamp: NaiveDateTime,
    identification_code: String,
    etiology: String,
    predominant_tissue: String,
    exudate_level: String,
    infection_signs: String,
    perilesional_skin: String,
    dressing_objective: String,
    primary_dressing: String,
    provider: Provider,
    blob_reference: Option<BlobReference>,
}

impl LogEntry {
    pub fn new(
        timestamp: NaiveDateTime,
        identification_code: &str,
        record: &ClassificationRecord,
        provider: Provider,
        blob_reference: Option<BlobReference>,
    ) -> Self {
        Self {
            timestamp,
            identification_code: identification_code.to_string(),
            etiology: record.etiology.clone(),
            predominant_tissue: record.predominant_tissue.clone(),
            exudate_level: record.exudate_level.clone(),
            infection_signs: record.infection_signs.clone(),
            perilesional_skin: record.perilesional_skin.clone(),
            dressing_objective: record.dressing_objective.clone(),
            primary_dressing: record.primary_dressing.clone(),
            provider,
            blob_reference,
        }
    }

    pub fn blob_reference(&self) -> Option<&BlobReference> {
        self.blob_reference.as_ref()
    }

    /// Cell values in column order.
    pub fn to_row(&self) -> Vec<String> {
        let mut row = vec![
            self.timestamp.format(LOG_TIMESTAMP_FORMAT).to_string(),
            self.identification_code.clone(),
            self.etiology.clone(),
            self.predominant_tissue.clone(),
            self.exudate_level.clone(),
            self.infection_signs.clone(),
            self.perilesional_skin.clone(),
            self.dressing_objective.clone(),
            self.primary_dressing.clone(),
            PROVENANCE_LABEL.to_string(),
            self.provider.display_name().to_string(),
            PROMPT_VERSION_TAG.to_string(),
        ];
        if let Some(reference) = &self.blob_reference {
            row.push(reference.as_str().to_string());
        }
        row
    }
}

/// Advisory outcome of the append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogStatus {
    Saved,
    NotConfigured,
    Failed(String),
}

impl LogStatus {
    /// Text returned to the caller as `sheetStatus`.
    pub fn status_text(&self) -> String {
        match self {
            LogStatus::Saved => LOG_STATUS_SAVED.to_string(),
            LogStatus::NotConfigured => LOG_STATUS_NOT_CONFIGURED.to_string(),
            LogStatus::Failed(reason) => format!("{LOG_STATUS_FAILED_PREFIX}: {reason}"),
        }
    }
}

/// Everything the caller learns about archival.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogReport {
    pub status: LogStatus,
    /// Present whenever an upload was attempted, successful or not.
    pub blob_reference: Option<BlobReference>,
}

impl LogReport {
    pub fn not_configured() -> Self {
        Self {
            status: LogStatus::NotConfigured,
            blob_reference: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::tests::sample_record;
    use chrono::NaiveDate;

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 4)
            .unwrap()
            .and_hms_opt(9, 5, 7)
            .unwrap()
    }

    #[test]
    fn test_to_row_follows_column_order() {
        let record = sample_record();
        let entry = LogEntry::new(timestamp(), "SUBJ-001", &record, Provider::Gemini, None);
        let row = entry.to_row();

        assert_eq!(row.len(), 12);
        assert_eq!(row[0], "04/03/2026 09:05:07");
        assert_eq!(row[1], "SUBJ-001");
        assert_eq!(row[2], record.etiology);
        assert_eq!(row[3], record.predominant_tissue);
        assert_eq!(row[4], record.exudate_level);
        assert_eq!(row[5], record.infection_signs);
        assert_eq!(row[6], record.perilesional_skin);
        assert_eq!(row[7], record.dressing_objective);
        assert_eq!(row[8], record.primary_dressing);
        assert_eq!(row[9], "Inteligencia Artificial");
        assert_eq!(row[10], "Gemini");
        assert_eq!(row[11], "Prompt v1.0");
    }

    #[test]
    fn test_to_row_excludes_free_text() {
        let record = sample_record();
        let row = LogEntry::new(timestamp(), "", &record, Provider::ChatGpt, None).to_row();
        assert!(!row.contains(&record.care_recommendations));
        assert_eq!(row[10], "ChatGPT");
    }

    #[test]
    fn test_to_row_appends_blob_reference_column() {
        let record = sample_record();
        let link = LogEntry::new(
            timestamp(),
            "A",
            &record,
            Provider::Gemini,
            Some(BlobReference::Link("https://drive.example/file".into())),
        );
        assert_eq!(link.to_row()[12], "https://drive.example/file");

        let failed = LogEntry::new(
            timestamp(),
            "A",
            &record,
            Provider::Gemini,
            Some(BlobReference::UploadFailed),
        );
        assert_eq!(failed.to_row()[12], "Error al subir imagen");
    }

    #[test]
    fn test_status_text_literals() {
        assert_eq!(LogStatus::Saved.status_text(), "Guardado OK");
        assert_eq!(LogStatus::NotConfigured.status_text(), "No configurado");
        assert_eq!(
            LogStatus::Failed("403 Forbidden".into()).status_text(),
            "Fallo Excel: 403 Forbidden"
        );
    }
}
