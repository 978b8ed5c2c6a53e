//! # API Shared
//!
//! Wire types for the Heridas HTTP API.
//!
//! Contains:
//! - The analysis request and response bodies (camelCase envelope, Spanish record keys)
//! - The error body
//! - `HealthService` and its response
//!
//! Conversion to and from the `heridas-core` domain types happens here so that the REST
//! crate only deals with routing and status codes.

pub mod health;

pub use health::HealthService;

use heridas_core::{AnalysisRequest, AnalysisResponse, PatientContext, Provider};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Optional patient attributes.
///
/// Values are free text; numbers and booleans are accepted too and converted to text
/// (`true` → "Si", `false` → "No").
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PatientData {
    #[serde(default, deserialize_with = "lenient_text")]
    pub edad: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub sexo: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub vascular: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub cardiaca: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub diabetico: Option<String>,
}

/// Body of `POST /api/analyze`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeReq {
    /// Base64 image data URI (`data:image/jpeg;base64,...`).
    #[serde(default)]
    pub image: Option<String>,
    /// `gemini` or `chatgpt`; anything else selects ChatGPT.
    #[serde(default)]
    pub model_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub identification_code: Option<String>,
    #[serde(default)]
    pub patient_data: Option<PatientData>,
}

impl From<AnalyzeReq> for AnalysisRequest {
    fn from(req: AnalyzeReq) -> Self {
        let patient = req.patient_data.unwrap_or_default();
        AnalysisRequest {
            image: req.image,
            provider: Provider::from_tag(req.model_id.as_deref()),
            identification_code: req.identification_code.unwrap_or_default(),
            patient: PatientContext::new(
                patient.edad,
                patient.sexo,
                patient.vascular,
                patient.cardiaca,
                patient.diabetico,
            ),
        }
    }
}

/// Successful analysis: the classification record plus the archival outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeRes {
    pub etiologia_probable: String,
    pub tejido_predominante: String,
    pub nivel_exudado: String,
    pub piel_perilesional: String,
    pub signos_infeccion: String,
    pub objetivo_aposito: String,
    pub aposito_primario: String,
    pub recomendaciones_cuidados: String,
    /// `Guardado OK`, `No configurado` or `Fallo Excel: <motivo>`.
    #[serde(rename = "sheetStatus")]
    pub sheet_status: String,
    /// Link to the archived photograph, or the upload-failure marker. Absent when no
    /// upload was attempted.
    #[serde(rename = "driveLink", default, skip_serializing_if = "Option::is_none")]
    pub drive_link: Option<String>,
}

impl From<AnalysisResponse> for AnalyzeRes {
    fn from(res: AnalysisResponse) -> Self {
        let record = res.record;
        AnalyzeRes {
            etiologia_probable: record.etiology,
            tejido_predominante: record.predominant_tissue,
            nivel_exudado: record.exudate_level,
            piel_perilesional: record.perilesional_skin,
            signos_infeccion: record.infection_signs,
            objetivo_aposito: record.dressing_objective,
            aposito_primario: record.primary_dressing,
            recomendaciones_cuidados: record.care_recommendations,
            sheet_status: res.log.status.status_text(),
            drive_link: res
                .log
                .blob_reference
                .map(|reference| reference.as_str().to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

impl ErrorRes {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(true) => Some("Si".into()),
        serde_json::Value::Bool(false) => Some("No".into()),
        _ => None,
    })
}
