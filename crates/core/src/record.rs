//! The normalised result of a single classification.

use crate::error::{ClassificationError, ClassificationResult};
use crate::vocabulary::{EnumeratedField, VocabularyViolation};
use serde::{Deserialize, Deserializer, Serialize};

/// Seven closed-vocabulary fields plus free-text care recommendations.
///
/// Produced once per request by the gateway and never mutated afterwards. Serialised with
/// the same JSON keys the model is asked to emit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRecord {
    #[serde(rename = "etiologia_probable")]
    pub etiology: String,
    #[serde(rename = "tejido_predominante")]
    pub predominant_tissue: String,
    #[serde(rename = "nivel_exudado")]
    pub exudate_level: String,
    #[serde(rename = "piel_perilesional")]
    pub perilesional_skin: String,
    #[serde(rename = "signos_infeccion")]
    pub infection_signs: String,
    #[serde(rename = "objetivo_aposito")]
    pub dressing_objective: String,
    #[serde(rename = "aposito_primario")]
    pub primary_dressing: String,
    #[serde(
        rename = "recomendaciones_cuidados",
        default,
        deserialize_with = "text_or_lines"
    )]
    pub care_recommendations: String,
}

impl ClassificationRecord {
    /// Parses a model reply that is expected to hold exactly one JSON object.
    pub fn from_reply(reply: &str) -> ClassificationResult<Self> {
        let reply = reply.trim();
        if reply.is_empty() {
            return Err(ClassificationError::MalformedReply("reply is empty".into()));
        }
        serde_json::from_str(reply).map_err(|e| ClassificationError::MalformedReply(e.to_string()))
    }

    pub fn field(&self, field: EnumeratedField) -> &str {
        match field {
            EnumeratedField::Etiology => &self.etiology,
            EnumeratedField::PredominantTissue => &self.predominant_tissue,
            EnumeratedField::ExudateLevel => &self.exudate_level,
            EnumeratedField::PerilesionalSkin => &self.perilesional_skin,
            EnumeratedField::InfectionSigns => &self.infection_signs,
            EnumeratedField::PrimaryDressing => &self.primary_dressing,
            EnumeratedField::DressingObjective => &self.dressing_objective,
        }
    }

    /// Fields whose value is outside the closed vocabulary, in declaration order.
    pub fn vocabulary_violations(&self) -> Vec<VocabularyViolation> {
        EnumeratedField::ALL
            .into_iter()
            .filter(|field| !field.allows(self.field(*field)))
            .map(|field| VocabularyViolation {
                field,
                value: self.field(field).to_string(),
            })
            .collect()
    }
}

/// Models occasionally answer the free-text field with a list of bullet lines.
fn text_or_lines<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrLines {
        Text(String),
        Lines(Vec<String>),
        Null(()),
    }

    Ok(match TextOrLines::deserialize(deserializer)? {
        TextOrLines::Text(text) => text,
        TextOrLines::Lines(lines) => lines.join("\n"),
        TextOrLines::Null(()) => String::new(),
    })
}
