//! The seven enumerated classification fields and their closed vocabularies.

use crate::constants::{
    DRESSING_OBJECTIVE_VOCABULARY, ETIOLOGY_VOCABULARY, EXUDATE_VOCABULARY,
    INFECTION_SIGNS_VOCABULARY, PERILESIONAL_SKIN_VOCABULARY, PRIMARY_DRESSING_VOCABULARY,
    TISSUE_VOCABULARY,
};

/// A classification attribute restricted to a fixed list of labels.
///
/// The declaration order is the order in which the fields are listed in the instruction text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumeratedField {
    Etiology,
    PredominantTissue,
    ExudateLevel,
    PerilesionalSkin,
    InfectionSigns,
    PrimaryDressing,
    DressingObjective,
}

impl EnumeratedField {
    pub const ALL: [EnumeratedField; 7] = [
        EnumeratedField::Etiology,
        EnumeratedField::PredominantTissue,
        EnumeratedField::ExudateLevel,
        EnumeratedField::PerilesionalSkin,
        EnumeratedField::InfectionSigns,
        EnumeratedField::PrimaryDressing,
        EnumeratedField::DressingObjective,
    ];

    /// JSON key used both in the model reply and in the HTTP response.
    pub fn key(self) -> &'static str {
        match self {
            EnumeratedField::Etiology => "etiologia_probable",
            EnumeratedField::PredominantTissue => "tejido_predominante",
            EnumeratedField::ExudateLevel => "nivel_exudado",
            EnumeratedField::PerilesionalSkin => "piel_perilesional",
            EnumeratedField::InfectionSigns => "signos_infeccion",
            EnumeratedField::PrimaryDressing => "aposito_primario",
            EnumeratedField::DressingObjective => "objetivo_aposito",
        }
    }

    pub fn vocabulary(self) -> &'static [&'static str] {
        match self {
            EnumeratedField::Etiology => ETIOLOGY_VOCABULARY,
            EnumeratedField::PredominantTissue => TISSUE_VOCABULARY,
            EnumeratedField::ExudateLevel => EXUDATE_VOCABULARY,
            EnumeratedField::PerilesionalSkin => PERILESIONAL_SKIN_VOCABULARY,
            EnumeratedField::InfectionSigns => INFECTION_SIGNS_VOCABULARY,
            EnumeratedField::PrimaryDressing => PRIMARY_DRESSING_VOCABULARY,
            EnumeratedField::DressingObjective => DRESSING_OBJECTIVE_VOCABULARY,
        }
    }

    /// Whether `value` is one of the allowed labels. Surrounding whitespace is ignored.
    pub fn allows(self, value: &str) -> bool {
        let value = value.trim();
        self.vocabulary().iter().any(|label| *label == value)
    }
}

impl std::fmt::Display for EnumeratedField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// A value returned by the model that is not in its field's vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyViolation {
    pub field: EnumeratedField,
    pub value: String,
}

impl std::fmt::Display for VocabularyViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}='{}'", self.field, self.value)
    }
}

/// What to do with a record carrying out-of-vocabulary values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VocabularyPolicy {
    /// Log the violations and forward the record unchanged.
    #[default]
    Flag,
    /// Fail the classification.
    Reject,
}

impl std::str::FromStr for VocabularyPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flag" => Ok(VocabularyPolicy::Flag),
            "reject" => Ok(VocabularyPolicy::Reject),
            other => Err(format!(
                "unknown vocabulary policy '{other}' (expected 'flag' or 'reject')"
            )),
        }
    }
}
