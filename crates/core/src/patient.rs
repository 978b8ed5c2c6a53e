//! Per-request patient context used to tailor the care recommendations.

use crate::constants::{AGE_FALLBACK, FLAG_FALLBACK, SEX_FALLBACK};
use heridas_types::NonEmptyText;

/// Patient attributes sent alongside the photograph.
///
/// Blank values are stored as `None`; rendering substitutes the literal fallbacks so the
/// instruction never contains an empty interpolation. Never persisted on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientContext {
    age: Option<NonEmptyText>,
    sex: Option<NonEmptyText>,
    vascular_disease: Option<NonEmptyText>,
    cardiac_disease: Option<NonEmptyText>,
    diabetes: Option<NonEmptyText>,
}

impl PatientContext {
    pub fn new(
        age: Option<String>,
        sex: Option<String>,
        vascular_disease: Option<String>,
        cardiac_disease: Option<String>,
        diabetes: Option<String>,
    ) -> Self {
        Self {
            age: NonEmptyText::from_optional(age),
            sex: NonEmptyText::from_optional(sex),
            vascular_disease: NonEmptyText::from_optional(vascular_disease),
            cardiac_disease: NonEmptyText::from_optional(cardiac_disease),
            diabetes: NonEmptyText::from_optional(diabetes),
        }
    }

    pub fn age(&self) -> &str {
        text_or(&self.age, AGE_FALLBACK)
    }

    pub fn sex(&self) -> &str {
        text_or(&self.sex, SEX_FALLBACK)
    }

    pub fn vascular_disease(&self) -> &str {
        text_or(&self.vascular_disease, FLAG_FALLBACK)
    }

    pub fn cardiac_disease(&self) -> &str {
        text_or(&self.cardiac_disease, FLAG_FALLBACK)
    }

    pub fn diabetes(&self) -> &str {
        text_or(&self.diabetes, FLAG_FALLBACK)
    }
}

fn text_or<'a>(value: &'a Option<NonEmptyText>, fallback: &'static str) -> &'a str {
    value.as_ref().map(NonEmptyText::as_str).unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_context_renders_fallbacks() {
        let ctx = PatientContext::default();
        assert_eq!(ctx.age(), "No especificada");
        assert_eq!(ctx.sex(), "No especificado");
        assert_eq!(ctx.vascular_disease(), "No");
        assert_eq!(ctx.cardiac_disease(), "No");
        assert_eq!(ctx.diabetes(), "No");
    }

    #[test]
    fn test_blank_values_are_treated_as_absent() {
        let ctx = PatientContext::new(
            Some("  ".into()),
            Some(String::new()),
            None,
            Some("Si".into()),
            None,
        );
        assert_eq!(ctx.age(), "No especificada");
        assert_eq!(ctx.sex(), "No especificado");
        assert_eq!(ctx.cardiac_disease(), "Si");
    }
}
