//! Instruction text sent to the classification providers.
//!
//! The instruction is the fixed task description followed by the patient context block. It
//! is a pure function of [`PatientContext`]; both providers receive the exact same string.

use crate::patient::PatientContext;
use crate::vocabulary::EnumeratedField;
use std::fmt::Write as _;

const TASK_PREAMBLE: &str = "\
Actúa como enfermera experta en heridas. Analiza la imagen y devuelve un JSON.
Debes elegir la opción que mejor encaje de las listas EXACTAS para los campos de selección.

IMPORTANTE:
Se te proporcionará contexto del paciente (Edad, Diabetes, etc.). USA ESE CONTEXTO para personalizar el campo \"recomendaciones_cuidados\".
Por ejemplo, si es diabético, enfócate en control glucémico y descargas. Si tiene patología vascular, adapta el vendaje, etc.

Listas EXACTAS:
";

const TASK_CLOSING: &str = "
El campo \"recomendaciones_cuidados\" debe ser un texto breve (string) con saltos de línea o guiones.
Responde SOLO con el JSON válido.
";

/// Fixed task description naming the seven fields and their vocabularies.
pub fn task_description() -> String {
    let mut out = String::from(TASK_PREAMBLE);
    for field in EnumeratedField::ALL {
        let _ = writeln!(out, "- {}: [", field.key());
        let labels = field.vocabulary();
        for (i, label) in labels.iter().enumerate() {
            let sep = if i + 1 < labels.len() { "," } else { "" };
            let _ = writeln!(out, "    \"{label}\"{sep}");
        }
        out.push_str("  ]\n");
    }
    out.push_str(TASK_CLOSING);
    out
}

/// Patient context block appended after the task description.
pub fn patient_context_block(ctx: &PatientContext) -> String {
    format!(
        "CONTEXTO DEL PACIENTE:\n\
         - Edad: {}\n\
         - Sexo: {}\n\
         - Patología Vascular: {}\n\
         - Patología Cardiaca: {}\n\
         - Diabético: {}\n",
        ctx.age(),
        ctx.sex(),
        ctx.vascular_disease(),
        ctx.cardiac_disease(),
        ctx.diabetes(),
    )
}

/// Builds the full instruction for one request.
pub fn build_instruction(ctx: &PatientContext) -> String {
    let mut instruction = task_description();
    instruction.push('\n');
    instruction.push_str(&patient_context_block(ctx));
    instruction
}
