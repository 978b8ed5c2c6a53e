//! Constants used throughout the wound-analysis core crate.
//!
//! The closed vocabularies are matched byte-for-byte against the model output, so they must
//! not be reformatted, re-accented or trimmed.

/// Closed vocabulary for `etiologia_probable`.
pub const ETIOLOGY_VOCABULARY: &[&str] = &[
    "Lesión por presión (LPP)",
    "Úlcera venosa (de extremidad inferior)",
    "Úlcera arterial / isquémica",
    "Úlcera de pie diabético (Neuropática/Neuroisquémica)",
    "Herida quirúrgica (Dehiscencia o cierre por segunda intención)",
    "Otro",
];

/// Closed vocabulary for `tejido_predominante`.
pub const TISSUE_VOCABULARY: &[&str] = &[
    "Tejido necrótico",
    "Tejido esfacelado",
    "Tejido de granulación",
    "Tejido de epitelización",
    "Mezcla de tejidos (>50% sin predominio claro)",
];

/// Closed vocabulary for `nivel_exudado`.
pub const EXUDATE_VOCABULARY: &[&str] = &[
    "Seco / No visible",
    "Húmedo óptimo",
    "Mojado / saturado",
    "Fuga de exudado",
];

/// Closed vocabulary for `piel_perilesional`.
pub const PERILESIONAL_SKIN_VOCABULARY: &[&str] = &[
    "Sana / Intacta (Color y textura similar a la piel circundante normal)",
    "Macerada (Color blanquecino, aspecto húmedo y frágil por exceso de exudado)",
    "Eritematosa / Inflamada (Roja, con apariencia caliente o edematosa)",
    "Hiperqueratósica / Callosa (Bordes engrosados, duros y secos)",
];

/// Closed vocabulary for `signos_infeccion`.
pub const INFECTION_SIGNS_VOCABULARY: &[&str] = &[
    "No se observan signos de infección",
    "Inflamación leve (eritema local)",
    "Sospecha de infección local",
    "Signos claros de infección local",
];

/// Closed vocabulary for `aposito_primario`.
pub const PRIMARY_DRESSING_VOCABULARY: &[&str] = &[
    "Ninguno (No aplicar pósito / Dejar al aire)",
    "Hidrogel (Gel o placa)",
    "Hidrocoloide",
    "Espuma de poliuretano (Foam)",
    "Alginato cálcico o Fibra gelificante (Hidrofibra)",
    "Apósito con Plata u otro antimicrobiano (Yodo, DACC, Miel)",
    "Malla de silicona o Tul graso (Interface neutra)",
];

/// Closed vocabulary for `objetivo_aposito`.
pub const DRESSING_OBJECTIVE_VOCABULARY: &[&str] = &[
    "Desbridar / Hidratar (Aportar humedad para ablandar necrosis seca; ej. Hidrogel)",
    "Gestionar exudado / Absorción (Controlar exceso de líquido; ej. Alginatos, Fibras, Espumas)",
    "Controlar carga bacteriana (Sospecha de infección local o biofilm; ej. Plata, DACC, Yodo)",
    "Proteger granulación / Epitelización (Mantener ambiente húmedo óptimo y evitar traumatismos)",
];

/// Fallback written into the prompt when the age is missing.
pub const AGE_FALLBACK: &str = "No especificada";

/// Fallback written into the prompt when the sex is missing.
pub const SEX_FALLBACK: &str = "No especificado";

/// Fallback for the comorbidity flags.
pub const FLAG_FALLBACK: &str = "No";

/// Provenance label written to column J of every log row.
pub const PROVENANCE_LABEL: &str = "Inteligencia Artificial";

/// Format-version tag written to column L of every log row.
pub const PROMPT_VERSION_TAG: &str = "Prompt v1.0";

/// Placeholder stored instead of a Drive link when the image upload fails.
pub const UPLOAD_FAILED_MARKER: &str = "Error al subir imagen";

/// Status reported when the row was appended.
pub const LOG_STATUS_SAVED: &str = "Guardado OK";

/// Status reported when the log backend has no configuration.
pub const LOG_STATUS_NOT_CONFIGURED: &str = "No configurado";

/// Prefix of the status reported when the append failed.
pub const LOG_STATUS_FAILED_PREFIX: &str = "Fallo Excel";

/// Identification-code stand-in used for archive file names.
pub const MISSING_CODE_FILE_STEM: &str = "sin-codigo";

/// Server-local timestamp format of log column A.
pub const LOG_TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Default append range of the log sheet.
pub const DEFAULT_SHEET_RANGE: &str = "Respuestas_IA!A:M";

/// Default Gemini model.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Default OpenAI model.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const DEFAULT_SHEETS_BASE_URL: &str = "https://sheets.googleapis.com";
pub const DEFAULT_DRIVE_UPLOAD_BASE_URL: &str = "https://www.googleapis.com";

/// Default REST bind address.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";

/// Default maximum request body; data-URI photos from phones are several MiB.
pub const DEFAULT_MAX_BODY_BYTES: usize = 20 * 1024 * 1024;
