//! Validated value types shared across the wound-analysis crates.
//!
//! - [`NonEmptyText`] for configuration values and free text that must carry content.
//! - [`DataUri`] for images transported inline as `data:<mime>;base64,<payload>`.

use base64::{engine::general_purpose, Engine as _};

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
}

/// A string type that guarantees non-empty content.
///
/// This type wraps a `String` and ensures it contains at least one non-whitespace character.
/// The input is automatically trimmed of leading and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// Returns `Err(TextError::Empty)` if the trimmed input is empty.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Converts an optional raw value, treating `None` and blank strings alike.
    pub fn from_optional(input: Option<impl AsRef<str>>) -> Option<Self> {
        input.and_then(|v| Self::new(v).ok())
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Errors raised while parsing an inline image.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DataUriError {
    #[error("missing 'data:' scheme")]
    MissingScheme,
    #[error("missing ',' separating header and payload")]
    MissingPayload,
    #[error("only base64-encoded payloads are supported")]
    NotBase64,
    #[error("unsupported media type '{0}' (expected image/*)")]
    NotAnImage(String),
    #[error("payload is empty")]
    EmptyPayload,
    #[error("payload is not valid base64: {0}")]
    InvalidBase64(String),
}

/// An image carried inline as a base64 data URI.
///
/// The original URI is kept verbatim because some providers accept it as-is, while others
/// want the MIME type and the bare base64 payload separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    uri: String,
    mime_type: String,
    payload_start: usize,
}

impl DataUri {
    /// Parses `data:image/<subtype>;base64,<payload>`.
    ///
    /// The payload is decoded once to reject corrupt input before anything leaves the process.
    pub fn parse(input: impl Into<String>) -> Result<Self, DataUriError> {
        let uri: String = input.into();
        let rest = uri.strip_prefix("data:").ok_or(DataUriError::MissingScheme)?;
        let comma = rest.find(',').ok_or(DataUriError::MissingPayload)?;
        let header = &rest[..comma];

        let mut params = header.split(';');
        let mime_type = params.next().unwrap_or_default().trim().to_ascii_lowercase();
        if !params.any(|p| p.trim().eq_ignore_ascii_case("base64")) {
            return Err(DataUriError::NotBase64);
        }
        if !mime_type.starts_with("image/") || mime_type.len() == "image/".len() {
            return Err(DataUriError::NotAnImage(mime_type));
        }

        let payload_start = "data:".len() + comma + 1;
        let payload = &uri[payload_start..];
        if payload.trim().is_empty() {
            return Err(DataUriError::EmptyPayload);
        }
        general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| DataUriError::InvalidBase64(e.to_string()))?;

        Ok(Self {
            uri,
            mime_type,
            payload_start,
        })
    }

    /// The full URI, unchanged.
    pub fn as_str(&self) -> &str {
        &self.uri
    }

    /// Lower-cased MIME type, e.g. `image/jpeg`.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// The base64 payload without the `data:` header.
    pub fn base64_data(&self) -> &str {
        &self.uri[self.payload_start..]
    }

    /// Decoded image bytes.
    pub fn decode(&self) -> Result<Vec<u8>, DataUriError> {
        general_purpose::STANDARD
            .decode(self.base64_data())
            .map_err(|e| DataUriError::InvalidBase64(e.to_string()))
    }

    /// File extension matching the MIME subtype.
    pub fn extension(&self) -> &str {
        match self.mime_type.as_str() {
            "image/jpeg" | "image/jpg" | "image/pjpeg" => "jpg",
            "image/svg+xml" => "svg",
            other => other.trim_start_matches("image/"),
        }
    }
}

impl std::fmt::Display for DataUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Payloads run to megabytes; never print them.
        write!(
            f,
            "data:{};base64,<{} bytes>",
            self.mime_type,
            self.base64_data().len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // "hola" in base64
    const JPEG_URI: &str = "data:image/jpeg;base64,aG9sYQ==";

    #[test]
    fn test_non_empty_text_trims_input() {
        let text = NonEmptyText::new("  SUBJ-001 ").unwrap();
        assert_eq!(text.as_str(), "SUBJ-001");
    }

    #[test]
    fn test_non_empty_text_rejects_whitespace() {
        assert!(matches!(NonEmptyText::new("   "), Err(TextError::Empty)));
    }

    #[test]
    fn test_non_empty_text_from_optional_treats_blank_as_absent() {
        assert!(NonEmptyText::from_optional(None::<String>).is_none());
        assert!(NonEmptyText::from_optional(Some("")).is_none());
        assert_eq!(
            NonEmptyText::from_optional(Some("sheet-id")).map(NonEmptyText::into_inner),
            Some("sheet-id".to_string())
        );
    }

    #[test]
    fn test_data_uri_parses_jpeg() {
        let uri = DataUri::parse(JPEG_URI).unwrap();
        assert_eq!(uri.mime_type(), "image/jpeg");
        assert_eq!(uri.base64_data(), "aG9sYQ==");
        assert_eq!(uri.as_str(), JPEG_URI);
        assert_eq!(uri.decode().unwrap(), b"hola");
        assert_eq!(uri.extension(), "jpg");
    }

    #[test]
    fn test_data_uri_extension_follows_subtype() {
        let uri = DataUri::parse("data:image/png;base64,aG9sYQ==").unwrap();
        assert_eq!(uri.extension(), "png");
    }

    #[test]
    fn test_data_uri_rejects_missing_scheme() {
        assert_eq!(
            DataUri::parse("aG9sYQ==").unwrap_err(),
            DataUriError::MissingScheme
        );
    }

    #[test]
    fn test_data_uri_rejects_non_base64_encoding() {
        assert_eq!(
            DataUri::parse("data:image/png,raw").unwrap_err(),
            DataUriError::NotBase64
        );
    }

    #[test]
    fn test_data_uri_rejects_non_image() {
        assert!(matches!(
            DataUri::parse("data:text/plain;base64,aG9sYQ==").unwrap_err(),
            DataUriError::NotAnImage(m) if m == "text/plain"
        ));
    }

    #[test]
    fn test_data_uri_rejects_empty_and_corrupt_payloads() {
        assert_eq!(
            DataUri::parse("data:image/jpeg;base64,").unwrap_err(),
            DataUriError::EmptyPayload
        );
        assert!(matches!(
            DataUri::parse("data:image/jpeg;base64,@@@").unwrap_err(),
            DataUriError::InvalidBase64(_)
        ));
    }

    #[test]
    fn test_data_uri_display_hides_payload() {
        let uri = DataUri::parse(JPEG_URI).unwrap();
        assert_eq!(uri.to_string(), "data:image/jpeg;base64,<8 bytes>");
    }
}
