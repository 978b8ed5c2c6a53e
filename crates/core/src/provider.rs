//! Selection of the external multimodal classification backend.

/// One of the two interchangeable classification providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Gemini,
    ChatGpt,
}

impl Provider {
    /// Resolves the `modelId` request tag.
    ///
    /// Only `gemini` selects Gemini; every other value, including a missing tag, selects
    /// ChatGPT.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag.map(str::trim) {
            Some("gemini") => Provider::Gemini,
            _ => Provider::ChatGpt,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Provider::Gemini => "gemini",
            Provider::ChatGpt => "chatgpt",
        }
    }

    /// Name written to the provider column of the log.
    pub fn display_name(self) -> &'static str {
        match self {
            Provider::Gemini => "Gemini",
            Provider::ChatGpt => "ChatGPT",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
