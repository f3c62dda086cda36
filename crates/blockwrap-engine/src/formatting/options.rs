use serde::{Deserialize, Serialize};

/// Rendering options for the formatter output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// Escape text and attribute values for HTML. Off by default: text is
    /// emitted as the document holds it.
    pub escape_html: bool,
    pub tags: TagNames,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            escape_html: false,
            tags: TagNames::default(),
        }
    }
}

/// Element names rendered for each [`BlockTag`](crate::formatting::BlockTag)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagNames {
    pub heading: String,
    pub paragraph: String,
}

impl Default for TagNames {
    fn default() -> Self {
        Self {
            heading: "h1".to_string(),
            paragraph: "p".to_string(),
        }
    }
}
