//! Content kind value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What a package combines: decides MIME type and minifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum ContentKind {
    #[serde(alias = "js", alias = "javascript")]
    Script,
    #[serde(alias = "css")]
    Stylesheet,
}

impl ContentKind {
    pub const ALL: [ContentKind; 2] = [ContentKind::Script, ContentKind::Stylesheet];

    /// MIME type served for this kind
    pub fn mime_type(&self) -> &'static str {
        match self {
            ContentKind::Script => "text/javascript",
            ContentKind::Stylesheet => "text/css",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Script => "script",
            ContentKind::Stylesheet => "stylesheet",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "script" | "js" | "javascript" => Ok(ContentKind::Script),
            "stylesheet" | "css" => Ok(ContentKind::Stylesheet),
            other => Err(format!(
                "unknown content kind '{}' (expected 'script' or 'stylesheet')",
                other
            )),
        }
    }
}
