//! Configuration warning value object.

use std::fmt;
use std::path::PathBuf;

/// Unknown key found while loading `respack.toml`; loading still succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// Last segment of the unknown key path, e.g. `etga` for `cache.etga`
    pub key: String,
    pub file: PathBuf,
    /// 1-indexed line of the first occurrence
    pub line: Option<usize>,
    /// Closest known key, when one is near enough
    pub suggestion: Option<String>,
}

impl ConfigWarning {
    /// `file:line`, or just the file when the line is unknown
    pub fn location(&self) -> String {
        match self.line {
            Some(line) => format!("{}:{}", self.file.display(), line),
            None => self.file.display().to_string(),
        }
    }
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown config key '{}' at {}", self.key, self.location())?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}
