use std::fmt;

use crate::error::{KeeperError, Result};

pub const FEEDBACK_EXTENSION: &str = "txt";

/// Case-folded feedback title. Two titles that differ only in case map to
/// the same key and therefore the same committed file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeedbackKey(String);

impl FeedbackKey {
    /// Normalizes a raw title. A missing title normalizes to the empty key,
    /// which is rejected along with anything that could escape the
    /// namespace directory.
    pub fn normalize(title: Option<&str>) -> Result<Self> {
        let key = title.unwrap_or_default().to_lowercase();

        if key.trim().is_empty() {
            return Err(KeeperError::InvalidArgument(
                "title must not be empty".to_string(),
            ));
        }
        if key == "." || key == ".." || key.contains(['/', '\\', '\0']) {
            return Err(KeeperError::InvalidArgument(format!(
                "title {key:?} cannot be used as a feedback name"
            )));
        }

        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the committed object in the public namespace.
    pub fn file_name(&self) -> String {
        format!("{}.{FEEDBACK_EXTENSION}", self.0)
    }
}

impl fmt::Display for FeedbackKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackRecord {
    pub key: FeedbackKey,
    pub content: String,
}
