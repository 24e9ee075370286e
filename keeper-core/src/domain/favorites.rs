use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{KeeperError, Result};

pub const INVALID_KIND_MESSAGE: &str =
    r#""type" should be "movie" or "character"!"#;
pub const EMPTY_NAME_MESSAGE: &str = r#""name" must not be empty!"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FavoriteKind {
    Movie,
    Character,
}

impl FavoriteKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FavoriteKind::Movie => "movie",
            FavoriteKind::Character => "character",
        }
    }
}

impl fmt::Display for FavoriteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FavoriteKind {
    type Err = KeeperError;

    fn from_str(raw: &str) -> Result<Self> {
        match raw {
            "movie" => Ok(FavoriteKind::Movie),
            "character" => Ok(FavoriteKind::Character),
            _ => Err(KeeperError::InvalidArgument(
                INVALID_KIND_MESSAGE.to_string(),
            )),
        }
    }
}

/// A favorite as stored. `name` is the identity key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FavoriteKind,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

/// A validated favorite that has not been committed yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFavorite {
    pub name: String,
    pub kind: FavoriteKind,
    pub url: String,
}

impl NewFavorite {
    /// Validates raw request fields. The kind is checked first so a bad
    /// `type` is reported even when the name is also missing.
    pub fn parse(name: &str, kind: &str, url: &str) -> Result<Self> {
        let kind = kind.parse::<FavoriteKind>()?;
        if name.trim().is_empty() {
            return Err(KeeperError::InvalidArgument(
                EMPTY_NAME_MESSAGE.to_string(),
            ));
        }

        Ok(Self {
            name: name.to_string(),
            kind,
            url: url.to_string(),
        })
    }

    pub fn into_record(
        self,
        id: Uuid,
        created_at: DateTime<Utc>,
    ) -> FavoriteRecord {
        FavoriteRecord {
            id,
            name: self.name,
            kind: self.kind,
            url: self.url,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_kind_reports_exact_message() {
        let err = NewFavorite::parse("Luke", "alien", "x").unwrap_err();
        assert_eq!(err.to_string(), INVALID_KIND_MESSAGE);
    }

    #[test]
    fn kind_is_checked_before_name() {
        let err = NewFavorite::parse("", "alien", "x").unwrap_err();
        assert_eq!(err.to_string(), INVALID_KIND_MESSAGE);
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = NewFavorite::parse("  ", "movie", "x").unwrap_err();
        assert!(matches!(err, KeeperError::InvalidArgument(_)));
    }

    #[test]
    fn record_serializes_kind_as_type() {
        let record = NewFavorite::parse("Luke", "character", "x")
            .unwrap()
            .into_record(Uuid::nil(), Utc::now());
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["type"], "character");
        assert_eq!(value["name"], "Luke");
    }
}
