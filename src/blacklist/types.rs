use std::fmt;
use std::str::FromStr;

use super::error::BlacklistError;

const DELIMITERS: [char; 3] = ['[', ']', ','];

/// Identifier of a blacklisted media item.
///
/// Usually a numeric CMS media id, but any token is accepted as long as it
/// does not contain the characters used to delimit entries on disk.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MediaId(String);

impl MediaId {
    /// Validates a raw identifier. Surrounding whitespace is ignored.
    pub fn parse(raw: &str) -> Result<Self, BlacklistError> {
        let id = raw.trim();
        if id.is_empty() || id.contains(DELIMITERS) {
            return Err(BlacklistError::InvalidId(raw.to_string()));
        }
        Ok(Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The numeric form of the id, if it has one.
    pub fn as_numeric(&self) -> Option<i32> {
        self.0.parse().ok()
    }

    /// The on-disk representation, `[<id>],`
    pub fn to_token(&self) -> String {
        format!("[{}],", self.0)
    }
}

impl fmt::Display for MediaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which displays a blacklist entry applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlacklistScope {
    /// Only the reporting display
    #[default]
    Single,
    /// Every display under the same CMS account
    All,
}

impl fmt::Display for BlacklistScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => write!(f, "Single"),
            Self::All => write!(f, "All"),
        }
    }
}

impl FromStr for BlacklistScope {
    type Err = BlacklistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "all" => Ok(Self::All),
            _ => Err(BlacklistError::InvalidScope(s.to_string())),
        }
    }
}

/// A record from a bulk import. Records without an id are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkItem {
    pub id: Option<String>,
}

impl BulkItem {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self {
            id: Some(id.into()),
        }
    }
}
