use itertools::Itertools;
use std::fmt::{Display, Formatter};

const STATUS_KEY_PREFIX: &str = "power-outage:last-status";

/// The monitored place, trimmed and lowercased so every comparison against it
/// is case-insensitive.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct PlaceName(String);

impl PlaceName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn status_key(&self) -> StatusKey {
        StatusKey(format!(
            "{STATUS_KEY_PREFIX}:{}",
            self.0.split_whitespace().join("-")
        ))
    }
}

impl TryFrom<String> for PlaceName {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let value = value.trim();
        if value.is_empty() {
            return Err("place cannot be empty".to_string());
        }
        Ok(PlaceName(value.to_lowercase()))
    }
}

impl TryFrom<&str> for PlaceName {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        PlaceName::try_from(value.to_string())
    }
}

impl Display for PlaceName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key of the single persisted status of a place.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct StatusKey(String);

impl AsRef<str> for StatusKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for StatusKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
