use std::{fmt::Display, sync::Arc};

/// Case-insensitive room identifier, always stored uppercase.
///
/// Creation and lookup both go through [`RoomCode::parse`], so a code created as `APPLE` is
/// found when a player types `apple `.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomCode {
    value: Arc<str>,
}

impl RoomCode {
    const DERIVED_LENGTH: usize = 5;

    pub fn parse(raw: &str) -> Option<Self> {
        let value = raw.trim().to_uppercase();
        if value.is_empty() {
            None
        } else {
            Some(Self {
                value: value.into(),
            })
        }
    }

    /// The first characters of the secret word, uppercased.
    pub fn derive_from_word(word: &str) -> Option<Self> {
        let prefix: String = word.trim().chars().take(RoomCode::DERIVED_LENGTH).collect();
        RoomCode::parse(&prefix)
    }

    /// Uses the code supplied by the host when there is one, otherwise derives it from the word.
    pub fn for_new_room(supplied: Option<&str>, word: &str) -> Option<Self> {
        supplied
            .and_then(RoomCode::parse)
            .or_else(|| RoomCode::derive_from_word(word))
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl Display for RoomCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", &self.value)
    }
}
