use serde::{Deserialize, Serialize};

/// Difficulty picked by the host. Only informational, the server never checks it against the
/// secret word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Easy,
    Medium,
    Hard,
}
