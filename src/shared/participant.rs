//! Participant data structures
//!
//! A participant is a name currently present in the room together with the
//! last time the server heard from it.

use serde::{Deserialize, Serialize};

/// A participant present in the room
///
/// `last_status` is a Unix timestamp in milliseconds and is serialized as
/// `lastStatus`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub name: String,
    pub last_status: i64,
}

impl Participant {
    pub fn new(name: impl Into<String>, last_status: i64) -> Self {
        Self {
            name: name.into(),
            last_status,
        }
    }

    /// Whether this participant was last seen strictly before `cutoff`
    pub fn is_stale(&self, cutoff: i64) -> bool {
        self.last_status < cutoff
    }
}

/// Body of `POST /participants`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JoinRequest {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participant_serializes_camel_case() {
        let participant = Participant::new("Ana", 1_700_000_000_000);
        let json = serde_json::to_value(&participant).unwrap();
        assert_eq!(json["name"], "Ana");
        assert_eq!(json["lastStatus"], 1_700_000_000_000_i64);
    }

    #[test]
    fn test_is_stale_is_strict() {
        let participant = Participant::new("Ana", 1_000);
        assert!(participant.is_stale(1_001));
        assert!(!participant.is_stale(1_000));
        assert!(!participant.is_stale(999));
    }
}
