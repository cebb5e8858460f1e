use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identity correlating a display session with caller-tracked media.
///
/// Set once per show call and never mutated mid-session. Callers that
/// track their own media ids can wrap them via [`MediaItemId::from_string`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MediaItemId(String);

impl MediaItemId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for MediaItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MediaItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_id_is_valid_uuid() {
        let id = MediaItemId::new();
        let parsed = uuid::Uuid::parse_str(id.as_str());
        assert!(parsed.is_ok());
        assert_eq!(parsed.unwrap().get_version_num(), 4);
    }

    #[test]
    fn new_ids_are_unique() {
        assert_ne!(MediaItemId::new(), MediaItemId::new());
    }

    #[test]
    fn from_string_round_trips() {
        let id = MediaItemId::from_string("song-42");
        assert_eq!(id.as_str(), "song-42");
        assert_eq!(id.to_string(), "song-42");
    }

    #[test]
    fn id_equality_and_hash() {
        use std::collections::HashSet;
        let a = MediaItemId::from_string("x");
        let b = a.clone();
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        set.insert(b);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn id_serialization() {
        let id = MediaItemId::new();
        let json = serde_json::to_string(&id).unwrap();
        let back: MediaItemId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
