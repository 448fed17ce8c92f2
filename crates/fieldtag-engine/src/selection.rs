//! Selection-key codec for the UI boundary.
//!
//! Hosts identify selected sampling events as strings of the form
//! `DATE:<location>:<date>` or, for depth-qualified datasets,
//! `DATE:<location>:<date>:<depth>`.

use serde::{Deserialize, Serialize};

const KEY_PREFIX: &str = "DATE:";

/// One selected sampling event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionKey {
    pub location: String,
    pub date: String,
    pub depth: Option<String>,
}

impl SelectionKey {
    pub fn new(location: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            date: date.into(),
            depth: None,
        }
    }

    pub fn with_depth(
        location: impl Into<String>,
        date: impl Into<String>,
        depth: impl Into<String>,
    ) -> Self {
        Self {
            location: location.into(),
            date: date.into(),
            depth: Some(depth.into()),
        }
    }

    pub fn encode(&self) -> String {
        match &self.depth {
            Some(depth) => format!("{KEY_PREFIX}{}:{}:{}", self.location, self.date, depth),
            None => format!("{KEY_PREFIX}{}:{}", self.location, self.date),
        }
    }

    /// Decode a host-supplied key. Malformed strings yield `None`; decoding
    /// never panics.
    pub fn decode(encoded: &str) -> Option<Self> {
        let rest = encoded.strip_prefix(KEY_PREFIX)?;
        let parts: Vec<&str> = rest.split(':').collect();
        match parts.as_slice() {
            [location, date] if !location.is_empty() && !date.is_empty() => {
                Some(Self::new(*location, *date))
            }
            [location, date, depth] if !location.is_empty() && !date.is_empty() => {
                Some(Self::with_depth(*location, *date, *depth))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_plain() {
        let key = SelectionKey::new("MW-1", "2024-01-15");
        assert_eq!(key.encode(), "DATE:MW-1:2024-01-15");
        assert_eq!(SelectionKey::decode(&key.encode()), Some(key));
    }

    #[test]
    fn round_trip_with_depth() {
        let key = SelectionKey::with_depth("SB-A1", "2024-01-15", "6-9");
        assert_eq!(key.encode(), "DATE:SB-A1:2024-01-15:6-9");
        assert_eq!(SelectionKey::decode(&key.encode()), Some(key));
    }

    #[test]
    fn malformed_keys_decode_to_none() {
        assert_eq!(SelectionKey::decode("MW-1:2024-01-15"), None);
        assert_eq!(SelectionKey::decode("DATE:MW-1"), None);
        assert_eq!(SelectionKey::decode("DATE::2024-01-15"), None);
        assert_eq!(SelectionKey::decode("DATE:a:b:c:d"), None);
        assert_eq!(SelectionKey::decode(""), None);
    }
}
