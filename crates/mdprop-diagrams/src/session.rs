//! Session identifiers scoping one conversion run.

use std::fmt;

use rand::RngExt;
use serde::{Deserialize, Serialize};

/// Length of a session token in hex characters.
const TOKEN_LEN: usize = 6;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// A short random token tying one conversion run's markers to one cache
/// directory.
///
/// Two concurrent invocations on the same document generate distinct
/// sessions and therefore non-colliding marker sets and cache paths.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh random session id (6 lowercase hex characters).
    #[must_use]
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let token = (0..TOKEN_LEN)
            .map(|_| HEX_DIGITS[rng.random_range(0..HEX_DIGITS.len())] as char)
            .collect();
        Self(token)
    }

    /// Parse a session id, accepting exactly 6 lowercase hex characters.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let valid = s.len() == TOKEN_LEN
            && s.bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        valid.then(|| Self(s.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for SessionId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("invalid session id '{value}'"))
    }
}

impl From<SessionId> for String {
    fn from(id: SessionId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_shape() {
        let id = SessionId::generate();
        assert_eq!(id.as_str().len(), 6);
        assert!(
            id.as_str()
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
        );
    }

    #[test]
    fn test_generate_round_trips_through_parse() {
        let id = SessionId::generate();
        assert_eq!(SessionId::parse(id.as_str()), Some(id));
    }

    #[test]
    fn test_parse_rejects_bad_tokens() {
        assert!(SessionId::parse("a1b2c3").is_some());
        assert!(SessionId::parse("A1B2C3").is_none());
        assert!(SessionId::parse("a1b2c").is_none());
        assert!(SessionId::parse("a1b2c3d").is_none());
        assert!(SessionId::parse("a1b2cg").is_none());
        assert!(SessionId::parse("").is_none());
    }

    #[test]
    fn test_serde_round_trip() {
        let id = SessionId::parse("0faced").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"0faced\"");
        let back: SessionId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_serde_rejects_invalid() {
        let result = serde_json::from_str::<SessionId>("\"not-hex\"");
        assert!(result.is_err());
    }
}
