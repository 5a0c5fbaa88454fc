use serde::{Deserialize, Serialize};

use crate::errors::StorageError;

/// Personal identifier used to prefix every stored key for a user.
/// Guaranteed non-empty by construction.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonalNumber(String);

impl PersonalNumber {
    pub fn new(raw: impl Into<String>) -> Result<Self, StorageError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(StorageError::Validation("personal number must be non-empty".into()));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl std::fmt::Display for PersonalNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// User identity scoping stored values.
///
/// The empty identifier is a first-class `Anonymous` state rather than a
/// sentinel string; nothing may be read or written on behalf of an anonymous
/// user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Identity {
    Anonymous,
    Known(PersonalNumber),
}

impl Identity {
    /// Map a raw identifier to an identity; the empty string means anonymous.
    pub fn from_personal_number(raw: &str) -> Self {
        match PersonalNumber::new(raw) {
            Ok(pn) => Self::Known(pn),
            Err(_) => Self::Anonymous,
        }
    }

    pub fn is_known(&self) -> bool { matches!(self, Self::Known(_)) }

    /// Derive the store key for `key`: `"{personalNumber}_{key}"`.
    ///
    /// `None` for anonymous identities. Entries written under a previous
    /// identity's prefix are never migrated; they stay where they are.
    pub fn scoped_key(&self, key: &str) -> Option<String> {
        match self {
            Self::Anonymous => None,
            Self::Known(pn) => Some(format!("{}_{}", pn.as_str(), key)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_personal_number_is_rejected() {
        assert!(PersonalNumber::new("").is_err());
        assert!(PersonalNumber::new("   ").is_err());
    }

    #[test]
    fn empty_identifier_maps_to_anonymous() {
        assert_eq!(Identity::from_personal_number(""), Identity::Anonymous);
        assert!(Identity::from_personal_number("201701012393").is_known());
    }

    #[test]
    fn scoped_key_uses_prefix() {
        let id = Identity::from_personal_number("201701012393");
        assert_eq!(id.scoped_key("key").as_deref(), Some("201701012393_key"));
        assert_eq!(Identity::Anonymous.scoped_key("key"), None);
    }
}
