//! Display names and their normalized lookup keys.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Case-insensitive lookup key for a display name (`trim` + lowercase).
///
/// Two names with equal keys denote the same store, location or item.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NameKey(String);

impl NameKey {
    pub fn new(name: &str) -> Self {
        Self(name.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl core::fmt::Display for NameKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trim a required name, rejecting blank input.
pub fn require_name(field: &str, raw: &str) -> DomainResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(field, "cannot be empty"));
    }
    Ok(trimmed.to_string())
}

/// Trim optional free text; blank text becomes `None`.
pub fn optional_text(raw: Option<String>) -> Option<String> {
    raw.and_then(|s| {
        let trimmed = s.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_ignore_case_and_surrounding_whitespace() {
        assert_eq!(NameKey::new("  Pantry "), NameKey::new("pantry"));
        assert_ne!(NameKey::new("Pantry"), NameKey::new("Pantry 2"));
    }

    #[test]
    fn require_name_trims_and_rejects_blank() {
        assert_eq!(require_name("name", "  Milk ").unwrap(), "Milk");
        assert!(matches!(
            require_name("name", "   "),
            Err(DomainError::Validation { ref field, .. }) if field == "name"
        ));
    }

    #[test]
    fn optional_text_drops_blank_values() {
        assert_eq!(optional_text(Some("  ".into())), None);
        assert_eq!(optional_text(Some(" keep cold ".into())), Some("keep cold".into()));
        assert_eq!(optional_text(None), None);
    }
}
