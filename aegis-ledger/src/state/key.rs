use std::fmt;

use aegis_common::error::{AegisError, Result};

/// Reserved delimiter between key parts. U+0000 sorts below every other
/// scalar value, which keeps rendered keys prefix-free and makes their
/// lexicographic order stable across entity kinds.
const DELIMITER: char = '\u{0}';

/// Entity kinds sharing the ledger namespace.
pub mod kinds {
    pub const INSTITUTION: &str = "Institution";
    pub const INSTITUTION_EMAIL: &str = "InstitutionEmail";
    pub const DEGREE: &str = "Degree";
    pub const VERIFICATION: &str = "Verification";
    pub const REVOCATION: &str = "Revocation";
    pub const BLACKLISTING: &str = "Blacklisting";
    pub const HASH: &str = "Hash";
}

/// A namespaced ledger key derived from an entity kind plus one or more
/// identifying attributes.
///
/// Rendering is a pure function of the parts: no two distinct
/// `(kind, attributes)` tuples render to the same byte string, and rendered
/// keys order lexicographically by kind, then attribute by attribute.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CompositeKey {
    kind: String,
    attributes: Vec<String>,
}

impl CompositeKey {
    pub fn new(kind: &str, attributes: &[&str]) -> Result<Self> {
        Self::check_part("kind", kind)?;
        if attributes.is_empty() {
            return Err(AegisError::InvalidKey(format!(
                "kind '{}' has no attributes",
                kind
            )));
        }
        for attribute in attributes {
            Self::check_part("attribute", attribute)?;
        }

        Ok(Self {
            kind: kind.to_string(),
            attributes: attributes.iter().map(|a| a.to_string()).collect(),
        })
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    /// Renders the single byte-string key this entity lives under.
    pub fn render(&self) -> String {
        let mut rendered = String::new();
        rendered.push(DELIMITER);
        rendered.push_str(&self.kind);
        for attribute in &self.attributes {
            rendered.push(DELIMITER);
            rendered.push_str(attribute);
        }
        rendered.push(DELIMITER);
        rendered
    }

    fn check_part(what: &str, part: &str) -> Result<()> {
        if part.is_empty() {
            return Err(AegisError::InvalidKey(format!("empty {}", what)));
        }
        if part.contains(DELIMITER) {
            return Err(AegisError::InvalidKey(format!(
                "{} contains reserved delimiter",
                what
            )));
        }
        Ok(())
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind, self.attributes.join(", "))
    }
}
