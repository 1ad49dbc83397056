//! Binding grammar
//!
//! A binding is exactly one placeholder, `{{identifier}}`, naming a profile
//! field. Whitespace just inside the braces is tolerated. Nesting, multiple
//! placeholders, surrounding text and expressions are all malformed.

use crate::{BindingError, ProfileField, Result};
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

fn placeholder_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}$").ok())
        .as_ref()
}

/// A parsed, valid binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Binding {
    pub field: ProfileField,
}

impl Binding {
    pub fn new(field: ProfileField) -> Self {
        Self { field }
    }

    /// Parse a binding string strictly
    pub fn parse(raw: &str) -> Result<Binding> {
        let pattern =
            placeholder_pattern().ok_or_else(|| BindingError::Malformed(raw.to_string()))?;
        let identifier = pattern
            .captures(raw.trim())
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .ok_or_else(|| BindingError::Malformed(raw.to_string()))?;

        ProfileField::from_key(identifier)
            .map(Binding::new)
            .ok_or_else(|| BindingError::UnknownField(identifier.to_string()))
    }

    /// The canonical string form, `{{key}}`
    pub fn to_placeholder(&self) -> String {
        format!("{{{{{}}}}}", self.field.key())
    }
}

impl std::fmt::Display for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_placeholder())
    }
}

impl std::str::FromStr for Binding {
    type Err = BindingError;

    fn from_str(s: &str) -> Result<Self> {
        Binding::parse(s)
    }
}
