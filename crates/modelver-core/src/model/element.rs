//! Canonical element token

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// One structured fact of a model, in canonical text form
///
/// Elements are produced by the grammar layer, which guarantees that two
/// spellings of the same fact compare equal. Constructing an `Element`
/// directly performs no validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Element(String);

impl Element {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Element {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Element {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Element {
    fn from(value: String) -> Self {
        Self(value)
    }
}
