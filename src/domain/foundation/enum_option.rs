//! Read-side rendering of code enums.

use serde::Serialize;

/// A coded option as exposed to API consumers: numeric id, machine code, and
/// human-readable description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumOption {
    pub id: i64,
    pub code: String,
    pub description: String,
}

impl EnumOption {
    pub fn new(id: i64, code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            code: code.into(),
            description: description.into(),
        }
    }
}
