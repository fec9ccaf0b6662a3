//! `CodeEntity`: the program entity the diff vocabulary is usually run over.
//!
//! The model layer hands entity sequences over as JSON arrays, e.g.
//! `[{"kind": "declaration", "name": "x"}]`.

use std::fmt;

use graft_kernel::carrier::entity::{write_str_identity, Entity};
use serde::{Deserialize, Serialize};

use crate::error::DiffError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Declaration,
    Invocation,
    Assignment,
    Control,
}

impl EntityKind {
    /// Identity tag byte. Stable across versions.
    const fn tag(self) -> u8 {
        match self {
            Self::Declaration => 1,
            Self::Invocation => 2,
            Self::Assignment => 3,
            Self::Control => 4,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Declaration => "declaration",
            Self::Invocation => "invocation",
            Self::Assignment => "assignment",
            Self::Control => "control",
        }
    }
}

/// One structural element of a program body.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CodeEntity {
    pub kind: EntityKind,
    pub name: String,
}

impl CodeEntity {
    pub fn new(kind: EntityKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    pub fn declaration(name: impl Into<String>) -> Self {
        Self::new(EntityKind::Declaration, name)
    }

    pub fn invocation(name: impl Into<String>) -> Self {
        Self::new(EntityKind::Invocation, name)
    }

    pub fn assignment(name: impl Into<String>) -> Self {
        Self::new(EntityKind::Assignment, name)
    }

    pub fn control(name: impl Into<String>) -> Self {
        Self::new(EntityKind::Control, name)
    }
}

impl fmt::Display for CodeEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.as_str(), self.name)
    }
}

impl Entity for CodeEntity {
    fn write_identity(&self, buf: &mut Vec<u8>) {
        buf.push(self.kind.tag());
        write_str_identity(buf, &self.name);
    }

    fn label(&self) -> String {
        self.to_string()
    }
}

/// Parse an entity sequence from its JSON interchange form.
///
/// # Errors
///
/// Returns [`DiffError::InvalidInput`] on malformed JSON or unknown kinds.
pub fn parse_entities(bytes: &[u8]) -> Result<Vec<CodeEntity>, DiffError> {
    serde_json::from_slice(bytes).map_err(|e| DiffError::InvalidInput {
        detail: format!("entity sequence: {e}"),
    })
}
