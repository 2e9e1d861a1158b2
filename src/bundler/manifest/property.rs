//! Template properties.

use super::Version;
use crate::bundler::{
    Result,
    builder::calculate_sha256,
    error::Error,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// `Id=Value` pair substituted into templates.
///
/// Duplicate ids are allowed; lookups by id take the last one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub id: String,
    pub value: PropertyValue,
}

impl Property {
    /// Parses a command line definition of the form `Id=Value`.
    ///
    /// Everything after the first `=` is the value, so values may contain `=`.
    pub fn parse(definition: &str) -> Result<Self> {
        match definition.split_once('=') {
            Some((id, value)) if !id.is_empty() => Ok(Self {
                id: id.to_string(),
                value: PropertyValue::Plain(value.to_string()),
            }),
            _ => Err(Error::Validation(
                "property definition must be of the form Id=Value".into(),
            )),
        }
    }
}

/// What a property evaluates to at render time.
///
/// Serialized untagged: a bare string is [`PropertyValue::Plain`],
/// `{"sha256-of": "path"}` is a checksum and `{"computed": "msi"}` a derived
/// version field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Plain(String),
    Checksum {
        #[serde(rename = "sha256-of")]
        sha256_of: String,
    },
    Computed {
        computed: VersionField,
    },
}

/// Version field a computed property reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionField {
    User,
    Display,
    Msi,
    Hex,
}

impl PropertyValue {
    /// Evaluates the value against a normalized version block.
    ///
    /// Checksum paths are read relative to the current directory.
    pub async fn resolve(&self, version: &Version) -> Result<String> {
        match self {
            Self::Plain(value) => Ok(value.clone()),
            Self::Checksum { sha256_of } => calculate_sha256(Path::new(sha256_of)).await,
            Self::Computed { computed } => Ok(match computed {
                VersionField::User => version.user.clone(),
                VersionField::Display => version.display.clone(),
                VersionField::Msi => version.msi.clone(),
                VersionField::Hex => format!("0x{:08X}", version.hex),
            }),
        }
    }
}
