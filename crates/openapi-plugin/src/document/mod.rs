//! Version dispatch for encoded OpenAPI documents.
//!
//! A plugin receives its document either with an explicit version tag (from
//! the host's request) or as bare bytes read from a file. [`decode_tagged`]
//! handles the first case and never falls back to another schema.
//! [`decode_untagged`] handles the second by trying both schemas.

pub mod model;

use strum::{Display, EnumString};
use tracing::debug;

use crate::error::PluginError;
use crate::protocol::codec::{self, CodecError};

pub use self::model::{DocumentV2, DocumentV3, ExternalDocs, Info, Operation, PathItem, Server, Tag};

/// Schema versions understood by the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display)]
pub enum DocumentVersion {
    /// Swagger 2.0.
    #[strum(serialize = "v2")]
    V2,
    /// OpenAPI 3.
    #[strum(serialize = "v3")]
    V3,
}

/// A decoded document tagged with the schema that parsed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Document {
    /// Parsed as Swagger 2.0.
    V2(DocumentV2),
    /// Parsed as OpenAPI 3.
    V3(DocumentV3),
}

impl Document {
    /// Returns the schema version that produced this document.
    #[must_use]
    pub const fn version(&self) -> DocumentVersion {
        match self {
            Self::V2(_) => DocumentVersion::V2,
            Self::V3(_) => DocumentVersion::V3,
        }
    }

    /// Returns the API metadata.
    #[must_use]
    pub const fn info(&self) -> &Info {
        match self {
            Self::V2(document) => &document.info,
            Self::V3(document) => &document.info,
        }
    }

    /// Returns the paths in declaration order.
    #[must_use]
    pub fn paths(&self) -> &[PathItem] {
        match self {
            Self::V2(document) => &document.paths,
            Self::V3(document) => &document.paths,
        }
    }
}

/// Decodes bytes strictly as the declared schema version.
///
/// # Errors
///
/// Returns [`PluginError::UnsupportedVersion`] when `version` is neither `v2`
/// nor `v3`, and [`PluginError::MalformedMessage`] when the bytes do not
/// decode as that version.
pub fn decode_tagged(version: &str, bytes: &[u8]) -> Result<Document, PluginError> {
    let parsed: DocumentVersion = version.parse().map_err(|_| PluginError::UnsupportedVersion {
        version: version.to_owned(),
    })?;

    decode_version(parsed, bytes).map_err(|error| PluginError::MalformedMessage {
        subject: format!("{parsed} document"),
        message: error.to_string(),
    })
}

/// Decodes bytes of unknown version.
///
/// Tries v2 first and then v3; when both succeed the v3 reading is kept.
/// Returns `None` if neither schema accepts the bytes.
#[must_use]
pub fn decode_untagged(bytes: &[u8]) -> Option<Document> {
    let mut document = None;

    match decode_version(DocumentVersion::V2, bytes) {
        Ok(parsed) => document = Some(parsed),
        Err(error) => debug!(%error, "input does not decode as a v2 document"),
    }

    // Not an `else`: a buffer that is valid under both schemas ends up as v3.
    // Existing callers depend on this precedence.
    match decode_version(DocumentVersion::V3, bytes) {
        Ok(parsed) => document = Some(parsed),
        Err(error) => debug!(%error, "input does not decode as a v3 document"),
    }

    document
}

fn decode_version(version: DocumentVersion, bytes: &[u8]) -> Result<Document, CodecError> {
    match version {
        DocumentVersion::V2 => codec::decode(bytes).map(Document::V2),
        DocumentVersion::V3 => codec::decode(bytes).map(Document::V3),
    }
}
