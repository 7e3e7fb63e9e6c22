//! Typed records for the two supported OpenAPI schema versions.

use serde::{Deserialize, Serialize};

/// A Swagger 2.0 description.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentV2 {
    /// Specification version string, normally `2.0`.
    pub swagger: String,
    /// API metadata.
    pub info: Info,
    /// Host serving the API, without scheme.
    pub host: String,
    /// Path prefix shared by every operation.
    pub base_path: String,
    /// Transfer protocols, e.g. `https`.
    pub schemes: Vec<String>,
    /// Paths and their operations.
    pub paths: Vec<PathItem>,
}

/// An OpenAPI 3 description.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentV3 {
    /// Specification version string, e.g. `3.0.3`.
    pub openapi: String,
    /// API metadata.
    pub info: Info,
    /// Servers hosting the API.
    pub servers: Vec<Server>,
    /// Tags used to group operations.
    pub tags: Vec<Tag>,
    /// Optional pointer to external documentation.
    pub external_docs: Option<ExternalDocs>,
    /// Paths and their operations.
    pub paths: Vec<PathItem>,
}

/// API metadata shared by both versions.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Info {
    /// API title.
    pub title: String,
    /// API version, unrelated to the schema version.
    pub version: String,
    /// Free-form description.
    pub description: String,
}

/// A path template and the operations it supports.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PathItem {
    /// Path template, e.g. `/pets/{id}`.
    pub path: String,
    /// Operations in declaration order.
    pub operations: Vec<Operation>,
}

/// A single HTTP operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Operation {
    /// Lower-case HTTP method.
    pub method: String,
    /// Unique operation identifier, possibly empty.
    pub operation_id: String,
    /// Short summary.
    pub summary: String,
}

/// An OpenAPI 3 server entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Server {
    /// Server URL.
    pub url: String,
    /// Description of the server.
    pub description: String,
}

/// An OpenAPI 3 tag.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    /// Tag name.
    pub name: String,
    /// Tag description.
    pub description: String,
}

/// Link to documentation hosted elsewhere.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExternalDocs {
    /// Target URL.
    pub url: String,
    /// Description of the target.
    pub description: String,
}
