//! Reference OpenAPI plugin that summarises its input document.
//!
//! The plugin writes one file per run, named after the document's stem:
//! `<stem>.summary.txt` by default, or `<stem>.summary.json` when the host
//! passes the parameter `format=json`.

#[cfg(test)]
mod tests;

use camino::Utf8Path;
use openapi_plugin::document::{Document, DocumentV2, DocumentV3};
use openapi_plugin::{Environment, ResponseFile};
use serde::Serialize;
use strum::{Display, EnumString};
use thiserror::Error;
use tracing::debug;

/// Parameter that selects the summary format.
pub const FORMAT_PARAMETER: &str = "format";

const FALLBACK_STEM: &str = "openapi";

/// Output format of the summary file.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum SummaryFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

impl SummaryFormat {
    const fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Json => "json",
        }
    }
}

/// Errors raised while summarising a document.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// Neither schema accepted the input bytes.
    #[error("no OpenAPI document could be decoded from {name}")]
    MissingDocument {
        /// Name of the input document.
        name: String,
    },
    /// The `format` parameter named an unknown format.
    #[error("unsupported summary format '{value}' (expected text or json)")]
    UnknownFormat {
        /// The rejected parameter value.
        value: String,
    },
    /// JSON serialisation failed.
    #[error("failed to serialise summary: {source}")]
    Json {
        /// Underlying serialisation error.
        #[source]
        source: serde_json::Error,
    },
}

/// A single operation line in the summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationSummary {
    /// Upper-case HTTP method.
    pub method: String,
    /// Path template.
    pub path: String,
    /// Operation identifier, empty when the document omits it.
    pub operation_id: String,
}

impl OperationSummary {
    fn line(&self) -> String {
        if self.operation_id.is_empty() {
            format!("  {} {}", self.method, self.path)
        } else {
            format!("  {} {} ({})", self.method, self.path, self.operation_id)
        }
    }
}

/// Condensed view of an OpenAPI document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Schema family, `v2` or `v3`.
    pub schema: String,
    /// Version string declared inside the document.
    pub declared_version: String,
    /// API title.
    pub title: String,
    /// API version.
    pub api_version: String,
    /// Base URLs the API is served from.
    pub servers: Vec<String>,
    /// Operations in declaration order.
    pub operations: Vec<OperationSummary>,
}

impl Summary {
    /// Builds a summary of `document`.
    #[must_use]
    pub fn of(document: &Document) -> Self {
        let (declared_version, servers) = match document {
            Document::V2(v2) => (v2.swagger.clone(), v2_servers(v2)),
            Document::V3(v3) => (v3.openapi.clone(), v3_servers(v3)),
        };
        let info = document.info();
        let operations = document
            .paths()
            .iter()
            .flat_map(|item| {
                item.operations.iter().map(|operation| OperationSummary {
                    method: operation.method.to_ascii_uppercase(),
                    path: item.path.clone(),
                    operation_id: operation.operation_id.clone(),
                })
            })
            .collect();

        Self {
            schema: document.version().to_string(),
            declared_version,
            title: info.title.clone(),
            api_version: info.version.clone(),
            servers,
            operations,
        }
    }

    /// Renders the summary as plain text.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut lines = vec![
            format!("OpenAPI {} ({})", self.schema, self.declared_version),
            format!("Title: {}", self.title),
            format!("API version: {}", self.api_version),
            String::from("Servers:"),
        ];
        lines.extend(self.servers.iter().map(|server| format!("  {server}")));
        lines.push(String::from("Operations:"));
        lines.extend(self.operations.iter().map(OperationSummary::line));

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }

    /// Renders the summary as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::Json`] if serialisation fails.
    pub fn render_json(&self) -> Result<Vec<u8>, SummaryError> {
        serde_json::to_vec_pretty(self).map_err(|source| SummaryError::Json { source })
    }
}

fn v2_servers(document: &DocumentV2) -> Vec<String> {
    if document.host.is_empty() {
        return Vec::new();
    }
    let base = format!("{}{}", document.host, document.base_path);
    if document.schemes.is_empty() {
        return vec![base];
    }
    document
        .schemes
        .iter()
        .map(|scheme| format!("{scheme}://{base}"))
        .collect()
}

fn v3_servers(document: &DocumentV3) -> Vec<String> {
    document
        .servers
        .iter()
        .map(|server| server.url.clone())
        .collect()
}

/// Returns the file stem used to name outputs for `document_name`.
#[must_use]
pub fn output_stem(document_name: &str) -> &str {
    Utf8Path::new(document_name)
        .file_stem()
        .filter(|stem| !stem.is_empty())
        .unwrap_or(FALLBACK_STEM)
}

fn parse_format(value: &str) -> Result<SummaryFormat, SummaryError> {
    value.parse().map_err(|_| SummaryError::UnknownFormat {
        value: value.to_owned(),
    })
}

/// Produces the summary file for a ready environment.
///
/// # Errors
///
/// Returns [`SummaryError::MissingDocument`] when no document was decoded,
/// [`SummaryError::UnknownFormat`] for an unrecognised `format` parameter,
/// and [`SummaryError::Json`] if JSON output cannot be produced.
pub fn generate(environment: &Environment) -> Result<Vec<ResponseFile>, SummaryError> {
    let format = environment
        .parameter(FORMAT_PARAMETER)
        .map_or(Ok(SummaryFormat::default()), parse_format)?;
    let document = environment
        .document()
        .ok_or_else(|| SummaryError::MissingDocument {
            name: environment.document_name().to_owned(),
        })?;

    let summary = Summary::of(document);
    let data = match format {
        SummaryFormat::Text => summary.render_text().into_bytes(),
        SummaryFormat::Json => summary.render_json()?,
    };
    let name = format!(
        "{}.summary.{}",
        output_stem(environment.document_name()),
        format.extension()
    );
    debug!(file = %name, %format, operations = summary.operations.len(), "summary generated");
    Ok(vec![ResponseFile::new(name, data)])
}

/// Generator entry point for [`openapi_plugin::run`].
///
/// # Errors
///
/// Returns the message of any [`SummaryError`] raised by [`generate`].
pub fn summarise(environment: &Environment) -> Result<Vec<ResponseFile>, String> {
    generate(environment).map_err(|error| error.to_string())
}
