//! Message types exchanged between a host and a plugin.
//!
//! The host writes one [`InvocationRequest`] to the plugin's stdin and closes
//! it. The plugin writes one [`Response`] to stdout and exits. Both are binary
//! messages produced by [`codec`]; plugin stderr carries diagnostics only and
//! is not part of the protocol.

pub mod codec;

use serde::{Deserialize, Serialize};

pub use self::codec::{CodecError, decode, encode};

/// Request sent from a host to a plugin on stdin.
///
/// # Example
///
/// ```
/// use openapi_plugin::protocol::{DocumentWrapper, InvocationRequest, Parameter};
///
/// let request = InvocationRequest::new(
///     "out",
///     vec![Parameter::new("format", "json")],
///     DocumentWrapper::new("v3", "petstore.yaml", Vec::new()),
/// );
/// assert_eq!(request.output_path(), "out");
/// assert_eq!(request.wrapper().version(), "v3");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InvocationRequest {
    output_path: String,
    parameters: Vec<Parameter>,
    wrapper: DocumentWrapper,
}

impl InvocationRequest {
    /// Creates a request.
    #[must_use]
    pub fn new(
        output_path: impl Into<String>,
        parameters: Vec<Parameter>,
        wrapper: DocumentWrapper,
    ) -> Self {
        Self {
            output_path: output_path.into(),
            parameters,
            wrapper,
        }
    }

    /// Returns the output descriptor chosen by the host.
    #[must_use]
    pub const fn output_path(&self) -> &str {
        self.output_path.as_str()
    }

    /// Returns the plugin parameters in the order the host sent them.
    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Returns the wrapped document.
    #[must_use]
    pub const fn wrapper(&self) -> &DocumentWrapper {
        &self.wrapper
    }

    /// Splits the request into its owned parts.
    #[must_use]
    pub fn into_parts(self) -> (String, Vec<Parameter>, DocumentWrapper) {
        (self.output_path, self.parameters, self.wrapper)
    }
}

/// A `name=value` option forwarded by the host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Parameter {
    name: String,
    value: String,
}

impl Parameter {
    /// Creates a parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Returns the parameter name.
    #[must_use]
    pub const fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the parameter value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.value.as_str()
    }
}

/// An encoded document together with its declared schema version.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentWrapper {
    version: String,
    name: String,
    value: Vec<u8>,
}

impl DocumentWrapper {
    /// Creates a wrapper around encoded document bytes.
    #[must_use]
    pub fn new(version: impl Into<String>, name: impl Into<String>, value: Vec<u8>) -> Self {
        Self {
            version: version.into(),
            name: name.into(),
            value,
        }
    }

    /// Returns the declared version tag, normally `v2` or `v3`.
    #[must_use]
    pub const fn version(&self) -> &str {
        self.version.as_str()
    }

    /// Returns the name the host gave the document.
    #[must_use]
    pub const fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the encoded document bytes.
    #[must_use]
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Splits the wrapper into version, name, and bytes.
    #[must_use]
    pub fn into_parts(self) -> (String, String, Vec<u8>) {
        (self.version, self.name, self.value)
    }
}

/// Response written by the plugin to stdout.
///
/// Errors and files are append-only and keep insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Response {
    errors: Vec<String>,
    files: Vec<ResponseFile>,
}

impl Response {
    /// Creates an empty response.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            errors: Vec::new(),
            files: Vec::new(),
        }
    }

    /// Appends an error message.
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Appends a produced file.
    pub fn push_file(&mut self, file: ResponseFile) {
        self.files.push(file);
    }

    /// Returns the accumulated error messages.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Returns the produced files.
    #[must_use]
    pub fn files(&self) -> &[ResponseFile] {
        &self.files
    }

    /// Returns whether any error has been recorded.
    #[must_use]
    pub const fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// A named blob produced by a plugin.
///
/// The name is a relative path; it may contain `/` to place the file in a
/// subdirectory of the output location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResponseFile {
    name: String,
    data: Vec<u8>,
}

impl ResponseFile {
    /// Creates a file entry.
    #[must_use]
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    /// Returns the file name.
    #[must_use]
    pub const fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the file contents.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}
