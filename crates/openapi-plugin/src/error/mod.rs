//! Domain errors raised while resolving, decoding, and delivering a plugin run.
//!
//! Every failure is a variant of [`PluginError`] with named fields. I/O
//! sources are held in `Arc` so the error stays `Clone` and small enough for
//! the `result_large_err` lint.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors arising from a plugin invocation.
#[derive(Debug, Clone, Error)]
pub enum PluginError {
    /// The document source produced no bytes or could not be read.
    #[error("no input data from {origin}")]
    InputUnavailable {
        /// Human-readable name of the source (`stdin` or a file path).
        origin: String,
        /// Optional underlying I/O error.
        #[source]
        source: Option<Arc<std::io::Error>>,
    },

    /// A structured message failed to decode.
    #[error("malformed {subject}: {message}")]
    MalformedMessage {
        /// What was being decoded, e.g. `plugin request` or `v2 document`.
        subject: String,
        /// Decoder failure description.
        message: String,
    },

    /// The request declared a document version this environment cannot read.
    #[error("unsupported OpenAPI version {version}")]
    UnsupportedVersion {
        /// Version tag carried by the request.
        version: String,
    },

    /// Directory output was requested over an existing plain file.
    #[error("unable to overwrite {path}")]
    OutputConflict {
        /// The conflicting path.
        path: Utf8PathBuf,
    },

    /// Creating a directory or writing an output file failed.
    #[error("failed to deliver output to {target}: {source}")]
    DeliveryFailure {
        /// Path or stream that was being written.
        target: String,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// The response carried errors, so nothing was delivered.
    #[error("plugin error: [{}]", .errors.join("; "))]
    Reported {
        /// Errors accumulated in the response, in order.
        errors: Vec<String>,
    },

    /// The response envelope could not be serialised.
    #[error("failed to encode plugin response: {message}")]
    Encode {
        /// Encoder failure description.
        message: String,
    },
}

impl PluginError {
    /// Builds an [`PluginError::InputUnavailable`] for a source that yielded
    /// zero bytes.
    #[must_use]
    pub fn empty_input(origin: impl Into<String>) -> Self {
        Self::InputUnavailable {
            origin: origin.into(),
            source: None,
        }
    }

    /// Builds an [`PluginError::InputUnavailable`] from a read failure.
    #[must_use]
    pub fn unreadable_input(origin: impl Into<String>, source: std::io::Error) -> Self {
        Self::InputUnavailable {
            origin: origin.into(),
            source: Some(Arc::new(source)),
        }
    }

    /// Builds a [`PluginError::DeliveryFailure`] for the given target.
    #[must_use]
    pub fn delivery(target: impl Into<String>, source: std::io::Error) -> Self {
        Self::DeliveryFailure {
            target: target.into(),
            source: Arc::new(source),
        }
    }
}
