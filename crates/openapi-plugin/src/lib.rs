//! Runtime environment for OpenAPI generator plugins.
//!
//! A plugin is a short-lived executable that receives one OpenAPI document,
//! produces a set of named output files, and reports either those files or a
//! list of errors. The same binary runs in two modes:
//!
//! - **Plugin mode** (`-plugin`): a host writes a binary
//!   [`InvocationRequest`] to stdin and reads a binary [`Response`] from
//!   stdout. Nothing else is ever written to stdout.
//! - **Standalone mode** (`-input <file>`): the document is read from a file
//!   without any version tag, the schema is inferred, and the produced files
//!   are discarded (`!`), streamed to stdout (`-`), or written beneath an
//!   output directory.
//!
//! # Architecture
//!
//! [`select_source`] chooses a [`DocumentSource`] from the parsed
//! [`PluginOptions`]. [`Environment::resolve`] acquires the input and decodes
//! the document; a generator closure turns the ready environment into
//! [`ResponseFile`]s; [`Environment::respond`] delivers the result. [`run`]
//! ties the stages together so a plugin binary only supplies its generator.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::io;
//!
//! use openapi_plugin::{IoStreams, PluginOptions, ResponseFile, run};
//!
//! let args = std::env::args_os().collect::<Vec<_>>();
//! let options = PluginOptions::try_from_args(args.clone()).expect("valid arguments");
//! let argv0 = args.first().cloned().unwrap_or_default();
//!
//! let stdin = io::stdin();
//! let mut stdout = io::stdout();
//! let mut stderr = io::stderr();
//! let io = IoStreams::new(stdin.lock(), &mut stdout, &mut stderr);
//!
//! let _ = run(&argv0, &options, io, |environment| {
//!     Ok(vec![ResponseFile::new("name.txt", environment.document_name())])
//! });
//! ```
//!
//! [`InvocationRequest`]: protocol::InvocationRequest

pub mod document;
pub mod environment;
pub mod error;
pub mod logging;
pub mod options;
pub mod output;
pub mod protocol;
pub mod source;
pub mod telemetry;

#[cfg(test)]
mod tests;

pub use self::document::{Document, DocumentV2, DocumentV3, DocumentVersion};
pub use self::environment::{Environment, IoStreams, RunOutcome, run};
pub use self::error::PluginError;
pub use self::logging::LogFormat;
pub use self::options::PluginOptions;
pub use self::output::OutputTarget;
pub use self::protocol::{Parameter, Response, ResponseFile};
pub use self::source::{DocumentSource, InvocationMode, select_source};
