//! Document sources for the two invocation modes.
//!
//! A run obtains its document from exactly one [`DocumentSource`], chosen once
//! by [`select_source`]: a [`StreamSource`] that reads an
//! [`InvocationRequest`] from stdin when running under a host, or a
//! [`FileSource`] that reads a bare document from disk when run by hand.

use std::fs;
use std::io::Read;

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::PluginError;
use crate::options::PluginOptions;
use crate::protocol::{InvocationRequest, Parameter, codec};

/// Output descriptor used when none is supplied.
pub const DEFAULT_OUTPUT: &str = "-";

const STDIN_ORIGIN: &str = "stdin";

/// How the process was invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationMode {
    /// Driven by a host over stdin/stdout.
    Plugin,
    /// Run from the command line with an input file.
    Standalone,
}

/// Document bytes plus whatever version information the source carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// The host declared the schema version.
    Tagged {
        /// Declared version tag.
        version: String,
        /// Encoded document.
        bytes: Vec<u8>,
    },
    /// Bytes of unknown version read from a file.
    Untagged(Vec<u8>),
}

/// Everything a source yields for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcedInput {
    /// Host parameters, in request order. Empty in standalone mode.
    pub parameters: Vec<Parameter>,
    /// Name of the document.
    pub document_name: String,
    /// Output descriptor for the run.
    pub output_path: String,
    /// The document itself.
    pub payload: Payload,
}

/// Provides the document for a single run.
pub trait DocumentSource {
    /// Reports the invocation mode this source implements.
    fn mode(&self) -> InvocationMode;

    /// Reads the whole input.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::InputUnavailable`] when the input is empty or
    /// unreadable and [`PluginError::MalformedMessage`] when a request
    /// envelope cannot be decoded.
    fn acquire(&mut self) -> Result<SourcedInput, PluginError>;
}

/// Reads one [`InvocationRequest`] from a byte stream, normally stdin.
pub struct StreamSource<R> {
    reader: R,
}

impl<R: Read> StreamSource<R> {
    /// Wraps a reader.
    #[must_use]
    pub const fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: Read> DocumentSource for StreamSource<R> {
    fn mode(&self) -> InvocationMode {
        InvocationMode::Plugin
    }

    fn acquire(&mut self) -> Result<SourcedInput, PluginError> {
        let mut buffer = Vec::new();
        self.reader
            .read_to_end(&mut buffer)
            .map_err(|source| PluginError::unreadable_input(STDIN_ORIGIN, source))?;
        if buffer.is_empty() {
            return Err(PluginError::empty_input(STDIN_ORIGIN));
        }

        let request: InvocationRequest =
            codec::decode(&buffer).map_err(|error| PluginError::MalformedMessage {
                subject: String::from("plugin request"),
                message: error.to_string(),
            })?;

        let (output_path, parameters, wrapper) = request.into_parts();
        let (version, document_name, bytes) = wrapper.into_parts();
        Ok(SourcedInput {
            parameters,
            document_name,
            output_path,
            payload: Payload::Tagged { version, bytes },
        })
    }
}

/// Reads a bare document from a file.
#[derive(Debug, Clone)]
pub struct FileSource {
    input: Utf8PathBuf,
    output: String,
}

impl FileSource {
    /// Creates a source for `input`, delivering to `output`.
    #[must_use]
    pub fn new(input: impl Into<Utf8PathBuf>, output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }

    /// Returns the input path.
    #[must_use]
    pub fn input(&self) -> &Utf8Path {
        self.input.as_path()
    }
}

impl DocumentSource for FileSource {
    fn mode(&self) -> InvocationMode {
        InvocationMode::Standalone
    }

    fn acquire(&mut self) -> Result<SourcedInput, PluginError> {
        let bytes = fs::read(&self.input)
            .map_err(|source| PluginError::unreadable_input(self.input.as_str(), source))?;
        if bytes.is_empty() {
            return Err(PluginError::empty_input(self.input.as_str()));
        }

        let document_name = self
            .input
            .file_name()
            .unwrap_or_else(|| self.input.as_str())
            .to_owned();
        Ok(SourcedInput {
            parameters: Vec::new(),
            document_name,
            output_path: self.output.clone(),
            payload: Payload::Untagged(bytes),
        })
    }
}

/// Chooses the document source for these options.
///
/// The plugin flag wins over everything else. Without it an input path is
/// required; `None` means neither was given and the caller should print
/// usage guidance instead of running.
#[must_use]
pub fn select_source<'a, R>(
    options: &PluginOptions,
    stdin: R,
) -> Option<Box<dyn DocumentSource + 'a>>
where
    R: Read + 'a,
{
    if options.plugin() {
        return Some(Box::new(StreamSource::new(stdin)));
    }
    let input = options.input()?;
    Some(Box::new(FileSource::new(input, options.output())))
}
