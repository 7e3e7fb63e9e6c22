//! The per-run plugin environment.
//!
//! A run moves through resolution, decoding, generation, and a single
//! response:
//!
//! 1. [`Environment::resolve`] reads the input from a [`DocumentSource`] and
//!    decodes the document. Any failure is recorded in the response and the
//!    environment is no longer ready.
//! 2. A generator inspects the ready environment and returns files or an
//!    error message, applied through [`Environment::complete`].
//! 3. [`Environment::respond`] consumes the environment and either writes the
//!    encoded response to stdout (plugin mode) or hands it to
//!    [`output::deliver`] (standalone mode).
//!
//! The process exit status does not reflect plugin failures: hosts read the
//! response's error list, and standalone users read the diagnostic log.

use std::ffi::OsStr;
use std::io::{Read, Write};

use tracing::{debug, info, warn};

use crate::document::{self, Document};
use crate::error::PluginError;
use crate::options::{self, PluginOptions};
use crate::output;
use crate::protocol::{Parameter, Response, ResponseFile, codec};
use crate::source::{self, DEFAULT_OUTPUT, DocumentSource, InvocationMode, Payload, SourcedInput};

/// Context for one plugin invocation.
#[derive(Debug)]
pub struct Environment {
    invocation: String,
    mode: InvocationMode,
    document: Option<Document>,
    document_name: String,
    parameters: Vec<Parameter>,
    output_path: String,
    response: Response,
}

impl Environment {
    /// Resolves the input from `source` and decodes its document.
    ///
    /// `invocation` is the program path; plugin parameters are appended to
    /// it as `name=value` pairs.
    pub fn resolve(invocation: impl Into<String>, source: &mut dyn DocumentSource) -> Self {
        let mut environment = Self {
            invocation: invocation.into(),
            mode: source.mode(),
            document: None,
            document_name: String::new(),
            parameters: Vec::new(),
            output_path: String::from(DEFAULT_OUTPUT),
            response: Response::new(),
        };

        if let Err(error) = source.acquire().and_then(|input| environment.load(input)) {
            environment.fail(&error);
        }
        environment
    }

    fn load(&mut self, input: SourcedInput) -> Result<(), PluginError> {
        self.output_path = input.output_path;
        self.document_name = input.document_name;
        for parameter in &input.parameters {
            self.invocation.push(' ');
            self.invocation.push_str(parameter.name());
            self.invocation.push('=');
            self.invocation.push_str(parameter.value());
        }
        self.parameters = input.parameters;

        match input.payload {
            Payload::Tagged { version, bytes } => {
                info!(invocation = %self.invocation, input = %version, "running plugin");
                self.document = Some(document::decode_tagged(&version, &bytes)?);
            }
            Payload::Untagged(bytes) => {
                self.document = document::decode_untagged(&bytes);
                let version = self.document.as_ref().map(Document::version);
                debug!(name = %self.document_name, ?version, "decoded standalone input");
            }
        }
        Ok(())
    }

    /// Records a fatal error. The environment stops being ready.
    pub fn fail(&mut self, error: &PluginError) {
        warn!(%error, "plugin run failed");
        self.response.push_error(error.to_string());
    }

    /// Applies a generator outcome to the response.
    ///
    /// Ignored once the run has failed, so a failed run never gains files.
    pub fn complete(&mut self, outcome: Result<Vec<ResponseFile>, String>) {
        if !self.is_ready() {
            debug!("discarding generator outcome for a failed run");
            return;
        }
        match outcome {
            Ok(files) => {
                for file in files {
                    self.response.push_file(file);
                }
            }
            Err(message) => {
                warn!(%message, "generator reported an error");
                self.response.push_error(message);
            }
        }
    }

    /// Finalises the run.
    ///
    /// # Errors
    ///
    /// In plugin mode, returns [`PluginError::Encode`] or
    /// [`PluginError::DeliveryFailure`] if the response cannot be written.
    /// In standalone mode, returns whatever [`output::deliver`] reports,
    /// including [`PluginError::Reported`] for a failed run.
    pub fn respond(self, stdout: &mut impl Write) -> Result<(), PluginError> {
        match self.mode {
            InvocationMode::Plugin => {
                let bytes = codec::encode(&self.response).map_err(|error| PluginError::Encode {
                    message: error.to_string(),
                })?;
                stdout
                    .write_all(&bytes)
                    .and_then(|()| stdout.flush())
                    .map_err(|source| PluginError::delivery("stdout", source))
            }
            InvocationMode::Standalone => output::deliver(&self.response, &self.output_path, stdout),
        }
    }

    /// Returns whether the run is still free of errors.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        !self.response.has_errors()
    }

    /// Returns the invocation label.
    #[must_use]
    pub const fn invocation(&self) -> &str {
        self.invocation.as_str()
    }

    /// Returns how the process was invoked.
    #[must_use]
    pub const fn mode(&self) -> InvocationMode {
        self.mode
    }

    /// Returns the decoded document, if any schema accepted the input.
    #[must_use]
    pub const fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// Returns the document name.
    #[must_use]
    pub const fn document_name(&self) -> &str {
        self.document_name.as_str()
    }

    /// Returns the host parameters in request order.
    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Returns the value of the last parameter called `name`.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .rev()
            .find(|parameter| parameter.name() == name)
            .map(Parameter::value)
    }

    /// Returns the output descriptor.
    #[must_use]
    pub const fn output_path(&self) -> &str {
        self.output_path.as_str()
    }

    /// Returns the response accumulated so far.
    #[must_use]
    pub const fn response(&self) -> &Response {
        &self.response
    }
}

/// Bundles the standard streams used by [`run`].
pub struct IoStreams<'a, R, W: Write, E: Write> {
    stdin: R,
    stdout: &'a mut W,
    stderr: &'a mut E,
}

impl<'a, R: Read, W: Write, E: Write> IoStreams<'a, R, W, E> {
    /// Bundles the given streams.
    pub const fn new(stdin: R, stdout: &'a mut W, stderr: &'a mut E) -> Self {
        Self {
            stdin,
            stdout,
            stderr,
        }
    }
}

/// How a call to [`run`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Neither plugin mode nor an input was requested; usage was printed.
    Usage,
    /// A response was produced and delivered.
    Responded,
}

/// Runs a plugin end to end.
///
/// `argv0` is the program path as invoked. `generator` is called only when the
/// environment is ready; its files or error message become the response.
///
/// # Errors
///
/// Returns the error from [`Environment::respond`], or
/// [`PluginError::DeliveryFailure`] if usage guidance cannot be written. The
/// caller logs it; the process still exits successfully.
pub fn run<R, W, E, G>(
    argv0: &OsStr,
    options: &PluginOptions,
    io: IoStreams<'_, R, W, E>,
    generator: G,
) -> Result<RunOutcome, PluginError>
where
    R: Read,
    W: Write,
    E: Write,
    G: FnOnce(&Environment) -> Result<Vec<ResponseFile>, String>,
{
    let IoStreams {
        stdin,
        stdout,
        stderr,
    } = io;

    let Some(mut document_source) = source::select_source(options, stdin) else {
        let program = options::program_name(argv0);
        stderr
            .write_all(options::usage(&program).as_bytes())
            .and_then(|()| stderr.flush())
            .map_err(|source| PluginError::delivery("stderr", source))?;
        return Ok(RunOutcome::Usage);
    };

    let mut environment = Environment::resolve(argv0.to_string_lossy(), document_source.as_mut());
    if environment.is_ready() {
        let outcome = generator(&environment);
        environment.complete(outcome);
    }
    environment.respond(stdout)?;
    Ok(RunOutcome::Responded)
}
