//! Command-line options shared by every plugin binary.
//!
//! Hosts traditionally start plugins with single-dash long flags such as
//! `-plugin`. [`normalise_args`] rewrites those to the double-dash form before
//! `clap` sees them, so both spellings are accepted.

use std::ffi::{OsStr, OsString};
use std::path::Path;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{CommandFactory, Parser};

use crate::logging::{DEFAULT_LOG_FILTER, LogFormat};
use crate::source::DEFAULT_OUTPUT;

/// Long flags that may also be written with a single dash.
const LONG_FLAGS: &[&str] = &["input", "output", "plugin", "log-filter", "log-format"];

/// Arguments accepted by a plugin binary.
#[derive(Debug, Clone, Parser)]
#[command(version, about = "Runs as an OpenAPI plugin or as a standalone tool.")]
pub struct PluginOptions {
    /// OpenAPI description in binary form.
    #[arg(long, value_name = "PATH")]
    input: Option<Utf8PathBuf>,

    /// Output location: `-` for stdout, `!` to discard, otherwise a directory.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_OUTPUT)]
    output: String,

    /// Run as a plugin: read a request from stdin and write a response to
    /// stdout. Other document options are ignored.
    #[arg(long)]
    plugin: bool,

    /// Tracing filter expression for diagnostics on stderr.
    #[arg(long, env = "OPENAPI_PLUGIN_LOG", default_value = DEFAULT_LOG_FILTER)]
    log_filter: String,

    /// Diagnostic log format.
    #[arg(long, env = "OPENAPI_PLUGIN_LOG_FORMAT", default_value_t = LogFormat::Compact)]
    log_format: LogFormat,
}

impl PluginOptions {
    /// Parses options from raw process arguments, accepting single-dash long
    /// flags.
    ///
    /// # Errors
    ///
    /// Returns the `clap` error for unknown flags or missing values, and for
    /// `--help` / `--version`, which `clap` reports through the same channel.
    pub fn try_from_args<I>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = OsString>,
    {
        Self::try_parse_from(normalise_args(args))
    }

    /// Returns the input path, if one was given.
    #[must_use]
    pub fn input(&self) -> Option<&Utf8Path> {
        self.input.as_deref()
    }

    /// Returns the output descriptor.
    #[must_use]
    pub const fn output(&self) -> &str {
        self.output.as_str()
    }

    /// Returns whether plugin mode was requested.
    #[must_use]
    pub const fn plugin(&self) -> bool {
        self.plugin
    }

    /// Returns the tracing filter expression.
    #[must_use]
    pub const fn log_filter(&self) -> &str {
        self.log_filter.as_str()
    }

    /// Returns the diagnostic log format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }
}

/// Rewrites `-flag` and `-flag=value` to `--flag` forms for known long flags.
///
/// The first argument is the program path and is left alone, as is
/// everything after a bare `--`.
#[must_use]
pub fn normalise_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut iter = args.into_iter();
    let mut normalised: Vec<OsString> = iter.next().into_iter().collect();
    let mut passthrough = false;

    for argument in iter {
        if passthrough {
            normalised.push(argument);
            continue;
        }
        if argument == "--" {
            passthrough = true;
            normalised.push(argument);
            continue;
        }
        normalised.push(promote_single_dash(argument));
    }
    normalised
}

fn promote_single_dash(argument: OsString) -> OsString {
    let Some(text) = argument.to_str() else {
        return argument;
    };
    let Some(body) = text.strip_prefix('-') else {
        return argument;
    };
    if body.starts_with('-') {
        return argument;
    }

    let flag = body.split_once('=').map_or(body, |(name, _)| name);
    if LONG_FLAGS.contains(&flag) {
        OsString::from(format!("-{text}"))
    } else {
        argument
    }
}

/// Returns the base name of the program path, for messages.
#[must_use]
pub fn program_name(argv0: &OsStr) -> String {
    Path::new(argv0)
        .file_name()
        .unwrap_or(argv0)
        .to_string_lossy()
        .into_owned()
}

/// Builds the guidance printed when neither `--plugin` nor `--input` is given.
#[must_use]
pub fn usage(program: &str) -> String {
    let help = PluginOptions::command()
        .bin_name(program.to_owned())
        .render_help();
    format!(
        concat!(
            "\n{program} is an OpenAPI plugin.\n\n",
            "A host runs it with --plugin, writes a binary request to stdin, and\n",
            "reads a binary response from stdout.\n\n",
            "It can also be run by hand with the options below; document options\n",
            "are ignored when --plugin is given.\n\n",
            "{help}",
        ),
        program = program,
        help = help,
    )
}
