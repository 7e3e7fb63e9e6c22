//! Binary entrypoint for the OpenAPI summary plugin.
//!
//! The process always exits successfully once arguments parse: failures reach
//! the host through the response and standalone users through the log.

use std::env;
use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;

use openapi_plugin::{IoStreams, PluginOptions, run, telemetry};
use openapi_plugin_summary::summarise;

fn main() -> ExitCode {
    let args: Vec<OsString> = env::args_os().collect();
    let options = match PluginOptions::try_from_args(args.clone()) {
        Ok(options) => options,
        Err(error) => error.exit(),
    };
    if let Err(error) = telemetry::initialise(&options) {
        writeln!(io::stderr().lock(), "{error}").ok();
    }

    let argv0 = args
        .first()
        .cloned()
        .unwrap_or_else(|| OsString::from(env!("CARGO_PKG_NAME")));
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    let streams = IoStreams::new(stdin.lock(), &mut stdout, &mut stderr);

    if let Err(error) = run(&argv0, &options, streams, summarise) {
        tracing::error!(%error, "plugin run failed");
    }
    ExitCode::SUCCESS
}
