//! Crate-level integration and BDD tests.

use std::ffi::{OsStr, OsString};

use tempfile::TempDir;

use crate::document::{Document, DocumentV2, DocumentV3, Info};
use crate::environment::{Environment, IoStreams, RunOutcome, run};
use crate::options::PluginOptions;
use crate::protocol::{DocumentWrapper, InvocationRequest, Parameter, ResponseFile, codec};


/// Writes the decoded schema version, or `none`, into `version.txt`.
fn version_generator(environment: &Environment) -> Result<Vec<ResponseFile>, String> {
    let version = environment
        .document()
        .map_or_else(|| String::from("none"), |document| document.version().to_string());
    Ok(vec![ResponseFile::new("version.txt", version)])
}

fn bare_swagger() -> DocumentV2 {
    DocumentV2 {
        swagger: "2.0".into(),
        info: Info {
            title: "Bare".into(),
            version: "0.1.0".into(),
            description: String::new(),
        },
        ..DocumentV2::default()
    }
}

fn tagged_request(version: &str) -> Vec<u8> {
    let value = match version {
        "v2" => codec::encode(&DocumentV2 {
            host: "api.example.com".into(),
            ..bare_swagger()
        }),
        "v3" => codec::encode(&DocumentV3 {
            openapi: "3.1.0".into(),
            ..DocumentV3::default()
        }),
        _ => Ok(Vec::new()),
    }
    .expect("encode document");
    let request = InvocationRequest::new(
        "-",
        vec![Parameter::new("format", "text")],
        DocumentWrapper::new(version, "api.json", value),
    );
    codec::encode(&request).expect("encode request")
}

fn parse_options<I, S>(args: I) -> PluginOptions
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    PluginOptions::try_from_args(args.into_iter().map(Into::into)).expect("parse options")
}

#[test]
fn standalone_run_writes_into_output_directory() {
    let workspace = TempDir::new().expect("temp dir");
    let input = workspace.path().join("bare.pb");
    std::fs::write(&input, codec::encode(&bare_swagger()).expect("encode")).expect("write input");
    let output = workspace.path().join("out");

    let options = parse_options([
        OsString::from("summary"),
        OsString::from("-input"),
        input.into_os_string(),
        OsString::from("-output"),
        output.clone().into_os_string(),
    ]);
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let io = IoStreams::new(std::io::empty(), &mut stdout, &mut stderr);

    let outcome = run(OsStr::new("summary"), &options, io, version_generator).expect("run");

    assert_eq!(outcome, RunOutcome::Responded);
    assert_eq!(
        std::fs::read_to_string(output.join("version.txt")).expect("read output"),
        "v3"
    );
}

#[test]
fn plugin_run_reports_generator_errors_to_host() {
    let stdin = tagged_request("v3");
    let options = parse_options(["summary", "-plugin"]);
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let io = IoStreams::new(stdin.as_slice(), &mut stdout, &mut stderr);

    run(OsStr::new("summary"), &options, io, |environment| {
        assert!(matches!(environment.document(), Some(Document::V3(_))));
        Err(String::from("nothing to generate"))
    })
    .expect("plugin mode always responds");

    let response: crate::protocol::Response = codec::decode(&stdout).expect("decode response");
    assert_eq!(response.errors(), ["nothing to generate"]);
    assert!(response.files().is_empty());
}
