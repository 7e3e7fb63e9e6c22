//! Unit and behavioural tests for the summary plugin.

mod behaviour;

use openapi_plugin::document::{DocumentV2, DocumentV3, Info, Operation, PathItem, Server};
use openapi_plugin::protocol::{DocumentWrapper, InvocationRequest, Parameter, codec};
use openapi_plugin::source::{FileSource, StreamSource};
use openapi_plugin::{Document, Environment};
use rstest::{fixture, rstest};

use crate::{Summary, SummaryError, generate, output_stem, summarise};

fn petstore_info() -> Info {
    Info {
        title: "Petstore".into(),
        version: "1.0.0".into(),
        description: String::new(),
    }
}

fn pets_paths() -> Vec<PathItem> {
    vec![
        PathItem {
            path: "/pets".into(),
            operations: vec![
                Operation {
                    method: "get".into(),
                    operation_id: "listPets".into(),
                    summary: "List pets".into(),
                },
                Operation {
                    method: "post".into(),
                    operation_id: String::new(),
                    summary: "Create a pet".into(),
                },
            ],
        },
        PathItem {
            path: "/pets/{id}".into(),
            operations: vec![Operation {
                method: "delete".into(),
                operation_id: "deletePet".into(),
                summary: String::new(),
            }],
        },
    ]
}

#[fixture]
fn hosted_v2() -> DocumentV2 {
    DocumentV2 {
        swagger: "2.0".into(),
        info: petstore_info(),
        host: "petstore.swagger.io".into(),
        base_path: "/v1".into(),
        schemes: vec!["https".into(), "http".into()],
        paths: pets_paths(),
    }
}

#[fixture]
fn served_v3() -> DocumentV3 {
    DocumentV3 {
        openapi: "3.0.3".into(),
        info: petstore_info(),
        servers: vec![Server {
            url: "https://petstore.example.com/v1".into(),
            description: "production".into(),
        }],
        paths: pets_paths(),
        ..DocumentV3::default()
    }
}

/// Resolves a plugin-mode environment for a tagged document.
fn environment_for(version: &str, value: Vec<u8>, parameters: Vec<Parameter>) -> Environment {
    let request = InvocationRequest::new(
        "-",
        parameters,
        DocumentWrapper::new(version, "specs/petstore.json", value),
    );
    let bytes = codec::encode(&request).expect("encode request");
    let mut source = StreamSource::new(bytes.as_slice());
    Environment::resolve("summary", &mut source)
}

fn v3_environment(document: &DocumentV3, parameters: Vec<Parameter>) -> Environment {
    environment_for("v3", codec::encode(document).expect("encode"), parameters)
}

#[rstest]
fn text_summary_lists_v2_hosts_and_operations(hosted_v2: DocumentV2) {
    let summary = Summary::of(&Document::V2(hosted_v2));
    assert_eq!(
        summary.render_text(),
        concat!(
            "OpenAPI v2 (2.0)\n",
            "Title: Petstore\n",
            "API version: 1.0.0\n",
            "Servers:\n",
            "  https://petstore.swagger.io/v1\n",
            "  http://petstore.swagger.io/v1\n",
            "Operations:\n",
            "  GET /pets (listPets)\n",
            "  POST /pets\n",
            "  DELETE /pets/{id} (deletePet)\n",
        )
    );
}

#[rstest]
fn v3_summary_uses_server_urls(served_v3: DocumentV3) {
    let summary = Summary::of(&Document::V3(served_v3));
    assert_eq!(summary.schema, "v3");
    assert_eq!(summary.declared_version, "3.0.3");
    assert_eq!(summary.servers, ["https://petstore.example.com/v1"]);
    assert_eq!(summary.operations.len(), 3);
}

#[rstest]
#[case::host_without_schemes(vec![], vec!["petstore.swagger.io/v1"])]
#[case::one_scheme(vec!["https"], vec!["https://petstore.swagger.io/v1"])]
fn v2_servers_follow_schemes(
    #[case] schemes: Vec<&str>,
    #[case] expected: Vec<&str>,
    hosted_v2: DocumentV2,
) {
    let document = DocumentV2 {
        schemes: schemes.into_iter().map(String::from).collect(),
        ..hosted_v2
    };
    assert_eq!(Summary::of(&Document::V2(document)).servers, expected);
}

#[test]
fn v2_without_host_has_no_servers() {
    let summary = Summary::of(&Document::V2(DocumentV2::default()));
    assert!(summary.servers.is_empty());
}

#[rstest]
#[case::extension("specs/petstore.json", "petstore")]
#[case::no_extension("petstore", "petstore")]
#[case::double_extension("petstore.v1.pb", "petstore.v1")]
#[case::empty("", "openapi")]
fn stem_drops_directories_and_extension(#[case] name: &str, #[case] expected: &str) {
    assert_eq!(output_stem(name), expected);
}

#[rstest]
fn default_format_writes_text_file(served_v3: DocumentV3) {
    let environment = v3_environment(&served_v3, Vec::new());
    let files = generate(&environment).expect("summary");

    assert_eq!(files.len(), 1);
    let file = files.first().expect("one file");
    assert_eq!(file.name(), "petstore.summary.txt");
    let text = std::str::from_utf8(file.data()).expect("utf8 summary");
    assert!(text.starts_with("OpenAPI v3 (3.0.3)\n"), "{text}");
}

#[rstest]
fn json_format_writes_json_file(served_v3: DocumentV3) {
    let environment = v3_environment(&served_v3, vec![Parameter::new("format", "json")]);
    let files = generate(&environment).expect("summary");
    let file = files.first().expect("one file");

    assert_eq!(file.name(), "petstore.summary.json");
    let value: serde_json::Value = serde_json::from_slice(file.data()).expect("valid json");
    assert_eq!(value["title"], "Petstore");
    assert_eq!(value["operations"][0]["method"], "GET");
    assert_eq!(value["operations"][0]["operation_id"], "listPets");
}

#[rstest]
fn last_format_parameter_wins(served_v3: DocumentV3) {
    let environment = v3_environment(
        &served_v3,
        vec![Parameter::new("format", "json"), Parameter::new("format", "text")],
    );
    let files = generate(&environment).expect("summary");
    assert_eq!(files.first().expect("one file").name(), "petstore.summary.txt");
}

#[rstest]
fn unknown_format_is_rejected(served_v3: DocumentV3) {
    let environment = v3_environment(&served_v3, vec![Parameter::new("format", "yaml")]);
    let error = generate(&environment).expect_err("yaml is unsupported");
    assert!(
        matches!(&error, SummaryError::UnknownFormat { value } if value == "yaml"),
        "got {error:?}"
    );
}

#[test]
fn undecodable_input_names_the_document() {
    let dir = tempfile::TempDir::new().expect("temp dir");
    let path = dir.path().join("notes.pb");
    std::fs::write(&path, "plain text").expect("write input");
    let input = camino::Utf8PathBuf::from_path_buf(path).expect("utf8 path");

    let environment = Environment::resolve("summary", &mut FileSource::new(input, "-"));
    assert!(environment.is_ready());
    let message = summarise(&environment).expect_err("no document");
    assert_eq!(message, "no OpenAPI document could be decoded from notes.pb");
}
