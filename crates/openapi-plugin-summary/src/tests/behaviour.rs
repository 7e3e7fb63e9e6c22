//! Behaviour-driven tests for summary generation.

use openapi_plugin::Environment;
use openapi_plugin::protocol::{Parameter, ResponseFile};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use crate::summarise;

use super::{served_v3, v3_environment};

#[derive(Default)]
struct World {
    parameters: Vec<Parameter>,
    requested: bool,
    result: Option<Result<Vec<ResponseFile>, String>>,
}

#[fixture]
fn world() -> World {
    World::default()
}

fn summary_file(world: &World) -> &ResponseFile {
    world
        .result
        .as_ref()
        .expect("summary should have run")
        .as_ref()
        .expect("summary should succeed")
        .first()
        .expect("one summary file")
}

#[given("a host request for the petstore v3 document")]
fn given_petstore_request(world: &mut World) {
    world.requested = true;
}

#[given("the host parameter {name} set to {value}")]
fn given_parameter(world: &mut World, name: String, value: String) {
    world
        .parameters
        .push(Parameter::new(name.trim_matches('"'), value.trim_matches('"')));
}

#[when("the summary is generated")]
fn when_generated(world: &mut World) {
    assert!(world.requested, "a request must be prepared first");
    let environment: Environment = v3_environment(&served_v3(), world.parameters.clone());
    world.result = Some(summarise(&environment));
}

#[then("the summary file is {name}")]
fn then_summary_file(world: &mut World, name: String) {
    assert_eq!(summary_file(world).name(), name.trim_matches('"'));
}

#[then("the summary mentions {text}")]
fn then_summary_mentions(world: &mut World, text: String) {
    let body = String::from_utf8_lossy(summary_file(world).data()).into_owned();
    let needle = text.trim_matches('"');
    assert!(body.contains(needle), "expected '{needle}' in {body}");
}

#[then("the JSON summary lists operation {operation_id}")]
fn then_json_lists_operation(world: &mut World, operation_id: String) {
    let summary: serde_json::Value =
        serde_json::from_slice(summary_file(world).data()).expect("summary should be JSON");
    let operations = summary["operations"].as_array().expect("operations array");
    let expected = operation_id.trim_matches('"');
    assert!(
        operations
            .iter()
            .any(|operation| operation["operation_id"] == expected),
        "expected {expected} in {operations:?}"
    );
}

#[then("the summary fails with {message}")]
fn then_summary_fails(world: &mut World, message: String) {
    let error = world
        .result
        .as_ref()
        .expect("summary should have run")
        .as_ref()
        .expect_err("summary should fail");
    assert!(error.contains(message.trim_matches('"')), "got {error}");
}

#[scenario(
    path = "tests/features/summary_plugin.feature",
    name = "Text summary for a v3 document"
)]
fn text_summary(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/summary_plugin.feature",
    name = "JSON summary on request"
)]
fn json_summary(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/summary_plugin.feature",
    name = "Unknown format is reported"
)]
fn unknown_format(world: World) {
    let _ = world;
}
