use plod::commands::command_argument_builder;
use plod::handlers::*;
use plod_core::{Method, OutputFormat, PlodError, SparqlClient};
use std::io::Write;
use tempfile::NamedTempFile;
use wiremock::{
    Match, Mock, MockServer, Request, ResponseTemplate,
    matchers::{method, path},
};

fn matches_for(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["plod"];
    argv.extend_from_slice(args);
    command_argument_builder().try_get_matches_from(argv).unwrap()
}

fn no_env(_: &str) -> Option<String> {
    None
}

// ============================================================================
// Argument Parsing Tests
// ============================================================================

#[test]
fn test_identifier_only_defaults_to_label() {
    let request = parse_request(&matches_for(&["pompeii"])).unwrap();
    assert_eq!(request.identifier, "pompeii");
    assert!(request.method.is_none());
    assert_eq!(request.format, OutputFormat::Text);
}

#[test]
fn test_method_and_format() {
    let request =
        parse_request(&matches_for(&["-m", "spatial_children", "-f", "json", "r1"])).unwrap();
    assert_eq!(request.method, Some(Method::SpatialChildren));
    assert_eq!(request.format, OutputFormat::Json);
}

#[test]
fn test_predicate_and_level_args() {
    let request = parse_request(&matches_for(&[
        "-m",
        "depicted_where",
        "-l",
        "property",
        "-p",
        "urn:p-lod:id:wikidata-url",
        "bird",
    ]))
    .unwrap();
    assert_eq!(request.args.level_of_detail.unwrap().as_str(), "property");
    assert_eq!(request.args.predicate.as_deref(), Some("urn:p-lod:id:wikidata-url"));
}

#[test]
fn test_unknown_method_rejected() {
    let err = parse_request(&matches_for(&["-m", "delete_everything", "r1"])).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PlodError>(),
        Some(PlodError::UnknownMethod(_))
    ));
}

#[test]
fn test_bad_level_rejected() {
    assert!(parse_request(&matches_for(&["-l", "space }", "r1"])).is_err());
}

#[test]
fn test_identifier_required_without_list_methods() {
    let result = command_argument_builder().try_get_matches_from(["plod", "-m", "label"]);
    assert!(result.is_err());

    let matches = matches_for(&["--list-methods"]);
    assert!(matches.get_flag("list-methods"));
}

#[test]
fn test_unknown_format_rejected_by_clap() {
    let result = command_argument_builder().try_get_matches_from(["plod", "-f", "csv", "r1"]);
    assert!(result.is_err());
}

#[test]
fn test_every_accepted_format_parses() {
    for name in OutputFormat::NAMES {
        let request = parse_request(&matches_for(&["-f", name, "r1"])).unwrap();
        assert_eq!(Some(request.format), OutputFormat::from_str(name));
    }

    for alias in ["list", "txt"] {
        let result = command_argument_builder().try_get_matches_from(["plod", "-f", alias, "r1"]);
        assert!(result.is_err(), "{}", alias);
    }
}

#[test]
fn test_list_methods_names_every_method() {
    let listing = list_methods();
    for method in Method::ALL {
        assert!(listing.contains(method.as_str()), "{}", method);
    }
}

// ============================================================================
// Config Resolution Tests
// ============================================================================

#[test]
fn test_flags_override_config_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut file = NamedTempFile::new()?;
    writeln!(
        file,
        r#"{{ "endpoint": "http://file.example/sparql", "timeout_secs": 12 }}"#
    )?;
    let config_path = file.path().to_str().unwrap();

    let config = resolve_config(&matches_for(&["-c", config_path, "r1"]), no_env)?;
    assert_eq!(config.endpoint, "http://file.example/sparql");
    assert_eq!(config.timeout_secs, 12);

    let config = resolve_config(
        &matches_for(&["-c", config_path, "-e", "http://flag.example/q", "-t", "3", "--no-cache", "r1"]),
        no_env,
    )?;
    assert_eq!(config.endpoint, "http://flag.example/q");
    assert_eq!(config.timeout_secs, 3);
    assert!(!config.cache);

    Ok(())
}

#[test]
fn test_env_sits_between_file_and_flags() -> Result<(), Box<dyn std::error::Error>> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, r#"{{ "endpoint": "http://file.example/sparql" }}"#)?;
    let config_path = file.path().to_str().unwrap();
    let env = |key: &str| (key == "PLOD_ENDPOINT").then(|| "http://env.example/q".to_string());

    let config = resolve_config(&matches_for(&["-c", config_path, "r1"]), env)?;
    assert_eq!(config.endpoint, "http://env.example/q");

    let config = resolve_config(
        &matches_for(&["-c", config_path, "-e", "http://flag.example/q", "r1"]),
        env,
    )?;
    assert_eq!(config.endpoint, "http://flag.example/q");

    Ok(())
}

#[test]
fn test_invalid_endpoint_flag_rejected() {
    let result = resolve_config(&matches_for(&["-e", "not-a-url", "r1"]), no_env);
    assert!(result.is_err());
}

// ============================================================================
// End-to-end Query Tests
// ============================================================================

struct QueryContains(&'static str);

impl Match for QueryContains {
    fn matches(&self, request: &Request) -> bool {
        request
            .url
            .query_pairs()
            .any(|(k, v)| k == "query" && v.contains(self.0))
    }
}

async fn mock_endpoint() -> (MockServer, SparqlClient) {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/query"))
        .and(QueryContains("p-lod:pompeii ?p ?o"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{ "head": { "vars": ["p", "o"] }, "results": { "bindings": [
                { "p": { "type": "uri", "value": "http://www.w3.org/2000/01/rdf-schema#label" },
                  "o": { "type": "literal", "value": "Pompeii" } }
            ] } }"#,
        ))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/query"))
        .and(QueryContains("p-lod:spatially-within p-lod:pompeii"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{ "head": { "vars": ["spatial_id"] }, "results": { "bindings": [
                { "spatial_id": { "type": "uri", "value": "urn:p-lod:id:r1" } },
                { "spatial_id": { "type": "uri", "value": "urn:p-lod:id:r2" } }
            ] } }"#,
        ))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/query"))
        .and(QueryContains("p-lod:nowhere ?p ?o"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{ "head": { "vars": ["p", "o"] }, "results": { "bindings": [] } }"#,
        ))
        .mount(&server)
        .await;

    let client = SparqlClient::new(format!("{}/query", server.uri())).unwrap();
    (server, client)
}

#[tokio::test]
async fn test_run_query_prints_label_by_default() {
    let (_server, client) = mock_endpoint().await;
    let request = parse_request(&matches_for(&["pompeii"])).unwrap();

    let out = run_query(&client, &request).await.unwrap();
    assert_eq!(out, "Pompeii");
}

#[tokio::test]
async fn test_run_query_method_as_text_table() {
    let (_server, client) = mock_endpoint().await;
    let request = parse_request(&matches_for(&["-m", "spatial_children", "pompeii"])).unwrap();

    let out = run_query(&client, &request).await.unwrap();
    assert_eq!(out, "spatial_id\nurn:p-lod:id:r1\nurn:p-lod:id:r2\n");
}

#[tokio::test]
async fn test_run_query_rows_format() {
    let (_server, client) = mock_endpoint().await;
    let request =
        parse_request(&matches_for(&["-m", "spatial_children", "-f", "rows", "pompeii"])).unwrap();

    let out = run_query(&client, &request).await.unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed, serde_json::json!([["urn:p-lod:id:r1"], ["urn:p-lod:id:r2"]]));
}

#[tokio::test]
async fn test_run_query_not_found_exit_code() {
    let (_server, client) = mock_endpoint().await;
    let request = parse_request(&matches_for(&["nowhere"])).unwrap();

    let err = run_query(&client, &request).await.unwrap_err();
    assert_eq!(exit_code_for(&err), 2);
    assert!(format!("{:#}", err).contains("nowhere"));
}

#[tokio::test]
async fn test_run_query_request_failure_exit_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let client = SparqlClient::new(format!("{}/query", server.uri())).unwrap();
    let request = parse_request(&matches_for(&["pompeii"])).unwrap();

    let err = run_query(&client, &request).await.unwrap_err();
    assert_eq!(exit_code_for(&err), 1);
}
