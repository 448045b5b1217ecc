//! Integration tests using mock HTTP server
//!
//! Tests the full flow: API profile → paged HTTP requests → typed records →
//! CLI output

use airq::cli::{Cli, Runner};
use airq::{AggregationStatus, AirQualityClient, ApiConfig, Error, FetchFailure};
use clap::Parser;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn legacy_station(id: u64, name: &str, city: &str) -> Value {
    json!({
        "id": id,
        "stationName": name,
        "gegrLat": "50.057678",
        "gegrLon": "19.926189",
        "city": {"id": id * 10, "name": city, "commune": {"communeName": city}},
        "addressStreet": "al. Krasińskiego"
    })
}

async fn mount_legacy_network(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/rest/station/findAll"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            legacy_station(400, "Kraków, Aleja Krasińskiego", "Kraków"),
            legacy_station(401, "Kraków, ul. Bujaka", "Kraków"),
            legacy_station(729, "Gdańsk Wyzwolenia", "Gdańsk"),
            legacy_station(114, "Wrocław - Bartnicza", "Wrocław")
        ])))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/station/sensors/401"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 2747, "stationId": 401, "param": {"paramName": "pył zawieszony PM10", "paramCode": "PM10"}},
            {"id": 2750, "stationId": 401, "param": {"paramName": "dwutlenek siarki", "paramCode": "SO2"}}
        ])))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/data/getData/2747"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "key": "PM10",
            "values": [
                {"date": "2024-03-01 13:00:00", "value": null},
                {"date": "2024-03-01 12:00:00", "value": 42.7},
                {"date": "2024-03-01 11:00:00", "value": 39.1}
            ]
        })))
        .mount(server)
        .await;
}

fn runner(server: &MockServer, args: &[&str]) -> Runner {
    let uri = server.uri();
    let mut argv = vec!["airq", "--api", "legacy", "--base-url", uri.as_str()];
    argv.extend_from_slice(args);
    Runner::new(Cli::parse_from(argv))
}

// ============================================================================
// Client Integration Tests
// ============================================================================

#[tokio::test]
async fn test_catalog_lists_sorted_cities() {
    let server = MockServer::start().await;
    mount_legacy_network(&server).await;

    let config = ApiConfig::builtin("legacy").unwrap().with_base_url(server.uri());
    let client = AirQualityClient::new(config).unwrap();
    let catalog = client.fetch_catalog().await.unwrap();

    assert_eq!(catalog.status(), &AggregationStatus::Exhausted);
    assert_eq!(catalog.cities(), vec!["Gdańsk", "Kraków", "Wrocław"]);
    assert_eq!(catalog.stations_in_city("Kraków").len(), 2);
}

#[tokio::test]
async fn test_station_history_end_to_end() {
    let server = MockServer::start().await;
    mount_legacy_network(&server).await;

    let config = ApiConfig::builtin("legacy").unwrap().with_base_url(server.uri());
    let client = AirQualityClient::new(config).unwrap();
    let catalog = client.fetch_catalog().await.unwrap();

    let history = client
        .station_history(&catalog, "Kraków", "Kraków, ul. Bujaka", "PM10")
        .await
        .unwrap();

    assert_eq!(history.station.id, 401);
    assert_eq!(history.sensor.id, 2747);
    assert_eq!(history.measurements.status, AggregationStatus::Exhausted);
    let values: Vec<Option<f64>> = history.measurements.items.iter().map(|m| m.value).collect();
    assert_eq!(values, vec![None, Some(42.7), Some(39.1)]);
}

#[tokio::test]
async fn test_v1_walk_keeps_pages_before_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/rest/station/findAll"))
        .and(query_param("page", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Lista stacji pomiarowych": [
                {"Identyfikator stacji": 1, "Nazwa stacji": "Opole, ul. Koszyka", "Nazwa miasta": "Opole"}
            ],
            "totalPages": 3
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/rest/station/findAll"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/rest/station/findAll"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = ApiConfig::builtin("v1").unwrap().with_base_url(server.uri());
    let client = AirQualityClient::new(config).unwrap();
    let stations = client.fetch_all_stations().await.unwrap();

    assert_eq!(stations.len(), 1);
    assert_eq!(stations.pages_fetched, 2);
    assert_eq!(
        stations.status,
        AggregationStatus::Failed {
            page: 1,
            reason: FetchFailure::NonSuccessStatus { status: 502 },
        }
    );
}

#[tokio::test]
async fn test_unreachable_host_is_failed_status() {
    // Nothing listens on the discard port
    let config = ApiConfig::builtin("legacy")
        .unwrap()
        .with_base_url("http://127.0.0.1:9");
    let client = AirQualityClient::new(config).unwrap();

    let stations = client.fetch_all_stations().await.unwrap();

    assert!(stations.is_empty());
    assert_eq!(stations.pages_fetched, 1);
    assert!(matches!(
        stations.status,
        AggregationStatus::Failed {
            page: 0,
            reason: FetchFailure::Transport { .. }
        }
    ));
}

// ============================================================================
// CLI Integration Tests
// ============================================================================

#[tokio::test]
async fn test_cli_cities_json() {
    let server = MockServer::start().await;
    mount_legacy_network(&server).await;

    let output = runner(&server, &["cities"]).render().await.unwrap();
    let body: Value = serde_json::from_str(&output).unwrap();

    assert_eq!(body["cities"], json!(["Gdańsk", "Kraków", "Wrocław"]));
    assert_eq!(body["status"]["status"], "exhausted");
}

#[tokio::test]
async fn test_cli_stations_pretty() {
    let server = MockServer::start().await;
    mount_legacy_network(&server).await;

    let output = runner(&server, &["-f", "pretty", "stations", "--city", "Kraków"])
        .render()
        .await
        .unwrap();
    let names: Vec<&str> = output
        .lines()
        .map(|line| line.split('\t').nth(1).unwrap())
        .collect();

    assert_eq!(names, vec!["Kraków, Aleja Krasińskiego", "Kraków, ul. Bujaka"]);
}

#[tokio::test]
async fn test_cli_sensors_json() {
    let server = MockServer::start().await;
    mount_legacy_network(&server).await;

    let output = runner(
        &server,
        &["sensors", "--city", "Kraków", "--station", "Kraków, ul. Bujaka"],
    )
    .render()
    .await
    .unwrap();
    let body: Value = serde_json::from_str(&output).unwrap();

    assert_eq!(body["station"]["id"], 401);
    assert_eq!(
        body["parameters"],
        json!(["pył zawieszony PM10", "dwutlenek siarki"])
    );
}

#[tokio::test]
async fn test_cli_measurements_pretty() {
    let server = MockServer::start().await;
    mount_legacy_network(&server).await;

    let output = runner(
        &server,
        &[
            "-f",
            "pretty",
            "measurements",
            "--city",
            "Kraków",
            "--station",
            "Kraków, ul. Bujaka",
            "--param",
            "PM10",
        ],
    )
    .render()
    .await
    .unwrap();
    let lines: Vec<&str> = output.lines().collect();

    assert!(lines[0].contains("3 readings"));
    assert_eq!(lines[1], "2024-03-01 13:00:00\t-");
    assert_eq!(lines[2], "2024-03-01 12:00:00\t42.7");
}

#[tokio::test]
async fn test_cli_measurements_json_carries_timestamps() {
    let server = MockServer::start().await;
    mount_legacy_network(&server).await;

    let output = runner(
        &server,
        &[
            "measurements",
            "--city",
            "Kraków",
            "--station",
            "Kraków, ul. Bujaka",
            "--param",
            "PM10",
        ],
    )
    .render()
    .await
    .unwrap();
    let body: Value = serde_json::from_str(&output).unwrap();
    let readings = &body["measurements"]["items"];

    assert_eq!(readings[0]["value"], json!(null));
    assert_eq!(readings[1]["timestamp"], "2024-03-01T12:00:00");
    assert_eq!(readings[1]["value"], 42.7);
}

#[tokio::test]
async fn test_cli_unknown_city() {
    let server = MockServer::start().await;
    mount_legacy_network(&server).await;

    let err = runner(&server, &["stations", "--city", "Poznań"])
        .render()
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NotFound { .. }));
    assert_eq!(err.to_string(), "City 'Poznań' not found");
}

#[tokio::test]
async fn test_cli_profiles_and_endpoints() {
    let output = Runner::new(Cli::parse_from(["airq", "profiles"]))
        .render()
        .await
        .unwrap();
    let body: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(body["profiles"], json!(["legacy", "v1"]));

    let output = Runner::new(Cli::parse_from(["airq", "-f", "pretty", "endpoints"]))
        .render()
        .await
        .unwrap();
    assert!(output.contains("name: v1"));
    assert!(output.contains("Lista stacji pomiarowych"));
}
