use anyhow::Result;
use httpmock::prelude::*;
use quake_report::utils::validation::Validate;
use quake_report::{
    fetch_earthquake_data, AlwaysOnline, DnsProbe, FeedLoader, FeedPipeline, HttpFetcher,
    LoadState, OutputFormat, ReportEngine, Settings, TerminalPresenter,
};
use tokio_test::assert_ok;

const THREE_FEATURES: &str = include_str!("fixtures/three_features.geojson");

fn settings_for(server: &MockServer, extra: &str) -> Settings {
    let toml_content = format!(
        "[source]\nendpoint = \"{}\"\n{}",
        server.url("/fdsnws/event/1/query"),
        extra
    );
    let settings = assert_ok!(Settings::from_toml_str(&toml_content));
    assert_ok!(settings.validate());
    settings
}

async fn run_report(url: &str, format: OutputFormat) -> (LoadState, String) {
    let fetcher = HttpFetcher::new().unwrap();
    let loader = FeedLoader::new(FeedPipeline::new(fetcher, AlwaysOnline));
    let mut engine = ReportEngine::new(loader, TerminalPresenter::new(Vec::new(), format));

    let state = engine.refresh(url).await.unwrap();
    let output = String::from_utf8(engine.into_presenter().into_inner()).unwrap();
    (state, output)
}

#[tokio::test]
async fn test_end_to_end_three_features_in_order() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/fdsnws/event/1/query");
        then.status(200)
            .header("Content-Type", "application/json")
            .body(THREE_FEATURES);
    });

    let settings = settings_for(&server, "");
    let (state, output) = run_report(&settings.request_url().unwrap(), OutputFormat::Table).await;

    api_mock.assert();
    let records = state.records();
    assert_eq!(records.len(), 3);

    assert_eq!(records[0].magnitude(), 7.2);
    assert_eq!(records[0].place(), "88km N of Yelizovo, Russia");
    assert_eq!(records[0].time_ms(), 1454124312220);
    assert_eq!(
        records[0].url(),
        "https://earthquake.usgs.gov/earthquakes/eventpage/us20004vvx"
    );
    assert_eq!(records[1].place(), "94km SSE of Taron, Papua New Guinea");
    assert_eq!(records[2].place(), "Mid-Atlantic Ridge");

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("7.2"));
    assert!(lines[0].contains("Yelizovo, Russia"));
    assert!(lines[2].contains("Near the"));
}

#[tokio::test]
async fn test_request_carries_query_preferences() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/fdsnws/event/1/query")
            .query_param("format", "geojson")
            .query_param("limit", "3")
            .query_param("minmag", "4.5")
            .query_param("orderby", "magnitude");
        then.status(200).body(THREE_FEATURES);
    });

    let settings = settings_for(
        &server,
        "[query]\nmin_magnitude = \"4.5\"\norder_by = \"magnitude\"\nlimit = 3\n",
    );
    let (state, _) = run_report(&settings.request_url().unwrap(), OutputFormat::Json).await;

    api_mock.assert();
    assert_eq!(state.records().len(), 3);
}

#[tokio::test]
async fn test_server_error_renders_empty_state() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/fdsnws/event/1/query");
        then.status(503).body("Service Unavailable");
    });

    let settings = settings_for(&server, "");
    let (state, output) = run_report(&settings.request_url().unwrap(), OutputFormat::Table).await;

    api_mock.assert();
    assert_eq!(state, LoadState::Empty);
    assert_eq!(output, "No earthquakes found.\n");
}

#[tokio::test]
async fn test_malformed_feature_discards_whole_batch() {
    let server = MockServer::start();
    let body = serde_json::json!({
        "features": [
            {"properties": {"mag": 5.1, "place": "Fine", "time": 1, "url": "https://example.com/1"}},
            {"properties": {"mag": 5.2, "place": "No url", "time": 2}}
        ]
    });
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/fdsnws/event/1/query");
        then.status(200).json_body(body);
    });

    let settings = settings_for(&server, "");
    let (state, output) = run_report(&settings.request_url().unwrap(), OutputFormat::Csv).await;

    api_mock.assert();
    assert_eq!(state, LoadState::Empty);
    assert_eq!(output, "No earthquakes found.\n");
}

#[tokio::test]
async fn test_refused_connection_is_empty_not_an_error() {
    let (state, _) = run_report("http://127.0.0.1:1/query", OutputFormat::Table).await;
    assert_eq!(state, LoadState::Empty);
}

#[tokio::test]
async fn test_unresolvable_host_reports_no_network() {
    let fetcher = HttpFetcher::new().unwrap();
    let loader = FeedLoader::new(FeedPipeline::new(fetcher, DnsProbe::default()));
    let mut engine = ReportEngine::new(
        loader,
        TerminalPresenter::new(Vec::new(), OutputFormat::Table),
    );

    let state = engine.refresh("https://quakes.invalid/query").await.unwrap();
    assert_eq!(state, LoadState::NoNetwork);

    let output = String::from_utf8(engine.into_presenter().into_inner()).unwrap();
    assert_eq!(output, "No internet connection.\n");
}

#[tokio::test]
async fn test_fetch_earthquake_data_directly() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/feed");
        then.status(200).body(THREE_FEATURES);
    });

    let fetcher = HttpFetcher::new()?;
    let earthquakes = fetch_earthquake_data(&fetcher, &server.url("/feed")).await;

    api_mock.assert();
    let magnitudes: Vec<f64> = earthquakes.iter().map(|e| e.magnitude()).collect();
    assert_eq!(magnitudes, vec![7.2, 6.1, 6.3]);
    Ok(())
}
