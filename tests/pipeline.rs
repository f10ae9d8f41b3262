//! End-to-end pipeline tests against an in-process stub of the aggregation API.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clusterview::view::NoticeKind;
use clusterview::{
    ApiClient, AreaState, ChartArea, FetchError, HtmlArea, MemoryArea, Outcome, ResultFetcher,
    UiEvent, ViewController,
};
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

enum StubReply {
    Json(Value),
    Status(u16),
    Raw(&'static str),
}

#[derive(Default)]
struct Stub {
    replies: Mutex<VecDeque<StubReply>>,
    generate_status: Mutex<Option<u16>>,
    seen_k: Mutex<Vec<String>>,
    generate_calls: Mutex<usize>,
}

impl Stub {
    fn new(replies: Vec<StubReply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            ..Default::default()
        })
    }

    fn seen_k(&self) -> Vec<String> {
        self.seen_k.lock().clone()
    }
}

async fn aggregate(
    State(stub): State<Arc<Stub>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    stub.seen_k
        .lock()
        .push(params.get("k").cloned().unwrap_or_default());
    let reply = stub.replies.lock().pop_front();
    match reply {
        Some(StubReply::Json(body)) => Json(body).into_response(),
        Some(StubReply::Status(code)) => {
            let status = StatusCode::from_u16(code).unwrap();
            (status, "stub failure").into_response()
        }
        Some(StubReply::Raw(body)) => body.into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn generate(State(stub): State<Arc<Stub>>) -> Response {
    *stub.generate_calls.lock() += 1;
    let status = *stub.generate_status.lock();
    match status {
        Some(code) => StatusCode::from_u16(code).unwrap().into_response(),
        None => Json(json!({ "status": "new data generated" })).into_response(),
    }
}

async fn spawn_stub(stub: Arc<Stub>) -> String {
    let app = Router::new()
        .route("/aggregate", get(aggregate))
        .route("/generate", post(generate))
        .route("/health", get(|| async { "OK" }))
        .with_state(stub);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn scenario_a() -> Value {
    json!([
        { "result": { "points": [
            { "x": 1, "y": 2, "cluster": 0 },
            { "x": 3, "y": 4, "cluster": 1 },
            { "x": 5, "y": 6, "cluster": 0 }
        ] } }
    ])
}

fn two_datasets() -> Value {
    json!([
        { "source": "KMeans Clustering", "delay": 3, "result": { "k": 2, "iterations": 4, "points": [
            { "x": 0.5, "y": 0.5, "cluster": 0 },
            { "x": 9.5, "y": 9.5, "cluster": 1 }
        ] } },
        { "source": "KMeans Clustering", "delay": 2, "result": { "k": 2, "iterations": 2, "points": [
            { "x": 1.0, "y": 1.0, "cluster": 1 }
        ] } }
    ])
}

async fn memory_controller(stub: Arc<Stub>) -> ViewController<ApiClient, MemoryArea> {
    let url = spawn_stub(stub).await;
    ViewController::new(ApiClient::new(url).unwrap(), MemoryArea::new())
}

#[tokio::test]
async fn test_scenario_a_end_to_end() {
    let stub = Stub::new(vec![StubReply::Json(scenario_a())]);
    let controller = memory_controller(stub.clone()).await;

    let dispatch = controller.dispatch(UiEvent::FetchClicked).await;
    assert_eq!(dispatch.outcome, Some(Outcome::Rendered { charts: 1 }));
    assert_eq!(stub.seen_k(), vec!["3"]);

    controller.with_area(|area| {
        let spec = &area.charts()[0].spec;
        assert_eq!(spec.title, "Dataset 1");
        let labels: Vec<&str> = spec.series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels.len(), 2);
        assert!(labels.contains(&"Cluster 1") && labels.contains(&"Cluster 2"));

        let first = spec.series.iter().find(|s| s.label == "Cluster 1").unwrap();
        let coords: Vec<(f64, f64)> = first.points.iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(coords, vec![(1.0, 2.0), (5.0, 6.0)]);
    });
}

#[tokio::test]
async fn test_scenario_b_refresh_replaces_charts() {
    let stub = Stub::new(vec![
        StubReply::Json(scenario_a()),
        StubReply::Json(two_datasets()),
    ]);
    let controller = memory_controller(stub.clone()).await;

    controller.dispatch(UiEvent::FetchClicked).await;
    controller.dispatch(UiEvent::KInput("2".to_string())).await;
    let dispatch = controller.dispatch(UiEvent::key("Enter")).await;

    assert!(dispatch.default_prevented);
    assert_eq!(dispatch.outcome, Some(Outcome::Rendered { charts: 2 }));
    assert_eq!(stub.seen_k(), vec!["3", "2"]);

    let area = controller.into_area();
    assert_eq!(area.chart_count(), 2);
    assert_eq!(area.created() - area.destroyed(), 2);
    assert_eq!(area.charts()[1].spec.title, "Dataset 2");
}

#[tokio::test]
async fn test_server_error_leaves_error_and_no_charts() {
    let stub = Stub::new(vec![StubReply::Json(scenario_a()), StubReply::Status(500)]);
    let controller = memory_controller(stub).await;

    controller.fetch_and_render(3).await;
    assert_eq!(controller.fetch_and_render(3).await, Outcome::ErrorDisplayed);
    assert_eq!(controller.state(), AreaState::ErrorDisplayed);

    controller.with_area(|area| {
        assert_eq!(area.chart_count(), 0);
        assert_eq!(area.notice().unwrap().kind, NoticeKind::Error);
    });
}

#[tokio::test]
async fn test_status_error_carries_code() {
    let stub = Stub::new(vec![StubReply::Status(502)]);
    let url = spawn_stub(stub).await;
    let client = ApiClient::new(url).unwrap();

    let err = client.aggregate(3).await.unwrap_err();
    assert_eq!(err.status(), Some(502));
    assert!(matches!(err, FetchError::Status { ref body, .. } if body == "stub failure"));
}

#[tokio::test]
async fn test_malformed_payload_shows_error() {
    let stub = Stub::new(vec![
        StubReply::Raw("definitely not json"),
        StubReply::Json(json!([{ "result": { "points": [{ "x": 1 }] } }])),
    ]);
    let url = spawn_stub(stub).await;
    let client = ApiClient::new(url).unwrap();

    let err = client.aggregate(3).await.unwrap_err();
    assert!(matches!(err, FetchError::MalformedPayload(_)));

    // Missing cluster label is also a shape error
    let controller = ViewController::new(client, MemoryArea::new());
    assert_eq!(controller.fetch_and_render(3).await, Outcome::ErrorDisplayed);
}

#[tokio::test]
async fn test_run_metadata_is_kept() {
    let stub = Stub::new(vec![StubReply::Json(two_datasets())]);
    let url = spawn_stub(stub).await;
    let client = ApiClient::new(url).unwrap();

    let datasets = client.aggregate(2).await.unwrap();
    assert_eq!(datasets.len(), 2);
    assert_eq!(datasets[0].run.source, "KMeans Clustering");
    assert_eq!(datasets[0].run.iterations, 4);
    assert_eq!(datasets[1].index, 1);
    assert_eq!(datasets[1].run.delay_ms, 2);
}

#[tokio::test]
async fn test_generate_then_fetch() {
    let stub = Stub::new(vec![StubReply::Json(two_datasets())]);
    let controller = memory_controller(stub.clone()).await;

    let dispatch = controller.dispatch(UiEvent::GenerateClicked).await;
    assert_eq!(dispatch.outcome, Some(Outcome::Rendered { charts: 2 }));
    assert_eq!(*stub.generate_calls.lock(), 1);
    assert_eq!(stub.seen_k(), vec!["3"]);
}

#[tokio::test]
async fn test_generate_failure_alerts_and_skips_fetch() {
    let stub = Stub::new(vec![StubReply::Json(scenario_a())]);
    *stub.generate_status.lock() = Some(500);
    let controller = memory_controller(stub.clone()).await;

    assert_eq!(controller.generate_and_fetch().await, Outcome::Alerted);
    assert!(stub.seen_k().is_empty());
    assert_eq!(controller.state(), AreaState::Idle);
    controller.with_area(|area| assert_eq!(area.alerts().len(), 1));
}

#[tokio::test]
async fn test_health_check() {
    let url = spawn_stub(Stub::new(vec![])).await;
    let client = ApiClient::new(url).unwrap();
    assert_eq!(client.health_check().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_html_page_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("charts.html");
    let stub = Stub::new(vec![StubReply::Json(two_datasets()), StubReply::Status(500)]);
    let url = spawn_stub(stub).await;
    let controller = ViewController::new(ApiClient::new(url).unwrap(), HtmlArea::new(&path));

    assert_eq!(
        controller.fetch_and_render(2).await,
        Outcome::Rendered { charts: 2 }
    );
    let page = std::fs::read_to_string(&path).unwrap();
    assert_eq!(page.matches("<canvas").count(), 2);
    assert!(!page.contains("Loading data..."));

    assert_eq!(controller.fetch_and_render(2).await, Outcome::ErrorDisplayed);
    let page = std::fs::read_to_string(&path).unwrap();
    assert_eq!(page.matches("<canvas").count(), 0);
    assert!(page.contains("Error fetching data. Is the API running?"));
}

#[tokio::test]
async fn test_unwritable_page_reports_error() {
    let dir = tempfile::tempdir().unwrap();
    let stub = Stub::new(vec![StubReply::Json(scenario_a())]);
    let url = spawn_stub(stub).await;
    let controller = ViewController::new(ApiClient::new(url).unwrap(), HtmlArea::new(dir.path()));

    let dispatch = controller.dispatch(UiEvent::FetchClicked).await;
    assert_eq!(dispatch.outcome, Some(Outcome::ErrorDisplayed));
    assert_eq!(controller.state(), AreaState::ErrorDisplayed);
    assert!(!dir.path().join("charts.html").exists());
    controller.with_area(|area| assert_eq!(area.chart_count(), 0));
}
