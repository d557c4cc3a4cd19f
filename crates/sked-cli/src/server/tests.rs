use salvo::http::StatusCode;
use salvo::test::{ResponseExt, TestClient};
use salvo::Service;
use serde_json::{json, Value};
use sked_core::db::establish_connection;
use sked_core::repository::SqliteRepository;
use std::sync::Arc;
use tempfile::TempDir;

use super::router;
use crate::config::Config;
use crate::util::today;

const BASE: &str = "http://127.0.0.1:5800";

struct TestServer {
    service: Service,
    _temp_dir: TempDir,
}

async fn setup(password: Option<&str>) -> TestServer {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("test.db");
    let web_dir = temp_dir.path().join("web");
    std::fs::create_dir_all(&web_dir).unwrap();
    std::fs::write(web_dir.join("index.html"), "<h1>sked</h1>").unwrap();

    let pool = establish_connection(&db_path.to_string_lossy()).await.unwrap();
    let config = Config {
        web_dir: web_dir.to_string_lossy().into_owned(),
        password: password.map(str::to_string),
        jwt_secret: "test-secret".to_string(),
        ..Config::default()
    };

    let service = Service::new(router(Arc::new(config), Arc::new(SqliteRepository::new(pool))));
    TestServer {
        service,
        _temp_dir: temp_dir,
    }
}

impl TestServer {
    async fn get_text(&self, path: &str) -> (Option<StatusCode>, String) {
        let mut resp = TestClient::get(format!("{BASE}{path}")).send(&self.service).await;
        (resp.status_code, resp.take_string().await.unwrap())
    }

    async fn get_json(&self, path: &str) -> (Option<StatusCode>, Value) {
        let mut resp = TestClient::get(format!("{BASE}{path}")).send(&self.service).await;
        (resp.status_code, resp.take_json().await.unwrap())
    }
}

#[test_log::test(tokio::test)]
async fn test_nextdate_returns_plain_date() {
    let server = setup(None).await;

    let cases = [
        ("now=20240105&date=20240101&repeat=d%203", "20240107"),
        ("now=20250301&date=20240229&repeat=y", "20260301"),
        ("now=20240103&date=20240101&repeat=w%207", "20240107"),
        ("now=20250201&date=20250101&repeat=m%20-1%202", "20250228"),
    ];
    for (query, expected) in cases {
        let (status, body) = server.get_text(&format!("/api/nextdate?{query}")).await;
        assert_eq!(status, Some(StatusCode::OK), "{query}");
        assert_eq!(body, expected);
    }
}

#[tokio::test]
async fn test_nextdate_errors_are_bad_requests() {
    let server = setup(None).await;

    let cases = [
        ("now=20240105&date=20240101&repeat=d%20401", "invalid interval"),
        ("now=20240105&date=20240101&repeat=x%201", "unsupported repeat rule"),
        ("now=20240105&date=20240101&repeat=", "repeat rule is empty"),
        ("now=20240105&date=2024-01-01&repeat=y", "invalid date"),
        ("now=tomorrow&date=20240101&repeat=y", "invalid date"),
    ];
    for (query, message) in cases {
        let (status, body) = server.get_text(&format!("/api/nextdate?{query}")).await;
        assert_eq!(status, Some(StatusCode::BAD_REQUEST), "{query}");
        assert!(body.contains(message), "{query}: {body}");
    }
}

#[tokio::test]
async fn test_nextdate_defaults_now_to_today() {
    let server = setup(None).await;
    let today = today();

    let (status, body) = server
        .get_text(&format!("/api/nextdate?date={today}&repeat=d%201"))
        .await;
    assert_eq!(status, Some(StatusCode::OK));
    assert_eq!(body, today.add_days(1).unwrap().to_string());
}

#[test_log::test(tokio::test)]
async fn test_task_lifecycle() {
    let server = setup(None).await;

    let mut resp = TestClient::post(format!("{BASE}/api/task"))
        .json(&json!({"date": "29990101", "title": "Gym", "comment": "legs", "repeat": "d 7"}))
        .send(&server.service)
        .await;
    assert_eq!(resp.status_code, Some(StatusCode::OK));
    let created: Value = resp.take_json().await.unwrap();
    let id = created["id"].as_str().unwrap().to_string();

    let (status, task) = server.get_json(&format!("/api/task?id={id}")).await;
    assert_eq!(status, Some(StatusCode::OK));
    assert_eq!(task["id"], id.as_str());
    assert_eq!(task["date"], "29990101");
    assert_eq!(task["repeat"], "d 7");

    let mut resp = TestClient::put(format!("{BASE}/api/task"))
        .json(&json!({"id": id, "date": "29990102", "title": "Gym", "comment": "arms", "repeat": "d 7"}))
        .send(&server.service)
        .await;
    assert_eq!(resp.status_code, Some(StatusCode::OK));
    assert_eq!(resp.take_json::<Value>().await.unwrap(), json!({}));

    let (_, list) = server.get_json("/api/tasks?search=arms").await;
    assert_eq!(list["tasks"].as_array().unwrap().len(), 1);
    let (_, list) = server.get_json("/api/tasks?search=02.01.2999").await;
    assert_eq!(list["tasks"][0]["title"], "Gym");

    let resp = TestClient::post(format!("{BASE}/api/task/done?id={id}"))
        .send(&server.service)
        .await;
    assert_eq!(resp.status_code, Some(StatusCode::OK));
    let (_, task) = server.get_json(&format!("/api/task?id={id}")).await;
    assert_eq!(task["date"], "29990109");

    let resp = TestClient::delete(format!("{BASE}/api/task?id={id}"))
        .send(&server.service)
        .await;
    assert_eq!(resp.status_code, Some(StatusCode::OK));

    let (status, body) = server.get_json(&format!("/api/task?id={id}")).await;
    assert_eq!(status, Some(StatusCode::NOT_FOUND));
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_done_removes_one_off_task() {
    let server = setup(None).await;

    let mut resp = TestClient::post(format!("{BASE}/api/task"))
        .json(&json!({"title": "Buy milk"}))
        .send(&server.service)
        .await;
    let created: Value = resp.take_json().await.unwrap();
    let id = created["id"].as_str().unwrap().to_string();

    let (_, task) = server.get_json(&format!("/api/task?id={id}")).await;
    assert_eq!(task["date"], today().to_string());

    TestClient::post(format!("{BASE}/api/task/done?id={id}"))
        .send(&server.service)
        .await;
    let (status, _) = server.get_json(&format!("/api/task?id={id}")).await;
    assert_eq!(status, Some(StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn test_invalid_task_payloads_are_rejected() {
    let server = setup(None).await;

    let bodies = [
        json!({"date": "29990101", "title": ""}),
        json!({"date": "01.01.2999", "title": "Bad date"}),
        json!({"date": "29990101", "title": "Bad rule", "repeat": "w 9"}),
    ];
    for body in bodies {
        let mut resp = TestClient::post(format!("{BASE}/api/task"))
            .json(&body)
            .send(&server.service)
            .await;
        assert_eq!(resp.status_code, Some(StatusCode::BAD_REQUEST), "{body}");
        let error: Value = resp.take_json().await.unwrap();
        assert!(error["error"].is_string());
    }

    let mut resp = TestClient::put(format!("{BASE}/api/task"))
        .json(&json!({"title": "No id"}))
        .send(&server.service)
        .await;
    assert_eq!(resp.status_code, Some(StatusCode::BAD_REQUEST));
    let error: Value = resp.take_json().await.unwrap();
    assert_eq!(error["error"], "Invalid input: task id is required");

    let (status, _) = server.get_json("/api/task").await;
    assert_eq!(status, Some(StatusCode::BAD_REQUEST));
}

#[test_log::test(tokio::test)]
async fn test_password_protects_task_api() {
    let server = setup(Some("open-sesame")).await;

    let resp = TestClient::get(format!("{BASE}/api/tasks")).send(&server.service).await;
    assert_eq!(resp.status_code, Some(StatusCode::UNAUTHORIZED));

    // The diagnostic endpoint stays open.
    let (status, _) = server
        .get_text("/api/nextdate?now=20240105&date=20240101&repeat=d%203")
        .await;
    assert_eq!(status, Some(StatusCode::OK));

    let mut resp = TestClient::post(format!("{BASE}/api/signin"))
        .json(&json!({"password": "wrong"}))
        .send(&server.service)
        .await;
    assert_eq!(resp.status_code, Some(StatusCode::UNAUTHORIZED));
    let body: Value = resp.take_json().await.unwrap();
    assert_eq!(body["error"], "wrong password");

    let mut resp = TestClient::post(format!("{BASE}/api/signin"))
        .json(&json!({"password": "open-sesame"}))
        .send(&server.service)
        .await;
    assert_eq!(resp.status_code, Some(StatusCode::OK));
    let body: Value = resp.take_json().await.unwrap();
    let token = body["token"].as_str().unwrap().to_string();

    let mut resp = TestClient::get(format!("{BASE}/api/tasks"))
        .add_header("Cookie", format!("token={token}"), true)
        .send(&server.service)
        .await;
    assert_eq!(resp.status_code, Some(StatusCode::OK));
    let body: Value = resp.take_json().await.unwrap();
    assert_eq!(body, json!({"tasks": []}));

    let resp = TestClient::get(format!("{BASE}/api/tasks"))
        .add_header("Cookie", "token=forged", true)
        .send(&server.service)
        .await;
    assert_eq!(resp.status_code, Some(StatusCode::UNAUTHORIZED));
}

#[tokio::test]
async fn test_signin_without_configured_password() {
    let server = setup(None).await;

    let mut resp = TestClient::post(format!("{BASE}/api/signin"))
        .json(&json!({"password": "anything"}))
        .send(&server.service)
        .await;
    assert_eq!(resp.status_code, Some(StatusCode::BAD_REQUEST));
    let body: Value = resp.take_json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("not configured"));
}

#[tokio::test]
async fn test_static_front_end_is_served() {
    let server = setup(None).await;

    let (status, body) = server.get_text("/").await;
    assert_eq!(status, Some(StatusCode::OK));
    assert!(body.contains("<h1>sked</h1>"));

    let (status, body) = server.get_text("/index.html").await;
    assert_eq!(status, Some(StatusCode::OK));
    assert!(body.contains("sked"));
}
