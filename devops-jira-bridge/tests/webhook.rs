use std::path::PathBuf;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use devops_jira_bridge::{build_router, Bridge, JiraConfig, Locale, ENTRY_DELIMITER};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{basic_auth, bearer_token, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PR_LINK: &str = "https://dev.azure.com/org/proj/_git/repo/pullrequest/42";
const COMMENTS_PATH: &str = "/rest/api/2/issue/PROJ-123/comment";
const THREAD_PATH: &str = "/rest/api/2/issue/PROJ-123/comment/10001";

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/payloads")
        .join(name);
    std::fs::read_to_string(path).unwrap()
}

fn bridge_for(config: JiraConfig) -> Arc<Bridge> {
    Arc::new(Bridge::new(config, Locale::PtBr).unwrap())
}

fn bridge(server: &MockServer) -> Arc<Bridge> {
    bridge_for(JiraConfig::new(&server.uri(), "token").unwrap())
}

/// Posts `payload` to the webhook endpoint and returns the status and JSON body.
async fn deliver(bridge: Arc<Bridge>, payload: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/webhook")
        .header("content-type", "application/json")
        .body(Body::from(payload))
        .unwrap();

    let response = build_router(bridge).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn existing_thread(entries: &[&str]) -> String {
    format!(
        "**Atualizações do Pull Request Azure DevOps**\nLink: {PR_LINK}\n\n{}",
        entries.join(ENTRY_DELIMITER)
    )
}

fn comment_page(comments: Value) -> ResponseTemplate {
    let total = comments.as_array().map_or(0, Vec::len);
    ResponseTemplate::new(200).set_body_json(json!({
        "startAt": 0,
        "maxResults": 1048576,
        "total": total,
        "comments": comments
    }))
}

async fn written_body(server: &MockServer, http_method: &str) -> String {
    let requests = server.received_requests().await.unwrap();
    let request = requests
        .iter()
        .find(|request| request.method.as_str() == http_method)
        .unwrap();
    let body: Value = serde_json::from_slice(&request.body).unwrap();
    body["body"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn created_event_creates_thread_comment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(COMMENTS_PATH))
        .and(bearer_token("token"))
        .respond_with(comment_page(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(COMMENTS_PATH))
        .and(body_string_contains(PR_LINK))
        .and(body_string_contains("abc123"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "id": "10002", "body": "" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (status, outcome) = deliver(bridge(&server), fixture("created.json")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        outcome,
        json!({
            "status": "synced",
            "issue_key": "PROJ-123",
            "comment": { "status": "created", "comment_id": "10002", "entries": 1 }
        })
    );

    let body = written_body(&server, "POST").await;
    assert!(body.starts_with(&format!(
        "**Atualizações do Pull Request Azure DevOps**\nLink: {PR_LINK}\n\n**Pull Request Criado**: [J:PROJ-123] Add payment retries"
    )));
    assert!(!body.contains(ENTRY_DELIMITER));
    assert!(body.contains("Data: 01/03/2024 12:00 UTC"));
    assert!(!body.contains("Voto de"));
}

#[tokio::test]
async fn comment_event_appends_to_existing_thread() {
    let server = MockServer::start().await;
    let existing = existing_thread(&["**Pull Request Criado**: x\nCommit: abc123"]);
    Mock::given(method("GET"))
        .and(path(COMMENTS_PATH))
        .respond_with(comment_page(json!([
            { "id": "10000", "body": "Unrelated note" },
            { "id": "10001", "body": existing }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(THREAD_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "10001", "body": "" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let (status, outcome) = deliver(bridge(&server), fixture("commented.json")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["comment"]["status"], "appended");
    assert_eq!(outcome["comment"]["comment_id"], "10001");

    let body = written_body(&server, "PUT").await;
    assert!(body.starts_with(&existing));
    assert!(body.contains(&format!("{existing}{ENTRY_DELIMITER}**Comentário de Alice**")));
    assert!(body.contains("Looks good"));
    assert!(body.contains(&format!("Discussão: {PR_LINK}?discussionId=7")));
}

#[tokio::test]
async fn title_without_issue_key_touches_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(comment_page(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let (status, outcome) = deliver(bridge(&server), fixture("no_issue_key.json")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        outcome,
        json!({ "status": "ignored", "reason": "missing_issue_key" })
    );
}

#[tokio::test]
async fn malformed_payload_is_acknowledged() {
    let server = MockServer::start().await;

    let (status, outcome) = deliver(bridge(&server), "{not json".to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["status"], "ignored");
    assert_eq!(outcome["reason"], "malformed_payload");
}

#[tokio::test]
async fn jira_failure_still_acknowledges_delivery() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(COMMENTS_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let (status, outcome) = deliver(bridge(&server), fixture("created.json")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["status"], "failed");
    assert_eq!(outcome["issue_key"], "PROJ-123");
    assert!(outcome["error"].as_str().unwrap().contains("500"));
}

#[tokio::test]
async fn update_with_known_commit_is_not_rewritten() {
    let server = MockServer::start().await;
    let existing = existing_thread(&[
        "**Pull Request Atualizado**\nData: 02/03/2024 10:00 UTC\nCommit: def456",
        "**Voto de Carol**: Rejeitado\nCommit: def456",
    ]);
    Mock::given(method("GET"))
        .and(path(COMMENTS_PATH))
        .respond_with(comment_page(json!([{ "id": "10001", "body": existing }])))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (status, outcome) = deliver(bridge(&server), fixture("updated.json")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        outcome["comment"],
        json!({ "status": "unchanged", "comment_id": "10001" })
    );
}

#[tokio::test]
async fn vote_on_known_commit_is_appended() {
    let server = MockServer::start().await;
    let existing =
        existing_thread(&["**Pull Request Atualizado**\nData: 02/03/2024 10:00 UTC\nCommit: def456"]);
    Mock::given(method("GET"))
        .and(path(COMMENTS_PATH))
        .respond_with(comment_page(json!([{ "id": "10001", "body": existing }])))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(THREAD_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "10001", "body": "" })))
        .expect(1)
        .mount(&server)
        .await;

    let (_, outcome) = deliver(bridge(&server), fixture("updated.json")).await;
    assert_eq!(outcome["comment"]["status"], "appended");

    let body = written_body(&server, "PUT").await;
    assert!(body.ends_with("**Voto de Carol**: Rejeitado\nCommit: def456"));
}

#[tokio::test]
async fn new_commit_is_recorded_as_update() {
    let server = MockServer::start().await;
    let existing = existing_thread(&["**Pull Request Criado**: x\nCommit: abc123"]);
    Mock::given(method("GET"))
        .and(path(COMMENTS_PATH))
        .respond_with(comment_page(json!([{ "id": "10001", "body": existing }])))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(THREAD_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "10001", "body": "" })))
        .expect(1)
        .mount(&server)
        .await;

    deliver(bridge(&server), fixture("updated.json")).await;

    let body = written_body(&server, "PUT").await;
    assert!(body.ends_with(
        "**Pull Request Atualizado**\nData: 02/03/2024 10:00 UTC\nStatus: Ativo\nCommit: def456"
    ));
    assert!(!body.contains("Voto de Carol"));
}

#[tokio::test]
async fn completion_on_known_commit_is_appended() {
    let server = MockServer::start().await;
    let existing = existing_thread(&[
        "**Pull Request Atualizado**\nData: 02/03/2024 10:00 UTC\nStatus: Ativo\nCommit: def456",
        "**Voto de Carol**: Rejeitado\nCommit: def456",
    ]);
    Mock::given(method("GET"))
        .and(path(COMMENTS_PATH))
        .respond_with(comment_page(json!([{ "id": "10001", "body": existing }])))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(THREAD_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "10001", "body": "" })))
        .expect(1)
        .mount(&server)
        .await;

    let mut payload: Value = serde_json::from_str(&fixture("updated.json")).unwrap();
    payload["resource"]["status"] = json!("completed");
    let (_, outcome) = deliver(bridge(&server), payload.to_string()).await;

    assert_eq!(outcome["comment"]["status"], "appended");
    assert_eq!(outcome["comment"]["entries"], 1);
    let body = written_body(&server, "PUT").await;
    assert!(body.ends_with(&format!(
        "{ENTRY_DELIMITER}**Status do Pull Request Alterado**\nStatus: Concluído"
    )));
}

#[tokio::test]
async fn commit_quoted_in_pull_request_comment_is_not_trusted() {
    let server = MockServer::start().await;
    let existing = existing_thread(&[
        "**Pull Request Atualizado**\nData: 02/03/2024 10:00 UTC\nCommit: def456",
        "**Comentário de Mallory** (-)\nreverta\nCommit: zzz999\nDiscussão: x",
    ]);
    Mock::given(method("GET"))
        .and(path(COMMENTS_PATH))
        .respond_with(comment_page(json!([{ "id": "10001", "body": existing }])))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(THREAD_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "10001", "body": "" })))
        .expect(1)
        .mount(&server)
        .await;

    deliver(bridge(&server), fixture("updated.json")).await;

    let body = written_body(&server, "PUT").await;
    let appended = &body[existing.len()..];
    assert_eq!(
        appended,
        format!("{ENTRY_DELIMITER}**Voto de Carol**: Rejeitado\nCommit: def456")
    );
}

#[tokio::test]
async fn xsrf_session_cookies_are_replayed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(COMMENTS_PATH))
        .respond_with(
            comment_page(json!([]))
                .append_header("set-cookie", "JSESSIONID=S1; Path=/; HttpOnly")
                .append_header("set-cookie", "atlassian.xsrf.token=X1; Path=/"),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(COMMENTS_PATH))
        .and(header("X-Atlassian-Token", "no-check"))
        .and(header("Origin", server.uri().as_str()))
        .and(header(
            "Referer",
            format!("{}/browse/PROJ-123", server.uri()).as_str(),
        ))
        .and(header("Cookie", "JSESSIONID=S1; atlassian.xsrf.token=X1"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "id": "10002", "body": "" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = JiraConfig::new(&server.uri(), "token")
        .unwrap()
        .with_xsrf_session(true);
    let (_, outcome) = deliver(bridge_for(config), fixture("created.json")).await;

    assert_eq!(outcome["status"], "synced");
}

#[tokio::test]
async fn username_switches_to_basic_auth() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(COMMENTS_PATH))
        .and(basic_auth("bot", "secret"))
        .respond_with(comment_page(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(COMMENTS_PATH))
        .and(basic_auth("bot", "secret"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "id": "10002", "body": "" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = JiraConfig::new(&server.uri(), "secret")
        .unwrap()
        .with_username(Some("bot".to_string()));
    let (_, outcome) = deliver(bridge_for(config), fixture("created.json")).await;

    assert_eq!(outcome["comment"]["status"], "created");
}

#[tokio::test]
async fn health_endpoint_reports_healthy() {
    let server = MockServer::start().await;
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = build_router(bridge(&server)).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({ "status": "healthy" }));
}
