use release_notes::{GitHubClient, IssueTracker, KnownIssue, ReleaseNotesError};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer, token: Option<&str>) -> GitHubClient {
    GitHubClient::new(&server.uri(), "vitessio/vitess", token.map(str::to_string))
        .expect("Failed to create client")
}

#[tokio::test]
async fn test_fetch_pull_request_with_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/vitessio/vitess/pulls/9812"))
        .and(header("authorization", "Bearer secret"))
        .and(header("accept", "application/vnd.github+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "number": 9812,
            "title": "Fix a vtgate planner bug",
            "labels": [{"name": "Type: Bug"}, {"name": "Component: VTGate"}],
            "user": {"login": "frouioui"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let pr = client(&server, Some("secret"))
        .pull_request(9812)
        .await
        .expect("Failed to fetch pull request");

    assert_eq!(pr.number, 9812);
    assert_eq!(pr.title, "Fix a vtgate planner bug");
    assert_eq!(pr.labels[0].name, "Type: Bug");
    assert_eq!(pr.author.map(|a| a.login).as_deref(), Some("frouioui"));
}

#[tokio::test]
async fn test_missing_pull_request_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/vitessio/vitess/pulls/1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
        .mount(&server)
        .await;

    let err = client(&server, None)
        .pull_request(1)
        .await
        .expect_err("404 should fail");

    assert!(matches!(err, ReleaseNotesError::NotFound(_)));
}

#[tokio::test]
async fn test_server_error_is_a_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/vitessio/vitess/issues"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client(&server, None)
        .known_issues("v12.0.0")
        .await
        .expect_err("500 should fail");

    match err {
        ReleaseNotesError::Network(message) => {
            assert!(message.contains("500"), "unexpected message: {message}");
            assert!(message.contains("boom"), "unexpected message: {message}");
        }
        other => panic!("expected a network error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_a_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/vitessio/vitess/pulls/3"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client(&server, None)
        .pull_request(3)
        .await
        .expect_err("garbage body should fail");

    assert!(matches!(err, ReleaseNotesError::Network(_)));
}

#[tokio::test]
async fn test_known_issues_query_and_pull_request_filtering() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/vitessio/vitess/issues"))
        .and(query_param("state", "open"))
        .and(query_param("labels", "Known issue: v12"))
        .and(query_param("per_page", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"number": 9001, "title": "Schema tracking misses views"},
            {"number": 9002, "title": "Linked PR", "pull_request": {"url": "https://example.com"}},
            {"number": 8999, "title": "Backup hangs on large shards"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let issues = client(&server, None)
        .known_issues("v12.0.0")
        .await
        .expect("Failed to fetch known issues");

    assert_eq!(
        issues,
        vec![
            KnownIssue::new(9001, "Schema tracking misses views"),
            KnownIssue::new(8999, "Backup hangs on large shards"),
        ]
    );
}
