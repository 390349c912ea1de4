//! GitHub client tests against a mock API server

use codeuw::adapters::github::{GitHubClient, TrackerError};
use codeuw::core::models::{NewIssue, RepoSlug};
use codeuw::core::ports::IssueTracker;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "ghp_test";

fn client(server: &MockServer) -> GitHubClient {
    GitHubClient::new(TOKEN, server.uri()).unwrap()
}

fn slug() -> RepoSlug {
    "org/proj".parse().unwrap()
}

fn issue_json(number: u64, labels: &[&str]) -> Value {
    json!({
        "number": number,
        "title": format!("Issue {number}"),
        "body": "Some details",
        "state": "open",
        "html_url": format!("https://github.com/org/proj/issues/{number}"),
        "user": { "login": "maintainer" },
        "labels": labels.iter().map(|l| json!({ "name": l })).collect::<Vec<_>>(),
    })
}

#[tokio::test]
async fn test_requests_carry_auth_and_api_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/org/proj"))
        .and(header("authorization", "Bearer ghp_test"))
        .and(header("accept", "application/vnd.github+json"))
        .and(header("x-github-api-version", "2022-11-28"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "full_name": "org/proj",
            "html_url": "https://github.com/org/proj",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let url = client(&server).repository_url(&slug()).await.unwrap();

    assert_eq!(url, "https://github.com/org/proj");
}

#[tokio::test]
async fn test_labelled_issues_filter_by_label_and_drop_pull_requests() {
    let server = MockServer::start().await;
    let mut pull = issue_json(2, &["codeuw"]);
    pull["pull_request"] = json!({ "url": "https://api.github.com/repos/org/proj/pulls/2" });
    Mock::given(method("GET"))
        .and(path("/repos/org/proj/issues"))
        .and(query_param("state", "open"))
        .and(query_param("labels", "codeuw"))
        .and(query_param("per_page", "100"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([issue_json(1, &["codeuw"]), pull])),
        )
        .mount(&server)
        .await;

    let issues = client(&server).labelled_issues(&slug(), "codeuw").await.unwrap();

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].number, 1);
    assert_eq!(issues[0].author, "maintainer");
    assert_eq!(issues[0].labels, vec!["codeuw"]);
}

#[tokio::test]
async fn test_listing_follows_pagination() {
    let server = MockServer::start().await;
    let first: Vec<Value> = (1..=100).map(|n| issue_json(n, &[])).collect();
    Mock::given(method("GET"))
        .and(path("/repos/org/proj/issues"))
        .and(query_param("state", "all"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(first)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/org/proj/issues"))
        .and(query_param("state", "all"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([issue_json(101, &[])])))
        .expect(1)
        .mount(&server)
        .await;

    let issues = client(&server).all_issues(&slug()).await.unwrap();

    assert_eq!(issues.len(), 101);
    assert_eq!(issues[100].number, 101);
}

#[tokio::test]
async fn test_deleted_author_becomes_ghost() {
    let server = MockServer::start().await;
    let mut orphan = issue_json(5, &["codeuw"]);
    orphan["user"] = Value::Null;
    orphan["body"] = Value::Null;
    Mock::given(method("GET"))
        .and(path("/repos/org/proj/issues"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([orphan])))
        .mount(&server)
        .await;

    let issues = client(&server).labelled_issues(&slug(), "codeuw").await.unwrap();

    assert_eq!(issues[0].author, "ghost");
    assert_eq!(issues[0].body, None);
}

#[tokio::test]
async fn test_file_contents_are_fetched_raw() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/uw-ssec/codeuw/contents/.github/ISSUE_TEMPLATE/task.yml"))
        .and(header("accept", "application/vnd.github.raw+json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("name: Task\n"))
        .mount(&server)
        .await;

    let hub: RepoSlug = "uw-ssec/codeuw".parse().unwrap();
    let text = client(&server)
        .file_contents(&hub, ".github/ISSUE_TEMPLATE/task.yml")
        .await
        .unwrap();

    assert_eq!(text, "name: Task\n");
}

#[tokio::test]
async fn test_file_request_sends_a_single_accept_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("name: Task\n"))
        .mount(&server)
        .await;

    client(&server)
        .file_contents(&slug(), ".github/ISSUE_TEMPLATE/task.yml")
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let accept: Vec<&str> = requests[0]
        .headers
        .get_all("accept")
        .iter()
        .map(|v| v.to_str().unwrap())
        .collect();
    assert_eq!(accept, vec!["application/vnd.github.raw+json"]);
}

#[tokio::test]
async fn test_api_requests_send_a_single_accept_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    client(&server).all_issues(&slug()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let accept: Vec<&str> = requests[0]
        .headers
        .get_all("accept")
        .iter()
        .map(|v| v.to_str().unwrap())
        .collect();
    assert_eq!(accept, vec!["application/vnd.github+json"]);
}

#[tokio::test]
async fn test_create_issue_posts_title_body_and_labels() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/repos/uw-ssec/codeuw/issues"))
        .and(body_json(json!({
            "title": "[Task]: Project - Issue 1",
            "body": "### Contact\n\n@maintainer\n\n",
            "labels": ["task"],
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "number": 42,
            "html_url": "https://github.com/uw-ssec/codeuw/issues/42",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let hub: RepoSlug = "uw-ssec/codeuw".parse().unwrap();
    let created = client(&server)
        .create_issue(
            &hub,
            &NewIssue {
                title: "[Task]: Project - Issue 1".to_string(),
                body: "### Contact\n\n@maintainer\n\n".to_string(),
                labels: vec!["task".to_string()],
            },
        )
        .await
        .unwrap();

    assert_eq!(created.number, 42);
    assert_eq!(created.html_url, "https://github.com/uw-ssec/codeuw/issues/42");
}

#[tokio::test]
async fn test_bad_credentials_are_an_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/org/proj"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Bad credentials" })),
        )
        .mount(&server)
        .await;

    let err = client(&server).get_repository(&slug()).await.unwrap_err();

    assert!(err.is_auth());
    assert!(err.to_string().contains("Bad credentials"));
}

#[tokio::test]
async fn test_auth_error_survives_the_port() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Resource not accessible"))
        .mount(&server)
        .await;

    let err = client(&server).all_issues(&slug()).await.unwrap_err();

    let tracker_err = err.downcast_ref::<TrackerError>().unwrap();
    assert!(tracker_err.is_auth());
}

#[tokio::test]
async fn test_exhausted_rate_limit_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("x-ratelimit-remaining", "0")
                .insert_header("x-ratelimit-reset", "1700000000"),
        )
        .mount(&server)
        .await;

    let err = client(&server).get_repository(&slug()).await.unwrap_err();

    match err {
        TrackerError::RateLimited { reset } => assert!(reset.starts_with("2023-11-14T22:13:20")),
        other => panic!("expected rate limit error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_repository_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client(&server).get_repository(&slug()).await.unwrap_err();

    assert!(matches!(err, TrackerError::NotFound(url) if url.ends_with("/repos/org/proj")));
}

#[tokio::test]
async fn test_server_error_carries_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let hub: RepoSlug = "uw-ssec/codeuw".parse().unwrap();
    let err = client(&server)
        .create_issue(
            &hub,
            &NewIssue {
                title: "t".to_string(),
                body: "b".to_string(),
                labels: Vec::new(),
            },
        )
        .await
        .unwrap_err();

    let tracker_err = err.downcast_ref::<TrackerError>().unwrap();
    assert!(matches!(tracker_err, TrackerError::Status { status: 502, .. }));
    assert!(!tracker_err.is_auth());
}

#[tokio::test]
async fn test_unexpected_payload_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "unexpected": true })))
        .mount(&server)
        .await;

    let err = client(&server).list_issues(&slug(), "open", None).await.unwrap_err();

    assert!(matches!(err, TrackerError::Decode { .. }));
}

// =============================================================================
// Environment configuration
// =============================================================================

mod from_env {
    use codeuw::adapters::github::{
        API_URL_ENV, GITHUB_API_BASE, GitHubClient, TOKEN_ENV, TrackerError,
    };
    use serial_test::serial;

    fn set(key: &str, value: Option<&str>) {
        // Tests touching these variables are serialized
        unsafe {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
    }

    #[test]
    #[serial]
    fn test_missing_token_is_reported() {
        set(TOKEN_ENV, None);
        set(API_URL_ENV, None);

        let err = GitHubClient::from_env().unwrap_err();

        assert!(matches!(err, TrackerError::MissingToken));
        assert!(err.is_auth());
    }

    #[test]
    #[serial]
    fn test_default_base_url() {
        set(TOKEN_ENV, Some("ghp_test"));
        set(API_URL_ENV, None);

        let client = GitHubClient::from_env().unwrap();

        assert_eq!(client.base_url(), GITHUB_API_BASE);
        set(TOKEN_ENV, None);
    }

    #[test]
    #[serial]
    fn test_api_url_override() {
        set(TOKEN_ENV, Some("ghp_test"));
        set(API_URL_ENV, Some("https://ghe.example.com/api/v3/"));

        let client = GitHubClient::from_env().unwrap();

        assert_eq!(client.base_url(), "https://ghe.example.com/api/v3");
        set(TOKEN_ENV, None);
        set(API_URL_ENV, None);
    }
}
