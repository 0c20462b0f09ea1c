use issue_herald::domain::models::{AuthorOrigin, Issue, Membership};
use issue_herald::domain::ports::{IssueSource, SourceError};
use issue_herald::infrastructure::github::{GithubClient, GithubClientConfig};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(api_base: String) -> GithubClient {
    GithubClient::new(GithubClientConfig {
        token: "test-token".to_string(),
        api_base,
        public_only: false,
        request_timeout_secs: 5,
        search_delay_ms: 0,
    })
    .expect("failed to build client")
}

fn search_body(items: Vec<serde_json::Value>) -> serde_json::Value {
    serde_json::json!({ "total_count": items.len(), "items": items })
}

#[tokio::test]
async fn test_list_repositories_builds_org_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .and(query_param("q", "org:acme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body(vec![
            serde_json::json!({"full_name": "acme/widgets"}),
            serde_json::json!({"full_name": "acme/gears"}),
        ])))
        .mount(&server)
        .await;

    let client = test_client(server.uri());
    let repos = client
        .list_public_repositories("acme")
        .await
        .expect("repository search failed");

    let names: Vec<_> = repos.iter().map(|r| r.full_name.as_str()).collect();
    assert_eq!(names, vec!["acme/widgets", "acme/gears"]);
}

#[tokio::test]
async fn test_public_only_appends_visibility_filter() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .and(query_param("q", "org:acme is:public"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body(vec![
            serde_json::json!({"full_name": "acme/widgets"}),
        ])))
        .mount(&server)
        .await;

    let client = GithubClient::new(GithubClientConfig {
        token: "test-token".to_string(),
        api_base: server.uri(),
        public_only: true,
        request_timeout_secs: 5,
        search_delay_ms: 0,
    })
    .expect("failed to build client");

    let repos = client
        .list_public_repositories("acme")
        .await
        .expect("repository search failed");
    assert_eq!(repos.len(), 1);
}

#[tokio::test]
async fn test_list_new_issues_without_watermark_omits_created_filter() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/issues"))
        .and(query_param("q", "repo:acme/widgets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body(vec![
            serde_json::json!({
                "title": "Widget crashes on load",
                "html_url": "https://github.com/acme/widgets/issues/7",
                "created_at": "2024-01-01T10:00:00Z",
                "user": {"login": "alice"},
            }),
        ])))
        .mount(&server)
        .await;

    let client = test_client(server.uri());
    let issues = client
        .list_new_issues("acme/widgets", None)
        .await
        .expect("issue search failed");

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].title, "Widget crashes on load");
    assert_eq!(issues[0].author, "alice");
    assert!(issues[0].created_at.is_some());
}

#[tokio::test]
async fn test_list_new_issues_appends_created_lower_bound() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/issues"))
        .and(query_param(
            "q",
            "repo:acme/widgets created:>2024-01-01T10:00:00",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body(vec![])))
        .mount(&server)
        .await;

    let client = test_client(server.uri());
    let issues = client
        .list_new_issues("acme/widgets", Some("2024-01-01T10:00:00"))
        .await
        .expect("issue search failed");
    assert!(issues.is_empty());
}

#[tokio::test]
async fn test_issue_without_user_or_created_at_is_tolerated() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/issues"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body(vec![
            serde_json::json!({
                "title": "Orphan issue",
                "html_url": "https://github.com/acme/widgets/issues/8",
                "created_at": null,
                "user": null,
            }),
        ])))
        .mount(&server)
        .await;

    let client = test_client(server.uri());
    let issues = client
        .list_new_issues("acme/widgets", None)
        .await
        .expect("issue search failed");

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].created_at, None);
    assert_eq!(issues[0].author, "");
}

#[tokio::test]
async fn test_search_iterates_all_pages() {
    let server = MockServer::start().await;

    let full_page: Vec<serde_json::Value> = (0..100)
        .map(|n| serde_json::json!({"full_name": format!("acme/repo-{n}")}))
        .collect();

    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"total_count": 101, "items": full_page})),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "total_count": 101,
            "items": [{"full_name": "acme/repo-100"}],
        })))
        .mount(&server)
        .await;

    let client = test_client(server.uri());
    let repos = client
        .list_public_repositories("acme")
        .await
        .expect("paginated search failed");

    assert_eq!(repos.len(), 101);
    assert_eq!(repos[100].full_name, "acme/repo-100");
}

#[tokio::test]
async fn test_upstream_failure_carries_query_string() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/issues"))
        .respond_with(ResponseTemplate::new(403).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let client = test_client(server.uri());
    let err = client
        .list_new_issues("acme/widgets", None)
        .await
        .expect_err("403 must surface as an error");

    match err {
        SourceError::UpstreamStatus { query, status } => {
            assert_eq!(query, "repo:acme/widgets");
            assert_eq!(status.as_u16(), 403);
        }
        other => panic!("unexpected error variant: {other:?}"),
    }
}

#[tokio::test]
async fn test_membership_lookup_classifies() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orgs/acme/members/alice"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/orgs/acme/members/bob"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/orgs/acme/members/carol"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(server.uri());

    assert_eq!(client.check_membership("alice", "acme").await, Membership::Member);
    assert_eq!(client.check_membership("bob", "acme").await, Membership::NotMember);
    assert_eq!(
        client.check_membership("carol", "acme").await,
        Membership::CheckError,
        "a failed lookup is a check error, not a sweep-aborting failure"
    );
}

#[tokio::test]
async fn test_classify_author_collapses_check_error_to_external() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orgs/acme/members/carol"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(server.uri());
    let issue = Issue {
        title: "t".to_string(),
        url: "u".to_string(),
        created_at: None,
        author: "carol".to_string(),
    };

    assert_eq!(
        client.classify_author(&issue, "acme").await,
        AuthorOrigin::External
    );
}
