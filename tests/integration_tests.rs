//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: Client → reqwest → Link-header pages → wrapped results

use futures::StreamExt;
use gitlab_client::{ApiResponse, Client, ClientConfig, Error, RequestOptions, StatusKind};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, auto_paginate: bool) -> Client {
    let config = ClientConfig::builder(format!("{}/api/v4", server.uri()))
        .private_token("glpat-integration")
        .auto_paginate(auto_paginate)
        .build()
        .unwrap();
    Client::new(config).unwrap()
}

fn issues_page_url(server: &MockServer, page: u32) -> String {
    format!(
        "{}/api/v4/projects/1/issues?page={page}&per_page=2",
        server.uri()
    )
}

/// Mount three pages of issues linked by `Link: rel="next"`
async fn mount_three_pages(server: &MockServer) {
    for page in 1..=3u32 {
        let first = (page - 1) * 2 + 1;
        let mut links = vec![format!(
            "<{}>; rel=\"first\"",
            issues_page_url(server, 1)
        )];
        if page < 3 {
            links.push(format!(
                "<{}>; rel=\"next\"",
                issues_page_url(server, page + 1)
            ));
        }
        links.push(format!("<{}>; rel=\"last\"", issues_page_url(server, 3)));

        let mut request = Mock::given(method("GET"))
            .and(path("/api/v4/projects/1/issues"))
            .and(header("PRIVATE-TOKEN", "glpat-integration"))
            .and(query_param("per_page", "2"));
        if page > 1 {
            request = request.and(query_param("page", page.to_string()));
        }

        request
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([
                        {"iid": first, "title": format!("Issue {first}")},
                        {"iid": first + 1, "title": format!("Issue {}", first + 1)}
                    ]))
                    .insert_header("Link", links.join(", ").as_str())
                    .insert_header("X-Total", "6")
                    .insert_header("X-Total-Pages", "3")
                    .insert_header("X-Page", page.to_string().as_str()),
            )
            // Page 1's matcher accepts any page; keep it below the others
            .with_priority(if page == 1 { 5 } else { 1 })
            .expect(1)
            .mount(server)
            .await;
    }
}

// ============================================================================
// Pagination Integration Tests
// ============================================================================

#[tokio::test]
async fn test_get_collects_all_pages() {
    let mock_server = MockServer::start().await;
    mount_three_pages(&mock_server).await;

    let client = client_for(&mock_server, true);
    let response = client
        .get("/projects/1/issues", RequestOptions::new().per_page(2))
        .await
        .unwrap();

    let ApiResponse::Collection(issues) = response else {
        panic!("Expected a collection");
    };

    let iids: Vec<i64> = issues
        .iter()
        .map(|issue| issue.field("iid").unwrap().as_i64().unwrap())
        .collect();
    assert_eq!(iids, vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(issues.total(), Some(6));
    assert_eq!(issues.pages_fetched(), 3);
    assert_eq!(issues.meta().page, Some(3));
    assert!(issues.links().next.is_none());
    assert_eq!(
        issues.links().first.as_deref(),
        Some(issues_page_url(&mock_server, 1).as_str())
    );
    assert_eq!(*issues[5].field("title").unwrap(), "Issue 6");
}

#[tokio::test]
async fn test_get_without_auto_paginate_fetches_one_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/projects/1/issues"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"iid": 1}, {"iid": 2}]))
                .insert_header(
                    "Link",
                    format!("<{}>; rel=\"next\"", issues_page_url(&mock_server, 2)).as_str(),
                ),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, false);
    let issues = client
        .get("/projects/1/issues", RequestOptions::new().per_page(2))
        .await
        .unwrap()
        .into_collection()
        .unwrap();

    assert_eq!(issues.len(), 2);
    assert!(issues.has_next_page());
}

#[tokio::test]
async fn test_page_stream_against_server() {
    let mock_server = MockServer::start().await;
    mount_three_pages(&mock_server).await;

    let client = client_for(&mock_server, true);
    let pages: Vec<_> = client
        .pages("/projects/1/issues", RequestOptions::new().per_page(2))
        .collect()
        .await;

    assert_eq!(pages.len(), 3);
    assert!(pages.iter().all(Result::is_ok));
}

#[tokio::test]
async fn test_error_on_second_page_fails_whole_call() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/projects"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "500 Internal Server Error"})))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v4/projects"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": 1}]))
                .insert_header(
                    "Link",
                    format!("<{}/api/v4/projects?page=2>; rel=\"next\"", mock_server.uri()).as_str(),
                ),
        )
        .with_priority(5)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, true);
    let err = client
        .get("/projects", RequestOptions::new())
        .await
        .unwrap_err();

    assert_eq!(err.status_kind(), Some(StatusKind::ServerError));
    match err {
        Error::HttpStatus { status, message, .. } => {
            assert_eq!(status, 500);
            assert_eq!(message, "500 Internal Server Error");
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
}

// ============================================================================
// Single Object Integration Tests
// ============================================================================

#[tokio::test]
async fn test_single_object_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/projects/gitlab-org%2Fgitlab"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 278964,
            "path_with_namespace": "gitlab-org/gitlab",
            "namespace": {"id": 9970, "kind": "group"},
            "tag_list": []
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, true);
    let project = client
        .get(
            &format!("/projects/{}", gitlab_client::url_encode("gitlab-org/gitlab")),
            RequestOptions::new(),
        )
        .await
        .unwrap()
        .into_single()
        .unwrap();

    assert_eq!(*project.field("id").unwrap(), 278964);
    assert_eq!(*project.path("namespace.kind").unwrap(), "group");
    assert!(project.field("tag_list").unwrap().is_empty());
    assert!(matches!(
        project.field("star_count"),
        Err(Error::NoSuchAttribute { .. })
    ));
}

#[tokio::test]
async fn test_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/projects/999"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "404 Project Not Found"})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, true);
    let err = client
        .get("/projects/999", RequestOptions::new())
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert!(err.to_string().contains("404 Project Not Found"));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let config = ClientConfig::builder("http://127.0.0.1:9/api/v4").build().unwrap();
    let client = Client::new(config).unwrap();

    let err = client
        .get("/projects", RequestOptions::new())
        .await
        .unwrap_err();

    assert!(err.is_transport());
}
