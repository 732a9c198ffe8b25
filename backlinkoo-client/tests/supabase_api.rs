//! Supabase PostgREST integration tests
//!
//! Exercises the wire format against a local mock server: query encoding,
//! auth headers, and error propagation. No external traffic.

use backlinkoo_client::{ClientError, SupabaseClient};
use backlinkoo_core::domain::post::PostPatch;
use httpmock::prelude::*;
use serde_json::json;
use uuid::Uuid;

fn client_for(server: &MockServer) -> SupabaseClient {
    SupabaseClient::with_client(server.base_url(), "test-key", reqwest::Client::new())
}

#[tokio::test]
async fn list_posts_sends_postgrest_query() {
    let server = MockServer::start_async().await;
    let post_id = Uuid::new_v4();

    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/rest/v1/automation_posts")
                .query_param("select", "id,title,content,slug,url,domain_id")
                .query_param("order", "id.asc")
                .query_param("offset", "50")
                .query_param("limit", "25")
                .header("apikey", "test-key")
                .header("authorization", "Bearer test-key");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!([
                    {
                        "id": post_id,
                        "title": "A Title",
                        "content": "<p>Body</p>",
                        "slug": "a-title",
                        "url": "https://example.com/a-title",
                        "domain_id": null
                    }
                ]));
        })
        .await;

    let posts = client_for(&server).list_posts(50, 25, None).await.unwrap();

    mock.assert_async().await;
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].id, post_id);
    assert_eq!(posts[0].title.as_deref(), Some("A Title"));
    assert_eq!(posts[0].domain_id, None);
}

#[tokio::test]
async fn list_posts_filters_by_domain() {
    let server = MockServer::start_async().await;
    let domain_id = Uuid::new_v4();

    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/rest/v1/automation_posts")
                .query_param("domain_id", format!("eq.{domain_id}"));
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!([]));
        })
        .await;

    let posts = client_for(&server)
        .list_posts(0, 100, Some(domain_id))
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(posts.is_empty());
}

#[tokio::test]
async fn update_post_patches_by_id() {
    let server = MockServer::start_async().await;
    let id = Uuid::new_v4();

    let mock = server
        .mock_async(|when, then| {
            when.method(httpmock::Method::PATCH)
                .path("/rest/v1/automation_posts")
                .query_param("id", format!("eq.{id}"))
                .header("prefer", "return=minimal")
                .header("apikey", "test-key");
            then.status(204);
        })
        .await;

    let patch = PostPatch::new(Some("Fixed Title".to_string()), None);
    client_for(&server).update_post(id, &patch).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn non_success_status_becomes_api_error() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/rest/v1/automation_posts");
            then.status(500).body("internal error");
        })
        .await;

    let err = client_for(&server)
        .list_posts(0, 100, None)
        .await
        .unwrap_err();

    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 500);
            assert!(message.contains("internal error"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn resolve_domain_returns_matching_row() {
    let server = MockServer::start_async().await;
    let domain_id = Uuid::new_v4();

    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/rest/v1/domains")
                .query_param("select", "id,domain")
                .query_param("domain", "eq.example.com")
                .query_param("limit", "1");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!([{ "id": domain_id, "domain": "example.com" }]));
        })
        .await;

    let record = client_for(&server)
        .resolve_domain("https://www.example.com/")
        .await
        .unwrap();

    mock.assert_async().await;
    let record = record.expect("domain should resolve");
    assert_eq!(record.id, domain_id);
    assert_eq!(record.domain, "example.com");
}

#[tokio::test]
async fn resolve_domain_returns_none_for_unknown_names() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/rest/v1/domains");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!([]));
        })
        .await;

    let record = client_for(&server)
        .resolve_domain("missing.example")
        .await
        .unwrap();

    assert!(record.is_none());
}
