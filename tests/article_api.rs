//! Article API Tests
//!
//! Collect-all validation, malformed bodies, visibility of drafts and
//! hidden articles, and author-or-admin editing.

mod harness;

use axum::http::StatusCode;
use harness::TestApp;
use serde_json::json;
use uuid::Uuid;

// =============================================================================
// Validation
// =============================================================================

#[tokio::test]
async fn test_create_reports_all_violations_in_schema_order() {
    let app = TestApp::new();
    let token = app.sign_up("alice").await;

    let response = app
        .post(
            "/articles",
            Some(&token),
            json!({ "body": "text", "category": "sports" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["status"], "error");
    assert_eq!(response.error_code(), "VALIDATION_FAILED");
    assert_eq!(
        response.details(),
        vec![
            "title is required",
            "category must be one of: technology, science, culture, business, lifestyle, opinion",
        ]
    );
}

#[tokio::test]
async fn test_create_checks_tag_elements() {
    let app = TestApp::new();
    let token = app.sign_up("alice").await;

    let response = app
        .post(
            "/articles",
            Some(&token),
            json!({ "title": "T", "body": "B", "category": "science", "tags": ["ok", 7] }),
        )
        .await;

    assert_eq!(response.details(), vec!["tags[1] must be a non-empty string"]);
}

#[tokio::test]
async fn test_malformed_json_is_distinct_from_validation() {
    let app = TestApp::new();
    let token = app.sign_up("alice").await;

    let response = app
        .post_raw("/articles", Some(&token), Some("application/json"), "{ not json")
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "MALFORMED_BODY");
}

#[tokio::test]
async fn test_non_object_and_wrong_content_type_are_malformed() {
    let app = TestApp::new();
    let token = app.sign_up("alice").await;

    let array = app
        .post_raw("/articles", Some(&token), Some("application/json"), "[1, 2]")
        .await;
    assert_eq!(array.error_code(), "MALFORMED_BODY");

    let text = app
        .post_raw("/articles", Some(&token), Some("text/plain"), "{}")
        .await;
    assert_eq!(text.error_code(), "MALFORMED_BODY");

    let missing = app.post_raw("/articles", Some(&token), None, "{}").await;
    assert_eq!(missing.error_code(), "MALFORMED_BODY");
}

#[tokio::test]
async fn test_create_requires_authentication() {
    let app = TestApp::new();

    let response = app
        .post(
            "/articles",
            None,
            json!({ "title": "T", "body": "B", "category": "science" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Visibility
// =============================================================================

#[tokio::test]
async fn test_new_article_defaults_to_draft() {
    let app = TestApp::new();
    let token = app.sign_up("alice").await;

    let response = app
        .post(
            "/articles",
            Some(&token),
            json!({ "title": "Draft", "body": "B", "category": "culture" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["data"]["status"], "draft");
    assert_eq!(response.body["data"]["authorUsername"], "alice");
}

#[tokio::test]
async fn test_drafts_visible_only_to_author_and_admin() {
    let app = TestApp::new();
    let alice = app.sign_up("alice").await;
    let bob = app.sign_up("bob").await;
    let admin = app.sign_up_admin("root").await;
    let id = app.create_article(&alice, "Secret", "draft").await;
    let uri = format!("/articles/{}", id);

    assert_eq!(app.get(&uri, Some(&alice)).await.status, StatusCode::OK);
    assert_eq!(app.get(&uri, Some(&admin)).await.status, StatusCode::OK);
    assert_eq!(app.get(&uri, Some(&bob)).await.status, StatusCode::NOT_FOUND);
    assert_eq!(app.get(&uri, None).await.status, StatusCode::NOT_FOUND);

    // A bad token on an optional-auth route reads as anonymous
    assert_eq!(app.get(&uri, Some("garbage")).await.status, StatusCode::NOT_FOUND);

    let listing = app.get("/articles", None).await;
    assert_eq!(listing.body["data"], json!([]));
}

#[tokio::test]
async fn test_unknown_or_invalid_id_is_404() {
    let app = TestApp::new();

    let response = app.get("/articles/not-a-uuid", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "Article not found");

    let response = app
        .get(&format!("/articles/{}", Uuid::new_v4()), None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Listing
// =============================================================================

#[tokio::test]
async fn test_list_filters_and_limits() {
    let app = TestApp::new();
    let alice = app.sign_up("alice").await;
    let bob = app.sign_up("bob").await;

    app.create_article(&alice, "A1", "published").await;
    app.create_article(&alice, "A2", "published").await;
    app.create_article(&bob, "B1", "published").await;
    app.post(
        "/articles",
        Some(&bob),
        json!({ "title": "B2", "body": "B", "category": "opinion", "status": "published" }),
    )
    .await;

    let all = app.get("/articles", None).await;
    assert_eq!(all.body["data"].as_array().unwrap().len(), 4);

    let by_alice = app.get("/articles?author=alice", None).await;
    assert_eq!(by_alice.body["data"].as_array().unwrap().len(), 2);

    let opinion = app.get("/articles?category=opinion", None).await;
    assert_eq!(opinion.body["data"][0]["title"], "B2");
    assert_eq!(opinion.body["data"].as_array().unwrap().len(), 1);

    let limited = app.get("/articles?limit=1", None).await;
    assert_eq!(limited.body["data"].as_array().unwrap().len(), 1);

    let nobody = app.get("/articles?author=nobody", None).await;
    assert_eq!(nobody.status, StatusCode::OK);
    assert_eq!(nobody.body["data"], json!([]));
}

#[tokio::test]
async fn test_list_query_is_validated() {
    let app = TestApp::new();

    let response = app.get("/articles?category=sports&limit=ten", None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_FAILED");
    assert_eq!(response.details().len(), 2);
}

// =============================================================================
// Editing
// =============================================================================

#[tokio::test]
async fn test_author_can_publish_and_edit() {
    let app = TestApp::new();
    let alice = app.sign_up("alice").await;
    let id = app.create_article(&alice, "Title", "draft").await;
    let uri = format!("/articles/{}", id);

    let response = app
        .patch(
            &uri,
            Some(&alice),
            json!({ "status": "published", "title": "New title", "tags": ["a"] }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["title"], "New title");
    assert_eq!(response.body["data"]["status"], "published");
    assert_eq!(response.body["data"]["body"], "Body text");

    let public = app.get(&uri, None).await;
    assert_eq!(public.status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_validates_before_lookup() {
    let app = TestApp::new();
    let alice = app.sign_up("alice").await;
    let id = app.create_article(&alice, "Title", "draft").await;

    let response = app
        .patch(
            &format!("/articles/{}", id),
            Some(&alice),
            json!({ "category": "gossip", "status": "live" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.details().len(), 2);
}

#[tokio::test]
async fn test_non_author_cannot_edit() {
    let app = TestApp::new();
    let alice = app.sign_up("alice").await;
    let bob = app.sign_up("bob").await;
    let published = app.create_article(&alice, "Pub", "published").await;
    let draft = app.create_article(&alice, "Draft", "draft").await;

    let response = app
        .patch(&format!("/articles/{}", published), Some(&bob), json!({ "title": "Mine" }))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), "FORBIDDEN");

    // A draft bob cannot see does not exist for him
    let response = app
        .patch(&format!("/articles/{}", draft), Some(&bob), json!({ "title": "Mine" }))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app.delete(&format!("/articles/{}", published), Some(&bob)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_can_edit_any_article() {
    let app = TestApp::new();
    let alice = app.sign_up("alice").await;
    let admin = app.sign_up_admin("root").await;
    let id = app.create_article(&alice, "Draft", "draft").await;

    let response = app
        .patch(&format!("/articles/{}", id), Some(&admin), json!({ "title": "Fixed" }))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["authorUsername"], "alice");
}

#[tokio::test]
async fn test_delete_returns_id() {
    let app = TestApp::new();
    let alice = app.sign_up("alice").await;
    let id = app.create_article(&alice, "Gone", "published").await;
    let uri = format!("/articles/{}", id);

    let response = app.delete(&uri, Some(&alice)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"], json!({ "id": id }));

    assert_eq!(app.get(&uri, Some(&alice)).await.status, StatusCode::NOT_FOUND);
}
