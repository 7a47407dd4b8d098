//! Publish flow over HTTP: validation, persistence and webhook delivery.

mod common;

use axum::http::StatusCode;
use common::fixtures::{article_fields, with_field};
use common::{AppHarness, FilePart};
use multipost_core::domains::posts::data::keys;
use multipost_core::domains::posts::PostStatus;
use multipost_core::kernel::{InMemoryPostStore, MockWebhook, TestDependencies};

#[tokio::test]
async fn publish_with_healthy_webhook_marks_published() {
    let harness = AppHarness::new(TestDependencies::new());

    let (status, body) = harness
        .post_form("/actions/publish", &article_fields())
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "published");

    let posts = harness.deps.store.all();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].status, PostStatus::Published);
    assert_eq!(body["data"]["id"], serde_json::json!(posts[0].id));
}

#[tokio::test]
async fn webhook_receives_stored_payload_with_id() {
    let harness = AppHarness::new(TestDependencies::new());

    harness
        .post_form("/actions/publish", &article_fields())
        .await;

    let deliveries = harness.deps.webhook.deliveries();
    assert_eq!(deliveries.len(), 1);

    let payload = &deliveries[0];
    let stored = &harness.deps.store.all()[0];
    assert_eq!(payload["id"], serde_json::json!(stored.id));
    assert_eq!(payload["status"], "draft");
    assert_eq!(payload["title"], "Harvest festival returns");
    assert_eq!(payload["tone"], "persuasive");
    assert_eq!(payload["category"], "culture_and_art");
    assert_eq!(payload["backstory"], "Started by farmers in 1998");
    assert!(payload["local_connection"].is_null());
}

#[tokio::test]
async fn webhook_error_status_marks_error_and_keeps_record() {
    let harness =
        AppHarness::new(TestDependencies::new().mock_webhook(MockWebhook::responding(500)));

    let (status, body) = harness
        .post_form("/actions/publish", &article_fields())
        .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["success"], false);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Draft saved, but publishing failed"));

    let posts = harness.deps.store.all();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].status, PostStatus::Error);
    assert_eq!(
        posts[0].content.value_proposition,
        "Three days of local music and food"
    );
}

#[tokio::test]
async fn unreachable_webhook_marks_error() {
    let harness = AppHarness::new(TestDependencies::new().mock_webhook(MockWebhook::unreachable()));

    let (status, _) = harness
        .post_form("/actions/publish", &article_fields())
        .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(harness.deps.store.all()[0].status, PostStatus::Error);
}

#[tokio::test]
async fn unconfigured_webhook_says_so() {
    let harness =
        AppHarness::new(TestDependencies::new().mock_webhook(MockWebhook::unconfigured()));

    let (status, body) = harness
        .post_form("/actions/publish", &article_fields())
        .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(
        body["message"],
        "Draft saved, but publishing failed: the webhook is not configured."
    );
    assert_eq!(harness.deps.store.count(), 1);
    assert_eq!(harness.deps.store.all()[0].status, PostStatus::Error);
}

#[tokio::test]
async fn missing_required_fields_create_nothing() {
    let harness = AppHarness::new(TestDependencies::new());
    let fields: Vec<(&str, &str)> = article_fields()
        .into_iter()
        .filter(|(k, _)| *k != keys::VALUE_PROPOSITION && *k != keys::PROBLEM_SOLUTION)
        .collect();

    let (status, body) = harness.post_form("/actions/publish", &fields).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let error_keys: Vec<&String> = body["errors"].as_object().unwrap().keys().collect();
    assert_eq!(error_keys, vec!["problem_solution", "value_proposition"]);
    assert_eq!(harness.deps.store.count(), 0);
    assert!(harness.deps.webhook.deliveries().is_empty());
}

#[tokio::test]
async fn product_post_needs_name_and_price() {
    let harness = AppHarness::new(TestDependencies::new());
    let fields = with_field(article_fields(), keys::POST_TYPE, "product");

    let (status, body) = harness.post_form("/actions/publish", &fields).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"]["product_name"][0], "The product name is required.");
    assert_eq!(body["errors"]["price"][0], "The price is required.");
}

#[tokio::test]
async fn store_outage_is_a_server_error() {
    let harness = AppHarness::new(
        TestDependencies::new().mock_store(InMemoryPostStore::new().failing_create()),
    );

    let (status, body) = harness
        .post_form("/actions/publish", &article_fields())
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Failed to save the draft:"));
    assert!(harness.deps.webhook.deliveries().is_empty());
}

#[tokio::test]
async fn resubmitting_creates_a_new_record() {
    let harness = AppHarness::new(TestDependencies::new());

    harness
        .post_form("/actions/publish", &article_fields())
        .await;
    harness
        .post_form("/actions/publish", &article_fields())
        .await;

    let posts = harness.deps.store.all();
    assert_eq!(posts.len(), 2);
    assert_ne!(posts[0].id, posts[1].id);
    assert_eq!(harness.deps.webhook.deliveries().len(), 2);
}

#[tokio::test]
async fn multipart_upload_is_stored_as_data_uri() {
    let harness = AppHarness::new(TestDependencies::new());

    let (status, _) = harness
        .post_multipart(
            "/actions/publish",
            &article_fields(),
            Some(FilePart {
                field: "image",
                file_name: "poster.png",
                mime: "image/png",
                bytes: b"abc",
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let stored = &harness.deps.store.all()[0];
    assert_eq!(
        stored.content.image_url.as_deref(),
        Some("data:image/png;base64,YWJj")
    );
}

#[tokio::test]
async fn multipart_without_file_keeps_image_url_field() {
    let harness = AppHarness::new(TestDependencies::new());
    let fields = with_field(
        article_fields(),
        keys::IMAGE_URL,
        "https://cdn.example.com/poster.jpg",
    );

    let (status, _) = harness
        .post_multipart(
            "/actions/publish",
            &fields,
            Some(FilePart {
                field: "image",
                file_name: "empty.png",
                mime: "image/png",
                bytes: b"",
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        harness.deps.store.all()[0].content.image_url.as_deref(),
        Some("https://cdn.example.com/poster.jpg")
    );
}

#[tokio::test]
async fn delivered_post_with_failed_status_update_is_server_error() {
    let harness = AppHarness::new(
        TestDependencies::new().mock_store(InMemoryPostStore::new().failing_update()),
    );

    let (status, body) = harness
        .post_form("/actions/publish", &article_fields())
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(harness.deps.webhook.deliveries().len(), 1);

    let stored = &harness.deps.store.all()[0];
    assert_eq!(body["data"]["id"], serde_json::json!(stored.id));
}
