//! HTTP API Integration Tests
//!
//! Drives the real router over HTTP:
//! - Dimension and export-target lookups
//! - Config resolution and style projection
//! - Dev overlay edit, reset, export and import
//! - Input validation

mod common;

use common::server::TestServer;
use poster_server::ServerConfig;
use serde_json::{json, Value};

async fn get_json(client: &reqwest::Client, url: &str) -> (u16, Value) {
    let response = client.get(url).send().await.expect("request");
    let status = response.status().as_u16();
    (status, response.json().await.expect("json body"))
}

async fn post_json(client: &reqwest::Client, url: &str, body: &Value) -> (u16, Value) {
    let response = client.post(url).json(body).send().await.expect("request");
    let status = response.status().as_u16();
    (status, response.json().await.expect("json body"))
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_probes() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let live = client
        .get(server.url("/health/live"))
        .send()
        .await
        .expect("live");
    assert_eq!(live.status().as_u16(), 200);

    let (status, body) = get_json(&client, &server.url("/health/ready")).await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["dev_mode"], true);

    server.shutdown().await;
}

// ============================================================================
// Lookups
// ============================================================================

#[tokio::test]
async fn test_dimensions_lookup_and_fallback() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let (status, story) = get_json(&client, &server.url("/api/dimensions/story")).await;
    assert_eq!(status, 200);
    assert_eq!(story["width"], 1080);
    assert_eq!(story["height"], 1920);
    assert_eq!(story["dpi"], 72);

    let (status, unknown) = get_json(&client, &server.url("/api/dimensions/billboard")).await;
    assert_eq!(status, 200);
    assert_eq!(unknown["width"], 3508);
    assert_eq!(unknown["label"], "A3 Poster");

    server.shutdown().await;
}

#[tokio::test]
async fn test_export_target() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let (status, target) = get_json(
        &client,
        &server.url("/api/export-target/flyer-front?format=jpeg&stem=summit"),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(target["width"], 1748);
    assert_eq!(target["format"], "jpeg");
    assert_eq!(target["jpegQuality"], 92);
    assert_eq!(target["fileName"], "summit-flyer-front.jpg");

    let (_, pdf) = get_json(&client, &server.url("/api/export-target/poster")).await;
    assert_eq!(pdf["format"], "pdf");
    assert_eq!(pdf["fileName"], "export-poster.pdf");
    assert_eq!(pdf["page"], json!({"width_mm": 297.0, "height_mm": 420.0}));

    for visual in ["poster", "story", "press-release", "unknown-type"] {
        let (_, dims) = get_json(&client, &server.url(&format!("/api/dimensions/{visual}"))).await;
        let (_, target) =
            get_json(&client, &server.url(&format!("/api/export-target/{visual}"))).await;
        assert_eq!(target["page"], dims["page"], "{visual}");
    }

    server.shutdown().await;
}

#[tokio::test]
async fn test_resolved_config_with_variant() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let (status, base) = get_json(&client, &server.url("/api/config/poster")).await;
    assert_eq!(status, 200);
    assert_eq!(base["title"]["fontSize"], 96.0);

    let (_, download) = get_json(
        &client,
        &server.url("/api/config/poster?variant=download"),
    )
    .await;
    assert_eq!(download["title"]["fontSize"], 104.0);
    assert_eq!(download["title"]["top"], base["title"]["top"]);

    let (_, unknown) = get_json(&client, &server.url("/api/config/nonexistent-type")).await;
    assert_eq!(unknown, json!({}));

    server.shutdown().await;
}

#[tokio::test]
async fn test_style_projection_in_both_spaces() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let (status, relative) = post_json(
        &client,
        &server.url("/api/style"),
        &json!({"visualType": "press-release", "element": "logo"}),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(relative["style"]["top"], "4%");
    assert_eq!(relative["style"]["width"], "420px");
    assert_eq!(relative["style"]["height"], "140px");

    let (_, absolute) = post_json(
        &client,
        &server.url("/api/style"),
        &json!({"visualType": "press-release", "element": "logo", "space": "absolute"}),
    )
    .await;
    // 4% of 3508px
    assert_eq!(absolute["style"]["top"], "140.32px");
    assert_eq!(absolute["style"]["width"], "420px");
    assert_eq!(absolute["style"]["height"], "140px");
    assert!(absolute["css"]
        .as_str()
        .expect("css")
        .contains("width: 420px;"));

    server.shutdown().await;
}

#[tokio::test]
async fn test_style_with_overrides_and_size() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let (status, body) = post_json(
        &client,
        &server.url("/api/style"),
        &json!({
            "visualType": "poster",
            "element": "qrCode",
            "overrides": {"size": 64, "width": 10},
            "theme": "bw",
        }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["style"]["width"], "64px");
    assert_eq!(body["style"]["height"], "64px");

    server.shutdown().await;
}

// ============================================================================
// Dev overlay
// ============================================================================

#[tokio::test]
async fn test_overlay_update_then_reset() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let (status, updated) = post_json(
        &client,
        &server.url("/api/overlay/update"),
        &json!({"visualType": "poster", "element": "title", "property": "fontSize", "value": 42}),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(updated["element"]["fontSize"], 42.0);
    assert_eq!(updated["element"]["top"], 8.0);
    assert_eq!(updated["persisted"], true);

    let (_, config) = get_json(&client, &server.url("/api/config/poster")).await;
    assert_eq!(config["title"]["fontSize"], 42.0);

    let (status, reset) = post_json(&client, &server.url("/api/overlay/reset"), &json!({})).await;
    assert_eq!(status, 200);
    assert_eq!(reset["reset"], true);

    let (_, config) = get_json(&client, &server.url("/api/config/poster")).await;
    assert_eq!(config["title"]["fontSize"], 96.0);

    server.shutdown().await;
}

#[tokio::test]
async fn test_overlay_update_conflicts_without_dev_mode() {
    let server = TestServer::start_with(ServerConfig::default()).await;
    let client = reqwest::Client::new();

    let (status, body) = post_json(
        &client,
        &server.url("/api/overlay/update"),
        &json!({"visualType": "poster", "element": "title", "property": "top", "value": 1}),
    )
    .await;
    assert_eq!(status, 409);
    assert_eq!(body["error"], "dev mode is disabled");

    let (_, status_body) = get_json(&client, &server.url("/api/overlay/status")).await;
    assert_eq!(status_body["devMode"], false);

    server.shutdown().await;
}

#[tokio::test]
async fn test_overlay_update_rejects_bad_input() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let (status, body) = post_json(
        &client,
        &server.url("/api/overlay/update"),
        &json!({"visualType": "poster", "element": "title", "property": "colour", "value": 1}),
    )
    .await;
    assert_eq!(status, 400);
    assert!(body["error"].as_str().expect("error").contains("colour"));

    let (status, _) = post_json(
        &client,
        &server.url("/api/overlay/update"),
        &json!({"visualType": "poster", "element": "title", "property": "top", "value": "high"}),
    )
    .await;
    assert_eq!(status, 400);

    let (status, _) = post_json(
        &client,
        &server.url("/api/overlay/update"),
        &json!({"visualType": "poster", "element": "../title", "property": "top", "value": 1}),
    )
    .await;
    assert_eq!(status, 400);

    let (_, config) = get_json(&client, &server.url("/api/config/poster")).await;
    assert_eq!(config["title"]["top"], 8.0);

    server.shutdown().await;
}

#[tokio::test]
async fn test_overlay_export_import_between_themes() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let exported = client
        .get(server.url("/api/overlay/export/story"))
        .send()
        .await
        .expect("export")
        .text()
        .await
        .expect("body");
    let parsed: Value = serde_json::from_str(&exported).expect("transport json");
    assert!(parsed.get("story").is_some());

    let response = client
        .post(server.url("/api/overlay/import?theme=bw"))
        .body(exported)
        .send()
        .await
        .expect("import");
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.expect("json");
    assert_eq!(body["imported"], 1);

    let (_, color) = get_json(&client, &server.url("/api/config/story")).await;
    let (_, bw) = get_json(&client, &server.url("/api/config/story?theme=bw")).await;
    assert_eq!(color, bw);

    server.shutdown().await;
}

#[tokio::test]
async fn test_overlay_import_rejects_malformed_document() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let (_, before) = get_json(&client, &server.url("/api/config/poster")).await;
    let response = client
        .post(server.url("/api/overlay/import"))
        .body("{not json")
        .send()
        .await
        .expect("import");
    assert_eq!(response.status().as_u16(), 400);

    let (_, after) = get_json(&client, &server.url("/api/config/poster")).await;
    assert_eq!(before, after);

    server.shutdown().await;
}

#[tokio::test]
async fn test_overlay_persists_across_restart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = ServerConfig {
        data_dir: Some(dir.path().to_path_buf()),
        dev_mode: true,
        ..ServerConfig::default()
    };
    let client = reqwest::Client::new();

    let server = TestServer::start_with(config.clone()).await;
    let (status, _) = post_json(
        &client,
        &server.url("/api/overlay/update"),
        &json!({
            "visualType": "flyer-back",
            "element": "contact",
            "property": "opacity",
            "value": 0.5,
            "theme": "bw",
        }),
    )
    .await;
    assert_eq!(status, 200);
    server.shutdown().await;
    assert!(dir.path().join("poster_configs_bw.json").exists());

    let server = TestServer::start_with(config).await;
    let (_, config) = get_json(&client, &server.url("/api/config/flyer-back?theme=bw")).await;
    assert_eq!(config["contact"]["opacity"], 0.5);
    server.shutdown().await;
}

// ============================================================================
// Validation
// ============================================================================

#[tokio::test]
async fn test_invalid_names_are_rejected() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let long = "v".repeat(65);
    let (status, body) = get_json(
        &client,
        &server.url(&format!("/api/config/poster?variant={long}")),
    )
    .await;
    assert_eq!(status, 400);
    assert!(body["error"].as_str().expect("error").contains("variant"));

    let (status, _) = post_json(
        &client,
        &server.url("/api/style"),
        &json!({"visualType": "poster", "element": "title name"}),
    )
    .await;
    assert_eq!(status, 400);

    server.shutdown().await;
}
