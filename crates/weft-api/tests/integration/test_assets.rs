//! Asset endpoint tests: listing, fetching, uploading, deleting, and
//! retry behavior on throttled responses.

use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use weft_api::error::ApiError;
use weft_core::ports::theme_store::AssetContent;

use crate::common::{
    assets_path, mount_asset_list, mount_binary_asset, mount_text_asset, setup_store_mock,
};

#[tokio::test]
async fn list_assets_returns_entries() {
    let (server, client) = setup_store_mock().await;
    mount_asset_list(
        &server,
        serde_json::json!([
            { "key": "layout/theme.liquid", "updated_at": "2026-03-01T09:30:00Z" },
            { "key": "assets/logo.png", "size": 2048 },
        ]),
    )
    .await;

    let assets = client.list_assets().await.unwrap();
    assert_eq!(assets.len(), 2);
    assert_eq!(assets[0].key, "layout/theme.liquid");
    assert!(assets[0].updated_at.is_some());
    assert_eq!(assets[1].size, Some(2048));
}

#[tokio::test]
async fn list_assets_sends_access_token_header() {
    let server = MockServer::start().await;
    let client = weft_api::client::StoreClient::with_base_url(
        server.uri(),
        "sekrit",
        weft_core::domain::newtypes::ThemeId::new(crate::common::TEST_THEME_ID),
    );

    Mock::given(method("GET"))
        .and(path(assets_path()))
        .and(header("X-Store-Access-Token", "sekrit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "assets": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let assets = client.list_assets().await.unwrap();
    assert!(assets.is_empty());
}

#[tokio::test]
async fn get_asset_returns_text_value() {
    let (server, client) = setup_store_mock().await;
    mount_text_asset(&server, "layout/theme.liquid", "{{ content_for_layout }}").await;

    let content = client.get_asset("layout/theme.liquid").await.unwrap();
    assert_eq!(
        content,
        AssetContent::Text("{{ content_for_layout }}".to_string())
    );
}

#[tokio::test]
async fn get_asset_decodes_attachment() {
    let (server, client) = setup_store_mock().await;
    // base64 of the bytes 0x89 P N G
    mount_binary_asset(&server, "assets/logo.png", "iVBORw==").await;

    let content = client.get_asset("assets/logo.png").await.unwrap();
    assert_eq!(
        content,
        AssetContent::Binary(vec![0x89, b'P', b'N', b'G'])
    );
}

#[tokio::test]
async fn get_asset_rejects_payload_without_content() {
    let (server, client) = setup_store_mock().await;
    Mock::given(method("GET"))
        .and(path(assets_path()))
        .and(query_param("asset[key]", "assets/void.png"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "asset": { "key": "assets/void.png" }
        })))
        .mount(&server)
        .await;

    let err = client.get_asset("assets/void.png").await.unwrap_err();
    assert!(matches!(err, ApiError::MalformedAsset(_)));
}

#[tokio::test]
async fn put_asset_sends_text_as_value() {
    let (server, client) = setup_store_mock().await;

    Mock::given(method("PUT"))
        .and(path(assets_path()))
        .and(body_partial_json(serde_json::json!({
            "asset": { "key": "assets/application.js", "value": "console.log(1);" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "asset": { "key": "assets/application.js" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    client
        .put_asset(
            "assets/application.js",
            &AssetContent::Text("console.log(1);".to_string()),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn put_asset_sends_binary_as_base64_attachment() {
    let (server, client) = setup_store_mock().await;

    Mock::given(method("PUT"))
        .and(path(assets_path()))
        .and(body_partial_json(serde_json::json!({
            "asset": { "key": "assets/logo.png", "attachment": "iVBORw==" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "asset": { "key": "assets/logo.png" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    client
        .put_asset(
            "assets/logo.png",
            &AssetContent::Binary(vec![0x89, b'P', b'N', b'G']),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn delete_asset_targets_key() {
    let (server, client) = setup_store_mock().await;

    Mock::given(method("DELETE"))
        .and(path(assets_path()))
        .and(query_param("asset[key]", "assets/old.css"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "assets/old.css was deleted"
        })))
        .expect(1)
        .mount(&server)
        .await;

    client.delete_asset("assets/old.css").await.unwrap();
}

#[tokio::test]
async fn throttled_request_is_retried_after_delay() {
    let (server, client) = setup_store_mock().await;

    // First response throttles with an immediate retry window, second succeeds.
    Mock::given(method("GET"))
        .and(path(assets_path()))
        .respond_with(ResponseTemplate::new(429).append_header("Retry-After", "0"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(assets_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "assets": [] })))
        .mount(&server)
        .await;

    let assets = client.list_assets().await.unwrap();
    assert!(assets.is_empty());
}

#[tokio::test]
async fn terminal_client_error_maps_to_status() {
    let (server, client) = setup_store_mock().await;

    Mock::given(method("DELETE"))
        .and(path(assets_path()))
        .respond_with(ResponseTemplate::new(404).set_body_string("asset not found"))
        .mount(&server)
        .await;

    let err = client.delete_asset("assets/ghost.css").await.unwrap_err();
    match err {
        ApiError::Status { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "asset not found");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}
