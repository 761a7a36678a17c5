//! Shared test helpers for Asset API integration tests
//!
//! Provides wiremock-based mock server setup. Each helper mounts the
//! necessary mock endpoints and returns a configured client pointing at
//! the mock server.

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use weft_api::client::StoreClient;
use weft_core::domain::newtypes::ThemeId;

/// Theme id used by all integration tests.
pub const TEST_THEME_ID: &str = "12345";

/// Asset collection path for [`TEST_THEME_ID`].
pub fn assets_path() -> String {
    format!("/themes/{TEST_THEME_ID}/assets.json")
}

/// Starts a mock server and returns it with a client pointing at it.
pub async fn setup_store_mock() -> (MockServer, StoreClient) {
    let server = MockServer::start().await;
    let client =
        StoreClient::with_base_url(server.uri(), "test-access-token", ThemeId::new(TEST_THEME_ID));
    (server, client)
}

/// Mounts an asset listing endpoint returning the given entries.
pub async fn mount_asset_list(server: &MockServer, assets: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(assets_path()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "assets": assets })),
        )
        .mount(server)
        .await;
}

/// Mounts a single-asset endpoint returning a text `value`.
pub async fn mount_text_asset(server: &MockServer, key: &str, value: &str) {
    Mock::given(method("GET"))
        .and(path(assets_path()))
        .and(query_param("asset[key]", key))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "asset": { "key": key, "value": value }
        })))
        .mount(server)
        .await;
}

/// Mounts a single-asset endpoint returning a base64 `attachment`.
pub async fn mount_binary_asset(server: &MockServer, key: &str, attachment_b64: &str) {
    Mock::given(method("GET"))
        .and(path(assets_path()))
        .and(query_param("asset[key]", key))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "asset": { "key": key, "attachment": attachment_b64 }
        })))
        .mount(server)
        .await;
}
