//! Integration tests for the theme store Asset API client
//!
//! Uses wiremock to stand in for the store; no real network traffic.

mod common;
mod test_assets;
