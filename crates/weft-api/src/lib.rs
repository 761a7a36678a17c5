//! Weft API - Theme store Asset API adapter
//!
//! Implements the `IThemeStore` port from `weft-core` on top of the store's
//! REST Asset API:
//!
//! - [`client::StoreClient`] - typed HTTP client (endpoints, auth header,
//!   retry on throttling)
//! - [`provider::ThemeStoreProvider`] - the port implementation mapping
//!   wire payloads to port DTOs
//! - [`error::ApiError`] - typed errors for everything the API can reject

pub mod client;
pub mod error;
pub mod provider;
