//! Weft Core - Domain logic and business rules
//!
//! This crate contains the decision engine for theme synchronization:
//! - **Eligibility resolution** - which local files take part in a sync action
//! - **Classification** - binary vs. text transfer encoding per asset
//! - **Preview URLs** - locating the live preview of a theme
//! - **Configuration** - the `config.yml` model with validation and a builder
//! - **Port definitions** - traits for adapters: `IThemeStore`, `ILocalTheme`
//!
//! # Architecture
//!
//! The domain modules are pure functions with no I/O; configuration is an
//! explicit value threaded into every call rather than process-wide state.
//! Ports define trait interfaces that the adapter crates (`weft-api`,
//! `weft-sync`) implement.

pub mod classify;
pub mod config;
pub mod domain;
pub mod filter;
pub mod ports;
pub mod preview;
