#![deny(unsafe_code)]

//! Shared test utilities for the AOI workspace.
//!
//! Provides reusable fixtures, config builders, fallback doubles, and tracing
//! helpers so that individual crate tests stay concise and consistent.
//!
//! Add this crate as a `[dev-dependency]` in any workspace member:
//!
//! ```toml
//! [dev-dependencies]
//! aoi-test-utils = { workspace = true }
//! ```

pub mod config;
pub mod fallback;
pub mod tracing_setup;
