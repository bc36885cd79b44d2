//! Flibusta Client Library
//!
//! This library provides the core functionality for the `flibusta` CLI,
//! which searches and downloads books from the Flibusta online library
//! through its interchangeable mirror hosts, including the Tor hidden
//! service.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`config`] - Environment-driven configuration (proxy, extra mirror)
//! - [`mirror`] - Mirror registry and first-success request racing
//! - [`paths`] - Request path construction
//! - [`parse`] - HTML parsing into search results and book details
//! - [`client`] - High-level search / info / download operations

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod mirror;
pub mod parse;
pub mod paths;

// Re-export commonly used types
pub use client::{BookFormat, ClientError, DownloadResult, FlibustaClient};
pub use config::{Config, ConfigError, DEFAULT_PROXY_URL};
pub use mirror::{
    BROWSER_USER_AGENT, DEFAULT_MIRRORS, FetchError, MirrorRegistry, TOR_PROXY_SUGGESTION,
};
pub use parse::{InfoResult, ListItem, ParseError, parse_info, parse_search};
