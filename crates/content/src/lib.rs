//! Content loading - catalog fetch and media prefetch
//!
//! The catalog document and the per-variant media assets live outside the
//! game. This crate fetches them and never lets a failure escape:
//!
//! 1. **Catalog**: one GET (or file read) of a static JSON document. A non-2xx
//!    status, a transport error or invalid JSON all mean "no catalog".
//! 2. **Media**: one load per distinct variant id, addressed as
//!    `<asset base>/<variantId>.webp`, issued concurrently and awaited as a
//!    batch. Each load resolves to a status flag.
//!
//! # Sources
//!
//! - [`HttpContentSource`]: `reqwest` client for hosted content
//! - [`DirContentSource`]: `tokio::fs` reads for a local checkout
//!
//! [`ContentConfig::from_env`] picks one based on `MEMORY_MATCH_CATALOG`.

pub mod config;
pub mod dir;
pub mod http;
pub mod prefetch;
pub mod source;

pub use memory_match_core as core;

pub use config::ContentConfig;
pub use dir::DirContentSource;
pub use http::HttpContentSource;
pub use prefetch::{fetch_catalog_or_none, prefetch_assets, MediaCache};
pub use source::{asset_file_name, ContentSource, LoadError, MediaAsset, ASSET_EXTENSION};
