//! Tably Client - HTTP client for the ordering backend
//!
//! Thin typed wrappers over the backend REST API. One method per
//! endpoint, grouped by resource under [`api`].

pub mod api;
pub mod config;
pub mod error;
pub mod http;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
