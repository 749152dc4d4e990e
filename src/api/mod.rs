//! # API Module
//!
//! Typed access to the helpdesk REST API.
//!
//! ```text
//! Menus / report commands
//!          ↓
//! ApiService  (named endpoints, composite statistics)
//!          ↓
//! ApiClient   (base URL, status check, JSON decoding)
//!          ↓
//! Transport   (HttpTransport over reqwest::blocking)
//! ```
//!
//! Every request is a single blocking GET. Failures of any layer surface as
//! [`ApiError`]; nothing is retried and composite fetches never return
//! partial results.

mod client;
mod error;
mod service;

pub use client::{ApiClient, ApiResponse, HEALTH_PATH, HttpTransport, RawResponse, Transport};
pub use error::{ApiError, status_category};
pub use service::ApiService;
