//! HTTP client module
//!
//! Thin reqwest wrapper used as the transport of the API Integration
//! Resolver.
//!
//! # Behavior
//!
//! - **One request per call**: no retries, no backoff, no caching
//! - **No default timeout**: a deadline applies only when configured
//! - **Raw responses**: status and body are returned for the caller to classify

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RawResponse, RequestConfig};
