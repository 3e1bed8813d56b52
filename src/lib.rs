//! # server-caps
//!
//! 面向版本化超媒体服务端 API 的能力协商层：回答“该服务端是否支持 X？”。
//!
//! Capability negotiation for clients of a versioned, hypermedia-driven server API.
//!
//! ## Overview
//!
//! Server deployments differ in age and configuration, so a client cannot assume
//! optional features (release channels, tenants) or request shapes (which verb an
//! endpoint accepts) are available. This crate answers those questions with two
//! detection strategies:
//!
//! - **Link discovery**: does the root resource advertise a named link, falling
//!   back to `SpaceHome` for space-scoped features
//! - **Version thresholds**: is the advertised server version at least `X`,
//!   failing open when the version is unknown or malformed
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use server_caps::{Capability, CapabilityClient};
//!
//! #[tokio::main]
//! async fn main() -> server_caps::Result<()> {
//!     let client = CapabilityClient::builder()
//!         .base_url("https://deploy.example.com")
//!         .api_key("API-XXXXXXXX")
//!         .build()?;
//!
//!     let caps = client.capabilities().await;
//!     if caps.supports_tenants().await {
//!         // tenant-aware code path
//!     }
//!     let verb = if caps.use_post_for_channel_version_rule_test() { "POST" } else { "GET" };
//!
//!     let report = client.report().await;
//!     println!("{} {}", verb, report.supports(Capability::Channels));
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`version`] | Tolerant dotted-version parsing and ordering |
//! | [`resource`] | Root resource snapshot |
//! | [`probe`] | Link discovery seam |
//! | [`capabilities`] | Named capability predicates and reports |
//! | [`client`] | Cached root resource over HTTP |
//! | [`transport`] | HTTP fetch of the root document |

pub mod capabilities;
pub mod client;
pub mod probe;
pub mod resource;
pub mod transport;
pub mod version;

pub use capabilities::{Capability, CapabilityReport, CapabilityRule, CapabilityRules};
pub use client::{CapabilityClient, CapabilityClientBuilder, ClientConfig};
pub use probe::{LinkPresence, LinkProbe};
pub use resource::RootResource;
pub use version::{SemanticVersion, VersionParseError};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
