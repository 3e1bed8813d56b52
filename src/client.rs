//! Capability client over a live server.
//!
//! Keeps one cached root resource snapshot per client and answers capability
//! questions against it. Implementation details live under `src/client/`.

pub mod builder;
pub mod config;
pub mod core;

pub use builder::CapabilityClientBuilder;
pub use config::ClientConfig;
pub use core::CapabilityClient;
