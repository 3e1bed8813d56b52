//! HTTP access to the server root document.
//!
//! The capability rules never talk to the network themselves; the client uses
//! this transport to obtain the [`RootResource`](crate::RootResource) snapshot
//! they read.

mod http;

pub use http::{HttpTransport, TransportError};
