//! Link discovery against a root resource.
//!
//! [`LinkProbe`] is the seam between the capability rules and whatever supplies
//! the root resource. An implementation may suspend (for example to fetch the
//! root document over HTTP) but always produces an answer; it never fails.
//!
//! Snapshots probe directly: `RootResource`, `&RootResource`, `Arc<RootResource>`
//! and `Option<_>` of any of them all implement [`LinkProbe`], with `None`
//! reporting [`LinkPresence::ResourceUnknown`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::resource::RootResource;

/// Outcome of looking up a link by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkPresence {
    /// The root resource advertises the link.
    Present,
    /// The root resource is known and does not advertise the link.
    NotFound,
    /// No root resource is available to ask.
    ResourceUnknown,
}

impl LinkPresence {
    /// Collapse to a boolean; an unknown resource has no links.
    pub fn is_present(self) -> bool {
        matches!(self, Self::Present)
    }
}

/// Synchronous lookup on an optional snapshot.
pub fn link_presence(resource: Option<&RootResource>, name: &str) -> LinkPresence {
    match resource {
        None => LinkPresence::ResourceUnknown,
        Some(root) if root.has_link(name) => LinkPresence::Present,
        Some(_) => LinkPresence::NotFound,
    }
}

/// Answers whether the server exposes a named link.
///
/// Names are exact and case-sensitive (`"Channels"`, `"Tenants"`, `"SpaceHome"`).
#[async_trait]
pub trait LinkProbe: Send + Sync {
    async fn link_presence(&self, name: &str) -> LinkPresence;

    async fn has_link(&self, name: &str) -> bool {
        self.link_presence(name).await.is_present()
    }
}

#[async_trait]
impl LinkProbe for RootResource {
    async fn link_presence(&self, name: &str) -> LinkPresence {
        link_presence(Some(self), name)
    }
}

#[async_trait]
impl<P: LinkProbe + ?Sized> LinkProbe for &P {
    async fn link_presence(&self, name: &str) -> LinkPresence {
        (**self).link_presence(name).await
    }
}

#[async_trait]
impl<P: LinkProbe + ?Sized> LinkProbe for Arc<P> {
    async fn link_presence(&self, name: &str) -> LinkPresence {
        (**self).link_presence(name).await
    }
}

#[async_trait]
impl<P: LinkProbe> LinkProbe for Option<P> {
    async fn link_presence(&self, name: &str) -> LinkPresence {
        match self {
            Some(probe) => probe.link_presence(name).await,
            None => LinkPresence::ResourceUnknown,
        }
    }
}
