use crate::capabilities::{CapabilityReport, CapabilityRules};
use crate::probe::{link_presence, LinkPresence, LinkProbe};
use crate::resource::RootResource;
use crate::transport::HttpTransport;
use crate::Result;
use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// Client that answers capability questions for one server.
///
/// The root resource is fetched lazily on the first question and cached as an
/// immutable snapshot. Readers never block each other; [`refresh`](Self::refresh)
/// swaps a new snapshot in atomically.
pub struct CapabilityClient {
    transport: Arc<HttpTransport>,
    root: ArcSwapOption<RootResource>,
}

impl CapabilityClient {
    pub(crate) fn new(transport: Arc<HttpTransport>, root: Option<Arc<RootResource>>) -> Self {
        Self {
            transport,
            root: ArcSwapOption::new(root),
        }
    }

    pub fn builder() -> crate::client::CapabilityClientBuilder {
        crate::client::CapabilityClientBuilder::new()
    }

    pub fn root_url(&self) -> &Url {
        self.transport.root_url()
    }

    /// The cached snapshot, without touching the network.
    pub fn cached_root(&self) -> Option<Arc<RootResource>> {
        self.root.load_full()
    }

    /// Fetch the root document and replace the cached snapshot.
    pub async fn refresh(&self) -> Result<Arc<RootResource>> {
        debug!(url = %self.transport.root_url(), "fetching root resource");
        let root = Arc::new(self.transport.fetch_root().await?);
        debug!(
            version = root.version(),
            links = root.link_names().count(),
            "root resource fetched"
        );
        self.root.store(Some(root.clone()));
        Ok(root)
    }

    /// Drop the cached snapshot; the next question fetches again.
    pub fn invalidate(&self) {
        self.root.store(None);
    }

    /// The cached snapshot, fetching it first if there is none.
    ///
    /// A failed fetch is logged and reported as an unknown resource; it is not
    /// retried here and nothing is cached.
    pub async fn root(&self) -> Option<Arc<RootResource>> {
        if let Some(root) = self.root.load_full() {
            return Some(root);
        }
        match self.refresh().await {
            Ok(root) => Some(root),
            Err(e) => {
                warn!(url = %self.transport.root_url(), error = %e, "root resource unavailable");
                None
            }
        }
    }

    /// Capability rules over the current snapshot.
    ///
    /// The snapshot is resolved once, so every answer from the returned rules
    /// sees the same server state.
    pub async fn capabilities(&self) -> CapabilityRules<Option<Arc<RootResource>>> {
        let root = self.root().await;
        CapabilityRules::new(root.clone(), root)
    }

    pub async fn report(&self) -> CapabilityReport {
        self.capabilities().await.report().await
    }
}

/// Fetches the root resource on first use. A failed fetch answers
/// `ResourceUnknown`, which link rules settle without asking again.
#[async_trait]
impl LinkProbe for CapabilityClient {
    async fn link_presence(&self, name: &str) -> LinkPresence {
        let root = self.root().await;
        link_presence(root.as_deref(), name)
    }
}
