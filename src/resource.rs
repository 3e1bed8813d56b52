//! Root resource snapshot
//!
//! The top-level document a server returns on connection: its version string and
//! the hypermedia links it advertises. A snapshot is immutable once built; absence
//! of a snapshot is modelled as `Option<RootResource>` by callers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::version::SemanticVersion;

/// Immutable descriptor of one server instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RootResource {
    /// Version string exactly as advertised; may be malformed or empty.
    #[serde(default)]
    version: String,
    /// Link name -> href.
    #[serde(default)]
    links: BTreeMap<String, String>,
}

impl RootResource {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            links: BTreeMap::new(),
        }
    }

    /// Add an advertised link.
    pub fn with_link(mut self, name: impl Into<String>, href: impl Into<String>) -> Self {
        self.links.insert(name.into(), href.into());
        self
    }

    /// Add several links whose hrefs are irrelevant to the caller.
    pub fn with_links<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let name = name.into();
            let href = format!("/api/{}", name.to_lowercase());
            self.links.insert(name, href);
        }
        self
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// The advertised version, if it parses.
    pub fn semantic_version(&self) -> Option<SemanticVersion> {
        SemanticVersion::parse(&self.version)
    }

    /// Exact, case-sensitive link lookup.
    pub fn has_link(&self, name: &str) -> bool {
        self.links.contains_key(name)
    }

    pub fn link(&self, name: &str) -> Option<&str> {
        self.links.get(name).map(String::as_str)
    }

    pub fn link_names(&self) -> impl Iterator<Item = &str> {
        self.links.keys().map(String::as_str)
    }
}
