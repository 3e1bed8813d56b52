//! 能力判定层：把链接探测和版本阈值组合成具名的布尔能力问题。
//!
//! # Capability Rules
//!
//! Named capability predicates over a server, built from two detection patterns:
//!
//! | Pattern | Used for | Unknown server |
//! |---------|----------|----------------|
//! | Link with fallback | features gated behind a root link | not supported |
//! | Version threshold | request-shape variants | supported (fail-open) |
//!
//! Every predicate is a pure, terminating function of the root resource snapshot
//! and the link probe; nothing is cached here and nothing fails.
//!
//! ## Example
//!
//! ```rust
//! use server_caps::capabilities::{Capability, CapabilityRules};
//! use server_caps::RootResource;
//!
//! # tokio_test::block_on(async {
//! let root = RootResource::new("2020.6").with_link("SpaceHome", "/api/{spaceId}");
//! let rules = CapabilityRules::from_snapshot(Some(root));
//!
//! assert!(rules.supports_tenants().await);
//! assert!(!rules.has_project_deployment_settings_separation());
//! assert!(rules.check(Capability::Channels).await);
//! # });
//! ```

mod rules;

pub use rules::{
    has_project_deployment_settings_separation, meets_threshold, supports_channels,
    supports_tenants, supports_via_link, use_post_for_channel_version_rule_test,
    CHANNELS_LINK, CHANNEL_VERSION_RULE_POST_SINCE, PROJECT_DEPLOYMENT_SETTINGS_SINCE,
    SPACE_HOME_LINK, TENANTS_LINK,
};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::probe::LinkProbe;
use crate::resource::RootResource;
use crate::version::SemanticVersion;

/// Capabilities this crate knows how to detect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Channels,
    Tenants,
    PostForChannelVersionRuleTest,
    ProjectDeploymentSettingsSeparation,
}

impl Capability {
    pub const ALL: [Capability; 4] = [
        Self::Channels,
        Self::Tenants,
        Self::PostForChannelVersionRuleTest,
        Self::ProjectDeploymentSettingsSeparation,
    ];

    /// Stable identifier, matching the serde representation.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Channels => "channels",
            Self::Tenants => "tenants",
            Self::PostForChannelVersionRuleTest => "post_for_channel_version_rule_test",
            Self::ProjectDeploymentSettingsSeparation => "project_deployment_settings_separation",
        }
    }

    /// How this capability is detected.
    pub fn rule(&self) -> CapabilityRule {
        match self {
            Self::Channels => CapabilityRule::LinkWithFallback {
                primary: CHANNELS_LINK,
                fallback: SPACE_HOME_LINK,
            },
            Self::Tenants => CapabilityRule::LinkWithFallback {
                primary: TENANTS_LINK,
                fallback: SPACE_HOME_LINK,
            },
            Self::PostForChannelVersionRuleTest => {
                CapabilityRule::VersionThreshold(CHANNEL_VERSION_RULE_POST_SINCE)
            }
            Self::ProjectDeploymentSettingsSeparation => {
                CapabilityRule::VersionThreshold(PROJECT_DEPLOYMENT_SETTINGS_SINCE)
            }
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Detection strategy for one capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityRule {
    /// Supported if `primary` is advertised, else if `fallback` is.
    LinkWithFallback {
        primary: &'static str,
        fallback: &'static str,
    },
    /// Supported if the server version is at least this, or is unknown/unparseable.
    VersionThreshold(SemanticVersion),
}

impl CapabilityRule {
    pub async fn evaluate<P>(&self, probe: &P, resource: Option<&RootResource>) -> bool
    where
        P: LinkProbe + ?Sized,
    {
        match *self {
            Self::LinkWithFallback { primary, fallback } => {
                supports_via_link(probe, primary, fallback).await
            }
            Self::VersionThreshold(threshold) => meets_threshold(resource, threshold),
        }
    }
}

/// Capability answers for one server, evaluated together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityReport {
    /// Version string the server advertised, if a root resource was known.
    pub server_version: Option<String>,
    pub capabilities: BTreeMap<Capability, bool>,
}

impl CapabilityReport {
    pub fn supports(&self, capability: Capability) -> bool {
        self.capabilities.get(&capability).copied().unwrap_or(false)
    }
}

/// Capability questions against one server.
///
/// Link rules go through the probe; version rules read the snapshot. For a
/// static snapshot both are the same value, see [`CapabilityRules::from_snapshot`].
pub struct CapabilityRules<P> {
    probe: P,
    resource: Option<Arc<RootResource>>,
}

impl CapabilityRules<Option<Arc<RootResource>>> {
    /// Rules over a snapshot the caller already holds.
    pub fn from_snapshot(resource: Option<RootResource>) -> Self {
        let resource = resource.map(Arc::new);
        Self {
            probe: resource.clone(),
            resource,
        }
    }
}

impl<P: LinkProbe> CapabilityRules<P> {
    /// `probe` and `resource` must describe the same snapshot, otherwise link
    /// and version rules answer for different servers.
    pub(crate) fn new(probe: P, resource: Option<Arc<RootResource>>) -> Self {
        Self { probe, resource }
    }

    pub fn resource(&self) -> Option<&RootResource> {
        self.resource.as_deref()
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    pub async fn supports_channels(&self) -> bool {
        supports_channels(&self.probe).await
    }

    pub async fn supports_tenants(&self) -> bool {
        supports_tenants(&self.probe).await
    }

    pub fn use_post_for_channel_version_rule_test(&self) -> bool {
        use_post_for_channel_version_rule_test(self.resource())
    }

    pub fn has_project_deployment_settings_separation(&self) -> bool {
        has_project_deployment_settings_separation(self.resource())
    }

    pub async fn check(&self, capability: Capability) -> bool {
        capability.rule().evaluate(&self.probe, self.resource()).await
    }

    /// Evaluate every known capability concurrently.
    pub async fn report(&self) -> CapabilityReport {
        let answers = futures::future::join_all(
            Capability::ALL
                .into_iter()
                .map(|capability| async move { (capability, self.check(capability).await) }),
        )
        .await;

        CapabilityReport {
            server_version: self.resource().map(|root| root.version().to_string()),
            capabilities: answers.into_iter().collect(),
        }
    }
}
