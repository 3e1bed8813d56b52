//! Detection patterns and the concrete capability predicates.

use crate::probe::{LinkPresence, LinkProbe};
use crate::resource::RootResource;
use crate::version::SemanticVersion;

pub const CHANNELS_LINK: &str = "Channels";
pub const TENANTS_LINK: &str = "Tenants";
/// Advertised by every server that has spaces; channels and tenants always
/// exist once spaces do.
pub const SPACE_HOME_LINK: &str = "SpaceHome";

/// Servers from 3.4 accept POST for channel version rule tests; older ones GET.
pub const CHANNEL_VERSION_RULE_POST_SINCE: SemanticVersion = SemanticVersion::new(3, 4);
/// Projects and their deployment settings are separate resources from 2021.2.
pub const PROJECT_DEPLOYMENT_SETTINGS_SINCE: SemanticVersion = SemanticVersion::new(2021, 2);

/// Link-with-fallback: the feature is available if the primary link is
/// advertised, otherwise if the fallback link is.
///
/// The probe is asked at most twice, and only once when the primary answer
/// already settles it: a present primary means supported, an unknown resource
/// has no fallback link either, so it means not supported.
pub async fn supports_via_link<P>(probe: &P, primary: &str, fallback: &str) -> bool
where
    P: LinkProbe + ?Sized,
{
    match probe.link_presence(primary).await {
        LinkPresence::Present => {
            tracing::debug!(link = primary, "capability supported: primary link present");
            true
        }
        LinkPresence::ResourceUnknown => {
            tracing::debug!(link = primary, fallback, "no root resource, link rule not supported");
            false
        }
        LinkPresence::NotFound => {
            let supported = probe.has_link(fallback).await;
            tracing::debug!(
                link = primary,
                fallback,
                supported,
                "primary link missing, decided by fallback link"
            );
            supported
        }
    }
}

/// Version threshold with fail-open: an unknown server or a version string that
/// does not parse is treated as new enough.
pub fn meets_threshold(resource: Option<&RootResource>, threshold: SemanticVersion) -> bool {
    let Some(root) = resource else {
        tracing::debug!(%threshold, "fail-open: no root resource");
        return true;
    };
    match root.semantic_version() {
        Some(version) => version >= threshold,
        None => {
            tracing::debug!(
                version = root.version(),
                %threshold,
                "fail-open: unparseable server version"
            );
            true
        }
    }
}

pub async fn supports_channels<P: LinkProbe + ?Sized>(probe: &P) -> bool {
    supports_via_link(probe, CHANNELS_LINK, SPACE_HOME_LINK).await
}

pub async fn supports_tenants<P: LinkProbe + ?Sized>(probe: &P) -> bool {
    supports_via_link(probe, TENANTS_LINK, SPACE_HOME_LINK).await
}

pub fn use_post_for_channel_version_rule_test(resource: Option<&RootResource>) -> bool {
    meets_threshold(resource, CHANNEL_VERSION_RULE_POST_SINCE)
}

pub fn has_project_deployment_settings_separation(resource: Option<&RootResource>) -> bool {
    meets_threshold(resource, PROJECT_DEPLOYMENT_SETTINGS_SINCE)
}
