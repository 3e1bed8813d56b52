//! Capability detection against a live (mocked) root document

use crate::integration::mock_server::MockServerFixture;
use server_caps::capabilities::{supports_channels, supports_tenants};
use server_caps::{
    Capability, CapabilityClientBuilder, ClientConfig, Error, LinkPresence, LinkProbe,
};
use std::sync::Arc;

#[tokio::test]
async fn test_modern_server_supports_everything() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_root("2022.1.2584", &["Self", "SpaceHome"], 1)
        .await;
    let client = fixture.create_test_client();

    let caps = client.capabilities().await;
    assert!(caps.supports_channels().await);
    assert!(caps.supports_tenants().await);
    assert!(caps.use_post_for_channel_version_rule_test());
    assert!(caps.has_project_deployment_settings_separation());

    mock.assert_async().await;
}

#[tokio::test]
async fn test_legacy_server_without_spaces() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture.mock_root("3.3.2", &["Channels"], 1).await;
    let client = fixture.create_test_client();

    let report = client.report().await;
    assert_eq!(report.server_version.as_deref(), Some("3.3.2"));
    assert!(report.supports(Capability::Channels));
    assert!(!report.supports(Capability::Tenants));
    assert!(!report.supports(Capability::PostForChannelVersionRuleTest));
    assert!(!report.supports(Capability::ProjectDeploymentSettingsSeparation));
}

#[tokio::test]
async fn test_root_is_fetched_once_and_cached() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture.mock_root("2021.2", &["Tenants"], 1).await;
    let client = fixture.create_test_client();

    assert!(client.cached_root().is_none());
    assert_eq!(client.link_presence("Tenants").await, LinkPresence::Present);
    assert_eq!(client.link_presence("Channels").await, LinkPresence::NotFound);
    assert!(client.has_link("Tenants").await);
    let _ = client.report().await;

    assert!(client.cached_root().is_some());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_refresh_replaces_snapshot() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture.mock_root("2020.1", &["SpaceHome"], 2).await;
    let client = fixture.create_test_client();

    let first = client.root().await.expect("root resource");
    let second = client.refresh().await.expect("refresh");
    assert!(!Arc::ptr_eq(&first, &second));
    let cached = client.cached_root().expect("cached root");
    assert!(Arc::ptr_eq(&cached, &second));

    client.invalidate();
    assert!(client.cached_root().is_none());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_server_error_degrades_to_unknown_resource() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture.mock_root_error(503, "maintenance").await;
    let client = fixture.create_test_client();

    match client.refresh().await {
        Err(Error::Remote { status, message }) => {
            assert_eq!(status, 503);
            assert_eq!(message, "maintenance");
        }
        other => panic!("expected remote error, got {:?}", other.map(|r| r.version().to_string())),
    }

    assert_eq!(
        client.link_presence("Channels").await,
        LinkPresence::ResourceUnknown
    );

    let caps = client.capabilities().await;
    assert!(caps.resource().is_none());
    assert!(!caps.supports_channels().await);
    assert!(!caps.supports_tenants().await);
    assert!(caps.use_post_for_channel_version_rule_test());
    assert!(caps.has_project_deployment_settings_separation());
}

#[tokio::test]
async fn test_failed_fetch_is_not_retried_within_a_link_rule() {
    let fixture = MockServerFixture::new().await;
    let mock = {
        let mut server = fixture.server.lock().await;
        server
            .mock("GET", "/api")
            .with_status(503)
            .expect(1)
            .create_async()
            .await
    };
    let client = fixture.create_test_client();

    assert!(!supports_channels(&client).await);
    mock.assert_async().await;
    assert!(client.cached_root().is_none());
}

#[tokio::test]
async fn test_link_rule_on_client_uses_one_snapshot() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture.mock_root("2020.1", &["SpaceHome"], 1).await;
    let client = fixture.create_test_client();

    assert!(supports_tenants(&client).await);
    assert!(supports_channels(&client).await);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_malformed_root_document() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture.mock_root_error(200, "<html>login</html>").await;
    let client = fixture.create_test_client();

    assert!(matches!(
        client.refresh().await,
        Err(Error::Serialization(_))
    ));
    assert!(client.capabilities().await.has_project_deployment_settings_separation());
}

#[tokio::test]
async fn test_unparseable_server_version_fails_open() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture.mock_root("2022.1-ci0042", &[], 1).await;
    let client = fixture.create_test_client();

    let caps = client.capabilities().await;
    assert!(caps.use_post_for_channel_version_rule_test());
    assert!(caps.has_project_deployment_settings_separation());
    assert!(!caps.supports_channels().await);
}

#[tokio::test]
async fn test_unreachable_server() {
    let client = CapabilityClientBuilder::from_config(ClientConfig::default())
        .base_url("http://127.0.0.1:1")
        .timeout_secs(2)
        .build()
        .expect("client");

    assert!(matches!(client.refresh().await, Err(Error::Transport(_))));

    let report = client.report().await;
    assert_eq!(report.server_version, None);
    assert!(!report.supports(Capability::Channels));
    assert!(report.supports(Capability::PostForChannelVersionRuleTest));
}

#[tokio::test]
async fn test_seeded_root_skips_network() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture.mock_root("2022.1", &["Channels"], 0).await;

    let client = CapabilityClientBuilder::from_config(ClientConfig::default())
        .base_url(&fixture.base_url)
        .root_resource(server_caps::RootResource::new("3.2").with_links(["SpaceHome"]))
        .build()
        .expect("client");

    let caps = client.capabilities().await;
    assert!(caps.supports_channels().await);
    assert!(!caps.use_post_for_channel_version_rule_test());
    mock.assert_async().await;
}
