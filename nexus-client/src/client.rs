//! # The composed client
//!
//! A `Client` owns one shared transport and an explicit set of capability
//! modules. Composition is structural: each enabled capability is a held
//! module instance reached through an accessor, and an accessor for a
//! disabled capability answers `FeatureUnavailable` without ever touching the
//! wire. Different server editions enable different subsets; the licensed
//! edition adds custom metadata on top of the open-source set.

use crate::ops::{
    Artifacts, CustomMetadata, GlobalSettings, Logging, Privileges, Repositories, Roles, Users,
};
use crate::transport::Transport;
use nexus_error::{Error, Result};
use std::sync::Arc;

/// Names for the independently enableable operation groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Privileges,
    Roles,
    Users,
    Repositories,
    Artifacts,
    CustomMetadata,
    Logging,
    Settings,
}

impl Capability {
    /// The capabilities every edition ships with
    pub const BASE: [Capability; 7] = [
        Capability::Privileges,
        Capability::Roles,
        Capability::Users,
        Capability::Repositories,
        Capability::Artifacts,
        Capability::Logging,
        Capability::Settings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Privileges => "privileges",
            Capability::Roles => "roles",
            Capability::Users => "users",
            Capability::Repositories => "repositories",
            Capability::Artifacts => "artifacts",
            Capability::CustomMetadata => "custom_metadata",
            Capability::Logging => "logging",
            Capability::Settings => "settings",
        }
    }
}

/// Builder for a client with an explicit capability set.
pub struct ClientBuilder {
    transport: Arc<dyn Transport>,
    capabilities: Vec<Capability>,
}

impl ClientBuilder {
    pub fn enable(mut self, capability: Capability) -> Self {
        if !self.capabilities.contains(&capability) {
            self.capabilities.push(capability);
        }
        self
    }

    pub fn build(self) -> Client {
        let enabled = |cap: Capability| self.capabilities.contains(&cap);
        let t = &self.transport;

        Client {
            privileges: enabled(Capability::Privileges).then(|| Privileges::new(t.clone())),
            roles: enabled(Capability::Roles).then(|| Roles::new(t.clone())),
            users: enabled(Capability::Users).then(|| Users::new(t.clone())),
            repositories: enabled(Capability::Repositories)
                .then(|| Repositories::new(t.clone())),
            artifacts: enabled(Capability::Artifacts).then(|| Artifacts::new(t.clone())),
            metadata: enabled(Capability::CustomMetadata)
                .then(|| CustomMetadata::new(t.clone())),
            logging: enabled(Capability::Logging).then(|| Logging::new(t.clone())),
            settings: enabled(Capability::Settings).then(|| GlobalSettings::new(t.clone())),
        }
    }
}

/// One session against one server, exposing the union of its enabled
/// capability modules. Fully constructed before any operation can be issued.
pub struct Client {
    privileges: Option<Privileges>,
    roles: Option<Roles>,
    users: Option<Users>,
    repositories: Option<Repositories>,
    artifacts: Option<Artifacts>,
    metadata: Option<CustomMetadata>,
    logging: Option<Logging>,
    settings: Option<GlobalSettings>,
}

impl Client {
    /// Start a builder with no capabilities enabled.
    pub fn builder(transport: Arc<dyn Transport>) -> ClientBuilder {
        ClientBuilder {
            transport,
            capabilities: Vec::new(),
        }
    }

    /// The open-source edition: everything except custom metadata.
    pub fn oss(transport: Arc<dyn Transport>) -> Self {
        Capability::BASE
            .into_iter()
            .fold(Self::builder(transport), ClientBuilder::enable)
            .build()
    }

    /// The licensed edition: the full capability set.
    pub fn pro(transport: Arc<dyn Transport>) -> Self {
        Capability::BASE
            .into_iter()
            .fold(Self::builder(transport), ClientBuilder::enable)
            .enable(Capability::CustomMetadata)
            .build()
    }

    fn module<'a, M>(module: &'a Option<M>, capability: Capability) -> Result<&'a M> {
        module.as_ref().ok_or_else(|| {
            Error::feature_unavailable()
                .with_operation("client::capability")
                .with_context("capability", capability.as_str())
        })
    }

    pub fn privileges(&self) -> Result<&Privileges> {
        Self::module(&self.privileges, Capability::Privileges)
    }

    pub fn roles(&self) -> Result<&Roles> {
        Self::module(&self.roles, Capability::Roles)
    }

    pub fn users(&self) -> Result<&Users> {
        Self::module(&self.users, Capability::Users)
    }

    pub fn repositories(&self) -> Result<&Repositories> {
        Self::module(&self.repositories, Capability::Repositories)
    }

    pub fn artifacts(&self) -> Result<&Artifacts> {
        Self::module(&self.artifacts, Capability::Artifacts)
    }

    pub fn custom_metadata(&self) -> Result<&CustomMetadata> {
        Self::module(&self.metadata, Capability::CustomMetadata)
    }

    pub fn logging(&self) -> Result<&Logging> {
        Self::module(&self.logging, Capability::Logging)
    }

    pub fn settings(&self) -> Result<&GlobalSettings> {
        Self::module(&self.settings, Capability::Settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::stub::StubTransport;
    use nexus_error::ErrorKind;

    #[tokio::test]
    async fn test_oss_edition_denies_custom_metadata_without_a_request() {
        let transport = Arc::new(StubTransport::new());
        let client = Client::oss(transport.clone());

        let err = client.custom_metadata().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FeatureUnavailable);
        assert_eq!(err.code(), 108);
        assert_eq!(
            err.context(),
            &[("capability", "custom_metadata".to_string())]
        );
        assert!(transport.requests().is_empty(), "no wire call may happen");
    }

    #[test]
    fn test_pro_edition_enables_everything() {
        let client = Client::pro(Arc::new(StubTransport::new()));
        assert!(client.privileges().is_ok());
        assert!(client.roles().is_ok());
        assert!(client.users().is_ok());
        assert!(client.repositories().is_ok());
        assert!(client.artifacts().is_ok());
        assert!(client.custom_metadata().is_ok());
        assert!(client.logging().is_ok());
        assert!(client.settings().is_ok());
    }

    #[test]
    fn test_explicit_subset() {
        let client = Client::builder(Arc::new(StubTransport::new()))
            .enable(Capability::Roles)
            .build();

        assert!(client.roles().is_ok());
        assert_eq!(
            client.users().unwrap_err().kind(),
            ErrorKind::FeatureUnavailable
        );
    }

    #[tokio::test]
    async fn test_enabled_capability_reaches_the_transport() {
        let transport = Arc::new(StubTransport::new().respond(200, "<roles/>"));
        let client = Client::oss(transport.clone());

        let listing = client.roles().unwrap().list().await.unwrap();
        assert_eq!(listing, "<roles/>");
        assert_eq!(transport.requests().len(), 1);
    }
}
