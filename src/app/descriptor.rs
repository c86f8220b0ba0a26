//! Application descriptors

use crate::config::{ApplicationConfig, ProviderInfo, PublisherInfo, PublisherType};
use crate::orchestrator::module::ProviderType;

use super::id::{ApplicationId, INVALID_APPLICATION_ID};

/// Descriptor of an application namespace
///
/// Cheap to clone and safe to hand out by value. A descriptor returned by a
/// lookup is invalid when the lookup missed; check with [`is_valid`].
///
/// [`is_valid`]: Application::is_valid
#[derive(Debug, Clone)]
pub struct Application {
    id: ApplicationId,
    name: String,
    config: ApplicationConfig,
}

impl Application {
    /// The invalid descriptor, returned by lookups that miss
    pub(crate) fn invalid() -> Self {
        Self {
            id: INVALID_APPLICATION_ID,
            name: String::new(),
            config: ApplicationConfig::default(),
        }
    }

    /// Name-only descriptor, used when an application is created on demand
    /// by the pull path
    pub(crate) fn with_name(id: ApplicationId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            config: ApplicationConfig::default(),
        }
    }

    /// Fully configured descriptor
    pub(crate) fn with_config(id: ApplicationId, config: ApplicationConfig) -> Self {
        Self {
            id,
            name: config.name().to_string(),
            config,
        }
    }

    /// Whether this descriptor refers to a live application
    pub fn is_valid(&self) -> bool {
        self.id != INVALID_APPLICATION_ID
    }

    /// The application id
    pub fn id(&self) -> ApplicationId {
        self.id
    }

    /// The application name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The application configuration
    pub fn config(&self) -> &ApplicationConfig {
        &self.config
    }

    /// First configured publisher entry with the given egress type
    pub fn publisher(&self, kind: PublisherType) -> Option<&PublisherInfo> {
        self.config.publishers().iter().find(|p| p.kind == kind)
    }

    /// First configured provider entry with the given wire-protocol type
    pub fn provider(&self, kind: ProviderType) -> Option<&ProviderInfo> {
        self.config.providers().iter().find(|p| p.kind == kind)
    }
}
