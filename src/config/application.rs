//! Application configuration
//!
//! An application configuration names a namespace and lists the publisher
//! and provider entries configured for it. The orchestrator treats the
//! entries as opaque beyond their discriminant tag, which is what typed
//! retrieval matches on.

use crate::orchestrator::module::ProviderType;

/// Egress type tag carried by configured publisher entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PublisherType {
    /// WebRTC egress
    Webrtc,
    /// HTTP Live Streaming egress
    Hls,
    /// MPEG-DASH egress
    Dash,
    /// OVT relay egress
    Ovt,
}

impl std::fmt::Display for PublisherType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PublisherType::Webrtc => write!(f, "WebRTC"),
            PublisherType::Hls => write!(f, "HLS"),
            PublisherType::Dash => write!(f, "DASH"),
            PublisherType::Ovt => write!(f, "OVT"),
        }
    }
}

/// A configured publisher entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublisherInfo {
    /// Egress type tag
    pub kind: PublisherType,
    /// Listen port, if the entry carries one
    pub port: Option<u16>,
}

impl PublisherInfo {
    /// Create a publisher entry
    pub fn new(kind: PublisherType) -> Self {
        Self { kind, port: None }
    }

    /// Set the listen port
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }
}

/// A configured provider entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderInfo {
    /// Wire-protocol type tag
    pub kind: ProviderType,
}

impl ProviderInfo {
    /// Create a provider entry
    pub fn new(kind: ProviderType) -> Self {
        Self { kind }
    }
}

/// Configuration for a single application namespace
#[derive(Debug, Clone, Default)]
pub struct ApplicationConfig {
    name: String,
    publishers: Vec<PublisherInfo>,
    providers: Vec<ProviderInfo>,
}

impl ApplicationConfig {
    /// Create a configuration for the named application
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            publishers: Vec::new(),
            providers: Vec::new(),
        }
    }

    /// Append a publisher entry
    pub fn publisher(mut self, publisher: PublisherInfo) -> Self {
        self.publishers.push(publisher);
        self
    }

    /// Append a provider entry
    pub fn provider(mut self, provider: ProviderInfo) -> Self {
        self.providers.push(provider);
        self
    }

    /// The application name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Configured publisher entries, in configuration order
    pub fn publishers(&self) -> &[PublisherInfo] {
        &self.publishers
    }

    /// Configured provider entries, in configuration order
    pub fn providers(&self) -> &[ProviderInfo] {
        &self.providers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = ApplicationConfig::new("live")
            .publisher(PublisherInfo::new(PublisherType::Webrtc).port(3333))
            .publisher(PublisherInfo::new(PublisherType::Hls).port(8080))
            .provider(ProviderInfo::new(ProviderType::Rtmp));

        assert_eq!(config.name(), "live");
        assert_eq!(config.publishers().len(), 2);
        assert_eq!(config.publishers()[0].port, Some(3333));
        assert_eq!(config.providers().len(), 1);
        assert_eq!(config.providers()[0].kind, ProviderType::Rtmp);
    }

    #[test]
    fn test_default_is_empty() {
        let config = ApplicationConfig::default();
        assert!(config.name().is_empty());
        assert!(config.publishers().is_empty());
        assert!(config.providers().is_empty());
    }
}
