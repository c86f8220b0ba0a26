//! Module interfaces
//!
//! Control-plane modules (providers, publishers, the media router) register
//! with the orchestrator and are notified of application lifecycle events.
//! Modules run their own schedulers; the orchestrator neither owns nor
//! drives them. Callbacks are invoked while orchestrator locks are held, so
//! implementations must not call back into the orchestrator from within
//! them.

use std::sync::Arc;

use async_trait::async_trait;

use crate::app::Application;

/// Role of a module in the control plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleKind {
    /// Ingests streams from upstream sources
    Provider,
    /// Serves streams to downstream consumers
    Publisher,
    /// Transports frames between providers and publishers
    MediaRouter,
}

impl std::fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModuleKind::Provider => write!(f, "Provider"),
            ModuleKind::Publisher => write!(f, "Publisher"),
            ModuleKind::MediaRouter => write!(f, "MediaRouter"),
        }
    }
}

/// Wire-protocol type tag of a provider module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderType {
    /// RTMP ingest
    Rtmp,
    /// RTSP pull
    Rtsp,
    /// OVT origin-edge relay
    Ovt,
}

impl ProviderType {
    /// Map a URL scheme to a provider type
    ///
    /// Matching is case-insensitive. Returns `None` for schemes no provider
    /// protocol is mapped to.
    pub fn from_scheme(scheme: &str) -> Option<Self> {
        match scheme.to_ascii_lowercase().as_str() {
            "rtmp" => Some(ProviderType::Rtmp),
            "rtsp" => Some(ProviderType::Rtsp),
            "ovt" => Some(ProviderType::Ovt),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderType::Rtmp => write!(f, "RTMP"),
            ProviderType::Rtsp => write!(f, "RTSP"),
            ProviderType::Ovt => write!(f, "OVT"),
        }
    }
}

/// Capability set every registered module implements
///
/// Lifecycle callbacks return `true` on success. Returning `false` from
/// [`on_create_application`] aborts the creation and triggers rollback;
/// returning `false` from [`on_delete_application`] is logged and otherwise
/// ignored, since the table mutation is already committed.
///
/// [`on_create_application`]: OrchestratorModule::on_create_application
/// [`on_delete_application`]: OrchestratorModule::on_delete_application
#[async_trait]
pub trait OrchestratorModule: Send + Sync {
    /// The module's role, constant over its lifetime
    fn module_kind(&self) -> ModuleKind;

    /// An application was created
    async fn on_create_application(&self, app: &Application) -> bool;

    /// An application was deleted
    ///
    /// Also invoked during creation rollback, so modules must tolerate a
    /// delete for an application they never acknowledged creating.
    async fn on_delete_application(&self, app: &Application) -> bool;

    /// Access the provider interface of this module, if it has one
    ///
    /// Provider implementations return `Some(self)`; everything else keeps
    /// the default.
    fn as_provider(self: Arc<Self>) -> Option<Arc<dyn ProviderModule>> {
        None
    }
}

/// Additional capabilities of provider-kind modules
#[async_trait]
pub trait ProviderModule: OrchestratorModule {
    /// The wire protocol this provider ingests
    fn provider_type(&self) -> ProviderType;

    /// Probe whether any of the given origin URLs is reachable
    ///
    /// Reserved for a health-probe pathway. The pull path does not consult
    /// it.
    async fn check_origin_availability(&self, urls: &[String]) -> bool;

    /// Begin ingesting `stream_name` into `app` from one of `urls`
    ///
    /// Best effort: the orchestrator does not retry a refused pull.
    async fn pull_stream(&self, app: &Application, stream_name: &str, urls: &[String]) -> bool;
}
