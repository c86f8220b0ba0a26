//! Control plane for a live media streaming engine
//!
//! `streamctl` coordinates the lifecycle of *applications* (named
//! namespaces for live streams), the *modules* that ingest and serve those
//! streams, and the *origin map* that tells the engine where to pull a
//! stream from when a viewer asks for one that is not being ingested yet.
//!
//! The crate is a pure in-memory control plane. It does not touch media
//! frames, codecs or sockets; provider and publisher modules plug in
//! through the [`OrchestratorModule`] and [`ProviderModule`] traits and do
//! that work in their own subsystems.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use streamctl::{Orchestrator, Origin, OriginPass, Origins};
//! # use streamctl::{Application, ModuleKind, OrchestratorModule, ProviderModule, ProviderType};
//! # use async_trait::async_trait;
//! # struct OvtProvider;
//! # #[async_trait]
//! # impl OrchestratorModule for OvtProvider {
//! #     fn module_kind(&self) -> ModuleKind { ModuleKind::Provider }
//! #     async fn on_create_application(&self, _app: &Application) -> bool { true }
//! #     async fn on_delete_application(&self, _app: &Application) -> bool { true }
//! #     fn as_provider(self: Arc<Self>) -> Option<Arc<dyn ProviderModule>> { Some(self) }
//! # }
//! # #[async_trait]
//! # impl ProviderModule for OvtProvider {
//! #     fn provider_type(&self) -> ProviderType { ProviderType::Ovt }
//! #     async fn check_origin_availability(&self, _urls: &[String]) -> bool { true }
//! #     async fn pull_stream(&self, _app: &Application, _stream: &str, _urls: &[String]) -> bool { true }
//! # }
//!
//! # async fn example() {
//! let orchestrator = Orchestrator::new();
//! orchestrator.register_module(Arc::new(OvtProvider)).await;
//!
//! let origins = Origins::new().origin(Origin::new(
//!     "/app/stream",
//!     OriginPass::new("ovt").url("origin.example:9000/app/stream"),
//! ));
//! orchestrator.prepare_origin_map(&origins).await;
//!
//! // Creates the application on demand and asks the OVT provider to pull
//! // from ovt://origin.example:9000/app/stream_key.
//! orchestrator.request_pull_stream("app", "stream_key").await;
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rust_2018_idioms)]

pub mod app;
pub mod config;
pub mod error;
pub mod orchestrator;

pub use app::{
    Application, ApplicationId, INVALID_APPLICATION_ID, MAX_APPLICATION_ID, MIN_APPLICATION_ID,
};
pub use config::{
    ApplicationConfig, Origin, OriginPass, Origins, ProviderInfo, PublisherInfo, PublisherType,
};
pub use error::{Error, Result};
pub use orchestrator::{
    ModuleKind, Orchestrator, OrchestratorModule, OriginRule, Outcome, ProviderModule,
    ProviderType, ResolvedLocation,
};
