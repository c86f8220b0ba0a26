//! Origin pull walkthrough
//!
//! Run with: cargo run --example pull_origin
//!
//! Wires a minimal OVT provider into the orchestrator, loads an origin map
//! and requests a stream that is not being ingested yet. The orchestrator
//! resolves the location, creates the application on demand and hands the
//! spliced origin URLs to the provider. A second request against a refusing
//! provider shows the rollback of an application that was created solely
//! for the pull.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use streamctl::{
    Application, ModuleKind, Orchestrator, OrchestratorModule, Origin, OriginPass, Origins,
    ProviderModule, ProviderType,
};

/// Provider that accepts or refuses pulls on demand and logs what it is
/// asked to do
struct OvtProvider {
    accept: AtomicBool,
}

impl OvtProvider {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            accept: AtomicBool::new(true),
        })
    }
}

#[async_trait]
impl OrchestratorModule for OvtProvider {
    fn module_kind(&self) -> ModuleKind {
        ModuleKind::Provider
    }

    async fn on_create_application(&self, app: &Application) -> bool {
        println!("provider: application created: {} (id {})", app.name(), app.id());
        true
    }

    async fn on_delete_application(&self, app: &Application) -> bool {
        println!("provider: application deleted: {} (id {})", app.name(), app.id());
        true
    }

    fn as_provider(self: Arc<Self>) -> Option<Arc<dyn ProviderModule>> {
        Some(self)
    }
}

#[async_trait]
impl ProviderModule for OvtProvider {
    fn provider_type(&self) -> ProviderType {
        ProviderType::Ovt
    }

    async fn check_origin_availability(&self, _urls: &[String]) -> bool {
        true
    }

    async fn pull_stream(&self, app: &Application, stream_name: &str, urls: &[String]) -> bool {
        println!("provider: pull {}/{} from {:?}", app.name(), stream_name, urls);
        self.accept.load(Ordering::SeqCst)
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("streamctl=debug".parse().unwrap()),
        )
        .init();

    let orchestrator = Orchestrator::new();

    let provider = OvtProvider::new();
    orchestrator.register_module(provider.clone()).await;

    let origins = Origins::new()
        .origin(Origin::new(
            "/app/stream",
            OriginPass::new("ovt").url("origin.example:9000/another/and"),
        ))
        .origin(Origin::new(
            "/app2",
            OriginPass::new("ovt").url("origin.example:9000/fallback"),
        ));
    orchestrator.prepare_origin_map(&origins).await;

    println!("=== Pull a stream that is not ingested yet ===");
    let pulled = orchestrator.request_pull_stream("app", "stream_o").await;
    println!("pulled: {pulled}");

    let app = orchestrator.get_application("app").await;
    println!("application 'app' exists: {}", app.is_valid());
    println!();

    println!("=== A refused pull rolls back the application it created ===");
    provider.accept.store(false, Ordering::SeqCst);
    let pulled = orchestrator.request_pull_stream("app2", "stream_x").await;
    println!("pulled: {pulled}");
    println!(
        "application 'app2' exists: {}",
        orchestrator.get_application("app2").await.is_valid()
    );
}
