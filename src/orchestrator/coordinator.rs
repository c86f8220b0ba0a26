//! Orchestrator implementation
//!
//! The central coordinator of the control plane. It owns three independent
//! lock domains and composes them to service stream pull requests.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::app::{Application, ApplicationId};
use crate::config::{ApplicationConfig, Origins};

use super::module::{OrchestratorModule, ProviderModule};
use super::origin::{OriginMap, ResolvedLocation};
use super::registry::ModuleRegistry;
use super::result::Outcome;
use super::table::AppTable;

/// Central coordinator for applications, modules and origins
///
/// A passive shared object: any task may invoke any operation. Three lock
/// domains guard the mutable state, and whenever an operation holds more
/// than one they are acquired in the fixed order modules, applications,
/// origins. Module callbacks run while locks are held and may block for as
/// long as they like, but must not call back into the orchestrator.
pub struct Orchestrator {
    /// Registered modules, both views
    modules: RwLock<ModuleRegistry>,

    /// Application table and id allocator
    apps: RwLock<AppTable>,

    /// Origin rules for the current configuration epoch
    origins: RwLock<OriginMap>,
}

impl Orchestrator {
    /// Create an orchestrator with no modules, applications or origins
    pub fn new() -> Self {
        Self {
            modules: RwLock::new(ModuleRegistry::default()),
            apps: RwLock::new(AppTable::default()),
            origins: RwLock::new(OriginMap::default()),
        }
    }

    /// Load the origin map from configuration
    ///
    /// Replaces the whole rule list atomically: a concurrent resolution
    /// sees either the previous epoch or the new one in full. Returns
    /// `true` iff the input was consumed without error; on error the
    /// previous epoch stays in place untouched.
    pub async fn prepare_origin_map(&self, origins: &Origins) -> bool {
        let map = match OriginMap::from_config(origins) {
            Ok(map) => map,
            Err(error) => {
                tracing::warn!(error = %error, "Rejecting origin configuration");
                return false;
            }
        };

        *self.origins.write().await = map;
        true
    }

    /// Register a control-plane module
    ///
    /// Returns `false` if the module is already registered.
    pub async fn register_module(&self, module: Arc<dyn OrchestratorModule>) -> bool {
        self.modules.write().await.register(module)
    }

    /// Unregister a previously registered module
    ///
    /// Returns `false` if the module is not registered.
    pub async fn unregister_module(&self, module: &Arc<dyn OrchestratorModule>) -> bool {
        self.modules.write().await.unregister(module)
    }

    /// Create an application from its configuration
    ///
    /// Every registered module is notified in registration order. If any
    /// module rejects the creation the table change is rolled back and
    /// [`Outcome::Failed`] is returned.
    pub async fn create_application(&self, config: ApplicationConfig) -> Outcome {
        let modules = self.modules.read().await;
        let mut apps = self.apps.write().await;

        apps.create_from_config(&modules, config).await
    }

    /// Delete an application by descriptor
    pub async fn delete_application(&self, app: &Application) -> Outcome {
        self.delete_application_by_id(app.id()).await
    }

    /// Delete an application by id
    ///
    /// Module failures during the delete fan-out are logged and reported as
    /// [`Outcome::Failed`], but the application is removed regardless.
    pub async fn delete_application_by_id(&self, id: ApplicationId) -> Outcome {
        let modules = self.modules.read().await;
        let mut apps = self.apps.write().await;

        apps.delete(&modules, id).await
    }

    /// Descriptor of the named application
    ///
    /// Returns the invalid descriptor if no such application exists; check
    /// with [`Application::is_valid`].
    pub async fn get_application(&self, name: &str) -> Application {
        self.apps.read().await.get_by_name(name)
    }

    /// Descriptor of the application with the given id
    pub async fn get_application_by_id(&self, id: ApplicationId) -> Application {
        self.apps.read().await.get_by_id(id)
    }

    /// Number of live applications
    pub async fn application_count(&self) -> usize {
        self.apps.read().await.len()
    }

    /// First registered provider for the protocol mapped to `scheme`
    pub async fn find_provider_for_scheme(&self, scheme: &str) -> Option<Arc<dyn ProviderModule>> {
        self.modules.read().await.provider_for_scheme(scheme)
    }

    /// First registered provider for the scheme of a full URL
    pub async fn find_provider_for_url(&self, url: &str) -> Option<Arc<dyn ProviderModule>> {
        self.modules.read().await.provider_for_url(url)
    }

    /// Resolve an `(app, stream)` pair against the origin map
    pub async fn resolve_location(
        &self,
        app_name: &str,
        stream_name: &str,
    ) -> Option<ResolvedLocation> {
        self.origins.read().await.resolve(app_name, stream_name)
    }

    /// Ask the matching provider to pull a stream from its origin
    ///
    /// Resolves the location against the origin map, finds the provider for
    /// the matched scheme, creates the application if it does not exist yet
    /// and dispatches the pull. A failed pull rolls the application back if
    /// and only if this call created it; an application that already
    /// existed is left in place. The pull is best effort and is not
    /// retried.
    pub async fn request_pull_stream(&self, app_name: &str, stream_name: &str) -> bool {
        let modules = self.modules.read().await;
        let mut apps = self.apps.write().await;
        let origins = self.origins.read().await;

        let Some(resolved) = origins.resolve(app_name, stream_name) else {
            tracing::error!(
                app = %app_name,
                stream = %stream_name,
                "No origin is configured for the stream"
            );
            return false;
        };

        let Some(provider) = modules.provider_for_scheme(resolved.scheme()) else {
            tracing::error!(
                app = %app_name,
                stream = %stream_name,
                scheme = %resolved.scheme(),
                "No provider is available for the stream"
            );
            return false;
        };

        let existing = apps.get_by_name(app_name);
        let (prior, app) = if existing.is_valid() {
            (Outcome::Exists, existing)
        } else {
            let (outcome, app) = apps.create_named(&modules, app_name).await;
            if outcome != Outcome::Succeeded {
                // Any other outcome means the application could not be
                // brought into existence for this pull.
                return false;
            }
            (Outcome::Succeeded, app)
        };

        tracing::info!(
            app = %app_name,
            stream = %stream_name,
            provider = %provider.provider_type(),
            urls = resolved.urls().len(),
            "Pulling stream from origin"
        );

        if provider.pull_stream(&app, stream_name, resolved.urls()).await {
            tracing::info!(app = %app_name, stream = %stream_name, "Stream pulled");
            return true;
        }

        tracing::error!(
            app = %app_name,
            stream = %stream_name,
            provider = %provider.provider_type(),
            "Could not pull stream"
        );

        // The application was created solely for this pull, so undo it.
        if prior == Outcome::Succeeded {
            apps.delete(&modules, app.id()).await;
        }

        false
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}
