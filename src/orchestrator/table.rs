//! Application table
//!
//! Owns the id allocator and the `id → descriptor` map, and runs the
//! lifecycle fan-out to registered modules. The table is a plain struct;
//! the orchestrator serializes access through its application lock and
//! passes the module registry in for notification.

use std::collections::HashMap;

use crate::app::{Application, ApplicationId, INVALID_APPLICATION_ID, MIN_APPLICATION_ID};
use crate::config::ApplicationConfig;

use super::registry::ModuleRegistry;
use super::result::Outcome;

/// Table of live applications plus the id allocator state
pub(crate) struct AppTable {
    apps: HashMap<ApplicationId, Application>,
    last_id: ApplicationId,
}

impl Default for AppTable {
    fn default() -> Self {
        Self {
            apps: HashMap::new(),
            last_id: MIN_APPLICATION_ID,
        }
    }
}

impl AppTable {
    /// Allocate the next unused application id
    ///
    /// The counter advances monotonically, wraps past the invalid sentinel
    /// and skips occupied slots. It is never reset on deletion, so ids are
    /// reused only after the full range has been traversed. Terminates as
    /// long as the table is not completely full, which configuration limits
    /// guarantee.
    fn next_app_id(&mut self) -> ApplicationId {
        loop {
            self.last_id = self.last_id.wrapping_add(1);

            if self.last_id == INVALID_APPLICATION_ID {
                self.last_id = MIN_APPLICATION_ID;
            }

            if !self.apps.contains_key(&self.last_id) {
                return self.last_id;
            }
        }
    }

    fn contains_name(&self, name: &str) -> bool {
        self.apps.values().any(|app| app.name() == name)
    }

    /// Descriptor for the named application, or the invalid descriptor
    pub(crate) fn get_by_name(&self, name: &str) -> Application {
        self.apps
            .values()
            .find(|app| app.name() == name)
            .cloned()
            .unwrap_or_else(Application::invalid)
    }

    /// Descriptor for the application with the given id, or the invalid
    /// descriptor
    pub(crate) fn get_by_id(&self, id: ApplicationId) -> Application {
        self.apps
            .get(&id)
            .cloned()
            .unwrap_or_else(Application::invalid)
    }

    /// Number of live applications
    pub(crate) fn len(&self) -> usize {
        self.apps.len()
    }

    /// Create a fully configured application
    pub(crate) async fn create_from_config(
        &mut self,
        registry: &ModuleRegistry,
        config: ApplicationConfig,
    ) -> Outcome {
        if self.contains_name(config.name()) {
            return Outcome::Exists;
        }

        let app = Application::with_config(self.next_app_id(), config);
        self.insert_and_notify(registry, app).await
    }

    /// Create a name-only application, returning its descriptor
    ///
    /// Used by the pull path when a requested application does not exist
    /// yet.
    pub(crate) async fn create_named(
        &mut self,
        registry: &ModuleRegistry,
        name: &str,
    ) -> (Outcome, Application) {
        if self.contains_name(name) {
            return (Outcome::Exists, self.get_by_name(name));
        }

        let app = Application::with_name(self.next_app_id(), name);
        let outcome = self.insert_and_notify(registry, app.clone()).await;
        (outcome, app)
    }

    /// Delete the application with the given id
    ///
    /// The removal is committed before modules are notified; a module
    /// reporting failure is logged and does not resurrect the descriptor.
    pub(crate) async fn delete(
        &mut self,
        registry: &ModuleRegistry,
        id: ApplicationId,
    ) -> Outcome {
        let Some(app) = self.apps.remove(&id) else {
            tracing::info!(id, "Application does not exist");
            return Outcome::NotExists;
        };

        tracing::info!(app = %app.name(), id = app.id(), "Deleting application");

        self.notify_delete(registry, &app).await
    }

    /// Insert a descriptor and notify every module in registration order
    ///
    /// Stops at the first module that rejects the creation and rolls back:
    /// the descriptor is removed and every registered module receives a
    /// delete notification, not only those that acknowledged the create.
    /// Modules may have stored partial state before failing, and the full
    /// fan-out drives them back to quiescence.
    async fn insert_and_notify(
        &mut self,
        registry: &ModuleRegistry,
        app: Application,
    ) -> Outcome {
        tracing::info!(app = %app.name(), id = app.id(), "Creating application");

        self.apps.insert(app.id(), app.clone());

        for entry in registry.iter() {
            if !entry.module().on_create_application(&app).await {
                tracing::error!(
                    module = %entry.kind(),
                    app = %app.name(),
                    "Module rejected the application, rolling back"
                );

                self.apps.remove(&app.id());
                self.notify_delete(registry, &app).await;
                return Outcome::Failed;
            }
        }

        Outcome::Succeeded
    }

    /// Fan a delete notification out to every registered module
    ///
    /// Module failures are logged and swallowed; the loop always completes.
    async fn notify_delete(&self, registry: &ModuleRegistry, app: &Application) -> Outcome {
        let mut outcome = Outcome::Succeeded;

        for entry in registry.iter() {
            if !entry.module().on_delete_application(app).await {
                tracing::error!(
                    module = %entry.kind(),
                    app = %app.name(),
                    "Module returned an error while deleting the application"
                );
                outcome = Outcome::Failed;
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::app::MAX_APPLICATION_ID;
    use crate::orchestrator::module::{ModuleKind, OrchestratorModule};

    use super::*;

    #[derive(Default)]
    struct CountingModule {
        creates: AtomicUsize,
        deletes: AtomicUsize,
        reject_create: AtomicBool,
    }

    #[async_trait]
    impl OrchestratorModule for CountingModule {
        fn module_kind(&self) -> ModuleKind {
            ModuleKind::Publisher
        }

        async fn on_create_application(&self, _app: &Application) -> bool {
            self.creates.fetch_add(1, Ordering::SeqCst);
            !self.reject_create.load(Ordering::SeqCst)
        }

        async fn on_delete_application(&self, _app: &Application) -> bool {
            self.deletes.fetch_add(1, Ordering::SeqCst);
            true
        }
    }

    fn registry_with(modules: &[Arc<CountingModule>]) -> ModuleRegistry {
        let mut registry = ModuleRegistry::default();
        for module in modules {
            registry.register(Arc::clone(module) as Arc<dyn OrchestratorModule>);
        }
        registry
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let registry = ModuleRegistry::default();
        let mut table = AppTable::default();

        let outcome = table
            .create_from_config(&registry, ApplicationConfig::new("live"))
            .await;
        assert_eq!(outcome, Outcome::Succeeded);

        let app = table.get_by_name("live");
        assert!(app.is_valid());
        assert_eq!(table.get_by_id(app.id()).name(), "live");
        assert!(!table.get_by_name("other").is_valid());
        assert!(!table.get_by_id(12345).is_valid());
    }

    #[tokio::test]
    async fn test_create_existing_name() {
        let module = Arc::new(CountingModule::default());
        let registry = registry_with(&[Arc::clone(&module)]);
        let mut table = AppTable::default();

        assert_eq!(
            table
                .create_from_config(&registry, ApplicationConfig::new("live"))
                .await,
            Outcome::Succeeded
        );
        assert_eq!(
            table
                .create_from_config(&registry, ApplicationConfig::new("live"))
                .await,
            Outcome::Exists
        );

        // The second attempt must not have notified anyone.
        assert_eq!(module.creates.load(Ordering::SeqCst), 1);
        assert_eq!(table.len(), 1);
    }

    #[tokio::test]
    async fn test_create_rollback_notifies_every_module() {
        let first = Arc::new(CountingModule::default());
        let second = Arc::new(CountingModule::default());
        second.reject_create.store(true, Ordering::SeqCst);
        let third = Arc::new(CountingModule::default());
        let registry = registry_with(&[
            Arc::clone(&first),
            Arc::clone(&second),
            Arc::clone(&third),
        ]);
        let mut table = AppTable::default();

        let outcome = table
            .create_from_config(&registry, ApplicationConfig::new("live"))
            .await;
        assert_eq!(outcome, Outcome::Failed);
        assert!(!table.get_by_name("live").is_valid());

        // Notification stopped at the rejecting module.
        assert_eq!(first.creates.load(Ordering::SeqCst), 1);
        assert_eq!(second.creates.load(Ordering::SeqCst), 1);
        assert_eq!(third.creates.load(Ordering::SeqCst), 0);

        // Rollback deletes fan out to every module regardless.
        assert_eq!(first.deletes.load(Ordering::SeqCst), 1);
        assert_eq!(second.deletes.load(Ordering::SeqCst), 1);
        assert_eq!(third.deletes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_delete_unknown_id() {
        let registry = ModuleRegistry::default();
        let mut table = AppTable::default();

        assert_eq!(table.delete(&registry, 42).await, Outcome::NotExists);
    }

    #[tokio::test]
    async fn test_create_delete_round_trip() {
        let module = Arc::new(CountingModule::default());
        let registry = registry_with(&[Arc::clone(&module)]);
        let mut table = AppTable::default();

        let (outcome, app) = table.create_named(&registry, "live").await;
        assert_eq!(outcome, Outcome::Succeeded);

        assert_eq!(table.delete(&registry, app.id()).await, Outcome::Succeeded);
        assert_eq!(table.len(), 0);
        assert!(!table.get_by_name("live").is_valid());

        assert_eq!(module.creates.load(Ordering::SeqCst), 1);
        assert_eq!(module.deletes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_id_allocator_skips_occupied_and_wraps() {
        let registry = ModuleRegistry::default();
        let mut table = AppTable::default();

        // Park the counter just below the top of the range and occupy both
        // the last allocatable id and the first one after the wrap.
        table.last_id = MAX_APPLICATION_ID - 1;
        table
            .apps
            .insert(MAX_APPLICATION_ID, Application::with_name(MAX_APPLICATION_ID, "top"));
        table.apps.insert(
            MIN_APPLICATION_ID,
            Application::with_name(MIN_APPLICATION_ID, "bottom"),
        );

        let (outcome, app) = table.create_named(&registry, "wrapped").await;
        assert_eq!(outcome, Outcome::Succeeded);
        assert_eq!(app.id(), MIN_APPLICATION_ID + 1);
        assert_ne!(app.id(), INVALID_APPLICATION_ID);
    }

    #[tokio::test]
    async fn test_ids_are_unique_and_valid() {
        let registry = ModuleRegistry::default();
        let mut table = AppTable::default();

        for name in ["a", "b", "c"] {
            assert_eq!(
                table
                    .create_from_config(&registry, ApplicationConfig::new(name))
                    .await,
                Outcome::Succeeded
            );
        }

        let mut ids: Vec<ApplicationId> = table.apps.keys().copied().collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 3);
        assert!(ids.iter().all(|id| *id != INVALID_APPLICATION_ID));
    }
}
