//! Module registry
//!
//! Two views over the same set of registered modules: a flat sequence in
//! registration order, used for lifecycle fan-out, and a per-kind map, used
//! for typed iteration. The registry itself is a plain struct; the
//! orchestrator serializes access through its module lock.

use std::collections::HashMap;
use std::sync::Arc;

use url::Url;

use super::module::{ModuleKind, OrchestratorModule, ProviderModule, ProviderType};

/// A registered module together with its role tag
///
/// The tag is captured at registration so fan-out loops do not re-query the
/// module.
pub(crate) struct ModuleEntry {
    kind: ModuleKind,
    module: Arc<dyn OrchestratorModule>,
}

impl ModuleEntry {
    pub(crate) fn kind(&self) -> ModuleKind {
        self.kind
    }

    pub(crate) fn module(&self) -> &Arc<dyn OrchestratorModule> {
        &self.module
    }
}

// Identity, not equality. Only allocation addresses are compared; vtable
// pointers are not stable across codegen units.
fn same_module(a: &Arc<dyn OrchestratorModule>, b: &Arc<dyn OrchestratorModule>) -> bool {
    std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
}

/// Registry of all control-plane modules
#[derive(Default)]
pub(crate) struct ModuleRegistry {
    /// Flat view, registration order across kinds
    entries: Vec<ModuleEntry>,

    /// Typed view, registration order within each kind
    by_kind: HashMap<ModuleKind, Vec<Arc<dyn OrchestratorModule>>>,
}

impl ModuleRegistry {
    /// Register a module
    ///
    /// A module already present (by reference identity) is rejected with a
    /// logged warning.
    pub(crate) fn register(&mut self, module: Arc<dyn OrchestratorModule>) -> bool {
        let kind = module.module_kind();

        if let Some(existing) = self.entries.iter().find(|e| same_module(&e.module, &module)) {
            if existing.kind == kind {
                tracing::warn!(module = %kind, "Module is already registered");
            } else {
                tracing::warn!(
                    registered = %existing.kind,
                    module = %kind,
                    "Module is already registered with a different kind"
                );
            }
            return false;
        }

        self.by_kind.entry(kind).or_default().push(Arc::clone(&module));
        self.entries.push(ModuleEntry { kind, module });

        tracing::debug!(module = %kind, "Module registered");
        true
    }

    /// Unregister a module
    ///
    /// Removes the first entry whose reference matches, from both views.
    pub(crate) fn unregister(&mut self, module: &Arc<dyn OrchestratorModule>) -> bool {
        let Some(index) = self
            .entries
            .iter()
            .position(|e| same_module(&e.module, module))
        else {
            tracing::warn!(module = %module.module_kind(), "Module is not registered");
            return false;
        };

        let entry = self.entries.remove(index);
        if let Some(list) = self.by_kind.get_mut(&entry.kind) {
            list.retain(|m| !same_module(m, &entry.module));
        }

        tracing::debug!(module = %entry.kind, "Module unregistered");
        true
    }

    /// All modules in registration order
    pub(crate) fn iter(&self) -> impl Iterator<Item = &ModuleEntry> {
        self.entries.iter()
    }

    /// Modules of one kind, in registration order within the kind
    pub(crate) fn of_kind(&self, kind: ModuleKind) -> &[Arc<dyn OrchestratorModule>] {
        self.by_kind.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First registered provider ingesting the protocol mapped to `scheme`
    pub(crate) fn provider_for_scheme(&self, scheme: &str) -> Option<Arc<dyn ProviderModule>> {
        let Some(wanted) = ProviderType::from_scheme(scheme) else {
            tracing::warn!(scheme = %scheme, "No provider protocol is mapped to scheme");
            return None;
        };

        for module in self.of_kind(ModuleKind::Provider) {
            let Some(provider) = Arc::clone(module).as_provider() else {
                tracing::warn!("Provider-kind module does not expose the provider interface");
                continue;
            };

            if provider.provider_type() == wanted {
                return Some(provider);
            }
        }

        tracing::warn!(provider = %wanted, scheme = %scheme, "No provider module registered for scheme");
        None
    }

    /// Provider lookup keyed on the scheme of a full URL
    pub(crate) fn provider_for_url(&self, url: &str) -> Option<Arc<dyn ProviderModule>> {
        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(error) => {
                tracing::warn!(url = %url, error = %error, "Could not parse pull URL");
                return None;
            }
        };

        self.provider_for_scheme(parsed.scheme())
    }
}
