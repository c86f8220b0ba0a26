//! Orchestrator: the control plane coordinator
//!
//! The orchestrator owns three pieces of mutable state and composes them to
//! bring streams into existence on demand:
//!
//! ```text
//!                         ┌─────────────────────────────┐
//!                         │        Orchestrator         │
//!                         │  ┌───────────────────────┐  │
//!                         │  │    ModuleRegistry     │  │  providers,
//!                         │  ├───────────────────────┤  │  publishers,
//!                         │  │       AppTable        │  │  media router
//!                         │  ├───────────────────────┤  │
//!                         │  │       OriginMap       │  │
//!                         │  └───────────────────────┘  │
//!                         └──────────────┬──────────────┘
//!                                        │ request_pull_stream(app, stream)
//!                                        ▼
//!        resolve location ──► find provider ──► ensure application ──► pull
//!                                        │
//!                                        └── rollback on failure
//! ```
//!
//! # Locking
//!
//! Each piece of state is its own lock domain. Operations that hold more
//! than one acquire them in the fixed order modules → applications →
//! origins. Module callbacks are awaited while locks are held; modules must
//! not re-enter the orchestrator from inside a callback.

pub mod module;
pub mod origin;
pub mod result;

pub(crate) mod registry;
pub(crate) mod table;

mod coordinator;

pub use coordinator::Orchestrator;
pub use module::{ModuleKind, OrchestratorModule, ProviderModule, ProviderType};
pub use origin::{OriginRule, ResolvedLocation};
pub use result::Outcome;
