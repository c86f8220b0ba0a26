//! Application identity and descriptors
//!
//! An application is a named namespace owning a set of live streams and a
//! configuration. Descriptors are copy-semantic value types: lookups return
//! them by value and callers use [`Application::is_valid`] to tell a hit
//! from a miss. Live descriptors are only ever built by the orchestrator,
//! which is the sole allocator of application ids.

pub mod descriptor;
pub mod id;

pub use descriptor::Application;
pub use id::{ApplicationId, INVALID_APPLICATION_ID, MAX_APPLICATION_ID, MIN_APPLICATION_ID};
