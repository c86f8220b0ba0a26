//! Configuration surface
//!
//! The orchestrator does not parse configuration files itself. An external
//! loader builds these shapes and hands them over:
//!
//! - [`Origins`] describes where streams can be pulled from when they are
//!   requested but not yet ingested.
//! - [`ApplicationConfig`] describes a single application namespace together
//!   with its configured publisher and provider entries.
//!
//! All types here are plain value types with chainable builder methods.

pub mod application;
pub mod origins;

pub use application::{ApplicationConfig, ProviderInfo, PublisherInfo, PublisherType};
pub use origins::{Origin, OriginPass, Origins};
