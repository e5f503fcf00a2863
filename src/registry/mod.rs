//! Declarative registries of what gets deployed.
//!
//! Both registries keep insertion order (the deployment order) and are unique
//! by key: inserting an existing key replaces the entry in place.
pub mod artifacts;
pub mod defaults;
pub mod hooks;

pub use artifacts::{ArtifactEntry, ArtifactRegistry};
pub use hooks::{HookEntry, HookRegistry};
