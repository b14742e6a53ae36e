//! Resolution of per-type dump configuration.
//!
//! A [`MetadataRegistry`] maps each type to a [`ClassDumpInfo`]: the type's
//! class policy and the shadow type whose annotations stand in for its own.
//! Shadows let a crate configure types it does not own.

// -----------------------------------------------------------------------------
// Modules

#[cfg(feature = "auto_register")]
mod auto_register;
mod class_info;
mod metadata_registry;

// -----------------------------------------------------------------------------
// Exports

#[cfg(feature = "auto_register")]
pub use auto_register::ShadowRegistration;
pub use class_info::{ClassDumpInfo, Origin};
pub use metadata_registry::MetadataRegistry;
