//! Declarative dump settings.
//!
//! A [`DumpPolicy`] can be attached to a type (its class policy), to a member,
//! or passed by the caller for a single dump.

// -----------------------------------------------------------------------------
// Modules

mod dump_policy;
mod toggle;

// -----------------------------------------------------------------------------
// Exports

pub use dump_policy::{DumpPolicy, FormatterRef};
pub use toggle::Toggle;
