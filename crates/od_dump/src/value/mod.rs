// -----------------------------------------------------------------------------
// Modules

mod basic;
mod collection;
mod delegate;
mod dump;
mod enums;
mod markers;

// -----------------------------------------------------------------------------
// Exports

pub(crate) use basic::TemplateArg;

pub use basic::BasicValue;
pub use collection::{Mapping, Sequence};
pub use delegate::{Callback, DelegateInfo};
pub use dump::{Dump, DumpRef};
pub use enums::EnumValue;
pub use markers::{DbNull, Metadata, Object};
