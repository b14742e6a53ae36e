#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// The derive macro emits `::od_dump::...` paths; this alias lets the crate's
// own tests use `#[derive(Dump)]`.
extern crate self as od_dump;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod config;
mod engine;
mod error;
mod render;
mod sink;
mod value;

pub mod impls;
pub mod info;
pub mod policy;
pub mod registry;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use config::DumperConfig;
pub use engine::{DumpExt, DumpOptions, Dumper};
pub use error::{DumpError, ReadError, RegistrationError};
pub use sink::TextSink;
pub use value::{BasicValue, Callback, DbNull, DelegateInfo, Dump, DumpRef, EnumValue};
pub use value::{Mapping, Metadata, Object, Sequence};

pub use od_dump_derive::Dump;

/// Commonly used items.
pub mod prelude {
    pub use crate::info::{MemberInfo, MethodInfo, TypeInfo, TypeRef, Typed};
    pub use crate::policy::{DumpPolicy, FormatterRef, Toggle};
    pub use crate::{Dump, DumpExt, DumpOptions, Dumper};
}
