//! Reflection descriptors consumed by the dump engine.
//!
//! Every dumpable type exposes a static [`TypeInfo`] through [`Typed`]:
//! its identity, kind, base type, members, methods and class policy.
//! `#[derive(Dump)]` generates it; the cells in this module store it.

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod enum_info;
mod member_info;
mod method_info;
mod type_info;
mod typed;

pub(crate) mod util;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeInfoCell, TypeInfoCell};
pub use enum_info::{EnumInfo, EnumVariant};
pub use member_info::{MemberInfo, MemberKind, MemberValue};
pub use method_info::{MethodInfo, MethodReceiver, ParamType};
pub use type_info::{BaseInfo, DisplayFn, TypeInfo, TypeKind};
pub use typed::{TypeRef, Typed};
