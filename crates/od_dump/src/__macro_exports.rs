// Items referenced by macro-generated code.

use alloc::string::{String, ToString};
use core::fmt;

use crate::Dump;

pub use bitflags;
pub use core::any::type_name_of_val;

#[cfg(feature = "auto_register")]
pub use inventory;

/// The [`DisplayFn`](crate::info::DisplayFn) emitted for `#[dump(display)]`.
pub fn display<T: Dump + fmt::Display>(value: &dyn Dump) -> Option<String> {
    value.downcast_ref::<T>().map(ToString::to_string)
}
