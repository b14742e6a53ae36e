use core::any::TypeId;
use core::fmt;
use core::hash::{Hash, Hasher};

use crate::info::TypeInfo;

/// Static access to a type's [`TypeInfo`].
///
/// Implemented by `#[derive(Dump)]` and by every built-in [`Dump`](crate::Dump)
/// type. Use [`Dump::dump_type_info`](crate::Dump::dump_type_info) when only
/// a `dyn Dump` is available.
pub trait Typed: 'static {
    fn type_info() -> &'static TypeInfo;
}

/// A lazily resolved reference to a type's [`TypeInfo`].
///
/// Attributes must be constructible in `const` contexts, so they name types
/// through the [`Typed::type_info`] function pointer instead of the info itself.
#[derive(Clone, Copy)]
pub struct TypeRef(fn() -> &'static TypeInfo);

impl TypeRef {
    #[inline]
    pub const fn of<T: Typed>() -> Self {
        Self(T::type_info)
    }

    #[inline]
    pub const fn from_fn(func: fn() -> &'static TypeInfo) -> Self {
        Self(func)
    }

    #[inline]
    pub fn get(self) -> &'static TypeInfo {
        (self.0)()
    }

    #[inline]
    pub fn type_id(self) -> TypeId {
        self.get().type_id()
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.type_id() == other.type_id()
    }
}

impl Eq for TypeRef {}

impl Hash for TypeRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id().hash(state);
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeRef").field(&self.get().type_path()).finish()
    }
}
