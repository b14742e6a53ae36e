//! Containers for static storage of [`TypeInfo`].
//!
//! ## TypeInfoCell
//!
//! For non-generic types. Internally an [`OnceLock`], almost no overhead.
//!
//! ## GenericTypeInfoCell
//!
//! A `static CELL` inside a generic function is shared by every
//! instantiation, so this cell keeps one leaked [`TypeInfo`] per [`TypeId`]
//! behind a [`RwLock`].

use alloc::boxed::Box;
use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use crate::info::TypeInfo;
use crate::info::util::FixedHashMap;

/// Static storage of non-generic type information.
///
/// ## Example
///
/// ```
/// use od_dump::info::{TypeInfo, TypeInfoCell, Typed};
///
/// struct Token;
///
/// impl Typed for Token {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: TypeInfoCell = TypeInfoCell::new();
///         CELL.get_or_init(TypeInfo::opaque::<Token>)
///     }
/// }
///
/// assert_eq!(Token::type_info().type_name(), "Token");
/// ```
pub struct TypeInfoCell(OnceLock<TypeInfo>);

impl TypeInfoCell {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored info, generating it with `f` on first access.
    #[inline]
    pub fn get_or_init<F>(&self, f: F) -> &TypeInfo
    where
        F: FnOnce() -> TypeInfo,
    {
        self.0.get_or_init(f)
    }
}

/// Static storage of type information for generic types.
///
/// ## Example
///
/// ```
/// use od_dump::info::{GenericTypeInfoCell, TypeInfo, Typed};
///
/// struct Slot<T>(T);
///
/// impl<T: 'static> Typed for Slot<T> {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
///         CELL.get_or_insert::<Self>(TypeInfo::opaque::<Self>)
///     }
/// }
///
/// assert_eq!(<Slot<u8>>::type_info().type_name(), "Slot<u8>");
/// assert_eq!(<Slot<i8>>::type_info().type_name(), "Slot<i8>");
/// ```
pub struct GenericTypeInfoCell(RwLock<FixedHashMap<TypeId, &'static TypeInfo>>);

impl GenericTypeInfoCell {
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(FixedHashMap::with_hasher(
            crate::info::util::FIXED_STATE,
        )))
    }

    /// Returns the info for `G`, generating it with `f` if absent.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> TypeInfo) -> &TypeInfo {
        // Separate to reduce code compilation times
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    #[inline(never)]
    fn get_or_insert_by_type_id(
        &self,
        type_id: TypeId,
        f: impl FnOnce() -> TypeInfo,
    ) -> &TypeInfo {
        let found = self
            .0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied();
        match found {
            Some(info) => info,
            None => self.insert_by_type_id(type_id, f()),
        }
    }

    #[cold]
    #[inline(never)]
    fn insert_by_type_id(&self, type_id: TypeId, value: TypeInfo) -> &TypeInfo {
        let mut map = self.0.write().unwrap_or_else(PoisonError::into_inner);
        // Another thread may have won the race while `f` was running.
        *map.entry(type_id)
            .or_insert_with(|| Box::leak(Box::new(value)))
    }
}
