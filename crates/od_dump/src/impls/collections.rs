use alloc::boxed::Box;
use alloc::collections::{BTreeMap, BTreeSet, VecDeque};
use alloc::vec::Vec;
use core::hash::BuildHasher;
use std::collections::{HashMap, HashSet};

use crate::info::{GenericTypeInfoCell, TypeInfo, Typed};
use crate::{Dump, DumpRef, Mapping, Sequence};

macro_rules! impl_dump_sequence {
    ([$($params:tt)*] $ty:ty, len = |$this:ident| $len:expr, ordered = $ordered:literal) => {
        impl<$($params)*> Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(TypeInfo::sequence::<Self>)
            }
        }

        impl<$($params)*> Dump for $ty {
            #[inline]
            fn dump_type_info(&self) -> &'static TypeInfo {
                <Self as Typed>::type_info()
            }

            #[inline]
            fn dump_ref(&self) -> DumpRef<'_> {
                DumpRef::Sequence(self)
            }

            #[inline]
            fn as_dump(&self) -> &dyn Dump {
                self
            }
        }

        impl<$($params)*> Sequence for $ty {
            #[inline]
            fn len(&self) -> usize {
                let $this = self;
                $len
            }

            #[inline]
            fn item_info(&self) -> &'static TypeInfo {
                T::type_info()
            }

            fn items(&self) -> Box<dyn Iterator<Item = &dyn Dump> + '_> {
                Box::new(self.iter().map(|item| item as &dyn Dump))
            }

            #[inline]
            fn is_ordered(&self) -> bool {
                $ordered
            }
        }
    };
}

impl_dump_sequence!([T: Dump + Typed] Vec<T>, len = |v| Vec::len(v), ordered = true);
impl_dump_sequence!([T: Dump + Typed] VecDeque<T>, len = |v| VecDeque::len(v), ordered = true);
impl_dump_sequence!([T: Dump + Typed, const N: usize] [T; N], len = |_v| N, ordered = true);
impl_dump_sequence!([T: Dump + Typed] Box<[T]>, len = |v| <[T]>::len(v), ordered = true);
impl_dump_sequence!([T: Dump + Typed] BTreeSet<T>, len = |v| BTreeSet::len(v), ordered = true);
impl_dump_sequence!(
    [T: Dump + Typed, S: BuildHasher + 'static] HashSet<T, S>,
    len = |v| HashSet::len(v),
    ordered = false
);

macro_rules! impl_dump_map {
    ([$($params:tt)*] $ty:ty, ordered = $ordered:literal) => {
        impl<$($params)*> Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(TypeInfo::map::<Self>)
            }
        }

        impl<$($params)*> Dump for $ty {
            #[inline]
            fn dump_type_info(&self) -> &'static TypeInfo {
                <Self as Typed>::type_info()
            }

            #[inline]
            fn dump_ref(&self) -> DumpRef<'_> {
                DumpRef::Map(self)
            }

            #[inline]
            fn as_dump(&self) -> &dyn Dump {
                self
            }
        }

        impl<$($params)*> Mapping for $ty {
            #[inline]
            fn len(&self) -> usize {
                <$ty>::len(self)
            }

            #[inline]
            fn key_info(&self) -> &'static TypeInfo {
                K::type_info()
            }

            fn entries(&self) -> Box<dyn Iterator<Item = (&dyn Dump, &dyn Dump)> + '_> {
                Box::new(
                    self.iter()
                        .map(|(key, value)| (key as &dyn Dump, value as &dyn Dump)),
                )
            }

            #[inline]
            fn is_ordered(&self) -> bool {
                $ordered
            }
        }
    };
}

impl_dump_map!([K: Dump + Typed, V: Dump] BTreeMap<K, V>, ordered = true);
impl_dump_map!(
    [K: Dump + Typed, V: Dump, S: BuildHasher + 'static] HashMap<K, V, S>,
    ordered = false
);
