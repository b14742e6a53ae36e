use alloc::boxed::Box;

use crate::Dump;
use crate::info::TypeInfo;

/// A finite enumerable collection.
pub trait Sequence {
    fn len(&self) -> usize;

    /// The info of the item type; `u8` items render as a hex byte dump.
    fn item_info(&self) -> &'static TypeInfo;

    fn items(&self) -> Box<dyn Iterator<Item = &dyn Dump> + '_>;

    /// `false` for hash-ordered collections, whose items are sorted before
    /// rendering so the output stays deterministic.
    fn is_ordered(&self) -> bool {
        true
    }
}

/// A finite key-value collection.
pub trait Mapping {
    fn len(&self) -> usize;

    fn key_info(&self) -> &'static TypeInfo;

    fn entries(&self) -> Box<dyn Iterator<Item = (&dyn Dump, &dyn Dump)> + '_>;

    /// `false` for hash-ordered maps, whose entries are sorted by key text.
    fn is_ordered(&self) -> bool {
        true
    }
}
