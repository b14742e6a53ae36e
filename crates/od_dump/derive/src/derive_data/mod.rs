//! Provide some tools for parsing token stream.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod dump_derive;
mod dump_meta;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{FieldAttributes, TypeAttributes};
pub(crate) use attributes::{PropertyAccess, PropertyAttribute, StaticParam};

pub(crate) use dump_derive::{DumpData, DumpDerive, StructField};
pub(crate) use dump_meta::DumpMeta;
