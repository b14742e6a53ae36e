//! Text producers shared by the engine: format templates, scalar text,
//! collection lines and descriptor signatures.

mod template;
mod text;

pub(crate) use text::{
    basic, delegate, enumeration, hex_bytes, label, max_items, metadata, truncate, truncation_line,
};
