//! See [`Dump`](derive_dump).
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static DUMP_ATTRIBUTE_NAME: &str = "dump";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Dump Derivation
///
/// `#[derive(Dump)]` implements `Typed` and `Dump`.
///
/// - Structs with named fields, tuple structs and unit structs become
///   composites. Tuple fields are named `0`, `1`, ...
/// - Fieldless enums become discrete enumerations.
/// - Enums carrying data are rejected.
///
/// Generic parameters gain a `'static` bound, and every member type must
/// implement `Dump`. Lifetime parameters are not supported.
///
/// ## Policy Keys
///
/// Accepted on the type, on fields and inside `property(...)`:
///
/// - `order = expr`: sort position; negative orders render after
///   derived members, `i32::MIN` renders last.
/// - `skip` / `no_skip`
/// - `dump_nulls` / `skip_nulls`
/// - `recurse` / `no_recurse`
/// - `enumerate` / `no_enumerate`
/// - `default_member = "name"`: the member shown when recursion is off.
/// - `max_depth = expr`, `max_length = expr`
/// - `mask`, `mask_text = "..."`
/// - `label = "{name} = "`
/// - `format = "{:>4}"` or `display_format`
/// - `formatter = "method"`, optionally with `formatter_type = Path`
///
/// ```rust, ignore
/// #[derive(Dump)]
/// #[dump(skip_nulls, max_depth = 3)]
/// struct Order {
///     #[dump(order = 0)]
///     id: u32,
///     #[dump(mask)]
///     card: String,
///     #[dump(order = i32::MIN)]
///     note: Option<String>,
/// }
/// ```
///
/// ## Field Keys
///
/// - `base`: the field holds the base-type part of the value. At most one.
/// - `overridable`: derived members of the same name replace it.
/// - `ignore`: the field is not described at all.
/// - `synthesized`: described but never rendered. `PhantomData` fields are
///   synthesized automatically.
/// - `write_only`, `indexed`: described but never rendered.
///
/// ## Type Keys
///
/// - `opaque`: render the header only.
/// - `display`: the type implements `Display`, used by `display_format`.
/// - `sequence` / `mapping`: the type implements `Sequence` / `Mapping`.
/// - `shadow = Type`: annotations are taken from another type.
/// - `methods(a, b)`: instance methods `fn(&self) -> impl Display`.
/// - `static_methods(a: Type, b: dyn)`: methods `fn(&Type) -> impl Display`,
///   or `fn(&dyn Dump) -> impl Display` for `dyn`.
/// - `property(name = "a", get = path, ...)`: a computed member. The
///   getter returns an owned value. Add `fallible` for
///   `Result<V, impl Display>` or `guarded` for `Result<V, ReadError>`,
///   `overridable`, and any policy key.
///
/// ```rust, ignore
/// #[derive(Dump)]
/// #[dump(methods(short), property(name = "area", get = Rect::area))]
/// struct Rect {
///     width: u32,
///     height: u32,
/// }
///
/// impl Rect {
///     fn area(&self) -> u32 { self.width * self.height }
///     fn short(&self) -> String { format!("{}x{}", self.width, self.height) }
/// }
/// ```
#[proc_macro_derive(Dump, attributes(dump))]
pub fn derive_dump(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    let derive_data = match derive_data::DumpDerive::from_input(&ast) {
        Ok(data) => data,
        Err(err) => return err.into_compile_error().into(),
    };

    impls::impl_dump(&derive_data).into()
}
