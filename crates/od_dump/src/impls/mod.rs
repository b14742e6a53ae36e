//! [`Dump`](crate::Dump) implementations for foreign types.
//!
//! ## Implemented Menu
//!
//! - basic:
//!     - `bool`, `char`, `i8`-`i128`, `u8`-`u128`, `isize`, `usize`, `f32`, `f64`
//!     - `NonZero`: I8-I128, U8-U128, Isize, Usize
//!     - `&'static str`, `String`, `Cow<'static, str>`, `Box<str>`
//!     - `core::time::Duration`, `std::time::SystemTime`
//!     - `*const T`, `*mut T`
//! - wrappers (rendered as their content):
//!     - `Option<T>`, `Box<T>`, `Rc<T>`, `Arc<T>`, `&'static T`, `OnceLock<T>`
//! - sequences:
//!     - `Vec<T>`, `VecDeque<T>`, `[T; N]`, `Box<[T]>`, `BTreeSet<T>`, `HashSet<T, S>`
//! - maps:
//!     - `BTreeMap<K, V>`, `HashMap<K, V, S>`
//! - opaque:
//!     - `()`, `PhantomData<T>`
//! - optional:
//!     - `chrono`: `DateTime<Tz>`, `NaiveDateTime`, `NaiveDate`, `NaiveTime`
//!     - `uuid`: `Uuid`
//!     - `url`: `Url`
//!     - `decimal`: `rust_decimal::Decimal`
//!
//! Bit-flag types generated by `bitflags` opt in with
//! [`impl_dump_bitflags!`](crate::impl_dump_bitflags).

// -----------------------------------------------------------------------------
// Modules

mod bitflags;
mod collections;
mod external;
mod primitives;
mod wrappers;

// -----------------------------------------------------------------------------
// Exports

pub use bitflags::FlagBits;
