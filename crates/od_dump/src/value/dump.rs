use core::any::{Any, TypeId};
use core::fmt;

use crate::info::TypeInfo;
use crate::value::{BasicValue, DelegateInfo, EnumValue, Mapping, Metadata, Sequence};

// -----------------------------------------------------------------------------
// DumpRef

/// A borrowed view of a value, telling the engine how to render it.
pub enum DumpRef<'a> {
    /// An absent value, rendered as the null token.
    Null,
    Basic(BasicValue<'a>),
    Enum(EnumValue),
    Sequence(&'a dyn Sequence),
    Map(&'a dyn Mapping),
    Delegate(DelegateInfo),
    Metadata(Metadata<'a>),
    /// A transparent container; the engine renders the inner value instead.
    Forward(&'a dyn Dump),
    /// Walk the members described by the type's [`TypeInfo`].
    Composite,
    /// Render the type header only.
    Opaque,
}

impl DumpRef<'_> {
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// A short name of the variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Basic(_) => "Basic",
            Self::Enum(_) => "Enum",
            Self::Sequence(_) => "Sequence",
            Self::Map(_) => "Map",
            Self::Delegate(_) => "Delegate",
            Self::Metadata(_) => "Metadata",
            Self::Forward(_) => "Forward",
            Self::Composite => "Composite",
            Self::Opaque => "Opaque",
        }
    }
}

impl fmt::Debug for DumpRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic(value) => f.debug_tuple("Basic").field(value).finish(),
            Self::Enum(value) => f.debug_tuple("Enum").field(value).finish(),
            other => f.pad(other.kind()),
        }
    }
}

// -----------------------------------------------------------------------------
// Dump

/// A value that can be dumped.
///
/// Usually implemented by [`#[derive(Dump)]`](derive@crate::Dump), which
/// also implements [`Typed`](crate::info::Typed).
///
/// # Manual implementation
///
/// ```
/// use od_dump::info::{TypeInfo, TypeInfoCell, Typed};
/// use od_dump::{BasicValue, Dump, DumpExt, DumpRef};
///
/// struct Celsius(f64);
///
/// impl Typed for Celsius {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: TypeInfoCell = TypeInfoCell::new();
///         CELL.get_or_init(TypeInfo::basic::<Celsius>)
///     }
/// }
///
/// impl Dump for Celsius {
///     fn dump_type_info(&self) -> &'static TypeInfo {
///         Self::type_info()
///     }
///     fn dump_ref(&self) -> DumpRef<'_> {
///         DumpRef::Basic(BasicValue::F64(self.0))
///     }
///     fn as_dump(&self) -> &dyn Dump {
///         self
///     }
/// }
///
/// assert_eq!(Celsius(21.5).dump_text(), "21.5");
/// ```
pub trait Dump: Any {
    /// The [`TypeInfo`] of the underlying type.
    fn dump_type_info(&self) -> &'static TypeInfo;

    fn dump_ref(&self) -> DumpRef<'_>;

    /// Casts this type to a `&dyn Dump`.
    fn as_dump(&self) -> &dyn Dump;

    /// Exposes the value's items for types that are also enumerable.
    ///
    /// A composite returning `Some` renders its items after its members when
    /// its policy enables enumeration.
    fn as_sequence(&self) -> Option<&dyn Sequence> {
        None
    }

    /// Exposes the value's entries for types that are also maps.
    ///
    /// A composite returning `Some` with basic keys renders as a map.
    fn as_mapping(&self) -> Option<&dyn Mapping> {
        None
    }
}

impl dyn Dump {
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        <dyn Any>::is::<T>(self)
    }

    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    /// The concrete [`TypeId`] behind the trait object.
    #[inline]
    pub fn concrete_type_id(&self) -> TypeId {
        <dyn Any>::type_id(self)
    }

    /// The data address of the value, used as its identity.
    #[inline]
    pub fn identity(&self) -> usize {
        core::ptr::from_ref(self).cast::<()>().addr()
    }
}

impl fmt::Debug for dyn Dump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("dyn Dump")
            .field("type", &self.dump_type_info().type_path())
            .field("value", &self.dump_ref())
            .finish()
    }
}
