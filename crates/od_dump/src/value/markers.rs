use crate::info::{MemberInfo, MethodInfo, TypeInfo, TypeInfoCell, TypeKind, Typed};
use crate::{BasicValue, Dump, DumpRef};

// -----------------------------------------------------------------------------
// Object

/// The universal root of every inheritance chain.
///
/// Never walked; a value of this exact type renders as its type name.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Object;

impl Typed for Object {
    fn type_info() -> &'static TypeInfo {
        static CELL: TypeInfoCell = TypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::new::<Object>(TypeKind::Root))
    }
}

impl Dump for Object {
    fn dump_type_info(&self) -> &'static TypeInfo {
        Self::type_info()
    }

    fn dump_ref(&self) -> DumpRef<'_> {
        DumpRef::Composite
    }

    fn as_dump(&self) -> &dyn Dump {
        self
    }
}

// -----------------------------------------------------------------------------
// DbNull

/// The database null marker; rendered as `DBNull`, not as null.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DbNull;

impl Typed for DbNull {
    fn type_info() -> &'static TypeInfo {
        static CELL: TypeInfoCell = TypeInfoCell::new();
        CELL.get_or_init(TypeInfo::basic::<DbNull>)
    }
}

impl Dump for DbNull {
    fn dump_type_info(&self) -> &'static TypeInfo {
        Self::type_info()
    }

    fn dump_ref(&self) -> DumpRef<'_> {
        DumpRef::Basic(BasicValue::DbNull)
    }

    fn as_dump(&self) -> &dyn Dump {
        self
    }
}

// -----------------------------------------------------------------------------
// Metadata

/// A reflection descriptor dumped as a value.
#[derive(Debug, Clone, Copy)]
pub enum Metadata<'a> {
    Type(&'a TypeInfo),
    Member(&'a MemberInfo),
    Method(&'a MethodInfo),
}

macro_rules! impl_dump_metadata {
    ($ty:ty => $variant:ident) => {
        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: TypeInfoCell = TypeInfoCell::new();
                CELL.get_or_init(|| TypeInfo::new::<$ty>(TypeKind::Metadata))
            }
        }

        impl Dump for $ty {
            fn dump_type_info(&self) -> &'static TypeInfo {
                <Self as Typed>::type_info()
            }

            fn dump_ref(&self) -> DumpRef<'_> {
                DumpRef::Metadata(Metadata::$variant(self))
            }

            fn as_dump(&self) -> &dyn Dump {
                self
            }
        }
    };
}

impl_dump_metadata!(TypeInfo => Type);
impl_dump_metadata!(MemberInfo => Member);
impl_dump_metadata!(MethodInfo => Method);
