use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::sync::Arc;
use std::sync::OnceLock;

use crate::info::{GenericTypeInfoCell, TypeInfo, Typed};
use crate::{Dump, DumpRef};

macro_rules! impl_typed_wrapper {
    ($ty:ty) => {
        impl<T: ?Sized + Dump> Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(TypeInfo::wrapper::<Self>)
            }
        }
    };
}

macro_rules! impl_dump_pointee {
    ($($ty:ty),*) => {$(
        impl_typed_wrapper!($ty);

        impl<T: ?Sized + Dump> Dump for $ty {
            #[inline]
            fn dump_type_info(&self) -> &'static TypeInfo {
                <Self as Typed>::type_info()
            }

            #[inline]
            fn dump_ref(&self) -> DumpRef<'_> {
                DumpRef::Forward((**self).as_dump())
            }

            #[inline]
            fn as_dump(&self) -> &dyn Dump {
                self
            }
        }
    )*};
}

impl_dump_pointee!(Box<T>, Rc<T>, Arc<T>, &'static T);

impl<T: 'static> Typed for Option<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(TypeInfo::wrapper::<Self>)
    }
}

impl<T: Dump> Dump for Option<T> {
    fn dump_type_info(&self) -> &'static TypeInfo {
        <Self as Typed>::type_info()
    }

    fn dump_ref(&self) -> DumpRef<'_> {
        match self {
            Some(value) => DumpRef::Forward(value),
            None => DumpRef::Null,
        }
    }

    fn as_dump(&self) -> &dyn Dump {
        self
    }
}

impl<T: 'static> Typed for OnceLock<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(TypeInfo::wrapper::<Self>)
    }
}

/// An uninitialized cell renders as null.
impl<T: Dump> Dump for OnceLock<T> {
    fn dump_type_info(&self) -> &'static TypeInfo {
        <Self as Typed>::type_info()
    }

    fn dump_ref(&self) -> DumpRef<'_> {
        match self.get() {
            Some(value) => DumpRef::Forward(value),
            None => DumpRef::Null,
        }
    }

    fn as_dump(&self) -> &dyn Dump {
        self
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::sync::Arc;
    use std::sync::OnceLock;

    use crate::{BasicValue, Dump, DumpRef};

    fn forwarded(value: &dyn Dump) -> DumpRef<'_> {
        match value.dump_ref() {
            DumpRef::Forward(inner) => inner.dump_ref(),
            other => other,
        }
    }

    #[test]
    fn wrappers_forward_to_content() {
        assert!(matches!(forwarded(&Some(1_u8)), DumpRef::Basic(BasicValue::U8(1))));
        assert!(forwarded(&None::<u8>).is_null());
        assert!(matches!(forwarded(&Box::new(2_u8)), DumpRef::Basic(BasicValue::U8(2))));
        assert!(matches!(forwarded(&Arc::new(3_u8)), DumpRef::Basic(BasicValue::U8(3))));

        let boxed: Box<dyn Dump> = Box::new(4_u8);
        assert!(matches!(forwarded(&boxed), DumpRef::Basic(BasicValue::U8(4))));

        let cell = OnceLock::<u8>::new();
        assert!(forwarded(&cell).is_null());
        cell.set(5).unwrap();
        assert!(matches!(forwarded(&cell), DumpRef::Basic(BasicValue::U8(5))));
    }
}
