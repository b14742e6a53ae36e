use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::string::String;
use core::marker::PhantomData;
use core::num::{NonZeroI8, NonZeroI16, NonZeroI32, NonZeroI64, NonZeroI128, NonZeroIsize};
use core::num::{NonZeroU8, NonZeroU16, NonZeroU32, NonZeroU64, NonZeroU128, NonZeroUsize};
use core::time::Duration;
use std::time::SystemTime;

use crate::info::{GenericTypeInfoCell, TypeInfo, TypeInfoCell, Typed};
use crate::{BasicValue, Dump, DumpRef};

macro_rules! impl_typed_basic {
    ($ty:ty) => {
        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: TypeInfoCell = TypeInfoCell::new();
                CELL.get_or_init(TypeInfo::basic::<$ty>)
            }
        }
    };
}

macro_rules! impl_dump_basic {
    ($($ty:ty => |$this:ident| $value:expr),* $(,)?) => {$(
        impl_typed_basic!($ty);

        impl Dump for $ty {
            #[inline]
            fn dump_type_info(&self) -> &'static TypeInfo {
                <Self as Typed>::type_info()
            }

            #[inline]
            fn dump_ref(&self) -> DumpRef<'_> {
                let $this = self;
                DumpRef::Basic($value)
            }

            #[inline]
            fn as_dump(&self) -> &dyn Dump {
                self
            }
        }
    )*};
}

impl_dump_basic!(
    bool => |v| BasicValue::Bool(*v),
    char => |v| BasicValue::Char(*v),
    i8 => |v| BasicValue::I8(*v),
    i16 => |v| BasicValue::I16(*v),
    i32 => |v| BasicValue::I32(*v),
    i64 => |v| BasicValue::I64(*v),
    i128 => |v| BasicValue::I128(*v),
    isize => |v| BasicValue::Isize(*v),
    u8 => |v| BasicValue::U8(*v),
    u16 => |v| BasicValue::U16(*v),
    u32 => |v| BasicValue::U32(*v),
    u64 => |v| BasicValue::U64(*v),
    u128 => |v| BasicValue::U128(*v),
    usize => |v| BasicValue::Usize(*v),
    f32 => |v| BasicValue::F32(*v),
    f64 => |v| BasicValue::F64(*v),
    NonZeroI8 => |v| BasicValue::I8(v.get()),
    NonZeroI16 => |v| BasicValue::I16(v.get()),
    NonZeroI32 => |v| BasicValue::I32(v.get()),
    NonZeroI64 => |v| BasicValue::I64(v.get()),
    NonZeroI128 => |v| BasicValue::I128(v.get()),
    NonZeroIsize => |v| BasicValue::Isize(v.get()),
    NonZeroU8 => |v| BasicValue::U8(v.get()),
    NonZeroU16 => |v| BasicValue::U16(v.get()),
    NonZeroU32 => |v| BasicValue::U32(v.get()),
    NonZeroU64 => |v| BasicValue::U64(v.get()),
    NonZeroU128 => |v| BasicValue::U128(v.get()),
    NonZeroUsize => |v| BasicValue::Usize(v.get()),
    &'static str => |v| BasicValue::Str(v),
    String => |v| BasicValue::Str(v.as_str()),
    Cow<'static, str> => |v| BasicValue::Str(v.as_ref()),
    Box<str> => |v| BasicValue::Str(v),
    Duration => |v| BasicValue::Duration(*v),
    SystemTime => |v| BasicValue::SystemTime(*v),
);

// -----------------------------------------------------------------------------
// Pointers

macro_rules! impl_dump_pointer {
    ($($ptr:ty),*) => {$(
        impl<T: ?Sized + 'static> Typed for $ptr {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(TypeInfo::basic::<Self>)
            }
        }

        impl<T: ?Sized + 'static> Dump for $ptr {
            fn dump_type_info(&self) -> &'static TypeInfo {
                <Self as Typed>::type_info()
            }

            fn dump_ref(&self) -> DumpRef<'_> {
                DumpRef::Basic(BasicValue::Pointer(self.addr()))
            }

            fn as_dump(&self) -> &dyn Dump {
                self
            }
        }
    )*};
}

impl_dump_pointer!(*const T, *mut T);

// -----------------------------------------------------------------------------
// Opaque

impl Typed for () {
    fn type_info() -> &'static TypeInfo {
        static CELL: TypeInfoCell = TypeInfoCell::new();
        CELL.get_or_init(TypeInfo::opaque::<()>)
    }
}

impl Dump for () {
    fn dump_type_info(&self) -> &'static TypeInfo {
        <Self as Typed>::type_info()
    }

    fn dump_ref(&self) -> DumpRef<'_> {
        DumpRef::Opaque
    }

    fn as_dump(&self) -> &dyn Dump {
        self
    }
}

impl<T: ?Sized + 'static> Typed for PhantomData<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(TypeInfo::opaque::<Self>)
    }
}

impl<T: ?Sized + 'static> Dump for PhantomData<T> {
    fn dump_type_info(&self) -> &'static TypeInfo {
        <Self as Typed>::type_info()
    }

    fn dump_ref(&self) -> DumpRef<'_> {
        DumpRef::Opaque
    }

    fn as_dump(&self) -> &dyn Dump {
        self
    }
}

#[cfg(test)]
mod tests {
    use core::num::NonZeroU32;

    use crate::{BasicValue, Dump, DumpRef};
    use crate::info::Typed;

    #[test]
    fn scalars_are_basic() {
        assert!(matches!(42_i32.dump_ref(), DumpRef::Basic(BasicValue::I32(42))));
        let text = String::from("hi");
        assert!(matches!(text.dump_ref(), DumpRef::Basic(BasicValue::Str("hi"))));
        let nz = NonZeroU32::new(3).unwrap();
        assert!(matches!(nz.dump_ref(), DumpRef::Basic(BasicValue::U32(3))));
        assert!(u8::type_info().is_basic());
    }

    #[test]
    fn pointers_render_their_address() {
        let value = 5_u8;
        let ptr: *const u8 = &value;
        match ptr.dump_ref() {
            DumpRef::Basic(BasicValue::Pointer(address)) => assert_eq!(address, ptr.addr()),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(<*const u8>::type_info().type_name(), "*const u8");
    }
}
