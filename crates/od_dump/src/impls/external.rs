#[cfg(any(feature = "chrono", feature = "uuid", feature = "url", feature = "decimal"))]
use crate::info::{TypeInfo, TypeInfoCell, Typed};
#[cfg(any(feature = "chrono", feature = "uuid", feature = "url", feature = "decimal"))]
use crate::{BasicValue, Dump, DumpRef};

#[cfg(any(feature = "chrono", feature = "uuid", feature = "url", feature = "decimal"))]
macro_rules! impl_dump_external {
    ($($ty:ty => |$this:ident| $value:expr),* $(,)?) => {$(
        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: TypeInfoCell = TypeInfoCell::new();
                CELL.get_or_init(TypeInfo::basic::<$ty>)
            }
        }

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

#[cfg(feature = "chrono")]
mod chrono_impls {
    use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, Utc};

    use super::*;

    impl_dump_external!(
        DateTime<Utc> => |v| BasicValue::DateTime(v.fixed_offset()),
        DateTime<FixedOffset> => |v| BasicValue::DateTime(*v),
        DateTime<Local> => |v| BasicValue::DateTime(v.fixed_offset()),
        NaiveDateTime => |v| BasicValue::NaiveDateTime(*v),
        NaiveDate => |v| BasicValue::NaiveDate(*v),
        NaiveTime => |v| BasicValue::NaiveTime(*v),
    );
}

#[cfg(feature = "uuid")]
impl_dump_external!(uuid::Uuid => |v| BasicValue::Uuid(*v));

#[cfg(feature = "url")]
impl_dump_external!(url::Url => |v| BasicValue::Url(v));

#[cfg(feature = "decimal")]
impl_dump_external!(rust_decimal::Decimal => |v| BasicValue::Decimal(*v));
