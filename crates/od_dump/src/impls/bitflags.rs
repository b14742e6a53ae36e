/// Widens the bits of a flag set for rendering.
///
/// Implemented for every integer type `bitflags` accepts as storage.
pub trait FlagBits: Copy {
    fn to_u64(self) -> u64;
}

macro_rules! impl_flag_bits {
    ($($ty:ty),*) => {$(
        impl FlagBits for $ty {
            #[inline]
            fn to_u64(self) -> u64 {
                self as u64
            }
        }
    )*};
}

impl_flag_bits!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

/// Implements [`Typed`](crate::info::Typed) and [`Dump`](crate::Dump) for a
/// type generated by `bitflags::bitflags!`.
///
/// Values render as the `|`-joined names of their flags; bits without a name
/// render as `Type(0x..)`.
///
/// # Examples
///
/// ```
/// use od_dump::{DumpExt, impl_dump_bitflags};
///
/// bitflags::bitflags! {
///     #[derive(Clone, Copy)]
///     pub struct Access: u8 {
///         const READ = 1;
///         const WRITE = 2;
///         const EXEC = 4;
///     }
/// }
///
/// impl_dump_bitflags!(Access);
///
/// assert_eq!((Access::READ | Access::EXEC).dump_text(), "Access.READ|Access.EXEC");
/// ```
#[macro_export]
macro_rules! impl_dump_bitflags {
    ($ty:ty) => {
        impl $crate::info::Typed for $ty {
            fn type_info() -> &'static $crate::info::TypeInfo {
                static CELL: $crate::info::TypeInfoCell = $crate::info::TypeInfoCell::new();
                CELL.get_or_init(|| {
                    $crate::info::TypeInfo::enumeration::<$ty>($crate::info::EnumInfo::flags(
                        <$ty as $crate::__macro_exports::bitflags::Flags>::FLAGS
                            .iter()
                            .map(|flag| {
                                $crate::info::EnumVariant::new(
                                    flag.name(),
                                    $crate::impls::FlagBits::to_u64(
                                        $crate::__macro_exports::bitflags::Flags::bits(
                                            flag.value(),
                                        ),
                                    ),
                                )
                            }),
                    ))
                })
            }
        }

        impl $crate::Dump for $ty {
            fn dump_type_info(&self) -> &'static $crate::info::TypeInfo {
                <Self as $crate::info::Typed>::type_info()
            }

            fn dump_ref(&self) -> $crate::DumpRef<'_> {
                $crate::DumpRef::Enum($crate::EnumValue::new(
                    <Self as $crate::info::Typed>::type_info(),
                    $crate::impls::FlagBits::to_u64($crate::__macro_exports::bitflags::Flags::bits(
                        self,
                    )),
                ))
            }

            fn as_dump(&self) -> &dyn $crate::Dump {
                self
            }
        }
    };
}
