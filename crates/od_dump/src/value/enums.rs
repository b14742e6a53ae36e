use alloc::format;
use alloc::string::String;
use core::fmt;

use crate::info::{EnumInfo, TypeInfo, TypeKind};

/// The current value of an enumeration, paired with its type.
#[derive(Clone, Copy)]
pub struct EnumValue {
    type_info: &'static TypeInfo,
    bits: u64,
}

impl EnumValue {
    #[inline]
    pub const fn new(type_info: &'static TypeInfo, bits: u64) -> Self {
        Self { type_info, bits }
    }

    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        self.type_info
    }

    #[inline]
    pub fn bits(&self) -> u64 {
        self.bits
    }

    #[inline]
    pub fn enum_info(&self) -> Option<&'static EnumInfo> {
        match self.type_info.kind() {
            TypeKind::Enum(info) => Some(info),
            _ => None,
        }
    }

    /// Renders `T.Variant`, `T.A|T.B` for flag sets, or `T(value)` when the
    /// value has no name.
    pub fn to_text(&self) -> String {
        let name = self.type_info.type_name();
        let Some(info) = self.enum_info() else {
            return format!("{name}({})", self.bits);
        };

        if !info.is_flags() {
            return match info.variant_of(self.bits) {
                Some(variant) => format!("{name}.{}", variant.name()),
                None => format!("{name}({})", self.bits as i64),
            };
        }

        if let Some(variant) = info.variant_of(self.bits) {
            return format!("{name}.{}", variant.name());
        }

        let mut text = String::new();
        let mut rest = self.bits;
        for variant in info.variants() {
            let value = variant.value();
            if value != 0 && rest & value == value {
                if !text.is_empty() {
                    text.push('|');
                }
                text.push_str(name);
                text.push('.');
                text.push_str(variant.name());
                rest &= !value;
            }
        }
        if rest != 0 {
            if !text.is_empty() {
                text.push('|');
            }
            text.push_str(&format!("{name}(0x{rest:X})"));
        }
        if text.is_empty() {
            text = format!("{name}(0)");
        }
        text
    }
}

impl fmt::Debug for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumValue")
            .field("type", &self.type_info.type_path())
            .field("bits", &self.bits)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::Dump;
    use crate::info::Typed;

    #[derive(Dump)]
    enum Level {
        Low = 1,
        High = 10,
    }

    bitflags::bitflags! {
        #[derive(Clone, Copy)]
        struct Perm: u8 {
            const A = 0b001;
            const B = 0b010;
            const C = 0b100;
        }
    }

    crate::impl_dump_bitflags!(Perm);

    fn text(value: &dyn Dump) -> String {
        match value.dump_ref() {
            crate::DumpRef::Enum(value) => value.to_text(),
            other => panic!("not an enum: {other:?}"),
        }
    }

    #[test]
    fn discrete_names() {
        assert_eq!(text(&Level::High), "Level.High");
        assert_eq!(
            super::EnumValue::new(Level::type_info(), 3).to_text(),
            "Level(3)"
        );
    }

    #[test]
    fn flag_names() {
        assert_eq!(text(&(Perm::A | Perm::C)), "Perm.A|Perm.C");
        assert_eq!(text(&Perm::B), "Perm.B");
        assert_eq!(text(&Perm::from_bits_retain(0b1001)), "Perm.A|Perm(0x8)");
        assert_eq!(text(&Perm::empty()), "Perm(0)");
    }
}
