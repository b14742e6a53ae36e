use alloc::vec::Vec;

/// A named value of an enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumVariant {
    name: &'static str,
    value: u64,
}

impl EnumVariant {
    #[inline]
    pub const fn new(name: &'static str, value: u64) -> Self {
        Self { name, value }
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn value(&self) -> u64 {
        self.value
    }
}

/// The named values of an enumeration type.
///
/// Discrete enums render the single matching name; flag sets render every
/// contained flag joined by `|`.
#[derive(Debug, Clone)]
pub struct EnumInfo {
    flags: bool,
    variants: Vec<EnumVariant>,
}

impl EnumInfo {
    pub fn discrete(variants: impl IntoIterator<Item = EnumVariant>) -> Self {
        Self {
            flags: false,
            variants: variants.into_iter().collect(),
        }
    }

    /// Flag variants are kept in ascending value order.
    pub fn flags(variants: impl IntoIterator<Item = EnumVariant>) -> Self {
        let mut variants: Vec<EnumVariant> = variants.into_iter().collect();
        variants.sort_by_key(EnumVariant::value);
        Self {
            flags: true,
            variants,
        }
    }

    #[inline]
    pub fn is_flags(&self) -> bool {
        self.flags
    }

    #[inline]
    pub fn variants(&self) -> &[EnumVariant] {
        &self.variants
    }

    pub fn variant_of(&self, value: u64) -> Option<&EnumVariant> {
        self.variants.iter().find(|variant| variant.value == value)
    }
}
