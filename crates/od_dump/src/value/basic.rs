use alloc::borrow::Cow;
use alloc::format;
use alloc::string::{String, ToString};
use core::cmp::Ordering;
use core::time::Duration;
use std::time::SystemTime;

/// A scalar value rendered through the basic-value table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BasicValue<'a> {
    Bool(bool),
    Char(char),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    Usize(usize),
    F32(f32),
    F64(f64),
    Str(&'a str),
    Duration(Duration),
    SystemTime(SystemTime),
    /// A raw address, rendered in hexadecimal.
    Pointer(usize),
    /// The database null marker.
    DbNull,
    #[cfg(feature = "decimal")]
    Decimal(rust_decimal::Decimal),
    #[cfg(feature = "chrono")]
    DateTime(chrono::DateTime<chrono::FixedOffset>),
    #[cfg(feature = "chrono")]
    NaiveDateTime(chrono::NaiveDateTime),
    #[cfg(feature = "chrono")]
    NaiveDate(chrono::NaiveDate),
    #[cfg(feature = "chrono")]
    NaiveTime(chrono::NaiveTime),
    #[cfg(feature = "uuid")]
    Uuid(uuid::Uuid),
    #[cfg(feature = "url")]
    Url(&'a url::Url),
}

/// The argument a value contributes to a format template.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TemplateArg<'a> {
    Int(i128),
    UInt(u128),
    Float(f64),
    Text(Cow<'a, str>),
}

impl<'a> BasicValue<'a> {
    /// The canonical text of the value, without truncation.
    pub fn to_text(&self) -> Cow<'a, str> {
        match *self {
            Self::Bool(value) => Cow::Borrowed(if value { "true" } else { "false" }),
            Self::Char(value) => Cow::Owned(value.to_string()),
            Self::I8(value) => Cow::Owned(value.to_string()),
            Self::I16(value) => Cow::Owned(value.to_string()),
            Self::I32(value) => Cow::Owned(value.to_string()),
            Self::I64(value) => Cow::Owned(value.to_string()),
            Self::I128(value) => Cow::Owned(value.to_string()),
            Self::Isize(value) => Cow::Owned(value.to_string()),
            Self::U8(value) => Cow::Owned(value.to_string()),
            Self::U16(value) => Cow::Owned(value.to_string()),
            Self::U32(value) => Cow::Owned(value.to_string()),
            Self::U64(value) => Cow::Owned(value.to_string()),
            Self::U128(value) => Cow::Owned(value.to_string()),
            Self::Usize(value) => Cow::Owned(value.to_string()),
            Self::F32(value) => Cow::Owned(value.to_string()),
            Self::F64(value) => Cow::Owned(value.to_string()),
            Self::Str(value) => Cow::Borrowed(value),
            Self::Duration(value) => Cow::Owned(format!("{value:?}")),
            Self::SystemTime(value) => Cow::Owned(system_time_text(value)),
            Self::Pointer(address) => Cow::Owned(format!("0x{address:x}")),
            Self::DbNull => Cow::Borrowed("DBNull"),
            #[cfg(feature = "decimal")]
            Self::Decimal(value) => Cow::Owned(value.to_string()),
            #[cfg(feature = "chrono")]
            Self::DateTime(value) => {
                Cow::Owned(value.to_rfc3339_opts(chrono::SecondsFormat::AutoSi, true))
            }
            #[cfg(feature = "chrono")]
            Self::NaiveDateTime(value) => {
                Cow::Owned(value.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
            }
            #[cfg(feature = "chrono")]
            Self::NaiveDate(value) => Cow::Owned(value.format("%Y-%m-%d").to_string()),
            #[cfg(feature = "chrono")]
            Self::NaiveTime(value) => Cow::Owned(value.format("%H:%M:%S%.f").to_string()),
            #[cfg(feature = "uuid")]
            Self::Uuid(value) => Cow::Owned(value.hyphenated().to_string()),
            #[cfg(feature = "url")]
            Self::Url(value) => Cow::Borrowed(value.as_str()),
        }
    }

    pub(crate) fn template_arg(&self) -> TemplateArg<'a> {
        match *self {
            Self::I8(value) => TemplateArg::Int(value.into()),
            Self::I16(value) => TemplateArg::Int(value.into()),
            Self::I32(value) => TemplateArg::Int(value.into()),
            Self::I64(value) => TemplateArg::Int(value.into()),
            Self::I128(value) => TemplateArg::Int(value),
            Self::Isize(value) => TemplateArg::Int(value as i128),
            Self::U8(value) => TemplateArg::UInt(value.into()),
            Self::U16(value) => TemplateArg::UInt(value.into()),
            Self::U32(value) => TemplateArg::UInt(value.into()),
            Self::U64(value) => TemplateArg::UInt(value.into()),
            Self::U128(value) => TemplateArg::UInt(value),
            Self::Usize(value) => TemplateArg::UInt(value as u128),
            Self::Pointer(address) => TemplateArg::UInt(address as u128),
            Self::F32(value) => TemplateArg::Float(value.into()),
            Self::F64(value) => TemplateArg::Float(value),
            _ => TemplateArg::Text(self.to_text()),
        }
    }

    /// Orders numbers by value and everything else by its text.
    pub(crate) fn sort_cmp(&self, other: &Self) -> Ordering {
        match (self.template_arg(), other.template_arg()) {
            (TemplateArg::Int(a), TemplateArg::Int(b)) => a.cmp(&b),
            (TemplateArg::UInt(a), TemplateArg::UInt(b)) => a.cmp(&b),
            (TemplateArg::Float(a), TemplateArg::Float(b)) => a.total_cmp(&b),
            _ => self.to_text().cmp(&other.to_text()),
        }
    }

    /// Returns `true` for values subject to length truncation.
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Str(_))
    }
}

#[cfg(feature = "chrono")]
fn system_time_text(time: SystemTime) -> String {
    let time: chrono::DateTime<chrono::Utc> = time.into();
    time.to_rfc3339_opts(chrono::SecondsFormat::AutoSi, true)
}

#[cfg(not(feature = "chrono"))]
fn system_time_text(time: SystemTime) -> String {
    match time.duration_since(SystemTime::UNIX_EPOCH) {
        Ok(since) => format!("UNIX_EPOCH + {since:?}"),
        Err(error) => format!("UNIX_EPOCH - {:?}", error.duration()),
    }
}

#[cfg(test)]
mod tests {
    use core::cmp::Ordering;
    use core::time::Duration;

    use super::{BasicValue, TemplateArg};

    #[test]
    fn canonical_text() {
        assert_eq!(BasicValue::I32(42).to_text(), "42");
        assert_eq!(BasicValue::Bool(true).to_text(), "true");
        assert_eq!(BasicValue::F64(0.5).to_text(), "0.5");
        assert_eq!(BasicValue::Pointer(0xbeef).to_text(), "0xbeef");
        assert_eq!(BasicValue::DbNull.to_text(), "DBNull");
        assert_eq!(BasicValue::Duration(Duration::from_millis(1500)).to_text(), "1.5s");
    }

    #[test]
    fn numeric_template_args() {
        assert_eq!(BasicValue::I8(-3).template_arg(), TemplateArg::Int(-3));
        assert_eq!(BasicValue::U64(7).template_arg(), TemplateArg::UInt(7));
        assert_eq!(BasicValue::F32(1.5).template_arg(), TemplateArg::Float(1.5));
        assert_eq!(
            BasicValue::Str("x").template_arg(),
            TemplateArg::Text("x".into())
        );
    }

    #[test]
    fn numbers_sort_by_value() {
        assert_eq!(BasicValue::U8(10).sort_cmp(&BasicValue::U8(9)), Ordering::Greater);
        assert_eq!(BasicValue::I32(-2).sort_cmp(&BasicValue::I32(1)), Ordering::Less);
        assert_eq!(BasicValue::F64(2.5).sort_cmp(&BasicValue::F64(10.0)), Ordering::Less);
        assert_eq!(BasicValue::Str("b").sort_cmp(&BasicValue::Str("a")), Ordering::Greater);
    }

    #[cfg(feature = "chrono")]
    #[test]
    fn epoch_is_rfc3339() {
        let text = BasicValue::SystemTime(std::time::SystemTime::UNIX_EPOCH).to_text();
        assert_eq!(text, "1970-01-01T00:00:00Z");
    }
}
