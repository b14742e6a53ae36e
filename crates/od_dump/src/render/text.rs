use alloc::borrow::Cow;
use alloc::format;
use alloc::string::String;
use core::fmt::Write;

use crate::info::util::short_type_name;
use crate::policy::DumpPolicy;
use crate::render::template;
use crate::value::TemplateArg;
use crate::{BasicValue, DelegateInfo, EnumValue, Metadata};

const TRUNCATION_SUFFIX: &str = "...";

/// Keeps the first `max_length` characters when `max_length` is positive.
pub(crate) fn truncate(text: &str, max_length: i32) -> Cow<'_, str> {
    let Ok(max) = usize::try_from(max_length) else {
        return Cow::Borrowed(text);
    };
    match text.char_indices().nth(max) {
        Some((end, _)) if max > 0 => {
            let mut short = String::with_capacity(end + TRUNCATION_SUFFIX.len());
            short.push_str(&text[..end]);
            short.push_str(TRUNCATION_SUFFIX);
            Cow::Owned(short)
        }
        _ => Cow::Borrowed(text),
    }
}

/// Renders a scalar through `format` or its canonical text.
pub(crate) fn basic(value: &BasicValue<'_>, format: Option<&str>, max_length: i32) -> String {
    match format.filter(|format| *format != DumpPolicy::DISPLAY) {
        Some(format) => {
            let arg = match value {
                BasicValue::Str(text) => TemplateArg::Text(truncate(text, max_length)),
                other => other.template_arg(),
            };
            template::apply(format, "value", &arg)
        }
        None => match value {
            BasicValue::Str(text) => truncate(text, max_length).into_owned(),
            other => other.to_text().into_owned(),
        },
    }
}

/// Renders an enum value through `format` or its canonical text.
pub(crate) fn enumeration(value: &EnumValue, format: Option<&str>) -> String {
    let text = value.to_text();
    match format.filter(|format| *format != DumpPolicy::DISPLAY) {
        Some(format) => template::apply(format, "value", &TemplateArg::Text(Cow::Owned(text))),
        None => text,
    }
}

/// The member label, for example `name = `.
#[inline]
pub(crate) fn label(format: &str, name: &str) -> String {
    template::apply(format, "name", &TemplateArg::Text(Cow::Borrowed(name)))
}

/// The number of items to render: `0` selects `default`, a negative length
/// renders everything.
pub(crate) fn max_items(max_length: i32, default: usize) -> Option<usize> {
    match max_length {
        0 => Some(default),
        length if length < 0 => None,
        length => usize::try_from(length).ok(),
    }
}

pub(crate) fn truncation_line(dumped: usize, len: usize) -> String {
    format!("... (the first {dumped} of {len} items were dumped)")
}

/// Uppercase hex pairs separated by spaces, ` ...` appended when cut short.
pub(crate) fn hex_bytes(
    bytes: impl Iterator<Item = u8>,
    len: usize,
    limit: Option<usize>,
) -> String {
    let take = limit.map_or(len, |limit| limit.min(len));
    let mut text = String::with_capacity(take * 3 + 4);
    for (index, byte) in bytes.take(take).enumerate() {
        if index > 0 {
            text.push(' ');
        }
        // Writing into a `String` cannot fail.
        let _ = write!(text, "{byte:02X}");
    }
    if take < len {
        text.push_str(" ...");
    }
    text
}

pub(crate) fn delegate(info: &DelegateInfo) -> String {
    let marker = if info.is_static { "static" } else { "instance" };
    if info.declaring.is_empty() {
        format!("delegate {} [{marker}]", info.method)
    } else {
        let declaring = short_type_name(info.declaring);
        format!("delegate {declaring}::{} [{marker}]", info.method)
    }
}

pub(crate) fn metadata(metadata: &Metadata<'_>) -> String {
    match metadata {
        Metadata::Type(info) => format!("type {}", info.type_path()),
        Metadata::Member(member) => format!(
            "{} {}::{}: {}",
            member.kind(),
            short_type_name(member.declaring_type()),
            member.name(),
            short_type_name(member.value_type()),
        ),
        Metadata::Method(method) => format!(
            "method {}::{}",
            short_type_name(method.declaring_type()),
            method.name()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::{basic, delegate, hex_bytes, max_items, metadata, truncate};
    use crate::info::Typed;
    use crate::{BasicValue, DelegateInfo, Dump, Metadata};

    #[test]
    fn strings_truncate_with_suffix() {
        assert_eq!(truncate("hello world!", 5), "hello...");
        assert_eq!(truncate("hello", 5), "hello");
        assert_eq!(truncate("hello", 0), "hello");
        assert_eq!(truncate("hello", -1), "hello");
        assert_eq!(basic(&BasicValue::Str("hello world!"), None, 5), "hello...");
    }

    #[test]
    fn formats_short_circuit_the_table() {
        assert_eq!(basic(&BasicValue::I32(42), None, 0), "42");
        assert_eq!(basic(&BasicValue::I32(42), Some("Display"), 0), "42");
        assert_eq!(basic(&BasicValue::U8(10), Some("{:#>4}"), 0), "##10");
        assert_eq!(basic(&BasicValue::Bool(true), Some("[{}]"), 0), "[true]");
    }

    #[test]
    fn item_limits() {
        assert_eq!(max_items(0, 10), Some(10));
        assert_eq!(max_items(3, 10), Some(3));
        assert_eq!(max_items(-1, 10), None);
    }

    #[test]
    fn bytes_as_hex() {
        let bytes = [0xDE_u8, 0xAD, 0xBE, 0xEF];
        assert_eq!(hex_bytes(bytes.into_iter(), 4, None), "DE AD BE EF");
        assert_eq!(hex_bytes(bytes.into_iter(), 4, Some(2)), "DE AD ...");
        assert_eq!(hex_bytes(core::iter::empty(), 0, Some(2)), "");
    }

    #[test]
    fn delegate_and_metadata_signatures() {
        let info = DelegateInfo::from_path("app::jobs::Worker::run", false);
        assert_eq!(delegate(&info), "delegate Worker::run [instance]");
        let info = DelegateInfo::from_path("main", true);
        assert_eq!(delegate(&info), "delegate main [static]");

        #[derive(Dump)]
        struct Probe {
            level: u8,
        }
        let member = Probe::type_info().member("level").unwrap();
        assert_eq!(metadata(&Metadata::Member(member)), "field Probe::level: u8");
        let text = metadata(&Metadata::Type(Probe::type_info()));
        assert!(text.starts_with("type ") && text.ends_with("::Probe"));
    }
}
