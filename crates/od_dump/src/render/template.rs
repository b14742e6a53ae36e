use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::value::TemplateArg;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Plain,
    LowerHex,
    UpperHex,
    Octal,
    Binary,
    Exp,
    Debug,
}

/// A parsed `[fill][<^>][0][width][.precision][type]` format spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Spec {
    fill: char,
    align: Option<Align>,
    zero: bool,
    width: usize,
    precision: Option<usize>,
    kind: Kind,
}

fn align_of(c: char) -> Option<Align> {
    match c {
        '<' => Some(Align::Left),
        '^' => Some(Align::Center),
        '>' => Some(Align::Right),
        _ => None,
    }
}

fn take_number(chars: &[char], index: &mut usize) -> Option<usize> {
    let start = *index;
    let mut value = 0_usize;
    while let Some(digit) = chars.get(*index).and_then(|c| c.to_digit(10)) {
        value = value.checked_mul(10)?.checked_add(digit as usize)?;
        *index += 1;
    }
    (*index > start).then_some(value)
}

impl Spec {
    const PLAIN: Self = Self {
        fill: ' ',
        align: None,
        zero: false,
        width: 0,
        precision: None,
        kind: Kind::Plain,
    };

    fn parse(spec: &str) -> Option<Self> {
        let chars: Vec<char> = spec.chars().collect();
        let mut parsed = Self::PLAIN;
        let mut index = 0;

        if let Some(align) = chars.get(1).copied().and_then(align_of) {
            parsed.fill = chars[0];
            parsed.align = Some(align);
            index = 2;
        } else if let Some(align) = chars.first().copied().and_then(align_of) {
            parsed.align = Some(align);
            index = 1;
        }
        if chars.get(index) == Some(&'0') {
            parsed.zero = true;
            index += 1;
        }
        if let Some(width) = take_number(&chars, &mut index) {
            parsed.width = width;
        }
        if chars.get(index) == Some(&'.') {
            index += 1;
            parsed.precision = Some(take_number(&chars, &mut index)?);
        }
        if let Some(&c) = chars.get(index) {
            parsed.kind = match c {
                'x' => Kind::LowerHex,
                'X' => Kind::UpperHex,
                'o' => Kind::Octal,
                'b' => Kind::Binary,
                'e' => Kind::Exp,
                '?' => Kind::Debug,
                _ => return None,
            };
            index += 1;
        }
        (index == chars.len()).then_some(parsed)
    }

    fn render(&self, arg: &TemplateArg<'_>, out: &mut String) {
        let (body, numeric) = match arg {
            TemplateArg::Int(value) => (self.integer(*value < 0, value.unsigned_abs()), true),
            TemplateArg::UInt(value) => (self.integer(false, *value), true),
            TemplateArg::Float(value) => (self.float(*value), true),
            TemplateArg::Text(text) => (self.text(text), false),
        };
        self.pad(&body, numeric, out);
    }

    fn integer(&self, negative: bool, magnitude: u128) -> String {
        let digits = match self.kind {
            Kind::LowerHex => format!("{magnitude:x}"),
            Kind::UpperHex => format!("{magnitude:X}"),
            Kind::Octal => format!("{magnitude:o}"),
            Kind::Binary => format!("{magnitude:b}"),
            Kind::Exp => match self.precision {
                Some(precision) => format!("{magnitude:.precision$e}"),
                None => format!("{magnitude:e}"),
            },
            Kind::Plain | Kind::Debug => magnitude.to_string(),
        };
        if negative { format!("-{digits}") } else { digits }
    }

    fn float(&self, value: f64) -> String {
        match (self.kind, self.precision) {
            (Kind::Exp, Some(precision)) => format!("{value:.precision$e}"),
            (Kind::Exp, None) => format!("{value:e}"),
            (Kind::Debug, _) => format!("{value:?}"),
            (_, Some(precision)) => format!("{value:.precision$}"),
            (_, None) => value.to_string(),
        }
    }

    fn text(&self, text: &str) -> String {
        match (self.kind, self.precision) {
            (Kind::Debug, _) => format!("{text:?}"),
            (_, Some(precision)) => text.chars().take(precision).collect(),
            (_, None) => text.to_string(),
        }
    }

    fn pad(&self, body: &str, numeric: bool, out: &mut String) {
        let len = body.chars().count();
        if len >= self.width {
            out.push_str(body);
            return;
        }
        let gap = self.width - len;

        if self.zero && numeric && self.align.is_none() {
            let (sign, digits) = match body.strip_prefix('-') {
                Some(digits) => ("-", digits),
                None => ("", body),
            };
            out.push_str(sign);
            out.extend(core::iter::repeat_n('0', gap));
            out.push_str(digits);
            return;
        }

        let align = self
            .align
            .unwrap_or(if numeric { Align::Right } else { Align::Left });
        let (before, after) = match align {
            Align::Left => (0, gap),
            Align::Right => (gap, 0),
            Align::Center => (gap / 2, gap - gap / 2),
        };
        out.extend(core::iter::repeat_n(self.fill, before));
        out.push_str(body);
        out.extend(core::iter::repeat_n(self.fill, after));
    }
}

/// Expands every `{}`, `{0}` or `{key}` placeholder of `template` with `arg`.
///
/// `{{` and `}}` are literal braces. Other placeholders and placeholders
/// with a malformed spec are kept verbatim.
pub(crate) fn apply(template: &str, key: &str, arg: &TemplateArg<'_>) -> String {
    let mut out = String::with_capacity(template.len() + 8);
    let mut rest = template;

    while let Some(pos) = rest.find(['{', '}']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        if let Some(after) = tail.strip_prefix("{{") {
            out.push('{');
            rest = after;
            continue;
        }
        if let Some(after) = tail.strip_prefix('}') {
            out.push('}');
            rest = after.strip_prefix('}').unwrap_or(after);
            continue;
        }
        let Some(end) = tail.find('}') else {
            rest = tail;
            break;
        };

        let body = &tail[1..end];
        let (name, spec) = body.split_once(':').unwrap_or((body, ""));
        let spec = (name.is_empty() || name == "0" || name == key)
            .then(|| Spec::parse(spec))
            .flatten();
        match spec {
            Some(spec) => spec.render(arg, &mut out),
            None => out.push_str(&tail[..=end]),
        }
        rest = &tail[end + 1..];
    }

    out.push_str(rest);
    out
}
