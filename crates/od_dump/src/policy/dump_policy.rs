use alloc::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::info::{TypeRef, Typed};
use crate::policy::Toggle;

// -----------------------------------------------------------------------------
// FormatterRef

/// Names a user function that renders a value instead of the engine.
///
/// Without a target type the method is looked up as an instance method on the
/// value's own type, then as a static method on the declaring type (or its
/// shadow). With a target, only static methods of the target are considered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormatterRef {
    pub target: Option<TypeRef>,
    pub method: &'static str,
}

impl FormatterRef {
    #[inline]
    pub const fn method(method: &'static str) -> Self {
        Self {
            target: None,
            method,
        }
    }

    /// A static `method` declared on `T`.
    #[inline]
    pub const fn on<T: Typed>(method: &'static str) -> Self {
        Self {
            target: Some(TypeRef::of::<T>()),
            method,
        }
    }
}

// -----------------------------------------------------------------------------
// DumpPolicy

/// Declarative settings attached to a type or to one of its members.
///
/// A policy on a member overrides the policy of the member value's type, which
/// in turn overrides [`DumperConfig`](crate::DumperConfig). Unset fields
/// (`Toggle::Default`, `None`, `0` for `max_length`) defer to the next level.
///
/// # Ordering
///
/// `order` sorts members within one level of the inheritance chain:
///
/// - non-negative values render first, ascending, in a base-to-derived pass;
/// - negative values render after every non-negative member of every level,
///   most-derived level first, `-1` before `-2`;
/// - [`DumpPolicy::TAIL_ORDER`] renders last of all.
///
/// An unset order is [`DumpPolicy::DEFAULT_ORDER`], so unannotated members
/// follow the annotated ones, alphabetically.
///
/// # Examples
///
/// ```
/// use od_dump::policy::{DumpPolicy, Toggle};
///
/// let policy = DumpPolicy::new().with_order(2).with_dump_null_values(Toggle::Skip);
/// assert_eq!(policy.order, 2);
/// assert!(!policy.is_default());
/// assert!(DumpPolicy::new().is_default());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct DumpPolicy {
    pub order: i32,
    pub skip: Toggle,
    pub dump_null_values: Toggle,
    pub recurse_dump: Toggle,
    pub enumerate: Toggle,
    pub default_member: Option<Cow<'static, str>>,
    pub max_depth: Option<usize>,
    /// `0` defers, a positive value limits, a negative value disables limits.
    pub max_length: i32,
    pub mask: bool,
    pub mask_text: Option<Cow<'static, str>>,
    pub label_format: Option<Cow<'static, str>>,
    pub value_format: Option<Cow<'static, str>>,
    #[serde(skip)]
    pub formatter: Option<FormatterRef>,
}

impl DumpPolicy {
    /// The order of a member without an explicit one.
    pub const DEFAULT_ORDER: i32 = i32::MAX;

    /// The order that places a member after everything else.
    pub const TAIL_ORDER: i32 = i32::MIN;

    /// A `value_format` asking for the value's own string form.
    pub const DISPLAY: &'static str = "Display";

    /// A policy with every field unset.
    pub const DEFAULT: Self = Self {
        order: Self::DEFAULT_ORDER,
        skip: Toggle::Default,
        dump_null_values: Toggle::Default,
        recurse_dump: Toggle::Default,
        enumerate: Toggle::Default,
        default_member: None,
        max_depth: None,
        max_length: 0,
        mask: false,
        mask_text: None,
        label_format: None,
        value_format: None,
        formatter: None,
    };

    #[inline]
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    /// Returns `true` if no field has been set.
    pub fn is_default(&self) -> bool {
        *self == Self::DEFAULT
    }

    #[inline]
    pub const fn has_explicit_order(&self) -> bool {
        self.order != Self::DEFAULT_ORDER
    }

    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    pub fn with_skip(mut self, skip: Toggle) -> Self {
        self.skip = skip;
        self
    }

    pub fn with_dump_null_values(mut self, toggle: Toggle) -> Self {
        self.dump_null_values = toggle;
        self
    }

    pub fn with_recurse_dump(mut self, toggle: Toggle) -> Self {
        self.recurse_dump = toggle;
        self
    }

    pub fn with_enumerate(mut self, toggle: Toggle) -> Self {
        self.enumerate = toggle;
        self
    }

    pub fn with_default_member(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.default_member = Some(name.into());
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub fn with_max_length(mut self, length: i32) -> Self {
        self.max_length = length;
        self
    }

    pub fn masked(mut self) -> Self {
        self.mask = true;
        self
    }

    pub fn with_mask_text(mut self, text: impl Into<Cow<'static, str>>) -> Self {
        self.mask_text = Some(text.into());
        self
    }

    pub fn with_label_format(mut self, format: impl Into<Cow<'static, str>>) -> Self {
        self.label_format = Some(format.into());
        self
    }

    pub fn with_value_format(mut self, format: impl Into<Cow<'static, str>>) -> Self {
        self.value_format = Some(format.into());
        self
    }

    pub fn with_formatter(mut self, formatter: FormatterRef) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Returns `true` if `value_format` is the own-string sentinel.
    #[inline]
    pub fn wants_display(&self) -> bool {
        self.value_format.as_deref() == Some(Self::DISPLAY)
    }
}

impl Default for DumpPolicy {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::{DumpPolicy, FormatterRef};
    use crate::policy::Toggle;

    #[test]
    fn equality_is_by_value() {
        let a = DumpPolicy::new().with_order(3).with_label_format("{name}: ");
        let b = DumpPolicy::new().with_label_format("{name}: ").with_order(3);
        assert_eq!(a, b);
        assert_ne!(a, DumpPolicy::new().with_order(3));
    }

    #[test]
    fn formatter_counts_as_set() {
        let policy = DumpPolicy::new().with_formatter(FormatterRef::method("short"));
        assert!(!policy.is_default());
        assert!(!policy.has_explicit_order());
    }

    #[test]
    fn json_skips_formatter() {
        let policy = DumpPolicy::new()
            .with_order(-1)
            .with_skip(Toggle::Skip)
            .with_formatter(FormatterRef::method("short"));
        let text = serde_json::to_string(&policy).unwrap();
        assert!(!text.contains("formatter"));

        let back: DumpPolicy = serde_json::from_str(&text).unwrap();
        assert_eq!(back.order, -1);
        assert_eq!(back.skip, Toggle::Skip);
        assert_eq!(back.formatter, None);
    }

    #[test]
    fn ron_fills_missing_fields() {
        let policy: DumpPolicy = ron::from_str("(mask: true, max_length: 5)").unwrap();
        assert!(policy.mask);
        assert_eq!(policy.max_length, 5);
        assert_eq!(policy.order, DumpPolicy::DEFAULT_ORDER);
        assert_eq!(policy.dump_null_values, Toggle::Default);
    }
}
