use crate::info::{MemberInfo, TypeInfo};
use crate::policy::{DumpPolicy, FormatterRef, Toggle};

/// Where a [`ClassDumpInfo`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Registered for this exact type.
    Explicit,
    /// Built from a registration of the type's generic definition.
    Generic,
    /// Built from the type's own annotations.
    Annotated,
}

/// The resolved dump configuration of one type.
///
/// Combines the type's [`TypeInfo`], its shadow (the type whose annotations
/// are used, the type itself by default) and its class-level [`DumpPolicy`].
///
/// The `effective_*` accessors merge an optional instance policy (a member's
/// policy or a caller policy) over the class policy over the engine default.
#[derive(Debug, Clone)]
pub struct ClassDumpInfo {
    type_info: &'static TypeInfo,
    shadow: &'static TypeInfo,
    policy: DumpPolicy,
    origin: Origin,
}

impl ClassDumpInfo {
    /// Builds the info from the annotations carried by `type_info`.
    pub fn from_annotations(type_info: &'static TypeInfo) -> Self {
        Self::new(type_info, None, None, Origin::Annotated)
    }

    pub(crate) fn new(
        type_info: &'static TypeInfo,
        shadow: Option<&'static TypeInfo>,
        policy: Option<DumpPolicy>,
        origin: Origin,
    ) -> Self {
        let shadow = shadow.or_else(|| type_info.shadow()).unwrap_or(type_info);
        let policy = policy
            .or_else(|| shadow.policy().or_else(|| type_info.policy()).cloned())
            .unwrap_or_default();
        Self {
            type_info,
            shadow,
            policy,
            origin,
        }
    }

    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        self.type_info
    }

    /// The type whose annotations stand in for this type's.
    #[inline]
    pub fn shadow(&self) -> &'static TypeInfo {
        self.shadow
    }

    #[inline]
    pub fn has_shadow(&self) -> bool {
        self.shadow.type_id() != self.type_info.type_id()
    }

    /// The class-level policy; [`DumpPolicy::DEFAULT`] if none is declared.
    #[inline]
    pub fn policy(&self) -> &DumpPolicy {
        &self.policy
    }

    #[inline]
    pub fn origin(&self) -> Origin {
        self.origin
    }

    #[inline]
    pub fn is_explicit(&self) -> bool {
        self.origin == Origin::Explicit
    }

    pub(crate) fn same_registration(&self, other: &Self) -> bool {
        self.shadow.type_id() == other.shadow.type_id() && self.policy == other.policy
    }

    /// The policy of `member`, read from the shadow's same-named member when
    /// the shadow declares one.
    pub fn member_policy(&self, member: &'static MemberInfo) -> Option<&'static DumpPolicy> {
        if self.has_shadow()
            && let Some(policy) = self.shadow.member(member.name()).and_then(MemberInfo::policy)
        {
            return Some(policy);
        }
        member.policy()
    }

    fn toggle(
        &self,
        instance: Option<&DumpPolicy>,
        field: impl Fn(&DumpPolicy) -> Toggle,
    ) -> Toggle {
        instance
            .map_or(Toggle::Default, &field)
            .or(field(&self.policy))
    }

    /// Defaults to rendering nulls.
    pub fn effective_dump_null_values(&self, instance: Option<&DumpPolicy>) -> Toggle {
        match self.toggle(instance, |p| p.dump_null_values) {
            Toggle::Default => Toggle::Do,
            decided => decided,
        }
    }

    /// Defaults to recursing; never returns [`Toggle::Default`].
    pub fn effective_recurse_dump(&self, instance: Option<&DumpPolicy>) -> Toggle {
        match self.toggle(instance, |p| p.recurse_dump) {
            Toggle::Default => Toggle::Do,
            decided => decided,
        }
    }

    /// Custom sequences enumerate only when asked to.
    pub fn effective_enumerate(&self, instance: Option<&DumpPolicy>) -> Toggle {
        match self.toggle(instance, |p| p.enumerate) {
            Toggle::Default => Toggle::Skip,
            decided => decided,
        }
    }

    pub fn effective_default_member<'a>(
        &'a self,
        instance: Option<&'a DumpPolicy>,
    ) -> Option<&'a str> {
        instance
            .and_then(|p| p.default_member.as_deref())
            .filter(|name| !name.is_empty())
            .or_else(|| self.policy.default_member.as_deref().filter(|name| !name.is_empty()))
    }

    pub fn effective_max_depth(&self, instance: Option<&DumpPolicy>) -> Option<usize> {
        instance
            .and_then(|p| p.max_depth)
            .or(self.policy.max_depth)
    }

    /// `0` when neither level sets a length.
    pub fn effective_max_length(&self, instance: Option<&DumpPolicy>) -> i32 {
        match instance.map_or(0, |p| p.max_length) {
            0 => self.policy.max_length,
            length => length,
        }
    }

    /// `Some` if either level masks, holding the mask text of that level.
    pub fn effective_mask<'a>(
        &'a self,
        instance: Option<&'a DumpPolicy>,
    ) -> Option<Option<&'a str>> {
        let policy = instance
            .filter(|p| p.mask)
            .or(Some(&self.policy).filter(|p| p.mask))?;
        Some(policy.mask_text.as_deref())
    }

    pub fn effective_label_format<'a>(
        &'a self,
        instance: Option<&'a DumpPolicy>,
    ) -> Option<&'a str> {
        instance
            .and_then(|p| p.label_format.as_deref())
            .or(self.policy.label_format.as_deref())
    }

    pub fn effective_value_format<'a>(
        &'a self,
        instance: Option<&'a DumpPolicy>,
    ) -> Option<&'a str> {
        instance
            .and_then(|p| p.value_format.as_deref())
            .or(self.policy.value_format.as_deref())
    }

    pub fn effective_formatter(&self, instance: Option<&DumpPolicy>) -> Option<FormatterRef> {
        instance.and_then(|p| p.formatter).or(self.policy.formatter)
    }
}

#[cfg(test)]
mod tests {
    use super::{ClassDumpInfo, Origin};
    use crate::info::{TypeInfo, TypeInfoCell};
    use crate::policy::{DumpPolicy, Toggle};

    fn info_with(policy: Option<DumpPolicy>) -> &'static TypeInfo {
        struct Marker;
        let info = TypeInfo::opaque::<Marker>();
        let info = match policy {
            Some(policy) => info.with_policy(policy),
            None => info,
        };
        Box::leak(Box::new(info))
    }

    #[test]
    fn null_policy_precedence() {
        let skip = DumpPolicy::new().with_dump_null_values(Toggle::Skip);
        let show = DumpPolicy::new().with_dump_null_values(Toggle::Do);

        // class only
        let class = ClassDumpInfo::from_annotations(info_with(Some(skip.clone())));
        assert_eq!(class.effective_dump_null_values(None), Toggle::Skip);
        // instance over class
        assert_eq!(class.effective_dump_null_values(Some(&show)), Toggle::Do);
        // instance only
        let class = ClassDumpInfo::from_annotations(info_with(None));
        assert_eq!(class.effective_dump_null_values(Some(&skip)), Toggle::Skip);
        // neither
        assert_eq!(class.effective_dump_null_values(None), Toggle::Do);
        assert_eq!(
            class.effective_dump_null_values(Some(&DumpPolicy::new())),
            Toggle::Do
        );
    }

    #[test]
    fn recurse_is_always_decided() {
        let class = ClassDumpInfo::from_annotations(info_with(None));
        assert_eq!(class.effective_recurse_dump(None), Toggle::Do);
        let off = DumpPolicy::new().with_recurse_dump(Toggle::Skip);
        assert_eq!(class.effective_recurse_dump(Some(&off)), Toggle::Skip);
        assert_eq!(class.effective_enumerate(None), Toggle::Skip);
    }

    #[test]
    fn blank_default_member_defers() {
        let class = ClassDumpInfo::from_annotations(info_with(Some(
            DumpPolicy::new().with_default_member("name"),
        )));
        let blank = DumpPolicy::new().with_default_member("");
        assert_eq!(class.effective_default_member(Some(&blank)), Some("name"));
        let other = DumpPolicy::new().with_default_member("id");
        assert_eq!(class.effective_default_member(Some(&other)), Some("id"));
    }

    #[test]
    fn explicit_policy_replaces_annotations() {
        static CELL: TypeInfoCell = TypeInfoCell::new();
        let info = CELL.get_or_init(|| {
            TypeInfo::opaque::<u8>().with_policy(DumpPolicy::new().with_max_length(3))
        });
        let class = ClassDumpInfo::new(
            info,
            None,
            Some(DumpPolicy::new().with_max_length(9)),
            Origin::Explicit,
        );
        assert_eq!(class.effective_max_length(None), 9);
        let unlimited = DumpPolicy::new().with_max_length(-1);
        assert_eq!(class.effective_max_length(Some(&unlimited)), -1);
        assert!(!class.has_shadow());
    }
}
