use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::TypeId;

use crate::engine::{formatter, frame};
use crate::info::TypeInfo;
use crate::info::util::{FIXED_STATE, FixedHashSet};
use crate::policy::{DumpPolicy, Toggle};
use crate::registry::{ClassDumpInfo, MetadataRegistry, Origin};
use crate::{Dump, DumpError, DumpRef, DumperConfig, TextSink, render};

pub(crate) const SEEN_MARKER: &str = "<seen already> ";
pub(crate) const DEPTH_MARKER: &str = "<max depth reached> ";

type ObjectKey = (usize, TypeId);
type VirtualKey = (usize, &'static str);

/// Follows [`DumpRef::Forward`] to the innermost value.
pub(crate) fn unwrap_forward(mut value: &dyn Dump) -> &dyn Dump {
    while let DumpRef::Forward(inner) = value.dump_ref() {
        value = inner;
    }
    value
}

#[inline]
pub(crate) fn is_null(value: &dyn Dump) -> bool {
    unwrap_forward(value).dump_ref().is_null()
}

// -----------------------------------------------------------------------------
// DumpSession

/// The state of one top-level dump call.
///
/// - `visited`: composites being or already rendered, keyed by identity and type.
/// - `visited_virtual`: overridable members already rendered per instance.
/// - `depth`: the remaining descent budget, seeded by the first composite.
///
/// Keys inserted while rendering an owned (computed) value are removed once
/// that value is dropped, since its address can be reused.
pub(crate) struct DumpSession<'d> {
    pub(super) config: &'d DumperConfig,
    pub(super) registry: &'d MetadataRegistry,
    visited: FixedHashSet<ObjectKey>,
    visited_virtual: FixedHashSet<VirtualKey>,
    depth: Option<usize>,
    transient: usize,
    transient_objects: Vec<ObjectKey>,
    transient_virtual: Vec<VirtualKey>,
}

impl<'d> DumpSession<'d> {
    pub fn new(config: &'d DumperConfig, registry: &'d MetadataRegistry) -> Self {
        Self {
            config,
            registry,
            visited: FixedHashSet::with_hasher(FIXED_STATE),
            visited_virtual: FixedHashSet::with_hasher(FIXED_STATE),
            depth: None,
            transient: 0,
            transient_objects: Vec::new(),
            transient_virtual: Vec::new(),
        }
    }

    /// Renders a top-level value, with an optional caller shadow and policy.
    pub fn dump_root(
        &mut self,
        sink: &mut TextSink<'_>,
        value: &dyn Dump,
        shadow: Option<&'static TypeInfo>,
        policy: Option<&DumpPolicy>,
    ) -> Result<(), DumpError> {
        let value = unwrap_forward(value);
        let info = value.dump_type_info();
        let mut class = self.registry.resolve(info);
        if let Some(shadow) = shadow {
            let policy = shadow
                .policy()
                .cloned()
                .unwrap_or_else(|| class.policy().clone());
            class = Arc::new(ClassDumpInfo::new(
                info,
                Some(shadow),
                Some(policy),
                Origin::Explicit,
            ));
        }
        self.render_resolved(sink, value, &class, policy, None)
    }

    /// Renders any value. `policy` is the instance policy, usually the policy
    /// of the member holding the value; `declaring` is that member's level.
    pub fn render_value(
        &mut self,
        sink: &mut TextSink<'_>,
        value: &dyn Dump,
        policy: Option<&DumpPolicy>,
        declaring: Option<&ClassDumpInfo>,
    ) -> Result<(), DumpError> {
        let value = unwrap_forward(value);
        let class = self.registry.resolve(value.dump_type_info());
        self.render_resolved(sink, value, &class, policy, declaring)
    }

    /// Renders an owned value, forgetting the identities it introduced
    /// afterwards.
    pub fn render_transient(
        &mut self,
        sink: &mut TextSink<'_>,
        value: &dyn Dump,
        policy: Option<&DumpPolicy>,
        declaring: Option<&ClassDumpInfo>,
    ) -> Result<(), DumpError> {
        let objects = self.transient_objects.len();
        let virtuals = self.transient_virtual.len();
        self.transient += 1;
        let result = self.render_value(sink, value, policy, declaring);
        self.transient -= 1;
        for key in self.transient_objects.drain(objects..) {
            self.visited.remove(&key);
        }
        for key in self.transient_virtual.drain(virtuals..) {
            self.visited_virtual.remove(&key);
        }
        result
    }

    /// Renders a value into a fresh string at indent level zero.
    pub fn render_to_string(&mut self, value: &dyn Dump) -> Result<String, DumpError> {
        let mut text = String::new();
        let mut sink = TextSink::new(&mut text, self.config.indent_width);
        self.render_value(&mut sink, value, None, None)?;
        Ok(text)
    }

    /// Marks an overridable member of `identity` as rendered; `false` if it
    /// already was.
    pub fn mark_virtual(&mut self, identity: usize, name: &'static str) -> bool {
        let key = (identity, name);
        let inserted = self.visited_virtual.insert(key);
        if inserted && self.transient > 0 {
            self.transient_virtual.push(key);
        }
        inserted
    }

    fn mark_visited(&mut self, key: ObjectKey) {
        if self.visited.insert(key) && self.transient > 0 {
            self.transient_objects.push(key);
        }
    }

    fn render_resolved(
        &mut self,
        sink: &mut TextSink<'_>,
        value: &dyn Dump,
        class: &Arc<ClassDumpInfo>,
        policy: Option<&DumpPolicy>,
        declaring: Option<&ClassDumpInfo>,
    ) -> Result<(), DumpError> {
        let dump_ref = value.dump_ref();
        if dump_ref.is_null() {
            return Ok(sink.write_str(&self.config.null_token)?);
        }
        if let Some(formatter) = class.effective_formatter(policy) {
            let text = formatter::format(value, formatter, declaring);
            return Ok(sink.write_str(&text)?);
        }
        if let Some(mask) = class.effective_mask(policy) {
            return Ok(sink.write_str(mask.unwrap_or(&*self.config.mask_text))?);
        }

        let format = class.effective_value_format(policy);
        let max_length = class.effective_max_length(policy);
        let info = value.dump_type_info();
        let text = match dump_ref {
            DumpRef::Null => return Ok(sink.write_str(&self.config.null_token)?),
            DumpRef::Basic(basic) => render::basic(&basic, format, max_length),
            DumpRef::Enum(enumeration) => render::enumeration(&enumeration, format),
            DumpRef::Delegate(delegate) => render::delegate(&delegate),
            DumpRef::Metadata(metadata) => render::metadata(&metadata),
            DumpRef::Sequence(sequence) => {
                return self.render_sequence(sink, info, sequence, class, policy);
            }
            DumpRef::Map(map) => return self.render_map(sink, info, map, class, policy),
            DumpRef::Forward(inner) => return self.render_value(sink, inner, policy, declaring),
            DumpRef::Composite => return self.render_composite(sink, value, class, policy, false),
            DumpRef::Opaque => return self.render_composite(sink, value, class, policy, true),
        };
        Ok(sink.write_str(&text)?)
    }

    fn render_composite(
        &mut self,
        sink: &mut TextSink<'_>,
        value: &dyn Dump,
        class: &Arc<ClassDumpInfo>,
        policy: Option<&DumpPolicy>,
        opaque: bool,
    ) -> Result<(), DumpError> {
        let info = value.dump_type_info();
        if info.is_root() {
            return Ok(sink.write_str(info.type_name())?);
        }
        if class.effective_value_format(policy) == Some(DumpPolicy::DISPLAY)
            && let Some(display) = info.display()
            && let Some(text) = display(value)
        {
            let max_length = class.effective_max_length(policy);
            return Ok(sink.write_str(&render::truncate(&text, max_length))?);
        }
        let header = format!("{} ({})", info.type_name(), info.type_path());
        if opaque {
            return Ok(sink.write_str(&header)?);
        }

        if class.effective_recurse_dump(policy) == Toggle::Skip {
            sink.write_str(&header)?;
            return self.render_default_member(sink, value, class, policy);
        }

        // Zero-sized values share addresses, so they carry no identity.
        let tracked = size_of_val(value) > 0;
        let key = (value.identity(), info.type_id());
        if tracked && self.visited.contains(&key) {
            log::trace!("cycle cut at `{}`", info.type_path());
            sink.write_str(SEEN_MARKER)?;
            sink.write_str(&header)?;
            return self.render_default_member(sink, value, class, policy);
        }

        let config = self.config;
        let remaining = *self.depth.get_or_insert_with(|| {
            class
                .effective_max_depth(policy)
                .unwrap_or(config.max_depth)
        });
        if remaining == 0 {
            log::trace!("depth limit reached at `{}`", info.type_path());
            sink.write_str(DEPTH_MARKER)?;
            return Ok(sink.write_str(&header)?);
        }

        if tracked {
            self.mark_visited(key);
        }
        self.depth = Some(remaining - 1);
        let result = self.render_body(sink, value, &header, class, policy);
        self.depth = Some(remaining);
        result
    }

    fn render_body(
        &mut self,
        sink: &mut TextSink<'_>,
        value: &dyn Dump,
        header: &str,
        class: &Arc<ClassDumpInfo>,
        policy: Option<&DumpPolicy>,
    ) -> Result<(), DumpError> {
        sink.write_str(header)?;
        sink.write_str(":")?;

        if let Some(map) = value.as_mapping()
            && map.key_info().is_basic()
        {
            return self.render_map_entries(sink, map, class, policy);
        }

        sink.indent();
        let walked = self.walk_members(sink, value, class);
        sink.unindent();
        walked?;

        if let Some(sequence) = value.as_sequence()
            && class.effective_enumerate(policy) == Toggle::Do
        {
            sink.indent();
            let info = value.dump_type_info();
            let rendered = match sink.newline() {
                Ok(()) => self.render_sequence(sink, info, sequence, class, policy),
                Err(error) => Err(error.into()),
            };
            sink.unindent();
            rendered?;
        }
        Ok(())
    }

    /// Appends `: {label}{value}` of the representative member, if any.
    fn render_default_member(
        &mut self,
        sink: &mut TextSink<'_>,
        value: &dyn Dump,
        class: &Arc<ClassDumpInfo>,
        policy: Option<&DumpPolicy>,
    ) -> Result<(), DumpError> {
        let Some(name) = class.effective_default_member(policy) else {
            return Ok(());
        };
        let levels = frame::levels(value, class.clone(), self.registry);
        let found = levels.iter().find_map(|level| {
            let member = level
                .info
                .member(name)
                .filter(|member| member.is_readable() && !member.is_indexed())?;
            Some((level, member))
        });
        let Some((level, member)) = found else {
            log::debug!(
                "default member `{name}` not found on `{}`",
                value.dump_type_info().type_path()
            );
            return Ok(());
        };

        let read = super::walk::read_member(member, level.instance)?;
        sink.write_str(": ")?;
        self.write_member(sink, level, member, level.class.member_policy(member), read)
    }
}

#[cfg(test)]
mod tests {
    use super::{is_null, unwrap_forward};
    use crate::Dump;

    #[test]
    fn forwards_are_transparent() {
        let nested: Option<Box<i32>> = Some(Box::new(3));
        assert!(unwrap_forward(&nested).is::<i32>());
        assert!(!is_null(&nested));
        assert!(is_null(&Option::<Box<i32>>::None));
        assert!(is_null(&Some(Option::<u8>::None)));
    }

    #[test]
    fn zero_sized_values_have_no_size() {
        #[derive(Dump)]
        struct Marker;
        let value: &dyn Dump = &Marker;
        assert_eq!(size_of_val(value), 0);
    }
}
