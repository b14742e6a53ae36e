use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::Dump;
use crate::info::{MemberInfo, TypeInfo};
use crate::policy::{DumpPolicy, Toggle};
use crate::registry::{ClassDumpInfo, MetadataRegistry};

// -----------------------------------------------------------------------------
// Level

/// One level of an instance's inheritance chain: the instance projected onto
/// `info`, with the resolved class of that level.
pub(crate) struct Level<'v> {
    pub info: &'static TypeInfo,
    pub instance: &'v dyn Dump,
    pub class: Arc<ClassDumpInfo>,
}

/// Returns the levels of `value`, most derived first, root excluded.
///
/// `class` is used for the value's own level so caller shadows apply to it.
pub(crate) fn levels<'v>(
    value: &'v dyn Dump,
    class: Arc<ClassDumpInfo>,
    registry: &MetadataRegistry,
) -> Vec<Level<'v>> {
    let mut levels = Vec::new();
    let mut info = value.dump_type_info();
    let mut instance = value;
    let mut class = class;

    while !info.is_root() {
        let base = info.base();
        levels.push(Level {
            info,
            instance,
            class,
        });
        let Some(base) = base else { break };
        let Some(projected) = base.project(instance) else {
            log::warn!("`{}` cannot be projected onto its base", info.type_path());
            break;
        };
        info = base.type_info();
        instance = projected;
        class = registry.resolve(info);
    }
    levels
}

// -----------------------------------------------------------------------------
// Entry

/// The pass of the member walk rendering a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Pass {
    /// Non-negative orders, base levels first.
    Leading,
    /// Negative orders, derived levels first.
    Trailing,
    /// [`DumpPolicy::TAIL_ORDER`], after everything else.
    Tail,
}

fn sort_key(order: i32) -> (Pass, u32) {
    if order >= 0 {
        (Pass::Leading, order.unsigned_abs())
    } else if order == DumpPolicy::TAIL_ORDER {
        (Pass::Tail, 0)
    } else {
        (Pass::Trailing, order.unsigned_abs())
    }
}

/// An eligible member of a level with its governing policy.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Entry {
    pub member: &'static MemberInfo,
    pub policy: Option<&'static DumpPolicy>,
    pass: Pass,
    key: u32,
}

/// An overridable member is rendered at the most-derived level declaring it.
fn is_superseded(levels: &[Level<'_>], index: usize, name: &str) -> bool {
    levels[..index]
        .iter()
        .any(|level| level.info.member(name).is_some_and(MemberInfo::is_overridable))
}

/// The policy of the most-derived declaration, or of the nearest base
/// declaration when the most-derived one has none.
fn governing_policy(
    levels: &[Level<'_>],
    index: usize,
    member: &'static MemberInfo,
) -> Option<&'static DumpPolicy> {
    let own = levels[index].class.member_policy(member);
    if own.is_some_and(|policy| !policy.is_default()) {
        return own;
    }
    levels[index + 1..]
        .iter()
        .find_map(|level| {
            let base = level
                .info
                .member(member.name())
                .filter(|base| base.is_overridable())?;
            level
                .class
                .member_policy(base)
                .filter(|policy| !policy.is_default())
        })
        .or(own)
}

fn entries(levels: &[Level<'_>], index: usize) -> Vec<Entry> {
    let level = &levels[index];
    let mut entries: Vec<Entry> = level
        .info
        .members()
        .iter()
        .filter(|member| {
            member.is_readable() && !member.is_indexed() && !member.is_synthesized()
        })
        .filter_map(|member| {
            let policy = if member.is_overridable() {
                if is_superseded(levels, index, member.name()) {
                    return None;
                }
                governing_policy(levels, index, member)
            } else {
                level.class.member_policy(member)
            };
            if policy.is_some_and(|policy| policy.skip == Toggle::Skip) {
                return None;
            }
            let (pass, key) = sort_key(policy.map_or(DumpPolicy::DEFAULT_ORDER, |p| p.order));
            Some(Entry {
                member,
                policy,
                pass,
                key,
            })
        })
        .collect();

    entries.sort_by(|a, b| {
        (a.pass, a.key, a.member.name()).cmp(&(b.pass, b.key, b.member.name()))
    });
    entries
}

// -----------------------------------------------------------------------------
// Frame

/// The sorted members of one level, consumed pass by pass.
pub(crate) struct Frame {
    level: usize,
    entries: Vec<Entry>,
    next: usize,
}

impl Frame {
    pub fn new(levels: &[Level<'_>], level: usize) -> Self {
        Self {
            level,
            entries: entries(levels, level),
            next: 0,
        }
    }

    #[inline]
    pub fn level(&self) -> usize {
        self.level
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.next >= self.entries.len()
    }

    /// Returns the next entry if it belongs to `pass`.
    pub fn next_in(&mut self, pass: Pass) -> Option<Entry> {
        let entry = *self.entries.get(self.next)?;
        (entry.pass == pass).then(|| {
            self.next += 1;
            entry
        })
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::{Frame, Pass, levels, sort_key};
    use crate::Dump;
    use crate::info::Typed;
    use crate::policy::DumpPolicy;
    use crate::registry::MetadataRegistry;

    #[derive(Dump)]
    struct Shape {
        #[dump(overridable, order = 3)]
        area: f64,
        #[dump(overridable)]
        label: &'static str,
        name: &'static str,
    }

    #[derive(Dump)]
    struct Square {
        #[dump(base)]
        shape: Shape,
        #[dump(overridable)]
        area: f64,
        #[dump(overridable, order = -1)]
        label: &'static str,
    }

    fn names(frame: &mut Frame) -> Vec<&'static str> {
        let mut names = Vec::new();
        for pass in [Pass::Leading, Pass::Trailing, Pass::Tail] {
            while let Some(entry) = frame.next_in(pass) {
                names.push(entry.member.name());
            }
        }
        names
    }

    #[test]
    fn sort_groups() {
        assert!(sort_key(0) < sort_key(i32::MAX));
        assert!(sort_key(i32::MAX) < sort_key(-1));
        assert!(sort_key(-1) < sort_key(-2));
        assert!(sort_key(-2) < sort_key(DumpPolicy::TAIL_ORDER));
    }

    #[test]
    fn overridden_members_render_at_the_derived_level() {
        let registry = MetadataRegistry::new();
        let square = Square {
            shape: Shape {
                area: 0.0,
                label: "",
                name: "square",
            },
            area: 4.0,
            label: "sq",
        };
        let class = registry.resolve(Square::type_info());
        let levels = levels(&square, class, &registry);
        assert_eq!(levels.len(), 2);
        assert!(levels[1].info.is::<Shape>());

        // the derived `area` has no policy and inherits order 3
        let mut derived = Frame::new(&levels, 0);
        assert_eq!(derived.entries[0].policy.map(|p| p.order), Some(3));
        assert_eq!(names(&mut derived), ["area", "label"]);

        let mut base = Frame::new(&levels, 1);
        assert_eq!(names(&mut base), ["name"]);
    }
}
