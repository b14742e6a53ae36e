use alloc::format;
use alloc::sync::Arc;
use alloc::vec::Vec;
use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::engine::frame::{Entry, Frame, Level, Pass, levels};
use crate::engine::panic_message;
use crate::engine::session::{DumpSession, is_null};
use crate::info::{MemberInfo, MemberValue};
use crate::policy::{DumpPolicy, Toggle};
use crate::registry::ClassDumpInfo;
use crate::{Dump, DumpError, ReadError, TextSink, render};

/// Reads a member, turning a panicking getter into a read failure.
///
/// A denied read aborts the whole dump.
pub(super) fn read_member<'a>(
    member: &MemberInfo,
    owner: &'a dyn Dump,
) -> Result<Result<MemberValue<'a>, ReadError>, DumpError> {
    let read = catch_unwind(AssertUnwindSafe(|| member.read(owner)))
        .unwrap_or_else(|payload| Err(ReadError::Failed(panic_message(&*payload))));
    match read {
        Err(ReadError::Denied(message)) => Err(DumpError::Denied(message)),
        read => Ok(read),
    }
}

impl DumpSession<'_> {
    /// Renders the members of `value` and its bases, one per line.
    ///
    /// 1. Non-negative orders, base level first. A level stops at its first
    ///    negative order and is pushed onto a stack.
    /// 2. Negative orders, popping the stack (derived level first). A level
    ///    stops at [`DumpPolicy::TAIL_ORDER`] and is queued.
    /// 3. Tail members, in queue order.
    pub(super) fn walk_members(
        &mut self,
        sink: &mut TextSink<'_>,
        value: &dyn Dump,
        class: &Arc<ClassDumpInfo>,
    ) -> Result<(), DumpError> {
        let levels = levels(value, class.clone(), self.registry);
        let identity = value.identity();

        let mut suspended = Vec::with_capacity(levels.len());
        for index in (0..levels.len()).rev() {
            let mut frame = Frame::new(&levels, index);
            self.render_pass(sink, &levels, &mut frame, identity, Pass::Leading)?;
            if !frame.is_done() {
                suspended.push(frame);
            }
        }

        let mut tails = Vec::with_capacity(suspended.len());
        while let Some(mut frame) = suspended.pop() {
            self.render_pass(sink, &levels, &mut frame, identity, Pass::Trailing)?;
            if !frame.is_done() {
                tails.push(frame);
            }
        }

        for mut frame in tails {
            self.render_pass(sink, &levels, &mut frame, identity, Pass::Tail)?;
        }
        Ok(())
    }

    fn render_pass(
        &mut self,
        sink: &mut TextSink<'_>,
        levels: &[Level<'_>],
        frame: &mut Frame,
        identity: usize,
        pass: Pass,
    ) -> Result<(), DumpError> {
        while let Some(entry) = frame.next_in(pass) {
            self.render_entry(sink, &levels[frame.level()], entry, identity)?;
        }
        Ok(())
    }

    fn render_entry(
        &mut self,
        sink: &mut TextSink<'_>,
        level: &Level<'_>,
        entry: Entry,
        identity: usize,
    ) -> Result<(), DumpError> {
        let member = entry.member;
        if member.is_overridable() && !self.mark_virtual(identity, member.name()) {
            return Ok(());
        }

        let read = read_member(member, level.instance)?;
        if let Ok(value) = &read
            && is_null(value.as_dump())
            && level.class.effective_dump_null_values(entry.policy) == Toggle::Skip
        {
            return Ok(());
        }

        sink.newline()?;
        self.write_member(sink, level, member, entry.policy, read)
    }

    /// Writes `{label}{value}`, or the read failure in place of the value.
    pub(super) fn write_member(
        &mut self,
        sink: &mut TextSink<'_>,
        level: &Level<'_>,
        member: &MemberInfo,
        policy: Option<&DumpPolicy>,
        read: Result<MemberValue<'_>, ReadError>,
    ) -> Result<(), DumpError> {
        let format = level
            .class
            .effective_label_format(policy)
            .unwrap_or(&*self.config.label_format);
        sink.write_str(&render::label(format, member.name()))?;

        let declaring = Some(&*level.class);
        match read {
            Ok(MemberValue::Borrowed(value)) => self.render_value(sink, value, policy, declaring),
            Ok(MemberValue::Owned(value)) => {
                self.render_transient(sink, &*value, policy, declaring)
            }
            Err(error) => Ok(sink.write_str(&format!("<failed to read: {error}>"))?),
        }
    }
}
