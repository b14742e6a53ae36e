use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cmp::Ordering;

use crate::engine::session::{DumpSession, unwrap_forward};
use crate::info::TypeInfo;
use crate::policy::DumpPolicy;
use crate::registry::ClassDumpInfo;
use crate::{BasicValue, Dump, DumpError, DumpRef, Mapping, Sequence, TextSink, render};

/// The header name of a sequence.
///
/// Arrays and boxed slices are named after their item type, `i32[2]`
/// rather than `[i32; 2][2]`.
fn sequence_name<'a>(info: &'a TypeInfo, sequence: &dyn Sequence) -> &'a str {
    let name = info.type_name();
    if name.starts_with('[') || name.starts_with("Box<[") {
        sequence.item_info().type_name()
    } else {
        name
    }
}

/// The sort key of an item of a hash-ordered collection.
enum SortKey<'a> {
    /// Scalars compare by value and are rendered once they are taken.
    Value(BasicValue<'a>),
    /// Anything else compares by its rendered text.
    Text(String),
}

impl SortKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Value(a), Self::Value(b)) => a.sort_cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Value(a), Self::Text(b)) => a.to_text().as_ref().cmp(b.as_str()),
            (Self::Text(a), Self::Value(b)) => a.as_str().cmp(b.to_text().as_ref()),
        }
    }
}

impl DumpSession<'_> {
    /// The number of items to render; `None` renders all of them.
    fn item_limit(&self, class: &ClassDumpInfo, policy: Option<&DumpPolicy>) -> Option<usize> {
        render::max_items(class.effective_max_length(policy), self.config.max_elements)
    }

    /// Renders `{name}[{len}]:` followed by the items, one per line.
    ///
    /// Byte sequences render as a hex dump on the header line.
    pub(super) fn render_sequence(
        &mut self,
        sink: &mut TextSink<'_>,
        info: &TypeInfo,
        sequence: &dyn Sequence,
        class: &Arc<ClassDumpInfo>,
        policy: Option<&DumpPolicy>,
    ) -> Result<(), DumpError> {
        let len = sequence.len();
        sink.write_str(&format!("{}[{len}]:", sequence_name(info, sequence)))?;
        let limit = self.item_limit(class, policy);

        if sequence.item_info().is::<u8>() {
            if len > 0 {
                let bytes = sequence
                    .items()
                    .filter_map(|item| item.downcast_ref::<u8>().copied());
                sink.write_str(" ")?;
                sink.write_str(&render::hex_bytes(bytes, len, limit))?;
            }
            return Ok(());
        }

        let take = limit.map_or(len, |limit| limit.min(len));
        sink.indent();
        let result = self.render_items(sink, sequence, take, len);
        sink.unindent();
        result
    }

    fn render_items(
        &mut self,
        sink: &mut TextSink<'_>,
        sequence: &dyn Sequence,
        take: usize,
        len: usize,
    ) -> Result<(), DumpError> {
        if sequence.is_ordered() {
            for item in sequence.items().take(take) {
                sink.newline()?;
                self.render_value(sink, item, None, None)?;
            }
        } else {
            let mut items = Vec::with_capacity(len);
            for item in sequence.items() {
                items.push((self.sort_key(item)?, item));
            }
            items.sort_by(|a, b| a.0.cmp(&b.0));
            for (key, item) in items.into_iter().take(take) {
                sink.newline()?;
                self.write_sorted(sink, key, item)?;
            }
        }

        if take < len {
            sink.newline()?;
            sink.write_str(&render::truncation_line(take, len))?;
        }
        Ok(())
    }

    /// Renders `{type_name}[{len}]:` followed by the braced entries.
    pub(super) fn render_map(
        &mut self,
        sink: &mut TextSink<'_>,
        info: &TypeInfo,
        map: &dyn Mapping,
        class: &Arc<ClassDumpInfo>,
        policy: Option<&DumpPolicy>,
    ) -> Result<(), DumpError> {
        sink.write_str(&format!("{}[{}]:", info.type_name(), map.len()))?;
        self.render_map_entries(sink, map, class, policy)
    }

    /// Renders `{`, one `key = value;` line per entry, then `}`.
    pub(super) fn render_map_entries(
        &mut self,
        sink: &mut TextSink<'_>,
        map: &dyn Mapping,
        class: &Arc<ClassDumpInfo>,
        policy: Option<&DumpPolicy>,
    ) -> Result<(), DumpError> {
        let len = map.len();
        let take = self
            .item_limit(class, policy)
            .map_or(len, |limit| limit.min(len));

        sink.newline()?;
        sink.write_str("{")?;
        sink.indent();
        let result = self.render_entries(sink, map, take, len);
        sink.unindent();
        result?;
        sink.newline()?;
        Ok(sink.write_str("}")?)
    }

    fn render_entries(
        &mut self,
        sink: &mut TextSink<'_>,
        map: &dyn Mapping,
        take: usize,
        len: usize,
    ) -> Result<(), DumpError> {
        if map.is_ordered() {
            for (key, value) in map.entries().take(take) {
                sink.newline()?;
                self.render_value(sink, key, None, None)?;
                self.render_entry_value(sink, value)?;
            }
        } else {
            let mut entries = Vec::with_capacity(len);
            for (key, value) in map.entries() {
                entries.push((self.sort_key(key)?, key, value));
            }
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            for (sort_key, key, value) in entries.into_iter().take(take) {
                sink.newline()?;
                self.write_sorted(sink, sort_key, key)?;
                self.render_entry_value(sink, value)?;
            }
        }

        if take < len {
            sink.newline()?;
            sink.write_str(&render::truncation_line(take, len))?;
        }
        Ok(())
    }

    /// Scalars sort by value. Other items are rendered up front, including
    /// those cut by the item limit, so every composite of the collection is
    /// marked as visited whatever the limit.
    fn sort_key<'v>(&mut self, item: &'v dyn Dump) -> Result<SortKey<'v>, DumpError> {
        match unwrap_forward(item).dump_ref() {
            DumpRef::Basic(value) => Ok(SortKey::Value(value)),
            _ => Ok(SortKey::Text(self.render_to_string(item)?)),
        }
    }

    fn write_sorted(
        &mut self,
        sink: &mut TextSink<'_>,
        key: SortKey<'_>,
        item: &dyn Dump,
    ) -> Result<(), DumpError> {
        match key {
            SortKey::Value(_) => self.render_value(sink, item, None, None),
            SortKey::Text(text) => Ok(sink.write_str(&text)?),
        }
    }

    fn render_entry_value(
        &mut self,
        sink: &mut TextSink<'_>,
        value: &dyn Dump,
    ) -> Result<(), DumpError> {
        sink.write_str(" = ")?;
        self.render_value(sink, value, None, None)?;
        Ok(sink.write_str(";")?)
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::BTreeMap;
    use alloc::format;
    use alloc::string::String;
    use alloc::vec::Vec;
    use std::collections::{HashMap, HashSet};

    use crate::policy::DumpPolicy;
    use crate::{Dump, DumpOptions, Dumper};

    fn dump(value: &dyn Dump) -> String {
        Dumper::new().dump_to_string(value).unwrap()
    }

    #[test]
    fn long_sequences_are_cut() {
        let values: Vec<i32> = (0..20).collect();
        let text = dump(&values);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Vec<i32>[20]:");
        assert_eq!(lines[1], "  0");
        assert_eq!(lines[10], "  9");
        assert_eq!(lines[11], "  ... (the first 10 of 20 items were dumped)");
        assert_eq!(lines.len(), 12);
    }

    #[test]
    fn sequence_limit_from_policy() {
        let values = [1_u8, 2, 3];
        let options = DumpOptions::new().with_policy(DumpPolicy::new().with_max_length(-1));
        let bytes: Vec<u8> = (0..12).collect();
        let text = Dumper::new().dump_to_string_with(&bytes, &options).unwrap();
        assert_eq!(text, "Vec<u8>[12]: 00 01 02 03 04 05 06 07 08 09 0A 0B");

        let options = DumpOptions::new().with_policy(DumpPolicy::new().with_max_length(2));
        let text = Dumper::new().dump_to_string_with(&values, &options).unwrap();
        assert_eq!(text, "u8[3]: 01 02 ...");
    }

    #[test]
    fn arrays_are_named_after_their_items() {
        assert_eq!(dump(&[1_i32, 2]), "i32[2]:\n  1\n  2");
        let boxed: Box<[u16]> = Box::new([5]);
        assert_eq!(dump(&boxed), "u16[1]:\n  5");
        assert_eq!(dump(&vec![3_i8]), "Vec<i8>[1]:\n  3");
    }

    #[test]
    fn bytes_as_hex_dump() {
        assert_eq!(dump(&vec![0xDE_u8, 0xAD, 0xBE, 0xEF]), "Vec<u8>[4]: DE AD BE EF");
        assert_eq!(dump(&Vec::<u8>::new()), "Vec<u8>[0]:");
    }

    #[test]
    fn hash_sets_are_sorted() {
        let set: HashSet<&str> = ["pear", "apple", "fig"].into_iter().collect();
        let text = dump(&set);
        assert_eq!(text, "HashSet<&str>[3]:\n  apple\n  fig\n  pear");

        let numbers: HashSet<u16> = (0..12).collect();
        let lines: Vec<String> = dump(&numbers).lines().skip(1).map(String::from).collect();
        let expected: Vec<String> = (0..10)
            .map(|n| format!("  {n}"))
            .chain([String::from("  ... (the first 10 of 12 items were dumped)")])
            .collect();
        assert_eq!(lines, expected);
    }

    #[test]
    fn maps_render_braced_entries() {
        let map = BTreeMap::from([("a", 1_i32), ("b", 2)]);
        assert_eq!(
            dump(&map),
            "BTreeMap<&str, i32>[2]:\n{\n  a = 1;\n  b = 2;\n}"
        );

        let map: HashMap<u8, bool> = [(3, true), (1, false)].into_iter().collect();
        assert_eq!(dump(&map), "HashMap<u8, bool>[2]:\n{\n  1 = false;\n  3 = true;\n}");

        let map: HashMap<u16, &str> = [(10, "b"), (9, "a")].into_iter().collect();
        assert_eq!(dump(&map), "HashMap<u16, &str>[2]:\n{\n  9 = a;\n  10 = b;\n}");
    }

    #[test]
    fn nested_sequences_indent() {
        let nested = vec![vec![1_u16], vec![]];
        assert_eq!(
            dump(&nested),
            "Vec<Vec<u16>>[2]:\n  Vec<u16>[1]:\n    1\n  Vec<u16>[0]:"
        );
    }
}
