use alloc::string::String;

use foldhash::fast::FixedState;

pub(crate) type FixedHashMap<K, V> = hashbrown::HashMap<K, V, FixedState>;
pub(crate) type FixedHashSet<K> = hashbrown::HashSet<K, FixedState>;

/// Deterministic hasher state usable in `const` constructors.
pub(crate) const FIXED_STATE: FixedState = FixedState::with_seed(0x6f64_5f64_756d_70);

const DELIMITERS: &[char] = &['<', '>', ',', ' ', '[', ']', '(', ')', ';', '&', '*'];

/// Strips module paths from every path segment of a type path.
///
/// `alloc::vec::Vec<demo::Person>` becomes `Vec<Person>`.
pub(crate) fn short_type_name(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut start = 0;
    for (index, c) in path.char_indices() {
        if DELIMITERS.contains(&c) {
            push_last_segment(&mut out, &path[start..index]);
            out.push(c);
            start = index + c.len_utf8();
        }
    }
    push_last_segment(&mut out, &path[start..]);
    out
}

fn push_last_segment(out: &mut String, segment: &str) {
    out.push_str(segment.rsplit("::").next().unwrap_or(segment));
}

/// The type path without generic arguments, if the path has any.
pub(crate) fn generic_definition(path: &'static str) -> Option<&'static str> {
    path.find('<').map(|index| &path[..index])
}
