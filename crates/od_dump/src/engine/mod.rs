//! The traversal engine.
//!
//! A [`Dumper`] holds the engine defaults and the registry; every dump call
//! runs its own session, so one dumper can be shared across threads.

// -----------------------------------------------------------------------------
// Modules

mod collection;
mod formatter;
mod frame;
mod session;
mod walk;

// -----------------------------------------------------------------------------
// Dumper

use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;
use core::any::Any;
use core::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::info::{TypeInfo, Typed};
use crate::policy::DumpPolicy;
use crate::registry::MetadataRegistry;
use crate::{Dump, DumpError, DumperConfig, TextSink};

use session::DumpSession;

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        String::from(*message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        String::from("unknown panic")
    }
}

/// Per-call options of [`Dumper::dump_with`].
#[derive(Debug, Clone, Default)]
pub struct DumpOptions {
    /// A type whose annotations replace those of the dumped value's type.
    pub shadow: Option<&'static TypeInfo>,
    /// The instance policy of the top-level value.
    pub policy: Option<DumpPolicy>,
    /// The indent level of every line after the first.
    pub indent: usize,
}

impl DumpOptions {
    #[inline]
    pub const fn new() -> Self {
        Self {
            shadow: None,
            policy: None,
            indent: 0,
        }
    }

    #[inline]
    pub fn with_shadow<S: Typed>(self) -> Self {
        self.with_shadow_info(S::type_info())
    }

    pub fn with_shadow_info(mut self, shadow: &'static TypeInfo) -> Self {
        self.shadow = Some(shadow);
        self
    }

    pub fn with_policy(mut self, policy: DumpPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}

/// Renders values as indented, human-readable text.
///
/// # Examples
///
/// ```
/// use od_dump::{Dump, Dumper};
///
/// #[derive(Dump)]
/// struct Point {
///     x: i32,
///     #[dump(order = 0)]
///     y: i32,
/// }
///
/// let text = Dumper::new().dump_to_string(&Point { x: 1, y: 2 }).unwrap();
/// let lines: Vec<&str> = text.lines().collect();
/// assert!(lines[0].starts_with("Point (") && lines[0].ends_with("::Point):"));
/// assert_eq!(lines[1..], ["  y = 2", "  x = 1"]);
/// ```
///
/// Panics raised while rendering (for example by a formatter) are caught;
/// the output ends with `*** dump aborted: {message} ***` on a new line.
#[derive(Debug, Clone, Default)]
pub struct Dumper {
    config: DumperConfig,
    registry: Option<Arc<MetadataRegistry>>,
}

impl Dumper {
    /// A dumper with default settings using [`MetadataRegistry::global`].
    #[inline]
    pub const fn new() -> Self {
        Self {
            config: DumperConfig::DEFAULT,
            registry: None,
        }
    }

    /// The shared default dumper, used by [`DumpExt::dump_text`].
    pub fn global() -> &'static Dumper {
        static GLOBAL: Dumper = Dumper::new();
        &GLOBAL
    }

    pub fn with_config(mut self, config: DumperConfig) -> Self {
        self.config = config;
        self
    }

    /// Uses `registry` instead of the global registry.
    pub fn with_registry(mut self, registry: Arc<MetadataRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    #[inline]
    pub fn config(&self) -> &DumperConfig {
        &self.config
    }

    pub fn registry(&self) -> &MetadataRegistry {
        match &self.registry {
            Some(registry) => registry,
            None => MetadataRegistry::global(),
        }
    }

    /// Writes the dump of `value` to `out`.
    ///
    /// # Errors
    ///
    /// [`DumpError::Denied`] if a member read was denied, [`DumpError::Write`]
    /// if `out` failed. Everything else is rendered inline.
    #[inline]
    pub fn dump(&self, out: &mut dyn fmt::Write, value: &dyn Dump) -> Result<(), DumpError> {
        self.dump_with(out, value, &DumpOptions::new())
    }

    /// Writes the dump of `value` to `out` with per-call options.
    ///
    /// # Errors
    ///
    /// See [`dump`](Self::dump).
    pub fn dump_with(
        &self,
        out: &mut dyn fmt::Write,
        value: &dyn Dump,
        options: &DumpOptions,
    ) -> Result<(), DumpError> {
        let mut sink = TextSink::new(out, self.config.indent_width)
            .with_limit(self.config.max_output_length)
            .with_indent(options.indent);
        let registry = self.registry();

        let result = catch_unwind(AssertUnwindSafe(|| {
            let mut session = DumpSession::new(&self.config, registry);
            session.dump_root(&mut sink, value, options.shadow, options.policy.as_ref())
        }));

        match result {
            Ok(result) => result,
            Err(payload) => {
                let message = panic_message(&*payload);
                log::error!(
                    "dump of `{}` aborted: {message}",
                    value.dump_type_info().type_path()
                );
                sink.set_indent_level(0);
                sink.newline()?;
                Ok(sink.write_str(&format!("*** dump aborted: {message} ***"))?)
            }
        }
    }

    /// Returns the dump of `value`.
    ///
    /// # Errors
    ///
    /// [`DumpError::Denied`] if a member read was denied.
    #[inline]
    pub fn dump_to_string(&self, value: &dyn Dump) -> Result<String, DumpError> {
        self.dump_to_string_with(value, &DumpOptions::new())
    }

    /// Returns the dump of `value` with per-call options.
    ///
    /// # Errors
    ///
    /// [`DumpError::Denied`] if a member read was denied.
    pub fn dump_to_string_with(
        &self,
        value: &dyn Dump,
        options: &DumpOptions,
    ) -> Result<String, DumpError> {
        let mut text = String::new();
        self.dump_with(&mut text, value, options)?;
        Ok(text)
    }
}

// -----------------------------------------------------------------------------
// DumpExt

/// Dumps any value with [`Dumper::global`].
///
/// # Examples
///
/// ```
/// use od_dump::DumpExt;
///
/// assert_eq!(42_i32.dump_text(), "42");
/// assert_eq!(Some("text").dump_text(), "text");
/// assert_eq!(None::<u8>.dump_text(), "<null>");
/// ```
pub trait DumpExt: Dump {
    /// The dump text; a denied read renders as `*** {error} ***`.
    fn dump_text(&self) -> String {
        Dumper::global()
            .dump_to_string(self.as_dump())
            .unwrap_or_else(|error| format!("*** {error} ***"))
    }
}

impl<T: ?Sized + Dump> DumpExt for T {}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::format;
    use alloc::string::String;
    use alloc::sync::Arc;
    use alloc::vec::Vec;
    use std::sync::OnceLock;

    use alloc::collections::BTreeMap;

    use super::{DumpOptions, Dumper};
    use crate::info::{MemberInfo, TypeInfo, Typed};
    use crate::policy::{DumpPolicy, Toggle};
    use crate::registry::MetadataRegistry;
    use crate::{Callback, Dump, DumpError, DumpExt, DumperConfig, Mapping, ReadError, Sequence};

    fn header<T: Typed>() -> String {
        let info = T::type_info();
        format!("{} ({})", info.type_name(), info.type_path())
    }

    fn dump(value: &dyn Dump) -> String {
        Dumper::new().dump_to_string(value).unwrap()
    }

    fn body(value: &dyn Dump) -> Vec<String> {
        dump(value).lines().skip(1).map(String::from).collect()
    }

    // -------------------------------------------------------------------------
    // Null handling

    #[derive(Dump)]
    #[dump(skip_nulls)]
    struct QuietClass {
        note: Option<&'static str>,
        id: u8,
    }

    #[derive(Dump)]
    #[dump(skip_nulls)]
    struct LoudMember {
        #[dump(dump_nulls)]
        note: Option<&'static str>,
        other: Option<u8>,
    }

    #[derive(Dump)]
    struct QuietMember {
        #[dump(skip_nulls)]
        note: Option<&'static str>,
        other: Option<u8>,
    }

    #[test]
    fn null_precedence() {
        let class_only = QuietClass { note: None, id: 1 };
        assert_eq!(body(&class_only), ["  id = 1"]);

        let instance_over_class = LoudMember {
            note: None,
            other: None,
        };
        assert_eq!(body(&instance_over_class), ["  note = <null>"]);

        // instance only, and neither
        let mixed = QuietMember {
            note: None,
            other: None,
        };
        assert_eq!(body(&mixed), ["  other = <null>"]);

        let present = QuietClass {
            note: Some("hi"),
            id: 2,
        };
        assert_eq!(body(&present), ["  id = 2", "  note = hi"]);
    }

    #[test]
    fn top_level_null() {
        assert_eq!(dump(&None::<QuietClass>), "<null>");
        let config = DumperConfig::new().with_null_token("nil");
        let text = Dumper::new()
            .with_config(config)
            .dump_to_string(&None::<u8>)
            .unwrap();
        assert_eq!(text, "nil");
    }

    // -------------------------------------------------------------------------
    // Cycles and depth

    #[derive(Dump)]
    #[dump(default_member = "name")]
    struct Node {
        name: &'static str,
        next: OnceLock<Arc<Node>>,
    }

    #[derive(Dump)]
    struct Chain {
        level: u8,
        child: Option<Box<Chain>>,
    }

    fn chain(levels: u8) -> Chain {
        (1..levels).rev().fold(
            Chain {
                level: levels,
                child: None,
            },
            |child, level| Chain {
                level,
                child: Some(Box::new(child)),
            },
        )
    }

    #[test]
    fn cycles_render_the_seen_marker() {
        let node = Arc::new(Node {
            name: "a",
            next: OnceLock::new(),
        });
        assert!(node.next.set(node.clone()).is_ok());

        let text = dump(&*node);
        let node_header = header::<Node>();
        assert_eq!(
            text,
            format!("{node_header}:\n  name = a\n  next = <seen already> {node_header}: name = a")
        );
    }

    #[test]
    fn shared_values_render_once() {
        #[derive(Dump)]
        struct Pair {
            left: Arc<Chain>,
            right: Arc<Chain>,
        }
        let shared = Arc::new(chain(1));
        let text = dump(&Pair {
            left: shared.clone(),
            right: shared,
        });
        assert!(text.contains(&format!("right = <seen already> {}", header::<Chain>())));
    }

    #[test]
    fn depth_marker_after_n_levels() {
        let chain_header = header::<Chain>();
        let options = DumpOptions::new().with_policy(DumpPolicy::new().with_max_depth(1));
        let text = Dumper::new()
            .dump_to_string_with(&chain(3), &options)
            .unwrap();
        assert_eq!(
            text,
            format!(
                "{chain_header}:\n  child = <max depth reached> {chain_header}\n  level = 1"
            )
        );

        let config = DumperConfig::new().with_max_depth(2);
        let text = Dumper::new()
            .with_config(config)
            .dump_to_string(&chain(5))
            .unwrap();
        assert_eq!(text.matches("<max depth reached>").count(), 1);
        assert!(text.contains("level = 2"));
        assert!(!text.contains("level = 3"));
    }

    // -------------------------------------------------------------------------
    // Ordering

    #[derive(Dump)]
    struct Ordered {
        #[dump(order = i32::MIN)]
        tail: u8,
        #[dump(order = -1)]
        late: u8,
        #[dump(order = 0)]
        first: u8,
        #[dump(order = 5)]
        fifth: u8,
        plain: u8,
    }

    #[derive(Dump)]
    struct BaseLevel {
        #[dump(order = i32::MIN)]
        b_tail: u8,
        #[dump(order = -1)]
        b_late: u8,
        #[dump(order = 0)]
        b_first: u8,
    }

    #[derive(Dump)]
    struct DerivedLevel {
        #[dump(base)]
        base: BaseLevel,
        #[dump(order = i32::MIN)]
        d_tail: u8,
        #[dump(order = -1)]
        d_late: u8,
        #[dump(order = 0)]
        d_first: u8,
    }

    fn names(value: &dyn Dump) -> Vec<String> {
        body(value)
            .iter()
            .filter_map(|line| line.trim().split(" = ").next().map(String::from))
            .collect()
    }

    #[test]
    fn three_pass_ordering() {
        let value = Ordered {
            tail: 0,
            late: 0,
            first: 0,
            fifth: 0,
            plain: 0,
        };
        assert_eq!(names(&value), ["first", "fifth", "plain", "late", "tail"]);
    }

    #[test]
    fn derived_levels_interleave() {
        let value = DerivedLevel {
            base: BaseLevel {
                b_tail: 0,
                b_late: 0,
                b_first: 0,
            },
            d_tail: 0,
            d_late: 0,
            d_first: 0,
        };
        assert_eq!(
            names(&value),
            ["b_first", "d_first", "d_late", "b_late", "d_tail", "b_tail"]
        );
    }

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

    #[test]
    fn overridden_members_render_once() {
        let square = Square {
            shape: Shape {
                area: 0.0,
                label: "shape",
                name: "square",
            },
            area: 4.0,
            label: "sq",
        };
        assert_eq!(body(&square), ["  name = square", "  area = 4", "  label = sq"]);
    }

    // -------------------------------------------------------------------------
    // Values

    bitflags::bitflags! {
        #[derive(Clone, Copy)]
        struct Perm: u8 {
            const A = 1;
            const B = 2;
            const C = 4;
        }
    }

    crate::impl_dump_bitflags!(Perm);

    #[derive(Dump)]
    struct Article {
        #[dump(max_length = 5)]
        title: &'static str,
        #[dump(format = "{:>4}")]
        views: u32,
        #[dump(label = "[{name}] ")]
        rank: i32,
    }

    #[test]
    fn scalar_rendering() {
        assert_eq!(dump(&42_i32), "42");
        assert_eq!(dump(&(Perm::A | Perm::C)), "Perm.A|Perm.C");
        let article = Article {
            title: "hello world!",
            views: 7,
            rank: -3,
        };
        assert_eq!(body(&article), ["  [rank] -3", "  title = hello...", "  views =    7"]);
    }

    #[derive(Dump)]
    struct Account {
        #[dump(mask)]
        password: &'static str,
        #[dump(mask, mask_text = "<hidden>")]
        pin: u16,
        user: &'static str,
    }

    #[test]
    fn masked_members() {
        let account = Account {
            password: "hunter2",
            pin: 1234,
            user: "ann",
        };
        assert_eq!(
            body(&account),
            ["  password = ******", "  pin = <hidden>", "  user = ann"]
        );
    }

    // -------------------------------------------------------------------------
    // Formatters

    #[derive(Dump)]
    #[dump(methods(short))]
    struct Vehicle {
        wheels: u8,
    }

    impl Vehicle {
        fn short(&self) -> String {
            format!("{} wheels", self.wheels)
        }
    }

    #[derive(Dump)]
    #[dump(opaque, static_methods(hex: u32))]
    struct Formats;

    impl Formats {
        fn hex(value: &u32) -> String {
            format!("{value:#x}")
        }
    }

    #[derive(Dump)]
    #[dump(static_methods(explode: u8))]
    struct Volatile {
        #[dump(formatter = "explode")]
        value: u8,
    }

    impl Volatile {
        fn explode(_: &u8) -> String {
            panic!("kaboom")
        }
    }

    #[derive(Dump)]
    struct Garage {
        #[dump(formatter = "short")]
        car: Vehicle,
        #[dump(formatter = "hex", formatter_type = Formats)]
        code: u32,
        #[dump(formatter = "nope")]
        slots: u8,
    }

    #[derive(Dump)]
    #[dump(display)]
    struct Version {
        major: u8,
        minor: u8,
    }

    impl core::fmt::Display for Version {
        fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            write!(f, "{}.{}", self.major, self.minor)
        }
    }

    #[derive(Dump)]
    struct Release {
        #[dump(display_format)]
        version: Version,
        #[dump(display_format)]
        build: u16,
    }

    #[test]
    fn display_format_uses_own_text() {
        let release = Release {
            version: Version { major: 1, minor: 2 },
            build: 7,
        };
        assert_eq!(body(&release), ["  build = 7", "  version = 1.2"]);
    }

    #[test]
    fn formatters_resolve_or_report() {
        let garage = Garage {
            car: Vehicle { wheels: 4 },
            code: 255,
            slots: 2,
        };
        assert_eq!(
            body(&garage),
            [
                "  car = 4 wheels",
                "  code = 0xff",
                "  slots = <formatter not found: u8::nope(&self) -> String>",
            ]
        );
    }

    #[test]
    fn panics_abort_with_a_message() {
        let text = dump(&Volatile { value: 1 });
        assert_eq!(
            text,
            format!("{}:\n  value = \n*** dump aborted: kaboom ***", header::<Volatile>())
        );
    }

    // -------------------------------------------------------------------------
    // Reads

    #[derive(Dump)]
    #[dump(property(name = "broken", get = Sensor::broken, fallible))]
    #[dump(property(name = "crash", get = Sensor::crash))]
    struct Sensor {
        value: u8,
    }

    impl Sensor {
        fn broken(&self) -> Result<u8, &'static str> {
            Err("sensor offline")
        }

        fn crash(&self) -> u8 {
            panic!("getter crashed")
        }
    }

    #[derive(Dump)]
    #[dump(property(name = "secret", get = Vault::secret, guarded))]
    struct Vault {
        id: u8,
    }

    impl Vault {
        fn secret(&self) -> Result<u8, ReadError> {
            Err(ReadError::Denied(String::from("vault is sealed")))
        }
    }

    #[test]
    fn read_failures_render_inline() {
        assert_eq!(
            body(&Sensor { value: 3 }),
            [
                "  broken = <failed to read: sensor offline>",
                "  crash = <failed to read: getter crashed>",
                "  value = 3",
            ]
        );
    }

    #[test]
    fn denied_reads_abort() {
        let error = Dumper::new().dump_to_string(&Vault { id: 1 }).unwrap_err();
        assert!(matches!(error, DumpError::Denied(message) if message.contains("sealed")));
        assert!(Vault { id: 1 }.dump_text().starts_with("*** dump aborted"));
    }

    #[derive(Dump)]
    struct Point {
        x: i32,
    }

    #[derive(Dump)]
    #[dump(property(name = "a", get = Plotter::make))]
    #[dump(property(name = "b", get = Plotter::make))]
    struct Plotter;

    impl Plotter {
        fn make(&self) -> Box<Point> {
            Box::new(Point { x: 1 })
        }
    }

    #[test]
    fn computed_values_are_not_cycles() {
        let text = dump(&Plotter);
        assert!(!text.contains("<seen already>"));
        assert_eq!(text.matches("x = 1").count(), 2);
    }

    // -------------------------------------------------------------------------
    // Recursion, shadows and registries

    #[derive(Dump)]
    struct Person {
        name: &'static str,
        age: u8,
    }

    #[derive(Dump)]
    struct Team {
        #[dump(no_recurse, default_member = "name")]
        lead: Person,
        #[dump(no_recurse)]
        second: Person,
    }

    #[test]
    fn suppressed_recursion_shows_default_member() {
        let team = Team {
            lead: Person { name: "Ann", age: 40 },
            second: Person { name: "Bob", age: 30 },
        };
        let person = header::<Person>();
        assert_eq!(
            body(&team),
            [format!("  lead = {person}: name = Ann"), format!("  second = {person}")]
        );
    }

    #[derive(Dump)]
    struct Credentials {
        token: &'static str,
        user: &'static str,
    }

    #[derive(Dump)]
    #[dump(skip_nulls)]
    struct CredentialsShadow {
        #[dump(mask)]
        token: (),
        #[dump(order = 0)]
        user: (),
    }

    #[test]
    fn caller_shadow() {
        let credentials = Credentials {
            token: "abc",
            user: "bob",
        };
        let options = DumpOptions::new().with_shadow::<CredentialsShadow>();
        let text = Dumper::new()
            .dump_to_string_with(&credentials, &options)
            .unwrap();
        let lines: Vec<&str> = text.lines().skip(1).collect();
        assert_eq!(lines, ["  user = bob", "  token = ******"]);
    }

    #[test]
    fn isolated_registry() {
        let registry = Arc::new(MetadataRegistry::new());
        registry
            .register::<Credentials>(Some(CredentialsShadow::type_info()), None, false)
            .unwrap();
        let dumper = Dumper::new().with_registry(registry);
        let credentials = Credentials {
            token: "abc",
            user: "bob",
        };
        let text = dumper.dump_to_string(&credentials).unwrap();
        assert!(text.ends_with("  user = bob\n  token = ******"));
        // the global registry is untouched
        assert!(dump(&credentials).contains("token = abc"));
    }

    #[test]
    fn indent_and_output_limit() {
        let options = DumpOptions::new().with_indent(2);
        let text = Dumper::new()
            .dump_to_string_with(&Person { name: "Ann", age: 4 }, &options)
            .unwrap();
        assert!(text.ends_with(":\n      age = 4\n      name = Ann"));

        let config = DumperConfig::new().with_max_output_length(5);
        let text = Dumper::new()
            .with_config(config)
            .dump_to_string(&vec![1, 2, 3])
            .unwrap();
        assert_eq!(text, "Vec<i");
    }

    #[test]
    fn root_object_renders_its_name() {
        assert_eq!(dump(&crate::Object), "Object");
        assert_eq!(dump(&()), "() (())");
    }

    // -------------------------------------------------------------------------
    // Collection capabilities

    #[derive(Dump)]
    #[dump(sequence)]
    struct Bag {
        name: &'static str,
        #[dump(ignore)]
        items: Vec<i32>,
    }

    impl Sequence for Bag {
        fn len(&self) -> usize {
            self.items.len()
        }

        fn item_info(&self) -> &'static TypeInfo {
            i32::type_info()
        }

        fn items(&self) -> Box<dyn Iterator<Item = &dyn Dump> + '_> {
            Box::new(self.items.iter().map(|item| item as &dyn Dump))
        }
    }

    #[derive(Dump)]
    struct Shelf {
        #[dump(enumerate)]
        shown: Bag,
        hidden: Bag,
    }

    #[test]
    fn custom_sequences_enumerate_on_request() {
        let bag = Bag {
            name: "b",
            items: vec![1, 2],
        };
        let bag_header = header::<Bag>();
        assert_eq!(dump(&bag), format!("{bag_header}:\n  name = b"));

        let options =
            DumpOptions::new().with_policy(DumpPolicy::new().with_enumerate(Toggle::Do));
        let text = Dumper::new().dump_to_string_with(&bag, &options).unwrap();
        assert_eq!(text, format!("{bag_header}:\n  name = b\n  Bag[2]:\n    1\n    2"));

        let shelf = Shelf {
            shown: Bag {
                name: "s",
                items: vec![5],
            },
            hidden: Bag {
                name: "h",
                items: vec![6],
            },
        };
        assert_eq!(
            body(&shelf),
            [
                format!("  hidden = {bag_header}:"),
                String::from("    name = h"),
                format!("  shown = {bag_header}:"),
                String::from("    name = s"),
                String::from("    Bag[1]:"),
                String::from("      5"),
            ]
        );
    }

    #[derive(Dump)]
    #[dump(mapping)]
    struct Dict {
        label: &'static str,
        #[dump(ignore)]
        entries: BTreeMap<i32, &'static str>,
    }

    impl Mapping for Dict {
        fn len(&self) -> usize {
            self.entries.len()
        }

        fn key_info(&self) -> &'static TypeInfo {
            i32::type_info()
        }

        fn entries(&self) -> Box<dyn Iterator<Item = (&dyn Dump, &dyn Dump)> + '_> {
            Box::new(
                self.entries
                    .iter()
                    .map(|(key, value)| (key as &dyn Dump, value as &dyn Dump)),
            )
        }
    }

    #[test]
    fn basic_keyed_mappings_replace_the_member_walk() {
        let dict = Dict {
            label: "unused",
            entries: BTreeMap::from([(2, "b"), (1, "a")]),
        };
        assert_eq!(
            dump(&dict),
            format!("{}:\n{{\n  1 = a;\n  2 = b;\n}}", header::<Dict>())
        );
    }

    // -------------------------------------------------------------------------
    // Delegates and metadata

    fn tick() {}

    #[derive(Dump)]
    struct Timer {
        on_tick: Callback<fn()>,
        kind: &'static TypeInfo,
        field: &'static MemberInfo,
    }

    #[test]
    fn delegate_and_metadata_members() {
        let Some(field) = Point::type_info().member("x") else {
            panic!("`Point::x` is described");
        };
        let timer = Timer {
            on_tick: crate::callback!(tick as fn()),
            kind: Point::type_info(),
            field,
        };
        assert_eq!(
            body(&timer),
            [
                String::from("  field = field Point::x: i32"),
                format!("  kind = type {}", Point::type_info().type_path()),
                String::from("  on_tick = delegate tests::tick [static]"),
            ]
        );

        let anonymous = Timer {
            on_tick: Callback::new(tick as fn()),
            ..timer
        };
        assert_eq!(body(&anonymous)[2], "  on_tick = delegate fn() [static]");
    }
}
