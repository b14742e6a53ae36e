use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::{Any, TypeId};
use core::fmt;

use crate::Dump;
use crate::info::util::{generic_definition, short_type_name};
use crate::info::{EnumInfo, MemberInfo, MethodInfo, TypeRef, Typed};
use crate::policy::DumpPolicy;

// -----------------------------------------------------------------------------
// TypeKind

/// How the engine treats values of a type.
#[derive(Debug, Clone)]
pub enum TypeKind {
    /// Scalars rendered through the formatting table.
    Basic,
    /// Named discrete values or bit flags.
    Enum(EnumInfo),
    Sequence,
    Map,
    /// Callable values rendered by their target method.
    Delegate,
    /// Reflection descriptors rendered by their signature.
    Metadata,
    /// Types whose members are walked.
    Composite,
    /// Types rendered by header only.
    Opaque,
    /// Transparent containers such as `Option` and `Box`.
    Wrapper,
    /// The universal root of every inheritance chain.
    Root,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic => f.pad("Basic"),
            Self::Enum(_) => f.pad("Enum"),
            Self::Sequence => f.pad("Sequence"),
            Self::Map => f.pad("Map"),
            Self::Delegate => f.pad("Delegate"),
            Self::Metadata => f.pad("Metadata"),
            Self::Composite => f.pad("Composite"),
            Self::Opaque => f.pad("Opaque"),
            Self::Wrapper => f.pad("Wrapper"),
            Self::Root => f.pad("Root"),
        }
    }
}

// -----------------------------------------------------------------------------
// BaseInfo

trait BaseAccess: Send + Sync {
    fn project<'a>(&self, derived: &'a dyn Dump) -> Option<&'a dyn Dump>;
}

struct Projection<D, B> {
    get: for<'a> fn(&'a D) -> &'a B,
}

impl<D: Dump, B: Dump> BaseAccess for Projection<D, B> {
    fn project<'a>(&self, derived: &'a dyn Dump) -> Option<&'a dyn Dump> {
        let derived = derived.downcast_ref::<D>()?;
        Some((self.get)(derived).as_dump())
    }
}

/// The base type of a composite, reached by projecting the derived value.
///
/// Inheritance is expressed by embedding the base as a field; the projection
/// returns a reference to that field.
pub struct BaseInfo {
    type_info: TypeRef,
    access: Box<dyn BaseAccess>,
}

impl BaseInfo {
    pub fn new<D: Dump, B: Dump + Typed>(get: for<'a> fn(&'a D) -> &'a B) -> Self {
        Self {
            type_info: TypeRef::of::<B>(),
            access: Box::new(Projection { get }),
        }
    }

    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        self.type_info.get()
    }

    /// Projects a value of the derived type onto its base part.
    ///
    /// Returns `None` if `derived` is not an instance of the derived type.
    #[inline]
    pub fn project<'a>(&self, derived: &'a dyn Dump) -> Option<&'a dyn Dump> {
        self.access.project(derived)
    }
}

impl fmt::Debug for BaseInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BaseInfo")
            .field(&self.type_info().type_path())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// TypeInfo

/// Renders a value through its own string form, see [`DumpPolicy::DISPLAY`].
pub type DisplayFn = fn(&dyn Dump) -> Option<String>;

/// The reflection descriptor of a type.
///
/// # Content
///
/// - **identity**: [`TypeId`], full type path and the shortened type name.
/// - **kind**: [`TypeKind`], deciding how values are rendered.
/// - **base**: optional [`BaseInfo`]; every chain ends at [`Object`](crate::Object).
/// - **members** and **methods**: what the member walk and formatter lookup see.
/// - **policy**: the class-level [`DumpPolicy`].
/// - **shadow**: a type whose annotations stand in for this type's.
///
/// # Obtain
///
/// - [`Typed::type_info`] when the type is known statically.
/// - [`Dump::dump_type_info`] from a `dyn Dump`.
///
/// # Examples
///
/// ```
/// use od_dump::Dump;
/// use od_dump::info::{TypeKind, Typed};
///
/// #[derive(Dump)]
/// struct Point { x: i32, y: i32 }
///
/// let info = Point::type_info();
/// assert_eq!(info.type_name(), "Point");
/// assert!(matches!(info.kind(), TypeKind::Composite));
/// assert_eq!(info.member("y").unwrap().declaring_type(), info.type_path());
/// ```
pub struct TypeInfo {
    type_id: TypeId,
    type_path: &'static str,
    type_name: String,
    generic_definition: Option<&'static str>,
    kind: TypeKind,
    base: Option<BaseInfo>,
    members: Vec<MemberInfo>,
    methods: Vec<MethodInfo>,
    policy: Option<DumpPolicy>,
    shadow: Option<TypeRef>,
    display: Option<DisplayFn>,
}

impl TypeInfo {
    pub fn new<T: Any + ?Sized>(kind: TypeKind) -> Self {
        let type_path = core::any::type_name::<T>();
        Self {
            type_id: TypeId::of::<T>(),
            type_path,
            type_name: short_type_name(type_path),
            generic_definition: generic_definition(type_path),
            kind,
            base: None,
            members: Vec::new(),
            methods: Vec::new(),
            policy: None,
            shadow: None,
            display: None,
        }
    }

    #[inline]
    pub fn basic<T: Any + ?Sized>() -> Self {
        Self::new::<T>(TypeKind::Basic)
    }

    #[inline]
    pub fn composite<T: Any + ?Sized>() -> Self {
        Self::new::<T>(TypeKind::Composite)
    }

    #[inline]
    pub fn opaque<T: Any + ?Sized>() -> Self {
        Self::new::<T>(TypeKind::Opaque)
    }

    #[inline]
    pub fn sequence<T: Any + ?Sized>() -> Self {
        Self::new::<T>(TypeKind::Sequence)
    }

    #[inline]
    pub fn map<T: Any + ?Sized>() -> Self {
        Self::new::<T>(TypeKind::Map)
    }

    #[inline]
    pub fn wrapper<T: Any + ?Sized>() -> Self {
        Self::new::<T>(TypeKind::Wrapper)
    }

    #[inline]
    pub fn enumeration<T: Any + ?Sized>(info: EnumInfo) -> Self {
        Self::new::<T>(TypeKind::Enum(info))
    }

    /// Adds members, recording this type as their declaring type.
    pub fn with_members(mut self, members: impl IntoIterator<Item = MemberInfo>) -> Self {
        let declaring = self.type_path;
        self.members
            .extend(members.into_iter().map(|member| member.declared_by(declaring)));
        self
    }

    /// Adds methods, recording this type as their declaring type.
    pub fn with_methods(mut self, methods: impl IntoIterator<Item = MethodInfo>) -> Self {
        let declaring = self.type_path;
        self.methods
            .extend(methods.into_iter().map(|method| method.declared_by(declaring)));
        self
    }

    pub fn with_base(mut self, base: BaseInfo) -> Self {
        self.base = Some(base);
        self
    }

    pub fn with_policy(mut self, policy: DumpPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn with_shadow(mut self, shadow: TypeRef) -> Self {
        self.shadow = Some(shadow);
        self
    }

    pub fn with_display(mut self, display: DisplayFn) -> Self {
        self.display = Some(display);
        self
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline]
    pub fn is<T: Any + ?Sized>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// The full path, as returned by [`core::any::type_name`].
    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.type_path
    }

    /// The type path with module paths removed from every segment.
    #[inline]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The type path up to its generic arguments, e.g. `alloc::vec::Vec`.
    ///
    /// `None` for non-generic types.
    #[inline]
    pub fn generic_definition(&self) -> Option<&'static str> {
        self.generic_definition
    }

    #[inline]
    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    /// Returns `true` for scalars and enums, the key kinds a map can render
    /// in `key = value` form.
    #[inline]
    pub fn is_basic(&self) -> bool {
        matches!(self.kind, TypeKind::Basic | TypeKind::Enum(_))
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        matches!(self.kind, TypeKind::Root)
    }

    #[inline]
    pub fn base(&self) -> Option<&BaseInfo> {
        self.base.as_ref()
    }

    #[inline]
    pub fn members(&self) -> &[MemberInfo] {
        &self.members
    }

    pub fn member(&self, name: &str) -> Option<&MemberInfo> {
        self.members.iter().find(|member| member.name() == name)
    }

    #[inline]
    pub fn methods(&self) -> &[MethodInfo] {
        &self.methods
    }

    /// All methods named `name`, in declaration order.
    pub fn methods_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a MethodInfo> {
        self.methods.iter().filter(move |method| method.name() == name)
    }

    #[inline]
    pub fn policy(&self) -> Option<&DumpPolicy> {
        self.policy.as_ref()
    }

    #[inline]
    pub fn shadow(&self) -> Option<&'static TypeInfo> {
        self.shadow.map(TypeRef::get)
    }

    #[inline]
    pub fn display(&self) -> Option<DisplayFn> {
        self.display
    }

    /// This type followed by its bases, most-derived first.
    ///
    /// The root is not included.
    pub fn ancestors(&self) -> impl Iterator<Item = &TypeInfo> {
        core::iter::successors(Some(self), |info| {
            info.base().map(BaseInfo::type_info).filter(|base| !base.is_root())
        })
    }

    /// Returns `true` if a value of this type can be passed where `target`
    /// is expected: the same type, or `target` is one of its bases.
    pub fn is_assignable_to(&self, target: &TypeInfo) -> bool {
        target.is_root() || self.ancestors().any(|info| info.type_id == target.type_id)
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeInfo")
            .field("type_path", &self.type_path)
            .field("kind", &self.kind)
            .field("base", &self.base)
            .field("members", &self.members)
            .field("methods", &self.methods)
            .field("policy", &self.policy)
            .field("shadow", &self.shadow)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use crate::info::{BaseInfo, MemberInfo, TypeInfo, TypeInfoCell, Typed};
    use crate::{Dump, DumpRef, Object};

    struct Animal {
        name: &'static str,
    }

    struct Dog {
        animal: Animal,
    }

    impl Typed for Animal {
        fn type_info() -> &'static TypeInfo {
            static CELL: TypeInfoCell = TypeInfoCell::new();
            CELL.get_or_init(|| {
                TypeInfo::composite::<Animal>()
                    .with_members([MemberInfo::field::<Animal, &'static str>("name", |a| &a.name)])
            })
        }
    }

    impl Dump for Animal {
        fn dump_type_info(&self) -> &'static TypeInfo {
            Self::type_info()
        }
        fn dump_ref(&self) -> DumpRef<'_> {
            DumpRef::Composite
        }
        fn as_dump(&self) -> &dyn Dump {
            self
        }
    }

    impl Typed for Dog {
        fn type_info() -> &'static TypeInfo {
            static CELL: TypeInfoCell = TypeInfoCell::new();
            CELL.get_or_init(|| {
                TypeInfo::composite::<Dog>().with_base(BaseInfo::new::<Dog, Animal>(|d| &d.animal))
            })
        }
    }

    impl Dump for Dog {
        fn dump_type_info(&self) -> &'static TypeInfo {
            Self::type_info()
        }
        fn dump_ref(&self) -> DumpRef<'_> {
            DumpRef::Composite
        }
        fn as_dump(&self) -> &dyn Dump {
            self
        }
    }

    #[test]
    fn ancestors_and_assignability() {
        let dog = Dog::type_info();
        let names: Vec<&str> = dog.ancestors().map(TypeInfo::type_name).collect();
        assert_eq!(names, ["Dog", "Animal"]);

        assert!(dog.is_assignable_to(Animal::type_info()));
        assert!(dog.is_assignable_to(Object::type_info()));
        assert!(!Animal::type_info().is_assignable_to(dog));
    }

    #[test]
    fn base_projection() {
        let dog = Dog {
            animal: Animal { name: "Rex" },
        };
        let base = Dog::type_info().base().unwrap();
        let animal = base.project(&dog).unwrap();
        assert_eq!(animal.downcast_ref::<Animal>().unwrap().name, "Rex");
        assert!(base.project(&dog.animal).is_none());
    }
}
