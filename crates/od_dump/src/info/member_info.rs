use alloc::boxed::Box;
use alloc::string::ToString;
use core::fmt;

use crate::policy::DumpPolicy;
use crate::{Dump, ReadError};

// -----------------------------------------------------------------------------
// MemberKind

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// Stored data, read by reference.
    Field,
    /// Computed data, read by calling a getter.
    Property,
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field => f.pad("field"),
            Self::Property => f.pad("property"),
        }
    }
}

// -----------------------------------------------------------------------------
// MemberValue

/// The result of reading a member.
///
/// Fields lend a reference into their owner; properties produce a fresh value
/// that lives only for the duration of its rendering.
pub enum MemberValue<'a> {
    Borrowed(&'a dyn Dump),
    Owned(Box<dyn Dump>),
}

impl MemberValue<'_> {
    #[inline]
    pub fn as_dump(&self) -> &dyn Dump {
        match self {
            Self::Borrowed(value) => *value,
            Self::Owned(value) => &**value,
        }
    }

    /// Returns `true` if the value does not outlive the read.
    #[inline]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Owned(_))
    }
}

// -----------------------------------------------------------------------------
// Accessors

trait MemberAccess: Send + Sync {
    fn read<'a>(&self, owner: &'a dyn Dump) -> Result<MemberValue<'a>, ReadError>;
}

fn owner_of<O: Dump>(owner: &dyn Dump) -> Result<&O, ReadError> {
    owner.downcast_ref::<O>().ok_or_else(|| ReadError::Mismatch {
        expect: core::any::type_name::<O>(),
        actual: owner.dump_type_info().type_path(),
    })
}

struct FieldAccess<O, F> {
    get: for<'a> fn(&'a O) -> &'a F,
}

impl<O: Dump, F: Dump> MemberAccess for FieldAccess<O, F> {
    fn read<'a>(&self, owner: &'a dyn Dump) -> Result<MemberValue<'a>, ReadError> {
        let owner = owner_of::<O>(owner)?;
        Ok(MemberValue::Borrowed((self.get)(owner).as_dump()))
    }
}

struct PropertyAccess<O, V> {
    get: fn(&O) -> V,
}

impl<O: Dump, V: Dump> MemberAccess for PropertyAccess<O, V> {
    fn read<'a>(&self, owner: &'a dyn Dump) -> Result<MemberValue<'a>, ReadError> {
        let owner = owner_of::<O>(owner)?;
        Ok(MemberValue::Owned(Box::new((self.get)(owner))))
    }
}

struct FallibleAccess<O, V, E> {
    get: fn(&O) -> Result<V, E>,
}

impl<O: Dump, V: Dump, E: fmt::Display> MemberAccess for FallibleAccess<O, V, E> {
    fn read<'a>(&self, owner: &'a dyn Dump) -> Result<MemberValue<'a>, ReadError> {
        let owner = owner_of::<O>(owner)?;
        match (self.get)(owner) {
            Ok(value) => Ok(MemberValue::Owned(Box::new(value))),
            Err(error) => Err(ReadError::Failed(error.to_string())),
        }
    }
}

struct GuardedAccess<O, V> {
    get: fn(&O) -> Result<V, ReadError>,
}

impl<O: Dump, V: Dump> MemberAccess for GuardedAccess<O, V> {
    fn read<'a>(&self, owner: &'a dyn Dump) -> Result<MemberValue<'a>, ReadError> {
        let owner = owner_of::<O>(owner)?;
        (self.get)(owner).map(|value| MemberValue::Owned(Box::new(value)))
    }
}

// -----------------------------------------------------------------------------
// MemberInfo

/// A readable (or write-only) member of a composite type.
///
/// # Examples
///
/// ```
/// use od_dump::Dump;
/// use od_dump::info::{MemberInfo, MemberKind};
///
/// #[derive(Dump)]
/// struct User { name: String, age: u32 }
///
/// let name = MemberInfo::field::<User, String>("name", |u| &u.name);
/// let next = MemberInfo::property::<User, u32>("next_age", |u| u.age + 1);
///
/// assert_eq!(name.kind(), MemberKind::Field);
/// assert_eq!(next.kind(), MemberKind::Property);
/// assert!(next.is_readable());
/// ```
pub struct MemberInfo {
    name: &'static str,
    kind: MemberKind,
    declaring: &'static str,
    value_type: &'static str,
    policy: Option<DumpPolicy>,
    overridable: bool,
    indexed: bool,
    synthesized: bool,
    access: Option<Box<dyn MemberAccess>>,
}

impl MemberInfo {
    fn with_access<V: ?Sized + 'static>(
        name: &'static str,
        kind: MemberKind,
        access: Option<Box<dyn MemberAccess>>,
    ) -> Self {
        Self {
            name,
            kind,
            declaring: "",
            value_type: core::any::type_name::<V>(),
            policy: None,
            overridable: false,
            indexed: false,
            synthesized: false,
            access,
        }
    }

    /// A stored field, projected by reference.
    pub fn field<O: Dump, F: Dump>(name: &'static str, get: for<'a> fn(&'a O) -> &'a F) -> Self {
        Self::with_access::<F>(name, MemberKind::Field, Some(Box::new(FieldAccess { get })))
    }

    /// A computed property whose getter cannot fail.
    pub fn property<O: Dump, V: Dump>(name: &'static str, get: fn(&O) -> V) -> Self {
        Self::with_access::<V>(
            name,
            MemberKind::Property,
            Some(Box::new(PropertyAccess { get })),
        )
    }

    /// A computed property whose getter may fail with any displayable error.
    ///
    /// Failures render inline as `<failed to read: {error}>`.
    pub fn fallible<O: Dump, V: Dump, E: fmt::Display + 'static>(
        name: &'static str,
        get: fn(&O) -> Result<V, E>,
    ) -> Self {
        Self::with_access::<V>(
            name,
            MemberKind::Property,
            Some(Box::new(FallibleAccess { get })),
        )
    }

    /// A computed property whose getter reports [`ReadError`] directly.
    ///
    /// Returning [`ReadError::Denied`] aborts the whole dump.
    pub fn guarded<O: Dump, V: Dump>(
        name: &'static str,
        get: fn(&O) -> Result<V, ReadError>,
    ) -> Self {
        Self::with_access::<V>(
            name,
            MemberKind::Property,
            Some(Box::new(GuardedAccess { get })),
        )
    }

    /// A property of type `V` without a getter; never rendered.
    pub fn write_only<V: ?Sized + 'static>(name: &'static str) -> Self {
        Self::with_access::<V>(name, MemberKind::Property, None)
    }

    pub fn with_policy(mut self, policy: DumpPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Marks the member as overridable by same-named members of derived types.
    pub fn overridable(mut self) -> Self {
        self.overridable = true;
        self
    }

    /// Marks the member as requiring an index argument; never rendered.
    pub fn indexed(mut self) -> Self {
        self.indexed = true;
        self
    }

    /// Marks the member as compiler or macro generated; never rendered.
    pub fn synthesized(mut self) -> Self {
        self.synthesized = true;
        self
    }

    pub(crate) fn declared_by(mut self, declaring: &'static str) -> Self {
        self.declaring = declaring;
        self
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    /// Path of the type the member is declared on.
    #[inline]
    pub fn declaring_type(&self) -> &'static str {
        self.declaring
    }

    /// Path of the member's value type.
    #[inline]
    pub fn value_type(&self) -> &'static str {
        self.value_type
    }

    #[inline]
    pub fn policy(&self) -> Option<&DumpPolicy> {
        self.policy.as_ref()
    }

    #[inline]
    pub fn is_overridable(&self) -> bool {
        self.overridable
    }

    #[inline]
    pub fn is_indexed(&self) -> bool {
        self.indexed
    }

    #[inline]
    pub fn is_synthesized(&self) -> bool {
        self.synthesized
    }

    #[inline]
    pub fn is_readable(&self) -> bool {
        self.access.is_some()
    }

    /// Reads the member from `owner`, an instance of the declaring type.
    pub fn read<'a>(&self, owner: &'a dyn Dump) -> Result<MemberValue<'a>, ReadError> {
        match &self.access {
            Some(access) => access.read(owner),
            None => Err(ReadError::Unreadable(self.name)),
        }
    }
}

impl fmt::Debug for MemberInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberInfo")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("value_type", &self.value_type)
            .field("policy", &self.policy)
            .field("overridable", &self.overridable)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use core::marker::PhantomData;

    use super::{MemberInfo, MemberKind};
    use crate::info::Typed;
    use crate::{BasicValue, Dump, DumpRef, ReadError};

    #[derive(Dump)]
    struct Probe {
        value: i32,
    }

    #[test]
    fn field_reads_by_reference() {
        let member = MemberInfo::field::<Probe, i32>("value", |p| &p.value);
        let probe = Probe { value: 42 };
        let value = member.read(&probe).unwrap();
        assert!(!value.is_transient());
        assert!(matches!(
            value.as_dump().dump_ref(),
            DumpRef::Basic(BasicValue::I32(42))
        ));
    }

    #[test]
    fn fallible_error_is_rendered_text() {
        let member =
            MemberInfo::fallible::<Probe, i32, &str>("broken", |_| Err("sensor offline"));
        let error = member.read(&Probe { value: 0 }).err().unwrap();
        assert_eq!(error, ReadError::Failed("sensor offline".into()));
    }

    #[test]
    fn write_only_and_mismatch() {
        let member = MemberInfo::write_only::<str>("password");
        assert!(!member.is_readable());
        assert!(matches!(
            member.read(&Probe { value: 0 }),
            Err(ReadError::Unreadable("password"))
        ));

        let member = MemberInfo::field::<Probe, i32>("value", |p| &p.value);
        assert!(matches!(member.read(&7_u8), Err(ReadError::Mismatch { .. })));
    }

    #[derive(Dump)]
    #[allow(dead_code, reason = "only described")]
    struct Pair(u8, #[dump(ignore)] u16, #[dump(write_only)] u32);

    #[derive(Dump)]
    struct Cells {
        #[dump(indexed)]
        cells: Vec<u8>,
        marker: PhantomData<u8>,
        #[dump(overridable, mask)]
        token: &'static str,
    }

    #[test]
    fn derived_descriptors() {
        let info = Pair::type_info();
        let names: Vec<&str> = info.members().iter().map(MemberInfo::name).collect();
        assert_eq!(names, ["0", "2"]);
        assert!(!info.members()[1].is_readable());

        let info = Cells::type_info();
        assert!(info.member("cells").unwrap().is_indexed());
        assert!(info.member("marker").unwrap().is_synthesized());
        let token = info.member("token").unwrap();
        assert_eq!(token.kind(), MemberKind::Field);
        assert!(token.is_overridable());
        assert!(token.policy().is_some_and(|policy| policy.mask));
    }
}
