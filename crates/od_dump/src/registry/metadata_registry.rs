use alloc::sync::Arc;
use core::any::TypeId;
use core::fmt;
use std::sync::{PoisonError, RwLock};

use crate::RegistrationError;
use crate::info::util::{FIXED_STATE, FixedHashMap};
use crate::info::{TypeInfo, Typed};
use crate::policy::DumpPolicy;
use crate::registry::{ClassDumpInfo, Origin};

/// A registration of an open generic definition, applied to every
/// instantiation that has no exact registration.
#[derive(Debug, Clone)]
struct GenericTemplate {
    shadow: Option<&'static TypeInfo>,
    policy: Option<DumpPolicy>,
    source: &'static str,
}

impl GenericTemplate {
    fn same_as(&self, other: &Self) -> bool {
        self.shadow.map(TypeInfo::type_id) == other.shadow.map(TypeInfo::type_id)
            && self.policy == other.policy
    }
}

struct Tables {
    by_type: FixedHashMap<TypeId, Arc<ClassDumpInfo>>,
    by_definition: FixedHashMap<&'static str, GenericTemplate>,
    auto_registered: bool,
}

impl Tables {
    const fn new() -> Self {
        Self {
            by_type: FixedHashMap::with_hasher(FIXED_STATE),
            by_definition: FixedHashMap::with_hasher(FIXED_STATE),
            auto_registered: false,
        }
    }

    fn clear(&mut self) {
        self.by_type.clear();
        self.by_definition.clear();
        self.auto_registered = false;
    }
}

// -----------------------------------------------------------------------------
// MetadataRegistry

/// A thread-safe map from types to their resolved [`ClassDumpInfo`].
///
/// Lookups check the exact type first, then a registration of the type's
/// generic definition, then fall back to the type's own annotations; every
/// result is cached. Explicit registrations are the only source of conflicts.
///
/// # Examples
///
/// ```
/// use od_dump::Dump;
/// use od_dump::policy::DumpPolicy;
/// use od_dump::registry::MetadataRegistry;
///
/// #[derive(Dump)]
/// struct Secret { key: String }
///
/// let registry = MetadataRegistry::new();
/// let policy = DumpPolicy::new().with_max_depth(1);
/// registry.register::<Secret>(None, Some(policy.clone()), false).unwrap();
///
/// // Registering the same thing again is fine, anything else conflicts.
/// assert!(registry.register::<Secret>(None, Some(policy), false).is_ok());
/// assert!(registry.register::<Secret>(None, None, false).is_err());
/// assert!(registry.register::<Secret>(None, None, true).is_ok());
/// ```
pub struct MetadataRegistry {
    tables: RwLock<Tables>,
}

impl fmt::Debug for MetadataRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetadataRegistry")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

impl Default for MetadataRegistry {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataRegistry {
    #[inline]
    pub const fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::new()),
        }
    }

    /// The process-wide registry used by [`Dumper::new`](crate::Dumper::new).
    pub fn global() -> &'static MetadataRegistry {
        static GLOBAL: MetadataRegistry = MetadataRegistry::new();
        &GLOBAL
    }

    /// Returns the resolved info of `type_info`, building and caching it on
    /// first access.
    pub fn resolve(&self, type_info: &'static TypeInfo) -> Arc<ClassDumpInfo> {
        self.ensure_auto_registered();

        let type_id = type_info.type_id();
        {
            let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(info) = tables.by_type.get(&type_id) {
                return info.clone();
            }
        }

        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        let template = type_info
            .generic_definition()
            .and_then(|definition| tables.by_definition.get(definition))
            .cloned();
        let info = match template {
            Some(template) => {
                ClassDumpInfo::new(type_info, template.shadow, template.policy, Origin::Generic)
            }
            None => ClassDumpInfo::from_annotations(type_info),
        };
        tables
            .by_type
            .entry(type_id)
            .or_insert_with(|| Arc::new(info))
            .clone()
    }

    /// Returns the resolved info of `T`.
    #[inline]
    pub fn resolve_type<T: Typed>(&self) -> Arc<ClassDumpInfo> {
        self.resolve(T::type_info())
    }

    /// Registers a shadow type and/or class policy for `T`.
    ///
    /// See [`register_info`](Self::register_info).
    #[inline]
    pub fn register<T: Typed>(
        &self,
        shadow: Option<&'static TypeInfo>,
        policy: Option<DumpPolicy>,
        replace: bool,
    ) -> Result<Arc<ClassDumpInfo>, RegistrationError> {
        self.register_info(T::type_info(), shadow, policy, replace)
    }

    /// Registers a shadow type and/or class policy for a type.
    ///
    /// Re-registering an identical configuration returns the existing entry.
    /// A different configuration fails with [`RegistrationError::Conflict`]
    /// unless `replace` is set. Entries derived from annotations or generic
    /// registrations never conflict.
    pub fn register_info(
        &self,
        type_info: &'static TypeInfo,
        shadow: Option<&'static TypeInfo>,
        policy: Option<DumpPolicy>,
        replace: bool,
    ) -> Result<Arc<ClassDumpInfo>, RegistrationError> {
        let candidate = ClassDumpInfo::new(type_info, shadow, policy, Origin::Explicit);
        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);

        if let Some(existing) = tables.by_type.get(&type_info.type_id())
            && existing.is_explicit()
        {
            if existing.same_registration(&candidate) {
                return Ok(existing.clone());
            }
            if !replace {
                log::warn!(
                    "dump metadata for `{}` is already registered differently",
                    type_info.type_path()
                );
                return Err(RegistrationError::Conflict {
                    type_path: type_info.type_path(),
                });
            }
        }

        log::info!(
            "registered dump metadata for `{}` (shadow `{}`)",
            type_info.type_path(),
            candidate.shadow().type_path()
        );
        let info = Arc::new(candidate);
        tables.by_type.insert(type_info.type_id(), info.clone());
        Ok(info)
    }

    /// Registers a shadow type and/or class policy for every instantiation of
    /// the generic definition of `T`, e.g. `Page<u8>` registers `Page<_>`.
    pub fn register_generic<T: Typed>(
        &self,
        shadow: Option<&'static TypeInfo>,
        policy: Option<DumpPolicy>,
        replace: bool,
    ) -> Result<(), RegistrationError> {
        let type_info = T::type_info();
        let definition = type_info
            .generic_definition()
            .ok_or(RegistrationError::NotGeneric(type_info.type_path()))?;
        let template = GenericTemplate {
            shadow,
            policy,
            source: type_info.type_path(),
        };

        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = tables.by_definition.get(definition) {
            if existing.same_as(&template) {
                return Ok(());
            }
            if !replace {
                log::warn!(
                    "dump metadata for `{definition}<..>` is already registered by `{}`",
                    existing.source
                );
                return Err(RegistrationError::Conflict {
                    type_path: definition,
                });
            }
        }

        log::info!("registered dump metadata for `{definition}<..>`");
        tables.by_definition.insert(definition, template);
        // Cached instantiations were built without this template.
        tables.by_type.retain(|_, info| {
            info.is_explicit() || info.type_info().generic_definition() != Some(definition)
        });
        Ok(())
    }

    /// Removes every registration and cached entry.
    ///
    /// Auto-registered shadows are applied again on the next lookup.
    pub fn reset(&self) {
        self.tables
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Returns the number of cached entries.
    pub fn len(&self) -> usize {
        self.tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .by_type
            .len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[cfg(feature = "auto_register")]
    fn ensure_auto_registered(&self) {
        {
            let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
            if tables.auto_registered {
                return;
            }
        }
        {
            let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
            if tables.auto_registered {
                return;
            }
            tables.auto_registered = true;
        }
        crate::registry::auto_register::apply(self);
    }

    #[cfg(not(feature = "auto_register"))]
    #[inline(always)]
    fn ensure_auto_registered(&self) {}
}

#[cfg(test)]
mod tests {
    use super::MetadataRegistry;
    use crate::info::Typed;
    use crate::policy::DumpPolicy;
    use crate::registry::Origin;
    use crate::{Dump, RegistrationError};

    #[derive(Dump)]
    struct Page<T> {
        items: Vec<T>,
    }

    #[derive(Dump)]
    struct PageShadow {
        #[dump(max_length = 2)]
        items: (),
    }

    #[derive(Dump)]
    #[dump(max_depth = 3)]
    struct Annotated {
        id: u32,
    }

    #[test]
    fn falls_back_to_annotations() {
        let registry = MetadataRegistry::new();
        let info = registry.resolve_type::<Annotated>();
        assert_eq!(info.origin(), Origin::Annotated);
        assert_eq!(info.policy().max_depth, Some(3));
        // annotation-derived entries never conflict
        let policy = DumpPolicy::new().with_max_depth(1);
        let info = registry.register::<Annotated>(None, Some(policy), false).unwrap();
        assert!(info.is_explicit());
        assert_eq!(registry.resolve_type::<Annotated>().policy().max_depth, Some(1));
    }

    #[test]
    fn conflict_and_replace() {
        let registry = MetadataRegistry::new();
        let shadow = Some(PageShadow::type_info());
        registry.register::<Annotated>(shadow, None, false).unwrap();
        assert_eq!(
            registry.register::<Annotated>(None, None, false).unwrap_err(),
            RegistrationError::Conflict {
                type_path: Annotated::type_info().type_path()
            }
        );
        let replaced = registry.register::<Annotated>(None, None, true).unwrap();
        assert!(!replaced.has_shadow());
    }

    #[test]
    fn generic_definition_applies_to_instantiations() {
        let registry = MetadataRegistry::new();
        // cached before the template exists
        assert_eq!(registry.resolve_type::<Page<u16>>().origin(), Origin::Annotated);

        let shadow = Some(PageShadow::type_info());
        registry.register_generic::<Page<u8>>(shadow, None, false).unwrap();

        let info = registry.resolve_type::<Page<u16>>();
        assert_eq!(info.origin(), Origin::Generic);
        assert!(info.shadow().is::<PageShadow>());
        assert!(registry.register_generic::<Page<i8>>(shadow, None, false).is_ok());
        assert!(registry.register_generic::<Page<i8>>(None, None, false).is_err());
        assert_eq!(
            registry.register_generic::<Annotated>(None, None, false),
            Err(RegistrationError::NotGeneric(Annotated::type_info().type_path()))
        );
    }

    #[test]
    fn reset_clears_everything() {
        let registry = MetadataRegistry::new();
        registry.register::<Annotated>(None, None, false).unwrap();
        registry.reset();
        assert_eq!(registry.len(), 0);
        assert_eq!(registry.resolve_type::<Annotated>().origin(), Origin::Annotated);
    }
}
