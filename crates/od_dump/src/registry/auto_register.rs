use crate::info::TypeInfo;
use crate::policy::DumpPolicy;
use crate::registry::MetadataRegistry;

/// A shadow registration collected at link time by [`submit_shadow!`].
///
/// [`submit_shadow!`]: crate::submit_shadow
pub struct ShadowRegistration {
    target: fn() -> &'static TypeInfo,
    shadow: Option<fn() -> &'static TypeInfo>,
    policy: Option<fn() -> DumpPolicy>,
}

impl ShadowRegistration {
    #[doc(hidden)]
    pub const fn new(
        target: fn() -> &'static TypeInfo,
        shadow: Option<fn() -> &'static TypeInfo>,
        policy: Option<fn() -> DumpPolicy>,
    ) -> Self {
        Self {
            target,
            shadow,
            policy,
        }
    }
}

inventory::collect!(ShadowRegistration);

pub(crate) fn apply(registry: &MetadataRegistry) {
    for entry in inventory::iter::<ShadowRegistration> {
        let target = (entry.target)();
        let shadow = entry.shadow.map(|shadow| shadow());
        let policy = entry.policy.map(|policy| policy());
        if let Err(error) = registry.register_info(target, shadow, policy, false) {
            log::warn!("ignoring submitted dump metadata: {error}");
        }
    }
}

/// Registers a shadow type (and optionally a class policy) for a type at link
/// time. The registration is applied by every [`MetadataRegistry`] on its
/// first lookup.
///
/// # Examples
///
/// ```
/// use od_dump::{Dump, DumpExt, submit_shadow};
///
/// // A type from another crate, dumped by hand.
/// #[derive(Dump)]
/// struct Credentials { user: String, token: String }
///
/// #[derive(Dump)]
/// struct CredentialsShadow {
///     #[dump(mask)]
///     token: (),
/// }
///
/// submit_shadow!(Credentials => CredentialsShadow);
///
/// fn main() {
///     let text = Credentials { user: "ann".into(), token: "s3cr3t".into() }.dump_text();
///     assert!(text.contains("token = ******"));
/// }
/// ```
#[macro_export]
macro_rules! submit_shadow {
    ($target:ty => $shadow:ty) => {
        $crate::__macro_exports::inventory::submit! {
            $crate::registry::ShadowRegistration::new(
                <$target as $crate::info::Typed>::type_info,
                ::core::option::Option::Some(<$shadow as $crate::info::Typed>::type_info),
                ::core::option::Option::None,
            )
        }
    };
    ($target:ty => $shadow:ty, policy = $policy:expr) => {
        $crate::__macro_exports::inventory::submit! {
            $crate::registry::ShadowRegistration::new(
                <$target as $crate::info::Typed>::type_info,
                ::core::option::Option::Some(<$shadow as $crate::info::Typed>::type_info),
                ::core::option::Option::Some($policy),
            )
        }
    };
}
