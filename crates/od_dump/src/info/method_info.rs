use alloc::boxed::Box;
use alloc::string::{String, ToString};
use core::fmt;

use crate::Dump;
use crate::info::{TypeInfo, TypeRef, Typed};

// -----------------------------------------------------------------------------
// Receiver

/// The parameter accepted by a static method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    /// A value of exactly this type, or of a type deriving from it.
    Exact(TypeRef),
    /// Any value.
    Any,
}

impl ParamType {
    /// Returns `true` if a value of `value_type` can be passed.
    pub fn accepts(&self, value_type: &TypeInfo) -> bool {
        match self {
            Self::Exact(param) => value_type.is_assignable_to(param.get()),
            Self::Any => true,
        }
    }

    /// Returns `true` if the parameter type is `value_type` itself.
    pub fn is_exactly(&self, value_type: &TypeInfo) -> bool {
        matches!(self, Self::Exact(param) if param.type_id() == value_type.type_id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodReceiver {
    /// `fn(&self) -> impl Display`
    Instance,
    /// `fn(&Param) -> impl Display`
    Static(ParamType),
}

// -----------------------------------------------------------------------------
// Invocation

trait MethodCall: Send + Sync {
    fn call(&self, value: &dyn Dump) -> Option<String>;
}

struct TypedCall<P, R> {
    func: fn(&P) -> R,
}

impl<P: Dump, R: fmt::Display + 'static> MethodCall for TypedCall<P, R> {
    fn call(&self, value: &dyn Dump) -> Option<String> {
        value
            .downcast_ref::<P>()
            .map(|value| (self.func)(value).to_string())
    }
}

struct UntypedCall<R> {
    func: fn(&dyn Dump) -> R,
}

impl<R: fmt::Display + 'static> MethodCall for UntypedCall<R> {
    fn call(&self, value: &dyn Dump) -> Option<String> {
        Some((self.func)(value).to_string())
    }
}

// -----------------------------------------------------------------------------
// MethodInfo

/// A string-producing method usable as a formatter.
///
/// # Examples
///
/// ```
/// use od_dump::info::{MethodInfo, MethodReceiver};
///
/// let describe = MethodInfo::with_any("describe", |value| {
///     format!("{:?}", value.dump_type_info().type_name())
/// });
/// assert!(matches!(describe.receiver(), MethodReceiver::Static(_)));
/// assert_eq!(describe.invoke(&7_u8).as_deref(), Some("\"u8\""));
/// ```
pub struct MethodInfo {
    name: &'static str,
    declaring: &'static str,
    receiver: MethodReceiver,
    call: Box<dyn MethodCall>,
}

impl MethodInfo {
    /// An instance method of `O`.
    pub fn instance<O: Dump, R: fmt::Display + 'static>(
        name: &'static str,
        func: fn(&O) -> R,
    ) -> Self {
        Self {
            name,
            declaring: "",
            receiver: MethodReceiver::Instance,
            call: Box::new(TypedCall { func }),
        }
    }

    /// A static method taking a value of type `P`.
    pub fn with_param<P: Dump + Typed, R: fmt::Display + 'static>(
        name: &'static str,
        func: fn(&P) -> R,
    ) -> Self {
        Self {
            name,
            declaring: "",
            receiver: MethodReceiver::Static(ParamType::Exact(TypeRef::of::<P>())),
            call: Box::new(TypedCall { func }),
        }
    }

    /// A static method taking any value.
    pub fn with_any<R: fmt::Display + 'static>(
        name: &'static str,
        func: fn(&dyn Dump) -> R,
    ) -> Self {
        Self {
            name,
            declaring: "",
            receiver: MethodReceiver::Static(ParamType::Any),
            call: Box::new(UntypedCall { func }),
        }
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
    pub fn declaring_type(&self) -> &'static str {
        self.declaring
    }

    #[inline]
    pub fn receiver(&self) -> MethodReceiver {
        self.receiver
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        matches!(self.receiver, MethodReceiver::Static(_))
    }

    /// Calls the method with `value` as receiver or argument.
    ///
    /// Returns `None` if `value` is not of the expected type; callers wanting
    /// base-type parameters must project the value first.
    #[inline]
    pub fn invoke(&self, value: &dyn Dump) -> Option<String> {
        self.call.call(value)
    }
}

impl fmt::Debug for MethodInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodInfo")
            .field("name", &self.name)
            .field("declaring", &self.declaring)
            .field("receiver", &self.receiver)
            .finish_non_exhaustive()
    }
}
