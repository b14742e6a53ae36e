use core::any::type_name;
use core::fmt;

use crate::info::{GenericTypeInfoCell, TypeInfo, TypeKind, Typed};
use crate::{Dump, DumpRef};

/// The target of a callable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelegateInfo {
    pub declaring: &'static str,
    pub method: &'static str,
    /// `false` if the callable is bound to a receiver.
    pub is_static: bool,
}

impl DelegateInfo {
    /// Splits a function path at its last `::` outside generic arguments.
    pub fn from_path(path: &'static str, is_static: bool) -> Self {
        let (declaring, method) = split_function_path(path);
        Self {
            declaring,
            method,
            is_static,
        }
    }
}

fn split_function_path(path: &'static str) -> (&'static str, &'static str) {
    let bytes = path.as_bytes();
    let mut depth = 0_usize;
    let mut split = None;
    let mut index = 0;
    while index < bytes.len() {
        match bytes[index] {
            b'<' => depth += 1,
            b'>' => depth = depth.saturating_sub(1),
            b':' if depth == 0 && bytes.get(index + 1) == Some(&b':') => {
                split = Some(index);
                index += 1;
            }
            _ => {}
        }
        index += 1;
    }
    match split {
        Some(at) => (&path[..at], &path[at + 2..]),
        None => ("", path),
    }
}

/// Wraps a function so it can be dumped as a delegate.
///
/// The delegate is named after `F`, which only carries the function path
/// for function items. Callbacks stored as `fn` pointers or boxed closures
/// are built with [`callback!`](crate::callback) or [`Callback::with_path`]
/// to keep the name of the source function.
///
/// # Examples
///
/// ```
/// use od_dump::{Callback, DumpExt, callback};
///
/// fn on_tick() {}
///
/// let text = Callback::new(on_tick).dump_text();
/// assert!(text.starts_with("delegate "));
/// assert!(text.ends_with("::on_tick [static]"));
///
/// let stored: Callback<fn()> = callback!(on_tick as fn());
/// assert!(stored.dump_text().ends_with("::on_tick [static]"));
/// ```
pub struct Callback<F> {
    func: F,
    path: Option<&'static str>,
    receiver: Option<&'static str>,
}

impl<F: 'static> Callback<F> {
    /// A free function or associated function without receiver.
    #[inline]
    pub const fn new(func: F) -> Self {
        Self {
            func,
            path: None,
            receiver: None,
        }
    }

    /// A callback named after the function at `path`, e.g. `app::Worker::run`.
    #[inline]
    pub const fn with_path(func: F, path: &'static str) -> Self {
        Self {
            func,
            path: Some(path),
            receiver: None,
        }
    }

    /// A method of `R`, dumped as an instance delegate.
    #[inline]
    pub fn bound<R: ?Sized + 'static>(func: F) -> Self {
        Self::new(func).with_receiver::<R>()
    }

    /// Marks the callback as bound to a receiver of type `R`.
    #[inline]
    pub fn with_receiver<R: ?Sized + 'static>(mut self) -> Self {
        self.receiver = Some(type_name::<R>());
        self
    }

    #[inline]
    pub fn get(&self) -> &F {
        &self.func
    }

    pub fn delegate_info(&self) -> DelegateInfo {
        let path = self.path.unwrap_or_else(type_name::<F>);
        let info = DelegateInfo::from_path(path, self.receiver.is_none());
        match self.receiver {
            Some(receiver) => DelegateInfo {
                declaring: receiver,
                ..info
            },
            None => info,
        }
    }
}

impl<F: 'static> Typed for Callback<F> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::new::<Self>(TypeKind::Delegate))
    }
}

impl<F: 'static> Dump for Callback<F> {
    fn dump_type_info(&self) -> &'static TypeInfo {
        Self::type_info()
    }

    fn dump_ref(&self) -> DumpRef<'_> {
        DumpRef::Delegate(self.delegate_info())
    }

    fn as_dump(&self) -> &dyn Dump {
        self
    }
}

impl<F> fmt::Debug for Callback<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("func", &self.path.unwrap_or_else(type_name::<F>))
            .field("receiver", &self.receiver)
            .finish()
    }
}

/// Builds a [`Callback`] named after the function it wraps.
///
/// `callback!(path)` keeps the function item type; `callback!(path as Type)`
/// casts it, for fields typed `Callback<fn(..)>`.
#[macro_export]
macro_rules! callback {
    ($func:path as $ty:ty) => {
        $crate::Callback::<$ty>::with_path(
            $func as $ty,
            $crate::__macro_exports::type_name_of_val(&$func),
        )
    };
    ($func:path) => {
        $crate::Callback::with_path($func, $crate::__macro_exports::type_name_of_val(&$func))
    };
}

#[cfg(test)]
mod tests {
    use super::{Callback, DelegateInfo, split_function_path};

    struct Widget;

    impl Widget {
        fn on_click(&self) {}
    }

    #[test]
    fn splits_outside_generics() {
        assert_eq!(split_function_path("demo::apply<demo::Item>"), ("demo", "apply<demo::Item>"));
        assert_eq!(split_function_path("demo::Widget::on_click"), ("demo::Widget", "on_click"));
        assert_eq!(split_function_path("main"), ("", "main"));
    }

    #[test]
    fn bound_callbacks_are_instance_delegates() {
        let callback = Callback::bound::<Widget>(Widget::on_click);
        let DelegateInfo {
            declaring,
            method,
            is_static,
        } = callback.delegate_info();
        assert!(declaring.ends_with("Widget"));
        assert_eq!(method, "on_click");
        assert!(!is_static);
        (callback.get())(&Widget);
    }

    fn reset() {}

    #[test]
    fn stored_callbacks_keep_the_source_path() {
        let anonymous = Callback::new(reset as fn());
        assert_eq!(anonymous.delegate_info().method, "fn()");

        let named: Callback<fn()> = crate::callback!(reset as fn());
        let info = named.delegate_info();
        assert!(info.declaring.ends_with("delegate::tests"));
        assert_eq!(info.method, "reset");
        assert!(info.is_static);

        let method = crate::callback!(Widget::on_click as fn(&Widget)).with_receiver::<Widget>();
        let info = method.delegate_info();
        assert!(info.declaring.ends_with("Widget"));
        assert_eq!(info.method, "on_click");
        assert!(!info.is_static);
    }
}
