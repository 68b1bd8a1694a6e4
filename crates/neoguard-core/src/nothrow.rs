//! Build-time nothrow toggle.
//!
//! By default a [`NoUnwind`] scope promises that no panic unwinds out of it, and the process
//! aborts if one tries. The `allow-unwind` feature drops the promise: the guard becomes a
//! zero-sized no-op and panics propagate, so instrumentation can intercept them with
//! `catch_unwind`. Without a panic both builds behave identically.

/// `true` unless the `allow-unwind` feature is enabled.
pub const NOTHROW: bool = !cfg!(feature = "allow-unwind");

/// Marks the rest of the enclosing scope as nothrow.
#[must_use = "the nothrow scope ends when the guard is dropped"]
#[derive(Debug)]
pub struct NoUnwind {
    #[cfg(not(feature = "allow-unwind"))]
    scope: &'static str,
    // Entered while already unwinding (e.g. from a `Drop` impl): the unwind did not start here.
    #[cfg(not(feature = "allow-unwind"))]
    armed: bool,
}

impl NoUnwind {
    #[cfg(not(feature = "allow-unwind"))]
    #[inline]
    pub fn enter(scope: &'static str) -> Self {
        Self {
            scope,
            armed: !std::thread::panicking(),
        }
    }

    #[cfg(feature = "allow-unwind")]
    #[inline]
    pub fn enter(_scope: &'static str) -> Self {
        Self {}
    }
}

#[cfg(not(feature = "allow-unwind"))]
impl Drop for NoUnwind {
    #[inline]
    fn drop(&mut self) {
        if self.armed && std::thread::panicking() {
            crate::invariants::unwound(self.scope);
        }
    }
}

/// Run `f` inside a nothrow scope named `scope`.
#[inline]
pub fn nothrow<R>(scope: &'static str, f: impl FnOnce() -> R) -> R {
    let _scope = NoUnwind::enter(scope);
    f()
}

/// Bind a [`NoUnwind`] guard until the end of the enclosing block.
///
/// Without a name the scope is labelled `<module path>:<line>`.
#[macro_export]
macro_rules! nothrow_scope {
    () => {
        let _nothrow_scope =
            $crate::nothrow::NoUnwind::enter(concat!(module_path!(), ":", line!()));
    };
    ($scope:expr) => {
        let _nothrow_scope = $crate::nothrow::NoUnwind::enter($scope);
    };
}
