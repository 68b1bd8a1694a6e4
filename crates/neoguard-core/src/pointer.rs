//! Debug-only pointer initialisation guard.

use std::fmt;
use std::ptr::{self, NonNull};
use std::rc::Rc;
use std::sync::Arc;

/// `true` when the `force-checks` feature keeps [`ensure_init!`](crate::ensure_init) alive in
/// release builds.
pub const FORCE_CHECKS: bool = cfg!(feature = "force-checks");

/// A pointer-like handle that can be checked for initialisation.
///
/// Implemented for raw pointers, [`NonNull`], references, owning smart pointers and `Option`s
/// of any of them. `None` and null raw pointers are the only uninitialised values.
pub trait InitCheck {
    /// Address the handle points at, null when uninitialised.
    fn address(&self) -> *const ();

    #[inline]
    fn is_initialised(&self) -> bool {
        !self.address().is_null()
    }
}

impl<T: ?Sized> InitCheck for *const T {
    #[inline]
    fn address(&self) -> *const () {
        self.cast()
    }
}

impl<T: ?Sized> InitCheck for *mut T {
    #[inline]
    fn address(&self) -> *const () {
        self.cast_const().cast()
    }
}

impl<T: ?Sized> InitCheck for NonNull<T> {
    #[inline]
    fn address(&self) -> *const () {
        self.as_ptr().cast_const().cast()
    }
}

impl<T: ?Sized> InitCheck for &T {
    #[inline]
    fn address(&self) -> *const () {
        let p: *const T = *self;
        p.cast()
    }
}

impl<T: ?Sized> InitCheck for &mut T {
    #[inline]
    fn address(&self) -> *const () {
        let p: *const T = &**self;
        p.cast()
    }
}

impl<T: ?Sized> InitCheck for Box<T> {
    #[inline]
    fn address(&self) -> *const () {
        let p: *const T = &**self;
        p.cast()
    }
}

impl<T: ?Sized> InitCheck for Rc<T> {
    #[inline]
    fn address(&self) -> *const () {
        Rc::as_ptr(self).cast()
    }
}

impl<T: ?Sized> InitCheck for Arc<T> {
    #[inline]
    fn address(&self) -> *const () {
        Arc::as_ptr(self).cast()
    }
}

impl<P: InitCheck> InitCheck for Option<P> {
    #[inline]
    fn address(&self) -> *const () {
        self.as_ref().map_or(ptr::null(), InitCheck::address)
    }
}

/// Diagnostic for a pointer that was used before being initialised.
///
/// `Display` renders the single line written to stderr before the abort:
/// `[<file>:<line>] Uninitialised pointer: <expr> (value=<addr>)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Uninitialised {
    pub file: &'static str,
    pub line: u32,
    pub expr: &'static str,
    pub address: *const (),
}

impl fmt::Display for Uninitialised {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}:{}] Uninitialised pointer: {} (value={:p})",
            self.file, self.line, self.expr, self.address
        )
    }
}

/// Backing function of [`ensure_init!`](crate::ensure_init). Aborts if `handle` is uninitialised.
#[inline]
pub fn check<P: InitCheck + ?Sized>(
    handle: &P,
    file: &'static str,
    line: u32,
    expr: &'static str,
) {
    if !handle.is_initialised() {
        crate::invariants::uninitialised(&Uninitialised {
            file,
            line,
            expr,
            address: handle.address(),
        });
    }
}

/// Abort with a diagnostic if a pointer-like handle is null.
///
/// Active when the *calling* crate is built with `debug_assertions`, or when `neoguard-core`
/// has the `force-checks` feature. Otherwise the argument is never evaluated and the call
/// compiles to nothing.
///
/// ```
/// use neoguard_core::ensure_init;
///
/// let device = Box::new(7u32);
/// ensure_init!(device);
/// ```
#[macro_export]
macro_rules! ensure_init {
    ($handle:expr $(,)?) => {{
        #[cfg(debug_assertions)]
        {
            $crate::pointer::check(&$handle, file!(), line!(), stringify!($handle));
        }
        #[cfg(not(debug_assertions))]
        {
            if $crate::pointer::FORCE_CHECKS {
                $crate::pointer::check(&$handle, file!(), line!(), stringify!($handle));
            }
        }
    }};
}
