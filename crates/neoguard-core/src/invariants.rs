//! Fatal paths for programmer errors.
//!
//! A violated invariant means the process is already wrong. We stop right here, with abort
//! rather than unwinding, so a debugger or core dump sees the state at the fault.
//! This module must remain tiny and dependency-free.

use std::fmt;
use std::io::{self, Write};
use std::process;

use crate::pointer::Uninitialised;

#[cold]
#[inline(never)]
fn fatal(line: fmt::Arguments<'_>) -> ! {
    let mut stderr = io::stderr().lock();
    // Nothing left to report a failed write to.
    let _ = writeln!(stderr, "{line}");
    let _ = stderr.flush();
    process::abort()
}

/// Abort after an [`ensure_init!`](crate::ensure_init) check found a null pointer.
#[cold]
#[inline(never)]
pub fn uninitialised(diag: &Uninitialised) -> ! {
    fatal(format_args!("{diag}"))
}

/// Abort because a panic is unwinding out of a nothrow scope.
#[cold]
#[inline(never)]
pub fn unwound(scope: &str) -> ! {
    fatal(format_args!("[nothrow] panic escaped nothrow scope: {scope}"))
}
