//! Debug guards for engine code.
//!
//! Three facilities, all resolved at the call site:
//! - [`ensure_init!`]: debug-only non-null check that aborts on failure,
//! - [`or_exit!`] / [`OrExit`]: fail-fast handling of a fallible call at the program boundary,
//! - [`nothrow_scope!`] / [`NoUnwind`]: build-time choice of whether a scope may unwind.

pub mod config;
pub mod fallible;
pub mod invariants;
pub mod nothrow;
pub mod pointer;

pub use config::{ConfigError, GuardConfig};
pub use fallible::{or_exit, OrExit, FAILURE_EXIT_CODE};
pub use nothrow::{nothrow, NoUnwind, NOTHROW};
pub use pointer::{InitCheck, Uninitialised, FORCE_CHECKS};
