use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fallible::FAILURE_EXIT_CODE;
use crate::nothrow::NOTHROW;
use crate::pointer::FORCE_CHECKS;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to render guard config: {0}")]
    Render(#[from] toml::ser::Error),
}

/// Guard settings this crate was built with.
///
/// `pointer_checks` reflects `neoguard-core`'s own profile. `ensure_init!` follows the
/// calling crate's `debug_assertions`, which matches unless profiles are overridden per package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardConfig {
    pub pointer_checks: bool,
    pub nothrow: bool,
    #[serde(default = "default_failure_exit_code")]
    pub failure_exit_code: i32,
}

fn default_failure_exit_code() -> i32 { FAILURE_EXIT_CODE }

impl GuardConfig {
    #[inline]
    pub const fn current() -> Self {
        Self {
            pointer_checks: cfg!(debug_assertions) || FORCE_CHECKS,
            nothrow: NOTHROW,
            failure_exit_code: FAILURE_EXIT_CODE,
        }
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }
}

impl Default for GuardConfig {
    #[inline]
    fn default() -> Self {
        Self::current()
    }
}
