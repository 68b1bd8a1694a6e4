//! Fail-fast handling for fallible calls at the outermost boundary of a program.
//!
//! Meant for entry points (a command's `main` routine) where nobody is left to hand an error to.
//! On error the message goes to stdout and the process exits with [`FAILURE_EXIT_CODE`].

use std::fmt::Display;
use std::io::{self, Write};
use std::process;

/// Exit status used when a fallible call fails.
pub const FAILURE_EXIT_CODE: i32 = 1;

/// Write `err` followed by a newline and flush.
pub fn report<W, E>(out: &mut W, err: &E) -> io::Result<()>
where
    W: Write + ?Sized,
    E: Display + ?Sized,
{
    writeln!(out, "{err}")?;
    out.flush()
}

#[cold]
#[inline(never)]
fn fail<E: Display + ?Sized>(err: &E) -> ! {
    {
        let mut stdout = io::stdout().lock();
        // A closed stdout must not change the exit status.
        let _ = report(&mut stdout, err);
    }
    log::debug!(
        target: "neoguard",
        "fallible call failed, exiting with status {FAILURE_EXIT_CODE}"
    );
    process::exit(FAILURE_EXIT_CODE)
}

/// Unwrap `result`, or print its error to stdout and exit the process with status 1.
#[inline]
pub fn or_exit<T, E: Display>(result: Result<T, E>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => fail(&err),
    }
}

/// Method form of [`or_exit`].
pub trait OrExit<T> {
    fn or_exit(self) -> T;
}

impl<T, E: Display> OrExit<T> for Result<T, E> {
    #[inline]
    fn or_exit(self) -> T {
        or_exit(self)
    }
}

/// Evaluate a fallible expression once. On error print the message and exit with status 1.
///
/// ```
/// use neoguard_core::or_exit;
///
/// fn load() -> Result<(), String> {
///     Ok(())
/// }
///
/// or_exit!(load());
/// ```
#[macro_export]
macro_rules! or_exit {
    ($result:expr $(,)?) => {
        $crate::fallible::or_exit($result)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("disk full")]
    #[case("config not found: engine.toml")]
    #[case("")]
    fn report_writes_message_and_newline(#[case] message: &str) {
        let mut out = Vec::new();
        report(&mut out, message).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), format!("{message}\n"));
    }

    #[test]
    fn report_uses_display() {
        let err = io::Error::new(io::ErrorKind::NotFound, "shader cache missing");
        let mut out = Vec::new();
        report(&mut out, &err).unwrap();

        assert_eq!(out, b"shader cache missing\n");
    }

    #[test]
    fn success_hands_back_the_value() {
        let value = or_exit(Ok::<_, String>(41)) + 1;
        assert_eq!(value, 42);

        let name = Ok::<_, io::Error>("editor").or_exit();
        assert_eq!(name, "editor");

        Ok::<(), String>(()).or_exit();
    }

    #[test]
    fn macro_evaluates_argument_once() {
        let mut calls = 0;
        let mut step = || -> Result<(), String> {
            calls += 1;
            Ok(())
        };

        crate::or_exit!(step());

        assert_eq!(calls, 1);
    }
}
