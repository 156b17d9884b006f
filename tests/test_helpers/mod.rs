//! Environment overrides for configuration tests.
//!
//! Callers mark their tests `#[serial]`; the process environment is shared
//! between test threads.

use std::env;
use std::ffi::OsString;

/// Runs `body` with `overrides` applied, then puts every variable back.
///
/// `None` unsets a variable for the duration of `body`.
pub fn with_env<T>(overrides: &[(&str, Option<&str>)], body: impl FnOnce() -> T) -> T {
    let saved: Vec<(&str, Option<OsString>)> = overrides
        .iter()
        .map(|&(key, _)| (key, env::var_os(key)))
        .collect();
    for &(key, value) in overrides {
        apply(key, value.map(OsString::from));
    }
    let outcome = body();
    for (key, value) in saved.into_iter().rev() {
        apply(key, value);
    }
    outcome
}

fn apply(key: &str, value: Option<OsString>) {
    // SAFETY: callers are `#[serial]`, so no other test thread touches the
    // environment while this runs.
    unsafe {
        match value {
            Some(next) => env::set_var(key, next),
            None => env::remove_var(key),
        }
    }
}
