//! Pipeline warnings with colored terminal output.
//!
//! The parsers are strict, but a few inputs are accepted with surprising
//! results (a selector naming two ids, a `display` keyword the layout stage
//! does not model). Those are reported here instead of failing the parse.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about quirky but accepted input (prints once per unique message).
///
/// Returns `true` if the message was printed, `false` if it had already been
/// reported since the last [`clear_warnings`].
///
/// # Example
/// ```
/// use quokka_common::warning::warn_once;
///
/// let _ = warn_once("CSS", "selector 'a#x#y' names more than one id; keeping '#y'");
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let should_print = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_print {
        eprintln!("{}", format!("[Quokka {component}] ⚠ {message}").yellow());
    }
    should_print
}

/// Clear all recorded warnings (call before processing a new document)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
