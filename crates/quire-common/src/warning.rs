//! Deduplicated warnings.
//!
//! Unsupported properties, unknown keywords and similar problems tend to
//! repeat on every node of a document. `warn_once` reports each distinct
//! message a single time through the `log` facade so the output stays
//! readable. The set lives for the whole process and is shared by every
//! builder in it.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Global set of warnings we've already emitted (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about an unsupported feature (logged once per unique message)
///
/// # Example
/// ```ignore
/// warn_once("properties", "unsupported unit 'ex' in font-size: 1.5ex");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let should_log = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_log {
        log::warn!(target: "quire", "[{component}] {message}");
    }
}

/// Returns true if `message` has already been reported for `component`.
#[must_use]
pub fn was_warned(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .is_some_and(|set| set.contains(&key))
}
