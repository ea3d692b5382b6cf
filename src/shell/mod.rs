//! Shell-word escaping for single-quoted flag values.
//!
//! Flag templates such as `-u '<value>'` wrap user-controlled values in
//! single quotes. Inside single quotes every character is literal except
//! the closing quote itself, so the only transformation needed to keep a
//! value safe is breaking out of and back into the quoted region around
//! each embedded quote.
//!
//! Escaping is total: it succeeds for every input string and never
//! truncates or drops characters.

/// Escape `value` for interpolation inside a single-quoted shell word.
///
/// Each embedded `'` becomes `'\''` (close the quote, emit an escaped
/// quote, reopen). All other characters pass through unchanged -- they
/// are inert once the caller's surrounding quotes are in place.
///
/// The caller supplies the wrapping quotes; this function only prepares
/// the interior.
///
/// # Examples
/// ```
/// use runflags::shell::escape;
///
/// assert_eq!(escape("alice"), "alice");
/// assert_eq!(escape("al'ice"), r"al'\''ice");
/// assert_eq!(escape("$(reboot)"), "$(reboot)"); // inert inside quotes
/// ```
pub fn escape(value: &str) -> String {
    if !value.contains('\'') {
        return value.to_string();
    }

    let mut out = String::with_capacity(value.len() + 8);
    for ch in value.chars() {
        if ch == '\'' {
            out.push_str("'\\''");
        } else {
            out.push(ch);
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
