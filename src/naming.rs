//! Tool name sanitization.
//!
//! Protocol tool names must match `^[A-Za-z0-9_]{1,64}$`. Action names are
//! dot-delimited, camel-cased and may start with a sentinel such as `$`, so
//! they go through two passes: a camel-aware pass that keeps `getUserData`
//! readable as `get_user_data`, then a generic pass that guarantees legality.

use crate::types::{Error, Result};
use std::collections::HashSet;

/// Maximum tool name length accepted by the protocol.
pub const MAX_TOOL_NAME_LEN: usize = 64;

/// Name used when sanitization leaves nothing behind.
pub const FALLBACK_TOOL_NAME: &str = "action";

/// Upper bound on `_N` suffixes tried by [`ensure_unique`].
pub const MAX_UNIQUE_ATTEMPTS: usize = 1000;

const SEPARATOR: char = '_';

fn is_legal_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == SEPARATOR
}

/// Check a name against the protocol's tool name pattern.
pub fn is_legal_tool_name(name: &str) -> bool {
    !name.is_empty() && name.len() <= MAX_TOOL_NAME_LEN && name.chars().all(is_legal_char)
}

/// Replace illegal characters with `_`, then collapse and trim underscore runs.
fn replace_and_collapse(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        let c = if is_legal_char(c) { c } else { SEPARATOR };
        if c == SEPARATOR && out.ends_with(SEPARATOR) {
            continue;
        }
        out.push(c);
    }
    out.trim_matches(SEPARATOR).to_string()
}

/// Split camel case on lower→upper boundaries and lower-case the result.
///
/// `getUserData` becomes `get_user_data`, `XMLHttpRequest` becomes
/// `xmlhttp_request`. May return an empty string.
pub fn camel_to_separated(input: &str) -> String {
    let mut split = String::with_capacity(input.len() + 8);
    let mut prev_lower = false;
    for c in input.chars() {
        if prev_lower && c.is_ascii_uppercase() {
            split.push(SEPARATOR);
        }
        prev_lower = c.is_ascii_lowercase();
        split.push(c);
    }
    replace_and_collapse(&split.to_ascii_lowercase())
}

/// Force any string into a legal tool name.
///
/// Never fails and never returns an empty string. Truncation happens after
/// trimming, so a name cut at 64 characters can end in `_`.
pub fn strip_forbidden(input: &str) -> String {
    let mut name = replace_and_collapse(input);
    if name.is_empty() {
        name = FALLBACK_TOOL_NAME.to_string();
    }
    // Only ASCII survives replace_and_collapse, so byte truncation is char-safe.
    name.truncate(MAX_TOOL_NAME_LEN);
    name
}

/// Derive a tool name from a raw action name.
pub fn sanitize_action_name(raw: &str) -> Result<String> {
    let name = strip_forbidden(&camel_to_separated(raw));
    if !is_legal_tool_name(&name) {
        return Err(Error::naming(format!(
            "cannot derive a legal tool name from '{}' (got '{}')",
            raw, name
        )));
    }
    Ok(name)
}

/// Return `candidate`, or the first free `candidate_N` for N in 1..=1000.
///
/// Suffixed names are cut back so the result stays within 64 characters.
pub fn ensure_unique(candidate: &str, used: &HashSet<String>) -> Result<String> {
    if !used.contains(candidate) {
        return Ok(candidate.to_string());
    }

    for n in 1..=MAX_UNIQUE_ATTEMPTS {
        let suffix = format!("{}{}", SEPARATOR, n);
        let mut keep = candidate.len().min(MAX_TOOL_NAME_LEN - suffix.len());
        while !candidate.is_char_boundary(keep) {
            keep -= 1;
        }
        let name = format!("{}{}", &candidate[..keep], suffix);
        if !used.contains(&name) {
            return Ok(name);
        }
    }

    Err(Error::naming(format!(
        "no unique name for '{}' after {} attempts",
        candidate, MAX_UNIQUE_ATTEMPTS
    )))
}
