//! Content moderation filter applied to search results.
//!
//! Matching is literal, case-sensitive substring containment. No word
//! boundaries: `"shitake"` is blocked, `"Shit"` is not.

/// Literal substrings that keep a post out of search results.
pub const DENYLIST: &[&str] = &["fuck", "shit"];

/// Returns `false` if `text` contains any denylisted substring.
pub fn is_allowed(text: &str) -> bool {
    !DENYLIST.iter().any(|word| text.contains(word))
}
