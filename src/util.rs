//! Shared utility helpers.

/// Case-insensitive ends_with check over raw bytes, without allocating.
#[inline]
pub fn ends_with_ci(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.len() >= needle.len()
        && haystack[haystack.len() - needle.len()..].eq_ignore_ascii_case(needle)
}
