//! Rule file parsing.
//!
//! A rule file is one entry per line: either a dotted-quad address or a
//! domain name. Blank lines and lines whose first character is `#` are
//! dropped. Unlike the whitelist file, the rule file has no inline-comment
//! convention, so a `#` later in a line is part of the entry text.

/// Iterate the surviving entries of a rule file.
///
/// Lazy and restartable per call; entry shape is not validated here — the
/// resolver decides whether an entry is a literal address or a domain.
pub fn entries(contents: &str) -> impl Iterator<Item = &str> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}
