//! Whitelist pattern matching.
//!
//! The whitelist file exempts entries from blocking. Each surviving line is
//! one pattern, optionally followed by an inline `# comment`. Patterns use
//! shell-glob wildcards (`*` matches any character sequence including the
//! empty one, `?` matches a single character); an entry is also excluded when
//! it equals a pattern under case-insensitive comparison.
//!
//! Patterns are compiled once into anchored regexes and evaluated per
//! candidate entry, so matching cost does not depend on re-parsing the
//! pattern text.

use anyhow::{Context, Result};
use regex::Regex;
use std::path::Path;
use tracing::{debug, warn};

/// One compiled exclusion pattern.
struct Pattern {
    /// Original pattern text, used for case-insensitive exact comparison.
    raw: String,
    /// Anchored glob-as-regex form of the pattern.
    glob: Regex,
}

/// The full set of exclusion patterns for one compilation run.
pub struct Whitelist {
    patterns: Vec<Pattern>,
}

impl Whitelist {
    /// A whitelist that excludes nothing.
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    /// Parse whitelist file contents into a compiled pattern set.
    ///
    /// Blank lines and `#`-leading lines are dropped; inline `#` suffixes are
    /// stripped before the pattern text is taken.
    pub fn parse(contents: &str) -> Result<Self> {
        let mut patterns = Vec::new();
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let text = match line.split_once('#') {
                Some((before, _)) => before.trim(),
                None => line,
            };
            if text.is_empty() {
                continue;
            }
            let glob = glob_to_regex(text)
                .with_context(|| format!("Failed to compile whitelist pattern '{}'", text))?;
            debug!("Added whitelist pattern: {}", text);
            patterns.push(Pattern {
                raw: text.to_string(),
                glob,
            });
        }
        Ok(Self { patterns })
    }

    /// Load a whitelist from an optional file path.
    ///
    /// A missing file is not an error: the run proceeds unfiltered.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::empty());
        };
        if !path.exists() {
            warn!(
                "Whitelist file {} not found, proceeding without whitelist",
                path.display()
            );
            return Ok(Self::empty());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read whitelist file {}", path.display()))?;
        Self::parse(&contents)
    }

    /// Number of loaded patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// True when no patterns are loaded.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Check whether an entry matches any pattern.
    ///
    /// First match wins: glob semantics first, then case-insensitive exact
    /// comparison against the raw pattern text.
    pub fn is_excluded(&self, entry: &str) -> bool {
        self.patterns
            .iter()
            .any(|p| p.glob.is_match(entry) || entry.eq_ignore_ascii_case(&p.raw))
    }
}

/// Compile a shell-glob pattern into an anchored regex.
///
/// Only `*` and `?` are metacharacters; everything else matches literally.
/// These are literal glob semantics, not domain-aware ones: `*.example.com`
/// matches `ads.example.com` and `.example.com` but not `example.com`.
fn glob_to_regex(pattern: &str) -> Result<Regex, regex::Error> {
    let mut expr = String::with_capacity(pattern.len() + 8);
    expr.push('^');
    for ch in pattern.chars() {
        match ch {
            '*' => expr.push_str(".*"),
            '?' => expr.push('.'),
            _ => expr.push_str(&regex::escape(&ch.to_string())),
        }
    }
    expr.push('$');
    Regex::new(&expr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_subdomains() {
        let wl = Whitelist::parse("*.example.com\n").unwrap();
        assert!(wl.is_excluded("ads.example.com"));
        assert!(wl.is_excluded("x.ads.example.com"));
        // '*' matches the empty sequence, so the degenerate dot form matches.
        assert!(wl.is_excluded(".example.com"));
        // The bare apex does not: the literal '.' is not covered by '*'.
        assert!(!wl.is_excluded("example.com"));
    }

    #[test]
    fn test_question_mark_single_char() {
        let wl = Whitelist::parse("ad?.example.com\n").unwrap();
        assert!(wl.is_excluded("ads.example.com"));
        assert!(wl.is_excluded("adz.example.com"));
        assert!(!wl.is_excluded("ad.example.com"));
        assert!(!wl.is_excluded("adss.example.com"));
    }

    #[test]
    fn test_exact_match_case_insensitive() {
        let wl = Whitelist::parse("DoubleClick.NET\n").unwrap();
        assert!(wl.is_excluded("doubleclick.net"));
        assert!(wl.is_excluded("DOUBLECLICK.NET"));
        assert!(!wl.is_excluded("sub.doubleclick.net"));
    }

    #[test]
    fn test_glob_metacharacters_escaped() {
        // Regex metacharacters in the pattern must match literally.
        let wl = Whitelist::parse("a.b\n").unwrap();
        assert!(wl.is_excluded("a.b"));
        assert!(!wl.is_excluded("aXb"));
    }

    #[test]
    fn test_inline_comments_stripped() {
        let wl = Whitelist::parse("good.example.com # keep this one\n").unwrap();
        assert_eq!(wl.len(), 1);
        assert!(wl.is_excluded("good.example.com"));
        assert!(!wl.is_excluded("good.example.com # keep this one"));
    }

    #[test]
    fn test_comments_and_blanks_dropped() {
        let wl = Whitelist::parse("# header\n\n  \n*.cdn.example\n# footer\n").unwrap();
        assert_eq!(wl.len(), 1);
    }

    #[test]
    fn test_line_reduced_to_nothing_by_comment() {
        let wl = Whitelist::parse("   # just a comment after spaces\n").unwrap();
        assert!(wl.is_empty());
    }

    #[test]
    fn test_empty_whitelist_excludes_nothing() {
        let wl = Whitelist::empty();
        assert!(!wl.is_excluded("anything.example.com"));
        assert!(!wl.is_excluded("8.8.8.8"));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let wl = Whitelist::load(Some(Path::new("/nonexistent/whitelist.txt"))).unwrap();
        assert!(wl.is_empty());
    }

    #[test]
    fn test_load_none_is_empty() {
        let wl = Whitelist::load(None).unwrap();
        assert!(wl.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# allow list\n*.example.org\nsafe.example.net # cdn").unwrap();
        let wl = Whitelist::load(Some(file.path())).unwrap();
        assert_eq!(wl.len(), 2);
        assert!(wl.is_excluded("img.example.org"));
        assert!(wl.is_excluded("SAFE.example.net"));
    }

    #[test]
    fn test_ip_literals_can_be_whitelisted() {
        // Matching is purely textual, so address literals work too.
        let wl = Whitelist::parse("8.8.*\n").unwrap();
        assert!(wl.is_excluded("8.8.8.8"));
        assert!(wl.is_excluded("8.8.4.4"));
        assert!(!wl.is_excluded("1.1.1.1"));
    }
}
