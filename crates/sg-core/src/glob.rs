//! Path glob compiler and include/exclude matching
//!
//! Patterns are anchored to the full path and `*` is the only wildcard.
//!
//! A pattern without `*` matches the path exactly, or as a prefix followed
//! by a `/`-delimited continuation (`/features` matches `/features/actions`
//! but not `/featuresx`). A pattern with `*` is compiled to an anchored
//! regex with each `*` replaced by `.*`.
//!
//! # Limitations
//!
//! The wildcard translation does NOT escape other regex metacharacters, so
//! `.` in a pattern matches any character and `(`, `[`, `+`, `?` keep their
//! regex meaning. Built-in patterns only contain path segments and `*`.
//! [`Glob::has_unescaped_metachar`] reports patterns that would be affected.

use regex::Regex;

/// Error type for glob compilation.
#[derive(Debug, thiserror::Error)]
#[error("Invalid pattern '{pattern}': {source}")]
pub struct GlobError {
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}

/// Characters with regex meaning other than `*`.
const REGEX_METACHARS: &[char] = &['.', '+', '?', '(', ')', '[', ']', '{', '}', '|', '^', '$', '\\'];

/// A single compiled path pattern.
#[derive(Debug, Clone)]
pub enum Glob {
    /// Exact path or `/`-prefixed continuation
    Literal(String),
    /// Anchored wildcard regex
    Wildcard(Regex),
}

impl Glob {
    /// Compile a pattern.
    pub fn compile(pattern: &str) -> Result<Self, GlobError> {
        if !pattern.contains('*') {
            return Ok(Self::Literal(pattern.to_string()));
        }

        let expr = format!("^{}$", pattern.replace('*', ".*"));
        let regex = Regex::new(&expr).map_err(|source| GlobError {
            pattern: pattern.to_string(),
            source,
        })?;

        Ok(Self::Wildcard(regex))
    }

    /// Test a path against this pattern.
    #[inline]
    pub fn is_match(&self, path: &str) -> bool {
        match self {
            Self::Literal(lit) => {
                path == lit
                    || (path.len() > lit.len()
                        && path.starts_with(lit.as_str())
                        && path.as_bytes()[lit.len()] == b'/')
            }
            Self::Wildcard(regex) => regex.is_match(path),
        }
    }

    /// True if the pattern contains characters that the wildcard
    /// translation leaves with a regex meaning.
    pub fn has_unescaped_metachar(pattern: &str) -> bool {
        pattern.contains('*') && pattern.contains(REGEX_METACHARS)
    }
}

/// Compiled include/exclude pattern lists.
#[derive(Debug, Clone, Default)]
pub struct PathRules {
    include: Vec<Glob>,
    exclude: Vec<Glob>,
}

impl PathRules {
    /// Compile both lists, failing on the first bad pattern.
    pub fn compile<S: AsRef<str>>(include: &[S], exclude: &[S]) -> Result<Self, GlobError> {
        Ok(Self {
            include: include.iter().map(|p| Glob::compile(p.as_ref())).collect::<Result<_, _>>()?,
            exclude: exclude.iter().map(|p| Glob::compile(p.as_ref())).collect::<Result<_, _>>()?,
        })
    }

    /// Exclude patterns win over include patterns.
    pub fn matches(&self, path: &str) -> bool {
        if self.exclude.iter().any(|g| g.is_match(path)) {
            return false;
        }
        self.include.iter().any(|g| g.is_match(path))
    }
}

/// Match a path against uncompiled pattern lists.
///
/// Patterns that fail to compile are logged and never match.
pub fn matches(path: &str, include: &[&str], exclude: &[&str]) -> bool {
    if exclude.iter().any(|p| pattern_matches(p, path)) {
        return false;
    }
    include.iter().any(|p| pattern_matches(p, path))
}

fn pattern_matches(pattern: &str, path: &str) -> bool {
    match Glob::compile(pattern) {
        Ok(glob) => glob.is_match(path),
        Err(e) => {
            log::warn!("Skipping pattern: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_match() {
        let glob = Glob::compile("/features").unwrap();
        assert!(glob.is_match("/features"));
        assert!(glob.is_match("/features/actions"));
        assert!(!glob.is_match("/featuresx"));
        assert!(!glob.is_match("/feature"));
    }

    #[test]
    fn test_wildcard_match() {
        let glob = Glob::compile("/@*").unwrap();
        assert!(glob.is_match("/@alice"));
        assert!(glob.is_match("/@"));
        assert!(!glob.is_match("/users/alice"));

        let glob = Glob::compile("/user/*/videos").unwrap();
        assert!(glob.is_match("/user/bob/videos"));
        assert!(!glob.is_match("/user/bob/videos/1"));
    }

    #[test]
    fn test_exclude_wins() {
        assert!(!matches("/features", &["/*"], &["/features"]));
        assert!(!matches("/features/copilot", &["/*"], &["/features"]));
        assert!(matches("/torvalds", &["/*"], &["/features"]));
    }

    #[test]
    fn test_no_include_match() {
        assert!(!matches("/about", &["/@*"], &[]));
        assert!(!matches("/about", &[], &[]));
    }

    #[test]
    fn test_unescaped_dot_is_regex_dot() {
        // Documented limitation: '.' keeps its regex meaning in wildcard patterns.
        let glob = Glob::compile("/*.html").unwrap();
        assert!(glob.is_match("/indexxhtml"));
        assert!(Glob::has_unescaped_metachar("/*.html"));
        assert!(!Glob::has_unescaped_metachar("/in/*"));
        assert!(!Glob::has_unescaped_metachar("/file.html"));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = Glob::compile("/(*").unwrap_err();
        assert_eq!(err.pattern, "/(*");
        assert!(!matches("/(x", &["/(*"], &[]));
    }

    #[test]
    fn test_path_rules() {
        let rules = PathRules::compile(&["/in/*", "/company/*"], &["/in/jobs"]).unwrap();
        assert!(rules.matches("/in/alice"));
        assert!(rules.matches("/company/acme"));
        assert!(!rules.matches("/in/jobs"));
        assert!(!rules.matches("/feed"));
        assert!(!rules.matches("/in/jobs/senior"));
        assert!(!PathRules::default().matches("/in/alice"));
    }
}
