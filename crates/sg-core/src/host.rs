//! Hostname helpers
//!
//! Normalisation and label-aware suffix checks used by every lookup table.
//!
//! # Examples
//!
//! ```
//! use sg_core::host::{normalize_domain, is_same_or_subdomain};
//!
//! assert_eq!(normalize_domain("WWW.Example.COM."), "example.com");
//! assert!(is_same_or_subdomain("alice.neocities.org", "neocities.org"));
//! assert!(!is_same_or_subdomain("notneocities.org", "neocities.org"));
//! ```

/// Lowercase, drop a single leading `www.` and any trailing dots.
pub fn normalize_domain(domain: &str) -> String {
    let lowered = domain.trim().to_ascii_lowercase();
    let host = lowered.strip_prefix("www.").unwrap_or(&lowered);
    host.trim_end_matches('.').to_string()
}

/// True if `host` equals `base` or is a subdomain of it.
#[inline]
pub fn is_same_or_subdomain(host: &str, base: &str) -> bool {
    if base.is_empty() {
        return false;
    }
    if host == base {
        return true;
    }
    host.len() > base.len()
        && host.ends_with(base)
        && host.as_bytes()[host.len() - base.len() - 1] == b'.'
}

/// Get the parent domain (strip leftmost label).
pub fn get_parent_domain(host: &str) -> Option<&str> {
    match host.find('.') {
        Some(idx) if idx < host.len() - 1 => Some(&host[idx + 1..]),
        _ => None,
    }
}

/// Number of dot-separated labels.
#[inline]
pub fn label_count(host: &str) -> usize {
    if host.is_empty() {
        0
    } else {
        host.split('.').count()
    }
}

/// Leftmost label.
#[inline]
pub fn first_label(host: &str) -> &str {
    host.split('.').next().unwrap_or("")
}

/// Rightmost label.
#[inline]
pub fn top_level(host: &str) -> &str {
    host.rsplit('.').next().unwrap_or("")
}

/// Iterator walking a host from itself up to its last two labels.
pub struct HostSuffixIter<'a> {
    current: Option<&'a str>,
}

impl<'a> Iterator for HostSuffixIter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.current?;
        self.current = get_parent_domain(result).filter(|parent| parent.contains('.'));
        Some(result)
    }
}

/// Walk host suffixes from most specific to least specific.
pub fn walk_host_suffixes(host: &str) -> HostSuffixIter<'_> {
    HostSuffixIter {
        current: if host.is_empty() { None } else { Some(host) },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_domain() {
        assert_eq!(normalize_domain("GitHub.com"), "github.com");
        assert_eq!(normalize_domain("www.github.com"), "github.com");
        assert_eq!(normalize_domain("www.www.github.com"), "www.github.com");
        assert_eq!(normalize_domain(" example.org. "), "example.org");
        assert_eq!(normalize_domain("www.example.org."), "example.org");
        assert_eq!(normalize_domain("www."), "");
        assert_eq!(normalize_domain("."), "");
    }

    #[test]
    fn test_is_same_or_subdomain() {
        assert!(is_same_or_subdomain("github.io", "github.io"));
        assert!(is_same_or_subdomain("a.b.github.io", "github.io"));
        assert!(!is_same_or_subdomain("evilgithub.io", "github.io"));
        assert!(!is_same_or_subdomain("github.io", "a.github.io"));
        assert!(!is_same_or_subdomain("github.io", ""));
    }

    #[test]
    fn test_get_parent_domain() {
        assert_eq!(get_parent_domain("sub.example.com"), Some("example.com"));
        assert_eq!(get_parent_domain("example.com"), Some("com"));
        assert_eq!(get_parent_domain("com"), None);
        assert_eq!(get_parent_domain(""), None);
    }

    #[test]
    fn test_labels() {
        assert_eq!(label_count("jdoe.me"), 2);
        assert_eq!(label_count(""), 0);
        assert_eq!(first_label("blog.example.com"), "blog");
        assert_eq!(top_level("blog.example.com"), "com");
    }

    #[test]
    fn test_walk_host_suffixes() {
        let suffixes: Vec<_> = walk_host_suffixes("a.b.example.com").collect();
        assert_eq!(suffixes, vec!["a.b.example.com", "b.example.com", "example.com"]);
        assert_eq!(walk_host_suffixes("localhost").collect::<Vec<_>>(), vec!["localhost"]);
        assert_eq!(walk_host_suffixes("").count(), 0);
    }
}
