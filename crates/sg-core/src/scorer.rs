//! Independence scorer for domains no rule recognised
//!
//! Starts at 0.5 and adds fixed bonuses for signals typical of a personal
//! site. Bonuses overlap freely and the total is capped at 1.0. This is a
//! crude heuristic, not a calibrated probability.

use once_cell::sync::Lazy;
use regex::RegexSet;

use crate::host::{first_label, label_count, normalize_domain, top_level};

const BASE_SCORE: f64 = 0.5;
const MAX_SCORE: f64 = 1.0;

/// TLDs common on personal sites.
const INDEPENDENT_TLDS: &[&str] = &[
    ".me", ".dev", ".blog", ".site", ".page", ".io", ".xyz", ".net", ".org", ".co", ".cc",
    ".online", ".space", ".website", ".tech", ".art", ".design", ".studio", ".fun", ".lol",
    ".garden", ".cafe", ".zone", ".ink",
];

/// TLDs where personal names are short, so the length window is tighter.
const SHORT_NAME_TLDS: &[&str] = &["me", "dev", "blog", "site", "page", "co", "cc", "io"];

/// TLDs that are almost always a person's own domain.
const PERSONAL_TLDS: &[&str] = &["me", "dev", "blog", "site", "page"];

const GENERIC_SUBDOMAINS: &[&str] = &[
    "www", "blog", "shop", "store", "app", "api", "cdn", "images", "static", "assets", "media",
];

const PERSONAL_PATHS: &[&str] = &[
    "/about", "/blog", "/projects", "/portfolio", "/contact", "/work", "/writing", "/posts",
    "/notes", "/now", "/uses", "/garden", "/wiki", "/links", "/bookmarks", "/colophon",
];

static PERSONAL_NAME_PATTERNS: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        // firstname-lastname.tld
        r"^[a-z]+-[a-z]+\.[a-z]{2,}$",
        // short single label
        r"^[a-z]{2,12}\.[a-z]{2,}$",
        r"^(my|the)[a-z0-9-]+\.[a-z]{2,}$",
        r"^[a-z0-9-]+(blog|site|web|page|portfolio|works)\.[a-z]{2,}$",
        r"^(hello|hey|hi)[a-z0-9-]*\.[a-z]{2,}$",
    ])
    .expect("personal name patterns are valid")
});

/// Score plus the names of the bonuses that fired.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub score: f64,
    pub bonuses: Vec<&'static str>,
}

impl ScoreBreakdown {
    fn add(&mut self, name: &'static str, points: f64) {
        log::trace!("independence bonus {} (+{})", name, points);
        self.score += points;
        self.bonuses.push(name);
    }
}

/// Likelihood-style score in `[0, 1]` that a domain is an independent site.
pub fn score_independence(domain: &str, path: &str) -> f64 {
    score_breakdown(domain, path).score
}

/// Same as [`score_independence`] but also reports which bonuses applied.
pub fn score_breakdown(domain: &str, path: &str) -> ScoreBreakdown {
    let domain = normalize_domain(domain);
    let path = path.to_ascii_lowercase();
    let mut breakdown = ScoreBreakdown {
        score: BASE_SCORE,
        bonuses: Vec::new(),
    };

    let two_labels = label_count(&domain) == 2;
    let name = first_label(&domain);
    let tld = top_level(&domain);

    if INDEPENDENT_TLDS.iter().any(|t| domain.ends_with(t)) {
        breakdown.add("independent_tld", 0.2);
    }

    if two_labels {
        let max_len = if SHORT_NAME_TLDS.contains(&tld) { 15 } else { 20 };
        if (3..=max_len).contains(&name.len()) {
            breakdown.add("personal_domain_length", 0.15);
        }
    }

    if PERSONAL_NAME_PATTERNS.is_match(&domain) {
        breakdown.add("personal_name_pattern", 0.15);
    }

    if two_labels && !name.contains('-') && PERSONAL_TLDS.contains(&tld) {
        breakdown.add("personal_tld", 0.1);
    }

    if !GENERIC_SUBDOMAINS.contains(&name) {
        breakdown.add("non_generic_subdomain", 0.05);
    }

    if PERSONAL_PATHS.iter().any(|p| path.contains(p)) {
        breakdown.add("personal_path", 0.1);
    }

    breakdown.score = breakdown.score.min(MAX_SCORE);
    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_personal_me_domain_caps_at_one() {
        let breakdown = score_breakdown("jdoe.me", "/");
        assert!(approx(breakdown.score, 1.0));
        assert_eq!(
            breakdown.bonuses,
            vec![
                "independent_tld",
                "personal_domain_length",
                "personal_name_pattern",
                "personal_tld",
                "non_generic_subdomain",
            ]
        );
    }

    #[test]
    fn test_generic_subdomain_scores_low() {
        // Three labels, .com, generic leading label: nothing fires.
        let score = score_independence("shop.bigretail.com", "/");
        assert!(approx(score, 0.5));
    }

    #[test]
    fn test_long_name_on_short_name_tld() {
        // 16 characters is over the .dev window but within the generic one.
        let breakdown = score_breakdown("abcdefghijklmnop.dev", "/");
        assert!(!breakdown.bonuses.contains(&"personal_domain_length"));
        let breakdown = score_breakdown("abcdefghijklmnop.com", "/");
        assert!(breakdown.bonuses.contains(&"personal_domain_length"));
    }

    #[test]
    fn test_hyphenated_name() {
        let breakdown = score_breakdown("jane-doe.com", "/");
        assert!(breakdown.bonuses.contains(&"personal_name_pattern"));
        assert!(!breakdown.bonuses.contains(&"personal_tld"));
        // 0.5 + 0.15 + 0.15 + 0.05
        assert!(approx(breakdown.score, 0.85));
    }

    #[test]
    fn test_personal_path_bonus() {
        let without = score_independence("news.example.co.uk", "/");
        let with = score_independence("news.example.co.uk", "/About/team");
        assert!(approx(with - without, 0.1));
    }

    #[test]
    fn test_name_patterns() {
        for domain in ["mycoolstuff.net", "thegarden.org", "alicesblog.com", "hellokitty.com", "samworks.net"] {
            assert!(
                score_breakdown(domain, "/").bonuses.contains(&"personal_name_pattern"),
                "{}",
                domain
            );
        }
        assert!(!score_breakdown("a1b2c3d4e5f6g7h8.com", "/").bonuses.contains(&"personal_name_pattern"));
    }

    #[test]
    fn test_score_bounds() {
        for (domain, path) in [("", "/"), ("x", ""), ("a.b.c.d.e", "/about"), ("jdoe.me", "/about/now")] {
            let score = score_independence(domain, path);
            assert!((0.0..=1.0).contains(&score), "{} {}", domain, score);
        }
    }
}
