//! Domain classifier
//!
//! Classification is a single ordered rule table. Each rule either returns
//! a decision or passes; the first decision wins. Order matters: the indie
//! rules must run before any corporate heuristic that shares their domain
//! shapes (tilde servers on `.club`, community instances on `.social`).
//!
//! | # | Rule                    | Decision                                    |
//! |---|-------------------------|---------------------------------------------|
//! | 1 | URL shortener           | corporate_generic / rejected                |
//! | 2 | Platform profile URL    | corporate_profile / link_extraction         |
//! | 3 | Indie host or `/~user`  | indie_platform / full_index                 |
//! | 4 | Registered platform     | corporate_generic / rejected                |
//! | 5 | Federated-looking host  | corporate_generic / rejected                |
//! | 6 | `*.github.io`           | indie_platform / full_index                 |
//! | 7 | Hosted blog subdomain   | corporate_profile / link_extraction         |
//! | 8 | Small federated server  | indie_platform / full_index                 |
//! | - | Independence score      | independent / full_index or pending_review  |
//!
//! Rule 5 skips exactly the hosts rule 8 accepts, so a small `.social`
//! instance is indie while `mastodon.*` hosts and the large instances are
//! rejected before the hosted-blog rule can see them.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::data::{BLOG_BRANDS, INDIE_FEDERATED_SUFFIXES, SUBDOMAIN_BLOG_PATTERN};
use crate::registry::{looks_federated, Registry};
use crate::scorer::score_breakdown;
use crate::types::{
    reason, Category, ClassificationResult, IndexingPurpose, IndexingRecommendation,
    PlatformPattern, PlatformType, ProfileMatch,
};
use crate::url::{parse_target, Target};

/// Score above which an unrecognised domain is treated as independent.
const INDEPENDENCE_THRESHOLD: f64 = 0.7;

const TILDE_MODIFIER: f64 = 1.10;
const GITHUB_PAGES_MODIFIER: f64 = 0.95;
const INDIE_FEDERATED_MODIFIER: f64 = 1.1;
const INDEPENDENT_MODIFIER: f64 = 1.2;

static SUBDOMAIN_BLOG: Lazy<Regex> =
    Lazy::new(|| Regex::new(SUBDOMAIN_BLOG_PATTERN).expect("subdomain blog pattern is valid"));

// =============================================================================
// Rule Table
// =============================================================================

type RuleFn = fn(&Registry, &Target) -> Option<ClassificationResult>;

struct Rule {
    name: &'static str,
    apply: RuleFn,
}

const RULES: &[Rule] = &[
    Rule { name: "url_shortener", apply: url_shortener },
    Rule { name: "corporate_profile", apply: corporate_profile },
    Rule { name: "indie_platform", apply: indie_platform },
    Rule { name: "registered_platform", apply: registered_platform },
    Rule { name: "federated_corporate", apply: federated_corporate },
    Rule { name: "github_pages", apply: github_pages },
    Rule { name: "subdomain_blog", apply: subdomain_blog },
    Rule { name: "indie_federated", apply: indie_federated },
];

fn url_shortener(registry: &Registry, target: &Target) -> Option<ClassificationResult> {
    registry.is_shortener(&target.domain).then(|| {
        ClassificationResult::new(PlatformType::CorporateGeneric, IndexingPurpose::Rejected, 1.0, 0.0)
            .reason(reason::URL_SHORTENER)
    })
}

fn corporate_profile(registry: &Registry, target: &Target) -> Option<ClassificationResult> {
    let platform = registry.profile_platform(&target.domain, &target.path)?;

    if platform.category() == Category::KnowledgeBase {
        return Some(
            ClassificationResult::new(PlatformType::CorporateGeneric, IndexingPurpose::Rejected, 0.95, 0.0)
                .reason(reason::KNOWLEDGE_BASE)
                .platform(platform.domain()),
        );
    }

    Some(
        ClassificationResult::new(PlatformType::CorporateProfile, IndexingPurpose::LinkExtraction, 0.95, 0.0)
            .reason(reason::CORPORATE_PROFILE)
            .platform(platform.domain())
            .extract_links(),
    )
}

fn indie_platform(registry: &Registry, target: &Target) -> Option<ClassificationResult> {
    if registry.is_tilde_host(&target.hostname) && target.path.contains("/~") {
        return Some(
            ClassificationResult::new(PlatformType::IndiePlatform, IndexingPurpose::FullIndex, 0.95, TILDE_MODIFIER)
                .reason(reason::INDIE_PLATFORM)
                .reason(reason::TILDE_PAGE),
        );
    }

    let entry = registry.indie_entry_for(&target.domain)?;
    Some(
        ClassificationResult::new(
            PlatformType::IndiePlatform,
            IndexingPurpose::FullIndex,
            0.95,
            entry.score_modifier,
        )
        .reason(reason::INDIE_PLATFORM)
        .reason(&entry.reason)
        .platform(&entry.domain),
    )
}

fn registered_platform(registry: &Registry, target: &Target) -> Option<ClassificationResult> {
    if !registry.is_registered_domain(&target.domain) {
        return None;
    }

    let mut result =
        ClassificationResult::new(PlatformType::CorporateGeneric, IndexingPurpose::Rejected, 0.9, 0.0)
            .reason(reason::CORPORATE_DOMAIN);
    if let Some(platform) = registry.resolve(&target.domain) {
        result = result.platform(platform.domain());
    }
    Some(result)
}

fn github_pages(_registry: &Registry, target: &Target) -> Option<ClassificationResult> {
    target.domain.ends_with(".github.io").then(|| {
        ClassificationResult::new(
            PlatformType::IndiePlatform,
            IndexingPurpose::FullIndex,
            0.9,
            GITHUB_PAGES_MODIFIER,
        )
        .reason(reason::GITHUB_PAGES)
    })
}

fn subdomain_blog(_registry: &Registry, target: &Target) -> Option<ClassificationResult> {
    let caps = SUBDOMAIN_BLOG.captures(&target.domain)?;
    let base = format!("{}.{}", &caps[1], &caps[2]);
    let brand = BLOG_BRANDS
        .iter()
        .find(|(host, _)| *host == base)
        .map(|(_, brand)| *brand)
        .unwrap_or(base.as_str());

    Some(
        ClassificationResult::new(PlatformType::CorporateProfile, IndexingPurpose::LinkExtraction, 0.9, 0.0)
            .reason(reason::CORPORATE_SUBDOMAIN_BLOG)
            .platform(brand)
            .extract_links(),
    )
}

/// Community-server suffix and not one of the large central instances.
fn is_small_federated_instance(registry: &Registry, domain: &str) -> bool {
    INDIE_FEDERATED_SUFFIXES.iter().any(|suffix| domain.ends_with(suffix))
        && !registry.is_large_federated_instance(domain)
}

fn indie_federated(registry: &Registry, target: &Target) -> Option<ClassificationResult> {
    if !is_small_federated_instance(registry, &target.domain) {
        return None;
    }

    Some(
        ClassificationResult::new(
            PlatformType::IndiePlatform,
            IndexingPurpose::FullIndex,
            0.85,
            INDIE_FEDERATED_MODIFIER,
        )
        .reason(reason::INDIE_FEDERATED),
    )
}

fn federated_corporate(registry: &Registry, target: &Target) -> Option<ClassificationResult> {
    if is_small_federated_instance(registry, &target.domain) {
        return None;
    }
    looks_federated(&target.domain).then(|| {
        ClassificationResult::new(PlatformType::CorporateGeneric, IndexingPurpose::Rejected, 0.9, 0.0)
            .reason(reason::CORPORATE_DOMAIN)
            .reason(reason::FEDERATED_CORPORATE)
    })
}

fn independence_fallback(target: &Target) -> ClassificationResult {
    let breakdown = score_breakdown(&target.domain, &target.path);

    let mut result = if breakdown.score > INDEPENDENCE_THRESHOLD {
        ClassificationResult::new(
            PlatformType::Independent,
            IndexingPurpose::FullIndex,
            breakdown.score,
            INDEPENDENT_MODIFIER,
        )
        .reason(reason::INDEPENDENT)
    } else {
        ClassificationResult::new(PlatformType::Unknown, IndexingPurpose::PendingReview, 0.5, 1.0)
            .reason(reason::NEEDS_REVIEW)
    };

    for bonus in breakdown.bonuses {
        result = result.reason(bonus);
    }
    result
}

// =============================================================================
// Classifier
// =============================================================================

/// Classifies URLs against a registry.
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'a> {
    registry: &'a Registry,
}

impl Default for Classifier<'static> {
    fn default() -> Self {
        Self::new(Registry::builtin())
    }
}

impl<'a> Classifier<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    /// Classify a URL. Never fails: unusable input is rejected as `invalid_url`.
    pub fn classify(&self, url: &str) -> ClassificationResult {
        match parse_target(url) {
            Ok(target) => self.classify_target(&target),
            Err(e) => {
                log::debug!("{}", e);
                ClassificationResult::invalid_url()
            }
        }
    }

    /// Classify an already-parsed URL.
    pub fn classify_target(&self, target: &Target) -> ClassificationResult {
        for rule in RULES {
            if let Some(result) = (rule.apply)(self.registry, target) {
                log::debug!(
                    "{}{} -> {} ({}/{})",
                    target.domain,
                    target.path,
                    rule.name,
                    result.platform_type,
                    result.indexing_purpose
                );
                return result;
            }
        }

        let result = independence_fallback(target);
        log::debug!(
            "{}{} -> independence_score {:.2} ({}/{})",
            target.domain,
            target.path,
            result.confidence,
            result.platform_type,
            result.indexing_purpose
        );
        result
    }

    pub fn should_extract_links(&self, url: &str) -> bool {
        self.classify(url).should_extract_links
    }

    pub fn get_indexing_recommendation(&self, url: &str) -> IndexingRecommendation {
        let result = self.classify(url);
        IndexingRecommendation {
            should_index: result.indexing_purpose == IndexingPurpose::FullIndex,
            should_extract_links: result.should_extract_links,
            reason: describe(&result),
        }
    }

    pub fn is_profile_url(&self, url: &str) -> ProfileMatch {
        self.registry.is_profile_url(url)
    }

    pub fn is_domain_corporate(&self, domain: &str) -> bool {
        self.registry.is_domain_corporate(domain)
    }

    pub fn get_platform_for_domain(&self, domain: &str) -> Option<PlatformPattern> {
        self.registry.get_platform_for_domain(domain)
    }
}

/// One-line summary of a result for operators.
fn describe(result: &ClassificationResult) -> String {
    match result.platform_type {
        PlatformType::Independent => "Independent personal site".to_string(),
        PlatformType::IndiePlatform => match &result.platform_name {
            Some(name) => format!("Indie web platform ({})", name),
            None => "Indie web platform".to_string(),
        },
        PlatformType::CorporateProfile => match &result.platform_name {
            Some(name) => format!("Profile on {}: extract outbound links only", name),
            None => "Platform profile: extract outbound links only".to_string(),
        },
        PlatformType::CorporateGeneric if result.has_reason(reason::URL_SHORTENER) => {
            "URL shortener".to_string()
        }
        PlatformType::CorporateGeneric => match &result.platform_name {
            Some(name) => format!("Corporate platform page ({})", name),
            None => "Corporate platform page".to_string(),
        },
        PlatformType::Unknown if result.has_reason(reason::INVALID_URL) => "Invalid URL".to_string(),
        PlatformType::Unknown => "Unclassified domain, queued for manual review".to_string(),
    }
}

// =============================================================================
// Built-in Registry Shortcuts
// =============================================================================

/// Classify a URL against the built-in registry.
pub fn classify(url: &str) -> ClassificationResult {
    Classifier::default().classify(url)
}

pub fn should_extract_links(url: &str) -> bool {
    Classifier::default().should_extract_links(url)
}

pub fn get_indexing_recommendation(url: &str) -> IndexingRecommendation {
    Classifier::default().get_indexing_recommendation(url)
}

pub fn is_profile_url(url: &str) -> ProfileMatch {
    Registry::builtin().is_profile_url(url)
}

pub fn is_domain_corporate(domain: &str) -> bool {
    Registry::builtin().is_domain_corporate(domain)
}

pub fn get_platform_for_domain(domain: &str) -> Option<PlatformPattern> {
    Registry::builtin().get_platform_for_domain(domain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::RegistryConfig;

    fn assert_decision(url: &str, platform_type: PlatformType, purpose: IndexingPurpose) -> ClassificationResult {
        let result = classify(url);
        assert_eq!(result.platform_type, platform_type, "{} -> {:?}", url, result);
        assert_eq!(result.indexing_purpose, purpose, "{} -> {:?}", url, result);
        result
    }

    #[test]
    fn test_url_shortener() {
        let result = assert_decision(
            "https://bit.ly/abc123",
            PlatformType::CorporateGeneric,
            IndexingPurpose::Rejected,
        );
        assert_eq!(result.score_modifier, 0.0);
        assert_eq!(result.confidence, 1.0);
        assert_eq!(result.reasons, vec!["url_shortener"]);
    }

    #[test]
    fn test_corporate_profile() {
        let result = assert_decision(
            "https://github.com/torvalds",
            PlatformType::CorporateProfile,
            IndexingPurpose::LinkExtraction,
        );
        assert!(result.should_extract_links);
        assert_eq!(result.score_modifier, 0.0);
        assert_eq!(result.confidence, 0.95);
        assert_eq!(result.platform_name.as_deref(), Some("github.com"));
    }

    #[test]
    fn test_corporate_non_profile_page() {
        let result = assert_decision(
            "https://github.com/features/actions",
            PlatformType::CorporateGeneric,
            IndexingPurpose::Rejected,
        );
        assert_eq!(result.confidence, 0.9);
        assert!(result.has_reason(reason::CORPORATE_DOMAIN));
        assert!(!result.should_extract_links);
    }

    #[test]
    fn test_knowledge_base_profile_is_rejected() {
        let result = assert_decision(
            "https://en.wikipedia.org/wiki/Rust_(programming_language)",
            PlatformType::CorporateGeneric,
            IndexingPurpose::Rejected,
        );
        assert_eq!(result.confidence, 0.95);
        assert!(result.has_reason(reason::KNOWLEDGE_BASE));
        assert_eq!(result.platform_name.as_deref(), Some("wikipedia.org"));
    }

    #[test]
    fn test_neocities() {
        let result = assert_decision(
            "https://alice.neocities.org/",
            PlatformType::IndiePlatform,
            IndexingPurpose::FullIndex,
        );
        assert_eq!(result.score_modifier, 1.15);
        assert!(result.has_reason("neocities_community"));
    }

    #[test]
    fn test_tilde_page() {
        let result = assert_decision(
            "https://tilde.town/~bob/",
            PlatformType::IndiePlatform,
            IndexingPurpose::FullIndex,
        );
        assert!(result.has_reason(reason::TILDE_PAGE));
        assert_eq!(result.score_modifier, 1.10);
    }

    #[test]
    fn test_indie_modifiers() {
        assert_eq!(classify("https://bob.bearblog.dev/").score_modifier, 1.10);
        assert_eq!(classify("https://bob.omg.lol/").score_modifier, 1.10);
        assert_eq!(classify("https://bob.github.io/").score_modifier, 1.05);
        assert_eq!(classify("https://bob.netlify.app/").score_modifier, 1.0);
        assert_eq!(classify("https://bob.write.as/").score_modifier, 1.05);
    }

    #[test]
    fn test_github_pages_safety_net() {
        let mut config = RegistryConfig::builtin();
        config.indie.retain(|entry| entry.domain != "github.io");
        let registry = Registry::from_config(config).unwrap();

        let result = Classifier::new(&registry).classify("https://bob.github.io/notes");
        assert_eq!(result.platform_type, PlatformType::IndiePlatform);
        assert_eq!(result.confidence, 0.9);
        assert_eq!(result.score_modifier, 0.95);
        assert_eq!(result.reasons, vec!["github_pages"]);
    }

    #[test]
    fn test_subdomain_blog() {
        let result = assert_decision(
            "https://myusername.wordpress.com/",
            PlatformType::CorporateProfile,
            IndexingPurpose::LinkExtraction,
        );
        assert!(result.should_extract_links);
        assert_eq!(result.platform_name.as_deref(), Some("wordpress.com"));

        assert_eq!(
            classify("https://janedoe.blogspot.com/2020/01/post.html").platform_name.as_deref(),
            Some("blogger.com")
        );
        assert_eq!(
            classify("https://janedoe.wixsite.com/portfolio").platform_name.as_deref(),
            Some("wix.com")
        );
    }

    #[test]
    fn test_indie_federated_instance() {
        let result = assert_decision(
            "https://tiny.social/",
            PlatformType::IndiePlatform,
            IndexingPurpose::FullIndex,
        );
        assert_eq!(result.confidence, 0.85);
        assert_eq!(result.score_modifier, 1.1);
        assert!(result.has_reason(reason::INDIE_FEDERATED));
    }

    #[test]
    fn test_federated_profile_on_small_instance() {
        let result = assert_decision(
            "https://tiny.social/@bob",
            PlatformType::CorporateProfile,
            IndexingPurpose::LinkExtraction,
        );
        assert_eq!(result.platform_name.as_deref(), Some("tiny.social"));
    }

    #[test]
    fn test_large_federated_instances_rejected() {
        assert_decision(
            "https://mastodon.social/about",
            PlatformType::CorporateGeneric,
            IndexingPurpose::Rejected,
        );
        let result = assert_decision(
            "https://alice.bsky.social/",
            PlatformType::CorporateGeneric,
            IndexingPurpose::Rejected,
        );
        assert!(result.has_reason(reason::FEDERATED_CORPORATE));
        assert_decision(
            "https://mastodon.example.org/",
            PlatformType::CorporateGeneric,
            IndexingPurpose::Rejected,
        );
    }

    #[test]
    fn test_federated_prefix_beats_hosted_blog() {
        for url in ["https://mas.wordpress.com/", "https://mastodon.blogspot.com/"] {
            let result = assert_decision(url, PlatformType::CorporateGeneric, IndexingPurpose::Rejected);
            assert_eq!(result.confidence, 0.9);
            assert!(result.has_reason(reason::FEDERATED_CORPORATE), "{}", url);
            assert!(!result.should_extract_links);
        }
    }

    #[test]
    fn test_federated_prefix_beats_github_pages() {
        let result = classify("https://mastodon.github.io/");
        assert_eq!(result.platform_type, PlatformType::IndiePlatform);
        assert!(result.has_reason("github_pages"));

        let mut config = RegistryConfig::builtin();
        config.indie.retain(|entry| entry.domain != "github.io");
        let registry = Registry::from_config(config).unwrap();
        let result = Classifier::new(&registry).classify("https://mastodon.github.io/");
        assert_eq!(result.platform_type, PlatformType::CorporateGeneric);
        assert_eq!(result.indexing_purpose, IndexingPurpose::Rejected);
    }

    #[test]
    fn test_independent_domain() {
        let result = assert_decision("https://jdoe.me/", PlatformType::Independent, IndexingPurpose::FullIndex);
        assert!(result.confidence >= 0.7);
        assert_eq!(result.score_modifier, 1.2);
        assert!(result.has_reason(reason::INDEPENDENT));
    }

    #[test]
    fn test_pending_review() {
        let result = assert_decision(
            "https://shop.bigretail.com/",
            PlatformType::Unknown,
            IndexingPurpose::PendingReview,
        );
        assert_eq!(result.confidence, 0.5);
        assert_eq!(result.score_modifier, 1.0);
    }

    #[test]
    fn test_invalid_urls_never_panic() {
        for input in [
            "",
            " ",
            "not a url",
            "://",
            "http://",
            "https://[::1",
            "mailto:bob@example.com",
            "javascript:alert(1)",
            "\u{0}\u{1}",
            "https://%%%/",
            "https://./",
            "https://www./",
        ] {
            let result = classify(input);
            assert_eq!(result, ClassificationResult::invalid_url(), "{:?}", input);
            assert_eq!(result.platform_type, PlatformType::Unknown);
            assert_eq!(result.indexing_purpose, IndexingPurpose::Rejected);
            assert_eq!(result.score_modifier, 0.0);
        }
    }

    #[test]
    fn test_odd_but_valid_urls_are_classified() {
        for input in ["https://127.0.0.1/", "http://[::1]:8080/x", "https://例え.jp/about", "https://localhost"] {
            let result = classify(input);
            assert!(!result.has_reason(reason::INVALID_URL), "{}", input);
            assert!((0.0..=1.0).contains(&result.confidence));
        }
    }

    #[test]
    fn test_classify_is_pure() {
        for url in ["https://jdoe.me/", "https://github.com/torvalds", "garbage", "https://tiny.social/"] {
            assert_eq!(classify(url), classify(url));
        }
    }

    #[test]
    fn test_indie_rule_beats_federated_heuristic() {
        assert!(is_domain_corporate("ctrl-c.club"));
        let result = assert_decision(
            "https://ctrl-c.club/",
            PlatformType::IndiePlatform,
            IndexingPurpose::FullIndex,
        );
        assert!(result.has_reason("tilde_community"));
    }

    #[test]
    fn test_www_prefix_is_ignored() {
        assert_eq!(classify("https://www.github.com/torvalds"), classify("https://github.com/torvalds"));
        assert!(classify("https://www.bit.ly/x").has_reason(reason::URL_SHORTENER));
    }

    #[test]
    fn test_should_extract_links() {
        assert!(should_extract_links("https://github.com/torvalds"));
        assert!(!should_extract_links("https://jdoe.me/"));
        assert!(!should_extract_links("garbage"));
    }

    #[test]
    fn test_indexing_recommendation() {
        let rec = get_indexing_recommendation("https://jdoe.me/");
        assert!(rec.should_index);
        assert!(!rec.should_extract_links);
        assert_eq!(rec.reason, "Independent personal site");

        let rec = get_indexing_recommendation("https://github.com/torvalds");
        assert!(!rec.should_index);
        assert!(rec.should_extract_links);
        assert_eq!(rec.reason, "Profile on github.com: extract outbound links only");

        assert_eq!(get_indexing_recommendation("https://bit.ly/x").reason, "URL shortener");
        assert_eq!(get_indexing_recommendation("nope").reason, "Invalid URL");
    }

    #[test]
    fn test_free_functions_delegate_to_builtin() {
        assert!(is_profile_url("https://github.com/torvalds").is_profile);
        assert_eq!(get_platform_for_domain("www.youtube.com").unwrap().domain, "youtube.com");
        assert!(get_platform_for_domain("jdoe.me").is_none());
    }
}
