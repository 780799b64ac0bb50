//! Core type definitions for SiteGate
//!
//! These types are shared by the registry, the scorer and the classifier,
//! and are serialized as-is by the CLI.

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// Platform Category
// =============================================================================

/// Category of a registered platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    SocialMedia,
    Development,
    Federated,
    Content,
    Creative,
    Streaming,
    Marketplace,
    Community,
    LinkService,
    KnowledgeBase,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::SocialMedia,
        Category::Development,
        Category::Federated,
        Category::Content,
        Category::Creative,
        Category::Streaming,
        Category::Marketplace,
        Category::Community,
        Category::LinkService,
        Category::KnowledgeBase,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SocialMedia => "social_media",
            Self::Development => "development",
            Self::Federated => "federated",
            Self::Content => "content",
            Self::Creative => "creative",
            Self::Streaming => "streaming",
            Self::Marketplace => "marketplace",
            Self::Community => "community",
            Self::LinkService => "link_service",
            Self::KnowledgeBase => "knowledge_base",
        }
    }

    /// Parse from the snake_case name used in configuration files.
    pub fn from_name(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Platform Pattern
// =============================================================================

/// A known platform: its canonical domain plus the paths that denote a
/// single account's page.
///
/// `profile_patterns` may also contain `*.base` entries, which declare that
/// every subdomain of `base` belongs to this platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformPattern {
    pub domain: String,
    pub profile_patterns: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude_patterns: Vec<String>,
    pub category: Category,
}

impl PlatformPattern {
    /// Base domains declared through `*.base` profile patterns.
    pub fn wildcard_bases(&self) -> impl Iterator<Item = &str> {
        self.profile_patterns
            .iter()
            .filter_map(|p| p.strip_prefix("*."))
    }
}

// =============================================================================
// Classification
// =============================================================================

/// What kind of site a URL belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformType {
    Independent,
    IndiePlatform,
    CorporateProfile,
    CorporateGeneric,
    Unknown,
}

impl PlatformType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Independent => "independent",
            Self::IndiePlatform => "indie_platform",
            Self::CorporateProfile => "corporate_profile",
            Self::CorporateGeneric => "corporate_generic",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PlatformType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Downstream treatment assigned to a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexingPurpose {
    /// Text-index the page
    FullIndex,
    /// Do not index, but harvest outbound links
    LinkExtraction,
    /// Defer to manual review
    PendingReview,
    /// Drop the URL
    Rejected,
}

impl IndexingPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullIndex => "full_index",
            Self::LinkExtraction => "link_extraction",
            Self::PendingReview => "pending_review",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for IndexingPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying a URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub platform_type: PlatformType,
    pub indexing_purpose: IndexingPurpose,
    /// 0.0..=1.0
    pub confidence: f64,
    /// Machine-readable evidence tags, in the order they were collected
    pub reasons: Vec<String>,
    /// Multiplier for the external content-quality score
    pub score_modifier: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_name: Option<String>,
    pub should_extract_links: bool,
}

impl ClassificationResult {
    pub(crate) fn new(
        platform_type: PlatformType,
        indexing_purpose: IndexingPurpose,
        confidence: f64,
        score_modifier: f64,
    ) -> Self {
        Self {
            platform_type,
            indexing_purpose,
            confidence,
            reasons: Vec::new(),
            score_modifier,
            platform_name: None,
            should_extract_links: false,
        }
    }

    pub(crate) fn reason(mut self, tag: &str) -> Self {
        self.reasons.push(tag.to_string());
        self
    }

    pub(crate) fn platform(mut self, name: &str) -> Self {
        self.platform_name = Some(name.to_string());
        self
    }

    pub(crate) fn extract_links(mut self) -> Self {
        self.should_extract_links = true;
        self
    }

    /// Conservative result for input that is not a usable URL.
    pub fn invalid_url() -> Self {
        Self::new(PlatformType::Unknown, IndexingPurpose::Rejected, 1.0, 0.0)
            .reason(reason::INVALID_URL)
    }

    pub fn has_reason(&self, tag: &str) -> bool {
        self.reasons.iter().any(|r| r == tag)
    }
}

/// Result of a profile URL lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileMatch {
    pub is_profile: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<PlatformPattern>,
}

impl ProfileMatch {
    pub fn none() -> Self {
        Self {
            is_profile: false,
            platform: None,
        }
    }
}

/// Presentation-level summary of a classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexingRecommendation {
    pub should_index: bool,
    pub should_extract_links: bool,
    pub reason: String,
}

// =============================================================================
// Reason Tags
// =============================================================================

/// Evidence tags recorded in [`ClassificationResult::reasons`].
pub mod reason {
    pub const INVALID_URL: &str = "invalid_url";
    pub const URL_SHORTENER: &str = "url_shortener";
    pub const CORPORATE_PROFILE: &str = "corporate_profile";
    pub const KNOWLEDGE_BASE: &str = "knowledge_base";
    pub const INDIE_PLATFORM: &str = "indie_platform";
    pub const TILDE_PAGE: &str = "tilde_page";
    pub const TILDE_COMMUNITY: &str = "tilde_community";
    pub const CORPORATE_DOMAIN: &str = "corporate_domain";
    pub const GITHUB_PAGES: &str = "github_pages";
    pub const CORPORATE_SUBDOMAIN_BLOG: &str = "corporate_subdomain_blog";
    pub const INDIE_FEDERATED: &str = "indie_federated_instance";
    pub const FEDERATED_CORPORATE: &str = "federated_corporate_instance";
    pub const INDEPENDENT: &str = "independent_heuristic";
    pub const NEEDS_REVIEW: &str = "needs_review";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_names_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_name(category.as_str()), Some(category));
        }
        assert_eq!(Category::from_name("nope"), None);
    }

    #[test]
    fn test_wildcard_bases() {
        let platform = PlatformPattern {
            domain: "bandcamp.com".to_string(),
            profile_patterns: vec!["*.bandcamp.com".to_string(), "/*".to_string()],
            exclude_patterns: Vec::new(),
            category: Category::Creative,
        };
        assert_eq!(platform.wildcard_bases().collect::<Vec<_>>(), vec!["bandcamp.com"]);
    }

    #[test]
    fn test_result_serializes_snake_case() {
        let result = ClassificationResult::invalid_url();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["platform_type"], "unknown");
        assert_eq!(json["indexing_purpose"], "rejected");
        assert_eq!(json["reasons"][0], "invalid_url");
        assert!(json.get("platform_name").is_none());
    }
}
