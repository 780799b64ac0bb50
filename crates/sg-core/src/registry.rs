//! Platform registry and indie allowlist
//!
//! A [`Registry`] is an immutable lookup structure built once from a
//! [`RegistryConfig`]. The built-in tables live in [`crate::data`]; a JSON
//! document with the same shape can replace them at startup.
//!
//! # Examples
//!
//! ```
//! use sg_core::registry::Registry;
//!
//! let registry = Registry::builtin();
//! assert!(registry.is_profile_url("https://github.com/torvalds").is_profile);
//! assert!(!registry.is_profile_url("https://github.com/features").is_profile);
//! ```

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::RegexSet;
use serde::{Deserialize, Serialize};

use crate::data::{
    FEDERATED_HOST_PATTERNS, INDIE_ALLOWLIST, LARGE_FEDERATED_INSTANCES, PLATFORMS, TILDE_HOSTS,
    URL_SHORTENERS,
};
use crate::glob::{Glob, GlobError, PathRules};
use crate::host::{is_same_or_subdomain, normalize_domain, walk_host_suffixes};
use crate::types::{Category, PlatformPattern, ProfileMatch};
use crate::url::parse_target;

/// Profile patterns for synthesized federated-instance descriptors.
const FEDERATED_PROFILE_PATTERNS: &[&str] = &["/@*"];

static FEDERATED_HOSTS: Lazy<RegexSet> =
    Lazy::new(|| RegexSet::new(FEDERATED_HOST_PATTERNS).expect("federated host patterns are valid"));

static BUILTIN: Lazy<Registry> = Lazy::new(|| {
    Registry::from_config(RegistryConfig::builtin()).expect("built-in registry is valid")
});

// =============================================================================
// Configuration
// =============================================================================

/// An indie-web-friendly domain and the score modifier it earns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndieEntry {
    pub domain: String,
    pub score_modifier: f64,
    pub reason: String,
}

/// Serializable form of a registry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub platforms: Vec<PlatformPattern>,
    pub indie: Vec<IndieEntry>,
    pub shorteners: Vec<String>,
    pub tilde_hosts: Vec<String>,
    pub large_federated_instances: Vec<String>,
}

impl RegistryConfig {
    /// The compiled-in tables.
    pub fn builtin() -> Self {
        let to_strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        Self {
            platforms: PLATFORMS
                .iter()
                .map(|def| PlatformPattern {
                    domain: def.domain.to_string(),
                    profile_patterns: to_strings(def.profile),
                    exclude_patterns: to_strings(def.exclude),
                    category: def.category,
                })
                .collect(),
            indie: INDIE_ALLOWLIST
                .iter()
                .map(|def| IndieEntry {
                    domain: def.domain.to_string(),
                    score_modifier: def.score_modifier,
                    reason: def.reason.to_string(),
                })
                .collect(),
            shorteners: to_strings(URL_SHORTENERS),
            tilde_hosts: to_strings(TILDE_HOSTS),
            large_federated_instances: to_strings(LARGE_FEDERATED_INSTANCES),
        }
    }
}

/// Error type for registry construction.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Invalid registry JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Platform '{domain}': {source}")]
    InvalidPattern {
        domain: String,
        #[source]
        source: GlobError,
    },
    #[error("Empty domain in {0} table")]
    EmptyDomain(&'static str),
    #[error("Invalid score modifier {value} for '{domain}'")]
    InvalidModifier { domain: String, value: f64 },
}

// =============================================================================
// Registry
// =============================================================================

#[derive(Debug)]
struct CompiledPlatform {
    pattern: PlatformPattern,
    rules: PathRules,
}

/// A platform resolved for a domain: either registered, or synthesized
/// because the host looks like a federated instance.
#[derive(Debug, Clone, Copy)]
pub enum ResolvedPlatform<'a> {
    Registered(&'a PlatformPattern),
    Federated(&'a str),
}

impl<'a> ResolvedPlatform<'a> {
    pub fn domain(&self) -> &'a str {
        match *self {
            Self::Registered(p) => &p.domain,
            Self::Federated(domain) => domain,
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Self::Registered(p) => p.category,
            Self::Federated(_) => Category::Federated,
        }
    }

    pub fn to_pattern(&self) -> PlatformPattern {
        match *self {
            Self::Registered(p) => p.clone(),
            Self::Federated(domain) => PlatformPattern {
                domain: domain.to_string(),
                profile_patterns: FEDERATED_PROFILE_PATTERNS.iter().map(|s| s.to_string()).collect(),
                exclude_patterns: Vec::new(),
                category: Category::Federated,
            },
        }
    }
}

/// Immutable platform registry.
#[derive(Debug)]
pub struct Registry {
    platforms: Vec<CompiledPlatform>,
    by_domain: HashMap<String, usize>,
    by_wildcard_base: HashMap<String, usize>,
    indie: Vec<IndieEntry>,
    indie_by_domain: HashMap<String, usize>,
    shorteners: HashSet<String>,
    tilde_hosts: Vec<String>,
    large_federated: Vec<String>,
    federated_rules: PathRules,
}

impl Registry {
    /// The process-wide registry built from the compiled-in tables.
    pub fn builtin() -> &'static Registry {
        &BUILTIN
    }

    /// Build a registry from a JSON document shaped like [`RegistryConfig`].
    pub fn from_json(text: &str) -> Result<Self, RegistryError> {
        let config: RegistryConfig = serde_json::from_str(text)?;
        Self::from_config(config)
    }

    /// Build a registry, compiling every platform's patterns.
    ///
    /// Domains are normalised. When two platforms share a domain or a
    /// wildcard base, the first one wins.
    pub fn from_config(config: RegistryConfig) -> Result<Self, RegistryError> {
        let mut platforms = Vec::with_capacity(config.platforms.len());
        let mut by_domain = HashMap::new();
        let mut by_wildcard_base = HashMap::new();

        for mut pattern in config.platforms {
            pattern.domain = normalize_domain(&pattern.domain);
            if pattern.domain.is_empty() {
                return Err(RegistryError::EmptyDomain("platform"));
            }

            let rules = PathRules::compile(&pattern.profile_patterns, &pattern.exclude_patterns)
                .map_err(|source| RegistryError::InvalidPattern {
                    domain: pattern.domain.clone(),
                    source,
                })?;

            let idx = platforms.len();
            by_domain.entry(pattern.domain.clone()).or_insert(idx);
            for base in pattern.wildcard_bases() {
                by_wildcard_base.entry(normalize_domain(base)).or_insert(idx);
            }
            platforms.push(CompiledPlatform { pattern, rules });
        }

        let mut indie = Vec::with_capacity(config.indie.len());
        let mut indie_by_domain = HashMap::new();
        for mut entry in config.indie {
            entry.domain = normalize_domain(&entry.domain);
            if entry.domain.is_empty() {
                return Err(RegistryError::EmptyDomain("indie"));
            }
            if !entry.score_modifier.is_finite() || entry.score_modifier < 0.0 {
                return Err(RegistryError::InvalidModifier {
                    domain: entry.domain,
                    value: entry.score_modifier,
                });
            }
            indie_by_domain.entry(entry.domain.clone()).or_insert(indie.len());
            indie.push(entry);
        }

        let federated_rules = PathRules::compile(FEDERATED_PROFILE_PATTERNS, &[])
            .map_err(|source| RegistryError::InvalidPattern {
                domain: "federated".to_string(),
                source,
            })?;

        log::debug!(
            "Registry built: {} platforms, {} indie entries, {} shorteners",
            platforms.len(),
            indie.len(),
            config.shorteners.len()
        );

        Ok(Self {
            platforms,
            by_domain,
            by_wildcard_base,
            indie,
            indie_by_domain,
            shorteners: normalize_all(config.shorteners).into_iter().collect(),
            tilde_hosts: normalize_all(config.tilde_hosts),
            large_federated: normalize_all(config.large_federated_instances),
            federated_rules,
        })
    }

    /// Export the registry as configuration.
    pub fn to_config(&self) -> RegistryConfig {
        let mut shorteners: Vec<String> = self.shorteners.iter().cloned().collect();
        shorteners.sort();

        RegistryConfig {
            platforms: self.platforms().cloned().collect(),
            indie: self.indie.clone(),
            shorteners,
            tilde_hosts: self.tilde_hosts.clone(),
            large_federated_instances: self.large_federated.clone(),
        }
    }

    // =========================================================================
    // Listing
    // =========================================================================

    pub fn platforms(&self) -> impl Iterator<Item = &PlatformPattern> {
        self.platforms.iter().map(|p| &p.pattern)
    }

    pub fn platforms_in(&self, category: Category) -> impl Iterator<Item = &PlatformPattern> {
        self.platforms().filter(move |p| p.category == category)
    }

    pub fn indie_entries(&self) -> &[IndieEntry] {
        &self.indie
    }

    // =========================================================================
    // Domain Lookups
    // =========================================================================

    /// True for registered platforms, subdomains of `*.base` wildcards and
    /// anything shaped like a federated instance.
    pub fn is_domain_corporate(&self, domain: &str) -> bool {
        let domain = normalize_domain(domain);
        self.is_registered_domain(&domain) || looks_federated(&domain)
    }

    /// Registered platform or `*.base` wildcard hit. `domain` must be normalised.
    pub fn is_registered_domain(&self, domain: &str) -> bool {
        self.by_domain.contains_key(domain) || self.wildcard_platform(domain).is_some()
    }

    /// Platform for a domain, synthesizing a federated descriptor when the
    /// host merely looks like an instance.
    pub fn get_platform_for_domain(&self, domain: &str) -> Option<PlatformPattern> {
        let domain = normalize_domain(domain);
        self.resolve(&domain).map(|p| p.to_pattern())
    }

    /// Resolve a normalised domain.
    pub fn resolve<'a>(&'a self, domain: &'a str) -> Option<ResolvedPlatform<'a>> {
        self.resolve_with_rules(domain).map(|(platform, _)| platform)
    }

    fn resolve_with_rules<'a>(&'a self, domain: &'a str) -> Option<(ResolvedPlatform<'a>, &'a PathRules)> {
        let registered = self
            .by_domain
            .get(domain)
            .copied()
            .or_else(|| self.wildcard_platform(domain));

        if let Some(idx) = registered {
            let compiled = &self.platforms[idx];
            return Some((ResolvedPlatform::Registered(&compiled.pattern), &compiled.rules));
        }
        if looks_federated(domain) {
            return Some((ResolvedPlatform::Federated(domain), &self.federated_rules));
        }
        None
    }

    fn wildcard_platform(&self, domain: &str) -> Option<usize> {
        walk_host_suffixes(domain).find_map(|suffix| self.by_wildcard_base.get(suffix).copied())
    }

    pub fn is_shortener(&self, domain: &str) -> bool {
        self.shorteners.contains(domain)
    }

    /// Allowlist entry the domain equals or sits under. `domain` must be normalised.
    pub fn indie_entry_for(&self, domain: &str) -> Option<&IndieEntry> {
        walk_host_suffixes(domain)
            .find_map(|suffix| self.indie_by_domain.get(suffix))
            .map(|&idx| &self.indie[idx])
    }

    /// True if the hostname contains one of the tilde/pubnix hosts.
    pub fn is_tilde_host(&self, hostname: &str) -> bool {
        self.tilde_hosts.iter().any(|host| hostname.contains(host.as_str()))
    }

    pub fn is_large_federated_instance(&self, domain: &str) -> bool {
        self.large_federated
            .iter()
            .any(|instance| is_same_or_subdomain(domain, instance))
    }

    // =========================================================================
    // Profile Detection
    // =========================================================================

    /// Decide whether a URL is a single account's page on a known platform.
    pub fn is_profile_url(&self, url: &str) -> ProfileMatch {
        let target = match parse_target(url) {
            Ok(target) => target,
            Err(_) => return ProfileMatch::none(),
        };

        match self.profile_platform(&target.domain, &target.path) {
            Some(platform) => ProfileMatch {
                is_profile: true,
                platform: Some(platform.to_pattern()),
            },
            None => ProfileMatch::none(),
        }
    }

    /// Platform whose profile patterns match `path`. `domain` must be normalised.
    pub fn profile_platform<'a>(&'a self, domain: &'a str, path: &str) -> Option<ResolvedPlatform<'a>> {
        let (platform, rules) = self.resolve_with_rules(domain)?;
        rules.matches(path).then_some(platform)
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Lint the registry. Returns human-readable findings; empty means clean.
    pub fn validate(&self) -> Vec<String> {
        let mut findings = Vec::new();
        let mut seen = HashSet::new();

        for platform in self.platforms() {
            if !seen.insert(platform.domain.as_str()) {
                findings.push(format!("{}: duplicate platform domain", platform.domain));
            }

            let patterns = platform.profile_patterns.iter().chain(&platform.exclude_patterns);
            for pattern in patterns {
                if !pattern.starts_with('/') && !pattern.starts_with("*.") {
                    findings.push(format!(
                        "{}: pattern '{}' is neither a path nor a '*.' wildcard",
                        platform.domain, pattern
                    ));
                } else if pattern.starts_with('/') && Glob::has_unescaped_metachar(pattern) {
                    findings.push(format!(
                        "{}: pattern '{}' contains regex metacharacters that are not escaped",
                        platform.domain, pattern
                    ));
                }
            }

            if platform.profile_patterns.iter().all(|p| p.starts_with("*.")) {
                findings.push(format!("{}: no path patterns, profiles can never match", platform.domain));
            }
        }

        for entry in &self.indie {
            if self.by_domain.contains_key(&entry.domain) {
                findings.push(format!("{}: listed as both platform and indie host", entry.domain));
            }
        }

        for finding in &findings {
            log::warn!("Registry lint: {}", finding);
        }

        findings
    }
}

/// Coarse "looks like a federated instance" check.
pub fn looks_federated(domain: &str) -> bool {
    FEDERATED_HOSTS.is_match(domain)
}

fn normalize_all(items: Vec<String>) -> Vec<String> {
    items
        .iter()
        .map(|s| normalize_domain(s))
        .filter(|s| !s.is_empty())
        .collect()
}
