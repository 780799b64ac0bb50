//! SiteGate Core Library
//!
//! This crate decides, for a discovered URL, whether a search index should
//! fully index it, only harvest its outbound links, queue it for manual
//! review, or reject it. It recognises personal sites, indie-web hosts and
//! profile pages on large platforms.
//!
//! # Architecture
//!
//! Classification is a pure function of the URL string and an immutable
//! [`Registry`]. The registry is built once, either from the compiled-in
//! tables or from a JSON [`RegistryConfig`], and every lookup borrows from
//! it. Nothing is mutated after construction.
//!
//! # Modules
//!
//! - `types`: Shared enums and result types
//! - `host`: Hostname normalisation and suffix walking
//! - `url`: URL parsing into host and path
//! - `glob`: Path pattern compiler with include/exclude evaluation
//! - `data`: Built-in platform, indie and shortener tables
//! - `registry`: Compiled lookup tables
//! - `scorer`: Independence heuristic for unrecognised domains
//! - `classifier`: Ordered rule table producing a `ClassificationResult`
//! - `reclassify`: Batch re-classification of stored records
//!
//! # Examples
//!
//! ```
//! use sg_core::{classify, IndexingPurpose, PlatformType};
//!
//! let result = classify("https://alice.neocities.org/");
//! assert_eq!(result.platform_type, PlatformType::IndiePlatform);
//! assert_eq!(result.indexing_purpose, IndexingPurpose::FullIndex);
//! ```

pub mod classifier;
pub mod data;
pub mod glob;
pub mod host;
pub mod reclassify;
pub mod registry;
pub mod scorer;
pub mod types;
pub mod url;

// Re-export commonly used types
pub use classifier::{
    classify, get_indexing_recommendation, get_platform_for_domain, is_domain_corporate,
    is_profile_url, should_extract_links, Classifier,
};
pub use reclassify::{reclassify, reclassify_all, Reclassification, ReclassifySummary, StoredRecord};
pub use registry::{IndieEntry, Registry, RegistryConfig, RegistryError};
pub use scorer::{score_breakdown, score_independence, ScoreBreakdown};
pub use types::{
    Category, ClassificationResult, IndexingPurpose, IndexingRecommendation, PlatformPattern,
    PlatformType, ProfileMatch,
};
