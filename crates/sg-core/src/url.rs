//! URL parsing for classification
//!
//! Every lookup in the engine works on a normalised host and a path, so
//! URLs are parsed once into a [`Target`] and everything downstream borrows
//! from it.

use crate::host::normalize_domain;

/// Error type for URL parsing.
#[derive(Debug, thiserror::Error)]
pub enum UrlError {
    #[error("Invalid URL: {0}")]
    Parse(#[from] ::url::ParseError),
    #[error("URL has no host: {0}")]
    MissingHost(String),
}

/// The parts of a URL the classifier looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Lowercased hostname as it appeared in the URL
    pub hostname: String,
    /// Hostname with a leading `www.` removed
    pub domain: String,
    /// URL path, always starting with `/`
    pub path: String,
}

/// Parse a URL string into a [`Target`].
pub fn parse_target(input: &str) -> Result<Target, UrlError> {
    let parsed = ::url::Url::parse(input)?;

    let hostname = match parsed.host_str() {
        Some(host) if !host.is_empty() => host.to_ascii_lowercase(),
        _ => return Err(UrlError::MissingHost(input.to_string())),
    };

    let path = match parsed.path() {
        "" => "/".to_string(),
        p if !p.starts_with('/') => format!("/{}", p),
        p => p.to_string(),
    };

    let domain = normalize_domain(&hostname);
    if domain.is_empty() {
        return Err(UrlError::MissingHost(input.to_string()));
    }

    Ok(Target {
        domain,
        hostname,
        path,
    })
}
