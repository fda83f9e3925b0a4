//! Domain cleaning helpers shared by the resolution strategies.
//!
//! Provider suggestions and LLM replies hand back anything from a bare host
//! to a full URL; everything funnels through [`clean_domain`] before it is
//! templated into a CDN logo URL.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

/// Logo CDN host; a resolved domain maps to `https://<host>/<domain>`.
pub const LOGO_CDN_BASE: &str = "https://logo.clearbit.com";

/// Multi-part public suffixes that keep a third label after cleaning.
const SECOND_LEVEL_SUFFIXES: &[&str] = &[
    "co.uk", "org.uk", "ac.uk", "gov.uk", "com.au", "net.au", "org.au", "co.jp", "co.nz",
    "co.in", "com.br", "com.mx", "co.za",
];

/// Deterministic logo URL for a domain, templated against the CDN host.
pub fn logo_cdn_url(domain: &str) -> String {
    format!("{LOGO_CDN_BASE}/{domain}")
}

/// Reduce a raw candidate (maybe a URL, maybe a host, maybe with a path) to
/// its registrable domain+suffix: lowercased, scheme/path/port stripped,
/// `www.` stripped, subdomains discarded.
pub fn clean_domain(raw: &str) -> Option<String> {
    let candidate = raw.trim().to_ascii_lowercase();
    if candidate.is_empty() {
        return None;
    }

    let host = if candidate.contains("://") {
        let url = Url::parse(&candidate).ok()?;
        url.host_str()?.to_string()
    } else {
        candidate
            .split(['/', '?', '#', ':'])
            .next()
            .unwrap_or_default()
            .to_string()
    };

    let host = host.trim_end_matches('.');
    let host = host.strip_prefix("www.").unwrap_or(host);

    let labels: Vec<&str> = host.split('.').filter(|label| !label.is_empty()).collect();
    if labels.len() < 2 {
        return None;
    }

    let tld = labels[labels.len() - 1];
    if tld.len() < 2 || !tld.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let tail_two = labels[labels.len() - 2..].join(".");
    let keep = if labels.len() >= 3 && SECOND_LEVEL_SUFFIXES.contains(&tail_two.as_str()) {
        3
    } else {
        2
    };

    Some(labels[labels.len() - keep..].join("."))
}

/// First domain-shaped token in free text (an LLM reply, typically).
pub fn extract_domain_token(text: &str) -> Option<String> {
    static DOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?i)\b[a-z0-9][a-z0-9-]*(?:\.[a-z0-9][a-z0-9-]*)*\.[a-z]{2,}\b")
            .expect("valid regex")
    });

    DOMAIN_RE
        .find(text)
        .map(|m| m.as_str().to_ascii_lowercase())
}
