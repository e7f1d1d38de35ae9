//! Hostname-to-store detection.

use glowbox_core::{ScrapeRules, Store};

/// Resolve a hostname to a known retailer.
///
/// A hostname matches a configured domain when it equals the domain or
/// ends with `"." + domain`, so subdomains resolve to the parent store
/// (`www.sephora.com` and `shop.ulta.com` included). Matching is
/// case-insensitive and first-match-wins in rule order; unrecognized
/// hosts map to [`Store::Other`].
#[must_use]
pub fn detect_store(rules: &ScrapeRules, hostname: &str) -> Store {
    let host = hostname.to_lowercase();
    for rule in &rules.stores {
        for domain in &rule.domains {
            let domain = domain.to_lowercase();
            if host == domain || host.ends_with(&format!(".{domain}")) {
                return rule.store;
            }
        }
    }
    Store::Other
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> ScrapeRules {
        ScrapeRules::builtin()
    }

    #[test]
    fn detects_bare_domain() {
        assert_eq!(detect_store(&rules(), "sephora.com"), Store::Sephora);
    }

    #[test]
    fn detects_subdomains() {
        assert_eq!(detect_store(&rules(), "www.sephora.com"), Store::Sephora);
        assert_eq!(detect_store(&rules(), "shop.ulta.com"), Store::Ulta);
    }

    #[test]
    fn detection_is_case_insensitive() {
        assert_eq!(detect_store(&rules(), "WWW.Target.COM"), Store::Target);
    }

    #[test]
    fn unknown_hosts_map_to_other() {
        assert_eq!(detect_store(&rules(), "example.org"), Store::Other);
        assert_eq!(detect_store(&rules(), "127.0.0.1"), Store::Other);
    }

    #[test]
    fn suffix_match_requires_a_dot_boundary() {
        // "notsephora.com" must not match "sephora.com".
        assert_eq!(detect_store(&rules(), "notsephora.com"), Store::Other);
    }
}
