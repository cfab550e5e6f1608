use super::*;

// =========================================================
// Hostname resolution
// =========================================================

#[test]
fn subdomain_resolves_to_tenant() {
    assert_eq!(
        resolve_slug("acme.laundrylobby.com", "/", None),
        Some("acme".to_string())
    );
}

#[test]
fn reserved_subdomains_do_not_resolve() {
    for sub in ["www", "app", "api", "admin", "staging", "preview"] {
        let host = format!("{}.laundrylobby.com", sub);
        assert_eq!(resolve_slug(&host, "/", None), None, "subdomain {}", sub);
    }
}

#[test]
fn root_domain_and_foreign_domains_do_not_resolve() {
    assert_eq!(resolve_slug("laundrylobby.com", "/", None), None);
    assert_eq!(resolve_slug("acme.example.com", "/", None), None);
}

#[test]
fn deep_subdomains_do_not_resolve() {
    assert_eq!(resolve_slug("a.b.laundrylobby.com", "/", None), None);
}

#[test]
fn localhost_and_raw_ip_never_resolve_from_hostname() {
    assert_eq!(resolve_slug("localhost", "/", None), None);
    assert_eq!(resolve_slug("acme.localhost", "/", None), None);
    assert_eq!(resolve_slug("192.168.1.20", "/", None), None);
}

#[test]
fn preview_deployment_domains_never_resolve() {
    assert_eq!(resolve_slug("acme.pages.dev", "/", None), None);
    assert_eq!(resolve_slug("acme.vercel.app", "/", None), None);
    assert_eq!(resolve_slug("acme.netlify.app", "/", None), None);
}

#[test]
fn hostname_matching_is_case_insensitive() {
    assert_eq!(
        resolve_slug("Acme.LaundryLobby.com", "/", None),
        Some("acme".to_string())
    );
}

// =========================================================
// Path fallback
// =========================================================

#[test]
fn path_segment_resolves_when_hostname_does_not() {
    assert_eq!(
        resolve_slug("localhost", "/acme/pricing", None),
        Some("acme".to_string())
    );
}

#[test]
fn reserved_path_segments_do_not_resolve() {
    for seg in ["auth", "admin", "customer", "dashboard", "api"] {
        let path = format!("/{}/anything", seg);
        assert_eq!(resolve_slug("localhost", &path, None), None, "segment {}", seg);
    }
}

#[test]
fn subdomain_wins_over_path_segment() {
    assert_eq!(
        resolve_slug("acme.laundrylobby.com", "/fresh/pricing", None),
        Some("acme".to_string())
    );
}

// =========================================================
// Stored fallback & idempotence
// =========================================================

#[test]
fn stored_value_is_last_resort() {
    assert_eq!(
        resolve_slug("localhost", "/", Some("acme")),
        Some("acme".to_string())
    );
    assert_eq!(
        resolve_slug("localhost", "/fresh", Some("acme")),
        Some("fresh".to_string())
    );
}

#[test]
fn invalid_stored_value_is_ignored() {
    assert_eq!(resolve_slug("localhost", "/", Some("Not A Slug")), None);
    assert_eq!(resolve_slug("localhost", "/", Some("")), None);
}

#[test]
fn resolution_is_idempotent() {
    let first = resolve_slug("acme.laundrylobby.com", "/pricing", None);
    let second = resolve_slug("acme.laundrylobby.com", "/pricing", None);
    assert_eq!(first, second);
}

#[test]
fn slug_validation_rules() {
    assert!(is_valid_slug("acme"));
    assert!(is_valid_slug("fresh-spin-2"));
    assert!(!is_valid_slug("-acme"));
    assert!(!is_valid_slug("acme-"));
    assert!(!is_valid_slug("Acme"));
    assert!(!is_valid_slug("ac me"));
    assert!(!is_valid_slug(""));
}
