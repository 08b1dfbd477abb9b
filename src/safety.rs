//! Outbound URL safety check.
//!
//! Guards against caller-supplied URLs steering the engine at internal
//! services. Only `http`/`https` URLs with a host are accepted; literal IP
//! hosts in private, loopback, link-local or unspecified ranges are refused.
//! DNS names are not resolved, so a public name pointing at a private
//! address is not caught here.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use url::{Host, Url};

/// Hostnames refused by name before any address parsing.
const BLOCKED_HOSTNAMES: &[&str] = &["localhost", "127.0.0.1", "0.0.0.0", "::1"];

/// Returns `true` when `raw` may be fetched.
pub fn is_safe_url(raw: &str) -> bool {
    match Url::parse(raw) {
        Ok(url) => is_safe(&url),
        Err(_) => false,
    }
}

/// Same as [`is_safe_url`] for an already parsed URL.
pub fn is_safe(url: &Url) -> bool {
    if !matches!(url.scheme(), "http" | "https") {
        return false;
    }

    let Some(host) = url.host() else {
        return false;
    };

    match host {
        Host::Domain(name) => {
            let name = name.trim_end_matches('.').to_ascii_lowercase();
            !name.is_empty() && !BLOCKED_HOSTNAMES.contains(&name.as_str())
        }
        Host::Ipv4(addr) => !is_internal_ip(IpAddr::V4(addr)),
        Host::Ipv6(addr) => !is_internal_ip(IpAddr::V6(addr)),
    }
}

/// Private, loopback, link-local or unspecified address.
pub fn is_internal_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(addr) => is_internal_ipv4(addr),
        IpAddr::V6(addr) => match addr.to_ipv4_mapped() {
            Some(mapped) => is_internal_ipv4(mapped),
            None => is_internal_ipv6(addr),
        },
    }
}

fn is_internal_ipv4(addr: Ipv4Addr) -> bool {
    addr.is_private()
        || addr.is_loopback()
        || addr.is_link_local()
        || addr.is_unspecified()
        || addr.is_broadcast()
        || addr.octets()[0] == 0
}

fn is_internal_ipv6(addr: Ipv6Addr) -> bool {
    let first = addr.segments()[0];

    addr.is_loopback()
        || addr.is_unspecified()
        // fc00::/7 unique local
        || (first & 0xfe00) == 0xfc00
        // fe80::/10 link-local
        || (first & 0xffc0) == 0xfe80
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_http_and_https_accepted() {
        assert!(is_safe_url("https://example.com"));
        assert!(is_safe_url("http://example.com/path?q=1"));
        assert!(is_safe_url("https://93.184.216.34/"));
        assert!(is_safe_url("https://[2606:4700::1111]/"));
    }

    #[test]
    fn other_schemes_rejected() {
        assert!(!is_safe_url("ftp://example.com/file"));
        assert!(!is_safe_url("file:///etc/passwd"));
        assert!(!is_safe_url("javascript:alert(1)"));
        assert!(!is_safe_url("gopher://example.com"));
    }

    #[test]
    fn missing_scheme_or_host_rejected() {
        assert!(!is_safe_url("example.com/page"));
        assert!(!is_safe_url("/relative/path"));
        assert!(!is_safe_url(""));
        assert!(!is_safe_url("http://"));
    }

    #[test]
    fn literal_local_hostnames_rejected() {
        assert!(!is_safe_url("http://localhost/admin"));
        assert!(!is_safe_url("http://LOCALHOST:8080/"));
        assert!(!is_safe_url("http://127.0.0.1/secret"));
        assert!(!is_safe_url("http://0.0.0.0/"));
        assert!(!is_safe_url("http://[::1]/"));
    }

    #[test]
    fn private_ranges_rejected() {
        assert!(!is_safe_url("http://10.0.0.1/internal"));
        assert!(!is_safe_url("http://172.16.5.4/"));
        assert!(!is_safe_url("http://192.168.1.1/router"));
        assert!(!is_safe_url("http://127.8.9.10/"));
    }

    #[test]
    fn link_local_rejected() {
        assert!(!is_safe_url("http://169.254.169.254/latest/meta-data"));
        assert!(!is_safe_url("http://[fe80::1]/"));
    }

    #[test]
    fn ipv6_unique_local_and_mapped_rejected() {
        assert!(!is_safe_url("http://[fd00::1]/"));
        assert!(!is_safe_url("http://[::ffff:127.0.0.1]/"));
        assert!(!is_safe_url("http://[::ffff:192.168.0.1]/"));
    }

    #[test]
    fn dns_names_are_not_resolved() {
        // A public-looking name is accepted even if it might resolve internally.
        assert!(is_safe_url("http://internal.example.com/"));
    }
}
