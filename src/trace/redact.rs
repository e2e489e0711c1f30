// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! URL redaction

/// Strip query and fragment: cut at the first `?` or `#`, whichever comes
/// first. Path segments are never touched.
pub fn redact_url(url: &str) -> &str {
    match url.find(|c: char| c == '?' || c == '#') {
        Some(end) => &url[..end],
        None => url,
    }
}

/// Whether redaction would remove anything
pub fn has_sensitive_parts(url: &str) -> bool {
    redact_url(url).len() != url.len()
}

/// Absolute `http://` or `https://` URL (case-sensitive prefix)
pub fn is_absolute_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_query_and_fragment() {
        assert_eq!(redact_url("https://a.example/p?t=1#x"), "https://a.example/p");
        assert_eq!(redact_url("https://a.example/p#x?t=1"), "https://a.example/p");
        assert_eq!(redact_url("https://a.example/p/q"), "https://a.example/p/q");
        assert_eq!(redact_url("?only"), "");
        assert_eq!(redact_url(""), "");
    }

    #[test]
    fn test_redact_is_prefix_and_idempotent() {
        let urls = [
            "https://checkout.example/entry?token=abc&x=1",
            "https://checkout.example/entry#/step/2",
            "https://checkout.example/a?b#c",
            "https://checkout.example/a#b?c",
            "http://plain.example/path/to/thing",
            "relative/path?x",
            "##??",
        ];
        for url in urls {
            let once = redact_url(url);
            assert!(url.starts_with(once));
            assert!(!once.contains('?') && !once.contains('#'));
            assert_eq!(redact_url(once), once);
        }
    }

    #[test]
    fn test_sensitive_parts() {
        assert!(has_sensitive_parts("https://a.example/?t=1"));
        assert!(!has_sensitive_parts("https://a.example/"));
    }

    #[test]
    fn test_absolute_http_url() {
        assert!(is_absolute_http_url("https://a.example"));
        assert!(is_absolute_http_url("http://a.example"));
        assert!(!is_absolute_http_url("HTTPS://a.example"));
        assert!(!is_absolute_http_url("/relative"));
        assert!(!is_absolute_http_url("ftp://a.example"));
    }
}
