//! CSRF Token Lookup
//!
//! The server issues the token; the client only finds it and echoes it
//! back in the `X-CSRFToken` header on state-changing requests.

use percent_encoding::percent_decode_str;

/// Header the server checks
pub const CSRF_HEADER: &str = "X-CSRFToken";
/// Cookie the server sets
pub const CSRF_COOKIE: &str = "csrftoken";

/// Read one cookie from a `document.cookie` style string (`a=1; b=2`)
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .map(str::trim)
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| percent_decode_str(value).decode_utf8_lossy().into_owned())
}

/// Where the token may live on a page, in lookup order
#[derive(Debug, Clone, Default)]
pub struct CsrfSources<'a> {
    pub cookies: &'a str,
    /// `input[name=csrfmiddlewaretoken]` value
    pub form_field: Option<&'a str>,
    /// `meta[name="csrf-token"]` content
    pub meta: Option<&'a str>,
}

impl CsrfSources<'_> {
    /// Cookie first, then form field, then meta tag. Blank values are skipped.
    pub fn resolve(&self) -> Option<String> {
        cookie_value(self.cookies, CSRF_COOKIE)
            .filter(|t| !t.is_empty())
            .or_else(|| non_blank(self.form_field))
            .or_else(|| non_blank(self.meta))
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_value() {
        let cookies = "sessionid=abc; csrftoken=tok%2Fen; theme=dark";
        assert_eq!(cookie_value(cookies, "csrftoken").as_deref(), Some("tok/en"));
        assert_eq!(cookie_value(cookies, "theme").as_deref(), Some("dark"));
        assert_eq!(cookie_value(cookies, "missing"), None);
        assert_eq!(cookie_value("", "csrftoken"), None);
    }

    #[test]
    fn test_cookie_name_must_match_exactly() {
        assert_eq!(cookie_value("xcsrftoken=1", "csrftoken"), None);
    }

    #[test]
    fn test_resolve_precedence() {
        let all = CsrfSources { cookies: "csrftoken=c", form_field: Some("f"), meta: Some("m") };
        assert_eq!(all.resolve().as_deref(), Some("c"));

        let no_cookie = CsrfSources { cookies: "a=b", form_field: Some("f"), meta: Some("m") };
        assert_eq!(no_cookie.resolve().as_deref(), Some("f"));

        let meta_only = CsrfSources { cookies: "", form_field: Some("  "), meta: Some("m") };
        assert_eq!(meta_only.resolve().as_deref(), Some("m"));

        assert_eq!(CsrfSources::default().resolve(), None);
    }
}
