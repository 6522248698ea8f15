//! CSRF Double-Submit Support
//!
//! Django issues the token as a cookie and expects the same value back in a
//! request header on every mutating request. Both transports read the cookie
//! through [`cookie_value`] and attach it through [`CsrfConfig`].

/// Default cookie carrying the token
pub const DEFAULT_COOKIE_NAME: &str = "csrftoken";

/// Default header the backend checks
pub const DEFAULT_HEADER_NAME: &str = "X-CSRFToken";

/// Where the token lives and where it goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrfConfig {
    pub cookie_name: String,
    pub header_name: String,
}

impl Default for CsrfConfig {
    fn default() -> Self {
        Self {
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            header_name: DEFAULT_HEADER_NAME.to_string(),
        }
    }
}

impl CsrfConfig {
    /// Token to send, read from a `Cookie`-style header string
    pub fn token(&self, cookie_header: &str) -> Option<String> {
        cookie_value(cookie_header, &self.cookie_name)
    }
}

/// Look up `name` in a `name=value; other=value` cookie string.
///
/// The value is percent-decoded. An empty cookie string, a missing name or an
/// undecodable value all yield `None`.
pub fn cookie_value(cookie_header: &str, name: &str) -> Option<String> {
    if cookie_header.is_empty() || name.is_empty() {
        return None;
    }

    cookie_header
        .split(';')
        .map(str::trim)
        .find_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            (key == name).then_some(value)
        })
        .and_then(|raw| urlencoding::decode(raw).ok())
        .map(|value| value.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_lookup() {
        let cookies = "sessionid=abc123; csrftoken=tok%3Dvalue; theme=dark";
        assert_eq!(
            cookie_value(cookies, "csrftoken"),
            Some("tok=value".to_string())
        );
        assert_eq!(cookie_value(cookies, "theme"), Some("dark".to_string()));
    }

    #[test]
    fn test_cookie_missing() {
        assert_eq!(cookie_value("", "csrftoken"), None);
        assert_eq!(cookie_value("sessionid=abc", "csrftoken"), None);
        // Prefix of another cookie name must not match
        assert_eq!(cookie_value("csrftokenx=1", "csrftoken"), None);
    }

    #[test]
    fn test_config_defaults() {
        let csrf = CsrfConfig::default();
        assert_eq!(csrf.header_name, "X-CSRFToken");
        assert_eq!(csrf.token("csrftoken=xyz"), Some("xyz".to_string()));
    }
}
