//! Check evaluation against a probe response.
//!
//! All conditions are conjunctive and evaluation stops at the first failing
//! one. Conditions left empty are satisfied.

use super::model::Check;
use crate::probe::ProbeResponse;

/// A parsed `name:substring` header entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderRule<'a> {
    pub name: &'a str,
    /// Empty when the entry had no `:` or nothing after it.
    pub needle: &'a str,
}

impl<'a> HeaderRule<'a> {
    /// Split on the first `:` only; the value part may itself contain colons.
    ///
    /// Whitespace after the colon is dropped, as it is from received header
    /// values, so `Server: Apache` and `Server:Apache` are the same rule.
    pub fn parse(entry: &'a str) -> Self {
        match entry.split_once(':') {
            Some((name, needle)) => Self {
                name: name.trim(),
                needle: needle.trim_start(),
            },
            None => Self {
                name: entry.trim(),
                needle: "",
            },
        }
    }

    /// Whether some value of the header contains the needle.
    ///
    /// An empty needle is satisfied by the header being present at all.
    fn found_in(&self, response: &ProbeResponse) -> bool {
        response
            .header_values(self.name)
            .is_some_and(|values| values.iter().any(|v| v.contains(self.needle)))
    }
}

impl Check {
    /// Evaluate every configured condition of this check against `response`.
    pub fn matches(&self, response: &ProbeResponse) -> bool {
        if let Some(code) = self.status_code {
            if response.status != code {
                return false;
            }
        }

        let body = response.body.as_str();

        if !self.match_all.iter().all(|needle| body.contains(needle.as_str())) {
            return false;
        }

        if !self.match_one.is_empty()
            && !self.match_one.iter().any(|needle| body.contains(needle.as_str()))
        {
            return false;
        }

        if self.no_match.iter().any(|needle| body.contains(needle.as_str())) {
            return false;
        }

        if !self
            .headers
            .iter()
            .all(|entry| HeaderRule::parse(entry).found_in(response))
        {
            return false;
        }

        // `Name:value` rejects only when a value contains the substring;
        // `Name:` or `Name` rejects on mere presence of the header.
        !self
            .no_headers
            .iter()
            .any(|entry| HeaderRule::parse(entry).found_in(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;

    fn check() -> Check {
        Check::new("test", Severity::Low)
    }

    fn ok(body: &str) -> ProbeResponse {
        ProbeResponse::new(200, body)
    }

    #[test]
    fn test_header_rule_parse() {
        assert_eq!(
            HeaderRule::parse("Server:Apache"),
            HeaderRule { name: "Server", needle: "Apache" }
        );
        assert_eq!(
            HeaderRule::parse("Location:https://login"),
            HeaderRule { name: "Location", needle: "https://login" }
        );
        assert_eq!(
            HeaderRule::parse("X-Debug"),
            HeaderRule { name: "X-Debug", needle: "" }
        );
        assert_eq!(
            HeaderRule::parse("X-Debug:"),
            HeaderRule { name: "X-Debug", needle: "" }
        );
    }

    #[test]
    fn test_header_rule_ignores_space_after_colon() {
        assert_eq!(
            HeaderRule::parse("Server: Apache"),
            HeaderRule { name: "Server", needle: "Apache" }
        );
        assert_eq!(
            HeaderRule::parse("X-Debug:  "),
            HeaderRule { name: "X-Debug", needle: "" }
        );

        let response = ok("").with_header("Server", "Apache/2.4.57");
        let mut required = check();
        required.headers = vec!["Server: Apache".to_string()];
        assert!(required.matches(&response));

        let mut forbidden = check();
        forbidden.no_headers = vec!["Server: Apache".to_string()];
        assert!(!forbidden.matches(&response));
    }

    #[test]
    fn test_empty_check_matches_anything() {
        let c = check();
        assert!(c.matches(&ok("")));
        assert!(c.matches(&ProbeResponse::new(500, "boom").with_header("Server", "x")));
        assert!(c.matches(&ProbeResponse::new(404, "not found")));
    }

    #[test]
    fn test_status_code_must_be_equal() {
        let mut c = check();
        c.status_code = Some(200);
        c.match_one = vec!["Login".to_string()];

        assert!(c.matches(&ok("Login")));
        for status in [201, 301, 403, 404, 500] {
            assert!(!c.matches(&ProbeResponse::new(status, "Login")));
        }
    }

    #[test]
    fn test_match_all() {
        let mut c = check();
        c.match_all = vec!["[core]".to_string(), "repositoryformatversion".to_string()];

        assert!(c.matches(&ok("[core]\n\trepositoryformatversion = 0")));
        assert!(!c.matches(&ok("[core]")));
    }

    #[test]
    fn test_match_one() {
        let mut c = check();
        c.match_one = vec!["root:".to_string(), "daemon:".to_string()];

        assert!(c.matches(&ok("daemon:x:1:1")));
        assert!(c.matches(&ok("root:x:0:0")));
        assert!(!c.matches(&ok("nobody")));
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let mut c = check();
        c.match_one = vec!["Login".to_string()];
        assert!(!c.matches(&ok("login")));
    }

    #[test]
    fn test_no_match() {
        let mut c = check();
        c.match_one = vec!["phpinfo".to_string()];
        c.no_match = vec!["Not Found".to_string()];

        assert!(c.matches(&ok("phpinfo()")));
        assert!(!c.matches(&ok("phpinfo Not Found")));
    }

    #[test]
    fn test_required_headers() {
        let mut c = check();
        c.headers = vec!["Server:Apache".to_string()];

        assert!(c.matches(&ok("").with_header("Server", "Apache/2.4.1")));
        assert!(c.matches(&ok("").with_header("server", "Apache/2.4.1")));
        assert!(!c.matches(&ok("").with_header("Server", "nginx")));
        assert!(!c.matches(&ok("")));
    }

    #[test]
    fn test_required_header_any_value() {
        let mut c = check();
        c.headers = vec!["Set-Cookie:JSESSIONID".to_string()];

        let response = ok("")
            .with_header("Set-Cookie", "lang=en")
            .with_header("Set-Cookie", "JSESSIONID=abc");
        assert!(c.matches(&response));
    }

    #[test]
    fn test_required_header_without_colon_needs_presence_only() {
        let mut c = check();
        c.headers = vec!["X-Jenkins".to_string()];

        assert!(c.matches(&ok("").with_header("X-Jenkins", "2.1")));
        assert!(!c.matches(&ok("")));
    }

    #[test]
    fn test_forbidden_header_with_matching_value_fails() {
        let mut c = check();
        c.no_headers = vec!["Server:cloudflare".to_string()];

        assert!(!c.matches(&ok("").with_header("Server", "cloudflare")));
    }

    #[test]
    fn test_forbidden_header_with_other_value_passes() {
        // Value-aware: the header exists but no value contains the substring.
        let mut c = check();
        c.no_headers = vec!["Server:cloudflare".to_string()];

        assert!(c.matches(&ok("").with_header("Server", "nginx")));
        assert!(c.matches(&ok("")));
    }

    #[test]
    fn test_forbidden_header_empty_substring_rejects_presence() {
        let mut c = check();
        c.no_headers = vec!["Strict-Transport-Security:".to_string()];

        assert!(!c.matches(&ok("").with_header("Strict-Transport-Security", "max-age=1")));
        assert!(c.matches(&ok("")));

        c.no_headers = vec!["X-Frame-Options".to_string()];
        assert!(!c.matches(&ok("").with_header("x-frame-options", "DENY")));
        assert!(c.matches(&ok("")));
    }

    #[test]
    fn test_all_conditions_are_conjunctive() {
        let mut c = check();
        c.status_code = Some(200);
        c.match_all = vec!["Jenkins".to_string()];
        c.match_one = vec!["Dashboard".to_string(), "Manage".to_string()];
        c.no_match = vec!["Sign in".to_string()];
        c.headers = vec!["X-Jenkins:".to_string()];
        c.no_headers = vec!["WWW-Authenticate:Basic".to_string()];

        let good = ok("Jenkins Dashboard").with_header("X-Jenkins", "2.400");
        assert!(c.matches(&good));

        assert!(!c.matches(&ok("Jenkins Dashboard")));
        assert!(!c.matches(&ok("Jenkins Dashboard Sign in").with_header("X-Jenkins", "2.400")));
        assert!(!c.matches(
            &good
                .clone()
                .with_header("WWW-Authenticate", "Basic realm=\"x\"")
        ));
    }
}
