use std::collections::BTreeMap;

use percent_encoding::percent_decode_str;
use url::form_urlencoded;

/// A requested in-app location: normalized path plus decoded query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub query: BTreeMap<String, String>,
}

impl Location {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let raw = raw.split('#').next().unwrap_or_default();
        let (path, query) = raw.split_once('?').unwrap_or((raw, ""));
        Self {
            path: normalize_path(path),
            query: form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
        }
    }

    pub fn with_query(path: &str, key: &str, value: &str) -> Self {
        let mut location = Self::parse(path);
        location.query.insert(key.to_string(), value.to_string());
        location
    }

    pub fn full_path(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.query)
            .finish();
        format!("{}?{query}", self.path)
    }
}

/// Leading slash, no trailing slash, no empty segments.
fn normalize_path(path: &str) -> String {
    let segments: Vec<&str> = path.trim().split('/').filter(|s| !s.is_empty()).collect();
    format!("/{}", segments.join("/"))
}

/// Matches `path` against a route pattern such as `/department/:departmentId`.
/// `*` matches anything.
pub(crate) fn match_pattern(pattern: &str, path: &str) -> Option<BTreeMap<String, String>> {
    let mut params = BTreeMap::new();
    if pattern == "*" {
        return Some(params);
    }

    let expected: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    let actual: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if expected.len() != actual.len() {
        return None;
    }

    for (want, got) in expected.iter().zip(actual.iter()) {
        if let Some(name) = want.strip_prefix(':') {
            let value = percent_decode_str(got).decode_utf8_lossy();
            params.insert(name.to_string(), value.into_owned());
        } else if want != got {
            return None;
        }
    }
    Some(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_path_and_decoded_query() {
        let location = Location::parse("/login?redirect=%2Fdepartment%2F7&m=hi#top");
        assert_eq!(location.path, "/login");
        assert_eq!(
            location.query.get("redirect").map(String::as_str),
            Some("/department/7")
        );
        assert_eq!(location.query.get("m").map(String::as_str), Some("hi"));
    }

    #[test]
    fn normalizes_trailing_and_missing_slashes() {
        assert_eq!(Location::parse("").path, "/");
        assert_eq!(Location::parse("/home/").path, "/home");
        assert_eq!(Location::parse("lists").path, "/lists");
        assert_eq!(Location::parse("//department///7//").path, "/department/7");
    }

    #[test]
    fn full_path_round_trips_query() {
        let location = Location::with_query("/login", "redirect", "/lists");
        assert_eq!(Location::parse(&location.full_path()), location);
    }

    #[test]
    fn pattern_captures_params() {
        let params = match_pattern("/department/:departmentId", "/department/42").expect("match");
        assert_eq!(params.get("departmentId").map(String::as_str), Some("42"));
        assert!(match_pattern("/department/:departmentId", "/department").is_none());
        assert!(match_pattern("/departments", "/department/42").is_none());
        assert!(match_pattern("*", "/anything/at/all").is_some());
    }

    #[test]
    fn pattern_decodes_captured_params() {
        let params =
            match_pattern("/department/:departmentId", "/department/a%20b%2Fc").expect("match");
        assert_eq!(
            params.get("departmentId").map(String::as_str),
            Some("a b/c")
        );
    }
}
