//! HTTP method enumeration and validation.
//!
//! # Responsibilities
//! - Define the closed set of methods routes may declare
//! - Normalize any accepted textual spelling to its canonical tag
//! - Case-insensitive equality between tags and plain strings
//!
//! # Design Decisions
//! - Closed enum rather than free-form strings: an invalid method is a
//!   registration-time error, never a runtime surprise
//! - Equality on the canonical tag; `PartialEq<str>` covers the string form

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// The set of valid HTTP methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    // Most commonly used for REST APIs
    Get,
    Post,
    Put,
    Patch,
    Delete,

    // Less frequently used in REST APIs
    Options,
    Head,
    Connect,
    Trace,
}

impl Method {
    /// Every canonical method, in declaration order.
    pub const ALL: [Method; 9] = [
        Method::Get,
        Method::Post,
        Method::Put,
        Method::Patch,
        Method::Delete,
        Method::Options,
        Method::Head,
        Method::Connect,
        Method::Trace,
    ];

    /// Parse a method from any case spelling. Returns `None` for anything
    /// outside the canonical set.
    pub fn parse(method: &str) -> Option<Self> {
        match method.to_ascii_uppercase().as_str() {
            "GET" => Some(Self::Get),
            "POST" => Some(Self::Post),
            "PUT" => Some(Self::Put),
            "PATCH" => Some(Self::Patch),
            "DELETE" => Some(Self::Delete),
            "OPTIONS" => Some(Self::Options),
            "HEAD" => Some(Self::Head),
            "CONNECT" => Some(Self::Connect),
            "TRACE" => Some(Self::Trace),
            _ => None,
        }
    }

    /// Normalize a spelling to its canonical tag, failing with
    /// [`Error::NotImplemented`] naming the offending value.
    pub fn validate(method: &str) -> Result<Self, Error> {
        Self::parse(method)
            .ok_or_else(|| Error::NotImplemented(format!("method {method:?} is not valid")))
    }

    /// Canonical uppercase spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
            Self::Head => "HEAD",
            Self::Connect => "CONNECT",
            Self::Trace => "TRACE",
        }
    }

    /// True for the methods that carry a structured request body
    /// (leftover call parameters become the body instead of the query string).
    pub fn has_request_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }

    /// Lowercase comma-separated listing of every method, used in builder
    /// error messages.
    pub(crate) fn lowercase_list() -> String {
        Self::ALL
            .iter()
            .map(|m| m.as_str().to_ascii_lowercase())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::validate(s)
    }
}

impl PartialEq<str> for Method {
    fn eq(&self, other: &str) -> bool {
        other.eq_ignore_ascii_case(self.as_str())
    }
}

impl PartialEq<&str> for Method {
    fn eq(&self, other: &&str) -> bool {
        other.eq_ignore_ascii_case(self.as_str())
    }
}

impl PartialEq<Method> for str {
    fn eq(&self, other: &Method) -> bool {
        self.eq_ignore_ascii_case(other.as_str())
    }
}

impl PartialEq<Method> for &str {
    fn eq(&self, other: &Method) -> bool {
        self.eq_ignore_ascii_case(other.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive_for_all_methods() {
        for method in Method::ALL {
            let upper = method.as_str();
            let lower = upper.to_ascii_lowercase();
            let mixed: String = upper
                .chars()
                .enumerate()
                .map(|(i, c)| {
                    if i % 2 == 0 {
                        c.to_ascii_lowercase()
                    } else {
                        c
                    }
                })
                .collect();

            assert_eq!(Method::parse(upper), Some(method));
            assert_eq!(Method::parse(&lower), Some(method));
            assert_eq!(Method::parse(&mixed), Some(method));
        }
    }

    #[test]
    fn test_tag_equals_plain_spelling() {
        for method in Method::ALL {
            assert_eq!(method, method.as_str());
            assert_eq!(method, method.as_str().to_ascii_lowercase().as_str());
            assert_eq!(method.as_str(), method);
        }
        assert_ne!(Method::Get, "POST");
    }

    #[test]
    fn test_validate_rejects_unknown_spelling() {
        let err = Method::validate("FETCH").unwrap_err();
        match err {
            Error::NotImplemented(message) => assert!(message.contains("FETCH")),
            other => panic!("expected NotImplemented, got {other:?}"),
        }
    }

    #[test]
    fn test_body_methods() {
        assert!(Method::Post.has_request_body());
        assert!(Method::Put.has_request_body());
        assert!(Method::Patch.has_request_body());
        assert!(!Method::Get.has_request_body());
        assert!(!Method::Delete.has_request_body());
    }

    #[test]
    fn test_lowercase_list_mentions_every_method() {
        let listing = Method::lowercase_list();
        for method in Method::ALL {
            assert!(listing.contains(&method.as_str().to_ascii_lowercase()));
        }
    }
}
