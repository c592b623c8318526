//! URL path-parameter binding and payload split.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::method::Method;
use crate::params::Params;

/// A path parameter is a colon followed by letters/underscores, e.g.
/// `/todos/:id`.
static PATH_PARAM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r":([A-Za-z_]+)").expect("path parameter pattern"));

/// Substitute every `:token` in `template` with the identically-named
/// parameter, consuming it from `params`. The first token (in template
/// order) without a parameter fails with [`Error::ParamValidation`] naming
/// the `:token` form.
pub(crate) fn bind_path_params(template: &str, mut params: Params) -> Result<(String, Params)> {
    let mut idents: Vec<&str> = Vec::new();
    for caps in PATH_PARAM.captures_iter(template) {
        let ident = caps.get(1).map_or("", |m| m.as_str());
        if !idents.contains(&ident) {
            idents.push(ident);
        }
    }

    for ident in &idents {
        if !params.contains(ident) {
            return Err(Error::ParamValidation {
                param: format!(":{ident}"),
            });
        }
    }

    let bound = PATH_PARAM
        .replace_all(template, |caps: &Captures<'_>| {
            let ident = caps.get(1).map_or("", |m| m.as_str());
            params
                .get(ident)
                .map(stringify_value)
                // every ident was checked above; leave unknown text alone
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned();

    for ident in idents {
        params.remove(ident);
    }

    Ok((bound, params))
}

/// Leftover parameters become a JSON body on body-carrying methods and
/// stringified query pairs otherwise.
pub(crate) fn split_payload(
    method: Method,
    params: Params,
) -> (Option<Value>, Vec<(String, String)>) {
    if params.is_empty() {
        return (None, Vec::new());
    }
    if method.has_request_body() {
        (Some(Value::Object(params.into_map())), Vec::new())
    } else {
        let query = params
            .into_map()
            .into_iter()
            .map(|(name, value)| {
                let value = stringify_value(&value);
                (name, value)
            })
            .collect();
        (None, query)
    }
}

/// Stringify a parameter for URL use: strings stay unquoted, everything
/// else renders as JSON.
fn stringify_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params;

    #[test]
    fn test_binds_and_consumes_path_params() {
        let (path, rest) = bind_path_params("/todos/:id", params! { id = 7, value = "a" }).unwrap();
        assert_eq!(path, "/todos/7");
        assert!(!rest.contains("id"));
        assert!(rest.contains("value"));
    }

    #[test]
    fn test_missing_path_param_is_named_with_colon() {
        let err = bind_path_params("/todos/:id", params! { value = "a" }).unwrap_err();
        match err {
            Error::ParamValidation { param } => assert_eq!(param, ":id"),
            other => panic!("expected ParamValidation, got {other:?}"),
        }
    }

    #[test]
    fn test_multiple_tokens_bind_in_order() {
        let (path, rest) = bind_path_params(
            "/users/:user_id/posts/:post_id",
            params! { user_id = 1, post_id = 2 },
        )
        .unwrap();
        assert_eq!(path, "/users/1/posts/2");
        assert!(rest.is_empty());
    }

    #[test]
    fn test_first_missing_token_reported_in_template_order() {
        let err =
            bind_path_params("/users/:user_id/posts/:post_id", params! { post_id = 2 }).unwrap_err();
        match err {
            Error::ParamValidation { param } => assert_eq!(param, ":user_id"),
            other => panic!("expected ParamValidation, got {other:?}"),
        }
    }

    #[test]
    fn test_repeated_token_binds_everywhere() {
        let (path, rest) = bind_path_params("/:v/compare/:v", params! { v = "x" }).unwrap();
        assert_eq!(path, "/x/compare/x");
        assert!(rest.is_empty());
    }

    #[test]
    fn test_prefix_overlapping_tokens_stay_distinct() {
        let (path, _) =
            bind_path_params("/a/:id/b/:idx", params! { id = 1, idx = 2 }).unwrap();
        assert_eq!(path, "/a/1/b/2");
    }

    #[test]
    fn test_template_without_tokens_passes_through() {
        let (path, rest) = bind_path_params("/todos", params! { q = "x" }).unwrap();
        assert_eq!(path, "/todos");
        assert_eq!(rest.len(), 1);
    }

    #[test]
    fn test_non_string_values_stringify() {
        let (path, _) = bind_path_params("/flags/:on/:rate", params! { on = true, rate = 2.5 })
            .unwrap();
        assert_eq!(path, "/flags/true/2.5");
    }

    #[test]
    fn test_split_payload_body_for_write_methods() {
        for method in [Method::Post, Method::Put, Method::Patch] {
            let (body, query) = split_payload(method, params! { value = "a", count = 2 });
            let body = body.unwrap();
            assert_eq!(body["value"], "a");
            assert_eq!(body["count"], 2);
            assert!(query.is_empty());
        }
    }

    #[test]
    fn test_split_payload_query_for_read_methods() {
        for method in [Method::Get, Method::Delete, Method::Head] {
            let (body, query) = split_payload(method, params! { q = "milk", page = 3 });
            assert!(body.is_none());
            assert!(query.contains(&("q".to_string(), "milk".to_string())));
            assert!(query.contains(&("page".to_string(), "3".to_string())));
        }
    }

    #[test]
    fn test_split_payload_empty_params() {
        let (body, query) = split_payload(Method::Post, Params::new());
        assert!(body.is_none());
        assert!(query.is_empty());
    }
}
