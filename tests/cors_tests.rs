use corslet::middleware::{CorsMiddleware, CorsMiddlewareBuilder, Middleware};
use corslet::pipeline::{HandlerRequest, HandlerResponse, HeaderVec};
use http::Method;
use std::sync::Arc;
use std::time::Duration;

// Helper function to create a test HandlerRequest
fn create_test_request(method: Method, path: &str, headers: HeaderVec) -> HandlerRequest {
    HandlerRequest::new(method, path, "test_handler", headers, None)
}

// Helper function to create a test HandlerResponse
fn create_test_response(status: u16) -> HandlerResponse {
    HandlerResponse::new(status, HeaderVec::new(), serde_json::Value::Null)
}

fn origin_headers(origin: &str) -> HeaderVec {
    let mut headers = HeaderVec::new();
    headers.push((Arc::from("origin"), origin.to_string()));
    headers
}

#[test]
fn test_no_origin_passes_through_untouched() {
    let mw = CorsMiddleware::default();

    let req = create_test_request(Method::GET, "/", HeaderVec::new());
    assert!(mw.before(&req).is_none());

    let mut resp = create_test_response(200);
    mw.after(&req, &mut resp, Duration::from_millis(0));
    assert!(resp.headers.is_empty());
}

#[test]
fn test_options_without_origin_is_not_a_preflight() {
    let mw = CorsMiddleware::default();

    // No Origin header means no CORS request, even for OPTIONS: the chain
    // continues to the handler and no CORS header is set.
    let req = create_test_request(Method::OPTIONS, "/", HeaderVec::new());
    assert!(mw.before(&req).is_none());

    let mut resp = create_test_response(200);
    mw.after(&req, &mut resp, Duration::from_millis(0));
    assert!(resp.headers.is_empty());
}

#[test]
fn test_empty_origin_is_treated_as_absent() {
    let mw = CorsMiddleware::default();

    let req = create_test_request(Method::OPTIONS, "/", origin_headers(""));
    assert!(mw.before(&req).is_none());

    let mut resp = create_test_response(200);
    mw.after(&req, &mut resp, Duration::from_millis(0));
    assert!(resp.headers.is_empty());
}

#[test]
fn test_wildcard_echoes_request_origin() {
    let mw = CorsMiddleware::default();

    let req = create_test_request(Method::GET, "/", origin_headers("https://example.com"));
    assert!(mw.before(&req).is_none());

    let mut resp = create_test_response(200);
    mw.after(&req, &mut resp, Duration::from_millis(0));

    // The wildcard rule matches, but the header echoes the request's Origin
    // value, never the "*" literal.
    assert_eq!(
        resp.get_header("access-control-allow-origin"),
        Some("https://example.com")
    );
    assert_eq!(resp.get_header("access-control-expose-headers"), Some("*"));
    assert_eq!(
        resp.get_header("access-control-allow-credentials"),
        Some("true")
    );
    // Preflight-only headers never appear on simple requests
    assert_eq!(resp.get_header("access-control-allow-methods"), None);
    assert_eq!(resp.get_header("access-control-allow-headers"), None);
    assert_eq!(resp.get_header("access-control-max-age"), None);
}

#[test]
fn test_preflight_default_config() {
    let mw = CorsMiddleware::default();

    let req = create_test_request(Method::OPTIONS, "/", origin_headers("https://example.com"));
    let mut resp = mw.before(&req).expect("preflight should short-circuit");
    assert_eq!(resp.status, 204);
    assert_eq!(
        resp.get_header("access-control-allow-methods"),
        Some("GET,POST,PUT,DELETE")
    );
    assert_eq!(resp.get_header("access-control-allow-headers"), Some("*"));
    assert_eq!(resp.get_header("access-control-max-age"), Some("3600"));

    // The pipeline runs after() on short-circuited responses too
    mw.after(&req, &mut resp, Duration::from_millis(0));
    assert_eq!(
        resp.get_header("access-control-allow-origin"),
        Some("https://example.com")
    );
    assert_eq!(resp.get_header("access-control-expose-headers"), Some("*"));
    assert_eq!(
        resp.get_header("access-control-allow-credentials"),
        Some("true")
    );
}

#[test]
fn test_preflight_custom_config() {
    let mw = CorsMiddlewareBuilder::new()
        .allowed_origins(&["https://example.com"])
        .allowed_methods(&[Method::GET, Method::POST])
        .allowed_headers(&["Foo", "Bar"])
        .expose_headers(&["Foo", "Bar"])
        .max_age(1000)
        .allow_credentials(true)
        .build();

    let req = create_test_request(Method::OPTIONS, "/", origin_headers("https://example.com"));
    let mut resp = mw.before(&req).expect("preflight should short-circuit");
    mw.after(&req, &mut resp, Duration::from_millis(0));

    assert_eq!(resp.status, 204);
    assert_eq!(
        resp.get_header("access-control-allow-origin"),
        Some("https://example.com")
    );
    assert_eq!(
        resp.get_header("access-control-allow-credentials"),
        Some("true")
    );
    assert_eq!(
        resp.get_header("access-control-expose-headers"),
        Some("Foo,Bar")
    );
    assert_eq!(
        resp.get_header("access-control-allow-methods"),
        Some("GET,POST")
    );
    assert_eq!(
        resp.get_header("access-control-allow-headers"),
        Some("Foo,Bar")
    );
    assert_eq!(resp.get_header("access-control-max-age"), Some("1000"));
}

#[test]
fn test_preflight_with_unmatched_origin_still_short_circuits() {
    let mw = CorsMiddlewareBuilder::new()
        .allowed_origins(&["https://a.example"])
        .build();

    let req = create_test_request(Method::OPTIONS, "/", origin_headers("https://b.example"));
    let mut resp = mw.before(&req).expect("preflight should short-circuit");
    mw.after(&req, &mut resp, Duration::from_millis(0));

    // Origin mismatch suppresses only the origin/credentials/expose trio;
    // the preflight set and the 204 are emitted regardless.
    assert_eq!(resp.status, 204);
    assert!(resp.get_header("access-control-allow-methods").is_some());
    assert!(resp.get_header("access-control-allow-headers").is_some());
    assert!(resp.get_header("access-control-max-age").is_some());
    assert_eq!(resp.get_header("access-control-allow-origin"), None);
    assert_eq!(resp.get_header("access-control-allow-credentials"), None);
    assert_eq!(resp.get_header("access-control-expose-headers"), None);
}

#[test]
fn test_simple_request_with_unmatched_origin() {
    let mw = CorsMiddlewareBuilder::new()
        .allowed_origins(&["https://a.example"])
        .build();

    let req = create_test_request(Method::GET, "/", origin_headers("https://b.example"));
    assert!(mw.before(&req).is_none());

    let mut resp = create_test_response(200);
    mw.after(&req, &mut resp, Duration::from_millis(0));
    assert!(resp.headers.is_empty());
}

#[test]
fn test_credentials_false_serialized_literally() {
    let mw = CorsMiddlewareBuilder::new()
        .allowed_origins(&["https://example.com"])
        .allow_credentials(false)
        .build();

    let req = create_test_request(Method::GET, "/", origin_headers("https://example.com"));
    let mut resp = create_test_response(200);
    mw.after(&req, &mut resp, Duration::from_millis(0));

    // The header is always set for matched origins, as the literal string
    assert_eq!(
        resp.get_header("access-control-allow-credentials"),
        Some("false")
    );
}

#[test]
fn test_origin_match_is_case_sensitive() {
    let mw = CorsMiddlewareBuilder::new()
        .allowed_origins(&["https://Example.com"])
        .build();

    let req = create_test_request(Method::GET, "/", origin_headers("https://example.com"));
    let mut resp = create_test_response(200);
    mw.after(&req, &mut resp, Duration::from_millis(0));
    assert_eq!(resp.get_header("access-control-allow-origin"), None);
}

#[test]
fn test_duplicate_origin_entries_are_idempotent() {
    let mw = CorsMiddlewareBuilder::new()
        .allowed_origins(&["https://example.com", "https://example.com"])
        .build();

    let req = create_test_request(Method::GET, "/", origin_headers("https://example.com"));
    let mut resp = create_test_response(200);
    mw.after(&req, &mut resp, Duration::from_millis(0));

    let occurrences = resp
        .headers
        .iter()
        .filter(|(k, _)| k.eq_ignore_ascii_case("access-control-allow-origin"))
        .count();
    assert_eq!(occurrences, 1);
    assert_eq!(
        resp.get_header("access-control-allow-origin"),
        Some("https://example.com")
    );
}

#[test]
fn test_empty_lists_and_negative_max_age_pass_through() {
    // No validation: empty sequences serialize to empty header values and a
    // negative max age is emitted verbatim.
    let mw = CorsMiddleware::new(vec![], vec![], vec![], false, vec![], -5);

    let req = create_test_request(Method::OPTIONS, "/", origin_headers("https://example.com"));
    let mut resp = mw.before(&req).expect("preflight should short-circuit");
    mw.after(&req, &mut resp, Duration::from_millis(0));

    assert_eq!(resp.status, 204);
    assert_eq!(resp.get_header("access-control-allow-methods"), Some(""));
    assert_eq!(resp.get_header("access-control-allow-headers"), Some(""));
    assert_eq!(resp.get_header("access-control-max-age"), Some("-5"));
    // Empty origins list matches nothing
    assert_eq!(resp.get_header("access-control-allow-origin"), None);
}

#[test]
fn test_default_matches_unconfigured_builder() {
    let from_default = CorsMiddleware::default();
    let from_builder = CorsMiddlewareBuilder::new().build();

    let req = create_test_request(Method::OPTIONS, "/", origin_headers("https://example.com"));
    for mw in [&from_default, &from_builder] {
        let mut resp = mw.before(&req).expect("preflight should short-circuit");
        mw.after(&req, &mut resp, Duration::from_millis(0));
        assert_eq!(resp.status, 204);
        assert_eq!(
            resp.get_header("access-control-allow-methods"),
            Some("GET,POST,PUT,DELETE")
        );
        assert_eq!(resp.get_header("access-control-allow-headers"), Some("*"));
        assert_eq!(resp.get_header("access-control-max-age"), Some("3600"));
        assert_eq!(
            resp.get_header("access-control-allow-origin"),
            Some("https://example.com")
        );
        assert_eq!(resp.get_header("access-control-expose-headers"), Some("*"));
        assert_eq!(
            resp.get_header("access-control-allow-credentials"),
            Some("true")
        );
    }
}
