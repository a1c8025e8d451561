//! Integration tests for keylink API endpoints.
//!
//! These tests verify the HTTP API behavior and data structures
//! used by the API without requiring database connections.

use serde_json::json;

/// Test module for request/response types
mod type_tests {
    use super::*;

    #[test]
    fn test_create_link_request_serialization() {
        let request = json!({
            "target_url": "https://example.com"
        });

        assert_eq!(request["target_url"], "https://example.com");
    }

    #[test]
    fn test_create_link_response_format() {
        let response = json!({
            "key": "Vq3abc",
            "short_url": "http://localhost:3000/Vq3abc",
            "secret_key": "e4X9m2kQ7tR5wY8nB3cF6hJ1pL4sD7gZ",
            "admin_url": "http://localhost:3000/admin/e4X9m2kQ7tR5wY8nB3cF6hJ1pL4sD7gZ",
            "target_url": "https://example.com"
        });

        assert_eq!(response["key"], "Vq3abc");
        assert!(response["short_url"]
            .as_str()
            .unwrap()
            .ends_with(response["key"].as_str().unwrap()));
        assert!(response["admin_url"]
            .as_str()
            .unwrap()
            .contains("/admin/"));
    }

    #[test]
    fn test_error_response_format() {
        let error = json!({
            "error": "NOT_FOUND",
            "message": "Link not found: abc123"
        });

        assert_eq!(error["error"], "NOT_FOUND");
        assert!(error["message"].as_str().unwrap().contains("abc123"));
    }

    #[test]
    fn test_admin_response_format() {
        let admin = json!({
            "key": "Vq3abc",
            "short_url": "http://localhost:3000/Vq3abc",
            "admin_url": "http://localhost:3000/admin/e4X9m2kQ7tR5wY8nB3cF6hJ1pL4sD7gZ",
            "target_url": "https://example.com",
            "is_active": true,
            "clicks": 42,
            "created_at": "2024-01-01T00:00:00Z",
            "last_clicked_at": "2024-01-15T12:30:00Z"
        });

        assert_eq!(admin["clicks"], 42);
        assert_eq!(admin["is_active"], true);
        assert_eq!(admin["target_url"], "https://example.com");
    }

    #[test]
    fn test_deactivate_response_format() {
        let response = json!({
            "detail": "Deactivated short link for 'https://example.com'",
            "link": {
                "key": "Vq3abc",
                "is_active": false,
                "clicks": 42
            }
        });

        assert!(response["detail"].as_str().unwrap().contains("Deactivated"));
        assert_eq!(response["link"]["is_active"], false);
        // Deactivation must not touch the counter
        assert_eq!(response["link"]["clicks"], 42);
    }

    #[test]
    fn test_stats_output_format() {
        let stats = json!({
            "total_links": 100,
            "total_clicks": 1500,
            "active_links": 95,
            "inactive_links": 5
        });

        assert_eq!(stats["total_links"], 100);
        assert_eq!(
            stats["active_links"].as_i64().unwrap() + stats["inactive_links"].as_i64().unwrap(),
            stats["total_links"].as_i64().unwrap()
        );
    }
}

/// Test module for key and URL validation logic
mod validation_tests {
    const AMBIGUOUS: &[char] = &['0', 'O', '1', 'l', 'I'];

    fn is_valid_key(key: &str) -> bool {
        // Public keys are 5-8 characters from the unambiguous alphabet
        key.len() >= 5
            && key.len() <= 8
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() && !AMBIGUOUS.contains(&c))
    }

    #[test]
    fn test_valid_keys() {
        assert!(is_valid_key("abc23"));
        assert!(is_valid_key("VqXyz2"));
        assert!(is_valid_key("Test2345"));
    }

    #[test]
    fn test_invalid_keys_too_short() {
        assert!(!is_valid_key("abcd"));
        assert!(!is_valid_key("ab"));
        assert!(!is_valid_key("a"));
    }

    #[test]
    fn test_invalid_keys_too_long() {
        assert!(!is_valid_key("abcdefghj")); // 9 chars
    }

    #[test]
    fn test_invalid_keys_ambiguous_chars() {
        assert!(!is_valid_key("abc0d"));
        assert!(!is_valid_key("abcO5"));
        assert!(!is_valid_key("abc1d"));
        assert!(!is_valid_key("abcld"));
        assert!(!is_valid_key("abcId"));
    }

    #[test]
    fn test_invalid_keys_special_chars() {
        assert!(!is_valid_key("abc-23"));
        assert!(!is_valid_key("abc_23"));
        assert!(!is_valid_key("abc.23"));
    }

    fn is_valid_url(url: &str) -> bool {
        url.starts_with("http://") || url.starts_with("https://")
    }

    #[test]
    fn test_valid_urls() {
        assert!(is_valid_url("https://example.com"));
        assert!(is_valid_url("http://localhost:3000"));
        assert!(is_valid_url("https://sub.domain.com/path?query=1"));
    }

    #[test]
    fn test_invalid_urls() {
        assert!(!is_valid_url("ftp://example.com"));
        assert!(!is_valid_url("example.com"));
        assert!(!is_valid_url("javascript:alert(1)"));
        assert!(!is_valid_url("not a url"));
        assert!(!is_valid_url(""));
    }

    #[test]
    fn test_secret_key_longer_than_public_key() {
        let key = "Vq3abc";
        let secret = "e4X9m2kQ7tR5wY8nB3cF6hJ1pL4sD7gZ";
        assert!(secret.len() >= 4 * key.len());
    }
}

/// Test module for error types
mod error_tests {
    use axum::http::StatusCode;

    #[test]
    fn test_error_codes() {
        let error_codes = vec![
            "NOT_FOUND",
            "INVALID_URL",
            "GENERATION_EXHAUSTED",
            "DATABASE_ERROR",
            "CACHE_ERROR",
            "INTERNAL_ERROR",
        ];

        // Verify all expected error codes are valid strings
        for code in error_codes {
            assert!(!code.is_empty());
            assert!(code.chars().all(|c| c.is_ascii_uppercase() || c == '_'));
        }
    }

    #[test]
    fn test_http_status_codes() {
        // NOT_FOUND -> 404
        assert_eq!(StatusCode::NOT_FOUND.as_u16(), 404);
        // INVALID_URL -> 400
        assert_eq!(StatusCode::BAD_REQUEST.as_u16(), 400);
        // GENERATION_EXHAUSTED -> 500
        assert_eq!(StatusCode::INTERNAL_SERVER_ERROR.as_u16(), 500);
        // Successful creation -> 201
        assert_eq!(StatusCode::CREATED.as_u16(), 201);
        // Redirect -> 307, never the cacheable 308
        assert_eq!(StatusCode::TEMPORARY_REDIRECT.as_u16(), 307);
    }
}

/// Test module for rate limiting configuration
mod rate_limit_tests {

    #[test]
    fn test_rate_limit_calculation() {
        let requests_per_minute = 60u32;
        let milliseconds_per_request = 60000 / requests_per_minute;
        assert_eq!(milliseconds_per_request, 1000);
    }

    #[test]
    fn test_burst_size_scaling() {
        let base_burst = 5u32;
        let lenient_burst = base_burst * 2;
        assert_eq!(lenient_burst, 10);
    }
}

/// Test module for the record lifecycle
mod lifecycle_tests {
    #[derive(Debug, Clone, Copy, PartialEq)]
    enum LinkState {
        Active,
        Inactive,
    }

    fn deactivate(state: LinkState) -> LinkState {
        // Terminal transition, idempotent, no reactivation path
        match state {
            LinkState::Active | LinkState::Inactive => LinkState::Inactive,
        }
    }

    #[test]
    fn test_deactivation_is_terminal() {
        let state = deactivate(LinkState::Active);
        assert_eq!(state, LinkState::Inactive);
    }

    #[test]
    fn test_deactivation_is_idempotent() {
        let once = deactivate(LinkState::Active);
        let twice = deactivate(once);
        assert_eq!(once, twice);
    }
}
