//! Route file loading and hot reload.

use std::sync::Arc;

use deeplink_router::config::watcher::reload;
use deeplink_router::config::{parse_config, ConfigError};
use deeplink_router::{ConfigurationError, DeeplinkRouter, SharedRouter};

mod common;

#[test]
fn test_route_file_matches_code_declarations() {
    let config = parse_config(common::EXAMPLE_ROUTES_TOML).unwrap();
    assert_eq!(config.declarations(), common::example_declarations());

    let from_file = DeeplinkRouter::from_config(&config).unwrap();
    let from_code = common::example_router();

    for url in [
        "https://example.com/example1",
        "https://example.com/example3/123/details/John",
        "https://example.com/en/example4?name=John&surname=Doe&address=123%20Main%20St",
        "https://pay.example.com/123",
        "https://example.com/123",
        "not a url",
    ] {
        assert_eq!(from_file.resolve(url), from_code.resolve(url), "{}", url);
    }
}

#[test]
fn test_optional_parameter_from_file() {
    let config = parse_config(
        r#"
        schemas = ["myapp"]
        default_hosts = ["open"]

        [[routes]]
        name = "profile"
        path = "/profile/{userId}?tab={tab}"
        parameters = [{ name = "userId" }, { name = "tab", optional = true }]
        "#,
    )
    .unwrap();
    let router = DeeplinkRouter::from_config(&config).unwrap();

    let link = router.resolve("myapp://open/profile/42").unwrap();
    assert_eq!(link.get("userId"), Some("42"));
    assert!(link.contains("tab"));
    assert_eq!(link.get("tab"), None);

    let link = router.resolve("myapp://open/profile/42?tab=posts").unwrap();
    assert_eq!(link.get("tab"), Some("posts"));
}

#[test]
fn test_invalid_route_file_is_rejected_eagerly() {
    let err = parse_config(
        r#"
        schemas = ["https"]

        [[routes]]
        name = "users"
        path = "/users/{}"
        hosts = ["example.com"]

        [[routes]]
        name = "orphan"
        path = "/orphan"
        "#,
    )
    .unwrap_err();

    match err {
        ConfigError::Validation(errors) => {
            assert_eq!(errors.len(), 2);
            assert!(matches!(errors[0], ConfigurationError::Template { .. }));
            assert_eq!(errors[1], ConfigurationError::NoHosts("orphan".into()));
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_reload_swaps_table_for_readers() {
    let path = std::env::temp_dir().join("deeplink_router_route_file_test.toml");
    std::fs::write(&path, common::EXAMPLE_ROUTES_TOML).unwrap();

    let shared = Arc::new(SharedRouter::from(common::example_router()));
    let snapshot = shared.load();

    let updated = common::EXAMPLE_ROUTES_TOML.replace("/example1", "/welcome");
    std::fs::write(&path, updated).unwrap();
    reload(&path, &shared).unwrap();

    assert_eq!(shared.resolve("https://example.com/welcome").unwrap().route, "example1");
    assert!(shared.resolve("https://example.com/example1").is_none());
    assert_eq!(snapshot.resolve("https://example.com/example1").unwrap().route, "example1");

    std::fs::remove_file(&path).unwrap_or_default();
}
