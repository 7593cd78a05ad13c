//! Shared fixtures for integration tests.

use deeplink_router::{DeeplinkRouter, RouteDeclaration, RouteTable};

/// The example deeplink root: two schemas, two default hosts, five routes.
pub fn example_declarations() -> Vec<RouteDeclaration> {
    vec![
        RouteDeclaration::new("example1", "/example1"),
        RouteDeclaration::new("example2", "/example2"),
        RouteDeclaration::new("example3", "/example3/{id}/details/{name}")
            .param("id")
            .param("name"),
        RouteDeclaration::new(
            "example4",
            "/{locale}/example4?name={name}&surname={surname}&address={address}",
        )
        .param("locale")
        .param("name")
        .param("surname")
        .param("address"),
        RouteDeclaration::new("example5", "/{paymentId}")
            .with_hosts(["pay.example.com"])
            .param("paymentId"),
    ]
}

pub fn example_table() -> RouteTable {
    RouteTable::build(
        ["https", "example"],
        ["example.com", "www.example.com"],
        example_declarations(),
    )
    .unwrap()
}

pub fn example_router() -> DeeplinkRouter {
    DeeplinkRouter::new(example_table())
}

/// Route file equivalent to [`example_declarations`].
#[allow(dead_code)]
pub const EXAMPLE_ROUTES_TOML: &str = r#"
schemas = ["https", "example"]
default_hosts = ["example.com", "www.example.com"]

[[routes]]
name = "example1"
path = "/example1"

[[routes]]
name = "example2"
path = "/example2"

[[routes]]
name = "example3"
path = "/example3/{id}/details/{name}"
parameters = [{ name = "id" }, { name = "name" }]

[[routes]]
name = "example4"
path = "/{locale}/example4?name={name}&surname={surname}&address={address}"
parameters = [{ name = "locale" }, { name = "name" }, { name = "surname" }, { name = "address" }]

[[routes]]
name = "example5"
path = "/{paymentId}"
hosts = ["pay.example.com"]
parameters = [{ name = "paymentId" }]
"#;
