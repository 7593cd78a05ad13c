//! The result of a successful match, and its conversion into caller types.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::routing::matcher::Bindings;

/// A matched deeplink: the route name plus its bound parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deeplink {
    /// Name of the route that matched.
    pub route: String,
    /// Bound parameters, including declared ones that resolved to no value.
    pub parameters: Bindings,
}

impl Deeplink {
    pub fn new(route: impl Into<String>, parameters: Bindings) -> Self {
        Self {
            route: route.into(),
            parameters,
        }
    }

    /// Value of a parameter, if it was bound to one.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).and_then(|v| v.as_deref())
    }

    /// Whether the parameter was bound at all, with or without a value.
    pub fn contains(&self, name: &str) -> bool {
        self.parameters.contains_key(name)
    }

    pub fn is(&self, route: &str) -> bool {
        self.route == route
    }

    /// Convert the bindings into a caller-defined struct.
    ///
    /// Each parameter becomes a JSON string, or `null` when it has no value, so
    /// `Option<String>` fields line up with optional parameters.
    ///
    /// ```
    /// use deeplink_router::{DeeplinkRouter, RouteDeclaration, RouteTable};
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct Payment {
    ///     #[serde(rename = "paymentId")]
    ///     payment_id: String,
    /// }
    ///
    /// let table = RouteTable::build(
    ///     ["https"],
    ///     ["example.com"],
    ///     [RouteDeclaration::new("payment", "/{paymentId}").param("paymentId")],
    /// )
    /// .unwrap();
    /// let router = DeeplinkRouter::new(table);
    /// let link = router.resolve("https://example.com/123").unwrap();
    /// let payment: Payment = link.parameters_as().unwrap();
    /// assert_eq!(payment.payment_id, "123");
    /// ```
    pub fn parameters_as<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        let object: Map<String, Value> = self
            .parameters
            .iter()
            .map(|(name, value)| {
                let value = value.clone().map_or(Value::Null, Value::String);
                (name.clone(), value)
            })
            .collect();
        serde_json::from_value(Value::Object(object))
    }
}
