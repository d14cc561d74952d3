//! Route records and identity keys
//!
//! A [`Route`] is one source's claim on a target: who sends, where to, what
//! content, and at which priority. A [`RouteKey`] is the `(from, to)` pair
//! that identifies a route when closing it.

use std::collections::BTreeMap;

/// Identity of a route: source name plus target name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteKey {
    /// Source name (e.g., "header-portal")
    pub from: String,
    /// Target name (e.g., "modal-outlet")
    pub to: String,
}

impl RouteKey {
    /// Create a new route key
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl std::fmt::Display for RouteKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Content routed from one source to one target
///
/// `passengers` is opaque to the registry. Everything besides `from`, `to`
/// and `order` is carried through verbatim and never inspected.
#[derive(Debug, Clone, PartialEq)]
pub struct Route<P> {
    /// Source name
    pub from: String,
    /// Target name
    pub to: String,
    /// Payload delivered to the target
    pub passengers: P,
    /// Display priority; `None` sorts before every explicit order
    pub order: Option<i64>,
    /// CSS-like classes requested by the source
    pub class: Vec<String>,
    /// Additional caller-supplied fields
    pub attrs: BTreeMap<String, String>,
}

impl<P> Route<P> {
    /// Create a route with no order, classes or attributes
    pub fn new(from: impl Into<String>, to: impl Into<String>, passengers: P) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            passengers,
            order: None,
            class: Vec::new(),
            attrs: BTreeMap::new(),
        }
    }

    /// Set the display order
    pub fn order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }

    /// Set the display order, clearing it when `None`
    pub fn maybe_order(mut self, order: Option<i64>) -> Self {
        self.order = order;
        self
    }

    /// Set the classes
    pub fn class<I, S>(mut self, class: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.class = class.into_iter().map(Into::into).collect();
        self
    }

    /// Add a pass-through attribute
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// The `(from, to)` identity of this route
    pub fn key(&self) -> RouteKey {
        RouteKey::new(self.from.clone(), self.to.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_defaults() {
        let route = Route::new("test-portal", "target", vec!["Test"]);

        assert_eq!(route.from, "test-portal");
        assert_eq!(route.to, "target");
        assert_eq!(route.passengers, vec!["Test"]);
        assert_eq!(route.order, None);
        assert!(route.class.is_empty());
        assert!(route.attrs.is_empty());
    }

    #[test]
    fn test_route_builder_chaining() {
        let route = Route::new("test-portal", "target", ())
            .order(3)
            .class(["class1", "class2"])
            .attr("slot", "footer");

        assert_eq!(route.order, Some(3));
        assert_eq!(route.class, vec!["class1".to_string(), "class2".to_string()]);
        assert_eq!(route.attrs.get("slot").map(String::as_str), Some("footer"));
    }

    #[test]
    fn test_maybe_order_clears() {
        let route = Route::new("a", "b", ()).order(5).maybe_order(None);
        assert_eq!(route.order, None);
    }

    #[test]
    fn test_route_key() {
        let key = Route::new("a", "b", 0u8).key();

        assert_eq!(key, RouteKey::new("a", "b"));
        assert_eq!(key.to_string(), "a -> b");
    }
}
