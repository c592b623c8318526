//! Named call-time parameters.
//!
//! Dispatch consumes a [`Params`] map in stages: declared required
//! parameters are checked first, path template tokens are bound and removed,
//! and whatever remains becomes the request body or query string.

use serde_json::{Map, Value};

/// Named arguments for an endpoint call. Built with [`params!`] or
/// incrementally with [`Params::insert`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(Map<String, Value>);

impl Params {
    /// Create an empty parameter map.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Set a parameter. Any JSON-convertible value works.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    /// Whether a parameter is present.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Look up a parameter value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Remove and return a parameter value.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.0.remove(name)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Params {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Build a [`Params`] map from `name = value` pairs, the keyword-argument
/// analogue for endpoint calls:
///
/// ```
/// # use declarest::params;
/// let params = params! { id = 7, value = "buy milk" };
/// assert_eq!(params.len(), 2);
/// ```
#[macro_export]
macro_rules! params {
    () => {
        $crate::Params::new()
    };
    ($($name:ident = $value:expr),+ $(,)?) => {{
        let mut params = $crate::Params::new();
        $(params.insert(stringify!($name), $value);)+
        params
    }};
}
