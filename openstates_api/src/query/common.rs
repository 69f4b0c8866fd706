//! Shared query infrastructure: the [`Query`] trait and pass-through [`Filters`].

use url::Url;

/// Trait implemented by all query builders. Provides URL serialization and
/// shared builder methods for arbitrary pass-through filters.
pub trait Query {
    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url;

    /// Returns a mutable reference to the pass-through filters.
    fn get_common(&mut self) -> &mut Filters;

    /// Adds a filter sent verbatim as `key=value`.
    fn with_filter(mut self, key: &str, value: &str) -> Self
    where
        Self: Sized,
    {
        self.get_common().push(key, value);
        self
    }

    /// Adds one `key=value` pair per value, keeping every value.
    fn with_filter_values(mut self, key: &str, values: &[&str]) -> Self
    where
        Self: Sized,
    {
        for value in values {
            self.get_common().push(key, value);
        }
        self
    }
}

/// Ordered list of parameters passed through to the API unchanged.
///
/// Also usable on its own as a query for endpoints without typed filters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Filters {
    pairs: Vec<(String, String)>,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &str, value: &str) {
        self.pairs.push((key.to_string(), value.to_string()));
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Query for Filters {
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        for (key, value) in self.iter() {
            append(&mut url, key, value);
        }
        url
    }

    fn get_common(&mut self) -> &mut Filters {
        self
    }
}

/// Appends `key=value` unless the value is empty.
pub(crate) fn append(url: &mut Url, key: &str, value: &str) {
    if !value.trim().is_empty() {
        url.query_pairs_mut().append_pair(key, value);
    }
}

/// Appends `key=value` for a set optional value.
pub(crate) fn append_opt(url: &mut Url, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        append(url, key, value);
    }
}
