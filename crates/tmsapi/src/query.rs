//! Query parameter accumulator and pagination.

use std::fmt::Display;

use url::form_urlencoded;

/// Ordered set of query parameters for a single request.
///
/// Keys are unique. Setting an existing key replaces its value in place, so
/// the rendered order is the order in which each key was first set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Creates an empty parameter set.
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Stores `value` under `name`, overwriting any previous value.
    pub fn set(&mut self, name: &str, value: impl Display) -> &mut Self {
        let value = value.to_string();
        if let Some(slot) = self.pairs.iter_mut().find(|(k, _)| k == name) {
            slot.1 = value;
        } else {
            self.pairs.push((String::from(name), value));
        }
        self
    }

    /// Stores `value` under `name` if present; `None` is a no-op.
    pub fn set_opt(&mut self, name: &str, value: Option<impl Display>) -> &mut Self {
        if let Some(value) = value {
            self.set(name, value);
        }
        self
    }

    /// Adds `limit`. Zero is ignored.
    pub fn set_limit(&mut self, limit: u32) -> &mut Self {
        if limit > 0 {
            self.set("limit", limit);
        }
        self
    }

    /// Adds `offset`, but only once a `limit` is present. Zero is ignored.
    pub fn set_offset(&mut self, offset: u32) -> &mut Self {
        if offset > 0 && self.contains("limit") {
            self.set("offset", offset);
        }
        self
    }

    /// Returns the value stored under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns `true` if `name` has been set.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of parameters.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if no parameters are set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Removes every parameter.
    pub fn clear(&mut self) {
        self.pairs.clear();
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parameter names in insertion order, for logging without values.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.pairs.iter().map(|(k, _)| k.as_str()).collect()
    }

    /// Renders the set as a form-urlencoded query string (no leading `?`).
    ///
    /// Returns an empty string when no parameters are set.
    #[must_use]
    pub fn render(&self) -> String {
        if self.pairs.is_empty() {
            return String::new();
        }
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}

/// Optional `limit` / `offset` pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    /// Maximum number of results.
    pub limit: Option<u32>,
    /// Number of results to skip. Ignored unless `limit` is set.
    pub offset: Option<u32>,
}

impl Pagination {
    /// Creates a pagination with both values.
    #[must_use]
    pub const fn new(limit: u32, offset: u32) -> Self {
        Self {
            limit: Some(limit),
            offset: Some(offset),
        }
    }

    /// Writes `limit` and then `offset` into `query`.
    pub fn apply(&self, query: &mut QueryParams) {
        if let Some(limit) = self.limit {
            query.set_limit(limit);
        }
        if let Some(offset) = self.offset {
            query.set_offset(offset);
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_render_empty() {
        // Arrange
        let query = QueryParams::new();

        // Act & Assert
        assert_eq!(query.render(), "");
        assert!(query.is_empty());
    }

    #[test]
    fn test_last_write_wins_and_keeps_position() {
        // Arrange
        let mut query = QueryParams::new();

        // Act
        query.set("imageSize", "Sm").set("country", "USA");
        query.set("imageSize", "Lg");

        // Assert
        assert_eq!(query.render(), "imageSize=Lg&country=USA");
        assert_eq!(query.len(), 2);
    }

    #[test]
    fn test_set_opt_none_is_noop() {
        // Arrange
        let mut query = QueryParams::new();

        // Act
        query.set_opt("lineupId", None::<&str>);
        query.set_opt("endDateTime", Some("2024-01-01T03:00:00Z"));

        // Assert
        assert!(!query.contains("lineupId"));
        assert_eq!(query.get("endDateTime"), Some("2024-01-01T03:00:00Z"));
    }

    #[test]
    fn test_render_encodes_values() {
        // Arrange
        let mut query = QueryParams::new();

        // Act
        query
            .set("q", "law & order")
            .set("startDateTime", "2024-01-01T00:00:00+09:00")
            .set("includeAdult", true)
            .set("limit", 10);

        // Assert
        assert_eq!(
            query.render(),
            "q=law+%26+order&startDateTime=2024-01-01T00%3A00%3A00%2B09%3A00&includeAdult=true&limit=10"
        );
    }

    #[test]
    fn test_render_is_deterministic() {
        // Arrange
        let mut a = QueryParams::new();
        a.set("country", "USA").set("postalCode", "78701");
        let b = a.clone();

        // Act & Assert
        assert_eq!(a.render(), b.render());
    }

    #[test]
    fn test_offset_without_limit_is_dropped() {
        // Arrange
        let mut query = QueryParams::new();

        // Act
        query.set_offset(20);

        // Assert
        assert!(!query.contains("offset"));
        assert_eq!(query.render(), "");
    }

    #[test]
    fn test_offset_before_limit_is_dropped() {
        // Arrange
        let mut query = QueryParams::new();

        // Act
        query.set_offset(20).set_limit(10);

        // Assert
        assert_eq!(query.render(), "limit=10");
    }

    #[test]
    fn test_limit_then_offset() {
        // Arrange
        let mut query = QueryParams::new();

        // Act
        Pagination::new(10, 20).apply(&mut query);

        // Assert
        assert_eq!(query.render(), "limit=10&offset=20");
    }

    #[test]
    fn test_zero_values_are_ignored() {
        // Arrange
        let mut query = QueryParams::new();

        // Act
        Pagination::new(0, 5).apply(&mut query);

        // Assert
        assert!(query.is_empty());
    }

    #[test]
    fn test_pagination_offset_only() {
        // Arrange
        let mut query = QueryParams::new();
        let pagination = Pagination {
            limit: None,
            offset: Some(40),
        };

        // Act
        pagination.apply(&mut query);

        // Assert
        assert!(query.is_empty());
    }

    #[test]
    fn test_clear_resets() {
        // Arrange
        let mut query = QueryParams::new();
        query.set("q", "news");

        // Act
        query.clear();

        // Assert
        assert!(query.is_empty());
        assert_eq!(query.names(), Vec::<&str>::new());
    }
}
