//! Searchable resources and search request validation.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TmsError};
use crate::query::{Pagination, QueryParams};

/// Resource kinds exposed by the `/{resource}/search` endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchableResource {
    /// Movies, shows, episodes and sports events.
    Program,
    /// Broadcast stations.
    Station,
}

impl SearchableResource {
    /// Path segment of the resource (`programs`, `stations`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Program => "programs",
            Self::Station => "stations",
        }
    }

    /// Query parameters accepted by the resource's search endpoint.
    #[must_use]
    pub const fn allowed_parameters(self) -> &'static [&'static str] {
        match self {
            Self::Program => &[
                "descriptionLang",
                "entityType",
                "genres",
                "imageSize",
                "includeAdult",
                "subType",
                "titleLang",
                "startDateTime",
                "endDateTime",
            ],
            Self::Station => &["imageSize"],
        }
    }

    /// Fields that may be named in `queryFields`.
    #[must_use]
    pub const fn searchable_fields(self) -> &'static [&'static str] {
        match self {
            Self::Program => &["title", "cast", "genres", "directors"],
            Self::Station => &["callsign", "name"],
        }
    }

    /// Search endpoint path, e.g. `/programs/search`.
    #[must_use]
    pub fn search_path(self) -> String {
        format!("/{}/search", self.as_str())
    }
}

impl fmt::Display for SearchableResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchableResource {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "programs" | "program" => Ok(Self::Program),
            "stations" | "station" => Ok(Self::Station),
            other => Err(format!("unknown searchable resource: {other}")),
        }
    }
}

/// Returns the entries of `requested` missing from `allowed`, deduplicated.
fn difference<'a>(requested: impl IntoIterator<Item = &'a str>, allowed: &[&str]) -> Vec<String> {
    let mut unknown: Vec<String> = Vec::new();
    for name in requested {
        if !allowed.iter().any(|a| *a == name) && !unknown.iter().any(|u| u == name) {
            unknown.push(String::from(name));
        }
    }
    unknown
}

/// Checks that every field is searchable for `resource`.
///
/// # Errors
///
/// Returns `TmsError::InvalidSearchField` listing the rejected fields.
pub fn validate_fields<S: AsRef<str>>(resource: SearchableResource, fields: &[S]) -> Result<()> {
    let unknown = difference(
        fields.iter().map(AsRef::as_ref),
        resource.searchable_fields(),
    );
    if unknown.is_empty() {
        Ok(())
    } else {
        Err(TmsError::InvalidSearchField {
            resource,
            fields: unknown,
        })
    }
}

/// Checks that every parameter name is accepted by `resource`.
///
/// # Errors
///
/// Returns `TmsError::InvalidParameter` listing the rejected names.
pub fn validate_parameters<K: AsRef<str>, V>(
    resource: SearchableResource,
    params: &[(K, V)],
) -> Result<()> {
    let unknown = difference(
        params.iter().map(|(k, _)| k.as_ref()),
        resource.allowed_parameters(),
    );
    if unknown.is_empty() {
        Ok(())
    } else {
        Err(TmsError::InvalidParameter {
            resource,
            parameters: unknown,
        })
    }
}

/// Request parameters for a search.
#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct SearchParams {
    /// Resource to search.
    pub resource: SearchableResource,
    /// Free-text query (`q`).
    pub query: String,
    /// Fields to search in (`queryFields`). Empty means API default.
    pub fields: Vec<String>,
    /// Resource-specific filters.
    pub params: Vec<(String, String)>,
    /// Result window.
    pub pagination: Pagination,
}

impl SearchParams {
    /// Creates search parameters with the given resource and query.
    #[must_use]
    pub fn new(resource: SearchableResource, query: impl Into<String>) -> Self {
        Self {
            resource,
            query: query.into(),
            fields: Vec::new(),
            params: Vec::new(),
            pagination: Pagination::default(),
        }
    }

    /// Restricts the query to the given fields.
    #[must_use]
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a resource-specific filter.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    /// Sets `limit`.
    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.pagination.limit = Some(limit);
        self
    }

    /// Sets `offset` (only sent when a limit is also set).
    #[must_use]
    pub const fn offset(mut self, offset: u32) -> Self {
        self.pagination.offset = Some(offset);
        self
    }

    /// Validates fields and filters, then writes everything into `query`.
    ///
    /// Nothing is written unless both validations pass.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSearchField` or `InvalidParameter` on rejected input.
    pub fn apply(&self, query: &mut QueryParams) -> Result<()> {
        validate_fields(self.resource, &self.fields)?;
        validate_parameters(self.resource, &self.params)?;

        query.set("q", &self.query);
        if !self.fields.is_empty() {
            query.set("queryFields", self.fields.join(","));
        }
        for (name, value) in &self.params {
            query.set(name, value);
        }
        self.pagination.apply(query);
        Ok(())
    }
}
