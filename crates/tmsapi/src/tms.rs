//! `Tms` - SDK entry point.

use crate::client::HttpClient;
use crate::error::Result;
use crate::lineup::Lineup;

/// Entry point owning the request dispatcher.
#[derive(Debug)]
pub struct Tms {
    client: HttpClient,
}

impl Tms {
    /// Creates an SDK instance for the public endpoints.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty or the HTTP client fails to build.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: HttpClient::new(api_key)?,
        })
    }

    /// Wraps an already configured client.
    #[must_use]
    pub const fn from_client(client: HttpClient) -> Self {
        Self { client }
    }

    /// Lineup, station, program and search operations.
    #[must_use]
    pub const fn lineups(&self) -> Lineup<'_> {
        Lineup::new(&self.client)
    }

    /// Underlying dispatcher, for raw `get` / `post` calls.
    #[must_use]
    pub const fn client(&self) -> &HttpClient {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_new_requires_key() {
        // Arrange & Act & Assert
        assert!(Tms::new("").is_err());
        assert!(Tms::new("abc123").is_ok());
    }

    #[test]
    fn test_lineups_shares_client() {
        // Arrange
        let tms = Tms::new("abc123").unwrap();

        // Act
        let lineup = tms.lineups();

        // Assert
        assert_eq!(lineup.count(), tms.client().count());
    }
}
