//! `TmsApi` trait definition.
#![allow(clippy::future_not_send)]

use serde_json::Value;

use crate::error::Result;
use crate::params::{AssetParams, ImageSize, ProgramParams};
use crate::search::SearchParams;

/// TMS API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
///
/// Every operation validates its arguments before any request is sent.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TmsApi: Send)]
pub trait LocalTmsApi {
    /// Lists all lineups available to the API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn fetch(&self) -> Result<Value>;

    /// Lists lineups for a country and postal code.
    ///
    /// # Errors
    ///
    /// Returns `MissingParameter` for an empty country or postal code, or an
    /// error if the HTTP request or JSON parsing fails.
    async fn fetch_by_zipcode(&self, country: &str, postal_code: &str) -> Result<Value>;

    /// Lists the channels of a lineup (`imageSize` defaults to `Sm`).
    ///
    /// # Errors
    ///
    /// Returns `MissingParameter` for an empty lineup ID, or an error if the
    /// HTTP request or JSON parsing fails.
    async fn fetch_channels(&self, lineup_id: &str, image_size: Option<ImageSize>)
    -> Result<Value>;

    /// Fetches the TV grid of a lineup.
    ///
    /// `end` defaults to `start` plus three hours; `image_size` defaults to `Md`.
    ///
    /// # Errors
    ///
    /// Returns `MissingParameter` for an empty lineup ID or start time,
    /// `InvalidDateTime` if the end time has to be derived from an
    /// unparseable start, or an error if the request fails.
    async fn fetch_airings(
        &self,
        lineup_id: &str,
        start: &str,
        end: Option<&str>,
        image_size: Option<ImageSize>,
    ) -> Result<Value>;

    /// Downloads a binary image asset.
    ///
    /// # Errors
    ///
    /// Returns `MissingParameter` for an empty asset ID, or an error if the
    /// HTTP request fails.
    async fn fetch_asset(&self, asset_id: &str, params: &AssetParams) -> Result<Vec<u8>>;

    /// Fetches airings for a single station. No default end time is applied.
    ///
    /// # Errors
    ///
    /// Returns `MissingParameter` for an empty station ID or start time, or
    /// an error if the HTTP request or JSON parsing fails.
    async fn station_airings(
        &self,
        station_id: &str,
        start: &str,
        end: Option<&str>,
        lineup_id: Option<&str>,
    ) -> Result<Value>;

    /// Fetches station details (`imageSize` defaults to `Md`).
    ///
    /// # Errors
    ///
    /// Returns `MissingParameter` for an empty station ID, or an error if
    /// the HTTP request or JSON parsing fails.
    async fn station_details(
        &self,
        station_id: &str,
        lineup_id: Option<&str>,
        image_size: Option<ImageSize>,
    ) -> Result<Value>;

    /// Fetches metadata for a program by TMS ID or root ID.
    ///
    /// # Errors
    ///
    /// Returns `MissingParameter` for an empty TMS ID, or an error if the
    /// HTTP request or JSON parsing fails.
    async fn program(&self, tms_id: &str, params: &ProgramParams) -> Result<Value>;

    /// Fetches all images associated with a program.
    ///
    /// # Errors
    ///
    /// Returns `MissingParameter` for an empty TMS ID, or an error if the
    /// HTTP request or JSON parsing fails.
    async fn program_images(
        &self,
        tms_id: &str,
        image_size: Option<ImageSize>,
        image_aspect_tv: Option<&str>,
    ) -> Result<Value>;

    /// Searches programs or stations.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSearchField` / `InvalidParameter` for input the
    /// resource does not accept, or an error if the request fails.
    async fn search(&self, params: &SearchParams) -> Result<Value>;
}
