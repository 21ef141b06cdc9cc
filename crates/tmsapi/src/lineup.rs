//! `Lineup` - resource facade over the request dispatcher.

use serde_json::Value;
use tracing::instrument;

use crate::api::LocalTmsApi;
use crate::client::{HttpClient, encode_segment};
use crate::error::{Result, require};
use crate::params::{
    AssetParams, DEFAULT_IMAGE_SIZE, ImageSize, ProgramParams, default_end_time, non_empty,
};
use crate::search::SearchParams;

/// Image size for channel and program lookups when none is given.
const SMALL_IMAGE_SIZE: ImageSize = ImageSize::Sm;

/// Lineup, station, program and search operations.
///
/// Holds a borrowed [`HttpClient`]; every call starts from a fresh
/// parameter set, so one facade can serve concurrent operations.
#[derive(Debug, Clone, Copy)]
pub struct Lineup<'a> {
    client: &'a HttpClient,
}

impl<'a> Lineup<'a> {
    /// Creates a facade over `client`.
    #[must_use]
    pub const fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Last result count reported by the API (advisory).
    #[must_use]
    pub fn count(&self) -> Option<u64> {
        self.client.count()
    }
}

impl LocalTmsApi for Lineup<'_> {
    #[instrument(skip_all)]
    async fn fetch(&self) -> Result<Value> {
        self.client.get("/lineups", &self.client.query()).await
    }

    #[instrument(skip_all)]
    async fn fetch_by_zipcode(&self, country: &str, postal_code: &str) -> Result<Value> {
        let mut query = self.client.query();
        query
            .set("country", require("country", country)?)
            .set("postalCode", require("postalCode", postal_code)?);
        self.client.get("/lineups", &query).await
    }

    #[instrument(skip_all)]
    async fn fetch_channels(
        &self,
        lineup_id: &str,
        image_size: Option<ImageSize>,
    ) -> Result<Value> {
        let lineup_id = require("lineupId", lineup_id)?;
        let mut query = self.client.query();
        query.set("imageSize", image_size.unwrap_or(SMALL_IMAGE_SIZE));
        self.client
            .get(&format!("/lineups/{}/channels", encode_segment(lineup_id)), &query)
            .await
    }

    #[instrument(skip_all)]
    async fn fetch_airings(
        &self,
        lineup_id: &str,
        start: &str,
        end: Option<&str>,
        image_size: Option<ImageSize>,
    ) -> Result<Value> {
        let lineup_id = require("lineupId", lineup_id)?;
        let start = require("startDateTime", start)?;
        let end = match non_empty(end) {
            Some(end) => String::from(end),
            None => default_end_time(start)?,
        };

        let mut query = self.client.query();
        query
            .set("imageSize", image_size.unwrap_or(DEFAULT_IMAGE_SIZE))
            .set("startDateTime", start)
            .set("endDateTime", end);
        self.client
            .get(&format!("/lineups/{}/grid", encode_segment(lineup_id)), &query)
            .await
    }

    #[instrument(skip_all)]
    async fn fetch_asset(&self, asset_id: &str, params: &AssetParams) -> Result<Vec<u8>> {
        let asset_id = require("assetId", asset_id)?;
        let mut query = self.client.query();
        query
            .set_opt("w", params.width)
            .set_opt("h", params.height)
            .set_opt("trim", params.trim);
        self.client.get_asset(asset_id, &query).await
    }

    #[instrument(skip_all)]
    async fn station_airings(
        &self,
        station_id: &str,
        start: &str,
        end: Option<&str>,
        lineup_id: Option<&str>,
    ) -> Result<Value> {
        let station_id = require("stationId", station_id)?;
        let mut query = self.client.query();
        query
            .set("startDateTime", require("startDateTime", start)?)
            .set_opt("endDateTime", non_empty(end))
            .set_opt("lineupId", non_empty(lineup_id));
        self.client
            .get(&format!("/stations/{}/airings", encode_segment(station_id)), &query)
            .await
    }

    #[instrument(skip_all)]
    async fn station_details(
        &self,
        station_id: &str,
        lineup_id: Option<&str>,
        image_size: Option<ImageSize>,
    ) -> Result<Value> {
        let station_id = require("stationId", station_id)?;
        let mut query = self.client.query();
        query
            .set_opt("lineupId", non_empty(lineup_id))
            .set("imageSize", image_size.unwrap_or(DEFAULT_IMAGE_SIZE));
        self.client
            .get(&format!("/stations/{}", encode_segment(station_id)), &query)
            .await
    }

    #[instrument(skip_all)]
    async fn program(&self, tms_id: &str, params: &ProgramParams) -> Result<Value> {
        let tms_id = require("tmsId", tms_id)?;
        let mut query = self.client.query();
        query
            .set("imageSize", params.image_size)
            .set("imageAspectTV", &params.image_aspect_tv);
        self.client
            .get(&format!("/programs/{}", encode_segment(tms_id)), &query)
            .await
    }

    #[instrument(skip_all)]
    async fn program_images(
        &self,
        tms_id: &str,
        image_size: Option<ImageSize>,
        image_aspect_tv: Option<&str>,
    ) -> Result<Value> {
        let tms_id = require("tmsId", tms_id)?;
        let mut query = self.client.query();
        query
            .set_opt("imageSize", image_size)
            .set_opt("imageAspectTV", non_empty(image_aspect_tv));
        self.client
            .get(&format!("/programs/{}/images", encode_segment(tms_id)), &query)
            .await
    }

    #[instrument(skip_all, fields(resource = %params.resource))]
    async fn search(&self, params: &SearchParams) -> Result<Value> {
        let mut query = self.client.query();
        params.apply(&mut query)?;
        self.client
            .get(&params.resource.search_path(), &query)
            .await
    }
}
