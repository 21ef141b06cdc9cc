//! Client SDK for the TMS television metadata API.
//!
//! Covers lineups, channels, lineup grids, station airings and details,
//! program metadata and images, binary image assets, and program/station
//! search. Each operation builds its query from a fresh [`QueryParams`],
//! sends it through [`HttpClient`], and returns the JSON payload with the
//! `meta` envelope removed.
//!
//! ```no_run
//! # async fn run() -> tmsapi::Result<()> {
//! use tmsapi::{LocalTmsApi, SearchParams, SearchableResource, Tms};
//!
//! let tms = Tms::new("my-api-key")?;
//! let lineups = tms.lineups().fetch_by_zipcode("USA", "78701").await?;
//! let hits = tms
//!     .lineups()
//!     .search(&SearchParams::new(SearchableResource::Program, "Friends").fields(["title"]))
//!     .await?;
//! # let _ = (lineups, hits);
//! # Ok(())
//! # }
//! ```

mod api;
mod client;
mod config;
mod envelope;
mod error;
mod lineup;
mod params;
mod query;
mod search;
mod tms;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmsApi, TmsApi};
pub use client::{
    API_VERSION, BASE_ASSET_URL, BASE_URL, HttpClient, HttpClientBuilder, build_path,
    encode_segment,
};
pub use config::{API_KEY_ENV, TmsConfig};
pub use envelope::{Normalized, normalize};
pub use error::{Result, TmsError};
pub use lineup::Lineup;
pub use params::{
    AssetParams, DEFAULT_AIRING_WINDOW_HOURS, DEFAULT_IMAGE_SIZE, ImageSize, ProgramParams,
    default_end_time, parse_iso8601,
};
pub use query::{Pagination, QueryParams};
pub use search::{SearchParams, SearchableResource, validate_fields, validate_parameters};
pub use tms::Tms;
