//! TMDB catalog client and aggregation facade.

mod api;
mod client;
mod endpoint;
mod error;
mod home;
mod options;
mod types;

pub use api::{CatalogApi, LocalCatalogApi};
pub use client::{CatalogClient, CatalogClientBuilder, DEFAULT_API_KEY_ENV};
pub use endpoint::Endpoint;
pub use error::{BuildError, CatalogError, Result, TransportCause};
pub use home::{CompleteHomeFeed, HomeFeed, HomeSlot, fetch_home_feed};
pub use options::{DEFAULT_CACHE_TIME, QueryOptions, SEARCH_CACHE_TIME};
pub use types::{
    CastMember, CatalogItem, CrewMember, Genre, IMAGE_BASE_URL, ItemInfo, MediaType, Page,
    ParseMediaTypeError, SearchResults, ShowCredits, ShowDetails,
};
