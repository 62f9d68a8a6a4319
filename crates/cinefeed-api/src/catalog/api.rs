//! `CatalogApi` trait definition.
#![allow(clippy::future_not_send)]

use super::error::Result;
use super::types::{CatalogItem, MediaType, SearchResults, ShowCredits, ShowDetails};

/// Catalog aggregation facade.
///
/// One operation per catalog query type. Operations share no mutable state,
/// so callers may run any subset concurrently.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(CatalogApi: Send)]
pub trait LocalCatalogApi {
    /// Movies trending this week.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the service answers with a
    /// non-success status, or the body cannot be decoded.
    async fn trending_movies(&self) -> Result<Vec<CatalogItem>>;

    /// Top-rated movies.
    ///
    /// # Errors
    ///
    /// See [`LocalCatalogApi::trending_movies`].
    async fn top_rated_movies(&self) -> Result<Vec<CatalogItem>>;

    /// Popular movies.
    ///
    /// # Errors
    ///
    /// See [`LocalCatalogApi::trending_movies`].
    async fn popular_movies(&self) -> Result<Vec<CatalogItem>>;

    /// Upcoming movies.
    ///
    /// # Errors
    ///
    /// See [`LocalCatalogApi::trending_movies`].
    async fn upcoming_movies(&self) -> Result<Vec<CatalogItem>>;

    /// TV series trending this week.
    ///
    /// # Errors
    ///
    /// See [`LocalCatalogApi::trending_movies`].
    async fn trending_tv(&self) -> Result<Vec<CatalogItem>>;

    /// Top-rated TV series.
    ///
    /// # Errors
    ///
    /// See [`LocalCatalogApi::trending_movies`].
    async fn top_rated_tv(&self) -> Result<Vec<CatalogItem>>;

    /// Popular TV series.
    ///
    /// # Errors
    ///
    /// See [`LocalCatalogApi::trending_movies`].
    async fn popular_tv(&self) -> Result<Vec<CatalogItem>>;

    /// Discovers movies by genre and/or keyword IDs (comma-separated lists allowed).
    ///
    /// # Errors
    ///
    /// See [`LocalCatalogApi::trending_movies`].
    async fn discover_movies(
        &self,
        genres: Option<&str>,
        keywords: Option<&str>,
    ) -> Result<Vec<CatalogItem>>;

    /// Searches movies by free text.
    ///
    /// # Errors
    ///
    /// See [`LocalCatalogApi::trending_movies`].
    async fn search_movies(&self, query: &str) -> Result<Vec<CatalogItem>>;

    /// Searches movies and TV series by free text. People are skipped.
    ///
    /// # Errors
    ///
    /// See [`LocalCatalogApi::trending_movies`].
    async fn search_multi(&self, query: &str) -> Result<Vec<CatalogItem>>;

    /// Fetches details for a single movie or series.
    ///
    /// # Errors
    ///
    /// See [`LocalCatalogApi::trending_movies`].
    async fn show_details(&self, media_type: MediaType, id: u64) -> Result<ShowDetails>;

    /// Fetches cast and crew.
    ///
    /// # Errors
    ///
    /// See [`LocalCatalogApi::trending_movies`].
    async fn show_credits(&self, media_type: MediaType, id: u64) -> Result<ShowCredits>;

    /// Fetches similar titles.
    ///
    /// # Errors
    ///
    /// See [`LocalCatalogApi::trending_movies`].
    async fn similar_shows(&self, media_type: MediaType, id: u64) -> Result<SearchResults>;

    /// Fetches recommended titles.
    ///
    /// # Errors
    ///
    /// See [`LocalCatalogApi::trending_movies`].
    async fn recommendations(&self, media_type: MediaType, id: u64) -> Result<SearchResults>;
}
