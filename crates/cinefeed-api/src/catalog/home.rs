//! Home feed composition.
//!
//! Issues the six landing-page list calls concurrently and keeps each
//! outcome separate so callers choose between all-or-nothing and
//! best-effort rendering.

use std::fmt;

use tracing::instrument;

use super::api::LocalCatalogApi;
use super::error::{CatalogError, Result};
use super::types::CatalogItem;

/// A named carousel of the home feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HomeSlot {
    /// Movies trending this week.
    TrendingMovies,
    /// Top-rated movies.
    TopRatedMovies,
    /// Popular movies.
    PopularMovies,
    /// TV series trending this week.
    TrendingTv,
    /// Popular TV series.
    PopularTv,
    /// Top-rated TV series.
    TopRatedTv,
}

impl HomeSlot {
    /// Every slot in display order.
    pub const ALL: [Self; 6] = [
        Self::TrendingMovies,
        Self::TopRatedMovies,
        Self::PopularMovies,
        Self::TrendingTv,
        Self::PopularTv,
        Self::TopRatedTv,
    ];

    /// Carousel heading.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::TrendingMovies => "Trending Movies",
            Self::TopRatedMovies => "Top Rated Movies",
            Self::PopularMovies => "Popular Movies",
            Self::TrendingTv => "Trending TV",
            Self::PopularTv => "Popular TV",
            Self::TopRatedTv => "Top Rated TV",
        }
    }
}

impl fmt::Display for HomeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Settled outcome of every home feed slot.
#[derive(Debug)]
pub struct HomeFeed {
    /// Movies trending this week.
    pub trending_movies: Result<Vec<CatalogItem>>,
    /// Top-rated movies.
    pub top_rated_movies: Result<Vec<CatalogItem>>,
    /// Popular movies.
    pub popular_movies: Result<Vec<CatalogItem>>,
    /// TV series trending this week.
    pub trending_tv: Result<Vec<CatalogItem>>,
    /// Popular TV series.
    pub popular_tv: Result<Vec<CatalogItem>>,
    /// Top-rated TV series.
    pub top_rated_tv: Result<Vec<CatalogItem>>,
}

/// Home feed where every slot succeeded.
#[derive(Debug, Clone, PartialEq)]
pub struct CompleteHomeFeed {
    /// Movies trending this week.
    pub trending_movies: Vec<CatalogItem>,
    /// Top-rated movies.
    pub top_rated_movies: Vec<CatalogItem>,
    /// Popular movies.
    pub popular_movies: Vec<CatalogItem>,
    /// TV series trending this week.
    pub trending_tv: Vec<CatalogItem>,
    /// Popular TV series.
    pub popular_tv: Vec<CatalogItem>,
    /// Top-rated TV series.
    pub top_rated_tv: Vec<CatalogItem>,
}

impl HomeFeed {
    /// Outcome of a single slot.
    #[must_use]
    pub const fn slot(&self, slot: HomeSlot) -> &Result<Vec<CatalogItem>> {
        match slot {
            HomeSlot::TrendingMovies => &self.trending_movies,
            HomeSlot::TopRatedMovies => &self.top_rated_movies,
            HomeSlot::PopularMovies => &self.popular_movies,
            HomeSlot::TrendingTv => &self.trending_tv,
            HomeSlot::PopularTv => &self.popular_tv,
            HomeSlot::TopRatedTv => &self.top_rated_tv,
        }
    }

    /// Failed slots in display order.
    #[must_use]
    pub fn failures(&self) -> Vec<(HomeSlot, &CatalogError)> {
        HomeSlot::ALL
            .into_iter()
            .filter_map(|slot| self.slot(slot).as_ref().err().map(|err| (slot, err)))
            .collect()
    }

    /// Returns `true` when no slot succeeded.
    #[must_use]
    pub fn is_total_failure(&self) -> bool {
        HomeSlot::ALL.into_iter().all(|slot| self.slot(slot).is_err())
    }

    /// All-or-nothing view of the feed.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failed slot in display order.
    pub fn into_complete(self) -> Result<CompleteHomeFeed> {
        Ok(CompleteHomeFeed {
            trending_movies: self.trending_movies?,
            top_rated_movies: self.top_rated_movies?,
            popular_movies: self.popular_movies?,
            trending_tv: self.trending_tv?,
            popular_tv: self.popular_tv?,
            top_rated_tv: self.top_rated_tv?,
        })
    }
}

/// Fetches the six home feed lists concurrently.
///
/// Waits for every call to settle; one slot failing never cancels the
/// others.
#[instrument(skip_all)]
pub async fn fetch_home_feed(api: &(impl LocalCatalogApi + Sync)) -> HomeFeed {
    let (
        trending_movies,
        top_rated_movies,
        popular_movies,
        trending_tv,
        popular_tv,
        top_rated_tv,
    ) = futures::join!(
        api.trending_movies(),
        api.top_rated_movies(),
        api.popular_movies(),
        api.trending_tv(),
        api.popular_tv(),
        api.top_rated_tv(),
    );

    let feed = HomeFeed {
        trending_movies,
        top_rated_movies,
        popular_movies,
        trending_tv,
        popular_tv,
        top_rated_tv,
    };

    let failed = feed.failures().len();
    if failed > 0 {
        tracing::warn!(failed, total = HomeSlot::ALL.len(), "Home feed incomplete");
    } else {
        tracing::debug!("Home feed complete");
    }
    feed
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]
    #![allow(clippy::unimplemented)]

    use std::sync::atomic::{AtomicUsize, Ordering};

    use reqwest::StatusCode;

    use super::*;
    use crate::catalog::{CatalogClient, MediaType, SearchResults, ShowCredits, ShowDetails};

    /// Facade stub: each list returns one item titled after its slot, except
    /// the configured failing slot.
    struct StubCatalog {
        failing: Option<HomeSlot>,
        calls: AtomicUsize,
    }

    impl StubCatalog {
        fn new(failing: Option<HomeSlot>) -> Self {
            Self {
                failing,
                calls: AtomicUsize::new(0),
            }
        }

        fn list(&self, slot: HomeSlot, endpoint: &str) -> Result<Vec<CatalogItem>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing == Some(slot) {
                return Err(CatalogError::upstream(
                    endpoint,
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                ));
            }
            let json = format!(r#"{{"id":1,"title":"{}"}}"#, slot.title());
            Ok(vec![serde_json::from_str(&json).unwrap()])
        }
    }

    impl LocalCatalogApi for StubCatalog {
        async fn trending_movies(&self) -> Result<Vec<CatalogItem>> {
            self.list(HomeSlot::TrendingMovies, "/trending/movie/week")
        }
        async fn top_rated_movies(&self) -> Result<Vec<CatalogItem>> {
            self.list(HomeSlot::TopRatedMovies, "/movie/top_rated")
        }
        async fn popular_movies(&self) -> Result<Vec<CatalogItem>> {
            self.list(HomeSlot::PopularMovies, "/movie/popular")
        }
        async fn upcoming_movies(&self) -> Result<Vec<CatalogItem>> {
            unimplemented!()
        }
        async fn trending_tv(&self) -> Result<Vec<CatalogItem>> {
            self.list(HomeSlot::TrendingTv, "/trending/tv/week")
        }
        async fn top_rated_tv(&self) -> Result<Vec<CatalogItem>> {
            self.list(HomeSlot::TopRatedTv, "/tv/top_rated")
        }
        async fn popular_tv(&self) -> Result<Vec<CatalogItem>> {
            self.list(HomeSlot::PopularTv, "/tv/popular")
        }
        async fn discover_movies(
            &self,
            _genres: Option<&str>,
            _keywords: Option<&str>,
        ) -> Result<Vec<CatalogItem>> {
            unimplemented!()
        }
        async fn search_movies(&self, _query: &str) -> Result<Vec<CatalogItem>> {
            unimplemented!()
        }
        async fn search_multi(&self, _query: &str) -> Result<Vec<CatalogItem>> {
            unimplemented!()
        }
        async fn show_details(&self, _media_type: MediaType, _id: u64) -> Result<ShowDetails> {
            unimplemented!()
        }
        async fn show_credits(&self, _media_type: MediaType, _id: u64) -> Result<ShowCredits> {
            unimplemented!()
        }
        async fn similar_shows(&self, _media_type: MediaType, _id: u64) -> Result<SearchResults> {
            unimplemented!()
        }
        async fn recommendations(
            &self,
            _media_type: MediaType,
            _id: u64,
        ) -> Result<SearchResults> {
            unimplemented!()
        }
    }

    #[tokio::test]
    async fn test_home_feed_all_slots_succeed() {
        // Arrange
        let stub = StubCatalog::new(None);

        // Act
        let feed = fetch_home_feed(&stub).await;

        // Assert
        assert_eq!(stub.calls.load(Ordering::SeqCst), 6);
        assert!(feed.failures().is_empty());
        let complete = feed.into_complete().unwrap();
        assert_eq!(complete.trending_movies[0].display_title(), "Trending Movies");
        assert_eq!(complete.top_rated_tv[0].display_title(), "Top Rated TV");
    }

    #[tokio::test]
    async fn test_home_feed_one_failure_keeps_other_slots() {
        // Arrange
        let stub = StubCatalog::new(Some(HomeSlot::PopularMovies));

        // Act
        let feed = fetch_home_feed(&stub).await;

        // Assert
        assert_eq!(stub.calls.load(Ordering::SeqCst), 6);
        let failures = feed.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, HomeSlot::PopularMovies);
        assert!(!feed.is_total_failure());
        for slot in HomeSlot::ALL {
            if slot != HomeSlot::PopularMovies {
                assert_eq!(feed.slot(slot).as_ref().unwrap().len(), 1, "{slot}");
            }
        }
    }

    #[tokio::test]
    async fn test_into_complete_reports_failed_slot() {
        // Arrange
        let stub = StubCatalog::new(Some(HomeSlot::TrendingTv));
        let feed = fetch_home_feed(&stub).await;

        // Act
        let err = feed.into_complete().unwrap_err();

        // Assert
        assert_eq!(err.endpoint(), "/trending/tv/week");
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[tokio::test]
    async fn test_home_feed_over_http_with_one_failing_endpoint() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let movies = include_str!("../../../../fixtures/tmdb/trending_movie_week.json");
        let tv = include_str!("../../../../fixtures/tmdb/trending_tv_week.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/3/movie/popular"))
            .respond_with(wiremock::ResponseTemplate::new(500))
            .expect(1)
            .mount(&mock_server)
            .await;
        for path in ["/3/trending/movie/week", "/3/movie/top_rated"] {
            wiremock::Mock::given(wiremock::matchers::method("GET"))
                .and(wiremock::matchers::path(path))
                .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(movies))
                .expect(1)
                .mount(&mock_server)
                .await;
        }
        for path in ["/3/trending/tv/week", "/3/tv/popular", "/3/tv/top_rated"] {
            wiremock::Mock::given(wiremock::matchers::method("GET"))
                .and(wiremock::matchers::path(path))
                .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(tv))
                .expect(1)
                .mount(&mock_server)
                .await;
        }

        let base_url = format!("{}/3/", mock_server.uri());
        let client = CatalogClient::builder()
            .base_url(base_url.parse().unwrap())
            .api_key("test-key")
            .user_agent("test/0.0.0")
            .build()
            .unwrap();

        // Act
        let feed = fetch_home_feed(&client).await;

        // Assert
        let failures = feed.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, HomeSlot::PopularMovies);
        assert_eq!(failures[0].1.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(feed.trending_movies.as_ref().unwrap().len(), 2);
        assert_eq!(feed.top_rated_tv.as_ref().unwrap().len(), 2);
        assert!(feed.into_complete().is_err());
    }

    #[tokio::test]
    async fn test_home_feed_total_failure() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let base_url = format!("{}/3/", mock_server.uri());
        let client = CatalogClient::builder()
            .base_url(base_url.parse().unwrap())
            .api_key("test-key")
            .user_agent("test/0.0.0")
            .build()
            .unwrap();

        // Act
        let feed = fetch_home_feed(&client).await;

        // Assert
        assert!(feed.is_total_failure());
        assert_eq!(feed.failures().len(), 6);
    }
}
