//! Named endpoint bindings.
//!
//! Each facade operation is one `Endpoint` variant: a fixed path plus the
//! options it is always called with.

use super::options::{QueryOptions, SEARCH_CACHE_TIME};
use super::types::MediaType;

/// A catalog endpoint bound to its path and options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// `/trending/movie/week`
    TrendingMovies,
    /// `/movie/top_rated`
    TopRatedMovies,
    /// `/movie/popular`
    PopularMovies,
    /// `/movie/upcoming`
    UpcomingMovies,
    /// `/trending/tv/week`
    TrendingTv,
    /// `/tv/top_rated`
    TopRatedTv,
    /// `/tv/popular`
    PopularTv,
    /// `/discover/movie` filtered by genre and/or keyword IDs.
    DiscoverMovies {
        /// `with_genres` value.
        genres: Option<String>,
        /// `with_keywords` value.
        keywords: Option<String>,
    },
    /// `/search/movie`
    SearchMovies {
        /// Free-text query.
        query: String,
    },
    /// `/search/multi`
    SearchMulti {
        /// Free-text query.
        query: String,
    },
    /// `/{media_type}/{id}`
    Show {
        /// Endpoint family.
        media_type: MediaType,
        /// TMDB ID.
        id: u64,
    },
    /// `/{media_type}/{id}/credits`
    ShowCredits {
        /// Endpoint family.
        media_type: MediaType,
        /// TMDB ID.
        id: u64,
    },
    /// `/{media_type}/{id}/similar`
    SimilarShows {
        /// Endpoint family.
        media_type: MediaType,
        /// TMDB ID.
        id: u64,
    },
    /// `/{media_type}/{id}/recommendations`
    Recommendations {
        /// Endpoint family.
        media_type: MediaType,
        /// TMDB ID.
        id: u64,
    },
}

impl Endpoint {
    /// Endpoint path relative to the API base URL.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::TrendingMovies => String::from("/trending/movie/week"),
            Self::TopRatedMovies => String::from("/movie/top_rated"),
            Self::PopularMovies => String::from("/movie/popular"),
            Self::UpcomingMovies => String::from("/movie/upcoming"),
            Self::TrendingTv => String::from("/trending/tv/week"),
            Self::TopRatedTv => String::from("/tv/top_rated"),
            Self::PopularTv => String::from("/tv/popular"),
            Self::DiscoverMovies { .. } => String::from("/discover/movie"),
            Self::SearchMovies { .. } => String::from("/search/movie"),
            Self::SearchMulti { .. } => String::from("/search/multi"),
            Self::Show { media_type, id } => format!("/{media_type}/{id}"),
            Self::ShowCredits { media_type, id } => format!("/{media_type}/{id}/credits"),
            Self::SimilarShows { media_type, id } => format!("/{media_type}/{id}/similar"),
            Self::Recommendations { media_type, id } => {
                format!("/{media_type}/{id}/recommendations")
            }
        }
    }

    /// Options this endpoint is always called with.
    #[must_use]
    pub fn options(&self) -> QueryOptions {
        match self {
            Self::DiscoverMovies { genres, keywords } => {
                let mut options = QueryOptions::new();
                if let Some(keywords) = keywords.as_deref().filter(|k| !k.is_empty()) {
                    options = options.param("with_keywords", keywords);
                }
                if let Some(genres) = genres.as_deref().filter(|g| !g.is_empty()) {
                    options = options.param("with_genres", genres);
                }
                options
            }
            Self::SearchMovies { query } | Self::SearchMulti { query } => QueryOptions::new()
                .param("query", query.as_str())
                .cache_time(SEARCH_CACHE_TIME),
            Self::TopRatedTv | Self::PopularTv => QueryOptions::new()
                .param("language", "en-US")
                .param("page", "1"),
            _ => QueryOptions::new(),
        }
    }

    /// Every list and detail binding, for exhaustive checks.
    #[cfg(test)]
    pub(crate) fn all(query: &str, media_type: MediaType, id: u64) -> Vec<Self> {
        let query = String::from(query);
        vec![
            Self::TrendingMovies,
            Self::TopRatedMovies,
            Self::PopularMovies,
            Self::UpcomingMovies,
            Self::TrendingTv,
            Self::TopRatedTv,
            Self::PopularTv,
            Self::DiscoverMovies {
                genres: Some(String::from("28")),
                keywords: None,
            },
            Self::SearchMovies {
                query: query.clone(),
            },
            Self::SearchMulti { query },
            Self::Show { media_type, id },
            Self::ShowCredits { media_type, id },
            Self::SimilarShows { media_type, id },
            Self::Recommendations { media_type, id },
        ]
    }

    /// Returns `true` for free-text search bindings.
    #[cfg(test)]
    pub(crate) const fn is_search(&self) -> bool {
        matches!(self, Self::SearchMovies { .. } | Self::SearchMulti { .. })
    }
}
