//! Catalog response types.
//!
//! List endpoints are normalized into [`CatalogItem`]; detail endpoints are
//! decoded into typed structs without further transformation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Base URL for TMDB image assets.
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/";

// --- Media type ---

/// Upstream endpoint family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// Feature films (`movie`).
    Movie,
    /// Television series (`tv`).
    Tv,
}

impl MediaType {
    /// Path segment used by the catalog API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown media type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown media type: {0} (expected \"movie\" or \"tv\")")]
pub struct ParseMediaTypeError(String);

impl FromStr for MediaType {
    type Err = ParseMediaTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(Self::Movie),
            "tv" => Ok(Self::Tv),
            other => Err(ParseMediaTypeError(String::from(other))),
        }
    }
}

// --- Catalog item ---

/// Fields shared by films and series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemInfo {
    /// TMDB ID.
    pub id: u64,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
    /// Average rating (0.0-10.0).
    pub vote_average: Option<f64>,
    /// Overview text.
    pub overview: Option<String>,
    /// Release date (films) or first air date (series).
    pub air_date: Option<String>,
}

/// A movie or TV series from a list endpoint.
///
/// The variant comes from `media_type` when the upstream entry carries one;
/// otherwise a non-empty `name` marks a series and `title` a film.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "media_type")]
#[allow(clippy::module_name_repetitions)]
pub enum CatalogItem {
    /// A feature film.
    #[serde(rename = "movie")]
    Film {
        /// Localized title.
        title: String,
        /// Shared fields.
        #[serde(flatten)]
        info: ItemInfo,
    },
    /// A TV series.
    #[serde(rename = "tv")]
    Series {
        /// Localized name.
        name: String,
        /// Shared fields.
        #[serde(flatten)]
        info: ItemInfo,
    },
}

impl CatalogItem {
    /// Shared fields.
    #[must_use]
    pub const fn info(&self) -> &ItemInfo {
        match self {
            Self::Film { info, .. } | Self::Series { info, .. } => info,
        }
    }

    /// TMDB ID.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.info().id
    }

    /// Endpoint family of this item.
    #[must_use]
    pub const fn media_type(&self) -> MediaType {
        match self {
            Self::Film { .. } => MediaType::Movie,
            Self::Series { .. } => MediaType::Tv,
        }
    }

    /// Title for films, name for series.
    #[must_use]
    pub fn display_title(&self) -> &str {
        match self {
            Self::Film { title, .. } => title,
            Self::Series { name, .. } => name,
        }
    }

    /// Poster path, falling back to the backdrop.
    #[must_use]
    pub fn image_path(&self) -> Option<&str> {
        let info = self.info();
        info.poster_path
            .as_deref()
            .or(info.backdrop_path.as_deref())
    }

    /// Full image URL at the given size (e.g. `w500`, `original`).
    #[must_use]
    pub fn image_url(&self, size: &str) -> Option<String> {
        self.image_path()
            .map(|path| format!("{IMAGE_BASE_URL}{size}{path}"))
    }

    /// Routing slug: `/title/{media_type}/{title_with_underscores}/{id}`.
    #[must_use]
    pub fn route(&self) -> String {
        let slug = self.display_title().split(' ').collect::<Vec<_>>().join("_");
        format!("/title/{}/{}/{}", self.media_type(), slug, self.id())
    }
}

/// Wire shape of a list entry before normalization.
#[derive(Debug, Deserialize)]
struct RawCatalogItem {
    id: u64,
    #[serde(default)]
    media_type: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    poster_path: Option<String>,
    #[serde(default)]
    backdrop_path: Option<String>,
    #[serde(default)]
    vote_average: Option<f64>,
    #[serde(default)]
    overview: Option<String>,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default)]
    first_air_date: Option<String>,
}

impl RawCatalogItem {
    fn is_person(&self) -> bool {
        self.media_type.as_deref() == Some("person")
    }
}

impl TryFrom<RawCatalogItem> for CatalogItem {
    type Error = String;

    fn try_from(raw: RawCatalogItem) -> Result<Self, Self::Error> {
        let id = raw.id;
        let film = match raw.media_type.as_deref() {
            Some("movie") => true,
            Some("tv") => false,
            Some(other) => return Err(format!("entry {id} has unsupported media_type {other:?}")),
            None if raw.name.as_deref().is_some_and(|n| !n.is_empty()) => false,
            None if raw.title.is_some() => true,
            None => return Err(format!("entry {id} has neither title nor name")),
        };

        let non_empty = |s: Option<String>| s.filter(|v| !v.is_empty());
        let air_date = if film {
            non_empty(raw.release_date)
        } else {
            non_empty(raw.first_air_date)
        };
        let info = ItemInfo {
            id,
            poster_path: raw.poster_path,
            backdrop_path: raw.backdrop_path,
            vote_average: raw.vote_average,
            overview: raw.overview,
            air_date,
        };

        if film {
            let title = raw
                .title
                .ok_or_else(|| format!("movie entry {id} has no title"))?;
            Ok(Self::Film { title, info })
        } else {
            let name = raw
                .name
                .ok_or_else(|| format!("tv entry {id} has no name"))?;
            Ok(Self::Series { name, info })
        }
    }
}

impl<'de> Deserialize<'de> for CatalogItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawCatalogItem::deserialize(deserializer)?;
        Self::try_from(raw).map_err(serde::de::Error::custom)
    }
}

/// An entry of a mixed result list; `search/multi` also returns people.
#[derive(Debug)]
pub(crate) enum ListEntry {
    /// A film or series.
    Item(CatalogItem),
    /// A person entry (not a catalog item).
    Person {
        /// TMDB person ID.
        id: u64,
    },
}

impl<'de> Deserialize<'de> for ListEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawCatalogItem::deserialize(deserializer)?;
        if raw.is_person() {
            return Ok(Self::Person { id: raw.id });
        }
        CatalogItem::try_from(raw)
            .map(Self::Item)
            .map_err(serde::de::Error::custom)
    }
}

// --- Paginated responses ---

const fn first_page() -> u32 {
    1
}

/// A page of results with pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Current page number.
    #[serde(default = "first_page")]
    pub page: u32,
    /// Results on this page.
    pub results: Vec<T>,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: u32,
    /// Total number of results.
    #[serde(default)]
    pub total_results: u32,
}

/// Results of similarity, recommendation and search queries.
pub type SearchResults = Page<CatalogItem>;

impl Page<ListEntry> {
    /// Drops person entries, preserving the order of catalog items.
    pub(crate) fn into_items(self, endpoint: &str) -> Vec<CatalogItem> {
        self.results
            .into_iter()
            .filter_map(|entry| match entry {
                ListEntry::Item(item) => Some(item),
                ListEntry::Person { id } => {
                    tracing::debug!(endpoint, person_id = id, "Skipping person entry");
                    None
                }
            })
            .collect()
    }
}

// --- Show details ---

/// Genre entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}

/// Response from `{media_type}/{id}`.
///
/// Movie-only and TV-only fields are optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(clippy::module_name_repetitions)]
pub struct ShowDetails {
    /// TMDB ID.
    pub id: u64,
    /// Movie title.
    #[serde(default)]
    pub title: Option<String>,
    /// Series name.
    #[serde(default)]
    pub name: Option<String>,
    /// Original movie title.
    #[serde(default)]
    pub original_title: Option<String>,
    /// Original series name.
    #[serde(default)]
    pub original_name: Option<String>,
    /// Original language (ISO 639-1).
    #[serde(default)]
    pub original_language: Option<String>,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Tagline.
    #[serde(default)]
    pub tagline: Option<String>,
    /// Status (e.g. "Released", "Returning Series").
    #[serde(default)]
    pub status: Option<String>,
    /// Homepage URL.
    #[serde(default)]
    pub homepage: Option<String>,
    /// Genres.
    #[serde(default)]
    pub genres: Vec<Genre>,
    /// Runtime in minutes (movies).
    #[serde(default)]
    pub runtime: Option<u32>,
    /// Episode runtimes in minutes (TV).
    #[serde(default)]
    pub episode_run_time: Vec<u32>,
    /// Release date (movies).
    #[serde(default)]
    pub release_date: Option<String>,
    /// First air date (TV).
    #[serde(default)]
    pub first_air_date: Option<String>,
    /// Number of seasons (TV).
    #[serde(default)]
    pub number_of_seasons: Option<u32>,
    /// Number of episodes (TV).
    #[serde(default)]
    pub number_of_episodes: Option<u32>,
    /// Vote average.
    #[serde(default)]
    pub vote_average: Option<f64>,
    /// Vote count.
    #[serde(default)]
    pub vote_count: Option<u32>,
    /// Popularity score.
    #[serde(default)]
    pub popularity: Option<f64>,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop image path.
    #[serde(default)]
    pub backdrop_path: Option<String>,
}

impl ShowDetails {
    /// Title for movies, name for series.
    #[must_use]
    pub fn display_title(&self) -> Option<&str> {
        self.title.as_deref().or(self.name.as_deref())
    }
}

// --- Credits ---

/// Cast member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastMember {
    /// TMDB person ID.
    pub id: u64,
    /// Person name.
    pub name: String,
    /// Character played.
    #[serde(default)]
    pub character: Option<String>,
    /// Profile image path.
    #[serde(default)]
    pub profile_path: Option<String>,
    /// Billing order.
    #[serde(default)]
    pub order: Option<u32>,
}

/// Crew member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewMember {
    /// TMDB person ID.
    pub id: u64,
    /// Person name.
    pub name: String,
    /// Job title (e.g. "Director").
    #[serde(default)]
    pub job: Option<String>,
    /// Department (e.g. "Directing").
    #[serde(default)]
    pub department: Option<String>,
    /// Profile image path.
    #[serde(default)]
    pub profile_path: Option<String>,
}

/// Response from `{media_type}/{id}/credits`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::module_name_repetitions)]
pub struct ShowCredits {
    /// TMDB ID of the show.
    pub id: u64,
    /// Cast list in billing order.
    #[serde(default)]
    pub cast: Vec<CastMember>,
    /// Crew list.
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TmdbErrorResponse {
    /// TMDB error code.
    #[allow(dead_code)]
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
}
