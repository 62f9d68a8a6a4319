//! `CatalogClient` - TMDB catalog API client implementation.

use std::fmt;
use std::sync::OnceLock;

use reqwest::header::{ACCEPT, CACHE_CONTROL, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use super::api::LocalCatalogApi;
use super::endpoint::Endpoint;
use super::error::{BuildError, CatalogError, Result};
use super::options::QueryOptions;
use super::types::{
    CatalogItem, ListEntry, MediaType, Page, SearchResults, ShowCredits, ShowDetails,
    TmdbErrorResponse,
};

/// Default base URL for TMDB API v3.
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Environment variable holding the API key when none is set explicitly.
pub const DEFAULT_API_KEY_ENV: &str = "TMDB_API_KEY";

/// Query parameters sent with every request, after `api_key`.
const DEFAULT_PARAMS: [(&str, &str); 5] = [
    ("include_adult", "false"),
    ("include_video", "false"),
    ("sort_by", "popularity.desc"),
    ("language", "en-US"),
    ("page", "1"),
];

/// Where the API key comes from.
enum ApiKeySource {
    /// Key given to the builder.
    Static(String),
    /// Environment variable read on first use.
    Env(String),
}

/// TMDB catalog API client.
///
/// The API key is resolved on the first call, not at construction, so a
/// process without a key can still build the client.
#[allow(clippy::module_name_repetitions)]
pub struct CatalogClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests (always ends with `/`).
    base_url: Url,
    /// API key source.
    api_key_source: ApiKeySource,
    /// Resolved API key; `None` when not configured.
    api_key: OnceLock<Option<String>>,
}

impl fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Builder for `CatalogClient`.
#[allow(clippy::module_name_repetitions)]
pub struct CatalogClientBuilder {
    base_url: Option<Url>,
    api_key_source: ApiKeySource,
    user_agent: Option<String>,
}

impl fmt::Debug for CatalogClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogClientBuilder")
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

impl CatalogClientBuilder {
    /// Creates a new builder.
    fn new() -> Self {
        Self {
            base_url: None,
            api_key_source: ApiKeySource::Env(String::from(DEFAULT_API_KEY_ENV)),
            user_agent: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API key explicitly.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key_source = ApiKeySource::Static(key.into());
        self
    }

    /// Reads the API key from the given environment variable on first use
    /// (default: `TMDB_API_KEY`).
    #[must_use]
    pub fn api_key_env(mut self, var: impl Into<String>) -> Self {
        self.api_key_source = ApiKeySource::Env(var.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `user_agent` is not set.
    /// - the base URL cannot be used as a base.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> std::result::Result<CatalogClient, BuildError> {
        let user_agent = self.user_agent.ok_or(BuildError::MissingUserAgent)?;

        let mut base_url = if let Some(url) = self.base_url {
            url
        } else {
            Url::parse(DEFAULT_BASE_URL)
                .map_err(|e| BuildError::InvalidBaseUrl(e.to_string()))?
        };
        if base_url.cannot_be_a_base() {
            return Err(BuildError::InvalidBaseUrl(base_url.to_string()));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()?;

        Ok(CatalogClient {
            http_client,
            base_url,
            api_key_source: self.api_key_source,
            api_key: OnceLock::new(),
        })
    }
}

impl CatalogClient {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> CatalogClientBuilder {
        CatalogClientBuilder::new()
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves the API key once; blank values count as missing.
    fn resolved_api_key(&self) -> Option<&str> {
        self.api_key
            .get_or_init(|| {
                let key = match &self.api_key_source {
                    ApiKeySource::Static(key) => Some(key.clone()),
                    ApiKeySource::Env(var) => std::env::var(var).ok(),
                };
                key.filter(|k| !k.trim().is_empty())
            })
            .as_deref()
    }

    /// Error returned when no API key is available.
    fn missing_api_key(&self, path: &str) -> CatalogError {
        let message = match &self.api_key_source {
            ApiKeySource::Env(var) => format!("catalog API key is not configured ({var})"),
            ApiKeySource::Static(_) => String::from("catalog API key is not configured"),
        };
        CatalogError::upstream(path, StatusCode::UNAUTHORIZED, message)
    }

    /// Builds the query: `api_key`, the defaults, then `options.additional_params`.
    /// A caller key that collides with a default replaces it in place.
    fn query_pairs(api_key: &str, options: &QueryOptions) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = Vec::with_capacity(
            DEFAULT_PARAMS
                .len()
                .saturating_add(1)
                .saturating_add(options.additional_params.len()),
        );
        pairs.push((String::from("api_key"), String::from(api_key)));
        pairs.extend(
            DEFAULT_PARAMS
                .iter()
                .map(|(k, v)| (String::from(*k), String::from(*v))),
        );

        for (key, value) in &options.additional_params {
            if let Some(slot) = pairs.iter_mut().find(|(k, _)| k == key) {
                slot.1.clone_from(value);
            } else {
                pairs.push((key.clone(), value.clone()));
            }
        }
        pairs
    }

    /// Builds the GET request for `path` with credential, defaults, overrides
    /// and the advisory cache header.
    fn build_request(
        &self,
        path: &str,
        options: &QueryOptions,
        api_key: &str,
    ) -> Result<reqwest::Request> {
        let url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| CatalogError::transport(path, e))?;

        let cache_control = format!(
            "max-age={}, stale-while-revalidate",
            options.effective_cache_time().as_secs()
        );

        self.http_client
            .get(url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .header(CACHE_CONTROL, cache_control)
            .query(&Self::query_pairs(api_key, options))
            .build()
            .map_err(|e| CatalogError::transport(path, e.without_url()))
    }

    /// Sends one GET request and decodes the JSON body into `T`.
    ///
    /// Use `serde_json::Value` as `T` for the raw body. Failures are logged
    /// once here and returned; nothing is retried.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Upstream`] on a non-success status or a missing API key.
    /// - [`CatalogError::Transport`] when the request cannot be sent, or the
    ///   body cannot be read or decoded.
    #[instrument(skip_all, fields(endpoint = path))]
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        options: &QueryOptions,
    ) -> Result<T> {
        let result = self.fetch_json(path, options).await;
        if let Err(ref err) = result {
            match err.status() {
                Some(status) => tracing::error!(
                    endpoint = path,
                    status = status.as_u16(),
                    error = %err,
                    "Catalog API request failed"
                ),
                None => tracing::error!(
                    endpoint = path,
                    error = %err,
                    "Catalog API request failed"
                ),
            }
        }
        result
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        path: &str,
        options: &QueryOptions,
    ) -> Result<T> {
        let Some(api_key) = self.resolved_api_key() else {
            return Err(self.missing_api_key(path));
        };
        let request = self.build_request(path, options, api_key)?;

        tracing::debug!(
            endpoint = path,
            cache_secs = options.effective_cache_time().as_secs(),
            "Catalog API request"
        );

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|e| CatalogError::transport(path, e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to read body>"));
            let message = serde_json::from_str::<TmdbErrorResponse>(&body).map_or_else(
                |_| String::from(status.canonical_reason().unwrap_or("unknown status")),
                |error_response| error_response.status_message,
            );
            return Err(CatalogError::upstream(path, status, message));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| CatalogError::transport(path, e.without_url()))?;
        tracing::debug!(endpoint = path, body_len = body.len(), "Response body received");

        serde_json::from_slice(&body).map_err(|e| CatalogError::transport(path, e))
    }

    /// Calls a named endpoint with per-call overrides layered on its fixed
    /// options (e.g. `page`, `language`). Overrides win on every key.
    ///
    /// # Errors
    ///
    /// Same as [`CatalogClient::get_json`].
    pub async fn get_endpoint<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        overrides: QueryOptions,
    ) -> Result<T> {
        let options = endpoint.options().merged(overrides);
        self.get_json(&endpoint.path(), &options).await
    }

    /// Calls a list endpoint and normalizes its `results`.
    async fn fetch_items(&self, endpoint: &Endpoint) -> Result<Vec<CatalogItem>> {
        let page: Page<ListEntry> = self.get_endpoint(endpoint, QueryOptions::new()).await?;
        Ok(page.into_items(&endpoint.path()))
    }

    /// Calls an endpoint whose body is returned as-is.
    async fn fetch_typed<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<T> {
        self.get_endpoint(endpoint, QueryOptions::new()).await
    }
}

impl LocalCatalogApi for CatalogClient {
    #[instrument(skip_all)]
    async fn trending_movies(&self) -> Result<Vec<CatalogItem>> {
        self.fetch_items(&Endpoint::TrendingMovies).await
    }

    #[instrument(skip_all)]
    async fn top_rated_movies(&self) -> Result<Vec<CatalogItem>> {
        self.fetch_items(&Endpoint::TopRatedMovies).await
    }

    #[instrument(skip_all)]
    async fn popular_movies(&self) -> Result<Vec<CatalogItem>> {
        self.fetch_items(&Endpoint::PopularMovies).await
    }

    #[instrument(skip_all)]
    async fn upcoming_movies(&self) -> Result<Vec<CatalogItem>> {
        self.fetch_items(&Endpoint::UpcomingMovies).await
    }

    #[instrument(skip_all)]
    async fn trending_tv(&self) -> Result<Vec<CatalogItem>> {
        self.fetch_items(&Endpoint::TrendingTv).await
    }

    #[instrument(skip_all)]
    async fn top_rated_tv(&self) -> Result<Vec<CatalogItem>> {
        self.fetch_items(&Endpoint::TopRatedTv).await
    }

    #[instrument(skip_all)]
    async fn popular_tv(&self) -> Result<Vec<CatalogItem>> {
        self.fetch_items(&Endpoint::PopularTv).await
    }

    #[instrument(skip_all)]
    async fn discover_movies(
        &self,
        genres: Option<&str>,
        keywords: Option<&str>,
    ) -> Result<Vec<CatalogItem>> {
        let endpoint = Endpoint::DiscoverMovies {
            genres: genres.map(String::from),
            keywords: keywords.map(String::from),
        };
        self.fetch_items(&endpoint).await
    }

    #[instrument(skip_all)]
    async fn search_movies(&self, query: &str) -> Result<Vec<CatalogItem>> {
        let endpoint = Endpoint::SearchMovies {
            query: String::from(query),
        };
        self.fetch_items(&endpoint).await
    }

    #[instrument(skip_all)]
    async fn search_multi(&self, query: &str) -> Result<Vec<CatalogItem>> {
        let endpoint = Endpoint::SearchMulti {
            query: String::from(query),
        };
        self.fetch_items(&endpoint).await
    }

    #[instrument(skip_all)]
    async fn show_details(&self, media_type: MediaType, id: u64) -> Result<ShowDetails> {
        self.fetch_typed(&Endpoint::Show { media_type, id }).await
    }

    #[instrument(skip_all)]
    async fn show_credits(&self, media_type: MediaType, id: u64) -> Result<ShowCredits> {
        self.fetch_typed(&Endpoint::ShowCredits { media_type, id })
            .await
    }

    #[instrument(skip_all)]
    async fn similar_shows(&self, media_type: MediaType, id: u64) -> Result<SearchResults> {
        self.fetch_typed(&Endpoint::SimilarShows { media_type, id })
            .await
    }

    #[instrument(skip_all)]
    async fn recommendations(&self, media_type: MediaType, id: u64) -> Result<SearchResults> {
        self.fetch_typed(&Endpoint::Recommendations { media_type, id })
            .await
    }
}
