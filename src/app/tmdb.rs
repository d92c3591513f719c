//! TMDB (The Movie Database) gateway.
//!
//! Stateless request/response wrapper. Every failure is normalized into a
//! [`GatewayError`] before it leaves this module.

use std::fmt;

use reqwest::blocking::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::app::error::GatewayError;
use crate::app::models::{Genre, MovieDetail, MovieId, MovieSummary, SearchPage};

pub const TMDB_BASE: &str = "https://api.themoviedb.org/3";
pub const POSTER_BASE: &str = "https://image.tmdb.org/t/p/w500";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrendingWindow {
    #[default]
    Day,
    Week,
}

impl TrendingWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendingWindow::Day => "day",
            TrendingWindow::Week => "week",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "day" => Some(TrendingWindow::Day),
            "week" => Some(TrendingWindow::Week),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            TrendingWindow::Day => TrendingWindow::Week,
            TrendingWindow::Week => TrendingWindow::Day,
        }
    }
}

impl fmt::Display for TrendingWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The remote movie-data API as the rest of the app sees it.
///
/// `search` does not validate the query; callers trim and reject empty queries.
pub trait MovieApi: Send + Sync {
    fn fetch_trending(&self, window: TrendingWindow) -> Result<Vec<MovieSummary>, GatewayError>;
    fn search(&self, query: &str, page: u32) -> Result<SearchPage, GatewayError>;
    fn fetch_details(&self, movie_id: MovieId) -> Result<MovieDetail, GatewayError>;
    fn fetch_genres(&self) -> Result<Vec<Genre>, GatewayError>;
    fn fetch_poster(&self, poster_path: &str) -> Result<Vec<u8>, GatewayError>;
}

#[derive(Debug, Clone)]
pub struct TmdbClient {
    client: Client,
    api_key: String,
    base_url: String,
    image_base_url: String,
}

#[derive(Deserialize)]
struct ResultsResponse<T> {
    #[serde(default = "Vec::new")]
    results: Vec<T>,
}

#[derive(Deserialize)]
struct GenresResponse {
    #[serde(default)]
    genres: Vec<Genre>,
}

impl TmdbClient {
    pub fn with_base_urls(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        image_base_url: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            image_base_url: image_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str, params: &[(&str, String)]) -> String {
        let mut url = format!(
            "{}{}?api_key={}",
            self.base_url,
            path,
            urlencoding::encode(&self.api_key)
        );
        for (name, value) in params {
            url.push('&');
            url.push_str(name);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, GatewayError> {
        let url = self.endpoint(path, params);
        tracing::debug!(path, "TMDB request");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| GatewayError::from_transport(&e))?;
        let status = response.status();
        let text = response
            .text()
            .map_err(|e| GatewayError::from_transport(&e))?;

        decode_response(status.as_u16(), &text).inspect_err(|err| {
            tracing::warn!(path, status = status.as_u16(), "TMDB request failed: {:?}", err);
        })
    }
}

/// Turns a status code and body into the decoded payload or a [`GatewayError`].
fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, GatewayError> {
    if !(200..300).contains(&status) {
        return Err(GatewayError::from_response(status, body));
    }
    serde_json::from_str(body).map_err(|e| GatewayError::Malformed {
        detail: e.to_string(),
    })
}

impl MovieApi for TmdbClient {
    fn fetch_trending(&self, window: TrendingWindow) -> Result<Vec<MovieSummary>, GatewayError> {
        let data: ResultsResponse<MovieSummary> =
            self.get_json(&format!("/trending/movie/{}", window.as_str()), &[])?;
        Ok(data.results)
    }

    fn search(&self, query: &str, page: u32) -> Result<SearchPage, GatewayError> {
        self.get_json(
            "/search/movie",
            &[
                ("query", query.to_string()),
                ("page", page.to_string()),
                ("include_adult", "false".to_string()),
            ],
        )
    }

    fn fetch_details(&self, movie_id: MovieId) -> Result<MovieDetail, GatewayError> {
        self.get_json(
            &format!("/movie/{}", movie_id),
            &[("append_to_response", "videos,credits".to_string())],
        )
        .map_err(GatewayError::not_found_on_404)
    }

    fn fetch_genres(&self) -> Result<Vec<Genre>, GatewayError> {
        let data: GenresResponse = self.get_json("/genre/movie/list", &[])?;
        Ok(data.genres)
    }

    fn fetch_poster(&self, poster_path: &str) -> Result<Vec<u8>, GatewayError> {
        let url = format!("{}{}", self.image_base_url, poster_path);
        tracing::debug!(poster_path, "Downloading poster");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| GatewayError::from_transport(&e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::from_response(status.as_u16(), ""));
        }

        let bytes = response
            .bytes()
            .map_err(|e| GatewayError::from_transport(&e))?;
        Ok(bytes.to_vec())
    }
}
