use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

pub type MovieId = u64;

const YOUTUBE_WATCH_BASE: &str = "https://www.youtube.com/watch?v=";

/// One entry of a trending or search listing. Also the shape persisted for favorites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: MovieId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f32>,
    #[serde(default)]
    pub vote_count: u32,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
}

impl MovieSummary {
    pub fn release_year(&self) -> Option<i32> {
        release_year(self.release_date.as_deref())
    }
}

/// Year of a TMDB `YYYY-MM-DD` date. TMDB sends `""` for unknown dates.
pub fn release_year(date: Option<&str>) -> Option<i32> {
    let date = date?.trim();
    if date.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .map(|d| d.year())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Video {
    #[serde(default)]
    pub site: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl Video {
    pub fn is_youtube_trailer(&self) -> bool {
        self.site == "YouTube" && self.kind == "Trailer"
    }

    pub fn watch_url(&self) -> Option<String> {
        (self.site == "YouTube" && !self.key.is_empty())
            .then(|| format!("{}{}", YOUTUBE_WATCH_BASE, self.key))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum MovieStatus {
    Rumored,
    Planned,
    #[serde(rename = "In Production")]
    InProduction,
    #[serde(rename = "Post Production")]
    PostProduction,
    Released,
    Canceled,
    #[serde(other)]
    Unknown,
}

impl MovieStatus {
    pub fn label(&self) -> &'static str {
        match self {
            MovieStatus::Rumored => "Rumored",
            MovieStatus::Planned => "Planned",
            MovieStatus::InProduction => "In Production",
            MovieStatus::PostProduction => "Post Production",
            MovieStatus::Released => "Released",
            MovieStatus::Canceled => "Canceled",
            MovieStatus::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Videos {
    #[serde(default)]
    pub results: Vec<Video>,
}

/// Full record returned by `/movie/{id}?append_to_response=videos,credits`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MovieDetail {
    pub id: MovieId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f32>,
    #[serde(default)]
    pub vote_count: u32,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub status: Option<MovieStatus>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub credits: Credits,
    #[serde(default)]
    pub videos: Videos,
}

impl MovieDetail {
    pub fn release_year(&self) -> Option<i32> {
        release_year(self.release_date.as_deref())
    }

    /// The summary projection, used when favoriting from the detail screen.
    pub fn summary(&self) -> MovieSummary {
        MovieSummary {
            id: self.id,
            title: self.title.clone(),
            poster_path: self.poster_path.clone(),
            release_date: self.release_date.clone(),
            vote_average: self.vote_average,
            vote_count: self.vote_count,
            genre_ids: self.genres.iter().map(|g| g.id).collect(),
        }
    }
}

/// One page of `/search/movie`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchPage {
    #[serde(rename = "page", default = "first_page")]
    pub current_page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub results: Vec<MovieSummary>,
}

fn first_page() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_page_decodes_tmdb_payload() {
        let body = r#"{
            "page": 1,
            "results": [
                {
                    "adult": false,
                    "backdrop_path": "/b.jpg",
                    "genre_ids": [28, 80],
                    "id": 268,
                    "original_title": "Batman",
                    "poster_path": "/p.jpg",
                    "release_date": "1989-06-21",
                    "title": "Batman",
                    "vote_average": 7.2,
                    "vote_count": 7800
                },
                {
                    "id": 999,
                    "title": "Untitled Batman Project",
                    "poster_path": null,
                    "release_date": "",
                    "genre_ids": []
                }
            ],
            "total_pages": 12,
            "total_results": 231
        }"#;

        let page: SearchPage = serde_json::from_str(body).unwrap();
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_pages, 12);
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].release_year(), Some(1989));
        assert_eq!(page.results[0].vote_average, Some(7.2));
        assert_eq!(page.results[1].release_year(), None);
        assert_eq!(page.results[1].vote_average, None);
        assert_eq!(page.results[1].vote_count, 0);
    }

    #[test]
    fn detail_decodes_embedded_credits_and_videos() {
        let body = r#"{
            "id": 155,
            "title": "The Dark Knight",
            "overview": "Batman raises the stakes.",
            "runtime": 152,
            "status": "Released",
            "tagline": "Welcome to a world without rules.",
            "release_date": "2008-07-16",
            "vote_average": 8.5,
            "vote_count": 30000,
            "genres": [{"id": 18, "name": "Drama"}, {"id": 28, "name": "Action"}],
            "credits": {
                "cast": [
                    {"id": 3894, "name": "Christian Bale", "character": "Bruce Wayne", "profile_path": "/c.jpg"},
                    {"id": 1810, "name": "Heath Ledger", "character": "Joker", "profile_path": null}
                ],
                "crew": []
            },
            "videos": {
                "results": [
                    {"site": "YouTube", "type": "Teaser", "key": "abc"},
                    {"site": "YouTube", "type": "Trailer", "key": "EXeTwQWrcwY", "name": "Official Trailer"}
                ]
            }
        }"#;

        let detail: MovieDetail = serde_json::from_str(body).unwrap();
        assert_eq!(detail.status, Some(MovieStatus::Released));
        assert_eq!(detail.credits.cast.len(), 2);
        assert_eq!(detail.credits.cast[1].profile_path, None);
        assert_eq!(detail.videos.results.len(), 2);
        assert!(detail.videos.results[1].is_youtube_trailer());
        assert_eq!(
            detail.videos.results[1].watch_url().as_deref(),
            Some("https://www.youtube.com/watch?v=EXeTwQWrcwY")
        );

        let summary = detail.summary();
        assert_eq!(summary.id, 155);
        assert_eq!(summary.genre_ids, vec![18, 28]);
    }

    #[test]
    fn unknown_status_does_not_fail_decoding() {
        let detail: MovieDetail =
            serde_json::from_str(r#"{"id": 1, "title": "X", "status": "Lost Media"}"#).unwrap();
        assert_eq!(detail.status, Some(MovieStatus::Unknown));
        assert!(detail.credits.cast.is_empty());
        assert!(detail.videos.results.is_empty());
    }

    #[test]
    fn summary_round_trips_through_favorites_json() {
        let movie = MovieSummary {
            id: 603,
            title: "The Matrix".to_string(),
            poster_path: Some("/m.jpg".to_string()),
            release_date: Some("1999-03-30".to_string()),
            vote_average: Some(8.2),
            vote_count: 25000,
            genre_ids: vec![28, 878],
        };
        let json = serde_json::to_string(&vec![movie.clone()]).unwrap();
        let back: Vec<MovieSummary> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![movie]);
    }

    #[test]
    fn release_year_ignores_garbage() {
        assert_eq!(release_year(Some("2024-13-45")), None);
        assert_eq!(release_year(Some("   ")), None);
        assert_eq!(release_year(None), None);
        assert_eq!(release_year(Some("2001-09-11")), Some(2001));
    }
}
