use crate::app::models::{MovieDetail, MovieId, Video};
use crate::app::worker::{FetchOutcome, FetchRequest, Ticket};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DetailState {
    #[default]
    Idle,
    Loading,
    Loaded(Box<MovieDetail>),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TrailerSelection<'a> {
    Trailer(&'a Video),
    OtherVideos,
    NoVideos,
}

impl TrailerSelection<'_> {
    pub fn message(&self) -> Option<&'static str> {
        match self {
            TrailerSelection::Trailer(_) => None,
            TrailerSelection::OtherVideos => Some("No trailer available, but other videos exist."),
            TrailerSelection::NoVideos => Some("No videos available for this movie."),
        }
    }
}

/// First YouTube trailer, or why there is none.
pub fn select_trailer(videos: &[Video]) -> TrailerSelection<'_> {
    match videos.iter().find(|v| v.is_youtube_trailer()) {
        Some(video) => TrailerSelection::Trailer(video),
        None if videos.is_empty() => TrailerSelection::NoVideos,
        None => TrailerSelection::OtherVideos,
    }
}

/// State of the detail screen for one movie id at a time.
#[derive(Debug, Default)]
pub struct DetailView {
    movie_id: Option<MovieId>,
    state: DetailState,
    ticket: Ticket,
}

impl DetailView {
    /// Starts loading `movie_id`. Always refetches, so switching between two detail
    /// screens never shows the previous record.
    pub fn open(&mut self, movie_id: MovieId) -> FetchRequest {
        self.ticket += 1;
        self.movie_id = Some(movie_id);
        self.state = DetailState::Loading;
        tracing::debug!(movie_id, ticket = self.ticket, "Opening movie detail");

        FetchRequest::Details {
            ticket: self.ticket,
            movie_id,
        }
    }

    /// Forgets the current movie; responses still in flight will be dropped.
    pub fn close(&mut self) {
        self.ticket += 1;
        self.movie_id = None;
        self.state = DetailState::Idle;
    }

    /// Applies a details outcome. On success returns the poster request to issue next,
    /// if the movie has a poster.
    pub fn apply(&mut self, outcome: FetchOutcome) -> Option<FetchRequest> {
        let FetchOutcome::Details { ticket, result } = outcome else {
            return None;
        };
        if ticket != self.ticket {
            tracing::debug!(ticket, current = self.ticket, "Dropping stale detail response");
            return None;
        }

        match result {
            Ok(detail) => {
                let poster = detail
                    .poster_path
                    .clone()
                    .filter(|p| !p.is_empty())
                    .map(|poster_path| FetchRequest::Poster {
                        ticket: self.ticket,
                        poster_path,
                    });
                self.state = DetailState::Loaded(Box::new(detail));
                poster
            }
            Err(e) => {
                tracing::warn!(movie_id = ?self.movie_id, "Detail fetch failed: {}", e);
                self.state = DetailState::Failed(e.to_string());
                None
            }
        }
    }

    #[cfg(test)]
    pub fn movie_id(&self) -> Option<MovieId> {
        self.movie_id
    }

    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn detail(&self) -> Option<&MovieDetail> {
        match &self.state {
            DetailState::Loaded(detail) => Some(detail.as_ref()),
            _ => None,
        }
    }

    pub fn trailer(&self) -> Option<TrailerSelection<'_>> {
        self.detail().map(|d| select_trailer(&d.videos.results))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::{Credits, Videos};
    use crate::app::worker::execute;
    use crate::app::worker::fake::FakeApi;

    fn video(site: &str, kind: &str, key: &str) -> Video {
        Video {
            site: site.to_string(),
            kind: kind.to_string(),
            key: key.to_string(),
            name: None,
        }
    }

    fn detail(id: MovieId, poster: Option<&str>, videos: Vec<Video>) -> MovieDetail {
        MovieDetail {
            id,
            title: format!("Movie {}", id),
            poster_path: poster.map(str::to_string),
            release_date: Some("2010-07-16".to_string()),
            vote_average: Some(8.4),
            vote_count: 1000,
            overview: Some("Dreams within dreams.".to_string()),
            runtime: Some(148),
            status: None,
            tagline: None,
            genres: Vec::new(),
            credits: Credits::default(),
            videos: Videos { results: videos },
        }
    }

    #[test]
    fn picks_first_youtube_trailer() {
        let videos = vec![
            video("Vimeo", "Trailer", "v1"),
            video("YouTube", "Featurette", "y0"),
            video("YouTube", "Trailer", "y1"),
            video("YouTube", "Trailer", "y2"),
        ];
        match select_trailer(&videos) {
            TrailerSelection::Trailer(v) => assert_eq!(v.key, "y1"),
            other => panic!("expected trailer, got {:?}", other),
        }
    }

    #[test]
    fn distinguishes_other_videos_from_none() {
        let others = vec![video("YouTube", "Clip", "c1")];
        assert_eq!(select_trailer(&others), TrailerSelection::OtherVideos);
        assert_eq!(select_trailer(&[]), TrailerSelection::NoVideos);
        assert_ne!(
            TrailerSelection::OtherVideos.message(),
            TrailerSelection::NoVideos.message()
        );
    }

    #[test]
    fn missing_movie_reports_not_found() {
        let api = FakeApi::default();
        let mut view = DetailView::default();

        let request = view.open(999_999);
        assert_eq!(*view.state(), DetailState::Loading);
        let follow_up = view.apply(execute(&api, request));

        assert_eq!(follow_up, None);
        assert_eq!(
            *view.state(),
            DetailState::Failed("Movie not found.".to_string())
        );
    }

    #[test]
    fn loaded_detail_requests_its_poster() {
        let mut api = FakeApi::default();
        api.details.insert(27205, detail(27205, Some("/inception.jpg"), vec![]));
        let mut view = DetailView::default();

        let request = view.open(27205);
        let follow_up = view.apply(execute(&api, request));

        assert_eq!(
            follow_up,
            Some(FetchRequest::Poster {
                ticket: view.ticket(),
                poster_path: "/inception.jpg".to_string(),
            })
        );
        assert_eq!(view.detail().map(|d| d.id), Some(27205));
        assert_eq!(view.trailer(), Some(TrailerSelection::NoVideos));
    }

    #[test]
    fn switching_movies_discards_the_older_response() {
        let mut api = FakeApi::default();
        api.details.insert(1, detail(1, None, vec![]));
        api.details.insert(2, detail(2, None, vec![]));
        let mut view = DetailView::default();

        let first = view.open(1);
        let second = view.open(2);
        assert_eq!(view.state(), &DetailState::Loading);

        view.apply(execute(&api, second));
        view.apply(execute(&api, first));
        assert_eq!(view.detail().map(|d| d.id), Some(2));
        assert_eq!(view.movie_id(), Some(2));
    }

    #[test]
    fn reopening_refetches() {
        let mut api = FakeApi::default();
        api.details.insert(1, detail(1, None, vec![]));
        let mut view = DetailView::default();

        let request = view.open(1);
        view.apply(execute(&api, request));
        let again = view.open(1);
        assert!(matches!(again, FetchRequest::Details { movie_id: 1, .. }));
        assert_eq!(view.state(), &DetailState::Loading);
    }

    #[test]
    fn close_drops_in_flight_response() {
        let mut api = FakeApi::default();
        api.details.insert(1, detail(1, None, vec![]));
        let mut view = DetailView::default();

        let request = view.open(1);
        view.close();
        view.apply(execute(&api, request));
        assert_eq!(view.state(), &DetailState::Idle);
    }
}
