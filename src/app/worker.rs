//! Runs gateway calls off the UI thread.
//!
//! Orchestrators describe the work they want as a [`FetchRequest`]. The worker runs it
//! on a background thread and hands the [`FetchOutcome`] back over a channel that the
//! event loop drains. Each request carries the ticket it was issued under so stale
//! responses can be recognized and dropped.

use std::sync::Arc;
use std::sync::mpsc;
use std::thread;

use image::DynamicImage;

use crate::app::error::GatewayError;
use crate::app::models::{Genre, MovieDetail, MovieId, MovieSummary, SearchPage};
use crate::app::tmdb::{MovieApi, TrendingWindow};

pub type Ticket = u64;

#[derive(Debug, Clone, PartialEq)]
pub enum FetchRequest {
    Trending {
        ticket: Ticket,
        window: TrendingWindow,
    },
    Search {
        ticket: Ticket,
        query: String,
        page: u32,
    },
    Details {
        ticket: Ticket,
        movie_id: MovieId,
    },
    Genres,
    Poster {
        ticket: Ticket,
        poster_path: String,
    },
}

#[derive(Debug)]
pub enum FetchOutcome {
    Trending {
        ticket: Ticket,
        result: Result<Vec<MovieSummary>, GatewayError>,
    },
    Search {
        ticket: Ticket,
        page: u32,
        result: Result<SearchPage, GatewayError>,
    },
    Details {
        ticket: Ticket,
        result: Result<MovieDetail, GatewayError>,
    },
    Genres {
        result: Result<Vec<Genre>, GatewayError>,
    },
    Poster {
        ticket: Ticket,
        result: Result<DynamicImage, GatewayError>,
    },
}

/// Performs one request synchronously.
pub fn execute(api: &dyn MovieApi, request: FetchRequest) -> FetchOutcome {
    match request {
        FetchRequest::Trending { ticket, window } => FetchOutcome::Trending {
            ticket,
            result: api.fetch_trending(window),
        },
        FetchRequest::Search {
            ticket,
            query,
            page,
        } => FetchOutcome::Search {
            ticket,
            page,
            result: api.search(&query, page),
        },
        FetchRequest::Details { ticket, movie_id } => FetchOutcome::Details {
            ticket,
            result: api.fetch_details(movie_id),
        },
        FetchRequest::Genres => FetchOutcome::Genres {
            result: api.fetch_genres(),
        },
        FetchRequest::Poster {
            ticket,
            poster_path,
        } => FetchOutcome::Poster {
            ticket,
            result: api.fetch_poster(&poster_path).and_then(|bytes| decode_poster(&bytes)),
        },
    }
}

fn decode_poster(bytes: &[u8]) -> Result<DynamicImage, GatewayError> {
    image::load_from_memory(bytes).map_err(|e| GatewayError::Malformed {
        detail: format!("poster image: {}", e),
    })
}

pub struct Worker {
    api: Arc<dyn MovieApi>,
    sender: mpsc::Sender<FetchOutcome>,
}

impl Worker {
    pub fn new(api: Arc<dyn MovieApi>) -> (Self, mpsc::Receiver<FetchOutcome>) {
        let (sender, receiver) = mpsc::channel();
        (Self { api, sender }, receiver)
    }

    pub fn dispatch(&self, request: FetchRequest) {
        let api = Arc::clone(&self.api);
        let sender = self.sender.clone();
        tracing::trace!(?request, "Dispatching fetch");

        thread::spawn(move || {
            let outcome = execute(api.as_ref(), request);
            // The receiver is gone only when the app is shutting down.
            let _ = sender.send(outcome);
        });
    }

    pub fn dispatch_all(&self, requests: impl IntoIterator<Item = FetchRequest>) {
        for request in requests {
            self.dispatch(request);
        }
    }
}
