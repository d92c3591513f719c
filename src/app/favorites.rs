use crate::app::models::{MovieId, MovieSummary};
use crate::app::store::{FAVORITES_KEY, PreferenceStore};

/// The user's favorite movies, in the order they were added.
///
/// At most one entry per movie id. Every mutation rewrites the whole list to the store.
#[derive(Debug)]
pub struct Favorites {
    movies: Vec<MovieSummary>,
    store: PreferenceStore,
}

impl Favorites {
    pub fn load(store: PreferenceStore) -> Self {
        let mut movies: Vec<MovieSummary> = store.get_json(FAVORITES_KEY);
        // Older files may carry duplicates; keep the first occurrence.
        let mut seen = std::collections::HashSet::new();
        movies.retain(|m| seen.insert(m.id));
        tracing::info!(count = movies.len(), "Loaded favorites");

        Self { movies, store }
    }

    pub fn add(&mut self, movie: MovieSummary) {
        if !self.is_favorite(movie.id) {
            tracing::debug!(movie_id = movie.id, "Adding favorite");
            self.movies.push(movie);
        }
        self.persist();
    }

    pub fn remove(&mut self, movie_id: MovieId) {
        self.movies.retain(|m| m.id != movie_id);
        self.persist();
    }

    /// Adds the movie if absent, removes it otherwise. Returns the new status.
    pub fn toggle(&mut self, movie: MovieSummary) -> bool {
        if self.is_favorite(movie.id) {
            self.remove(movie.id);
            false
        } else {
            self.add(movie);
            true
        }
    }

    pub fn is_favorite(&self, movie_id: MovieId) -> bool {
        self.movies.iter().any(|m| m.id == movie_id)
    }

    pub fn list(&self) -> &[MovieSummary] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    fn persist(&self) {
        self.store.set_json(FAVORITES_KEY, &self.movies);
    }
}
