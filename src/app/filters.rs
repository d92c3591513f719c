//! Genre / year / rating predicates over a loaded result list.
//!
//! Filtering is a pure function of (base list, predicate state). The base list is
//! never mutated, and the order in which predicates were set does not matter.

use crate::app::models::{Genre, MovieSummary};

pub const RATING_MIN: f32 = 0.0;
pub const RATING_MAX: f32 = 10.0;
pub const RATING_STEP: f32 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    genre_id: Option<u32>,
    year: Option<String>,
    min_rating: f32,
    max_rating: f32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            genre_id: None,
            year: None,
            min_rating: RATING_MIN,
            max_rating: RATING_MAX,
        }
    }
}

impl FilterState {
    pub fn genre_id(&self) -> Option<u32> {
        self.genre_id
    }

    pub fn year(&self) -> Option<&str> {
        self.year.as_deref()
    }

    pub fn rating_range(&self) -> (f32, f32) {
        (self.min_rating, self.max_rating)
    }

    pub fn is_active(&self) -> bool {
        *self != FilterState::default()
    }

    #[cfg(test)]
    pub fn set_genre(&mut self, genre_id: Option<u32>) {
        self.genre_id = genre_id;
    }

    /// Moves the genre filter to the next entry of `genres`, wrapping through "any".
    pub fn cycle_genre(&mut self, genres: &[Genre]) {
        self.genre_id = match self.genre_id {
            None => genres.first().map(|g| g.id),
            Some(current) => genres
                .iter()
                .position(|g| g.id == current)
                .and_then(|i| genres.get(i + 1))
                .map(|g| g.id),
        };
    }

    /// Accepts an empty string (clears the filter) or exactly four ASCII digits.
    /// Anything else is rejected and leaves the filter unchanged.
    pub fn set_year(&mut self, raw: &str) -> bool {
        let raw = raw.trim();
        if raw.is_empty() {
            self.year = None;
            return true;
        }
        if raw.len() == 4 && raw.chars().all(|c| c.is_ascii_digit()) {
            self.year = Some(raw.to_string());
            return true;
        }
        false
    }

    /// Sets both bounds, clamped into `0..=10`. Rejects `min > max`.
    pub fn set_rating_range(&mut self, min: f32, max: f32) -> bool {
        let min = min.clamp(RATING_MIN, RATING_MAX);
        let max = max.clamp(RATING_MIN, RATING_MAX);
        if min > max {
            return false;
        }
        self.min_rating = min;
        self.max_rating = max;
        true
    }

    pub fn raise_min(&mut self) -> bool {
        self.set_rating_range(self.min_rating + RATING_STEP, self.max_rating)
    }

    pub fn lower_min(&mut self) -> bool {
        self.set_rating_range(self.min_rating - RATING_STEP, self.max_rating)
    }

    pub fn raise_max(&mut self) -> bool {
        self.set_rating_range(self.min_rating, self.max_rating + RATING_STEP)
    }

    pub fn lower_max(&mut self) -> bool {
        self.set_rating_range(self.min_rating, self.max_rating - RATING_STEP)
    }

    pub fn clear(&mut self) {
        *self = FilterState::default();
    }

    pub fn matches(&self, movie: &MovieSummary) -> bool {
        self.matches_genre(movie) && self.matches_year(movie) && self.matches_rating(movie)
    }

    fn matches_genre(&self, movie: &MovieSummary) -> bool {
        match self.genre_id {
            None => true,
            Some(id) => movie.genre_ids.contains(&id),
        }
    }

    fn matches_year(&self, movie: &MovieSummary) -> bool {
        let Some(year) = &self.year else {
            return true;
        };
        movie
            .release_year()
            .is_some_and(|y| y.to_string() == *year)
    }

    fn matches_rating(&self, movie: &MovieSummary) -> bool {
        match movie.vote_average {
            Some(rating) => rating >= self.min_rating && rating <= self.max_rating,
            // Unrated movies only pass the default, inclusive lower bound.
            None => self.min_rating == RATING_MIN,
        }
    }

    pub fn apply(&self, movies: &[MovieSummary]) -> Vec<MovieSummary> {
        movies.iter().filter(|m| self.matches(m)).cloned().collect()
    }
}
