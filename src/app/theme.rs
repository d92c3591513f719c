use std::fmt;

use crate::app::store::{PreferenceStore, THEME_KEY};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            _ => None,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Process-wide light/dark flag, mirrored to the preference store.
#[derive(Debug)]
pub struct ThemeRegistry {
    mode: ThemeMode,
    store: PreferenceStore,
}

impl ThemeRegistry {
    pub fn load(store: PreferenceStore) -> Self {
        let mode = match store.get_string(THEME_KEY) {
            None => ThemeMode::default(),
            Some(raw) => ThemeMode::parse(&raw).unwrap_or_else(|| {
                tracing::warn!(value = %raw, "Unknown theme mode in preferences, using light");
                ThemeMode::default()
            }),
        };
        Self { mode, store }
    }

    pub fn current(&self) -> ThemeMode {
        self.mode
    }

    pub fn toggle(&mut self) -> ThemeMode {
        self.mode = self.mode.flipped();
        self.store.set_string(THEME_KEY, self.mode.as_str());
        tracing::debug!(mode = %self.mode, "Theme toggled");
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_light() {
        let dir = tempfile::tempdir().unwrap();
        let theme = ThemeRegistry::load(PreferenceStore::open(dir.path()));
        assert_eq!(theme.current(), ThemeMode::Light);
    }

    #[test]
    fn toggle_persists() {
        let dir = tempfile::tempdir().unwrap();
        let mut theme = ThemeRegistry::load(PreferenceStore::open(dir.path()));
        assert_eq!(theme.toggle(), ThemeMode::Dark);

        let reloaded = ThemeRegistry::load(PreferenceStore::open(dir.path()));
        assert_eq!(reloaded.current(), ThemeMode::Dark);

        let mut reloaded = reloaded;
        reloaded.toggle();
        assert_eq!(
            PreferenceStore::open(dir.path()).get_string(THEME_KEY).as_deref(),
            Some("light")
        );
    }

    #[test]
    fn garbage_value_falls_back_to_light() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::open(dir.path());
        store.set_string(THEME_KEY, "solarized");
        assert_eq!(ThemeRegistry::load(store).current(), ThemeMode::Light);
    }
}
