//! Light/dark theme preference.
//!
//! The chosen theme is persisted under a single key in a [`PreferenceStore`]
//! and mirrored onto a [`ThemeSurface`]. When nothing has been persisted yet
//! the ambient system preference decides, once, at initialization.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{SiteError, SiteResult};

/// Key the theme is stored under.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Accessible label for the toggle control while this theme is applied.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Theme::Light => "Switch to dark mode",
            Theme::Dark => "Switch to light mode",
        }
    }
}

/// Durable key-value storage for user preferences.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> SiteResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> SiteResult<()>;
}

/// Where the applied theme is reflected.
pub trait ThemeSurface {
    fn applied_theme(&self) -> Theme;
    fn apply_theme(&mut self, theme: Theme);
    /// Update the toggle control's label; no-op when there is no control.
    fn set_toggle_label(&mut self, label: &str);
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> SiteResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> SiteResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences kept in a small TOML file. A missing file reads as empty.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn read_all(&self) -> SiteResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        toml::from_str(&content).map_err(|e| {
            SiteError::Preference(format!("{}: {}", self.path.display(), e))
        })
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> SiteResult<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> SiteResult<()> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());

        let content = toml::to_string(&values)
            .map_err(|e| SiteError::Preference(e.to_string()))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

/// Apply the persisted theme, or the system preference when none is stored.
pub fn initialize(
    store: &dyn PreferenceStore,
    surface: &mut dyn ThemeSurface,
    system_prefers_dark: bool,
) -> SiteResult<Theme> {
    let theme = match store.get(THEME_KEY)? {
        Some(saved) if saved == Theme::Dark.as_str() => Theme::Dark,
        Some(_) => Theme::Light,
        None if system_prefers_dark => Theme::Dark,
        None => Theme::Light,
    };
    debug!("Initial theme: {}", theme.as_str());

    apply(surface, theme);
    Ok(theme)
}

/// Flip the applied theme and persist the result.
pub fn toggle(store: &mut dyn PreferenceStore, surface: &mut dyn ThemeSurface) -> SiteResult<Theme> {
    let theme = surface.applied_theme().toggled();
    store.set(THEME_KEY, theme.as_str())?;
    apply(surface, theme);
    Ok(theme)
}

fn apply(surface: &mut dyn ThemeSurface, theme: Theme) {
    surface.apply_theme(theme);
    surface.set_toggle_label(theme.toggle_label());
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[derive(Default)]
    struct FakeRoot {
        theme: Theme,
        label: Option<String>,
        has_control: bool,
    }

    impl ThemeSurface for FakeRoot {
        fn applied_theme(&self) -> Theme {
            self.theme
        }

        fn apply_theme(&mut self, theme: Theme) {
            self.theme = theme;
        }

        fn set_toggle_label(&mut self, label: &str) {
            if self.has_control {
                self.label = Some(label.to_string());
            }
        }
    }

    fn with_control() -> FakeRoot {
        FakeRoot {
            has_control: true,
            ..FakeRoot::default()
        }
    }

    mod initialize_tests {
        use super::*;

        #[test]
        fn test_saved_dark_wins_over_system_light() {
            let mut store = MemoryStore::new();
            store.set(THEME_KEY, "dark").unwrap();
            let mut root = with_control();

            let theme = initialize(&store, &mut root, false).unwrap();

            assert_eq!(theme, Theme::Dark);
            assert_eq!(root.theme, Theme::Dark);
            assert_eq!(root.label.as_deref(), Some("Switch to light mode"));
        }

        #[test]
        fn test_saved_light_wins_over_system_dark() {
            let mut store = MemoryStore::new();
            store.set(THEME_KEY, "light").unwrap();
            let mut root = with_control();

            assert_eq!(initialize(&store, &mut root, true).unwrap(), Theme::Light);
            assert_eq!(root.label.as_deref(), Some("Switch to dark mode"));
        }

        #[test]
        fn test_no_saved_value_uses_system_preference() {
            let store = MemoryStore::new();

            let mut root = with_control();
            assert_eq!(initialize(&store, &mut root, true).unwrap(), Theme::Dark);

            let mut root = with_control();
            assert_eq!(initialize(&store, &mut root, false).unwrap(), Theme::Light);
        }

        #[test]
        fn test_initialize_does_not_persist() {
            let store = MemoryStore::new();
            let mut root = with_control();

            initialize(&store, &mut root, true).unwrap();
            assert_eq!(store.get(THEME_KEY).unwrap(), None);
        }

        #[test]
        fn test_missing_control_tolerated() {
            let store = MemoryStore::new();
            let mut root = FakeRoot::default();

            assert_eq!(initialize(&store, &mut root, true).unwrap(), Theme::Dark);
            assert_eq!(root.label, None);
        }
    }

    mod toggle_tests {
        use super::*;

        #[test]
        fn test_toggle_twice_returns_to_light() {
            let mut store = MemoryStore::new();
            let mut root = with_control();
            initialize(&store, &mut root, false).unwrap();

            assert_eq!(toggle(&mut store, &mut root).unwrap(), Theme::Dark);
            assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));

            assert_eq!(toggle(&mut store, &mut root).unwrap(), Theme::Light);
            assert_eq!(root.theme, Theme::Light);
            assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("light"));
            assert_eq!(root.label.as_deref(), Some("Switch to dark mode"));
        }
    }

    mod file_store_tests {
        use super::*;

        #[test]
        fn test_missing_file_reads_empty() {
            let dir = tempdir().unwrap();
            let store = FileStore::new(dir.path().join("prefs.toml"));
            assert_eq!(store.get(THEME_KEY).unwrap(), None);
        }

        #[test]
        fn test_value_survives_reopen() {
            let dir = tempdir().unwrap();
            let path = dir.path().join("nested").join("prefs.toml");

            let mut store = FileStore::new(&path);
            store.set(THEME_KEY, "dark").unwrap();
            store.set("other", "kept").unwrap();

            let reopened = FileStore::new(&path);
            assert_eq!(reopened.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
            assert_eq!(reopened.get("other").unwrap().as_deref(), Some("kept"));
        }

        #[test]
        fn test_corrupt_file_is_an_error() {
            let dir = tempdir().unwrap();
            let path = dir.path().join("prefs.toml");
            std::fs::write(&path, "not = [valid").unwrap();

            let store = FileStore::new(&path);
            assert!(matches!(store.get(THEME_KEY), Err(SiteError::Preference(_))));
        }
    }
}
