use std::path::{Path, PathBuf};

use chrono::Locale;

/// Relative location of the published index, next to the page assets.
pub const DEFAULT_INDEX_PATH: &str = "data/index-min.json";

#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Index file; relative paths are resolved by the host against its
    /// asset directory.
    pub index_path: PathBuf,
    /// Locale of the publish dates shown on result cards.
    pub date_locale: Locale,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            index_path: PathBuf::from(DEFAULT_INDEX_PATH),
            date_locale: Locale::fr_FR,
        }
    }
}

impl SearchConfig {
    /// Index path anchored at `base` unless already absolute.
    pub fn resolve_index_path(&self, base: &Path) -> PathBuf {
        if self.index_path.is_absolute() {
            self.index_path.clone()
        } else {
            base.join(&self.index_path)
        }
    }
}
