use chrono::Locale;
use serde::Serialize;

use crate::duration::format_duration;
use crate::types::Document;

/// Text shown in place of the list when a query matched nothing.
pub const NO_RESULTS_MESSAGE: &str = "Aucun résultat.";

pub fn watch_url(id: &str) -> String {
    format!("https://www.youtube.com/watch?v={id}")
}

pub fn thumbnail_url(id: &str) -> String {
    format!("https://i.ytimg.com/vi/{id}/hqdefault.jpg")
}

/// Everything the page needs to draw one result row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoCard {
    pub id: String,
    pub watch_url: String,
    pub thumbnail_url: String,
    /// Raw title, never the normalized one.
    pub title: String,
    pub duration: String,
    pub published: String,
}

impl VideoCard {
    pub fn from_document(doc: &Document, locale: Locale) -> Self {
        let id = doc.id();
        Self {
            id: id.to_string(),
            watch_url: watch_url(id),
            thumbnail_url: thumbnail_url(id),
            title: doc.display_title(),
            duration: format_duration(doc.raw.duration),
            published: doc.raw.at.localized(locale),
        }
    }
}

/// A freshly rendered result list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Rendered {
    NoResults { message: String },
    Cards { cards: Vec<VideoCard> },
}

impl Rendered {
    pub fn is_empty(&self) -> bool {
        matches!(self, Rendered::NoResults { .. })
    }

    pub fn ids(&self) -> Vec<&str> {
        match self {
            Rendered::NoResults { .. } => Vec::new(),
            Rendered::Cards { cards } => cards.iter().map(|c| c.id.as_str()).collect(),
        }
    }
}

pub fn render(results: &[&Document], locale: Locale) -> Rendered {
    if results.is_empty() {
        return Rendered::NoResults {
            message: NO_RESULTS_MESSAGE.to_string(),
        };
    }
    Rendered::Cards {
        cards: results
            .iter()
            .map(|doc| VideoCard::from_document(doc, locale))
            .collect(),
    }
}
