use crate::normalize::normalize;
use crate::store::DocumentStore;
use crate::types::{Document, LiveFilter, Scope};

/// A parsed, non-empty query. Rebuilt from scratch on every input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub tokens: Vec<String>,
    pub scope: Scope,
    pub live_filter: LiveFilter,
}

impl Query {
    /// Returns `None` when the trimmed input is empty: such a query must not
    /// touch the displayed results at all.
    pub fn parse(raw: &str, scope: Scope, live_filter: LiveFilter) -> Option<Self> {
        let trimmed = raw.trim_matches(is_separator);
        if trimmed.is_empty() {
            return None;
        }
        let tokens = trimmed
            .split(is_separator)
            .map(normalize)
            .filter(|t| !t.is_empty())
            .collect();
        Some(Self {
            tokens,
            scope,
            live_filter,
        })
    }

    /// Live filter first, then every token must occur in at least one
    /// fragment of the field(s) selected by the scope.
    pub fn matches(&self, doc: &Document) -> bool {
        if !self.live_filter.admits(doc.is_live()) {
            return false;
        }
        self.tokens.iter().all(|token| {
            let in_title = || contains_token(&doc.normalized_title, token);
            let in_body = || contains_token(&doc.normalized_body, token);
            match self.scope {
                Scope::Title => in_title(),
                Scope::Body => in_body(),
                Scope::All => in_title() || in_body(),
            }
        })
    }
}

/// Whitespace as the page's text field understands it: Unicode `White_Space`
/// without NEL, plus the byte-order mark.
fn is_separator(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

fn contains_token(fragments: &[String], token: &str) -> bool {
    fragments.iter().any(|f| f.contains(token))
}

/// All matching documents, in store order. No ranking, no cap.
pub fn search<'a>(store: &'a DocumentStore, query: &Query) -> Vec<&'a Document> {
    let results: Vec<&Document> = store
        .documents()
        .iter()
        .filter(|doc| query.matches(doc))
        .collect();
    tracing::debug!(
        "Query {:?} ({:?}, {:?}) matched {} of {} documents",
        query.tokens,
        query.scope,
        query.live_filter,
        results.len(),
        store.len()
    );
    results
}
