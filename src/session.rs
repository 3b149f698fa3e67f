use std::sync::Arc;

use anyhow::Result;
use chrono::Locale;
use serde::{Deserialize, Serialize};

use crate::query::{search, Query};
use crate::render::{render, Rendered};
use crate::store::{DocumentStore, LoadPhase, LoadState};
use crate::types::{LiveFilter, Scope};

/// One input-change signal from the page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum InputChange {
    Query(String),
    Scope(Scope),
    LiveFilter(LiveFilter),
}

/// What the page should do after an input change.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Outcome {
    /// Empty query: keep whatever is on screen.
    Unchanged,
    Show { rendered: Rendered },
}

/// An outcome stamped with the revision of the inputs it was computed from.
/// The page ignores updates older than the newest one it has applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchUpdate {
    pub revision: u64,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct StoreStatus {
    pub state: LoadPhase,
    pub documents: usize,
    pub error: Option<String>,
}

/// Per-session search state: the store lifecycle, the current inputs and
/// the result set currently on screen.
#[derive(Debug)]
pub struct SearchSession {
    load_state: LoadState,
    query: String,
    scope: Scope,
    live_filter: LiveFilter,
    displayed: Option<Rendered>,
    revision: u64,
    locale: Locale,
}

impl SearchSession {
    pub fn new(locale: Locale) -> Self {
        Self {
            load_state: LoadState::Unloaded,
            query: String::new(),
            scope: Scope::default(),
            live_filter: LiveFilter::default(),
            displayed: None,
            revision: 0,
            locale,
        }
    }

    /// Result set currently on screen, if any search has rendered yet.
    pub fn displayed(&self) -> Option<&Rendered> {
        self.displayed.as_ref()
    }

    pub fn status(&self) -> StoreStatus {
        StoreStatus {
            state: self.load_state.phase(),
            documents: self.load_state.store().map_or(0, |s| s.len()),
            error: match &self.load_state {
                LoadState::Failed(reason) => Some(reason.clone()),
                _ => None,
            },
        }
    }

    /// Returns false if a load already started; the store is loaded at most once.
    pub fn begin_loading(&mut self) -> bool {
        if !matches!(self.load_state, LoadState::Unloaded) {
            return false;
        }
        self.load_state = LoadState::Loading;
        true
    }

    /// Install the loaded store (or record the failure) and re-run the
    /// current inputs, like the initial search after startup.
    pub fn finish_loading(&mut self, result: Result<DocumentStore>) -> SearchUpdate {
        self.load_state = match result {
            Ok(store) => LoadState::Ready(Arc::new(store)),
            Err(e) => {
                tracing::error!("Search index unavailable: {e:#}");
                LoadState::Failed(format!("{e:#}"))
            }
        };
        self.refresh()
    }

    /// Apply one input change (last write wins) and recompute in full.
    pub fn apply(&mut self, change: InputChange) -> SearchUpdate {
        match change {
            InputChange::Query(text) => self.query = text,
            InputChange::Scope(scope) => self.scope = scope,
            InputChange::LiveFilter(filter) => self.live_filter = filter,
        }
        self.refresh()
    }

    fn refresh(&mut self) -> SearchUpdate {
        self.revision += 1;
        let outcome = match Query::parse(&self.query, self.scope, self.live_filter) {
            None => Outcome::Unchanged,
            Some(query) => {
                // Until the store is ready every query matches nothing.
                let empty = DocumentStore::default();
                let store = self.load_state.store().map_or(&empty, |s| s.as_ref());
                let rendered = render(&search(store, &query), self.locale);
                self.displayed = Some(rendered.clone());
                Outcome::Show { rendered }
            }
        };
        SearchUpdate {
            revision: self.revision,
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{ "docs": [
        { "id": "x1", "title": ["Intro to Go"], "body": ["learn golang basics"],
          "live": false, "at": "2023-01-01", "duration": 125 },
        { "id": "x2", "title": ["Live coding"], "body": ["rust stream"],
          "live": true, "at": "2023-03-05", "duration": "3661" }
    ] }"#;

    fn ready_session() -> SearchSession {
        let mut session = SearchSession::new(Locale::fr_FR);
        assert!(session.begin_loading());
        session.finish_loading(DocumentStore::from_json(PAYLOAD));
        session
    }

    fn shown_ids(update: &SearchUpdate) -> Option<Vec<String>> {
        match &update.outcome {
            Outcome::Unchanged => None,
            Outcome::Show { rendered } => {
                Some(rendered.ids().into_iter().map(String::from).collect())
            }
        }
    }

    #[test]
    fn empty_query_leaves_displayed_results_untouched() {
        let mut session = ready_session();
        let first = session.apply(InputChange::Query("a".into()));
        let shown = session.displayed().cloned();
        assert!(shown.is_some());

        let second = session.apply(InputChange::Query("   ".into()));
        assert_eq!(second.outcome, Outcome::Unchanged);
        assert_eq!(session.displayed().cloned(), shown);
        assert!(second.revision > first.revision);
    }

    #[test]
    fn no_match_is_distinct_from_empty_query() {
        let mut session = ready_session();
        let update = session.apply(InputChange::Query("zzz".into()));
        match update.outcome {
            Outcome::Show { rendered } => assert!(rendered.is_empty()),
            Outcome::Unchanged => panic!("no-match query must render"),
        }
    }

    #[test]
    fn every_input_signal_recomputes_with_latest_values() {
        let mut session = ready_session();
        let update = session.apply(InputChange::Query("o".into()));
        assert_eq!(shown_ids(&update), Some(vec!["x1".into(), "x2".into()]));

        let update = session.apply(InputChange::LiveFilter(LiveFilter::OnlyLive));
        assert_eq!(shown_ids(&update), Some(vec!["x2".into()]));

        let update = session.apply(InputChange::Scope(Scope::Body));
        assert_eq!(shown_ids(&update), Some(vec![]));

        let update = session.apply(InputChange::LiveFilter(LiveFilter::All));
        assert_eq!(shown_ids(&update), Some(vec!["x1".into()]));
    }

    #[test]
    fn searches_before_load_find_nothing() {
        let mut session = SearchSession::new(Locale::fr_FR);
        let update = session.apply(InputChange::Query("go".into()));
        assert_eq!(shown_ids(&update), Some(vec![]));
        assert_eq!(session.status().state, LoadPhase::Unloaded);
    }

    #[test]
    fn finishing_load_reruns_pending_query() {
        let mut session = SearchSession::new(Locale::fr_FR);
        session.begin_loading();
        session.apply(InputChange::Query("golang".into()));
        let update = session.finish_loading(DocumentStore::from_json(PAYLOAD));
        assert_eq!(shown_ids(&update), Some(vec!["x1".into()]));
        assert_eq!(session.status().documents, 2);
    }

    #[test]
    fn failed_load_is_terminal_and_reported() {
        let mut session = SearchSession::new(Locale::fr_FR);
        session.begin_loading();
        session.finish_loading(DocumentStore::from_json("{ broken"));
        let status = session.status();
        assert_eq!(status.state, LoadPhase::Failed);
        assert!(status.error.is_some());
        assert!(!session.begin_loading());

        let update = session.apply(InputChange::Query("go".into()));
        assert_eq!(shown_ids(&update), Some(vec![]));
    }

    #[test]
    fn update_and_status_wire_format() {
        let mut session = ready_session();
        let update = session.apply(InputChange::Query("   ".into()));
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({ "revision": update.revision, "outcome": { "kind": "unchanged" } })
        );
        assert_eq!(
            serde_json::to_value(session.status()).unwrap(),
            serde_json::json!({ "state": "ready", "documents": 2, "error": null })
        );
    }

    #[test]
    fn input_change_wire_format() {
        let change: InputChange =
            serde_json::from_str(r#"{ "kind": "liveFilter", "value": "noLive" }"#).unwrap();
        assert_eq!(change, InputChange::LiveFilter(LiveFilter::NoLive));
        let change: InputChange =
            serde_json::from_str(r#"{ "kind": "query", "value": "café" }"#).unwrap();
        assert_eq!(change, InputChange::Query("café".into()));
    }
}
