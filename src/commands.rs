use tauri::{Emitter, Manager};

use crate::session::{InputChange, SearchUpdate, StoreStatus};
use crate::store::DocumentStore;
use crate::AppMutex;

// ─── Tauri commands ────────────────────────────────────────────────────────────

/// Apply one input change (keystroke, scope or live-filter radio) and return
/// the recomputed results. Runs synchronously under the state lock, so
/// changes are applied in arrival order.
#[tauri::command]
pub async fn apply_input(
    change: InputChange,
    state: tauri::State<'_, AppMutex>,
) -> Result<SearchUpdate, String> {
    Ok(state.lock().await.session.apply(change))
}

/// Current store lifecycle, polled by the page status line.
#[tauri::command]
pub async fn get_store_status(state: tauri::State<'_, AppMutex>) -> Result<StoreStatus, String> {
    Ok(state.lock().await.session.status())
}

/// Open a result's watch page in the system browser.
#[tauri::command]
pub async fn open_video(id: String) -> Result<(), String> {
    if !is_valid_video_id(&id) {
        return Err("invalid_video_id".to_string());
    }
    open::that_detached(crate::render::watch_url(&id)).map_err(|e| e.to_string())
}

// ─── Internal helpers ──────────────────────────────────────────────────────────

/// Called once on startup: load the bundled index, then publish the status
/// and the search for whatever was typed while loading.
pub async fn startup_init(app: tauri::AppHandle) {
    // 1. Guard against a second load and grab the configured path
    let index_path = {
        let state = app.state::<AppMutex>();
        let mut s = state.lock().await;
        if !s.session.begin_loading() {
            return;
        }
        let _ = app.emit("store-status", &s.session.status());
        let base = app
            .path()
            .resource_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."));
        s.config.resolve_index_path(&base)
    };

    // 2. Read and parse outside the lock
    let loaded = DocumentStore::load(&index_path).await;

    // 3. Install the store and re-run the current inputs
    let state = app.state::<AppMutex>();
    let mut s = state.lock().await;
    let update = s.session.finish_loading(loaded);
    let _ = app.emit("store-status", &s.session.status());
    let _ = app.emit("search-update", &update);
}

/// Video ids are restricted to the URL-safe base64 alphabet.
fn is_valid_video_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn video_id_alphabet() {
        assert!(is_valid_video_id("dQw4w9WgXcQ"));
        assert!(is_valid_video_id("a-b_C9"));
        assert!(!is_valid_video_id(""));
        assert!(!is_valid_video_id("x&list=1"));
        assert!(!is_valid_video_id("../x"));
    }
}
