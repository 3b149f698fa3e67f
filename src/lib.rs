#[cfg(feature = "desktop")]
pub mod commands;
pub mod config;
pub mod duration;
pub mod normalize;
pub mod query;
pub mod render;
pub mod session;
pub mod store;
pub mod types;

pub use config::SearchConfig;
pub use duration::{format_duration, Seconds};
pub use normalize::normalize;
pub use query::{search, Query};
pub use render::{render, Rendered, VideoCard};
pub use session::{InputChange, Outcome, SearchSession, SearchUpdate, StoreStatus};
pub use store::{DocumentStore, LoadPhase, LoadState};
pub use types::{Document, LiveFilter, RawVideo, Scope};

/// All runtime state shared across Tauri commands.
pub struct AppState {
    pub config: SearchConfig,
    /// Store lifecycle, current inputs and displayed results.
    pub session: SearchSession,
}

impl Default for AppState {
    fn default() -> Self {
        let config = SearchConfig::default();
        let session = SearchSession::new(config.date_locale);
        Self { config, session }
    }
}

/// Type alias used in Tauri command signatures and background tasks.
pub type AppMutex = tokio::sync::Mutex<AppState>;

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Only log WARN and above in production
    #[cfg(debug_assertions)]
    tracing_subscriber::fmt::init();
    #[cfg(not(debug_assertions))]
    tracing_subscriber::fmt().with_max_level(tracing::Level::WARN).init();
    tauri::Builder::default()
        .manage(AppMutex::new(AppState::default()))
        .invoke_handler(tauri::generate_handler![
            commands::apply_input,
            commands::get_store_status,
            commands::open_video,
        ])
        .setup(|app| {
            let handle = app.handle().clone();
            tauri::async_runtime::spawn(async move {
                commands::startup_init(handle).await;
            });
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
