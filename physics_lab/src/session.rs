//! Process-wide services shared by every view
//!
//! Created once in `main` and passed by reference. Nothing here is torn
//! down before exit.

use std::cell::{Cell, OnceCell};

use common::AppConfig;
use laboratory::{JsonFileStore, LabKind, LabSession, MemoryStore, ResultsSink};

pub struct SessionServices {
    config: AppConfig,
    splash_shown: Cell<bool>,
    results: OnceCell<Box<dyn ResultsSink>>,
}

impl SessionServices {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            splash_shown: Cell::new(false),
            results: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// True the first time it is called in a session, false afterwards
    pub fn take_splash(&self) -> bool {
        !self.splash_shown.replace(true)
    }

    pub fn splash_shown(&self) -> bool {
        self.splash_shown.get()
    }

    /// The results store, built on first use
    pub fn results(&self) -> &dyn ResultsSink {
        self.results
            .get_or_init(|| match &self.config.results_dir {
                Some(dir) => {
                    log::info!("Storing laboratory results under {}", dir.display());
                    Box::new(JsonFileStore::new(dir.clone()))
                }
                None => {
                    log::info!("No results directory configured, keeping results in memory");
                    Box::new(MemoryStore::new())
                }
            })
            .as_ref()
    }

    pub fn results_ready(&self) -> bool {
        self.results.get().is_some()
    }

    /// Open a worksheet for the configured user, loading saved rows
    pub fn open_lab(&self, kind: LabKind, now: f64) -> LabSession {
        let mut session = LabSession::new(kind, self.config.user.clone(), self.config.notification_seconds);
        if session.can_persist() {
            session.load(self.results(), now);
        }
        session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use laboratory::SyncState;

    fn with_user(results_dir: Option<std::path::PathBuf>) -> SessionServices {
        SessionServices::new(AppConfig {
            user: Some("student-42".to_string()),
            results_dir,
            ..AppConfig::default()
        })
    }

    #[test]
    fn splash_is_shown_once() {
        let services = SessionServices::new(AppConfig::default());
        assert!(!services.splash_shown());
        assert!(services.take_splash());
        assert!(!services.take_splash());
        assert!(services.splash_shown());
    }

    #[test]
    fn results_store_is_lazy() {
        let services = with_user(None);
        assert!(!services.results_ready());
        let _ = services.open_lab(LabKind::OhmsLaw, 0.0);
        assert!(services.results_ready());
    }

    #[test]
    fn anonymous_labs_never_touch_the_store() {
        let services = SessionServices::new(AppConfig::default());
        let session = services.open_lab(LabKind::FreeFall, 0.0);
        assert_eq!(session.sync_state(), SyncState::Unavailable);
        assert!(!services.results_ready());
    }

    #[test]
    fn saved_rows_reopen_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let services = with_user(Some(dir.path().to_path_buf()));

        let mut session = services.open_lab(LabKind::OhmsLaw, 0.0);
        session.worksheet_mut().edit(0, "voltage", "12").unwrap();
        session.worksheet_mut().edit(0, "current", "0.5").unwrap();
        assert!(session.save(services.results(), 1.0));

        // a fresh process sees the same file
        let restarted = with_user(Some(dir.path().to_path_buf()));
        let reopened = restarted.open_lab(LabKind::OhmsLaw, 2.0);
        assert_eq!(reopened.sync_state(), SyncState::Loaded);
        assert_eq!(reopened.worksheet().rows()[0].get("resistance"), Some(24.0));
    }
}
