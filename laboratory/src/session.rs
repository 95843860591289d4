//! A worksheet bound to a user and a results store
//!
//! Persistence is best effort: without a signed-in user the worksheet works
//! purely in memory, and store failures become a short-lived notification
//! instead of an error.

use crate::{LabKind, ResultsSink, Worksheet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// No signed-in user
    Unavailable,
    Idle,
    Loaded,
    Saved,
    Failed,
}

/// Message shown until `expires_at` (display time, seconds)
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub is_error: bool,
    pub expires_at: f64,
}

#[derive(Debug)]
pub struct LabSession {
    worksheet: Worksheet,
    user: Option<String>,
    state: SyncState,
    notification: Option<Notification>,
    notification_seconds: f64,
}

impl LabSession {
    pub fn new(kind: LabKind, user: Option<String>, notification_seconds: f32) -> Self {
        let state = if user.is_some() {
            SyncState::Idle
        } else {
            SyncState::Unavailable
        };
        Self {
            worksheet: Worksheet::new(kind),
            user,
            state,
            notification: None,
            notification_seconds: f64::from(notification_seconds),
        }
    }

    pub fn kind(&self) -> LabKind {
        self.worksheet.kind()
    }

    pub fn worksheet(&self) -> &Worksheet {
        &self.worksheet
    }

    pub fn worksheet_mut(&mut self) -> &mut Worksheet {
        &mut self.worksheet
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn can_persist(&self) -> bool {
        self.user.is_some()
    }

    pub fn sync_state(&self) -> SyncState {
        self.state
    }

    /// Replace the worksheet with the stored rows, if any
    pub fn load(&mut self, sink: &dyn ResultsSink, now: f64) {
        let Some(user) = self.user.as_deref() else {
            return;
        };
        let kind = self.kind();
        match sink.load(user, kind) {
            Ok(Some(rows)) => {
                log::info!("Loaded {} rows for {} ({user})", rows.len(), kind.slug());
                self.worksheet = Worksheet::from_rows(kind, rows);
                self.state = SyncState::Loaded;
            }
            Ok(None) => self.state = SyncState::Idle,
            Err(err) => {
                log::warn!("Failed to load {} results for {user}: {err}", kind.slug());
                self.state = SyncState::Failed;
                self.notify(format!("Could not load saved results: {err}"), true, now);
            }
        }
    }

    /// Store the current rows. Returns whether they were saved.
    pub fn save(&mut self, sink: &dyn ResultsSink, now: f64) -> bool {
        let Some(user) = self.user.as_deref() else {
            self.notify("Sign in to save results".to_string(), true, now);
            return false;
        };
        let kind = self.kind();
        match sink.save(user, kind, self.worksheet.rows()) {
            Ok(()) => {
                log::info!("Saved {} rows for {} ({user})", self.worksheet.len(), kind.slug());
                self.state = SyncState::Saved;
                self.notify("Results saved".to_string(), false, now);
                true
            }
            Err(err) => {
                log::warn!("Failed to save {} results for {user}: {err}", kind.slug());
                self.state = SyncState::Failed;
                self.notify(format!("Could not save results: {err}"), true, now);
                false
            }
        }
    }

    fn notify(&mut self, message: String, is_error: bool, now: f64) {
        self.notification = Some(Notification {
            message,
            is_error,
            expires_at: now + self.notification_seconds,
        });
    }

    /// The current notification, unless it has expired
    pub fn notification(&self, now: f64) -> Option<&Notification> {
        self.notification.as_ref().filter(|n| now < n.expires_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryStore, SinkError, TableRow};

    struct Offline;

    impl ResultsSink for Offline {
        fn save(&self, _user: &str, _lab: LabKind, _rows: &[TableRow]) -> Result<(), SinkError> {
            Err(SinkError::Unavailable)
        }

        fn load(&self, _user: &str, _lab: LabKind) -> Result<Option<Vec<TableRow>>, SinkError> {
            Err(SinkError::Unavailable)
        }
    }

    #[test]
    fn anonymous_session_works_in_memory() {
        let store = MemoryStore::new();
        let mut session = LabSession::new(LabKind::PendulumPeriod, None, 4.0);
        assert!(!session.can_persist());
        assert_eq!(session.sync_state(), SyncState::Unavailable);

        session.worksheet_mut().edit(0, "length", "1").unwrap();
        assert!(!session.save(&store, 0.0));
        assert!(store.load("", LabKind::PendulumPeriod).unwrap().is_none());
        assert_eq!(session.worksheet().rows()[0].get("length"), Some(1.0));
        assert!(session.notification(1.0).unwrap().is_error);
    }

    #[test]
    fn saved_rows_come_back_in_a_new_session() {
        let store = MemoryStore::new();
        let mut first = LabSession::new(LabKind::PendulumPeriod, Some("ada".into()), 4.0);
        first.worksheet_mut().edit(0, "length", "1").unwrap();
        first.worksheet_mut().edit(0, "time10", "20").unwrap();
        assert!(first.save(&store, 0.0));
        assert_eq!(first.sync_state(), SyncState::Saved);

        let mut second = LabSession::new(LabKind::PendulumPeriod, Some("ada".into()), 4.0);
        second.load(&store, 0.0);
        assert_eq!(second.sync_state(), SyncState::Loaded);
        assert_eq!(second.worksheet().rows()[0].get("gravity"), Some(9.87));
    }

    #[test]
    fn store_failures_are_transient_notifications() {
        let mut session = LabSession::new(LabKind::OhmsLaw, Some("ada".into()), 4.0);
        session.worksheet_mut().edit(0, "voltage", "3").unwrap();

        assert!(!session.save(&Offline, 10.0));
        assert_eq!(session.sync_state(), SyncState::Failed);
        let note = session.notification(11.0).unwrap();
        assert!(note.is_error);
        assert!(note.message.contains("unavailable"));
        assert!(session.notification(14.5).is_none());

        // the worksheet is untouched
        assert_eq!(session.worksheet().rows()[0].get("voltage"), Some(3.0));

        session.load(&Offline, 20.0);
        assert_eq!(session.sync_state(), SyncState::Failed);
        assert_eq!(session.worksheet().rows()[0].get("voltage"), Some(3.0));
    }

    #[test]
    fn nothing_stored_keeps_the_fresh_worksheet() {
        let store = MemoryStore::new();
        let mut session = LabSession::new(LabKind::FreeFall, Some("ada".into()), 4.0);
        session.load(&store, 0.0);
        assert_eq!(session.sync_state(), SyncState::Idle);
        assert_eq!(session.worksheet().len(), 1);
    }
}
