use std::sync::Arc;
use std::time::{Duration, Instant};

use chatterbox_core::Turn;
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

/// Session used when the client does not supply an identifier.
pub const DEFAULT_SESSION_ID: &str = "default_conv";

const DEFAULT_SESSION_TIMEOUT: Duration = Duration::from_secs(1800); // 30 minutes
const DEFAULT_CLEANUP_INTERVAL: Duration = Duration::from_secs(300); // 5 minutes

/// Shared handle to one session's history. The mutex doubles as the
/// per-session turn lock: a turn holds it from model submission until
/// its history commit, so overlapping turns on one session serialize.
pub type SessionHistory = Arc<Mutex<Vec<Turn>>>;

struct SessionData {
    history: SessionHistory,
    last_activity: Instant,
}

/// Process-wide map from session id to conversation history. Histories
/// are created lazily and evicted only by the idle-session sweep.
pub struct SessionManager {
    sessions: DashMap<String, SessionData>,
    session_timeout: Duration,
    cleanup_interval: Duration,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::with_timeouts(DEFAULT_SESSION_TIMEOUT, DEFAULT_CLEANUP_INTERVAL)
    }

    pub fn with_timeouts(session_timeout: Duration, cleanup_interval: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            session_timeout,
            cleanup_interval,
        }
    }

    /// Returns the history for `session_id`, registering an empty one on
    /// first reference. Repeated calls hand back the same underlying
    /// object, never a copy.
    pub fn get_or_create(&self, session_id: &str) -> SessionHistory {
        let mut entry = self
            .sessions
            .entry(session_id.to_string())
            .or_insert_with(|| {
                debug!(session_id, "Created new session");
                SessionData {
                    history: Arc::new(Mutex::new(Vec::new())),
                    last_activity: Instant::now(),
                }
            });
        entry.last_activity = Instant::now();
        Arc::clone(&entry.history)
    }

    /// Appends a turn to an existing session. A no-op when the session
    /// was never created; `get_or_create` is expected to run first.
    pub async fn append(&self, session_id: &str, turn: Turn) {
        let history = self
            .sessions
            .get(session_id)
            .map(|data| Arc::clone(&data.history));

        if let Some(history) = history {
            history.lock().await.push(turn);
        }
    }

    pub fn cleanup_inactive_sessions(&self) {
        let now = Instant::now();
        self.sessions.retain(|session_id, data| {
            let keep = now.duration_since(data.last_activity) < self.session_timeout;
            if !keep {
                debug!(%session_id, "Evicted idle session");
            }
            keep
        });
    }

    pub fn start_cleanup_task(self: Arc<Self>) {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.cleanup_interval);
            loop {
                interval.tick().await;
                self.cleanup_inactive_sessions();
            }
        });
    }

    pub fn remove_session(&self, session_id: &str) {
        if self.sessions.remove(session_id).is_some() {
            debug!(session_id, "Removed session");
        }
    }

    pub fn active_session_count(&self) -> usize {
        self.sessions.len()
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

pub fn generate_session_id() -> String {
    Uuid::new_v4().to_string()
}
