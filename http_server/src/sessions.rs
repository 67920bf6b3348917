use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct SessionId(Uuid);

impl SessionId {
    fn new() -> Self {
        SessionId(Uuid::new_v4())
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value).map(SessionId)
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

const IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Open MCP sessions with the instant each was last used. A session idle for
/// `idle_timeout` is gone; expired entries are pruned whenever a session opens.
pub struct SessionRegistry {
    idle_timeout: Duration,
    sessions: RwLock<HashMap<SessionId, Instant>>,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(IDLE_TIMEOUT)
    }
}

impl SessionRegistry {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            idle_timeout,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    fn is_expired(&self, last_used: &Instant, now: Instant) -> bool {
        now.saturating_duration_since(*last_used) >= self.idle_timeout
    }

    pub async fn open(&self) -> SessionId {
        let now = Instant::now();
        let session_id = SessionId::new();
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, last_used| !self.is_expired(last_used, now));
        sessions.insert(session_id, now);
        session_id
    }

    /// Marks a live session as used. `false` when it is unknown or expired.
    pub async fn resume(&self, session_id: &SessionId) -> bool {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let live = sessions
            .get(session_id)
            .map(|last_used| !self.is_expired(last_used, now));
        match live {
            Some(true) => {
                sessions.insert(*session_id, now);
                true
            }
            Some(false) => {
                sessions.remove(session_id);
                false
            }
            None => false,
        }
    }

    pub async fn close(&self, session_id: &SessionId) -> bool {
        self.sessions.write().await.remove(session_id).is_some()
    }

    pub async fn open_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
