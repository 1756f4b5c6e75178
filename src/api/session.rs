//! Per-session topic memory for follow-up questions

use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

use dashmap::DashMap;
use tokio::task::JoinHandle;
use tracing::debug;
use tracing::info;

use crate::config::SessionConfig;

/// Last topic seen in one chat session
#[derive(Debug, Clone)]
pub struct SessionEntry {
    pub last_topic: String,
    pub last_activity: Instant,
}

impl SessionEntry {
    #[must_use]
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            last_topic: topic.into(),
            last_activity: Instant::now(),
        }
    }

    #[must_use]
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.last_activity.elapsed() > ttl
    }
}

/// Bounded, expiring map from session id to last detected topic
pub struct TopicMemory {
    sessions: DashMap<String, SessionEntry>,
    max_entries: usize,
    ttl: Duration,
}

impl TopicMemory {
    #[must_use]
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            max_entries: max_entries.max(1),
            ttl,
        }
    }

    #[must_use]
    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.max_entries, Duration::from_secs(config.ttl_secs))
    }

    /// Remembered topic for a session; reading counts as activity
    pub fn get_topic(&self, session_id: &str) -> Option<String> {
        {
            // the shard guard must be released before `remove`
            let mut entry = self.sessions.get_mut(session_id)?;
            if !entry.is_expired(self.ttl) {
                entry.last_activity = Instant::now();
                return Some(entry.last_topic.clone());
            }
        }

        self.sessions.remove(session_id);
        debug!("Session {} expired", session_id);
        None
    }

    /// Remember a session's topic, evicting the least recently active
    /// session when full
    pub fn set_topic(&self, session_id: &str, topic: &str) {
        if let Some(mut entry) = self.sessions.get_mut(session_id) {
            entry.last_topic = topic.to_string();
            entry.last_activity = Instant::now();
            return;
        }

        if self.sessions.len() >= self.max_entries {
            self.cleanup_expired();
        }
        while self.sessions.len() >= self.max_entries {
            let oldest = self
                .sessions
                .iter()
                .min_by_key(|entry| entry.value().last_activity)
                .map(|entry| entry.key().clone());
            match oldest {
                Some(key) => {
                    self.sessions.remove(&key);
                    debug!("Evicted session {}", key);
                }
                None => break,
            }
        }

        self.sessions
            .insert(session_id.to_string(), SessionEntry::new(topic));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drop expired sessions, returning how many were removed
    pub fn cleanup_expired(&self) -> usize {
        let before = self.sessions.len();
        let ttl = self.ttl;
        self.sessions.retain(|_, entry| !entry.is_expired(ttl));
        before.saturating_sub(self.sessions.len())
    }

    /// Periodically drop expired sessions until the handle is aborted
    pub fn spawn_cleanup(self: Arc<Self>, interval: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // first tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let removed = self.cleanup_expired();
                if removed > 0 {
                    info!("Cleaned up {} expired sessions", removed);
                }
            }
        })
    }
}

impl Default for TopicMemory {
    fn default() -> Self {
        Self::from_config(&SessionConfig::default())
    }
}
