use std::{collections::HashMap, time::Duration};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{errors::AppResult, models::domain::QuizSession};

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn get(&self, id: &str) -> AppResult<Option<QuizSession>>;
    async fn put(&self, session: QuizSession) -> AppResult<()>;
    async fn delete(&self, id: &str) -> AppResult<bool>;
    /// Drops expired sessions and returns how many were removed.
    async fn purge_expired(&self) -> AppResult<usize>;
}

/// Process-local session map. Without a TTL sessions live as long as the process.
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<String, QuizSession>>,
    ttl: Option<Duration>,
}

impl InMemorySessionRepository {
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    fn is_expired(&self, session: &QuizSession) -> bool {
        let Some(ttl) = self.ttl else {
            return false;
        };
        (Utc::now() - session.created_at)
            .to_std()
            .map(|age| age >= ttl)
            .unwrap_or(false)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::new(None)
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn get(&self, id: &str) -> AppResult<Option<QuizSession>> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .get(id)
            .filter(|session| !self.is_expired(session))
            .cloned())
    }

    async fn put(&self, session: QuizSession) -> AppResult<()> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.id.clone(), session);
        Ok(())
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        let mut sessions = self.sessions.write().await;
        Ok(sessions.remove(id).is_some())
    }

    async fn purge_expired(&self) -> AppResult<usize> {
        if self.ttl.is_none() {
            return Ok(0);
        }

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !self.is_expired(session));
        Ok(before - sessions.len())
    }
}
