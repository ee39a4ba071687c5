use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use calculator_client::{Action, CalculatorResponse};

use crate::engine::Engine;
use crate::session::Session;

/// Keeps one independently locked session per client
///
/// The map lock is only held to find or create a session, so actions on
/// different sessions never wait on each other.
pub struct SessionStore {
    engine: Engine,
    sessions: Mutex<HashMap<String, Entry>>,
}

struct Entry {
    session: Arc<Mutex<Session>>,
    last_used: Instant,
}

impl SessionStore {
    pub fn new(engine: Engine) -> SessionStore {
        SessionStore {
            engine,
            sessions: Mutex::new(Default::default()),
        }
    }

    async fn session(&self, id: &str) -> Arc<Mutex<Session>> {
        let mut data = self.sessions.lock().await;
        let entry = data.entry(id.to_string()).or_insert_with(|| Entry {
            session: Default::default(),
            last_used: Instant::now(),
        });
        entry.last_used = Instant::now();
        entry.session.clone()
    }

    pub async fn apply(&self, id: &str, action: Action) -> CalculatorResponse {
        let session = self.session(id).await;
        let mut session = session.lock().await;
        self.engine.apply_action(&mut session, action)
    }

    pub async fn snapshot(&self, id: &str) -> Option<Session> {
        let session = self.sessions.lock().await.get(id)?.session.clone();
        let data = session.lock().await;
        Some(data.clone())
    }

    pub async fn remove(&self, id: &str) -> bool {
        let mut data = self.sessions.lock().await;
        data.remove(id).is_some()
    }

    /// Drops every session that hasn't been used for `max_idle`
    ///
    /// An action already holding an evicted session still completes against
    /// it, the next action for that id starts a fresh session.
    pub async fn evict_idle(&self, max_idle: Duration) -> usize {
        let mut data = self.sessions.lock().await;
        let before = data.len();
        data.retain(|_, entry| entry.last_used.elapsed() < max_idle);

        let evicted = before - data.len();
        if evicted > 0 {
            debug!("Evicted {} idle sessions", evicted);
        }
        evicted
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }
}
