use std::sync::Arc;

use arc_swap::ArcSwapOption;
use tokio::sync::broadcast;

use super::Session;

const EVENT_CAPACITY: usize = 16;

/// Broadcast to observers (cart badge, header) whenever the session changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn { subject: String },
    Refreshed,
    SignedOut,
    /// Refresh failed or the backend kept rejecting the token.
    Invalidated { reason: String },
}

/// Process-wide session holder.
///
/// Every outbound request reads it; only login, refresh and logout write it.
pub trait SessionStore: Send + Sync {
    fn get(&self) -> Option<Arc<Session>>;
    fn set(&self, session: Session);
    fn clear(&self);
    fn subscribe(&self) -> broadcast::Receiver<SessionEvent>;
    fn notify(&self, event: SessionEvent);
}

pub struct InMemorySessionStore {
    current: ArcSwapOption<Session>,
    events: broadcast::Sender<SessionEvent>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            current: ArcSwapOption::empty(),
            events,
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self) -> Option<Arc<Session>> {
        self.current.load_full()
    }

    fn set(&self, session: Session) {
        self.current.store(Some(Arc::new(session)));
    }

    fn clear(&self) {
        self.current.store(None);
    }

    fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    fn notify(&self, event: SessionEvent) {
        // No receivers is fine; nobody is watching yet.
        if self.events.send(event).is_err() {
            tracing::trace!("Session event dropped, no subscribers");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::test_tokens::jwt;
    use serde_json::json;

    fn session(sub: &str) -> Session {
        Session::from_tokens(jwt(&json!({"sub": sub, "exp": 1})), "r".into()).unwrap()
    }

    #[test]
    fn test_set_get_clear() {
        let store = InMemorySessionStore::new();
        assert!(store.get().is_none());

        store.set(session("u1"));
        assert_eq!(store.get().unwrap().subject(), "u1");

        store.set(session("u2"));
        assert_eq!(store.get().unwrap().subject(), "u2");

        store.clear();
        assert!(store.get().is_none());
    }

    #[test]
    fn test_readers_keep_their_snapshot() {
        let store = InMemorySessionStore::new();
        store.set(session("u1"));
        let snapshot = store.get().unwrap();

        store.clear();
        assert_eq!(snapshot.subject(), "u1");
    }

    #[tokio::test]
    async fn test_subscribers_receive_events() {
        let store = InMemorySessionStore::new();
        let mut first = store.subscribe();
        let mut second = store.subscribe();

        store.notify(SessionEvent::SignedOut);

        assert_eq!(first.recv().await.unwrap(), SessionEvent::SignedOut);
        assert_eq!(second.recv().await.unwrap(), SessionEvent::SignedOut);
    }

    #[test]
    fn test_notify_without_subscribers() {
        let store = InMemorySessionStore::new();
        store.notify(SessionEvent::Refreshed);
    }
}
