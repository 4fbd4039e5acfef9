use std::collections::HashMap;

use common::{log, ConnectionId, SessionId};

use crate::session::Session;

#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<SessionId, Session>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, session: Session) -> Result<(), String> {
        if self.sessions.contains_key(&session.id) {
            return Err(format!("Session {} already exists", session.id));
        }
        log!(
            "[session:{}] Created: {} (X) vs {} (O)",
            session.id,
            session.player_x,
            session.player_o
        );
        self.sessions.insert(session.id.clone(), session);
        Ok(())
    }

    pub fn contains(&self, session_id: &SessionId) -> bool {
        self.sessions.contains_key(session_id)
    }

    #[cfg(test)]
    pub fn get(&self, session_id: &SessionId) -> Option<&Session> {
        self.sessions.get(session_id)
    }

    pub fn get_mut(&mut self, session_id: &SessionId) -> Option<&mut Session> {
        self.sessions.get_mut(session_id)
    }

    pub fn remove(&mut self, session_id: &SessionId) -> Option<Session> {
        let removed = self.sessions.remove(session_id);
        if removed.is_some() {
            log!("[session:{}] Removed", session_id);
        }
        removed
    }

    pub fn sessions_of(&self, connection: &ConnectionId) -> Vec<SessionId> {
        self.sessions
            .values()
            .filter(|session| session.has_member(connection))
            .map(|session| session.id.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(id: &str, x: &str, o: &str) -> Session {
        Session::new(SessionId::new(id), ConnectionId::new(x), ConnectionId::new(o))
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut registry = SessionRegistry::new();
        registry.insert(session("s1", "a", "b")).unwrap();

        assert!(registry.contains(&SessionId::new("s1")));
        assert_eq!(registry.get(&SessionId::new("s1")).unwrap().player_o, ConnectionId::new("b"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let mut registry = SessionRegistry::new();
        registry.insert(session("s1", "a", "b")).unwrap();

        assert!(registry.insert(session("s1", "c", "d")).is_err());
        assert_eq!(registry.get(&SessionId::new("s1")).unwrap().player_x, ConnectionId::new("a"));
    }

    #[test]
    fn test_sessions_of_finds_every_membership() {
        let mut registry = SessionRegistry::new();
        registry.insert(session("s1", "a", "b")).unwrap();
        registry.insert(session("s2", "c", "a")).unwrap();
        registry.insert(session("s3", "c", "d")).unwrap();

        let mut found = registry.sessions_of(&ConnectionId::new("a"));
        found.sort();
        assert_eq!(found, vec![SessionId::new("s1"), SessionId::new("s2")]);
        assert!(registry.sessions_of(&ConnectionId::new("z")).is_empty());
    }

    #[test]
    fn test_remove() {
        let mut registry = SessionRegistry::new();
        registry.insert(session("s1", "a", "b")).unwrap();

        assert!(registry.remove(&SessionId::new("s1")).is_some());
        assert!(registry.remove(&SessionId::new("s1")).is_none());
        assert_eq!(registry.len(), 0);
    }
}
