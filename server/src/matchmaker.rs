use common::games::tictactoe::Symbol;
use common::id_generator::generate_session_id;
use common::{log, ConnectionId, ServerMessage, SessionId};

use crate::session::Session;
use crate::session_registry::SessionRegistry;
use crate::transport::Transport;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeekOutcome {
    Queued,
    AlreadyQueued,
    Paired(SessionId),
}

/// FIFO pairing with room for exactly one waiting connection.
#[derive(Debug, Default)]
pub struct Matchmaker {
    waiting: Option<ConnectionId>,
}

impl Matchmaker {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn waiting(&self) -> Option<&ConnectionId> {
        self.waiting.as_ref()
    }

    pub fn seek<T: Transport>(
        &mut self,
        connection: &ConnectionId,
        registry: &mut SessionRegistry,
        transport: &mut T,
    ) -> SeekOutcome {
        let Some(waiting) = self.waiting.take() else {
            self.waiting = Some(connection.clone());
            transport.send_to(connection, ServerMessage::waiting());
            log!("[matchmaker] {} is waiting for an opponent", connection);
            return SeekOutcome::Queued;
        };

        if &waiting == connection {
            self.waiting = Some(waiting);
            transport.send_to(connection, ServerMessage::waiting());
            return SeekOutcome::AlreadyQueued;
        }

        let session_id = Self::allocate_session_id(registry);
        let session = Session::new(session_id.clone(), waiting.clone(), connection.clone());
        if let Err(e) = registry.insert(session) {
            // Unreachable with a freshly allocated id; keep the waiter queued.
            log!("[matchmaker] Failed to register session: {}", e);
            self.waiting = Some(waiting);
            return SeekOutcome::AlreadyQueued;
        }

        transport.join_group(&session_id, &waiting);
        transport.join_group(&session_id, connection);
        transport.send_to(
            &waiting,
            ServerMessage::game_start(&session_id, Symbol::X, connection),
        );
        transport.send_to(
            connection,
            ServerMessage::game_start(&session_id, Symbol::O, &waiting),
        );

        log!("[matchmaker] Paired {} (X) with {} (O) in {}", waiting, connection, session_id);
        SeekOutcome::Paired(session_id)
    }

    /// Clears the slot if `connection` holds it.
    pub fn cancel(&mut self, connection: &ConnectionId) -> bool {
        if self.waiting.as_ref() == Some(connection) {
            self.waiting = None;
            log!("[matchmaker] {} left the queue", connection);
            true
        } else {
            false
        }
    }

    fn allocate_session_id(registry: &SessionRegistry) -> SessionId {
        loop {
            let id = generate_session_id();
            if !registry.contains(&id) {
                return id;
            }
        }
    }
}
