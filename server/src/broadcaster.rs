use std::collections::{HashMap, HashSet};

use tokio::sync::mpsc::{self, error::TrySendError};

use common::{log, ConnectionId, ServerMessage, SessionId};

use crate::transport::Transport;

pub type ClientSender = mpsc::Sender<ServerMessage>;

/// Per-connection outbound queues plus session groups. Owned by the
/// dispatcher, so no locking.
#[derive(Default)]
pub struct Broadcaster {
    clients: HashMap<ConnectionId, ClientSender>,
    groups: HashMap<SessionId, HashSet<ConnectionId>>,
}

impl std::fmt::Debug for Broadcaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Broadcaster")
            .field("clients", &self.clients.len())
            .field("groups", &self.groups.len())
            .finish()
    }
}

impl Broadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, connection: ConnectionId, sender: ClientSender) {
        self.clients.insert(connection, sender);
    }

    /// Drops the outbound queue and every group membership of `connection`.
    pub fn unregister(&mut self, connection: &ConnectionId) {
        self.clients.remove(connection);
        self.groups.retain(|_, members| {
            members.remove(connection);
            !members.is_empty()
        });
    }

    pub fn client_count(&self) -> usize {
        self.clients.len()
    }

    fn deliver(&self, connection: &ConnectionId, message: ServerMessage) {
        let Some(sender) = self.clients.get(connection) else {
            return;
        };
        match sender.try_send(message) {
            Ok(()) => {}
            Err(TrySendError::Full(message)) => {
                log!("[conn:{}] Outbound queue full, dropped {}", connection, message.event_name());
            }
            Err(TrySendError::Closed(message)) => {
                log!("[conn:{}] Connection closed, dropped {}", connection, message.event_name());
            }
        }
    }
}

impl Transport for Broadcaster {
    fn send_to(&mut self, connection: &ConnectionId, message: ServerMessage) {
        self.deliver(connection, message);
    }

    fn join_group(&mut self, group: &SessionId, connection: &ConnectionId) {
        self.groups
            .entry(group.clone())
            .or_default()
            .insert(connection.clone());
    }

    fn leave_group(&mut self, group: &SessionId, connection: &ConnectionId) {
        if let Some(members) = self.groups.get_mut(group) {
            members.remove(connection);
            if members.is_empty() {
                self.groups.remove(group);
            }
        }
    }

    fn broadcast(&mut self, group: &SessionId, message: ServerMessage) {
        let Some(members) = self.groups.get(group) else {
            return;
        };
        for connection in members {
            self.deliver(connection, message.clone());
        }
    }
}
