use common::{ConnectionId, ServerMessage, SessionId};

/// What the game core needs from the connection layer. Sends are
/// fire-and-forget: a dead peer is only noticed through its disconnect.
pub trait Transport {
    fn send_to(&mut self, connection: &ConnectionId, message: ServerMessage);

    fn join_group(&mut self, group: &SessionId, connection: &ConnectionId);

    fn leave_group(&mut self, group: &SessionId, connection: &ConnectionId);

    /// Delivers to every current member of `group`, the sender included.
    fn broadcast(&mut self, group: &SessionId, message: ServerMessage);
}
