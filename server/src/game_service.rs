use common::games::tictactoe::Symbol;
use common::{client_message, log, ClientMessage, ConnectionId, SessionId};

use crate::coordinator::{MoveResult, SessionCoordinator};
use crate::matchmaker::Matchmaker;
use crate::session_registry::SessionRegistry;
use crate::transport::Transport;

/// All game state of the process, owned by exactly one dispatch loop.
pub struct GameService<T: Transport> {
    matchmaker: Matchmaker,
    registry: SessionRegistry,
    coordinator: SessionCoordinator,
    transport: T,
}

impl<T: Transport> GameService<T> {
    pub fn new(transport: T, coordinator: SessionCoordinator) -> Self {
        Self {
            matchmaker: Matchmaker::new(),
            registry: SessionRegistry::new(),
            coordinator,
            transport,
        }
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    #[cfg(test)]
    pub fn matchmaker(&self) -> &Matchmaker {
        &self.matchmaker
    }

    pub fn handle_message(&mut self, connection: &ConnectionId, message: ClientMessage) {
        let Some(message) = message.message else {
            log!("[conn:{}] Empty client message ignored", connection);
            return;
        };

        match message {
            client_message::Message::SeekGame(_) => {
                self.matchmaker
                    .seek(connection, &mut self.registry, &mut self.transport);
            }
            client_message::Message::MakeMove(request) => {
                let session_id = SessionId::new(request.session_id);
                let Some(symbol) = Symbol::from_proto(request.symbol) else {
                    log!("[session:{}] Move from {} without a symbol ignored", session_id, connection);
                    return;
                };
                self.make_move(connection, &session_id, symbol, request.index as usize);
            }
            client_message::Message::PlayAgain(request) => {
                let session_id = SessionId::new(request.session_id);
                if let Err(reason) = self.coordinator.rematch(
                    &mut self.registry,
                    &mut self.transport,
                    &session_id,
                    connection,
                ) {
                    log!("[session:{}] Rematch from {} ignored: {}", session_id, connection, reason);
                }
            }
        }
    }

    pub fn handle_disconnect(&mut self, connection: &ConnectionId) {
        self.coordinator.disconnect(
            &mut self.matchmaker,
            &mut self.registry,
            &mut self.transport,
            connection,
        );
    }

    fn make_move(&mut self, connection: &ConnectionId, session_id: &SessionId, symbol: Symbol, index: usize) {
        let result = self.coordinator.make_move(
            &mut self.registry,
            &mut self.transport,
            session_id,
            connection,
            symbol,
            index,
        );
        match result {
            Ok(MoveResult::Continued { turn }) => {
                log!("[session:{}] {} played {}, {} to move", session_id, symbol, index, turn);
            }
            Ok(MoveResult::Finished(outcome)) => {
                log!("[session:{}] {} played {}, result: {}", session_id, symbol, index, outcome);
            }
            Err(reason) => {
                log!(
                    "[session:{}] Move {} at {} from {} ignored: {}",
                    session_id,
                    symbol,
                    index,
                    connection,
                    reason
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::testing::RecordingTransport;
    use common::proto::{MakeMoveRequest, tictactoe};
    use common::{server_message, ServerMessage};

    fn service() -> GameService<RecordingTransport> {
        GameService::new(RecordingTransport::new(), SessionCoordinator::default())
    }

    fn start(service: &mut GameService<RecordingTransport>) -> SessionId {
        service.handle_message(&ConnectionId::new("a"), ClientMessage::seek_game());
        service.handle_message(&ConnectionId::new("b"), ClientMessage::seek_game());
        let to_b = service.transport_mut().received_by(&ConnectionId::new("b"));
        match to_b.last().and_then(|m| m.message.clone()) {
            Some(server_message::Message::GameStart(start)) => SessionId::new(start.session_id),
            _ => panic!("expected gameStart"),
        }
    }

    #[test]
    fn test_seek_then_pair_scenario() {
        let mut service = service();

        service.handle_message(&ConnectionId::new("a"), ClientMessage::seek_game());
        assert_eq!(
            service.transport_mut().received_by(&ConnectionId::new("a")),
            vec![ServerMessage::waiting()]
        );

        let session_id = start(&mut service);
        assert!(service.registry().contains(&session_id));
        assert_eq!(service.matchmaker().waiting(), None);
    }

    #[test]
    fn test_move_without_symbol_is_dropped() {
        let mut service = service();
        let session_id = start(&mut service);
        service.transport_mut().take();

        let message = ClientMessage {
            message: Some(client_message::Message::MakeMove(MakeMoveRequest {
                session_id: session_id.to_string(),
                index: 0,
                symbol: tictactoe::Symbol::Unspecified.into(),
            })),
        };
        service.handle_message(&ConnectionId::new("a"), message);

        assert!(service.transport_mut().take().is_empty());
        assert_eq!(service.registry().get(&session_id).unwrap().board.filled_count(), 0);
    }

    #[test]
    fn test_full_game_over_the_message_interface() {
        let mut service = service();
        let session_id = start(&mut service);
        service.transport_mut().take();

        let a = ConnectionId::new("a");
        let b = ConnectionId::new("b");
        service.handle_message(&a, ClientMessage::make_move(&session_id, 0, Symbol::X));
        service.handle_message(&b, ClientMessage::make_move(&session_id, 4, Symbol::O));
        service.handle_message(&a, ClientMessage::make_move(&session_id, 1, Symbol::X));
        service.handle_message(&b, ClientMessage::make_move(&session_id, 5, Symbol::O));
        service.handle_message(&a, ClientMessage::make_move(&session_id, 2, Symbol::X));

        let events: Vec<&'static str> = service
            .transport_mut()
            .received_by(&b)
            .iter()
            .map(ServerMessage::event_name)
            .collect();
        assert_eq!(events, vec!["moveMade", "moveMade", "moveMade", "moveMade", "gameOver"]);

        service.handle_message(&b, ClientMessage::play_again(&session_id));
        let last = service.transport_mut().received_by(&a).pop().unwrap();
        assert_eq!(last.event_name(), "gameReset");
    }

    #[test]
    fn test_disconnect_through_service() {
        let mut service = service();
        let session_id = start(&mut service);
        service.transport_mut().take();

        service.handle_disconnect(&ConnectionId::new("b"));

        assert!(!service.registry().contains(&session_id));
        let to_a = service.transport_mut().received_by(&ConnectionId::new("a"));
        assert_eq!(to_a, vec![ServerMessage::opponent_left()]);
    }
}
