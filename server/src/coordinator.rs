use std::fmt;

use common::games::tictactoe::{detect_winner, is_draw, Outcome, Symbol};
use common::{log, ConnectionId, ServerMessage, SessionId};

use crate::matchmaker::Matchmaker;
use crate::session::SessionState;
use crate::session_registry::SessionRegistry;
use crate::transport::Transport;

/// Why an intent was dropped. Never sent to the client; only logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    SessionNotFound,
    SessionFinished,
    IndexOutOfRange,
    CellOccupied,
    NotYourTurn,
    SymbolMismatch,
    NotAMember,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Rejection::SessionNotFound => "session not found",
            Rejection::SessionFinished => "session is finished",
            Rejection::IndexOutOfRange => "cell index out of range",
            Rejection::CellOccupied => "cell is already marked",
            Rejection::NotYourTurn => "not this symbol's turn",
            Rejection::SymbolMismatch => "claimed symbol does not belong to the connection",
            Rejection::NotAMember => "connection is not in this session",
        };
        write!(f, "{}", reason)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResult {
    Continued { turn: Symbol },
    Finished(Outcome),
}

/// Drives sessions through active -> finished -> (rematch) -> active.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionCoordinator {
    /// When set, the acting symbol must match the connection's seat.
    enforce_symbol_binding: bool,
}

impl SessionCoordinator {
    pub fn new(enforce_symbol_binding: bool) -> Self {
        Self {
            enforce_symbol_binding,
        }
    }

    pub fn make_move<T: Transport>(
        &self,
        registry: &mut SessionRegistry,
        transport: &mut T,
        session_id: &SessionId,
        connection: &ConnectionId,
        claimed_symbol: Symbol,
        index: usize,
    ) -> Result<MoveResult, Rejection> {
        let session = registry
            .get_mut(session_id)
            .ok_or(Rejection::SessionNotFound)?;

        if session.is_finished() {
            return Err(Rejection::SessionFinished);
        }
        if self.enforce_symbol_binding && session.symbol_of(connection) != Some(claimed_symbol) {
            return Err(Rejection::SymbolMismatch);
        }
        match session.board.get(index) {
            None => return Err(Rejection::IndexOutOfRange),
            Some(cell) if !cell.is_empty() => return Err(Rejection::CellOccupied),
            Some(_) => {}
        }
        if claimed_symbol != session.turn {
            return Err(Rejection::NotYourTurn);
        }

        session
            .board
            .apply_move(index, claimed_symbol)
            .map_err(|_| Rejection::CellOccupied)?;

        let outcome = match detect_winner(&session.board) {
            Some(winner) => Some(Outcome::Winner(winner)),
            None if is_draw(&session.board) => Some(Outcome::Draw),
            None => None,
        };

        if let Some(outcome) = outcome {
            session.state = SessionState::Finished(outcome);
            transport.broadcast(session_id, ServerMessage::game_over(outcome, &session.board));
            return Ok(MoveResult::Finished(outcome));
        }

        session.turn = session.turn.opponent();
        transport.broadcast(session_id, ServerMessage::move_made(&session.board, session.turn));
        Ok(MoveResult::Continued { turn: session.turn })
    }

    pub fn rematch<T: Transport>(
        &self,
        registry: &mut SessionRegistry,
        transport: &mut T,
        session_id: &SessionId,
        connection: &ConnectionId,
    ) -> Result<(), Rejection> {
        let session = registry
            .get_mut(session_id)
            .ok_or(Rejection::SessionNotFound)?;

        if self.enforce_symbol_binding && !session.has_member(connection) {
            return Err(Rejection::NotAMember);
        }

        let previous = session.outcome();
        session.reset();
        log!(
            "[session:{}] Rematch requested by {} (previous result: {})",
            session_id,
            connection,
            previous.map_or("unfinished".to_string(), |outcome| outcome.to_string())
        );
        transport.broadcast(session_id, ServerMessage::game_reset(&session.board, session.turn));
        Ok(())
    }

    /// Tears down everything `connection` takes part in. Returns the removed sessions.
    pub fn disconnect<T: Transport>(
        &self,
        matchmaker: &mut Matchmaker,
        registry: &mut SessionRegistry,
        transport: &mut T,
        connection: &ConnectionId,
    ) -> Vec<SessionId> {
        matchmaker.cancel(connection);

        let session_ids = registry.sessions_of(connection);
        for session_id in &session_ids {
            // The leaving connection is out of the group before the notice goes out.
            transport.leave_group(session_id, connection);
            transport.broadcast(session_id, ServerMessage::opponent_left());
            if let Some(session) = registry.remove(session_id) {
                for member in session.members() {
                    transport.leave_group(session_id, member);
                }
            }
            log!("[session:{}] Closed after {} disconnected", session_id, connection);
        }
        session_ids
    }
}
