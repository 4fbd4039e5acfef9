use common::games::tictactoe::{Board, Outcome, Symbol};
use common::{ConnectionId, SessionId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Finished(Outcome),
}

/// One paired game. `player_x` always moves first.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub player_x: ConnectionId,
    pub player_o: ConnectionId,
    pub board: Board,
    pub turn: Symbol,
    pub state: SessionState,
}

impl Session {
    pub fn new(id: SessionId, player_x: ConnectionId, player_o: ConnectionId) -> Self {
        debug_assert_ne!(player_x, player_o, "a session needs two distinct connections");
        Self {
            id,
            player_x,
            player_o,
            board: Board::new(),
            turn: Symbol::X,
            state: SessionState::Active,
        }
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.state {
            SessionState::Active => None,
            SessionState::Finished(outcome) => Some(outcome),
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, SessionState::Finished(_))
    }

    pub fn members(&self) -> [&ConnectionId; 2] {
        [&self.player_x, &self.player_o]
    }

    pub fn has_member(&self, connection: &ConnectionId) -> bool {
        self.symbol_of(connection).is_some()
    }

    pub fn symbol_of(&self, connection: &ConnectionId) -> Option<Symbol> {
        if connection == &self.player_x {
            Some(Symbol::X)
        } else if connection == &self.player_o {
            Some(Symbol::O)
        } else {
            None
        }
    }

    /// Fresh board and X to move; symbol assignments are kept.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.turn = Symbol::X;
        self.state = SessionState::Active;
    }
}
