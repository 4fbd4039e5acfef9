//! Messages exchanged over the WebSocket. Every binary frame carries exactly
//! one prost-encoded [`ClientMessage`] or [`ServerMessage`].

use crate::games::tictactoe::{Board, Cell, Outcome, Symbol as GameSymbol};
use crate::{ConnectionId, SessionId};

pub mod tictactoe {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum Symbol {
        Unspecified = 0,
        X = 1,
        O = 2,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum CellMark {
        Empty = 0,
        X = 1,
        O = 2,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum Outcome {
        Unspecified = 0,
        XWins = 1,
        OWins = 2,
        Draw = 3,
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ClientMessage {
    #[prost(oneof = "client_message::Message", tags = "1, 2, 3")]
    pub message: Option<client_message::Message>,
}

pub mod client_message {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Message {
        #[prost(message, tag = "1")]
        SeekGame(super::SeekGameRequest),
        #[prost(message, tag = "2")]
        MakeMove(super::MakeMoveRequest),
        #[prost(message, tag = "3")]
        PlayAgain(super::PlayAgainRequest),
    }
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct SeekGameRequest {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MakeMoveRequest {
    #[prost(string, tag = "1")]
    pub session_id: String,
    #[prost(uint32, tag = "2")]
    pub index: u32,
    #[prost(enumeration = "tictactoe::Symbol", tag = "3")]
    pub symbol: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PlayAgainRequest {
    #[prost(string, tag = "1")]
    pub session_id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ServerMessage {
    #[prost(oneof = "server_message::Message", tags = "1, 2, 3, 4, 5, 6")]
    pub message: Option<server_message::Message>,
}

pub mod server_message {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Message {
        #[prost(message, tag = "1")]
        Waiting(super::WaitingNotification),
        #[prost(message, tag = "2")]
        GameStart(super::GameStartNotification),
        #[prost(message, tag = "3")]
        MoveMade(super::MoveMadeNotification),
        #[prost(message, tag = "4")]
        GameOver(super::GameOverNotification),
        #[prost(message, tag = "5")]
        GameReset(super::GameResetNotification),
        #[prost(message, tag = "6")]
        OpponentLeft(super::OpponentLeftNotification),
    }
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct WaitingNotification {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GameStartNotification {
    #[prost(string, tag = "1")]
    pub session_id: String,
    #[prost(enumeration = "tictactoe::Symbol", tag = "2")]
    pub symbol: i32,
    #[prost(string, tag = "3")]
    pub opponent: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MoveMadeNotification {
    #[prost(enumeration = "tictactoe::CellMark", repeated, tag = "1")]
    pub board: Vec<i32>,
    #[prost(enumeration = "tictactoe::Symbol", tag = "2")]
    pub turn: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GameOverNotification {
    #[prost(enumeration = "tictactoe::Outcome", tag = "1")]
    pub outcome: i32,
    #[prost(enumeration = "tictactoe::CellMark", repeated, tag = "2")]
    pub board: Vec<i32>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GameResetNotification {
    #[prost(enumeration = "tictactoe::CellMark", repeated, tag = "1")]
    pub board: Vec<i32>,
    #[prost(enumeration = "tictactoe::Symbol", tag = "2")]
    pub turn: i32,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct OpponentLeftNotification {}

impl GameSymbol {
    pub fn to_proto(self) -> tictactoe::Symbol {
        match self {
            GameSymbol::X => tictactoe::Symbol::X,
            GameSymbol::O => tictactoe::Symbol::O,
        }
    }

    /// `None` for `UNSPECIFIED` and for values this build does not know.
    pub fn from_proto(value: i32) -> Option<GameSymbol> {
        match tictactoe::Symbol::try_from(value) {
            Ok(tictactoe::Symbol::X) => Some(GameSymbol::X),
            Ok(tictactoe::Symbol::O) => Some(GameSymbol::O),
            Ok(tictactoe::Symbol::Unspecified) | Err(_) => None,
        }
    }
}

impl Cell {
    pub fn to_proto(self) -> tictactoe::CellMark {
        match self {
            Cell::Empty => tictactoe::CellMark::Empty,
            Cell::Taken(GameSymbol::X) => tictactoe::CellMark::X,
            Cell::Taken(GameSymbol::O) => tictactoe::CellMark::O,
        }
    }
}

impl Outcome {
    pub fn to_proto(self) -> tictactoe::Outcome {
        match self {
            Outcome::Winner(GameSymbol::X) => tictactoe::Outcome::XWins,
            Outcome::Winner(GameSymbol::O) => tictactoe::Outcome::OWins,
            Outcome::Draw => tictactoe::Outcome::Draw,
        }
    }
}

impl Board {
    pub fn to_proto(&self) -> Vec<i32> {
        self.cells().iter().map(|cell| cell.to_proto().into()).collect()
    }
}

impl ClientMessage {
    pub fn seek_game() -> Self {
        Self {
            message: Some(client_message::Message::SeekGame(SeekGameRequest {})),
        }
    }

    pub fn make_move(session_id: &SessionId, index: u32, symbol: GameSymbol) -> Self {
        Self {
            message: Some(client_message::Message::MakeMove(MakeMoveRequest {
                session_id: session_id.to_string(),
                index,
                symbol: symbol.to_proto().into(),
            })),
        }
    }

    pub fn play_again(session_id: &SessionId) -> Self {
        Self {
            message: Some(client_message::Message::PlayAgain(PlayAgainRequest {
                session_id: session_id.to_string(),
            })),
        }
    }
}

impl ServerMessage {
    pub fn waiting() -> Self {
        Self {
            message: Some(server_message::Message::Waiting(WaitingNotification {})),
        }
    }

    pub fn game_start(session_id: &SessionId, symbol: GameSymbol, opponent: &ConnectionId) -> Self {
        Self {
            message: Some(server_message::Message::GameStart(GameStartNotification {
                session_id: session_id.to_string(),
                symbol: symbol.to_proto().into(),
                opponent: opponent.to_string(),
            })),
        }
    }

    pub fn move_made(board: &Board, turn: GameSymbol) -> Self {
        Self {
            message: Some(server_message::Message::MoveMade(MoveMadeNotification {
                board: board.to_proto(),
                turn: turn.to_proto().into(),
            })),
        }
    }

    pub fn game_over(outcome: Outcome, board: &Board) -> Self {
        Self {
            message: Some(server_message::Message::GameOver(GameOverNotification {
                outcome: outcome.to_proto().into(),
                board: board.to_proto(),
            })),
        }
    }

    pub fn game_reset(board: &Board, turn: GameSymbol) -> Self {
        Self {
            message: Some(server_message::Message::GameReset(GameResetNotification {
                board: board.to_proto(),
                turn: turn.to_proto().into(),
            })),
        }
    }

    pub fn opponent_left() -> Self {
        Self {
            message: Some(server_message::Message::OpponentLeft(OpponentLeftNotification {})),
        }
    }

    pub fn event_name(&self) -> &'static str {
        match &self.message {
            Some(server_message::Message::Waiting(_)) => "waiting",
            Some(server_message::Message::GameStart(_)) => "gameStart",
            Some(server_message::Message::MoveMade(_)) => "moveMade",
            Some(server_message::Message::GameOver(_)) => "gameOver",
            Some(server_message::Message::GameReset(_)) => "gameReset",
            Some(server_message::Message::OpponentLeft(_)) => "opponentLeft",
            None => "empty",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn test_game_over_board_survives_encoding() {
        let mut board = Board::new();
        board.apply_move(0, GameSymbol::X).unwrap();
        board.apply_move(4, GameSymbol::O).unwrap();

        let bytes = ServerMessage::game_over(Outcome::Draw, &board).encode_to_vec();
        let decoded = ServerMessage::decode(bytes.as_slice()).unwrap();

        let Some(server_message::Message::GameOver(over)) = decoded.message else {
            panic!("expected gameOver, got {}", decoded.event_name());
        };
        assert_eq!(over.outcome(), tictactoe::Outcome::Draw);
        assert_eq!(over.board.len(), 9);
        assert_eq!(over.board[0], i32::from(tictactoe::CellMark::X));
        assert_eq!(over.board[4], i32::from(tictactoe::CellMark::O));
        assert_eq!(over.board[8], i32::from(tictactoe::CellMark::Empty));
    }

    #[test]
    fn test_unspecified_symbol_has_no_domain_value() {
        assert_eq!(GameSymbol::from_proto(0), None);
        assert_eq!(GameSymbol::from_proto(42), None);
        assert_eq!(GameSymbol::from_proto(1), Some(GameSymbol::X));
        assert_eq!(GameSymbol::from_proto(2), Some(GameSymbol::O));
    }

    #[test]
    fn test_make_move_request_carries_symbol() {
        let session_id = SessionId::new("Bold-Fox-00000000000000ff");
        let bytes = ClientMessage::make_move(&session_id, 4, GameSymbol::O).encode_to_vec();
        let decoded = ClientMessage::decode(bytes.as_slice()).unwrap();

        let Some(client_message::Message::MakeMove(request)) = decoded.message else {
            panic!("expected makeMove");
        };
        assert_eq!(request.session_id, session_id.as_str());
        assert_eq!(request.index, 4);
        assert_eq!(GameSymbol::from_proto(request.symbol), Some(GameSymbol::O));
    }
}
