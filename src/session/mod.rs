pub mod manager;

pub use manager::{
    GameResultSummary, GameView, Lobby, LobbyView, MoveOutcome, Placement, RoomView, Session,
    SessionKind, SessionManager,
};
