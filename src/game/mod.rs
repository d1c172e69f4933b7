pub mod types;
pub mod board;
pub mod rules;
pub mod state;

pub use types::{Cell, Player, Position, Move, BOARD_SIZE};
pub use board::Board;
pub use rules::OthelloRules;
pub use state::{GameState, GameStatus, Mode, Participant};
