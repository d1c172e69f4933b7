//! アプリケーション全体のエラー定義モジュール
//! ゲームロジックとセッション管理のエラーを統一管理する。
//! 全てのエラーは回復可能で、プロセスを停止させることはない。

use thiserror::Error;

/// ゲームロジックに関連するエラー
#[derive(Debug, Error)]
pub enum GameError {
    #[error("Illegal move: {reason}")]
    IllegalMove { reason: String },

    #[error("Game already finished")]
    GameFinished,
}

/// セッション管理に関連するエラー
/// ルーム単位のセッション操作で発生する全ての失敗を表す
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("A game or lobby already exists in room {room}")]
    SessionAlreadyExists { room: String },

    #[error("No game in progress in room {room}")]
    NoSession { room: String },

    #[error("No open lobby in room {room}")]
    NoLobby { room: String },

    #[error("Cannot join a lobby you opened yourself")]
    SelfJoin,

    #[error("It is not your turn")]
    NotYourTurn,

    #[error("Game error: {source}")]
    Game {
        #[from]
        source: GameError,
    },
}

/// セッションエラーをベースとした結果型
pub type Result<T> = std::result::Result<T, SessionError>;
