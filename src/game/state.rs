//! ゲーム状態管理モジュール
//! 1セッション分のオセロゲームの全体状態（盤面、手番、対戦モード、進行状態）を管理する。

use super::types::{Move, Player};
use super::board::Board;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};

/// ゲームの進行状態を表すenum
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// ゲーム進行中
    InProgress,
    /// ゲーム終了（勝者と最終スコアを記録、勝者Noneは引き分け）
    Finished {
        winner: Option<Player>,
        score: (u8, u8),
    },
}

/// ゲームの参加者（外部チャット上のユーザー）を表す構造体
/// user_idは手番の認可に、display_nameは表示にのみ使用する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub user_id: String,
    pub display_name: String,
}

impl Participant {
    pub fn new(user_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: display_name.into(),
        }
    }
}

/// 対戦モードを表すenum
/// モードごとに必要なフィールドだけを保持する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// 人間（黒） vs コンピュータ（白）
    VsComputer { human: Participant },
    /// 人間同士の対戦
    TwoPlayer {
        black: Participant,
        white: Participant,
    },
}

impl Mode {
    /// 指定した手番がコンピュータに操作されているかを返す
    pub fn is_computer(&self, player: Player) -> bool {
        matches!(self, Mode::VsComputer { .. }) && player == Player::White
    }

    /// 指定した手番に紐付いた参加者を返す
    /// コンピュータ側の手番にはNoneを返す
    pub fn participant_for(&self, player: Player) -> Option<&Participant> {
        match self {
            Mode::VsComputer { human } => match player {
                Player::Black => Some(human),
                Player::White => None,
            },
            Mode::TwoPlayer { black, white } => match player {
                Player::Black => Some(black),
                Player::White => Some(white),
            },
        }
    }
}

/// オセロゲームの全体状態を保持する構造体
/// 盤面、現在のプレイヤー、対戦モード、手の履歴などを全て含む
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub id: Uuid,
    pub board: Board,
    pub current_player: Player,
    pub mode: Mode,
    pub game_status: GameStatus,
    pub move_history: Vec<Move>,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl GameState {
    /// コンピュータ対戦モードの新しいゲーム状態を作成する
    /// 人間が黒（先手）、コンピュータが白を担当する
    pub fn new_vs_computer(human: Participant) -> Self {
        Self::with_mode(Mode::VsComputer { human })
    }

    /// 2人対戦モードの新しいゲーム状態を作成する
    /// ロビー作成者が黒（先手）、参加者が白を担当する
    pub fn new_two_player(black: Participant, white: Participant) -> Self {
        Self::with_mode(Mode::TwoPlayer { black, white })
    }

    fn with_mode(mode: Mode) -> Self {
        Self {
            id: Uuid::new_v4(),
            board: Board::new(),
            current_player: Player::Black,
            mode,
            game_status: GameStatus::InProgress,
            move_history: Vec::new(),
            created_at: Utc::now(),
            last_updated: Utc::now(),
        }
    }

    /// ゲームが終了しているかチェックする
    pub fn is_finished(&self) -> bool {
        matches!(self.game_status, GameStatus::Finished { .. })
    }

    /// 現在の手番がコンピュータかチェックする
    pub fn is_computer_turn(&self) -> bool {
        self.mode.is_computer(self.current_player)
    }

    /// 現在のプレイヤーを交代する
    /// 手の実行後やパス時に呼び出される
    pub fn switch_player(&mut self) {
        self.current_player = self.current_player.opponent();
        self.last_updated = Utc::now();
    }

    /// 手の履歴に新しい手を追加する
    /// 最終更新時刻も同時に更新する
    pub fn add_move(&mut self, game_move: Move) {
        self.move_history.push(game_move);
        self.last_updated = Utc::now();
    }

    /// ゲームを終了させる
    /// 勝者と最終スコアを記録する
    pub fn finish(&mut self, winner: Option<Player>) {
        let (black_count, white_count) = self.board.count_pieces();
        self.game_status = GameStatus::Finished {
            winner,
            score: (black_count, white_count),
        };
        self.last_updated = Utc::now();
    }

    /// 現在のスコアを取得する
    /// 戻り値: (黒石数, 白石数)
    pub fn get_score(&self) -> (u8, u8) {
        self.board.count_pieces()
    }

    /// これまでの手数を取得する
    pub fn get_move_count(&self) -> usize {
        self.move_history.len()
    }
}
