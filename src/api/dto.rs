//! APIのリクエスト/レスポンスDTO定義モジュール
//! コアのスナップショット型をトランスポート向けのJSON表現に変換する。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::game::{Cell, GameStatus, Player, BOARD_SIZE};
use crate::session::{GameResultSummary, GameView, LobbyView, MoveOutcome, Placement};
use crate::text;

/// セッション開始・参加リクエスト
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRequest {
    pub user_id: String,
    pub display_name: String,
}

/// 着手リクエスト
/// coordinateは"A1"形式の座標文字列
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRequest {
    pub user_id: String,
    pub coordinate: String,
}

/// ゲーム状態のJSON表現
/// board: 0=空、1=黒、2=白
#[derive(Debug, Clone, Serialize)]
pub struct GameDto {
    pub game_id: Uuid,
    pub board: [[u8; BOARD_SIZE]; BOARD_SIZE],
    pub board_text: String,
    pub current_player: Player,
    pub current_player_name: Option<String>,
    pub current_is_computer: bool,
    pub legal_moves: Vec<String>,
    pub black_count: u8,
    pub white_count: u8,
    pub status: String,
    pub move_count: usize,
}

impl GameDto {
    pub fn from_view(view: &GameView) -> Self {
        let mut board = [[0u8; BOARD_SIZE]; BOARD_SIZE];
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                board[row][col] = match view.board[row][col] {
                    Cell::Empty => 0,
                    Cell::Black => 1,
                    Cell::White => 2,
                };
            }
        }

        let legal_moves = view
            .legal_moves
            .iter()
            .map(|(position, _)| text::coordinate_label(*position))
            .collect();

        let status = match &view.status {
            GameStatus::InProgress => "in_progress".to_string(),
            GameStatus::Finished { winner, .. } => match winner {
                Some(Player::Black) => "finished_black_wins",
                Some(Player::White) => "finished_white_wins",
                None => "finished_draw",
            }
            .to_string(),
        };

        Self {
            game_id: view.id,
            board,
            board_text: text::render_board(view),
            current_player: view.current_player,
            current_player_name: view
                .mode
                .participant_for(view.current_player)
                .map(|participant| participant.display_name.clone()),
            current_is_computer: view.current_is_computer,
            legal_moves,
            black_count: view.score.0,
            white_count: view.score.1,
            status,
            move_count: view.move_count,
        }
    }
}

/// ロビーのJSON表現
#[derive(Debug, Clone, Serialize)]
pub struct LobbyDto {
    pub initiator_name: String,
    pub created_at: DateTime<Utc>,
}

impl LobbyDto {
    pub fn from_view(view: &LobbyView) -> Self {
        Self {
            initiator_name: view.initiator.display_name.clone(),
            created_at: view.created_at,
        }
    }
}

/// セッション開始レスポンス
#[derive(Debug, Clone, Serialize)]
pub struct StartResponse {
    pub message: String,
    pub game: GameDto,
}

/// ロビー開設レスポンス
#[derive(Debug, Clone, Serialize)]
pub struct LobbyResponse {
    pub message: String,
    pub lobby: LobbyDto,
}

/// 1回の着手のJSON表現
#[derive(Debug, Clone, Serialize)]
pub struct PlacementDto {
    pub player: Player,
    pub coordinate: String,
    pub flipped: Vec<String>,
}

impl PlacementDto {
    pub fn from_placement(placement: &Placement) -> Self {
        Self {
            player: placement.player,
            coordinate: text::coordinate_label(placement.position),
            flipped: placement
                .flipped
                .iter()
                .map(|position| text::coordinate_label(*position))
                .collect(),
        }
    }
}

/// 終局結果のJSON表現
/// winnerは"black"、"white"または"draw"
#[derive(Debug, Clone, Serialize)]
pub struct ResultDto {
    pub winner: String,
    pub black_count: u8,
    pub white_count: u8,
}

impl ResultDto {
    pub fn from_summary(summary: &GameResultSummary) -> Self {
        let winner = match summary.winner {
            Some(Player::Black) => "black",
            Some(Player::White) => "white",
            None => "draw",
        }
        .to_string();

        Self {
            winner,
            black_count: summary.black,
            white_count: summary.white,
        }
    }
}

/// 着手レスポンス
/// 着手、パス、コンピュータの応手、終局情報を全て含む
#[derive(Debug, Clone, Serialize)]
pub struct MoveResponse {
    pub success: bool,
    pub placed: Option<PlacementDto>,
    pub passes: Vec<Player>,
    pub replies: Vec<PlacementDto>,
    pub finished: bool,
    pub result: Option<ResultDto>,
    pub game: GameDto,
}

impl MoveResponse {
    pub fn from_outcome(outcome: &MoveOutcome) -> Self {
        Self {
            success: true,
            placed: outcome.placed.as_ref().map(PlacementDto::from_placement),
            passes: outcome.passes.clone(),
            replies: outcome
                .replies
                .iter()
                .map(PlacementDto::from_placement)
                .collect(),
            finished: outcome.is_finished(),
            result: outcome.result.as_ref().map(ResultDto::from_summary),
            game: GameDto::from_view(&outcome.game),
        }
    }
}

/// ルーム状態レスポンス
/// kindは"lobby"または"game"
#[derive(Debug, Clone, Serialize)]
pub struct RoomResponse {
    pub room: String,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lobby: Option<LobbyDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game: Option<GameDto>,
}

/// セッション終了レスポンス
/// removedは"lobby"、"game"またはnull（何も存在しなかった場合）
#[derive(Debug, Clone, Serialize)]
pub struct EndResponse {
    pub removed: Option<String>,
    pub message: String,
}

/// エラーレスポンス
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
