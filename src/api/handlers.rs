//! APIハンドラ実装モジュール
//! トランスポートからの論理アクションをセッションマネージャの操作に変換する。
//! コアが外部に呼び出しを行うことはなく、構造化された結果のみを返す。

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;

use crate::error::{GameError, SessionError};
use crate::game::Participant;
use crate::session::{RoomView, SessionKind, SessionManager};
use crate::text;

use super::dto::{
    EndResponse, ErrorResponse, GameDto, LobbyDto, LobbyResponse, MoveRequest, MoveResponse,
    PlayerRequest, RoomResponse, StartResponse,
};

/// アプリケーション全体の共有状態
#[derive(Clone)]
pub struct AppState {
    pub manager: Arc<SessionManager>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            manager: Arc::new(SessionManager::new()),
        }
    }

    pub fn with_manager(manager: Arc<SessionManager>) -> Self {
        Self { manager }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

/// セッションエラーをHTTPステータスとエラーレスポンスに変換する
fn map_error(error: SessionError) -> ApiError {
    let status = match &error {
        SessionError::SessionAlreadyExists { .. } => StatusCode::CONFLICT,
        SessionError::NoSession { .. } | SessionError::NoLobby { .. } => StatusCode::NOT_FOUND,
        SessionError::SelfJoin => StatusCode::BAD_REQUEST,
        SessionError::NotYourTurn => StatusCode::FORBIDDEN,
        SessionError::Game { source } => match source {
            GameError::IllegalMove { .. } => StatusCode::BAD_REQUEST,
            GameError::GameFinished => StatusCode::CONFLICT,
        },
    };

    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
            details: None,
        }),
    )
}

/// コンピュータ対戦のセッションを開始する
pub async fn start_single_player(
    State(state): State<AppState>,
    Path(room): Path<String>,
    Json(payload): Json<PlayerRequest>,
) -> Result<(StatusCode, Json<StartResponse>), ApiError> {
    let human = Participant::new(payload.user_id, payload.display_name);
    let view = state
        .manager
        .start_single_player(&room, human)
        .map_err(map_error)?;

    let response = StartResponse {
        message: "6x6 オセロを開始します！ ⚫️ (あなた) のターンです。".to_string(),
        game: GameDto::from_view(&view),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// 2人対戦のロビーを開設する
pub async fn start_two_player_lobby(
    State(state): State<AppState>,
    Path(room): Path<String>,
    Json(payload): Json<PlayerRequest>,
) -> Result<(StatusCode, Json<LobbyResponse>), ApiError> {
    let initiator = Participant::new(payload.user_id, payload.display_name);
    let view = state
        .manager
        .start_two_player_lobby(&room, initiator)
        .map_err(map_error)?;

    let response = LobbyResponse {
        message: format!(
            "{} さんが対戦相手を募集しています。参加するとゲームが始まります。",
            view.initiator.display_name
        ),
        lobby: LobbyDto::from_view(&view),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// 開設済みのロビーに参加する
pub async fn join_room(
    State(state): State<AppState>,
    Path(room): Path<String>,
    Json(payload): Json<PlayerRequest>,
) -> Result<Json<StartResponse>, ApiError> {
    let joiner = Participant::new(payload.user_id, payload.display_name);
    let view = state.manager.join(&room, joiner).map_err(map_error)?;

    let response = StartResponse {
        message: "対戦相手が揃いました。⚫️ (先手) のターンです。".to_string(),
        game: GameDto::from_view(&view),
    };
    Ok(Json(response))
}

/// 着手を提出する
/// 座標文字列はコアに渡す前にここでパース・拒否される
pub async fn submit_move(
    State(state): State<AppState>,
    Path(room): Path<String>,
    Json(payload): Json<MoveRequest>,
) -> Result<Json<MoveResponse>, ApiError> {
    let position = text::parse_coordinate(&payload.coordinate).ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("Invalid coordinate: {}", payload.coordinate),
                details: Some("Expected a coordinate like A1 (columns A-F, rows 1-6)".to_string()),
            }),
        )
    })?;

    let outcome = state
        .manager
        .submit_move(&room, &payload.user_id, position)
        .map_err(map_error)?;

    Ok(Json(MoveResponse::from_outcome(&outcome)))
}

/// ルームの現在の状態を取得する
pub async fn get_room(
    State(state): State<AppState>,
    Path(room): Path<String>,
) -> Result<Json<RoomResponse>, ApiError> {
    let view = state.manager.view(&room).map_err(map_error)?;

    let response = match view {
        RoomView::Lobby(lobby) => RoomResponse {
            room,
            kind: "lobby".to_string(),
            lobby: Some(LobbyDto::from_view(&lobby)),
            game: None,
        },
        RoomView::Game(game) => RoomResponse {
            room,
            kind: "game".to_string(),
            lobby: None,
            game: Some(GameDto::from_view(&game)),
        },
    };
    Ok(Json(response))
}

/// ルームのセッションを終了する（冪等）
pub async fn end_room(
    State(state): State<AppState>,
    Path(room): Path<String>,
) -> Json<EndResponse> {
    let (removed, message) = match state.manager.end(&room) {
        Some(SessionKind::Active) => (
            Some("game".to_string()),
            "現在のゲームを終了しました。".to_string(),
        ),
        Some(SessionKind::Lobby) => (
            Some("lobby".to_string()),
            "募集中のロビーを取り消しました。".to_string(),
        ),
        None => (None, "進行中のゲームはありません。".to_string()),
    };

    Json(EndResponse { removed, message })
}

pub async fn health_check() -> &'static str {
    "Othello room server is running"
}
