use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use super::{
    handlers::{
        end_room, get_room, health_check, join_room, start_single_player, start_two_player_lobby,
        submit_move, AppState,
    },
    middleware::{cors, logging},
};

/// アプリケーションの全ルートを構築する
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/api/rooms/:room/single", post(start_single_player))
        .route("/api/rooms/:room/lobby", post(start_two_player_lobby))
        .route("/api/rooms/:room/join", post(join_room))
        .route("/api/rooms/:room/move", post(submit_move))
        .route("/api/rooms/:room", get(get_room).delete(end_room))
        .route("/health", get(health_check))
        .layer(middleware::from_fn(cors))
        .layer(middleware::from_fn(logging))
}
