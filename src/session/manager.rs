//! ルーム単位のセッション管理モジュール
//! チャンネル/ルームIDごとに最大1つのセッション（ロビーまたは対局中ゲーム）を管理し、
//! ロビーの成立、手番の認可、パスとコンピュータ応手の解決を担当する。
//!
//! 同一ルームへの操作はDashMapのキー単位ロックで直列化され、
//! 異なるルームへの操作は競合しない。全ての操作は有界な同期計算のみを
//! ロック保持中に行う（ロック中のI/Oや待機はない）。

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::ai::{GreedyPolicy, OpponentPolicy};
use crate::error::{GameError, SessionError};
use crate::game::{
    Cell, GameState, GameStatus, Mode, OthelloRules, Participant, Player, Position, BOARD_SIZE,
};

/// 1ルームのセッションを表すenum
/// ロビー（対戦相手待ち）か対局中ゲームのどちらか一方のみ
#[derive(Debug, Clone)]
pub enum Session {
    /// 2人対戦の参加者待ちロビー
    Lobby(Lobby),
    /// 対局中のゲーム
    Active(GameState),
}

/// 2人対戦の参加者待ちロビー
#[derive(Debug, Clone)]
pub struct Lobby {
    pub initiator: Participant,
    pub created_at: DateTime<Utc>,
}

impl Lobby {
    pub fn new(initiator: Participant) -> Self {
        Self {
            initiator,
            created_at: Utc::now(),
        }
    }
}

/// セッションの種別（終了報告用）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    Lobby,
    Active,
}

impl Session {
    fn kind(&self) -> SessionKind {
        match self {
            Session::Lobby(_) => SessionKind::Lobby,
            Session::Active(_) => SessionKind::Active,
        }
    }
}

/// レンダリング用のゲーム状態スナップショット
/// マネージャ内部の状態への参照は一切持たない
#[derive(Debug, Clone)]
pub struct GameView {
    pub id: Uuid,
    pub board: [[Cell; BOARD_SIZE]; BOARD_SIZE],
    pub mode: Mode,
    pub current_player: Player,
    pub current_is_computer: bool,
    pub legal_moves: Vec<(Position, usize)>,
    pub score: (u8, u8),
    pub status: GameStatus,
    pub move_count: usize,
}

impl GameView {
    /// ゲーム状態から描画に必要な情報を全て写し取る
    pub fn from_state(state: &GameState) -> Self {
        Self {
            id: state.id,
            board: state.board.grid(),
            mode: state.mode.clone(),
            current_player: state.current_player,
            current_is_computer: state.is_computer_turn(),
            legal_moves: OthelloRules::legal_moves(&state.board, state.current_player),
            score: state.get_score(),
            status: state.game_status.clone(),
            move_count: state.get_move_count(),
        }
    }
}

/// ロビーのスナップショット
#[derive(Debug, Clone)]
pub struct LobbyView {
    pub initiator: Participant,
    pub created_at: DateTime<Utc>,
}

/// ルームの現在の状態（ロビーまたはゲーム）
#[derive(Debug, Clone)]
pub enum RoomView {
    Lobby(LobbyView),
    Game(GameView),
}

/// 1回の着手（人間またはコンピュータ）の記録
#[derive(Debug, Clone)]
pub struct Placement {
    pub player: Player,
    pub position: Position,
    pub flipped: Vec<Position>,
}

/// 終局時の結果
#[derive(Debug, Clone)]
pub struct GameResultSummary {
    /// 勝者。Noneは引き分け
    pub winner: Option<Player>,
    pub black: u8,
    pub white: u8,
}

/// submit_moveの構造化された結果
/// 着手、パス、コンピュータの応手、終局情報を全て含む
#[derive(Debug, Clone)]
pub struct MoveOutcome {
    /// 提出者の着手。提出者がパスだった場合はNone
    pub placed: Option<Placement>,
    /// 発生したパスの列（発生順）
    pub passes: Vec<Player>,
    /// コンピュータの応手の列（コンピュータ対戦モードのみ）
    pub replies: Vec<Placement>,
    /// 終局した場合の結果
    pub result: Option<GameResultSummary>,
    /// 全ての解決後のゲーム状態スナップショット
    pub game: GameView,
}

impl MoveOutcome {
    pub fn is_finished(&self) -> bool {
        self.result.is_some()
    }
}

/// ルームIDをキーとするセッション管理のメイン構造体
/// DashMapのシャード単位ロックで同一ルームの操作を直列化する
#[derive(Clone)]
pub struct SessionManager {
    /// ルームIDごとのセッション
    rooms: Arc<DashMap<String, Session>>,
    /// コンピュータ側の手選択ポリシー
    policy: Arc<dyn OpponentPolicy>,
    /// 参加者が現れないロビーを破棄するまでの時間（分）
    lobby_timeout_minutes: i64,
}

impl SessionManager {
    /// デフォルト設定（貪欲ポリシー、ロビータイムアウト30分）で作成する
    pub fn new() -> Self {
        Self::with_policy(Arc::new(GreedyPolicy::new()))
    }

    /// 指定した手選択ポリシーでセッションマネージャを作成する
    pub fn with_policy(policy: Arc<dyn OpponentPolicy>) -> Self {
        Self {
            rooms: Arc::new(DashMap::new()),
            policy,
            lobby_timeout_minutes: 30,
        }
    }

    /// カスタムのロビータイムアウトを設定する
    pub fn with_lobby_timeout(mut self, timeout_minutes: i64) -> Self {
        self.lobby_timeout_minutes = timeout_minutes;
        self
    }

    /// コンピュータ対戦のセッションを開始する
    /// 人間が黒（先手）、コンピュータが白を担当する
    /// ルームに既にセッションがある場合はSessionAlreadyExists
    pub fn start_single_player(
        &self,
        room: &str,
        human: Participant,
    ) -> Result<GameView, SessionError> {
        match self.rooms.entry(room.to_string()) {
            Entry::Occupied(_) => Err(SessionError::SessionAlreadyExists {
                room: room.to_string(),
            }),
            Entry::Vacant(vacant) => {
                let state = GameState::new_vs_computer(human);
                let view = GameView::from_state(&state);
                vacant.insert(Session::Active(state));
                Ok(view)
            }
        }
    }

    /// 2人対戦のロビーを開設する
    /// ルームに既にセッションがある場合はSessionAlreadyExists
    pub fn start_two_player_lobby(
        &self,
        room: &str,
        initiator: Participant,
    ) -> Result<LobbyView, SessionError> {
        match self.rooms.entry(room.to_string()) {
            Entry::Occupied(_) => Err(SessionError::SessionAlreadyExists {
                room: room.to_string(),
            }),
            Entry::Vacant(vacant) => {
                let lobby = Lobby::new(initiator);
                let view = LobbyView {
                    initiator: lobby.initiator.clone(),
                    created_at: lobby.created_at,
                };
                vacant.insert(Session::Lobby(lobby));
                Ok(view)
            }
        }
    }

    /// 開設済みのロビーに参加し、ゲームを開始する
    /// 開設者が黒（先手）、参加者が白を担当する
    pub fn join(&self, room: &str, joiner: Participant) -> Result<GameView, SessionError> {
        let mut entry = self
            .rooms
            .get_mut(room)
            .ok_or_else(|| SessionError::NoLobby {
                room: room.to_string(),
            })?;

        let initiator = match entry.value() {
            // 対局が既に始まっている場合、参加できるロビーは存在しない
            Session::Active(_) => {
                return Err(SessionError::NoLobby {
                    room: room.to_string(),
                })
            }
            Session::Lobby(lobby) => {
                if lobby.initiator.user_id == joiner.user_id {
                    return Err(SessionError::SelfJoin);
                }
                lobby.initiator.clone()
            }
        };

        let state = GameState::new_two_player(initiator, joiner);
        let view = GameView::from_state(&state);
        *entry.value_mut() = Session::Active(state);
        Ok(view)
    }

    /// 着手を提出し、パスとコンピュータの応手まで解決する
    ///
    /// 提出者に合法手がない場合は盤面を変更せずパスとして記録する。
    /// その後、人間が着手可能になるか終局するまで、パスと
    /// コンピュータの応手（貪欲選択）をループで解決する。
    /// 各反復は石を置くかパスするかのいずれかのため、ループは
    /// 盤面のマス数で有界となる。
    pub fn submit_move(
        &self,
        room: &str,
        user_id: &str,
        position: Position,
    ) -> Result<MoveOutcome, SessionError> {
        let mut finished = false;
        let outcome = {
            let mut entry = self
                .rooms
                .get_mut(room)
                .ok_or_else(|| SessionError::NoSession {
                    room: room.to_string(),
                })?;

            let state = match entry.value_mut() {
                // ロビーは対局前のため着手は受け付けない
                Session::Lobby(_) => {
                    return Err(SessionError::NoSession {
                        room: room.to_string(),
                    })
                }
                Session::Active(state) => state,
            };

            if state.is_finished() {
                return Err(SessionError::Game {
                    source: GameError::GameFinished,
                });
            }

            // 手番の認可：現在の手番に紐付いた参加者のみ着手できる
            match state.mode.participant_for(state.current_player) {
                Some(participant) if participant.user_id == user_id => {}
                _ => return Err(SessionError::NotYourTurn),
            }

            let mut placed = None;
            let mut passes = Vec::new();
            let mut replies = Vec::new();

            if OthelloRules::has_legal_moves(&state.board, state.current_player) {
                let player = state.current_player;
                let flipped = OthelloRules::apply_move(state, position)?;
                placed = Some(Placement {
                    player,
                    position,
                    flipped,
                });
            } else {
                // 置ける場所がない：提出された座標は無視し、パスとして扱う
                passes.push(state.current_player);
                state.switch_player();
            }

            loop {
                if OthelloRules::is_game_over(&state.board) {
                    let winner = OthelloRules::determine_winner(&state.board);
                    state.finish(winner);
                    break;
                }

                let current = state.current_player;
                if !OthelloRules::has_legal_moves(&state.board, current) {
                    passes.push(current);
                    state.switch_player();
                    continue;
                }

                if state.is_computer_turn() {
                    let legal_moves = OthelloRules::legal_moves(&state.board, current);
                    let reply_position = match self.policy.choose_move(&legal_moves) {
                        Some(position) => position,
                        None => break,
                    };
                    let flipped = OthelloRules::apply_move(state, reply_position)?;
                    replies.push(Placement {
                        player: current,
                        position: reply_position,
                        flipped,
                    });
                    continue;
                }

                // 人間が着手可能な状態に到達
                break;
            }

            let result = match state.game_status {
                GameStatus::Finished { winner, score } => {
                    finished = true;
                    Some(GameResultSummary {
                        winner,
                        black: score.0,
                        white: score.1,
                    })
                }
                _ => None,
            };

            MoveOutcome {
                placed,
                passes,
                replies,
                result,
                game: GameView::from_state(state),
            }
        };

        // 終局したゲームのセッションを破棄する（ロック解放後）
        if finished {
            self.rooms.remove_if(room, |_, session| {
                matches!(session, Session::Active(state) if state.is_finished())
            });
        }

        Ok(outcome)
    }

    /// ルームのセッションを終了する（冪等）
    /// 削除されたセッションの種別を返す。存在しなかった場合はNone
    pub fn end(&self, room: &str) -> Option<SessionKind> {
        self.rooms
            .remove(room)
            .map(|(_, session)| session.kind())
    }

    /// ルームの現在の状態スナップショットを取得する
    pub fn view(&self, room: &str) -> Result<RoomView, SessionError> {
        let entry = self.rooms.get(room).ok_or_else(|| SessionError::NoSession {
            room: room.to_string(),
        })?;

        let view = match entry.value() {
            Session::Lobby(lobby) => RoomView::Lobby(LobbyView {
                initiator: lobby.initiator.clone(),
                created_at: lobby.created_at,
            }),
            Session::Active(state) => RoomView::Game(GameView::from_state(state)),
        };
        Ok(view)
    }

    /// セッションを直接配置する
    /// 既存のセッションは上書きされる（局面の再現やテストに使用）
    pub fn put_session(&self, room: &str, session: Session) {
        self.rooms.insert(room.to_string(), session);
    }

    /// タイムアウトした参加者待ちロビーを破棄する
    /// 戻り値は破棄したロビー数
    pub fn cleanup_stale_lobbies(&self) -> usize {
        let cutoff = Utc::now() - Duration::minutes(self.lobby_timeout_minutes);

        let stale_rooms: Vec<String> = self
            .rooms
            .iter()
            .filter(|entry| matches!(entry.value(), Session::Lobby(lobby) if lobby.created_at < cutoff))
            .map(|entry| entry.key().clone())
            .collect();

        let mut removed = 0;
        for room in stale_rooms {
            let was_removed = self
                .rooms
                .remove_if(&room, |_, session| {
                    matches!(session, Session::Lobby(lobby) if lobby.created_at < cutoff)
                })
                .is_some();
            if was_removed {
                removed += 1;
            }
        }

        removed
    }

    /// ルームにセッションが存在するかチェックする
    pub fn has_session(&self, room: &str) -> bool {
        self.rooms.contains_key(room)
    }

    /// 現在のセッション数を取得する
    pub fn session_count(&self) -> usize {
        self.rooms.len()
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}
