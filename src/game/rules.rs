//! オセロのルールとゲームロジック実装モジュール
//! 合法手の判定、石のフリップ処理、パス・ゲーム終了判定などを担当する。

use super::types::{Move, Player, Position, BOARD_SIZE};
use super::board::Board;
use super::state::GameState;
use crate::error::GameError;

/// 盤面上の8方向への移動ベクトル
/// 上下左右および斜めの8方向で石のフリップをチェックする
const DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1), (-1, 0), (-1, 1),  // 左上、上、右上
    (0, -1),           (0, 1),   // 左、右
    (1, -1),  (1, 0),  (1, 1),   // 左下、下、右下
];

/// オセロのルールを実装する構造体
/// スタティックメソッドのみを提供する
pub struct OthelloRules;

impl OthelloRules {
    /// 指定した位置に石を置いた場合にフリップされる石の位置を返す
    /// 範囲外または既に石がある場合は空を返す
    /// 核心アルゴリズム：8方向を探索し、相手の石の連なりが自分の石で
    /// 終端している方向の石を全てフリップ対象とする
    pub fn flippable_discs(board: &Board, position: Position, player: Player) -> Vec<Position> {
        if !board.is_empty(position) {
            return Vec::new();
        }

        let size = BOARD_SIZE as i8;
        let player_cell = player.to_cell();
        let opponent_cell = player.opponent().to_cell();
        let mut flippable = Vec::new();

        for &(dr, dc) in &DIRECTIONS {
            let mut line = Vec::new();
            let mut row = position.row as i8 + dr;
            let mut col = position.col as i8 + dc;

            // 相手の石が続く限りこの方向に進む
            while row >= 0 && row < size && col >= 0 && col < size {
                let current = Position {
                    row: row as usize,
                    col: col as usize,
                };

                match board.get_cell(current) {
                    Some(cell) if cell == opponent_cell => {
                        line.push(current);
                    }
                    Some(cell) if cell == player_cell => {
                        // 自分の石で終端、この方向のフリップが確定
                        flippable.extend(line);
                        break;
                    }
                    _ => {
                        // 空マスで終端または盤外、この方向は無効
                        break;
                    }
                }

                row += dr;
                col += dc;
            }
        }

        flippable
    }

    /// 指定した位置に現在のプレイヤーが置けるかチェックする
    /// 空のマスで、かつ相手の石を少なくとも1個フリップできる必要がある
    pub fn is_legal_move(board: &Board, position: Position, player: Player) -> bool {
        !Self::flippable_discs(board, position, player).is_empty()
    }

    /// 指定したプレイヤーの合法手とそのフリップ数を全て取得する
    /// 走査順は行優先（上から下、左から右）で固定。
    /// この順序はコンピュータの同点手選択の再現性に必要
    pub fn legal_moves(board: &Board, player: Player) -> Vec<(Position, usize)> {
        let mut moves = Vec::new();

        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                if let Some(position) = Position::new(row, col) {
                    let flips = Self::flippable_discs(board, position, player).len();
                    if flips > 0 {
                        moves.push((position, flips));
                    }
                }
            }
        }

        moves
    }

    /// 指定したプレイヤーに合法手があるかチェックする
    /// パス判定に使用される
    pub fn has_legal_moves(board: &Board, player: Player) -> bool {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let position = Position { row, col };
                if Self::is_legal_move(board, position, player) {
                    return true;
                }
            }
        }
        false
    }

    /// 現在のプレイヤーの手を適用し、盤面を更新して手番を交代する
    /// 戻り値はフリップされた石の位置リスト
    /// 無効な手の場合は盤面を一切変更せずにエラーを返す
    pub fn apply_move(game_state: &mut GameState, position: Position) -> Result<Vec<Position>, GameError> {
        if game_state.is_finished() {
            return Err(GameError::GameFinished);
        }

        let player = game_state.current_player;
        let flipped = Self::flippable_discs(&game_state.board, position, player);
        if flipped.is_empty() {
            return Err(GameError::IllegalMove {
                reason: format!(
                    "Position ({}, {}) is not a legal move for {:?}",
                    position.row, position.col, player
                ),
            });
        }

        // 新しい石を配置
        game_state.board.set_cell(position, player.to_cell());

        // フリップされた石を全て自分の色に変更
        for flip_pos in &flipped {
            game_state.board.set_cell(*flip_pos, player.to_cell());
        }

        // 手の履歴に記録し、手番を交代
        game_state.add_move(Move::new(player, position, flipped.clone()));
        game_state.switch_player();

        Ok(flipped)
    }

    /// ゲーム終了判定（両プレイヤーとも合法手がない）
    pub fn is_game_over(board: &Board) -> bool {
        !Self::has_legal_moves(board, Player::Black) && !Self::has_legal_moves(board, Player::White)
    }

    /// 最終スコアに基づいて勝者を決定する
    /// 同数の場合はNone（引き分け）を返す
    pub fn determine_winner(board: &Board) -> Option<Player> {
        let (black_count, white_count) = board.count_pieces();

        if black_count > white_count {
            Some(Player::Black)
        } else if white_count > black_count {
            Some(Player::White)
        } else {
            None
        }
    }
}
