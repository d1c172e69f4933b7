//! オセロゲームの盤面状態を管理するモジュール
//! 6x6グリッドの盤面と石の配置、操作を担当する。

use super::types::{Cell, Player, Position, BOARD_SIZE};
use serde::{Deserialize, Serialize};

/// 6x6オセロ盤面を表現する構造体
/// 各マスのCell状態を保持し、盤面操作を提供する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// 新しいオセロ盤面を作成する
    /// 中央の4マスに初期配置（白黒交互）を設定する
    pub fn new() -> Self {
        let mut board = Board::empty();

        // 6x6オセロの標準初期配置（中央2x2ブロック）
        let mid = BOARD_SIZE / 2;
        board.cells[mid - 1][mid - 1] = Cell::White;
        board.cells[mid - 1][mid] = Cell::Black;
        board.cells[mid][mid - 1] = Cell::Black;
        board.cells[mid][mid] = Cell::White;

        board
    }

    /// 石が1つも置かれていない空の盤面を作成する
    /// テストや局面の再現に使用する
    pub fn empty() -> Self {
        Board {
            cells: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// 指定した位置のセル状態を取得する
    /// 範囲外の場合はNoneを返す
    pub fn get_cell(&self, position: Position) -> Option<Cell> {
        if position.is_valid() {
            Some(self.cells[position.row][position.col])
        } else {
            None
        }
    }

    /// 指定した位置にセル状態を設定する
    /// 範囲外の場合はfalseを返す
    pub fn set_cell(&mut self, position: Position, cell: Cell) -> bool {
        if position.is_valid() {
            self.cells[position.row][position.col] = cell;
            true
        } else {
            false
        }
    }

    /// 指定した位置が空かチェックする
    pub fn is_empty(&self, position: Position) -> bool {
        matches!(self.get_cell(position), Some(Cell::Empty))
    }

    /// 指定したプレイヤーの石の数を数える
    pub fn count_for(&self, player: Player) -> u8 {
        let target = player.to_cell();
        let mut count = 0;
        for row in &self.cells {
            for &cell in row {
                if cell == target {
                    count += 1;
                }
            }
        }
        count
    }

    /// 盤面上の黒石と白石の数を数える
    /// 戻り値: (黒石数, 白石数)
    pub fn count_pieces(&self) -> (u8, u8) {
        (self.count_for(Player::Black), self.count_for(Player::White))
    }

    /// 盤面をセル状態の2次元配列として取得する
    /// レンダリング用のスナップショットで、内部状態への参照は渡さない
    pub fn grid(&self) -> [[Cell; BOARD_SIZE]; BOARD_SIZE] {
        self.cells
    }

    /// デバッグ用の盤面表示文字列を生成する
    /// ●で黒、○で白、.で空マスを表現
    pub fn display(&self) -> String {
        let mut result = String::new();
        result.push_str("  0 1 2 3 4 5\n");

        for (row_idx, row) in self.cells.iter().enumerate() {
            result.push_str(&format!("{} ", row_idx));
            for &cell in row {
                let symbol = match cell {
                    Cell::Empty => ".",
                    Cell::Black => "●",
                    Cell::White => "○",
                };
                result.push_str(&format!("{} ", symbol));
            }
            result.push('\n');
        }

        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_new_initial_state() {
        let board = Board::new();

        assert_eq!(board.get_cell(Position::new(2, 2).unwrap()), Some(Cell::White));
        assert_eq!(board.get_cell(Position::new(2, 3).unwrap()), Some(Cell::Black));
        assert_eq!(board.get_cell(Position::new(3, 2).unwrap()), Some(Cell::Black));
        assert_eq!(board.get_cell(Position::new(3, 3).unwrap()), Some(Cell::White));

        assert_eq!(board.get_cell(Position::new(0, 0).unwrap()), Some(Cell::Empty));
        assert_eq!(board.get_cell(Position::new(5, 5).unwrap()), Some(Cell::Empty));
    }

    #[test]
    fn test_board_empty() {
        let board = Board::empty();
        assert_eq!(board.count_pieces(), (0, 0));
    }

    #[test]
    fn test_board_get_cell_invalid_position() {
        let board = Board::new();
        assert_eq!(board.get_cell(Position { row: 6, col: 0 }), None);
        assert_eq!(board.get_cell(Position { row: 0, col: 6 }), None);
    }

    #[test]
    fn test_board_set_cell() {
        let mut board = Board::new();
        let pos = Position::new(0, 0).unwrap();

        assert!(board.set_cell(pos, Cell::Black));
        assert_eq!(board.get_cell(pos), Some(Cell::Black));
    }

    #[test]
    fn test_board_set_cell_invalid_position() {
        let mut board = Board::new();
        assert!(!board.set_cell(Position { row: 6, col: 0 }, Cell::Black));
    }

    #[test]
    fn test_board_is_empty() {
        let board = Board::new();

        assert!(board.is_empty(Position::new(0, 0).unwrap()));
        assert!(!board.is_empty(Position::new(2, 2).unwrap()));
    }

    #[test]
    fn test_board_count_pieces_initial() {
        let board = Board::new();
        let (black_count, white_count) = board.count_pieces();

        assert_eq!(black_count, 2);
        assert_eq!(white_count, 2);
    }

    #[test]
    fn test_board_grid_is_snapshot() {
        let mut board = Board::new();
        let grid = board.grid();

        board.set_cell(Position::new(0, 0).unwrap(), Cell::Black);
        assert_eq!(grid[0][0], Cell::Empty);
    }

    #[test]
    fn test_board_display() {
        let board = Board::new();
        let display = board.display();

        assert!(display.contains("0 1 2 3 4 5"));
        assert!(display.contains("●"));
        assert!(display.contains("○"));
        assert!(display.contains("."));
    }
}
