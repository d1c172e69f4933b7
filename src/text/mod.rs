//! テキスト表現モジュール（プレゼンテーションアダプタ）
//! ユーザー入力の座標文字列（A1形式）のパースと、
//! チャットメッセージ用の盤面レンダリングを担当する。

use crate::game::{Cell, GameStatus, Player, Position, BOARD_SIZE};
use crate::session::GameView;

/// "A1"〜"F6"形式の座標文字列をパースする
/// 列は英字（大文字小文字どちらも可）、行は1-6の数字
/// 文法に合わない入力はNoneを返し、コアには渡さない
pub fn parse_coordinate(text: &str) -> Option<Position> {
    let mut chars = text.trim().chars();
    let col_char = chars.next()?.to_ascii_uppercase();
    let row_char = chars.next()?;
    if chars.next().is_some() {
        return None;
    }

    if !col_char.is_ascii_uppercase() {
        return None;
    }
    let col = (col_char as u8).wrapping_sub(b'A') as usize;
    let row = (row_char.to_digit(10)? as usize).checked_sub(1)?;

    // 最終的な範囲チェックはPosition::newが担う
    Position::new(row, col)
}

/// 座標を"A1"形式の文字列に変換する
pub fn coordinate_label(position: Position) -> String {
    let col_char = (b'A' + position.col as u8) as char;
    format!("{}{}", col_char, position.row + 1)
}

/// 盤面をチャットメッセージ用にレンダリングする
/// ⚫️黒、⚪️白、進行中で人間の手番なら置けるマスを🔵、その他は🟩で表現
pub fn render_board(view: &GameView) -> String {
    let show_hints =
        matches!(view.status, GameStatus::InProgress) && !view.current_is_computer;

    let mut board_str = String::from("  A B C D E F\n");
    for row in 0..BOARD_SIZE {
        board_str.push_str(&format!("{} ", row + 1));
        for col in 0..BOARD_SIZE {
            let symbol = match view.board[row][col] {
                Cell::Black => "⚫️",
                Cell::White => "⚪️",
                Cell::Empty => {
                    let position = Position { row, col };
                    let is_legal = view
                        .legal_moves
                        .iter()
                        .any(|(legal, _)| *legal == position);
                    if show_hints && is_legal {
                        "🔵"
                    } else {
                        "🟩"
                    }
                }
            };
            board_str.push_str(symbol);
        }
        board_str.push('\n');
    }

    format!("```{}```", board_str)
}

/// プレイヤーの表示マーカーを返す
pub fn player_marker(player: Player) -> &'static str {
    match player {
        Player::Black => "⚫️",
        Player::White => "⚪️",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameState, Participant};

    fn sample_view() -> GameView {
        let state = GameState::new_vs_computer(Participant::new("U1", "Tester"));
        GameView::from_state(&state)
    }

    #[test]
    fn test_parse_coordinate_valid() {
        assert_eq!(parse_coordinate("A1"), Position::new(0, 0));
        assert_eq!(parse_coordinate("F6"), Position::new(5, 5));
        assert_eq!(parse_coordinate("C2"), Position::new(1, 2));
    }

    #[test]
    fn test_parse_coordinate_case_insensitive() {
        assert_eq!(parse_coordinate("a1"), Position::new(0, 0));
        assert_eq!(parse_coordinate("f6"), Position::new(5, 5));
    }

    #[test]
    fn test_parse_coordinate_trims_whitespace() {
        assert_eq!(parse_coordinate(" B3 "), Position::new(2, 1));
    }

    #[test]
    fn test_parse_coordinate_invalid() {
        assert_eq!(parse_coordinate(""), None);
        assert_eq!(parse_coordinate("A"), None);
        assert_eq!(parse_coordinate("A0"), None);
        assert_eq!(parse_coordinate("A7"), None);
        assert_eq!(parse_coordinate("G1"), None);
        assert_eq!(parse_coordinate("11"), None);
        assert_eq!(parse_coordinate("A11"), None);
        assert_eq!(parse_coordinate("1A"), None);
    }

    #[test]
    fn test_coordinate_label_round_trip() {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let position = Position { row, col };
                let label = coordinate_label(position);
                assert_eq!(parse_coordinate(&label), Some(position));
            }
        }
    }

    #[test]
    fn test_render_board_initial() {
        let view = sample_view();
        let rendered = render_board(&view);

        assert!(rendered.starts_with("```"));
        assert!(rendered.ends_with("```"));
        assert!(rendered.contains("A B C D E F"));
        assert_eq!(rendered.matches("⚫️").count(), 2);
        assert_eq!(rendered.matches("⚪️").count(), 2);
        // 初期局面では黒に4つの合法手がある
        assert_eq!(rendered.matches("🔵").count(), 4);
    }

    #[test]
    fn test_render_board_no_hints_on_computer_turn() {
        let mut view = sample_view();
        view.current_is_computer = true;

        let rendered = render_board(&view);
        assert_eq!(rendered.matches("🔵").count(), 0);
    }

    #[test]
    fn test_player_marker() {
        assert_eq!(player_marker(Player::Black), "⚫️");
        assert_eq!(player_marker(Player::White), "⚪️");
    }
}
