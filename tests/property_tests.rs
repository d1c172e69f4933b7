//! プロパティベーステストモジュール
//! ランダムな着手シーケンスでゲームエンジンの不変条件を検証する。

use proptest::prelude::*;

use Othello::{
    ai::{GreedyPolicy, OpponentPolicy},
    game::{Cell, GameState, OthelloRules, Participant, Player, Position, BOARD_SIZE},
};

/// 有効な座標を生成する戦略
fn valid_position_strategy() -> impl Strategy<Value = Position> {
    (0usize..BOARD_SIZE, 0usize..BOARD_SIZE)
        .prop_map(|(row, col)| Position { row, col })
}

/// ランダム着手シーケンスを生成する戦略
fn move_sequence_strategy() -> impl Strategy<Value = Vec<Position>> {
    prop::collection::vec(valid_position_strategy(), 0..60)
}

/// プレイヤーを生成する戦略
fn player_strategy() -> impl Strategy<Value = Player> {
    prop_oneof![Just(Player::Black), Just(Player::White)]
}

/// ランダムな着手シーケンスを適用して到達可能な局面を作る
/// 無効な手は無視し、手番側に合法手がなければパスする
fn random_playout(moves: &[Position]) -> GameState {
    let mut state =
        GameState::new_two_player(Participant::new("U1", "A"), Participant::new("U2", "B"));

    for &position in moves {
        if OthelloRules::is_game_over(&state.board) {
            break;
        }
        if !OthelloRules::has_legal_moves(&state.board, state.current_player) {
            state.switch_player();
            continue;
        }
        let _ = OthelloRules::apply_move(&mut state, position);
    }

    state
}

/// 盤面の空マス数を数える
fn count_empty(state: &GameState) -> usize {
    let mut empty = 0;
    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            if state.board.is_empty(Position { row, col }) {
                empty += 1;
            }
        }
    }
    empty
}

proptest! {
    /// プロパティ: 石の保存則
    ///
    /// どのような着手シーケンスでも、黒+白+空のマス数は常に36
    #[test]
    fn test_disc_conservation(moves in move_sequence_strategy()) {
        let state = random_playout(&moves);
        let (black, white) = state.board.count_pieces();

        prop_assert_eq!(
            black as usize + white as usize + count_empty(&state),
            BOARD_SIZE * BOARD_SIZE
        );
        // 着手で石が消えることはない（初期配置は4個）
        prop_assert!(black as usize + white as usize >= 4);
    }

    /// プロパティ: 合法手列挙の健全性
    ///
    /// 列挙された全ての合法手はフリップ集合が非空で、
    /// フリップ対象は全て相手の石である
    #[test]
    fn test_legal_move_soundness(
        moves in move_sequence_strategy(),
        player in player_strategy()
    ) {
        let state = random_playout(&moves);
        let opponent_cell = player.opponent().to_cell();

        for (position, flips) in OthelloRules::legal_moves(&state.board, player) {
            let flippable = OthelloRules::flippable_discs(&state.board, position, player);

            prop_assert!(!flippable.is_empty());
            prop_assert_eq!(flippable.len(), flips);
            prop_assert!(state.board.is_empty(position));
            for flip_position in &flippable {
                prop_assert_eq!(state.board.get_cell(*flip_position), Some(opponent_cell));
            }
        }
    }

    /// プロパティ: 無効な手は盤面を一切変更しない
    #[test]
    fn test_illegal_move_is_noop(
        moves in move_sequence_strategy(),
        position in valid_position_strategy()
    ) {
        let mut state = random_playout(&moves);
        if state.is_finished() {
            return Ok(());
        }

        let legal = OthelloRules::is_legal_move(&state.board, position, state.current_player);
        if legal {
            return Ok(());
        }

        let before = state.board.clone();
        let player_before = state.current_player;
        let result = OthelloRules::apply_move(&mut state, position);

        prop_assert!(result.is_err());
        prop_assert_eq!(&state.board, &before);
        prop_assert_eq!(state.current_player, player_before);
    }

    /// プロパティ: 終局判定は両者の合法手の有無と一致する
    #[test]
    fn test_terminal_iff_no_moves_for_both(moves in move_sequence_strategy()) {
        let state = random_playout(&moves);

        let black_has_moves = !OthelloRules::legal_moves(&state.board, Player::Black).is_empty();
        let white_has_moves = !OthelloRules::legal_moves(&state.board, Player::White).is_empty();

        prop_assert_eq!(
            OthelloRules::is_game_over(&state.board),
            !black_has_moves && !white_has_moves
        );
    }

    /// プロパティ: 勝者判定はスコアと整合する
    #[test]
    fn test_winner_matches_score(moves in move_sequence_strategy()) {
        let state = random_playout(&moves);
        let (black, white) = state.board.count_pieces();
        let winner = OthelloRules::determine_winner(&state.board);

        match winner {
            Some(Player::Black) => prop_assert!(black > white),
            Some(Player::White) => prop_assert!(white > black),
            None => prop_assert_eq!(black, white),
        }
    }

    /// プロパティ: 貪欲ポリシーは決定的で、最大フリップ数の最初の手を選ぶ
    #[test]
    fn test_greedy_policy_deterministic(
        moves in move_sequence_strategy(),
        player in player_strategy()
    ) {
        let state = random_playout(&moves);
        let legal_moves = OthelloRules::legal_moves(&state.board, player);
        let policy = GreedyPolicy::new();

        let first = policy.choose_move(&legal_moves);
        let second = policy.choose_move(&legal_moves);
        prop_assert_eq!(first, second);

        match first {
            None => prop_assert!(legal_moves.is_empty()),
            Some(chosen) => {
                let max_flips = legal_moves.iter().map(|(_, flips)| *flips).max().unwrap();
                // 行優先の走査順で最初に最大値を取る手と一致する
                let expected = legal_moves
                    .iter()
                    .find(|(_, flips)| *flips == max_flips)
                    .map(|(position, _)| *position)
                    .unwrap();
                prop_assert_eq!(chosen, expected);
            }
        }
    }

    /// プロパティ: ランダムプレイアウトはフリップを必ず伴う
    ///
    /// 受理された手は少なくとも1個の石をフリップし、
    /// 置いた石とフリップされた石は全て自分の色になる
    #[test]
    fn test_accepted_move_flips_at_least_one(moves in move_sequence_strategy()) {
        let mut state = GameState::new_two_player(
            Participant::new("U1", "A"),
            Participant::new("U2", "B"),
        );

        for &position in &moves {
            if OthelloRules::is_game_over(&state.board) {
                break;
            }
            if !OthelloRules::has_legal_moves(&state.board, state.current_player) {
                state.switch_player();
                continue;
            }

            let player = state.current_player;
            if let Ok(flipped) = OthelloRules::apply_move(&mut state, position) {
                prop_assert!(!flipped.is_empty());
                prop_assert_eq!(state.board.get_cell(position), Some(player.to_cell()));
                for flip_position in &flipped {
                    prop_assert_eq!(
                        state.board.get_cell(*flip_position),
                        Some(player.to_cell())
                    );
                }
            }
        }
    }
}

#[test]
fn test_initial_position_has_four_legal_moves() {
    let state =
        GameState::new_two_player(Participant::new("U1", "A"), Participant::new("U2", "B"));
    let moves = OthelloRules::legal_moves(&state.board, Player::Black);

    assert_eq!(moves.len(), 4);
}

#[test]
fn test_opening_move_flips_exactly_one_disc() {
    let state =
        GameState::new_two_player(Participant::new("U1", "A"), Participant::new("U2", "B"));

    for (position, flips) in OthelloRules::legal_moves(&state.board, Player::Black) {
        assert_eq!(flips, 1, "opening move {:?} should flip exactly one disc", position);
    }
}

#[test]
fn test_full_even_board_is_draw() {
    use Othello::game::Board;

    let mut board = Board::empty();
    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            let cell = if row < 3 { Cell::Black } else { Cell::White };
            board.set_cell(Position { row, col }, cell);
        }
    }

    assert_eq!(board.count_pieces(), (18, 18));
    assert!(OthelloRules::is_game_over(&board));
    assert_eq!(OthelloRules::determine_winner(&board), None);
}
