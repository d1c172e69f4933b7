//! コンピュータ側の手選択ポリシーモジュール
//! 合法手の一覧から次の一手を選ぶ戦略を統一されたインターフェースで提供する。
//! エンジン自体が同期的なため、ポリシーも同期関数として定義する。

use crate::game::Position;

/// 手選択ポリシーの共通インターフェース
/// 合法手（行優先の走査順）とフリップ数の一覧を受け取り、1手を選ぶ
pub trait OpponentPolicy: Send + Sync {
    /// 次の一手を選択する
    /// 合法手が空の場合はNoneを返す（呼び出し側はパスとして扱う）
    fn choose_move(&self, legal_moves: &[(Position, usize)]) -> Option<Position>;

    /// ポリシーの名前を返す
    fn name(&self) -> &'static str;
}

/// 最も多くの石をフリップできる手を選ぶ貪欲ポリシー
/// 同数の場合は行優先の走査順で最初に現れた手を選ぶ（決定的）
#[derive(Debug, Clone, Default)]
pub struct GreedyPolicy;

impl GreedyPolicy {
    pub fn new() -> Self {
        GreedyPolicy
    }
}

impl OpponentPolicy for GreedyPolicy {
    fn choose_move(&self, legal_moves: &[(Position, usize)]) -> Option<Position> {
        let mut best: Option<(Position, usize)> = None;

        for &(position, flips) in legal_moves {
            match best {
                // 同数では先に現れた手を保持する
                Some((_, best_flips)) if flips <= best_flips => {}
                _ => best = Some((position, flips)),
            }
        }

        best.map(|(position, _)| position)
    }

    fn name(&self) -> &'static str {
        "GreedyPolicy"
    }
}
