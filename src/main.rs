//! オセロルームサーバーのエントリポイント
//! 設定読み込み、セッションマネージャ初期化、HTTPサーバー起動を行う。

use std::sync::Arc;

use Othello::{
    api::{handlers::AppState, routes::create_router},
    config::Config,
    session::SessionManager,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() {
    // 設定ファイルと環境変数から統合設定を読み込み
    let config = Config::load();
    if let Err(e) = config.validate() {
        eprintln!("設定エラー: {}", e);
        std::process::exit(1);
    }

    println!("設定読み込み完了:");
    println!("  サーバー: {}:{}", config.server.host, config.server.port);
    println!("  ロビータイムアウト: {}分", config.session.lobby_timeout_minutes);
    println!("  ロビークリーンアップ: {}", config.session.enable_lobby_cleanup);

    let manager = Arc::new(
        SessionManager::new().with_lobby_timeout(config.session.lobby_timeout_minutes),
    );

    // 期限切れロビーの定期クリーンアップタスク
    if config.session.enable_lobby_cleanup {
        let cleanup_manager = Arc::clone(&manager);
        let interval_minutes = config.session.cleanup_interval_minutes;
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(std::time::Duration::from_secs(interval_minutes * 60));
            loop {
                interval.tick().await;
                let removed = cleanup_manager.cleanup_stale_lobbies();
                if removed > 0 {
                    println!("期限切れロビーを{}件破棄しました", removed);
                }
            }
        });
    }

    let state = AppState::with_manager(manager);
    let app = create_router().with_state(state);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&bind_address).await.unwrap_or_else(|e| {
        eprintln!("アドレスバインド失敗 {}: {}", bind_address, e);
        std::process::exit(1);
    });

    println!("オセロルームサーバー開始: {}", bind_address);
    println!("サーバー稼働中 (Ctrl+C で停止)");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
