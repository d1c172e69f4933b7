//! アプリケーション設定管理モジュール
//! サーバーとセッション管理の設定を
//! 設定ファイルと環境変数から読み込んで管理する。

use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path};

/// サーバーの設定を管理する構造体
/// ポート番号、ホスト名、CORS設定などを含む
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub enable_cors: bool,
    pub enable_logging: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
            enable_cors: true,
            enable_logging: true,
        }
    }
}

/// セッション管理の設定を管理する構造体
/// ロビーのタイムアウトとクリーンアップ周期など
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// 参加者が現れないロビーを破棄するまでの時間（分）
    pub lobby_timeout_minutes: i64,
    pub enable_lobby_cleanup: bool,
    pub cleanup_interval_minutes: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            lobby_timeout_minutes: 30,
            enable_lobby_cleanup: true,
            cleanup_interval_minutes: 5,
        }
    }
}

/// アプリケーションの全設定を統合するメイン設定構造体
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub session: SessionConfig,
}

/// 設定関連のエラーを表すenum
/// ファイル読み込み、パース、検証エラーなどを含む
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("設定ファイル読み込みエラー: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("設定ファイル解析エラー: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("環境変数エラー: {name} = {value}")]
    EnvVarError { name: String, value: String },

    #[error("設定値が無効です: {field} = {value}")]
    InvalidValue { field: String, value: String },
}

impl Config {
    /// 指定したファイルパスから設定を読み込む
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// 環境変数から設定を読み込む
    /// デフォルト値をベースに環境変数で上書きする
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Ok(port) = env::var("SERVER_PORT") {
            config.server.port = port.parse().map_err(|_| ConfigError::EnvVarError {
                name: "SERVER_PORT".to_string(),
                value: port,
            })?;
        }

        if let Ok(host) = env::var("SERVER_HOST") {
            config.server.host = host;
        }

        if let Ok(timeout) = env::var("LOBBY_TIMEOUT_MINUTES") {
            config.session.lobby_timeout_minutes =
                timeout.parse().map_err(|_| ConfigError::EnvVarError {
                    name: "LOBBY_TIMEOUT_MINUTES".to_string(),
                    value: timeout,
                })?;
        }

        if let Ok(interval) = env::var("LOBBY_CLEANUP_INTERVAL_MINUTES") {
            config.session.cleanup_interval_minutes =
                interval.parse().map_err(|_| ConfigError::EnvVarError {
                    name: "LOBBY_CLEANUP_INTERVAL_MINUTES".to_string(),
                    value: interval,
                })?;
        }

        if let Ok(enable) = env::var("ENABLE_LOBBY_CLEANUP") {
            config.session.enable_lobby_cleanup =
                enable.parse().map_err(|_| ConfigError::EnvVarError {
                    name: "ENABLE_LOBBY_CLEANUP".to_string(),
                    value: enable,
                })?;
        }

        Ok(config)
    }

    /// 設定ファイルと環境変数を結合して設定を読み込む
    /// 設定ファイルがなくてもデフォルト値で動作する
    pub fn load() -> Self {
        let mut config = Config::default();

        if let Ok(file_config) = Self::from_file("config.json") {
            config = file_config;
        } else if let Ok(file_config) = Self::from_file("config/app.json") {
            config = file_config;
        } else if let Ok(file_config) = Self::from_file("/etc/othello/config.json") {
            config = file_config;
        }

        // 環境変数で設定を上書き
        if let Ok(env_config) = Self::from_env() {
            config.server.port = env_config.server.port;
            config.server.host = env_config.server.host;
            config.session = env_config.session;
        }

        config
    }

    /// 現在の設定を指定したファイルに保存する
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// 設定値の妥当性をチェックする
    /// 不正な値がある場合はConfigErrorを返す
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                value: self.server.port.to_string(),
            });
        }

        if self.session.lobby_timeout_minutes <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "session.lobby_timeout_minutes".to_string(),
                value: self.session.lobby_timeout_minutes.to_string(),
            });
        }

        if self.session.cleanup_interval_minutes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "session.cleanup_interval_minutes".to_string(),
                value: self.session.cleanup_interval_minutes.to_string(),
            });
        }

        Ok(())
    }
}
