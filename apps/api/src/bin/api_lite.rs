//! # API Lite サーバー
//!
//! ルートテーブル方式の社内ひな形（[`tsunagu_shared::server::HttpServer`]）で
//! 立ち上げる最小構成のエントリポイント。データベースには接続せず、
//! 疎通確認エンドポイントのみを提供する。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `SERVICE_NAME` | **Yes** | サービス名 |
//! | `SERVER_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `SERVER_PORT` | No | ポート番号（デフォルト: `8081`） |
//!
//! ## 起動方法
//!
//! ```bash
//! SERVICE_NAME=tsunagu-api-lite cargo run --bin api-lite
//! ```

use anyhow::Context as _;
use tsunagu_api::{config::AppConfig, handler::status_check};
use tsunagu_shared::{
    observability::{LogFormat, init_tracing},
    server::{HttpServer, Route},
};

/// API Lite サーバーのエントリーポイント
///
/// ルートの登録はすべて起動前に行い、`start` 以降テーブルは不変。
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    init_tracing(LogFormat::from_env());

    // 設定読み込み
    let config = AppConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        service_name = %config.service_name,
        host = %config.server.host,
        port = config.server.port,
        "設定を読み込みました"
    );

    // ルート登録とサーバー起動
    HttpServer::new(config.service_name.clone())
        .host(config.server.host.clone())
        .port(config.server.port)
        .register_route(Route::get("/example", status_check))
        .start()
        .await?;

    Ok(())
}
