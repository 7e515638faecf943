//! # API サーバー
//!
//! ユーザーアカウントを扱うフルサービスのエントリポイント。
//!
//! ## 役割
//!
//! - **疎通確認**: `GET /example`
//! - **ヘルスチェック**: `GET /health`
//! - **ユーザー作成**: `POST /users`
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `SERVICE_NAME` | **Yes** | サービス名 |
//! | `SERVER_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `SERVER_PORT` | No | ポート番号（デフォルト: `8081`） |
//! | `DB_ADDR` | No | PostgreSQL 接続 URL |
//!
//! その他のキーは [`tsunagu_api::config`] を参照。
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（.env ファイルを使用）
//! cargo run --bin api
//!
//! # 本番環境（環境変数を直接指定）
//! SERVICE_NAME=tsunagu-api DB_ADDR=postgres://... cargo run --bin api --release
//! ```

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context as _;
use tokio::net::TcpListener;
use tsunagu_api::{
    app_builder::build_app,
    config::AppConfig,
    handler::UserState,
    usecase::UserUseCaseImpl,
};
use tsunagu_infra::{
    Argon2PasswordHasher,
    PasswordHasher,
    db,
    repository::{PostgresUserRepository, UserRepository},
};
use tsunagu_shared::observability::{LogFormat, init_tracing};

/// API サーバーのエントリーポイント
///
/// 以下の順序で初期化を行う:
///
/// 1. 環境変数の読み込み（.env ファイル）
/// 2. トレーシングの初期化
/// 3. アプリケーション設定の読み込み
/// 4. データベース接続プールの作成とマイグレーション
/// 5. 依存コンポーネントの初期化とルーター構築
/// 6. HTTP サーバーの起動
///
/// 起動時の致命的エラー（必須設定の欠落、DB 接続失敗、バインド失敗）は
/// `anyhow` で伝播し、非ゼロの終了コードでプロセスを終える。
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    // 本番環境では .env ファイルは使用せず、環境変数を直接設定する
    dotenvy::dotenv().ok();

    // トレーシング初期化
    // RUST_LOG 環境変数でログレベルを制御可能
    init_tracing(LogFormat::from_env());

    // 設定読み込み
    // 失敗時はここでエラーを返し、main が非ゼロ終了する
    let config = AppConfig::from_env().context("設定の読み込みに失敗しました")?;

    let _app_span = tracing::info_span!("app", service = %config.service_name).entered();

    // 設定サマリをログに出す（接続 URL はパスワードをマスク）
    tracing::info!(
        service_name = %config.service_name,
        host = %config.server.host,
        port = config.server.port,
        db_addr = %config.database.redacted_addr(),
        db_max_open_conns = config.database.max_open_conns,
        db_max_idle_conns = config.database.max_idle_conns,
        "設定を読み込みました"
    );

    // データベース接続プールを作成
    let pool = db::create_pool(&config.database.addr, &config.database.pool_settings())
        .await
        .context("データベース接続に失敗しました")?;
    tracing::info!("データベースに接続しました");

    // マイグレーション実行
    db::run_migrations(&pool)
        .await
        .context("マイグレーションの実行に失敗しました")?;
    tracing::info!("マイグレーションを適用しました");

    // 依存コンポーネントを初期化
    let user_repository: Arc<dyn UserRepository> = Arc::new(PostgresUserRepository::new(pool));
    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::new());
    let usecase = UserUseCaseImpl::new(user_repository, password_hasher);
    let user_state = Arc::new(UserState {
        usecase: Arc::new(usecase),
    });

    // ルーター構築
    let app = build_app(user_state);

    // サーバー起動
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("アドレスのパースに失敗しました")?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("{} サーバーが起動しました: {}", config.service_name, addr);

    axum::serve(listener, app).await?;

    Ok(())
}
