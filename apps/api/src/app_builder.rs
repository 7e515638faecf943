//! # アプリケーション構築
//!
//! DI（リポジトリ → ユースケース → State）済みの依存を受け取り、
//! ルーター構築を担当する。`main` はインフラ初期化とサーバー起動に集中する。

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handler::{UserState, create_user, health_check, status_check};

/// ルーターを構築する
///
/// すべてのルートはここで一度だけ登録され、起動後に変更されることはない。
/// 未登録のパスへのリクエストは axum のフォールバックにより 404 になる。
/// `TraceLayer` により、すべての HTTP リクエストがトレーシングされる。
pub fn build_app(user_state: Arc<UserState>) -> Router {
    Router::new()
        .route("/example", get(status_check))
        .route("/health", get(health_check))
        .route("/users", post(create_user))
        .with_state(user_state)
        .layer(TraceLayer::new_for_http())
}
