//! # ヘルスチェックハンドラ
//!
//! API サーバーの稼働状態を確認するためのエンドポイント。
//!
//! レスポンス型は [`tsunagu_shared::HealthResponse`] を参照。

use axum::Json;
use tsunagu_shared::HealthResponse;

/// GET /health
///
/// サーバーが正常に稼働していることを確認するためのエンドポイント。
/// データベースへの接続は確認せず、アプリケーション自体の起動状態のみを返す。
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status:  "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
