//! # 疎通確認ハンドラ
//!
//! 固定の JSON を返すだけのエンドポイント。
//! 外形監視やデプロイ後の疎通確認に使用する。

use axum::Json;
use serde::Serialize;

/// 疎通確認レスポンス
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// 常に `"ok"`
    pub status: String,
}

/// GET /example
///
/// リクエストの内容によらず、常に 200 とボディ `{"status":"ok"}` を返す。
pub async fn status_check() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok".to_string(),
    })
}
