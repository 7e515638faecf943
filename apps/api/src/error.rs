//! # API エラーハンドリング
//!
//! HTTP API のエラー定義と、axum レスポンスへの変換を行う。
//!
//! ## 設計方針
//!
//! - **RFC 9457 準拠**: Problem Details for HTTP APIs 仕様に従う
//! - **thiserror + anyhow**: 型安全なエラー定義とエラーチェインの両立
//! - **IntoResponse 実装**: axum との統合による自動レスポンス変換
//! - **分類済みエラーのみを受け取る**: インフラ層のエラーは種別
//!   （Conflict / Unavailable / Database）に分類済みで届くため、
//!   ここでは HTTP ステータスへの写像だけを行う
//!
//! ## エラーの階層
//!
//! ```text
//! インフラ層エラー (InfraError)
//!        ↓ 変換
//! API エラー (ApiError)
//!        ↓ IntoResponse
//! HTTP レスポンス (StatusCode + JSON)
//! ```
//!
//! ## マッピング
//!
//! | ApiError | HTTP Status |
//! |----------|-------------|
//! | Validation | 400 |
//! | NotFound | 404 |
//! | Conflict | 409 |
//! | Unavailable | 503 |
//! | Internal | 500 |

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tsunagu_infra::{InfraError, InfraErrorKind};

/// エラーレスポンス（RFC 9457 Problem Details）
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub error_type: String,
    pub title:      String,
    pub status:     u16,
    pub detail:     String,
}

/// API 層で発生するエラー
///
/// ハンドラから返されるエラー型。`IntoResponse` を実装しているため、
/// axum が自動的に HTTP レスポンスに変換する。
///
/// # セキュリティ注意
///
/// `Unavailable` / `Internal` の詳細はクライアントに返さない。
/// エラー内容はサーバーサイドのログにのみ出力する。
#[derive(Debug, Error)]
pub enum ApiError {
    /// バリデーションエラー（400 Bad Request）
    ///
    /// リクエストボディの JSON 不正、必須フィールドの欠落、
    /// 値オブジェクトの検証失敗など。
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// リソースが見つからない（404 Not Found）
    #[error("リソースが見つかりません")]
    NotFound,

    /// 競合エラー（409 Conflict）
    ///
    /// username / email の一意制約違反。
    #[error("競合が発生しました: {0}")]
    Conflict(String),

    /// バックエンド到達不能（503 Service Unavailable）
    ///
    /// データベースへの接続失敗やプール取得タイムアウト。
    /// 一時的な障害であり、クライアントはリトライできる。
    #[error("サービスを一時的に利用できません")]
    Unavailable,

    /// 内部サーバーエラー（500 Internal Server Error）
    ///
    /// 予期しないエラー。`#[from]` により `anyhow::Error` から自動変換される。
    #[error("内部サーバーエラー")]
    Internal(#[from] anyhow::Error),
}

impl From<InfraError> for ApiError {
    /// 分類済みのインフラエラーを HTTP の語彙へ写像する
    ///
    /// Conflict の文言はユースケース層がフィールドに応じて上書きするため、
    /// ここでは汎用のメッセージに落とす。
    fn from(err: InfraError) -> Self {
        // kind() の借用と err の move が競合しないよう、as_conflict /
        // matches! で判定してから所有権を手放す
        if let Some((entity, field)) = err.as_conflict() {
            return Self::Conflict(format!("{entity} の {field} が重複しています"));
        }

        if matches!(err.kind(), InfraErrorKind::Unavailable(_)) {
            tracing::warn!(error = %err, "バックエンドに到達できません");
            return Self::Unavailable;
        }

        Self::Internal(anyhow::Error::new(err))
    }
}

impl From<JsonRejection> for ApiError {
    /// リクエストボディの JSON 抽出失敗を 400 に変換する
    ///
    /// axum のデフォルト（構文エラー 400 / 型不一致 422）を使わず、
    /// ボディ起因の失敗はすべてバリデーションエラーとして扱う。
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, title, detail) = match self {
            ApiError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                "https://tsunagu.example.com/errors/validation-failed",
                "Validation Failed",
                msg,
            ),
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                "https://tsunagu.example.com/errors/not-found",
                "Not Found",
                "リソースが見つかりません".to_string(),
            ),
            ApiError::Conflict(msg) => (
                StatusCode::CONFLICT,
                "https://tsunagu.example.com/errors/conflict",
                "Conflict",
                msg,
            ),
            ApiError::Unavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "https://tsunagu.example.com/errors/unavailable",
                "Service Unavailable",
                "サービスを一時的に利用できません".to_string(),
            ),
            ApiError::Internal(err) => {
                // 内部エラーの詳細はログにのみ出力（セキュリティ考慮）
                tracing::error!("内部エラー: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "https://tsunagu.example.com/errors/internal-error",
                    "Internal Server Error",
                    "内部エラーが発生しました".to_string(),
                )
            }
        };

        (
            status,
            Json(ErrorResponse {
                error_type: error_type.to_string(),
                title: title.to_string(),
                status: status.as_u16(),
                detail,
            }),
        )
            .into_response()
    }
}
