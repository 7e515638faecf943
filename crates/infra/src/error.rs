//! # インフラ層エラー定義
//!
//! データベースとの通信で発生するエラーを表現する。
//!
//! ## 設計方針
//!
//! - **エラーの分類**: ドライバ固有のエラーを、API 層が扱える種別
//!   （Conflict / Unavailable / Database / Unexpected）へ変換してから
//!   コンポーネント境界を越えさせる
//! - **ドメインエラーとの分離**: インフラ固有のエラーを明示
//! - **SpanTrace 自動捕捉**: `From` 実装や convenience constructor で
//!   エラー生成時の呼び出し経路を自動記録する
//!
//! ## 構造
//!
//! `std::io::Error` と同じ struct + enum パターンを採用:
//! - [`InfraError`]: エラー種別（[`InfraErrorKind`]）と [`SpanTrace`] を保持するラッパー
//! - [`InfraErrorKind`]: エラーの具体的な種別（Conflict, Unavailable 等）
//!
//! ## エラー種別と HTTP ステータスの対応
//!
//! | 種別 | HTTP ステータス | 発生条件 |
//! |------|----------------|---------|
//! | `Conflict` | 409 | UNIQUE 制約違反 |
//! | `Unavailable` | 503 | 接続失敗・プールタイムアウト |
//! | `Database` | 500 | その他のバックエンド失敗（バグシグナル） |
//! | `Unexpected` | 500 | 上記に分類できない失敗 |

use std::fmt;

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
///
/// エラー種別（[`InfraErrorKind`]）と [`SpanTrace`]（呼び出し経路）を保持する。
/// `From<sqlx::Error>` の変換や convenience constructor でエラーを生成すると、
/// その時点のスパン情報が自動的にキャプチャされる。
///
/// ## パターンマッチ
///
/// エラー種別に応じた処理には [`kind()`](InfraError::kind) を使用する:
///
/// ```ignore
/// match error.kind() {
///     InfraErrorKind::Conflict { entity, field } => { /* 409 に変換 */ }
///     _ => { /* その他 */ }
/// }
/// ```
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
    kind:       InfraErrorKind,
    span_trace: SpanTrace,
}

/// インフラ層エラーの種別
///
/// データベースクエリの実行で発生するエラーの具体的な種別。
/// API 層でこのエラー種別に応じて適切な HTTP レスポンスに変換する。
#[derive(Debug, Error)]
pub enum InfraErrorKind {
    /// 一意制約違反
    ///
    /// username / email など、UNIQUE 制約を持つカラムへの重複挿入。
    /// API 層で 409 Conflict に変換する。
    #[error("一意制約違反が発生しました: {entity}.{field}")]
    Conflict {
        /// エンティティ名（例: "User"）
        entity: &'static str,
        /// 重複したフィールド名（例: "username"）
        field:  String,
    },

    /// バックエンドに到達できない
    ///
    /// 接続失敗、TLS ハンドシェイク失敗、プール取得タイムアウトなど。
    /// 一時的な障害であり、API 層で 503 Service Unavailable に変換する。
    #[error("データベースに到達できません: {0}")]
    Unavailable(#[source] sqlx::Error),

    /// その他のデータベースエラー
    ///
    /// クエリ不正、スキーマ不一致など、通常運用では発生しない失敗。
    /// バグシグナルとして扱い、API 層で 500 に変換する。
    #[error("データベースエラー: {0}")]
    Database(#[source] sqlx::Error),

    /// 予期しないエラー
    ///
    /// 上記に分類できない予期しないエラー。
    #[error("予期しないエラー: {0}")]
    Unexpected(String),
}

// ===== InfraError のメソッド =====

impl InfraError {
    /// エラー種別を取得する
    pub fn kind(&self) -> &InfraErrorKind {
        &self.kind
    }

    /// SpanTrace を取得する
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    /// Conflict バリアントの場合、entity と field を返す
    ///
    /// パターンマッチで所有権の競合を避けるためのヘルパー。
    pub fn as_conflict(&self) -> Option<(&str, &str)> {
        match &self.kind {
            InfraErrorKind::Conflict { entity, field } => Some((entity, field)),
            _ => None,
        }
    }

    // ===== Convenience constructors =====

    /// 一意制約違反エラーを生成する
    pub fn conflict(entity: &'static str, field: impl Into<String>) -> Self {
        Self {
            kind:       InfraErrorKind::Conflict {
                entity,
                field: field.into(),
            },
            span_trace: SpanTrace::capture(),
        }
    }

    /// 予期しないエラーを生成する
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self {
            kind:       InfraErrorKind::Unexpected(msg.into()),
            span_trace: SpanTrace::capture(),
        }
    }
}

// ===== トレイト実装 =====

impl fmt::Debug for InfraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfraError")
            .field("kind", &self.kind)
            .field("span_trace", &self.span_trace)
            .finish()
    }
}

impl std::error::Error for InfraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.source()
    }
}

// ===== From 実装（分類 + SpanTrace 自動キャプチャ） =====

impl From<sqlx::Error> for InfraError {
    /// sqlx のエラーをインフラ層の種別に分類する
    ///
    /// 接続系の失敗（I/O、TLS、プール枯渇・停止）は `Unavailable`、
    /// それ以外は `Database` として扱う。一意制約違反はクエリ発行側が
    /// コンテキスト（エンティティ・フィールド）を知っているため、
    /// リポジトリ実装が [`InfraError::conflict`] で生成する。
    fn from(source: sqlx::Error) -> Self {
        let kind = match source {
            e @ (sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed) => InfraErrorKind::Unavailable(e),
            e => InfraErrorKind::Database(e),
        };
        Self {
            kind,
            span_trace: SpanTrace::capture(),
        }
    }
}
