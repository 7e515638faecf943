//! # リクエストボディ抽出
//!
//! JSON ボディの抽出失敗を [`ApiError`] に変換するラッパー型を提供する。

use axum::extract::FromRequest;

use crate::error::ApiError;

/// `axum::Json` のラッパー
///
/// 抽出失敗（JSON 構文エラー、必須フィールドの欠落、型不一致）を
/// すべて [`ApiError::Validation`]（400 Bad Request）に変換する。
/// ハンドラの引数では `Json<T>` の代わりにこちらを使う。
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);
