//! # ユーザーハンドラ
//!
//! ユーザー作成エンドポイントを提供する。
//!
//! ## エンドポイント
//!
//! - `POST /users` - ユーザー作成

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tsunagu_domain::user::User;

use crate::{
    error::ApiError,
    extract::AppJson,
    usecase::{CreateUserInput, UserUseCase},
};

/// ユーザーハンドラの共有状態
pub struct UserState {
    pub usecase: Arc<dyn UserUseCase>,
}

// --- リクエスト/レスポンス型 ---

/// ユーザー作成リクエスト
#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email:    String,
    pub password: String,
}

// パスワードをログに流さないため、Debug は手動実装でマスクする
impl std::fmt::Debug for CreateUserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUserRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// ユーザー作成レスポンス
///
/// パスワードはフィールド自体が存在しないため、
/// シリアライズ結果に乗ることはない。
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id:         i64,
    pub username:   String,
    pub email:      String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id:         user.id().as_i64(),
            username:   user.username().clone().into_string(),
            email:      user.email().clone().into_string(),
            created_at: user.created_at(),
        }
    }
}

// --- ハンドラ ---

/// POST /users
///
/// ユーザーを作成する。
///
/// # レスポンス
///
/// - `201 Created`: 作成されたユーザー（パスワードは含まない）
/// - `400 Bad Request`: JSON 不正・必須フィールド欠落・検証失敗
/// - `409 Conflict`: username / email の重複
/// - `503 Service Unavailable`: データベース到達不能
pub async fn create_user(
    State(state): State<Arc<UserState>>,
    AppJson(req): AppJson<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .usecase
        .create_user(CreateUserInput {
            username: req.username,
            email:    req.email,
            password: req.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}
