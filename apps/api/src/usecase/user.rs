//! # ユーザー作成ユースケース
//!
//! ユーザー作成のビジネスロジックを実装する。
//!
//! ## 処理の流れ
//!
//! 1. 入力値を値オブジェクトに変換（バリデーション）
//! 2. パスワードを Argon2id でハッシュ化
//! 3. リポジトリへ挿入
//! 4. 一意制約違反はフィールドに応じた競合エラーに変換
//!
//! 平文パスワードはこの層でハッシュに変換されるため、
//! リポジトリより先に平文が到達することはない。

use std::sync::Arc;

use async_trait::async_trait;
use tsunagu_domain::{
    DomainError,
    password::PlainPassword,
    user::{Email, NewUser, User, UserName},
};
use tsunagu_infra::{PasswordHasher, repository::UserRepository};

use crate::error::ApiError;

/// ユーザー作成の入力値
///
/// ハンドラのリクエスト型から詰め替えられる、未検証の生の値。
pub struct CreateUserInput {
    pub username: String,
    pub email:    String,
    pub password: String,
}

/// ユーザー関連ユースケースのトレイト
///
/// ハンドラからはこのトレイト経由で利用し、テストではスタブに差し替える。
#[async_trait]
pub trait UserUseCase: Send + Sync {
    /// ユーザーを作成する
    ///
    /// # 戻り値
    ///
    /// - `Ok(user)`: 採番済みのユーザー
    /// - `Err(ApiError::Validation)`: 入力値の検証失敗
    /// - `Err(ApiError::Conflict)`: username / email の重複
    /// - `Err(ApiError::Unavailable)`: データベース到達不能
    async fn create_user(&self, input: CreateUserInput) -> Result<User, ApiError>;
}

/// ユーザーユースケースの実装
pub struct UserUseCaseImpl {
    user_repository: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl UserUseCaseImpl {
    /// 新しいユースケースインスタンスを作成
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
        }
    }
}

#[async_trait]
impl UserUseCase for UserUseCaseImpl {
    async fn create_user(&self, input: CreateUserInput) -> Result<User, ApiError> {
        let username = UserName::new(input.username).map_err(validation_error)?;
        let email = Email::new(input.email).map_err(validation_error)?;

        if input.password.is_empty() {
            return Err(ApiError::Validation("パスワードは必須です".to_string()));
        }

        let new_user = NewUser::new(username, email, PlainPassword::new(input.password));

        let password_hash = self.password_hasher.hash(new_user.password())?;

        let user = self
            .user_repository
            .create(&new_user, &password_hash)
            .await
            .map_err(|e| {
                // 重複はフィールドに応じた利用者向けメッセージに変換する
                if let Some((_, field)) = e.as_conflict() {
                    let msg = match field {
                        "username" => "このユーザー名は既に使用されています",
                        "email" => "このメールアドレスは既に使用されています",
                        _ => "一意制約に違反しています",
                    };
                    return ApiError::Conflict(msg.to_string());
                }
                ApiError::from(e)
            })?;

        Ok(user)
    }
}

/// ドメインのバリデーションエラーを API エラーに変換する
fn validation_error(e: DomainError) -> ApiError {
    match e {
        DomainError::Validation(msg) => ApiError::Validation(msg),
    }
}
