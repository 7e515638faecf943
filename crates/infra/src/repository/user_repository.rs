//! # UserRepository
//!
//! ユーザー情報の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **ID・作成日時はデータベース採番**: `INSERT ... RETURNING` で
//!   生成値を取得し、エンティティに反映して返す
//! - **エラー分類**: UNIQUE 制約違反はこの境界で `Conflict` に変換し、
//!   ドライバ固有のエラーを上位層に漏らさない

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tsunagu_domain::{
    password::PasswordHash,
    user::{NewUser, User, UserId},
};

use crate::error::InfraError;

/// ユーザーリポジトリトレイト
///
/// ユーザー情報の永続化操作を定義する。
/// インフラ層で具体的な実装を提供し、ユースケース層から利用する。
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// ユーザーを新規作成する
    ///
    /// # 引数
    ///
    /// - `new_user`: バリデーション済みの新規ユーザー入力
    /// - `password_hash`: ハッシュ化済みパスワード
    ///
    /// # 戻り値
    ///
    /// - `Ok(user)`: 採番された ID と作成日時を持つユーザー
    /// - `Err(_)`: `Conflict`（username / email の重複）、
    ///   `Unavailable`（接続失敗）、その他のデータベースエラー
    async fn create(
        &self,
        new_user: &NewUser,
        password_hash: &PasswordHash,
    ) -> Result<User, InfraError>;
}

/// `INSERT ... RETURNING` の結果行
#[derive(sqlx::FromRow)]
struct InsertedUserRow {
    id:         i64,
    created_at: DateTime<Utc>,
}

/// PostgreSQL 実装の UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(
        &self,
        new_user: &NewUser,
        password_hash: &PasswordHash,
    ) -> Result<User, InfraError> {
        let row = sqlx::query_as::<_, InsertedUserRow>(
            r#"
            INSERT INTO users (username, password, email)
            VALUES ($1, $2, $3)
            RETURNING id, created_at
            "#,
        )
        .bind(new_user.username().as_str())
        .bind(password_hash.as_str())
        .bind(new_user.email().as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(classify_insert_error)?;

        Ok(User::from_db(
            UserId::from_i64(row.id),
            new_user.username().clone(),
            new_user.email().clone(),
            row.created_at,
        ))
    }
}

/// INSERT 失敗時のエラーを分類する
///
/// UNIQUE 制約違反は、違反した制約名から重複フィールドを特定して
/// `Conflict` に変換する。それ以外は [`InfraError`] の `From` 実装による
/// 汎用分類（接続系 → `Unavailable`、その他 → `Database`）に委ねる。
fn classify_insert_error(e: sqlx::Error) -> InfraError {
    if let Some(db_err) = e.as_database_error()
        && db_err.is_unique_violation()
    {
        let field = match db_err.constraint() {
            Some("users_username_key") => "username",
            Some("users_email_key") => "email",
            // スキーマに存在しない制約名は想定外だが、重複であることに変わりはない
            _ => "unknown",
        };
        return InfraError::conflict("User", field);
    }
    InfraError::from(e)
}

#[cfg(test)]
mod tests {
    use crate::error::InfraErrorKind;

    use super::*;

    // DB 接続を要さない分類ロジックのみをここで検証する。
    // 実 DB に対する INSERT の挙動はマイグレーション適用済みの
    // 環境で手動確認している。

    #[test]
    fn test_一意制約違反以外はfrom実装の分類に委ねられる() {
        let err = classify_insert_error(sqlx::Error::PoolTimedOut);
        assert!(matches!(err.kind(), InfraErrorKind::Unavailable(_)));

        let err = classify_insert_error(sqlx::Error::RowNotFound);
        assert!(matches!(err.kind(), InfraErrorKind::Database(_)));
    }
}
