//! # ユーザー
//!
//! ユーザーエンティティとそれに関連する値オブジェクトを定義する。
//!
//! ## 設計方針
//!
//! - **Newtype パターン**: UserId は i64 をラップし、型安全性を確保
//! - **不変性**: エンティティフィールドは不変、復元は `from_db` 経由
//! - **バリデーション**: 値オブジェクトの生成時に検証ロジックを実行
//!
//! ユーザー名・メールアドレスの一意性はデータベースの UNIQUE 制約で担保し、
//! 違反はインフラ層で Conflict エラーに分類される。
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use tsunagu_domain::{
//!     password::PlainPassword,
//!     user::{Email, NewUser, UserName},
//! };
//!
//! let new_user = NewUser::new(
//!     UserName::new("yamada_taro")?,
//!     Email::new("taro@example.com")?,
//!     PlainPassword::new("secret-password"),
//! );
//! assert_eq!(new_user.username().as_str(), "yamada_taro");
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::{DomainError, password::PlainPassword};

/// ユーザー ID（一意識別子）
///
/// データベースの BIGSERIAL で採番される連番をラップする。
/// 採番前のユーザーは ID を持たないため、エンティティの生成は
/// 永続化後の [`User::from_db`] に限定される。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct UserId(i64);

impl UserId {
    /// 既存の採番値からユーザー ID を作成する
    pub fn from_i64(value: i64) -> Self {
        Self(value)
    }

    /// 内部の i64 値を取得する
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

/// ユーザー名（値オブジェクト）
///
/// ログインや表示に使用する一意な名前。
/// 生成時にバリデーションを実行し、不正な値の作成を防ぐ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserName(String);

impl UserName {
    /// ユーザー名の最大文字数
    pub const MAX_LENGTH: usize = 50;

    /// ユーザー名を作成する
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    /// - 最大 50 文字
    ///
    /// # エラー
    ///
    /// バリデーションに失敗した場合は `DomainError::Validation` を返す。
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.trim().is_empty() {
            return Err(DomainError::Validation(
                "ユーザー名は必須です".to_string(),
            ));
        }

        if value.chars().count() > Self::MAX_LENGTH {
            return Err(DomainError::Validation(format!(
                "ユーザー名は{}文字以内である必要があります",
                Self::MAX_LENGTH
            )));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 所有権を持つ文字列に変換する
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for UserName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// メールアドレス（値オブジェクト）
///
/// 生成時にバリデーションを実行し、不正な値の作成を防ぐ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// メールアドレスを作成する
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    /// - `local@domain` の形式であること
    /// - 最大 255 文字
    ///
    /// # エラー
    ///
    /// バリデーションに失敗した場合は `DomainError::Validation` を返す。
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.is_empty() {
            return Err(DomainError::Validation(
                "メールアドレスは必須です".to_string(),
            ));
        }

        // 基本的な構造検証: local@domain の形式であること
        let Some((local, domain)) = value.split_once('@') else {
            return Err(DomainError::Validation(
                "メールアドレスの形式が不正です".to_string(),
            ));
        };

        if local.is_empty() || domain.is_empty() {
            return Err(DomainError::Validation(
                "メールアドレスの形式が不正です".to_string(),
            ));
        }

        if value.len() > 255 {
            return Err(DomainError::Validation(
                "メールアドレスは255文字以内である必要があります".to_string(),
            ));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 所有権を持つ文字列に変換する
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ユーザーエンティティ
///
/// サービスのアカウントを表現する。ID と作成日時はデータベースが
/// 採番・付与するため、このエンティティは常に永続化済みの状態を表す。
/// パスワードは書き込み専用の入力値であり、エンティティには含まれない。
///
/// # 不変条件
///
/// - `username` / `email` はシステム全体で一意
/// - `id` / `created_at` は永続化時に確定し、以後不変
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: UserName,
    email: Email,
    created_at: DateTime<Utc>,
}

impl User {
    /// 既存のデータからユーザーを復元する（データベースから取得時）
    pub fn from_db(
        id: UserId,
        username: UserName,
        email: Email,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            email,
            created_at,
        }
    }

    // Getter メソッド

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &UserName {
        &self.username
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// 新規ユーザー（永続化前の入力値）
///
/// ID・作成日時をまだ持たない、作成リクエスト由来の値の束。
/// パスワードは平文のまま保持するが、[`PlainPassword`] の Debug 出力は
/// マスクされるため、ログへの流出は起きない。
#[derive(Debug, Clone)]
pub struct NewUser {
    username: UserName,
    email: Email,
    password: PlainPassword,
}

impl NewUser {
    /// 新規ユーザー入力を作成する
    ///
    /// 各値オブジェクトは生成時にバリデーション済みであることを前提とする。
    pub fn new(username: UserName, email: Email, password: PlainPassword) -> Self {
        Self {
            username,
            email,
            password,
        }
    }

    pub fn username(&self) -> &UserName {
        &self.username
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> &PlainPassword {
        &self.password
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    // ===== UserName のテスト =====

    #[test]
    fn test_user_nameを正常に作成できる() {
        let name = UserName::new("yamada_taro").unwrap();
        assert_eq!(name.as_str(), "yamada_taro");
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn test_user_nameは空文字列を拒否する(#[case] value: &str) {
        let result = UserName::new(value);
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_user_nameは50文字を超える値を拒否する() {
        let value = "あ".repeat(51);
        let result = UserName::new(value);
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_user_nameは50文字ちょうどを許容する() {
        let value = "a".repeat(50);
        assert!(UserName::new(value).is_ok());
    }

    // ===== Email のテスト =====

    #[test]
    fn test_emailを正常に作成できる() {
        let email = Email::new("taro@example.com").unwrap();
        assert_eq!(email.as_str(), "taro@example.com");
    }

    #[rstest]
    #[case("")]
    #[case("no-at-mark")]
    #[case("@example.com")]
    #[case("taro@")]
    fn test_emailは不正な形式を拒否する(#[case] value: &str) {
        let result = Email::new(value);
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_emailは255文字を超える値を拒否する() {
        let local = "a".repeat(250);
        let result = Email::new(format!("{local}@example.com"));
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    // ===== UserId のテスト =====

    #[test]
    fn test_user_idはi64と相互変換できる() {
        let id = UserId::from_i64(42);
        assert_eq!(id.as_i64(), 42);
        assert_eq!(id.to_string(), "42");
    }

    // ===== User のテスト =====

    #[test]
    fn test_from_dbでユーザーを復元できる() {
        let created_at = chrono::Utc::now();
        let user = User::from_db(
            UserId::from_i64(1),
            UserName::new("yamada_taro").unwrap(),
            Email::new("taro@example.com").unwrap(),
            created_at,
        );

        assert_eq!(user.id().as_i64(), 1);
        assert_eq!(user.username().as_str(), "yamada_taro");
        assert_eq!(user.email().as_str(), "taro@example.com");
        assert_eq!(user.created_at(), created_at);
    }

    // ===== NewUser のテスト =====

    #[test]
    fn test_new_userのdebug出力にパスワードが含まれない() {
        let new_user = NewUser::new(
            UserName::new("yamada_taro").unwrap(),
            Email::new("taro@example.com").unwrap(),
            PlainPassword::new("super-secret"),
        );

        let debug = format!("{:?}", new_user);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
