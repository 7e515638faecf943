//! # パスワード
//!
//! パスワード関連の値オブジェクトを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 用途 |
//! |---|------------|------|
//! | [`PlainPassword`] | 平文パスワード | ユーザー作成時の入力値 |
//! | [`PasswordHash`] | パスワードハッシュ | 永続化用のハッシュ値 |

/// 平文パスワード（ユーザー作成時の入力値）
///
/// ユーザーが入力したパスワードをラップする。
/// ハッシュ化されるまでの間だけ存在する、書き込み専用の値。
///
/// # セキュリティ
///
/// - Debug 出力ではパスワードの値をマスクする
/// - `Serialize` を実装しないため、レスポンスボディに乗ることはない
#[derive(Clone)]
pub struct PlainPassword(String);

impl std::fmt::Debug for PlainPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PlainPassword").field(&"[REDACTED]").finish()
    }
}

impl PlainPassword {
    /// パスワードを作成する
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// パスワードハッシュ（永続化用）
///
/// Argon2id でハッシュ化されたパスワード文字列をラップする。
/// データベースに保存される形式。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// ハッシュ文字列からインスタンスを作成する
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_passwordのdebug出力がマスクされる() {
        let password = PlainPassword::new("super-secret");
        let debug = format!("{:?}", password);

        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_plain_passwordから値を取り出せる() {
        let password = PlainPassword::new("super-secret");
        assert_eq!(password.as_str(), "super-secret");
    }

    #[test]
    fn test_password_hashは文字列と相互変換できる() {
        let hash = PasswordHash::new("$argon2id$v=19$...");
        assert_eq!(hash.as_str(), "$argon2id$v=19$...");
        assert_eq!(hash.into_string(), "$argon2id$v=19$...");
    }
}
