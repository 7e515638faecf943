//! # ユースケース
//!
//! API のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - ハンドラはユースケースのトレイトにのみ依存し、テストではスタブに差し替える
//! - リポジトリ・ハッシュ化などの依存はコンストラクタで注入する

pub mod user;

pub use user::{CreateUserInput, UserUseCase, UserUseCaseImpl};
