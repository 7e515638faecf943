//! # Tsunagu 共有ユーティリティ
//!
//! このクレートは、Tsunagu プロジェクト全体で使用される
//! 共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - 他のすべてのクレート（domain, infra, api）から依存される
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//!
//! ## モジュール構成
//!
//! - [`health`] - ヘルスチェック共通型
//! - [`observability`] - トレーシング初期化とログ出力形式
//! - [`server`] - ルートテーブル方式の HTTP サーバーひな形

pub mod health;
pub mod observability;
pub mod server;

pub use health::HealthResponse;
