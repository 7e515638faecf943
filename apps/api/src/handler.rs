//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュールで re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、ビジネスロジックは usecase 層に委譲
//!
//! ## ハンドラ一覧
//!
//! - `status`: 固定レスポンスの疎通確認
//! - `health`: ヘルスチェック
//! - `user`: ユーザー作成

pub mod health;
pub mod status;
pub mod user;

pub use health::health_check;
pub use status::status_check;
pub use user::{UserState, create_user};
