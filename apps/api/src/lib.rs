//! # Tsunagu API サーバー
//!
//! ユーザーアカウントを扱う小さな Web API のブートストラップ層。
//!
//! ## アーキテクチャ
//!
//! ```text
//! ┌──────────┐     ┌──────────┐     ┌────────────┐     ┌────────────┐
//! │ Client   │────▶│ handler  │────▶│  usecase   │────▶│ repository │
//! └──────────┘     └──────────┘     └────────────┘     └────────────┘
//!                   リクエスト検証    ハッシュ化・       PostgreSQL
//!                   とシリアライズ    エラーマッピング
//! ```
//!
//! ## バイナリ構成
//!
//! このクレートは 2 つのエントリポイントを持つ:
//!
//! - `api`: axum の `Router` を直接組み立てるフルサービス
//!   （設定 → DB 接続 → マイグレーション → DI → 起動）
//! - `api-lite`: [`tsunagu_shared::server::HttpServer`] のルートテーブル
//!   方式で立ち上げる最小構成（DB なし、`/example` のみ）
//!
//! ## モジュール構成
//!
//! - [`config`] - アプリケーション設定（環境変数からの読み込み）
//! - [`error`] - API エラー定義と HTTP レスポンスへの変換
//! - [`extract`] - リクエストボディ抽出
//! - [`handler`] - HTTP リクエストハンドラ
//! - [`usecase`] - ビジネスロジック
//! - [`app_builder`] - DI とルーター構築

pub mod app_builder;
pub mod config;
pub mod error;
pub mod extract;
pub mod handler;
pub mod usecase;
