//! # ルートテーブル方式の HTTP サーバーひな形
//!
//! (メソッド, パス) の完全一致でハンドラを引く [`RouteTable`] と、
//! それを包んで起動までを面倒見る [`HttpServer`] を提供する。
//!
//! ## 設計方針
//!
//! - **起動時固定**: ルートの登録は起動時のみ。リスナーが接続を受け付けた
//!   後にテーブルが変化することはないため、ロックは不要
//! - **完全一致ディスパッチ**: パスパラメータのテンプレート展開は行わず、
//!   `HashMap` の O(1) 検索で解決する
//! - **未登録は 404**: メソッド違いも含め、テーブルに存在しない
//!   (メソッド, パス) の組はすべて 404 Not Found（ボディなし）になる
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use tsunagu_shared::server::{HttpServer, Route};
//!
//! async fn status() -> &'static str {
//!     "ok"
//! }
//!
//! HttpServer::new("api-lite")
//!     .port(8081)
//!     .register_route(Route::get("/example", status))
//!     .start()
//!     .await?;
//! ```

use std::{collections::HashMap, future::Future, net::SocketAddr, pin::Pin, sync::Arc};

use axum::{
    Router,
    extract::Request,
    handler::Handler,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// 型消去済みのハンドラ
///
/// axum のハンドラをリクエストからレスポンスへの関数として保持する。
/// `Arc` で共有するため、同一ハンドラへの並行ディスパッチが可能。
pub type BoxedHandler =
    Arc<dyn Fn(Request) -> Pin<Box<dyn Future<Output = Response> + Send>> + Send + Sync>;

/// ルート定義
///
/// (HTTP メソッド, URL パス) とハンドラの宣言的な束。
/// 起動時に [`RouteTable`] へ登録され、以後変更されない。
pub struct Route {
    method:  Method,
    path:    String,
    handler: BoxedHandler,
}

impl Route {
    /// 任意のメソッドでルートを定義する
    pub fn new<H, T>(method: Method, path: impl Into<String>, handler: H) -> Self
    where
        H: Handler<T, ()> + Sync,
        T: 'static,
    {
        let handler: BoxedHandler = Arc::new(move |req| Box::pin(handler.clone().call(req, ())));
        Self {
            method,
            path: path.into(),
            handler,
        }
    }

    /// GET ルートを定義する
    pub fn get<H, T>(path: impl Into<String>, handler: H) -> Self
    where
        H: Handler<T, ()> + Sync,
        T: 'static,
    {
        Self::new(Method::GET, path, handler)
    }

    /// POST ルートを定義する
    pub fn post<H, T>(path: impl Into<String>, handler: H) -> Self
    where
        H: Handler<T, ()> + Sync,
        T: 'static,
    {
        Self::new(Method::POST, path, handler)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

/// ルートテーブル
///
/// (メソッド, パス) からハンドラへの対応表。
/// 起動時に [`register`](Self::register) で組み立て、
/// [`into_router`](Self::into_router) でリスナーに引き渡した後は不変。
#[derive(Default)]
pub struct RouteTable {
    routes: HashMap<(Method, String), BoxedHandler>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// ルートを登録する
    ///
    /// 同じ (メソッド, パス) への再登録は後勝ちで置き換え、警告ログを出す。
    /// 起動時の設定ミスを検出するためのシグナルであり、実行時には発生しない。
    pub fn register(&mut self, route: Route) {
        let Route {
            method,
            path,
            handler,
        } = route;

        if self
            .routes
            .insert((method.clone(), path.clone()), handler)
            .is_some()
        {
            tracing::warn!(%method, %path, "登録済みのルートを置き換えます");
        }
    }

    /// (メソッド, パス) に対応するハンドラを引く
    ///
    /// 完全一致のみ。パスパラメータや前方一致は解決しない。
    /// 未登録の組には `None` を返し、HTTP 層では 404 になる。
    pub fn dispatch(&self, method: &Method, path: &str) -> Option<&BoxedHandler> {
        self.routes.get(&(method.clone(), path.to_string()))
    }

    /// 登録済みルート数を返す
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// テーブルを消費して axum の `Router` に変換する
    ///
    /// すべてのリクエストはテーブルの完全一致検索でディスパッチされ、
    /// 一致しない場合はボディなしの 404 を返す。
    pub fn into_router(self) -> Router {
        let table = Arc::new(self);

        Router::new().fallback(move |req: Request| {
            let table = Arc::clone(&table);
            async move {
                let method = req.method().clone();
                let path = req.uri().path().to_string();

                match table.dispatch(&method, &path) {
                    Some(handler) => handler(req).await,
                    None => StatusCode::NOT_FOUND.into_response(),
                }
            }
        })
    }
}

/// ルートテーブル方式の HTTP サーバー
///
/// 設定 → ルート登録 → 起動、の流れをビルダースタイルでまとめた
/// 社内ひな形。単一バイナリの小さな API をすばやく立ち上げる用途を
/// 想定しており、ミドルウェアはリクエストトレーシングのみを積む。
pub struct HttpServer {
    service_name: String,
    host:         String,
    port:         u16,
    table:        RouteTable,
}

impl HttpServer {
    /// 新しいサーバーを作成する
    ///
    /// バインドアドレスは `0.0.0.0:8081` がデフォルト。
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            host:         "0.0.0.0".to_string(),
            port:         8081,
            table:        RouteTable::new(),
        }
    }

    /// バインドアドレスを設定する
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// ポート番号を設定する
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// ルートを登録する
    pub fn register_route(mut self, route: Route) -> Self {
        self.table.register(route);
        self
    }

    /// リスナーを起動してリクエストの受付を開始する
    ///
    /// この呼び出し以降、ルートテーブルは変更できない。
    /// 戻るのはリスナーが停止したときのみ。
    pub async fn start(self) -> std::io::Result<()> {
        let app = self.table.into_router().layer(TraceLayer::new_for_http());

        let addr: SocketAddr = format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

        let listener = TcpListener::bind(addr).await?;
        tracing::info!("{} サーバーが起動しました: {}", self.service_name, addr);

        axum::serve(listener, app).await
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use tower::ServiceExt;

    use super::*;

    async fn ok_handler() -> &'static str {
        "ok"
    }

    fn table_with_example() -> RouteTable {
        let mut table = RouteTable::new();
        table.register(Route::get("/example", ok_handler));
        table
    }

    // ===== dispatch のテスト =====

    #[test]
    fn test_登録したルートをdispatchできる() {
        let table = table_with_example();

        assert!(table.dispatch(&Method::GET, "/example").is_some());
    }

    #[test]
    fn test_未登録のパスはnoneを返す() {
        let table = table_with_example();

        assert!(table.dispatch(&Method::GET, "/missing").is_none());
    }

    #[test]
    fn test_メソッド違いはnoneを返す() {
        let table = table_with_example();

        assert!(table.dispatch(&Method::POST, "/example").is_none());
        assert!(table.dispatch(&Method::DELETE, "/example").is_none());
    }

    #[test]
    fn test_完全一致以外では一致しない() {
        let table = table_with_example();

        assert!(table.dispatch(&Method::GET, "/example/").is_none());
        assert!(table.dispatch(&Method::GET, "/example/sub").is_none());
        assert!(table.dispatch(&Method::GET, "/exam").is_none());
    }

    #[test]
    fn test_重複登録は後勝ちで置き換える() {
        let mut table = table_with_example();
        table.register(Route::get("/example", ok_handler));

        assert_eq!(table.len(), 1);
    }

    // ===== into_router のテスト =====

    #[tokio::test]
    async fn test_登録ルートへのリクエストは200を返す() {
        let router = table_with_example().into_router();

        let request = Request::builder()
            .method(Method::GET)
            .uri("/example")
            .body(Body::empty())
            .unwrap();

        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_未登録パスへのリクエストは404を返す() {
        let router = table_with_example().into_router();

        let request = Request::builder()
            .method(Method::GET)
            .uri("/missing")
            .body(Body::empty())
            .unwrap();

        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_メソッド違いのリクエストも404を返す() {
        let router = table_with_example().into_router();

        let request = Request::builder()
            .method(Method::POST)
            .uri("/example")
            .body(Body::empty())
            .unwrap();

        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
