// ゲストリクエストハンドラー
//
// HTTPメソッドで一度だけディスパッチし、RSVPの記録（POST）と
// 一覧（GET）をデータベースに対して実行してJSONレスポンスを構築する。

use lambda_http::http::header::{
    HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE,
};
use lambda_http::http::Method;
use lambda_http::{Body, Error, Request, Response};
use serde_json::json;
use tracing::{info, warn};

use crate::domain::NewGuest;
use crate::infrastructure::{GuestApiConfig, GuestStore};

/// リクエスト種別
///
/// HTTPメソッドに対応する閉じたバリアント集合。
/// エントリで一度だけ判定し、以後は文字列比較を行わない。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// CORSプリフライト（OPTIONS）
    Preflight,
    /// ゲスト作成（POST）
    Create,
    /// ゲスト一覧（GET）
    List,
    /// 上記以外のメソッド（405で応答）
    Unsupported,
}

impl RequestKind {
    /// HTTPメソッドからリクエスト種別を判定する
    pub fn from_method(method: &Method) -> Self {
        match *method {
            Method::OPTIONS => RequestKind::Preflight,
            Method::POST => RequestKind::Create,
            Method::GET => RequestKind::List,
            _ => RequestKind::Unsupported,
        }
    }
}

/// ゲストリクエストハンドラー
///
/// 1リクエストにつき最大1回のデータベースラウンドトリップを行い、
/// HTTPレスポンスを返す。呼び出し間で状態を共有しない。
pub struct GuestHandler {
    /// API設定（データベース接続情報）
    config: GuestApiConfig,
}

impl GuestHandler {
    /// 新しいハンドラーを作成
    pub fn new(config: GuestApiConfig) -> Self {
        Self { config }
    }

    /// リクエストを処理してレスポンスを生成
    ///
    /// - OPTIONS: データベースに触れず、CORSヘッダー付きの空200を返す
    /// - 接続情報が未設定: 構造化された500を返す
    /// - POST: 1行挿入して `{"success": true, "id": <id>}` を返す
    /// - GET: 全件を作成日時の降順で `{"guests": [...]}` として返す
    /// - その他: `{"error": "Method not allowed"}` の405を返す
    ///
    /// 不正なボディJSONやデータベースエラーはここでは捕捉せず、
    /// `Err`としてランタイムに伝播する。
    pub async fn handle(&self, request: Request) -> Result<Response<Body>, Error> {
        let kind = RequestKind::from_method(request.method());

        // プリフライトはデータベースに一切アクセスしない
        if kind == RequestKind::Preflight {
            return Self::preflight_response();
        }

        // 接続情報の確認（接続は試みない）
        let Some(db_path) = self.config.database_url() else {
            warn!("データベース接続が未設定");
            return Self::json_response(500, &json!({"error": "Database connection not configured"}));
        };
        let store = GuestStore::new(db_path);

        match kind {
            RequestKind::Create => {
                let new_guest = Self::parse_create_body(request.body())?;
                let guest_id = store.insert_guest(&new_guest).await?;
                info!(guest_id, "ゲストを登録");
                Self::json_response(200, &json!({"success": true, "id": guest_id}))
            }
            RequestKind::List => {
                let guests = store.list_guests().await?;
                info!(guest_count = guests.len(), "ゲスト一覧を取得");
                Self::json_response(200, &json!({"guests": guests}))
            }
            RequestKind::Unsupported => {
                warn!(method = %request.method(), "未対応のメソッド");
                Self::json_response(405, &json!({"error": "Method not allowed"}))
            }
            // エントリで早期リターン済み
            RequestKind::Preflight => Self::preflight_response(),
        }
    }

    /// POSTボディを作成ペイロードとしてパースする
    ///
    /// ボディの欠落は空オブジェクト扱い。不正なJSONはエラーとして
    /// 呼び出し元に伝播する。
    fn parse_create_body(body: &Body) -> Result<NewGuest, Error> {
        let new_guest = match body {
            Body::Empty => NewGuest::default(),
            Body::Text(text) if text.trim().is_empty() => NewGuest::default(),
            Body::Text(text) => serde_json::from_str(text)?,
            Body::Binary(bytes) => serde_json::from_slice(bytes)?,
            // Bodyはnon_exhaustiveだが現行バリアントは上で網羅済み
            _ => unreachable!(),
        };
        Ok(new_guest)
    }

    /// プリフライト用の空200レスポンスを生成
    ///
    /// 固定のCORSヘッダーセットのみを持つ:
    /// - Access-Control-Allow-Origin: *
    /// - Access-Control-Allow-Methods: GET, POST, OPTIONS
    /// - Access-Control-Allow-Headers: Content-Type
    fn preflight_response() -> Result<Response<Body>, Error> {
        let response = Response::builder()
            .status(200)
            .header(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"))
            .header(
                ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static("GET, POST, OPTIONS"),
            )
            .header(
                ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static("Content-Type"),
            )
            .body(Body::Empty)?;
        Ok(response)
    }

    /// JSONレスポンスを生成
    ///
    /// プリフライト以外の全レスポンスに共通のヘッダーを付与する:
    /// - Content-Type: application/json
    /// - Access-Control-Allow-Origin: *
    fn json_response(status: u16, body: &serde_json::Value) -> Result<Response<Body>, Error> {
        let response = Response::builder()
            .status(status)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"))
            .body(Body::Text(serde_json::to_string(body)?))?;
        Ok(response)
    }
}
