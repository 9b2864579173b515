/// ゲストRSVP HTTP Lambdaエントリポイント
///
/// Lambda Function URL経由のHTTPリクエストを処理し、
/// RSVPの記録（POST）と一覧（GET）を提供する。
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use tracing::info;
use wedding_guest_api::application::GuestHandler;
use wedding_guest_api::infrastructure::{init_logging, GuestApiConfig};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    info!("ゲストRSVP Lambda関数を初期化");

    // Lambda関数を実行
    run(service_fn(handler)).await
}

/// HTTPリクエストハンドラー
///
/// 呼び出しごとに環境変数から設定を読み込み、
/// ハンドラーに処理を委譲する。呼び出し間で状態を共有しない。
async fn handler(request: Request) -> Result<Response<Body>, Error> {
    let config = GuestApiConfig::from_env();
    GuestHandler::new(config).handle(request).await
}
