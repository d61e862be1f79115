mod handlers;
mod models;
mod routes;
mod utils;

use axum::serve;
use tokio::net::TcpListener;
use tracing::info;
use utils::config::Config;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    routes::init_tracing();

    let config = Config::init();
    let addr = format!("0.0.0.0:{}", config.port);
    let app = routes::make_app(config);

    let listener = TcpListener::bind(&addr).await;
    info!("Listening on http://{addr}");

    match listener {
        Ok(res) => serve(res, app).await.unwrap(),
        Err(err) => panic!("{}", err),
    }
}
