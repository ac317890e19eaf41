use hangroom::config::Config;
use hangroom::{metrics, startup};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() {
    std_logger::Config::logfmt().init();
    metrics::register_metrics();

    let config = Config::get().expect("Unable to get the Config.");
    let listener = TcpListener::bind(config.application.address())
        .await
        .expect("Failed to bind the application address.");

    if let Err(error) = startup::create_web_server(config, listener).await {
        log::error!("The web server stopped. Error: '{error}'.");
    }
}
