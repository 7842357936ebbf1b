use std::sync::Arc;

use hap::Bridge;
use hyunho::Client;
use hyunho_bridge::web_service::router;
use hyunho_bridge::{Config, ErasedError, HyunhoPlatform};

use log::info;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::Mutex;
use tokio::task;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_PORT: u16 = 51826;
const DEFAULT_ACCESSORY_CACHE: &str = "accessories.json";

#[tokio::main]
async fn main() -> Result<(), ErasedError> {
    pretty_env_logger::init_timed();

    info!("hyunho-bridge version {VERSION}");

    let config_path = std::env::var("CONFIG").expect("set ENV variable CONFIG");
    let config = Config::load(&config_path)?;
    info!("loaded {} accessories from {config_path}", config.accessories.len());

    let control_server =
        std::env::var("CONTROL_SERVER").unwrap_or_else(|_| config.control_server.clone());
    let client = Client::new(&control_server)?;
    info!("using control server {control_server}");

    let cache_path = std::env::var("ACCESSORY_CACHE")
        .unwrap_or_else(|_| DEFAULT_ACCESSORY_CACHE.to_string());
    let mut bridge = Bridge::restore(&cache_path)?;

    let mut platform = HyunhoPlatform::new(config, Arc::new(client));
    bridge.launch(&mut platform)?;

    let port = match std::env::var("PORT") {
        Ok(port) => port.parse()?,
        Err(_) => DEFAULT_PORT,
    };

    let app = router(Arc::new(Mutex::new(bridge)));
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Listening http://0.0.0.0:{port}");

    let server_handle = task::spawn(async move { axum::serve(listener, app).await });

    tokio::select! {
        result = server_handle => { result??; },
        _ = tokio::spawn(async move {
            let mut sig = signal(SignalKind::terminate()).unwrap();
            sig.recv().await
        }) => { info!("got SIGTERM, exiting...") },
    };

    Ok(())
}
